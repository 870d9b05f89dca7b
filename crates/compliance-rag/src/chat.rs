//! Question routing for the chat endpoint

use std::sync::Arc;

use crate::conversation::ConversationState;
use crate::retrieval::QueryEngine;

/// Phrases that ask for elaboration of the previous answer
pub const DETAIL_TRIGGERS: [&str; 2] = ["in detail", "can you explain more"];

/// Reply to a follow-up when there is nothing to elaborate on
pub const CLARIFICATION_MESSAGE: &str =
    "I'm not sure what you're referring to. Could you please specify the question?";

/// Reply when the query engine fails for any reason
pub const APOLOGY_MESSAGE: &str = "Sorry, I couldn't process your question.";

/// Wrap a previous answer as an elaboration
pub fn detailed_response(previous_answer: &str) -> String {
    format!(
        "Here's more detail on that: {}. You can ask more specific questions if needed!",
        previous_answer
    )
}

/// Whether a lowercased question asks for more detail
pub fn is_detail_request(question: &str) -> bool {
    DETAIL_TRIGGERS.iter().any(|t| question.contains(t))
}

/// Routes questions between follow-up elaboration and the query engine
#[derive(Clone)]
pub struct ChatService {
    engine: Arc<dyn QueryEngine>,
    conversation: Arc<ConversationState>,
}

impl ChatService {
    /// Create a chat service over a query engine and conversation state
    pub fn new(engine: Arc<dyn QueryEngine>, conversation: Arc<ConversationState>) -> Self {
        Self {
            engine,
            conversation,
        }
    }

    /// Conversation state shared by all callers
    pub fn conversation(&self) -> &ConversationState {
        &self.conversation
    }

    /// Answer a question
    ///
    /// Never fails: engine errors become [`APOLOGY_MESSAGE`] and leave the
    /// conversation state untouched.
    pub async fn ask(&self, question: &str) -> String {
        let question = question.to_lowercase();

        if is_detail_request(&question) {
            return match self.conversation.last_answer() {
                Some(answer) => detailed_response(&answer),
                None => CLARIFICATION_MESSAGE.to_string(),
            };
        }

        match self.engine.query(&question).await {
            Ok(answer) => {
                self.conversation.remember(question, answer.clone());
                answer
            }
            Err(e) => {
                tracing::warn!("Query failed: {}", e);
                APOLOGY_MESSAGE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::retrieval::engine::MockQueryEngine;

    fn service(engine: MockQueryEngine) -> ChatService {
        ChatService::new(Arc::new(engine), Arc::new(ConversationState::new()))
    }

    #[tokio::test]
    async fn test_detail_without_history_asks_for_clarification() {
        let mut engine = MockQueryEngine::new();
        engine.expect_query().never();
        let chat = service(engine);

        for q in ["Explain GST in detail", "IN DETAIL please", "can you explain more"] {
            assert_eq!(chat.ask(q).await, CLARIFICATION_MESSAGE);
        }
    }

    #[tokio::test]
    async fn test_question_is_lowercased_and_remembered() {
        let mut engine = MockQueryEngine::new();
        engine
            .expect_query()
            .withf(|q| q.trim() == "what is the csr threshold?")
            .times(1)
            .returning(|_| Ok("Net profit above 5 crore".to_string()));
        let chat = service(engine);

        let answer = chat.ask("What is the CSR threshold?").await;
        assert_eq!(answer, "Net profit above 5 crore");

        let last = chat.conversation().last().unwrap();
        assert_eq!(last.question, "what is the csr threshold?");
        assert_eq!(last.answer, "Net profit above 5 crore");
    }

    #[tokio::test]
    async fn test_follow_up_elaborates_previous_answer() {
        let mut engine = MockQueryEngine::new();
        engine
            .expect_query()
            .times(1)
            .returning(|_| Ok("GST is 18%".to_string()));
        let chat = service(engine);

        chat.ask("What is GST?").await;
        let reply = chat.ask("Can you explain more").await;

        assert_eq!(
            reply,
            "Here's more detail on that: GST is 18%. You can ask more specific questions if needed!"
        );
    }

    #[tokio::test]
    async fn test_failure_returns_apology_and_keeps_state() {
        let mut engine = MockQueryEngine::new();
        let mut calls = 0;
        engine.expect_query().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Ok("PF is 12% of salary".to_string())
            } else {
                Err(Error::llm("connection reset"))
            }
        });
        let chat = service(engine);

        chat.ask("what is pf?").await;
        assert_eq!(chat.ask("what is esi?").await, APOLOGY_MESSAGE);

        let last = chat.conversation().last().unwrap();
        assert_eq!(last.question, "what is pf?");
        assert!(chat.ask("pf in detail").await.contains("PF is 12% of salary"));
    }

    #[test]
    fn test_is_detail_request() {
        assert!(is_detail_request("explain tds in detail"));
        assert!(is_detail_request("can you explain more about it"));
        assert!(!is_detail_request("explain tds"));
    }
}
