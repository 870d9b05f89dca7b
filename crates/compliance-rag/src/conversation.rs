//! Single-slot conversation memory for "explain more" follow-ups

use parking_lot::Mutex;

/// One question/answer pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    /// Question as sent to the query engine (lowercased)
    pub question: String,
    /// Answer returned by the query engine
    pub answer: String,
}

/// Process-wide memory of the most recent successful exchange
///
/// There is exactly one slot, shared by every caller: it is not keyed by
/// user or session, so concurrent users read and overwrite each other's last
/// answer. The mutex only prevents torn writes. Question and answer are
/// stored together, so both are set or neither is.
#[derive(Debug, Default)]
pub struct ConversationState {
    last: Mutex<Option<Exchange>>,
}

impl ConversationState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the remembered exchange
    pub fn remember(&self, question: impl Into<String>, answer: impl Into<String>) {
        *self.last.lock() = Some(Exchange {
            question: question.into(),
            answer: answer.into(),
        });
    }

    /// Most recent exchange, if any
    pub fn last(&self) -> Option<Exchange> {
        self.last.lock().clone()
    }

    /// Most recent answer, if any
    pub fn last_answer(&self) -> Option<String> {
        self.last.lock().as_ref().map(|e| e.answer.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let state = ConversationState::new();
        assert!(state.last().is_none());
        assert!(state.last_answer().is_none());
    }

    #[test]
    fn test_remember_overwrites() {
        let state = ConversationState::new();
        state.remember("what is gst?", "18%");
        state.remember("what is csr?", "2%");

        assert_eq!(
            state.last(),
            Some(Exchange {
                question: "what is csr?".to_string(),
                answer: "2%".to_string(),
            })
        );
    }

    #[test]
    fn test_shared_across_threads() {
        let state = std::sync::Arc::new(ConversationState::new());
        let writer = {
            let state = state.clone();
            std::thread::spawn(move || state.remember("q from user a", "a's answer"))
        };
        writer.join().unwrap();

        // Another caller sees the first caller's answer.
        assert_eq!(state.last_answer().as_deref(), Some("a's answer"));
    }
}
