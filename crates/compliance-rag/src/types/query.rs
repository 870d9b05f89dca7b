//! Request and response bodies for `POST /ask`

use serde::{Deserialize, Serialize};

/// Chat question submitted by the UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceRequest {
    /// Free-text question
    pub question: String,
}

/// Answer returned for every handled question, including failures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResponse {
    /// Answer text
    pub answer: String,
}

impl AnswerResponse {
    /// Create a new response
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
        }
    }
}
