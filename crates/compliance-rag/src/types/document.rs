//! Document type produced by the PDF loader

use serde::{Deserialize, Serialize};

/// Raw text of a single PDF page
///
/// Pages carry no metadata beyond their text; they are created once at
/// startup and never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Extracted page text
    pub text: String,
}

impl Document {
    /// Create a new document from page text
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl From<String> for Document {
    fn from(text: String) -> Self {
        Self { text }
    }
}
