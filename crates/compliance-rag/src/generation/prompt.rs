//! Prompt templates for retrieval-augmented answers

use crate::retrieval::SearchResult;

/// Prompt builder for compliance questions
pub struct PromptBuilder;

impl PromptBuilder {
    /// Join retrieved page texts into a single context block
    pub fn build_context(results: &[SearchResult]) -> String {
        results
            .iter()
            .map(|r| r.document.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Build the question-answering prompt around a context block
    pub fn build_qa_prompt(question: &str, context: &str) -> String {
        format!(
            "Context information is below.\n\
             ---------------------\n\
             {context}\n\
             ---------------------\n\
             Given the context information and not prior knowledge, answer the query.\n\
             Query: {question}\n\
             Answer: ",
            context = context,
            question = question,
        )
    }
}
