//! compliance-rag: PDF-backed compliance chatbot
//!
//! At startup every page of every PDF in the configured folder is embedded
//! into an in-memory index. Questions posted to `/ask` are answered by
//! retrieving the closest pages and completing a QA prompt, with a
//! single-slot memory so "explain more" follow-ups can elaborate on the
//! previous answer. The `compliance` module carries standalone formulas
//! (CSR, tax, GST, PF/ESI, billing dates) and question parsing helpers.

pub mod chat;
pub mod compliance;
pub mod config;
pub mod conversation;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;

pub use chat::ChatService;
pub use config::RagConfig;
pub use conversation::ConversationState;
pub use error::{Error, Result};
pub use retrieval::{QueryEngine, VectorIndex};
pub use types::{
    document::Document,
    query::{AnswerResponse, ComplianceRequest},
};
