//! Core types for the compliance service

pub mod document;
pub mod query;

pub use document::Document;
pub use query::{AnswerResponse, ComplianceRequest};
