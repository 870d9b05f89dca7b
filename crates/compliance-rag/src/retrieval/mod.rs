//! In-memory vector index and the query engine built on it

pub mod engine;
pub mod index;

pub use engine::{QueryEngine, RetrieverQueryEngine};
pub use index::{cosine_similarity, SearchResult, VectorIndex};
