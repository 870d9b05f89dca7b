//! Routes for the chat UI and question endpoint

pub mod chat;

use axum::{
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build the chat routes
pub fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(chat::index))
        .route("/ask", post(chat::ask))
}
