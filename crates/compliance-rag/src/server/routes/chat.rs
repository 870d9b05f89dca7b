//! Chat page and question endpoint

use axum::{extract::State, response::Html, Json};

use crate::server::state::AppState;
use crate::types::{AnswerResponse, ComplianceRequest};

const INDEX_HTML: &str = include_str!("../../../static/index.html");

/// GET / - serve the chat page
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// POST /ask - answer a question
///
/// Always 200 once the body parses; engine failures come back as the
/// apology message.
pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<ComplianceRequest>,
) -> Json<AnswerResponse> {
    tracing::info!("Question: \"{}\"", request.question);

    let answer = state.chat().ask(&request.question).await;
    Json(AnswerResponse::new(answer))
}
