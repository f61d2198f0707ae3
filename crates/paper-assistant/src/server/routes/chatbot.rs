//! Research chatbot endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::time::Instant;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{ChatbotRequest, ChatbotResponse};

/// POST /chatbot - answer a question across stored papers
pub async fn chatbot(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ChatbotRequest>, JsonRejection>,
) -> Result<Json<ChatbotResponse>> {
    let Json(request) = payload?;
    let query = request
        .query()
        .map(str::to_string)
        .ok_or_else(|| Error::validation("Query is required"))?;

    let start = Instant::now();
    tracing::info!("Query: \"{}\"", query);

    let answer = state.assistant().answer_query(&query).await?;

    tracing::info!(
        "Answered in {}ms ({}, {} documents)",
        start.elapsed().as_millis(),
        answer.relevance.label(),
        answer.documents_retrieved
    );

    Ok(Json(ChatbotResponse {
        query,
        response: answer.response,
    }))
}
