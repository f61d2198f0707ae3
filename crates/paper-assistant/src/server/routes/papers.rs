//! Per-paper endpoints: summary, MCQs, titles and PDF download

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::assistant::{McqOutcome, SummaryOutcome};
use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{McqResponse, SummaryRequest, SummaryResponse, TitlesResponse};

fn required_title(payload: std::result::Result<Json<SummaryRequest>, JsonRejection>) -> Result<String> {
    let Json(request) = payload?;
    request
        .title()
        .map(str::to_string)
        .ok_or_else(|| Error::validation("Title is required"))
}

/// POST /summary - summarize a stored paper
pub async fn summarize(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SummaryRequest>, JsonRejection>,
) -> Result<Json<SummaryResponse>> {
    let title = required_title(payload)?;
    tracing::info!("Summary requested for '{}'", title);

    let summary = match state.assistant().summarize(&title).await? {
        SummaryOutcome::Summary(text) => text,
        SummaryOutcome::NoContent => String::new(),
    };

    Ok(Json(SummaryResponse { title, summary }))
}

/// POST /createMcq - multiple-choice questions for a stored paper
pub async fn create_mcqs(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SummaryRequest>, JsonRejection>,
) -> Result<Json<McqResponse>> {
    let title = required_title(payload)?;
    tracing::info!("MCQs requested for '{}'", title);

    let mcqs = match state.assistant().generate_mcqs(&title).await? {
        McqOutcome::Generated(parse) => parse.mcqs,
        McqOutcome::NoContent => Vec::new(),
    };

    Ok(Json(McqResponse { title, mcqs }))
}

/// GET /fetch-titles - distinct stored titles
pub async fn fetch_titles(State(state): State<AppState>) -> Result<Json<TitlesResponse>> {
    let titles = state.assistant().titles().await?;
    Ok(Json(TitlesResponse { titles }))
}

/// GET /paper/:title/pdf - original upload
pub async fn download_pdf(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Response> {
    let bytes = state
        .assistant()
        .paper_file(&title)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Paper '{}'", title)))?;

    Ok(([(header::CONTENT_TYPE, "application/pdf")], bytes).into_response())
}
