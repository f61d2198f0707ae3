//! API routes for the paper assistant

pub mod chatbot;
pub mod papers;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/upload",
            post(upload::upload_paper).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/summary", post(papers::summarize))
        .route("/createMcq", post(papers::create_mcqs))
        .route("/chatbot", post(chatbot::chatbot))
        .route("/fetch-titles", get(papers::fetch_titles))
        .route("/paper/:title/pdf", get(papers::download_pdf))
}
