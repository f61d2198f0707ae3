//! PDF upload endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::MessageResponse;

/// POST /upload - multipart `title` + `file`
pub async fn upload_paper(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MessageResponse>> {
    let mut title: Option<String> = None;
    let mut file: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::validation(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "title" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| Error::validation(format!("Failed to read title: {}", e)))?;
                title = Some(text);
            }
            "file" => {
                let filename = field.file_name().unwrap_or("upload.pdf").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| Error::validation(format!("Failed to read file: {}", e)))?;
                tracing::info!("Received file: {} ({} bytes)", filename, data.len());
                file = Some(data.to_vec());
            }
            other => tracing::debug!("Ignoring multipart field '{}'", other),
        }
    }

    let (Some(title), Some(file)) = (title.filter(|t| !t.trim().is_empty()), file) else {
        return Err(Error::validation("Title and file are required"));
    };

    state.assistant().upload(&title, file).await?;

    Ok(Json(MessageResponse {
        message: "PDF uploaded and stored successfully".to_string(),
    }))
}
