use crate::dtos::UploadResponse;
use crate::services::metrics;
use crate::startup::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;

pub const UPLOAD_FIELD: &str = "file";
pub const ALLOWED_MIME_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// Store the `file` part of a multipart form in the upload directory under
/// the client's file name. Only JPEG and PNG parts are accepted.
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Failed to read multipart field: {}", e))
    })? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let mime_type = normalize_mime_type(field.content_type().unwrap_or_default());
        if !ALLOWED_MIME_TYPES.contains(&mime_type.as_str()) {
            tracing::info!(mime_type = %mime_type, "Rejected upload with unsupported type");
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "The format file is not valid."
            )));
        }

        let file_name = sanitize_file_name(field.file_name().unwrap_or_default())?;

        let data = field.bytes().await.map_err(|e| {
            AppError::BadRequest(anyhow::anyhow!("Failed to read file bytes: {}", e))
        })?;

        let max_bytes = state.config.upload.max_bytes;
        if data.len() > max_bytes {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "File too large (max {} bytes)",
                max_bytes
            )));
        }

        state.storage.upload(&file_name, &data).await.map_err(|e| {
            tracing::error!(file_name = %file_name, "Failed to store upload: {}", e);
            e
        })?;

        metrics::file_uploaded(&mime_type);
        tracing::info!(
            file_name = %file_name,
            mime_type = %mime_type,
            size = data.len(),
            "File uploaded"
        );

        return Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                message: "File Uploaded".to_string(),
            }),
        ));
    }

    Err(AppError::BadRequest(anyhow::anyhow!("No file uploaded")))
}

/// `image/PNG; name=x` -> `image/png`
fn normalize_mime_type(raw: &str) -> String {
    raw.split(';').next().unwrap_or_default().trim().to_ascii_lowercase()
}

/// Keep only the last path component of a client file name; browsers on
/// Windows may send full paths with backslashes.
fn sanitize_file_name(raw: &str) -> Result<String, AppError> {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or_default().trim();

    if name.is_empty() || name == "." || name == ".." {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Missing or invalid file name"
        )));
    }

    Ok(name.to_string())
}
