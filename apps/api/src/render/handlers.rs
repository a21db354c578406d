use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::render::{export_test, ExportFormat};
use crate::state::AppState;

/// GET /api/v1/tests/:id/export/:format
///
/// `docx` streams the rendered paper as an attachment; `pdf` answers 501.
/// Stored tests are never touched by an export, successful or not.
pub async fn handle_export(
    State(state): State<AppState>,
    Path((id, format)): Path<(Uuid, ExportFormat)>,
) -> Result<Response, AppError> {
    let test = state
        .session
        .lock()
        .await
        .test(id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Test {id} not found")))?;

    let exported = tokio::task::spawn_blocking(move || export_test(&test, format))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Render task failed: {e}")))??;

    info!(
        "Exported '{}' ({} bytes)",
        exported.file_name,
        exported.bytes.len()
    );

    let disposition = format!("attachment; filename=\"{}\"", exported.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, exported.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        exported.bytes,
    )
        .into_response())
}
