use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::metadata::MaterialMetadata;
use crate::materials::ingest::{material_from_file, material_from_link};
use crate::models::MaterialSource;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LinkRequest {
    pub link: String,
}

/// GET /api/v1/materials
pub async fn handle_list_materials(State(state): State<AppState>) -> Json<Vec<MaterialSource>> {
    let session = state.session.lock().await;
    Json(session.materials().list().to_vec())
}

/// POST /api/v1/materials/upload
///
/// Multipart form, one part per file. Every file is extracted before any is
/// stored, so a bad file leaves the store untouched.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Vec<MaterialSource>>), AppError> {
    let mut files: Vec<(String, Bytes)> = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("multipart data", e))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(&format!("'{file_name}'"), e))?;
        files.push((file_name, data));
    }

    if files.is_empty() {
        return Err(AppError::Validation(
            "Multipart form must include at least one file".to_string(),
        ));
    }

    let materials = tokio::task::spawn_blocking(move || {
        files
            .iter()
            .map(|(name, data)| material_from_file(name, data))
            .collect::<Result<Vec<_>, _>>()
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Extraction task failed: {e}")))??;

    let mut session = state.session.lock().await;
    for material in &materials {
        session.materials_mut().add(material.clone());
        info!("Material added: '{}' ({} chars)", material.name, material.content.len());
    }

    Ok((StatusCode::CREATED, Json(materials)))
}

/// Oversized bodies answer 413; any other malformed form is a bad request.
fn multipart_error(what: &str, err: MultipartError) -> AppError {
    let message = format!("Failed to read {what}: {}", err.body_text());
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::Validation(message)
    }
}

/// POST /api/v1/materials/link
///
/// A blank link is ignored and answered with 204.
pub async fn handle_add_link(
    State(state): State<AppState>,
    Json(request): Json<LinkRequest>,
) -> Response {
    let Some(material) = material_from_link(&request.link) else {
        return StatusCode::NO_CONTENT.into_response();
    };

    state.session.lock().await.materials_mut().add(material.clone());
    info!("Link material added: '{}'", material.name);
    (StatusCode::CREATED, Json(material)).into_response()
}

/// DELETE /api/v1/materials/:id
///
/// Removing an unknown id is a no-op and still answers 204.
pub async fn handle_remove_material(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    if state.session.lock().await.materials_mut().remove(id) {
        info!("Material removed: {id}");
    }
    StatusCode::NO_CONTENT
}

/// POST /api/v1/materials/:id/analyze
pub async fn handle_analyze_material(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MaterialMetadata>, AppError> {
    let content = state
        .session
        .lock()
        .await
        .materials()
        .get(id)
        .map(|m| m.content.clone())
        .ok_or_else(|| AppError::NotFound(format!("Material {id} not found")))?;

    let metadata = state.analyzer.analyze(&content).await?;
    Ok(Json(metadata))
}
