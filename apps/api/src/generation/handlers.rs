//! Axum route handlers for the Generation API.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::TestOutput;
use crate::session::workflow::run_generation;
use crate::state::AppState;

fn default_versions() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// Optional customization, e.g. units or grammar points to prioritise.
    #[serde(default)]
    pub prompt: String,
    #[serde(default = "default_versions")]
    pub versions: u32,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub tests: Vec<TestOutput>,
}

/// POST /api/v1/tests/generate
///
/// Runs `versions` sequential generation calls. The run is spawned on its own
/// task so a dropped connection cannot abort it halfway.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<(StatusCode, Json<GenerateResponse>), AppError> {
    let run = run_generation(
        state.session.clone(),
        state.generator.clone(),
        request.prompt,
        request.versions,
    );

    let tests = tokio::spawn(run)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Generation task failed: {e}")))??;

    Ok((StatusCode::CREATED, Json(GenerateResponse { tests })))
}
