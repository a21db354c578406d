use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{TestOutput, TestView, ViewPanel};
use crate::session::{DashboardSummary, Tab};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub active_tab: Tab,
    pub viewing_test_id: Option<Uuid>,
    pub is_loading: bool,
    pub material_count: usize,
    pub test_count: usize,
    /// The overlay test, or null when nothing (or an unknown id) is open.
    pub current_test: Option<TestOutput>,
}

#[derive(Debug, Deserialize)]
pub struct SelectTabRequest {
    pub tab: Tab,
}

#[derive(Debug, Deserialize)]
pub struct ViewTestRequest {
    pub test_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct TestViewResponse<'a> {
    pub test_id: Uuid,
    pub title: &'a str,
    pub view: TestView,
    pub panels: Vec<ViewPanel<'a>>,
}

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionView> {
    let session = state.session.lock().await;
    Json(SessionView {
        active_tab: session.active_tab(),
        viewing_test_id: session.viewing_test_id(),
        is_loading: session.is_loading(),
        material_count: session.materials().len(),
        test_count: session.tests().len(),
        current_test: session.current_test().cloned(),
    })
}

/// PUT /api/v1/session/tab
pub async fn handle_select_tab(
    State(state): State<AppState>,
    Json(request): Json<SelectTabRequest>,
) -> StatusCode {
    state.session.lock().await.select_tab(request.tab);
    StatusCode::NO_CONTENT
}

/// PUT /api/v1/session/viewing
pub async fn handle_view_test(
    State(state): State<AppState>,
    Json(request): Json<ViewTestRequest>,
) -> StatusCode {
    state.session.lock().await.view_test(request.test_id);
    StatusCode::NO_CONTENT
}

/// DELETE /api/v1/session/viewing
pub async fn handle_close_test(State(state): State<AppState>) -> StatusCode {
    state.session.lock().await.close_test();
    StatusCode::NO_CONTENT
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard(State(state): State<AppState>) -> Json<DashboardSummary> {
    Json(state.session.lock().await.dashboard())
}

/// GET /api/v1/tests
pub async fn handle_list_tests(State(state): State<AppState>) -> Json<Vec<TestOutput>> {
    Json(state.session.lock().await.tests().to_vec())
}

/// DELETE /api/v1/tests/:id
pub async fn handle_delete_test(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    if state.session.lock().await.delete_test(id) {
        info!("Test deleted: {id}");
    }
    StatusCode::NO_CONTENT
}

/// GET /api/v1/tests/:id/views/:view
pub async fn handle_test_view(
    State(state): State<AppState>,
    Path((id, view)): Path<(Uuid, TestView)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let session = state.session.lock().await;
    let test = session
        .test(id)
        .ok_or_else(|| AppError::NotFound(format!("Test {id} not found")))?;

    let response = TestViewResponse {
        test_id: test.id,
        title: &test.title,
        view,
        panels: test.view(view),
    };
    let body = serde_json::to_value(&response)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize view: {e}")))?;
    Ok(Json(body))
}
