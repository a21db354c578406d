pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};

use crate::generation::handlers as generation;
use crate::materials::handlers as materials;
use crate::render::handlers as render;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Session / view state
        .route("/api/v1/session", get(session::handle_get_session))
        .route("/api/v1/session/tab", put(session::handle_select_tab))
        .route(
            "/api/v1/session/viewing",
            put(session::handle_view_test).delete(session::handle_close_test),
        )
        .route("/api/v1/dashboard", get(session::handle_dashboard))
        // Materials
        .route("/api/v1/materials", get(materials::handle_list_materials))
        .route(
            "/api/v1/materials/upload",
            post(materials::handle_upload).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/api/v1/materials/link", post(materials::handle_add_link))
        .route(
            "/api/v1/materials/:id",
            delete(materials::handle_remove_material),
        )
        .route(
            "/api/v1/materials/:id/analyze",
            post(materials::handle_analyze_material),
        )
        // Tests
        .route("/api/v1/tests", get(session::handle_list_tests))
        .route("/api/v1/tests/generate", post(generation::handle_generate))
        .route("/api/v1/tests/:id", delete(session::handle_delete_test))
        .route(
            "/api/v1/tests/:id/views/:view",
            get(session::handle_test_view),
        )
        .route("/api/v1/tests/:id/export/:format", get(render::handle_export))
        .with_state(state)
}
