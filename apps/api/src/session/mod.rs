//! View/Session Controller: the single in-memory session of the service.
//!
//! Tracks the active tab, the test overlay, the loading flag, the material
//! store and the generated tests (newest batch first). Nothing here is
//! persisted. State changes are synchronous; the async generation run lives
//! in `workflow` and only touches this struct between calls.

pub mod handlers;
pub mod workflow;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::generation::assembler::{assemble, GenerationRequest};
use crate::materials::store::MaterialStore;
use crate::models::TestOutput;

/// Minutes of preparation time a generated test is credited with on the dashboard.
pub const MINUTES_SAVED_PER_TEST: usize = 45;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Dashboard,
    Materials,
    Generate,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("A generation run is already in progress")]
    GenerationInProgress,

    #[error("Upload teaching materials before generating tests")]
    NoMaterials,
}

/// Handed out when a generation run starts; returned when it ends.
#[derive(Debug)]
pub struct GenerationTicket {
    pub request: GenerationRequest,
}

#[derive(Debug, Default)]
pub struct Session {
    active_tab: Tab,
    viewing_test_id: Option<Uuid>,
    is_loading: bool,
    materials: MaterialStore,
    tests: Vec<TestOutput>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_tests: usize,
    pub minutes_saved: usize,
    pub tests: Vec<TestOutput>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn viewing_test_id(&self) -> Option<Uuid> {
        self.viewing_test_id
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn materials(&self) -> &MaterialStore {
        &self.materials
    }

    pub fn materials_mut(&mut self) -> &mut MaterialStore {
        &mut self.materials
    }

    /// Generated tests, newest batch first.
    pub fn tests(&self) -> &[TestOutput] {
        &self.tests
    }

    pub fn test(&self, id: Uuid) -> Option<&TestOutput> {
        self.tests.iter().find(|t| t.id == id)
    }

    /// Switching tabs always closes the test overlay.
    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
        self.viewing_test_id = None;
    }

    pub fn view_test(&mut self, id: Uuid) {
        self.viewing_test_id = Some(id);
    }

    pub fn close_test(&mut self) {
        self.viewing_test_id = None;
    }

    /// The test under the overlay. An id that matches nothing renders as empty.
    pub fn current_test(&self) -> Option<&TestOutput> {
        self.viewing_test_id.and_then(|id| self.test(id))
    }

    /// Removes a test; absent ids are a no-op returning `false`.
    pub fn delete_test(&mut self, id: Uuid) -> bool {
        let before = self.tests.len();
        self.tests.retain(|t| t.id != id);
        if self.viewing_test_id == Some(id) {
            self.viewing_test_id = None;
        }
        self.tests.len() != before
    }

    pub fn dashboard(&self) -> DashboardSummary {
        DashboardSummary {
            total_tests: self.tests.len(),
            minutes_saved: self.tests.len() * MINUTES_SAVED_PER_TEST,
            tests: self.tests.clone(),
        }
    }

    /// Starts a generation run: raises the loading flag and snapshots the request.
    pub fn begin_generation(&mut self, customization: &str) -> Result<GenerationTicket, SessionError> {
        if self.is_loading {
            return Err(SessionError::GenerationInProgress);
        }
        if self.materials.is_empty() {
            return Err(SessionError::NoMaterials);
        }

        self.is_loading = true;
        Ok(GenerationTicket {
            request: assemble(self.materials.list(), customization),
        })
    }

    /// Ends a successful run: the batch goes in front of the list, in
    /// generation order, and the dashboard is shown. An open overlay stays open.
    pub fn complete_generation(&mut self, _ticket: GenerationTicket, batch: Vec<TestOutput>) {
        self.tests.splice(0..0, batch);
        self.is_loading = false;
        self.active_tab = Tab::Dashboard;
    }

    /// Ends a failed run: nothing from the batch is kept. The tab is left
    /// wherever the client last put it.
    pub fn fail_generation(&mut self, _ticket: GenerationTicket) {
        self.is_loading = false;
    }
}
