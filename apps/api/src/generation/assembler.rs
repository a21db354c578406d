//! Prompt Assembler: builds the per-call generation request from session materials.

use serde::Serialize;

use crate::models::MaterialSource;

/// Used when the user leaves the customization prompt empty.
pub const DEFAULT_USER_PROMPT: &str = "Generate a complete MoET-compliant test version.";

const MATERIAL_SEPARATOR: &str = "\n\n";

/// One generation call's input. Built per run, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub combined_material_text: String,
    pub user_prompt: String,
}

impl GenerationRequest {
    /// The user turn sent to the model.
    pub fn to_prompt(&self) -> String {
        format!(
            "MATERIALS:\n{}\n\nUSER REQUEST: {}",
            self.combined_material_text, self.user_prompt
        )
    }
}

/// Concatenates material contents in list order, separated by a blank line,
/// and pairs them with the customization (or the default request when blank).
pub fn assemble(materials: &[MaterialSource], customization: &str) -> GenerationRequest {
    let combined_material_text = materials
        .iter()
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join(MATERIAL_SEPARATOR);

    let user_prompt = if customization.trim().is_empty() {
        DEFAULT_USER_PROMPT.to_string()
    } else {
        customization.to_string()
    };

    GenerationRequest {
        combined_material_text,
        user_prompt,
    }
}
