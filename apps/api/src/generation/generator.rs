//! Generation Client: the external boundary that turns a request into a test.
//!
//! `AppState` holds an `Arc<dyn TestGenerator>`. The production backend is
//! `LlmTestGenerator`; tests substitute deterministic fakes.

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::generation::assembler::GenerationRequest;
use crate::generation::matrix::MOET_MATRIX;
use crate::generation::prompts::build_system_instruction;
use crate::llm_client::{parse_json_text, CallOptions, LlmClient, LlmError, GENERATION_MODEL};
use crate::models::GeneratedTest;

const TEMPERATURE: f32 = 0.7;
const THINKING_BUDGET: u32 = 4000;

#[derive(Debug, Error)]
pub enum GenerationError {
    /// The model answered, but not with the six-field JSON object.
    #[error("Malformed generation response: {0}")]
    MalformedResponse(String),

    /// Transport, authentication, quota or server failure.
    #[error("Generation service unavailable: {0}")]
    Unavailable(String),
}

impl From<LlmError> for GenerationError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Parse(_) | LlmError::EmptyContent => {
                GenerationError::MalformedResponse(err.to_string())
            }
            LlmError::Http(_) | LlmError::Api { .. } => GenerationError::Unavailable(err.to_string()),
        }
    }
}

/// Swap backends without touching the workflow or handlers.
#[async_trait]
pub trait TestGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedTest, GenerationError>;
}

/// Gemini-backed generator. The system instruction is rendered once from the matrix.
pub struct LlmTestGenerator {
    llm: LlmClient,
    system_instruction: String,
}

impl LlmTestGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self {
            llm,
            system_instruction: build_system_instruction(&MOET_MATRIX),
        }
    }
}

#[async_trait]
impl TestGenerator for LlmTestGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedTest, GenerationError> {
        let options = CallOptions::model(GENERATION_MODEL)
            .temperature(TEMPERATURE)
            .thinking_budget(THINKING_BUDGET);

        let response = self
            .llm
            .call(&request.to_prompt(), Some(&self.system_instruction), options)
            .await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;
        let generated = parse_generated_test(&text)?;

        info!("Model returned test '{}'", generated.title);
        Ok(generated)
    }
}

/// Parses model text into the strict six-field shape.
pub fn parse_generated_test(text: &str) -> Result<GeneratedTest, GenerationError> {
    parse_json_text::<GeneratedTest>(text).map_err(GenerationError::from)
}
