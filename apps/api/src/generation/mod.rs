// Test generation: matrix configuration, prompt assembly and the external
// generation boundary. All LLM calls go through llm_client.

pub mod assembler;
pub mod generator;
pub mod handlers;
pub mod matrix;
pub mod metadata;
pub mod prompts;
