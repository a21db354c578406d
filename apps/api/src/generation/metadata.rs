//! Material analysis: asks the fast model for topics, vocabulary and grammar
//! points of a single material. The result is returned, not stored.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::generation::generator::GenerationError;
use crate::generation::prompts::METADATA_PROMPT_TEMPLATE;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{CallOptions, LlmClient, ANALYSIS_MODEL};

/// Only the start of a material is analysed.
pub const MAX_ANALYSIS_CHARS: usize = 5000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialMetadata {
    #[serde(default)]
    pub main_topics: Vec<String>,
    #[serde(default)]
    pub core_vocabulary: Vec<String>,
    #[serde(default)]
    pub grammar_structures: Vec<String>,
}

#[async_trait]
pub trait MaterialAnalyzer: Send + Sync {
    async fn analyze(&self, content: &str) -> Result<MaterialMetadata, GenerationError>;
}

pub struct LlmMaterialAnalyzer(pub LlmClient);

#[async_trait]
impl MaterialAnalyzer for LlmMaterialAnalyzer {
    async fn analyze(&self, content: &str) -> Result<MaterialMetadata, GenerationError> {
        let prompt = build_metadata_prompt(content);
        let metadata = self
            .0
            .call_json::<MaterialMetadata>(
                &prompt,
                Some(JSON_ONLY_SYSTEM),
                CallOptions::model(ANALYSIS_MODEL),
            )
            .await?;
        Ok(metadata)
    }
}

fn build_metadata_prompt(content: &str) -> String {
    let excerpt: String = content.chars().take(MAX_ANALYSIS_CHARS).collect();
    METADATA_PROMPT_TEMPLATE.replace("{content}", &excerpt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_truncates_long_content() {
        let content = "x".repeat(MAX_ANALYSIS_CHARS + 100);
        let prompt = build_metadata_prompt(&content);
        let (_, excerpt) = prompt.rsplit_once("Content:\n").unwrap();
        assert_eq!(excerpt.chars().count(), MAX_ANALYSIS_CHARS);
        assert!(excerpt.chars().all(|c| c == 'x'));
    }

    #[test]
    fn test_prompt_truncates_on_char_boundary() {
        let content = "ĐỀ".repeat(MAX_ANALYSIS_CHARS);
        let prompt = build_metadata_prompt(&content);
        assert!(prompt.ends_with('Đ') || prompt.ends_with('Ề'));
    }

    #[test]
    fn test_metadata_tolerates_missing_lists() {
        let parsed: MaterialMetadata =
            serde_json::from_str(r#"{"main_topics": ["Television"]}"#).unwrap();
        assert_eq!(parsed.main_topics, vec!["Television"]);
        assert!(parsed.core_vocabulary.is_empty());
    }
}
