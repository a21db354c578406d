use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a material came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    File,
    Link,
}

/// A piece of curriculum content held for the session.
/// Immutable once created; only the material store adds or removes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSource {
    pub id: Uuid,
    pub name: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: MaterialKind,
    pub extracted_at: DateTime<Utc>,
}

impl MaterialSource {
    pub fn new(name: impl Into<String>, content: impl Into<String>, kind: MaterialKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            content: content.into(),
            kind,
            extracted_at: Utc::now(),
        }
    }
}
