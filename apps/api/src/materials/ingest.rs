//! Upload boundary: turns uploaded files and submitted links into materials.
//!
//! Plain text is decoded directly and PDFs go through `pdf-extract`. Word and
//! PowerPoint files have no structured extraction; their bytes are read as text.
//! Links are not fetched: the material records the link itself.

use std::path::Path;

use thiserror::Error;
use tracing::warn;

use crate::models::{MaterialKind, MaterialSource};

/// File extensions accepted by the upload surface.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "docx", "txt", "pptx"];

/// Characters of the link kept in a link material's display name.
const LINK_NAME_CHARS: usize = 30;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Unsupported file type for '{file_name}' (accepted: {accepted})")]
    UnsupportedFormat { file_name: String, accepted: String },

    #[error("Could not extract text from '{file_name}': {message}")]
    Extraction { file_name: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFormat {
    Pdf,
    Docx,
    Txt,
    Pptx,
}

impl UploadFormat {
    /// Resolves the format from the file extension, case-insensitively.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let ext = Path::new(file_name)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Txt),
            "pptx" => Some(Self::Pptx),
            _ => None,
        }
    }
}

/// Builds a file material from an uploaded file.
///
/// PDF extraction is CPU-bound; callers on the async runtime should run this
/// inside `spawn_blocking`.
pub fn material_from_file(file_name: &str, bytes: &[u8]) -> Result<MaterialSource, IngestError> {
    let format =
        UploadFormat::from_file_name(file_name).ok_or_else(|| IngestError::UnsupportedFormat {
            file_name: file_name.to_string(),
            accepted: ACCEPTED_EXTENSIONS.join(", "),
        })?;

    let content = extract_text(file_name, format, bytes)?;
    Ok(MaterialSource::new(file_name, content, MaterialKind::File))
}

/// Builds a link material. Blank links produce nothing.
pub fn material_from_link(link: &str) -> Option<MaterialSource> {
    let link = link.trim();
    if link.is_empty() {
        return None;
    }

    let prefix: String = link.chars().take(LINK_NAME_CHARS).collect();
    Some(MaterialSource::new(
        format!("Link: {prefix}..."),
        format!("Extracted content from shared folder/file at {link}"),
        MaterialKind::Link,
    ))
}

fn extract_text(file_name: &str, format: UploadFormat, bytes: &[u8]) -> Result<String, IngestError> {
    match format {
        UploadFormat::Txt => Ok(String::from_utf8_lossy(bytes).into_owned()),
        UploadFormat::Pdf => {
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| IngestError::Extraction {
                file_name: file_name.to_string(),
                message: e.to_string(),
            })
        }
        UploadFormat::Docx | UploadFormat::Pptx => {
            warn!("No structured extraction for '{file_name}'; reading bytes as text");
            Ok(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension_is_case_insensitive() {
        assert_eq!(UploadFormat::from_file_name("unit7.TXT"), Some(UploadFormat::Txt));
        assert_eq!(UploadFormat::from_file_name("slides.pptx"), Some(UploadFormat::Pptx));
        assert_eq!(UploadFormat::from_file_name("notes.md"), None);
        assert_eq!(UploadFormat::from_file_name("README"), None);
    }

    #[test]
    fn test_txt_upload_becomes_file_material() {
        let material = material_from_file("unit7.txt", "Television vocabulary".as_bytes()).unwrap();
        assert_eq!(material.name, "unit7.txt");
        assert_eq!(material.content, "Television vocabulary");
        assert_eq!(material.kind, MaterialKind::File);
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let err = material_from_file("photo.png", b"...").unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_invalid_pdf_reports_extraction_error() {
        let err = material_from_file("broken.pdf", b"not a pdf").unwrap_err();
        assert!(matches!(err, IngestError::Extraction { .. }));
    }

    #[test]
    fn test_blank_link_is_ignored() {
        assert!(material_from_link("   ").is_none());
    }

    #[test]
    fn test_link_name_is_truncated() {
        let link = "https://drive.example.com/folders/abcdefghijklmnopqrstuvwxyz";
        let material = material_from_link(link).unwrap();
        assert_eq!(material.name, "Link: https://drive.example.com/fold...");
        assert!(material.content.ends_with(link));
        assert_eq!(material.kind, MaterialKind::Link);
    }
}
