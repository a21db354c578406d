// Document Renderer: test paper markdown → block model → DOCX bytes.
// Rendering is CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod blocks;
pub mod docx;
pub mod handlers;
pub mod pdf;

use serde::Deserialize;
use thiserror::Error;

use crate::models::TestOutput;
use crate::render::blocks::{parse_blocks, Block, HeadingLevel, Spacing};

/// Institutional header printed above every exported test.
pub const INSTITUTION_HEADER: &str = "BỘ GIÁO DỤC VÀ ĐÀO TẠO";
/// Document title line under the institutional header.
pub const DOCUMENT_TITLE: &str = "ĐỀ THI TIẾNG ANH CHUẨN MOET";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Document export failed: {0}")]
    DocumentExportFailed(String),

    #[error("Exporting as PDF is not implemented yet. Download the DOCX version instead.")]
    PdfNotImplemented,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Docx,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Docx => "docx",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

/// Ordered blocks of one exported document: fixed header first, then content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentModel {
    pub blocks: Vec<Block>,
}

/// A finished export ready for download.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Builds the block model for a test paper. Pure function of its inputs.
pub fn build_document(title: &str, markdown: &str) -> DocumentModel {
    let header = [
        Block::heading(HeadingLevel::H2, INSTITUTION_HEADER)
            .centered()
            .with_spacing(Spacing::default()),
        Block::heading(HeadingLevel::H1, DOCUMENT_TITLE)
            .centered()
            .with_spacing(Spacing::after(200)),
        Block::plain(title).centered().with_spacing(Spacing::after(400)),
    ];

    let mut blocks = Vec::from(header);
    blocks.extend(parse_blocks(markdown));
    DocumentModel { blocks }
}

/// Download name: every non ASCII-alphanumeric char becomes `_`, lowercased.
pub fn export_file_name(title: &str, format: ExportFormat) -> String {
    let stem: String = title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{stem}.{}", format.extension())
}

/// Renders a stored test's paper in the requested format.
pub fn export_test(test: &TestOutput, format: ExportFormat) -> Result<ExportedDocument, ExportError> {
    let model = build_document(&test.title, &test.test_paper);
    let bytes = match format {
        ExportFormat::Docx => docx::to_docx(&model)?,
        ExportFormat::Pdf => pdf::to_pdf(&model)?,
    };

    Ok(ExportedDocument {
        file_name: export_file_name(&test.title, format),
        content_type: format.content_type(),
        bytes,
    })
}
