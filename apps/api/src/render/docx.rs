//! DOCX serializer for the block model.

use std::io::Cursor;

use docx_rs::{AlignmentType, Docx, LineSpacing, Paragraph, Run, Style, StyleType};

use crate::render::blocks::{Block, BlockKind, HeadingLevel};
use crate::render::{DocumentModel, ExportError};

/// Serializes the model into a WordprocessingML container.
/// Returns the complete file or an error; never a partial buffer.
pub fn to_docx(model: &DocumentModel) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::new();
    for level in [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3] {
        docx = docx.add_style(heading_style(level));
    }
    for block in &model.blocks {
        docx = docx.add_paragraph(paragraph(block));
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| ExportError::DocumentExportFailed(e.to_string()))?;
    Ok(buffer.into_inner())
}

fn heading_style(level: HeadingLevel) -> Style {
    // Sizes are in half-points.
    let (name, size) = match level {
        HeadingLevel::H1 => ("Heading 1", 32),
        HeadingLevel::H2 => ("Heading 2", 26),
        HeadingLevel::H3 => ("Heading 3", 24),
    };
    Style::new(level.style_id(), StyleType::Paragraph)
        .name(name)
        .size(size)
        .bold()
}

fn paragraph(block: &Block) -> Paragraph {
    let mut paragraph = Paragraph::new();

    if !block.text.is_empty() {
        let run = Run::new().add_text(block.text.as_str());
        let run = match block.kind {
            BlockKind::Bold => run.bold(),
            BlockKind::Heading(_) | BlockKind::Plain => run,
        };
        paragraph = paragraph.add_run(run);
    }

    if let BlockKind::Heading(level) = block.kind {
        paragraph = paragraph.style(level.style_id());
    }
    if block.centered {
        paragraph = paragraph.align(AlignmentType::Center);
    }

    let mut spacing = LineSpacing::new();
    if block.spacing.before > 0 {
        spacing = spacing.before(block.spacing.before);
    }
    if block.spacing.after > 0 {
        spacing = spacing.after(block.spacing.after);
    }
    paragraph.line_spacing(spacing)
}
