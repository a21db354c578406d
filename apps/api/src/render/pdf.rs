use crate::render::{DocumentModel, ExportError};

/// PDF export placeholder.
///
/// No PDF library is wired in; the call always reports that the format is not
/// implemented so callers surface a notice instead of a silent success.
pub fn to_pdf(_model: &DocumentModel) -> Result<Vec<u8>, ExportError> {
    Err(ExportError::PdfNotImplemented)
}
