//! PDF upload → plain text for the notes cleaner.

use crate::error::{AppError, AppResult};

/// Uploads larger than this are refused by the router before they get here.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Extract the text layer of a PDF.
///
/// Parsing is CPU-bound and the extractor can panic on malformed input, so it
/// runs on the blocking pool and any failure becomes a validation error.
pub async fn pdf_text(bytes: Vec<u8>) -> AppResult<String> {
    if !bytes.starts_with(b"%PDF-") {
        return Err(AppError::validation("The uploaded file is not a PDF."));
    }

    let size = bytes.len();
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| {
            tracing::warn!("PDF extraction aborted: {}", e);
            AppError::validation("The uploaded PDF could not be read.")
        })?
        .map_err(|e| {
            tracing::warn!("PDF extraction failed: {}", e);
            AppError::validation("The uploaded PDF could not be read.")
        })?;

    if text.trim().is_empty() {
        return Err(AppError::validation(
            "PDF uploaded but no extractable text found; try pasting notes instead.",
        ));
    }

    tracing::info!(
        "Extracted {} chars of text from {} byte PDF",
        text.len(),
        size
    );
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rejects_non_pdf() {
        let err = pdf_text(b"hello world".to_vec()).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_rejects_truncated_pdf() {
        let err = pdf_text(b"%PDF-1.5\n%garbage".to_vec()).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_reads_exported_notes() {
        let bytes = crate::export::pdf::notes("Photosynthesis converts light energy").unwrap();
        let text = pdf_text(bytes).await.unwrap();
        assert!(text.contains("Photosynthesis"));
    }
}
