//! Resume text extraction from uploaded PDF documents.

use std::panic;

use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;
use crate::questions::models::NO_RESUME_FALLBACK;

/// Returns the resume text for a submission.
///
/// `None` yields [`NO_RESUME_FALLBACK`]. Otherwise the document is read as a
/// PDF and the text of every page is appended in page order. Pages without
/// extractable text contribute nothing.
pub fn extract_resume_text(document: Option<&[u8]>) -> Result<String, AppError> {
    let Some(bytes) = document else {
        return Ok(NO_RESUME_FALLBACK.to_string());
    };

    let pages = read_pdf_pages(bytes)?;
    debug!("Extracted text from {} resume page(s)", pages.len());
    Ok(pages.concat())
}

/// Same as [`extract_resume_text`], moved off the async runtime.
pub async fn extract_resume_text_blocking(document: Option<Bytes>) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || extract_resume_text(document.as_deref()))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Resume extraction task failed: {e}")))?
}

fn read_pdf_pages(bytes: &[u8]) -> Result<Vec<String>, AppError> {
    // pdf-extract panics on some malformed inputs instead of returning an error.
    match panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes)) {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(AppError::DocumentRead(e.to_string())),
        Err(_) => Err(AppError::DocumentRead(
            "PDF parser aborted on malformed document".to_string(),
        )),
    }
}
