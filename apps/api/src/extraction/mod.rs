//! Text Extractor: turns an uploaded PDF résumé into one text blob.
//!
//! Pages are extracted in document order and concatenated with no separators.
//! No trimming or case folding happens here; the skill matcher owns normalization.
//!
//! Known limitation: there is no OCR. Scanned, image-only pages contribute an
//! empty string and are not reported as errors.

use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

const PARSER_PANIC: &str = "PDF parser failed on malformed input";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to read document '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a valid PDF document: {0}")]
    Format(String),
}

/// Extracts the text of the PDF at `path`.
///
/// The file is read fully into memory and its handle dropped before parsing
/// begins, so no descriptor outlives this call on any path.
pub fn extract_text(path: impl AsRef<Path>) -> Result<String, ExtractError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| ExtractError::Io {
        path: path.display().to_string(),
        source,
    })?;
    extract_text_from_bytes(&bytes)
}

/// Extracts text from an in-memory PDF.
///
/// pdf-extract panics on some structurally broken files instead of returning
/// an error; those panics are caught and reported as [`ExtractError::Format`].
pub fn extract_text_from_bytes(bytes: &[u8]) -> Result<String, ExtractError> {
    let pages = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
        .map_err(|payload| {
            let detail = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_default();
            warn!(detail = %detail, "PDF parser panicked on malformed input");
            ExtractError::Format(PARSER_PANIC.to_string())
        })?
        .map_err(|e| ExtractError::Format(e.to_string()))?;
    debug!(pages = pages.len(), "Extracted PDF pages");
    Ok(concat_pages(pages))
}

/// Joins page texts in traversal order, byte for byte.
pub fn concat_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    pages.into_iter().fold(String::new(), |mut text, page| {
        text.push_str(page.as_ref());
        text
    })
}
