//! The extraction loop: one backend, one document, every page in order.
//!
//! ```text
//! open(path) ──▶ page 0 ──▶ page 1 ──▶ … ──▶ page N-1 ──▶ ExtractedText
//!      │            │                            │
//!      └────────────┴──── any error ─────────────┴──▶ ExtractionError
//! ```
//!
//! Each page contributes its text followed by exactly one `'\n'`. Nothing is
//! trimmed or normalised, so the output length is always the sum of the page
//! text lengths plus the page count.

use crate::backend::TextBackend;
use crate::error::ExtractionError;
use std::fmt;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Text extracted from a whole document by one backend.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedText {
    text: String,
    page_count: usize,
}

impl ExtractedText {
    /// The concatenated page texts, each followed by `'\n'`.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of pages that contributed.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Length of the text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// `true` for a document without pages.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Take the text without copying.
    pub fn into_string(self) -> String {
        self.text
    }

    fn push_page(&mut self, page_text: &str) {
        self.text.push_str(page_text);
        self.text.push('\n');
        self.page_count += 1;
    }
}

impl fmt::Display for ExtractedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<ExtractedText> for String {
    fn from(t: ExtractedText) -> Self {
        t.text
    }
}

/// Extract the text of every page of the PDF at `path` using `backend`.
///
/// The path is not checked up front; the backend reports missing or
/// unreadable files as [`ExtractionError::Open`].
///
/// # Errors
/// Fails if the document cannot be opened or any page fails to extract. Text
/// gathered from earlier pages is discarded in that case. The opened document
/// is dropped on every exit path.
pub fn extract(
    path: impl AsRef<Path>,
    backend: &dyn TextBackend,
) -> Result<ExtractedText, ExtractionError> {
    let path = path.as_ref();
    let start = Instant::now();

    let document = backend.open(path)?;
    let total = document.page_count();
    info!("{}: {} has {} pages", backend.name(), path.display(), total);

    let mut out = ExtractedText::default();
    for index in 0..total {
        let page_text = document.page_text(index)?;
        debug!(
            "{}: page {}/{} → {} bytes",
            backend.name(),
            index + 1,
            total,
            page_text.len()
        );
        out.push_page(&page_text);
    }

    info!(
        "{}: extracted {} bytes from {} pages in {}ms",
        backend.name(),
        out.len(),
        out.page_count(),
        start.elapsed().as_millis()
    );
    Ok(out)
}
