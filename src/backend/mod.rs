//! Pluggable PDF-reading backends.
//!
//! The extraction loop in [`crate::extract`] never talks to a PDF library
//! directly. It only sees two small traits:
//!
//! ```text
//! TextBackend ──open(path)──▶ PageSource ──page_text(i)──▶ String
//!  (library)                   (opened document, dropped when done)
//! ```
//!
//! 1. [`lopdf_backend`]  — pure-Rust reader; the primary strategy
//! 2. [`pdfium_backend`] — Google's PDFium engine via `pdfium-render`; the
//!    fallback strategy
//!
//! Test doubles implement the same traits, which keeps the loop testable
//! without any PDF on disk.

pub mod lopdf_backend;
pub mod pdfium_backend;

use crate::error::ExtractionError;
use std::path::Path;

pub use lopdf_backend::LopdfBackend;
pub use pdfium_backend::PdfiumBackend;

/// A PDF library able to open a document by path.
pub trait TextBackend {
    /// Short human-readable name used in diagnostics (`Error using <name>: …`).
    fn name(&self) -> &'static str;

    /// Open the document at `path`.
    ///
    /// The returned [`PageSource`] owns the opened document; dropping it
    /// releases every resource the backend acquired for it.
    fn open<'a>(&'a self, path: &Path) -> Result<Box<dyn PageSource + 'a>, ExtractionError>;
}

/// An opened document exposing its pages in order.
pub trait PageSource {
    /// Number of pages; valid indices are `0..page_count()`.
    fn page_count(&self) -> usize;

    /// Extract the text of the 0-indexed page `index`.
    fn page_text(&self, index: usize) -> Result<String, ExtractionError>;
}
