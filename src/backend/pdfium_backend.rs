//! Fallback backend: Google's PDFium engine via [`pdfium_render`].
//!
//! PDFium is a native shared library loaded at runtime. Binding is deferred
//! to the first [`TextBackend::open`] call and its outcome is cached, so a
//! run that never reaches the fallback never touches libpdfium. A missing
//! library is reported as [`ExtractionError::EngineUnavailable`] instead of
//! aborting, which still lets the primary attempt run on machines without it.
//!
//! Without an explicit path only the system library search path is used;
//! the working directory is never searched.
//!
//! The opened `PdfDocument` closes its `FPDF_DOCUMENT` handle on drop, so the
//! boxed [`PageSource`] returned by [`PdfiumBackend::open`] is the only thing
//! callers have to let go of.

use super::{PageSource, TextBackend};
use crate::error::ExtractionError;
use once_cell::unsync::OnceCell;
use pdfium_render::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// [`TextBackend`] backed by PDFium.
pub struct PdfiumBackend {
    library: Option<PathBuf>,
    pdfium: OnceCell<Result<Pdfium, String>>,
}

impl PdfiumBackend {
    /// Use the PDFium library on the system search path.
    pub fn system() -> Self {
        Self::bind(None)
    }

    /// Use the library at an explicit `path`.
    pub fn from_library(path: &Path) -> Self {
        Self::bind(Some(path))
    }

    /// Use an optional explicit path, as carried by
    /// [`crate::config::ExtractConfig::pdfium_library`].
    pub fn bind(library: Option<&Path>) -> Self {
        Self {
            library: library.map(Path::to_path_buf),
            pdfium: OnceCell::new(),
        }
    }

    /// `true` when the engine can be bound. Binds on first call.
    pub fn is_available(&self) -> bool {
        self.engine().is_ok()
    }

    /// `true` once a bind has been attempted.
    pub fn is_bound(&self) -> bool {
        self.pdfium.get().is_some()
    }

    fn engine(&self) -> &Result<Pdfium, String> {
        self.pdfium.get_or_init(|| {
            let bindings = match self.library {
                Some(ref path) => Pdfium::bind_to_library(path),
                None => Pdfium::bind_to_system_library(),
            };
            match bindings {
                Ok(b) => {
                    info!("PDFium engine bound");
                    Ok(Pdfium::new(b))
                }
                Err(e) => {
                    debug!("PDFium engine unavailable: {:?}", e);
                    Err(format!("failed to bind PDFium library: {:?}", e))
                }
            }
        })
    }
}

impl fmt::Debug for PdfiumBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PdfiumBackend")
            .field("library", &self.library)
            .field(
                "pdfium",
                &self.pdfium.get().map(|r| r.as_ref().map(|_| "<bound>")),
            )
            .finish()
    }
}

impl TextBackend for PdfiumBackend {
    fn name(&self) -> &'static str {
        "pdfium"
    }

    fn open<'a>(&'a self, path: &Path) -> Result<Box<dyn PageSource + 'a>, ExtractionError> {
        let pdfium = self
            .engine()
            .as_ref()
            .map_err(|detail| ExtractionError::EngineUnavailable {
                detail: detail.clone(),
            })?;

        let document = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| ExtractionError::open(path, format!("{:?}", e)))?;

        debug!(
            "pdfium opened {}: {} pages",
            path.display(),
            document.pages().len()
        );

        Ok(Box::new(PdfiumDocument { document }))
    }
}

/// A document opened by PDFium, borrowing the bound engine.
struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
}

impl PageSource for PdfiumDocument<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn page_text(&self, index: usize) -> Result<String, ExtractionError> {
        let page_index =
            PdfPageIndex::try_from(index).map_err(|e| ExtractionError::page(index, e))?;
        let page = self
            .document
            .pages()
            .get(page_index)
            .map_err(|e| ExtractionError::page(index, format!("{:?}", e)))?;

        let text = page
            .text()
            .map_err(|e| ExtractionError::page(index, format!("{:?}", e)))?;

        Ok(text.all())
    }
}
