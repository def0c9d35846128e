//! Error types for the edgequake-pdftext library.
//!
//! Two error types reflect two distinct failure modes:
//!
//! * [`ExtractionError`] — one extraction attempt failed (the backend could
//!   not open the file, a page could not be read, or the engine itself is
//!   missing). The attempt yields no text at all; pages read before the
//!   failure are discarded.
//!
//! * [`ConfigError`] — the caller asked for something impossible before any
//!   attempt started.
//!
//! Every [`ExtractionError`] carries the backend's own message verbatim so the
//! CLI can print `Error using <backend>: <message>` without rewording it.

use std::path::PathBuf;
use thiserror::Error;

/// A failed extraction attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// The backend could not open or parse the document.
    #[error("{detail}")]
    Open { path: PathBuf, detail: String },

    /// Text extraction failed on a page (`page` is 1-indexed).
    #[error("{detail}")]
    Page { page: usize, detail: String },

    /// The backend's engine could not be loaded (e.g. libpdfium missing).
    #[error("{detail}")]
    EngineUnavailable { detail: String },
}

impl ExtractionError {
    /// Build an [`ExtractionError::Open`] from any displayable backend error.
    pub fn open(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::Open {
            path: path.into(),
            detail: err.to_string(),
        }
    }

    /// Build an [`ExtractionError::Page`] for the 0-indexed page `index`.
    pub fn page(index: usize, err: impl std::fmt::Display) -> Self {
        Self::Page {
            page: index + 1,
            detail: err.to_string(),
        }
    }
}

/// Invalid configuration, detected by [`crate::config::ExtractConfigBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid configuration: {0}")]
pub struct ConfigError(pub String);
