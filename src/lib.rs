//! # edgequake-pdftext
//!
//! Extract plain text from PDF documents with two interchangeable backends:
//! a pure-Rust primary ([`lopdf`]) and a native fallback (PDFium via
//! [`pdfium_render`]).
//!
//! ## Flow
//!
//! ```text
//! path
//!  │
//!  ├─ 1. Primary   lopdf  → text of every page, one '\n' after each
//!  ├─ 2. Fallback  pdfium → same, run always or only on failure
//!  └─ 3. Report    text to stdout, "Error using <backend>: …" to stderr
//! ```
//!
//! Each attempt either yields the whole document's text or fails; partial
//! text is never returned.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edgequake_pdftext::{extract, LopdfBackend};
//!
//! let text = extract("document.pdf", &LopdfBackend::new())?;
//! print!("{text}");
//! # Ok::<(), edgequake_pdftext::ExtractionError>(())
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdftext` binary (clap + anyhow + tracing-subscriber) |
//!
//! The fallback backend needs the PDFium shared library at runtime. When it
//! cannot be loaded, the fallback attempt fails with
//! [`ExtractionError::EngineUnavailable`] and the primary is unaffected.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod backend;
pub mod config;
pub mod error;
pub mod extract;
pub mod run;

#[cfg(test)]
pub(crate) mod testing;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use backend::{LopdfBackend, PageSource, PdfiumBackend, TextBackend};
pub use config::{ExtractConfig, ExtractConfigBuilder, FallbackPolicy};
pub use error::{ConfigError, ExtractionError};
pub use extract::{extract, ExtractedText};
pub use run::{run, run_with_config, Attempt, RunReport};
