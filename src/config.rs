//! Configuration types for PDF text extraction.
//!
//! All runner behaviour is controlled through [`ExtractConfig`], built via its
//! [`ExtractConfigBuilder`]. The backend order is fixed (lopdf first, pdfium
//! second); only the fallback policy and the PDFium engine location vary.

use crate::error::ConfigError;
use std::path::PathBuf;

/// Configuration for an extraction run.
///
/// Built via [`ExtractConfig::builder()`] or using [`ExtractConfig::default()`].
///
/// # Example
/// ```rust
/// use edgequake_pdftext::{ExtractConfig, FallbackPolicy};
///
/// let config = ExtractConfig::builder()
///     .fallback(FallbackPolicy::OnFailure)
///     .build()
///     .unwrap();
/// assert_eq!(config.fallback, FallbackPolicy::OnFailure);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractConfig {
    /// When the fallback backend runs. Default: [`FallbackPolicy::Always`].
    pub fallback: FallbackPolicy,

    /// Explicit path to the PDFium shared library.
    ///
    /// `None` binds whatever `libpdfium` the platform loader finds on the
    /// system search path.
    pub pdfium_library: Option<PathBuf>,
}

impl ExtractConfig {
    /// Create a new builder for `ExtractConfig`.
    pub fn builder() -> ExtractConfigBuilder {
        ExtractConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ExtractConfig`].
#[derive(Debug)]
pub struct ExtractConfigBuilder {
    config: ExtractConfig,
}

impl ExtractConfigBuilder {
    pub fn fallback(mut self, policy: FallbackPolicy) -> Self {
        self.config.fallback = policy;
        self
    }

    pub fn pdfium_library(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdfium_library = Some(path.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractConfig, ConfigError> {
        if let Some(ref lib) = self.config.pdfium_library {
            if !lib.is_file() {
                return Err(ConfigError(format!(
                    "pdfium library '{}' does not exist or is not a file",
                    lib.display()
                )));
            }
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// When the fallback backend is attempted.
///
/// | Policy | Fallback runs | Exit status 1 when |
/// |--------|---------------|--------------------|
/// | `Always` | after every primary attempt | either attempt failed |
/// | `OnFailure` | only after a failed primary | the last attempt failed |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Run both backends, one after the other. (default)
    #[default]
    Always,
    /// Run the fallback only when the primary failed.
    OnFailure,
}
