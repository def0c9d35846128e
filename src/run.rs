//! Primary/fallback runner: drives the extraction attempts and reports each
//! one to the output streams.
//!
//! ## Attempt order
//!
//! The primary backend always runs first. Whether the fallback runs next is
//! decided by [`FallbackPolicy`]:
//!
//! ```text
//! Always:     primary ──▶ report ──▶ fallback ──▶ report
//! OnFailure:  primary ──▶ report ──(failed?)──▶ fallback ──▶ report
//! ```
//!
//! Every attempt is reported as soon as it finishes: text plus a newline on
//! `stdout` for a success, `Error using <backend>: <message>` on `stderr`
//! for a failure. The [`RunReport`] then gives the process exit code.

use crate::backend::{LopdfBackend, PdfiumBackend, TextBackend};
use crate::config::{ExtractConfig, FallbackPolicy};
use crate::error::ExtractionError;
use crate::extract::{extract, ExtractedText};
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// Outcome of a single backend attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    /// Name of the backend that ran.
    pub backend: &'static str,
    pub result: Result<ExtractedText, ExtractionError>,
}

impl Attempt {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// Every attempt made during a run, in program order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub policy: FallbackPolicy,
    pub attempts: Vec<Attempt>,
}

impl RunReport {
    /// `true` when at least one attempt ran and none failed.
    pub fn all_succeeded(&self) -> bool {
        !self.attempts.is_empty() && self.attempts.iter().all(Attempt::succeeded)
    }

    /// Process exit code.
    ///
    /// Under [`FallbackPolicy::Always`] any failed attempt yields 1. Under
    /// [`FallbackPolicy::OnFailure`] only the last attempt counts.
    pub fn exit_code(&self) -> u8 {
        let failed = match self.policy {
            FallbackPolicy::Always => self.attempts.iter().any(|a| !a.succeeded()),
            FallbackPolicy::OnFailure => self.attempts.last().is_some_and(|a| !a.succeeded()),
        };
        u8::from(failed)
    }
}

/// Run the primary backend, then the fallback as `policy` dictates, writing
/// each attempt's outcome to `stdout` / `stderr` as it completes.
///
/// # Errors
/// Only I/O errors on the output streams are returned; extraction failures
/// are recorded in the [`RunReport`].
pub fn run<O: Write, E: Write>(
    path: &Path,
    primary: &dyn TextBackend,
    fallback: &dyn TextBackend,
    policy: FallbackPolicy,
    stdout: &mut O,
    stderr: &mut E,
) -> io::Result<RunReport> {
    let mut report = RunReport {
        policy,
        attempts: Vec::with_capacity(2),
    };

    let first = attempt(path, primary, stdout, stderr)?;
    let primary_ok = first.succeeded();
    report.attempts.push(first);

    if policy == FallbackPolicy::OnFailure && primary_ok {
        debug!(
            "{} succeeded; skipping {} (policy {:?})",
            primary.name(),
            fallback.name(),
            policy
        );
        return Ok(report);
    }

    report.attempts.push(attempt(path, fallback, stdout, stderr)?);
    Ok(report)
}

/// [`run`] with the standard backends: lopdf as primary, PDFium (located as
/// `config` says) as fallback. libpdfium is only loaded if the fallback
/// attempt actually runs.
pub fn run_with_config<O: Write, E: Write>(
    path: &Path,
    config: &ExtractConfig,
    stdout: &mut O,
    stderr: &mut E,
) -> io::Result<RunReport> {
    let primary = LopdfBackend::new();
    let fallback = PdfiumBackend::bind(config.pdfium_library.as_deref());
    run(path, &primary, &fallback, config.fallback, stdout, stderr)
}

fn attempt<O: Write, E: Write>(
    path: &Path,
    backend: &dyn TextBackend,
    stdout: &mut O,
    stderr: &mut E,
) -> io::Result<Attempt> {
    let result = extract(path, backend);
    match &result {
        Ok(text) => {
            stdout.write_all(text.as_str().as_bytes())?;
            stdout.write_all(b"\n")?;
            stdout.flush()?;
        }
        Err(e) => {
            debug!("{} failed on {}: {:?}", backend.name(), path.display(), e);
            writeln!(stderr, "Error using {}: {}", backend.name(), e)?;
        }
    }
    Ok(Attempt {
        backend: backend.name(),
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedBackend;

    fn run_with(
        primary: &ScriptedBackend,
        fallback: &ScriptedBackend,
        policy: FallbackPolicy,
    ) -> (RunReport, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let report = run(
            Path::new("doc.pdf"),
            primary,
            fallback,
            policy,
            &mut out,
            &mut err,
        )
        .unwrap();
        (
            report,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn always_runs_both_and_prints_both() {
        let a = ScriptedBackend::with_pages("alpha", &["Hello", "World"]);
        let b = ScriptedBackend::with_pages("beta", &["Hello", "World"]);
        let (report, out, err) = run_with(&a, &b, FallbackPolicy::Always);

        assert_eq!(out, "Hello\nWorld\n\nHello\nWorld\n\n");
        assert!(err.is_empty());
        assert_eq!(report.attempts.len(), 2);
        assert_eq!(report.exit_code(), 0);
        assert!(report.all_succeeded());
    }

    #[test]
    fn always_runs_fallback_after_primary_failure() {
        let a = ScriptedBackend::failing_open("alpha", "cannot read");
        let b = ScriptedBackend::with_pages("beta", &["text"]);
        let (report, out, err) = run_with(&a, &b, FallbackPolicy::Always);

        assert_eq!(err, "Error using alpha: cannot read\n");
        assert_eq!(out, "text\n\n");
        assert_eq!(report.exit_code(), 1);
        assert!(!report.all_succeeded());
    }

    #[test]
    fn both_failing_prints_two_error_lines() {
        let a = ScriptedBackend::failing_open("alpha", "no such file");
        let b = ScriptedBackend::failing_open("beta", "no such file");
        let (report, out, err) = run_with(&a, &b, FallbackPolicy::Always);

        assert!(out.is_empty());
        assert_eq!(
            err,
            "Error using alpha: no such file\nError using beta: no such file\n"
        );
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn fallback_failure_alone_still_exits_one() {
        let a = ScriptedBackend::with_pages("alpha", &["ok"]);
        let b = ScriptedBackend::failing_open("beta", "engine missing");
        let (report, out, err) = run_with(&a, &b, FallbackPolicy::Always);

        assert_eq!(out, "ok\n\n");
        assert_eq!(err, "Error using beta: engine missing\n");
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn on_failure_skips_fallback_after_success() {
        let a = ScriptedBackend::with_pages("alpha", &["done"]);
        let b = ScriptedBackend::with_pages("beta", &["unused"]);
        let (report, out, _) = run_with(&a, &b, FallbackPolicy::OnFailure);

        assert_eq!(out, "done\n\n");
        assert_eq!(report.attempts.len(), 1);
        assert_eq!(b.opened.get(), 0);
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn on_failure_recovers_with_fallback() {
        let a = ScriptedBackend::failing_open("alpha", "corrupt xref");
        let b = ScriptedBackend::with_pages("beta", &["rescued"]);
        let (report, out, err) = run_with(&a, &b, FallbackPolicy::OnFailure);

        assert_eq!(out, "rescued\n\n");
        assert_eq!(err, "Error using alpha: corrupt xref\n");
        assert_eq!(report.attempts[1].backend, "beta");
        assert_eq!(report.exit_code(), 0);
        assert!(!report.all_succeeded());
    }

    #[test]
    fn on_failure_exits_one_when_fallback_also_fails() {
        let a = ScriptedBackend::failing_open("alpha", "corrupt xref");
        let b = ScriptedBackend::failing_open("beta", "bad header");
        let (report, _, err) = run_with(&a, &b, FallbackPolicy::OnFailure);

        assert_eq!(err.lines().count(), 2);
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn empty_document_prints_single_newline() {
        let a = ScriptedBackend::with_pages("alpha", &[]);
        let b = ScriptedBackend::with_pages("beta", &[]);
        let (_, out, _) = run_with(&a, &b, FallbackPolicy::Always);
        assert_eq!(out, "\n\n");
    }
}
