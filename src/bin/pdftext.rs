//! CLI binary for edgequake-pdftext.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ExtractConfig`, runs both backends and turns the report into an exit
//! status.

use anyhow::{Context, Result};
use clap::Parser;
use edgequake_pdftext::{run_with_config, ExtractConfig, FallbackPolicy};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Extract with lopdf, then again with PDFium
  pdftext document.pdf

  # Only fall back to PDFium when lopdf fails
  pdftext --fallback on-failure document.pdf > document.txt

  # Use a specific PDFium build
  pdftext --pdfium-lib ./libpdfium.so document.pdf

BACKENDS:
  lopdf    pure Rust, always available (primary)
  pdfium   Google PDFium, loaded at runtime (fallback)

EXIT STATUS:
  0  every attempt succeeded (on-failure: the last attempt succeeded)
  1  missing argument, invalid option, or a failed attempt

PDFIUM LOOKUP:
  --pdfium-lib / PDFIUM_LIB_PATH if given, otherwise the system library
  search path. The working directory is not searched.

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH   Path to an existing libpdfium
  RUST_LOG          Log filter, e.g. RUST_LOG=edgequake_pdftext=debug
"#;

/// Extract plain text from a PDF with lopdf and PDFium.
#[derive(Parser, Debug)]
#[command(
    name = "pdftext",
    version,
    about = "Extract plain text from a PDF with lopdf and PDFium",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the PDF file.
    #[arg(value_name = "pdf_file_path")]
    input: Option<PathBuf>,

    /// When to run the PDFium fallback.
    #[arg(long, value_enum, default_value = "always")]
    fallback: FallbackArg,

    /// Path to the PDFium shared library (default: the system library search path).
    #[arg(long, env = "PDFIUM_LIB_PATH")]
    pdfium_lib: Option<PathBuf>,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FallbackArg {
    Always,
    OnFailure,
}

impl From<FallbackArg> for FallbackPolicy {
    fn from(v: FallbackArg) -> Self {
        match v {
            FallbackArg::Always => FallbackPolicy::Always,
            FallbackArg::OnFailure => FallbackPolicy::OnFailure,
        }
    }
}

fn main() -> ExitCode {
    // clap exits with 2 on bad usage; every usage error here exits with 1.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // ── Logging setup ────────────────────────────────────────────────────
    // Attempt failures are logged at DEBUG, so the default filter keeps
    // stderr down to the "Error using …" lines.
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let Some(ref input) = cli.input else {
        eprintln!("Usage: {} <pdf_file_path>", program_name());
        return ExitCode::from(1);
    };

    match try_run(&cli, input) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn try_run(cli: &Cli, input: &Path) -> Result<u8> {
    let config = build_config(cli)?;

    let stdout = io::stdout();
    let stderr = io::stderr();
    let report = run_with_config(input, &config, &mut stdout.lock(), &mut stderr.lock())
        .context("Failed to write extraction output")?;

    Ok(report.exit_code())
}

/// Map CLI args to `ExtractConfig`.
fn build_config(cli: &Cli) -> Result<ExtractConfig> {
    let mut builder = ExtractConfig::builder().fallback(cli.fallback.into());
    if let Some(ref lib) = cli.pdfium_lib {
        builder = builder.pdfium_library(lib);
    }
    builder.build().context("Failed to build configuration")
}

/// Name the binary was invoked as, for the usage line.
fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .and_then(|p| Path::new(p).file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "pdftext".to_string())
}
