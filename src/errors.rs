//! Crate-wide error handling.
//!
//! One error enum covers the whole pipeline. Parse failures are per-file and
//! recoverable; an exclusivity marker is fatal for the run and carries a
//! labeled source span so the offending call is shown in context.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScanError>;

#[derive(Debug, Error)]
pub enum ScanError {
    /// A single file's syntax tree could not be built. Non-fatal: the file
    /// contributes zero records and scanning continues.
    #[error("failed to parse {file}{}: {message}", fmt_line(.line))]
    Parse {
        file: String,
        message: String,
        line: Option<usize>,
    },

    /// An exclusivity marker (`.only`) was found. Fatal for the entire run:
    /// an accidentally committed exclusive test silently narrows what CI
    /// reports, so extraction stops with no partial records for the file.
    #[error("exclusive tests detected: `.only` call found in {file}:{line}")]
    Exclusive {
        file: String,
        line: usize,
        src: Arc<NamedSource<String>>,
        span: SourceSpan,
    },

    /// A file referenced by a record group could not be read or written.
    /// Reported per file; sibling file groups are still processed.
    #[error("cannot access {}", .path.display())]
    Fs {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The identifier registry boundary failed; synchronization is skipped.
    #[error("registry error: {message}")]
    Registry { message: String },

    /// The scan file pattern could not be compiled.
    #[error("invalid file pattern `{pattern}`: {message}")]
    Pattern { pattern: String, message: String },

    /// Raised by the CLI when `--no-skipped` is set and skipped tests exist.
    #[error("{count} skipped tests found, failing")]
    SkippedFound { count: usize },

    /// The requested framework name matches no known alias. Scanning with a
    /// guessed marker table would silently report wrong results.
    #[error("unknown framework `{name}`; expected mocha, jest, codeceptjs, or a compatible alias")]
    UnknownFramework { name: String },
}

fn fmt_line(line: &Option<usize>) -> String {
    match line {
        Some(n) => format!(":{n}"),
        None => String::new(),
    }
}

impl ScanError {
    pub fn parse(file: impl Into<String>, message: impl Into<String>, line: Option<usize>) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
            line,
        }
    }

    /// Builds the exclusivity abort with the file's full text attached, so
    /// the diagnostic can underline the marker itself.
    pub fn exclusive(file: &str, line: usize, source_text: &str, span: std::ops::Range<usize>) -> Self {
        Self::Exclusive {
            file: file.to_string(),
            line,
            src: Arc::new(NamedSource::new(file, source_text.to_string())),
            span: span.into(),
        }
    }

    pub fn fs(path: PathBuf, source: std::io::Error) -> Self {
        Self::Fs { path, source }
    }

    pub fn registry(message: impl Into<String>) -> Self {
        Self::Registry {
            message: message.into(),
        }
    }

    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "parse",
            Self::Exclusive { .. } => "exclusive",
            Self::Fs { .. } => "fs",
            Self::Registry { .. } => "registry",
            Self::Pattern { .. } => "pattern",
            Self::SkippedFound { .. } => "skipped",
            Self::UnknownFramework { .. } => "framework",
        }
    }
}

impl Diagnostic for ScanError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("testscan::{}", self.code_suffix())))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Self::Exclusive { .. } => Some(Box::new(
                "remove the `.only` call so the full suite is reported",
            )),
            Self::SkippedFound { .. } => Some(Box::new(
                "unskip the tests or drop --no-skipped",
            )),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Self::Exclusive { span, .. } => Some(Box::new(std::iter::once(
                LabeledSpan::new_with_span(Some("exclusivity marker here".into()), *span),
            ))),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Self::Exclusive { src, .. } => Some(&**src),
            _ => None,
        }
    }
}

/// Prints a ScanError with full miette diagnostics. Used for user-facing
/// error display in the CLI.
pub fn print_report(error: ScanError) {
    use miette::Report;
    let report = Report::new(error);
    eprintln!("{report:?}");
}
