//! Command-line arguments for the testscan binary.
//!
//! Uses `clap` derive for a declarative, type-safe argument surface.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "testscan",
    version,
    about = "Scan test files, list the discovered tests, and sync registry ids into source code."
)]
pub struct ScanArgs {
    /// Testing framework the files belong to (mocha, jest, codeceptjs, ...).
    pub framework: String,

    /// Glob pattern for test files, relative to the scan directory.
    /// `.` scans every source file with a known extension.
    #[arg(default_value = ".")]
    pub pattern: String,

    /// Directory to scan (defaults to the current directory).
    #[arg(short = 'd', long)]
    pub dir: Option<PathBuf>,

    /// Parse files with the TypeScript grammar.
    #[arg(long)]
    pub typescript: bool,

    /// Fail with a nonzero exit code when skipped tests are found.
    #[arg(long)]
    pub no_skipped: bool,

    /// Embed registry ids into test and suite titles.
    #[arg(long)]
    pub update_ids: bool,

    /// Remove registry ids, verifying each against the id map first.
    #[arg(long)]
    pub clean_ids: bool,

    /// Remove any matching id token without registry verification.
    #[arg(long)]
    pub unsafe_clean_ids: bool,

    /// JSON file holding the registry id map (suites/tests).
    #[arg(long, value_name = "FILE")]
    pub ids_file: Option<PathBuf>,

    /// Write the registry upload payload to a JSON file.
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Branch name to record in the export payload.
    #[arg(long)]
    pub branch: Option<String>,

    /// Base URL used for file links in markdown output
    /// (e.g. https://github.com/org/repo/tree/main).
    #[arg(short = 'u', long)]
    pub url: Option<String>,
}
