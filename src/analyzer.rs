//! File scanning and per-file extraction.
//!
//! The analyzer walks the scan root, matches files against a glob-style
//! pattern, parses each match, and runs the framework extractor. A file that
//! fails to parse is recorded and skipped; the rest of the scan continues.
//! An exclusivity abort propagates immediately and ends the run.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use walkdir::WalkDir;

use crate::errors::{Result, ScanError};
use crate::frameworks::{self, Framework};
use crate::inventory::{Inventory, TestRecord};
use crate::syntax::{self, Dialect};

/// Aggregate scan statistics, mirroring the inventory's derived views.
#[derive(Debug, Default)]
pub struct Stats {
    pub files: Vec<String>,
    pub tests: Vec<String>,
    pub skipped: Vec<String>,
}

pub struct Analyzer {
    framework: Framework,
    dir: PathBuf,
    dialect: Dialect,
    raw: Vec<Vec<TestRecord>>,
    inventory: Inventory,
    stats: Stats,
    errors: Vec<ScanError>,
}

impl Analyzer {
    pub fn new(framework: Framework, dir: impl Into<PathBuf>) -> Self {
        Self {
            framework,
            dir: dir.into(),
            dialect: Dialect::JavaScript,
            raw: Vec::new(),
            inventory: Inventory::new(),
            stats: Stats::default(),
            errors: Vec::new(),
        }
    }

    /// Switches the syntax tree provider to the TypeScript grammar.
    pub fn with_typescript(&mut self) {
        self.dialect = Dialect::TypeScript;
    }

    /// Scans the work directory for files matching `pattern` and extracts
    /// their tests. Files are processed one at a time, in sorted path order,
    /// so results are deterministic.
    pub fn analyze(&mut self, pattern: &str) -> Result<()> {
        let matcher = PatternMatcher::new(pattern)?;

        let mut files: Vec<PathBuf> = WalkDir::new(&self.dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path().to_path_buf())
            .collect();
        files.sort();

        for path in files {
            let rel = relative_path(&path, &self.dir);
            if rel.split('/').any(|part| part == "node_modules") {
                continue;
            }
            if !matcher.matches(&rel) {
                continue;
            }

            let source = match fs::read_to_string(&path) {
                Ok(s) => s,
                Err(e) => {
                    self.errors.push(ScanError::fs(path, e));
                    continue;
                }
            };

            let tree = match syntax::parse(&source, self.dialect, &rel) {
                Ok(t) => t,
                Err(e) => {
                    self.errors.push(e);
                    continue;
                }
            };

            // Exclusivity is fatal for the whole run and yields no partial
            // records for the file.
            let records = frameworks::extract(&tree, &rel, &source, self.framework)?;

            self.stats.files.push(rel);
            self.stats
                .tests
                .extend(records.iter().filter(|t| !t.skipped).map(|t| t.qualified_name()));
            self.stats
                .skipped
                .extend(records.iter().filter(|t| t.skipped).map(|t| t.qualified_name()));
            self.inventory.append(records.iter().cloned());
            self.raw.push(records);
        }
        Ok(())
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Per-file record groups in scan order, as the sync engine consumes
    /// them.
    pub fn raw_groups(&self) -> &[Vec<TestRecord>] {
        &self.raw
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Non-fatal per-file failures collected during the scan.
    pub fn errors(&self) -> &[ScanError] {
        &self.errors
    }
}

fn relative_path(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let mut out = String::new();
    for part in rel.components() {
        if !out.is_empty() {
            out.push('/');
        }
        out.push_str(&part.as_os_str().to_string_lossy());
    }
    out
}

/// Matches relative paths against a glob-style pattern. An empty or `.`
/// pattern falls back to the default test-file extensions.
struct PatternMatcher {
    regex: Option<Regex>,
}

const DEFAULT_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs"];

impl PatternMatcher {
    fn new(pattern: &str) -> Result<Self> {
        let pattern = pattern.trim();
        if pattern.is_empty() || pattern == "." {
            return Ok(Self { regex: None });
        }
        let regex = Regex::new(&glob_to_regex(pattern)).map_err(|e| ScanError::Pattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { regex: Some(regex) })
    }

    fn matches(&self, rel: &str) -> bool {
        match &self.regex {
            Some(regex) => regex.is_match(rel),
            None => Path::new(rel)
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| DEFAULT_EXTENSIONS.contains(&e))
                .unwrap_or(false),
        }
    }
}

/// Translates a glob pattern into an anchored regex. `**/` spans any number
/// of directories (including none), `*` stays within one path segment.
fn glob_to_regex(pattern: &str) -> String {
    let mut out = String::from("^");
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => {
                if chars.peek() == Some(&'*') {
                    chars.next();
                    if chars.peek() == Some(&'/') {
                        chars.next();
                        out.push_str("(?:.*/)?");
                    } else {
                        out.push_str(".*");
                    }
                } else {
                    out.push_str("[^/]*");
                }
            }
            '?' => out.push_str("[^/]"),
            c => out.push_str(&regex::escape(&c.to_string())),
        }
    }
    out.push('$');
    out
}
