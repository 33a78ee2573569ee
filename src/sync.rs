//! Identifier synchronization engine.
//!
//! Annotates source files with registry identifier tokens (`@S`/`@T` + 8
//! alphanumeric characters) or purges previously embedded ones. File text is
//! treated as an immutable snapshot: every mutation is an explicit
//! offset-based edit against a fresh read of the file, computed in the
//! snapshot's coordinates and applied back-to-front so earlier edits cannot
//! shift later offsets. Each file is read once, edited in memory, and
//! written back before the next group is touched.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::ScanError;
use crate::inventory::TestRecord;

/// Fixed-width token patterns; the wire-level contract with the registry.
static TEST_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"@T[A-Za-z0-9]{8}").unwrap());
static SUITE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"@S[A-Za-z0-9]{8}").unwrap());

/// Identifier map supplied by the external registry.
///
/// `tests` is keyed by the composite `"<firstSuiteTitle>#<testName>"`, with a
/// bare `testName` entry as fallback when no composite entry exists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdMap {
    #[serde(default)]
    pub suites: HashMap<String, String>,
    #[serde(default)]
    pub tests: HashMap<String, String>,
}

/// Outcome of an annotate/purge pass. Files are independent units of work:
/// one unreadable file lands in `failures` without aborting its siblings.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub updated: Vec<PathBuf>,
    pub failures: Vec<ScanError>,
}

enum Edit {
    Insert { at: usize, text: String },
    Delete { start: usize, end: usize },
}

impl Edit {
    fn position(&self) -> usize {
        match self {
            Edit::Insert { at, .. } => *at,
            Edit::Delete { start, .. } => *start,
        }
    }
}

/// Applies edits highest-offset first, so positions recorded against the
/// original buffer stay valid throughout.
fn apply_edits(content: &mut String, mut edits: Vec<Edit>) {
    edits.sort_by(|a, b| b.position().cmp(&a.position()));
    for edit in edits {
        match edit {
            Edit::Insert { at, text } => content.insert_str(at, &text),
            Edit::Delete { start, end } => content.replace_range(start..end, ""),
        }
    }
}

/// Embeds identifier tokens from `map` into the files behind each record
/// group. Consumed test entries are removed from the map, so when two
/// records share a composite key only the first in traversal order is
/// annotated. Re-running with the same map is a no-op: a title that already
/// contains its id is never annotated again.
pub fn annotate(groups: &[Vec<TestRecord>], map: &mut IdMap, root: &Path) -> SyncReport {
    let mut report = SyncReport::default();
    for group in groups {
        let Some(first) = group.first() else { continue };
        let path = root.join(&first.file);
        let mut content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                report.failures.push(ScanError::fs(path, e));
                continue;
            }
        };

        let edits = annotate_edits(group, map, &content);
        if edits.is_empty() {
            continue;
        }
        apply_edits(&mut content, edits);
        match fs::write(&path, &content) {
            Ok(()) => report.updated.push(path),
            Err(e) => report.failures.push(ScanError::fs(path, e)),
        }
    }
    report
}

fn annotate_edits(group: &[TestRecord], map: &mut IdMap, content: &str) -> Vec<Edit> {
    let mut edits = Vec::new();

    // The group's primary suite title: first record's first suite entry.
    // Known limitation: the id is appended to the first textual occurrence
    // of the title in the file, so an unrelated earlier occurrence of the
    // same string would be the one edited.
    if let Some(suite) = group[0].suites.first() {
        if let Some(id) = map.suites.get(suite) {
            if !suite.contains(id) {
                if let Some(pos) = content.find(suite.as_str()) {
                    edits.push(Edit::Insert {
                        at: pos + suite.len(),
                        text: format!(" {id}"),
                    });
                }
            }
        }
    }

    for test in group {
        let composite = format!(
            "{}#{}",
            test.suites.first().map(String::as_str).unwrap_or(""),
            test.name
        );
        let key = if map.tests.contains_key(&composite) {
            composite
        } else {
            test.name.clone()
        };
        let Some(id) = map.tests.get(&key) else { continue };
        if test.name.contains(id) {
            continue;
        }
        edits.push(Edit::Insert {
            at: test.update_point,
            text: format!(" {id}"),
        });
        map.tests.remove(&key);
    }
    edits
}

/// Removes embedded identifier tokens. Unless `dangerous` is set, a token is
/// only removed when it appears among the supplied map's values, i.e. the
/// registry has confirmed it. Removal targets exactly the token plus its
/// single leading space, located relative to the record's update point
/// rather than by a global text search.
pub fn purge(groups: &[Vec<TestRecord>], map: &IdMap, root: &Path, dangerous: bool) -> SyncReport {
    let mut report = SyncReport::default();
    for group in groups {
        let Some(first) = group.first() else { continue };
        let path = root.join(&first.file);
        let mut content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                report.failures.push(ScanError::fs(path, e));
                continue;
            }
        };

        let edits = purge_edits(group, map, &content, dangerous);
        if edits.is_empty() {
            continue;
        }
        apply_edits(&mut content, edits);
        match fs::write(&path, &content) {
            Ok(()) => report.updated.push(path),
            Err(e) => report.failures.push(ScanError::fs(path, e)),
        }
    }
    report
}

fn purge_edits(group: &[TestRecord], map: &IdMap, content: &str, dangerous: bool) -> Vec<Edit> {
    let mut edits = Vec::new();

    if let Some(suite) = group[0].suites.first() {
        if let Some(m) = SUITE_ID.find(suite) {
            let id = m.as_str();
            if dangerous || map.suites.values().any(|v| v == id) {
                // Same first-occurrence limitation as annotation.
                if let Some(pos) = content.find(suite.as_str()) {
                    let mut start = pos + m.start();
                    let mut end = pos + m.end();
                    // Take one adjacent space along with the token, whichever
                    // side has it, so the remaining title needs no trimming.
                    if m.start() > 0 && suite.as_bytes()[m.start() - 1] == b' ' {
                        start -= 1;
                    } else if suite.as_bytes().get(m.end()) == Some(&b' ') {
                        end += 1;
                    }
                    edits.push(Edit::Delete { start, end });
                }
            }
        }
    }

    for test in group {
        let Some(m) = TEST_ID.find(&test.name) else { continue };
        let id = m.as_str();
        if !dangerous && !map.tests.values().any(|v| v == id) {
            continue;
        }
        // The token sits inside the title literal, before the update point;
        // the nearest occurrence walking backwards is this record's own.
        // Annotation always writes a leading space, but a hand-edited title
        // may carry the bare token, so fall back to deleting just the token
        // plus one trailing space where present.
        let needle = format!(" {id}");
        let bound = test.update_point.min(content.len());
        if let Some(start) = content[..bound].rfind(&needle) {
            edits.push(Edit::Delete {
                start,
                end: start + needle.len(),
            });
        } else if let Some(start) = content[..bound].rfind(id) {
            let mut end = start + id.len();
            if content.as_bytes().get(end) == Some(&b' ') {
                end += 1;
            }
            edits.push(Edit::Delete { start, end });
        }
    }
    edits
}

/// Extracts the test token embedded in a title, if any.
pub fn test_id(title: &str) -> Option<&str> {
    TEST_ID.find(title).map(|m| m.as_str())
}

/// Extracts the suite token embedded in a title, if any.
pub fn suite_id(title: &str) -> Option<&str> {
    SUITE_ID.find(title).map(|m| m.as_str())
}
