//! Normalized test inventory.
//!
//! Records are appended in file-scan order, then declaration order within a
//! file, and never mutated afterwards. All derived queries are pure linear
//! scans over the record sequence; at this scale no index is worth its
//! bookkeeping, and the scans keep the ordering deterministic.

use serde::Serialize;

/// One discovered test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestRecord {
    /// Literal text of the test title.
    pub name: String,
    /// Suite titles enclosing the test, outermost first.
    pub suites: Vec<String>,
    /// Path relative to the scan root.
    pub file: String,
    /// 1-based source line span of the declaration.
    pub line: usize,
    #[serde(rename = "endLine")]
    pub end_line: usize,
    /// Verbatim source slice of the declaration, for reporting.
    pub code: String,
    pub skipped: bool,
    /// Byte offset into the file where an identifier token may be inserted
    /// or removed: just inside the closing delimiter of the title literal.
    #[serde(skip)]
    pub update_point: usize,
}

impl TestRecord {
    /// Suite titles joined with `": "`, then the test name:
    /// suites `["A", "B"]` and name `"t"` formats as `"A: B: t"`.
    pub fn qualified_name(&self) -> String {
        if self.suites.is_empty() {
            return self.name.clone();
        }
        format!("{}: {}", self.suites.join(": "), self.name)
    }

    /// Suite-path label, e.g. `"A: B"`.
    pub fn suite_label(&self) -> String {
        self.suites.join(": ")
    }
}

/// Ordered, append-only aggregation of test records across all scanned
/// files.
#[derive(Debug, Default)]
pub struct Inventory {
    records: Vec<TestRecord>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, records: impl IntoIterator<Item = TestRecord>) {
        self.records.extend(records);
    }

    pub fn records(&self) -> &[TestRecord] {
        &self.records
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Qualified names of all non-skipped tests, in record order.
    pub fn full_names(&self) -> Vec<String> {
        self.records
            .iter()
            .filter(|t| !t.skipped)
            .map(TestRecord::qualified_name)
            .collect()
    }

    pub fn skipped_tests(&self) -> Vec<&TestRecord> {
        self.records.iter().filter(|t| t.skipped).collect()
    }

    /// Qualified names of all skipped tests, in record order.
    pub fn skipped_full_names(&self) -> Vec<String> {
        self.records
            .iter()
            .filter(|t| t.skipped)
            .map(TestRecord::qualified_name)
            .collect()
    }

    /// Unique suite-path labels, in first-appearance order.
    pub fn suite_names(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for record in &self.records {
            let label = record.suite_label();
            if !seen.contains(&label) {
                seen.push(label);
            }
        }
        seen
    }

    /// Tests whose suite-path label starts with `prefix`.
    pub fn tests_in_suite(&self, prefix: &str) -> Vec<&TestRecord> {
        self.records
            .iter()
            .filter(|t| t.suite_label().starts_with(prefix))
            .collect()
    }
}
