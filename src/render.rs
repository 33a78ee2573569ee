//! Plain-text and markdown rendering of the inventory.
//!
//! The list builders walk records in order and emit a suite heading whenever
//! the suite path diverges from the previously printed one, so nested suites
//! indent naturally without the renderer knowing the tree shape up front.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::inventory::Inventory;

/// Wraps `@`-prefixed tokens in backticks so markdown renderers leave them
/// alone.
static SPECIAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(@[\w:-]+)").unwrap());

fn escape_special(text: &str) -> String {
    SPECIAL.replace_all(text, "`$1`").into_owned()
}

fn indent(depth: usize, line: String) -> String {
    format!("{}{}", " ".repeat(depth * 2), line)
}

/// Re-emits suite headings for the parts of `target` that differ from the
/// previously printed path, truncating the printed path on divergence.
/// Returns the lines to emit.
fn diff_suites(printed: &mut Vec<String>, target: &[String], heading: impl Fn(usize, &str) -> String) -> Vec<String> {
    let mut lines = Vec::new();
    if printed.len() > target.len() {
        printed.truncate(target.len());
    }
    for (i, title) in target.iter().enumerate() {
        if printed.get(i) == Some(title) {
            continue;
        }
        printed.truncate(i);
        lines.push(heading(printed.len(), title));
        printed.push(title.clone());
    }
    lines
}

/// Indented text listing with per-file separators, as shown by the CLI.
pub fn text_list(inventory: &Inventory) -> Vec<String> {
    let mut list = Vec::new();
    let mut printed: Vec<String> = Vec::new();

    for test in inventory.records() {
        let file_line = format!(" 🗒️  File: {}\n", test.file);
        if !list.contains(&file_line) {
            list.push("-----".to_string());
            list.push(file_line);
            printed.clear();
        }

        list.extend(diff_suites(&mut printed, &test.suites, |depth, title| {
            indent(depth, format!("= {title}"))
        }));

        let depth = printed.len();
        if test.skipped {
            list.push(indent(depth, format!("- (skipped) {}", test.name)));
        } else {
            list.push(indent(depth, format!("- {}", test.name)));
        }
    }
    list
}

/// Markdown listing with file links against `file_link`
/// (e.g. `https://github.com/org/repo/tree/<sha>`).
pub fn markdown_list(inventory: &Inventory, file_link: &str) -> Vec<String> {
    let mut list = Vec::new();
    let mut printed: Vec<String> = Vec::new();

    for test in inventory.records() {
        let file_line = format!("\n📝 [{}]({}/{})", test.file, file_link, test.file);
        if !list.contains(&file_line) {
            list.push(file_line);
            printed.clear();
        }

        list.extend(diff_suites(&mut printed, &test.suites, |depth, title| {
            indent(depth, format!("* 📎 **{}**", escape_special(title)))
        }));

        let depth = printed.len();
        if test.skipped {
            list.push(indent(
                depth,
                format!(
                    "* [~~{}~~]({}/{}#L{}) ⚠️ *skipped*",
                    escape_special(&test.name),
                    file_link,
                    test.file,
                    test.line
                ),
            ));
        } else {
            list.push(indent(depth, format!("* ✔️ `{}`", test.name)));
        }
    }
    list
}

/// Markdown bullet list of skipped tests with line anchors.
pub fn skipped_markdown_list(inventory: &Inventory, file_link: &str) -> Vec<String> {
    inventory
        .skipped_tests()
        .iter()
        .map(|test| {
            format!(
                "* [~~{}~~]({}/{}#L{})",
                escape_special(&test.name),
                file_link,
                test.file,
                test.line
            )
        })
        .collect()
}

/// Markdown list of top-level suites with their test counts.
pub fn suites_markdown_list(inventory: &Inventory, file_link: &str) -> Vec<String> {
    let mut list = Vec::new();
    for test in inventory.records() {
        let suite = test.suites.first().map(String::as_str).unwrap_or("");
        let count = inventory.tests_in_suite(suite).len();
        let line = format!(
            "* **{suite} ({count} tests)** [{}]({}/{})",
            test.file, file_link, test.file
        );
        if !list.contains(&line) {
            list.push(line);
        }
    }
    list
}
