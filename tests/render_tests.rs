// Markdown and text rendering: file links, suite indentation, line anchors,
// and backtick-escaping of @-tokens in titles.

use testscan::inventory::{Inventory, TestRecord};
use testscan::render;

const BASE: &str = "https://example.com/repo";

fn rec(name: &str, suites: &[&str], line: usize, skipped: bool) -> TestRecord {
    TestRecord {
        name: name.to_string(),
        suites: suites.iter().map(|s| s.to_string()).collect(),
        file: "a.test.js".to_string(),
        line,
        end_line: line,
        code: String::new(),
        skipped,
        update_point: 0,
    }
}

fn sample() -> Inventory {
    let mut inv = Inventory::new();
    inv.append(vec![
        rec("t1", &["A", "B"], 3, false),
        rec("wip @Tdeadbee1", &["A"], 9, true),
    ]);
    inv
}

#[test]
fn markdown_list_links_files_and_indents_suites() {
    let lines = render::markdown_list(&sample(), BASE);
    assert_eq!(
        lines[0],
        format!("\n📝 [a.test.js]({BASE}/a.test.js)")
    );
    assert!(lines.contains(&"* 📎 **A**".to_string()));
    assert!(lines.contains(&"  * 📎 **B**".to_string()));
    assert!(lines.contains(&"    * ✔️ `t1`".to_string()));
}

#[test]
fn markdown_list_escapes_tokens_and_anchors_skipped_lines() {
    let lines = render::markdown_list(&sample(), BASE);
    let skipped = format!(
        "  * [~~wip `@Tdeadbee1`~~]({BASE}/a.test.js#L9) ⚠️ *skipped*"
    );
    assert!(lines.contains(&skipped), "missing {skipped:?} in {lines:?}");
}

#[test]
fn skipped_markdown_list_carries_line_anchors() {
    let lines = render::skipped_markdown_list(&sample(), BASE);
    assert_eq!(
        lines,
        vec![format!("* [~~wip `@Tdeadbee1`~~]({BASE}/a.test.js#L9)")]
    );
}

#[test]
fn suites_markdown_list_counts_tests_per_top_level_suite() {
    let lines = render::suites_markdown_list(&sample(), BASE);
    assert_eq!(
        lines,
        vec![format!("* **A (2 tests)** [a.test.js]({BASE}/a.test.js)")]
    );
}

#[test]
fn text_list_indents_suites_and_marks_skipped() {
    let lines = render::text_list(&sample());
    assert!(lines.contains(&"= A".to_string()));
    assert!(lines.contains(&"  = B".to_string()));
    assert!(lines.contains(&"    - t1".to_string()));
    assert!(lines.contains(&"  - (skipped) wip @Tdeadbee1".to_string()));
}
