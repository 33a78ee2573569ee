// Extraction behavior: suite-stack resolution, skip propagation, and the
// exclusivity abort, per framework variant.

use testscan::frameworks::{extract, Framework};
use testscan::inventory::TestRecord;
use testscan::syntax::{parse, Dialect};
use testscan::ScanError;

fn scan(source: &str, framework: Framework) -> Result<Vec<TestRecord>, ScanError> {
    let tree = parse(source, Dialect::JavaScript, "sample.js").expect("fixture should parse");
    extract(&tree, "sample.js", source, framework)
}

fn scan_ok(source: &str, framework: Framework) -> Vec<TestRecord> {
    scan(source, framework).expect("extraction should succeed")
}

#[test]
fn nested_suites_build_the_full_path() {
    let src = r#"
describe("A", () => {
  describe("B", () => {
    it("t1", () => {});
  });
});
"#;
    let tests = scan_ok(src, Framework::Mocha);
    assert_eq!(tests.len(), 1);
    assert_eq!(tests[0].name, "t1");
    assert_eq!(tests[0].suites, vec!["A", "B"]);
}

#[test]
fn sibling_suites_are_not_mistaken_for_ancestors() {
    let src = r#"
describe("A", () => {
  describe("B", () => {
    it("t1", () => {});
  });
});
describe("C", () => {
  it("t2", () => {});
});
"#;
    let tests = scan_ok(src, Framework::Mocha);
    assert_eq!(tests[0].suites, vec!["A", "B"]);
    assert_eq!(tests[1].suites, vec!["C"]);
}

#[test]
fn test_after_a_closed_suite_has_no_suite_path() {
    let src = r#"
describe("A", () => {
  it("inner", () => {});
});
it("outer", () => {});
"#;
    let tests = scan_ok(src, Framework::Mocha);
    assert_eq!(tests[0].suites, vec!["A"]);
    assert!(tests[1].suites.is_empty());
}

#[test]
fn suite_skip_marker_propagates_to_nested_tests() {
    let src = r#"
describe.skip("flaky", () => {
  it("t1", () => {});
  describe("inner", () => {
    it("t2", () => {});
  });
});
describe("live", () => {
  it("t3", () => {});
});
"#;
    let tests = scan_ok(src, Framework::Mocha);
    assert!(tests[0].skipped);
    assert!(tests[1].skipped);
    assert!(!tests[2].skipped);
}

#[test]
fn own_skip_and_todo_markers_mark_the_test() {
    let src = r#"
describe("A", () => {
  it.skip("pending", () => {});
  test.todo("later");
  it("active", () => {});
});
"#;
    let tests = scan_ok(src, Framework::Jest);
    assert_eq!(tests.len(), 3);
    assert!(tests[0].skipped);
    assert!(tests[1].skipped);
    assert!(!tests[2].skipped);
}

#[test]
fn todo_is_not_recognized_outside_jest() {
    let src = r#"test.todo("later");"#;
    let tests = scan_ok(src, Framework::Mocha);
    assert!(tests.is_empty());
}

#[test]
fn exclusivity_marker_aborts_with_file_and_line() {
    let src = r#"
describe("A", () => {
  it.only("focused", () => {});
});
"#;
    let err = scan(src, Framework::Mocha).unwrap_err();
    match err {
        ScanError::Exclusive { file, line, .. } => {
            assert_eq!(file, "sample.js");
            assert_eq!(line, 3);
        }
        other => panic!("expected exclusivity abort, got {other:?}"),
    }
}

#[test]
fn exclusivity_yields_no_partial_records() {
    // A valid test precedes the marker; the abort still returns nothing.
    let src = r#"
it("first", () => {});
describe.only("focused", () => {});
"#;
    assert!(scan(src, Framework::Mocha).is_err());
}

#[test]
fn update_point_sits_inside_the_closing_delimiter() {
    let src = r#"it("login", () => {});"#;
    let tests = scan_ok(src, Framework::Mocha);
    let point = tests[0].update_point;
    assert!(src[..point].ends_with("login"));
    assert_eq!(&src[point..point + 1], "\"");
}

#[test]
fn duplicate_title_text_does_not_corrupt_update_points() {
    // The same literal text appears twice; each record's update point must
    // come from its own literal's span.
    let src = "it(\"dup\", () => {});\nit(\"dup\", () => {});\n";
    let tests = scan_ok(src, Framework::Mocha);
    assert_eq!(tests.len(), 2);
    assert!(tests[0].update_point < tests[1].update_point);
    for t in &tests {
        assert!(src[..t.update_point].ends_with("dup"));
    }
}

#[test]
fn suite_call_without_string_title_is_ignored() {
    let src = r#"
describe(dynamicTitle, () => {
  it("t", () => {});
});
"#;
    let tests = scan_ok(src, Framework::Mocha);
    assert_eq!(tests.len(), 1);
    assert!(tests[0].suites.is_empty());
}

#[test]
fn template_titles_are_extracted_without_delimiters() {
    let src = "it(`templated title`, () => {});";
    let tests = scan_ok(src, Framework::Mocha);
    assert_eq!(tests[0].name, "templated title");
}

#[test]
fn records_carry_line_span_and_code_slice() {
    let src = "describe(\"A\", () => {\n  it(\"t\", () => {\n    run();\n  });\n});\n";
    let tests = scan_ok(src, Framework::Mocha);
    assert_eq!(tests[0].line, 2);
    assert_eq!(tests[0].end_line, 4);
    assert!(tests[0].code.starts_with("it(\"t\""));
}

#[test]
fn jest_each_resolves_to_the_base_test_path() {
    let src = r#"
describe("math", () => {
  it.each([[1], [2]])("adds %i", (a) => {});
});
"#;
    let tests = scan_ok(src, Framework::Jest);
    assert_eq!(tests.len(), 1);
    assert_eq!(tests[0].name, "adds %i");
    assert_eq!(tests[0].suites, vec!["math"]);
}

#[test]
fn each_is_not_recognized_outside_jest() {
    let src = r#"it.each([[1]])("adds %i", (a) => {});"#;
    assert!(scan_ok(src, Framework::Mocha).is_empty());
}

#[test]
fn codecept_feature_scopes_following_scenarios() {
    let src = r#"
Feature('Auth');
Scenario('login', ({ I }) => {});
xScenario('wip', ({ I }) => {});
Feature('Profile');
Scenario('edit', ({ I }) => {});
"#;
    let tests = scan_ok(src, Framework::Codecept);
    assert_eq!(tests.len(), 3);
    assert_eq!(tests[0].suites, vec!["Auth"]);
    assert!(!tests[0].skipped);
    assert!(tests[1].skipped);
    assert_eq!(tests[2].suites, vec!["Profile"]);
}

#[test]
fn codecept_data_chain_declares_a_test() {
    let src = r#"
Feature('Tables');
Data([1, 2]).Scenario('rows', ({ I, current }) => {});
"#;
    let tests = scan_ok(src, Framework::Codecept);
    assert_eq!(tests.len(), 1);
    assert_eq!(tests[0].name, "rows");
    assert_eq!(tests[0].suites, vec!["Tables"]);
}

#[test]
fn codecept_scenario_only_is_fatal() {
    let src = r#"
Feature('Auth');
Scenario.only('focused', ({ I }) => {});
"#;
    let err = scan(src, Framework::Codecept).unwrap_err();
    assert!(matches!(err, ScanError::Exclusive { line: 3, .. }));
}
