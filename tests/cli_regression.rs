// Regression tests for the CLI surface.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("testscan-cli-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("scratch dir");
    dir
}

#[test]
fn cli_lists_tests_and_reports_the_total() {
    let dir = scratch("list");
    fs::write(
        dir.join("auth.test.js"),
        "describe('Auth', () => {\n  it('login', () => {});\n  it('logout', () => {});\n});\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("testscan").unwrap();
    cmd.arg("mocha")
        .arg("**/*.test.js")
        .arg("-d")
        .arg(&dir);
    cmd.assert()
        .success()
        .stdout(contains("TOTAL 2 TESTS FOUND").and(contains("login")));
}

#[test]
fn cli_fails_on_exclusive_tests() {
    let dir = scratch("only");
    fs::write(dir.join("focused.test.js"), "it.only('focused', () => {});").unwrap();

    let mut cmd = Command::cargo_bin("testscan").unwrap();
    cmd.arg("mocha").arg("**/*.test.js").arg("-d").arg(&dir);
    cmd.assert().failure().stderr(contains("exclusive"));
}

#[test]
fn cli_fails_when_no_skipped_is_set_and_skips_exist() {
    let dir = scratch("noskip");
    fs::write(dir.join("wip.test.js"), "it.skip('wip', () => {});").unwrap();

    let mut cmd = Command::cargo_bin("testscan").unwrap();
    cmd.arg("mocha")
        .arg("**/*.test.js")
        .arg("-d")
        .arg(&dir)
        .arg("--no-skipped");
    cmd.assert().failure().stderr(contains("skipped"));
}

#[test]
fn cli_rejects_unknown_framework_names() {
    let dir = scratch("badfw");
    fs::write(dir.join("a.test.js"), "it('one', () => {});").unwrap();

    let mut cmd = Command::cargo_bin("testscan").unwrap();
    cmd.arg("jets").arg("**/*.test.js").arg("-d").arg(&dir);
    cmd.assert().failure().stderr(contains("unknown framework"));
}

#[test]
fn cli_emits_markdown_listings_with_a_base_url() {
    let dir = scratch("markdown");
    fs::write(
        dir.join("auth.test.js"),
        "describe('Auth', () => {\n  it('login', () => {});\n  it.skip('wip', () => {});\n});\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("testscan").unwrap();
    cmd.arg("mocha")
        .arg("**/*.test.js")
        .arg("-d")
        .arg(&dir)
        .arg("--url")
        .arg("https://example.com/repo");
    cmd.assert().success().stdout(
        contains("📝 [auth.test.js](https://example.com/repo/auth.test.js)")
            .and(contains("auth.test.js#L3"))
            .and(contains("* **Auth (2 tests)**")),
    );
}

#[test]
fn cli_purges_ids_with_an_id_map_file() {
    let dir = scratch("purge");
    fs::write(
        dir.join("auth.test.js"),
        "describe('Auth @S11111111', () => {\n  it('login @T22222222', () => {});\n});\n",
    )
    .unwrap();
    let ids = dir.join("ids.json");
    fs::write(
        &ids,
        r#"{"suites":{"Auth":"@S11111111"},"tests":{"Auth#login":"@T22222222"}}"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("testscan").unwrap();
    cmd.arg("mocha")
        .arg("**/*.test.js")
        .arg("-d")
        .arg(&dir)
        .arg("--clean-ids")
        .arg("--ids-file")
        .arg(&ids);
    cmd.assert().success().stdout(contains("1 files updated."));

    let content = fs::read_to_string(dir.join("auth.test.js")).unwrap();
    assert!(!content.contains("@S11111111"));
    assert!(!content.contains("@T22222222"));
}
