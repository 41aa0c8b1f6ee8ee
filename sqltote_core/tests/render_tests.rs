#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use std::fs;

use rstest::rstest;
use sqltote_core::{Error, GENERATED_HEADER, collect, render};
use tempfile::tempdir;

mod common;
use common::{combine, extract, init_test_logger, key, user_tree, write_tree};

#[test]
fn test_render_user_tree() {
    init_test_logger();
    let tmp = tempdir().unwrap();
    user_tree(tmp.path());

    let table = collect(tmp.path(), "").unwrap();
    let source = render("queries", &table).unwrap();

    assert!(source.starts_with(GENERATED_HEADER));
    let (module, values) = extract(&source);
    assert_eq!(module, "queries");
    assert_eq!(values.len(), 2);
    assert_eq!(values[&key("User", "All")], "SELECT * FROM user");
    assert_eq!(values[&key("UserRole", "ManyByUser")], "SELECT * FROM role");
}

#[test]
fn test_render_exact_output() {
    let tmp = tempdir().unwrap();
    write_tree(tmp.path(), &[("user/all.sql", "SELECT * FROM user")]);

    let table = collect(tmp.path(), "").unwrap();
    let source = render("queries", &table).unwrap();

    let expected = r##"// Code generated by sqltote. DO NOT EDIT.
// Module: queries

/// Queries of the `User` tote.
#[allow(non_snake_case, dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct User {
    pub All: &'static str,
}

/// `User` is a generated SQL tote. Do not modify.
#[allow(non_upper_case_globals, dead_code)]
pub const User: User = User {
    All: r#"SELECT * FROM user"#,
};
"##;
    assert_eq!(source, expected);
}

#[test]
fn test_render_empty_table() {
    let tmp = tempdir().unwrap();
    let table = collect(tmp.path(), "").unwrap();

    let source = render("queries", &table).unwrap();
    let (module, values) = extract(&source);
    assert_eq!(module, "queries");
    assert!(values.is_empty());
    assert!(combine("queries", &[source.as_str()]).content.unwrap().1.is_empty());
}

#[rstest]
#[case::plain("SELECT 1")]
#[case::empty("")]
#[case::newlines("SELECT\n  id\nFROM t\n\n")]
#[case::crlf("SELECT id\r\nFROM t\r\n")]
#[case::quotes("SELECT \"id\", 'name' FROM t")]
#[case::backticks("SELECT `id` FROM `t`")]
#[case::raw_terminator("SELECT '\"#' AS a, '\"##' AS b")]
#[case::backslashes("SELECT E'\\n\\t' FROM t WHERE x LIKE '%\\_%'")]
#[case::braces("SELECT '{}' || '{{x}}'")]
#[case::unicode("SELECT 'über ✓ 漢字'")]
#[case::control("SELECT '\u{0}\u{7}\u{1b}[0m'")]
fn test_render_round_trip(#[case] content: &str) {
    let tmp = tempdir().unwrap();
    write_tree(tmp.path(), &[("q/query.sql", content)]);

    let table = collect(tmp.path(), "").unwrap();
    let source = render("queries", &table).unwrap();
    let (_, values) = extract(&source);

    let original = fs::read(tmp.path().join("q/query.sql")).unwrap();
    assert_eq!(values[&key("Q", "Query")].as_bytes(), original.as_slice());
}

#[test]
fn test_render_is_independent_of_insertion_order() {
    let tmp = tempdir().unwrap();
    write_tree(
        tmp.path(),
        &[("B_x/_z.sql", "1"), ("B_x/a.sql", "2"), ("a/q.sql", "3")],
    );

    // the walk sees "B_x" before "a" and "_z.sql" before "a.sql"
    let table = collect(tmp.path(), "").unwrap();
    let names: Vec<_> = table.namespaces().map(|ns| ns.name()).collect();
    assert_eq!(names, ["BX", "A"]);
    let fields: Vec<_> = table.namespace("BX").unwrap().identifiers().collect();
    assert_eq!(fields, ["Z", "A"]);

    let source = render("q", &table).unwrap();
    assert_eq!(source, render("q", &table.sorted()).unwrap());
    assert!(source.find("pub struct A {").unwrap() < source.find("pub struct BX {").unwrap());
    assert!(source.contains(
        "pub struct BX {\n    pub A: &'static str,\n    pub Z: &'static str,\n}\n"
    ));
}

#[rstest]
#[case::keyword_module("mod")]
#[case::self_module("Self")]
#[case::dashed_module("my-queries")]
fn test_render_rejects_bad_module(#[case] module: &str) {
    let tmp = tempdir().unwrap();
    user_tree(tmp.path());
    let table = collect(tmp.path(), "").unwrap();

    assert!(matches!(render(module, &table), Err(Error::Render(_))));
}

#[test]
fn test_render_rejects_bad_identifiers() {
    let tmp = tempdir().unwrap();
    write_tree(tmp.path(), &[("user/self.sql", "SELECT 1")]);
    let table = collect(tmp.path(), "").unwrap();
    let err = render("queries", &table).unwrap_err();
    assert!(err.to_string().contains("User.Self"));

    let tmp = tempdir().unwrap();
    write_tree(tmp.path(), &[("2fa/codes.sql", "SELECT 1")]);
    let table = collect(tmp.path(), "").unwrap();
    assert!(matches!(render("queries", &table), Err(Error::Render(_))));
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use quickcheck::{TestResult, quickcheck};

    quickcheck! {
        fn prop_any_content_round_trips(content: String) -> TestResult {
            let tmp = tempdir().unwrap();
            write_tree(tmp.path(), &[("q/query.sql", content.as_str())]);

            let table = collect(tmp.path(), "").unwrap();
            let source = match render("queries", &table) {
                Ok(source) => source,
                Err(e) => return TestResult::error(e.to_string()),
            };
            let (_, values) = extract(&source);
            TestResult::from_bool(values[&key("Q", "Query")] == content)
        }

        fn prop_render_is_deterministic(contents: Vec<String>) -> bool {
            let tmp = tempdir().unwrap();
            let files: Vec<(String, String)> = contents
                .iter()
                .enumerate()
                .map(|(i, c)| (format!("ns{}/q{i}.sql", i % 3), c.clone()))
                .collect();
            let refs: Vec<(&str, &str)> = files
                .iter()
                .map(|(p, c)| (p.as_str(), c.as_str()))
                .collect();
            write_tree(tmp.path(), &refs);

            let first = render("q", &collect(tmp.path(), "").unwrap()).unwrap();
            let second = render("q", &collect(tmp.path(), "").unwrap()).unwrap();
            first == second
        }
    }
}
