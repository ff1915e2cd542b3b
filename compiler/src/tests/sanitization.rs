use super::test_utils::*;
use crate::{compiler::constants::INJECTION_SENTINEL, Compiler, Error};

fn with_value(value: &str) -> String {
    serde_json::json!({
        "table": "users",
        "conditions": [{"clause": "name", "datatype": "STRING", "operator": "=", "value": value}]
    })
    .to_string()
}

#[test]
fn test_guard_rejects_payloads() {
    let payloads = [
        "x'; DELETE FROM users",
        "x' -- ",
        "x' OR 1=1 DROP TABLE users",
        "a /* b */",
        "x' OR SLEEP(5)",
    ];
    let guarded = Compiler::new(options(false, true));
    for payload in payloads {
        let input = with_value(payload);
        assert_eq!(guarded.build_json(&input).unwrap(), INJECTION_SENTINEL);
        assert!(matches!(
            guarded.generate_json(&input),
            Err(Error::InjectionRejected)
        ));
    }
}

#[test]
fn test_guard_disabled_passes_through() {
    let input = with_value("x; drop table users");
    assert_eq!(
        build(&input),
        "SELECT * FROM users WHERE name = 'x; drop table users'"
    );
    let statement = generate(&input);
    assert_eq!(statement.sql, "SELECT * FROM users WHERE name = ?");
    assert_eq!(statement.params, vec![s("x; drop table users")]);
}

#[test]
fn test_guard_accepts_ordinary_queries() {
    let input = with_value("O'Brien");
    assert_eq!(
        build_with(options(false, true), &input),
        "SELECT * FROM users WHERE name = 'O''Brien'"
    );
}

#[test]
fn test_guard_checks_static_and_raw_text() {
    let input = r#"{
        "table": "users",
        "conditions": [{"clause": "a", "datatype": "RAW", "isStatic": true, "operator": "=", "value": "1; DROP TABLE users"}]
    }"#;
    assert_eq!(
        build_with(options(false, true), input),
        INJECTION_SENTINEL
    );
}

#[test]
fn test_guard_applies_to_every_union_member() {
    let input = format!("[{}, {}]", with_value("fine"), with_value("bad --"));
    let compiler = Compiler::new(options(true, true));
    assert_eq!(compiler.build_json(&input).unwrap(), INJECTION_SENTINEL);
    assert!(matches!(
        compiler.generate_json(&input),
        Err(Error::InjectionRejected)
    ));
}

#[test]
fn test_guard_checks_subqueries() {
    let input = r#"{
        "table": "users",
        "conditions": [{"clause": "id", "operator": "in", "value": {"subquery": {
            "table": "orders",
            "selectFields": ["user_id"],
            "conditions": [{"clause": "note", "datatype": "STRING", "operator": "=", "value": "@@version"}]
        }}}]
    }"#;
    assert!(matches!(
        Compiler::new(options(false, true)).generate_json(input),
        Err(Error::InjectionRejected)
    ));
}

#[test]
fn test_mistyped_values_cannot_carry_sql() {
    let input = r#"{
        "table": "users",
        "conditions": [
            {"clause": "id", "datatype": "NUMBER", "operator": "=", "value": "1 OR 1=1"},
            {"operand": "and", "clause": "ok", "datatype": "BOOLEAN", "operator": "=", "value": "true OR 1=1"},
            {"operand": "and", "clause": "id", "datatype": "ARRAY", "operator": "in", "value": [1, "2) OR (1=1"]}
        ]
    }"#;
    let expected = "SELECT * FROM users WHERE id = AND ok = AND id IN (1, '2) OR (1=1')";
    assert_eq!(build_with(options(false, true), input), expected);
    assert_eq!(build(input), expected);
    let statement = generate(input);
    assert_eq!(
        statement.sql,
        "SELECT * FROM users WHERE id = AND ok = AND id IN (?, ?)"
    );
    assert_eq!(statement.params, vec![i(1), s("2) OR (1=1")]);
}

#[test]
fn test_forged_placeholder_markers_are_rejected() {
    let forged = [
        ("\u{2}jql:'x':jql\u{3}", true),
        ("x:jql\u{3} y", false),
    ];
    for (value, is_static) in forged {
        let input = serde_json::json!({
            "table": "t",
            "conditions": [{"clause": "a", "datatype": "STRING", "isStatic": is_static, "operator": "=", "value": value}]
        })
        .to_string();
        for sanitize in [false, true] {
            let compiler = Compiler::new(options(false, sanitize));
            assert!(matches!(compiler.build_json(&input), Err(Error::Decode(_))));
            assert!(matches!(compiler.generate_json(&input), Err(Error::Decode(_))));
        }
    }
}
