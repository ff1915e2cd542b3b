use json2sql_descriptor::{
    ast::{FunctionCall, ValueNode},
    Datatype, Operator,
};
use log::warn;
use serde_json::Value;

use crate::{
    errors::msg,
    sql::expr::{build::*, Fragment},
};

/// Compile the right-hand side of one comparison: the operator followed by its formatted value.
///
/// Without a datatype the value cannot be formatted, and the operator is left dangling.
pub fn compile_expression(
    operator: Operator,
    datatype: Option<Datatype>,
    is_static: bool,
    value: Option<&ValueNode>,
) -> Fragment {
    if operator.is_nullary() {
        return cmp::nullary(operator);
    }
    let (Some(datatype), Some(value)) = (datatype, value) else {
        return cmp::nullary(operator);
    };

    match operator {
        Operator::Eq
        | Operator::Neq
        | Operator::Lt
        | Operator::Lte
        | Operator::Gt
        | Operator::Gte
        | Operator::Like
        | Operator::ILike
        | Operator::NotLike => {
            cmp::comparison(operator, format_literal(datatype, value, is_static))
        }
        Operator::Between => match value {
            ValueNode::Range { from, to } => {
                let bound = |v: &Option<Value>| {
                    v.as_ref()
                        .map(|v| format_scalar(datatype, v, is_static))
                        .unwrap_or_default()
                };
                cmp::between(bound(from), bound(to))
            }
            _ => {
                warn!("{}", msg::unsupported_value_shape(operator.as_str()));
                cmp::nullary(operator)
            }
        },
        Operator::In | Operator::NotIn => {
            cmp::in_list(operator, format_literal(datatype, value, is_static))
        }
        Operator::IsNull | Operator::IsNotNull => cmp::nullary(operator),
    }
}

/// Write a value into SQL according to its datatype.
pub fn format_literal(datatype: Datatype, value: &ValueNode, is_static: bool) -> Fragment {
    match value {
        ValueNode::Literal(v) => format_scalar(datatype, v, is_static),
        ValueNode::Array(items) => format_array(items, is_static, false),
        ValueNode::Function(call) => format_function(call, is_static),
        ValueNode::Range { .. } | ValueNode::Subquery(_) | ValueNode::Unsupported(_) => {
            warn!("{}", msg::unsupported_value_shape(datatype.as_str()));
            Fragment::empty()
        }
    }
}

/// NUMBER and BOOLEAN only take JSON numbers and booleans. Any other kind is written as nothing.
pub fn format_scalar(datatype: Datatype, scalar: &Value, is_static: bool) -> Fragment {
    match (datatype, scalar) {
        (Datatype::String, _) => value::literal(value::quoted(&lexical(scalar)), is_static),
        (Datatype::Number, Value::Number(_))
        | (Datatype::Boolean, Value::Bool(_))
        | (Datatype::Raw, _) => value::literal(lexical(scalar), is_static),
        (Datatype::Number | Datatype::Boolean, _) => {
            warn!("{}", msg::mismatched_value(datatype.as_str(), scalar));
            Fragment::empty()
        }
        (Datatype::Array, _) => format_array(std::slice::from_ref(scalar), is_static, false),
        (Datatype::Function, _) => {
            warn!("{}", msg::unsupported_value_shape(datatype.as_str()));
            Fragment::empty()
        }
    }
}

/// Comma-separated array elements. Field lists are bare identifiers. Otherwise every element is
/// formatted like the first string or number in the array, except that strings are always quoted.
/// Nested arrays and objects are dropped.
pub fn format_array(items: &[Value], is_static: bool, is_field: bool) -> Fragment {
    if is_field {
        return value::list(items.iter().map(|item| Fragment::new(lexical(item))));
    }
    let is_string = items
        .iter()
        .find_map(|item| match item {
            Value::String(_) => Some(true),
            Value::Number(_) => Some(false),
            _ => None,
        })
        .unwrap_or(false);
    value::list(items.iter().filter_map(|item| {
        let text = match item {
            Value::Array(_) | Value::Object(_) => {
                warn!("{}", msg::mismatched_value(Datatype::Array.as_str(), item));
                return None;
            }
            Value::String(_) => value::quoted(&lexical(item)),
            _ if is_string => value::quoted(&lexical(item)),
            _ => lexical(item),
        };
        Some(value::literal(text, is_static))
    }))
}

/// `NAME(<params>)`, where params follow the array rules.
pub fn format_function(call: &FunctionCall, is_static: bool) -> Fragment {
    sql_func(&call.name, format_array(&call.params, is_static, call.is_field))
}

/// The canonical text of a JSON scalar: strings without their JSON quotes, everything else as
/// written.
fn lexical(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "NULL".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::sql::placeholders::{extract, strip_tags, BindValue};

    fn node(value: Value) -> ValueNode {
        ValueNode::try_from(value).unwrap()
    }

    /// Compile and inline the literals, the way `build` does.
    fn inlined(operator: &str, datatype: &str, is_static: bool, value: Option<Value>) -> String {
        let value = value.map(node);
        let fragment = compile_expression(
            operator.parse().unwrap(),
            datatype.parse().ok(),
            is_static,
            value.as_ref(),
        );
        strip_tags(&fragment.content)
    }

    /// Compile and parameterize, the way `generate` does.
    fn parameterized(operator: &str, datatype: &str, value: Value) -> (String, Vec<BindValue>) {
        let value = node(value);
        let fragment = compile_expression(
            operator.parse().unwrap(),
            datatype.parse().ok(),
            false,
            Some(&value),
        );
        let statement = extract(&fragment.content);
        (statement.sql, statement.params)
    }

    #[test]
    fn test_comparison_operators() {
        assert_eq!(inlined("=", "STRING", false, Some(json!("value"))), "= 'value'");
        assert_eq!(inlined("<>", "STRING", false, Some(json!("value"))), "<> 'value'");
        assert_eq!(inlined("<", "NUMBER", false, Some(json!(1))), "< 1");
        assert_eq!(inlined("<=", "NUMBER", false, Some(json!(1))), "<= 1");
        assert_eq!(inlined(">", "NUMBER", false, Some(json!(1))), "> 1");
        assert_eq!(inlined(">=", "NUMBER", false, Some(json!(1))), ">= 1");
        assert_eq!(inlined("like", "STRING", false, Some(json!("%v%"))), "LIKE '%v%'");
        assert_eq!(inlined("ILIKE", "STRING", false, Some(json!("%v%"))), "ILIKE '%v%'");
        assert_eq!(
            inlined("NOT LIKE", "STRING", false, Some(json!("value"))),
            "NOT LIKE 'value'"
        );
    }

    #[test]
    fn test_between() {
        assert_eq!(
            parameterized("BETWEEN", "NUMBER", json!({"from": 1, "to": 2})),
            (
                "BETWEEN ? AND ?".to_string(),
                vec![BindValue::Integer(1), BindValue::Integer(2)]
            )
        );
        assert_eq!(
            inlined("between", "STRING", true, Some(json!({"from": "2015-01-01", "to": "2021-01-01"}))),
            "BETWEEN '2015-01-01' AND '2021-01-01'"
        );
        assert_eq!(inlined("BETWEEN", "NUMBER", false, Some(json!(3))), "BETWEEN");
    }

    #[test]
    fn test_in_lists() {
        assert_eq!(
            parameterized("IN", "ARRAY", json!(["value1", "value2"])),
            (
                "IN (?, ?)".to_string(),
                vec![
                    BindValue::String("value1".to_string()),
                    BindValue::String("value2".to_string())
                ]
            )
        );
        assert_eq!(
            inlined("NOT IN", "ARRAY", false, Some(json!([1, 2]))),
            "NOT IN (1, 2)"
        );
        assert_eq!(inlined("in", "ARRAY", true, Some(json!(["a", 2]))), "IN ('a', '2')");
    }

    #[test]
    fn test_nullary_operators_ignore_value() {
        assert_eq!(inlined("IS NULL", "STRING", false, None), "IS NULL");
        assert_eq!(inlined("is not null", "", false, Some(json!(1))), "IS NOT NULL");
        let (sql, params) = parameterized("IS NULL", "NUMBER", json!(1));
        assert_eq!(sql, "IS NULL");
        assert!(params.is_empty());
    }

    #[test]
    fn test_missing_datatype_leaves_operator_dangling() {
        assert_eq!(inlined("=", "", false, Some(json!("lorem ipsum"))), "=");
        assert_eq!(inlined("=", "invalid", false, Some(json!(1))), "=");
    }

    #[test]
    fn test_static_literals_are_not_tagged() {
        let fragment = format_literal(Datatype::String, &node(json!("a")), true);
        assert_eq!(fragment.content, "'a'");
        let fragment = format_literal(Datatype::Number, &node(json!(1)), false);
        assert_ne!(fragment.content, "1");
        assert_eq!(strip_tags(&fragment.content), "1");
    }

    #[test]
    fn test_raw_is_never_quoted() {
        let fragment = format_literal(Datatype::Raw, &node(json!("NOW()")), true);
        assert_eq!(fragment.content, "NOW()");
    }

    #[test]
    fn test_functions() {
        let sum = node(json!({"sqlFunc": {"name": "sum", "params": [100]}}));
        let fragment = format_literal(Datatype::Function, &sum, false);
        assert_eq!(strip_tags(&fragment.content), "SUM(100)");
        assert_eq!(extract(&fragment.content).params, vec![BindValue::Integer(100)]);

        let count = node(json!({"sqlFunc": {"name": "count", "isField": true, "params": ["a.field"]}}));
        let fragment = format_literal(Datatype::Function, &count, false);
        assert_eq!(fragment.content, "COUNT(a.field)");

        let concat = node(json!({"sqlFunc": {"name": "concat", "params": ["a", "b"]}}));
        let fragment = format_literal(Datatype::Function, &concat, true);
        assert_eq!(fragment.content, "CONCAT('a', 'b')");
    }

    #[test]
    fn test_literals_round_trip_through_extraction() {
        let cases = [
            (Datatype::String, json!("hello world"), BindValue::String("hello world".to_string())),
            (Datatype::String, json!("O'Brien"), BindValue::String("O'Brien".to_string())),
            (Datatype::String, json!("42"), BindValue::String("42".to_string())),
            (Datatype::Number, json!(42), BindValue::Integer(42)),
            (Datatype::Number, json!(-7), BindValue::Integer(-7)),
            (Datatype::Number, json!(2.5), BindValue::Float(2.5)),
            (Datatype::Boolean, json!(true), BindValue::Boolean(true)),
            (Datatype::Boolean, json!(false), BindValue::Boolean(false)),
            (Datatype::Raw, json!("CURRENT_DATE"), BindValue::String("CURRENT_DATE".to_string())),
        ];
        for (datatype, value, expected) in cases {
            let fragment = format_literal(datatype, &node(value), false);
            let statement = extract(&fragment.content);
            assert_eq!(statement.sql, "?");
            assert_eq!(statement.params, vec![expected]);
        }
    }

    #[test]
    fn test_array_kind_follows_first_element() {
        assert_eq!(
            strip_tags(&format_array(&[json!(null), json!(1), json!(2)], false, false).content),
            "NULL, 1, 2"
        );
        assert_eq!(
            format_array(&[json!("a"), json!("b")], false, true).content,
            "a, b"
        );
        assert!(format_array(&[], false, false).is_empty());
    }

    #[test]
    fn test_mistyped_scalars_are_written_as_nothing() {
        assert_eq!(inlined("=", "NUMBER", false, Some(json!("1 OR 1=1"))), "=");
        assert_eq!(inlined("=", "NUMBER", true, Some(json!("1"))), "=");
        assert_eq!(inlined("=", "BOOLEAN", false, Some(json!("true OR 1=1"))), "=");
        assert_eq!(inlined("=", "BOOLEAN", false, Some(json!(1))), "=");
        assert_eq!(
            inlined("BETWEEN", "NUMBER", false, Some(json!({"from": 1, "to": "2 OR 1=1"}))),
            "BETWEEN 1 AND"
        );
    }

    #[test]
    fn test_strings_in_numeric_arrays_stay_quoted() {
        assert_eq!(
            inlined("IN", "ARRAY", false, Some(json!([1, "2) OR (1=1"]))),
            "IN (1, '2) OR (1=1')"
        );
        let (sql, params) = parameterized("IN", "ARRAY", json!([1, "2"]));
        assert_eq!(sql, "IN (?, ?)");
        assert_eq!(
            params,
            vec![BindValue::Integer(1), BindValue::String("2".to_string())]
        );
    }

    #[test]
    fn test_nested_array_elements_are_dropped() {
        assert_eq!(
            inlined("IN", "ARRAY", false, Some(json!([1, [2], {"a": 3}, 4]))),
            "IN (1, 4)"
        );
    }
}
