//! Decoding of polymorphic descriptor nodes.
//!
//! Every node that can take more than one shape is decoded by looking at its JSON kind (and, for
//! objects, its keys) exactly once, then decoding the one variant that kind selects.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::{ast::*, errors::DecodeError};

const SQL_FUNC_KEY: &str = "sqlFunc";
const SUBQUERY_KEY: &str = "subquery";
const CASE_KEY: &str = "when";

/// Control characters that may not appear anywhere in a descriptor, keys included. Compilers mark
/// up their intermediate SQL with them.
pub const RESERVED_CHARACTERS: [char; 2] = ['\u{2}', '\u{3}'];

/// Decode a single query descriptor.
pub fn parse(input: impl AsRef<[u8]>) -> Result<QueryDescriptor, DecodeError> {
    let value = serde_json::from_slice::<Value>(input.as_ref())?;
    reject_reserved(&value)?;
    Ok(serde_json::from_value(value)?)
}

/// Decode a JSON array of query descriptors, one per `UNION` member.
pub fn parse_union(input: impl AsRef<[u8]>) -> Result<Vec<QueryDescriptor>, DecodeError> {
    let value = serde_json::from_slice::<Value>(input.as_ref())?;
    if !value.is_array() {
        return Err(DecodeError::ExpectedArray);
    }
    reject_reserved(&value)?;
    Ok(serde_json::from_value(value)?)
}

fn reject_reserved(value: &Value) -> Result<(), DecodeError> {
    let check = |text: &str| {
        if text.contains(&RESERVED_CHARACTERS[..]) {
            Err(DecodeError::ReservedCharacter(text.escape_debug().to_string()))
        } else {
            Ok(())
        }
    };
    match value {
        Value::String(text) => check(text.as_str()),
        Value::Array(items) => items.iter().try_for_each(reject_reserved),
        Value::Object(map) => map.iter().try_for_each(|(key, value)| {
            check(key.as_str())?;
            reject_reserved(value)
        }),
        Value::Null | Value::Bool(_) | Value::Number(_) => Ok(()),
    }
}

/// A nullable boolean flag, where `null` means `false`.
pub(crate) fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawCondition {
    operand: Option<Operand>,
    clause: Option<Clause>,
    operator: Option<String>,
    datatype: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    is_static: bool,
    value: Option<ValueNode>,
    composite: Option<Vec<Condition>>,
    expectation: Option<TypedValue>,
}

impl From<RawCondition> for Condition {
    fn from(raw: RawCondition) -> Self {
        let body = match raw.composite {
            Some(conditions) => ConditionBody::Composite(conditions),
            None => ConditionBody::Comparison(Comparison {
                clause: raw.clause,
                operator: raw.operator.unwrap_or_default(),
                datatype: raw.datatype,
                is_static: raw.is_static,
                value: raw.value,
                expectation: raw.expectation,
            }),
        };
        Condition {
            operand: raw.operand,
            body,
        }
    }
}

impl TryFrom<Value> for SelectionItem {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(column) => Ok(SelectionItem::Column(column)),
            Value::Object(map) if map.contains_key(CASE_KEY) => {
                Ok(SelectionItem::Case(from_value(Value::Object(map))?))
            }
            Value::Object(map) => Ok(SelectionItem::Detail(from_value(Value::Object(map))?)),
            other => Err(format!(
                "a selected field must be a column name or an object, found `{other}`"
            )),
        }
    }
}

impl TryFrom<Value> for Clause {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(identifier) => Ok(Clause::Identifier(identifier)),
            Value::Object(_) => Ok(Clause::Function(FunctionCall::try_from(value)?)),
            other => Err(format!(
                "a clause must be a column name or a function call, found `{other}`"
            )),
        }
    }
}

impl TryFrom<Value> for FunctionCall {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let mut map = match value {
            Value::Object(map) => map,
            other => return Err(format!("a function call must be an object, found `{other}`")),
        };
        if let Some(inner) = map.remove(SQL_FUNC_KEY) {
            return FunctionCall::try_from(inner);
        }
        let Some(Value::String(name)) = map.remove("name") else {
            return Err("a function call requires a `name`".to_string());
        };
        let is_field = matches!(map.remove("isField"), Some(Value::Bool(true)));
        let params = match map.remove("params") {
            Some(Value::Array(params)) => params,
            None | Some(Value::Null) => vec![],
            Some(param) => vec![param],
        };
        Ok(FunctionCall {
            name,
            is_field,
            params,
        })
    }
}

impl TryFrom<Value> for ValueNode {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(items) => Ok(ValueNode::Array(items)),
            Value::Object(map) => object_value(map),
            scalar => Ok(ValueNode::Literal(scalar)),
        }
    }
}

fn object_value(mut map: Map<String, Value>) -> Result<ValueNode, String> {
    if let Some(subquery) = map.remove(SUBQUERY_KEY) {
        return Ok(ValueNode::Subquery(Box::new(from_value(subquery)?)));
    }
    if map.contains_key(SQL_FUNC_KEY) {
        return Ok(ValueNode::Function(FunctionCall::try_from(Value::Object(map))?));
    }
    if map.contains_key("from") || map.contains_key("to") {
        return Ok(ValueNode::Range {
            from: map.remove("from"),
            to: map.remove("to"),
        });
    }
    Ok(ValueNode::Unsupported(Value::Object(map)))
}

impl TryFrom<Value> for Bound {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let bound_error =
            || format!("a limit or offset must be a non-negative integer, found `{value}`");
        match &value {
            Value::Number(n) => n.as_u64().map(Bound::Bare).ok_or_else(bound_error),
            Value::Object(map) => {
                let number = map
                    .get("value")
                    .and_then(Value::as_u64)
                    .ok_or_else(bound_error)?;
                let is_static = matches!(map.get("isStatic"), Some(Value::Bool(true)));
                Ok(Bound::Flagged {
                    value: number,
                    is_static,
                })
            }
            _ => Err(bound_error()),
        }
    }
}

impl TryFrom<String> for Operand {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim().to_uppercase().as_str() {
            "AND" => Ok(Operand::And),
            "OR" => Ok(Operand::Or),
            _ => Err(format!("unknown operand `{value}`, expected `AND` or `OR`")),
        }
    }
}

impl TryFrom<String> for SortDirection {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim().to_uppercase().as_str() {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            _ => Err(format!("unknown sort direction `{value}`")),
        }
    }
}

impl From<Option<String>> for JoinType {
    fn from(value: Option<String>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("inner") => JoinType::Inner,
            Some("left") => JoinType::Left,
            Some("right") => JoinType::Right,
            _ => JoinType::Plain,
        }
    }
}

fn from_value<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, String> {
    serde_json::from_value(value).map_err(|e| e.to_string())
}
