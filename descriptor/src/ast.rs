use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    decode::{flag, RawCondition},
    errors::VocabularyError,
    vocabulary::{Datatype, Operator},
};

/// One SQL statement's worth of intent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryDescriptor {
    pub table: String,
    pub select_fields: Option<Vec<SelectionItem>>,
    #[serde(rename = "join")]
    pub joins: Option<Vec<Join>>,
    pub conditions: Option<Vec<Condition>>,
    pub group_by: Option<GroupBy>,
    pub having: Option<Vec<Condition>>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<Bound>,
    pub offset: Option<Bound>,
}

impl QueryDescriptor {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            select_fields: None,
            joins: None,
            conditions: None,
            group_by: None,
            having: None,
            order_by: None,
            limit: None,
            offset: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum SelectionItem {
    Column(String),
    Detail(SelectDetail),
    Case(CaseExpr),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectDetail {
    pub field: Option<String>,
    pub alias: Option<String>,
    /// Rendered as a derived column: `(<subquery>) AS <alias>`
    pub subquery: Option<Box<QueryDescriptor>>,
    pub add_function: Option<FunctionCall>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseExpr {
    #[serde(default)]
    pub when: Vec<Condition>,
    pub default_value: Option<TypedValue>,
    pub alias: Option<String>,
}

/// A value that stands on its own, outside of a comparison: a CASE branch result or a CASE
/// default. Without a datatype, the value is expected to be a subquery.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedValue {
    pub value: Option<ValueNode>,
    pub datatype: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub is_static: bool,
}

impl TypedValue {
    pub fn datatype(&self) -> Option<Result<Datatype, VocabularyError>> {
        self.datatype.as_deref().map(str::parse::<Datatype>)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawCondition")]
pub struct Condition {
    pub operand: Option<Operand>,
    pub body: ConditionBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConditionBody {
    /// A parenthesized group of sibling conditions.
    Composite(Vec<Condition>),
    Comparison(Comparison),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub clause: Option<Clause>,
    pub operator: String,
    pub datatype: Option<String>,
    pub is_static: bool,
    pub value: Option<ValueNode>,
    /// When present, the comparison becomes a `WHEN ... THEN <expectation>` branch.
    pub expectation: Option<TypedValue>,
}

impl Comparison {
    pub fn operator(&self) -> Result<Operator, VocabularyError> {
        self.operator.parse()
    }

    pub fn datatype(&self) -> Option<Result<Datatype, VocabularyError>> {
        self.datatype.as_deref().map(str::parse::<Datatype>)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Operand {
    And,
    Or,
}

impl Operand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operand::And => "AND",
            Operand::Or => "OR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum Clause {
    Identifier(String),
    Function(FunctionCall),
}

/// `{"sqlFunc": {"name": "count", "isField": true, "params": ["users.id"]}}`
///
/// The bare inner object is accepted as well.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct FunctionCall {
    pub name: String,
    /// Params are column references rather than literal values
    pub is_field: bool,
    pub params: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum ValueNode {
    Literal(Value),
    Range {
        from: Option<Value>,
        to: Option<Value>,
    },
    Array(Vec<Value>),
    Function(FunctionCall),
    Subquery(Box<QueryDescriptor>),
    /// An object matching none of the known shapes. Compiles to nothing.
    Unsupported(Value),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Join {
    pub table: String,
    #[serde(rename = "type", default)]
    pub join_type: JoinType,
    /// Each pair becomes its own `JOIN <table> ON <left> = <right>`.
    #[serde(default)]
    pub on: IndexMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "Option<String>")]
pub enum JoinType {
    #[default]
    Plain,
    Inner,
    Left,
    Right,
}

impl JoinType {
    pub fn keyword(&self) -> &'static str {
        match self {
            JoinType::Plain => "JOIN",
            JoinType::Inner => "INNER JOIN",
            JoinType::Left => "LEFT JOIN",
            JoinType::Right => "RIGHT JOIN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupBy {
    #[serde(default)]
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderBy {
    #[serde(default)]
    pub fields: Vec<String>,
    pub sort: Option<SortDirection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// A `limit` or `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub enum Bound {
    /// A bare number, always written into the SQL text.
    Bare(u64),
    /// `{"value": 10, "isStatic": false}`
    Flagged { value: u64, is_static: bool },
}
