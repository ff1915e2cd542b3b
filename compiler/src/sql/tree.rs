use json2sql_descriptor::ast::{JoinType, SortDirection};

pub use super::expr::Fragment;

/// One SELECT statement, with every clause already compiled into fragments.
#[derive(Debug)]
pub struct Select {
    pub base_table: String,
    pub columns: Vec<Column>,
    pub joins: Vec<Join>,
    pub conditions: Fragment,
    pub grouping: Vec<String>,
    pub having: Fragment,
    pub sorting: Option<Sorting>,
    pub limit: Option<Fragment>,
    pub offset: Option<Fragment>,
}

#[derive(Debug)]
pub struct Column {
    pub expr: Fragment,
    pub alias: Option<String>,
}

impl Column {
    pub fn new(expr: Fragment, alias: Option<String>) -> Self {
        Self { expr, alias }
    }
}

/// A single `JOIN <table> ON <left> = <right>`.
#[derive(Debug)]
pub struct Join {
    pub join_type: JoinType,
    pub table: String,
    pub left: String,
    pub right: String,
}

#[derive(Debug)]
pub struct Sorting {
    pub fields: Vec<String>,
    pub direction: Option<SortDirection>,
}

impl From<String> for Select {
    fn from(base_table: String) -> Self {
        Self {
            base_table,
            columns: vec![],
            joins: vec![],
            conditions: Fragment::empty(),
            grouping: vec![],
            having: Fragment::empty(),
            sorting: None,
            limit: None,
            offset: None,
        }
    }
}
