use json2sql_descriptor::ast;

use crate::sql::tree::Join;

/// Every `on` pair becomes its own join against the same table, in document order. Pairs are not
/// combined into one multi-column condition.
pub fn convert_joins(joins: &[ast::Join]) -> Vec<Join> {
    joins
        .iter()
        .flat_map(|join| {
            join.on.iter().map(move |(left, right)| Join {
                join_type: join.join_type,
                table: join.table.clone(),
                left: left.clone(),
                right: right.clone(),
            })
        })
        .collect()
}
