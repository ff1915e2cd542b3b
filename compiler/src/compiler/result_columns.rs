use json2sql_descriptor::ast::{CaseExpr, SelectDetail, SelectionItem};

use crate::{
    sql::{
        expr::{build::*, Fragment},
        tree::Column,
    },
    Error,
};

use super::{
    conditions::{compile_conditions, compile_typed_value},
    expr::format_function,
    scope::Scope,
    subqueries::compile_subquery,
};

/// An empty result means `*`.
pub fn convert_result_columns(
    items: &[SelectionItem],
    scope: &Scope,
) -> Result<Vec<Column>, Error> {
    items
        .iter()
        .map(|item| match item {
            SelectionItem::Column(column) => Ok(Column::new(column.as_str().into(), None)),
            SelectionItem::Detail(detail) => convert_detail(detail, scope),
            SelectionItem::Case(case) => convert_case(case, scope),
        })
        .collect()
}

fn convert_detail(detail: &SelectDetail, scope: &Scope) -> Result<Column, Error> {
    let alias = detail.alias.clone();
    if let Some(subquery) = &detail.subquery {
        let expr = compile_subquery(subquery, scope)?.parenthesized();
        return Ok(Column::new(expr, alias));
    }
    let field = Fragment::new(detail.field.clone().unwrap_or_default());
    let expr = match &detail.add_function {
        // Select lists carry no isStatic flag; function params there are always inlined.
        Some(call) if call.params.is_empty() => sql_func(&call.name, field),
        Some(call) => format_function(call, true),
        None => field,
    };
    Ok(Column::new(expr, alias))
}

fn convert_case(case: &CaseExpr, scope: &Scope) -> Result<Column, Error> {
    let branches = compile_conditions(&case.when, scope)?;
    let default = match &case.default_value {
        Some(default) => compile_typed_value(default, scope)?,
        None => Fragment::empty(),
    };
    Ok(Column::new(case::case(branches, default), case.alias.clone()))
}
