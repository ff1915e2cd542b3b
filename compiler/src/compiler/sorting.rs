use json2sql_descriptor::ast::{Bound, GroupBy, OrderBy};

use crate::sql::{
    expr::{build::value, Fragment},
    tree::Sorting,
};

pub fn convert_sorting(order_by: Option<&OrderBy>) -> Option<Sorting> {
    let order_by = order_by?;
    if order_by.fields.is_empty() {
        return None;
    }
    Some(Sorting {
        fields: order_by.fields.clone(),
        direction: order_by.sort,
    })
}

pub fn convert_grouping(group_by: Option<&GroupBy>) -> Vec<String> {
    group_by.map(|g| g.fields.clone()).unwrap_or_default()
}

/// A bare number is always written as is. A flagged one is parameterized unless it is static.
pub fn convert_bound(bound: &Bound) -> Fragment {
    match *bound {
        Bound::Bare(n) => Fragment::new(n.to_string()),
        Bound::Flagged { value: n, is_static } => value::literal(n.to_string(), is_static),
    }
}
