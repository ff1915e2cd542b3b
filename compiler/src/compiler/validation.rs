use json2sql_descriptor::ast::{
    Condition, ConditionBody, QueryDescriptor, SelectionItem, TypedValue, ValueNode,
};

use crate::Error;

/// Check every operator and datatype in the descriptor, subqueries included.
///
/// Compilation tolerates unknown vocabulary by leaving the affected comparison incomplete. This
/// is for callers who would rather reject such input up front.
pub fn validate(descriptor: &QueryDescriptor) -> Result<(), Error> {
    for item in descriptor.select_fields.iter().flatten() {
        match item {
            SelectionItem::Column(_) => {}
            SelectionItem::Detail(detail) => {
                if let Some(subquery) = &detail.subquery {
                    validate(subquery)?;
                }
            }
            SelectionItem::Case(case) => {
                validate_conditions(&case.when)?;
                if let Some(default) = &case.default_value {
                    validate_typed_value(default)?;
                }
            }
        }
    }
    validate_conditions(descriptor.conditions.as_deref().unwrap_or_default())?;
    validate_conditions(descriptor.having.as_deref().unwrap_or_default())?;
    Ok(())
}

fn validate_conditions(conditions: &[Condition]) -> Result<(), Error> {
    conditions.iter().try_for_each(validate_condition)
}

fn validate_condition(condition: &Condition) -> Result<(), Error> {
    match &condition.body {
        ConditionBody::Composite(members) => validate_conditions(members),
        ConditionBody::Comparison(comparison) => {
            comparison.operator()?;
            comparison.datatype().transpose()?;
            validate_value(comparison.value.as_ref())?;
            match &comparison.expectation {
                Some(expectation) => validate_typed_value(expectation),
                None => Ok(()),
            }
        }
    }
}

fn validate_typed_value(typed: &TypedValue) -> Result<(), Error> {
    typed.datatype().transpose()?;
    validate_value(typed.value.as_ref())
}

fn validate_value(value: Option<&ValueNode>) -> Result<(), Error> {
    match value {
        Some(ValueNode::Subquery(subquery)) => validate(subquery),
        _ => Ok(()),
    }
}
