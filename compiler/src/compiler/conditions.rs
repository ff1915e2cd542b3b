use json2sql_descriptor::ast::{Clause, Comparison, Condition, ConditionBody, TypedValue, ValueNode};
use log::warn;

use crate::{
    errors::msg,
    sql::expr::{build::*, Fragment},
    Error,
};

use super::{
    expr::{compile_expression, format_function, format_literal},
    scope::Scope,
    subqueries::compile_subquery,
};

/// Compile a sequence of sibling conditions, each prefixed by its own operand (if any), joined by
/// single spaces.
pub fn compile_conditions(conditions: &[Condition], scope: &Scope) -> Result<Fragment, Error> {
    let fragments = conditions
        .iter()
        .map(|condition| compile_condition(condition, scope))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Fragment::join(fragments, " "))
}

fn compile_condition(condition: &Condition, scope: &Scope) -> Result<Fragment, Error> {
    match &condition.body {
        ConditionBody::Composite(members) => {
            let inner = compile_conditions(members, &scope.nested()?)?;
            Ok(cmp::prefixed(condition.operand, [inner.parenthesized()]))
        }
        ConditionBody::Comparison(comparison) => {
            let clause = compile_clause(comparison.clause.as_ref(), comparison.is_static);
            let expression = compile_right_hand_side(comparison, &clause, scope)?;
            match &comparison.expectation {
                None => Ok(cmp::prefixed(condition.operand, [clause, expression])),
                Some(expectation) => {
                    let result = compile_typed_value(expectation, scope)?;
                    Ok(case::when(clause, expression, result))
                }
            }
        }
    }
}

fn compile_clause(clause: Option<&Clause>, is_static: bool) -> Fragment {
    match clause {
        Some(Clause::Identifier(identifier)) => Fragment::new(identifier.as_str()),
        Some(Clause::Function(call)) => format_function(call, is_static),
        None => Fragment::empty(),
    }
}

fn compile_right_hand_side(
    comparison: &Comparison,
    clause: &Fragment,
    scope: &Scope,
) -> Result<Fragment, Error> {
    let operator = match comparison.operator() {
        Ok(operator) => operator,
        Err(e) => {
            warn!("{}", msg::absorbed(&e, &clause.content));
            return Ok(Fragment::empty());
        }
    };
    if operator.is_nullary() {
        return Ok(cmp::nullary(operator));
    }
    let value = comparison.value.as_ref();
    match comparison.datatype() {
        Some(Ok(datatype)) => Ok(compile_expression(
            operator,
            Some(datatype),
            comparison.is_static,
            value,
        )),
        Some(Err(e)) => {
            warn!("{}", msg::absorbed(&e, &clause.content));
            Ok(cmp::nullary(operator))
        }
        None => match value {
            Some(ValueNode::Subquery(subquery)) => {
                Ok(cmp::subquery(operator, compile_subquery(subquery, scope)?))
            }
            _ => {
                warn!("{}", msg::no_right_hand_side(&clause.content));
                Ok(cmp::nullary(operator))
            }
        },
    }
}

/// Resolve a standalone value: a literal of the declared datatype or, without one, a subquery.
/// Anything else resolves to nothing.
pub fn compile_typed_value(typed: &TypedValue, scope: &Scope) -> Result<Fragment, Error> {
    let Some(value) = typed.value.as_ref() else {
        return Ok(Fragment::empty());
    };
    match typed.datatype() {
        Some(Ok(datatype)) => Ok(format_literal(datatype, value, typed.is_static)),
        Some(Err(e)) => {
            warn!("{}", msg::absorbed(&e, "CASE"));
            Ok(Fragment::empty())
        }
        None => match value {
            ValueNode::Subquery(subquery) => Ok(compile_subquery(subquery, scope)?.parenthesized()),
            _ => {
                warn!("{}", msg::unresolvable_typed_value());
                Ok(Fragment::empty())
            }
        },
    }
}
