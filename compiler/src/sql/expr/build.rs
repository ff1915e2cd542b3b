use json2sql_descriptor::{ast::Operand, Operator};

use crate::sql::placeholders::tag;

use super::Fragment;

/// `NAME(<args>)`
pub fn sql_func(name: &str, args: Fragment) -> Fragment {
    Fragment::new(format!("{}({})", name.to_uppercase(), args))
}

pub mod value {
    use super::*;

    pub fn quoted(s: &str) -> String {
        format!("'{}'", s.replace('\'', "''"))
    }

    /// A literal in its SQL form, tagged for parameterization unless it is static.
    pub fn literal(lexical: String, is_static: bool) -> Fragment {
        if is_static {
            Fragment::new(lexical)
        } else {
            Fragment::new(tag(&lexical))
        }
    }

    pub fn list(items: impl IntoIterator<Item = Fragment>) -> Fragment {
        Fragment::join(items, ", ")
    }
}

pub mod cmp {
    use super::*;

    /// `<OP> <rhs>`
    pub fn comparison(operator: Operator, rhs: Fragment) -> Fragment {
        Fragment::join([nullary(operator), rhs], " ")
    }

    pub fn between(from: Fragment, to: Fragment) -> Fragment {
        Fragment::join([nullary(Operator::Between), from, "AND".into(), to], " ")
    }

    /// `IN (<items>)` or `NOT IN (<items>)`
    pub fn in_list(operator: Operator, items: Fragment) -> Fragment {
        comparison(operator, items.parenthesized())
    }

    pub fn subquery(operator: Operator, subquery: Fragment) -> Fragment {
        comparison(operator, subquery.parenthesized())
    }

    pub fn nullary(operator: Operator) -> Fragment {
        Fragment::new(operator.as_str())
    }

    /// The non-empty parts joined by spaces, led by the operand when there is one.
    pub fn prefixed(operand: Option<Operand>, parts: impl IntoIterator<Item = Fragment>) -> Fragment {
        let operand = operand.map(|o| Fragment::new(o.as_str()));
        Fragment::join(operand.into_iter().chain(parts), " ")
    }
}

pub mod case {
    use super::*;

    /// `WHEN <clause> <expression> THEN <result>`
    pub fn when(clause: Fragment, expression: Fragment, result: Fragment) -> Fragment {
        let condition = Fragment::join([clause, expression], " ");
        Fragment::new(format!("WHEN {} THEN {}", condition, result))
    }

    pub fn case(branches: Fragment, default: Fragment) -> Fragment {
        let default = if default.is_empty() {
            Fragment::empty()
        } else {
            Fragment::new(format!("ELSE {}", default))
        };
        let body = [Fragment::new("CASE"), branches, default, Fragment::new("END")];
        Fragment::join(body, " ")
    }
}
