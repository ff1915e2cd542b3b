use itertools::Itertools;
use json2sql_descriptor::ast::Operand;

use crate::sql::tree::*;

use super::constants::{PLACEHOLDER_CLOSE, PLACEHOLDER_OPEN};

pub trait Render {
    fn render(&self) -> String;
}

impl Render for Select {
    fn render(&self) -> String {
        let select = format!("SELECT {} FROM {}", self.columns.render(), self.base_table);
        let joins = self.joins.render();
        let where_ = filter_clause("WHERE", &self.conditions);
        let group = if self.grouping.is_empty() {
            String::new()
        } else {
            format!("GROUP BY {}", self.grouping.iter().join(", "))
        };
        let having = filter_clause("HAVING", &self.having);
        let order = self.sorting.as_ref().map(Render::render).unwrap_or_default();
        let limit = self
            .limit
            .as_ref()
            .map(|l| format!("LIMIT {l}"))
            .unwrap_or_default();
        let offset = self
            .offset
            .as_ref()
            .map(|o| format!("OFFSET {o}"))
            .unwrap_or_default();
        let sql = [select, joins, where_, group, having, order, limit, offset]
            .into_iter()
            .filter(|s| !s.is_empty())
            .join(" ");
        normalize_whitespace(&sql)
    }
}

impl Render for Vec<Column> {
    fn render(&self) -> String {
        if self.is_empty() {
            return "*".to_string();
        }
        self.iter()
            .map(Render::render)
            .filter(|s| !s.is_empty())
            .join(", ")
    }
}

impl Render for Column {
    fn render(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} AS {}", self.expr, alias),
            None => self.expr.to_string(),
        }
    }
}

impl Render for Vec<Join> {
    fn render(&self) -> String {
        self.iter().map(Render::render).join(" ")
    }
}

impl Render for Join {
    fn render(&self) -> String {
        format!(
            "{} {} ON {} = {}",
            self.join_type.keyword(),
            self.table,
            self.left,
            self.right
        )
    }
}

impl Render for Sorting {
    fn render(&self) -> String {
        let fields = self.fields.iter().join(", ");
        match self.direction {
            Some(direction) => format!("ORDER BY {} {}", fields, direction.as_str()),
            None => format!("ORDER BY {}", fields),
        }
    }
}

/// `WHERE <conditions>` or `HAVING <conditions>`, without an operand carried over from the first
/// condition. Nothing at all when there are no conditions.
fn filter_clause(keyword: &str, conditions: &Fragment) -> String {
    let conditions = strip_leading_operand(&conditions.content);
    if conditions.trim().is_empty() {
        String::new()
    } else {
        format!("{keyword} {conditions}")
    }
}

fn strip_leading_operand(conditions: &str) -> &str {
    let trimmed = conditions.trim_start();
    for operand in [Operand::And, Operand::Or] {
        if let Some(rest) = trimmed.strip_prefix(operand.as_str()) {
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                return rest.trim_start();
            }
        }
    }
    trimmed
}

/// Collapse runs of whitespace to a single space and trim the ends. Quoted literals and tagged
/// values are copied untouched.
pub fn normalize_whitespace(sql: &str) -> String {
    let mut normalized = String::with_capacity(sql.len());
    let mut rest = sql;
    let mut pending_space = false;
    while let Some(c) = rest.chars().next() {
        if c.is_whitespace() {
            pending_space = true;
            rest = &rest[c.len_utf8()..];
            continue;
        }
        if pending_space && !normalized.is_empty() {
            normalized.push(' ');
        }
        pending_space = false;
        let len = verbatim_len(rest).unwrap_or(c.len_utf8());
        normalized.push_str(&rest[..len]);
        rest = &rest[len..];
    }
    normalized
}

/// The length of the tagged value or quoted literal at the start of `s`, if one starts there and
/// is terminated.
fn verbatim_len(s: &str) -> Option<usize> {
    if let Some(body) = s.strip_prefix(PLACEHOLDER_OPEN) {
        let end = body.find(PLACEHOLDER_CLOSE)?;
        return Some(PLACEHOLDER_OPEN.len() + end + PLACEHOLDER_CLOSE.len());
    }
    if let Some(body) = s.strip_prefix('\'') {
        let end = body.find('\'')?;
        return Some(end + 2);
    }
    None
}
