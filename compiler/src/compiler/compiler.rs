use json2sql_descriptor::{ast::QueryDescriptor, parse, parse_union};
use log::{debug, trace};

use crate::{
    sql::{
        placeholders::{extract, strip_tags, Statement},
        sanitize,
        tree::Select,
    },
    Error, Options,
};

use super::{
    conditions::compile_conditions,
    constants::INJECTION_SENTINEL,
    joins::convert_joins,
    rendering::Render,
    result_columns::convert_result_columns,
    scope::Scope,
    sorting::{convert_bound, convert_grouping, convert_sorting},
    subqueries::compile_union,
};

/// Compiles query descriptors into SQL. One instance can be reused for any number of calls; it
/// holds nothing but its options.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: Options,
}

impl Compiler {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// SQL with every literal inlined.
    ///
    /// When the injection guard trips, the result is a fixed error message in place of SQL.
    pub fn build(&self, descriptor: &QueryDescriptor) -> Result<String, Error> {
        let tagged = compile_statement(descriptor, &Scope::new(&self.options))?;
        self.inline(tagged)
    }

    /// SQL with positional placeholders, plus the values bound to them.
    pub fn generate(&self, descriptor: &QueryDescriptor) -> Result<Statement, Error> {
        let tagged = compile_statement(descriptor, &Scope::new(&self.options))?;
        self.parameterize(tagged)
    }

    pub fn build_union(&self, descriptors: &[QueryDescriptor]) -> Result<String, Error> {
        let tagged = compile_union(descriptors, &Scope::new(&self.options))?;
        self.inline(tagged)
    }

    pub fn generate_union(&self, descriptors: &[QueryDescriptor]) -> Result<Statement, Error> {
        let tagged = compile_union(descriptors, &Scope::new(&self.options))?;
        self.parameterize(tagged)
    }

    /// Decode JSON input and [`build`](Self::build) it. With `with_union`, the input must be an
    /// array of descriptors.
    pub fn build_json(&self, input: &str) -> Result<String, Error> {
        if self.options.with_union {
            self.build_union(&parse_union(input)?)
        } else {
            self.build(&parse(input)?)
        }
    }

    pub fn generate_json(&self, input: &str) -> Result<Statement, Error> {
        if self.options.with_union {
            self.generate_union(&parse_union(input)?)
        } else {
            self.generate(&parse(input)?)
        }
    }

    fn inline(&self, tagged: String) -> Result<String, Error> {
        trace!("Tagged SQL: {tagged:?}");
        match self.guard(&tagged) {
            Err(Error::InjectionRejected) => return Ok(INJECTION_SENTINEL.to_string()),
            result => result?,
        }
        let sql = strip_tags(&tagged);
        debug!("Built SQL: {sql}");
        Ok(sql)
    }

    fn parameterize(&self, tagged: String) -> Result<Statement, Error> {
        trace!("Tagged SQL: {tagged:?}");
        self.guard(&tagged)?;
        let statement = extract(&tagged);
        debug!(
            "Generated SQL: {} with {} parameter(s)",
            statement.sql,
            statement.params.len()
        );
        Ok(statement)
    }

    /// Runs on the assembled text before literals are extracted, so tagged values are checked
    /// too.
    fn guard(&self, tagged: &str) -> Result<(), Error> {
        if self.options.with_sanitized_injection {
            sanitize::check(&strip_tags(tagged))
        } else {
            Ok(())
        }
    }
}

/// Compile one descriptor into SQL text that still carries its placeholder tags.
pub(crate) fn compile_statement(
    descriptor: &QueryDescriptor,
    scope: &Scope,
) -> Result<String, Error> {
    let mut select = Select::from(descriptor.table.clone());
    if let Some(items) = &descriptor.select_fields {
        select.columns = convert_result_columns(items, scope)?;
    }
    if let Some(joins) = &descriptor.joins {
        select.joins = convert_joins(joins);
    }
    if let Some(conditions) = &descriptor.conditions {
        select.conditions = compile_conditions(conditions, scope)?;
    }
    select.grouping = convert_grouping(descriptor.group_by.as_ref());
    if let Some(having) = &descriptor.having {
        select.having = compile_conditions(having, scope)?;
    }
    select.sorting = convert_sorting(descriptor.order_by.as_ref());
    select.limit = descriptor.limit.as_ref().map(convert_bound);
    select.offset = descriptor.offset.as_ref().map(convert_bound);
    Ok(select.render())
}
