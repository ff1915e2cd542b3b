use json2sql_descriptor::ast::QueryDescriptor;

use crate::{compiler::constants::UNION_SEPARATOR, sql::expr::Fragment, Error};

use super::{compiler::compile_statement, scope::Scope};

/// Compile a nested descriptor on its own, one level deeper than its parent. The result still
/// carries its placeholder tags and is spliced into the parent text as is.
pub fn compile_subquery(descriptor: &QueryDescriptor, scope: &Scope) -> Result<Fragment, Error> {
    Ok(Fragment::new(compile_statement(descriptor, &scope.nested()?)?))
}

/// Compile every member with a fresh scope and join the texts with `UNION`.
pub fn compile_union(descriptors: &[QueryDescriptor], scope: &Scope) -> Result<String, Error> {
    if descriptors.is_empty() {
        return Err(Error::EmptyUnion);
    }
    let members = descriptors
        .iter()
        .map(|descriptor| compile_statement(descriptor, &Scope::new(scope.options)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(members.join(UNION_SEPARATOR))
}
