use crate::{
    bind::Bind,
    dest::Dest,
    dialect::Dialect,
    writer::{FormatContext, FormatWriter},
};

/// A rendered statement: SQL text, the values for its placeholders in
/// order, and the scan destinations for its result columns in order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Query {
    pub sql: String,
    pub args: Vec<Bind>,
    pub dests: Vec<Dest>,
}

impl Query {
    pub fn into_parts(self) -> (String, Vec<Bind>, Vec<Dest>) {
        (self.sql, self.args, self.dests)
    }
}

/// Renders `statement` from placeholder zero.
pub(crate) fn render<S>(statement: &S, dialect: &dyn Dialect, dests: Vec<Dest>) -> Query
where
    S: FormatWriter,
{
    let size_hint = 64;
    let mut sql = String::with_capacity(size_hint);
    let mut context = FormatContext::new(&mut sql, dialect);
    statement
        .format_writer(&mut context)
        .expect("should not fail on a string writer");
    let args = context.binds;
    Query { sql, args, dests }
}
