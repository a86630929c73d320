use crate::{
    bind::{IntoArgs, IntoBinds},
    builder::in_list,
    cond::{Condition, Conditions, IdentStyle},
    dialect::{Dialect, Plain},
    error::{Error, Result},
    ident::{IntoIdent, Name, Pending},
    query::{self, Query},
    writer::{FormatContext, FormatWriter},
};

/// A DELETE statement. It refuses to build without a WHERE predicate.
#[derive(Debug, Clone)]
#[must_use]
pub struct DeleteBuilder {
    dialect: &'static dyn Dialect,
    pending: Pending,
    table: Name,
    conditions: Conditions,
}

impl Default for DeleteBuilder {
    fn default() -> Self {
        Self::new(&Plain)
    }
}

impl DeleteBuilder {
    pub fn new(dialect: &'static dyn Dialect) -> Self {
        Self {
            dialect,
            pending: Pending::None,
            table: Name::default(),
            conditions: Conditions::default(),
        }
    }

    pub fn dialect(mut self, dialect: &'static dyn Dialect) -> Self {
        self.pending = Pending::None;
        self.dialect = dialect;
        self
    }

    pub fn from<T: IntoIdent>(mut self, table: T) -> Self {
        self.table = Name::new(table);
        self.pending = Pending::Table;
        self
    }

    pub fn alias<A: IntoIdent>(mut self, alias: A) -> Self {
        if let Pending::Table = self.pending {
            self.table = self.table.with_alias(alias);
        } else {
            tracing::warn!("alias ignored: nothing to alias");
        }
        self.pending = Pending::None;
        self
    }

    pub fn where_<C, A>(mut self, col: C, cond: &str, args: A) -> Self
    where
        C: IntoIdent,
        A: IntoArgs,
    {
        self.pending = Pending::None;
        self.conditions.push(Condition::new(col, cond, args));
        self
    }

    pub fn where_eq<C, V>(self, col: C, value: V) -> Self
    where
        C: IntoIdent,
        V: IntoBinds,
    {
        self.where_(col, "= ?", value.into_binds())
    }

    pub fn where_in<C, V>(self, col: C, values: V) -> Self
    where
        C: IntoIdent,
        V: IntoBinds,
    {
        let values = values.into_binds();
        let cond = in_list(values.len());
        self.where_(col, &cond, values)
    }

    /// Renders the statement, or [`Error::DeleteWithoutWhere`] when there is
    /// no predicate.
    pub fn try_build(&self) -> Result<Query> {
        if self.conditions.is_empty() {
            return Err(Error::DeleteWithoutWhere);
        }
        let query = query::render(self, self.dialect, Vec::new());
        tracing::trace!(sql = %query.sql, args = query.args.len(), "built delete statement");
        Ok(query)
    }

    /// Renders the statement.
    ///
    /// # Panics
    ///
    /// Panics without a WHERE predicate, so a whole table is never emptied
    /// by accident.
    pub fn build(&self) -> Query {
        match self.try_build() {
            Ok(query) => query,
            Err(err) => {
                tracing::error!(table = %self.table, "{err}");
                panic!("{err}");
            }
        }
    }

    pub fn to_sql(&self) -> String {
        self.build().sql
    }
}

impl FormatWriter for DeleteBuilder {
    fn format_writer<W: std::fmt::Write>(
        &self,
        context: &mut FormatContext<'_, W>,
    ) -> std::fmt::Result {
        write!(context.writer, "DELETE FROM {}", self.table)?;
        self.conditions.write_where(context, IdentStyle::Raw)
    }
}
