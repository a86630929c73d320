use smol_str::SmolStr;

use crate::{
    bind::{IntoArgs, IntoBind, IntoBinds},
    builder::in_list,
    cond::{Condition, Conditions, IdentStyle},
    dialect::{Dialect, Plain},
    error::{Error, Result},
    ident::{IntoIdent, Name, Pending},
    query::{self, Query},
    set::{SetExpr, Sets},
    writer::{FormatContext, FormatWriter},
};

/// An UPDATE statement. It needs at least one `set` to be built.
#[derive(Debug, Clone)]
#[must_use]
pub struct UpdateBuilder {
    dialect: &'static dyn Dialect,
    pending: Pending,
    table: Name,
    sets: Sets,
    conditions: Conditions,
}

impl Default for UpdateBuilder {
    fn default() -> Self {
        Self::new(&Plain)
    }
}

impl UpdateBuilder {
    pub fn new(dialect: &'static dyn Dialect) -> Self {
        Self {
            dialect,
            pending: Pending::None,
            table: Name::default(),
            sets: Sets::default(),
            conditions: Conditions::default(),
        }
    }

    pub fn dialect(mut self, dialect: &'static dyn Dialect) -> Self {
        self.pending = Pending::None;
        self.dialect = dialect;
        self
    }

    pub fn table<T: IntoIdent>(mut self, table: T) -> Self {
        self.table = Name::new(table);
        self.pending = Pending::Table;
        self
    }

    /// Aliases the table of a directly preceding `table`.
    pub fn alias<A: IntoIdent>(mut self, alias: A) -> Self {
        if let Pending::Table = self.pending {
            self.table = self.table.with_alias(alias);
        } else {
            tracing::warn!("alias ignored: nothing to alias");
        }
        self.pending = Pending::None;
        self
    }

    pub fn set<C, V>(mut self, col: C, value: V) -> Self
    where
        C: IntoIdent,
        V: IntoBind,
    {
        self.pending = Pending::None;
        self.sets
            .push(col.into_ident(), SetExpr::Bind(value.into_bind()));
        self
    }

    /// `col = sql`, with `sql` written verbatim. For example
    /// `set_sql("visits", "visits + 1")`.
    pub fn set_sql<C, S>(mut self, col: C, sql: S) -> Self
    where
        C: IntoIdent,
        S: Into<SmolStr>,
    {
        self.pending = Pending::None;
        self.sets.push(col.into_ident(), SetExpr::Raw(sql.into()));
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

    /// Renders the statement, or [`Error::UpdateWithoutSet`] when no column
    /// is set.
    pub fn try_build(&self) -> Result<Query> {
        if self.sets.is_empty() {
            return Err(Error::UpdateWithoutSet);
        }
        let query = query::render(self, self.dialect, Vec::new());
        tracing::trace!(sql = %query.sql, args = query.args.len(), "built update statement");
        Ok(query)
    }

    /// Renders the statement.
    ///
    /// # Panics
    ///
    /// Panics when no column is set.
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

impl FormatWriter for UpdateBuilder {
    fn format_writer<W: std::fmt::Write>(
        &self,
        context: &mut FormatContext<'_, W>,
    ) -> std::fmt::Result {
        write!(context.writer, "UPDATE {} SET ", self.table)?;
        self.sets.write_assignments(context)?;
        self.conditions.write_where(context, IdentStyle::Raw)
    }
}

#[cfg(test)]
mod tests {
    use crate::{bind::Bind, dbms::Dbms};

    use super::*;

    #[test]
    fn test_update() {
        let query = Dbms::PLAIN
            .update()
            .table("customers")
            .set("name", "John")
            .set("phone", "555")
            .where_("id", "= ?", 9)
            .build();
        assert_eq!(
            "UPDATE customers SET name = ?, phone = ? WHERE (id = ?)",
            query.sql
        );
        assert_eq!(
            vec![Bind::from("John"), Bind::from("555"), Bind::I32(9)],
            query.args
        );
        assert!(query.dests.is_empty());
    }

    #[test]
    fn test_update_postgres_numbering_continues_into_where() {
        let query = Dbms::POSTGRES
            .update()
            .table("customers")
            .set("name", "John")
            .set("phone", "555")
            .where_eq("id", 9)
            .build();
        assert_eq!(
            "UPDATE customers SET name = $1, phone = $2 WHERE (id = $3)",
            query.sql
        );
    }

    #[test]
    fn test_update_set_sql_and_alias() {
        let query = Dbms::POSTGRES
            .update()
            .table("customers")
            .alias("c")
            .set_sql("visits", "visits + 1")
            .set("name", "John")
            .where_in("id", [1, 2])
            .build();
        assert_eq!(
            "UPDATE customers AS c SET visits = visits + 1, name = $1 WHERE (id IN ($2, $3))",
            query.sql
        );
        assert_eq!(
            vec![Bind::from("John"), Bind::I32(1), Bind::I32(2)],
            query.args
        );
    }

    #[test]
    fn test_update_branching() {
        let base = Dbms::PLAIN.update().table("customers").set("name", "John");
        let one = base.clone().where_eq("id", 1);
        let all = base.clone().set("phone", "555");
        assert_eq!("UPDATE customers SET name = ? WHERE (id = ?)", one.to_sql());
        assert_eq!("UPDATE customers SET name = ?, phone = ?", all.to_sql());
        assert_eq!("UPDATE customers SET name = ?", base.to_sql());
    }

    #[test]
    fn test_update_without_set() {
        let err = Dbms::PLAIN
            .update()
            .table("customers")
            .where_eq("id", 1)
            .try_build()
            .unwrap_err();
        assert_eq!(Error::UpdateWithoutSet, err);
    }

    #[test]
    #[should_panic(expected = "UPDATE with no columns set")]
    fn test_update_without_set_panics() {
        let _ = Dbms::PLAIN.update().table("customers").build();
    }
}
