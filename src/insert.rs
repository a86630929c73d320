use smol_str::SmolStr;

use crate::{
    bind::IntoBind,
    col::Column,
    dest::Dest,
    dialect::{Dialect, Plain},
    ident::{IntoIdent, Name, Pending},
    query::{self, Query},
    set::{SetExpr, Sets},
    writer::{FormatContext, FormatWriter},
};

/// An INSERT statement, optionally with a RETURNING clause.
#[derive(Debug, Clone)]
#[must_use]
pub struct InsertBuilder {
    dialect: &'static dyn Dialect,
    pending: Pending,
    table: Name,
    sets: Sets,
    returning: Vec<Column>,
}

impl Default for InsertBuilder {
    fn default() -> Self {
        Self::new(&Plain)
    }
}

impl InsertBuilder {
    pub fn new(dialect: &'static dyn Dialect) -> Self {
        Self {
            dialect,
            pending: Pending::None,
            table: Name::default(),
            sets: Sets::default(),
            returning: Vec::new(),
        }
    }

    pub fn dialect(mut self, dialect: &'static dyn Dialect) -> Self {
        self.pending = Pending::None;
        self.dialect = dialect;
        self
    }

    pub fn into<T: IntoIdent>(mut self, table: T) -> Self {
        self.table = Name::new(table);
        self.pending = Pending::Table;
        self
    }

    /// Aliases the table of a directly preceding `into`.
    pub fn alias<A: IntoIdent>(mut self, alias: A) -> Self {
        if let Pending::Table = self.pending {
            self.table = self.table.with_alias(alias);
        } else {
            tracing::warn!("alias ignored: nothing to alias");
        }
        self.pending = Pending::None;
        self
    }

    /// Sets `col` to `value` through a placeholder.
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

    /// Sets `col` to the SQL expression `sql`, written verbatim.
    pub fn set_sql<C, S>(mut self, col: C, sql: S) -> Self
    where
        C: IntoIdent,
        S: Into<SmolStr>,
    {
        self.pending = Pending::None;
        self.sets.push(col.into_ident(), SetExpr::Raw(sql.into()));
        self
    }

    /// Returns the column `col`, quoted, scanned into `dest`.
    pub fn returning<C, D>(mut self, col: C, dest: D) -> Self
    where
        C: IntoIdent,
        D: Into<Dest>,
    {
        self.pending = Pending::None;
        self.returning
            .push(Column::new(Name::new(col), dest.into(), false));
        self
    }

    /// Returns the SQL expression `sql`, written verbatim, scanned into `dest`.
    pub fn returning_sql<S, D>(mut self, sql: S, dest: D) -> Self
    where
        S: IntoIdent,
        D: Into<Dest>,
    {
        self.pending = Pending::None;
        self.returning
            .push(Column::new(Name::new(sql), dest.into(), true));
        self
    }

    /// Renders the statement; the destinations are those of the RETURNING
    /// clause, empty without one.
    pub fn build(&self) -> Query {
        let dests = self.returning.iter().map(|ret| ret.dest.clone()).collect();
        let query = query::render(self, self.dialect, dests);
        tracing::trace!(sql = %query.sql, args = query.args.len(), "built insert statement");
        query
    }

    pub fn to_sql(&self) -> String {
        self.build().sql
    }
}

impl FormatWriter for InsertBuilder {
    fn format_writer<W: std::fmt::Write>(
        &self,
        context: &mut FormatContext<'_, W>,
    ) -> std::fmt::Result {
        write!(context.writer, "INSERT INTO {} (", self.table)?;
        self.sets.write_columns(context)?;
        context.writer.write_str(") VALUES (")?;
        self.sets.write_values(context)?;
        context.writer.write_char(')')?;

        if !self.returning.is_empty() {
            context.writer.write_str(" RETURNING ")?;
            context.write_list(&self.returning, |ctx, ret| ret.format_writer(ctx))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use crate::{bind::Bind, dbms::Dbms};

    use super::*;

    #[test]
    fn test_insert() {
        let query = Dbms::MYSQL
            .insert()
            .into("customers")
            .set("name", "John")
            .set("phone", "555")
            .build();
        assert_eq!("INSERT INTO customers (name, phone) VALUES (?, ?)", query.sql);
        assert_eq!(vec![Bind::from("John"), Bind::from("555")], query.args);
        assert!(query.dests.is_empty());
    }

    #[test]
    fn test_insert_set_sql() {
        let query = Dbms::POSTGRES
            .insert()
            .into("customers")
            .set("name", "John")
            .set_sql("created_at", "NOW()")
            .set("age", Some(42i64))
            .set("phone", None::<String>)
            .build();
        assert_eq!(
            "INSERT INTO customers (name, created_at, age, phone) VALUES ($1, NOW(), $2, $3)",
            query.sql
        );
        assert_eq!(
            vec![Bind::from("John"), Bind::I64(42), Bind::Null],
            query.args
        );
    }

    #[test]
    fn test_insert_returning() {
        let id = Arc::new(Mutex::new(0i64));
        let query = Dbms::PLAIN
            .insert()
            .into("customers")
            .set("name", "John")
            .returning_sql("id", id.clone())
            .build();
        assert!(query.sql.ends_with("VALUES (?) RETURNING id"));
        assert_eq!(vec![Dest::from(id)], query.dests);
    }

    #[test]
    fn test_insert_returning_quoted() {
        let id = Arc::new(Mutex::new(0i64));
        let created = Arc::new(Mutex::new(String::new()));
        let query = Dbms::POSTGRES
            .insert()
            .into("customers")
            .alias("c")
            .set("name", "John")
            .returning("id", id.clone())
            .returning_sql("created_at::text", created.clone())
            .build();
        assert_eq!(
            "INSERT INTO customers AS c (name) VALUES ($1) RETURNING \"id\", created_at::text",
            query.sql
        );
        assert_eq!(vec![Dest::from(id), Dest::from(created)], query.dests);
    }

    #[test]
    fn test_insert_branching() {
        let base = Dbms::PLAIN.insert().into("customers").set("name", "John");
        let first = base.clone().set("phone", "555");
        let second = base.clone().set("city", "Berlin");
        assert_eq!("INSERT INTO customers (name) VALUES (?)", base.to_sql());
        assert_eq!(
            "INSERT INTO customers (name, phone) VALUES (?, ?)",
            first.to_sql()
        );
        assert_eq!(
            vec![Bind::from("John"), Bind::from("Berlin")],
            second.build().args
        );
    }
}
