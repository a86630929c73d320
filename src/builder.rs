use smol_str::SmolStr;

use crate::{
    bind::{IntoArgs, IntoBinds},
    col::{Column, IntoColumns},
    cond::{Condition, Conditions, IdentStyle},
    dest::Dest,
    dialect::{Dialect, Plain},
    error::Result,
    ident::{IntoIdent, Name, Pending},
    join::{JoinClause, JoinConstraint, JoinType, PendingJoin},
    order::{Order, Ordering},
    paginate::Paginator,
    query::{self, Query},
    raw::Raw,
    writer::{FormatContext, FormatWriter},
};

/// A SELECT statement.
///
/// Every method takes the builder by value and returns the derived one;
/// clone a builder to branch it into several statements.
#[derive(Debug, Clone)]
#[must_use]
pub struct SelectBuilder {
    dialect: &'static dyn Dialect,
    distinct: bool,
    pending: Pending,
    maybe_table: Option<Name>,
    columns: Vec<Column>,
    join: PendingJoin,
    joins: Vec<JoinClause>,
    conditions: Conditions,
    order: Order,
    maybe_group: Option<SmolStr>,
    maybe_having: Option<SmolStr>,
    paginator: Paginator,
    lock: bool,
}

impl Default for SelectBuilder {
    fn default() -> Self {
        Self::new(&Plain)
    }
}

impl SelectBuilder {
    pub fn new(dialect: &'static dyn Dialect) -> Self {
        Self {
            dialect,
            distinct: false,
            pending: Pending::None,
            maybe_table: None,
            columns: Vec::new(),
            join: PendingJoin::default(),
            joins: Vec::new(),
            conditions: Conditions::default(),
            order: Order::default(),
            maybe_group: None,
            maybe_having: None,
            paginator: Paginator::default(),
            lock: false,
        }
    }

    pub fn dialect(mut self, dialect: &'static dyn Dialect) -> Self {
        self.pending = Pending::None;
        self.dialect = dialect;
        self
    }

    /// Removes duplicate rows from the result.
    pub fn distinct(mut self) -> Self {
        self.pending = Pending::None;
        self.distinct = true;
        self
    }

    pub fn from<T: IntoIdent>(mut self, table: T) -> Self {
        self.maybe_table = Some(Name::new(table));
        self.pending = Pending::Table;
        self
    }

    // select stuff

    /// Selects `cols` without scanning them.
    pub fn columns<T: IntoColumns>(mut self, cols: T) -> Self {
        for col in cols.into_columns() {
            self.columns
                .push(Column::new(Name::new(col), Dest::discard(), false));
        }
        self.pending = match self.columns.len() {
            0 => Pending::None,
            len => Pending::Column(len - 1),
        };
        self
    }

    /// Selects `col` and scans it into `dest`.
    pub fn map<T, D>(self, col: T, dest: D) -> Self
    where
        T: IntoIdent,
        D: Into<Dest>,
    {
        self.push_column(Name::new(col), dest.into(), false)
    }

    /// Selects `col AS alias` and scans it into `dest`.
    pub fn map_as<T, A, D>(self, col: T, alias: A, dest: D) -> Self
    where
        T: IntoIdent,
        A: IntoIdent,
        D: Into<Dest>,
    {
        let mut this = self.push_column(Name::new(col).with_alias(alias), dest.into(), false);
        this.pending = Pending::None;
        this
    }

    /// Like [`SelectBuilder::map`] with `sql` written verbatim, for
    /// expressions such as `COUNT(*)`.
    pub fn map_sql<T, D>(self, sql: T, dest: D) -> Self
    where
        T: IntoIdent,
        D: Into<Dest>,
    {
        self.push_column(Name::new(sql), dest.into(), true)
    }

    fn push_column(mut self, name: Name, dest: Dest, raw: bool) -> Self {
        self.columns.push(Column::new(name, dest, raw));
        self.pending = Pending::Column(self.columns.len() - 1);
        self
    }

    /// Aliases whatever the previous call named: the table of `from`, the
    /// table of `join`, or the last selected column.
    pub fn alias<A: IntoIdent>(mut self, alias: A) -> Self {
        match self.pending {
            Pending::Table => {
                self.maybe_table = self.maybe_table.map(|table| table.with_alias(alias));
            }
            Pending::JoinTable => {
                self.join.table = self.join.table.map(|table| table.with_alias(alias));
            }
            Pending::Column(index) => {
                if let Some(col) = self.columns.get_mut(index) {
                    col.name = col.name.with_alias(alias);
                }
            }
            Pending::None => {
                tracing::warn!("alias ignored: nothing to alias");
            }
        }
        self.pending = Pending::None;
        self
    }

    // where stuff

    /// Adds the predicate `(col cond)`, where each `?` of `cond` is bound to
    /// the next value of `args`. A sequence argument binds one `?` per
    /// element. Predicates are combined with AND.
    ///
    /// For example `where_("age", "BETWEEN ? AND ?", (10, 20))`.
    pub fn where_<C, A>(mut self, col: C, cond: &str, args: A) -> Self
    where
        C: IntoIdent,
        A: IntoArgs,
    {
        self.pending = Pending::None;
        self.conditions.push(Condition::new(col, cond, args));
        self
    }

    /// Shorthand for `where_(col, "= ?", value)`.
    pub fn where_eq<C, V>(self, col: C, value: V) -> Self
    where
        C: IntoIdent,
        V: IntoBinds,
    {
        self.where_(col, "= ?", value.into_binds())
    }

    /// `(col IN (?, ?, ...))` with one placeholder per value.
    pub fn where_in<C, V>(self, col: C, values: V) -> Self
    where
        C: IntoIdent,
        V: IntoBinds,
    {
        let values = values.into_binds();
        let cond = in_list(values.len());
        self.where_(col, &cond, values)
    }

    // join stuff

    /// Precedes `join` for a NATURAL join; combines with the other modifiers.
    pub fn natural(mut self) -> Self {
        self.flush_join();
        self.join.natural = true;
        self
    }

    pub fn left(self) -> Self {
        self.join_type(JoinType::Left)
    }

    pub fn left_outer(self) -> Self {
        self.join_type(JoinType::LeftOuter)
    }

    /// Not supported by SQLite.
    pub fn right(self) -> Self {
        self.join_type(JoinType::Right)
    }

    /// Not supported by SQLite.
    pub fn right_outer(self) -> Self {
        self.join_type(JoinType::RightOuter)
    }

    /// Not supported by SQLite.
    pub fn full_outer(self) -> Self {
        self.join_type(JoinType::FullOuter)
    }

    pub fn inner(self) -> Self {
        self.join_type(JoinType::Inner)
    }

    /// Incompatible with NATURAL, which it clears.
    pub fn cross(mut self) -> Self {
        self = self.join_type(JoinType::Cross);
        self.join.natural = false;
        self
    }

    fn join_type(mut self, ty: JoinType) -> Self {
        self.flush_join();
        self.join.ty = ty;
        self
    }

    /// Sets the table of the current join, completed by `on` or `using`.
    /// NATURAL and CROSS joins need neither.
    pub fn join<T: IntoIdent>(mut self, table: T) -> Self {
        self.flush_join();
        self.join.table = Some(Name::new(table));
        self.pending = Pending::JoinTable;
        self
    }

    /// Completes the current join with `ON left = right`. Both sides must be
    /// `table.column` references.
    ///
    /// # Panics
    ///
    /// If either side does not contain exactly one dot.
    pub fn on(self, left: &str, right: &str) -> Self {
        match self.try_on(left, right) {
            Ok(this) => this,
            Err(err) => {
                tracing::error!(%err, "invalid join constraint");
                panic!("{err}");
            }
        }
    }

    /// Fallible form of [`SelectBuilder::on`].
    pub fn try_on(self, left: &str, right: &str) -> Result<Self> {
        let lhs = Name::split_dotted(left)?;
        let rhs = Name::split_dotted(right)?;
        Ok(self.complete_join(JoinConstraint::On(lhs, rhs)))
    }

    /// Completes the current join with `USING (cols)`.
    pub fn using<T: IntoColumns>(self, cols: T) -> Self {
        self.complete_join(JoinConstraint::Using(cols.into_columns()))
    }

    /// Adds a complete join clause written verbatim, such as
    /// `LEFT JOIN items ON items.order_id = orders.id AND items.kind = ?`.
    /// Its placeholders are numbered before those of the WHERE clause.
    pub fn join_sql<A: IntoArgs>(mut self, sql: &str, args: A) -> Self {
        self.flush_join();
        self.joins.push(JoinClause::Raw(Raw::bound(sql, args)));
        self
    }

    fn complete_join(mut self, constraint: JoinConstraint) -> Self {
        self.pending = Pending::None;
        match self.join.complete(constraint) {
            Some(join) => {
                self.joins.push(join);
                self.join = PendingJoin::default();
            }
            None => tracing::warn!("join constraint ignored: no join table"),
        }
        self
    }

    /// A join table without constraint becomes a join of its own once
    /// another join starts.
    fn flush_join(&mut self) {
        self.pending = Pending::None;
        if let Some(join) = self.join.complete(JoinConstraint::None) {
            self.joins.push(join);
            self.join = PendingJoin::default();
        }
    }

    // trailing clauses

    /// Orders by `cols`, ascending. Can be called several times.
    pub fn order_by<T: IntoColumns>(mut self, cols: T) -> Self {
        self.pending = Pending::None;
        for col in cols.into_columns() {
            self.order.push(col, Ordering::Asc);
        }
        self
    }

    /// Reverses the sort order of the last `order_by` column only.
    pub fn desc(mut self) -> Self {
        self.pending = Pending::None;
        if !self.order.desc_last() {
            tracing::warn!("desc ignored: no order by column");
        }
        self
    }

    /// Groups by the SQL expression `group`. Only the last call is kept.
    pub fn group_by<T: Into<SmolStr>>(mut self, group: T) -> Self {
        self.pending = Pending::None;
        self.maybe_group = Some(group.into());
        self
    }

    /// HAVING the SQL condition `having`. Only the last call is kept.
    pub fn having<T: Into<SmolStr>>(mut self, having: T) -> Self {
        self.pending = Pending::None;
        self.maybe_having = Some(having.into());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.pending = Pending::None;
        self.paginator.limit(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.pending = Pending::None;
        self.paginator.offset(offset);
        self
    }

    /// LIMIT and OFFSET for the zero based `page` of `per_page` rows.
    pub fn paginate(mut self, page: u64, per_page: u64) -> Self {
        self.pending = Pending::None;
        self.paginator.paginate(page, per_page);
        self
    }

    /// Locks the selected rows with FOR UPDATE.
    pub fn lock(mut self) -> Self {
        self.pending = Pending::None;
        self.lock = true;
        self
    }

    // building the builder

    /// Renders the statement. Without any selected column the literal `1` is
    /// selected and scanned into a discard destination.
    pub fn build(&self) -> Query {
        let query = query::render(self, self.dialect, self.dests());
        tracing::trace!(sql = %query.sql, args = query.args.len(), "built select statement");
        query
    }

    pub fn to_sql(&self) -> String {
        self.build().sql
    }

    fn dests(&self) -> Vec<Dest> {
        if self.columns.is_empty() {
            return vec![Dest::discard()];
        }
        self.columns.iter().map(|col| col.dest.clone()).collect()
    }
}

pub(crate) fn in_list(len: usize) -> String {
    if len == 0 {
        // matches no row rather than being invalid SQL
        return String::from("IN (NULL)");
    }
    let mut cond = String::with_capacity(5 + len * 3);
    cond.push_str("IN (");
    for index in 0..len {
        if index > 0 {
            cond.push_str(", ");
        }
        cond.push('?');
    }
    cond.push(')');
    cond
}

impl FormatWriter for SelectBuilder {
    fn format_writer<W: std::fmt::Write>(
        &self,
        context: &mut FormatContext<'_, W>,
    ) -> std::fmt::Result {
        context.writer.write_str("SELECT ")?;
        if self.distinct {
            context.writer.write_str("DISTINCT ")?;
        }
        if self.columns.is_empty() {
            context.writer.write_char('1')?;
        } else {
            context.write_list(&self.columns, |ctx, col| col.format_writer(ctx))?;
        }

        if let Some(ref table) = self.maybe_table {
            context.writer.write_str(" FROM ")?;
            table.write_quoted_as(context)?;
        }

        let unfinished = self.join.complete(JoinConstraint::None);
        for join in self.joins.iter().chain(unfinished.as_ref()) {
            context.writer.write_char(' ')?;
            join.format_writer(context)?;
        }

        self.conditions.write_where(context, IdentStyle::Quoted)?;

        if !self.order.is_empty() {
            context.writer.write_str(" ORDER BY ")?;
            self.order.format_writer(context)?;
        }

        if let Some(ref group) = self.maybe_group {
            context.writer.write_str(" GROUP BY ")?;
            context.writer.write_str(group)?;
        }

        if let Some(ref having) = self.maybe_having {
            context.writer.write_str(" HAVING ")?;
            context.writer.write_str(having)?;
        }

        self.paginator.write(&mut *context.writer)?;

        if self.lock {
            context.writer.write_str(" FOR UPDATE")?;
        }

        Ok(())
    }
}
