use crate::{
    bind::IntoArgs,
    ident::{Ident, IntoIdent},
    raw::Raw,
    writer::{FormatContext, FormatWriter},
};

/// How identifiers of a statement are written.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IdentStyle {
    /// Through the dialect's quoting.
    #[default]
    Quoted,
    /// Verbatim.
    Raw,
}

/// One `(column condition)` predicate of a WHERE clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    column: Ident,
    sql: Raw,
}

impl Condition {
    pub fn new<C, S, A>(column: C, sql: S, args: A) -> Self
    where
        C: IntoIdent,
        S: Into<smol_str::SmolStr>,
        A: IntoArgs,
    {
        Self {
            column: column.into_ident(),
            sql: Raw::bound(sql, args),
        }
    }

    fn write<W: std::fmt::Write>(
        &self,
        context: &mut FormatContext<'_, W>,
        style: IdentStyle,
    ) -> std::fmt::Result {
        context.writer.write_char('(')?;
        match style {
            IdentStyle::Quoted => self.column.format_writer(context)?,
            IdentStyle::Raw => context.writer.write_str(self.column.as_str())?,
        }
        context.writer.write_char(' ')?;
        self.sql.format_writer(context)?;
        context.writer.write_char(')')
    }
}

/// The predicates of a statement, combined with AND.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Conditions(pub(crate) Vec<Condition>);

impl Conditions {
    pub fn push(&mut self, other: Condition) {
        self.0.push(other);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Writes ` WHERE (..) AND (..)`, or nothing without predicates.
    ///
    /// Placeholders continue from `context.placeholder` and the values are
    /// appended to `context.binds` in the same order.
    pub(crate) fn write_where<W: std::fmt::Write>(
        &self,
        context: &mut FormatContext<'_, W>,
        style: IdentStyle,
    ) -> std::fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        context.writer.write_str(" WHERE ")?;
        for (index, condition) in self.0.iter().enumerate() {
            if index > 0 {
                context.writer.write_str(" AND ")?;
            }
            condition.write(context, style)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        bind::Bind,
        dialect::{MySql, Postgres},
    };

    use super::*;

    fn conditions() -> Conditions {
        let mut conds = Conditions::default();
        conds.push(Condition::new("id", "= ?", 9));
        conds.push(Condition::new("name", "IS NOT NULL", ()));
        conds.push(Condition::new("age", "BETWEEN ? AND ?", (10, 20)));
        conds
    }

    #[test]
    fn test_where_postgres() {
        let mut str = String::new();
        let mut context = FormatContext::new(&mut str, &Postgres);
        conditions()
            .write_where(&mut context, IdentStyle::Quoted)
            .unwrap();
        let binds = context.binds;
        assert_eq!(
            " WHERE (\"id\" = $1) AND (\"name\" IS NOT NULL) AND (\"age\" BETWEEN $2 AND $3)",
            str
        );
        assert_eq!(vec![Bind::I32(9), Bind::I32(10), Bind::I32(20)], binds);
    }

    #[test]
    fn test_where_mysql() {
        let mut str = String::new();
        let mut context = FormatContext::new(&mut str, &MySql);
        conditions()
            .write_where(&mut context, IdentStyle::Quoted)
            .unwrap();
        assert_eq!(
            " WHERE (`id` = ?) AND (`name` IS NOT NULL) AND (`age` BETWEEN ? AND ?)",
            str
        );
    }

    #[test]
    fn test_where_continues_placeholder() {
        let mut conds = Conditions::default();
        conds.push(Condition::new("id", "= ?", 9));
        let mut str = String::new();
        let mut context = FormatContext::with_placeholder(&mut str, &Postgres, 2);
        conds.write_where(&mut context, IdentStyle::Raw).unwrap();
        assert_eq!(3, context.placeholder);
        assert_eq!(" WHERE (id = $3)", str);
    }

    #[test]
    fn test_where_in_sequence() {
        let mut conds = Conditions::default();
        conds.push(Condition::new("id", "in (?,?,?)", vec![4, 5, 6]));
        let mut str = String::new();
        let mut context = FormatContext::new(&mut str, &Postgres);
        conds.write_where(&mut context, IdentStyle::Raw).unwrap();
        let binds = context.binds;
        assert_eq!(" WHERE (id in ($1,$2,$3))", str);
        assert_eq!(vec![Bind::I32(4), Bind::I32(5), Bind::I32(6)], binds);
    }

    #[test]
    fn test_where_token_count_matches_binds() {
        let mut conds = Conditions::default();
        conds.push(Condition::new("a", "= ?", "x"));
        conds.push(Condition::new("b", "in (?, ?)", ["y", "z"]));
        conds.push(Condition::new("c", "between ? and ?", (1i64, 2i64)));
        let mut str = String::new();
        let mut context = FormatContext::new(&mut str, &Postgres);
        conds.write_where(&mut context, IdentStyle::Quoted).unwrap();
        let binds = context.binds;
        assert_eq!(5, binds.len());
        for n in 1..=5 {
            assert!(str.contains(&format!("${n}")));
        }
        assert!(!str.contains("$6"));
    }

    #[test]
    fn test_empty_where() {
        let mut str = String::new();
        let mut context = FormatContext::new(&mut str, &Postgres);
        Conditions::default()
            .write_where(&mut context, IdentStyle::Quoted)
            .unwrap();
        assert_eq!("", str);
    }
}
