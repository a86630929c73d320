use smol_str::SmolStr;

use crate::{
    bind::{Array, Binds, IntoArgs},
    writer::{FormatContext, FormatWriter},
};

/// A SQL fragment written verbatim except for its `?` tokens, which are
/// replaced left to right by the dialect's placeholders for `args`.
///
/// Sequence arguments are flattened first, so each element consumes its own
/// `?`. Tokens left over once the arguments run out are written as a literal
/// `?` and arguments left over once the tokens run out are dropped. Every
/// `?` is a token, quoted or not.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Raw {
    sql: SmolStr,
    args: Vec<Binds>,
}

impl Raw {
    pub fn bound<T, A>(sql: T, args: A) -> Self
    where
        T: Into<SmolStr>,
        A: IntoArgs,
    {
        Self {
            sql: sql.into(),
            args: args.into_args(),
        }
    }
}

impl FormatWriter for Raw {
    fn format_writer<W: std::fmt::Write>(
        &self,
        context: &mut FormatContext<'_, W>,
    ) -> std::fmt::Result {
        let sql = self.sql.as_str();
        let mut pending = self.args.iter().flat_map(Array::iter);
        let mut span_start = 0;

        for (index, _) in sql.match_indices('?') {
            let Some(value) = pending.next() else {
                break;
            };
            context.writer.write_str(&sql[span_start..index])?;
            context.write_bind(value.clone())?;
            span_start = index + 1;
        }

        context.writer.write_str(&sql[span_start..])
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        bind::Bind,
        dialect::{Dialect, MySql, Postgres},
    };

    use super::*;

    fn render(raw: &Raw, dialect: &dyn Dialect) -> (String, Vec<Bind>) {
        let mut str = String::new();
        let mut context = FormatContext::new(&mut str, dialect);
        raw.format_writer(&mut context).unwrap();
        let binds = context.binds;
        (str, binds)
    }

    #[test]
    fn test_raw_bind() {
        let value = Raw::bound("'test' = ?", "x");
        let (sql, _) = render(&value, &Postgres);
        assert_eq!("'test' = $1", sql);
        let (sql, _) = render(&value, &MySql);
        assert_eq!("'test' = ?", sql);
    }

    #[test]
    fn test_quoted_question_mark_is_a_token() {
        let value = Raw::bound("= '?' OR name = ?", ("a", "b"));
        let (sql, binds) = render(&value, &Postgres);
        assert_eq!("= '$1' OR name = $2", sql);
        assert_eq!(vec![Bind::from("a"), Bind::from("b")], binds);

        let value = Raw::bound("\"a?b\" = ?", (1, 2));
        let (sql, binds) = render(&value, &Postgres);
        assert_eq!("\"a$1b\" = $2", sql);
        assert_eq!(2, binds.len());
    }

    #[test]
    fn test_backslash_escape_keeps_later_tokens() {
        let value = Raw::bound("<> 'it\\'s' AND id = ?", 5);
        let (sql, binds) = render(&value, &MySql);
        assert_eq!("<> 'it\\'s' AND id = ?", sql);
        assert_eq!(vec![Bind::I32(5)], binds);
    }

    #[test]
    fn test_sequence_expansion() {
        let value = Raw::bound("in (?,?,?)", vec![4, 5, 6]);
        let (sql, binds) = render(&value, &Postgres);
        assert_eq!("in ($1,$2,$3)", sql);
        assert_eq!(vec![Bind::I32(4), Bind::I32(5), Bind::I32(6)], binds);
    }

    #[test]
    fn test_mixed_scalar_and_sequence() {
        let value = Raw::bound("= ? or x in (?, ?) or y = ?", (1, [2, 3], 4));
        let (sql, binds) = render(&value, &Postgres);
        assert_eq!("= $1 or x in ($2, $3) or y = $4", sql);
        assert_eq!(
            vec![Bind::I32(1), Bind::I32(2), Bind::I32(3), Bind::I32(4)],
            binds
        );
    }

    #[test]
    fn test_excess_tokens_stay_literal() {
        let value = Raw::bound("between ? and ?", 10);
        let (sql, binds) = render(&value, &Postgres);
        assert_eq!("between $1 and ?", sql);
        assert_eq!(vec![Bind::I32(10)], binds);
    }

    #[test]
    fn test_excess_args_dropped() {
        let value = Raw::bound("= ?", (1, 2, 3));
        let (sql, binds) = render(&value, &Postgres);
        assert_eq!("= $1", sql);
        assert_eq!(vec![Bind::I32(1)], binds);
    }

    #[test]
    fn test_no_args() {
        let value = Raw::bound("count(*) > 1", ());
        let (sql, binds) = render(&value, &Postgres);
        assert_eq!("count(*) > 1", sql);
        assert!(binds.is_empty());
    }
}
