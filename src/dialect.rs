use std::{borrow::Cow, fmt};

/// Placeholder spelling and identifier quoting for a target database.
///
/// Implementations must be stateless: the same index always yields the same
/// placeholder and quoting never depends on previous calls.
pub trait Dialect: fmt::Debug + Send + Sync {
    /// The positional parameter token for the `index`-th bound argument of a
    /// statement (zero based, counted across every clause in render order).
    fn placeholder(&self, index: usize) -> Cow<'static, str>;

    /// Returns `ident` quoted for this dialect.
    fn quote(&self, ident: &str) -> String;
}

/// `?` placeholders, identifiers written as-is.
///
/// Works with MySQL and SQLite as long as identifiers are simple
/// alphanumeric names.
#[derive(Debug, Default, Clone, Copy)]
pub struct Plain;

impl Dialect for Plain {
    fn placeholder(&self, _index: usize) -> Cow<'static, str> {
        Cow::Borrowed("?")
    }

    fn quote(&self, ident: &str) -> String {
        ident.to_owned()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MySql;

impl Dialect for MySql {
    fn placeholder(&self, _index: usize) -> Cow<'static, str> {
        Cow::Borrowed("?")
    }

    fn quote(&self, ident: &str) -> String {
        quote_with(ident, '`')
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn placeholder(&self, _index: usize) -> Cow<'static, str> {
        Cow::Borrowed("?")
    }

    fn quote(&self, ident: &str) -> String {
        quote_with(ident, '"')
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Postgres;

impl Dialect for Postgres {
    fn placeholder(&self, index: usize) -> Cow<'static, str> {
        Cow::Owned(format!("${}", index + 1))
    }

    fn quote(&self, ident: &str) -> String {
        quote_with(ident, '"')
    }
}

/// Wraps `ident` in `quote`, doubling any embedded quote character.
pub fn quote_with(ident: &str, quote: char) -> String {
    let mut out = String::with_capacity(ident.len() + 2);
    out.push(quote);

    let mut last = 0;
    for (index, char) in ident.char_indices() {
        if char == quote {
            // the quote itself is written with the trailing slice
            out.push_str(&ident[last..index]);
            out.push(quote);
            last = index;
        }
    }
    out.push_str(&ident[last..]);

    out.push(quote);
    out
}
