use std::{fmt::Write, ops::Deref};

use crate::{bind::Bind, dialect::Dialect};

pub(crate) trait FormatWriter {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> std::fmt::Result;
}

/// Render state of a single build.
///
/// The placeholder counter and the bound values live here so that every
/// clause writer, in render order, numbers its placeholders after the ones
/// written before it and pushes its values in the same order.
pub(crate) struct FormatContext<'a, W: Write> {
    pub(crate) writer: &'a mut W,
    pub(crate) dialect: &'a dyn Dialect,
    pub(crate) placeholder: usize,
    pub(crate) binds: Vec<Bind>,
}

impl<'a, W: Write> FormatContext<'a, W> {
    pub fn new(writer: &'a mut W, dialect: &'a dyn Dialect) -> Self {
        Self::with_placeholder(writer, dialect, 0)
    }

    /// A context whose first placeholder is the `placeholder`-th of the
    /// statement, for clauses rendered after others.
    pub fn with_placeholder(writer: &'a mut W, dialect: &'a dyn Dialect, placeholder: usize) -> Self {
        Self {
            writer,
            dialect,
            placeholder,
            binds: Vec::new(),
        }
    }

    pub(crate) fn write_ident(&mut self, part: &str) -> std::fmt::Result {
        if part == "*" {
            return self.writer.write_char('*');
        }
        let quoted = self.dialect.quote(part);
        self.writer.write_str(&quoted)
    }

    /// Writes the next placeholder and binds `value` to it.
    pub(crate) fn write_bind(&mut self, value: Bind) -> std::fmt::Result {
        let token = self.dialect.placeholder(self.placeholder);
        self.placeholder += 1;
        self.binds.push(value);
        self.writer.write_str(&token)
    }

    pub(crate) fn write_list<T, F>(&mut self, items: &[T], mut write: F) -> std::fmt::Result
    where
        F: FnMut(&mut Self, &T) -> std::fmt::Result,
    {
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.writer.write_str(", ")?;
            }
            write(self, item)?;
        }
        Ok(())
    }
}

impl<D> FormatWriter for D
where
    D: Deref,
    D::Target: FormatWriter,
{
    fn format_writer<W: std::fmt::Write>(
        &self,
        ctx: &mut FormatContext<'_, W>,
    ) -> std::fmt::Result {
        self.deref().format_writer(ctx)
    }
}
