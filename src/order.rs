use std::fmt;

use crate::{
    ident::Ident,
    writer::{FormatContext, FormatWriter},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Ordering {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OrderExpr {
    pub(crate) column: Ident,
    pub(crate) ordering: Ordering,
}

impl FormatWriter for OrderExpr {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        self.column.format_writer(context)?;
        if let Ordering::Desc = self.ordering {
            context.writer.write_str(" DESC")?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Order {
    projections: Vec<OrderExpr>,
}

impl Order {
    pub fn is_empty(&self) -> bool {
        self.projections.is_empty()
    }

    pub fn push(&mut self, column: Ident, ordering: Ordering) {
        self.projections.push(OrderExpr { column, ordering });
    }

    /// Flips the last column to descending; false if there is none.
    pub fn desc_last(&mut self) -> bool {
        match self.projections.last_mut() {
            Some(last) => {
                last.ordering = Ordering::Desc;
                true
            }
            None => false,
        }
    }
}

impl FormatWriter for Order {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        context.write_list(&self.projections, |ctx, proj| proj.format_writer(ctx))
    }
}
