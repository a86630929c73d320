use smol_str::SmolStr;

use crate::{
    bind::Bind,
    ident::Ident,
    writer::{FormatContext, FormatWriter},
};

/// The value side of an INSERT column or UPDATE assignment.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SetExpr {
    /// Bound through one placeholder.
    Bind(Bind),
    /// SQL written verbatim, no placeholder.
    Raw(SmolStr),
}

impl FormatWriter for SetExpr {
    fn format_writer<W: std::fmt::Write>(
        &self,
        context: &mut FormatContext<'_, W>,
    ) -> std::fmt::Result {
        match self {
            SetExpr::Bind(value) => context.write_bind(value.clone()),
            SetExpr::Raw(sql) => context.writer.write_str(sql),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SetValue {
    pub(crate) column: Ident,
    pub(crate) value: SetExpr,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Sets(Vec<SetValue>);

impl Sets {
    pub fn push(&mut self, column: Ident, value: SetExpr) {
        self.0.push(SetValue { column, value });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `a, b, c` for an INSERT column list.
    pub fn write_columns<W: std::fmt::Write>(
        &self,
        context: &mut FormatContext<'_, W>,
    ) -> std::fmt::Result {
        context.write_list(&self.0, |ctx, set| ctx.writer.write_str(set.column.as_str()))
    }

    /// `?, ?, NOW()` for an INSERT value list.
    pub fn write_values<W: std::fmt::Write>(
        &self,
        context: &mut FormatContext<'_, W>,
    ) -> std::fmt::Result {
        context.write_list(&self.0, |ctx, set| set.value.format_writer(ctx))
    }

    /// `a = ?, b = NOW()` for an UPDATE.
    pub fn write_assignments<W: std::fmt::Write>(
        &self,
        context: &mut FormatContext<'_, W>,
    ) -> std::fmt::Result {
        context.write_list(&self.0, |ctx, set| {
            ctx.writer.write_str(set.column.as_str())?;
            ctx.writer.write_str(" = ")?;
            set.value.format_writer(ctx)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::dialect::Postgres;

    use super::*;

    fn sets() -> Sets {
        let mut sets = Sets::default();
        sets.push(Ident::new("name"), SetExpr::Bind(Bind::from("John")));
        sets.push(Ident::new("updated_at"), SetExpr::Raw("NOW()".into()));
        sets.push(Ident::new("phone"), SetExpr::Bind(Bind::from("555")));
        sets
    }

    #[test]
    fn test_assignments() {
        let mut str = String::new();
        let mut context = FormatContext::new(&mut str, &Postgres);
        sets().write_assignments(&mut context).unwrap();
        let binds = context.binds;
        assert_eq!("name = $1, updated_at = NOW(), phone = $2", str);
        assert_eq!(vec![Bind::from("John"), Bind::from("555")], binds);
    }

    #[test]
    fn test_columns_and_values() {
        let mut str = String::new();
        let mut context = FormatContext::new(&mut str, &Postgres);
        let sets = sets();
        sets.write_columns(&mut context).unwrap();
        context.writer.push_str(" | ");
        sets.write_values(&mut context).unwrap();
        assert_eq!("name, updated_at, phone | $1, NOW(), $2", str);
    }
}
