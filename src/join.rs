use crate::{
    ident::{Ident, Name},
    raw::Raw,
    writer::{FormatContext, FormatWriter},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum JoinType {
    #[default]
    Plain,
    Left,
    LeftOuter,
    Right,
    RightOuter,
    FullOuter,
    Inner,
    Cross,
}

impl JoinType {
    fn keyword(self) -> &'static str {
        match self {
            JoinType::Plain => "JOIN",
            JoinType::Left => "LEFT JOIN",
            JoinType::LeftOuter => "LEFT OUTER JOIN",
            JoinType::Right => "RIGHT JOIN",
            JoinType::RightOuter => "RIGHT OUTER JOIN",
            JoinType::FullOuter => "FULL OUTER JOIN",
            JoinType::Inner => "INNER JOIN",
            JoinType::Cross => "CROSS JOIN",
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) enum JoinConstraint {
    /// NATURAL and CROSS joins.
    #[default]
    None,
    On(Name, Name),
    Using(Vec<Ident>),
}

/// A join whose table is set but which is not completed by `on`/`using` yet.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct PendingJoin {
    pub(crate) natural: bool,
    pub(crate) ty: JoinType,
    pub(crate) table: Option<Name>,
}

impl PendingJoin {
    pub(crate) fn complete(&self, constraint: JoinConstraint) -> Option<JoinClause> {
        let table = self.table.clone()?;
        Some(JoinClause::Table {
            natural: self.natural,
            ty: self.ty,
            table,
            constraint,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum JoinClause {
    Table {
        natural: bool,
        ty: JoinType,
        table: Name,
        constraint: JoinConstraint,
    },
    /// A complete join written by the caller, with its own arguments.
    Raw(Raw),
}

impl FormatWriter for JoinClause {
    fn format_writer<W: std::fmt::Write>(
        &self,
        context: &mut FormatContext<'_, W>,
    ) -> std::fmt::Result {
        let (natural, ty, table, constraint) = match self {
            JoinClause::Raw(raw) => return raw.format_writer(context),
            JoinClause::Table {
                natural,
                ty,
                table,
                constraint,
            } => (natural, ty, table, constraint),
        };
        if *natural {
            context.writer.write_str("NATURAL ")?;
        }
        context.writer.write_str(ty.keyword())?;
        context.writer.write_char(' ')?;
        table.write_quoted_as(context)?;
        match constraint {
            JoinConstraint::None => Ok(()),
            JoinConstraint::On(lhs, rhs) => {
                context.writer.write_str(" ON ")?;
                lhs.write_quoted_dot(context)?;
                context.writer.write_str(" = ")?;
                rhs.write_quoted_dot(context)
            }
            JoinConstraint::Using(columns) => {
                context.writer.write_str(" USING (")?;
                context.write_list(columns, |ctx, col| col.format_writer(ctx))?;
                context.writer.write_char(')')
            }
        }
    }
}
