use crate::{
    dest::Dest,
    ident::{Ident, IntoIdent, Name},
    writer::{FormatContext, FormatWriter},
};

/// A selected column and where its value goes.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Column {
    pub(crate) name: Name,
    pub(crate) dest: Dest,
    /// Written verbatim instead of quoted.
    pub(crate) raw: bool,
}

impl Column {
    pub(crate) fn new(name: Name, dest: Dest, raw: bool) -> Self {
        Self { name, dest, raw }
    }
}

impl FormatWriter for Column {
    fn format_writer<W: std::fmt::Write>(
        &self,
        context: &mut FormatContext<'_, W>,
    ) -> std::fmt::Result {
        if self.raw {
            write!(context.writer, "{}", self.name)
        } else {
            self.name.write_quoted_as(context)
        }
    }
}

pub trait IntoColumns {
    fn into_columns(self) -> Vec<Ident>;
}

impl IntoColumns for &str {
    fn into_columns(self) -> Vec<Ident> {
        vec![self.into_ident()]
    }
}

impl IntoColumns for String {
    fn into_columns(self) -> Vec<Ident> {
        vec![self.into_ident()]
    }
}

impl IntoColumns for Ident {
    fn into_columns(self) -> Vec<Ident> {
        vec![self]
    }
}

impl<T, const N: usize> IntoColumns for [T; N]
where
    T: IntoIdent,
{
    fn into_columns(self) -> Vec<Ident> {
        self.into_iter().map(IntoIdent::into_ident).collect()
    }
}

impl<T> IntoColumns for Vec<T>
where
    T: IntoIdent,
{
    fn into_columns(self) -> Vec<Ident> {
        self.into_iter().map(IntoIdent::into_ident).collect()
    }
}

impl<T> IntoColumns for &[T]
where
    T: IntoIdent + Clone,
{
    fn into_columns(self) -> Vec<Ident> {
        self.iter().cloned().map(IntoIdent::into_ident).collect()
    }
}

#[macro_export]
macro_rules! col {
    () => {
        ::std::vec::Vec::<$crate::Ident>::new()
    };
    ( $($col:expr),+ $(,)? ) => {
        ::std::vec![$( $crate::IntoIdent::into_ident($col) ),+]
    };
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        dialect::{Dialect, MySql, Postgres},
        tests::format_writer,
    };

    use super::*;

    fn select<T>(value: T) -> Vec<Ident>
    where
        T: IntoColumns,
    {
        value.into_columns()
    }

    #[test]
    fn test_into_columns() {
        assert_eq!(1, select("hello").len());
        assert_eq!(1, select(String::from("hello")).len());
        assert_eq!(1, select(Ident::new("test?")).len());
        assert_eq!(2, select(["hello", "world"]).len());
        assert_eq!(2, select(vec![String::from("a"), String::from("b")]).len());
        let slice: &[&str] = &["a", "b", "c"];
        assert_eq!(3, select(slice).len());
        assert_eq!(2, select(crate::col!["id", String::from("name")]).len());
        assert!(select(crate::col![]).is_empty());
    }

    fn column(dialect: &dyn Dialect, column: Column) -> String {
        format_writer(column, dialect)
    }

    #[test]
    fn test_quoted_column() {
        let col = Column::new(Name::new("id"), Dest::discard(), false);
        assert_eq!("\"id\"", column(&Postgres, col.clone()));
        assert_eq!("`id`", column(&MySql, col));
    }

    #[test]
    fn test_aliased_column() {
        let dest = Dest::from(Arc::new(0i32));
        let col = Column::new(Name::new("telephone").with_alias("phone"), dest, false);
        assert_eq!("\"telephone\" AS \"phone\"", column(&Postgres, col));
    }

    #[test]
    fn test_raw_column() {
        let col = Column::new(Name::new("COUNT(*)"), Dest::discard(), true);
        assert_eq!("COUNT(*)", column(&Postgres, col));
    }
}
