use std::{borrow::Cow, fmt, sync::Arc};

use smol_str::SmolStr;

use crate::{
    error::{Error, Result},
    writer::{FormatContext, FormatWriter},
};

#[derive(Debug, Default, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ident(SmolStr);

impl Ident {
    #[inline]
    pub fn new<T>(value: T) -> Self
    where
        T: Into<SmolStr>,
    {
        Self(value.into())
    }

    #[inline]
    pub fn new_static(value: &'static str) -> Self {
        Self(SmolStr::new_static(value))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FormatWriter for Ident {
    fn format_writer<W: std::fmt::Write>(
        &self,
        context: &mut FormatContext<'_, W>,
    ) -> std::fmt::Result {
        context.write_ident(self.as_str())
    }
}

pub trait IntoIdent {
    fn into_ident(self) -> Ident;
}

impl IntoIdent for Ident {
    fn into_ident(self) -> Ident {
        self
    }
}

impl IntoIdent for &str {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl IntoIdent for &String {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl IntoIdent for String {
    #[inline(always)]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl IntoIdent for Box<str> {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl IntoIdent for Arc<str> {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl IntoIdent for Cow<'_, str> {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl IntoIdent for SmolStr {
    #[inline(always)]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

/// A table or column name with an optional alias.
///
/// The alias is only ever set by an aliasing call on the builder; a new
/// `Name` replaces the old one when that happens.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Name {
    pub(crate) ident: Ident,
    pub(crate) alias: Option<Ident>,
}

impl Name {
    pub fn new<T: IntoIdent>(ident: T) -> Self {
        Self {
            ident: ident.into_ident(),
            alias: None,
        }
    }

    pub fn with_alias<T: IntoIdent>(&self, alias: T) -> Self {
        Self {
            ident: self.ident.clone(),
            alias: Some(alias.into_ident()),
        }
    }

    /// Splits a `table.column` reference; anything other than exactly one dot
    /// is a malformed reference.
    pub fn split_dotted(value: &str) -> Result<Self> {
        match value.split_once('.') {
            Some((table, column)) if !column.contains('.') => Ok(Self {
                ident: Ident::new(table),
                alias: Some(Ident::new(column)),
            }),
            _ => Err(Error::MalformedDotted(value.to_owned())),
        }
    }

    pub fn ident(&self) -> &Ident {
        &self.ident
    }

    pub fn alias(&self) -> Option<&Ident> {
        self.alias.as_ref()
    }

    /// `quote(name)`, followed by ` AS quote(alias)` when aliased.
    pub(crate) fn write_quoted_as<W: std::fmt::Write>(
        &self,
        context: &mut FormatContext<'_, W>,
    ) -> std::fmt::Result {
        self.write_quoted(context, " AS ")
    }

    /// `quote(table).quote(column)` for a name built by [`Name::split_dotted`].
    pub(crate) fn write_quoted_dot<W: std::fmt::Write>(
        &self,
        context: &mut FormatContext<'_, W>,
    ) -> std::fmt::Result {
        self.write_quoted(context, ".")
    }

    fn write_quoted<W: std::fmt::Write>(
        &self,
        context: &mut FormatContext<'_, W>,
        sep: &str,
    ) -> std::fmt::Result {
        self.ident.format_writer(context)?;
        if let Some(ref alias) = self.alias {
            context.writer.write_str(sep)?;
            alias.format_writer(context)?;
        }
        Ok(())
    }
}

/// The raw form: no quoting at all.
impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ident.as_str())?;
        if let Some(ref alias) = self.alias {
            write!(f, " AS {alias}")?;
        }
        Ok(())
    }
}

/// What the previous call on a builder produced, for a following `alias`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pending {
    #[default]
    None,
    Table,
    JoinTable,
    Column(usize),
}
