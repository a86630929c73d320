use std::sync::{PoisonError, RwLock};

use crate::{
    builder::SelectBuilder,
    delete::DeleteBuilder,
    dialect::{Dialect, MySql, Plain, Postgres, Sqlite},
    insert::InsertBuilder,
    update::UpdateBuilder,
};

/// A database flavour: the dialect every statement it creates is built with.
#[derive(Debug, Clone, Copy)]
pub struct Dbms {
    dialect: &'static dyn Dialect,
}

impl Dbms {
    /// `?` placeholders and unquoted identifiers, fine for MySQL and SQLite
    /// with simple identifiers.
    pub const PLAIN: Dbms = Dbms::new(&Plain);
    /// MySQL with identifiers in back-ticks.
    pub const MYSQL: Dbms = Dbms::new(&MySql);
    pub const SQLITE: Dbms = Dbms::new(&Sqlite);
    pub const POSTGRES: Dbms = Dbms::new(&Postgres);

    pub const fn new(dialect: &'static dyn Dialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> &'static dyn Dialect {
        self.dialect
    }

    pub fn select(&self) -> SelectBuilder {
        SelectBuilder::new(self.dialect)
    }

    pub fn insert(&self) -> InsertBuilder {
        InsertBuilder::new(self.dialect)
    }

    pub fn update(&self) -> UpdateBuilder {
        UpdateBuilder::new(self.dialect)
    }

    pub fn delete(&self) -> DeleteBuilder {
        DeleteBuilder::new(self.dialect)
    }
}

impl Default for Dbms {
    fn default() -> Self {
        Self::PLAIN
    }
}

static DEFAULT_DBMS: RwLock<Dbms> = RwLock::new(Dbms::PLAIN);

/// Sets the DBMS behind [`select`], [`insert`], [`update`] and [`delete`].
///
/// Meant to be called once at startup, before any statement is built.
pub fn set_default_dbms(dbms: Dbms) {
    tracing::debug!(dialect = ?dbms.dialect, "default dbms set");
    *DEFAULT_DBMS.write().unwrap_or_else(PoisonError::into_inner) = dbms;
}

pub fn default_dbms() -> Dbms {
    *DEFAULT_DBMS.read().unwrap_or_else(PoisonError::into_inner)
}

/// A SELECT statement using the default DBMS.
pub fn select() -> SelectBuilder {
    default_dbms().select()
}

/// An INSERT statement using the default DBMS.
pub fn insert() -> InsertBuilder {
    default_dbms().insert()
}

/// An UPDATE statement using the default DBMS.
pub fn update() -> UpdateBuilder {
    default_dbms().update()
}

/// A DELETE statement using the default DBMS.
pub fn delete() -> DeleteBuilder {
    default_dbms().delete()
}
