//! A chainable SQL statement builder.
//!
//! Statements are assembled through by-value builders and rendered into a
//! [`Query`]: the SQL text, the values for its placeholders and the scan
//! destinations of its result columns. Nothing here talks to a database.
//!
//! ```
//! use sqlchain::Dbms;
//!
//! let query = Dbms::POSTGRES
//!     .update()
//!     .table("customers")
//!     .set("name", "John")
//!     .where_eq("id", 9)
//!     .build();
//! assert_eq!("UPDATE customers SET name = $1 WHERE (id = $2)", query.sql);
//! ```

mod bind;
mod builder;
mod col;
mod cond;
mod dbms;
mod delete;
mod dest;
mod dialect;
mod error;
mod ident;
mod insert;
mod join;
mod order;
mod paginate;
mod query;
mod raw;
mod set;
mod update;
mod writer;

pub use bind::{Array, Bind, Binds, Blob, IntoArgs, IntoBind, IntoBinds};
pub use builder::SelectBuilder;
pub use col::IntoColumns;
pub use dbms::{Dbms, default_dbms, delete, insert, select, set_default_dbms, update};
pub use delete::DeleteBuilder;
pub use dest::Dest;
pub use dialect::{Dialect, MySql, Plain, Postgres, Sqlite, quote_with};
pub use error::{Error, Result};
pub use ident::{Ident, IntoIdent, Name};
pub use insert::InsertBuilder;
pub use query::Query;
pub use update::UpdateBuilder;
