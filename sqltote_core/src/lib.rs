//! Core of the sqltote generator.
//!
//! Walks a directory of SQL query files, derives an identifier for each file
//! from its path, groups the identifiers by directory and renders the result
//! as a Rust module of string constants.
//!
//! ```text
//! sqltote/user/all.sql            -> queries::User.All
//! sqltote/user/role/many_by_user  -> queries::UserRole.ManyByUser
//! ```

mod collect;
mod config;
mod error;
mod generate;
pub mod ident;
mod render;
mod store;
mod table;
mod write;

pub use crate::collect::*;
pub use crate::config::*;
pub use crate::error::{Error, Result};
pub use crate::generate::*;
pub use crate::ident::{Deriver, derive};
pub use crate::render::*;
pub use crate::store::*;
pub use crate::table::*;
pub use crate::write::*;
