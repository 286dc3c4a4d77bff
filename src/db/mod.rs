//! Database module: the record store for questions and categories.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: query layer over the sqlx pool
//! - `actor.rs`: ractor actor owning the storage, plus its cloneable handle

pub mod actor;
pub mod models;
pub mod schema;
pub mod sqlite;

pub use actor::{DbActorHandle, spawn};
pub use models::{Category, NewQuestion, Question};
pub use sqlite::TriviaStorage;
