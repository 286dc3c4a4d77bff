//! Query and quiz-selection engine.
//!
//! Every function here works on in-memory snapshots handed over by the
//! record store and returns derived values; nothing in this module touches
//! the database or keeps state between calls.

pub mod categories;
pub mod paginate;
pub mod quiz;
pub mod search;

pub use categories::{CategoryLabels, resolve_labels};
pub use paginate::{Page, Paginator};
pub use quiz::{QuizScope, QuizSelector};
pub use search::search_questions;
