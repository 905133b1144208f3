//! Comparinator - pairwise card comparison for deck building
//!
//! Ranks a list of candidate cards against the cards currently kept, one
//! head-to-head decision at a time, and exports which cards were kept and cut.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod export;
pub mod input;
pub mod prompt;
pub mod session;

pub use catalog::{materialize, materialize_lists, CardCatalog, CatalogError};
pub use engine::{Decision, Engine, EngineError, InputLists, Outcome};
pub use error::{Error, Result};
pub use export::{cut_kept_rows, detailed_rows, CutKeptRow, DetailedRow};
pub use session::Session;
