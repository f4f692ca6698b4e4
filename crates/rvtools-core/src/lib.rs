//! Shared vocabulary for the RVTools sizing analyzer.
//!
//! Holds the raw tabular input model, the canonical inventory entities, the
//! field resolver that bridges the two, the error type, console number
//! formatting and the command-line settings.

pub mod error;
pub mod field_resolver;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{AnalyzerError, Result};
