//! Analysis engine for RVTools inventory exports.
//!
//! Normalizes raw sheet rows into canonical entities, aggregates them into
//! per-category sizing summaries, and composes single-source analyses and
//! multi-source comparisons. Also hosts the file-side collaborators: the
//! sheet-document reader and the JSON report writer.

pub mod aggregator;
pub mod analysis;
pub mod comparator;
pub mod normalizer;
pub mod reader;
pub mod report;

pub use analysis::{analyze, AnalysisResult};
pub use comparator::{compare, ComparisonResult, SourceInput};
pub use rvtools_core as core;
