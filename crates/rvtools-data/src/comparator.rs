//! Side-by-side analysis of several sources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rvtools_core::error::{AnalyzerError, Result};
use rvtools_core::models::Sheets;

use crate::analysis::{analyze, AnalysisResult};

/// One source handed to [`compare`].
#[derive(Debug, Clone, PartialEq)]
pub struct SourceInput {
    pub label: String,
    pub sheets: Sheets,
}

impl SourceInput {
    pub fn new(label: impl Into<String>, sheets: Sheets) -> Self {
        Self {
            label: label.into(),
            sheets,
        }
    }
}

/// Analyses of several sources, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    /// Source labels, parallel to `analyses`.
    pub sources: Vec<String>,
    pub generated_at: DateTime<Utc>,
    pub analyses: Vec<AnalysisResult>,
}

/// Analyze every source independently and bundle the results.
///
/// Needs at least one source. The request is all-or-nothing: the first
/// failing source (in input order) is reported as
/// [`AnalyzerError::SourceFailure`].
pub fn compare(inputs: &[SourceInput]) -> Result<ComparisonResult> {
    if inputs.is_empty() {
        return Err(AnalyzerError::EmptyInput("no sources to compare".to_string()));
    }

    let analyses = inputs
        .iter()
        .enumerate()
        .map(|(index, input)| {
            analyze(&input.sheets, &input.label).map_err(|e| AnalyzerError::SourceFailure {
                index,
                label: input.label.clone(),
                source: Box::new(e),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ComparisonResult {
        sources: analyses.iter().map(|a| a.source_label.clone()).collect(),
        generated_at: Utc::now(),
        analyses,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
