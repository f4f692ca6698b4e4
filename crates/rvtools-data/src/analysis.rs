//! Single-source analysis pipeline.
//!
//! Normalizes each present sheet, aggregates it, and stamps the result with
//! the source label and a generation time. Pure: no I/O, no shared state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rvtools_core::error::{AnalyzerError, Result};
use rvtools_core::models::{SheetKind, Sheets};

use crate::aggregator::{HostSummary, InventoryAggregator, StorageSummary, VmSummary};
use crate::normalizer::{normalize_datastores, normalize_hosts, normalize_vms};

// ── Public types ──────────────────────────────────────────────────────────────

/// Sizing statistics for one source.
///
/// A summary is `None` exactly when its sheet was absent from the source; a
/// present but empty sheet yields a zeroed summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Usually the export's file name.
    pub source_label: String,
    pub generated_at: DateTime<Utc>,
    pub vm_summary: Option<VmSummary>,
    pub host_summary: Option<HostSummary>,
    pub storage_summary: Option<StorageSummary>,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Analyze the sheets of one source.
///
/// Fails with [`AnalyzerError::EmptyInput`] when no recognised sheet is
/// present. Odd cell values never fail the analysis; they fall back to the
/// field defaults.
pub fn analyze(sheets: &Sheets, source_label: &str) -> Result<AnalysisResult> {
    analyze_at(sheets, source_label, Utc::now())
}

/// [`analyze`] with an explicit generation time.
pub fn analyze_at(
    sheets: &Sheets,
    source_label: &str,
    generated_at: DateTime<Utc>,
) -> Result<AnalysisResult> {
    if sheets.is_empty() {
        return Err(AnalyzerError::EmptyInput(format!(
            "no recognized sheets in {source_label}"
        )));
    }

    // Row-level anomalies degrade to defaults; only presence decides the shape.
    let vm_summary = sheets
        .get(SheetKind::VInfo)
        .map(|rows| InventoryAggregator::summarize_vms(&normalize_vms(rows)));

    let host_summary = sheets
        .get(SheetKind::VHost)
        .map(|rows| InventoryAggregator::summarize_hosts(&normalize_hosts(rows)));

    let storage_summary = sheets
        .get(SheetKind::VDatastore)
        .map(|rows| InventoryAggregator::summarize_storage(&normalize_datastores(rows)));

    Ok(AnalysisResult {
        source_label: source_label.to_string(),
        generated_at,
        vm_summary,
        host_summary,
        storage_summary,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
