//! JSON report persistence. Write-only: nothing here reads reports back.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use rvtools_core::error::Result;

use crate::analysis::AnalysisResult;
use crate::comparator::ComparisonResult;

/// Suffix of single-source report files.
pub const REPORT_SUFFIX: &str = "_analysis.json";

/// Prefix of comparison report files.
pub const COMPARISON_PREFIX: &str = "comparison_";

/// `<label stem>_analysis.json`, e.g. `lab.xlsx` → `lab_analysis.json`.
pub fn report_file_name(source_label: &str) -> String {
    let stem = Path::new(source_label)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());
    format!("{stem}{REPORT_SUFFIX}")
}

/// `comparison_<UTC timestamp>.json`.
pub fn comparison_file_name(generated_at: DateTime<Utc>) -> String {
    format!(
        "{COMPARISON_PREFIX}{}.json",
        generated_at.format("%Y%m%dT%H%M%SZ")
    )
}

/// Whether `path` looks like a report this module wrote.
pub fn is_report_file(path: &Path) -> bool {
    path.file_name()
        .map(|name| {
            let name = name.to_string_lossy();
            name.ends_with(REPORT_SUFFIX)
                || (name.starts_with(COMPARISON_PREFIX) && name.ends_with(".json"))
        })
        .unwrap_or(false)
}

/// Write `analysis` into `dir` and return the report path.
pub fn write_analysis_report(analysis: &AnalysisResult, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(report_file_name(&analysis.source_label));
    write_json_atomic(analysis, &path)?;
    Ok(path)
}

/// Write `comparison` into `dir` and return the report path.
pub fn write_comparison_report(comparison: &ComparisonResult, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(comparison_file_name(comparison.generated_at));
    write_json_atomic(comparison, &path)?;
    Ok(path)
}

/// Pretty-print `value` to a temp sibling, then rename over `path`.
fn write_json_atomic<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
