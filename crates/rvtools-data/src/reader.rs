//! Sheet-document discovery and loading.
//!
//! A sheet document is the JSON form of a parsed workbook: an object mapping
//! sheet names to arrays of row objects, either bare or wrapped in a
//! `{ "fileName": ..., "fileData": { ... } }` upload envelope. Size limits are
//! enforced here, before anything reaches the analysis engine.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use rvtools_core::error::{AnalyzerError, Result};
use rvtools_core::models::{record_from_json, RawRecord, SheetKind, Sheets};

use crate::comparator::SourceInput;
use crate::report::is_report_file;

/// Sheet name used in errors about the document as a whole.
const DOCUMENT: &str = "<document>";

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all `.json` sheet documents recursively under `dir`, sorted by path.
///
/// Reports written by this tool are skipped so that an output directory can
/// double as an input directory.
pub fn find_source_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        warn!("Input path does not exist: {}", dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "json")
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .filter(|path| !is_report_file(path))
        .collect();

    files.sort();
    files
}

/// Expand directories into their sheet documents; plain files are kept as
/// given. Argument order is preserved.
pub fn collect_inputs(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut inputs = Vec::new();
    for path in paths {
        if path.is_dir() {
            let found = find_source_files(path);
            if found.is_empty() {
                warn!("No sheet documents found in {}", path.display());
            }
            inputs.extend(found);
        } else {
            inputs.push(path.clone());
        }
    }
    inputs
}

/// Load one sheet document from disk.
///
/// Files larger than `max_bytes` are refused without being read.
pub fn load_sheets(path: &Path, max_bytes: u64) -> Result<SourceInput> {
    let file_read = |source| AnalyzerError::FileRead {
        path: path.to_path_buf(),
        source,
    };

    let size = std::fs::metadata(path).map_err(file_read)?.len();
    if size > max_bytes {
        return Err(AnalyzerError::InputTooLarge {
            path: path.to_path_buf(),
            size,
            limit: max_bytes,
        });
    }

    let content = std::fs::read_to_string(path).map_err(file_read)?;
    let document: Value = serde_json::from_str(&content)?;

    let file_label = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Unknown".to_string());

    let input = parse_document(&document, &file_label)?;
    for kind in input.sheets.kinds() {
        let rows = input.sheets.get(kind).map_or(0, <[RawRecord]>::len);
        debug!(source = %input.label, sheet = %kind, rows, "Loaded sheet");
    }

    Ok(input)
}

/// Interpret a parsed document, unwrapping the upload envelope when present.
///
/// The envelope's `fileName` becomes the label; otherwise `fallback_label`.
pub fn parse_document(document: &Value, fallback_label: &str) -> Result<SourceInput> {
    if let Some(data) = document.get("fileData") {
        let label = document
            .get("fileName")
            .and_then(Value::as_str)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(fallback_label)
            .to_string();
        let sheets = parse_sheets(data, &label)?;
        return Ok(SourceInput::new(label, sheets));
    }

    let sheets = parse_sheets(document, fallback_label)?;
    Ok(SourceInput::new(fallback_label, sheets))
}

/// Convert a `{ sheetName: [row, ...] }` object into [`Sheets`].
///
/// Unrecognised sheets are skipped. A recognised sheet must be an array of
/// row objects.
pub fn parse_sheets(value: &Value, source_label: &str) -> Result<Sheets> {
    let Some(object) = value.as_object() else {
        return Err(AnalyzerError::malformed(
            source_label,
            DOCUMENT,
            "expected an object mapping sheet names to rows",
        ));
    };

    let mut sheets = Sheets::new();
    for (name, rows) in object {
        let Some(kind) = SheetKind::from_name(name) else {
            debug!(source = source_label, sheet = %name, "Skipping unrecognized sheet");
            continue;
        };
        sheets.insert(kind, parse_rows(rows, source_label, kind)?);
    }
    Ok(sheets)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn parse_rows(rows: &Value, source_label: &str, kind: SheetKind) -> Result<Vec<RawRecord>> {
    let Some(rows) = rows.as_array() else {
        return Err(AnalyzerError::malformed(
            source_label,
            kind.name(),
            "expected an array of rows",
        ));
    };

    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            row.as_object().map(record_from_json).ok_or_else(|| {
                AnalyzerError::malformed(
                    source_label,
                    kind.name(),
                    format!("row {} is not an object", index + 1),
                )
            })
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
