//! Best-effort resolution of canonical fields from loosely named columns.
//!
//! Column names drift between export tool versions, so every canonical field
//! is described by a [`FieldRule`]: an ordered list of candidate column names
//! plus a coercion. Resolution is total. Missing columns, blank cells and
//! unparsable text all degrade to the rule's default instead of failing.

use crate::models::{CellValue, RawRecord};

/// Divisor for one binary unit step (MiB → GiB, GiB → TiB).
pub const BINARY_UNIT: f64 = 1024.0;

/// Target type of a resolved field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    Integer,
    Float,
    Text,
}

/// Unit of the source column for numeric fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Already in the canonical unit.
    Native,
    /// MiB/MB column, divided by 1024 to reach GiB.
    Mebibytes,
}

/// A typed, resolved field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(u64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_u64(&self) -> u64 {
        match self {
            FieldValue::Integer(n) => *n,
            FieldValue::Float(f) => *f as u64,
            FieldValue::Text(_) => 0,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            FieldValue::Integer(n) => *n as f64,
            FieldValue::Float(f) => *f,
            FieldValue::Text(_) => 0.0,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Integer(n) => n.to_string(),
            FieldValue::Float(f) => f.to_string(),
        }
    }
}

// ── FieldRule ─────────────────────────────────────────────────────────────────

/// One row of a normalizer's field table.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    /// Canonical field name, for diagnostics.
    pub field: &'static str,
    /// Source column names, most preferred first.
    pub candidates: &'static [&'static str],
    pub coercion: Coercion,
    pub unit: Unit,
    /// Returned for text fields when no candidate resolves.
    pub default_text: &'static str,
}

impl FieldRule {
    pub const fn integer(field: &'static str, candidates: &'static [&'static str]) -> Self {
        Self {
            field,
            candidates,
            coercion: Coercion::Integer,
            unit: Unit::Native,
            default_text: "",
        }
    }

    pub const fn float(field: &'static str, candidates: &'static [&'static str]) -> Self {
        Self {
            field,
            candidates,
            coercion: Coercion::Float,
            unit: Unit::Native,
            default_text: "",
        }
    }

    /// A float field whose source columns are in MiB.
    pub const fn mebibytes(field: &'static str, candidates: &'static [&'static str]) -> Self {
        Self {
            field,
            candidates,
            coercion: Coercion::Float,
            unit: Unit::Mebibytes,
            default_text: "",
        }
    }

    pub const fn text(
        field: &'static str,
        candidates: &'static [&'static str],
        default_text: &'static str,
    ) -> Self {
        Self {
            field,
            candidates,
            coercion: Coercion::Text,
            unit: Unit::Native,
            default_text,
        }
    }

    /// The cell of the first candidate column that is present and non-blank.
    ///
    /// A present cell wins even when it later fails to coerce; lower-priority
    /// columns are not consulted in that case.
    pub fn lookup<'a>(&self, record: &'a RawRecord) -> Option<&'a CellValue> {
        self.candidates
            .iter()
            .filter_map(|&name| record.get(name))
            .find(|cell| !cell.is_blank())
    }

    /// Resolve this field from `record`. Never fails.
    pub fn resolve(&self, record: &RawRecord) -> FieldValue {
        let cell = self.lookup(record);
        match self.coercion {
            Coercion::Integer => FieldValue::Integer(cell.and_then(coerce_u64).unwrap_or(0)),
            Coercion::Float => {
                let raw = cell.and_then(coerce_f64).unwrap_or(0.0);
                FieldValue::Float(match self.unit {
                    Unit::Native => raw,
                    Unit::Mebibytes => raw / BINARY_UNIT,
                })
            }
            Coercion::Text => FieldValue::Text(
                cell.and_then(coerce_text)
                    .unwrap_or_else(|| self.default_text.to_string()),
            ),
        }
    }

    /// Resolve as text, or `None` when no candidate is present.
    pub fn resolve_present_text(&self, record: &RawRecord) -> Option<String> {
        self.lookup(record).and_then(coerce_text)
    }
}

// ── Coercions ─────────────────────────────────────────────────────────────────

/// Parse a non-negative, finite float. Text is trimmed first.
pub fn coerce_f64(cell: &CellValue) -> Option<f64> {
    let value = match cell {
        CellValue::Number(n) => *n,
        CellValue::Text(s) => s.trim().parse::<f64>().ok()?,
        CellValue::Empty => return None,
    };
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Parse a non-negative integer, truncating fractional input toward zero.
///
/// Values that do not fit in a `u64` are unparsable rather than clamped.
pub fn coerce_u64(cell: &CellValue) -> Option<u64> {
    if let CellValue::Text(s) = cell {
        if let Ok(n) = s.trim().parse::<u64>() {
            return Some(n);
        }
    }
    coerce_f64(cell)
        .map(f64::trunc)
        .filter(|&f| f < U64_LIMIT)
        .map(|f| f as u64)
}

/// 2^64, the first integral `f64` above `u64::MAX`.
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// Render a cell as text. Integral numbers render without a fraction.
pub fn coerce_text(cell: &CellValue) -> Option<String> {
    match cell {
        CellValue::Text(s) if !s.trim().is_empty() => Some(s.clone()),
        CellValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
