use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

// ── Raw tabular input ─────────────────────────────────────────────────────────

/// One untyped spreadsheet cell as handed over by the workbook parser.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Textual cell content, kept verbatim.
    Text(String),
    /// Numeric cell content.
    Number(f64),
    /// Blank cell, or a value the parser could not express as a scalar.
    #[default]
    Empty,
}

impl CellValue {
    /// `true` when the cell carries nothing usable (blank, or whitespace text).
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }
}

impl From<&Value> for CellValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) => CellValue::Text(s.clone()),
            Value::Number(n) => n.as_f64().map(CellValue::Number).unwrap_or_default(),
            Value::Bool(b) => CellValue::Text(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => CellValue::Empty,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// One spreadsheet row: column name → cell.
pub type RawRecord = BTreeMap<String, CellValue>;

/// Build a [`RawRecord`] from a JSON row object.
pub fn record_from_json(row: &serde_json::Map<String, Value>) -> RawRecord {
    row.iter()
        .map(|(column, cell)| (column.clone(), CellValue::from(cell)))
        .collect()
}

// ── Sheets ────────────────────────────────────────────────────────────────────

/// Workbook sheets the analyzer recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SheetKind {
    /// Virtual machine inventory.
    VInfo,
    /// ESXi host inventory.
    VHost,
    /// Datastore inventory.
    VDatastore,
    /// Cluster inventory (accepted, not aggregated).
    VCluster,
}

impl SheetKind {
    /// Every recognised sheet, in workbook order.
    pub const ALL: [SheetKind; 4] = [
        SheetKind::VInfo,
        SheetKind::VHost,
        SheetKind::VDatastore,
        SheetKind::VCluster,
    ];

    /// Exact sheet name as written by the export tool.
    pub fn name(self) -> &'static str {
        match self {
            SheetKind::VInfo => "vInfo",
            SheetKind::VHost => "vHost",
            SheetKind::VDatastore => "vDatastore",
            SheetKind::VCluster => "vCluster",
        }
    }

    /// Case-sensitive lookup by sheet name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for SheetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The sheets of one source, keyed by kind. Absent sheets are absent keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheets {
    sheets: BTreeMap<SheetKind, Vec<RawRecord>>,
}

impl Sheets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) the rows of one sheet.
    pub fn insert(&mut self, kind: SheetKind, rows: Vec<RawRecord>) {
        self.sheets.insert(kind, rows);
    }

    /// Builder-style [`Sheets::insert`].
    pub fn with(mut self, kind: SheetKind, rows: Vec<RawRecord>) -> Self {
        self.insert(kind, rows);
        self
    }

    /// Rows of `kind`, or `None` when the sheet was not in the source.
    pub fn get(&self, kind: SheetKind) -> Option<&[RawRecord]> {
        self.sheets.get(&kind).map(Vec::as_slice)
    }

    /// `true` when no recognised sheet is present.
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Present sheet kinds, in workbook order.
    pub fn kinds(&self) -> impl Iterator<Item = SheetKind> + '_ {
        self.sheets.keys().copied()
    }
}

// ── Canonical entities ────────────────────────────────────────────────────────

/// Normalised VM power state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerState {
    PoweredOn,
    PoweredOff,
    Unknown,
}

impl PowerState {
    /// Exact match against the vendor strings; anything else is `Unknown`.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "poweredOn" => PowerState::PoweredOn,
            "poweredOff" => PowerState::PoweredOff,
            _ => PowerState::Unknown,
        }
    }
}

/// Normalised host connection status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HostStatus {
    Connected,
    /// A status was reported but it is not a connected one.
    Other,
    /// No status column was present.
    Unknown,
}

impl HostStatus {
    /// `None` means the row had no status at all.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            None => HostStatus::Unknown,
            Some("Connected") | Some("connected") => HostStatus::Connected,
            Some(_) => HostStatus::Other,
        }
    }
}

/// A virtual machine row in canonical units (GiB).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachine {
    pub name: String,
    pub host: String,
    pub cluster: String,
    pub cpu_count: u64,
    pub memory_gib: f64,
    pub provisioned_gib: f64,
    pub used_gib: f64,
    pub power_state: PowerState,
}

/// An ESXi host row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Host {
    pub name: String,
    pub cluster: String,
    pub cpu_core_count: u64,
    pub memory_gib: f64,
    pub vm_count: u64,
    pub status: HostStatus,
}

/// A datastore row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Datastore {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub capacity_gib: f64,
    pub used_gib: f64,
    pub free_gib: f64,
    pub vm_count: u64,
}
