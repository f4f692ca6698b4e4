use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Bytes per megabyte as used for the input-size ceiling.
const BYTES_PER_MB: u64 = 1024 * 1024;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Sizing statistics for RVTools virtualization inventory exports
#[derive(Parser, Debug, Clone)]
#[command(
    name = "rvtools-analyzer",
    about = "Sizing statistics for RVTools virtualization inventory exports",
    version
)]
pub struct Settings {
    /// Sheet documents (JSON) or directories containing them
    #[arg(required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Compare the sources side by side (implied by more than one source)
    #[arg(long, env = "RVTOOLS_COMPARE")]
    pub compare: bool,

    /// Directory that receives the JSON reports
    #[arg(long, env = "RVTOOLS_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Do not write report files
    #[arg(long)]
    pub no_report: bool,

    /// Output format on stdout
    #[arg(long, env = "RVTOOLS_FORMAT", default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Per-file input size ceiling in megabytes (1-4096)
    #[arg(long, env = "RVTOOLS_MAX_INPUT_MB", default_value = "50", value_parser = clap::value_parser!(u64).range(1..=4096))]
    pub max_input_mb: u64,

    /// Logging level (DEBUG, INFO, WARNING, ERROR) or a tracing filter directive
    #[arg(long, env = "RVTOOLS_LOG_LEVEL", default_value = "INFO")]
    pub log_level: String,

    /// Log file path (logs go to stderr when unset)
    #[arg(long, env = "RVTOOLS_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments, exiting with usage on error.
    pub fn load() -> Self {
        Self::resolve(Self::parse())
    }

    /// Parse an explicit argument list.
    pub fn try_load_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args).map(Self::resolve)
    }

    /// Upload-size ceiling in bytes.
    pub fn max_input_bytes(&self) -> u64 {
        self.max_input_mb * BYTES_PER_MB
    }

    /// Whether results go to stdout as JSON.
    pub fn wants_json(&self) -> bool {
        self.format == "json"
    }

    /// Whether `source_count` sources should be compared rather than analyzed.
    pub fn is_comparison(&self, source_count: usize) -> bool {
        self.compare || source_count > 1
    }

    /// Apply `--debug`.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
