mod bootstrap;
mod console;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use rvtools_core::settings::Settings;
use rvtools_data::reader::{collect_inputs, load_sheets};
use rvtools_data::report::{write_analysis_report, write_comparison_report};
use rvtools_data::{analyze, compare, SourceInput};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("RVTools Analyzer v{} starting", env!("CARGO_PKG_VERSION"));

    if !settings.no_report {
        bootstrap::ensure_output_dir(&settings.output_dir)?;
    }

    let paths = collect_inputs(&settings.inputs);
    if paths.is_empty() {
        anyhow::bail!("no sheet documents found in the given inputs");
    }
    tracing::info!("Loading {} source(s)", paths.len());

    let sources = load_sources(paths, settings.max_input_bytes()).await?;
    let mut out = std::io::stdout();

    if settings.is_comparison(sources.len()) {
        let comparison = compare(&sources)?;
        tracing::info!("Compared {} sources", comparison.analyses.len());

        if settings.wants_json() {
            serde_json::to_writer_pretty(&mut out, &comparison)?;
            writeln!(out)?;
        } else {
            console::render_comparison(&mut out, &comparison)?;
        }

        if !settings.no_report {
            let path = write_comparison_report(&comparison, &settings.output_dir)?;
            tracing::info!("Report saved: {}", path.display());
        }
    } else {
        let source = sources
            .first()
            .context("no source loaded for analysis")?;
        let analysis = analyze(&source.sheets, &source.label)?;
        tracing::info!("Analyzed {}", analysis.source_label);

        if settings.wants_json() {
            serde_json::to_writer_pretty(&mut out, &analysis)?;
            writeln!(out)?;
        } else {
            console::render_analysis(&mut out, &analysis)?;
        }

        if !settings.no_report {
            let path = write_analysis_report(&analysis, &settings.output_dir)?;
            tracing::info!("Report saved: {}", path.display());
        }
    }

    Ok(())
}

/// Read every source on the blocking pool; results keep argument order.
async fn load_sources(paths: Vec<PathBuf>, max_bytes: u64) -> Result<Vec<SourceInput>> {
    let handles: Vec<_> = paths
        .into_iter()
        .map(|path| {
            tokio::task::spawn_blocking(move || {
                load_sheets(&path, max_bytes)
                    .with_context(|| format!("loading {}", path.display()))
            })
        })
        .collect();

    let mut sources = Vec::with_capacity(handles.len());
    for handle in handles {
        sources.push(handle.await??);
    }
    Ok(sources)
}
