//! Plain-text rendering of analyses and comparisons.

use std::io::{self, Write};

use rvtools_core::formatting::{format_count, format_number, gib_to_tib, percentage};
use rvtools_data::{AnalysisResult, ComparisonResult};

const BANNER_WIDTH: usize = 60;
const RULE_WIDTH: usize = 30;

/// Render the sizing report for one source.
pub fn render_analysis<W: Write>(w: &mut W, analysis: &AnalysisResult) -> io::Result<()> {
    writeln!(w, "{}", "=".repeat(BANNER_WIDTH))?;
    writeln!(w, "RVTools Analysis Report: {}", analysis.source_label)?;
    writeln!(w, "{}", "=".repeat(BANNER_WIDTH))?;

    if let Some(vms) = &analysis.vm_summary {
        section(w, "VIRTUAL MACHINES")?;
        writeln!(w, "Total VMs: {}", format_count(vms.total as u64))?;
        writeln!(
            w,
            "Powered On: {} ({}%)",
            format_count(vms.powered_on as u64),
            format_number(percentage(vms.powered_on as f64, vms.total as f64, 1), 1)
        )?;
        writeln!(w, "Powered Off: {}", format_count(vms.powered_off as u64))?;
        writeln!(w, "Total vCPUs: {}", format_count(vms.total_vcpus))?;
        writeln!(w, "Total Memory: {} GB", format_number(vms.total_memory, 1))?;
        writeln!(w, "Avg vCPUs/VM: {}", format_number(vms.avg_cpus, 1))?;
        writeln!(w, "Avg Memory/VM: {} GB", format_number(vms.avg_memory, 1))?;
        writeln!(
            w,
            "Storage Efficiency: {}%",
            format_number(vms.storage_efficiency, 1)
        )?;
    }

    if let Some(hosts) = &analysis.host_summary {
        section(w, "HOSTS")?;
        writeln!(w, "Total Hosts: {}", format_count(hosts.total as u64))?;
        writeln!(w, "Connected: {}", format_count(hosts.connected as u64))?;
        writeln!(w, "Total CPU Cores: {}", format_count(hosts.total_cores))?;
        writeln!(w, "Total Memory: {} GB", format_number(hosts.total_memory, 1))?;
        writeln!(w, "Avg VMs/Host: {}", format_number(hosts.avg_vms_per_host, 1))?;
    }

    if let Some(storage) = &analysis.storage_summary {
        section(w, "STORAGE")?;
        writeln!(w, "Total Datastores: {}", format_count(storage.total as u64))?;
        writeln!(
            w,
            "Total Capacity: {} TB",
            format_number(gib_to_tib(storage.total_capacity), 1)
        )?;
        writeln!(
            w,
            "Total Used: {} TB",
            format_number(gib_to_tib(storage.total_used), 1)
        )?;
        writeln!(
            w,
            "Utilization: {}%",
            format_number(storage.utilization_percent, 1)
        )?;
    }

    Ok(())
}

/// Render one row per source: VM count, host count and storage capacity.
///
/// Categories missing from a source show as zero.
pub fn render_comparison<W: Write>(w: &mut W, comparison: &ComparisonResult) -> io::Result<()> {
    let label_width = comparison
        .analyses
        .iter()
        .map(|a| a.source_label.chars().count())
        .max()
        .unwrap_or(0)
        .max("Source".len());

    writeln!(w, "Comparison of {} sources", comparison.analyses.len())?;
    writeln!(
        w,
        "{:<label_width$}  {:>10}  {:>8}  {:>12}",
        "Source", "VMs", "Hosts", "Storage (TB)"
    )?;
    writeln!(w, "{}", "-".repeat(label_width + 38))?;

    for analysis in &comparison.analyses {
        let vms = analysis.vm_summary.as_ref().map_or(0, |s| s.total);
        let hosts = analysis.host_summary.as_ref().map_or(0, |s| s.total);
        let capacity = analysis
            .storage_summary
            .as_ref()
            .map_or(0.0, |s| gib_to_tib(s.total_capacity));
        writeln!(
            w,
            "{:<label_width$}  {:>10}  {:>8}  {:>12}",
            analysis.source_label,
            format_count(vms as u64),
            format_count(hosts as u64),
            format_number(capacity, 1)
        )?;
    }

    Ok(())
}

fn section<W: Write>(w: &mut W, title: &str) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "{title}")?;
    writeln!(w, "{}", "-".repeat(RULE_WIDTH))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
