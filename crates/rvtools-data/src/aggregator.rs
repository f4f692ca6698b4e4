//! Inventory aggregation: canonical entity lists → category summaries.
//!
//! Every statistic is computed over the full entity list. The VM preview is a
//! display convenience only and never feeds back into the figures.
//!
//! Aggregation never fails: integer totals saturate at `u64::MAX` and float
//! totals at `f64::MAX`.

use serde::{Deserialize, Serialize};

use rvtools_core::models::{Datastore, Host, HostStatus, PowerState, VirtualMachine};

/// Maximum number of VMs carried in [`VmSummary::vms`].
pub const VM_PREVIEW_LIMIT: usize = 100;

// ── Summaries ─────────────────────────────────────────────────────────────────

/// Statistics over the `vInfo` sheet. Sizes in GiB, efficiency in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VmSummary {
    pub total: usize,
    pub powered_on: usize,
    pub powered_off: usize,
    #[serde(rename = "totalvCPUs")]
    pub total_vcpus: u64,
    pub total_memory: f64,
    pub total_provisioned: f64,
    pub total_used: f64,
    pub avg_cpus: f64,
    pub avg_memory: f64,
    /// Used / provisioned × 100.
    pub storage_efficiency: f64,
    /// First [`VM_PREVIEW_LIMIT`] VMs in input order.
    pub vms: Vec<VirtualMachine>,
}

/// Statistics over the `vHost` sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostSummary {
    pub total: usize,
    pub connected: usize,
    pub total_cores: u64,
    pub total_memory: f64,
    #[serde(rename = "totalVMs")]
    pub total_vms: u64,
    #[serde(rename = "avgVMsPerHost")]
    pub avg_vms_per_host: f64,
    pub hosts: Vec<Host>,
}

/// Statistics over the `vDatastore` sheet. Sizes in GiB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageSummary {
    pub total: usize,
    pub total_capacity: f64,
    pub total_used: f64,
    pub total_free: f64,
    /// Used / capacity × 100.
    pub utilization_percent: f64,
    pub datastores: Vec<Datastore>,
}

// ── InventoryAggregator ───────────────────────────────────────────────────────

/// Stateless reducer from entity lists to summaries.
pub struct InventoryAggregator;

impl InventoryAggregator {
    pub fn summarize_vms(vms: &[VirtualMachine]) -> VmSummary {
        let total = vms.len();
        let total_vcpus = saturating_sum(vms.iter().map(|vm| vm.cpu_count));
        let total_memory = clamped_sum(vms.iter().map(|vm| vm.memory_gib));
        let total_provisioned = clamped_sum(vms.iter().map(|vm| vm.provisioned_gib));
        let total_used = clamped_sum(vms.iter().map(|vm| vm.used_gib));

        VmSummary {
            total,
            powered_on: count_where(vms, |vm| vm.power_state == PowerState::PoweredOn),
            powered_off: count_where(vms, |vm| vm.power_state == PowerState::PoweredOff),
            total_vcpus,
            total_memory,
            total_provisioned,
            total_used,
            avg_cpus: average(total_vcpus as f64, total),
            avg_memory: average(total_memory, total),
            storage_efficiency: ratio_percent(total_used, total_provisioned),
            vms: vms.iter().take(VM_PREVIEW_LIMIT).cloned().collect(),
        }
    }

    pub fn summarize_hosts(hosts: &[Host]) -> HostSummary {
        let total = hosts.len();
        let total_vms = saturating_sum(hosts.iter().map(|h| h.vm_count));

        HostSummary {
            total,
            connected: count_where(hosts, |h| h.status == HostStatus::Connected),
            total_cores: saturating_sum(hosts.iter().map(|h| h.cpu_core_count)),
            total_memory: clamped_sum(hosts.iter().map(|h| h.memory_gib)),
            total_vms,
            avg_vms_per_host: average(total_vms as f64, total),
            hosts: hosts.to_vec(),
        }
    }

    pub fn summarize_storage(datastores: &[Datastore]) -> StorageSummary {
        let total_capacity = clamped_sum(datastores.iter().map(|ds| ds.capacity_gib));
        let total_used = clamped_sum(datastores.iter().map(|ds| ds.used_gib));

        StorageSummary {
            total: datastores.len(),
            total_capacity,
            total_used,
            total_free: clamped_sum(datastores.iter().map(|ds| ds.free_gib)),
            utilization_percent: ratio_percent(total_used, total_capacity),
            datastores: datastores.to_vec(),
        }
    }
}

// ── Private helpers ───────────────────────────────────────────────────────────

fn count_where<T>(items: &[T], pred: impl Fn(&T) -> bool) -> usize {
    items.iter().filter(|item| pred(*item)).count()
}

fn saturating_sum(values: impl Iterator<Item = u64>) -> u64 {
    values.fold(0u64, |acc, v| acc.saturating_add(v))
}

/// Sum of non-negative finite values, capped at `f64::MAX`.
fn clamped_sum(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, |acc: f64, v| (acc + v).min(f64::MAX))
}

/// `sum / count`, or 0 for an empty list.
fn average(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// `part / whole × 100`, or 0 when `whole` is 0.
fn ratio_percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        (part / whole) * 100.0
    } else {
        0.0
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn vm(name: &str, cpus: u64, mem: f64, prov: f64, used: f64, state: PowerState) -> VirtualMachine {
        VirtualMachine {
            name: name.to_string(),
            host: "N/A".to_string(),
            cluster: "N/A".to_string(),
            cpu_count: cpus,
            memory_gib: mem,
            provisioned_gib: prov,
            used_gib: used,
            power_state: state,
        }
    }

    fn host(cores: u64, mem: f64, vms: u64, status: HostStatus) -> Host {
        Host {
            name: "esx".to_string(),
            cluster: "N/A".to_string(),
            cpu_core_count: cores,
            memory_gib: mem,
            vm_count: vms,
            status,
        }
    }

    fn datastore(capacity: f64, used: f64, free: f64) -> Datastore {
        Datastore {
            name: "ds".to_string(),
            kind: "VMFS".to_string(),
            capacity_gib: capacity,
            used_gib: used,
            free_gib: free,
            vm_count: 0,
        }
    }

    // ── summarize_vms ─────────────────────────────────────────────────────────

    #[test]
    fn test_vm_summary_scenario_a() {
        let vms = vec![vm("app01", 4, 8.0, 100.0, 50.0, PowerState::PoweredOn)];
        let s = InventoryAggregator::summarize_vms(&vms);

        assert_eq!(s.total, 1);
        assert_eq!(s.powered_on, 1);
        assert_eq!(s.powered_off, 0);
        assert_eq!(s.total_vcpus, 4);
        assert_eq!(s.total_memory, 8.0);
        assert_eq!(s.total_provisioned, 100.0);
        assert_eq!(s.total_used, 50.0);
        assert_eq!(s.storage_efficiency, 50.0);
        assert_eq!(s.avg_cpus, 4.0);
        assert_eq!(s.avg_memory, 8.0);
    }

    #[test]
    fn test_vm_summary_empty_list() {
        let s = InventoryAggregator::summarize_vms(&[]);
        assert_eq!(s.total, 0);
        assert_eq!(s.avg_cpus, 0.0);
        assert_eq!(s.avg_memory, 0.0);
        assert_eq!(s.storage_efficiency, 0.0);
        assert!(s.vms.is_empty());
    }

    #[test]
    fn test_vm_efficiency_zero_when_nothing_provisioned() {
        let vms = vec![vm("a", 1, 1.0, 0.0, 5.0, PowerState::PoweredOn)];
        let s = InventoryAggregator::summarize_vms(&vms);
        assert_eq!(s.storage_efficiency, 0.0);
    }

    #[test]
    fn test_vm_power_state_breakdown() {
        let vms = vec![
            vm("a", 1, 1.0, 1.0, 1.0, PowerState::PoweredOn),
            vm("b", 1, 1.0, 1.0, 1.0, PowerState::PoweredOff),
            vm("c", 1, 1.0, 1.0, 1.0, PowerState::PoweredOff),
            vm("d", 1, 1.0, 1.0, 1.0, PowerState::Unknown),
        ];
        let s = InventoryAggregator::summarize_vms(&vms);
        assert_eq!(s.total, 4);
        assert_eq!(s.powered_on, 1);
        assert_eq!(s.powered_off, 2);
    }

    #[test]
    fn test_vm_preview_cap_does_not_affect_statistics() {
        let vms: Vec<VirtualMachine> = (0..150)
            .map(|i| vm(&format!("vm{i}"), 2, 4.0, 10.0, 5.0, PowerState::PoweredOn))
            .collect();
        let s = InventoryAggregator::summarize_vms(&vms);

        assert_eq!(s.total, 150);
        assert_eq!(s.vms.len(), VM_PREVIEW_LIMIT);
        assert_eq!(s.vms[0].name, "vm0");
        assert_eq!(s.vms[99].name, "vm99");
        assert_eq!(s.powered_on, 150);
        assert_eq!(s.total_vcpus, 300);
        assert_eq!(s.total_memory, 600.0);
        assert_eq!(s.total_provisioned, 1500.0);
        assert_eq!(s.avg_cpus, 2.0);
        assert_eq!(s.avg_memory, 4.0);
    }

    #[test]
    fn test_vm_float_totals_clamp_instead_of_failing() {
        let vms = vec![
            vm("a", 1, f64::MAX, 1.0, 1.0, PowerState::PoweredOn),
            vm("b", 1, f64::MAX, 1.0, 1.0, PowerState::PoweredOn),
        ];
        let s = InventoryAggregator::summarize_vms(&vms);
        assert_eq!(s.total_memory, f64::MAX);
        assert!(s.avg_memory.is_finite());
        assert_eq!(s.total_vcpus, 2);
    }

    #[test]
    fn test_vm_vcpu_total_saturates() {
        let vms = vec![
            vm("a", u64::MAX, 1.0, 1.0, 1.0, PowerState::PoweredOn),
            vm("b", 1, 1.0, 1.0, 1.0, PowerState::PoweredOn),
        ];
        let s = InventoryAggregator::summarize_vms(&vms);
        assert_eq!(s.total_vcpus, u64::MAX);
        assert_eq!(s.total, 2);
    }

    #[test]
    fn test_host_totals_saturate() {
        let hosts = vec![
            host(u64::MAX, 1.0, u64::MAX, HostStatus::Connected),
            host(8, 1.0, 3, HostStatus::Connected),
        ];
        let s = InventoryAggregator::summarize_hosts(&hosts);
        assert_eq!(s.total_cores, u64::MAX);
        assert_eq!(s.total_vms, u64::MAX);
        assert_eq!(s.connected, 2);
    }

    // ── summarize_hosts ───────────────────────────────────────────────────────

    #[test]
    fn test_host_summary() {
        let hosts = vec![
            host(32, 512.0, 20, HostStatus::Connected),
            host(16, 256.0, 10, HostStatus::Other),
            host(16, 256.0, 0, HostStatus::Unknown),
        ];
        let s = InventoryAggregator::summarize_hosts(&hosts);
        assert_eq!(s.total, 3);
        assert_eq!(s.connected, 1);
        assert_eq!(s.total_cores, 64);
        assert_eq!(s.total_memory, 1024.0);
        assert_eq!(s.total_vms, 30);
        assert_eq!(s.avg_vms_per_host, 10.0);
        assert_eq!(s.hosts.len(), 3);
    }

    #[test]
    fn test_host_summary_empty_list() {
        let s = InventoryAggregator::summarize_hosts(&[]);
        assert_eq!(s.total, 0);
        assert_eq!(s.avg_vms_per_host, 0.0);
    }

    // ── summarize_storage ─────────────────────────────────────────────────────

    #[test]
    fn test_storage_summary() {
        let stores = vec![datastore(1000.0, 250.0, 750.0), datastore(1000.0, 750.0, 250.0)];
        let s = InventoryAggregator::summarize_storage(&stores);
        assert_eq!(s.total, 2);
        assert_eq!(s.total_capacity, 2000.0);
        assert_eq!(s.total_used, 1000.0);
        assert_eq!(s.total_free, 1000.0);
        assert_eq!(s.utilization_percent, 50.0);
    }

    #[test]
    fn test_storage_utilization_zero_without_capacity() {
        let stores = vec![datastore(0.0, 10.0, 0.0)];
        let s = InventoryAggregator::summarize_storage(&stores);
        assert_eq!(s.utilization_percent, 0.0);
    }

    // ── Serialization ─────────────────────────────────────────────────────────

    #[test]
    fn test_vm_summary_json_keys() {
        let s = InventoryAggregator::summarize_vms(&[]);
        let v = serde_json::to_value(&s).unwrap();
        for key in [
            "total",
            "poweredOn",
            "poweredOff",
            "totalvCPUs",
            "totalMemory",
            "totalProvisioned",
            "totalUsed",
            "avgCpus",
            "avgMemory",
            "storageEfficiency",
            "vms",
        ] {
            assert!(v.get(key).is_some(), "missing key {key}");
        }
    }

    #[test]
    fn test_host_summary_json_keys() {
        let s = InventoryAggregator::summarize_hosts(&[]);
        let v = serde_json::to_value(&s).unwrap();
        assert!(v.get("totalVMs").is_some());
        assert!(v.get("avgVMsPerHost").is_some());
        assert!(v.get("totalCores").is_some());
    }
}
