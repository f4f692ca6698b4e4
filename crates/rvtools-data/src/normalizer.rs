//! Raw sheet rows → canonical inventory entities.
//!
//! Each entity has one static field table. Supporting another export tool
//! version means adding a column name to the matching candidate list.

use rvtools_core::field_resolver::FieldRule;
use rvtools_core::models::{
    Datastore, Host, HostStatus, PowerState, RawRecord, VirtualMachine,
};

const UNKNOWN: &str = "Unknown";
const NOT_AVAILABLE: &str = "N/A";

// ── Field tables ──────────────────────────────────────────────────────────────

/// Candidate columns for the `vInfo` sheet.
pub struct VmFields {
    pub name: FieldRule,
    pub host: FieldRule,
    pub cluster: FieldRule,
    pub cpu_count: FieldRule,
    pub memory: FieldRule,
    pub provisioned: FieldRule,
    pub used: FieldRule,
    pub power_state: FieldRule,
}

pub const VM_FIELDS: VmFields = VmFields {
    name: FieldRule::text("name", &["VM", "Name"], UNKNOWN),
    host: FieldRule::text("host", &["Host", "ESX Host"], NOT_AVAILABLE),
    cluster: FieldRule::text("cluster", &["Cluster"], NOT_AVAILABLE),
    cpu_count: FieldRule::integer("cpuCount", &["CPUs", "Num CPUs", "vCPU"]),
    memory: FieldRule::mebibytes("memoryGiB", &["Memory", "Memory MB"]),
    provisioned: FieldRule::mebibytes(
        "provisionedGiB",
        &["Provisioned MB", "Provisioned Space", "Provisioned"],
    ),
    used: FieldRule::mebibytes("usedGiB", &["In Use MB", "Used Space MB", "Used"]),
    power_state: FieldRule::text("powerState", &["Powerstate", "Power State"], UNKNOWN),
};

/// Candidate columns for the `vHost` sheet. Memory is reported in GB already.
pub struct HostFields {
    pub name: FieldRule,
    pub cluster: FieldRule,
    pub cpu_core_count: FieldRule,
    pub memory: FieldRule,
    pub vm_count: FieldRule,
    pub status: FieldRule,
}

pub const HOST_FIELDS: HostFields = HostFields {
    name: FieldRule::text("name", &["Host", "Hostname", "ESX Host"], UNKNOWN),
    cluster: FieldRule::text("cluster", &["Cluster"], NOT_AVAILABLE),
    cpu_core_count: FieldRule::integer("cpuCoreCount", &["# CPU", "CPU Cores", "Num CPU"]),
    memory: FieldRule::float("memoryGiB", &["Memory", "Memory GB"]),
    vm_count: FieldRule::integer("vmCount", &["# VMs", "VM Count", "VMs"]),
    status: FieldRule::text("status", &["Status", "Connection State"], UNKNOWN),
};

/// Candidate columns for the `vDatastore` sheet. Sizes are reported in GB.
pub struct DatastoreFields {
    pub name: FieldRule,
    pub kind: FieldRule,
    pub capacity: FieldRule,
    pub used: FieldRule,
    pub free: FieldRule,
    pub vm_count: FieldRule,
}

pub const DATASTORE_FIELDS: DatastoreFields = DatastoreFields {
    name: FieldRule::text("name", &["Datastore", "Name"], UNKNOWN),
    kind: FieldRule::text("type", &["Type"], UNKNOWN),
    capacity: FieldRule::float("capacityGiB", &["Capacity GB", "Capacity"]),
    used: FieldRule::float("usedGiB", &["In Use GB", "In Use", "Used GB"]),
    free: FieldRule::float("freeGiB", &["Free GB", "Free"]),
    vm_count: FieldRule::integer("vmCount", &["# VMs", "VM Count", "VMs"]),
};

// ── Normalizers ───────────────────────────────────────────────────────────────

pub fn normalize_vm(record: &RawRecord) -> VirtualMachine {
    let f = &VM_FIELDS;
    VirtualMachine {
        name: f.name.resolve(record).into_text(),
        host: f.host.resolve(record).into_text(),
        cluster: f.cluster.resolve(record).into_text(),
        cpu_count: f.cpu_count.resolve(record).as_u64(),
        memory_gib: f.memory.resolve(record).as_f64(),
        provisioned_gib: f.provisioned.resolve(record).as_f64(),
        used_gib: f.used.resolve(record).as_f64(),
        power_state: PowerState::from_raw(&f.power_state.resolve(record).into_text()),
    }
}

pub fn normalize_host(record: &RawRecord) -> Host {
    let f = &HOST_FIELDS;
    Host {
        name: f.name.resolve(record).into_text(),
        cluster: f.cluster.resolve(record).into_text(),
        cpu_core_count: f.cpu_core_count.resolve(record).as_u64(),
        memory_gib: f.memory.resolve(record).as_f64(),
        vm_count: f.vm_count.resolve(record).as_u64(),
        status: HostStatus::from_raw(f.status.resolve_present_text(record).as_deref()),
    }
}

pub fn normalize_datastore(record: &RawRecord) -> Datastore {
    let f = &DATASTORE_FIELDS;
    Datastore {
        name: f.name.resolve(record).into_text(),
        kind: f.kind.resolve(record).into_text(),
        capacity_gib: f.capacity.resolve(record).as_f64(),
        used_gib: f.used.resolve(record).as_f64(),
        free_gib: f.free.resolve(record).as_f64(),
        vm_count: f.vm_count.resolve(record).as_u64(),
    }
}

/// Normalize every `vInfo` row, preserving order.
pub fn normalize_vms(rows: &[RawRecord]) -> Vec<VirtualMachine> {
    rows.iter().map(normalize_vm).collect()
}

/// Normalize every `vHost` row, preserving order.
pub fn normalize_hosts(rows: &[RawRecord]) -> Vec<Host> {
    rows.iter().map(normalize_host).collect()
}

/// Normalize every `vDatastore` row, preserving order.
pub fn normalize_datastores(rows: &[RawRecord]) -> Vec<Datastore> {
    rows.iter().map(normalize_datastore).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rvtools_core::models::record_from_json;
    use serde_json::{json, Value};

    fn rec(v: Value) -> RawRecord {
        record_from_json(v.as_object().expect("row object"))
    }

    // ── VM ────────────────────────────────────────────────────────────────────

    #[test]
    fn test_vm_scenario_row() {
        let vm = normalize_vm(&rec(json!({
            "VM": "app01",
            "Host": "esx01.lab",
            "Cluster": "Prod",
            "CPUs": 4,
            "Memory": 8192,
            "Provisioned MB": 102400,
            "In Use MB": 51200,
            "Powerstate": "poweredOn",
        })));
        assert_eq!(vm.name, "app01");
        assert_eq!(vm.host, "esx01.lab");
        assert_eq!(vm.cluster, "Prod");
        assert_eq!(vm.cpu_count, 4);
        assert_eq!(vm.memory_gib, 8.0);
        assert_eq!(vm.provisioned_gib, 100.0);
        assert_eq!(vm.used_gib, 50.0);
        assert_eq!(vm.power_state, PowerState::PoweredOn);
    }

    #[test]
    fn test_vm_alternate_column_names() {
        let vm = normalize_vm(&rec(json!({
            "Name": "legacy01",
            "ESX Host": "esx02",
            "Num CPUs": "2",
            "Memory MB": "2048",
            "Provisioned Space": 1024,
            "Used Space MB": 512,
            "Power State": "poweredOff",
        })));
        assert_eq!(vm.name, "legacy01");
        assert_eq!(vm.host, "esx02");
        assert_eq!(vm.cpu_count, 2);
        assert_eq!(vm.memory_gib, 2.0);
        assert_eq!(vm.provisioned_gib, 1.0);
        assert_eq!(vm.used_gib, 0.5);
        assert_eq!(vm.power_state, PowerState::PoweredOff);
    }

    #[test]
    fn test_vm_empty_row_defaults() {
        let vm = normalize_vm(&RawRecord::new());
        assert_eq!(vm.name, "Unknown");
        assert_eq!(vm.host, "N/A");
        assert_eq!(vm.cluster, "N/A");
        assert_eq!(vm.cpu_count, 0);
        assert_eq!(vm.memory_gib, 0.0);
        assert_eq!(vm.provisioned_gib, 0.0);
        assert_eq!(vm.used_gib, 0.0);
        assert_eq!(vm.power_state, PowerState::Unknown);
    }

    #[test]
    fn test_vm_unmatched_power_state_is_unknown() {
        let vm = normalize_vm(&rec(json!({"Powerstate": "suspended"})));
        assert_eq!(vm.power_state, PowerState::Unknown);
    }

    // ── Host ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_host_row() {
        let host = normalize_host(&rec(json!({
            "Host": "esx01",
            "Cluster": "Prod",
            "# CPU": 32,
            "Memory": 512,
            "# VMs": 20,
            "Status": "Connected",
        })));
        assert_eq!(host.name, "esx01");
        assert_eq!(host.cpu_core_count, 32);
        assert_eq!(host.memory_gib, 512.0);
        assert_eq!(host.vm_count, 20);
        assert_eq!(host.status, HostStatus::Connected);
    }

    #[test]
    fn test_host_status_absent_vs_other() {
        let absent = normalize_host(&RawRecord::new());
        assert_eq!(absent.status, HostStatus::Unknown);
        assert_eq!(absent.name, "Unknown");

        let other = normalize_host(&rec(json!({"Connection State": "disconnected"})));
        assert_eq!(other.status, HostStatus::Other);
    }

    // ── Datastore ─────────────────────────────────────────────────────────────

    #[test]
    fn test_datastore_row() {
        let ds = normalize_datastore(&rec(json!({
            "Datastore": "ds-ssd-01",
            "Type": "VMFS",
            "Capacity GB": 2048,
            "In Use GB": 1024.5,
            "Free GB": 1023.5,
            "VM Count": 12,
        })));
        assert_eq!(ds.name, "ds-ssd-01");
        assert_eq!(ds.kind, "VMFS");
        assert_eq!(ds.capacity_gib, 2048.0);
        assert_eq!(ds.used_gib, 1024.5);
        assert_eq!(ds.free_gib, 1023.5);
        assert_eq!(ds.vm_count, 12);
    }

    #[test]
    fn test_datastore_garbage_numbers_default_to_zero() {
        let ds = normalize_datastore(&rec(json!({
            "Capacity": "unknown",
            "In Use": null,
            "Free": "-5",
        })));
        assert_eq!(ds.capacity_gib, 0.0);
        assert_eq!(ds.used_gib, 0.0);
        assert_eq!(ds.free_gib, 0.0);
        assert_eq!(ds.kind, "Unknown");
    }

    // ── Collections ───────────────────────────────────────────────────────────

    #[test]
    fn test_normalize_preserves_order() {
        let rows = vec![rec(json!({"VM": "b"})), rec(json!({"VM": "a"}))];
        let names: Vec<String> = normalize_vms(&rows).into_iter().map(|v| v.name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_normalize_empty_sheet() {
        assert!(normalize_hosts(&[]).is_empty());
        assert!(normalize_datastores(&[]).is_empty());
    }
}
