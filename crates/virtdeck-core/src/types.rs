//! Shared data model for host and guest management.
//!
//! Field names are the wire contract: both the local helper binding and the
//! remote management peer produce exactly these JSON keys, so renames here
//! are breaking changes.

use serde::{Deserialize, Deserializer, Serialize};

/// Go peers marshal nil slices as `null`; decode that as empty.
fn null_to_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Hosts
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A managed hypervisor host reachable over SSH.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Host {
    pub id: String,
    pub name: String,
    /// Hostname or IP
    pub host: String,
    pub port: u16,
    pub user: String,
    /// "key" | "password"
    pub auth_type: String,
    pub key_path: String,
    pub password: String,
    pub sort_order: i32,
    pub created_at: String,
    pub updated_at: String,
}

/// Live host resource snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostStats {
    pub cpu_percent: f64,
    /// MB
    pub mem_total: i64,
    /// MB
    pub mem_used: i64,
    pub mem_percent: f64,
    /// GB
    pub disk_total: i64,
    /// GB
    pub disk_used: i64,
    pub disk_percent: f64,
    pub uptime: String,
    pub load_avg: String,
}

/// Sampled host stats, as persisted for history charts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostStatsRecord {
    pub id: i64,
    pub host_id: String,
    pub cpu_percent: f64,
    pub mem_percent: f64,
    pub disk_percent: f64,
    pub timestamp: String,
}

/// Image file found on a host filesystem scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostImageFile {
    pub name: String,
    pub path: String,
    /// Human-readable (e.g. "2.4G")
    pub size: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Virtual machines
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Concise VM summary (from list).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vm {
    pub id: i64,
    pub name: String,
    /// running | shut off | paused | idle | crashed | ...
    pub state: String,
    pub cpus: u32,
    #[serde(rename = "memoryMB")]
    pub memory_mb: u64,
    #[serde(rename = "hostID")]
    pub host_id: String,
}

/// Full VM detail, flat superset of [`Vm`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VmDetail {
    pub id: i64,
    pub name: String,
    pub state: String,
    pub cpus: u32,
    #[serde(rename = "memoryMB")]
    pub memory_mb: u64,
    #[serde(rename = "hostID")]
    pub host_id: String,
    pub autostart: bool,
    /// -1 when graphics are disabled or the VM is down
    pub vnc_port: i64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub nics: Vec<Nic>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub disks: Vec<Disk>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nic {
    pub mac: String,
    pub bridge: String,
    pub network: String,
    pub ip: String,
    pub model: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disk {
    pub device: String,
    pub path: String,
    #[serde(rename = "sizeGB")]
    pub size_gb: f64,
    pub format: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub name: String,
    pub created_at: String,
    pub state: String,
    pub parent: String,
}

/// Parameters for creating a VM from scratch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VmCreateParams {
    pub name: String,
    pub cpus: u32,
    #[serde(rename = "memoryMB")]
    pub memory_mb: u64,
    /// Existing disk to reuse; empty to allocate a new one
    pub disk_path: String,
    #[serde(rename = "diskSizeGB")]
    pub disk_size_gb: u64,
    pub cdrom: String,
    pub network: String,
    /// "network" | "bridge"
    pub net_type: String,
    pub os_variant: String,
    pub vnc: bool,
    pub boot_dev: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskAttachParams {
    pub source: String,
    pub target: String,
    pub driver: String,
    pub cache: String,
    /// "disk" | "cdrom"
    pub dev_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NicAttachParams {
    /// "network" | "bridge"
    #[serde(rename = "type")]
    pub kind: String,
    pub source: String,
    pub model: String,
}

/// Instantaneous guest resource counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VmResourceStats {
    pub cpu_time: u64,
    pub cpu_percent: f64,
    pub vcpus: u32,
    /// KiB
    pub mem_actual: u64,
    /// KiB
    #[serde(rename = "memRSS")]
    pub mem_rss: u64,
    pub net_rx_bytes: u64,
    pub net_tx_bytes: u64,
    pub block_rd_bytes: u64,
    pub block_wr_bytes: u64,
}

/// Sampled guest stats, as persisted for history charts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VmStatsRecord {
    pub id: i64,
    pub host_id: String,
    pub vm_name: String,
    pub cpu_percent: f64,
    /// bytes
    pub mem_used: i64,
    /// bytes
    pub net_rx: i64,
    /// bytes
    pub net_tx: i64,
    pub timestamp: String,
}

/// cloud-init seed parameters for template provisioning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudInitConfig {
    pub hostname: String,
    pub user: String,
    pub password: String,
    pub ssh_key: String,
    /// Custom user-data YAML, overrides the generated one when set
    pub user_data: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Storage
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Storage pool as reported by the hypervisor tooling (sizes are
/// human-readable strings).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoragePool {
    pub name: String,
    pub state: String,
    pub autostart: String,
    pub persistent: String,
    pub capacity: String,
    pub allocation: String,
    pub available: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub capacity: String,
    pub allocation: String,
}

/// ISO image available on a host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IsoFile {
    pub name: String,
    pub path: String,
    /// Human-readable (e.g. "4.7G")
    pub size: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Networking
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub name: String,
    pub state: String,
    pub autostart: String,
    pub persistent: String,
    pub bridge: String,
}

/// Port-forwarding rule (iptables DNAT on the host).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NatRule {
    pub proto: String,
    /// String so ranges like "8080:8090" survive
    pub host_port: String,
    #[serde(rename = "vmIP")]
    pub vm_ip: String,
    pub vm_port: String,
    pub comment: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Catalog (flavors / images / instances)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Sizing preset applied when provisioning from a template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flavor {
    pub id: String,
    pub name: String,
    pub cpus: u32,
    #[serde(rename = "memoryMB")]
    pub memory_mb: u64,
    #[serde(rename = "diskGB")]
    pub disk_gb: u64,
    pub sort_order: i32,
    pub created_at: String,
}

/// OS base image registered on a specific host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: String,
    pub host_id: String,
    pub name: String,
    pub base_path: String,
    pub os_variant: String,
    pub sort_order: i32,
    pub created_at: String,
}

/// Downloadable image preset (global catalog).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSource {
    pub id: String,
    pub name: String,
    pub url: String,
    pub os_variant: String,
    pub file_name: String,
    pub description: String,
    pub sort_order: i32,
    pub created_at: String,
}

/// VM created through the template path, linked back to its flavor/image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    pub id: i64,
    pub host_id: String,
    pub vm_name: String,
    pub flavor_id: String,
    pub image_id: String,
    pub created_at: String,
}

/// Progress of a background image download/upload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportTask {
    pub id: String,
    pub host_id: String,
    /// downloading | uploading | done | error
    pub status: String,
    pub percent: i32,
    pub total_size: i64,
    pub current: i64,
    pub error: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Audit trail
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One logged management action. `vm_name` is empty for host-level actions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub id: i64,
    pub host_id: String,
    pub vm_name: String,
    pub action: String,
    pub detail: String,
    pub timestamp: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Provisioning helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Curated script for installing virtualization tooling on a host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupScript {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Comma-separated distro hints (e.g. "debian,ubuntu")
    pub distros: String,
    pub script: String,
}
