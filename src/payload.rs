//! Typed request payloads, one struct per wire shape.
//!
//! These serialize into the `data` member of the action envelope. Field
//! names are part of the wire contract; everything borrows so building a
//! payload never clones the caller's strings.

use serde::Serialize;
use virtdeck_core::types::{CloudInitConfig, DiskAttachParams, Image, NatRule, NicAttachParams, VmCreateParams};

/// `{}` on the wire. Braced on purpose; a unit struct would serialize
/// to null.
#[derive(Serialize)]
pub(crate) struct Empty {}

// ── Shared refs ──

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IdRef<'a> {
    pub id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HostRef<'a> {
    pub host_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VmRef<'a> {
    pub host_id: &'a str,
    pub vm_name: &'a str,
}

// ── Hosts ──

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JsonBody<'a> {
    pub json: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ScriptBody<'a> {
    pub host_id: &'a str,
    pub script: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImagePathBody<'a> {
    pub host_id: &'a str,
    pub path: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HostHoursBody<'a> {
    pub host_id: &'a str,
    pub hours: u32,
}

// ── VMs ──

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VmDeleteBody<'a> {
    pub host_id: &'a str,
    pub vm_name: &'a str,
    pub remove_storage: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RenameBody<'a> {
    pub host_id: &'a str,
    pub old_name: &'a str,
    pub new_name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VcpusBody<'a> {
    pub host_id: &'a str,
    pub vm_name: &'a str,
    pub count: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MemoryBody<'a> {
    pub host_id: &'a str,
    pub vm_name: &'a str,
    #[serde(rename = "sizeMB")]
    pub size_mb: u64,
}

/// vm.setAutostart and vm.setGraphics share this shape.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VmEnableBody<'a> {
    pub host_id: &'a str,
    pub vm_name: &'a str,
    pub enabled: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CloneBody<'a> {
    pub host_id: &'a str,
    pub src_name: &'a str,
    pub new_name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DefineXmlBody<'a> {
    pub host_id: &'a str,
    pub xml_content: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VmCreateBody<'a> {
    pub host_id: &'a str,
    pub params: &'a VmCreateParams,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TemplateBody<'a> {
    pub host_id: &'a str,
    pub vm_name: &'a str,
    pub flavor_id: &'a str,
    pub image_id: &'a str,
    pub net_type: &'a str,
    pub net_name: &'a str,
    pub root_password: &'a str,
    pub ssh_pub_key: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MigrateBody<'a> {
    pub src_host_id: &'a str,
    pub vm_name: &'a str,
    pub dst_host_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NoteBody<'a> {
    pub host_id: &'a str,
    pub vm_name: &'a str,
    pub note: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VmHoursBody<'a> {
    pub host_id: &'a str,
    pub vm_name: &'a str,
    pub hours: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DiskAttachBody<'a> {
    pub host_id: &'a str,
    pub vm_name: &'a str,
    pub params: &'a DiskAttachParams,
}

/// vm.detachDisk and vm.ejectMedia share this shape.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TargetBody<'a> {
    pub host_id: &'a str,
    pub vm_name: &'a str,
    pub target: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResizeDiskBody<'a> {
    pub host_id: &'a str,
    pub disk_path: &'a str,
    #[serde(rename = "newSizeGB")]
    pub new_size_gb: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NicAttachBody<'a> {
    pub host_id: &'a str,
    pub vm_name: &'a str,
    pub params: &'a NicAttachParams,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MacBody<'a> {
    pub host_id: &'a str,
    pub vm_name: &'a str,
    pub mac_addr: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MediaBody<'a> {
    pub host_id: &'a str,
    pub vm_name: &'a str,
    pub target: &'a str,
    pub source: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CloudInitBody<'a> {
    pub host_id: &'a str,
    pub output_path: &'a str,
    pub config: &'a CloudInitConfig,
}

// ── Snapshots ──

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SnapshotBody<'a> {
    pub host_id: &'a str,
    pub vm_name: &'a str,
    pub snap_name: &'a str,
}

// ── Storage ──

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PoolBody<'a> {
    pub host_id: &'a str,
    pub pool_name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PoolAutostartBody<'a> {
    pub host_id: &'a str,
    pub pool_name: &'a str,
    pub enabled: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VolCreateBody<'a> {
    pub host_id: &'a str,
    pub pool_name: &'a str,
    pub vol_name: &'a str,
    #[serde(rename = "sizeGB")]
    pub size_gb: u64,
    pub format: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VolBody<'a> {
    pub host_id: &'a str,
    pub pool_name: &'a str,
    pub vol_name: &'a str,
}

// ── Networking ──

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NetworkBody<'a> {
    pub host_id: &'a str,
    pub net_name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NetworkAutostartBody<'a> {
    pub host_id: &'a str,
    pub net_name: &'a str,
    pub enabled: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NatAddBody<'a> {
    pub host_id: &'a str,
    #[serde(flatten)]
    pub rule: &'a NatRule,
}

/// No comment field; deletion matches on proto/ports/address.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NatDeleteBody<'a> {
    pub host_id: &'a str,
    pub proto: &'a str,
    pub host_port: &'a str,
    #[serde(rename = "vmIP")]
    pub vm_ip: &'a str,
    pub vm_port: &'a str,
}

// ── Catalog ──

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImageAddBody<'a> {
    pub host_id: &'a str,
    pub image: &'a Image,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImageImportBody<'a> {
    pub host_id: &'a str,
    pub url: &'a str,
    pub dest_path: &'a str,
    pub name: &'a str,
    pub os_variant: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImageUploadBody<'a> {
    pub host_id: &'a str,
    pub local_path: &'a str,
    pub dest_path: &'a str,
    pub name: &'a str,
    pub os_variant: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InstanceIsoBody<'a> {
    pub host_id: &'a str,
    pub instance_id: i64,
}

// ── Settings / audit ──

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct KeyBody<'a> {
    pub key: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct KeyValueBody<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuditBody<'a> {
    pub host_id: &'a str,
    pub limit: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LimitBody {
    pub limit: u32,
}
