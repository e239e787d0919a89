//! Local helper binding.
//!
//! In Local mode every operation lands on this trait. The embedding
//! application supplies the implementation (the privileged helper that talks
//! SSH and libvirt); this crate only routes to it. One method per action
//! keeps the routing table flat and lets tests substitute a mock.

use std::collections::HashMap;

use async_trait::async_trait;
use virtdeck_core::error::AccessResult;
use virtdeck_core::types::*;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocalBinding: Send + Sync {
    // ── App / tools ──

    async fn app_version(&self) -> AccessResult<String>;
    /// Port of the embedded WebSocket server serving terminal and VNC.
    async fn terminal_port(&self) -> AccessResult<u16>;
    async fn libvirt_setup_scripts(&self) -> AccessResult<Vec<SetupScript>>;

    // ── Hosts ──

    async fn host_list(&self) -> AccessResult<Vec<Host>>;
    async fn host_add(&self, host: &Host) -> AccessResult<()>;
    async fn host_update(&self, host: &Host) -> AccessResult<()>;
    async fn host_delete(&self, id: &str) -> AccessResult<()>;
    async fn host_connect(&self, id: &str) -> AccessResult<()>;
    async fn host_disconnect(&self, id: &str) -> AccessResult<()>;
    /// Connectivity probe; returns a human-readable result line.
    async fn host_test(&self, host: &Host) -> AccessResult<String>;
    async fn host_reset_host_key(&self, id: &str) -> AccessResult<()>;
    async fn host_get_fingerprint(&self, id: &str) -> AccessResult<String>;
    async fn host_is_connected(&self, id: &str) -> AccessResult<bool>;
    async fn host_resource_stats(&self, host_id: &str) -> AccessResult<HostStats>;
    async fn host_export_json(&self) -> AccessResult<String>;
    /// Returns the number of hosts imported.
    async fn host_import_json(&self, json: &str) -> AccessResult<i64>;
    /// Tool name → version/availability line.
    async fn host_check_tools(&self, id: &str) -> AccessResult<HashMap<String, String>>;
    async fn host_detect_distro(&self, id: &str) -> AccessResult<String>;
    async fn host_run_script(&self, host_id: &str, script: &str) -> AccessResult<String>;
    async fn host_image_scan(&self, host_id: &str) -> AccessResult<Vec<HostImageFile>>;
    async fn host_image_delete(&self, host_id: &str, path: &str) -> AccessResult<()>;
    async fn host_stats_history(&self, host_id: &str, hours: u32) -> AccessResult<Vec<HostStatsRecord>>;

    // ── VMs ──

    async fn vm_list(&self, host_id: &str) -> AccessResult<Vec<Vm>>;
    async fn vm_get(&self, host_id: &str, vm_name: &str) -> AccessResult<VmDetail>;
    async fn vm_start(&self, host_id: &str, vm_name: &str) -> AccessResult<()>;
    async fn vm_shutdown(&self, host_id: &str, vm_name: &str) -> AccessResult<()>;
    async fn vm_destroy(&self, host_id: &str, vm_name: &str) -> AccessResult<()>;
    async fn vm_reboot(&self, host_id: &str, vm_name: &str) -> AccessResult<()>;
    async fn vm_suspend(&self, host_id: &str, vm_name: &str) -> AccessResult<()>;
    async fn vm_resume(&self, host_id: &str, vm_name: &str) -> AccessResult<()>;
    async fn vm_delete(&self, host_id: &str, vm_name: &str, remove_storage: bool) -> AccessResult<()>;
    async fn vm_rename(&self, host_id: &str, old_name: &str, new_name: &str) -> AccessResult<()>;
    async fn vm_set_vcpus(&self, host_id: &str, vm_name: &str, count: u32) -> AccessResult<()>;
    async fn vm_set_memory(&self, host_id: &str, vm_name: &str, size_mb: u64) -> AccessResult<()>;
    async fn vm_set_autostart(&self, host_id: &str, vm_name: &str, enabled: bool) -> AccessResult<()>;
    async fn vm_clone(&self, host_id: &str, src_name: &str, new_name: &str) -> AccessResult<()>;
    async fn vm_get_xml(&self, host_id: &str, vm_name: &str) -> AccessResult<String>;
    async fn vm_define_xml(&self, host_id: &str, xml_content: &str) -> AccessResult<()>;
    async fn vm_create(&self, host_id: &str, params: &VmCreateParams) -> AccessResult<()>;
    async fn vm_stats(&self, host_id: &str, vm_name: &str) -> AccessResult<VmResourceStats>;
    #[allow(clippy::too_many_arguments)]
    async fn vm_create_from_template(
        &self,
        host_id: &str,
        vm_name: &str,
        flavor_id: &str,
        image_id: &str,
        net_type: &str,
        net_name: &str,
        root_password: &str,
        ssh_pub_key: &str,
    ) -> AccessResult<()>;
    async fn vm_migrate(&self, src_host_id: &str, vm_name: &str, dst_host_id: &str) -> AccessResult<()>;
    async fn vm_migrate_offline(&self, src_host_id: &str, vm_name: &str, dst_host_id: &str) -> AccessResult<()>;
    async fn vm_note_get(&self, host_id: &str, vm_name: &str) -> AccessResult<String>;
    async fn vm_note_set(&self, host_id: &str, vm_name: &str, note: &str) -> AccessResult<()>;
    async fn vm_stats_history(&self, host_id: &str, vm_name: &str, hours: u32) -> AccessResult<Vec<VmStatsRecord>>;
    async fn vm_attach_disk(&self, host_id: &str, vm_name: &str, params: &DiskAttachParams) -> AccessResult<()>;
    async fn vm_detach_disk(&self, host_id: &str, vm_name: &str, target: &str) -> AccessResult<()>;
    async fn vm_resize_disk(&self, host_id: &str, disk_path: &str, new_size_gb: u64) -> AccessResult<()>;
    async fn vm_attach_interface(&self, host_id: &str, vm_name: &str, params: &NicAttachParams) -> AccessResult<()>;
    async fn vm_detach_interface(&self, host_id: &str, vm_name: &str, mac_addr: &str) -> AccessResult<()>;
    async fn vm_change_media(&self, host_id: &str, vm_name: &str, target: &str, source: &str) -> AccessResult<()>;
    async fn vm_eject_media(&self, host_id: &str, vm_name: &str, target: &str) -> AccessResult<()>;
    async fn vm_set_graphics(&self, host_id: &str, vm_name: &str, enabled: bool) -> AccessResult<()>;
    async fn vm_generate_cloud_init(&self, host_id: &str, output_path: &str, config: &CloudInitConfig) -> AccessResult<()>;

    // ── Snapshots ──

    async fn snapshot_list(&self, host_id: &str, vm_name: &str) -> AccessResult<Vec<Snapshot>>;
    async fn snapshot_create(&self, host_id: &str, vm_name: &str, snap_name: &str) -> AccessResult<()>;
    async fn snapshot_delete(&self, host_id: &str, vm_name: &str, snap_name: &str) -> AccessResult<()>;
    async fn snapshot_revert(&self, host_id: &str, vm_name: &str, snap_name: &str) -> AccessResult<()>;

    // ── Storage ──

    async fn pool_list(&self, host_id: &str) -> AccessResult<Vec<StoragePool>>;
    async fn pool_start(&self, host_id: &str, pool_name: &str) -> AccessResult<()>;
    async fn pool_stop(&self, host_id: &str, pool_name: &str) -> AccessResult<()>;
    async fn pool_autostart(&self, host_id: &str, pool_name: &str, enabled: bool) -> AccessResult<()>;
    async fn vol_list(&self, host_id: &str, pool_name: &str) -> AccessResult<Vec<Volume>>;
    /// Returns the path of the created volume.
    async fn vol_create(&self, host_id: &str, pool_name: &str, vol_name: &str, size_gb: u64, format: &str) -> AccessResult<String>;
    async fn vol_delete(&self, host_id: &str, pool_name: &str, vol_name: &str) -> AccessResult<()>;

    // ── Networking ──

    async fn network_list(&self, host_id: &str) -> AccessResult<Vec<Network>>;
    async fn network_start(&self, host_id: &str, net_name: &str) -> AccessResult<()>;
    async fn network_stop(&self, host_id: &str, net_name: &str) -> AccessResult<()>;
    async fn network_autostart(&self, host_id: &str, net_name: &str, enabled: bool) -> AccessResult<()>;
    async fn bridge_list(&self, host_id: &str) -> AccessResult<Vec<String>>;
    async fn nat_list(&self, host_id: &str) -> AccessResult<Vec<NatRule>>;
    async fn nat_add(&self, host_id: &str, rule: &NatRule) -> AccessResult<()>;
    /// `rule.comment` is ignored; matching is on proto/ports/address.
    async fn nat_delete(&self, host_id: &str, rule: &NatRule) -> AccessResult<()>;

    // ── Media / OS variants ──

    async fn iso_list(&self, host_id: &str) -> AccessResult<Vec<IsoFile>>;
    async fn os_variant_list(&self, host_id: &str) -> AccessResult<Vec<String>>;

    // ── Catalog ──

    async fn flavor_list(&self) -> AccessResult<Vec<Flavor>>;
    async fn flavor_add(&self, flavor: &Flavor) -> AccessResult<()>;
    async fn flavor_update(&self, flavor: &Flavor) -> AccessResult<()>;
    async fn flavor_delete(&self, id: &str) -> AccessResult<()>;
    async fn image_list(&self, host_id: &str) -> AccessResult<Vec<Image>>;
    async fn image_add(&self, host_id: &str, image: &Image) -> AccessResult<()>;
    async fn image_update(&self, image: &Image) -> AccessResult<()>;
    async fn image_delete(&self, id: &str) -> AccessResult<()>;
    /// Starts a background download on the host; returns a task id.
    async fn image_import(&self, host_id: &str, url: &str, dest_path: &str, name: &str, os_variant: &str) -> AccessResult<String>;
    /// Streams a local file to the host; returns a task id.
    async fn image_upload(&self, host_id: &str, local_path: &str, dest_path: &str, name: &str, os_variant: &str) -> AccessResult<String>;
    async fn image_import_status(&self) -> AccessResult<Vec<ImportTask>>;
    async fn image_source_list(&self) -> AccessResult<Vec<ImageSource>>;
    async fn image_source_add(&self, source: &ImageSource) -> AccessResult<()>;
    async fn image_source_update(&self, source: &ImageSource) -> AccessResult<()>;
    async fn image_source_delete(&self, id: &str) -> AccessResult<()>;
    async fn instance_list(&self, host_id: &str) -> AccessResult<Vec<Instance>>;
    async fn instance_by_vm_name(&self, host_id: &str, vm_name: &str) -> AccessResult<Instance>;
    async fn instance_iso_list(&self, host_id: &str, instance_id: i64) -> AccessResult<Vec<IsoFile>>;

    // ── Settings / audit ──

    async fn setting_get(&self, key: &str) -> AccessResult<String>;
    async fn setting_set(&self, key: &str, value: &str) -> AccessResult<()>;
    async fn audit_list(&self, host_id: &str, limit: u32) -> AccessResult<Vec<AuditRecord>>;
    async fn audit_list_all(&self, limit: u32) -> AccessResult<Vec<AuditRecord>>;
}
