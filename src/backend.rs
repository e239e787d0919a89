//! Dispatch facade.
//!
//! One uniform surface for every management operation. Each call builds its
//! typed payload and goes through [`Backend::dispatch`]: with a remote
//! client installed the payload rides the action envelope to the peer,
//! otherwise the matching binding method runs in-process. Callers never
//! branch on mode.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use virtdeck_core::error::AccessResult;
use virtdeck_core::types::*;

use crate::binding::LocalBinding;
use crate::connection::RemoteSession;
use crate::payload::*;
use crate::registry::ModeRegistry;

/// Shared handle applications hold.
pub type BackendHandle = Arc<Backend>;

/// Uniform call surface over the local binding and the remote peer.
pub struct Backend {
    pub(crate) registry: ModeRegistry,
    pub(crate) local: Arc<dyn LocalBinding>,
    pub(crate) session: RwLock<Option<RemoteSession>>,
}

impl Backend {
    /// `registry` decides where calls go; `local` handles them when no
    /// remote client is installed.
    pub fn new(registry: ModeRegistry, local: Arc<dyn LocalBinding>) -> Self {
        Self { registry, local, session: RwLock::new(None) }
    }

    /// Route one operation. The registry is read once per call, so a
    /// concurrent mode switch affects later calls only.
    async fn dispatch<P, T, F, Fut>(&self, action: &'static str, payload: &P, local: F) -> AccessResult<T>
    where
        P: Serialize,
        T: DeserializeOwned + Default,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AccessResult<T>>,
    {
        match self.registry.active_client().await {
            Some(client) => client.invoke(action, payload).await,
            None => local().await,
        }
    }

    // ── Hosts ──

    pub async fn host_list(&self) -> AccessResult<Vec<Host>> {
        self.dispatch("host.list", &Empty {}, || self.local.host_list()).await
    }

    pub async fn host_add(&self, host: &Host) -> AccessResult<()> {
        self.dispatch("host.add", host, || self.local.host_add(host)).await
    }

    pub async fn host_update(&self, host: &Host) -> AccessResult<()> {
        self.dispatch("host.update", host, || self.local.host_update(host)).await
    }

    pub async fn host_delete(&self, id: &str) -> AccessResult<()> {
        self.dispatch("host.delete", &IdRef { id }, || self.local.host_delete(id)).await
    }

    pub async fn host_connect(&self, id: &str) -> AccessResult<()> {
        self.dispatch("host.connect", &IdRef { id }, || self.local.host_connect(id)).await
    }

    pub async fn host_disconnect(&self, id: &str) -> AccessResult<()> {
        self.dispatch("host.disconnect", &IdRef { id }, || self.local.host_disconnect(id)).await
    }

    pub async fn host_test(&self, host: &Host) -> AccessResult<String> {
        self.dispatch("host.test", host, || self.local.host_test(host)).await
    }

    pub async fn host_reset_host_key(&self, id: &str) -> AccessResult<()> {
        self.dispatch("host.resetHostKey", &IdRef { id }, || self.local.host_reset_host_key(id)).await
    }

    pub async fn host_get_fingerprint(&self, id: &str) -> AccessResult<String> {
        self.dispatch("host.getFingerprint", &IdRef { id }, || self.local.host_get_fingerprint(id)).await
    }

    pub async fn host_is_connected(&self, id: &str) -> AccessResult<bool> {
        self.dispatch("host.isConnected", &IdRef { id }, || self.local.host_is_connected(id)).await
    }

    pub async fn host_resource_stats(&self, host_id: &str) -> AccessResult<HostStats> {
        self.dispatch("host.resourceStats", &HostRef { host_id }, || self.local.host_resource_stats(host_id)).await
    }

    pub async fn host_export_json(&self) -> AccessResult<String> {
        self.dispatch("host.exportJSON", &Empty {}, || self.local.host_export_json()).await
    }

    pub async fn host_import_json(&self, json: &str) -> AccessResult<i64> {
        self.dispatch("host.importJSON", &JsonBody { json }, || self.local.host_import_json(json)).await
    }

    pub async fn host_check_tools(&self, id: &str) -> AccessResult<HashMap<String, String>> {
        self.dispatch("host.checkTools", &IdRef { id }, || self.local.host_check_tools(id)).await
    }

    pub async fn host_detect_distro(&self, id: &str) -> AccessResult<String> {
        self.dispatch("host.detectDistro", &IdRef { id }, || self.local.host_detect_distro(id)).await
    }

    pub async fn host_run_script(&self, host_id: &str, script: &str) -> AccessResult<String> {
        self.dispatch("host.runScript", &ScriptBody { host_id, script }, || self.local.host_run_script(host_id, script)).await
    }

    pub async fn host_image_scan(&self, host_id: &str) -> AccessResult<Vec<HostImageFile>> {
        self.dispatch("host.imageScan", &HostRef { host_id }, || self.local.host_image_scan(host_id)).await
    }

    pub async fn host_image_delete(&self, host_id: &str, path: &str) -> AccessResult<()> {
        self.dispatch("host.imageDelete", &ImagePathBody { host_id, path }, || self.local.host_image_delete(host_id, path)).await
    }

    pub async fn host_stats_history(&self, host_id: &str, hours: u32) -> AccessResult<Vec<HostStatsRecord>> {
        self.dispatch("host.statsHistory", &HostHoursBody { host_id, hours }, || self.local.host_stats_history(host_id, hours)).await
    }

    // ── VMs ──

    pub async fn vm_list(&self, host_id: &str) -> AccessResult<Vec<Vm>> {
        self.dispatch("vm.list", &HostRef { host_id }, || self.local.vm_list(host_id)).await
    }

    pub async fn vm_get(&self, host_id: &str, vm_name: &str) -> AccessResult<VmDetail> {
        self.dispatch("vm.get", &VmRef { host_id, vm_name }, || self.local.vm_get(host_id, vm_name)).await
    }

    pub async fn vm_start(&self, host_id: &str, vm_name: &str) -> AccessResult<()> {
        self.dispatch("vm.start", &VmRef { host_id, vm_name }, || self.local.vm_start(host_id, vm_name)).await
    }

    pub async fn vm_shutdown(&self, host_id: &str, vm_name: &str) -> AccessResult<()> {
        self.dispatch("vm.shutdown", &VmRef { host_id, vm_name }, || self.local.vm_shutdown(host_id, vm_name)).await
    }

    pub async fn vm_destroy(&self, host_id: &str, vm_name: &str) -> AccessResult<()> {
        self.dispatch("vm.destroy", &VmRef { host_id, vm_name }, || self.local.vm_destroy(host_id, vm_name)).await
    }

    pub async fn vm_reboot(&self, host_id: &str, vm_name: &str) -> AccessResult<()> {
        self.dispatch("vm.reboot", &VmRef { host_id, vm_name }, || self.local.vm_reboot(host_id, vm_name)).await
    }

    pub async fn vm_suspend(&self, host_id: &str, vm_name: &str) -> AccessResult<()> {
        self.dispatch("vm.suspend", &VmRef { host_id, vm_name }, || self.local.vm_suspend(host_id, vm_name)).await
    }

    pub async fn vm_resume(&self, host_id: &str, vm_name: &str) -> AccessResult<()> {
        self.dispatch("vm.resume", &VmRef { host_id, vm_name }, || self.local.vm_resume(host_id, vm_name)).await
    }

    pub async fn vm_delete(&self, host_id: &str, vm_name: &str, remove_storage: bool) -> AccessResult<()> {
        self.dispatch(
            "vm.delete",
            &VmDeleteBody { host_id, vm_name, remove_storage },
            || self.local.vm_delete(host_id, vm_name, remove_storage),
        )
        .await
    }

    pub async fn vm_rename(&self, host_id: &str, old_name: &str, new_name: &str) -> AccessResult<()> {
        self.dispatch(
            "vm.rename",
            &RenameBody { host_id, old_name, new_name },
            || self.local.vm_rename(host_id, old_name, new_name),
        )
        .await
    }

    pub async fn vm_set_vcpus(&self, host_id: &str, vm_name: &str, count: u32) -> AccessResult<()> {
        self.dispatch(
            "vm.setVCPUs",
            &VcpusBody { host_id, vm_name, count },
            || self.local.vm_set_vcpus(host_id, vm_name, count),
        )
        .await
    }

    pub async fn vm_set_memory(&self, host_id: &str, vm_name: &str, size_mb: u64) -> AccessResult<()> {
        self.dispatch(
            "vm.setMemory",
            &MemoryBody { host_id, vm_name, size_mb },
            || self.local.vm_set_memory(host_id, vm_name, size_mb),
        )
        .await
    }

    pub async fn vm_set_autostart(&self, host_id: &str, vm_name: &str, enabled: bool) -> AccessResult<()> {
        self.dispatch(
            "vm.setAutostart",
            &VmEnableBody { host_id, vm_name, enabled },
            || self.local.vm_set_autostart(host_id, vm_name, enabled),
        )
        .await
    }

    pub async fn vm_clone(&self, host_id: &str, src_name: &str, new_name: &str) -> AccessResult<()> {
        self.dispatch(
            "vm.clone",
            &CloneBody { host_id, src_name, new_name },
            || self.local.vm_clone(host_id, src_name, new_name),
        )
        .await
    }

    pub async fn vm_get_xml(&self, host_id: &str, vm_name: &str) -> AccessResult<String> {
        self.dispatch("vm.getXML", &VmRef { host_id, vm_name }, || self.local.vm_get_xml(host_id, vm_name)).await
    }

    pub async fn vm_define_xml(&self, host_id: &str, xml_content: &str) -> AccessResult<()> {
        self.dispatch(
            "vm.defineXML",
            &DefineXmlBody { host_id, xml_content },
            || self.local.vm_define_xml(host_id, xml_content),
        )
        .await
    }

    pub async fn vm_create(&self, host_id: &str, params: &VmCreateParams) -> AccessResult<()> {
        self.dispatch("vm.create", &VmCreateBody { host_id, params }, || self.local.vm_create(host_id, params)).await
    }

    pub async fn vm_stats(&self, host_id: &str, vm_name: &str) -> AccessResult<VmResourceStats> {
        self.dispatch("vm.stats", &VmRef { host_id, vm_name }, || self.local.vm_stats(host_id, vm_name)).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn vm_create_from_template(
        &self,
        host_id: &str,
        vm_name: &str,
        flavor_id: &str,
        image_id: &str,
        net_type: &str,
        net_name: &str,
        root_password: &str,
        ssh_pub_key: &str,
    ) -> AccessResult<()> {
        self.dispatch(
            "vm.createFromTemplate",
            &TemplateBody { host_id, vm_name, flavor_id, image_id, net_type, net_name, root_password, ssh_pub_key },
            || {
                self.local.vm_create_from_template(
                    host_id,
                    vm_name,
                    flavor_id,
                    image_id,
                    net_type,
                    net_name,
                    root_password,
                    ssh_pub_key,
                )
            },
        )
        .await
    }

    pub async fn vm_migrate(&self, src_host_id: &str, vm_name: &str, dst_host_id: &str) -> AccessResult<()> {
        self.dispatch(
            "vm.migrate",
            &MigrateBody { src_host_id, vm_name, dst_host_id },
            || self.local.vm_migrate(src_host_id, vm_name, dst_host_id),
        )
        .await
    }

    pub async fn vm_migrate_offline(&self, src_host_id: &str, vm_name: &str, dst_host_id: &str) -> AccessResult<()> {
        self.dispatch(
            "vm.migrateOffline",
            &MigrateBody { src_host_id, vm_name, dst_host_id },
            || self.local.vm_migrate_offline(src_host_id, vm_name, dst_host_id),
        )
        .await
    }

    pub async fn vm_note_get(&self, host_id: &str, vm_name: &str) -> AccessResult<String> {
        self.dispatch("vm.noteGet", &VmRef { host_id, vm_name }, || self.local.vm_note_get(host_id, vm_name)).await
    }

    pub async fn vm_note_set(&self, host_id: &str, vm_name: &str, note: &str) -> AccessResult<()> {
        self.dispatch("vm.noteSet", &NoteBody { host_id, vm_name, note }, || {
            self.local.vm_note_set(host_id, vm_name, note)
        })
        .await
    }

    pub async fn vm_stats_history(&self, host_id: &str, vm_name: &str, hours: u32) -> AccessResult<Vec<VmStatsRecord>> {
        self.dispatch(
            "vm.statsHistory",
            &VmHoursBody { host_id, vm_name, hours },
            || self.local.vm_stats_history(host_id, vm_name, hours),
        )
        .await
    }

    pub async fn vm_attach_disk(&self, host_id: &str, vm_name: &str, params: &DiskAttachParams) -> AccessResult<()> {
        self.dispatch(
            "vm.attachDisk",
            &DiskAttachBody { host_id, vm_name, params },
            || self.local.vm_attach_disk(host_id, vm_name, params),
        )
        .await
    }

    pub async fn vm_detach_disk(&self, host_id: &str, vm_name: &str, target: &str) -> AccessResult<()> {
        self.dispatch(
            "vm.detachDisk",
            &TargetBody { host_id, vm_name, target },
            || self.local.vm_detach_disk(host_id, vm_name, target),
        )
        .await
    }

    pub async fn vm_resize_disk(&self, host_id: &str, disk_path: &str, new_size_gb: u64) -> AccessResult<()> {
        self.dispatch(
            "vm.resizeDisk",
            &ResizeDiskBody { host_id, disk_path, new_size_gb },
            || self.local.vm_resize_disk(host_id, disk_path, new_size_gb),
        )
        .await
    }

    pub async fn vm_attach_interface(&self, host_id: &str, vm_name: &str, params: &NicAttachParams) -> AccessResult<()> {
        self.dispatch(
            "vm.attachInterface",
            &NicAttachBody { host_id, vm_name, params },
            || self.local.vm_attach_interface(host_id, vm_name, params),
        )
        .await
    }

    pub async fn vm_detach_interface(&self, host_id: &str, vm_name: &str, mac_addr: &str) -> AccessResult<()> {
        self.dispatch(
            "vm.detachInterface",
            &MacBody { host_id, vm_name, mac_addr },
            || self.local.vm_detach_interface(host_id, vm_name, mac_addr),
        )
        .await
    }

    pub async fn vm_change_media(&self, host_id: &str, vm_name: &str, target: &str, source: &str) -> AccessResult<()> {
        self.dispatch(
            "vm.changeMedia",
            &MediaBody { host_id, vm_name, target, source },
            || self.local.vm_change_media(host_id, vm_name, target, source),
        )
        .await
    }

    pub async fn vm_eject_media(&self, host_id: &str, vm_name: &str, target: &str) -> AccessResult<()> {
        self.dispatch(
            "vm.ejectMedia",
            &TargetBody { host_id, vm_name, target },
            || self.local.vm_eject_media(host_id, vm_name, target),
        )
        .await
    }

    pub async fn vm_set_graphics(&self, host_id: &str, vm_name: &str, enabled: bool) -> AccessResult<()> {
        self.dispatch(
            "vm.setGraphics",
            &VmEnableBody { host_id, vm_name, enabled },
            || self.local.vm_set_graphics(host_id, vm_name, enabled),
        )
        .await
    }

    pub async fn vm_generate_cloud_init(&self, host_id: &str, output_path: &str, config: &CloudInitConfig) -> AccessResult<()> {
        self.dispatch(
            "vm.generateCloudInit",
            &CloudInitBody { host_id, output_path, config },
            || self.local.vm_generate_cloud_init(host_id, output_path, config),
        )
        .await
    }

    // ── Snapshots ──

    pub async fn snapshot_list(&self, host_id: &str, vm_name: &str) -> AccessResult<Vec<Snapshot>> {
        self.dispatch("snapshot.list", &VmRef { host_id, vm_name }, || self.local.snapshot_list(host_id, vm_name)).await
    }

    pub async fn snapshot_create(&self, host_id: &str, vm_name: &str, snap_name: &str) -> AccessResult<()> {
        self.dispatch(
            "snapshot.create",
            &SnapshotBody { host_id, vm_name, snap_name },
            || self.local.snapshot_create(host_id, vm_name, snap_name),
        )
        .await
    }

    pub async fn snapshot_delete(&self, host_id: &str, vm_name: &str, snap_name: &str) -> AccessResult<()> {
        self.dispatch(
            "snapshot.delete",
            &SnapshotBody { host_id, vm_name, snap_name },
            || self.local.snapshot_delete(host_id, vm_name, snap_name),
        )
        .await
    }

    pub async fn snapshot_revert(&self, host_id: &str, vm_name: &str, snap_name: &str) -> AccessResult<()> {
        self.dispatch(
            "snapshot.revert",
            &SnapshotBody { host_id, vm_name, snap_name },
            || self.local.snapshot_revert(host_id, vm_name, snap_name),
        )
        .await
    }

    // ── Storage ──

    pub async fn pool_list(&self, host_id: &str) -> AccessResult<Vec<StoragePool>> {
        self.dispatch("pool.list", &HostRef { host_id }, || self.local.pool_list(host_id)).await
    }

    pub async fn pool_start(&self, host_id: &str, pool_name: &str) -> AccessResult<()> {
        self.dispatch("pool.start", &PoolBody { host_id, pool_name }, || self.local.pool_start(host_id, pool_name)).await
    }

    pub async fn pool_stop(&self, host_id: &str, pool_name: &str) -> AccessResult<()> {
        self.dispatch("pool.stop", &PoolBody { host_id, pool_name }, || self.local.pool_stop(host_id, pool_name)).await
    }

    pub async fn pool_autostart(&self, host_id: &str, pool_name: &str, enabled: bool) -> AccessResult<()> {
        self.dispatch(
            "pool.autostart",
            &PoolAutostartBody { host_id, pool_name, enabled },
            || self.local.pool_autostart(host_id, pool_name, enabled),
        )
        .await
    }

    pub async fn vol_list(&self, host_id: &str, pool_name: &str) -> AccessResult<Vec<Volume>> {
        self.dispatch("vol.list", &PoolBody { host_id, pool_name }, || self.local.vol_list(host_id, pool_name)).await
    }

    pub async fn vol_create(
        &self,
        host_id: &str,
        pool_name: &str,
        vol_name: &str,
        size_gb: u64,
        format: &str,
    ) -> AccessResult<String> {
        self.dispatch(
            "vol.create",
            &VolCreateBody { host_id, pool_name, vol_name, size_gb, format },
            || self.local.vol_create(host_id, pool_name, vol_name, size_gb, format),
        )
        .await
    }

    pub async fn vol_delete(&self, host_id: &str, pool_name: &str, vol_name: &str) -> AccessResult<()> {
        self.dispatch(
            "vol.delete",
            &VolBody { host_id, pool_name, vol_name },
            || self.local.vol_delete(host_id, pool_name, vol_name),
        )
        .await
    }

    // ── Networking ──

    pub async fn network_list(&self, host_id: &str) -> AccessResult<Vec<Network>> {
        self.dispatch("network.list", &HostRef { host_id }, || self.local.network_list(host_id)).await
    }

    pub async fn network_start(&self, host_id: &str, net_name: &str) -> AccessResult<()> {
        self.dispatch("network.start", &NetworkBody { host_id, net_name }, || {
            self.local.network_start(host_id, net_name)
        })
        .await
    }

    pub async fn network_stop(&self, host_id: &str, net_name: &str) -> AccessResult<()> {
        self.dispatch("network.stop", &NetworkBody { host_id, net_name }, || {
            self.local.network_stop(host_id, net_name)
        })
        .await
    }

    pub async fn network_autostart(&self, host_id: &str, net_name: &str, enabled: bool) -> AccessResult<()> {
        self.dispatch(
            "network.autostart",
            &NetworkAutostartBody { host_id, net_name, enabled },
            || self.local.network_autostart(host_id, net_name, enabled),
        )
        .await
    }

    pub async fn bridge_list(&self, host_id: &str) -> AccessResult<Vec<String>> {
        self.dispatch("bridge.list", &HostRef { host_id }, || self.local.bridge_list(host_id)).await
    }

    pub async fn nat_list(&self, host_id: &str) -> AccessResult<Vec<NatRule>> {
        self.dispatch("nat.list", &HostRef { host_id }, || self.local.nat_list(host_id)).await
    }

    pub async fn nat_add(&self, host_id: &str, rule: &NatRule) -> AccessResult<()> {
        self.dispatch("nat.add", &NatAddBody { host_id, rule }, || self.local.nat_add(host_id, rule)).await
    }

    pub async fn nat_delete(&self, host_id: &str, rule: &NatRule) -> AccessResult<()> {
        self.dispatch(
            "nat.delete",
            &NatDeleteBody {
                host_id,
                proto: &rule.proto,
                host_port: &rule.host_port,
                vm_ip: &rule.vm_ip,
                vm_port: &rule.vm_port,
            },
            || self.local.nat_delete(host_id, rule),
        )
        .await
    }

    // ── Media / OS variants ──

    pub async fn iso_list(&self, host_id: &str) -> AccessResult<Vec<IsoFile>> {
        self.dispatch("iso.list", &HostRef { host_id }, || self.local.iso_list(host_id)).await
    }

    pub async fn os_variant_list(&self, host_id: &str) -> AccessResult<Vec<String>> {
        self.dispatch("osvariant.list", &HostRef { host_id }, || self.local.os_variant_list(host_id)).await
    }

    // ── Catalog ──

    pub async fn flavor_list(&self) -> AccessResult<Vec<Flavor>> {
        self.dispatch("flavor.list", &Empty {}, || self.local.flavor_list()).await
    }

    pub async fn flavor_add(&self, flavor: &Flavor) -> AccessResult<()> {
        self.dispatch("flavor.add", flavor, || self.local.flavor_add(flavor)).await
    }

    pub async fn flavor_update(&self, flavor: &Flavor) -> AccessResult<()> {
        self.dispatch("flavor.update", flavor, || self.local.flavor_update(flavor)).await
    }

    pub async fn flavor_delete(&self, id: &str) -> AccessResult<()> {
        self.dispatch("flavor.delete", &IdRef { id }, || self.local.flavor_delete(id)).await
    }

    pub async fn image_list(&self, host_id: &str) -> AccessResult<Vec<Image>> {
        self.dispatch("image.list", &HostRef { host_id }, || self.local.image_list(host_id)).await
    }

    pub async fn image_add(&self, host_id: &str, image: &Image) -> AccessResult<()> {
        self.dispatch("image.add", &ImageAddBody { host_id, image }, || self.local.image_add(host_id, image)).await
    }

    pub async fn image_update(&self, image: &Image) -> AccessResult<()> {
        self.dispatch("image.update", image, || self.local.image_update(image)).await
    }

    pub async fn image_delete(&self, id: &str) -> AccessResult<()> {
        self.dispatch("image.delete", &IdRef { id }, || self.local.image_delete(id)).await
    }

    pub async fn image_import(
        &self,
        host_id: &str,
        url: &str,
        dest_path: &str,
        name: &str,
        os_variant: &str,
    ) -> AccessResult<String> {
        self.dispatch(
            "image.import",
            &ImageImportBody { host_id, url, dest_path, name, os_variant },
            || self.local.image_import(host_id, url, dest_path, name, os_variant),
        )
        .await
    }

    /// Remote peers reject this action (the file lives on the caller's
    /// machine); the peer's refusal surfaces as a normal action error.
    pub async fn image_upload(
        &self,
        host_id: &str,
        local_path: &str,
        dest_path: &str,
        name: &str,
        os_variant: &str,
    ) -> AccessResult<String> {
        self.dispatch(
            "image.upload",
            &ImageUploadBody { host_id, local_path, dest_path, name, os_variant },
            || self.local.image_upload(host_id, local_path, dest_path, name, os_variant),
        )
        .await
    }

    pub async fn image_import_status(&self) -> AccessResult<Vec<ImportTask>> {
        self.dispatch("image.importStatus", &Empty {}, || self.local.image_import_status()).await
    }

    pub async fn image_source_list(&self) -> AccessResult<Vec<ImageSource>> {
        self.dispatch("imageSource.list", &Empty {}, || self.local.image_source_list()).await
    }

    pub async fn image_source_add(&self, source: &ImageSource) -> AccessResult<()> {
        self.dispatch("imageSource.add", source, || self.local.image_source_add(source)).await
    }

    pub async fn image_source_update(&self, source: &ImageSource) -> AccessResult<()> {
        self.dispatch("imageSource.update", source, || self.local.image_source_update(source)).await
    }

    pub async fn image_source_delete(&self, id: &str) -> AccessResult<()> {
        self.dispatch("imageSource.delete", &IdRef { id }, || self.local.image_source_delete(id)).await
    }

    pub async fn instance_list(&self, host_id: &str) -> AccessResult<Vec<Instance>> {
        self.dispatch("instance.list", &HostRef { host_id }, || self.local.instance_list(host_id)).await
    }

    pub async fn instance_by_vm_name(&self, host_id: &str, vm_name: &str) -> AccessResult<Instance> {
        self.dispatch("instance.byVMName", &VmRef { host_id, vm_name }, || {
            self.local.instance_by_vm_name(host_id, vm_name)
        })
        .await
    }

    pub async fn instance_iso_list(&self, host_id: &str, instance_id: i64) -> AccessResult<Vec<IsoFile>> {
        self.dispatch(
            "instance.isoList",
            &InstanceIsoBody { host_id, instance_id },
            || self.local.instance_iso_list(host_id, instance_id),
        )
        .await
    }

    // ── Settings / audit ──

    pub async fn setting_get(&self, key: &str) -> AccessResult<String> {
        self.dispatch("setting.get", &KeyBody { key }, || self.local.setting_get(key)).await
    }

    pub async fn setting_set(&self, key: &str, value: &str) -> AccessResult<()> {
        self.dispatch("setting.set", &KeyValueBody { key, value }, || self.local.setting_set(key, value)).await
    }

    pub async fn audit_list(&self, host_id: &str, limit: u32) -> AccessResult<Vec<AuditRecord>> {
        self.dispatch("audit.list", &AuditBody { host_id, limit }, || self.local.audit_list(host_id, limit)).await
    }

    pub async fn audit_list_all(&self, limit: u32) -> AccessResult<Vec<AuditRecord>> {
        self.dispatch("audit.listAll", &LimitBody { limit }, || self.local.audit_list_all(limit)).await
    }

    // ── App / tools ──

    pub async fn app_version(&self) -> AccessResult<String> {
        self.dispatch("app.version", &Empty {}, || self.local.app_version()).await
    }

    pub async fn terminal_port(&self) -> AccessResult<u16> {
        self.dispatch("terminal.port", &Empty {}, || self.local.terminal_port()).await
    }

    pub async fn libvirt_setup_scripts(&self) -> AccessResult<Vec<SetupScript>> {
        self.dispatch("libvirt.setupScripts", &Empty {}, || self.local.libvirt_setup_scripts()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::MockLocalBinding;
    use axum::routing::post;
    use axum::{Json, Router};
    use mockall::predicate::eq;
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use virtdeck_core::error::AccessErrorKind;
    use virtdeck_remote::RemoteEndpoint;

    type Seen = Arc<Mutex<Vec<Value>>>;

    fn peer(reply: Value, seen: Seen) -> Router {
        Router::new().route(
            "/v1/api.json",
            post(move |Json(body): Json<Value>| {
                let reply = reply.clone();
                let seen = seen.clone();
                async move {
                    seen.lock().unwrap().push(body);
                    Json(reply)
                }
            }),
        )
    }

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{addr}")
    }

    fn local_backend(mock: MockLocalBinding) -> Backend {
        Backend::new(ModeRegistry::new(), Arc::new(mock))
    }

    /// Backend in remote mode with a mock that panics on any binding call.
    async fn remote_backend(reply: Value, seen: Seen) -> Backend {
        let base = serve(peer(reply, seen)).await;
        let registry = ModeRegistry::new();
        registry
            .switch_to_remote(RemoteEndpoint { base_url: base, token: None })
            .await
            .unwrap();
        Backend::new(registry, Arc::new(MockLocalBinding::new()))
    }

    // ── local routing ──

    #[tokio::test]
    async fn local_mode_routes_to_binding() {
        let mut mock = MockLocalBinding::new();
        mock.expect_vm_list().with(eq("h1")).times(1).returning(|_| {
            Ok(vec![Vm { id: 7, name: "web".into(), state: "running".into(), cpus: 2, memory_mb: 2048, host_id: "h1".into() }])
        });
        let backend = local_backend(mock);

        let vms = backend.vm_list("h1").await.unwrap();
        assert_eq!(vms.len(), 1);
        assert_eq!(vms[0].name, "web");
    }

    #[tokio::test]
    async fn local_mode_passes_composite_arguments_through() {
        let mut mock = MockLocalBinding::new();
        mock.expect_vm_set_memory()
            .with(eq("h1"), eq("web"), eq(4096u64))
            .times(1)
            .returning(|_, _, _| Ok(()));
        mock.expect_vol_create()
            .with(eq("h1"), eq("default"), eq("data"), eq(10u64), eq("qcow2"))
            .times(1)
            .returning(|_, _, _, _, _| Ok("/var/lib/libvirt/images/data.qcow2".into()));
        let backend = local_backend(mock);

        backend.vm_set_memory("h1", "web", 4096).await.unwrap();
        let path = backend.vol_create("h1", "default", "data", 10, "qcow2").await.unwrap();
        assert!(path.ends_with("data.qcow2"));
    }

    #[tokio::test]
    async fn local_errors_pass_through_unchanged() {
        let mut mock = MockLocalBinding::new();
        mock.expect_vm_start()
            .returning(|_, _| Err(virtdeck_core::AccessError::unsupported("no libvirt")));
        let backend = local_backend(mock);

        let err = backend.vm_start("h1", "web").await.unwrap_err();
        assert_eq!(err.kind, AccessErrorKind::Unsupported);
    }

    // ── remote routing ──

    #[tokio::test]
    async fn remote_mode_invokes_peer_once_and_skips_binding() {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let reply = json!({"code": 0, "msg": "success", "data": [
            {"id": 1, "name": "web", "state": "running", "cpus": 2, "memoryMB": 2048, "hostID": "h1"}
        ]});
        // MockLocalBinding has no expectations; any binding call would panic
        let backend = remote_backend(reply, seen.clone()).await;

        let vms = backend.vm_list("h1").await.unwrap();
        assert_eq!(vms.len(), 1);
        assert_eq!(vms[0].host_id, "h1");

        let calls = seen.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0]["action"], "vm.list");
        assert_eq!(calls[0]["data"], json!({"hostId": "h1"}));
    }

    #[tokio::test]
    async fn remote_payloads_match_the_wire_contract() {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let backend = remote_backend(json!({"code": 0, "msg": "success"}), seen.clone()).await;

        backend.host_list().await.unwrap();
        backend.vm_set_memory("h1", "web", 2048).await.unwrap();
        let rule = NatRule {
            proto: "tcp".into(),
            host_port: "8080".into(),
            vm_ip: "192.168.122.10".into(),
            vm_port: "80".into(),
            comment: "web".into(),
        };
        backend.nat_add("h1", &rule).await.unwrap();
        let host = Host { id: "h9".into(), name: "lab".into(), ..Default::default() };
        backend.host_add(&host).await.unwrap();

        let calls = seen.lock().unwrap();
        assert_eq!(calls[0]["action"], "host.list");
        assert_eq!(calls[0]["data"], json!({}));
        assert_eq!(calls[1]["data"], json!({"hostId": "h1", "vmName": "web", "sizeMB": 2048}));
        assert_eq!(
            calls[2]["data"],
            json!({"hostId": "h1", "proto": "tcp", "hostPort": "8080", "vmIP": "192.168.122.10", "vmPort": "80", "comment": "web"})
        );
        assert_eq!(calls[3]["data"]["id"], "h9");
        assert_eq!(calls[3]["data"]["authType"], "");
    }

    #[tokio::test]
    async fn remote_action_error_carries_peer_message() {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let backend = remote_backend(json!({"code": 5, "msg": "boom"}), seen).await;

        let err = backend.vm_start("h1", "web").await.unwrap_err();
        assert_eq!(err.kind, AccessErrorKind::ActionError(5));
        assert_eq!(err.message, "boom");
    }

    #[tokio::test]
    async fn remote_unit_ops_accept_omitted_data() {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let backend = remote_backend(json!({"code": 0, "msg": "success"}), seen).await;

        backend.vm_start("h1", "web").await.unwrap();
        backend.snapshot_create("h1", "web", "pre-upgrade").await.unwrap();
    }

    #[tokio::test]
    async fn switching_modes_redirects_subsequent_calls() {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let base = serve(peer(json!({"code": 0, "msg": "success", "data": "remote-version"}), seen)).await;

        let mut mock = MockLocalBinding::new();
        mock.expect_app_version().times(1).returning(|| Ok("local-version".into()));
        let backend = Backend::new(ModeRegistry::new(), Arc::new(mock));

        backend.registry.switch_to_remote(RemoteEndpoint { base_url: base, token: None }).await.unwrap();
        assert_eq!(backend.app_version().await.unwrap(), "remote-version");

        backend.registry.switch_to_local().await;
        assert_eq!(backend.app_version().await.unwrap(), "local-version");
    }
}
