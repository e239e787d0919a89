//! Connection mode registry.
//!
//! The active [`RemoteClient`] doubles as the mode state: `None` means every
//! operation runs against the local helper binding, `Some` means it goes to
//! the remote peer. Keeping the whole state in one `Option` makes a mode
//! switch a single atomic replace; calls already in flight finish against
//! whichever client they resolved.

use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use virtdeck_core::error::AccessResult;
use virtdeck_remote::{RemoteClient, RemoteEndpoint};

/// Which path operations currently take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionMode {
    Local,
    Remote,
}

/// Holds the active remote client, if any.
pub struct ModeRegistry {
    client: RwLock<Option<Arc<RemoteClient>>>,
}

impl ModeRegistry {
    pub fn new() -> Self {
        Self { client: RwLock::new(None) }
    }

    /// Construct a client for `endpoint` and make it the active one.
    /// Replaces any previous client; repeat switches are safe. Returns
    /// the normalized base URL the client will talk to.
    pub async fn switch_to_remote(&self, endpoint: RemoteEndpoint) -> AccessResult<String> {
        let client = Arc::new(RemoteClient::new(endpoint)?);
        let base = client.base_url().to_string();
        *self.client.write().await = Some(client);
        info!("Switched to remote mode: {}", base);
        Ok(base)
    }

    /// Drop the active client, falling back to the local binding. A no-op
    /// when already local.
    pub async fn switch_to_local(&self) {
        let mut guard = self.client.write().await;
        if guard.take().is_some() {
            info!("Switched to local mode");
        }
    }

    pub async fn current_mode(&self) -> ConnectionMode {
        if self.client.read().await.is_some() {
            ConnectionMode::Remote
        } else {
            ConnectionMode::Local
        }
    }

    /// The active client, cloned out so no lock is held across awaits.
    pub async fn active_client(&self) -> Option<Arc<RemoteClient>> {
        self.client.read().await.clone()
    }
}

impl Default for ModeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(base: &str) -> RemoteEndpoint {
        RemoteEndpoint { base_url: base.into(), token: None }
    }

    #[tokio::test]
    async fn starts_in_local_mode() {
        let registry = ModeRegistry::new();
        assert_eq!(registry.current_mode().await, ConnectionMode::Local);
        assert!(registry.active_client().await.is_none());
    }

    #[tokio::test]
    async fn switch_to_remote_installs_client() {
        let registry = ModeRegistry::new();
        let base = registry.switch_to_remote(endpoint("http://10.0.0.5:8090")).await.unwrap();
        assert_eq!(base, "http://10.0.0.5:8090");
        assert_eq!(registry.current_mode().await, ConnectionMode::Remote);
        let client = registry.active_client().await.unwrap();
        assert_eq!(client.base_url(), "http://10.0.0.5:8090");
    }

    #[tokio::test]
    async fn switch_to_local_discards_client() {
        let registry = ModeRegistry::new();
        registry.switch_to_remote(endpoint("http://10.0.0.5:8090")).await.unwrap();
        registry.switch_to_local().await;
        assert_eq!(registry.current_mode().await, ConnectionMode::Local);
        assert!(registry.active_client().await.is_none());
    }

    #[tokio::test]
    async fn repeated_switches_are_idempotent() {
        let registry = ModeRegistry::new();
        registry.switch_to_local().await;
        registry.switch_to_local().await;
        assert_eq!(registry.current_mode().await, ConnectionMode::Local);

        registry.switch_to_remote(endpoint("http://a:1")).await.unwrap();
        registry.switch_to_remote(endpoint("http://b:2")).await.unwrap();
        assert_eq!(registry.current_mode().await, ConnectionMode::Remote);
        let client = registry.active_client().await.unwrap();
        assert_eq!(client.base_url(), "http://b:2");
    }

    #[tokio::test]
    async fn bad_endpoint_fails_switch_and_keeps_local() {
        let registry = ModeRegistry::new();
        let err = registry.switch_to_remote(endpoint("http://[half")).await.unwrap_err();
        assert!(err.to_string().contains("InvalidEndpoint"));
        assert_eq!(registry.current_mode().await, ConnectionMode::Local);
    }

    #[test]
    fn mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ConnectionMode::Local).unwrap(), "\"local\"");
        assert_eq!(serde_json::to_string(&ConnectionMode::Remote).unwrap(), "\"remote\"");
    }
}
