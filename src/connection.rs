//! Remote session lifecycle.
//!
//! Switching into Remote mode is connect-verify-rollback: install the
//! client, prove the peer answers `app.version`, and restore Local mode
//! on any failure so the facade never sits on a dead endpoint.

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;
use uuid::Uuid;
use virtdeck_core::{AccessError, AccessResult};
use virtdeck_remote::RemoteEndpoint;

use crate::backend::Backend;
use crate::registry::ConnectionMode;

/// Established link to a remote peer. Carries no credential, so it is
/// safe to display or serialize.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSession {
    pub id: String,
    pub base_url: String,
    /// Peer version reported during verification.
    pub version: String,
    pub connected_at: DateTime<Utc>,
}

impl Backend {
    /// Point the facade at `endpoint` and verify the peer end to end.
    /// Any failure restores Local mode before the error is returned, so
    /// a session only ever exists for a peer that answered.
    pub async fn connect_remote(&self, endpoint: RemoteEndpoint) -> AccessResult<RemoteSession> {
        let base_url = self.registry.switch_to_remote(endpoint).await?;
        match self.app_version().await {
            Ok(version) => {
                let session = RemoteSession {
                    id: Uuid::new_v4().to_string(),
                    base_url,
                    version,
                    connected_at: Utc::now(),
                };
                info!("Verified remote peer {} (version {})", session.base_url, session.version);
                *self.session.write().await = Some(session.clone());
                Ok(session)
            }
            Err(err) => {
                self.session.write().await.take();
                self.registry.switch_to_local().await;
                warn!("Remote peer {} failed verification: {}", base_url, err);
                Err(AccessError::verification(format!("remote verification failed: {err}")))
            }
        }
    }

    /// Drop the session and fall back to the local binding. A no-op when
    /// already local.
    pub async fn disconnect_remote(&self) {
        self.session.write().await.take();
        self.registry.switch_to_local().await;
    }

    pub async fn remote_session(&self) -> Option<RemoteSession> {
        self.session.read().await.clone()
    }

    pub async fn current_mode(&self) -> ConnectionMode {
        self.registry.current_mode().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::MockLocalBinding;
    use crate::registry::ModeRegistry;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use virtdeck_core::AccessErrorKind;

    fn stub(reply: Value) -> Router {
        Router::new().route("/v1/api.json", post(move || async move { Json(reply) }))
    }

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{addr}")
    }

    fn backend() -> Backend {
        Backend::new(ModeRegistry::new(), Arc::new(MockLocalBinding::new()))
    }

    fn endpoint(base: String) -> RemoteEndpoint {
        RemoteEndpoint { base_url: base, token: None }
    }

    #[tokio::test]
    async fn connect_verifies_peer_and_stores_session() {
        let base = serve(stub(json!({"code": 0, "msg": "success", "data": "1.4.0"}))).await;
        let backend = backend();

        let session = backend.connect_remote(endpoint(base.clone())).await.unwrap();
        assert_eq!(session.base_url, base);
        assert_eq!(session.version, "1.4.0");
        assert!(!session.id.is_empty());

        assert_eq!(backend.current_mode().await, ConnectionMode::Remote);
        let held = backend.remote_session().await.unwrap();
        assert_eq!(held.id, session.id);
    }

    #[tokio::test]
    async fn failed_verification_rolls_back_to_local() {
        let base = serve(stub(json!({"code": 5, "msg": "boom"}))).await;
        let backend = backend();

        let err = backend.connect_remote(endpoint(base)).await.unwrap_err();
        assert_eq!(err.kind, AccessErrorKind::VerificationError);
        assert!(err.message.contains("boom"));

        assert_eq!(backend.current_mode().await, ConnectionMode::Local);
        assert!(backend.remote_session().await.is_none());
    }

    #[tokio::test]
    async fn unreachable_peer_rolls_back_to_local() {
        // bind then drop so the port refuses connections
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);
        let backend = backend();

        let err = backend.connect_remote(endpoint(base)).await.unwrap_err();
        assert_eq!(err.kind, AccessErrorKind::VerificationError);
        assert!(err.message.starts_with("remote verification failed"));
        assert_eq!(backend.current_mode().await, ConnectionMode::Local);
    }

    #[tokio::test]
    async fn malformed_endpoint_fails_without_a_session() {
        let backend = backend();
        let err = backend.connect_remote(endpoint("http://[half".into())).await.unwrap_err();
        assert_eq!(err.kind, AccessErrorKind::InvalidEndpoint);
        assert_eq!(backend.current_mode().await, ConnectionMode::Local);
        assert!(backend.remote_session().await.is_none());
    }

    #[tokio::test]
    async fn failed_reconnect_clears_previous_session() {
        let good = serve(stub(json!({"code": 0, "msg": "success", "data": "1.4.0"}))).await;
        let bad = serve(stub(json!({"code": 1, "msg": "denied"}))).await;
        let backend = backend();

        backend.connect_remote(endpoint(good)).await.unwrap();
        backend.connect_remote(endpoint(bad)).await.unwrap_err();

        assert_eq!(backend.current_mode().await, ConnectionMode::Local);
        assert!(backend.remote_session().await.is_none());
    }

    #[tokio::test]
    async fn reconnect_replaces_the_session() {
        let a = serve(stub(json!({"code": 0, "msg": "success", "data": "1.4.0"}))).await;
        let b = serve(stub(json!({"code": 0, "msg": "success", "data": "1.5.0"}))).await;
        let backend = backend();

        let first = backend.connect_remote(endpoint(a)).await.unwrap();
        let second = backend.connect_remote(endpoint(b.clone())).await.unwrap();
        assert_ne!(first.id, second.id);

        let held = backend.remote_session().await.unwrap();
        assert_eq!(held.base_url, b);
        assert_eq!(held.version, "1.5.0");
    }

    #[tokio::test]
    async fn disconnect_clears_session_and_is_idempotent() {
        let base = serve(stub(json!({"code": 0, "msg": "success", "data": "1.4.0"}))).await;
        let backend = backend();

        backend.connect_remote(endpoint(base)).await.unwrap();
        backend.disconnect_remote().await;
        assert_eq!(backend.current_mode().await, ConnectionMode::Local);
        assert!(backend.remote_session().await.is_none());

        backend.disconnect_remote().await;
        assert_eq!(backend.current_mode().await, ConnectionMode::Local);
    }
}
