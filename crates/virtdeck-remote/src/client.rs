//! HTTP client for the remote management peer.
//!
//! The peer exposes a single JSON endpoint: every operation is a POST to
//! `/v1/api.json` carrying `{"action": "...", "data": {...}}`, answered with
//! `{"code": 0, "msg": "success", "data": ...}`. Nonzero codes carry the
//! peer's error text in `msg`. Streaming surfaces (terminal, VNC) hang off
//! the same base address as WebSocket paths with the credential passed as a
//! `token` query parameter.

use log::{debug, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;
use virtdeck_core::error::{AccessError, AccessResult};

use crate::types::{ActionRequest, ActionResponse, RemoteEndpoint};

/// Low-level HTTP transport for management actions.
pub struct RemoteClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl RemoteClient {
    /// Build a client from connection settings. The base address is
    /// normalised (scheme defaulted to https, trailing slash trimmed) and
    /// validated up front so a bad endpoint fails at switch time, not on
    /// the first call.
    pub fn new(endpoint: RemoteEndpoint) -> AccessResult<Self> {
        let mut base = endpoint.base_url.trim().trim_end_matches('/').to_string();
        if !base.starts_with("http://") && !base.starts_with("https://") {
            base = format!("https://{base}");
        }
        Url::parse(&base)?;

        let client = Client::builder()
            .build()
            .map_err(|e| AccessError::connection(format!("Failed to build HTTP client: {e}")))?;

        let token = endpoint.token.filter(|t| !t.is_empty());

        Ok(Self { client, base_url: base, token })
    }

    /// The normalised base address.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Invoke one action and decode its result. An absent or null `data`
    /// decodes to `T::default()` since the peer omits `data` for nil
    /// results and marshals empty lists as null.
    pub async fn invoke<P, T>(&self, action: &str, payload: &P) -> AccessResult<T>
    where
        P: Serialize,
        T: DeserializeOwned + Default,
    {
        let url = format!("{}/v1/api.json", self.base_url);
        debug!("VirtDeck API → {} action={}", url, action);

        let mut req = self
            .client
            .post(&url)
            .json(&ActionRequest { action, data: payload });
        if let Some(ref token) = self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!("VirtDeck API error {} action={}: {}", status, action, body);
            return Err(AccessError::transport(
                status.as_u16(),
                format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("unknown status")
                ),
            ));
        }

        let envelope: ActionResponse = resp.json().await?;
        debug!("VirtDeck API ← action={} code={}", action, envelope.code);

        if envelope.code != 0 {
            let msg = if envelope.msg.is_empty() {
                "remote call failed".to_string()
            } else {
                envelope.msg
            };
            return Err(AccessError::action(envelope.code, msg));
        }

        let value: Option<T> = serde_json::from_value(envelope.data)?;
        Ok(value.unwrap_or_default())
    }

    /// Derive a WebSocket URL on the same peer. `params` become the query
    /// string; when a credential is configured it is appended as `token`,
    /// replacing any caller-supplied value.
    pub fn streaming_url(&self, path: &str, params: &[(&str, &str)]) -> AccessResult<String> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))?;
        let scheme = if url.scheme() == "https" { "wss" } else { "ws" };
        url.set_scheme(scheme).map_err(|_| {
            AccessError::invalid_endpoint(format!(
                "Cannot derive WebSocket URL from {}",
                self.base_url
            ))
        })?;
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in params {
                if *key == "token" && self.token.is_some() {
                    continue;
                }
                query.append_pair(key, value);
            }
            if let Some(ref token) = self.token {
                query.append_pair("token", token);
            }
        }
        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde::Deserialize;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use virtdeck_core::error::AccessErrorKind;

    type Seen = Arc<Mutex<Vec<(Option<String>, Value)>>>;

    fn peer(reply: Value, seen: Seen) -> Router {
        Router::new().route(
            "/v1/api.json",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let reply = reply.clone();
                let seen = seen.clone();
                async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|h| h.to_str().ok())
                        .map(String::from);
                    seen.lock().unwrap().push((auth, body));
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

    fn endpoint(base: String, token: Option<&str>) -> RemoteEndpoint {
        RemoteEndpoint { base_url: base, token: token.map(String::from) }
    }

    #[derive(Debug, Default, Deserialize)]
    struct Probe {
        x: i64,
    }

    // ── invoke ──

    #[tokio::test]
    async fn invoke_sends_envelope_and_decodes_data() {
        let seen: Seen = Arc::default();
        let base = serve(peer(json!({"code": 0, "msg": "success", "data": {"x": 1}}), seen.clone())).await;
        let client = RemoteClient::new(endpoint(base, Some("tok"))).unwrap();

        let probe: Probe = client.invoke("vm.list", &json!({"hostId": "h1"})).await.unwrap();
        assert_eq!(probe.x, 1);

        let calls = seen.lock().unwrap();
        let (auth, body) = &calls[0];
        assert_eq!(auth.as_deref(), Some("Bearer tok"));
        assert_eq!(body["action"], "vm.list");
        assert_eq!(body["data"]["hostId"], "h1");
    }

    #[tokio::test]
    async fn invoke_without_token_sends_no_auth_header() {
        let seen: Seen = Arc::default();
        let base = serve(peer(json!({"code": 0, "msg": "success"}), seen.clone())).await;
        let client = RemoteClient::new(endpoint(base, None)).unwrap();

        let _: () = client.invoke("vm.start", &json!({"hostId": "h1", "vmName": "web"})).await.unwrap();

        let calls = seen.lock().unwrap();
        assert!(calls[0].0.is_none());
    }

    #[tokio::test]
    async fn nonzero_code_maps_to_action_error() {
        let seen: Seen = Arc::default();
        let base = serve(peer(json!({"code": 5, "msg": "boom"}), seen)).await;
        let client = RemoteClient::new(endpoint(base, None)).unwrap();

        let err = client.invoke::<_, ()>("vm.start", &json!({})).await.unwrap_err();
        assert_eq!(err.kind, AccessErrorKind::ActionError(5));
        assert_eq!(err.message, "boom");
    }

    #[tokio::test]
    async fn empty_msg_gets_fallback_text() {
        let seen: Seen = Arc::default();
        let base = serve(peer(json!({"code": 1, "msg": ""}), seen)).await;
        let client = RemoteClient::new(endpoint(base, None)).unwrap();

        let err = client.invoke::<_, ()>("vm.start", &json!({})).await.unwrap_err();
        assert_eq!(err.message, "remote call failed");
    }

    #[tokio::test]
    async fn missing_data_decodes_to_default() {
        let seen: Seen = Arc::default();
        let base = serve(peer(json!({"code": 0, "msg": "success"}), seen)).await;
        let client = RemoteClient::new(endpoint(base, None)).unwrap();

        let list: Vec<i64> = client.invoke("vm.list", &json!({"hostId": "h1"})).await.unwrap();
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn http_failure_maps_to_transport_error() {
        let app = Router::new().route(
            "/v1/api.json",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "nope") }),
        );
        let base = serve(app).await;
        let client = RemoteClient::new(endpoint(base, None)).unwrap();

        let err = client.invoke::<_, ()>("vm.list", &json!({})).await.unwrap_err();
        assert_eq!(err.kind, AccessErrorKind::TransportError(500));
        assert!(err.message.contains("HTTP 500"));
    }

    // ── streaming_url ──

    #[test]
    fn https_base_yields_wss_with_token_last() {
        let client = RemoteClient::new(endpoint("https://10.0.0.5:8443".into(), Some("tok"))).unwrap();
        let url = client
            .streaming_url("/ws/terminal", &[("hostId", "h1"), ("vmName", "web")])
            .unwrap();
        assert_eq!(url, "wss://10.0.0.5:8443/ws/terminal?hostId=h1&vmName=web&token=tok");
    }

    #[test]
    fn http_base_yields_ws_without_token() {
        let client = RemoteClient::new(endpoint("http://127.0.0.1:8090/".into(), None)).unwrap();
        let url = client.streaming_url("/ws/vnc", &[("hostId", "h1")]).unwrap();
        assert_eq!(url, "ws://127.0.0.1:8090/ws/vnc?hostId=h1");
    }

    #[test]
    fn configured_token_overrides_caller_value() {
        let client = RemoteClient::new(endpoint("http://peer:8090".into(), Some("mine"))).unwrap();
        let url = client
            .streaming_url("/ws/terminal", &[("token", "theirs"), ("hostId", "h1")])
            .unwrap();
        assert!(url.ends_with("?hostId=h1&token=mine"));
        assert!(!url.contains("theirs"));
    }

    #[test]
    fn schemeless_base_defaults_to_https() {
        let client = RemoteClient::new(endpoint("peer.lab:8443".into(), None)).unwrap();
        assert_eq!(client.base_url(), "https://peer.lab:8443");
        let url = client.streaming_url("/ws/vnc", &[]).unwrap();
        assert!(url.starts_with("wss://peer.lab:8443/ws/vnc"));
    }

    #[test]
    fn empty_token_is_treated_as_absent() {
        let client = RemoteClient::new(endpoint("http://peer:8090".into(), Some(""))).unwrap();
        let url = client.streaming_url("/ws/terminal", &[("hostId", "h1")]).unwrap();
        assert!(!url.contains("token="));
    }
}
