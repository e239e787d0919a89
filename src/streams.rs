//! WebSocket URL derivation for the terminal and VNC streams.
//!
//! Streams bypass the action envelope: callers get a ws/wss URL and open
//! it themselves. In Remote mode the URL points at the peer (credential
//! appended); in Local mode it points at the in-process bridge listening
//! on the loopback port the binding reports.

use url::Url;
use virtdeck_core::AccessResult;

use crate::backend::Backend;

impl Backend {
    /// URL for the interactive serial/SSH terminal stream.
    pub async fn terminal_ws_url(&self, params: &[(&str, &str)]) -> AccessResult<String> {
        self.stream_url("/ws/terminal", params).await
    }

    /// URL for the VNC console stream.
    pub async fn vnc_ws_url(&self, params: &[(&str, &str)]) -> AccessResult<String> {
        self.stream_url("/ws/vnc", params).await
    }

    /// One loopback bridge serves both stream paths, so Local mode asks
    /// the binding for its port once per call and never goes through
    /// [`Backend::dispatch`].
    async fn stream_url(&self, path: &str, params: &[(&str, &str)]) -> AccessResult<String> {
        match self.registry.active_client().await {
            Some(client) => client.streaming_url(path, params),
            None => {
                let port = self.local.terminal_port().await?;
                let mut url = Url::parse(&format!("ws://127.0.0.1:{port}{path}"))?;
                {
                    let mut query = url.query_pairs_mut();
                    for (key, value) in params {
                        query.append_pair(key, value);
                    }
                }
                Ok(url.to_string())
            }
        }
    }
}
