//! Wire types for the remote management endpoint.

use serde::{Deserialize, Serialize};

/// Connection settings for a remote management peer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteEndpoint {
    /// Base address including scheme, e.g. "http://198.51.100.7:8090"
    pub base_url: String,
    /// Bearer credential; absent or empty disables auth
    #[serde(default)]
    pub token: Option<String>,
}

/// Request envelope: every call is `{"action": ..., "data": {...}}`.
#[derive(Debug, Serialize)]
pub struct ActionRequest<'a, P> {
    pub action: &'a str,
    pub data: &'a P,
}

/// Response envelope. `code == 0` means success; the peer omits `data`
/// for nil results, so both `msg` and `data` decode leniently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_envelope_shape() {
        let payload = json!({"hostId": "h1"});
        let req = ActionRequest { action: "vm.list", data: &payload };
        let encoded = serde_json::to_value(&req).unwrap();
        assert_eq!(encoded, json!({"action": "vm.list", "data": {"hostId": "h1"}}));
    }

    #[test]
    fn response_decodes_without_data() {
        let resp: ActionResponse = serde_json::from_str(r#"{"code":0,"msg":"success"}"#).unwrap();
        assert_eq!(resp.code, 0);
        assert!(resp.data.is_null());
    }

    #[test]
    fn response_decodes_without_msg() {
        let resp: ActionResponse = serde_json::from_str(r#"{"code":1}"#).unwrap();
        assert_eq!(resp.code, 1);
        assert!(resp.msg.is_empty());
    }
}
