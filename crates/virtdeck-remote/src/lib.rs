//! # VirtDeck – Remote Transport
//!
//! HTTP client for a remote VirtDeck management peer. The peer speaks a
//! single-endpoint JSON protocol (`POST /v1/api.json` with an action
//! envelope) plus WebSocket paths for terminal and VNC streams.
//!
//! ## Modules
//!
//! - **types** — Endpoint settings and the action envelope
//! - **client** — The HTTP action client and WebSocket URL derivation

pub mod client;
pub mod types;

pub use client::RemoteClient;
pub use types::{ActionRequest, ActionResponse, RemoteEndpoint};
