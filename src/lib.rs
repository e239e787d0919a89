//! # VirtDeck – Dual-Mode Dispatch
//!
//! Uniform call surface over a local helper binding and a remote
//! JSON-action peer. Applications hold one [`Backend`] and invoke the
//! same operations in either mode; where a call lands is decided per
//! call by the [`registry::ModeRegistry`].
//!
//! ## Modules
//!
//! - **registry** — Connection mode state, remote client install/teardown
//! - **binding** — `LocalBinding` trait the in-process helper implements
//! - **backend** — The dispatch facade carrying every operation
//! - **connection** — Remote session lifecycle (connect, verify, rollback)
//! - **streams** — ws/wss URL derivation for terminal and VNC streams

pub mod registry;
pub mod binding;
mod payload;
pub mod backend;
pub mod connection;
pub mod streams;

pub use backend::{Backend, BackendHandle};
pub use binding::LocalBinding;
pub use connection::RemoteSession;
pub use registry::{ConnectionMode, ModeRegistry};

pub use virtdeck_core::{types, AccessError, AccessErrorKind, AccessResult};
pub use virtdeck_remote::{RemoteClient, RemoteEndpoint};
