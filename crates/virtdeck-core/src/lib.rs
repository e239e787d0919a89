//! # VirtDeck – Core Model
//!
//! Data model and error taxonomy shared by the dispatch facade and the
//! remote transport client.
//!
//! ## Modules
//!
//! - **types** — Shared data structures (hosts, VMs, storage, networking, catalog)
//! - **error** — Unified error type used across local and remote paths

pub mod error;
pub mod types;

pub use error::{AccessError, AccessErrorKind, AccessResult};
