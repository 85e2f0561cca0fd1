//! UNILINK transport layer.
//!
//! Owns the address table, the bound UDP socket and the background
//! receive task, and exposes the send operation plus the open/close
//! lifecycle:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        Service layer (callbacks)        │
//! ├─────────────────────────────────────────┤
//! │         Transport Layer                 │  ← this module
//! │   table lookups, PDU framing, lifecycle │
//! ├─────────────────────────────────────────┤
//! │              UDP                        │
//! └─────────────────────────────────────────┘
//! ```

mod error;
mod link;

pub use error::{LinkResult, ResolveError, TransportError};
pub use link::UnilinkTransport;
