//! # UNILINK
//!
//! **U**nicast **N**ode **I**dentifier **LINK**
//!
//! UNILINK is a minimal identifier-addressed datagram transport over UDP.
//! It lets several logical service access points exchange short text
//! payloads by small numeric node identifier instead of raw socket
//! addresses. It provides:
//!
//! - **Addressing**: an immutable [`AddressTable`] built once from a
//!   line-oriented configuration source
//! - **Framing**: a length-checked text PDU (see [`pdu`]) capped at 1024
//!   bytes on the wire
//! - **Delivery**: a background receive task that decodes inbound
//!   datagrams and hands payloads to an upward [`DataIndication`] callback
//! - **Lifecycle**: an open/send/close surface safe for concurrent use
//!
//! There is deliberately no reliability, no ordering, no multiplexing, no
//! encryption and no flow control: one datagram in, at most one
//! indication out.
//!
//! ## Modules
//!
//! - [`core`]: node identifiers, the upward delivery contract, field
//!   validation, and the top-level error type
//! - [`table`]: address table construction and lookups
//! - [`pdu`]: PDU encoding/decoding
//! - [`transport`]: the transport link (socket, send path, receive task)
//! - [`service`]: the pass-through service layer with two-phase wiring
//! - [`worker`]: role-tagged worker composed from the transport
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use unilink::prelude::*;
//!
//! struct PrintSink;
//!
//! impl DataIndication for PrintSink {
//!     fn on_data_indication(&self, origin: NodeId, payload: String) {
//!         println!("from {origin}: {payload}");
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), LinkError> {
//!     let table: AddressTable = "1 localhost 4101\n2 localhost 4102".parse()?;
//!     let link = UnilinkTransport::open(table, 1, Arc::new(PrintSink)).await?;
//!
//!     link.send(2, "hello").await?;
//!     link.close();
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod core;
pub mod pdu;
pub mod service;
pub mod table;
pub mod transport;
pub mod worker;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::validate::FieldError;
    pub use crate::core::{DataIndication, LinkError, NodeId};
    pub use crate::pdu::FramingError;
    pub use crate::service::{ServiceError, ServiceUser};
    pub use crate::table::{AddressTable, ConfigError};
    pub use crate::transport::{LinkResult, ResolveError, TransportError, UnilinkTransport};
    pub use crate::worker::Worker;
}

// Re-export commonly used items at crate root
pub use crate::core::{DataIndication, LinkError, NodeId};
pub use crate::table::{AddressTable, ConfigError};
pub use crate::transport::{ResolveError, TransportError, UnilinkTransport};
