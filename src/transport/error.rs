//! Transport layer error types.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

use crate::core::{LinkError, NodeId};

/// Address resolution failures.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ResolveError {
    /// `send` was asked for a node id absent from the table.
    /// Surfaced to the caller before any I/O is attempted.
    #[error("destination node id {0} not present in address table")]
    UnknownDestination(NodeId),

    /// An inbound datagram arrived from an address/port absent from the
    /// table. Logged and dropped on the receive path.
    #[error("unknown source address {0}")]
    UnknownSource(SocketAddr),
}

/// Socket-level transport failures.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Binding the local datagram socket failed. Fatal at construction.
    #[error("bind failed on {addr}: {source}")]
    Bind {
        /// Address the bind was attempted on.
        addr: SocketAddr,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A socket read or write failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// The link has been closed; no further sends are accepted.
    #[error("link closed")]
    Closed,
}

/// Result type for transport operations.
pub type LinkResult<T> = Result<T, LinkError>;
