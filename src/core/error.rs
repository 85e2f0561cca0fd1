//! Top-level error type for the UNILINK crate.

use thiserror::Error;

use crate::pdu::FramingError;
use crate::table::ConfigError;
use crate::transport::{ResolveError, TransportError};

/// Top-level UNILINK errors.
///
/// Each layer defines its own error enum; this type aggregates them so
/// callers can hold one error across configuration, framing, resolution
/// and socket failures.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Configuration error (table construction or self lookup).
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// PDU framing error.
    #[error("framing error: {0}")]
    Framing(#[from] FramingError),

    /// Address resolution error.
    #[error("address resolution error: {0}")]
    Resolve(#[from] ResolveError),

    /// Socket-level transport error.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

impl LinkError {
    /// Check if this error is logged-and-dropped on the receive path.
    ///
    /// Inbound datagrams that fail framing or arrive from an address
    /// absent from the table never terminate the receive task; the
    /// datagram is discarded and the loop keeps running.
    pub fn is_droppable(&self) -> bool {
        matches!(
            self,
            LinkError::Framing(_) | LinkError::Resolve(ResolveError::UnknownSource(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_droppable_errors() {
        let framing = LinkError::from(FramingError::BadHeader);
        assert!(framing.is_droppable());

        let source = LinkError::from(ResolveError::UnknownSource(
            "127.0.0.1:4242".parse().expect("test addr"),
        ));
        assert!(source.is_droppable());

        let dest = LinkError::from(ResolveError::UnknownDestination(9));
        assert!(!dest.is_droppable());

        let io = LinkError::from(TransportError::Io(io::Error::other("boom")));
        assert!(!io.is_droppable());

        let config = LinkError::from(ConfigError::SelfNotFound(3));
        assert!(!config.is_droppable());
    }
}
