//! Address table construction and lookups.
//!
//! The table maps node identifiers to socket addresses and is built once
//! from a line-oriented configuration source:
//!
//! ```text
//! # node id, host, port
//! 1 localhost 4101
//! 2 192.168.0.7 4102
//! ```
//!
//! Construction is all-or-nothing: the first invalid line aborts with a
//! [`ConfigError`] naming its 1-based line number, and no partial table is
//! exposed. Once built the table is immutable; lookups are read-only and
//! need no synchronization.

use std::collections::HashMap;
use std::io;
use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::core::validate::{self, FieldError};
use crate::core::NodeId;

/// Errors raised while building an [`AddressTable`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration source does not exist.
    #[error("config source not found: {0}")]
    SourceNotFound(String),

    /// Configuration source could not be read.
    #[error("i/o error reading config: {0}")]
    Io(#[from] io::Error),

    /// A line failed the `<id> <host> <port>` grammar or a field rule.
    #[error("config line {line}: {reason}")]
    Malformed {
        /// 1-based line number in the source, counting blank and comment
        /// lines.
        line: usize,
        /// The field rule that failed.
        #[source]
        reason: FieldError,
    },

    /// The local node id is absent from the table.
    #[error("self node id {0} not present in address table")]
    SelfNotFound(NodeId),
}

/// Immutable mapping from node identifier to socket address.
#[derive(Debug, Clone)]
pub struct AddressTable {
    entries: HashMap<NodeId, SocketAddr>,
}

impl AddressTable {
    /// Read and parse a configuration file.
    ///
    /// A missing file is reported as [`ConfigError::SourceNotFound`]; any
    /// other read failure as [`ConfigError::Io`].
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path).await.map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                ConfigError::SourceNotFound(path.display().to_string())
            } else {
                ConfigError::Io(err)
            }
        })?;
        text.parse()
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether `id` is present.
    pub fn contains(&self, id: NodeId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Resolve a node id to its socket address.
    pub fn lookup(&self, id: NodeId) -> Option<SocketAddr> {
        self.entries.get(&id).copied()
    }

    /// Reverse-resolve a socket address to the node id registered for it.
    ///
    /// Matches on exact (address, port) equality. Tables are small, so a
    /// linear scan is fine.
    pub fn resolve(&self, addr: SocketAddr) -> Option<NodeId> {
        self.entries
            .iter()
            .find(|(_, registered)| **registered == addr)
            .map(|(id, _)| *id)
    }

    /// Iterate over all (id, address) entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, SocketAddr)> + '_ {
        self.entries.iter().map(|(id, addr)| (*id, *addr))
    }
}

impl FromStr for AddressTable {
    type Err = ConfigError;

    /// Parse a table from configuration text, one `<id> <host> <port>`
    /// entry per line.
    ///
    /// Blank lines and lines whose first non-whitespace character is `#`
    /// are skipped but still counted for error line numbers. A node id
    /// that appears twice keeps the later entry.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut entries = HashMap::new();

        for (index, raw_line) in input.lines().enumerate() {
            let line = index + 1;
            let text = raw_line.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = text.split_whitespace().collect();
            let &[id, host, port] = fields.as_slice() else {
                return Err(ConfigError::Malformed {
                    line,
                    reason: FieldError::FieldCount(fields.len()),
                });
            };

            let id = validate::node_id(id)
                .map_err(|reason| ConfigError::Malformed { line, reason })?;
            let host = validate::host(host)
                .map_err(|reason| ConfigError::Malformed { line, reason })?;
            let port = validate::port(port)
                .map_err(|reason| ConfigError::Malformed { line, reason })?;

            entries.insert(id, SocketAddr::new(host, port));
        }

        Ok(Self { entries })
    }
}
