//! Role-tagged worker composed from the transport.
//!
//! One parameterized type stands in for a family of per-role workers:
//! the role is a plain label, the endpoint fields are validated once at
//! construction, and the transport is composed in rather than inherited
//! from.

use std::net::IpAddr;
use std::sync::Arc;

use tracing::info;

use crate::core::validate::{self, FieldError};
use crate::core::{DataIndication, NodeId};
use crate::table::AddressTable;
use crate::transport::{LinkResult, UnilinkTransport};

/// A role-tagged node endpoint.
///
/// Validation happens here, once: a constructed worker always carries a
/// usable id/host/port triple.
#[derive(Debug, Clone)]
pub struct Worker {
    /// Role label, used only for logs.
    role: String,
    id: NodeId,
    host: IpAddr,
    port: u16,
}

impl Worker {
    /// Validate the endpoint fields and build a worker tagged `role`.
    pub fn new(
        role: impl Into<String>,
        id: NodeId,
        host: &str,
        port: u16,
    ) -> Result<Self, FieldError> {
        validate::check_node_id(id)?;
        let host = validate::host(host)?;
        validate::check_port(port)?;

        Ok(Self {
            role: role.into(),
            id,
            host,
            port,
        })
    }

    /// Role label of this worker.
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Node id of this worker.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Validated host address.
    pub fn host(&self) -> IpAddr {
        self.host
    }

    /// Validated port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Open a transport link for this worker's id, delivering received
    /// payloads to `user`.
    pub async fn open(
        &self,
        table: AddressTable,
        user: Arc<dyn DataIndication>,
    ) -> LinkResult<UnilinkTransport> {
        info!(
            role = %self.role,
            id = self.id,
            host = %self.host,
            port = self.port,
            "starting worker"
        );
        UnilinkTransport::open(table, self.id, user).await
    }
}
