//! Thin pass-through service layer above the transport.
//!
//! [`ServiceUser`] is the upward callback holder for the two-phase wiring
//! the construction order requires: the transport needs its callback at
//! open time, while the callback's send side needs the opened transport.
//! Construct the holder first, open the transport with it, then
//! [`bind`](ServiceUser::bind) the transport back in: an ordinary
//! acyclic builder sequence, not an object cycle.

use std::sync::{Arc, OnceLock};

use thiserror::Error;
use tracing::info;

use crate::core::{DataIndication, LinkError, NodeId};
use crate::transport::UnilinkTransport;

/// Errors from the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// `send` was called before [`ServiceUser::bind`].
    #[error("service user not bound to a transport yet")]
    NotBound,

    /// The underlying transport failed.
    #[error(transparent)]
    Link(#[from] LinkError),
}

/// Pass-through service access point.
///
/// Forwards sends down to the bound transport and logs indications
/// coming up from it. Applications that want richer indication handling
/// compose their own [`DataIndication`] around this type.
pub struct ServiceUser {
    /// Node id this service user speaks as.
    self_id: NodeId,
    /// Transport reference, bound once after the transport is open.
    link: OnceLock<Arc<UnilinkTransport>>,
}

impl ServiceUser {
    /// Create an unbound service user for `self_id`.
    pub fn new(self_id: NodeId) -> Self {
        Self {
            self_id,
            link: OnceLock::new(),
        }
    }

    /// Node id this service user speaks as.
    pub fn self_id(&self) -> NodeId {
        self.self_id
    }

    /// Bind the opened transport into this service user.
    ///
    /// The first bound transport wins; later calls are ignored.
    pub fn bind(&self, link: Arc<UnilinkTransport>) {
        let _ = self.link.set(link);
    }

    /// Check whether a transport has been bound.
    pub fn is_bound(&self) -> bool {
        self.link.get().is_some()
    }

    /// Send a payload to `dest` through the bound transport.
    pub async fn send(&self, dest: NodeId, payload: &str) -> Result<(), ServiceError> {
        let link = self.link.get().ok_or(ServiceError::NotBound)?;
        link.send(dest, payload).await?;
        Ok(())
    }
}

impl DataIndication for ServiceUser {
    fn on_data_indication(&self, origin: NodeId, payload: String) {
        info!(self_id = self.self_id, origin, payload = %payload, "data indication");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_before_bind_fails() {
        let user = ServiceUser::new(1);
        assert!(!user.is_bound());

        let err = user.send(2, "hello").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotBound));
    }

    #[test]
    fn test_indication_does_not_require_binding() {
        // The receive side works during the wiring gap between open and
        // bind; nothing here may panic.
        let user = ServiceUser::new(1);
        user.on_data_indication(2, "early".to_owned());
    }
}
