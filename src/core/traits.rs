//! Service contract between the transport and the layer above it.

use super::NodeId;

/// Upward delivery contract for received payloads.
///
/// The transport's receive task calls
/// [`on_data_indication`](DataIndication::on_data_indication) once per
/// well-formed datagram from a resolvable sender. The call happens
/// synchronously on the receive task, so a slow implementation directly
/// throttles further datagram reception: keep the body fast or hand the
/// work off to another task.
///
/// Implementations must not assume any particular task identity beyond
/// "the receive task of one transport link".
pub trait DataIndication: Send + Sync + 'static {
    /// Deliver one received payload and the node id it was sent from.
    fn on_data_indication(&self, origin: NodeId, payload: String);
}
