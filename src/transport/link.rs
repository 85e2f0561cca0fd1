//! The transport protocol object: one UDP socket, one receive task.

use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::net::UdpSocket;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use super::error::{LinkResult, ResolveError, TransportError};
use crate::core::{DataIndication, NodeId};
use crate::pdu;
use crate::table::{AddressTable, ConfigError};

/// Identifier-addressed unicast transport over one UDP socket.
///
/// Created with [`open`], which resolves the local endpoint from the
/// table, binds the socket and starts the background receive task. Any
/// number of tasks may call [`send`] concurrently with the receive task
/// and with each other, and [`close`] is safe to race with both.
///
/// Received datagrams are decoded, reverse-resolved against the table and
/// handed to the [`DataIndication`] callback supplied at open time.
/// Malformed or unattributable datagrams are logged and dropped without
/// disturbing the receive task.
///
/// [`open`]: UnilinkTransport::open
/// [`send`]: UnilinkTransport::send
/// [`close`]: UnilinkTransport::close
#[derive(Debug)]
pub struct UnilinkTransport {
    /// Node id of the local endpoint.
    self_id: NodeId,
    /// Identifier-to-address mapping, read-only after construction.
    table: Arc<AddressTable>,
    /// The bound UDP socket, shared with the receive task.
    socket: Arc<UdpSocket>,
    /// True from open until the first close.
    running: Arc<AtomicBool>,
    /// Wakes the receive task out of its blocking receive on close.
    shutdown: Arc<Notify>,
    /// Receive task handle, taken by the first close.
    recv_task: Mutex<Option<JoinHandle<()>>>,
}

impl UnilinkTransport {
    /// Open a transport link bound as `self_id`.
    ///
    /// Looks up the local endpoint in `table`, failing with
    /// [`ConfigError::SelfNotFound`] before any socket is bound, then
    /// binds a UDP socket on the endpoint's port and starts the receive
    /// task that delivers inbound payloads to `user`. A bind failure is
    /// fatal and reported as [`TransportError::Bind`].
    pub async fn open(
        table: AddressTable,
        self_id: NodeId,
        user: Arc<dyn DataIndication>,
    ) -> LinkResult<Self> {
        let self_addr = table
            .lookup(self_id)
            .ok_or(ConfigError::SelfNotFound(self_id))?;

        // Only the port comes from the table; binding the wildcard
        // address keeps the link reachable from other hosts.
        let bind_addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), self_addr.port());
        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|source| TransportError::Bind {
                addr: bind_addr,
                source,
            })?;

        let table = Arc::new(table);
        let socket = Arc::new(socket);
        let running = Arc::new(AtomicBool::new(true));
        let shutdown = Arc::new(Notify::new());

        let recv_task = tokio::spawn(receive_loop(
            Arc::clone(&socket),
            Arc::clone(&table),
            user,
            Arc::clone(&running),
            Arc::clone(&shutdown),
        ));

        debug!(self_id, local = %self_addr, "transport link open");

        Ok(Self {
            self_id,
            table,
            socket,
            running,
            shutdown,
            recv_task: Mutex::new(Some(recv_task)),
        })
    }

    /// Node id this link is bound as.
    pub fn self_id(&self) -> NodeId {
        self.self_id
    }

    /// Local address of the bound socket.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// The address table this link routes with.
    pub fn table(&self) -> &AddressTable {
        &self.table
    }

    /// Send one payload to the node registered as `dest`.
    ///
    /// Fails without touching the network when the link is closed, when
    /// `dest` is absent from the table, or when the framed PDU would be
    /// oversized. On success exactly one datagram leaves the socket.
    pub async fn send(&self, dest: NodeId, payload: &str) -> LinkResult<()> {
        if !self.running.load(Ordering::Acquire) {
            return Err(TransportError::Closed.into());
        }

        let addr = self
            .table
            .lookup(dest)
            .ok_or(ResolveError::UnknownDestination(dest))?;

        let datagram = pdu::encode(payload)?;
        self.socket
            .send_to(&datagram, addr)
            .await
            .map_err(TransportError::from)?;
        Ok(())
    }

    /// Check whether the link has been closed.
    pub fn is_closed(&self) -> bool {
        !self.running.load(Ordering::Acquire)
    }

    /// Close the link.
    ///
    /// Clears the running flag, wakes the receive task out of its
    /// blocking receive and aborts it. Idempotent, non-blocking, and safe
    /// to call concurrently with in-flight `send` calls or the receive
    /// task; the task is not guaranteed to have fully exited by the time
    /// this returns.
    pub fn close(&self) {
        if !self.running.swap(false, Ordering::AcqRel) {
            return;
        }

        self.shutdown.notify_one();
        let handle = self
            .recv_task
            .lock()
            .ok()
            .and_then(|mut guard| guard.take());
        if let Some(handle) = handle {
            handle.abort();
        }

        debug!(self_id = self.self_id, "transport link closed");
    }
}

impl Drop for UnilinkTransport {
    fn drop(&mut self) {
        self.close();
    }
}

/// Background receive loop: one blocking wait per iteration, then
/// decode, reverse-resolve and deliver upward.
async fn receive_loop(
    socket: Arc<UdpSocket>,
    table: Arc<AddressTable>,
    user: Arc<dyn DataIndication>,
    running: Arc<AtomicBool>,
    shutdown: Arc<Notify>,
) {
    // Datagrams longer than the buffer truncate here and fail the
    // length check in decode.
    let mut buf = [0u8; pdu::MAX_PDU_SIZE];

    while running.load(Ordering::Acquire) {
        let (len, addr) = tokio::select! {
            _ = shutdown.notified() => break,
            received = socket.recv_from(&mut buf) => match received {
                Ok(received) => received,
                Err(err) => {
                    // The same I/O failure after close is the expected
                    // shutdown signal and is absorbed silently.
                    if running.load(Ordering::Acquire) {
                        error!(error = %err, "receive failed, stopping receive task");
                    }
                    break;
                }
            },
        };

        if let Err(err) = deliver(&table, user.as_ref(), &buf[..len], addr) {
            debug_assert!(err.is_droppable());
            warn!(from = %addr, error = %err, "dropping inbound datagram");
        }
    }
}

/// Decode one datagram, resolve its sender and hand the payload upward.
///
/// Every error returned here is droppable: the receive loop logs it and
/// keeps running.
fn deliver(
    table: &AddressTable,
    user: &dyn DataIndication,
    datagram: &[u8],
    from: SocketAddr,
) -> LinkResult<()> {
    let payload = pdu::decode(datagram)?;
    let origin = table
        .resolve(from)
        .ok_or(ResolveError::UnknownSource(from))?;
    user.on_data_indication(origin, payload);
    Ok(())
}
