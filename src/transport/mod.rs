//! Transport Abstraction
//!
//! The engine exchanges plain melody text with a remote peer through an
//! opaque byte channel. On the device this is a wireless characteristic;
//! on the host it is the in-memory [`BufferChannel`]. Writes are
//! best-effort and unacknowledged, reads truncate to the caller's buffer.

use crate::config::MELODY_PAYLOAD_BUFFER;

/// Opaque byte-buffer channel to the remote peer.
pub trait Transport {
    /// Copy whatever inbound bytes are available into `buf`, returning the
    /// number of bytes written. Data beyond `buf.len()` is dropped.
    fn read(&mut self, buf: &mut [u8]) -> usize;

    /// Send a payload toward the peer. Fire-and-forget: failures are
    /// neither detected nor retried.
    fn write(&mut self, payload: &[u8]);

    /// Whether new inbound data arrived since the last [`read`](Self::read).
    fn has_pending_write(&mut self) -> bool;
}

/// In-memory [`Transport`] with the characteristic's buffer semantics:
/// a bounded inbound buffer, a pending flag cleared on read, and the most
/// recent outbound payload captured for inspection.
#[derive(Debug, Default)]
pub struct BufferChannel {
    inbound: Vec<u8>,
    pending: bool,
    outbound: Option<Vec<u8>>,
}

impl BufferChannel {
    /// Create an empty channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the peer writing melody text to the device. Input longer
    /// than the characteristic buffer is truncated, like the real link.
    pub fn push_inbound(&mut self, bytes: &[u8]) {
        let take = bytes.len().min(MELODY_PAYLOAD_BUFFER);
        self.inbound = bytes[..take].to_vec();
        self.pending = true;
    }

    /// The most recent payload the engine sent outward, if any.
    pub fn last_outbound(&self) -> Option<&[u8]> {
        self.outbound.as_deref()
    }
}

impl Transport for BufferChannel {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        self.pending = false;
        let take = self.inbound.len().min(buf.len());
        buf[..take].copy_from_slice(&self.inbound[..take]);
        take
    }

    fn write(&mut self, payload: &[u8]) {
        self.outbound = Some(payload.to_vec());
    }

    fn has_pending_write(&mut self) -> bool {
        self.pending
    }
}
