//! Transport seam.
//!
//! The replication layer only needs an ordered, reliable channel of text
//! frames. Sessions take the transport by value, so there is no global
//! connection object.

use std::future::Future;

use tokio::sync::mpsc;

use crate::error::{NetError, NetResult};

/// An ordered, reliable, bidirectional frame channel.
pub trait Transport: Send {
    /// Queue a frame for the peer.
    fn send(&mut self, frame: String) -> NetResult<()>;

    /// Wait for the next frame. `None` once the peer has gone away.
    fn recv(&mut self) -> impl Future<Output = Option<String>> + Send;
}

/// In-memory transport backed by tokio channels.
///
/// ```
/// use duel_engine::net::{ChannelTransport, Transport};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let (mut a, mut b) = ChannelTransport::pair();
/// a.send("ping".to_string()).unwrap();
/// assert_eq!(b.recv().await.as_deref(), Some("ping"));
/// # });
/// ```
#[derive(Debug)]
pub struct ChannelTransport {
    tx: mpsc::UnboundedSender<String>,
    rx: mpsc::UnboundedReceiver<String>,
}

impl ChannelTransport {
    /// Two connected endpoints.
    #[must_use]
    pub fn pair() -> (Self, Self) {
        let (a_tx, b_rx) = mpsc::unbounded_channel();
        let (b_tx, a_rx) = mpsc::unbounded_channel();
        (
            Self { tx: a_tx, rx: a_rx },
            Self { tx: b_tx, rx: b_rx },
        )
    }
}

impl Transport for ChannelTransport {
    fn send(&mut self, frame: String) -> NetResult<()> {
        self.tx.send(frame).map_err(|_| NetError::Disconnected)
    }

    async fn recv(&mut self) -> Option<String> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_frames_arrive_in_order() {
        let (mut a, mut b) = ChannelTransport::pair();
        for i in 0..5 {
            a.send(i.to_string()).unwrap();
        }
        for i in 0..5 {
            assert_eq!(b.recv().await, Some(i.to_string()));
        }
    }

    #[tokio::test]
    async fn test_dropped_peer_disconnects() {
        let (mut a, b) = ChannelTransport::pair();
        drop(b);
        assert!(matches!(a.send("x".to_string()), Err(NetError::Disconnected)));
        assert_eq!(a.recv().await, None);
    }
}
