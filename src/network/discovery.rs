use std::sync::Arc;

use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::core::{Error, Result};
use crate::protocol::{marshal, Message};
use crate::util::hex_dump;
use super::{Uhppote, RECV_BUFFER_SIZE};

impl Uhppote {
    /// Broadcasts a request and collects every datagram that arrives within
    /// the broadcast window.
    ///
    /// Replies are returned raw, in arrival order, for the caller to decode.
    /// Zero replies is not an error.
    pub async fn broadcast<Rq: Message>(&self, request: &Rq) -> Result<Vec<Vec<u8>>> {
        let frame = marshal(request)?;
        let dest = self.config.broadcast_addr;

        debug!(bytes = frame.len(), %dest, "broadcast\n{}", hex_dump(&frame));

        let socket = Arc::new(self.open_socket()?);

        let sent = socket
            .send_to(&frame, dest)
            .await
            .map_err(|e| Error::transport("Failed to write to UDP socket", e))?;
        trace!(sent, "sent");

        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let reader = tokio::spawn(collect(Arc::clone(&socket), tx, cancel.clone()));

        sleep(self.config.broadcast_window).await;
        cancel.cancel();

        reader.await.map_err(|e| {
            Error::transport(
                "Broadcast reader failed",
                std::io::Error::new(std::io::ErrorKind::Other, e),
            )
        })?;
        drop(socket);

        let mut replies = Vec::new();
        while let Ok(reply) = rx.try_recv() {
            replies.push(reply);
        }

        debug!(replies = replies.len(), "broadcast window closed");
        Ok(replies)
    }
}

/// Forwards datagrams to `replies` until cancelled or the socket fails
async fn collect(
    socket: Arc<UdpSocket>,
    replies: mpsc::UnboundedSender<Vec<u8>>,
    cancel: CancellationToken,
) {
    let mut buf = vec![0u8; RECV_BUFFER_SIZE];

    loop {
        tokio::select! {
            biased;

            _ = cancel.cancelled() => break,

            received = socket.recv_from(&mut buf) => match received {
                Ok((n, remote)) => {
                    debug!(bytes = n, %remote, "reply\n{}", hex_dump(&buf[..n]));
                    if replies.send(buf[..n].to_vec()).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    trace!(error = %e, "broadcast read failed");
                    break;
                }
            },
        }
    }

    trace!("broadcast reader stopped");
}
