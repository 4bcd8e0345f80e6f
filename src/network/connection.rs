use std::net::SocketAddr;

use tokio::time::timeout;
use tracing::{debug, trace};

use crate::core::{Error, Result};
use crate::protocol::{marshal, unmarshal, Message};
use crate::util::hex_dump;
use super::{Uhppote, RECV_BUFFER_SIZE};

impl Uhppote {
    /// Sends a request and decodes the single reply
    pub async fn exec<Rq, Rs>(&self, request: &Rq, dest: SocketAddr) -> Result<Rs>
    where
        Rq: Message,
        Rs: Message,
    {
        let frame = marshal(request)?;
        let reply = self.execute(&frame, dest).await?;
        unmarshal(&reply)
    }

    /// Sends a raw frame and waits for one datagram in reply.
    ///
    /// Fails with [`Error::Timeout`] if nothing arrives within the configured
    /// timeout. The socket is released on every path.
    pub async fn execute(&self, frame: &[u8], dest: SocketAddr) -> Result<Vec<u8>> {
        debug!(bytes = frame.len(), %dest, "command\n{}", hex_dump(frame));

        let socket = self.open_socket()?;

        let sent = socket
            .send_to(frame, dest)
            .await
            .map_err(|e| Error::transport("Failed to write to UDP socket", e))?;
        trace!(sent, "sent");

        let mut reply = vec![0u8; RECV_BUFFER_SIZE];
        let (received, remote) = timeout(self.config.timeout, socket.recv_from(&mut reply))
            .await
            .map_err(|_| Error::Timeout(self.config.timeout))?
            .map_err(|e| Error::transport("Failed to read from UDP socket", e))?;

        reply.truncate(received);
        debug!(bytes = received, %remote, "reply\n{}", hex_dump(&reply));

        Ok(reply)
    }

    /// Sends a request without waiting for a reply
    pub async fn send<Rq: Message>(&self, request: &Rq, dest: SocketAddr) -> Result<()> {
        let frame = marshal(request)?;
        debug!(bytes = frame.len(), %dest, "command\n{}", hex_dump(&frame));

        let socket = self.open_socket()?;
        let sent = socket
            .send_to(&frame, dest)
            .await
            .map_err(|e| Error::transport("Failed to write to UDP socket", e))?;
        trace!(sent, "sent");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Config, SerialNumber};
    use crate::protocol::message::{GetDoorDelayRequest, GetDoorDelayResponse, GetTimeResponse};
    use crate::protocol::FRAME_SIZE;
    use std::time::Duration;
    use tokio::net::UdpSocket;

    fn client(bind: &str, timeout: Duration) -> Uhppote {
        Uhppote::new(Config {
            bind_addr: bind.parse().unwrap(),
            timeout,
            ..Default::default()
        })
        .unwrap()
    }

    /// Simulated controller that answers one request with `reply`
    async fn controller(reply: Vec<u8>) -> (SocketAddr, tokio::task::JoinHandle<Vec<u8>>) {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let mut buf = [0u8; 1024];
            let (n, from) = socket.recv_from(&mut buf).await.unwrap();
            socket.send_to(&reply, from).await.unwrap();
            buf[..n].to_vec()
        });

        (addr, handle)
    }

    fn door_delay_reply(unit: u8) -> Vec<u8> {
        let mut reply = vec![0u8; FRAME_SIZE];
        reply[..11].copy_from_slice(&[0x17, 0x82, 0x00, 0x00, 0x2d, 0x55, 0x39, 0x19, 0x01, unit, 0x05]);
        reply
    }

    #[tokio::test]
    async fn test_exec() {
        let (addr, handle) = controller(door_delay_reply(0x03)).await;
        let u = client("127.0.0.1:0", Duration::from_secs(1));

        let request = GetDoorDelayRequest {
            serial_number: SerialNumber(423187757),
            door: 1,
        };
        let reply: GetDoorDelayResponse = u.exec(&request, addr).await.unwrap();

        assert_eq!(reply.serial_number, SerialNumber(423187757));
        assert_eq!(reply.door, 1);
        assert_eq!(reply.unit, 0x03);
        assert_eq!(reply.delay, 5);

        let received = handle.await.unwrap();
        assert_eq!(received, marshal(&request).unwrap().to_vec());
    }

    #[tokio::test]
    async fn test_exec_propagates_codec_errors() {
        let (addr, _handle) = controller(door_delay_reply(0x03)).await;
        let u = client("127.0.0.1:0", Duration::from_secs(1));

        let request = GetDoorDelayRequest {
            serial_number: SerialNumber(423187757),
            door: 1,
        };
        let err = u.exec::<_, GetTimeResponse>(&request, addr).await.unwrap_err();
        assert!(matches!(err, Error::MsgTypeMismatch { expected: 0x32, actual: 0x82 }));
    }

    #[tokio::test]
    async fn test_exec_short_reply() {
        let (addr, _handle) = controller(vec![0x17, 0x82, 0x00]).await;
        let u = client("127.0.0.1:0", Duration::from_secs(1));

        let request = GetDoorDelayRequest {
            serial_number: SerialNumber(423187757),
            door: 1,
        };
        let err = u.exec::<_, GetDoorDelayResponse>(&request, addr).await.unwrap_err();
        assert!(matches!(err, Error::Length { expected: 64, actual: 3 }));
    }

    #[tokio::test]
    async fn test_execute_timeout_releases_socket() {
        // a controller that never answers
        let silent = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let dest = silent.local_addr().unwrap();

        // pin the client to a known port
        let port = std::net::UdpSocket::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let bind = format!("127.0.0.1:{}", port);
        let u = client(&bind, Duration::from_millis(200));

        let err = u.execute(&[0x17, 0x94], dest).await.unwrap_err();
        assert!(err.is_timeout());
        assert!(matches!(err, Error::Timeout(d) if d == Duration::from_millis(200)));

        // the port is free again once execute returns
        assert!(std::net::UdpSocket::bind(&bind).is_ok());
    }

    #[tokio::test]
    async fn test_send() {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let dest = socket.local_addr().unwrap();
        let u = client("127.0.0.1:0", Duration::from_secs(1));

        let request = GetDoorDelayRequest {
            serial_number: SerialNumber(423187757),
            door: 2,
        };
        u.send(&request, dest).await.unwrap();

        let mut buf = [0u8; 128];
        let (n, _) = socket.recv_from(&mut buf).await.unwrap();
        assert_eq!(n, FRAME_SIZE);
        assert_eq!(buf[1], 0x82);
        assert_eq!(buf[8], 2);
    }
}
