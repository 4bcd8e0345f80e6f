//! Network transport module
//!
//! This module handles the UDP exchanges with controllers: single
//! request/reply round trips to one controller and timed broadcast
//! collection for discovery.

mod connection;
mod discovery;

use std::net::SocketAddr;

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::UdpSocket;

use crate::core::{Config, Error, Result, SerialNumber};

/// Receive buffer size. Controllers only ever send 64 byte frames, but an
/// oversized datagram should reach the codec intact so it fails with a
/// length error rather than being silently truncated.
const RECV_BUFFER_SIZE: usize = 2048;

/// Client for UT0311-L0x controllers.
///
/// Holds no sockets: every call opens its own socket, bound to the
/// configured local address, and releases it before returning. Concurrent
/// calls therefore never share state.
#[derive(Debug, Clone)]
pub struct Uhppote {
    config: Config,
}

impl Uhppote {
    /// Creates a new client from a validated configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Uhppote { config })
    }

    /// Returns the client configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Destination for requests addressed to `serial_number`
    pub fn address_of(&self, serial_number: SerialNumber) -> SocketAddr {
        self.config.address_of(serial_number)
    }

    fn open_socket(&self) -> Result<UdpSocket> {
        let bind_addr = self.config.bind_addr;

        let socket = Socket::new(Domain::for_address(bind_addr), Type::DGRAM, Some(Protocol::UDP))
            .map_err(|e| Error::transport("Failed to open UDP socket", e))?;
        socket
            .set_broadcast(true)
            .map_err(|e| Error::transport("Failed to enable UDP broadcast", e))?;
        socket
            .set_nonblocking(true)
            .map_err(|e| Error::transport("Failed to configure UDP socket", e))?;
        socket
            .bind(&bind_addr.into())
            .map_err(|e| Error::transport("Failed to bind UDP socket", e))?;

        UdpSocket::from_std(socket.into())
            .map_err(|e| Error::transport("Failed to register UDP socket", e))
    }
}
