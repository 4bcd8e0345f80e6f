use std::net::SocketAddrV4;

use crate::core::{Listener, Result, SerialNumber};
use crate::network::Uhppote;
use crate::protocol::message::{
    GetListenerRequest, GetListenerResponse, SetListenerRequest, SetListenerResponse,
};

impl Uhppote {
    /// Retrieves the address the controller sends events to
    pub async fn get_listener(&self, serial_number: impl Into<SerialNumber>) -> Result<Listener> {
        let serial_number = serial_number.into();
        let request = GetListenerRequest { serial_number };

        let reply: GetListenerResponse = self.exec(&request, self.address_of(serial_number)).await?;

        Ok(Listener {
            serial_number: reply.serial_number,
            address: SocketAddrV4::new(reply.address, reply.port),
        })
    }

    pub async fn set_listener(
        &self,
        serial_number: impl Into<SerialNumber>,
        address: SocketAddrV4,
    ) -> Result<bool> {
        let serial_number = serial_number.into();
        let request = SetListenerRequest {
            serial_number,
            address: *address.ip(),
            port: address.port(),
        };

        let reply: SetListenerResponse = self.exec(&request, self.address_of(serial_number)).await?;
        Ok(reply.succeeded)
    }
}
