use std::net::Ipv4Addr;

use tracing::warn;

use crate::core::{Device, Result, SerialNumber};
use crate::network::Uhppote;
use crate::protocol::message::{
    FindDevicesRequest, FindDevicesResponse, GetDeviceRequest, SetAddressRequest,
};
use crate::protocol::{unmarshal, MAGIC_WORD};

impl From<FindDevicesResponse> for Device {
    fn from(reply: FindDevicesResponse) -> Self {
        Device {
            serial_number: reply.serial_number,
            ip_address: reply.ip_address,
            subnet_mask: reply.subnet_mask,
            gateway: reply.gateway,
            mac_address: reply.mac_address,
            version: reply.version,
            date: reply.date,
        }
    }
}

impl Uhppote {
    /// Lists every controller that answers a discovery broadcast within the
    /// broadcast window. Replies that fail to decode are skipped.
    pub async fn find_devices(&self) -> Result<Vec<Device>> {
        let replies = self.broadcast(&FindDevicesRequest::default()).await?;

        let devices = replies
            .iter()
            .filter_map(|reply| match unmarshal::<FindDevicesResponse>(reply) {
                Ok(response) => Some(Device::from(response)),
                Err(e) => {
                    warn!(error = %e, bytes = reply.len(), "discarding invalid discovery reply");
                    None
                }
            })
            .collect();

        Ok(devices)
    }

    /// Retrieves the identity of a single controller
    pub async fn get_device(&self, serial_number: impl Into<SerialNumber>) -> Result<Device> {
        let serial_number = serial_number.into();
        let request = GetDeviceRequest { serial_number };

        let reply: FindDevicesResponse = self.exec(&request, self.address_of(serial_number)).await?;
        Ok(Device::from(reply))
    }

    /// Changes a controller's IP address, subnet mask and gateway. The
    /// controller does not acknowledge the change.
    pub async fn set_address(
        &self,
        serial_number: impl Into<SerialNumber>,
        address: Ipv4Addr,
        subnet_mask: Ipv4Addr,
        gateway: Ipv4Addr,
    ) -> Result<()> {
        let request = SetAddressRequest {
            serial_number: serial_number.into(),
            address,
            subnet_mask,
            gateway,
            magic_word: MAGIC_WORD,
        };

        self.send(&request, self.config().broadcast_addr).await
    }
}
