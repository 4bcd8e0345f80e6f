use crate::core::{DateTime, DeviceTime, Result, SerialNumber};
use crate::network::Uhppote;
use crate::protocol::message::{GetTimeRequest, GetTimeResponse, SetTimeRequest, SetTimeResponse};

impl Uhppote {
    pub async fn get_time(&self, serial_number: impl Into<SerialNumber>) -> Result<DeviceTime> {
        let serial_number = serial_number.into();
        let request = GetTimeRequest { serial_number };

        let reply: GetTimeResponse = self.exec(&request, self.address_of(serial_number)).await?;

        Ok(DeviceTime {
            serial_number: reply.serial_number,
            datetime: reply.datetime,
        })
    }

    /// Sets the controller clock, returning the time the controller reports
    /// afterwards
    pub async fn set_time(
        &self,
        serial_number: impl Into<SerialNumber>,
        datetime: impl Into<DateTime>,
    ) -> Result<DeviceTime> {
        let serial_number = serial_number.into();
        let request = SetTimeRequest {
            serial_number,
            datetime: datetime.into(),
        };

        let reply: SetTimeResponse = self.exec(&request, self.address_of(serial_number)).await?;

        Ok(DeviceTime {
            serial_number: reply.serial_number,
            datetime: reply.datetime,
        })
    }
}
