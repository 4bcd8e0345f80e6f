use crate::core::{DoorDelay, Error, Result, SerialNumber};
use crate::network::Uhppote;
use crate::protocol::message::{
    GetDoorDelayRequest, GetDoorDelayResponse, OpenDoorRequest, OpenDoorResponse,
    SetDoorDelayRequest, SetDoorDelayResponse,
};
use crate::protocol::DOOR_DELAY_UNIT;

fn check_unit(unit: u8) -> Result<()> {
    if unit != DOOR_DELAY_UNIT {
        return Err(Error::unexpected("unit", format!("{:#04x}", unit)));
    }
    Ok(())
}

impl Uhppote {
    pub async fn get_door_delay(
        &self,
        serial_number: impl Into<SerialNumber>,
        door: u8,
    ) -> Result<DoorDelay> {
        let serial_number = serial_number.into();
        let request = GetDoorDelayRequest {
            serial_number,
            door,
        };

        let reply: GetDoorDelayResponse =
            self.exec(&request, self.address_of(serial_number)).await?;
        check_unit(reply.unit)?;

        Ok(DoorDelay {
            serial_number: reply.serial_number,
            door: reply.door,
            delay: reply.delay,
        })
    }

    pub async fn set_door_delay(
        &self,
        serial_number: impl Into<SerialNumber>,
        door: u8,
        delay: u8,
    ) -> Result<DoorDelay> {
        let serial_number = serial_number.into();
        let request = SetDoorDelayRequest {
            serial_number,
            door,
            unit: DOOR_DELAY_UNIT,
            delay,
        };

        let reply: SetDoorDelayResponse =
            self.exec(&request, self.address_of(serial_number)).await?;
        check_unit(reply.unit)?;

        Ok(DoorDelay {
            serial_number: reply.serial_number,
            door: reply.door,
            delay: reply.delay,
        })
    }

    /// Unlocks a door remotely
    pub async fn open_door(&self, serial_number: impl Into<SerialNumber>, door: u8) -> Result<bool> {
        let serial_number = serial_number.into();
        let request = OpenDoorRequest {
            serial_number,
            door,
        };

        let reply: OpenDoorResponse = self.exec(&request, self.address_of(serial_number)).await?;
        Ok(reply.succeeded)
    }
}
