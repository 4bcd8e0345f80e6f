use crate::core::{Event, EventIndex, Result, SerialNumber};
use crate::network::Uhppote;
use crate::protocol::message::{
    GetEventIndexRequest, GetEventIndexResponse, GetEventRequest, GetEventResponse,
    SetEventIndexRequest, SetEventIndexResponse,
};
use crate::protocol::MAGIC_WORD;

impl From<GetEventResponse> for Event {
    fn from(reply: GetEventResponse) -> Self {
        Event {
            serial_number: reply.serial_number,
            index: reply.index,
            event_type: reply.event_type,
            granted: reply.granted,
            door: reply.door,
            door_opened: reply.door_opened,
            card_number: reply.card_number,
            timestamp: reply.timestamp,
            reason: reply.reason,
        }
    }
}

impl Uhppote {
    /// Retrieves the event log record at `index`
    pub async fn get_event(&self, serial_number: impl Into<SerialNumber>, index: u32) -> Result<Event> {
        let serial_number = serial_number.into();
        let request = GetEventRequest {
            serial_number,
            index,
        };

        let reply: GetEventResponse = self.exec(&request, self.address_of(serial_number)).await?;
        Ok(Event::from(reply))
    }

    /// Retrieves the controller's event read pointer
    pub async fn get_event_index(&self, serial_number: impl Into<SerialNumber>) -> Result<EventIndex> {
        let serial_number = serial_number.into();
        let request = GetEventIndexRequest { serial_number };

        let reply: GetEventIndexResponse =
            self.exec(&request, self.address_of(serial_number)).await?;

        Ok(EventIndex {
            serial_number: reply.serial_number,
            index: reply.index,
        })
    }

    /// Moves the event read pointer. Returns whether the controller changed it.
    pub async fn set_event_index(
        &self,
        serial_number: impl Into<SerialNumber>,
        index: u32,
    ) -> Result<bool> {
        let serial_number = serial_number.into();
        let request = SetEventIndexRequest {
            serial_number,
            index,
            magic_word: MAGIC_WORD,
        };

        let reply: SetEventIndexResponse =
            self.exec(&request, self.address_of(serial_number)).await?;
        Ok(reply.changed)
    }
}
