use crate::core::{Card, Result, SerialNumber};
use crate::network::Uhppote;
use crate::protocol::message::{
    DeleteAllCardsRequest, DeleteAllCardsResponse, DeleteCardRequest, DeleteCardResponse,
    GetCardByIdHeader, GetCardByIdRequest, GetCardByIdResponse, GetCardByIndexHeader,
    GetCardByIndexRequest, GetCardByIndexResponse, GetCardsRequest, GetCardsResponse,
    PutCardRequest, PutCardResponse,
};
use crate::protocol::{marshal, unmarshal, MAGIC_WORD};

impl From<GetCardByIdResponse> for Card {
    fn from(reply: GetCardByIdResponse) -> Self {
        Card {
            card_number: reply.card_number,
            from: reply.from,
            to: reply.to,
            doors: [reply.door1, reply.door2, reply.door3, reply.door4],
        }
    }
}

impl From<GetCardByIndexResponse> for Card {
    fn from(reply: GetCardByIndexResponse) -> Self {
        Card {
            card_number: reply.card_number,
            from: reply.from,
            to: reply.to,
            doors: [reply.door1, reply.door2, reply.door3, reply.door4],
        }
    }
}

impl Uhppote {
    /// Number of card records stored on the controller
    pub async fn get_cards(&self, serial_number: impl Into<SerialNumber>) -> Result<u32> {
        let serial_number = serial_number.into();
        let request = GetCardsRequest { serial_number };

        let reply: GetCardsResponse = self.exec(&request, self.address_of(serial_number)).await?;
        Ok(reply.records)
    }

    /// Looks up a card by number, `None` if the controller has no record of it
    pub async fn get_card_by_id(
        &self,
        serial_number: impl Into<SerialNumber>,
        card_number: u32,
    ) -> Result<Option<Card>> {
        let serial_number = serial_number.into();
        let request = marshal(&GetCardByIdRequest {
            serial_number,
            card_number,
        })?;

        let reply = self.execute(&request, self.address_of(serial_number)).await?;

        // unknown cards come back zero-filled, including the dates
        let header: GetCardByIdHeader = unmarshal(&reply)?;
        if header.card_number == 0 {
            return Ok(None);
        }

        let response: GetCardByIdResponse = unmarshal(&reply)?;
        Ok(Some(Card::from(response)))
    }

    /// Reads the card record at `index` (1-based), `None` if the slot is empty
    pub async fn get_card_by_index(
        &self,
        serial_number: impl Into<SerialNumber>,
        index: u32,
    ) -> Result<Option<Card>> {
        let serial_number = serial_number.into();
        let request = marshal(&GetCardByIndexRequest {
            serial_number,
            index,
        })?;

        let reply = self.execute(&request, self.address_of(serial_number)).await?;

        let header: GetCardByIndexHeader = unmarshal(&reply)?;
        if header.card_number == 0 {
            return Ok(None);
        }

        let response: GetCardByIndexResponse = unmarshal(&reply)?;
        Ok(Some(Card::from(response)))
    }

    /// Adds or replaces a card record
    pub async fn put_card(&self, serial_number: impl Into<SerialNumber>, card: &Card) -> Result<bool> {
        let serial_number = serial_number.into();
        let [door1, door2, door3, door4] = card.doors;
        let request = PutCardRequest {
            serial_number,
            card_number: card.card_number,
            from: card.from,
            to: card.to,
            door1,
            door2,
            door3,
            door4,
        };

        let reply: PutCardResponse = self.exec(&request, self.address_of(serial_number)).await?;
        Ok(reply.succeeded)
    }

    pub async fn delete_card(
        &self,
        serial_number: impl Into<SerialNumber>,
        card_number: u32,
    ) -> Result<bool> {
        let serial_number = serial_number.into();
        let request = DeleteCardRequest {
            serial_number,
            card_number,
        };

        let reply: DeleteCardResponse = self.exec(&request, self.address_of(serial_number)).await?;
        Ok(reply.succeeded)
    }

    /// Removes every card record from the controller
    pub async fn delete_cards(&self, serial_number: impl Into<SerialNumber>) -> Result<bool> {
        let serial_number = serial_number.into();
        let request = DeleteAllCardsRequest {
            serial_number,
            magic_word: MAGIC_WORD,
        };

        let reply: DeleteAllCardsResponse =
            self.exec(&request, self.address_of(serial_number)).await?;
        Ok(reply.succeeded)
    }
}
