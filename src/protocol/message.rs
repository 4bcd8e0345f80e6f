//! Request and response layouts, one pair per operation
//!
//! The serial number of the addressed controller always sits at offset 4.
//! Responses reuse the request's message type.

use std::net::Ipv4Addr;

use crate::core::{Date, DateTime, MacAddress, SerialNumber, Version};
use crate::wire_message;

// Discovery and addressing

wire_message! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct FindDevicesRequest: 0x94 {}
}

wire_message! {
    /// Discovery request addressed to a single controller
    #[derive(Debug, Clone, PartialEq)]
    pub struct GetDeviceRequest: 0x94 {
        #[offset(4)] pub serial_number: SerialNumber,
    }
}

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct FindDevicesResponse: 0x94 {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub ip_address: Ipv4Addr,
        #[offset(12)] pub subnet_mask: Ipv4Addr,
        #[offset(16)] pub gateway: Ipv4Addr,
        #[offset(20)] pub mac_address: MacAddress,
        #[offset(26)] pub version: Version,
        #[offset(28)] pub date: Date,
    }
}

wire_message! {
    /// Reconfigures the controller's network settings. The controller does
    /// not reply.
    #[derive(Debug, Clone, PartialEq)]
    pub struct SetAddressRequest: 0x96 {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub address: Ipv4Addr,
        #[offset(12)] pub subnet_mask: Ipv4Addr,
        #[offset(16)] pub gateway: Ipv4Addr,
        /// Must be [`MAGIC_WORD`](super::MAGIC_WORD)
        #[offset(20)] pub magic_word: u32,
    }
}

// Clock

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct GetTimeRequest: 0x32 {
        #[offset(4)] pub serial_number: SerialNumber,
    }
}

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct GetTimeResponse: 0x32 {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub datetime: DateTime,
    }
}

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct SetTimeRequest: 0x30 {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub datetime: DateTime,
    }
}

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct SetTimeResponse: 0x30 {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub datetime: DateTime,
    }
}

// Doors

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct GetDoorDelayRequest: 0x82 {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub door: u8,
    }
}

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct GetDoorDelayResponse: 0x82 {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub door: u8,
        #[offset(9)] pub unit: u8,
        #[offset(10)] pub delay: u8,
    }
}

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct SetDoorDelayRequest: 0x80 {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub door: u8,
        #[offset(9)] pub unit: u8,
        #[offset(10)] pub delay: u8,
    }
}

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct SetDoorDelayResponse: 0x80 {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub door: u8,
        #[offset(9)] pub unit: u8,
        #[offset(10)] pub delay: u8,
    }
}

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct OpenDoorRequest: 0x40 {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub door: u8,
    }
}

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct OpenDoorResponse: 0x40 {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub succeeded: bool,
    }
}

// Cards

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct GetCardsRequest: 0x58 {
        #[offset(4)] pub serial_number: SerialNumber,
    }
}

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct GetCardsResponse: 0x58 {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub records: u32,
    }
}

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct GetCardByIdRequest: 0x5a {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub card_number: u32,
    }
}

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct GetCardByIdResponse: 0x5a {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub card_number: u32,
        #[offset(12)] pub from: Date,
        #[offset(16)] pub to: Date,
        #[offset(20)] pub door1: bool,
        #[offset(21)] pub door2: bool,
        #[offset(22)] pub door3: bool,
        #[offset(23)] pub door4: bool,
    }
}

wire_message! {
    /// Leading fields of a card-by-id reply. An unknown card comes back as
    /// card number 0 with zero-filled dates, which this layout can read safely.
    #[derive(Debug, Clone, PartialEq)]
    pub struct GetCardByIdHeader: 0x5a {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub card_number: u32,
    }
}

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct GetCardByIndexRequest: 0x5c {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub index: u32,
    }
}

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct GetCardByIndexResponse: 0x5c {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub card_number: u32,
        #[offset(12)] pub from: Date,
        #[offset(16)] pub to: Date,
        #[offset(20)] pub door1: bool,
        #[offset(21)] pub door2: bool,
        #[offset(22)] pub door3: bool,
        #[offset(23)] pub door4: bool,
    }
}

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct GetCardByIndexHeader: 0x5c {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub card_number: u32,
    }
}

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct PutCardRequest: 0x50 {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub card_number: u32,
        #[offset(12)] pub from: Date,
        #[offset(16)] pub to: Date,
        #[offset(20)] pub door1: bool,
        #[offset(21)] pub door2: bool,
        #[offset(22)] pub door3: bool,
        #[offset(23)] pub door4: bool,
    }
}

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct PutCardResponse: 0x50 {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub succeeded: bool,
    }
}

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct DeleteCardRequest: 0x52 {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub card_number: u32,
    }
}

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct DeleteCardResponse: 0x52 {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub succeeded: bool,
    }
}

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct DeleteAllCardsRequest: 0x54 {
        #[offset(4)] pub serial_number: SerialNumber,
        /// Must be [`MAGIC_WORD`](super::MAGIC_WORD)
        #[offset(8)] pub magic_word: u32,
    }
}

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct DeleteAllCardsResponse: 0x54 {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub succeeded: bool,
    }
}

// Events

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct GetEventRequest: 0xb0 {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub index: u32,
    }
}

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct GetEventResponse: 0xb0 {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub index: u32,
        #[offset(12)] pub event_type: u8,
        #[offset(13)] pub granted: bool,
        #[offset(14)] pub door: u8,
        #[offset(15)] pub door_opened: bool,
        #[offset(16)] pub card_number: u32,
        #[offset(20)] pub timestamp: DateTime,
        #[offset(27)] pub reason: u8,
    }
}

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct GetEventIndexRequest: 0xb4 {
        #[offset(4)] pub serial_number: SerialNumber,
    }
}

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct GetEventIndexResponse: 0xb4 {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub index: u32,
    }
}

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct SetEventIndexRequest: 0xb2 {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub index: u32,
        /// Must be [`MAGIC_WORD`](super::MAGIC_WORD)
        #[offset(12)] pub magic_word: u32,
    }
}

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct SetEventIndexResponse: 0xb2 {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub changed: bool,
    }
}

// Event listener

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct GetListenerRequest: 0x92 {
        #[offset(4)] pub serial_number: SerialNumber,
    }
}

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct GetListenerResponse: 0x92 {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub address: Ipv4Addr,
        #[offset(12)] pub port: u16,
    }
}

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct SetListenerRequest: 0x90 {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub address: Ipv4Addr,
        #[offset(12)] pub port: u16,
    }
}

wire_message! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct SetListenerResponse: 0x90 {
        #[offset(4)] pub serial_number: SerialNumber,
        #[offset(8)] pub succeeded: bool,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Error, MsgType};
    use crate::protocol::{marshal, unmarshal, Message, DOOR_DELAY_UNIT, FRAME_SIZE, MAGIC_WORD};

    fn frame(head: &[u8]) -> Vec<u8> {
        let mut bytes = vec![0u8; FRAME_SIZE];
        bytes[..head.len()].copy_from_slice(head);
        bytes
    }

    #[test]
    fn test_marshal_get_door_delay_request() {
        let request = GetDoorDelayRequest {
            serial_number: SerialNumber(423187757),
            door: 1,
        };

        let m = marshal(&request).unwrap();
        assert_eq!(
            m.to_vec(),
            frame(&[0x17, 0x82, 0x00, 0x00, 0x2d, 0x55, 0x39, 0x19, 0x01])
        );
    }

    #[test]
    fn test_marshal_set_door_delay_request() {
        let request = SetDoorDelayRequest {
            serial_number: SerialNumber(423187757),
            door: 3,
            unit: DOOR_DELAY_UNIT,
            delay: 7,
        };

        let m = marshal(&request).unwrap();
        assert_eq!(
            m.to_vec(),
            frame(&[0x17, 0x80, 0x00, 0x00, 0x2d, 0x55, 0x39, 0x19, 0x03, 0x03, 0x07])
        );
    }

    #[test]
    fn test_marshal_delete_card_request() {
        let request = DeleteCardRequest {
            serial_number: SerialNumber(423187757),
            card_number: 6154412,
        };

        let m = marshal(&request).unwrap();
        assert_eq!(
            m.to_vec(),
            frame(&[0x17, 0x52, 0x00, 0x00, 0x2d, 0x55, 0x39, 0x19, 0xac, 0xe8, 0x5d, 0x00])
        );
    }

    #[test]
    fn test_marshal_delete_all_cards_request() {
        let request = DeleteAllCardsRequest {
            serial_number: SerialNumber(423187757),
            magic_word: MAGIC_WORD,
        };

        let m = marshal(&request).unwrap();
        assert_eq!(
            m.to_vec(),
            frame(&[0x17, 0x54, 0x00, 0x00, 0x2d, 0x55, 0x39, 0x19, 0x55, 0xaa, 0xaa, 0x55])
        );
    }

    #[test]
    fn test_marshal_put_card_request() {
        let request = PutCardRequest {
            serial_number: SerialNumber(423187757),
            card_number: 6154412,
            from: "2019-01-01".parse().unwrap(),
            to: "2019-12-31".parse().unwrap(),
            door1: true,
            door2: false,
            door3: true,
            door4: false,
        };

        let m = marshal(&request).unwrap();
        assert_eq!(
            m.to_vec(),
            frame(&[
                0x17, 0x50, 0x00, 0x00, 0x2d, 0x55, 0x39, 0x19, 0xac, 0xe8, 0x5d, 0x00, 0x20, 0x19,
                0x01, 0x01, 0x20, 0x19, 0x12, 0x31, 0x01, 0x00, 0x01, 0x00,
            ])
        );
    }

    #[test]
    fn test_unmarshal_delete_card_response() {
        let message = frame(&[0x17, 0x52, 0x00, 0x00, 0x2d, 0x55, 0x39, 0x19, 0x01]);

        let reply: DeleteCardResponse = unmarshal(&message).unwrap();
        assert_eq!(DeleteCardResponse::MSG_TYPE, MsgType(0x52));
        assert_eq!(reply.serial_number, SerialNumber(423187757));
        assert!(reply.succeeded);
    }

    #[test]
    fn test_unmarshal_delete_card_response_with_invalid_msg_type() {
        let message = frame(&[0x17, 0x94, 0x00, 0x00, 0x2d, 0x55, 0x39, 0x19, 0x01]);

        let err = unmarshal::<DeleteCardResponse>(&message).unwrap_err();
        assert!(matches!(
            err,
            Error::MsgTypeMismatch { expected: 0x52, actual: 0x94 }
        ));
    }

    #[test]
    fn test_unmarshal_find_devices_response() {
        let message: Vec<u8> = vec![
            0x17, 0x94, 0x00, 0x00, 0x2d, 0x55, 0x39, 0x19, 0xc0, 0xa8, 0x00, 0x00, 0xff, 0xff, 0xff, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x66, 0x19, 0x39, 0x55, 0x2d, 0x08, 0x92, 0x20, 0x18, 0x08, 0x16,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];

        let reply: FindDevicesResponse = unmarshal(&message).unwrap();

        assert_eq!(reply.serial_number, SerialNumber(423187757));
        assert_eq!(reply.ip_address, Ipv4Addr::new(192, 168, 0, 0));
        assert_eq!(reply.subnet_mask, Ipv4Addr::new(255, 255, 255, 0));
        assert_eq!(reply.gateway, Ipv4Addr::new(0, 0, 0, 0));
        assert_eq!(reply.mac_address, "00:66:19:39:55:2d".parse().unwrap());
        assert_eq!(reply.version, Version(0x0892));
        assert_eq!(reply.date, "2018-08-16".parse().unwrap());
    }

    #[test]
    fn test_unmarshal_get_event_response() {
        let message = frame(&[
            0x17, 0xb0, 0x00, 0x00, 0x2d, 0x55, 0x39, 0x19, 0x08, 0x00, 0x00, 0x00, 0x01, 0x01, 0x03,
            0x01, 0xac, 0xe8, 0x5d, 0x00, 0x20, 0x19, 0x02, 0x10, 0x07, 0x12, 0x01, 0x06,
        ]);

        let reply: GetEventResponse = unmarshal(&message).unwrap();

        assert_eq!(reply.index, 8);
        assert_eq!(reply.event_type, 1);
        assert!(reply.granted);
        assert_eq!(reply.door, 3);
        assert!(reply.door_opened);
        assert_eq!(reply.card_number, 6154412);
        assert_eq!(reply.timestamp, "2019-02-10 07:12:01".parse().unwrap());
        assert_eq!(reply.reason, 6);
    }

    #[test]
    fn test_unmarshal_get_listener_response() {
        let message = frame(&[
            0x17, 0x92, 0x00, 0x00, 0x2d, 0x55, 0x39, 0x19, 0xc0, 0xa8, 0x01, 0x64, 0x61, 0xea,
        ]);

        let reply: GetListenerResponse = unmarshal(&message).unwrap();
        assert_eq!(reply.address, Ipv4Addr::new(192, 168, 1, 100));
        assert_eq!(reply.port, 60001);
    }

    #[test]
    fn test_card_header_reads_unknown_card() {
        let message = frame(&[0x17, 0x5a, 0x00, 0x00, 0x2d, 0x55, 0x39, 0x19]);

        let header: GetCardByIdHeader = unmarshal(&message).unwrap();
        assert_eq!(header.card_number, 0);
        assert!(unmarshal::<GetCardByIdResponse>(&message).is_err());
    }
}
