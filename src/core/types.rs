use std::fmt;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::str::FromStr;

use bytes::{Buf, BufMut};
use chrono::{NaiveDate, NaiveDateTime, SubsecRound};
use serde::Serialize;

use super::{Error, Result};
use crate::protocol::bcd;
use crate::protocol::codec::WireCodable;

const DATE_FORMAT: &str = "%Y%m%d";
const DATETIME_FORMAT: &str = "%Y%m%d%H%M%S";

/// Message discriminator carried in byte 1 of every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MsgType(pub u8);

impl fmt::Display for MsgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}", self.0)
    }
}

impl WireCodable for MsgType {
    const WIDTH: usize = 1;

    fn encode(&self, dst: &mut [u8]) -> Result<()> {
        dst[0] = self.0;
        Ok(())
    }

    fn decode(src: &[u8]) -> Result<Self> {
        Ok(MsgType(src[0]))
    }
}

/// Controller serial number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SerialNumber(pub u32);

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SerialNumber {
    fn from(value: u32) -> Self {
        SerialNumber(value)
    }
}

impl WireCodable for SerialNumber {
    const WIDTH: usize = 4;

    fn encode(&self, mut dst: &mut [u8]) -> Result<()> {
        dst.put_u32_le(self.0);
        Ok(())
    }

    fn decode(mut src: &[u8]) -> Result<Self> {
        Ok(SerialNumber(src.get_u32_le()))
    }
}

/// Firmware version. Big-endian on the wire, unlike every other integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version(pub u16);

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}", self.0)
    }
}

impl WireCodable for Version {
    const WIDTH: usize = 2;

    fn encode(&self, mut dst: &mut [u8]) -> Result<()> {
        dst.put_u16(self.0);
        Ok(())
    }

    fn decode(mut src: &[u8]) -> Result<Self> {
        Ok(Version(src.get_u16()))
    }
}

/// Calendar date, BCD packed as YYYYMMDD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Date(pub NaiveDate);

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| Error::date_format(format!("{}: {}", s, e)))
    }
}

impl WireCodable for Date {
    const WIDTH: usize = 4;

    fn encode(&self, dst: &mut [u8]) -> Result<()> {
        let encoded = bcd::encode(&self.0.format(DATE_FORMAT).to_string())
            .map_err(|e| Error::encoding(format!("date {}: {}", self, e)))?;
        dst.copy_from_slice(&encoded);
        Ok(())
    }

    fn decode(src: &[u8]) -> Result<Self> {
        let digits = bcd::decode(src)?;
        NaiveDate::parse_from_str(&digits, DATE_FORMAT)
            .map(Date)
            .map_err(|e| Error::date_format(format!("{}: {}", digits, e)))
    }
}

/// Local date and time, BCD packed as YYYYMMDDHHMMSS.
///
/// The wire format has one second resolution. Build values with
/// [`From<NaiveDateTime>`](DateTime::from), which drops the fractional
/// second, so that what is sent is what comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateTime(pub NaiveDateTime);

impl From<NaiveDateTime> for DateTime {
    fn from(value: NaiveDateTime) -> Self {
        DateTime(value.trunc_subsecs(0))
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))
    }
}

impl FromStr for DateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .map(DateTime)
            .map_err(|e| Error::date_format(format!("{}: {}", s, e)))
    }
}

impl WireCodable for DateTime {
    const WIDTH: usize = 7;

    fn encode(&self, dst: &mut [u8]) -> Result<()> {
        let encoded = bcd::encode(&self.0.format(DATETIME_FORMAT).to_string())
            .map_err(|e| Error::encoding(format!("datetime {}: {}", self, e)))?;
        dst.copy_from_slice(&encoded);
        Ok(())
    }

    fn decode(src: &[u8]) -> Result<Self> {
        let digits = bcd::decode(src)?;
        NaiveDateTime::parse_from_str(&digits, DATETIME_FORMAT)
            .map(DateTime)
            .map_err(|e| Error::date_format(format!("{}: {}", digits, e)))
    }
}

/// Ethernet hardware address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MacAddress(pub [u8; 6]);

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            a, b, c, d, e, g
        )
    }
}

impl FromStr for MacAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut octets = [0u8; 6];
        let mut parts = s.split(|c| c == ':' || c == '-');

        for octet in octets.iter_mut() {
            let part = parts
                .next()
                .ok_or_else(|| Error::format(format!("MAC address '{}' is too short", s)))?;
            if part.len() != 2 {
                return Err(Error::format(format!("invalid MAC address '{}'", s)));
            }
            *octet = u8::from_str_radix(part, 16)
                .map_err(|_| Error::format(format!("invalid MAC address '{}'", s)))?;
        }

        if parts.next().is_some() {
            return Err(Error::format(format!("MAC address '{}' is too long", s)));
        }

        Ok(MacAddress(octets))
    }
}

impl WireCodable for MacAddress {
    const WIDTH: usize = 6;

    fn encode(&self, dst: &mut [u8]) -> Result<()> {
        dst.copy_from_slice(&self.0);
        Ok(())
    }

    fn decode(src: &[u8]) -> Result<Self> {
        let mut octets = [0u8; 6];
        octets.copy_from_slice(src);
        Ok(MacAddress(octets))
    }
}

macro_rules! serialize_as_display {
    ($($t:ty),*) => {
        $(
            impl Serialize for $t {
                fn serialize<S: serde::Serializer>(
                    &self,
                    serializer: S,
                ) -> std::result::Result<S::Ok, S::Error> {
                    super::serde::serialize_display(self, serializer)
                }
            }
        )*
    };
}

serialize_as_display!(Version, Date, DateTime, MacAddress);

/// Controller identity, decoded from a discovery reply
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Device {
    pub serial_number: SerialNumber,
    pub ip_address: Ipv4Addr,
    pub subnet_mask: Ipv4Addr,
    pub gateway: Ipv4Addr,
    pub mac_address: MacAddress,
    pub version: Version,
    pub date: Date,
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {}",
            self.serial_number,
            self.ip_address,
            self.subnet_mask,
            self.gateway,
            self.mac_address,
            self.version,
            self.date
        )
    }
}

/// Controller clock
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceTime {
    pub serial_number: SerialNumber,
    pub datetime: DateTime,
}

impl fmt::Display for DeviceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.serial_number, self.datetime)
    }
}

/// Door open delay in seconds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoorDelay {
    pub serial_number: SerialNumber,
    pub door: u8,
    pub delay: u8,
}

impl fmt::Display for DoorDelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.serial_number, self.door, self.delay)
    }
}

/// Access card record held by a controller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub card_number: u32,
    pub from: Date,
    pub to: Date,
    pub doors: [bool; 4],
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [d1, d2, d3, d4] = self.doors.map(|d| if d { 'Y' } else { 'N' });
        write!(
            f,
            "{:<8} {} {} {} {} {} {}",
            self.card_number, self.from, self.to, d1, d2, d3, d4
        )
    }
}

/// Event log record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub serial_number: SerialNumber,
    pub index: u32,
    pub event_type: u8,
    pub granted: bool,
    pub door: u8,
    pub door_opened: bool,
    pub card_number: u32,
    pub timestamp: DateTime,
    pub reason: u8,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {} {} {}",
            self.serial_number,
            self.index,
            self.timestamp,
            self.card_number,
            self.door,
            self.granted,
            self.door_opened,
            self.event_type,
            self.reason
        )
    }
}

/// Event log read pointer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventIndex {
    pub serial_number: SerialNumber,
    pub index: u32,
}

impl fmt::Display for EventIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.serial_number, self.index)
    }
}

/// Host the controller pushes events to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listener {
    pub serial_number: SerialNumber,
    pub address: SocketAddrV4,
}

impl fmt::Display for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.serial_number, self.address)
    }
}
