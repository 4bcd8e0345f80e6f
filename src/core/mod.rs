//! Core types for the UHPPOTE controller protocol
//!
//! This module contains the fundamental building blocks used throughout the library:
//! the error type, the semantic field types with their wire encodings, the domain
//! records returned by operations, and client configuration.

pub mod config;
pub mod error;
pub mod types;
pub mod serde;

use std::time::Duration;

pub use self::config::{Config, DeviceConfig};
pub use self::error::{Error, Result};
pub use self::types::{
    Card,
    Date,
    DateTime,
    Device,
    DeviceTime,
    DoorDelay,
    Event,
    EventIndex,
    Listener,
    MacAddress,
    MsgType,
    SerialNumber,
    Version,
};

/// UDP port controllers listen on
pub const DEFAULT_PORT: u16 = 60000;

/// Read deadline for a single request/reply exchange
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Time spent collecting replies to a broadcast
pub const DEFAULT_BROADCAST_WINDOW: Duration = Duration::from_millis(2500);
