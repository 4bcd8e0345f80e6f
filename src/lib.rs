//! UHPPOTE: UDP client for UT0311-L0x access controller boards
//!
//! Controllers speak a fixed 64 byte request/reply protocol over UDP port
//! 60000. This library provides the frame codec, the request and response
//! layouts, the unicast and broadcast transports, and typed operations on
//! top of them.
//!
//! ```no_run
//! use uhppote::{Config, Uhppote};
//!
//! # async fn run() -> uhppote::Result<()> {
//! let u = Uhppote::new(Config::default())?;
//! for device in u.find_devices().await? {
//!     println!("{}", device);
//! }
//! # Ok(())
//! # }
//! ```
pub mod core;
pub mod network;
pub mod ops;
pub mod protocol;
pub mod util;

// Re-export commonly used items
pub use crate::core::{
    Card, Config, Date, DateTime, Device, DeviceConfig, DeviceTime, DoorDelay, Error, Event,
    EventIndex, Listener, MacAddress, Result, SerialNumber, Version,
};
pub use crate::network::Uhppote;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
