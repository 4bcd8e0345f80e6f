//! Protocol implementation module
//!
//! This module defines the UT0311-L0x frame format: the BCD packing used by
//! date fields, the generic frame codec, and the request/response layouts of
//! every supported operation.

pub mod bcd;
pub mod codec;
pub mod message;

pub use self::codec::{marshal, unmarshal, Message, WireCodable};

// Constants
/// Every frame is exactly this many bytes
pub const FRAME_SIZE: usize = 64;

/// Start-of-message byte at offset 0
pub const SOM: u8 = 0x17;

/// Offset of the message type discriminator
pub const MSG_TYPE_OFFSET: usize = 1;

/// Confirmation word required by destructive and addressing requests
pub const MAGIC_WORD: u32 = 0x55aa_aa55;

/// Unit byte accompanying every door delay
pub const DOOR_DELAY_UNIT: u8 = 0x03;
