use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::net::Ipv4Addr;
use std::ops::Range;

use crate::core::{Error, MsgType, Result};
use super::{FRAME_SIZE, MSG_TYPE_OFFSET, SOM};

/// A value with a fixed-width wire encoding.
///
/// Every field of a message implements this, the built-in integer, boolean
/// and address types as well as the protocol's semantic types. New field
/// types extend the codec by implementing it; the frame codec itself never
/// needs to change.
pub trait WireCodable: Sized {
    /// Number of bytes the value occupies in a frame
    const WIDTH: usize;

    /// Writes the value into `dst`, which is exactly `WIDTH` bytes long and
    /// zero-filled
    fn encode(&self, dst: &mut [u8]) -> Result<()>;

    /// Reads a value from `src`, which is exactly `WIDTH` bytes long
    fn decode(src: &[u8]) -> Result<Self>;
}

/// A request or response with a fixed frame layout.
///
/// Implementations are normally generated by [`wire_message!`](crate::wire_message),
/// which refuses to compile a layout without a message type or with a field
/// that runs past the end of the frame.
pub trait Message: Sized {
    /// Discriminator written to and expected at byte 1
    const MSG_TYPE: MsgType;

    /// Writes every data field at its offset
    fn encode_fields(&self, frame: &mut FrameWriter) -> Result<()>;

    /// Reads every data field from its offset
    fn decode_fields(frame: &FrameReader<'_>) -> Result<Self>;
}

/// Zero-filled frame under construction
pub struct FrameWriter {
    buf: BytesMut,
}

impl FrameWriter {
    fn new() -> Self {
        let mut buf = BytesMut::zeroed(FRAME_SIZE);
        buf[0] = SOM;
        FrameWriter { buf }
    }

    /// Encodes `value` at `offset`
    pub fn put<T: WireCodable>(&mut self, offset: usize, value: &T) -> Result<()> {
        let range = span(offset, T::WIDTH)?;
        value.encode(&mut self.buf[range])
    }

    fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}

/// Read-only view of a received frame
pub struct FrameReader<'a> {
    buf: &'a [u8],
}

impl<'a> FrameReader<'a> {
    /// Decodes a `T` from `offset`
    pub fn get<T: WireCodable>(&self, offset: usize) -> Result<T> {
        let range = span(offset, T::WIDTH)?;
        T::decode(&self.buf[range])
    }
}

fn span(offset: usize, width: usize) -> Result<Range<usize>> {
    match offset.checked_add(width) {
        Some(end) if end <= FRAME_SIZE => Ok(offset..end),
        _ => Err(Error::FieldOverflow { offset, width }),
    }
}

/// Encodes a message into a 64 byte frame
pub fn marshal<M: Message>(message: &M) -> Result<Bytes> {
    let mut frame = FrameWriter::new();
    frame.put(MSG_TYPE_OFFSET, &M::MSG_TYPE)?;
    message.encode_fields(&mut frame)?;
    Ok(frame.finish())
}

/// Decodes a 64 byte frame into a message, checking the discriminator before
/// any data field is read
pub fn unmarshal<M: Message>(bytes: &[u8]) -> Result<M> {
    if bytes.len() != FRAME_SIZE {
        return Err(Error::Length {
            expected: FRAME_SIZE,
            actual: bytes.len(),
        });
    }

    let frame = FrameReader { buf: bytes };
    let msg_type: MsgType = frame.get(MSG_TYPE_OFFSET)?;
    if msg_type != M::MSG_TYPE {
        return Err(Error::MsgTypeMismatch {
            expected: M::MSG_TYPE.0,
            actual: msg_type.0,
        });
    }

    M::decode_fields(&frame)
}

impl WireCodable for u8 {
    const WIDTH: usize = 1;

    fn encode(&self, mut dst: &mut [u8]) -> Result<()> {
        dst.put_u8(*self);
        Ok(())
    }

    fn decode(mut src: &[u8]) -> Result<Self> {
        Ok(src.get_u8())
    }
}

impl WireCodable for u16 {
    const WIDTH: usize = 2;

    fn encode(&self, mut dst: &mut [u8]) -> Result<()> {
        dst.put_u16_le(*self);
        Ok(())
    }

    fn decode(mut src: &[u8]) -> Result<Self> {
        Ok(src.get_u16_le())
    }
}

impl WireCodable for u32 {
    const WIDTH: usize = 4;

    fn encode(&self, mut dst: &mut [u8]) -> Result<()> {
        dst.put_u32_le(*self);
        Ok(())
    }

    fn decode(mut src: &[u8]) -> Result<Self> {
        Ok(src.get_u32_le())
    }
}

impl WireCodable for bool {
    const WIDTH: usize = 1;

    fn encode(&self, dst: &mut [u8]) -> Result<()> {
        dst[0] = u8::from(*self);
        Ok(())
    }

    fn decode(src: &[u8]) -> Result<Self> {
        Ok(src[0] != 0x00)
    }
}

impl WireCodable for Ipv4Addr {
    const WIDTH: usize = 4;

    fn encode(&self, dst: &mut [u8]) -> Result<()> {
        dst.copy_from_slice(&self.octets());
        Ok(())
    }

    fn decode(src: &[u8]) -> Result<Self> {
        Ok(Ipv4Addr::new(src[0], src[1], src[2], src[3]))
    }
}

/// Nullable field: `None` leaves the region zero-filled. The region is
/// always decoded on the way in, since zero and absent look the same on the
/// wire.
impl<T: WireCodable> WireCodable for Option<T> {
    const WIDTH: usize = T::WIDTH;

    fn encode(&self, dst: &mut [u8]) -> Result<()> {
        match self {
            Some(value) => value.encode(dst),
            None => Ok(()),
        }
    }

    fn decode(src: &[u8]) -> Result<Self> {
        T::decode(src).map(Some)
    }
}

/// Declares a message struct together with its frame layout.
///
/// ```
/// use uhppote::core::SerialNumber;
///
/// uhppote::wire_message! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub struct GetDoorDelay: 0x82 {
///         /// Controller serial number
///         #[offset(4)] pub serial_number: SerialNumber,
///         #[offset(8)] pub door: u8,
///     }
/// }
///
/// let frame = uhppote::protocol::marshal(&GetDoorDelay {
///     serial_number: SerialNumber(423187757),
///     door: 1,
/// }).unwrap();
/// assert_eq!(&frame[..9], &[0x17, 0x82, 0, 0, 0x2d, 0x55, 0x39, 0x19, 0x01]);
/// ```
///
/// The message type literal may be written in decimal or hexadecimal. Every
/// field must fit between the discriminator and the end of the 64 byte
/// frame, which is checked at compile time.
#[macro_export]
macro_rules! wire_message {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident : $msg_type:literal {
            $(
                $(#[doc = $doc:literal])*
                #[offset($offset:literal)]
                $fvis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[doc = $doc])*
                $fvis $field: $ty,
            )*
        }

        $(
            const _: () = assert!(
                $offset > $crate::protocol::MSG_TYPE_OFFSET
                    && $offset + <$ty as $crate::protocol::codec::WireCodable>::WIDTH
                        <= $crate::protocol::FRAME_SIZE,
                concat!(
                    "field `",
                    stringify!($field),
                    "` of `",
                    stringify!($name),
                    "` does not fit in the frame"
                )
            );
        )*

        impl $crate::protocol::codec::Message for $name {
            const MSG_TYPE: $crate::core::MsgType = $crate::core::MsgType($msg_type);

            #[allow(unused_variables)]
            fn encode_fields(
                &self,
                frame: &mut $crate::protocol::codec::FrameWriter,
            ) -> $crate::core::Result<()> {
                $( frame.put($offset, &self.$field)?; )*
                Ok(())
            }

            #[allow(unused_variables)]
            fn decode_fields(
                frame: &$crate::protocol::codec::FrameReader<'_>,
            ) -> $crate::core::Result<Self> {
                Ok($name {
                    $( $field: frame.get($offset)?, )*
                })
            }
        }
    };
}
