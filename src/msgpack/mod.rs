#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]

use std::mem;

use bytes::{BufMut, BytesMut};

use crate::commands::buffer::BufferError;

pub(crate) mod decoder;
pub(crate) mod encoder;

pub(crate) type Result<T, E = MsgpackError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum MsgpackError {
    /// The marker byte is reserved, or an extension appeared where a value was expected.
    #[error("type marker `{0:#04x}` not supported")]
    UnsupportedType(u8),
    /// A string-like payload started with an unknown type prefix.
    #[error("blob type `{0}` not recognized")]
    UnrecognizedBlobType(u8),
    /// A value of the wrong kind was found where a specific kind is required.
    #[error("expected {expected}, found marker `{marker:#04x}`")]
    UnexpectedMarker { expected: &'static str, marker: u8 },
    #[error("buffer error")]
    Buffer(#[from] BufferError),
}

/// Type prefix carried as the first byte inside every MessagePack string payload, telling the
/// peer how to interpret the remaining bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum BlobType {
    String = 3,
    Blob = 4,
    GeoJson = 23,
}

impl TryFrom<u8> for BlobType {
    type Error = MsgpackError;

    fn try_from(value: u8) -> Result<Self> {
        Ok(match value {
            3 => Self::String,
            4 => Self::Blob,
            23 => Self::GeoJson,
            _ => return Err(MsgpackError::UnrecognizedBlobType(value)),
        })
    }
}

/// Leading MessagePack byte of every encoded value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Marker {
    Pfix(u8),
    FixMap(u8),
    FixArray(u8),
    FixStr(u8),
    Nil,
    Reserved,
    False,
    True,
    Bin8,
    Bin16,
    Bin32,
    Ext8,
    Ext16,
    Ext32,
    F32,
    F64,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    FixExt1,
    FixExt2,
    FixExt4,
    FixExt8,
    FixExt16,
    Str8,
    Str16,
    Str32,
    Array16,
    Array32,
    Map16,
    Map32,
    Nfix(i8),
}

impl Marker {
    pub(crate) const NIL: u8 = 0xc0;
    pub(crate) const FALSE: u8 = 0xc2;
    pub(crate) const TRUE: u8 = 0xc3;
    pub(crate) const EXT8: u8 = 0xc7;
    pub(crate) const FLOAT32: u8 = 0xca;
    pub(crate) const FLOAT64: u8 = 0xcb;
    pub(crate) const UINT8: u8 = 0xcc;
    pub(crate) const UINT16: u8 = 0xcd;
    pub(crate) const UINT32: u8 = 0xce;
    pub(crate) const UINT64: u8 = 0xcf;
    pub(crate) const INT8: u8 = 0xd0;
    pub(crate) const INT16: u8 = 0xd1;
    pub(crate) const INT32: u8 = 0xd2;
    pub(crate) const INT64: u8 = 0xd3;
    pub(crate) const STR16: u8 = 0xda;
    pub(crate) const STR32: u8 = 0xdb;
    pub(crate) const ARRAY16: u8 = 0xdc;
    pub(crate) const ARRAY32: u8 = 0xdd;
    pub(crate) const MAP16: u8 = 0xde;
    pub(crate) const MAP32: u8 = 0xdf;

    pub(crate) const fn is_ext(self) -> bool {
        matches!(
            self,
            Self::Ext8
                | Self::Ext16
                | Self::Ext32
                | Self::FixExt1
                | Self::FixExt2
                | Self::FixExt4
                | Self::FixExt8
                | Self::FixExt16
        )
    }
}

impl From<u8> for Marker {
    fn from(value: u8) -> Self {
        match value {
            0x00..=0x7f => Self::Pfix(value),
            0x80..=0x8f => Self::FixMap(value & 0x0f),
            0x90..=0x9f => Self::FixArray(value & 0x0f),
            0xa0..=0xbf => Self::FixStr(value & 0x1f),
            0xc0 => Self::Nil,
            0xc1 => Self::Reserved,
            0xc2 => Self::False,
            0xc3 => Self::True,
            0xc4 => Self::Bin8,
            0xc5 => Self::Bin16,
            0xc6 => Self::Bin32,
            0xc7 => Self::Ext8,
            0xc8 => Self::Ext16,
            0xc9 => Self::Ext32,
            0xca => Self::F32,
            0xcb => Self::F64,
            0xcc => Self::U8,
            0xcd => Self::U16,
            0xce => Self::U32,
            0xcf => Self::U64,
            0xd0 => Self::I8,
            0xd1 => Self::I16,
            0xd2 => Self::I32,
            0xd3 => Self::I64,
            0xd4 => Self::FixExt1,
            0xd5 => Self::FixExt2,
            0xd6 => Self::FixExt4,
            0xd7 => Self::FixExt8,
            0xd8 => Self::FixExt16,
            0xd9 => Self::Str8,
            0xda => Self::Str16,
            0xdb => Self::Str32,
            0xdc => Self::Array16,
            0xdd => Self::Array32,
            0xde => Self::Map16,
            0xdf => Self::Map32,
            0xe0..=0xff => Self::Nfix(value as i8),
        }
    }
}

/// Byte sink the encoder writes into. Every method returns the number of bytes it accounted for,
/// so the same encoding routine can compute sizes (through [`Sink`]) and write the actual bytes.
pub(crate) trait Write {
    fn write_u8(&mut self, v: u8) -> usize;
    fn write_u16(&mut self, v: u16) -> usize;
    fn write_u32(&mut self, v: u32) -> usize;
    fn write_u64(&mut self, v: u64) -> usize;
    fn write_i8(&mut self, v: i8) -> usize;
    fn write_i16(&mut self, v: i16) -> usize;
    fn write_i32(&mut self, v: i32) -> usize;
    fn write_i64(&mut self, v: i64) -> usize;
    fn write_f32(&mut self, v: f32) -> usize;
    fn write_f64(&mut self, v: f64) -> usize;
    fn write_bytes(&mut self, v: &[u8]) -> usize;
}

/// Writer that discards everything, only counting the bytes.
pub(crate) struct Sink;

impl Write for Sink {
    fn write_u8(&mut self, _: u8) -> usize {
        mem::size_of::<u8>()
    }

    fn write_u16(&mut self, _: u16) -> usize {
        mem::size_of::<u16>()
    }

    fn write_u32(&mut self, _: u32) -> usize {
        mem::size_of::<u32>()
    }

    fn write_u64(&mut self, _: u64) -> usize {
        mem::size_of::<u64>()
    }

    fn write_i8(&mut self, _: i8) -> usize {
        mem::size_of::<i8>()
    }

    fn write_i16(&mut self, _: i16) -> usize {
        mem::size_of::<i16>()
    }

    fn write_i32(&mut self, _: i32) -> usize {
        mem::size_of::<i32>()
    }

    fn write_i64(&mut self, _: i64) -> usize {
        mem::size_of::<i64>()
    }

    fn write_f32(&mut self, _: f32) -> usize {
        mem::size_of::<f32>()
    }

    fn write_f64(&mut self, _: f64) -> usize {
        mem::size_of::<f64>()
    }

    fn write_bytes(&mut self, v: &[u8]) -> usize {
        v.len()
    }
}

impl Write for BytesMut {
    #[inline]
    fn write_u8(&mut self, v: u8) -> usize {
        self.put_u8(v);
        mem::size_of::<u8>()
    }

    #[inline]
    fn write_u16(&mut self, v: u16) -> usize {
        self.put_u16(v);
        mem::size_of::<u16>()
    }

    #[inline]
    fn write_u32(&mut self, v: u32) -> usize {
        self.put_u32(v);
        mem::size_of::<u32>()
    }

    #[inline]
    fn write_u64(&mut self, v: u64) -> usize {
        self.put_u64(v);
        mem::size_of::<u64>()
    }

    #[inline]
    fn write_i8(&mut self, v: i8) -> usize {
        self.put_i8(v);
        mem::size_of::<i8>()
    }

    #[inline]
    fn write_i16(&mut self, v: i16) -> usize {
        self.put_i16(v);
        mem::size_of::<i16>()
    }

    #[inline]
    fn write_i32(&mut self, v: i32) -> usize {
        self.put_i32(v);
        mem::size_of::<i32>()
    }

    #[inline]
    fn write_i64(&mut self, v: i64) -> usize {
        self.put_i64(v);
        mem::size_of::<i64>()
    }

    #[inline]
    fn write_f32(&mut self, v: f32) -> usize {
        self.put_f32(v);
        mem::size_of::<f32>()
    }

    #[inline]
    fn write_f64(&mut self, v: f64) -> usize {
        self.put_f64(v);
        mem::size_of::<f64>()
    }

    #[inline]
    fn write_bytes(&mut self, v: &[u8]) -> usize {
        self.put_slice(v);
        v.len()
    }
}
