use std::collections::HashMap;

use tracing::trace;

use super::{BlobType, Marker, MsgpackError, Result};
use crate::{
    commands::buffer::Buffer,
    value::{MapKey, Value},
};

/// Entries of a MessagePack map in wire order.
#[derive(Debug, Default)]
pub(crate) struct MapEntries {
    /// Whether the map started with the extension entry the server uses to flag ordered maps.
    pub ordered: bool,
    pub entries: Vec<(MapKey, Value)>,
}

/// Deepest container nesting accepted in a value. Anything below it is rejected instead of
/// recursing further.
const MAX_DEPTH: usize = 64;

pub(crate) fn unpack_value(buf: &mut Buffer<'_>) -> Result<Value> {
    unpack_nested(buf, 0)
}

fn unpack_nested(buf: &mut Buffer<'_>, depth: usize) -> Result<Value> {
    let byte = buf.read_u8()?;
    let marker = Marker::from(byte);

    if depth >= MAX_DEPTH && is_container(marker) {
        trace!(depth, marker = byte, "value nested too deep");
        return Err(MsgpackError::UnsupportedType(byte));
    }

    match marker {
        Marker::Pfix(value) => Ok(Value::from(value)),
        Marker::Nfix(value) => Ok(Value::from(value)),
        Marker::FixMap(len) => unpack_map(buf, len.into(), depth + 1),
        Marker::FixArray(len) => unpack_array(buf, len.into(), depth + 1),
        Marker::FixStr(len) => unpack_blob(buf, len.into()),
        Marker::Nil => Ok(Value::Nil),
        Marker::False => Ok(Value::from(false)),
        Marker::True => Ok(Value::from(true)),
        Marker::Bin8 | Marker::Str8 => {
            let count = buf.read_u8()?;
            unpack_blob(buf, count.into())
        }
        Marker::Bin16 | Marker::Str16 => {
            let count = buf.read_u16()?;
            unpack_blob(buf, count.into())
        }
        Marker::Bin32 | Marker::Str32 => {
            let count = buf.read_u32()?;
            unpack_blob(buf, count as usize)
        }
        Marker::F32 => Ok(Value::from(buf.read_f32()?)),
        Marker::F64 => Ok(Value::from(buf.read_f64()?)),
        Marker::U8 => Ok(Value::from(buf.read_u8()?)),
        Marker::U16 => Ok(Value::from(buf.read_u16()?)),
        Marker::U32 => Ok(Value::from(buf.read_u32()?)),
        Marker::U64 => Ok(unsigned(buf.read_u64()?)),
        Marker::I8 => Ok(Value::from(buf.read_i8()?)),
        Marker::I16 => Ok(Value::from(buf.read_i16()?)),
        Marker::I32 => Ok(Value::from(buf.read_i32()?)),
        Marker::I64 => Ok(Value::from(buf.read_i64()?)),
        Marker::Array16 => {
            let count = buf.read_u16()?;
            unpack_array(buf, count.into(), depth + 1)
        }
        Marker::Array32 => {
            let count = buf.read_u32()?;
            unpack_array(buf, count as usize, depth + 1)
        }
        Marker::Map16 => {
            let count = buf.read_u16()?;
            unpack_map(buf, count.into(), depth + 1)
        }
        Marker::Map32 => {
            let count = buf.read_u32()?;
            unpack_map(buf, count as usize, depth + 1)
        }
        // Extensions only appear as the leading element of ordered lists and maps, which
        // `unpack_array` and `unpack_map` consume. Anywhere else they would silently lose data.
        Marker::Reserved
        | Marker::Ext8
        | Marker::Ext16
        | Marker::Ext32
        | Marker::FixExt1
        | Marker::FixExt2
        | Marker::FixExt4
        | Marker::FixExt8
        | Marker::FixExt16 => Err(MsgpackError::UnsupportedType(byte)),
    }
}

const fn is_container(marker: Marker) -> bool {
    matches!(
        marker,
        Marker::FixMap(_)
            | Marker::FixArray(_)
            | Marker::Array16
            | Marker::Array32
            | Marker::Map16
            | Marker::Map32
    )
}

fn unpack_map_key(buf: &mut Buffer<'_>, depth: usize) -> Result<MapKey> {
    let marker = buf.peek();
    let value = unpack_nested(buf, depth)?;

    MapKey::try_from(value).map_err(|_| MsgpackError::UnexpectedMarker {
        expected: "map key",
        marker: marker.unwrap_or_default(),
    })
}

/// Read a map and keep its entries in the order they were sent.
pub(crate) fn unpack_entries(buf: &mut Buffer<'_>) -> Result<MapEntries> {
    let byte = buf.read_u8()?;
    let count = match Marker::from(byte) {
        Marker::FixMap(len) => len.into(),
        Marker::Map16 => buf.read_u16()?.into(),
        Marker::Map32 => buf.read_u32()? as usize,
        _ => {
            return Err(MsgpackError::UnexpectedMarker {
                expected: "map",
                marker: byte,
            })
        }
    };

    let (ordered, count) = skip_ext_header(buf, count, true, 1)?;

    let mut entries = Vec::with_capacity(count.min(buf.remaining()));
    for _ in 0..count {
        let key = unpack_map_key(buf, 1)?;
        let val = unpack_nested(buf, 1)?;
        entries.push((key, val));
    }

    Ok(MapEntries { ordered, entries })
}

fn unpack_array(buf: &mut Buffer<'_>, count: usize, depth: usize) -> Result<Value> {
    let (_, count) = skip_ext_header(buf, count, false, depth)?;

    // Guard the pre-allocation against corrupted counts, each element needs at least one byte.
    let mut list = Vec::with_capacity(count.min(buf.remaining()));
    for _ in 0..count {
        list.push(unpack_nested(buf, depth)?);
    }

    Ok(Value::from(list))
}

fn unpack_map(buf: &mut Buffer<'_>, count: usize, depth: usize) -> Result<Value> {
    let (_, count) = skip_ext_header(buf, count, true, depth)?;

    let mut map = HashMap::with_capacity(count.min(buf.remaining()));
    for _ in 0..count {
        let key = unpack_map_key(buf, depth)?;
        let val = unpack_nested(buf, depth)?;
        map.insert(key, val);
    }

    Ok(Value::from(map))
}

/// Ordered lists and maps start with an extension element (and a nil value for maps) that
/// carries the ordering flags. Consume it and return the remaining element count.
fn skip_ext_header(
    buf: &mut Buffer<'_>,
    count: usize,
    map: bool,
    depth: usize,
) -> Result<(bool, usize)> {
    let is_ext = buf.peek().map_or(false, |b| Marker::from(b).is_ext());
    if count == 0 || !is_ext {
        return Ok((false, count));
    }

    let byte = buf.read_u8()?;
    let len = match Marker::from(byte) {
        Marker::FixExt1 => 1,
        Marker::FixExt2 => 2,
        Marker::FixExt4 => 4,
        Marker::FixExt8 => 8,
        Marker::FixExt16 => 16,
        Marker::Ext8 => usize::from(buf.read_u8()?),
        Marker::Ext16 => usize::from(buf.read_u16()?),
        _ => buf.read_u32()? as usize,
    };
    let ext_type = buf.read_u8()?;
    buf.advance(len)?;
    trace!(ext_type, len, "skipped ordering extension header");

    if map {
        unpack_nested(buf, depth)?;
    }

    Ok((true, count - 1))
}

fn unpack_blob(buf: &mut Buffer<'_>, count: usize) -> Result<Value> {
    if count == 0 {
        return Ok(Value::Blob(Vec::new()));
    }

    let vtype = buf.read_u8()?;
    let count = count - 1;

    match BlobType::try_from(vtype)? {
        BlobType::String => Ok(Value::String(buf.read_str(count)?)),
        BlobType::Blob => Ok(Value::Blob(buf.read_blob(count)?)),
        BlobType::GeoJson => Ok(Value::GeoJson(buf.read_str(count)?)),
    }
}

/// The encoder uses the `u64` form for any integer above `u32::MAX`, so only values that don't
/// fit an `i64` become [`Value::Uint`].
fn unsigned(value: u64) -> Value {
    i64::try_from(value).map_or(Value::Uint(value), Value::Int)
}
