//! Response layout of a single map operation:
//!
//! ```text
//! offset 0  u8   result code
//! offset 1  u8   shape flags
//! offset 2  u32  payload length, big-endian
//! offset 6  ..   payload, empty or one MessagePack value
//! ```

use std::collections::{BTreeMap, HashMap};

use bitflags::bitflags;
use bytes::{BufMut, Bytes, BytesMut};
use tracing::{debug, trace};

use super::buffer::Buffer;
use crate::{
    errors::{Error, Result},
    msgpack::{decoder, encoder, Marker, Sink},
    operations::map::ReturnType,
    policy::CodecPolicy,
    result_code::ResultCode,
    selection::{MapResult, SelectionResult},
    value::{MapKey, Value},
};

/// Size of the fixed response header, in bytes.
pub const HEADER_SIZE: usize = 6;

bitflags! {
    /// Describes how the payload of a response is shaped.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct ResponseFlags: u8 {
        /// The payload is a list of results, rather than a single one.
        const LIST = 1;
        /// Key/value results come from a key ordered map.
        const ORDERED_MAP = 1 << 1;
    }
}

/// Fixed header in front of every response.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ResponseHeader {
    pub result_code: ResultCode,
    pub flags: ResponseFlags,
    pub payload_len: usize,
}

impl ResponseHeader {
    fn parse(buf: &mut Buffer<'_>) -> Result<Self> {
        if buf.remaining() < HEADER_SIZE {
            return Err(Error::TruncatedResponse {
                needed: HEADER_SIZE,
                remaining: buf.remaining(),
            });
        }

        let result_code = ResultCode::from(buf.read_u8()?);
        let flags = buf.read_u8()?;
        let flags = ResponseFlags::from_bits(flags).ok_or(Error::UnsupportedType(flags))?;

        Ok(Self {
            result_code,
            flags,
            payload_len: buf.read_u32()? as usize,
        })
    }
}

/// Payload of a response built with [`encode_response`].
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// No payload at all.
    None,
    /// A single value.
    Value(Value),
    /// Key/value items, written as one map in the given order.
    Entries(Vec<(MapKey, Value)>),
}

/// A response to be sent back for a request, used by fakes and test servers.
#[derive(Clone, Debug, PartialEq)]
pub struct Response {
    pub result_code: ResultCode,
    pub flags: ResponseFlags,
    pub payload: Payload,
}

impl Response {
    #[must_use]
    pub const fn ok(flags: ResponseFlags, payload: Payload) -> Self {
        Self {
            result_code: ResultCode::Ok,
            flags,
            payload,
        }
    }

    #[must_use]
    pub const fn error(result_code: ResultCode) -> Self {
        Self {
            result_code,
            flags: ResponseFlags::empty(),
            payload: Payload::None,
        }
    }
}

/// Encode a response. Entries flagged with [`ResponseFlags::ORDERED_MAP`] get the extension
/// header of ordered maps.
pub fn encode_response(response: &Response) -> Result<Bytes> {
    let ordered = response.flags.contains(ResponseFlags::ORDERED_MAP);
    let payload_len = match &response.payload {
        Payload::None => 0,
        Payload::Value(value) => encoder::pack_value(&mut Sink, value),
        Payload::Entries(entries) => encoder::pack_entries(&mut Sink, entries, ordered),
    };

    if payload_len > u32::MAX as usize {
        return Err(Error::EncodingOverflow {
            what: "response payload",
            size: payload_len,
            max: u32::MAX as usize,
        });
    }

    let mut buf = BytesMut::with_capacity(HEADER_SIZE + payload_len);
    buf.put_u8(response.result_code.into());
    buf.put_u8(response.flags.bits());
    buf.put_u32(payload_len as u32);
    let written = match &response.payload {
        Payload::None => 0,
        Payload::Value(value) => encoder::pack_value(&mut buf, value),
        Payload::Entries(entries) => encoder::pack_entries(&mut buf, entries, ordered),
    };
    debug_assert_eq!(payload_len, written);

    Ok(buf.freeze())
}

/// Decode a response into the result shape the return type asks for.
pub(crate) fn decode(
    data: &[u8],
    return_type: ReturnType,
    policy: &CodecPolicy,
) -> Result<SelectionResult> {
    let mut buf = Buffer::new(data);
    let header = ResponseHeader::parse(&mut buf)?;

    if !header.result_code.is_ok() {
        debug!(result_code = ?header.result_code, %return_type, "server returned an error");
        return Err(Error::ServerError(header.result_code));
    }

    if header.payload_len > policy.max_response_size {
        return Err(Error::ResponseTooLarge {
            size: header.payload_len,
            max: policy.max_response_size,
        });
    }

    let mut payload = buf.split_to(header.payload_len)?;
    if !buf.is_empty() {
        return Err(Error::TrailingBytes(buf.remaining()));
    }

    let result = decode_payload(&mut payload, return_type, header.flags)?;
    if !payload.is_empty() {
        return Err(Error::TrailingBytes(payload.remaining()));
    }

    trace!(
        %return_type,
        flags = header.flags.bits(),
        size = data.len(),
        shape = ?result.shape(),
        "decoded map operation response"
    );
    Ok(result)
}

fn decode_payload(
    payload: &mut Buffer<'_>,
    return_type: ReturnType,
    flags: ResponseFlags,
) -> Result<SelectionResult> {
    let list = flags.contains(ResponseFlags::LIST);

    if return_type == ReturnType::KeyValue {
        return decode_entries(payload, flags).map(SelectionResult::Map);
    }

    let value = if payload.is_empty() {
        None
    } else {
        Some(decoder::unpack_value(payload)?).filter(|v| *v != Value::Nil)
    };

    Ok(match (return_type, value) {
        (ReturnType::None, None) => SelectionResult::Absent,
        (ReturnType::None, Some(v)) => return Err(unexpected("no result", &v)),
        (ReturnType::Count, Some(v)) => SelectionResult::Scalar(expect_int(v)?),
        (ReturnType::Count, None) => {
            return Err(Error::UnexpectedValue {
                expected: "count",
                found: "nothing".to_owned(),
            })
        }
        (rt, Some(v)) if rt.is_positional() && list => SelectionResult::List(
            expect_list(v)?
                .into_iter()
                .map(expect_int)
                .collect::<Result<_>>()?,
        ),
        (rt, Some(v)) if rt.is_positional() => SelectionResult::Scalar(expect_int(v)?),
        (_, Some(v)) if list => SelectionResult::List(expect_list(v)?),
        (ReturnType::Key | ReturnType::Value, None) if list => SelectionResult::List(Vec::new()),
        (_, Some(v)) => SelectionResult::Scalar(v),
        (_, None) => SelectionResult::Absent,
    })
}

/// Key/value items come as one map, optionally led by the extension entry of ordered maps.
fn decode_entries(payload: &mut Buffer<'_>, flags: ResponseFlags) -> Result<MapResult> {
    let map = match payload.peek() {
        None => decoder::MapEntries::default(),
        Some(Marker::NIL) => {
            payload.advance(1)?;
            decoder::MapEntries::default()
        }
        Some(_) => decoder::unpack_entries(payload)?,
    };

    Ok(if flags.contains(ResponseFlags::LIST) {
        MapResult::Pairs(map.entries)
    } else if map.ordered || flags.contains(ResponseFlags::ORDERED_MAP) {
        let mut ordered = BTreeMap::new();
        for (key, value) in map.entries {
            if ordered.contains_key(&key) {
                return Err(duplicate_key(&key));
            }
            ordered.insert(key, value);
        }
        MapResult::Ordered(ordered)
    } else {
        let mut unordered = HashMap::with_capacity(map.entries.len());
        for (key, value) in map.entries {
            if unordered.contains_key(&key) {
                return Err(duplicate_key(&key));
            }
            unordered.insert(key, value);
        }
        MapResult::Unordered(unordered)
    })
}

fn duplicate_key(key: &MapKey) -> Error {
    Error::UnexpectedValue {
        expected: "distinct map keys",
        found: format!("duplicate key {key}"),
    }
}

fn unexpected(expected: &'static str, found: &Value) -> Error {
    Error::UnexpectedValue {
        expected,
        found: found.kind().to_owned(),
    }
}

fn expect_int(value: Value) -> Result<Value> {
    match value {
        Value::Int(_) => Ok(value),
        other => Err(unexpected("int", &other)),
    }
}

fn expect_list(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::List(list) => Ok(list),
        other => Err(unexpected("list", &other)),
    }
}
