//! Request layout of a single map operation:
//!
//! ```text
//! offset 0  u8  op code
//! offset 1  u8  flags: bits 0-3 return type code, bits 4-7 modifiers
//! offset 2  u8  argument count
//! offset 3  ..  arguments, one MessagePack value each
//! ```

use bytes::{BufMut, Bytes, BytesMut};
use tracing::trace;

use super::buffer::Buffer;
use crate::{
    errors::{Error, Result},
    msgpack::{decoder, encoder, Sink},
    operations::map::{split_flags, MapOperation, OpType, ReturnModifiers, ReturnType},
    policy::CodecPolicy,
    value::Value,
};

/// Size of the fixed request header, in bytes.
pub const HEADER_SIZE: usize = 3;

const MAX_ARGUMENTS: usize = u8::MAX as usize;

/// A request decoded back into its parts.
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    pub op: OpType,
    pub return_type: ReturnType,
    pub modifiers: ReturnModifiers,
    pub args: Vec<Value>,
}

impl Request {
    /// Integer argument at `index`, if present.
    #[must_use]
    pub fn int_arg(&self, index: usize) -> Option<i64> {
        self.args.get(index).and_then(Value::as_i64)
    }

    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.modifiers.contains(ReturnModifiers::INVERTED)
    }
}

/// Encode the operation into a request. The size of every argument is computed and checked
/// against the policy before the first byte is written, so a failed call produces nothing.
pub(crate) fn encode(op: &MapOperation<'_>, policy: &CodecPolicy) -> Result<Bytes> {
    let arg_count = op.args.len();
    if arg_count > MAX_ARGUMENTS {
        return Err(Error::EncodingOverflow {
            what: "argument count",
            size: arg_count,
            max: MAX_ARGUMENTS,
        });
    }

    let max = policy.argument_limit();
    let mut size = HEADER_SIZE;
    for arg in &op.args {
        let arg_size = encoder::pack_argument(&mut Sink, arg);
        if arg_size > max {
            return Err(Error::EncodingOverflow {
                what: "argument size",
                size: arg_size,
                max,
            });
        }
        size += arg_size;
    }

    let mut buf = BytesMut::with_capacity(size);
    buf.put_u8(op.op as u8);
    buf.put_u8(op.flags());
    buf.put_u8(arg_count as u8);
    for arg in &op.args {
        encoder::pack_argument(&mut buf, arg);
    }

    trace!(op = ?op.op, flags = op.flags(), args = arg_count, size, "encoded map operation");
    Ok(buf.freeze())
}

/// Parse a request produced by [`Codec::encode`](crate::Codec::encode). Map arguments come back
/// as [`Value::HashMap`], so the wire order of their entries is not kept.
pub fn parse_request(data: &[u8]) -> Result<Request> {
    let mut buf = Buffer::new(data);

    let code = buf.read_u8()?;
    let op = OpType::try_from(code).map_err(Error::UnknownOperation)?;
    let (return_type, modifiers) = split_flags(buf.read_u8()?)?;
    let arg_count = buf.read_u8()?;

    let args = (0..arg_count)
        .map(|_| decoder::unpack_value(&mut buf))
        .collect::<Result<Vec<_>, _>>()?;

    if !buf.is_empty() {
        return Err(Error::TrailingBytes(buf.remaining()));
    }

    trace!(?op, %return_type, args = args.len(), "parsed map operation");
    Ok(Request {
        op,
        return_type,
        modifiers,
        args,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::{
        operations::map::{self, MapPolicy, OrderType, WriteMode},
        value::MapKey,
    };

    fn encode_default(op: &MapOperation<'_>) -> Result<Bytes> {
        encode(op, &CodecPolicy::default())
    }

    #[test]
    fn header_layout() {
        let key = Value::from("a");
        let bytes = encode_default(&map::get_by_key(&key, ReturnType::Value)).unwrap();
        assert_eq!(&[97, 7, 1, 0xa2, 0x03, b'a'], &bytes[..]);

        let bytes = encode_default(&map::size()).unwrap();
        assert_eq!(&[96, 5, 0], &bytes[..]);

        let bytes = encode_default(&map::clear()).unwrap();
        assert_eq!(&[75, 0, 0], &bytes[..]);
    }

    #[test]
    fn negative_index_passes_through() {
        let index = encode_default(&map::get_by_index(-1, ReturnType::Index)).unwrap();
        let reverse = encode_default(&map::get_by_index(-1, ReturnType::ReverseIndex)).unwrap();

        assert_eq!(&[98, 1, 1, 0xff], &index[..]);
        assert_eq!(&[98, 2, 1, 0xff], &reverse[..]);
    }

    #[test]
    fn modifiers_share_flags_byte() {
        let key = Value::from(1);
        let op = map::remove_by_key(&key, ReturnType::KeyValue).inverted();
        let bytes = encode_default(&op).unwrap();
        assert_eq!(0x18, bytes[1]);

        let parsed = parse_request(&bytes).unwrap();
        assert_eq!(ReturnType::KeyValue, parsed.return_type);
        assert!(parsed.is_inverted());
    }

    #[test]
    fn range_arguments() {
        let begin = Value::from(10);
        let op = map::get_by_key_range(&begin, &Value::Nil, ReturnType::Count);
        let bytes = encode_default(&op).unwrap();
        assert_eq!(&[103, 5, 3, 10, 0xc0, 8], &bytes[..]);

        let op = map::get_by_rank_range(-3, 3, ReturnType::Value);
        let bytes = encode_default(&op).unwrap();
        assert_eq!(&[106, 7, 2, 0xfd, 3], &bytes[..]);
    }

    #[test]
    fn put_with_policy() {
        let (k, v) = (Value::from("k"), Value::from(300));
        let policy = MapPolicy::new(OrderType::KeyOrdered, WriteMode::Update);
        let bytes = encode_default(&map::put(policy, &k, &v)).unwrap();
        assert_eq!(
            &[67, 5, 3, 0xa2, 0x03, b'k', 0xcd, 0x01, 0x2c, 0x01],
            &bytes[..]
        );

        let parsed = parse_request(&bytes).unwrap();
        assert_eq!(OpType::Put, parsed.op);
        assert_eq!(vec![k, v, Value::from(1)], parsed.args);
        assert_eq!(Some(1), parsed.int_arg(2));
    }

    #[test]
    fn deterministic() {
        let build = || {
            (0..10)
                .map(|i| (MapKey::from(format!("key{i}")), Value::from(i)))
                .collect::<HashMap<_, _>>()
        };
        let items = build();
        let expected = encode_default(&map::put_items(MapPolicy::default(), &items)).unwrap();

        for _ in 0..20 {
            let items = build();
            let op = map::put_items(MapPolicy::default(), &items);
            assert_eq!(expected, encode_default(&op).unwrap());
        }
    }

    #[test]
    fn oversized_argument_writes_nothing() {
        let blob = Value::from(vec![0_u8; 64]);
        let op = map::get_by_value(&blob, ReturnType::Count);
        let policy = CodecPolicy::new(16, CodecPolicy::DEFAULT_MAX_RESPONSE_SIZE);

        match encode(&op, &policy) {
            Err(Error::EncodingOverflow { what, size, max }) => {
                assert_eq!("argument size", what);
                assert_eq!(68, size);
                assert_eq!(16, max);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn too_many_arguments() {
        let mut op = map::clear();
        op.args = vec![crate::operations::cdt::Argument::Int(0); 256];

        assert!(matches!(
            encode_default(&op),
            Err(Error::EncodingOverflow {
                what: "argument count",
                size: 256,
                max: 255
            })
        ));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            parse_request(&[1, 0, 0]),
            Err(Error::UnknownOperation(1))
        ));
        assert!(matches!(
            parse_request(&[97, 9, 0]),
            Err(Error::InvalidReturnType(9))
        ));
        assert!(matches!(
            parse_request(&[97, 7, 1]),
            Err(Error::TruncatedResponse {
                needed: 1,
                remaining: 0
            })
        ));
        assert!(matches!(
            parse_request(&[75, 0, 0, 0]),
            Err(Error::TrailingBytes(1))
        ));
    }
}
