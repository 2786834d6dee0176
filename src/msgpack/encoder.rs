use std::collections::HashMap;

use super::{BlobType, Marker, Write};
use crate::{
    operations::cdt::Argument,
    value::{FloatValue, MapKey, Value},
};

pub(crate) fn pack_value(w: &mut impl Write, val: &Value) -> usize {
    match val {
        Value::Nil => pack_nil(w),
        Value::Int(val) => pack_integer(w, *val),
        Value::Uint(val) => pack_u64(w, *val),
        Value::Bool(val) => pack_bool(w, *val),
        Value::String(val) => pack_blob(w, BlobType::String, val.as_bytes()),
        Value::Float(val) => pack_float(w, *val),
        Value::Blob(val) => pack_blob(w, BlobType::Blob, val),
        Value::List(val) => pack_array(w, val),
        Value::HashMap(val) => pack_map(w, val),
        Value::GeoJson(val) => pack_blob(w, BlobType::GeoJson, val.as_bytes()),
    }
}

pub(crate) fn pack_map_key(w: &mut impl Write, key: &MapKey) -> usize {
    match key {
        MapKey::Int(val) => pack_integer(w, *val),
        MapKey::Uint(val) => pack_u64(w, *val),
        MapKey::String(val) => pack_blob(w, BlobType::String, val.as_bytes()),
        MapKey::Blob(val) => pack_blob(w, BlobType::Blob, val),
        MapKey::Float(val) => pack_float(w, *val),
    }
}

pub(crate) fn pack_argument(w: &mut impl Write, arg: &Argument<'_>) -> usize {
    match *arg {
        Argument::Byte(byte) => pack_integer(w, i64::from(byte)),
        Argument::Int(int) => pack_integer(w, int),
        Argument::Value(value) => pack_value(w, value),
        Argument::List(list) => pack_array(w, list),
        Argument::Map(map) => pack_map(w, map),
    }
}

/// Write key/value pairs as a single MessagePack map, keeping the given order. Ordered maps start
/// with an extension entry and a nil value, which tell the reader to keep the map sorted by key.
pub(crate) fn pack_entries(
    w: &mut impl Write,
    entries: &[(MapKey, Value)],
    ordered: bool,
) -> usize {
    let mut size = if ordered {
        pack_map_begin(w, entries.len() + 1) + pack_ext_header(w, KEY_ORDERED) + pack_nil(w)
    } else {
        pack_map_begin(w, entries.len())
    };
    for (key, val) in entries {
        size += pack_map_key(w, key);
        size += pack_value(w, val);
    }
    size
}

fn pack_array(w: &mut impl Write, values: &[Value]) -> usize {
    let mut size = pack_array_begin(w, values.len());
    for val in values {
        size += pack_value(w, val);
    }
    size
}

/// Entries are written sorted by key, so equal maps always produce the same bytes.
fn pack_map(w: &mut impl Write, map: &HashMap<MapKey, Value>) -> usize {
    let mut entries = map.iter().collect::<Vec<_>>();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

    let mut size = pack_map_begin(w, entries.len());
    for (key, val) in entries {
        size += pack_map_key(w, key);
        size += pack_value(w, val);
    }
    size
}

/// Extension type of the header entry in key ordered maps.
const KEY_ORDERED: u8 = 1;

fn pack_ext_header(w: &mut impl Write, ext_type: u8) -> usize {
    w.write_u8(Marker::EXT8) + w.write_u8(0) + w.write_u8(ext_type)
}

fn pack_nil(w: &mut impl Write) -> usize {
    w.write_u8(Marker::NIL)
}

fn pack_bool(w: &mut impl Write, value: bool) -> usize {
    w.write_u8(if value { Marker::TRUE } else { Marker::FALSE })
}

fn pack_map_begin(w: &mut impl Write, length: usize) -> usize {
    match length {
        len if len < 16 => w.write_u8(0x80 | len as u8),
        len if len < 1 << 16 => w.write_u8(Marker::MAP16) + w.write_u16(len as u16),
        len => w.write_u8(Marker::MAP32) + w.write_u32(len as u32),
    }
}

fn pack_array_begin(w: &mut impl Write, length: usize) -> usize {
    match length {
        len if len < 16 => w.write_u8(0x90 | len as u8),
        len if len < 1 << 16 => w.write_u8(Marker::ARRAY16) + w.write_u16(len as u16),
        len => w.write_u8(Marker::ARRAY32) + w.write_u32(len as u32),
    }
}

fn pack_byte_array_begin(w: &mut impl Write, length: usize) -> usize {
    match length {
        len if len < 32 => w.write_u8(0xa0 | len as u8),
        len if len < 1 << 16 => w.write_u8(Marker::STR16) + w.write_u16(len as u16),
        len => w.write_u8(Marker::STR32) + w.write_u32(len as u32),
    }
}

/// String-like values carry their blob type as the first payload byte, which is included in the
/// length header.
fn pack_blob(w: &mut impl Write, ty: BlobType, value: &[u8]) -> usize {
    let mut size = pack_byte_array_begin(w, value.len() + 1);
    size += w.write_u8(ty as u8);
    size += w.write_bytes(value);
    size
}

/// Write an integer in its smallest MessagePack form. The sign is kept as is, so `-1` always
/// encodes as the single byte `0xff`.
pub(crate) fn pack_integer(w: &mut impl Write, val: i64) -> usize {
    match val {
        0..=0x7f => w.write_u8(val as u8),
        0x80..=0xff => w.write_u8(Marker::UINT8) + w.write_u8(val as u8),
        0x100..=0xffff => w.write_u8(Marker::UINT16) + w.write_u16(val as u16),
        0x1_0000..=0xffff_ffff => w.write_u8(Marker::UINT32) + w.write_u32(val as u32),
        0x1_0000_0000..=i64::MAX => w.write_u8(Marker::UINT64) + w.write_u64(val as u64),
        -32..=-1 => w.write_i8(val as i8),
        -0x80..=-33 => w.write_u8(Marker::INT8) + w.write_i8(val as i8),
        -0x8000..=-0x81 => w.write_u8(Marker::INT16) + w.write_i16(val as i16),
        -0x8000_0000..=-0x8001 => w.write_u8(Marker::INT32) + w.write_i32(val as i32),
        i64::MIN..=-0x8000_0001 => w.write_u8(Marker::INT64) + w.write_i64(val),
    }
}

fn pack_u64(w: &mut impl Write, value: u64) -> usize {
    match i64::try_from(value) {
        Ok(value) => pack_integer(w, value),
        Err(_) => w.write_u8(Marker::UINT64) + w.write_u64(value),
    }
}

fn pack_float(w: &mut impl Write, value: FloatValue) -> usize {
    match value {
        FloatValue::F32(value) => w.write_u8(Marker::FLOAT32) + w.write_f32(value.0),
        FloatValue::F64(value) => w.write_u8(Marker::FLOAT64) + w.write_f64(value.0),
    }
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;

    use super::*;
    use crate::msgpack::Sink;

    fn packed(val: &Value) -> Vec<u8> {
        let mut buf = BytesMut::new();
        let size = pack_value(&mut buf, val);
        assert_eq!(size, buf.len());
        assert_eq!(size, pack_value(&mut Sink, val));
        buf.to_vec()
    }

    #[test]
    fn integer_forms() {
        assert_eq!(vec![0x00], packed(&Value::from(0)));
        assert_eq!(vec![0x7f], packed(&Value::from(127)));
        assert_eq!(vec![0xcc, 0x80], packed(&Value::from(128)));
        assert_eq!(vec![0xcd, 0x01, 0x00], packed(&Value::from(256)));
        assert_eq!(
            vec![0xce, 0x00, 0x01, 0x00, 0x00],
            packed(&Value::from(65_536))
        );
        assert_eq!(
            vec![0xcf, 0, 0, 0, 0x01, 0, 0, 0, 0],
            packed(&Value::from(1_i64 << 32))
        );
        assert_eq!(vec![0xff], packed(&Value::from(-1)));
        assert_eq!(vec![0xe0], packed(&Value::from(-32)));
        assert_eq!(vec![0xd0, 0xdf], packed(&Value::from(-33)));
        assert_eq!(vec![0xd1, 0xff, 0x7f], packed(&Value::from(-129)));
        assert_eq!(
            vec![0xd2, 0xff, 0xff, 0x7f, 0xff],
            packed(&Value::from(-32_769))
        );
        assert_eq!(
            vec![0xd3, 0x80, 0, 0, 0, 0, 0, 0, 0],
            packed(&Value::from(i64::MIN))
        );
        assert_eq!(
            vec![0xcf, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff],
            packed(&Value::from(u64::MAX))
        );
    }

    #[test]
    fn strings_carry_blob_type() {
        assert_eq!(vec![0xa3, 0x03, b'a', b'b'], packed(&Value::from("ab")));
        assert_eq!(vec![0xa2, 0x04, 0x07], packed(&Value::from(vec![7_u8])));
        assert_eq!(vec![0xa1, 0x03], packed(&Value::from("")));

        let long = "x".repeat(40);
        let bytes = packed(&Value::from(long.as_str()));
        assert_eq!(&[0xda, 0x00, 41, 0x03], &bytes[..4]);
        assert_eq!(44, bytes.len());
    }

    #[test]
    fn containers() {
        assert_eq!(
            vec![0x92, 0x01, 0xc0],
            packed(&Value::from(vec![Value::from(1), Value::Nil]))
        );
        assert_eq!(
            vec![0x81, 0xa2, 0x03, b'k', 0xc3],
            packed(&crate::map!("k" => true))
        );

        let list = (0..20).map(Value::from).collect::<Vec<_>>();
        let bytes = packed(&Value::from(list));
        assert_eq!(&[0xdc, 0x00, 20], &bytes[..3]);
    }

    #[test]
    fn maps_are_sorted_by_key() {
        let build = |keys: &mut dyn Iterator<Item = i64>| {
            Value::from(
                keys.map(|k| (MapKey::from(k), Value::from(k * 10)))
                    .collect::<HashMap<_, _>>(),
            )
        };
        let forward = packed(&build(&mut (0..12)));
        let backward = packed(&build(&mut (0..12).rev()));

        assert_eq!(forward, backward);
        assert_eq!(&[0x8c, 0x00, 0x00, 0x01, 0x0a, 0x02, 0x14], &forward[..7]);

        for _ in 0..16 {
            assert_eq!(forward, packed(&build(&mut (0..12))));
        }
    }

    #[test]
    fn blob_keys() {
        let map = [(MapKey::from(vec![1_u8]), Value::from(1))]
            .into_iter()
            .collect::<HashMap<_, _>>();
        assert_eq!(vec![0x81, 0xa2, 0x04, 0x01, 0x01], packed(&Value::from(map)));
    }

    #[test]
    fn entries_keep_order() {
        let mut buf = BytesMut::new();
        pack_entries(
            &mut buf,
            &[
                (MapKey::from(2), Value::from(20)),
                (MapKey::from(1), Value::from(10)),
            ],
            false,
        );
        assert_eq!(&[0x82, 0x02, 0x14, 0x01, 0x0a], &buf[..]);

        buf.clear();
        let size = pack_entries(&mut buf, &[(MapKey::from(1), Value::from(2))], true);
        assert_eq!(&[0x82, 0xc7, 0x00, 0x01, 0xc0, 0x01, 0x02], &buf[..]);
        assert_eq!(size, buf.len());
    }
}
