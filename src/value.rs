use std::{collections::HashMap, fmt};

use ordered_float::OrderedFloat;

macro_rules! from {
    ($to:ty, $variant:ident, $($from:ty),+) => {
        $(impl From<$from> for $to {
            fn from(value: $from) -> Self {
                Self::$variant(value.into())
            }
        })+
    };
}

/// Container for floating point values stored inside a map.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum FloatValue {
    /// 32-bit floating point number.
    F32(OrderedFloat<f32>),
    /// 64-bit floating point number.
    F64(OrderedFloat<f64>),
}

impl FloatValue {
    /// If this value is a 32-bit floating point number, return the associated `f32`. Return `None`
    /// otherwise.
    ///
    /// ```
    /// # use mapwire::FloatValue;
    /// let v = FloatValue::from(5.0_f32);
    ///
    /// assert_eq!(Some(5.0), v.as_f32());
    /// assert_eq!(None, v.as_f64());
    /// ```
    #[inline]
    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::F32(value) => Some(value.0),
            Self::F64(_) => None,
        }
    }

    /// If this value is a 64-bit floating point number, return the associated `f64`. Return `None`
    /// otherwise.
    ///
    /// ```
    /// # use mapwire::FloatValue;
    /// let v = FloatValue::from(5.0_f64);
    ///
    /// assert_eq!(Some(5.0), v.as_f64());
    /// assert_eq!(None, v.as_f32());
    /// ```
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F32(_) => None,
            Self::F64(value) => Some(value.0),
        }
    }
}

from!(FloatValue, F32, f32);
from!(FloatValue, F64, f64);

impl fmt::Display for FloatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::F32(value) => value.fmt(f),
            Self::F64(value) => value.fmt(f),
        }
    }
}

/// Key of a map entry, which is a subset of the [`Value`] type, as only a limited set of its
/// variants are allowed to be used as map keys.
///
/// The variant order follows the server's ordering across key types (integers, then strings, then
/// blobs, then floats), so a [`BTreeMap`](std::collections::BTreeMap) of keys iterates like a key-ordered map
/// on the server.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum MapKey {
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit unsigned integer, only produced for values above [`i64::MAX`].
    Uint(u64),
    /// String value
    String(String),
    /// Byte vector value.
    Blob(Vec<u8>),
    /// Floating point number.
    Float(FloatValue),
}

impl MapKey {
    /// If this value is a 64-bit signed integer, return the associated `i64`. Return `None`
    /// otherwise.
    ///
    /// ```
    /// # use mapwire::MapKey;
    /// let v = MapKey::from(10_i64);
    ///
    /// assert_eq!(Some(10), v.as_i64());
    /// assert_eq!(None, v.as_str());
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// If this value is a string, return the associated `&str`. Return `None` otherwise.
    ///
    /// ```
    /// # use mapwire::MapKey;
    /// let v = MapKey::from("key");
    ///
    /// assert_eq!(Some("key"), v.as_str());
    /// assert_eq!(None, v.as_i64());
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(value) => value.as_f64(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            Self::Blob(value) => Some(value),
            _ => None,
        }
    }
}

from!(MapKey, Int, i8, i16, i32, i64, u8, u16, u32);
from!(MapKey, Uint, u64);
from!(MapKey, Float, f32, f64);
from!(MapKey, String, &str, String);
from!(MapKey, Blob, &[u8], Vec<u8>);

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => value.fmt(f),
            Self::Uint(value) => value.fmt(f),
            Self::String(value) => value.fmt(f),
            Self::Blob(value) => write!(f, "{value:?}"),
            Self::Float(value) => value.fmt(f),
        }
    }
}

impl TryFrom<Value> for MapKey {
    type Error = Value;

    /// Convert a value into a map key, handing the value back if its variant can't be used as a
    /// key.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Ok(match value {
            Value::Int(v) => Self::Int(v),
            Value::Uint(v) => Self::Uint(v),
            Value::String(v) => Self::String(v),
            Value::Blob(v) => Self::Blob(v),
            Value::Float(v) => Self::Float(v),
            other => return Err(other),
        })
    }
}

/// Container for the values that map operations carry as arguments and return as results.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    /// Empty value.
    Nil,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit unsigned integer. Decoding only yields this variant for values above [`i64::MAX`].
    Uint(u64),
    /// 32-bit or 64-bit Floating point number.
    Float(FloatValue),
    /// String value.
    String(String),
    /// Byte vector value.
    Blob(Vec<u8>),
    /// Ordered collection of values, that can contain any other value.
    List(Vec<Value>),
    /// Key-value pair collection of values.
    HashMap(HashMap<MapKey, Value>),
    /// String value that contains GeoJSON.
    GeoJson(String),
}

impl Value {
    /// If this value is a boolean, return the associated `bool`. Return `None` otherwise.
    ///
    /// ```
    /// # use mapwire::Value;
    /// let v = Value::from(true);
    ///
    /// assert_eq!(Some(true), v.as_bool());
    /// assert_eq!(None, v.as_i64());
    /// ```
    #[inline]
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// If this value is a 64-bit signed integer, return the associated `i64`. Return `None`
    /// otherwise.
    ///
    /// ```
    /// # use mapwire::Value;
    /// let v = Value::from(10_i64);
    ///
    /// assert_eq!(Some(10), v.as_i64());
    /// assert_eq!(None, v.as_str());
    /// ```
    #[inline]
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// If this value is a string, return the associated `&str`. Return `None` otherwise.
    ///
    /// ```
    /// # use mapwire::Value;
    /// let v = Value::from("value");
    ///
    /// assert_eq!(Some("value"), v.as_str());
    /// assert_eq!(None, v.as_i64());
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// If this value is a blob, return the associated `&[u8]`. Return `None` otherwise.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Blob(value) => Some(value.as_slice()),
            _ => None,
        }
    }

    /// If this value is a list, return the associated `&[Value]`. Return `None` otherwise.
    ///
    /// ```
    /// # use mapwire::Value;
    /// let v = Value::from(vec![Value::from(1), Value::from("value")]);
    ///
    /// assert_eq!(Some(&[1.into(), "value".into()][..]), v.as_list());
    /// assert_eq!(None, v.as_i64());
    /// ```
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(value) => Some(value.as_slice()),
            _ => None,
        }
    }

    /// If this value is a hash map, return the associated `&HashMap<MapKey, Value>`. Return
    /// `None` otherwise.
    #[inline]
    #[must_use]
    pub fn as_hash_map(&self) -> Option<&HashMap<MapKey, Value>> {
        match self {
            Self::HashMap(value) => Some(value),
            _ => None,
        }
    }

    /// Name of the variant, used in error messages.
    pub(crate) const fn kind(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Uint(_) => "uint",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Blob(_) => "blob",
            Self::List(_) => "list",
            Self::HashMap(_) => "map",
            Self::GeoJson(_) => "geojson",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("<null>"),
            Self::Int(value) => value.fmt(f),
            Self::Uint(value) => value.fmt(f),
            Self::Bool(value) => value.fmt(f),
            Self::Float(value) => value.fmt(f),
            Self::String(value) | Self::GeoJson(value) => value.fmt(f),
            Self::Blob(value) => write!(f, "{value:?}"),
            Self::List(value) => write!(f, "{value:?}"),
            Self::HashMap(value) => write!(f, "{value:?}"),
        }
    }
}

from!(Value, Bool, bool);
from!(Value, Int, i8, i16, i32, i64, u8, u16, u32);
from!(Value, Uint, u64);
from!(Value, Float, f32, f64);
from!(Value, String, &str, String);
from!(Value, Blob, &[u8], Vec<u8>);
from!(Value, List, &[Self], Vec<Self>);
from!(Value, HashMap, HashMap<MapKey, Self>);

impl From<FloatValue> for Value {
    fn from(value: FloatValue) -> Self {
        Self::Float(value)
    }
}

impl From<MapKey> for Value {
    fn from(value: MapKey) -> Self {
        match value {
            MapKey::Int(value) => value.into(),
            MapKey::Uint(value) => value.into(),
            MapKey::Float(value) => value.into(),
            MapKey::String(value) => value.into(),
            MapKey::Blob(value) => value.into(),
        }
    }
}
