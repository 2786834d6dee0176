//! Typed results of decoded map operations.

use std::collections::{BTreeMap, HashMap};

use crate::value::{MapKey, Value};

/// Key/value items returned for [`ReturnType::KeyValue`](crate::operations::map::ReturnType).
#[derive(Clone, Debug, PartialEq)]
pub enum MapResult {
    /// Items of an unordered map.
    Unordered(HashMap<MapKey, Value>),
    /// Items of a key ordered map.
    Ordered(BTreeMap<MapKey, Value>),
    /// Items in the order the server sent them, for range results and pair list requests.
    Pairs(Vec<(MapKey, Value)>),
}

impl MapResult {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Unordered(map) => map.len(),
            Self::Ordered(map) => map.len(),
            Self::Pairs(pairs) => pairs.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up the value for a key. Linear for [`MapResult::Pairs`].
    #[must_use]
    pub fn get(&self, key: &MapKey) -> Option<&Value> {
        match self {
            Self::Unordered(map) => map.get(key),
            Self::Ordered(map) => map.get(key),
            Self::Pairs(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
        }
    }

    /// Consume the result into its pairs. Unordered maps yield their pairs in arbitrary order.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(MapKey, Value)> {
        match self {
            Self::Unordered(map) => map.into_iter().collect(),
            Self::Ordered(map) => map.into_iter().collect(),
            Self::Pairs(pairs) => pairs,
        }
    }
}

/// Outcome of decoding a response, shaped by the requested return type.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectionResult {
    /// Nothing was returned.
    Absent,
    /// A single value: a count, a position, a key or a value.
    Scalar(Value),
    /// Several positions, keys or values.
    List(Vec<Value>),
    /// Key/value items.
    Map(MapResult),
}

impl SelectionResult {
    #[must_use]
    pub const fn shape(&self) -> ResultShape {
        match self {
            Self::Absent => ResultShape::Absent,
            Self::Scalar(_) => ResultShape::Scalar,
            Self::List(_) => ResultShape::List,
            Self::Map(MapResult::Unordered(_)) => ResultShape::UnorderedMap,
            Self::Map(MapResult::Ordered(_)) => ResultShape::OrderedMap,
            Self::Map(MapResult::Pairs(_)) => ResultShape::PairList,
        }
    }

    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Value> {
        match self {
            Self::Scalar(v) => Some(v),
            _ => None,
        }
    }

    /// Integer of a scalar result, like a count or a single index.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_scalar().and_then(Value::as_i64)
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_map(&self) -> Option<&MapResult> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }
}

/// The concrete shape of a [`SelectionResult`], without its payload.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ResultShape {
    Absent,
    Scalar,
    List,
    UnorderedMap,
    OrderedMap,
    PairList,
}
