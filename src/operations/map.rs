//! Unique key map operations. Every function here builds a [`MapOperation`], which
//! [`Codec::encode`](crate::Codec::encode) turns into a request for the server.
//!
//! All maps maintain an index and a rank. The index is the item offset from the start of the map,
//! for both unordered and ordered maps. The rank is the sorted index of the value component.
//! Map supports negative indexing for index and rank.
//!
//! The default unique key map is unordered.
//!
//! Index/Count examples:
//!
//! * Index 0: First item in map.
//! * Index 4: Fifth item in map.
//! * Index -1: Last item in map.
//! * Index -3: Third to last item in map.
//! * Index 1, Count 2: Second and third items in map.
//! * Index -3, Count 3: Last three items in map.
//! * Index -5, Count 4: Range between fifth to last item to second to last item inclusive.
//!
//! Rank examples:
//!
//! * Rank 0: Item with lowest value rank in map.
//! * Rank 4: Fifth lowest ranked item in map.
//! * Rank -1: Item with highest ranked value in map.
//! * Rank -3: Item with third highest ranked value in map.
//! * Rank 1 Count 2: Second and third lowest ranked items in map.
//! * Rank -3 Count 3: Top three ranked items in map.
//!
//! # Examples
//!
//! ```
//! use mapwire::{
//!     operations::map::{self, ReturnModifiers, ReturnType, Selector},
//!     Value,
//! };
//!
//! // Fetch the keys of the last two entries.
//! let op = map::get_by_index_range(-2, 2, ReturnType::Key);
//! assert_eq!(ReturnType::Key, op.return_type());
//!
//! // Remove everything except the entry with key "a", returning how many items were removed.
//! let key = Value::from("a");
//! let op = map::MapOperation::select(map::Action::Remove, Selector::Key(&key), ReturnType::Count)
//!     .inverted();
//! assert_eq!(ReturnModifiers::INVERTED, op.modifiers());
//! ```

use std::{collections::HashMap, fmt, ops::Bound, str::FromStr};

use bitflags::bitflags;

use super::cdt::Argument;
use crate::{
    errors::{Error, Result},
    value::{MapKey, Value},
};

static NIL: Value = Value::Nil;

/// Op codes of all map operations, as understood by the server.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum OpType {
    SetType = 64,
    Add = 65,
    AddItems = 66,
    Put = 67,
    PutItems = 68,
    Replace = 69,
    ReplaceItems = 70,
    Increment = 73,
    Decrement = 74,
    Clear = 75,
    RemoveByKey = 76,
    RemoveByIndex = 77,
    RemoveByRank = 79,
    RemoveKeyList = 81,
    RemoveByValue = 82,
    RemoveValueList = 83,
    RemoveByKeyInterval = 84,
    RemoveByIndexRange = 85,
    RemoveByValueInterval = 86,
    RemoveByRankRange = 87,
    RemoveByKeyRelIndexRange = 88,
    RemoveByValueRelRankRange = 89,
    Size = 96,
    GetByKey = 97,
    GetByIndex = 98,
    GetByRank = 100,
    GetByValue = 102,
    GetByKeyInterval = 103,
    GetByIndexRange = 104,
    GetByValueInterval = 105,
    GetByRankRange = 106,
    GetByKeyList = 107,
    GetByValueList = 108,
    GetByKeyRelIndexRange = 109,
    GetByValueRelRankRange = 110,
}

impl OpType {
    /// Whether the operation modifies the map.
    #[must_use]
    pub const fn is_write(self) -> bool {
        (self as u8) < Self::Size as u8
    }
}

impl TryFrom<u8> for OpType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            64 => Self::SetType,
            65 => Self::Add,
            66 => Self::AddItems,
            67 => Self::Put,
            68 => Self::PutItems,
            69 => Self::Replace,
            70 => Self::ReplaceItems,
            73 => Self::Increment,
            74 => Self::Decrement,
            75 => Self::Clear,
            76 => Self::RemoveByKey,
            77 => Self::RemoveByIndex,
            79 => Self::RemoveByRank,
            81 => Self::RemoveKeyList,
            82 => Self::RemoveByValue,
            83 => Self::RemoveValueList,
            84 => Self::RemoveByKeyInterval,
            85 => Self::RemoveByIndexRange,
            86 => Self::RemoveByValueInterval,
            87 => Self::RemoveByRankRange,
            88 => Self::RemoveByKeyRelIndexRange,
            89 => Self::RemoveByValueRelRankRange,
            96 => Self::Size,
            97 => Self::GetByKey,
            98 => Self::GetByIndex,
            100 => Self::GetByRank,
            102 => Self::GetByValue,
            103 => Self::GetByKeyInterval,
            104 => Self::GetByIndexRange,
            105 => Self::GetByValueInterval,
            106 => Self::GetByRankRange,
            107 => Self::GetByKeyList,
            108 => Self::GetByValueList,
            109 => Self::GetByKeyRelIndexRange,
            110 => Self::GetByValueRelRankRange,
            _ => return Err(value),
        })
    }
}

/// Map storage order.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum OrderType {
    /// Map is not ordered. This is the default.
    #[default]
    Unordered = 0,
    /// Order map by key.
    KeyOrdered = 1,
    /// Order map by key, then value.
    KeyValueOrdered = 3,
}

impl TryFrom<u8> for OrderType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Unordered,
            1 => Self::KeyOrdered,
            3 => Self::KeyValueOrdered,
            _ => return Err(value),
        })
    }
}

/// Map return type. Type of data to return when selecting or removing items from the map.
///
/// The numeric codes are part of the wire protocol and never change.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum ReturnType {
    /// Do not return a result.
    None = 0,
    /// Return key index order.
    ///
    /// * 0 = first key
    /// * N = Nth key
    /// * -1 = last key
    Index = 1,
    /// Return reverse key order.
    ///
    /// * 0 = last key
    /// * -1 = first key
    ReverseIndex = 2,
    /// Return value order.
    ///
    /// * 0 = smallest value
    /// * N = Nth smallest value
    /// * -1 = largest value
    Rank = 3,
    /// Return reverse value order.
    ///
    /// * 0 = largest value
    /// * N = Nth largest value
    /// * -1 = smallest value
    ReverseRank = 4,
    /// Return count of items selected.
    Count = 5,
    /// Return key for single key read and key list for range read.
    Key = 6,
    /// Return value for single key read and value list for range read.
    Value = 7,
    /// Return key/value items. The possible result shapes are:
    ///
    /// * [`MapResult::Unordered`](crate::MapResult::Unordered): returned for unordered maps.
    /// * [`MapResult::Ordered`](crate::MapResult::Ordered): returned for key ordered maps.
    /// * [`MapResult::Pairs`](crate::MapResult::Pairs): returned for range results where range
    ///   order needs to be preserved.
    KeyValue = 8,
}

impl ReturnType {
    /// All return types, in code order.
    pub const ALL: [Self; 9] = [
        Self::None,
        Self::Index,
        Self::ReverseIndex,
        Self::Rank,
        Self::ReverseRank,
        Self::Count,
        Self::Key,
        Self::Value,
        Self::KeyValue,
    ];

    /// Bits of the flags byte that hold the return type code.
    pub const MASK: u8 = 0x0f;

    /// Numeric wire code of this return type.
    ///
    /// ```
    /// # use mapwire::operations::map::ReturnType;
    /// assert_eq!(8, ReturnType::KeyValue.code());
    /// ```
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Protocol name of the return type, like `KEY_VALUE`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Index => "INDEX",
            Self::ReverseIndex => "REVERSE_INDEX",
            Self::Rank => "RANK",
            Self::ReverseRank => "REVERSE_RANK",
            Self::Count => "COUNT",
            Self::Key => "KEY",
            Self::Value => "VALUE",
            Self::KeyValue => "KEY_VALUE",
        }
    }

    /// Whether the result consists of index or rank positions.
    #[must_use]
    pub const fn is_positional(self) -> bool {
        matches!(
            self,
            Self::Index | Self::ReverseIndex | Self::Rank | Self::ReverseRank
        )
    }
}

impl From<ReturnType> for u8 {
    fn from(value: ReturnType) -> Self {
        value.code()
    }
}

impl TryFrom<u8> for ReturnType {
    type Error = Error;

    /// Look up the return type for a wire code.
    ///
    /// ```
    /// # use mapwire::{errors::Error, operations::map::ReturnType};
    /// assert_eq!(ReturnType::Rank, ReturnType::try_from(3).unwrap());
    /// assert!(matches!(ReturnType::try_from(9), Err(Error::InvalidReturnType(9))));
    /// ```
    fn try_from(value: u8) -> Result<Self> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(Error::InvalidReturnType(value))
    }
}

impl FromStr for ReturnType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|rt| rt.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidReturnTypeName(s.to_owned()))
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Modifiers that are packed into the upper half of the flags byte, next to the
    /// [`ReturnType`] code.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct ReturnModifiers: u8 {
        /// Invert meaning of the map command and return values. With this flag enabled, the
        /// items outside of the specified selection are returned or removed.
        const INVERTED = 1 << 4;
        /// Return key/value items as a list of pairs in map order, even for unordered maps.
        const PAIR_LIST = 1 << 5;
    }
}

/// Pack a return type and its modifiers into the flags byte of a request.
#[must_use]
pub const fn compose_flags(return_type: ReturnType, modifiers: ReturnModifiers) -> u8 {
    return_type.code() | modifiers.bits()
}

/// Split the flags byte of a request into its return type and modifiers. Fails with
/// [`Error::InvalidReturnType`] if the return type code is unknown or reserved bits are set.
pub fn split_flags(flags: u8) -> Result<(ReturnType, ReturnModifiers)> {
    let return_type = ReturnType::try_from(flags & ReturnType::MASK)?;
    let modifiers = ReturnModifiers::from_bits(flags & !ReturnType::MASK)
        .ok_or(Error::InvalidReturnType(flags))?;
    Ok((return_type, modifiers))
}

bitflags! {
    /// Bound kinds of a range selection, sent as the last argument of range operations. The empty
    /// set means `begin` inclusive and `end` exclusive.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct RangeFlags: u8 {
        const BEGIN_EXCLUSIVE = 1;
        const END_INCLUSIVE = 1 << 1;
        const BEGIN_UNBOUNDED = 1 << 2;
        const END_UNBOUNDED = 1 << 3;
    }
}

impl RangeFlags {
    /// Split the range into its flags and the begin/end values, using [`Value::Nil`] for
    /// unbounded sides.
    fn from_bounds<'a>(
        begin: Bound<&'a Value>,
        end: Bound<&'a Value>,
    ) -> (Self, &'a Value, &'a Value) {
        let (begin_flags, begin) = match begin {
            Bound::Included(v) => (Self::empty(), v),
            Bound::Excluded(v) => (Self::BEGIN_EXCLUSIVE, v),
            Bound::Unbounded => (Self::BEGIN_UNBOUNDED, &NIL),
        };
        let (end_flags, end) = match end {
            Bound::Included(v) => (Self::END_INCLUSIVE, v),
            Bound::Excluded(v) => (Self::empty(), v),
            Bound::Unbounded => (Self::END_UNBOUNDED, &NIL),
        };
        (begin_flags | end_flags, begin, end)
    }
}

/// Unique key map write type.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum WriteMode {
    /// If the key already exists, the item will be overwritten.
    /// If the key does not exist, a new item will be created.
    #[default]
    Update,
    /// If the key already exists, the item will be overwritten.
    /// If the key does not exist, the write will fail.
    UpdateOnly,
    /// If the key already exists, the write will fail.
    /// If the key does not exist, a new item will be created.
    CreateOnly,
}

/// Directives when creating a map and writing map items.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct MapPolicy {
    /// The Order of the Map
    pub order: OrderType,
    /// The Map Write Mode
    pub write_mode: WriteMode,
}

impl MapPolicy {
    /// Create a new map policy given the ordering for the map and the write mode.
    #[must_use]
    pub const fn new(order: OrderType, write_mode: WriteMode) -> Self {
        Self { order, write_mode }
    }
}

/// Determines the correct operation to use when setting one or more map values, depending on the
/// map policy.
const fn map_write_op(policy: MapPolicy, multi: bool) -> OpType {
    match (policy.write_mode, multi) {
        (WriteMode::Update, false) => OpType::Put,
        (WriteMode::Update, true) => OpType::PutItems,
        (WriteMode::UpdateOnly, false) => OpType::Replace,
        (WriteMode::UpdateOnly, true) => OpType::ReplaceItems,
        (WriteMode::CreateOnly, false) => OpType::Add,
        (WriteMode::CreateOnly, true) => OpType::AddItems,
    }
}

const fn map_order_arg(policy: MapPolicy) -> Option<Argument<'static>> {
    match policy.write_mode {
        WriteMode::UpdateOnly => None,
        _ => Some(Argument::Byte(policy.order as u8)),
    }
}

/// What to do with the selected items.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    /// Read the selected items, leaving the map untouched.
    Get,
    /// Remove the selected items from the map.
    Remove,
}

/// Selects the map items an operation applies to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Selector<'a> {
    /// The item with the given key.
    Key(&'a Value),
    /// All items whose key is in the list.
    KeyList(&'a [Value]),
    /// All items whose key lies in the range.
    KeyRange(Bound<&'a Value>, Bound<&'a Value>),
    /// Items nearest to `key` and greater by relative `index`, optionally limited to `count`.
    KeyRelativeIndexRange {
        key: &'a Value,
        index: i64,
        count: Option<i64>,
    },
    /// All items with the given value.
    Value(&'a Value),
    /// All items whose value is in the list.
    ValueList(&'a [Value]),
    /// All items whose value lies in the range.
    ValueRange(Bound<&'a Value>, Bound<&'a Value>),
    /// Items nearest to `value` and greater by relative `rank`, optionally limited to `count`.
    ValueRelativeRankRange {
        value: &'a Value,
        rank: i64,
        count: Option<i64>,
    },
    /// The item at the index. Negative indexes count from the end.
    Index(i64),
    /// `count` items starting at `index`, or all items to the end if `count` is `None`.
    IndexRange { index: i64, count: Option<i64> },
    /// The item at the value rank. Negative ranks count from the highest value.
    Rank(i64),
    /// `count` items starting at `rank`, or all items to the highest rank if `count` is `None`.
    RankRange { rank: i64, count: Option<i64> },
}

impl<'a> Selector<'a> {
    fn op_type(&self, action: Action) -> OpType {
        match (action, self) {
            (Action::Get, Self::Key(_)) => OpType::GetByKey,
            (Action::Get, Self::KeyList(_)) => OpType::GetByKeyList,
            (Action::Get, Self::KeyRange(..)) => OpType::GetByKeyInterval,
            (Action::Get, Self::KeyRelativeIndexRange { .. }) => OpType::GetByKeyRelIndexRange,
            (Action::Get, Self::Value(_)) => OpType::GetByValue,
            (Action::Get, Self::ValueList(_)) => OpType::GetByValueList,
            (Action::Get, Self::ValueRange(..)) => OpType::GetByValueInterval,
            (Action::Get, Self::ValueRelativeRankRange { .. }) => OpType::GetByValueRelRankRange,
            (Action::Get, Self::Index(_)) => OpType::GetByIndex,
            (Action::Get, Self::IndexRange { .. }) => OpType::GetByIndexRange,
            (Action::Get, Self::Rank(_)) => OpType::GetByRank,
            (Action::Get, Self::RankRange { .. }) => OpType::GetByRankRange,
            (Action::Remove, Self::Key(_)) => OpType::RemoveByKey,
            (Action::Remove, Self::KeyList(_)) => OpType::RemoveKeyList,
            (Action::Remove, Self::KeyRange(..)) => OpType::RemoveByKeyInterval,
            (Action::Remove, Self::KeyRelativeIndexRange { .. }) => {
                OpType::RemoveByKeyRelIndexRange
            }
            (Action::Remove, Self::Value(_)) => OpType::RemoveByValue,
            (Action::Remove, Self::ValueList(_)) => OpType::RemoveValueList,
            (Action::Remove, Self::ValueRange(..)) => OpType::RemoveByValueInterval,
            (Action::Remove, Self::ValueRelativeRankRange { .. }) => {
                OpType::RemoveByValueRelRankRange
            }
            (Action::Remove, Self::Index(_)) => OpType::RemoveByIndex,
            (Action::Remove, Self::IndexRange { .. }) => OpType::RemoveByIndexRange,
            (Action::Remove, Self::Rank(_)) => OpType::RemoveByRank,
            (Action::Remove, Self::RankRange { .. }) => OpType::RemoveByRankRange,
        }
    }

    fn args(self) -> Vec<Argument<'a>> {
        fn with_count<'a>(mut args: Vec<Argument<'a>>, count: Option<i64>) -> Vec<Argument<'a>> {
            args.extend(count.map(Argument::Int));
            args
        }

        match self {
            Self::Key(v) | Self::Value(v) => vec![Argument::Value(v)],
            Self::KeyList(list) | Self::ValueList(list) => vec![Argument::List(list)],
            Self::KeyRange(begin, end) | Self::ValueRange(begin, end) => {
                let (flags, begin, end) = RangeFlags::from_bounds(begin, end);
                vec![
                    Argument::Value(begin),
                    Argument::Value(end),
                    Argument::Byte(flags.bits()),
                ]
            }
            Self::KeyRelativeIndexRange {
                key: v,
                index: i,
                count,
            }
            | Self::ValueRelativeRankRange {
                value: v,
                rank: i,
                count,
            } => with_count(vec![Argument::Value(v), Argument::Int(i)], count),
            Self::Index(i) | Self::Rank(i) => vec![Argument::Int(i)],
            Self::IndexRange { index: i, count } | Self::RankRange { rank: i, count } => {
                with_count(vec![Argument::Int(i)], count)
            }
        }
    }
}

/// A single map operation, ready to be encoded. It borrows its arguments from the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct MapOperation<'a> {
    pub(crate) op: OpType,
    pub(crate) return_type: ReturnType,
    pub(crate) modifiers: ReturnModifiers,
    pub(crate) args: Vec<Argument<'a>>,
}

impl<'a> MapOperation<'a> {
    fn new(op: OpType, return_type: ReturnType, args: Vec<Argument<'a>>) -> Self {
        Self {
            op,
            return_type,
            modifiers: ReturnModifiers::empty(),
            args,
        }
    }

    /// Create an operation that applies `action` to the items chosen by `selector` and returns
    /// the data specified by `return_type`.
    #[must_use]
    pub fn select(action: Action, selector: Selector<'a>, return_type: ReturnType) -> Self {
        Self::new(selector.op_type(action), return_type, selector.args())
    }

    /// Invert the selection, so the operation applies to all items *not* matched by the
    /// selector.
    #[must_use]
    pub fn inverted(self) -> Self {
        self.with_modifiers(ReturnModifiers::INVERTED)
    }

    /// Add the given modifiers to the flags of this operation.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: ReturnModifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    #[must_use]
    pub const fn op_type(&self) -> OpType {
        self.op
    }

    /// The result shape the server is asked for, which is also what
    /// [`Codec::decode`](crate::Codec::decode) needs to interpret the response.
    #[must_use]
    pub const fn return_type(&self) -> ReturnType {
        self.return_type
    }

    #[must_use]
    pub const fn modifiers(&self) -> ReturnModifiers {
        self.modifiers
    }

    /// The flags byte of the encoded request.
    #[must_use]
    pub const fn flags(&self) -> u8 {
        compose_flags(self.return_type, self.modifiers)
    }

    #[must_use]
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }
}

/// Convert the legacy range form, where [`Value::Nil`] marks an open side, into bounds with
/// `begin` inclusive and `end` exclusive.
fn nil_range<'a>(begin: &'a Value, end: &'a Value) -> (Bound<&'a Value>, Bound<&'a Value>) {
    let begin = match begin {
        Value::Nil => Bound::Unbounded,
        v => Bound::Included(v),
    };
    let end = match end {
        Value::Nil => Bound::Unbounded,
        v => Bound::Excluded(v),
    };
    (begin, end)
}

/// Create set map policy operation. Server sets the map policy attributes. Server does not
/// return a result.
///
/// The required map policy attributes can be changed after the map has been created.
#[must_use]
pub fn set_order<'a>(map_order: OrderType) -> MapOperation<'a> {
    MapOperation::new(
        OpType::SetType,
        ReturnType::None,
        vec![Argument::Byte(map_order as u8)],
    )
}

/// Create map put operation. Server writes the key/value item to the map and returns the map
/// size.
///
/// The map policy dictates the type of map to create when it does not exist. The map policy also
/// specifies the mode used when writing items to the map.
#[must_use]
pub fn put<'a>(policy: MapPolicy, key: &'a Value, val: &'a Value) -> MapOperation<'a> {
    let mut args = vec![Argument::Value(key), Argument::Value(val)];
    args.extend(map_order_arg(policy));

    MapOperation::new(map_write_op(policy, false), ReturnType::Count, args)
}

/// Create map put items operation. Server writes each map item to the map and returns the map
/// size.
///
/// The map policy dictates the type of map to create when it does not exist. The map policy also
/// specifies the mode used when writing items to the map.
#[allow(clippy::implicit_hasher)]
#[must_use]
pub fn put_items(policy: MapPolicy, items: &HashMap<MapKey, Value>) -> MapOperation<'_> {
    let mut args = vec![Argument::Map(items)];
    args.extend(map_order_arg(policy));

    MapOperation::new(map_write_op(policy, true), ReturnType::Count, args)
}

/// Create map increment operation. Server increments the value of the item identified by the key
/// by `incr` and returns the final result. Valid only for numbers.
#[must_use]
pub fn increment_value<'a>(policy: MapPolicy, key: &'a Value, incr: &'a Value) -> MapOperation<'a> {
    let mut args = vec![Argument::Value(key), Argument::Value(incr)];
    args.extend(map_order_arg(policy));

    MapOperation::new(OpType::Increment, ReturnType::Value, args)
}

/// Create map decrement operation. Server decrements the value of the item identified by the key
/// by `decr` and returns the final result. Valid only for numbers.
#[must_use]
pub fn decrement_value<'a>(policy: MapPolicy, key: &'a Value, decr: &'a Value) -> MapOperation<'a> {
    let mut args = vec![Argument::Value(key), Argument::Value(decr)];
    args.extend(map_order_arg(policy));

    MapOperation::new(OpType::Decrement, ReturnType::Value, args)
}

/// Create map clear operation. Server removes all items in the map. Server does not return a
/// result.
#[must_use]
pub fn clear<'a>() -> MapOperation<'a> {
    MapOperation::new(OpType::Clear, ReturnType::None, vec![])
}

/// Create map size operation. Server returns the size of the map.
#[must_use]
pub fn size<'a>() -> MapOperation<'a> {
    MapOperation::new(OpType::Size, ReturnType::Count, vec![])
}

/// Create map remove operation. Server removes the map item identified by the key and returns
/// the removed data specified by `return_type`.
#[must_use]
pub fn remove_by_key(key: &Value, return_type: ReturnType) -> MapOperation<'_> {
    MapOperation::select(Action::Remove, Selector::Key(key), return_type)
}

/// Create map remove operation. Server removes map items identified by keys and returns
/// removed data specified by `return_type`.
#[must_use]
pub fn remove_by_key_list(keys: &[Value], return_type: ReturnType) -> MapOperation<'_> {
    MapOperation::select(Action::Remove, Selector::KeyList(keys), return_type)
}

/// Create map remove operation. Server removes map items identified by the key range
/// (`begin` inclusive, `end` exclusive). If `begin` is `Value::Nil`, the range is less than
/// `end`. If `end` is `Value::Nil`, the range is greater than equal to `begin`. Server returns
/// removed data specified by `return_type`.
#[must_use]
pub fn remove_by_key_range<'a>(
    begin: &'a Value,
    end: &'a Value,
    return_type: ReturnType,
) -> MapOperation<'a> {
    let (begin, end) = nil_range(begin, end);
    MapOperation::select(Action::Remove, Selector::KeyRange(begin, end), return_type)
}

/// Create map remove operation. Server removes the map items identified by value and returns
/// the removed data specified by `return_type`.
#[must_use]
pub fn remove_by_value(value: &Value, return_type: ReturnType) -> MapOperation<'_> {
    MapOperation::select(Action::Remove, Selector::Value(value), return_type)
}

/// Create map remove operation. Server removes the map items identified by values and returns
/// the removed data specified by `return_type`.
#[must_use]
pub fn remove_by_value_list(values: &[Value], return_type: ReturnType) -> MapOperation<'_> {
    MapOperation::select(Action::Remove, Selector::ValueList(values), return_type)
}

/// Create map remove operation. Server removes map items identified by value range (`begin`
/// inclusive, `end` exclusive). If `begin` is `Value::Nil`, the range is less than `end`. If
/// `end` is `Value::Nil`, the range is greater than equal to `begin`. Server returns the
/// removed data specified by `return_type`.
#[must_use]
pub fn remove_by_value_range<'a>(
    begin: &'a Value,
    end: &'a Value,
    return_type: ReturnType,
) -> MapOperation<'a> {
    let (begin, end) = nil_range(begin, end);
    MapOperation::select(Action::Remove, Selector::ValueRange(begin, end), return_type)
}

/// Create map remove operation. Server removes the map item identified by the index and return
/// the removed data specified by `return_type`.
#[must_use]
pub fn remove_by_index<'a>(index: i64, return_type: ReturnType) -> MapOperation<'a> {
    MapOperation::select(Action::Remove, Selector::Index(index), return_type)
}

/// Create map remove operation. Server removes `count` map items starting at the specified
/// index and returns the removed data specified by `return_type`.
#[must_use]
pub fn remove_by_index_range<'a>(
    index: i64,
    count: i64,
    return_type: ReturnType,
) -> MapOperation<'a> {
    let selector = Selector::IndexRange {
        index,
        count: Some(count),
    };
    MapOperation::select(Action::Remove, selector, return_type)
}

/// Create map remove operation. Server removes the map items starting at the specified index
/// to the end of the map and returns the removed data specified by `return_type`.
#[must_use]
pub fn remove_by_index_range_from<'a>(index: i64, return_type: ReturnType) -> MapOperation<'a> {
    let selector = Selector::IndexRange { index, count: None };
    MapOperation::select(Action::Remove, selector, return_type)
}

/// Create map remove operation. Server removes the map item identified by rank and returns the
/// removed data specified by `return_type`.
#[must_use]
pub fn remove_by_rank<'a>(rank: i64, return_type: ReturnType) -> MapOperation<'a> {
    MapOperation::select(Action::Remove, Selector::Rank(rank), return_type)
}

/// Create map remove operation. Server removes `count` map items starting at the specified
/// rank and returns the removed data specified by `return_type`.
#[must_use]
pub fn remove_by_rank_range<'a>(
    rank: i64,
    count: i64,
    return_type: ReturnType,
) -> MapOperation<'a> {
    let selector = Selector::RankRange {
        rank,
        count: Some(count),
    };
    MapOperation::select(Action::Remove, selector, return_type)
}

/// Create map remove operation. Server removes the map items starting at the specified rank to
/// the last ranked item and returns the removed data specified by `return_type`.
#[must_use]
pub fn remove_by_rank_range_from<'a>(rank: i64, return_type: ReturnType) -> MapOperation<'a> {
    let selector = Selector::RankRange { rank, count: None };
    MapOperation::select(Action::Remove, selector, return_type)
}

/// Create map remove by key relative to index range operation.
/// Server removes map items nearest to key and greater by index.
/// Server returns removed data specified by `return_type`.
///
/// Examples for map [{0=17},{4=2},{5=15},{9=10}]:
///
/// (key,index) = [removed items]
/// (5,0) = [{5=15},{9=10}]
/// (5,1) = [{9=10}]
/// (5,-1) = [{4=2},{5=15},{9=10}]
/// (3,2) = [{9=10}]
/// (3,-2) = [{0=17},{4=2},{5=15},{9=10}]
#[must_use]
pub fn remove_by_key_relative_index_range(
    key: &Value,
    index: i64,
    return_type: ReturnType,
) -> MapOperation<'_> {
    let selector = Selector::KeyRelativeIndexRange {
        key,
        index,
        count: None,
    };
    MapOperation::select(Action::Remove, selector, return_type)
}

/// Create map remove by key relative to index range operation.
/// Server removes map items nearest to key and greater by index with a count limit.
/// Server returns removed data specified by `return_type`.
///
/// Examples for map [{0=17},{4=2},{5=15},{9=10}]:
///
/// (key,index,count) = [removed items]
/// (5,0,1) = [{5=15}]
/// (5,1,2) = [{9=10}]
/// (5,-1,1) = [{4=2}]
/// (3,2,1) = [{9=10}]
/// (3,-2,2) = [{0=17}]
#[must_use]
pub fn remove_by_key_relative_index_range_count(
    key: &Value,
    index: i64,
    count: i64,
    return_type: ReturnType,
) -> MapOperation<'_> {
    let selector = Selector::KeyRelativeIndexRange {
        key,
        index,
        count: Some(count),
    };
    MapOperation::select(Action::Remove, selector, return_type)
}

/// Create map remove by value relative to rank range operation.
/// Server removes map items nearest to value and greater by relative rank.
/// Server returns removed data specified by `return_type`.
///
/// Examples for map [{4=2},{9=10},{5=15},{0=17}]:
///
/// (value,rank) = [removed items]
/// (11,1) = [{0=17}]
/// (11,-1) = [{9=10},{5=15},{0=17}]
#[must_use]
pub fn remove_by_value_relative_rank_range(
    value: &Value,
    rank: i64,
    return_type: ReturnType,
) -> MapOperation<'_> {
    let selector = Selector::ValueRelativeRankRange {
        value,
        rank,
        count: None,
    };
    MapOperation::select(Action::Remove, selector, return_type)
}

/// Create map remove by value relative to rank range operation.
/// Server removes map items nearest to value and greater by relative rank with a count limit.
/// Server returns removed data specified by `return_type`.
///
/// Examples for map [{4=2},{9=10},{5=15},{0=17}]:
///
/// (value,rank,count) = [removed items]
/// (11,1,1) = [{0=17}]
/// (11,-1,1) = [{9=10}]
#[must_use]
pub fn remove_by_value_relative_rank_range_count(
    value: &Value,
    rank: i64,
    count: i64,
    return_type: ReturnType,
) -> MapOperation<'_> {
    let selector = Selector::ValueRelativeRankRange {
        value,
        rank,
        count: Some(count),
    };
    MapOperation::select(Action::Remove, selector, return_type)
}

/// Create map get by key operation. Server selects the map item identified by the key and
/// returns the selected data specified by `return_type`.
#[must_use]
pub fn get_by_key(key: &Value, return_type: ReturnType) -> MapOperation<'_> {
    MapOperation::select(Action::Get, Selector::Key(key), return_type)
}

/// Create map get by key list operation. Server selects map items identified by keys and
/// returns selected data specified by `return_type`.
#[must_use]
pub fn get_by_key_list(keys: &[Value], return_type: ReturnType) -> MapOperation<'_> {
    MapOperation::select(Action::Get, Selector::KeyList(keys), return_type)
}

/// Create map get by key range operation. Server selects the map items identified by the key
/// range (`begin` inclusive, `end` exclusive). If `begin` is `Value::Nil`, the range is less
/// than `end`. If `end` is `Value::Nil` the range is greater than equal to `begin`. Server
/// returns the selected data specified by `return_type`.
#[must_use]
pub fn get_by_key_range<'a>(
    begin: &'a Value,
    end: &'a Value,
    return_type: ReturnType,
) -> MapOperation<'a> {
    let (begin, end) = nil_range(begin, end);
    MapOperation::select(Action::Get, Selector::KeyRange(begin, end), return_type)
}

/// Create map get by value operation. Server selects the map items identified by value and
/// returns the selected data specified by `return_type`.
#[must_use]
pub fn get_by_value(value: &Value, return_type: ReturnType) -> MapOperation<'_> {
    MapOperation::select(Action::Get, Selector::Value(value), return_type)
}

/// Create map get by value list operation. Server selects map items identified by values and
/// returns selected data specified by `return_type`.
#[must_use]
pub fn get_by_value_list(values: &[Value], return_type: ReturnType) -> MapOperation<'_> {
    MapOperation::select(Action::Get, Selector::ValueList(values), return_type)
}

/// Create map get by value range operation. Server selects the map items identified by the
/// value range (`begin` inclusive, `end` exclusive). If `begin` is `Value::Nil`, the range is
/// less than `end`. If `end` is `Value::Nil`, the range is greater than equal to `begin`.
/// Server returns the selected data specified by `return_type`.
#[must_use]
pub fn get_by_value_range<'a>(
    begin: &'a Value,
    end: &'a Value,
    return_type: ReturnType,
) -> MapOperation<'a> {
    let (begin, end) = nil_range(begin, end);
    MapOperation::select(Action::Get, Selector::ValueRange(begin, end), return_type)
}

/// Create map get by index operation. Server selects the map item identified by index and
/// returns the selected data specified by `return_type`.
#[must_use]
pub fn get_by_index<'a>(index: i64, return_type: ReturnType) -> MapOperation<'a> {
    MapOperation::select(Action::Get, Selector::Index(index), return_type)
}

/// Create map get by index range operation. Server selects `count` map items starting at the
/// specified index and returns the selected data specified by `return_type`.
#[must_use]
pub fn get_by_index_range<'a>(index: i64, count: i64, return_type: ReturnType) -> MapOperation<'a> {
    let selector = Selector::IndexRange {
        index,
        count: Some(count),
    };
    MapOperation::select(Action::Get, selector, return_type)
}

/// Create map get by index range operation. Server selects the map items starting at the
/// specified index to the end of the map and returns the selected data specified by
/// `return_type`.
#[must_use]
pub fn get_by_index_range_from<'a>(index: i64, return_type: ReturnType) -> MapOperation<'a> {
    let selector = Selector::IndexRange { index, count: None };
    MapOperation::select(Action::Get, selector, return_type)
}

/// Create map get by rank operation. Server selects the map item identified by rank and
/// returns the selected data specified by `return_type`.
#[must_use]
pub fn get_by_rank<'a>(rank: i64, return_type: ReturnType) -> MapOperation<'a> {
    MapOperation::select(Action::Get, Selector::Rank(rank), return_type)
}

/// Create map get rank range operation. Server selects `count` map items at the specified
/// rank and returns the selected data specified by `return_type`.
#[must_use]
pub fn get_by_rank_range<'a>(rank: i64, count: i64, return_type: ReturnType) -> MapOperation<'a> {
    let selector = Selector::RankRange {
        rank,
        count: Some(count),
    };
    MapOperation::select(Action::Get, selector, return_type)
}

/// Create map get by rank range operation. Server selects the map items starting at the
/// specified rank to the last ranked item and returns the selected data specified by
/// `return_type`.
#[must_use]
pub fn get_by_rank_range_from<'a>(rank: i64, return_type: ReturnType) -> MapOperation<'a> {
    let selector = Selector::RankRange { rank, count: None };
    MapOperation::select(Action::Get, selector, return_type)
}

/// Create map get by key relative to index range operation.
/// Server selects map items nearest to key and greater by index.
/// Server returns selected data specified by `return_type`.
///
/// Examples for ordered map [{0=17},{4=2},{5=15},{9=10}]:
///
/// (key,index) = [selected items]
/// (5,0) = [{5=15},{9=10}]
/// (5,1) = [{9=10}]
/// (5,-1) = [{4=2},{5=15},{9=10}]
/// (3,2) = [{9=10}]
/// (3,-2) = [{0=17},{4=2},{5=15},{9=10}]
#[must_use]
pub fn get_by_key_relative_index_range(
    key: &Value,
    index: i64,
    return_type: ReturnType,
) -> MapOperation<'_> {
    let selector = Selector::KeyRelativeIndexRange {
        key,
        index,
        count: None,
    };
    MapOperation::select(Action::Get, selector, return_type)
}

/// Create map get by key relative to index range operation.
/// Server selects map items nearest to key and greater by index with a count limit.
/// Server returns selected data specified by `return_type`.
///
/// Examples for ordered map [{0=17},{4=2},{5=15},{9=10}]:
///
/// (key,index,count) = [selected items]
/// (5,0,1) = [{5=15}]
/// (5,1,2) = [{9=10}]
/// (5,-1,1) = [{4=2}]
/// (3,2,1) = [{9=10}]
/// (3,-2,2) = [{0=17}]
#[must_use]
pub fn get_by_key_relative_index_range_count(
    key: &Value,
    index: i64,
    count: i64,
    return_type: ReturnType,
) -> MapOperation<'_> {
    let selector = Selector::KeyRelativeIndexRange {
        key,
        index,
        count: Some(count),
    };
    MapOperation::select(Action::Get, selector, return_type)
}

/// Create map get by value relative to rank range operation.
/// Server selects map items nearest to value and greater by relative rank.
/// Server returns selected data specified by `return_type`.
///
/// Examples for map [{4=2},{9=10},{5=15},{0=17}]:
///
/// (value,rank) = [selected items]
/// (11,1) = [{0=17}]
/// (11,-1) = [{9=10},{5=15},{0=17}]
#[must_use]
pub fn get_by_value_relative_rank_range(
    value: &Value,
    rank: i64,
    return_type: ReturnType,
) -> MapOperation<'_> {
    let selector = Selector::ValueRelativeRankRange {
        value,
        rank,
        count: None,
    };
    MapOperation::select(Action::Get, selector, return_type)
}

/// Create map get by value relative to rank range operation.
/// Server selects map items nearest to value and greater by relative rank with a count limit.
/// Server returns selected data specified by `return_type`.
///
/// Examples for map [{4=2},{9=10},{5=15},{0=17}]:
///
/// (value,rank,count) = [selected items]
/// (11,1,1) = [{0=17}]
/// (11,-1,1) = [{9=10}]
#[must_use]
pub fn get_by_value_relative_rank_range_count(
    value: &Value,
    rank: i64,
    count: i64,
    return_type: ReturnType,
) -> MapOperation<'_> {
    let selector = Selector::ValueRelativeRankRange {
        value,
        rank,
        count: Some(count),
    };
    MapOperation::select(Action::Get, selector, return_type)
}
