//! Functions used to create map operations, which are turned into requests by
//! [`Codec::encode`](crate::Codec::encode).

pub(crate) mod cdt;
pub mod map;

pub use self::map::{
    Action, MapOperation, MapPolicy, OpType, OrderType, ReturnModifiers, ReturnType, Selector,
    WriteMode,
};
