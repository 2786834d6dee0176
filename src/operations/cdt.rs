use std::collections::HashMap;

use crate::value::{MapKey, Value};

/// Single argument of a CDT operation, borrowed from the caller until the operation is encoded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Argument<'a> {
    Byte(u8),
    Int(i64),
    Value(&'a Value),
    List(&'a [Value]),
    Map(&'a HashMap<MapKey, Value>),
}
