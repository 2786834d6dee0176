#![forbid(unsafe_code)]
#![warn(
    rust_2018_idioms,
    clippy::all,
    clippy::pedantic,
    clippy::clone_on_ref_ptr,
    clippy::format_push_string,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::self_named_module_files,
    clippy::str_to_string,
    clippy::wildcard_imports,
    clippy::string_add,
    clippy::string_to_string,
    clippy::try_err,
    clippy::unreachable
)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::too_many_lines,
    clippy::missing_errors_doc,
    clippy::manual_let_else,
    missing_docs
)]

//! Encoder and decoder for the map sub-operations of the Aerospike wire protocol.
//!
//! A map operation selects items of a map-typed value held by the server (by key, value, index,
//! rank or ranges of those), reads or removes them, and asks for a specific result shape through
//! its [`ReturnType`]. This crate turns such operations into compact requests and decodes the
//! server's responses into a typed [`SelectionResult`]. Moving the bytes is left to the caller,
//! either directly or through the [`Transport`] trait.
//!
//! # Examples
//!
//! ```rust
//! use mapwire::{operations::map, MapResult, ReturnType, SelectionResult, Value};
//!
//! let begin = Value::from("a");
//! let end = Value::from("m");
//! let op = map::get_by_key_range(&begin, &end, ReturnType::KeyValue);
//!
//! let request = mapwire::encode(&op).unwrap();
//! assert_eq!(op.op_type() as u8, request[0]);
//!
//! // A response holding the pairs {"b": 1} in range order.
//! let response = [0, 1, 0, 0, 0, 5, 0x81, 0xa2, 0x03, b'b', 0x01];
//! let result = mapwire::decode(&response, op.return_type()).unwrap();
//!
//! assert_eq!(
//!     SelectionResult::Map(MapResult::Pairs(vec![("b".into(), 1.into())])),
//!     result
//! );
//! ```

use bytes::Bytes;

pub use commands::{Codec, Transport};
pub use errors::{Error, Result};
pub use operations::map::{MapOperation, ReturnModifiers, ReturnType};
pub use result_code::ResultCode;
pub use selection::{MapResult, ResultShape, SelectionResult};
pub use value::{FloatValue, MapKey, Value};

pub mod commands;
pub mod errors;
#[macro_use]
mod macros;
mod msgpack;
pub mod operations;
pub mod policy;
mod result_code;
mod selection;
mod value;

/// Encode an operation with the default [`CodecPolicy`](policy::CodecPolicy).
pub fn encode(op: &MapOperation<'_>) -> Result<Bytes> {
    Codec::default().encode(op)
}

/// Decode a response with the default [`CodecPolicy`](policy::CodecPolicy).
pub fn decode(data: &[u8], return_type: ReturnType) -> Result<SelectionResult> {
    Codec::default().decode(data, return_type)
}
