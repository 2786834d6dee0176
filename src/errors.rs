//! Error and Result types for encoding and decoding map operations.
//!
//! # Examples
//!
//! Handling an error returned by the decoder.
//!
//! ```rust
//! use mapwire::{errors::Error, operations::map::ReturnType, ResultCode};
//!
//! // Result code 23 (element not found) with an empty payload.
//! let response = [23, 0, 0, 0, 0, 0];
//!
//! match mapwire::decode(&response, ReturnType::Value) {
//!     Ok(result) => println!("selected: {result:?}"),
//!     Err(Error::ServerError(ResultCode::ElementNotFound)) => println!("no such element"),
//!     Err(err) => println!("error decoding response: {err:#?}"),
//! }
//! ```

use crate::result_code::ResultCode;
pub use crate::{commands::buffer::BufferError, msgpack::MsgpackError};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The numeric code doesn't belong to any [`ReturnType`](crate::operations::map::ReturnType),
    /// or a flags byte has reserved bits set.
    #[error("invalid return type code `{0}`")]
    InvalidReturnType(u8),
    #[error("unknown return type name `{0}`")]
    InvalidReturnTypeName(String),
    /// A request starts with a byte that is no map op code.
    #[error("unknown map operation code `{0}`")]
    UnknownOperation(u8),
    /// A request doesn't fit the wire format or the configured limits. No bytes are produced.
    #[error("{what} of {size} exceeds the maximum of {max}")]
    EncodingOverflow {
        what: &'static str,
        size: usize,
        max: usize,
    },
    /// The buffer ended before the header or the declared payload was complete.
    #[error("response truncated: needed {needed} bytes, {remaining} remaining")]
    TruncatedResponse { needed: usize, remaining: usize },
    #[error("response payload of {size} bytes exceeds the maximum of {max}")]
    ResponseTooLarge { size: usize, max: usize },
    /// An unknown type tag was found where a value was expected.
    #[error("unsupported type tag `{0:#04x}`")]
    UnsupportedType(u8),
    /// A well-formed value of the wrong kind for the requested return type.
    #[error("expected {expected}, found {found}")]
    UnexpectedValue {
        expected: &'static str,
        found: String,
    },
    /// Bytes left over after the payload value.
    #[error("{0} trailing bytes after the response payload")]
    TrailingBytes(usize),
    #[error("Error interpreting a sequence of u8 as a UTF-8 encoded string")]
    InvalidUtf8(#[source] std::str::Utf8Error),
    /// Server responded with a result code indicating an error condition.
    #[error("Server error: {}", .0.into_string())]
    ServerError(ResultCode),
    /// The transport failed to exchange the request.
    #[error("transport error")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<BufferError> for Error {
    fn from(value: BufferError) -> Self {
        match value {
            BufferError::Truncated { needed, remaining } => {
                Self::TruncatedResponse { needed, remaining }
            }
            BufferError::InvalidUtf8(e) => Self::InvalidUtf8(e),
        }
    }
}

impl From<MsgpackError> for Error {
    fn from(value: MsgpackError) -> Self {
        match value {
            MsgpackError::UnsupportedType(tag) | MsgpackError::UnrecognizedBlobType(tag) => {
                Self::UnsupportedType(tag)
            }
            MsgpackError::UnexpectedMarker { expected, marker } => Self::UnexpectedValue {
                expected,
                found: format!("marker {marker:#04x}"),
            },
            MsgpackError::Buffer(e) => e.into(),
        }
    }
}
