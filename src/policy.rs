//! Policy types encapsulate optional parameters for encoding and decoding.

/// Size limits applied by [`Codec`](crate::Codec).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CodecPolicy {
    /// Maximum encoded size of a single request argument, in bytes. Values above `u32::MAX` are
    /// capped to it, as argument lengths are carried in 32 bits on the wire.
    ///
    /// Default: 1 MiB.
    pub max_argument_size: usize,
    /// Maximum payload length a response may declare, in bytes. Responses announcing more are
    /// rejected before any value is decoded.
    ///
    /// Default: 1 MiB + 8.
    pub max_response_size: usize,
}

impl CodecPolicy {
    pub const DEFAULT_MAX_ARGUMENT_SIZE: usize = 1024 * 1024;
    pub const DEFAULT_MAX_RESPONSE_SIZE: usize = 1024 * 1024 + 8;

    #[must_use]
    pub const fn new(max_argument_size: usize, max_response_size: usize) -> Self {
        Self {
            max_argument_size,
            max_response_size,
        }
    }

    pub(crate) fn argument_limit(&self) -> usize {
        self.max_argument_size.min(u32::MAX as usize)
    }
}

impl Default for CodecPolicy {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_MAX_ARGUMENT_SIZE,
            Self::DEFAULT_MAX_RESPONSE_SIZE,
        )
    }
}
