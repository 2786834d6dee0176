pub(crate) mod buffer;
pub mod request;
pub mod response;

use bytes::Bytes;
use tracing::warn;

use crate::{
    errors::{Error, Result},
    operations::map::{MapOperation, ReturnType},
    policy::CodecPolicy,
    selection::SelectionResult,
};

/// Synchronous request/response exchange with a server holding the map.
pub trait Transport {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send one encoded request and return the raw response.
    fn send(&mut self, request: Bytes) -> Result<Bytes, Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn send(&mut self, request: Bytes) -> Result<Bytes, Self::Error> {
        (**self).send(request)
    }
}

/// Encodes map operations into requests and decodes the responses, applying the limits of its
/// [`CodecPolicy`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Codec {
    policy: CodecPolicy,
}

impl Codec {
    #[must_use]
    pub const fn new(policy: CodecPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub const fn policy(&self) -> &CodecPolicy {
        &self.policy
    }

    /// Encode the operation into a request. Nothing is produced if any argument exceeds the
    /// policy limits.
    pub fn encode(&self, op: &MapOperation<'_>) -> Result<Bytes> {
        request::encode(op, &self.policy)
    }

    /// Decode a response for an operation that asked for `return_type`.
    pub fn decode(&self, data: &[u8], return_type: ReturnType) -> Result<SelectionResult> {
        response::decode(data, return_type, &self.policy)
    }

    /// Encode the operation, exchange it through the transport and decode the response.
    pub fn execute<T: Transport>(
        &self,
        transport: &mut T,
        op: &MapOperation<'_>,
    ) -> Result<SelectionResult> {
        let request = self.encode(op)?;

        let response = transport.send(request).map_err(|e| {
            warn!(op = ?op.op_type(), error = %e, "map operation exchange failed");
            Error::Transport(Box::new(e))
        })?;

        self.decode(&response, op.return_type()).map_err(|e| {
            warn!(op = ?op.op_type(), error = %e, "map operation failed");
            e
        })
    }
}
