use std::borrow::Cow;

/// Result codes the server reports in the response header of a map operation. Codes that only
/// occur on record-level commands fall into [`ResultCode::Unknown`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResultCode {
    /// Operation was successful.
    Ok,
    /// Unknown server failure.
    ServerError,
    /// The record holding the map doesn't exist.
    KeyNotFoundError,
    /// Bad parameter(s) were passed in database operation call.
    ParameterError,
    /// The targeted value is not a map.
    BinTypeError,
    /// Record size exceeds limit.
    RecordTooBig,
    /// Too many concurrent operations on the same record.
    KeyBusy,
    /// Element not found in the map, for example on an update-only write.
    ElementNotFound,
    /// Element already exists in the map, for example on a create-only write.
    ElementExists,
    /// The operation cannot be applied to the current map value.
    OpNotApplicable,
    /// The transaction was not performed because the filter was false.
    FilteredOut,
    Unknown(u8),
}

impl ResultCode {
    #[must_use]
    pub(crate) const fn from_u8(n: u8) -> Self {
        match n {
            0 => Self::Ok,
            1 => Self::ServerError,
            2 => Self::KeyNotFoundError,
            4 => Self::ParameterError,
            12 => Self::BinTypeError,
            13 => Self::RecordTooBig,
            14 => Self::KeyBusy,
            23 => Self::ElementNotFound,
            24 => Self::ElementExists,
            26 => Self::OpNotApplicable,
            27 => Self::FilteredOut,
            code => Self::Unknown(code),
        }
    }

    #[must_use]
    pub(crate) const fn to_u8(self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::ServerError => 1,
            Self::KeyNotFoundError => 2,
            Self::ParameterError => 4,
            Self::BinTypeError => 12,
            Self::RecordTooBig => 13,
            Self::KeyBusy => 14,
            Self::ElementNotFound => 23,
            Self::ElementExists => 24,
            Self::OpNotApplicable => 26,
            Self::FilteredOut => 27,
            Self::Unknown(code) => code,
        }
    }

    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Returns a human readable description of the result code.
    #[must_use]
    pub fn into_string(self) -> Cow<'static, str> {
        match self {
            Self::Ok => "ok".into(),
            Self::ServerError => "Server error".into(),
            Self::KeyNotFoundError => "Key not found".into(),
            Self::ParameterError => "Parameter error".into(),
            Self::BinTypeError => "Bin type error".into(),
            Self::RecordTooBig => "Record too big".into(),
            Self::KeyBusy => "Hot key".into(),
            Self::ElementNotFound => "Element not found".into(),
            Self::ElementExists => "Element exists".into(),
            Self::OpNotApplicable => "Operation not applicable".into(),
            Self::FilteredOut => "Transaction filtered out".into(),
            Self::Unknown(code) => format!("Unknown server error code: {code}").into(),
        }
    }
}

impl From<u8> for ResultCode {
    fn from(val: u8) -> Self {
        Self::from_u8(val)
    }
}

impl From<ResultCode> for u8 {
    fn from(code: ResultCode) -> Self {
        code.to_u8()
    }
}

#[cfg(test)]
mod tests {
    use super::ResultCode;

    #[test]
    fn from_result_code() {
        assert_eq!(ResultCode::ElementNotFound, ResultCode::from(23u8));
        assert_eq!(24, u8::from(ResultCode::ElementExists));
    }

    #[test]
    fn from_unknown_result_code() {
        assert_eq!(ResultCode::Unknown(234), ResultCode::from(234u8));
        assert_eq!(234, u8::from(ResultCode::Unknown(234)));
    }

    #[test]
    fn into_string() {
        let result = ResultCode::KeyNotFoundError.into_string();
        assert_eq!("Key not found", result);
    }

    #[test]
    fn unknown_into_string() {
        let result = ResultCode::Unknown(234).into_string();
        assert_eq!("Unknown server error code: 234", result);
    }
}
