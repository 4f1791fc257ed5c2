//! Error types and helpers.
use {
    std::{borrow::Cow, error::Error as StdError},
    thiserror::Error,
};

/// Boxed error produced by a scalar parser.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid URL escape {0:?}")]
    InvalidEscape(String),
    #[error("Invalid semicolon separator in form data")]
    InvalidSeparator,
    #[error("Form data contains more than {limit} pairs")]
    PairLimit { limit: usize },
    #[error("Unsupported destination: {0}")]
    UnsupportedDestination(&'static str),
    #[error("Cannot parse {value:?} as {ty}: {source}")]
    ParseValue {
        ty: &'static str,
        value: String,
        #[source]
        source: BoxError,
    },
    #[error("Invalid bool {0:?}")]
    InvalidBool(String),
    #[error("Invalid duration {0:?}")]
    InvalidDuration(String),
    #[error("Duration {0:?} is out of range")]
    DurationOverflow(String),
    #[error("Invalid timestamp {0:?}")]
    InvalidTimestamp(String),
    #[error("Cannot coerce form values into unsupported type {0}")]
    UnsupportedType(Cow<'static, str>),
    #[error("Form key {name:?} resolves to both `{first}` and `{second}`")]
    AmbiguousFieldName {
        name: String,
        first: &'static str,
        second: &'static str,
    },
    #[error("Unknown form key {0:?}")]
    UnknownKey(String),
    #[error("Form field has no value")]
    MissingValue,
    #[error("Encoded form is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("{0}")]
    Custom(String),
}

pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Build an error for a custom [`FormEncode`](crate::FormEncode) or
    /// [`FormDecode`](crate::FormDecode) hook.
    pub fn custom(msg: impl core::fmt::Display) -> Self {
        Error::Custom(msg.to_string())
    }
}

#[cold]
pub fn invalid_escape(segment: &[u8]) -> Error {
    Error::InvalidEscape(String::from_utf8_lossy(segment).into_owned())
}

#[cold]
pub const fn invalid_separator() -> Error {
    Error::InvalidSeparator
}

#[cold]
pub const fn pair_limit(limit: usize) -> Error {
    Error::PairLimit { limit }
}

#[cold]
pub const fn unsupported_destination(shape: &'static str) -> Error {
    Error::UnsupportedDestination(shape)
}

#[cold]
pub fn parse_value(ty: &'static str, value: &str, source: impl Into<BoxError>) -> Error {
    Error::ParseValue {
        ty,
        value: value.to_owned(),
        source: source.into(),
    }
}

#[cold]
pub fn invalid_bool(value: &str) -> Error {
    Error::InvalidBool(value.to_owned())
}

#[cold]
pub fn invalid_duration(value: &str) -> Error {
    Error::InvalidDuration(value.to_owned())
}

#[cold]
pub fn duration_overflow(value: &str) -> Error {
    Error::DurationOverflow(value.to_owned())
}

#[cold]
pub fn invalid_timestamp(value: &str) -> Error {
    Error::InvalidTimestamp(value.to_owned())
}

#[cold]
pub fn unsupported_type(ty: impl Into<Cow<'static, str>>) -> Error {
    Error::UnsupportedType(ty.into())
}

#[cold]
pub fn ambiguous_field_name(name: &str, first: &'static str, second: &'static str) -> Error {
    Error::AmbiguousFieldName {
        name: name.to_owned(),
        first,
        second,
    }
}

#[cold]
pub fn unknown_key(key: &str) -> Error {
    Error::UnknownKey(key.to_owned())
}

#[cold]
pub const fn missing_value() -> Error {
    Error::MissingValue
}
