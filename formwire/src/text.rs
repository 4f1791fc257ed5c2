//! Scalar text coercion.
//!
//! [`FormText`] is the text hook every scalar goes through: `to_text` when encoding
//! and `from_text` when decoding. Implementations exist for `bool`, all integer and
//! float primitives, `String`, durations, timestamps and [`Bytes`]. A user type
//! opts in by implementing [`FormText`] and invoking [`text_field!`], or, for types
//! that already implement `Display` and `FromStr`, with [`display_text!`].
//!
//! ```
//! # use formwire::{display_text, FormText};
//! #[derive(Debug, PartialEq)]
//! struct Celsius(i32);
//!
//! impl core::fmt::Display for Celsius {
//!     fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
//!         write!(f, "{}C", self.0)
//!     }
//! }
//!
//! impl core::str::FromStr for Celsius {
//!     type Err = std::num::ParseIntError;
//!     fn from_str(s: &str) -> Result<Self, Self::Err> {
//!         s.trim_end_matches('C').parse().map(Celsius)
//!     }
//! }
//!
//! display_text!(Celsius);
//!
//! assert_eq!(Celsius(21).to_text(), "21C");
//! assert_eq!(Celsius::from_text("21C").unwrap(), Celsius(21));
//! ```
use {
    crate::{
        duration,
        error::{invalid_bool, invalid_duration, parse_value, Result},
        timestamp,
    },
    bytes::Bytes,
    chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta, Utc},
    core::time::Duration,
};

/// Types with a canonical text form.
pub trait FormText: Sized {
    /// Canonical text of `self`.
    fn to_text(&self) -> String;
    /// Parse `text`. Failures carry the offending text.
    fn from_text(text: &str) -> Result<Self>;

    /// Bytes written on the wire, the UTF-8 of [`to_text`](FormText::to_text)
    /// unless the type carries opaque bytes.
    fn to_bytes(&self) -> Vec<u8> {
        self.to_text().into_bytes()
    }

    /// Parse a percent-decoded value that is not UTF-8. Invalid sequences
    /// reach [`from_text`](FormText::from_text) as U+FFFD.
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_text(&String::from_utf8_lossy(bytes))
    }
}

/// Implement [`FormField`](crate::FormField) and [`FormEncode`](crate::FormEncode)
/// for types implementing [`FormText`].
///
/// As a field the type takes the last of several values and writes a single pair;
/// encoded on its own it is just its text.
#[macro_export]
macro_rules! text_field {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::FormField for $ty {
            #[inline]
            fn write_field(&self, key: &str, pairs: &mut $crate::Pairs) {
                pairs.push_bytes(key, $crate::FormText::to_bytes(self));
            }

            #[inline]
            fn read_field(values: &[::std::string::String]) -> $crate::Result<Self> {
                $crate::field::read_last(values)
            }

            #[inline]
            fn read_field_bytes(values: &[::std::vec::Vec<u8>]) -> $crate::Result<Self> {
                $crate::field::read_last_bytes(values)
            }
        }

        impl $crate::FormEncode for $ty {
            #[inline]
            fn encode_form(&self) -> $crate::Result<::std::vec::Vec<u8>> {
                ::core::result::Result::Ok($crate::FormText::to_text(self).into_bytes())
            }
        }
    )+};
}

/// Implement [`FormText`] through `Display` and `FromStr`, then [`text_field!`].
///
/// The `FromStr` error must convert into a boxed `std::error::Error + Send + Sync`.
#[macro_export]
macro_rules! display_text {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::FormText for $ty {
            fn to_text(&self) -> ::std::string::String {
                ::std::string::ToString::to_string(self)
            }

            fn from_text(text: &str) -> $crate::Result<Self> {
                <$ty as ::core::str::FromStr>::from_str(text).map_err(|e| {
                    $crate::error::parse_value(::core::any::type_name::<$ty>(), text, e)
                })
            }
        }

        $crate::text_field!($ty);
    )+};
}

/// `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool(text: &str) -> Result<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(invalid_bool(text)),
    }
}

impl FormText for bool {
    #[inline]
    fn to_text(&self) -> String {
        String::from(if *self { "true" } else { "false" })
    }

    #[inline]
    fn from_text(text: &str) -> Result<Self> {
        parse_bool(text)
    }
}

macro_rules! impl_int {
    ($($ty:ty),+) => {$(
        impl FormText for $ty {
            #[inline]
            fn to_text(&self) -> String {
                self.to_string()
            }

            #[inline]
            fn from_text(text: &str) -> Result<Self> {
                text.parse::<$ty>().map_err(|e| parse_value(stringify!($ty), text, e))
            }
        }
    )+};
}

impl_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_float {
    ($($ty:ty),+) => {$(
        impl FormText for $ty {
            /// Shortest text that parses back to the same value, never in exponent form.
            fn to_text(&self) -> String {
                if self.is_nan() {
                    "NaN".to_owned()
                } else if self.is_infinite() {
                    String::from(if self.is_sign_positive() { "+Inf" } else { "-Inf" })
                } else {
                    self.to_string()
                }
            }

            #[inline]
            fn from_text(text: &str) -> Result<Self> {
                text.parse::<$ty>().map_err(|e| parse_value(stringify!($ty), text, e))
            }
        }
    )+};
}

impl_float!(f32, f64);

impl FormText for String {
    #[inline]
    fn to_text(&self) -> String {
        self.clone()
    }

    #[inline]
    fn from_text(text: &str) -> Result<Self> {
        Ok(text.to_owned())
    }
}

/// Raw bytes, never coerced. The text form replaces bytes that are not UTF-8
/// with U+FFFD; the wire form keeps them.
impl FormText for Bytes {
    fn to_text(&self) -> String {
        String::from_utf8_lossy(self).into_owned()
    }

    fn from_text(text: &str) -> Result<Self> {
        Ok(Bytes::copy_from_slice(text.as_bytes()))
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Bytes::copy_from_slice(bytes))
    }
}

impl FormText for TimeDelta {
    fn to_text(&self) -> String {
        let nanos =
            i128::from(self.num_seconds()) * 1_000_000_000 + i128::from(self.subsec_nanos());
        duration::format_nanos(nanos)
    }

    fn from_text(text: &str) -> Result<Self> {
        duration::parse_nanos(text).map(TimeDelta::nanoseconds)
    }
}

impl FormText for Duration {
    fn to_text(&self) -> String {
        duration::format_nanos(self.as_nanos() as i128)
    }

    fn from_text(text: &str) -> Result<Self> {
        let nanos = duration::parse_nanos(text)?;
        let nanos = u64::try_from(nanos).map_err(|_| invalid_duration(text))?;
        Ok(Duration::from_nanos(nanos))
    }
}

impl FormText for DateTime<Utc> {
    fn to_text(&self) -> String {
        timestamp::format(self)
    }

    fn from_text(text: &str) -> Result<Self> {
        timestamp::parse_utc(text)
    }
}

impl FormText for DateTime<FixedOffset> {
    fn to_text(&self) -> String {
        timestamp::format(self)
    }

    fn from_text(text: &str) -> Result<Self> {
        timestamp::parse_fixed(text)
    }
}

/// `YYYY-MM-DD`; any other accepted timestamp layout is truncated to its UTC date.
impl FormText for NaiveDate {
    fn to_text(&self) -> String {
        self.format("%Y-%m-%d").to_string()
    }

    fn from_text(text: &str) -> Result<Self> {
        match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            Ok(date) => Ok(date),
            Err(_) => timestamp::parse_utc(text).map(|dt| dt.date_naive()),
        }
    }
}

text_field!(
    bool,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    TimeDelta,
    Duration,
    DateTime<Utc>,
    DateTime<FixedOffset>,
    NaiveDate,
);
