//! Per-field coercion between a typed slot and the raw values of one form key.
//!
//! | Field type | Encoded as | Decoded from several values |
//! |---|---|---|
//! | scalar `T: FormText` | one pair | the last value |
//! | `String` | one pair | values joined with `,` |
//! | `Vec<T>` | one pair per element | every value, in order |
//! | `Option<T>` | nothing for `None` | `Some` of `T`'s rule |
//! | [`Value`](crate::Value) | one pair per element | inferred, see [`Value::infer_all`](crate::Value::infer_all) |
use {
    crate::{
        error::{missing_value, Result},
        text::FormText,
        values::{Pairs, Values},
    },
    bytes::Bytes,
};

/// A type that can occupy one field of a record or one value slot of a map.
pub trait FormField: Sized {
    /// Append the pairs for this field under `key`.
    fn write_field(&self, key: &str, pairs: &mut Pairs);

    /// Build a value from every raw value present for one key, in order.
    fn read_field(values: &[String]) -> Result<Self>;

    /// Like [`read_field`](FormField::read_field), for a key holding a value
    /// that is not UTF-8. `values` are the percent-decoded bytes.
    fn read_field_bytes(values: &[Vec<u8>]) -> Result<Self> {
        let text: Vec<String> = values
            .iter()
            .map(|value| String::from_utf8_lossy(value).into_owned())
            .collect();
        Self::read_field(&text)
    }
}

/// Decode the last of `values`.
#[inline]
pub fn read_last<T: FormText>(values: &[String]) -> Result<T> {
    let last = values.last().ok_or_else(missing_value)?;
    T::from_text(last)
}

/// Decode the last of `values` from its bytes.
#[inline]
pub fn read_last_bytes<T: FormText>(values: &[Vec<u8>]) -> Result<T> {
    let last = values.last().ok_or_else(missing_value)?;
    T::from_bytes(last)
}

/// Read the field stored under `key`, from its bytes when it has any that are
/// not UTF-8.
pub fn read_key<T: FormField>(values: &Values, key: &str) -> Result<T> {
    match values.get_all_raw(key) {
        Some(raw) => T::read_field_bytes(raw),
        None => T::read_field(values.get_all(key)),
    }
}

impl FormField for String {
    #[inline]
    fn write_field(&self, key: &str, pairs: &mut Pairs) {
        pairs.push(key, self.clone());
    }

    fn read_field(values: &[String]) -> Result<Self> {
        Ok(match values {
            [] => String::new(),
            [value] => value.clone(),
            values => values.join(","),
        })
    }
}

impl FormField for Bytes {
    #[inline]
    fn write_field(&self, key: &str, pairs: &mut Pairs) {
        pairs.push_bytes(key, self.to_vec());
    }

    #[inline]
    fn read_field(values: &[String]) -> Result<Self> {
        read_last(values)
    }

    #[inline]
    fn read_field_bytes(values: &[Vec<u8>]) -> Result<Self> {
        read_last_bytes(values)
    }
}

impl<T: FormText> FormField for Vec<T> {
    fn write_field(&self, key: &str, pairs: &mut Pairs) {
        for item in self {
            pairs.push_bytes(key, item.to_bytes());
        }
    }

    fn read_field(values: &[String]) -> Result<Self> {
        values.iter().map(|value| T::from_text(value)).collect()
    }

    fn read_field_bytes(values: &[Vec<u8>]) -> Result<Self> {
        values.iter().map(|value| T::from_bytes(value)).collect()
    }
}

impl<T: FormField> FormField for Option<T> {
    #[inline]
    fn write_field(&self, key: &str, pairs: &mut Pairs) {
        if let Some(value) = self {
            value.write_field(key, pairs);
        }
    }

    #[inline]
    fn read_field(values: &[String]) -> Result<Self> {
        T::read_field(values).map(Some)
    }

    #[inline]
    fn read_field_bytes(values: &[Vec<u8>]) -> Result<Self> {
        T::read_field_bytes(values).map(Some)
    }
}

impl<T: FormField> FormField for Box<T> {
    #[inline]
    fn write_field(&self, key: &str, pairs: &mut Pairs) {
        (**self).write_field(key, pairs);
    }

    #[inline]
    fn read_field(values: &[String]) -> Result<Self> {
        T::read_field(values).map(Box::new)
    }

    #[inline]
    fn read_field_bytes(values: &[Vec<u8>]) -> Result<Self> {
        T::read_field_bytes(values).map(Box::new)
    }
}
