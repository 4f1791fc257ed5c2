//! Encoder dispatch.
//!
//! Every encodable shape implements [`FormEncode`]:
//!
//! - records (`#[derive(FormEncode)]`) write their fields as ordered pairs;
//! - [`Values`] and maps write key-sorted pairs;
//! - `str`, `String`, `[u8]`, `Vec<u8>` and [`Bytes`] are taken as already encoded;
//! - scalars write their bare text, with no key.
//!
//! Implementing [`FormEncode`] by hand replaces all of the above for a type; its
//! output is returned unmodified.
use {
    crate::{error::Result, field::FormField, text::FormText, values::Pairs, Values},
    bytes::Bytes,
    std::collections::{BTreeMap, HashMap},
};

pub trait FormEncode {
    fn encode_form(&self) -> Result<Vec<u8>>;
}

/// Encode `value` as form data.
///
/// ```
/// # use std::collections::HashMap;
/// let form = HashMap::from([
///     ("b".to_owned(), vec![2, 3]),
///     ("a".to_owned(), vec![1]),
/// ]);
/// assert_eq!(formwire::encode(&form).unwrap(), b"a=1&b=2&b=3");
/// assert_eq!(formwire::encode(&42u8).unwrap(), b"42");
/// ```
#[inline]
pub fn encode<T: FormEncode + ?Sized>(value: &T) -> Result<Vec<u8>> {
    value.encode_form()
}

/// Encode `value` as form data, failing with [`Error::Utf8`](crate::Error::Utf8)
/// when a passthrough value is not UTF-8.
pub fn encode_to_string<T: FormEncode + ?Sized>(value: &T) -> Result<String> {
    Ok(String::from_utf8(value.encode_form()?)?)
}

impl FormEncode for Values {
    #[inline]
    fn encode_form(&self) -> Result<Vec<u8>> {
        Ok(self.encode().into_bytes())
    }
}

fn encode_map<'a, K, V>(entries: impl Iterator<Item = (&'a K, &'a V)>) -> Vec<u8>
where
    K: FormText + 'a,
    V: FormField + 'a,
{
    let mut pairs = Pairs::new();
    for (key, value) in entries {
        value.write_field(&key.to_text(), &mut pairs);
    }
    pairs.into_values().encode().into_bytes()
}

impl<K: FormText, V: FormField, S> FormEncode for HashMap<K, V, S> {
    fn encode_form(&self) -> Result<Vec<u8>> {
        Ok(encode_map(self.iter()))
    }
}

impl<K: FormText, V: FormField> FormEncode for BTreeMap<K, V> {
    fn encode_form(&self) -> Result<Vec<u8>> {
        Ok(encode_map(self.iter()))
    }
}

impl FormEncode for str {
    #[inline]
    fn encode_form(&self) -> Result<Vec<u8>> {
        Ok(self.as_bytes().to_vec())
    }
}

impl FormEncode for String {
    #[inline]
    fn encode_form(&self) -> Result<Vec<u8>> {
        Ok(self.as_bytes().to_vec())
    }
}

impl FormEncode for [u8] {
    #[inline]
    fn encode_form(&self) -> Result<Vec<u8>> {
        Ok(self.to_vec())
    }
}

impl FormEncode for Vec<u8> {
    #[inline]
    fn encode_form(&self) -> Result<Vec<u8>> {
        Ok(self.clone())
    }
}

impl FormEncode for Bytes {
    #[inline]
    fn encode_form(&self) -> Result<Vec<u8>> {
        Ok(self.to_vec())
    }
}

impl<T: FormEncode + ?Sized> FormEncode for &T {
    #[inline]
    fn encode_form(&self) -> Result<Vec<u8>> {
        (**self).encode_form()
    }
}

impl<T: FormEncode + ?Sized> FormEncode for Box<T> {
    #[inline]
    fn encode_form(&self) -> Result<Vec<u8>> {
        (**self).encode_form()
    }
}
