//! Decoder dispatch.
//!
//! Every decodable destination implements [`FormDecode`]:
//!
//! - records (`#[derive(FormDecode)]`) assign the fields whose names match a key;
//! - [`Values`] is replaced by the parsed multi-map;
//! - maps insert one entry per key, coercing keys with [`FormText`] and values with
//!   [`FormField`].
//!
//! Implementing [`FormDecode`] by hand receives the raw bytes untouched.
use {
    crate::{
        config::Config,
        error::Result,
        field::{read_key, FormField},
        text::FormText,
        Values,
    },
    core::hash::{BuildHasher, Hash},
    std::collections::{BTreeMap, HashMap},
    tracing::trace,
};

pub trait FormDecode {
    /// Decode `data` into `self`.
    ///
    /// Decoding is not transactional: parts assigned before an error stay assigned.
    fn decode_form(&mut self, data: &[u8], config: &Config) -> Result<()>;
}

/// Decode `data` into a fresh `T::default()`.
///
/// ```
/// # use std::collections::BTreeMap;
/// let form: BTreeMap<String, String> = formwire::decode(b"name=John&name=Paul").unwrap();
/// assert_eq!(form["name"], "John,Paul");
/// ```
pub fn decode<T: FormDecode + Default>(data: &[u8]) -> Result<T> {
    let mut dst = T::default();
    decode_with(data, &mut dst, &Config::default())?;
    Ok(dst)
}

/// Decode `data` into an existing value with the default [`Config`].
#[inline]
pub fn decode_into<T: FormDecode + ?Sized>(data: &[u8], dst: &mut T) -> Result<()> {
    decode_with(data, dst, &Config::default())
}

#[inline]
pub fn decode_with<T: FormDecode + ?Sized>(data: &[u8], dst: &mut T, config: &Config) -> Result<()> {
    dst.decode_form(data, config)
}

impl FormDecode for Values {
    fn decode_form(&mut self, data: &[u8], config: &Config) -> Result<()> {
        *self = Values::parse_with(data, config)?;
        Ok(())
    }
}

fn decode_entries<K, V>(
    data: &[u8],
    config: &Config,
    mut insert: impl FnMut(K, V),
) -> Result<()>
where
    K: FormText,
    V: FormField,
{
    let values = Values::parse_with(data, config)?;
    trace!(keys = values.len(), "decoding form into map");
    for key in values.keys() {
        insert(K::from_text(key)?, read_key(&values, key)?);
    }
    Ok(())
}

impl<K, V, S> FormDecode for HashMap<K, V, S>
where
    K: FormText + Eq + Hash,
    V: FormField,
    S: BuildHasher,
{
    fn decode_form(&mut self, data: &[u8], config: &Config) -> Result<()> {
        decode_entries(data, config, |key, value| {
            self.insert(key, value);
        })
    }
}

impl<K, V> FormDecode for BTreeMap<K, V>
where
    K: FormText + Ord,
    V: FormField,
{
    fn decode_form(&mut self, data: &[u8], config: &Config) -> Result<()> {
        decode_entries(data, config, |key, value| {
            self.insert(key, value);
        })
    }
}

impl<T: FormDecode + ?Sized> FormDecode for Box<T> {
    #[inline]
    fn decode_form(&mut self, data: &[u8], config: &Config) -> Result<()> {
        (**self).decode_form(data, config)
    }
}

/// Fills in a `T::default()` when empty, then decodes into it.
impl<T: FormDecode + Default> FormDecode for Option<T> {
    fn decode_form(&mut self, data: &[u8], config: &Config) -> Result<()> {
        self.get_or_insert_with(T::default).decode_form(data, config)
    }
}
