//! The parsed multi-map ([`Values`]) and the ordered pair writer ([`Pairs`]).
//!
//! Both sides of the codec meet here: decoding always goes through
//! [`Values::parse_with`], and encoding always ends in [`Pairs::finish`] or
//! [`Values::encode`], which own the percent-escaping.
use {
    crate::{
        config::Config,
        error::{invalid_escape, invalid_separator, pair_limit, Result},
    },
    percent_encoding::percent_decode,
    std::{
        borrow::Cow,
        collections::{btree_map, BTreeMap},
    },
    tracing::debug,
    url::form_urlencoded,
};

/// Form key to its ordered values.
///
/// Keys are kept sorted, which is also the order [`Values::encode`] writes them in.
/// The order of values under a single key is the order they were added in.
///
/// Values are text. A value whose percent-decoded bytes are not UTF-8 is stored
/// as text with U+FFFD in place of the invalid sequences, and its key also keeps
/// the exact bytes of every value (see [`Values::get_all_raw`]).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Values {
    inner: BTreeMap<String, Vec<String>>,
    opaque: BTreeMap<String, Vec<Vec<u8>>>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse form data with the default [`Config`].
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::parse_with(data, &Config::default())
    }

    /// Parse form data.
    ///
    /// Pairs are separated by `&`, empty segments are skipped, and a segment
    /// without `=` is a key with an empty value. `+` decodes to a space.
    /// Malformed percent-escapes and `;` separators are rejected.
    pub fn parse_with(data: &[u8], config: &Config) -> Result<Self> {
        let mut values = Self::new();
        let mut pairs = 0usize;
        for segment in data.split(|&b| b == b'&') {
            if segment.is_empty() {
                continue;
            }
            if segment.contains(&b';') {
                debug!("rejecting form data with `;` separator");
                return Err(invalid_separator());
            }
            validate_escapes(segment)?;
            pairs += 1;
            if pairs > config.max_pairs() {
                debug!(limit = config.max_pairs(), "form data exceeds pair limit");
                return Err(pair_limit(config.max_pairs()));
            }

            let (key, value) = match segment.iter().position(|&b| b == b'=') {
                Some(eq) => (&segment[..eq], &segment[eq + 1..]),
                None => (segment, &[][..]),
            };
            let key = String::from_utf8_lossy(&unescape(key)).into_owned();
            values.add_bytes(key, unescape(value));
        }
        Ok(values)
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values stored under `key`, empty if the key is absent.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.inner.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Exact bytes of every value of `key`, kept only for keys holding a value
    /// that is not UTF-8. Other keys read through [`Values::get_all`].
    pub fn get_all_raw(&self, key: &str) -> Option<&[Vec<u8>]> {
        self.opaque.get(key).map(Vec::as_slice)
    }

    /// Append `value` to the values of `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(opaque) = self.opaque.get_mut(&key) {
            opaque.push(value.clone().into_bytes());
        }
        self.inner.entry(key).or_default().push(value);
    }

    /// Append the bytes `value` to the values of `key`.
    pub fn add_bytes(&mut self, key: impl Into<String>, value: Vec<u8>) {
        let key = key.into();
        let bytes = match String::from_utf8(value) {
            Ok(text) => return self.add(key, text),
            Err(err) => err.into_bytes(),
        };
        let text = self.inner.entry(key.clone()).or_default();
        let opaque = self
            .opaque
            .entry(key)
            .or_insert_with(|| text.iter().map(|value| value.clone().into_bytes()).collect());
        text.push(String::from_utf8_lossy(&bytes).into_owned());
        opaque.push(bytes);
    }

    /// Replace all values of `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.opaque.remove(&key);
        self.inner.insert(key, vec![value.into()]);
    }

    /// Replace all values of `key` with `values`.
    pub fn set_all(&mut self, key: impl Into<String>, values: Vec<String>) {
        let key = key.into();
        self.opaque.remove(&key);
        self.inner.insert(key, values);
    }

    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.opaque.remove(key);
        self.inner.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    /// Every key with its text and, for keys holding bytes that are not UTF-8,
    /// the exact bytes.
    pub(crate) fn into_entries(
        self,
    ) -> impl Iterator<Item = (String, Vec<String>, Option<Vec<Vec<u8>>>)> {
        let mut opaque = self.opaque;
        self.inner.into_iter().map(move |(key, text)| {
            let raw = opaque.remove(&key);
            (key, text, raw)
        })
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.inner.iter(),
        }
    }

    /// Encode as form data, keys sorted, one pair per value.
    ///
    /// Keys holding bytes that are not UTF-8 write those bytes.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for (key, values) in &self.inner {
            match self.opaque.get(key) {
                Some(raw) => {
                    for value in raw {
                        append_pair(&mut out, key, value);
                    }
                }
                None => {
                    for value in values {
                        append_pair(&mut out, key, value.as_bytes());
                    }
                }
            }
        }
        out
    }
}

fn append_pair(out: &mut String, key: &str, value: &[u8]) {
    if !out.is_empty() {
        out.push('&');
    }
    out.extend(form_urlencoded::byte_serialize(key.as_bytes()));
    out.push('=');
    out.extend(form_urlencoded::byte_serialize(value));
}

/// `+` is a space, then percent-escapes are decoded to bytes.
fn unescape(input: &[u8]) -> Vec<u8> {
    let input: Cow<'_, [u8]> = if input.contains(&b'+') {
        Cow::Owned(
            input
                .iter()
                .map(|&b| if b == b'+' { b' ' } else { b })
                .collect(),
        )
    } else {
        Cow::Borrowed(input)
    };
    percent_decode(&input).collect()
}

pub struct Iter<'a> {
    inner: btree_map::Iter<'a, String, Vec<String>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a [String]);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Values {
    type Item = (&'a str, &'a [String]);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Yields the text of each key; bytes that are not UTF-8 come out with U+FFFD.
impl IntoIterator for Values {
    type Item = (String, Vec<String>);
    type IntoIter = btree_map::IntoIter<String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<K, V> FromIterator<(K, V)> for Values
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (key, value) in iter {
            values.add(key, value);
        }
        values
    }
}

impl From<BTreeMap<String, Vec<String>>> for Values {
    fn from(inner: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            inner,
            opaque: BTreeMap::new(),
        }
    }
}

impl From<Values> for BTreeMap<String, Vec<String>> {
    fn from(values: Values) -> Self {
        values.inner
    }
}

/// Every `%` must start a two hex digit escape.
fn validate_escapes(segment: &[u8]) -> Result<()> {
    let mut offset = 0;
    while let Some(pos) = segment[offset..].iter().position(|&b| b == b'%') {
        let start = offset + pos;
        let escape = &segment[start..segment.len().min(start + 3)];
        if escape.len() < 3 || !escape[1].is_ascii_hexdigit() || !escape[2].is_ascii_hexdigit() {
            debug!("rejecting malformed percent-escape");
            return Err(invalid_escape(escape));
        }
        offset = start + 3;
    }
    Ok(())
}

/// Ordered `key=value` pairs waiting to be escaped and joined.
///
/// Unlike [`Values`], pairs keep their insertion order, which is how records
/// emit fields in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pairs {
    pairs: Vec<(String, Vec<u8>)>,
}

impl Pairs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pairs: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, key: &str, value: String) {
        self.push_bytes(key, value.into_bytes());
    }

    /// Push a value that need not be UTF-8. Its bytes are escaped as they are.
    #[inline]
    pub fn push_bytes(&mut self, key: &str, value: Vec<u8>) {
        self.pairs.push((key.to_owned(), value));
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.pairs
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_slice()))
    }

    /// Collect into a [`Values`], giving up pair order across keys.
    pub fn into_values(self) -> Values {
        let mut values = Values::new();
        for (key, value) in self.pairs {
            values.add_bytes(key, value);
        }
        values
    }

    /// Percent-escape keys and values independently, join with `=` and `&`.
    pub fn finish(self) -> Vec<u8> {
        let mut out = String::new();
        for (key, value) in &self.pairs {
            append_pair(&mut out, key, value);
        }
        out.into_bytes()
    }
}
