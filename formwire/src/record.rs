//! Records: structs with named fields, described by a static [`FieldSpec`] table.
//!
//! `#[derive(FormDecode)]` implements [`FormRecord`] and routes
//! [`FormDecode::decode_form`](crate::FormDecode::decode_form) to [`decode_record`].
//! A hand-written implementation looks like this:
//!
//! ```
//! # use formwire::{record::{self, FieldSpec, FormRecord}, config::Config, FormDecode, FormField, Result};
//! #[derive(Default)]
//! struct Login {
//!     user_name: String,
//!     remember: bool,
//! }
//!
//! impl FormRecord for Login {
//!     const FIELDS: &'static [FieldSpec] = &[
//!         FieldSpec::new("user_name", Some("user")),
//!         FieldSpec::new("remember", None),
//!     ];
//!
//!     fn read_field(&mut self, index: usize, values: &[String]) -> Result<()> {
//!         match index {
//!             0 => self.user_name = FormField::read_field(values)?,
//!             1 => self.remember = FormField::read_field(values)?,
//!             _ => {}
//!         }
//!         Ok(())
//!     }
//! }
//!
//! impl FormDecode for Login {
//!     fn decode_form(&mut self, data: &[u8], config: &Config) -> Result<()> {
//!         record::decode_record(self, data, config)
//!     }
//! }
//!
//! let login: Login = formwire::decode(b"userName=ringo&remember=t").unwrap();
//! assert_eq!(login.user_name, "ringo");
//! assert!(login.remember);
//! ```
use {
    crate::{
        config::Config,
        error::{ambiguous_field_name, unknown_key, Result},
        names,
        values::Values,
    },
    std::{borrow::Cow, collections::HashMap},
    tracing::trace,
};

/// Declared identifier of a record field and its optional alias.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub ident: &'static str,
    pub rename: Option<&'static str>,
}

impl FieldSpec {
    pub const fn new(ident: &'static str, rename: Option<&'static str>) -> Self {
        Self { ident, rename }
    }

    /// Key written on encode: the alias, else the lower-cased identifier.
    pub fn wire_name(&self) -> Cow<'static, str> {
        match self.rename {
            Some(alias) => Cow::Borrowed(alias),
            None => Cow::Owned(names::wire_name(self.ident)),
        }
    }
}

/// A destination with a fixed, ordered set of named fields.
///
/// Fields marked `#[form(skip)]` are absent from [`FIELDS`](FormRecord::FIELDS), so
/// `index` counts only the fields the codec sees.
pub trait FormRecord {
    const FIELDS: &'static [FieldSpec];

    /// Coerce `values` into the field at `index` and assign it.
    fn read_field(&mut self, index: usize, values: &[String]) -> Result<()>;

    /// Like [`read_field`](FormRecord::read_field), for a key holding a value
    /// that is not UTF-8. `values` are the percent-decoded bytes.
    fn read_field_bytes(&mut self, index: usize, values: &[Vec<u8>]) -> Result<()> {
        let text: Vec<String> = values
            .iter()
            .map(|value| String::from_utf8_lossy(value).into_owned())
            .collect();
        self.read_field(index, &text)
    }
}

/// Lookup from every accepted spelling of a field name to the field's index.
///
/// For each field the derived spellings (see [`names::spellings`]) are registered
/// first, then every alias. A spelling claimed by two different fields is an
/// [`Error::AmbiguousFieldName`](crate::Error::AmbiguousFieldName).
#[derive(Clone, Debug)]
pub struct KeyMatcher {
    table: HashMap<String, (usize, &'static str)>,
}

impl KeyMatcher {
    pub fn new(fields: &[FieldSpec]) -> Result<Self> {
        Self::build(fields.iter().map(|field| (field.ident, field.rename)))
    }

    /// Matcher for fields known only by name, with no separate alias.
    pub fn for_names(names: &[&'static str]) -> Result<Self> {
        Self::build(names.iter().map(|name| (*name, None)))
    }

    fn build<I>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'static str, Option<&'static str>)>,
        I::IntoIter: Clone,
    {
        let fields = fields.into_iter();
        let mut matcher = Self {
            table: HashMap::new(),
        };
        for (index, (ident, _)) in fields.clone().enumerate() {
            for spelling in names::spellings(ident) {
                matcher.claim(spelling, index, ident)?;
            }
        }
        for (index, (ident, rename)) in fields.enumerate() {
            if let Some(alias) = rename {
                matcher.claim(alias.to_owned(), index, ident)?;
            }
        }
        Ok(matcher)
    }

    fn claim(&mut self, spelling: String, index: usize, ident: &'static str) -> Result<()> {
        match self.table.get(&spelling) {
            Some(&(owner, first)) if owner != index => {
                Err(ambiguous_field_name(&spelling, first, ident))
            }
            _ => {
                self.table.insert(spelling, (index, ident));
                Ok(())
            }
        }
    }

    /// Index of the field `key` spells, if any.
    #[inline]
    pub fn resolve(&self, key: &str) -> Option<usize> {
        self.table.get(key).map(|&(index, _)| index)
    }
}

/// Parse `data` and assign every key that resolves to a field of `dst`.
///
/// Fields without a matching key keep their current value. When several keys
/// resolve to one field (`userName` and `user_name`, say) the field is assigned
/// once per key in sorted key order, so the last such key wins.
pub fn decode_record<T: FormRecord>(dst: &mut T, data: &[u8], config: &Config) -> Result<()> {
    let values = Values::parse_with(data, config)?;
    let matcher = KeyMatcher::new(T::FIELDS)?;
    for (key, text) in &values {
        match matcher.resolve(key) {
            Some(index) => match values.get_all_raw(key) {
                Some(raw) => dst.read_field_bytes(index, raw)?,
                None => dst.read_field(index, text)?,
            },
            None if config.denies_unknown_keys() => return Err(unknown_key(key)),
            None => trace!(key, "ignoring form key with no matching field"),
        }
    }
    Ok(())
}
