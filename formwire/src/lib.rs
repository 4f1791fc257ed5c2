//! formwire encodes and decodes `application/x-www-form-urlencoded` data to and
//! from records, maps and untyped values.
//!
//! # Quickstart
//!
//! Derive [`FormEncode`] and [`FormDecode`] on a struct with named fields:
//!
//! ```
//! # use {formwire::{FormDecode, FormEncode}, chrono::{DateTime, TimeZone, Utc}};
//! #[derive(FormEncode, FormDecode, Default, Debug, PartialEq)]
//! struct Musician {
//!     name: String,
//!     #[form(rename = "birth")]
//!     born: DateTime<Utc>,
//!     age: Option<f64>,
//!     numbers: Vec<i64>,
//!     #[form(skip)]
//!     session: u64,
//! }
//!
//! let john = Musician {
//!     name: "John".to_owned(),
//!     born: Utc.with_ymd_and_hms(1940, 10, 9, 0, 0, 0).unwrap(),
//!     age: None,
//!     numbers: vec![5, 7],
//!     session: 42,
//! };
//!
//! let form = formwire::encode_to_string(&john).unwrap();
//! assert_eq!(form, "name=John&birth=1940-10-09T00%3A00%3A00Z&numbers=5&numbers=7");
//!
//! let decoded: Musician = formwire::decode(form.as_bytes()).unwrap();
//! assert_eq!(decoded, Musician { session: 0, ..john });
//! ```
//!
//! Keys are matched flexibly on decode: a field `favorite_numbers` answers to
//! `favorite_numbers`, `favoritenumbers`, `favoriteNumbers`, `FavoriteNumbers` and
//! `favorite-numbers`, plus its `rename` alias. See [`names`] and
//! [`record::KeyMatcher`].
//!
//! Two fields answering to one key are rejected when the record is derived:
//!
//! ```compile_fail
//! #[derive(formwire::FormDecode, Default)]
//! struct Clash {
//!     user_name: String,
//!     username: String,
//! }
//! ```
//!
//! # Untyped data
//!
//! Maps with [`Value`] slots infer each value's kind (integer, float, bool,
//! duration, timestamp, then string) and collapse repeated keys into uniform
//! sequences where possible.
//!
//! ```
//! # use {formwire::Value, std::collections::HashMap};
//! let form: HashMap<String, Value> = formwire::decode(b"a=5&b=5.5&c=true&d=90s&n=5&n=7").unwrap();
//! assert_eq!(form["a"], Value::Int(5));
//! assert_eq!(form["b"], Value::Float(5.5));
//! assert_eq!(form["c"], Value::Bool(true));
//! assert_eq!(form["d"].to_string(), "1m30s");
//! assert_eq!(form["n"], Value::Ints(vec![5, 7]));
//! ```
//!
//! # Hooks
//!
//! - [`FormEncode`] / [`FormDecode`] implemented by hand take over the whole
//!   encoding of a type.
//! - [`FormText`] is the text form of a scalar; pair it with [`text_field!`] to use
//!   the type as a record field, or use [`display_text!`] for types with `Display`
//!   and `FromStr`.
//!
//! # Features
//!
//! - `derive` (default): the `FormEncode` and `FormDecode` derive macros.
//! - `serde`: [`serde_compat`], the same codec driven by `serde`.
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

extern crate self as formwire;

pub mod config;
pub use config::Config;
pub mod decode;
pub use decode::{decode, decode_into, decode_with, FormDecode};
pub mod duration;
pub mod encode;
pub use encode::{encode, encode_to_string, FormEncode};
pub mod error;
pub use error::{Error, Result};
pub mod field;
pub use field::FormField;
pub mod names;
pub mod record;
pub use record::{FieldSpec, FormRecord};
mod text;
pub use text::{parse_bool, FormText};
pub mod timestamp;
mod value;
pub use value::{Kind, Value};
mod values;
pub use values::{Iter, Pairs, Values};
#[cfg(feature = "serde")]
pub mod serde_compat;
#[cfg(feature = "derive")]
pub use formwire_derive::*;
