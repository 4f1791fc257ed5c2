//! Serde compatibility.
//!
//! The same codec, driven by `serde::Serialize` and `serde::Deserialize` instead
//! of the `FormEncode`/`FormDecode` derives.
//!
//! ```
//! # use {serde::{Deserialize, Serialize}, formwire::serde_compat};
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Search {
//!     query: String,
//!     page: u32,
//!     tags: Vec<String>,
//!     lang: Option<String>,
//! }
//!
//! let search = Search {
//!     query: "rust form".to_owned(),
//!     page: 2,
//!     tags: vec!["a".to_owned(), "b".to_owned()],
//!     lang: None,
//! };
//! let form = serde_compat::to_string(&search).unwrap();
//! assert_eq!(form, "query=rust+form&page=2&tags=a&tags=b");
//! assert_eq!(serde_compat::from_str::<Search>(&form).unwrap(), search);
//! ```
//!
//! Struct fields are matched with the same spellings as derived records, so
//! `Page=2` reaches `page`. Nested structs
//! and maps inside a field are rejected with
//! [`Error::UnsupportedType`](crate::Error::UnsupportedType).
use {
    crate::{
        config::Config,
        error::{Error, Result},
        FormDecode, FormEncode, Values,
    },
    serde::{de::DeserializeOwned, Serialize},
};

mod de;
mod ser;

pub use {de::Deserializer, ser::Serializer};

impl serde::ser::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: core::fmt::Display,
    {
        Error::custom(msg)
    }
}

impl serde::de::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: core::fmt::Display,
    {
        Error::custom(msg)
    }
}

/// Encode a `serde::Serialize` value as form data.
pub fn to_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    value.serialize(Serializer)
}

pub fn to_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(String::from_utf8(to_bytes(value)?)?)
}

/// Decode form data into a `serde::Deserialize` value with the default [`Config`].
pub fn from_bytes<T: DeserializeOwned>(data: &[u8]) -> Result<T> {
    from_bytes_with(data, &Config::default())
}

pub fn from_bytes_with<T: DeserializeOwned>(data: &[u8], config: &Config) -> Result<T> {
    let values = Values::parse_with(data, config)?;
    T::deserialize(Deserializer::new(values, *config))
}

#[inline]
pub fn from_str<T: DeserializeOwned>(data: &str) -> Result<T> {
    from_bytes(data.as_bytes())
}

/// Wrapper that implements [`FormEncode`] and [`FormDecode`] for types that
/// implement [`serde::Serialize`] and [`serde::Deserialize`], respectively.
///
/// ```
/// # use {formwire::serde_compat::Serde, std::collections::BTreeMap};
/// let form: Serde<BTreeMap<String, u8>> = formwire::decode(b"b=2&a=1").unwrap();
/// assert_eq!(formwire::encode_to_string(&form).unwrap(), "a=1&b=2");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[repr(transparent)]
pub struct Serde<T>(pub T);

impl<T: Serialize> FormEncode for Serde<T> {
    fn encode_form(&self) -> Result<Vec<u8>> {
        to_bytes(&self.0)
    }
}

impl<T: DeserializeOwned> FormDecode for Serde<T> {
    fn decode_form(&mut self, data: &[u8], config: &Config) -> Result<()> {
        self.0 = from_bytes_with(data, config)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        serde::Deserialize,
        std::collections::{BTreeMap, HashMap},
    };

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Profile {
        name: String,
        #[serde(rename = "years")]
        age: Option<f64>,
        numbers: Vec<i64>,
        admin: bool,
    }

    #[test]
    fn struct_fields_in_declaration_order() {
        let profile = Profile {
            name: "John".to_owned(),
            age: None,
            numbers: vec![5, 7],
            admin: false,
        };
        assert_eq!(
            to_string(&profile).unwrap(),
            "name=John&numbers=5&numbers=7&admin=false"
        );
    }

    #[test]
    fn struct_decode_matches_spellings() {
        let profile: Profile = from_str("Name=John&name=Paul&YEARS=1&years=81.8&numbers=5&numbers=7&admin=t")
            .unwrap();
        // `Name` and `name` both reach `name`; the later key in sorted order wins.
        assert_eq!(profile.name, "Paul");
        assert_eq!(profile.age, Some(81.8));
        assert_eq!(profile.numbers, [5, 7]);
        assert!(profile.admin);
    }

    #[test]
    fn repeated_string_values_join() {
        let profile: Profile = from_str("name=John&name=Lennon&numbers=1&admin=0").unwrap();
        assert_eq!(profile.name, "John,Lennon");
        assert_eq!(profile.age, None);
    }

    #[test]
    fn maps_sort_keys() {
        let map = HashMap::from([("b", 2), ("a", 1)]);
        assert_eq!(to_string(&map).unwrap(), "a=1&b=2");
        let map: BTreeMap<String, Vec<u32>> = from_str("x=1&x=2").unwrap();
        assert_eq!(map["x"], [1, 2]);
    }

    #[test]
    fn byte_buffers_keep_raw_bytes() {
        #[derive(Serialize, Deserialize, Debug, PartialEq)]
        struct Blob {
            #[serde(with = "bytes_field")]
            data: Vec<u8>,
        }

        mod bytes_field {
            pub fn serialize<S: serde::Serializer>(data: &[u8], s: S) -> Result<S::Ok, S::Error> {
                s.serialize_bytes(data)
            }

            pub fn deserialize<'de, D: serde::Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
                struct Buf;

                impl<'de> serde::de::Visitor<'de> for Buf {
                    type Value = Vec<u8>;

                    fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                        f.write_str("bytes")
                    }

                    fn visit_byte_buf<E: serde::de::Error>(self, v: Vec<u8>) -> Result<Vec<u8>, E> {
                        Ok(v)
                    }
                }

                d.deserialize_byte_buf(Buf)
            }
        }

        let blob = Blob {
            data: b"\xff\0a".to_vec(),
        };
        assert_eq!(to_string(&blob).unwrap(), "data=%FF%00a");
        assert_eq!(from_str::<Blob>("data=%FF%00a").unwrap(), blob);
    }

    #[test]
    fn nested_records_are_rejected() {
        #[derive(Serialize, Deserialize, Debug)]
        struct Outer {
            inner: BTreeMap<String, String>,
        }
        let outer = Outer {
            inner: BTreeMap::new(),
        };
        assert!(matches!(to_bytes(&outer), Err(Error::UnsupportedType(_))));
        assert!(matches!(
            from_str::<Outer>("inner=x"),
            Err(Error::UnsupportedType(_))
        ));
    }

    #[test]
    fn scalar_destinations_are_rejected() {
        assert!(matches!(
            from_str::<u32>("5"),
            Err(Error::UnsupportedDestination(_))
        ));
        assert!(matches!(
            from_str::<Vec<u32>>("a=5"),
            Err(Error::UnsupportedDestination(_))
        ));
    }

    #[test]
    fn unknown_keys_follow_config() {
        let config = Config::default().deny_unknown_keys(true);
        assert!(matches!(
            from_bytes_with::<Profile>(b"name=x&numbers=1&admin=1&extra=1", &config),
            Err(Error::UnknownKey(_))
        ));
        assert!(from_str::<Profile>("name=x&numbers=1&admin=1&extra=1").is_ok());
    }
}
