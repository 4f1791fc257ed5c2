//! Untyped form values.
//!
//! A [`Value`] slot has no declared type; its kind is decided per decode by trying
//! interpretations in a fixed order (see [`Value::infer`]). Several values under one
//! key become a uniform sequence when they all infer to the same kind, so
//! `numbers=5&numbers=7` decodes to `Value::Ints(vec![5, 7])` and not to a list of
//! individually tagged integers.
//!
//! ```
//! # use formwire::Value;
//! # use std::collections::HashMap;
//! let form: HashMap<String, Value> = formwire::decode(b"numbers=5&numbers=7&age=81.8").unwrap();
//! assert_eq!(form["numbers"].as_ints(), Some(&[5, 7][..]));
//! assert_eq!(form["age"].as_f64(), Some(81.8));
//! ```
use {
    crate::{
        duration,
        encode::FormEncode,
        error::Result,
        field::FormField,
        text::{parse_bool, FormText},
        timestamp,
        values::Pairs,
    },
    chrono::{DateTime, TimeDelta, Utc},
    core::fmt,
    tracing::trace,
};

/// The kind of a scalar [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Int,
    Float,
    Bool,
    Duration,
    Timestamp,
    String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Duration(TimeDelta),
    Timestamp(DateTime<Utc>),
    String(String),
    Ints(Vec<i64>),
    Floats(Vec<f64>),
    Bools(Vec<bool>),
    Durations(Vec<TimeDelta>),
    Timestamps(Vec<DateTime<Utc>>),
    Strings(Vec<String>),
    /// Scalars of mixed kinds.
    List(Vec<Value>),
}

macro_rules! gather {
    ($items:expr, $variant:ident) => {
        $items
            .into_iter()
            .filter_map(|item| match item {
                Value::$variant(v) => Some(v),
                _ => None,
            })
            .collect()
    };
}

impl Value {
    /// Interpret `text`, first match wins:
    ///
    /// 1. `i64`
    /// 2. `f64`
    /// 3. bool (`1 t T TRUE true True 0 f F FALSE false False`, though `1` and `0`
    ///    are already integers)
    /// 4. duration (`90s`, `1h30m`)
    /// 5. timestamp, see [`timestamp`](crate::timestamp) for the layouts
    /// 6. the text itself
    pub fn infer(text: &str) -> Self {
        let value = if let Ok(int) = text.parse::<i64>() {
            Value::Int(int)
        } else if let Ok(float) = text.parse::<f64>() {
            Value::Float(float)
        } else if let Ok(bool) = parse_bool(text) {
            Value::Bool(bool)
        } else if let Ok(nanos) = duration::parse_nanos(text) {
            Value::Duration(TimeDelta::nanoseconds(nanos))
        } else if let Ok(timestamp) = timestamp::parse_utc(text) {
            Value::Timestamp(timestamp)
        } else {
            Value::String(text.to_owned())
        };
        trace!(kind = ?value.kind(), "inferred form value");
        value
    }

    /// Interpret every value of one key.
    ///
    /// A single value is inferred on its own. Several values are inferred one by
    /// one and then [collapsed](Value::collapse).
    pub fn infer_all(texts: &[String]) -> Self {
        match texts {
            [text] => Self::infer(text),
            texts => Self::collapse(texts.iter().map(|text| Self::infer(text)).collect()),
        }
    }

    /// Turn scalars of one kind into the matching uniform sequence; anything else
    /// (mixed kinds, nested sequences, no items) stays a [`Value::List`].
    pub fn collapse(items: Vec<Value>) -> Self {
        let Some(kind) = items.first().and_then(Value::kind) else {
            return Value::List(items);
        };
        if items.iter().any(|item| item.kind() != Some(kind)) {
            return Value::List(items);
        }
        match kind {
            Kind::Int => Value::Ints(gather!(items, Int)),
            Kind::Float => Value::Floats(gather!(items, Float)),
            Kind::Bool => Value::Bools(gather!(items, Bool)),
            Kind::Duration => Value::Durations(gather!(items, Duration)),
            Kind::Timestamp => Value::Timestamps(gather!(items, Timestamp)),
            Kind::String => Value::Strings(gather!(items, String)),
        }
    }

    /// Kind of a scalar, `None` for sequences.
    pub fn kind(&self) -> Option<Kind> {
        Some(match self {
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Bool(_) => Kind::Bool,
            Value::Duration(_) => Kind::Duration,
            Value::Timestamp(_) => Kind::Timestamp,
            Value::String(_) => Kind::String,
            _ => return None,
        })
    }

    /// Element kind of a uniform sequence.
    pub fn element_kind(&self) -> Option<Kind> {
        Some(match self {
            Value::Ints(_) => Kind::Int,
            Value::Floats(_) => Kind::Float,
            Value::Bools(_) => Kind::Bool,
            Value::Durations(_) => Kind::Duration,
            Value::Timestamps(_) => Kind::Timestamp,
            Value::Strings(_) => Kind::String,
            _ => return None,
        })
    }

    pub fn is_scalar(&self) -> bool {
        self.kind().is_some()
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<TimeDelta> {
        match self {
            Value::Duration(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Timestamp(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_ints(&self) -> Option<&[i64]> {
        match self {
            Value::Ints(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_floats(&self) -> Option<&[f64]> {
        match self {
            Value::Floats(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bools(&self) -> Option<&[bool]> {
        match self {
            Value::Bools(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_durations(&self) -> Option<&[TimeDelta]> {
        match self {
            Value::Durations(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_timestamps(&self) -> Option<&[DateTime<Utc>]> {
        match self {
            Value::Timestamps(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_strings(&self) -> Option<&[String]> {
        match self {
            Value::Strings(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    /// Canonical text of every element, one entry for a scalar.
    pub fn texts(&self) -> Vec<String> {
        fn each<T: FormText>(items: &[T]) -> Vec<String> {
            items.iter().map(FormText::to_text).collect()
        }

        match self {
            Value::Int(v) => vec![v.to_text()],
            Value::Float(v) => vec![v.to_text()],
            Value::Bool(v) => vec![v.to_text()],
            Value::Duration(v) => vec![v.to_text()],
            Value::Timestamp(v) => vec![v.to_text()],
            Value::String(v) => vec![v.clone()],
            Value::Ints(v) => each(v),
            Value::Floats(v) => each(v),
            Value::Bools(v) => each(v),
            Value::Durations(v) => each(v),
            Value::Timestamps(v) => each(v),
            Value::Strings(v) => v.clone(),
            Value::List(v) => v.iter().flat_map(Value::texts).collect(),
        }
    }
}

/// Sequences render comma-joined.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.texts().join(","))
    }
}

impl FormText for Value {
    fn to_text(&self) -> String {
        self.to_string()
    }

    /// Never fails: the last resort is [`Value::String`].
    fn from_text(text: &str) -> Result<Self> {
        Ok(Self::infer(text))
    }
}

impl FormField for Value {
    fn write_field(&self, key: &str, pairs: &mut Pairs) {
        for text in self.texts() {
            pairs.push(key, text);
        }
    }

    fn read_field(values: &[String]) -> Result<Self> {
        Ok(Self::infer_all(values))
    }
}

impl FormEncode for Value {
    fn encode_form(&self) -> Result<Vec<u8>> {
        Ok(self.to_text().into_bytes())
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),+ $(,)?) => {$(
        impl From<$ty> for Value {
            #[inline]
            fn from(value: $ty) -> Self {
                Value::$variant(value)
            }
        }
    )+};
}

impl_from!(
    i64 => Int,
    f64 => Float,
    bool => Bool,
    TimeDelta => Duration,
    DateTime<Utc> => Timestamp,
    String => String,
    Vec<i64> => Ints,
    Vec<f64> => Floats,
    Vec<bool> => Bools,
    Vec<TimeDelta> => Durations,
    Vec<DateTime<Utc>> => Timestamps,
    Vec<String> => Strings,
    Vec<Value> => List,
);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    /// Numbers and bools natively, durations and timestamps as their text,
    /// sequences as sequences.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        use serde::ser::{Serialize, SerializeSeq};

        match self {
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::String(v) => serializer.serialize_str(v),
            Value::Duration(_) | Value::Timestamp(_) => serializer.serialize_str(&self.to_text()),
            Value::Ints(v) => v.serialize(serializer),
            Value::Floats(v) => v.serialize(serializer),
            Value::Bools(v) => v.serialize(serializer),
            Value::Strings(v) => v.serialize(serializer),
            Value::Durations(_) | Value::Timestamps(_) => self.texts().serialize(serializer),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, chrono::TimeZone};

    fn raw(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    #[test]
    fn inference_order() {
        assert_eq!(Value::infer("5"), Value::Int(5));
        assert_eq!(Value::infer("-5"), Value::Int(-5));
        assert_eq!(Value::infer("5.5"), Value::Float(5.5));
        assert_eq!(Value::infer("1e3"), Value::Float(1000.0));
        assert_eq!(Value::infer("true"), Value::Bool(true));
        assert_eq!(Value::infer("F"), Value::Bool(false));
        assert_eq!(Value::infer("1"), Value::Int(1));
        assert_eq!(
            Value::infer("90s"),
            Value::Duration(TimeDelta::seconds(90))
        );
        assert_eq!(
            Value::infer("2006-01-02"),
            Value::Timestamp(Utc.with_ymd_and_hms(2006, 1, 2, 0, 0, 0).unwrap())
        );
        assert_eq!(Value::infer("John"), Value::String("John".to_owned()));
        assert_eq!(Value::infer(""), Value::String(String::new()));
    }

    #[test]
    fn integer_overflow_falls_through_to_float() {
        assert_eq!(
            Value::infer("9223372036854775808"),
            Value::Float(9223372036854775808.0)
        );
    }

    #[test]
    fn uniform_values_collapse() {
        assert_eq!(Value::infer_all(&raw(&["5", "7"])), Value::Ints(vec![5, 7]));
        assert_eq!(
            Value::infer_all(&raw(&["John", "Lennon"])),
            Value::Strings(vec!["John".to_owned(), "Lennon".to_owned()])
        );
        assert_eq!(
            Value::infer_all(&raw(&["1s", "2m"])).element_kind(),
            Some(Kind::Duration)
        );
    }

    #[test]
    fn mixed_values_stay_a_list() {
        assert_eq!(
            Value::infer_all(&raw(&["5", "5.5", "x"])),
            Value::List(vec![
                Value::Int(5),
                Value::Float(5.5),
                Value::String("x".to_owned()),
            ])
        );
        assert_eq!(Value::infer_all(&[]), Value::List(Vec::new()));
    }

    #[test]
    fn single_value_stays_scalar() {
        assert_eq!(Value::infer_all(&raw(&["5"])), Value::Int(5));
    }

    #[test]
    fn collapse_ignores_nested_sequences() {
        let nested = vec![Value::Ints(vec![1]), Value::Ints(vec![2])];
        assert_eq!(Value::collapse(nested.clone()), Value::List(nested));
    }

    #[test]
    fn texts_and_pairs() {
        let value = Value::List(vec![Value::Int(5), Value::Bool(true)]);
        assert_eq!(value.texts(), ["5", "true"]);
        assert_eq!(value.to_text(), "5,true");
        let mut pairs = Pairs::new();
        Value::Ints(vec![5, 7]).write_field("numbers", &mut pairs);
        assert_eq!(pairs.finish(), b"numbers=5&numbers=7");
        assert_eq!(Value::from(TimeDelta::seconds(90)).to_text(), "1m30s");
    }
}
