use {
    bytes::Bytes,
    chrono::{DateTime, Datelike, NaiveDate, TimeDelta, TimeZone, Utc},
    formwire::{config::Config, Error, FormDecode, FormEncode, Pairs, Value, Values},
    proptest::prelude::*,
    std::collections::HashMap,
};

const SCENARIO: &str =
    "name=John&name=Lennon&birth=1940-10-09T00%3A00%3A00Z&age=81.8&numbers=5&numbers=7";

#[derive(FormEncode, FormDecode, Default, Debug, PartialEq)]
struct Musician {
    #[form(rename = "name")]
    name: Vec<String>,
    #[form(rename = "birth")]
    birthdate: DateTime<Utc>,
    #[form(rename = "age")]
    age: f64,
    #[form(rename = "numbers")]
    favorite_numbers: Vec<i64>,
}

fn john() -> Musician {
    Musician {
        name: vec!["John".to_owned(), "Lennon".to_owned()],
        birthdate: Utc.with_ymd_and_hms(1940, 10, 9, 0, 0, 0).unwrap(),
        age: 81.8,
        favorite_numbers: vec![5, 7],
    }
}

#[test_log::test]
fn record_encodes_in_declaration_order() {
    assert_eq!(formwire::encode_to_string(&john()).unwrap(), SCENARIO);
    assert_eq!(formwire::encode_to_string(&&john()).unwrap(), SCENARIO);
    assert_eq!(formwire::encode_to_string(&Box::new(john())).unwrap(), SCENARIO);
}

#[test_log::test]
fn record_decodes_scenario() {
    let musician: Musician = formwire::decode(SCENARIO.as_bytes()).unwrap();
    assert_eq!(musician, john());
}

#[test_log::test]
fn untyped_map_infers_kinds() {
    let form: HashMap<String, Value> = formwire::decode(SCENARIO.as_bytes()).unwrap();
    assert_eq!(
        form["name"].as_strings(),
        Some(&["John".to_owned(), "Lennon".to_owned()][..])
    );
    let birth = form["birth"].as_timestamp().unwrap();
    assert_eq!((birth.year(), birth.month(), birth.day()), (1940, 10, 9));
    assert_eq!(form["age"].as_f64(), Some(81.8));
    assert_eq!(form["numbers"].as_ints(), Some(&[5, 7][..]));
}

#[derive(FormEncode, FormDecode, Default, Debug, PartialEq)]
struct Preferences {
    favorite_numbers: Vec<u32>,
    #[form(rename = "n")]
    name: String,
    nickname: Option<String>,
    timeout: Option<TimeDelta>,
    #[form(skip)]
    cache: Vec<u8>,
}

#[test_log::test]
fn keys_match_every_spelling() {
    for key in [
        "favorite_numbers",
        "favoritenumbers",
        "favorite-numbers",
        "favoriteNumbers",
        "FavoriteNumbers",
    ] {
        let data = format!("{key}=5&{key}=7");
        let prefs: Preferences = formwire::decode(data.as_bytes()).unwrap();
        assert_eq!(prefs.favorite_numbers, [5, 7], "{key}");
    }
}

#[test_log::test]
fn alias_is_written_and_read() {
    let prefs = Preferences {
        name: "Ringo".to_owned(),
        ..Default::default()
    };
    assert_eq!(formwire::encode_to_string(&prefs).unwrap(), "n=Ringo");

    for data in ["n=Ringo", "name=Ringo", "Name=Ringo"] {
        let prefs: Preferences = formwire::decode(data.as_bytes()).unwrap();
        assert_eq!(prefs.name, "Ringo", "{data}");
    }
}

#[test_log::test]
fn none_is_omitted_and_some_written() {
    let mut prefs = Preferences {
        favorite_numbers: vec![1],
        name: "x".to_owned(),
        ..Default::default()
    };
    assert_eq!(
        formwire::encode_to_string(&prefs).unwrap(),
        "favorite_numbers=1&n=x"
    );

    prefs.nickname = Some("Rich".to_owned());
    prefs.timeout = Some(TimeDelta::seconds(90));
    assert_eq!(
        formwire::encode_to_string(&prefs).unwrap(),
        "favorite_numbers=1&n=x&nickname=Rich&timeout=1m30s"
    );
    let decoded: Preferences = formwire::decode(b"favorite_numbers=1&n=x&nickname=Rich&timeout=1m30s")
        .unwrap();
    assert_eq!(decoded, prefs);
}

#[test_log::test]
fn skipped_fields_are_ignored_both_ways() {
    let prefs = Preferences {
        cache: vec![1, 2, 3],
        ..Default::default()
    };
    assert_eq!(formwire::encode_to_string(&prefs).unwrap(), "n=");

    let mut prefs = Preferences {
        cache: vec![9],
        ..Default::default()
    };
    formwire::decode_into(b"cache=1&n=x", &mut prefs).unwrap();
    assert_eq!(prefs.cache, [9]);
    assert_eq!(prefs.name, "x");
}

#[test_log::test]
fn scalar_fields_take_last_value_and_strings_join() {
    #[derive(FormDecode, Default)]
    struct Flags {
        level: u8,
        tags: String,
        debug: bool,
    }

    let flags: Flags = formwire::decode(b"level=1&level=3&tags=a&tags=b&debug=T").unwrap();
    assert_eq!(flags.level, 3);
    assert_eq!(flags.tags, "a,b");
    assert!(flags.debug);
}

#[test_log::test]
fn parse_errors_carry_the_raw_value() {
    #[derive(FormDecode, Default, Debug)]
    struct Port {
        port: u16,
        host: String,
    }

    let mut port = Port::default();
    let err = formwire::decode_into(b"host=example&port=70000", &mut port).unwrap_err();
    match err {
        Error::ParseValue { ty, value, .. } => {
            assert_eq!(ty, "u16");
            assert_eq!(value, "70000");
        }
        other => panic!("unexpected {other:?}"),
    }
    // Fields assigned before the failure stay assigned.
    assert_eq!(port.host, "example");
}

#[test_log::test]
fn unknown_keys_follow_config() {
    let config = Config::default().deny_unknown_keys(true);
    let mut prefs = Preferences::default();
    let err = formwire::decode_with(b"n=x&bogus=1", &mut prefs, &config).unwrap_err();
    assert!(matches!(err, Error::UnknownKey(key) if key == "bogus"));

    formwire::decode_into(b"n=x&bogus=1", &mut prefs).unwrap();
    assert_eq!(prefs.name, "x");
}

/// Encodes and decodes itself with a layout of its own choosing.
#[derive(Default, Debug, PartialEq)]
struct Custom {
    name: String,
    birthdate: NaiveDate,
}

impl FormEncode for Custom {
    fn encode_form(&self) -> formwire::Result<Vec<u8>> {
        let mut pairs = Pairs::new();
        pairs.push("n", self.name.clone());
        pairs.push("b", self.birthdate.format("%Y-%m-%d").to_string());
        Ok(pairs.finish())
    }
}

impl FormDecode for Custom {
    fn decode_form(&mut self, data: &[u8], config: &Config) -> formwire::Result<()> {
        let values = Values::parse_with(data, config)?;
        let birthdate = values.get("b").unwrap_or_default();
        self.birthdate = NaiveDate::parse_from_str(birthdate, "%Y-%m-%d").map_err(Error::custom)?;
        self.name = values.get("n").unwrap_or_default().to_owned();
        Ok(())
    }
}

#[test_log::test]
fn custom_hooks_are_used_exclusively() {
    let custom = Custom {
        name: "John".to_owned(),
        birthdate: NaiveDate::from_ymd_opt(1940, 10, 9).unwrap(),
    };
    assert_eq!(
        formwire::encode_to_string(&custom).unwrap(),
        "n=John&b=1940-10-09"
    );

    let decoded: Custom = formwire::decode(b"n=John&b=1940-10-09").unwrap();
    assert_eq!(decoded, custom);
    assert!(matches!(
        formwire::decode::<Custom>(b"n=John&b=9"),
        Err(Error::Custom(_))
    ));
}

#[test_log::test]
fn generic_records() {
    #[derive(FormEncode, FormDecode, Default, Debug, PartialEq)]
    struct Page<T> {
        items: Vec<T>,
        next: Option<T>,
    }

    let page = Page {
        items: vec![1u64, 2],
        next: Some(3),
    };
    let data = formwire::encode(&page).unwrap();
    assert_eq!(data, b"items=1&items=2&next=3");
    assert_eq!(formwire::decode::<Page<u64>>(&data).unwrap(), page);
}

#[test_log::test]
fn raw_identifiers_are_unprefixed() {
    #[derive(FormEncode, FormDecode, Default, Debug, PartialEq)]
    struct Token {
        r#type: String,
    }

    let token = Token {
        r#type: "bearer".to_owned(),
    };
    assert_eq!(formwire::encode_to_string(&token).unwrap(), "type=bearer");
    assert_eq!(formwire::decode::<Token>(b"Type=bearer").unwrap(), token);
}

#[derive(FormEncode, FormDecode, Default, Debug, PartialEq)]
struct Blob {
    data: Bytes,
    parts: Vec<Bytes>,
}

#[test_log::test]
fn opaque_bytes_are_kept_verbatim() {
    let blob = Blob {
        data: Bytes::from_static(b"\xff\0a"),
        parts: vec![Bytes::from_static(b"ok"), Bytes::from_static(b"\xfe")],
    };
    let data = formwire::encode_to_string(&blob).unwrap();
    assert_eq!(data, "data=%FF%00a&parts=ok&parts=%FE");
    assert_eq!(formwire::decode::<Blob>(data.as_bytes()).unwrap(), blob);

    let blob: Blob = formwire::decode(b"Data=%FF%00a").unwrap();
    assert_eq!(&blob.data[..], b"\xff\0a");
}

#[derive(FormEncode, FormDecode, Default, Debug, PartialEq)]
struct Sample {
    ratio: f64,
    enabled: bool,
    seen: DateTime<Utc>,
    payload: Bytes,
    chunks: Vec<Bytes>,
    level: Option<i8>,
}

prop_compose! {
    fn samples()(
        ratio in any::<f64>().prop_filter("comparable", |v| !v.is_nan()),
        enabled in any::<bool>(),
        // 0001-01-01 through 9999-12-31, the years RFC 3339 can spell.
        secs in -62_135_596_800i64..=253_402_300_799,
        nanos in 0u32..1_000_000_000,
        payload in proptest::collection::vec(any::<u8>(), 0..8),
        chunks in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..4), 0..3),
        level in proptest::option::of(any::<i8>()),
    ) -> Sample {
        Sample {
            ratio,
            enabled,
            seen: Utc.timestamp_opt(secs, nanos).unwrap(),
            payload: Bytes::from(payload),
            chunks: chunks.into_iter().map(Bytes::from).collect(),
            level,
        }
    }
}

prop_compose! {
    fn preferences()(
        favorite_numbers in proptest::collection::vec(any::<u32>(), 0..4),
        name in ".*",
        nickname in proptest::option::of(".*"),
        timeout in proptest::option::of(any::<i64>()),
    ) -> Preferences {
        Preferences {
            favorite_numbers,
            name,
            nickname,
            timeout: timeout.map(TimeDelta::nanoseconds),
            cache: Vec::new(),
        }
    }
}

proptest! {
    #[test]
    fn scalar_kinds_round_trip(sample in samples()) {
        let data = formwire::encode(&sample).unwrap();
        let decoded: Sample = formwire::decode(&data).unwrap();
        prop_assert_eq!(decoded, sample);
    }

    #[test]
    fn record_round_trip(prefs in preferences()) {
        let data = formwire::encode(&prefs).unwrap();
        let decoded: Preferences = formwire::decode(&data).unwrap();
        prop_assert_eq!(decoded, prefs);
    }

    #[test]
    fn record_fields_match_serde_urlencoded_pairs(name in ".*", nickname in ".*") {
        let prefs = Preferences { name: name.clone(), nickname: Some(nickname.clone()), ..Default::default() };
        let oracle = serde_urlencoded::to_string([("n", name), ("nickname", nickname)]).unwrap();
        prop_assert_eq!(formwire::encode_to_string(&prefs).unwrap(), oracle);
    }
}
