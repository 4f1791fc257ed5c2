#![no_main]

use {
    bytes::Bytes,
    chrono::TimeDelta,
    formwire::{FormDecode, FormEncode, Value, Values},
    libfuzzer_sys::fuzz_target,
    std::collections::{BTreeMap, HashMap},
};

#[derive(FormEncode, FormDecode, Default, Debug, PartialEq)]
struct Record {
    name: Vec<String>,
    #[form(rename = "n")]
    nickname: String,
    age: Option<i64>,
    timeout: Option<TimeDelta>,
    flag: Option<bool>,
    favorite_numbers: Vec<u32>,
    payload: Option<Bytes>,
}

macro_rules! fuzz_roundtrip {
    ($data:expr, $ty:ty) => {
        if let Ok(value) = formwire::decode::<$ty>($data) {
            let encoded = formwire::encode(&value).expect("encode should succeed");
            let roundtrip: $ty =
                formwire::decode(&encoded).expect("roundtrip decode should succeed");
            assert_eq!(value, roundtrip, "roundtrip failed for {}", stringify!($ty));
        }
    };
}

fuzz_target!(|data: &[u8]| {
    fuzz_roundtrip!(data, Values);
    fuzz_roundtrip!(data, BTreeMap<String, Vec<String>>);
    fuzz_roundtrip!(data, Record);

    // Untyped decoding never fails on well-formed input.
    if Values::parse(data).is_ok() {
        formwire::decode::<HashMap<String, Value>>(data).expect("untyped decode should succeed");
    }
});
