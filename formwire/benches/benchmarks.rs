use {
    criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput},
    formwire::{decode, encode, serde_compat, FormDecode, FormEncode, Value},
    serde::{Deserialize, Serialize},
    std::collections::{BTreeMap, HashMap},
};

#[derive(Serialize, Deserialize, FormEncode, FormDecode, Clone, Default, Debug, PartialEq)]
struct SimpleForm {
    id: u64,
    name: String,
    score: f64,
    flag: bool,
}

fn simple_form() -> SimpleForm {
    SimpleForm {
        id: 0xDEADBEEF,
        name: "John Lennon & co".to_owned(),
        score: 81.5,
        flag: true,
    }
}

/// this function is used for verification only and is not part of the benchmarked code.
fn verify_encode<T>(data: &T) -> Vec<u8>
where
    T: FormEncode + Serialize,
{
    let encoded = serde_urlencoded::to_string(data).unwrap().into_bytes();
    assert_eq!(encode(data).unwrap(), encoded);
    assert_eq!(serde_compat::to_bytes(data).unwrap(), encoded);
    encoded
}

fn bench_struct_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("SimpleForm");
    group.throughput(Throughput::Elements(1));

    let data = simple_form();
    let encoded = verify_encode(&data);
    assert_eq!(decode::<SimpleForm>(&encoded).unwrap(), data);

    group.bench_function("formwire/encode", |b| {
        b.iter(|| encode(black_box(&data)).unwrap());
    });

    group.bench_function("formwire-serde/encode", |b| {
        b.iter(|| serde_compat::to_bytes(black_box(&data)).unwrap());
    });

    group.bench_function("serde_urlencoded/encode", |b| {
        b.iter(|| serde_urlencoded::to_string(black_box(&data)).unwrap());
    });

    group.bench_function("formwire/decode", |b| {
        b.iter(|| decode::<SimpleForm>(black_box(&encoded)).unwrap());
    });

    group.bench_function("formwire-serde/decode", |b| {
        b.iter(|| serde_compat::from_bytes::<SimpleForm>(black_box(&encoded)).unwrap());
    });

    group.bench_function("serde_urlencoded/decode", |b| {
        b.iter(|| serde_urlencoded::from_bytes::<SimpleForm>(black_box(&encoded)).unwrap());
    });

    group.finish();
}

fn bench_map_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("BTreeMap<String, u64>");

    for size in [100, 1_000] {
        let data: BTreeMap<String, u64> =
            (0..size).map(|i: u64| (format!("key{i}"), i.wrapping_mul(2))).collect();
        group.throughput(Throughput::Elements(size));

        let encoded = verify_encode(&data);

        group.bench_with_input(BenchmarkId::new("formwire/encode", size), &data, |b, d| {
            b.iter(|| encode(black_box(d)).unwrap())
        });

        group.bench_with_input(
            BenchmarkId::new("serde_urlencoded/encode", size),
            &data,
            |b, d| b.iter(|| serde_urlencoded::to_string(black_box(d)).unwrap()),
        );

        group.bench_with_input(
            BenchmarkId::new("formwire/decode", size),
            &encoded,
            |b, s| b.iter(|| decode::<BTreeMap<String, u64>>(black_box(s)).unwrap()),
        );

        group.bench_with_input(
            BenchmarkId::new("serde_urlencoded/decode", size),
            &encoded,
            |b, s| {
                b.iter(|| serde_urlencoded::from_bytes::<BTreeMap<String, u64>>(black_box(s)).unwrap())
            },
        );
    }

    group.finish();
}

fn bench_untyped_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("HashMap<String, Value>");

    let form = b"name=John&name=Lennon&birth=1940-10-09T00%3A00%3A00Z&age=81.8&numbers=5&numbers=7&timeout=1m30s&admin=true";
    group.throughput(Throughput::Bytes(form.len() as u64));

    group.bench_function("formwire/decode", |b| {
        b.iter(|| decode::<HashMap<String, Value>>(black_box(form)).unwrap());
    });

    group.bench_function("Value/infer", |b| {
        b.iter(|| Value::infer(black_box("1940-10-09T00:00:00Z")));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_struct_comparison,
    bench_map_comparison,
    bench_untyped_decode,
);

criterion_main!(benches);
