use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cropsense::{CropInput, LabelCodec};

fn setup_codec() -> LabelCodec {
    LabelCodec::new(
        (0..28).map(|i| format!("State {}", i)).collect(),
        vec!["rice".to_string(), "wheat".to_string()],
    )
}

fn bench_gateway(c: &mut Criterion) {
    let codec = setup_codec();
    let input = CropInput {
        n_soil: 90.0,
        p_soil: 42.0,
        k_soil: 43.0,
        temperature: 20.8,
        humidity: 82.0,
        ph: 6.5,
        rainfall: 202.9,
        state: Some("State 27".to_string()),
    };

    let mut group = c.benchmark_group("Gateway");
    group.sample_size(100);

    group.bench_function("encode_and_assemble", |b| {
        b.iter(|| black_box(&input).feature_vector(&codec).unwrap())
    });

    group.bench_function("encode_worst_case_lookup", |b| {
        b.iter(|| codec.encode_state(black_box("State 27")).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_gateway);
criterion_main!(benches);
