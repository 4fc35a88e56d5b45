use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use storage_payload::PayloadBuilder;

/// Build a payload with one root condition and `n` chained `and` conditions,
/// `n` sort entries and `n` aggregates.
fn build_payload(n: usize) -> PayloadBuilder {
    let mut pb = PayloadBuilder::new();
    pb.select((0..n).map(|i| format!("col{i}")))
        .from("readings")
        .where_(("asset_code", "=", "sensor"))
        .expect("valid root condition");
    pb.where_and((0..n).map(|i| (format!("col{i}"), ">=", i as i64)))
        .expect("valid conditions");
    pb.order_by((0..n).map(|i| (format!("col{i}"), "desc")))
        .expect("valid sorts");
    pb.aggregate((0..n).map(|i| ("max", format!("col{i}"))))
        .expect("valid aggregates");
    pb.limit(100);
    pb
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("payload_builder/render");

    for n in [1, 5, 10, 50, 100] {
        let pb = build_payload(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &pb, |b, pb| {
            b.iter(|| black_box(pb.render().to_json()));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("payload_builder/build_and_render");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let pb = build_payload(n);
                black_box(pb.render().to_json());
            });
        });
    }

    group.finish();
}

fn bench_query_params(c: &mut Criterion) {
    let mut group = c.benchmark_group("payload_builder/query_params");

    for n in [1, 10, 100] {
        let pb = build_payload(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &pb, |b, pb| {
            b.iter(|| black_box(pb.render_query_params()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render, bench_build_and_render, bench_query_params);
criterion_main!(benches);
