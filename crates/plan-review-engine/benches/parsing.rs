use criterion::{Criterion, criterion_group, criterion_main};
use plan_review_engine::{
    export_feedback, parse,
    render::render_blocks,
    share::{compress, create_shareable_plan},
};
mod common;

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    group.sample_size(10);

    let content = common::generate_plan(100);
    group.bench_function("parse", |b| {
        b.iter(|| std::hint::black_box(parse(std::hint::black_box(&content))));
    });
    group.bench_function("parse_and_render", |b| {
        b.iter(|| std::hint::black_box(render_blocks(&parse(&content))));
    });

    group.finish();
}

fn bench_share(c: &mut Criterion) {
    let mut group = c.benchmark_group("share");
    group.sample_size(10);

    let content = common::generate_plan(20);
    let plan = create_shareable_plan(&content, "Plan", &[], Some("bench"), None);
    group.bench_function("compress", |b| {
        b.iter(|| std::hint::black_box(compress(&plan)));
    });
    let blocks = parse(&content);
    group.bench_function("export_empty", |b| {
        b.iter(|| std::hint::black_box(export_feedback(&blocks, &[])));
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_share);
criterion_main!(benches);
