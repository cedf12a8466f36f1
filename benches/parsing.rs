use criterion::{Criterion, black_box, criterion_group, criterion_main};
use modlog::fmt::Formatter;
use modlog::level::Level;
use modlog::{DEFAULT_FORMAT, MemoryOutput, Registry};
use std::str::FromStr;

fn bench_formatter_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("Formatter::parse");

    group.bench_function("default", |b| {
        b.iter(|| Formatter::parse(black_box(DEFAULT_FORMAT)));
    });

    group.bench_function("minimal", |b| {
        b.iter(|| Formatter::parse(black_box("%{level} %{message}")));
    });

    group.bench_function("literal_only", |b| {
        b.iter(|| Formatter::parse(black_box("no placeholders here at all")));
    });

    group.finish();
}

fn bench_level_from_str(c: &mut Criterion) {
    let mut group = c.benchmark_group("Level::from_str");

    group.bench_function("canonical", |b| {
        b.iter(|| Level::from_str(black_box("WARNING")));
    });

    group.bench_function("alias_lowercase", |b| {
        b.iter(|| Level::from_str(black_box("warn")));
    });

    group.bench_function("invalid", |b| {
        b.iter(|| Level::from_str(black_box("verbose")));
    });

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let output = MemoryOutput::new();
    let registry = Registry::builder()
        .output(output.clone())
        .build()
        .expect("default format");
    let logger = registry.logger("bench").expect("module name");

    c.bench_function("render_default_format", |b| {
        b.iter(|| {
            logger.info(black_box("Connection established"));
            output.clear();
        });
    });
}

criterion_group!(
    benches,
    bench_formatter_parse,
    bench_level_from_str,
    bench_render
);
criterion_main!(benches);
