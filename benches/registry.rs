use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use modlog::{Level, MemoryOutput, Registry};

fn registry_with(modules: usize) -> Registry {
    let registry = Registry::builder()
        .output(MemoryOutput::new())
        .build()
        .expect("default format");
    for i in 0..modules {
        registry
            .logger(&format!("svc{}.mod{i}", i % 10))
            .expect("module name");
    }
    registry
}

fn bench_acquire(c: &mut Criterion) {
    let registry = registry_with(1000);

    c.bench_function("acquire_existing", |b| {
        b.iter(|| registry.logger(black_box("svc3.mod503")));
    });
}

fn bench_filtered_emit(c: &mut Criterion) {
    let registry = registry_with(100);
    let logger = registry.logger("svc0.mod0").expect("module name");

    c.bench_function("emit_below_threshold", |b| {
        b.iter(|| logger.debug(black_box("dropped")));
    });

    c.bench_function("is_enabled_for", |b| {
        b.iter(|| logger.is_enabled_for(black_box(Level::Debug)));
    });
}

fn bench_bulk_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_module_level");

    for modules in [10, 100, 1000] {
        let registry = registry_with(modules);
        group.bench_with_input(BenchmarkId::from_parameter(modules), &registry, |b, r| {
            b.iter(|| r.set_module_level(black_box(r"^svc3\."), black_box("debug")));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_acquire, bench_filtered_emit, bench_bulk_update);
criterion_main!(benches);
