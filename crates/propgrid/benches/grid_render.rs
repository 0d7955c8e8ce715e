//! Benchmarks for grid rendering and value collection.
//!
//! Measures:
//! - Full render of mixed-type sources
//! - Value collection from a mounted grid
//! - Keystroke handling with a dependent field

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use propgrid::{
    CapabilityRegistry, FieldSettings, HostContainer, Key, Metadata, PropertyBag, PropertyGrid,
    PropertyMeta, PropertyType, Value,
};

fn build_source(property_count: usize) -> (Value, Metadata) {
    let mut source = PropertyBag::new();
    let mut metadata = Metadata::new();
    for i in 0..property_count {
        let name = format!("prop{}", i);
        match i % 4 {
            0 => source.insert(name.clone(), format!("text {}", i)),
            1 => source.insert(name.clone(), i as f64),
            2 => source.insert(name.clone(), i % 3 == 0),
            _ => {
                metadata.insert(
                    name.clone(),
                    PropertyMeta::new()
                        .of_type(PropertyType::Options)
                        .choices(["low", "mid", "high"]),
                );
                source.insert(name.clone(), "mid")
            }
        };
        if i % 5 == 0 {
            let meta = metadata.get(&name).cloned().unwrap_or_default();
            metadata.insert(name, meta.group(format!("Group {}", i % 3)));
        }
    }
    (Value::from(source), metadata)
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid/render");

    for property_count in [10, 50, 200] {
        let (source, metadata) = build_source(property_count);
        group.bench_with_input(
            BenchmarkId::from_parameter(property_count),
            &property_count,
            |b, _| {
                let mut grid = PropertyGrid::new(CapabilityRegistry::new());
                let mut container = HostContainer::new();
                b.iter(|| {
                    grid.render(&mut container, black_box(&source), Some(&metadata), None);
                });
            },
        );
    }

    group.finish();
}

fn bench_get_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid/get_values");

    for property_count in [10, 50, 200] {
        let (source, metadata) = build_source(property_count);
        let mut grid = PropertyGrid::new(CapabilityRegistry::new());
        let mut container = HostContainer::new();
        grid.render(&mut container, &source, Some(&metadata), None);

        group.bench_with_input(
            BenchmarkId::from_parameter(property_count),
            &property_count,
            |b, _| {
                b.iter(|| black_box(container.get_values()));
            },
        );
    }

    group.finish();
}

fn bench_dependent_keystroke(c: &mut Criterion) {
    let source = Value::from(PropertyBag::new().with("slug", "").with("title", ""));
    let metadata = Metadata::new().with(
        "title",
        PropertyMeta::new()
            .on_change(|_, _, _, _| {})
            .settings(FieldSettings::new().id_dependency("slug").max_length(10_000))
            .transform(|text| text.to_lowercase().replace(' ', "-")),
    );
    let mut grid = PropertyGrid::new(CapabilityRegistry::new());
    let mut container = HostContainer::new();
    grid.render(&mut container, &source, Some(&metadata), None);

    c.bench_function("grid/dependent_keystroke", |b| {
        b.iter(|| {
            if let Some(instance) = container.grid_mut() {
                let _ = instance.set_text("title", "Hello World");
                let _ = instance.type_key("title", black_box(Key::Char('x')));
            }
        });
    });
}

criterion_group!(benches, bench_render, bench_get_values, bench_dependent_keystroke);
criterion_main!(benches);
