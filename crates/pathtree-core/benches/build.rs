use criterion::{criterion_group, criterion_main, Criterion};
use pathtree_core::{build_script, JsonObjectBuilder, ScriptOptions};
use std::hint::black_box;

/// A resource-like document: shared prefixes, a prefixed attribute block,
/// and an array of nested objects.
fn build_resource(items: usize) -> serde_json::Value {
    let mut builder = JsonObjectBuilder::new();
    builder.field("id").unwrap().string_value("res-1");
    for i in 0..16 {
        let name = format!("attr{i}");
        builder
            .nested_prefixed_field("attributes", "resource", &[name.as_str()])
            .unwrap()
            .number_value(i);
    }
    builder
        .nested_field("links", &["self", "href"])
        .unwrap()
        .string_value("/resources/1");

    let mut array = builder.field("items").unwrap().array_value();
    for i in 0..items {
        array
            .add(|item| {
                item.field("index")?.number_value(i);
                item.nested_suffixed_field("value", "label", &[])?
                    .string_value("item");
                Ok(())
            })
            .unwrap();
    }
    builder.into_value()
}

fn bench_builder(c: &mut Criterion) {
    c.bench_function("build_resource_100_items", |b| {
        b.iter(|| build_resource(black_box(100)))
    });

    let script: String = (0..200)
        .map(|i| format!("group{}.entry{} = {}\n", i % 10, i, i))
        .collect();
    let options = ScriptOptions::default();
    c.bench_function("build_script_200_lines", |b| {
        b.iter(|| build_script(black_box(&script), &options))
    });
}

criterion_group!(benches, bench_builder);
criterion_main!(benches);
