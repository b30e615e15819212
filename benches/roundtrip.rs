use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use serde_nestedtext::{from_str, parse_str, to_string, to_text};

#[derive(Serialize, Deserialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Deserialize, Clone)]
struct Account {
    owner: User,
    aliases: Vec<String>,
    notes: String,
}

fn sample_document(entries: usize) -> String {
    let mut text = String::new();
    for i in 0..entries {
        text.push_str(&format!(
            "user{i}:\n  id: {i}\n  name: User {i}\n  tags:\n    - alpha\n    - beta\n"
        ));
    }
    text
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for size in [10, 100, 500].iter() {
        let text = sample_document(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| parse_str(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit");
    for size in [10, 100, 500].iter() {
        let tree = parse_str(&sample_document(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &tree, |b, tree| {
            b.iter(|| to_text(black_box(tree)))
        });
    }
    group.finish();
}

fn benchmark_serialize_struct(c: &mut Criterion) {
    let account = Account {
        owner: User {
            id: 42,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            active: true,
        },
        aliases: vec!["ally".to_string(), "al".to_string()],
        notes: "first line\nsecond line".to_string(),
    };

    c.bench_function("serialize_struct", |b| {
        b.iter(|| to_string(black_box(&account)))
    });
}

fn benchmark_deserialize_struct(c: &mut Criterion) {
    let text = "owner:\n  id: 42\n  name: Alice\n  email: alice@example.com\n  active: true\naliases:\n  - ally\n  - al\nnotes:\n  > first line\n  > second line\n";

    c.bench_function("deserialize_struct", |b| {
        b.iter(|| from_str::<Account>(black_box(text)))
    });
}

criterion_group!(
    benches,
    benchmark_parse,
    benchmark_emit,
    benchmark_serialize_struct,
    benchmark_deserialize_struct,
);
criterion_main!(benches);
