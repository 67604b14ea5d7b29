use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tagfold::{adt, fold, partial_fold, Handlers};

adt! {
    #[derive(Debug, Clone)]
    enum Shape {
        circle { r: f64 },
        rectangle { w: f64, h: f64 },
        triangle { b: f64, h: f64 },
        square { s: f64 },
    }
}

fn shapes(size: usize) -> Vec<Shape> {
    (0..size)
        .map(|i| {
            let x = i as f64;
            match i % 4 {
                0 => Shape::circle(shape::Circle { r: x }),
                1 => Shape::rectangle(shape::Rectangle { w: x, h: x + 1.0 }),
                2 => Shape::triangle(shape::Triangle { b: x, h: 2.0 }),
                _ => Shape::square(shape::Square { s: x }),
            }
        })
        .collect()
}

fn bench_dispatch(c: &mut Criterion) {
    let size = 1024;
    let values = shapes(size);

    let area = fold(
        Handlers::new()
            .on(|c: &shape::Circle| c.r * c.r * std::f64::consts::PI)
            .on(|r: &shape::Rectangle| r.w * r.h)
            .on(|t: &shape::Triangle| t.b * t.h / 2.0)
            .on(|s: &shape::Square| s.s * s.s),
    );
    let round_area = partial_fold(
        Handlers::new().on(|c: &shape::Circle| c.r * c.r * std::f64::consts::PI),
        |_: Option<&Shape>| 0.0,
    );

    let mut group = c.benchmark_group("tagfold/dispatch");
    group.throughput(Throughput::Elements(size as u64));
    group.bench_with_input(BenchmarkId::new("fold", size), &values, |b, values| {
        b.iter(|| {
            values
                .iter()
                .map(|shape| area.apply(black_box(shape)).unwrap_or(0.0))
                .sum::<f64>()
        })
    });
    group.bench_with_input(
        BenchmarkId::new("partial_fold", size),
        &values,
        |b, values| {
            b.iter(|| {
                values
                    .iter()
                    .map(|shape| round_area.apply(black_box(shape)))
                    .sum::<f64>()
            })
        },
    );
    group.bench_with_input(BenchmarkId::new("match", size), &values, |b, values| {
        b.iter(|| {
            values
                .iter()
                .map(|shape| match black_box(shape) {
                    Shape::Circle(c) => c.r * c.r * std::f64::consts::PI,
                    Shape::Rectangle(r) => r.w * r.h,
                    Shape::Triangle(t) => t.b * t.h / 2.0,
                    Shape::Square(s) => s.s * s.s,
                })
                .sum::<f64>()
        })
    });
    group.finish();
}

criterion_group!(benches, bench_dispatch);
criterion_main!(benches);
