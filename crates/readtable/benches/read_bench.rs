use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::StdRng};
use readtable::{LineReader, Options, Tokenizer, bounds, parse_field_specs};
use std::hint::black_box;

fn make_rows(rows: usize, delimiter: char) -> String {
    let mut rng = StdRng::seed_from_u64(42);
    let mut s = String::new();
    for i in 0..rows {
        let x: f64 = rng.random_range(-180.0..180.0);
        let y: f64 = rng.random_range(-90.0..90.0);
        let n: u32 = rng.random_range(0..10_000);
        s.push_str(&format!("{i}{delimiter}{x}{delimiter}{y}{delimiter}{n}{delimiter}name{i}\n"));
    }
    s
}

pub fn typed_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("typed_reads");
    for (name, delimiter, options) in [
        ("whitespace", ' ', Options::default()),
        ("tsv", '\t', Options::tsv()),
    ] {
        let input = make_rows(10_000, delimiter);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_function(format!("tuple::{name}"), |b| {
            b.iter(|| {
                let mut reader = LineReader::new(input.as_bytes(), options);
                let mut total = 0.0;
                while reader.next_line().is_ok() {
                    let (mut id, mut x, mut y, mut n) = (0u64, 0.0f64, 0.0f64, 0u32);
                    let mut label = String::new();
                    if reader
                        .read((&mut id, bounds(&mut x, -180.0, 180.0), &mut y, &mut n, &mut label))
                        .is_ok()
                    {
                        total += x + y;
                    }
                }
                black_box(total)
            })
        });
        let specs = parse_field_specs("u64,f64[-180,180],f64[-90,90],u32,str").unwrap_or_default();
        group.bench_function(format!("specs::{name}"), |b| {
            b.iter_batched(
                Vec::new,
                |mut values| {
                    let mut reader = LineReader::new(input.as_bytes(), options);
                    let mut rows = 0usize;
                    while reader.next_line().is_ok() {
                        if reader.read_record(&specs, &mut values).is_ok() {
                            rows += 1;
                        }
                    }
                    black_box(rows)
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

pub fn single_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_line");
    group.bench_function("integers", |b| {
        let line = "1 22 333 4444 55555 666666 7777777 88888888";
        b.iter(|| {
            let mut tok = Tokenizer::from_line(black_box(line), Options::default());
            let mut sum = 0i64;
            let mut v = 0i64;
            while tok.read_i64(&mut v).is_ok() {
                sum += v;
            }
            black_box(sum)
        })
    });
    group.bench_function("skip", |b| {
        let line = "a\tbb\tccc\tdddd\teeeee\tffffff";
        b.iter(|| {
            let mut tok = Tokenizer::from_line(black_box(line), Options::tsv());
            while tok.skip().is_ok() {}
            black_box(tok.column())
        })
    });
    group.finish();
}

criterion_group!(benches, typed_reads, single_line);
criterion_main!(benches);
