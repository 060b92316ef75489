use core_text::{ColumnMapper, Line};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn tab_heavy_line(len: usize) -> Line {
    let mut bytes: Vec<u8> = (0..len)
        .map(|i| if i % 7 == 0 { b'\t' } else { b'a' + (i % 26) as u8 })
        .collect();
    bytes.push(b'\n');
    Line::new(bytes)
}

fn bench_column_mapping(c: &mut Criterion) {
    let mapper = ColumnMapper::new(4);
    let line = tab_heavy_line(4096);
    let width = mapper.width(&line);

    c.bench_function("column_for_byte_4k", |b| {
        b.iter(|| mapper.column_for_byte(black_box(&line), black_box(4000)))
    });
    c.bench_function("byte_for_column_4k", |b| {
        b.iter(|| mapper.byte_for_column(black_box(&line), black_box(width - 3)))
    });
    c.bench_function("snap_4k", |b| {
        b.iter(|| mapper.snap(black_box(&line), black_box(width / 2)))
    });
}

criterion_group!(benches, bench_column_mapping);
criterion_main!(benches);
