use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use table_core::{
    CommandExecutor, Delimiter, ParseConfig, TableCommand, detect_delimiter, parse_table,
    unparse_csv,
};

fn large_csv(row_count: usize) -> String {
    let mut out = String::with_capacity(row_count * 64);
    out.push_str("id,name,city,notes\n");
    for i in 0..row_count {
        out.push_str(&format!(
            "{i:06},\"Person {i}\",Oslo,\"quoted, with comma and \"\"quotes\"\"\"\n"
        ));
    }
    // No trailing record terminator.
    out.pop();
    out
}

fn bench_parse_large_file(c: &mut Criterion) {
    let text = large_csv(20_000);
    let config = ParseConfig::default();
    c.bench_function("parse/20k_rows", |b| {
        b.iter(|| {
            let output = parse_table(black_box(&text), &config);
            black_box(output.grid.len());
        })
    });
}

fn bench_detect_delimiter(c: &mut Criterion) {
    let text = large_csv(20_000);
    c.bench_function("detect_delimiter/20k_rows", |b| {
        b.iter(|| black_box(detect_delimiter(black_box(&text), '"')))
    });

    let config = ParseConfig::default().with_delimiter(Delimiter::Auto);
    c.bench_function("parse_auto/20k_rows", |b| {
        b.iter(|| black_box(parse_table(black_box(&text), &config).delimiter))
    });
}

fn bench_unparse(c: &mut Criterion) {
    let config = ParseConfig::default();
    let grid = parse_table(&large_csv(20_000), &config).grid;
    c.bench_function("unparse/20k_rows", |b| {
        b.iter(|| black_box(unparse_csv(black_box(&grid), &config).len()))
    });
}

fn bench_edits_with_history(c: &mut Criterion) {
    let grid = parse_table(&large_csv(2_000), &ParseConfig::default()).grid;
    c.bench_function("edits/100_set_cell_then_undo", |b| {
        b.iter_batched(
            || CommandExecutor::new(grid.clone()),
            |mut executor| {
                for row in 0..100 {
                    executor
                        .execute(TableCommand::SetCell {
                            row,
                            col: 2,
                            value: "Bergen".to_string(),
                        })
                        .unwrap();
                }
                while executor.can_undo() {
                    executor.execute(TableCommand::Undo).unwrap();
                }
                black_box(executor.grid().len());
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    benches,
    bench_parse_large_file,
    bench_detect_delimiter,
    bench_unparse,
    bench_edits_with_history
);
criterion_main!(benches);
