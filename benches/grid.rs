//! Benchmarks for sorting and hit testing on large grids.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used, clippy::cast_possible_truncation)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gridctrl::{CellRange, FieldMask, Grid, GridConfig};

/// Array-mode grid with one fixed header row and pseudo-random keys in column 1.
fn filled_grid(rows: u32, cols: u32) -> Grid {
    let mut grid = Grid::with_size(rows, cols, 1024, 768, GridConfig::default())
        .expect("Failed to build grid");
    grid.set_fixed_row_count(1).expect("Failed to set fixed rows");
    let mut seed: u32 = 0x2545_f491;
    {
        let mut g = grid.suspend_redraw();
        for row in 1..rows {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            g.set_item_text(row, 1, format!("{:08}", seed % 100_000_000));
            g.set_item_text(row, 2, (seed % 1000).to_string());
        }
    }
    grid
}

fn bench_sort_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_text_items");
    for rows in [1_000u32, 10_000] {
        group.throughput(Throughput::Elements(u64::from(rows)));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, &rows| {
            b.iter_batched(
                || filled_grid(rows, 4),
                |mut grid| {
                    grid.sort_text_items(black_box(1), true);
                    grid
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_sort_virtual(c: &mut Criterion) {
    let rows = 100_000u32;
    c.bench_function("sort_virtual_numeric_100k", |b| {
        b.iter_batched(
            || {
                let config = GridConfig {
                    virtual_mode: true,
                    ..GridConfig::default()
                };
                let mut grid =
                    Grid::with_size(rows, 3, 1024, 768, config).expect("Failed to build grid");
                grid.set_data_provider(
                    |row: u32, _col: u32, mask: FieldMask, cell: &mut gridctrl::Cell| {
                        if mask.contains(FieldMask::TEXT) {
                            cell.text = (row.wrapping_mul(2_654_435_761) % 997).to_string();
                        }
                    },
                );
                grid
            },
            |mut grid| {
                grid.sort_numeric_items(black_box(0), true);
                grid
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

fn bench_hit_testing(c: &mut Criterion) {
    let mut grid = filled_grid(50_000, 40);
    grid.set_fixed_column_count(1).expect("Failed to set fixed columns");
    grid.set_frozen_row_count(2).expect("Failed to set frozen rows");
    grid.merge_cells(CellRange::new(10, 2, 12, 5));
    grid.scroll_rows(25_000);

    c.bench_function("cell_at_point", |b| {
        b.iter(|| {
            for y in (0..768).step_by(7) {
                for x in (0..1024).step_by(31) {
                    black_box(grid.cell_at_point(black_box(x), black_box(y)));
                }
            }
        })
    });

    c.bench_function("visible_cells", |b| b.iter(|| black_box(grid.visible_cells())));
}

criterion_group!(benches, bench_sort_text, bench_sort_virtual, bench_hit_testing);
criterion_main!(benches);
