//! Benchmarks for history operations.
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use quill_buffer::Document;
use quill_core::{DocumentHandle, History, InsertCommand};

/// Builds a history holding `edits` applied inserts.
fn filled_history(edits: usize) -> (DocumentHandle, History) {
    let doc = DocumentHandle::new(Document::new());
    let mut history = History::new();
    for i in 0..edits {
        let command = InsertCommand::new(doc.downgrade(), format!("edit {i} "));
        history.execute(Box::new(command)).unwrap();
    }
    (doc, history)
}

/// Benchmarks executing a run of inserts.
fn bench_execute(c: &mut Criterion) {
    let mut group = c.benchmark_group("execute");

    for size in [100, 1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::new("inserts", size), size, |b, &size| {
            b.iter(|| black_box(filled_history(size)))
        });
    }

    group.finish();
}

/// Benchmarks walking the whole history back and forth.
fn bench_undo_redo(c: &mut Criterion) {
    let mut group = c.benchmark_group("undo_redo");

    group.bench_function("undo_all_1000", |b| {
        b.iter_with_setup(
            || filled_history(1000),
            |(doc, mut history)| {
                while history.undo().unwrap() {}
                black_box((doc, history))
            },
        )
    });

    group.bench_function("redo_all_1000", |b| {
        b.iter_with_setup(
            || {
                let (doc, mut history) = filled_history(1000);
                while history.undo().unwrap() {}
                (doc, history)
            },
            |(doc, mut history)| {
                while history.redo().unwrap() {}
                black_box((doc, history))
            },
        )
    });

    group.finish();
}

/// Benchmarks executing after undoing half the log.
fn bench_branch_truncation(c: &mut Criterion) {
    c.bench_function("truncate_500_of_1000", |b| {
        b.iter_with_setup(
            || {
                let (doc, mut history) = filled_history(1000);
                for _ in 0..500 {
                    history.undo().unwrap();
                }
                (doc, history)
            },
            |(doc, mut history)| {
                let command = InsertCommand::new(doc.downgrade(), "branch");
                history.execute(Box::new(command)).unwrap();
                black_box((doc, history))
            },
        )
    });
}

criterion_group!(
    benches,
    bench_execute,
    bench_undo_redo,
    bench_branch_truncation,
);

criterion_main!(benches);
