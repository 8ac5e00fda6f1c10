// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Bench code readability over pedantic

//! Plain vs interning writer on streams with repeated values.
//!
//! Run with: cargo bench -p soos --bench intern_write

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use soos::{ObjectOutput, ObjectRef, ObjectWriter, StreamConfig, SubstitutableTypes, SubstitutingWriter};

/// `count` fresh instances drawn from `distinct` values.
fn workload(count: usize, distinct: usize) -> Vec<ObjectRef> {
    let mut rng = fastrand::Rng::with_seed(7);
    (0..count)
        .map(|_| {
            let n = rng.usize(0..distinct);
            if n % 2 == 0 {
                ObjectRef::string(format!("symbol-{}", n))
            } else {
                ObjectRef::from(n as i64)
            }
        })
        .collect()
}

fn write_all(out: &mut dyn ObjectOutput, values: &[ObjectRef]) {
    for value in values {
        out.write_object(Some(value)).expect("write");
    }
    out.flush().expect("flush");
}

fn bench_write_repeated(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_repeated_values");

    for distinct in [4, 64, 1024] {
        let values = workload(4096, distinct);
        group.throughput(Throughput::Elements(values.len() as u64));

        group.bench_with_input(BenchmarkId::new("plain", distinct), &values, |b, values| {
            b.iter(|| {
                let mut out = ObjectWriter::new(Vec::with_capacity(64 * 1024)).expect("header");
                write_all(&mut out, black_box(values));
                black_box(out.into_inner().expect("sink").len())
            });
        });

        group.bench_with_input(
            BenchmarkId::new("interning", distinct),
            &values,
            |b, values| {
                b.iter(|| {
                    let config = StreamConfig::new(SubstitutableTypes::builtin());
                    let mut out =
                        SubstitutingWriter::with_config(Vec::with_capacity(64 * 1024), config)
                            .expect("header");
                    write_all(&mut out, black_box(values));
                    black_box(out.into_inner().expect("sink").len())
                });
            },
        );
    }

    group.finish();
}

/// Output size is the point of interning; report it once alongside timings.
fn report_sizes(_c: &mut Criterion) {
    for distinct in [4, 64, 1024] {
        let values = workload(4096, distinct);

        let mut plain = ObjectWriter::new(Vec::new()).expect("header");
        write_all(&mut plain, &values);
        let plain = plain.into_inner().expect("sink").len();

        let config = StreamConfig::new(SubstitutableTypes::builtin());
        let mut interned = SubstitutingWriter::with_config(Vec::new(), config).expect("header");
        write_all(&mut interned, &values);
        let interned = interned.into_inner().expect("sink").len();

        println!(
            "distinct={:5} plain={:7} bytes interned={:7} bytes ({:.1}%)",
            distinct,
            plain,
            interned,
            interned as f64 * 100.0 / plain as f64
        );
    }
}

criterion_group!(benches, report_sizes, bench_write_repeated);
criterion_main!(benches);
