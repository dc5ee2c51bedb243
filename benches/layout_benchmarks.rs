//! Layout engine micro-benchmarks
//!
//! Measures paragraph measuring and painting, and column flow.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pdf_compose::fonts::StandardFont;
use pdf_compose::geometry::{Rect, Size};
use pdf_compose::layout::{LayoutElement, MultiColumnLayout, PageLayout, Paragraph, TextAlignment};
use pdf_compose::writer::{Document, Page};
use std::sync::Arc;

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod \
                     tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, \
                     quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.";

fn paragraph(words: usize, alignment: TextAlignment) -> Paragraph {
    let text: Vec<&str> = LOREM.split(' ').cycle().take(words).collect();
    Paragraph::builder(text.join(" "), Arc::new(StandardFont::helvetica()))
        .font_size(11.0)
        .text_alignment(alignment)
        .build()
        .expect("valid paragraph")
}

fn bench_paragraph_measure(c: &mut Criterion) {
    let mut group = c.benchmark_group("paragraph_measure");
    for words in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(words), &words, |b, &words| {
            // fresh paragraph per iteration so the measure cache does not hide the work
            b.iter_batched(
                || paragraph(words, TextAlignment::Left),
                |p| black_box(p.measure(Size::new(300.0, 10_000.0)).expect("measure")),
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_paragraph_paint(c: &mut Criterion) {
    let mut group = c.benchmark_group("paragraph_paint");
    for alignment in [TextAlignment::Left, TextAlignment::Justified] {
        group.bench_function(format!("{:?}", alignment), |b| {
            b.iter_batched(
                || (paragraph(200, alignment), Page::new(595.0, 842.0)),
                |(mut p, mut page)| {
                    p.paint(Rect::new(50.0, 50.0, 300.0, 742.0), &mut page).expect("paint");
                    black_box(page.contents().len())
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_two_column_flow(c: &mut Criterion) {
    c.bench_function("two_column_flow_50_paragraphs", |b| {
        b.iter(|| {
            let mut document = Document::new();
            let mut layout = MultiColumnLayout::two_column(&mut document).expect("layout");
            for _ in 0..50 {
                let mut p = paragraph(60, TextAlignment::Justified);
                layout.append_layout_element(&mut p).expect("append");
            }
            drop(layout);
            black_box(document.len())
        });
    });
}

criterion_group!(benches, bench_paragraph_measure, bench_paragraph_paint, bench_two_column_flow);
criterion_main!(benches);
