//! Integration tests for chunk measuring and painting.

mod common;

use common::{init_logging, mono, mono_chunk, MonoFont};
use pdf_compose::color::Color;
use pdf_compose::fonts::{Base14, Font, StandardFont};
use pdf_compose::geometry::{Rect, Size};
use pdf_compose::layout::{BoxModel, Chunk, LayoutElement};
use pdf_compose::writer::Page;
use pdf_compose::Error;
use proptest::prelude::*;
use std::sync::Arc;

// ============================================================================
// Show-text encodings
// ============================================================================

#[test]
fn test_identity_font_writes_four_digit_hex() {
    init_logging();
    let mut chunk = Chunk::new("Hi", mono(), 12.0).unwrap();
    let mut page = Page::new(595.0, 842.0);
    chunk.paint(Rect::new(100.0, 700.0, 300.0, 12.0), &mut page).unwrap();

    let content = page.contents().to_latin1_string();
    assert!(
        content.ends_with("BT\n0 0 0 rg\n/F1 1 Tf\n12 0 0 12 100 700 Tm\n[<0048><0069>] TJ\nET\nQ\n"),
        "unexpected content: {content}"
    );
    assert_eq!(page.resources().fonts().keys().collect::<Vec<_>>(), vec!["F1"]);
}

#[test]
fn test_standard_font_writes_escaped_literal() {
    let font: Arc<dyn Font> = Arc::new(StandardFont::new(Base14::TimesRoman));
    let mut chunk = Chunk::new("f(x) = \\y", font, 10.0).unwrap();
    let mut page = Page::new(200.0, 200.0);
    chunk.paint(Rect::new(0.0, 0.0, 200.0, 200.0), &mut page).unwrap();
    assert!(page
        .contents()
        .to_latin1_string()
        .contains("(f\\(x\\) = \\\\y) Tj"));
}

#[test]
fn test_winansi_maps_punctuation() {
    let mut chunk = Chunk::new("\u{2013}\u{2022}", Arc::new(StandardFont::helvetica()), 10.0).unwrap();
    let mut page = Page::new(200.0, 200.0);
    chunk.paint(Rect::new(0.0, 0.0, 200.0, 200.0), &mut page).unwrap();
    let bytes = page.contents().decoded_bytes();
    // en dash is 0x96, bullet 0x95
    assert!(bytes.windows(4).any(|w| w == [b'(', 0x96, 0x95, b')']));
}

#[test]
fn test_unencodable_character_fails_before_writing() {
    let mut chunk = Chunk::new("ok \u{2713}", Arc::new(StandardFont::helvetica()), 10.0).unwrap();
    let mut page = Page::new(200.0, 200.0);
    let err = chunk.paint(Rect::new(0.0, 0.0, 200.0, 200.0), &mut page).unwrap_err();
    match err {
        Error::Encoding { ch, font } => {
            assert_eq!(ch, '\u{2713}');
            assert_eq!(font, "Helvetica");
        },
        other => panic!("expected an encoding error, got {other:?}"),
    }
    assert!(page.contents().is_empty());
    assert!(page.resources().fonts().is_empty());
    assert!(chunk.previous_paint_box().is_none());
}

// ============================================================================
// Font resources
// ============================================================================

#[test]
fn test_equal_fonts_share_a_resource_name() {
    let mut page = Page::new(300.0, 300.0);
    let twin: Arc<dyn Font> = Arc::new(MonoFont::new("TestMono"));
    let other: Arc<dyn Font> = Arc::new(MonoFont::new("OtherMono"));

    let mut chunks = vec![
        Chunk::new("a", mono(), 10.0).unwrap(),
        Chunk::new("b", twin, 10.0).unwrap(),
        Chunk::new("c", other, 10.0).unwrap(),
    ];
    for (i, chunk) in chunks.iter_mut().enumerate() {
        let y = 250.0 - 20.0 * i as f64;
        chunk.paint(Rect::new(10.0, y, 100.0, 10.0), &mut page).unwrap();
    }

    let fonts = page.resources().fonts();
    assert_eq!(fonts.len(), 2);
    assert_eq!(fonts["F1"].base_font(), "TestMono");
    assert_eq!(fonts["F2"].base_font(), "OtherMono");
    let content = page.contents().to_latin1_string();
    assert_eq!(common::positions(&content, "/F1 1 Tf").len(), 2);
    assert_eq!(common::positions(&content, "/F2 1 Tf").len(), 1);
}

// ============================================================================
// Box model
// ============================================================================

#[test]
fn test_padding_background_and_border() {
    let model = BoxModel::builder()
        .padding(2.0)
        .background_color(Color::rgb(255, 0, 0))
        .border_width(1.0)
        .build()
        .unwrap();
    let mut chunk = mono_chunk("ab", 10.0).with_box_model(model);
    assert_eq!(chunk.measure(Size::new(100.0, 100.0)).unwrap(), Size::new(14.0, 14.0));

    let mut page = Page::new(100.0, 100.0);
    chunk.paint(Rect::new(0.0, 0.0, 100.0, 100.0), &mut page).unwrap();
    let content = page.contents().to_latin1_string();

    assert!(content.starts_with("q\n1 0 0 rg\n0 0 0 RG\n1 w\n0 86 14 14 re\nB\nQ\n"));
    assert!(content.contains("10 0 0 10 2 88 Tm"));
    assert_eq!(chunk.previous_paint_box(), Some(Rect::new(0.0, 86.0, 14.0, 14.0)));
    assert!(page.contents().is_balanced());
}

#[test]
fn test_uneven_borders_draw_lines() {
    let model = BoxModel::builder()
        .border_widths(0.0, 0.0, 2.0, 0.0)
        .border_color(Color::rgb(0, 0, 255))
        .build()
        .unwrap();
    let mut chunk = mono_chunk("ab", 10.0).with_box_model(model);
    let mut page = Page::new(100.0, 100.0);
    chunk.paint(Rect::new(0.0, 0.0, 10.0, 10.0), &mut page).unwrap();
    let content = page.contents().to_latin1_string();
    assert!(content.starts_with("q\n0 0 1 RG\n2 w\n0 0 m\n10 0 l\nS\nQ\n"), "{content}");
}

#[test]
fn test_alignment_within_available_box() {
    let model = BoxModel::builder()
        .horizontal_alignment(pdf_compose::geometry::HorizontalAlignment::Right)
        .vertical_alignment(pdf_compose::geometry::VerticalAlignment::Bottom)
        .build()
        .unwrap();
    let mut chunk = mono_chunk("abcd", 10.0).with_box_model(model);
    let mut page = Page::new(100.0, 100.0);
    chunk.paint(Rect::new(10.0, 10.0, 80.0, 80.0), &mut page).unwrap();
    assert_eq!(chunk.previous_paint_box(), Some(Rect::new(70.0, 10.0, 20.0, 10.0)));
}

#[test]
fn test_invalid_construction() {
    assert!(matches!(Chunk::new("x", mono(), 0.5), Err(Error::InvalidArgument(_))));
    assert!(Chunk::builder("x", mono()).character_spacing(-1.0).build().is_err());
    assert!(BoxModel::builder().padding(-3.0).build().is_err());
    assert!(BoxModel::builder().margin(-1.0).build().is_err());
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_measure_is_deterministic(
        text in "[a-zA-Z ]{0,40}",
        size in 1.0f64..72.0,
        width in 0.0f64..1000.0,
        height in 0.0f64..1000.0,
    ) {
        let chunk = Chunk::new(text.clone(), Arc::new(StandardFont::helvetica()), size).unwrap();
        let available = Size::new(width, height);
        let first = chunk.measure(available).unwrap();
        prop_assert_eq!(first, chunk.measure(available).unwrap());
        prop_assert_eq!(first, chunk.clone().measure(available).unwrap());
    }

    #[test]
    fn prop_paint_box_lies_in_available(
        text in "[a-z]{1,10}",
        x in 0.0f64..200.0,
        y in 0.0f64..200.0,
    ) {
        let mut chunk = mono_chunk(&text, 10.0);
        let available = Rect::new(x, y, 200.0, 50.0);
        let mut page = Page::new(500.0, 500.0);
        chunk.paint(available, &mut page).unwrap();
        prop_assert!(available.contains(&chunk.previous_paint_box().unwrap()));
        prop_assert!(page.contents().is_balanced());
    }
}
