//! Integration tests for marked-content tagging on conforming documents.

mod common;

use common::{init_logging, mono, mono_chunk, positions};
use pdf_compose::compliance::{Conformance, PdfALevel};
use pdf_compose::geometry::Rect;
use pdf_compose::layout::{LayoutElement, List, MultiColumnLayout, PageLayout, Paragraph};
use pdf_compose::writer::{begin_marked_content, end_marked_content, Document, Page};
use proptest::prelude::*;
use std::collections::HashSet;

/// MCIDs of every `BDC` on the page, in order.
fn mcids(content: &str) -> Vec<u32> {
    content
        .lines()
        .filter(|line| line.ends_with(" BDC"))
        .filter_map(|line| {
            let rest = line.split("/MCID ").nth(1)?;
            rest.split_whitespace().next()?.parse().ok()
        })
        .collect()
}

fn paragraph_then_list(conformance: Conformance) -> String {
    let mut document = Document::with_conformance(conformance);
    document.append_page(595.0, 842.0);
    let mut layout = MultiColumnLayout::single_column(&mut document).unwrap();

    let mut paragraph = Paragraph::new("Tagged paragraph", mono(), 12.0).unwrap();
    layout.append_layout_element(&mut paragraph).unwrap();
    let mut list = List::ordered()
        .with_item(mono_chunk("first", 12.0))
        .unwrap()
        .with_item(mono_chunk("second", 12.0))
        .unwrap();
    layout.append_layout_element(&mut list).unwrap();

    drop(layout);
    document.page(0).unwrap().contents().to_latin1_string()
}

#[test]
fn test_paragraph_and_list_are_tagged_in_order() {
    init_logging();
    let content = paragraph_then_list(Conformance::PdfA(PdfALevel::A2a));

    let markers = [
        "/P << /MCID 1 >> BDC",
        "EMC",
        "/L << /MCID 2 >> BDC",
        "/LI << /MCID 3 >> BDC",
    ];
    let found: Vec<usize> = markers.iter().map(|m| positions(&content, m)[0]).collect();
    assert!(found.windows(2).all(|pair| pair[0] < pair[1]), "{content}");

    assert_eq!(mcids(&content), vec![1, 2, 3, 4]);
    assert_eq!(positions(&content, "BDC").len(), positions(&content, "EMC").len());
    assert!(content.ends_with("EMC\nEMC\n"));
}

#[test]
fn test_pdf_ua_is_tagged() {
    let content = paragraph_then_list(Conformance::PdfUa1);
    assert!(content.contains("/P << /MCID 1 >> BDC"));
}

#[test]
fn test_basic_conformance_is_not_tagged() {
    for conformance in [
        Conformance::PdfA(PdfALevel::A1b),
        Conformance::PdfA(PdfALevel::A2b),
        Conformance::PdfA(PdfALevel::A3u),
    ] {
        let content = paragraph_then_list(conformance);
        assert!(!content.contains("BDC"), "{conformance} should not tag");
        assert!(!content.contains("EMC"));
    }
}

#[test]
fn test_mcids_restart_on_each_page() {
    let mut document = Document::with_conformance(PdfALevel::A1a.into());
    let mut layout = MultiColumnLayout::single_column(&mut document).unwrap();
    let mut first = Paragraph::new("one", mono(), 12.0).unwrap();
    layout.append_layout_element(&mut first).unwrap();
    layout.next_page();
    let mut second = Paragraph::new("two", mono(), 12.0).unwrap();
    layout.append_layout_element(&mut second).unwrap();
    drop(layout);

    for page in document.pages() {
        assert!(page.requires_tagged_pdf());
        assert_eq!(mcids(&page.contents().to_latin1_string()), vec![1]);
    }
}

#[test]
fn test_alt_text() {
    let mut page = Page::with_conformance(100.0, 100.0, Some(Conformance::PdfUa1));
    let token = begin_marked_content(&mut page, "Figure", Some("a (small) chart"));
    assert_eq!(token.as_ref().map(|t| t.mcid()), Some(1));
    end_marked_content(&mut page, token);
    assert_eq!(
        page.contents().to_latin1_string(),
        "/Figure << /MCID 1 /Alt (a \\(small\\) chart) >> BDC\nEMC\n"
    );
}

#[test]
fn test_untagged_page_ignores_markers() {
    let mut page = Page::new(100.0, 100.0);
    let token = begin_marked_content(&mut page, "P", None);
    assert!(token.is_none());
    end_marked_content(&mut page, token);
    assert!(page.contents().is_empty());
}

proptest! {
    #[test]
    fn prop_mcids_are_unique(count in 1usize..12, words in 1usize..6) {
        let mut page = Page::with_conformance(595.0, 842.0, Some(Conformance::PdfUa1));
        let mut top = 800.0;
        for i in 0..count {
            let text = vec![format!("p{}", i); words].join(" ");
            let mut paragraph = Paragraph::new(text, mono(), 8.0).unwrap();
            paragraph.paint(Rect::new(20.0, 0.0, 500.0, top), &mut page).unwrap();
            top = paragraph.previous_paint_box().unwrap().bottom();
        }
        let content = page.contents().to_latin1_string();
        let ids = mcids(&content);
        prop_assert_eq!(ids.len(), count);
        prop_assert_eq!(ids.iter().collect::<HashSet<_>>().len(), count);
        prop_assert!(page.contents().is_balanced());
    }
}
