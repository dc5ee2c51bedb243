//! Marked-content sequences for tagged PDF.
//!
//! When the page's conformance requires tagging, structural elements are
//! bracketed by `/Tag << /MCID n >> BDC ... EMC`. The MCID is one more than
//! the largest MCID already present on the page, so the first one is 1.

use crate::writer::content_stream::ContentStreamOp;
use crate::writer::page::Page;
use lazy_static::lazy_static;
use regex::bytes::Regex;

lazy_static! {
    static ref MCID_PATTERN: Regex =
        Regex::new(r"(?-u)/[A-Za-z0-9]+\s*<<[^>]*?/MCID\s+(\d+)[^>]*?>>\s*BDC")
            .expect("MCID pattern is valid");
}

/// Token for an open marked-content sequence, consumed by [`end_marked_content`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "an open marked-content sequence must be closed with end_marked_content"]
pub struct MarkedContent {
    mcid: u32,
}

impl MarkedContent {
    /// The MCID assigned to this sequence.
    pub fn mcid(&self) -> u32 {
        self.mcid
    }
}

/// Next free MCID for the given content bytes.
pub fn next_mcid(content: &[u8]) -> u32 {
    MCID_PATTERN
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| std::str::from_utf8(m.as_bytes()).ok()?.parse::<u32>().ok())
        .max()
        .unwrap_or(0)
        + 1
}

/// Open a marked-content sequence tagged `tag` if the page requires tagging.
///
/// Returns `None`, writing nothing, on untagged pages.
pub fn begin_marked_content(page: &mut Page, tag: &str, alt: Option<&str>) -> Option<MarkedContent> {
    if !page.requires_tagged_pdf() {
        return None;
    }
    let mcid = next_mcid(page.contents().decoded_bytes());
    log::debug!("Opening /{} with MCID {}", tag, mcid);
    page.writer().op(ContentStreamOp::BeginMarkedContentDict {
        tag: tag.to_string(),
        mcid,
        alt: alt.map(str::to_string),
    });
    Some(MarkedContent { mcid })
}

/// Close a sequence opened by [`begin_marked_content`]; no-op for `None`.
pub fn end_marked_content(page: &mut Page, token: Option<MarkedContent>) {
    if token.is_some() {
        page.writer().op(ContentStreamOp::EndMarkedContent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::{Conformance, PdfALevel};

    #[test]
    fn test_next_mcid_scan() {
        assert_eq!(next_mcid(b""), 1);
        assert_eq!(next_mcid(b"/P << /MCID 4 >> BDC\nEMC\n/Span <</MCID 2>> BDC"), 5);
        // Not followed by BDC
        assert_eq!(next_mcid(b"/P << /MCID 9 >> BMC"), 1);
    }

    #[test]
    fn test_untagged_page_is_noop() {
        let mut page = Page::new(100.0, 100.0);
        let token = begin_marked_content(&mut page, "P", None);
        assert!(token.is_none());
        end_marked_content(&mut page, token);
        assert!(page.contents().is_empty());
    }

    #[test]
    fn test_tagged_page_assigns_increasing_mcids() {
        let mut page = Page::with_conformance(100.0, 100.0, Some(Conformance::PdfUa1));
        let outer = begin_marked_content(&mut page, "L", None);
        let inner = begin_marked_content(&mut page, "LI", Some("first item"));
        assert_eq!(outer.as_ref().map(|t| t.mcid()), Some(1));
        assert_eq!(inner.as_ref().map(|t| t.mcid()), Some(2));
        end_marked_content(&mut page, inner);
        end_marked_content(&mut page, outer);

        assert_eq!(
            page.contents().to_latin1_string(),
            "/L << /MCID 1 >> BDC\n/LI << /MCID 2 /Alt (first item) >> BDC\nEMC\nEMC\n"
        );
        assert!(page.contents().is_balanced());
    }

    #[test]
    fn test_alt_text_does_not_hide_mcid() {
        let mut page = Page::with_conformance(100.0, 100.0, Some(PdfALevel::A1a.into()));
        let first = begin_marked_content(&mut page, "P", Some("x > y"));
        end_marked_content(&mut page, first);
        let second = begin_marked_content(&mut page, "P", None);
        assert_eq!(second.as_ref().map(|t| t.mcid()), Some(2));
        end_marked_content(&mut page, second);
    }

    #[test]
    fn test_wide_alt_text_does_not_hide_mcid() {
        let mut page = Page::with_conformance(100.0, 100.0, Some(Conformance::PdfUa1));
        let first = begin_marked_content(&mut page, "Figure", Some("\u{56f3} > \u{2192}"));
        end_marked_content(&mut page, first);
        let second = begin_marked_content(&mut page, "P", None);
        assert_eq!(second.as_ref().map(|t| t.mcid()), Some(2));
        end_marked_content(&mut page, second);
        assert!(page.contents().is_balanced());
    }
}
