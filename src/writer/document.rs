//! The document: an ordered set of pages plus its conformance declaration.

use crate::compliance::Conformance;
use crate::writer::page::Page;

/// An in-memory document.
///
/// Pages created through [`Document::append_page`] inherit the
/// conformance the document was created with.
///
/// # Examples
///
/// ```
/// use pdf_compose::compliance::{Conformance, PdfALevel};
/// use pdf_compose::writer::Document;
///
/// let mut doc = Document::with_conformance(Conformance::PdfA(PdfALevel::A2a));
/// let index = doc.append_page(595.0, 842.0);
/// assert_eq!(index, 0);
/// assert!(doc.page(0).unwrap().requires_tagged_pdf());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Document {
    pages: Vec<Page>,
    conformance_at_create: Option<Conformance>,
}

impl Document {
    /// Create a document without a conformance declaration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document declaring `conformance`.
    pub fn with_conformance(conformance: Conformance) -> Self {
        Self {
            pages: Vec::new(),
            conformance_at_create: Some(conformance),
        }
    }

    /// Conformance declared at creation.
    pub fn conformance_at_create(&self) -> Option<Conformance> {
        self.conformance_at_create
    }

    /// Append an empty page and return its index.
    pub fn append_page(&mut self, width: f64, height: f64) -> usize {
        self.pages
            .push(Page::with_conformance(width, height, self.conformance_at_create));
        self.pages.len() - 1
    }

    /// Page at `index`.
    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Mutable page at `index`.
    pub fn page_mut(&mut self, index: usize) -> Option<&mut Page> {
        self.pages.get_mut(index)
    }

    /// All pages in order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the document has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
