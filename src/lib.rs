// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::new_without_default)]

//! # PDF Compose
//!
//! Layout engine for programmatic PDF composition. Application code builds
//! pages out of layout elements and the engine measures them, places them
//! and writes the page content streams.
//!
//! ## Core Features
//!
//! - **Text**: styled chunks, wrapping paragraphs with left, right, centered
//!   and justified alignment, inline markup (`**bold**`, `*italic*`, `==highlight==`)
//! - **Lists**: bullets, decimal, alphabetic and roman numbering
//! - **Box model**: padding, borders (solid or dashed, per side), backgrounds,
//!   margins and alignment on every element
//! - **Page flow**: single and multi-column layouts spilling onto new pages
//! - **Tagged PDF**: `P`, `L` and `LI` marked-content sequences with unique
//!   MCIDs when the document declares PDF/A level A or PDF/UA
//! - **Fonts**: the 14 standard fonts with WinAnsi metrics, TrueType/OpenType
//!   fonts addressed through Identity-H
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use pdf_compose::compliance::Conformance;
//! use pdf_compose::fonts::StandardFont;
//! use pdf_compose::layout::{Chunk, List, MultiColumnLayout, PageLayout, Paragraph};
//! use pdf_compose::writer::Document;
//!
//! # fn main() -> pdf_compose::Result<()> {
//! let font = Arc::new(StandardFont::helvetica());
//! let mut document = Document::with_conformance(Conformance::PdfUa1);
//! document.append_page(595.0, 842.0);
//!
//! let mut layout = MultiColumnLayout::single_column(&mut document)?;
//! let mut intro = Paragraph::new("Three things to remember:", font.clone(), 12.0)?;
//! layout.append_layout_element(&mut intro)?;
//!
//! let mut list = List::ordered();
//! for item in ["Measure", "Paint", "Repeat"] {
//!     list.add_item(Chunk::new(item, font.clone(), 12.0)?)?;
//! }
//! layout.append_layout_element(&mut list)?;
//!
//! let content = document.page(0).unwrap().contents().to_latin1_string();
//! assert!(content.contains("/P << /MCID 1 >> BDC"));
//! assert!(content.contains("(Repeat) Tj"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! layout (elements, page layouts)
//!     ↓ uses
//! fonts (metrics, encodings)      geometry, color
//!     ↓
//! writer (content streams, pages, documents)
//! ```
//!
//! Serializing the document to a file (object numbers, cross-reference
//! table, stream compression) is not part of this crate.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Error handling
pub mod error;

// Geometry and colors
pub mod color;
pub mod geometry;

// PDF objects used in font dictionaries
pub mod object;

// Fonts
pub mod fonts;

// Document model and content stream writing
pub mod writer;

// PDF/A and PDF/UA conformance declarations
pub mod compliance;

// Configuration
pub mod config;

// Layout engine
pub mod layout;

// Re-exports
pub use config::LayoutConfig;
pub use error::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.starts_with("0."));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "pdf_compose");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
