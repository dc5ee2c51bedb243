//! Layout elements and the page layouts that place them.
//!
//! Every element implements [`LayoutElement`]: it is first measured against
//! an available size, then painted into a rectangle on a [`Page`]. Page
//! layouts drive that cycle for a sequence of elements:
//!
//! - [`Chunk`]: one styled run of text that never wraps
//! - [`HeterogeneousParagraph`], [`Paragraph`], [`MarkdownParagraph`]: wrapping text
//! - [`List`]: items with bullet, decimal, alphabetic or roman labels
//! - [`MultiColumnLayout`]: columns that spill onto new pages
//!
//! ```text
//! PageLayout::append_layout_element
//!     ↓ measure (available size) → size
//!     ↓ paint (rectangle, page)  → previous_paint_box
//! ContentStreamWriter
//! ```
//!
//! [`Page`]: crate::writer::Page

mod box_model;
mod chunk;
mod element;
pub mod list;
mod markdown;
mod page_layout;
mod paragraph;
pub mod roman;

pub use box_model::{BoxModel, BoxModelBuilder, Sides};
pub use chunk::{Chunk, ChunkBuilder};
pub use element::{FontHint, LayoutElement};
pub use list::{List, ListIndex};
pub use markdown::{parse_inline, MarkdownFonts, MarkdownParagraph, MarkdownRun, MarkdownStyle};
pub use page_layout::{MultiColumnLayout, PageLayout, A4};
pub use paragraph::{
    HeterogeneousParagraph, Paragraph, ParagraphBuilder, ParagraphOptions, ParagraphSource,
    ParagraphText, TextAlignment, DEFAULT_MULTIPLIED_LEADING,
};
