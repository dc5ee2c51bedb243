//! The document model the layout engine paints into.
//!
//! ## Architecture
//!
//! ```text
//! LayoutElement::paint
//!     ↓
//! [marked_content] (optional BDC/EMC brackets on tagged pages)
//!     ↓
//! [ContentStreamWriter] (operators → bytes)
//!     ↓
//! Page { ContentStream, Resources } ∈ Document
//! ```
//!
//! Serialization of the finished document (object numbering, xref,
//! compression) is left to the caller.

mod content_stream;
mod document;
pub mod marked_content;
mod page;

pub use content_stream::{
    format_number, ContentStream, ContentStreamOp, ContentStreamWriter, TextArrayItem,
};
pub use document::Document;
pub use marked_content::{begin_marked_content, end_marked_content, MarkedContent};
pub use page::{Page, Resources};
