//! Document conformance declarations.
//!
//! A document may declare a PDF/A or PDF/UA conformance level when it is
//! created. The layout engine only asks one question of it: whether content
//! must be tagged with marked-content sequences.
//!
//! ## PDF/A Conformance Levels (Archival)
//!
//! - **PDF/A-1b, 2b, 3b**: Basic conformance, visual appearance preservation
//! - **PDF/A-1a, 2a, 3a**: Full conformance, includes logical structure (Tagged PDF)
//! - **PDF/A-2u, 3u**: Basic conformance plus Unicode mapping
//!
//! ## PDF/UA (Accessibility)
//!
//! PDF/UA-1 always requires a Tagged PDF.

mod types;

pub use types::{Conformance, PdfALevel};
