//! Conformance levels a document can declare when it is created.

use serde::{Deserialize, Serialize};
use std::fmt;

/// PDF/A conformance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PdfALevel {
    /// PDF/A-1, level A (tagged)
    A1a,
    /// PDF/A-1, level B
    A1b,
    /// PDF/A-2, level A (tagged)
    A2a,
    /// PDF/A-2, level B
    A2b,
    /// PDF/A-2, level U
    A2u,
    /// PDF/A-3, level A (tagged)
    A3a,
    /// PDF/A-3, level B
    A3b,
    /// PDF/A-3, level U
    A3u,
}

impl PdfALevel {
    /// The PDF/A part (1, 2, or 3).
    pub fn part(&self) -> u8 {
        match self {
            PdfALevel::A1a | PdfALevel::A1b => 1,
            PdfALevel::A2a | PdfALevel::A2b | PdfALevel::A2u => 2,
            PdfALevel::A3a | PdfALevel::A3b | PdfALevel::A3u => 3,
        }
    }

    /// The conformance level letter.
    pub fn conformance(&self) -> char {
        match self {
            PdfALevel::A1a | PdfALevel::A2a | PdfALevel::A3a => 'A',
            PdfALevel::A1b | PdfALevel::A2b | PdfALevel::A3b => 'B',
            PdfALevel::A2u | PdfALevel::A3u => 'U',
        }
    }

    /// Whether pages under this level carry marked-content tags.
    pub fn requires_structure(&self) -> bool {
        self.conformance() == 'A'
    }
}

impl fmt::Display for PdfALevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PDF/A-{}{}", self.part(), self.conformance().to_ascii_lowercase())
    }
}

/// Conformance a document declares at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Conformance {
    /// PDF/A (archival)
    PdfA(PdfALevel),
    /// PDF/UA-1 (accessibility)
    PdfUa1,
}

impl Conformance {
    /// Whether content must be wrapped in marked-content sequences.
    ///
    /// True for the PDF/A "a" levels and for PDF/UA.
    pub fn requires_tagged_pdf(&self) -> bool {
        match self {
            Conformance::PdfA(level) => level.requires_structure(),
            Conformance::PdfUa1 => true,
        }
    }
}

impl From<PdfALevel> for Conformance {
    fn from(level: PdfALevel) -> Self {
        Conformance::PdfA(level)
    }
}

impl fmt::Display for Conformance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conformance::PdfA(level) => write!(f, "{}", level),
            Conformance::PdfUa1 => write!(f, "PDF/UA-1"),
        }
    }
}
