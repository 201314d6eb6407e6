//! Symbol decoding seam
//!
//! The pipeline never decodes bars itself. It hands crops to a
//! [`SymbolDecoder`] and only looks at whether text came back.
//! - `SymbolDecoder`: raster in, [`DecodeOutcome`] out, never an error
//! - `DecodeHints`: symbology restriction and effort level for backends
//! - `RxingDecoder` (feature `rxing`): multi-format reader backend

#[cfg(feature = "rxing")]
/// rxing-backed decoder
pub mod rxing_backend;

#[cfg(feature = "rxing")]
pub use rxing_backend::RxingDecoder;

use crate::models::{DecodeOutcome, RasterView};

/// Something that reads a barcode payload from pixels.
///
/// Unreadable, ambiguous or missing symbols are `NotFound`, never a panic
/// or an error: the driver treats them as ordinary control flow.
pub trait SymbolDecoder {
    /// Decode one raster
    fn decode(&self, raster: &RasterView<'_>) -> DecodeOutcome;
}

impl<D: SymbolDecoder + ?Sized> SymbolDecoder for Box<D> {
    fn decode(&self, raster: &RasterView<'_>) -> DecodeOutcome {
        (**self).decode(raster)
    }
}

/// Which symbologies a backend may report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Symbology {
    /// Anything the backend can read
    #[default]
    Any,
    /// PDF417 only
    Pdf417Only,
}

impl Symbology {
    /// Parse `any` or `pdf417` (case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "any" | "all" => Some(Symbology::Any),
            "pdf417" | "pdf_417" => Some(Symbology::Pdf417Only),
            _ => None,
        }
    }
}

/// Backend tuning shared by every attempt of a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeHints {
    /// Symbology restriction
    pub symbology: Symbology,
    /// Spend more time per raster
    pub try_harder: bool,
}

impl Default for DecodeHints {
    fn default() -> Self {
        Self {
            symbology: Symbology::Any,
            try_harder: true,
        }
    }
}
