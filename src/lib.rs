//! pdf417_scan - locate and read PDF417 barcodes in photographs
//!
//! The crate does not decode bars itself. It turns an unsegmented photo
//! into a short ordered list of crops and orientations and drives a
//! [`SymbolDecoder`] over them until one returns text:
//!
//! 1. decode the whole image;
//! 2. otherwise extract candidates (Sobel gradient, blur, Otsu,
//!    close / erode / dilate, external regions, top-K by area, 5× expansion);
//! 3. decode each candidate upright, then rotated a quarter turn
//!    counterclockwise, stopping at the first payload.
//!
//! ```
//! use pdf417_scan::{DecodeOutcome, Raster, RasterView, SymbolDecoder, decode_barcode};
//! use pdf417_scan::models::Channels;
//!
//! struct NeverReads;
//!
//! impl SymbolDecoder for NeverReads {
//!     fn decode(&self, _raster: &RasterView<'_>) -> DecodeOutcome {
//!         DecodeOutcome::NotFound
//!     }
//! }
//!
//! let raster = Raster::filled(64, 48, Channels::Gray, 255).unwrap();
//! assert_eq!(decode_barcode(&raster, &NeverReads), DecodeOutcome::NotFound);
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Scan settings and environment overrides
pub mod config;
/// Symbol decoder seam and backends
pub mod decoder;
/// Candidate region detection
pub mod detector;
/// Error type
pub mod error;
/// Core data structures (Raster, masks, boxes, outcomes)
pub mod models;
/// Decode-attempt state machine
pub mod pipeline;
/// Loading, statistics and batch helpers for tools and benches
pub mod tools;
/// Utility functions (grayscale, gradient, binarization, morphology, geometry)
pub mod utils;

pub use config::ScanConfig;
pub use decoder::{DecodeHints, SymbolDecoder, Symbology};
pub use detector::{GradientMorphologyStrategy, Orientation, ProjectionStrategy, RegionExtractionStrategy};
pub use error::{Result, ScanError};
pub use models::{BoundingBox, DecodeOutcome, Raster, RasterView};
pub use pipeline::{AttemptTelemetry, DecodeAttemptDriver, DecodeReport, DriverState};

#[cfg(feature = "rxing")]
pub use decoder::RxingDecoder;

/// Decode a barcode from `raster` with the process-wide settings
///
/// # Arguments
/// * `raster` - Gray or RGB photograph
/// * `decoder` - Symbol decoder tried on the whole image and each crop
///
/// # Returns
/// The first decoded payload, or `NotFound`
pub fn decode_barcode<D: SymbolDecoder + ?Sized>(raster: &Raster, decoder: &D) -> DecodeOutcome {
    let config = ScanConfig::global();
    let strategy = GradientMorphologyStrategy::from_config(config);
    DecodeAttemptDriver::new(decoder, &strategy, &config.orientations)
        .run(raster)
        .outcome
}

/// Decode a barcode from an encoded image (PNG, JPEG, ...)
///
/// Undecodable bytes and degenerate images are errors; a readable image
/// without a barcode is `Ok(NotFound)`.
pub fn decode_image_bytes<D: SymbolDecoder + ?Sized>(bytes: &[u8], decoder: &D) -> Result<DecodeOutcome> {
    let img = image::load_from_memory(bytes)?;
    let raster = Raster::from_dynamic_image(&img)?;
    Ok(decode_barcode(&raster, decoder))
}

/// Scanner with its own settings, decoder and extraction strategy
pub struct Scanner<D> {
    decoder: D,
    strategy: Box<dyn RegionExtractionStrategy + Send + Sync>,
    config: ScanConfig,
}

impl<D: SymbolDecoder> Scanner<D> {
    /// Scanner using the process-wide settings
    pub fn new(decoder: D) -> Self {
        Self::with_config(decoder, ScanConfig::global().clone())
    }

    /// Scanner using explicit settings and the gradient strategy
    pub fn with_config(decoder: D, config: ScanConfig) -> Self {
        Self {
            strategy: Box::new(GradientMorphologyStrategy::from_config(&config)),
            decoder,
            config,
        }
    }

    /// Replace the extraction strategy
    pub fn with_strategy(mut self, strategy: impl RegionExtractionStrategy + Send + Sync + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    /// Settings in use
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan and report how the outcome was reached
    pub fn scan(&self, raster: &Raster) -> DecodeReport {
        DecodeAttemptDriver::new(&self.decoder, self.strategy.as_ref(), &self.config.orientations)
            .run(raster)
    }

    /// Decode a barcode from `raster`
    pub fn decode(&self, raster: &Raster) -> DecodeOutcome {
        self.scan(raster).outcome
    }

    /// Decode a barcode from a loaded image
    pub fn decode_image(&self, img: &image::DynamicImage) -> Result<DecodeOutcome> {
        let raster = Raster::from_dynamic_image(img)?;
        Ok(self.decode(&raster))
    }

    /// Decode a barcode from encoded image bytes
    pub fn decode_bytes(&self, bytes: &[u8]) -> Result<DecodeOutcome> {
        let img = image::load_from_memory(bytes)?;
        self.decode_image(&img)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Channels;
    use std::cell::Cell;

    struct Counting {
        calls: Cell<usize>,
    }

    impl SymbolDecoder for Counting {
        fn decode(&self, _raster: &RasterView<'_>) -> DecodeOutcome {
            self.calls.set(self.calls.get() + 1);
            DecodeOutcome::NotFound
        }
    }

    #[test]
    fn test_blank_image_is_exhausted_after_one_attempt() {
        let raster = Raster::filled(80, 60, Channels::Rgb, 255).unwrap();
        let decoder = Counting { calls: Cell::new(0) };
        assert_eq!(decode_barcode(&raster, &decoder), DecodeOutcome::NotFound);
        assert_eq!(decoder.calls.get(), 1);
    }

    #[test]
    fn test_corrupt_bytes_are_an_error() {
        let decoder = Counting { calls: Cell::new(0) };
        assert!(matches!(
            decode_image_bytes(b"definitely not an image", &decoder),
            Err(ScanError::Image(_))
        ));
        assert_eq!(decoder.calls.get(), 0);
    }

    #[test]
    fn test_scanner_with_projection_strategy() {
        let scanner = Scanner::with_config(Counting { calls: Cell::new(0) }, ScanConfig::default())
            .with_strategy(ProjectionStrategy::default());
        let raster = Raster::filled(30, 30, Channels::Gray, 10).unwrap();
        let report = scanner.scan(&raster);
        assert_eq!(report.telemetry.final_state, DriverState::Exhausted);
        assert_eq!(report.telemetry.candidates, 0);
    }
}
