//! Barcode region detection
//!
//! This module turns a grayscale photo into a short ordered list of crops
//! worth handing to a symbol decoder:
//! - Gradient / morphology extraction (the default path)
//! - External connected regions with contour areas
//! - Candidate ranking, expansion and cropping
//! - Orientation variants of each crop
//! - Projection peaks (an alternative single-candidate extractor)

/// Ranking, expansion and cropping of regions
pub mod candidates;
/// External connected components of a binary mask
pub mod connected_components;
/// Rotated variants of a candidate crop
pub mod orientation;
/// Row/column projection extractor
pub mod projection;

pub use candidates::{Candidate, SelectionParams, select_candidates};
pub use connected_components::{Region, find_external_regions};
pub use orientation::{Orientation, OrientationVariant};
pub use projection::ProjectionStrategy;

use crate::config::ScanConfig;
use crate::models::{BinaryMask, Raster, ScalarField};
use crate::utils::binarization::{gaussian_blur_3x3, otsu_binarize};
use crate::utils::gradient::gradient_field;
use crate::utils::morphology::{StructuringElement, shape_regions};
use tracing::trace;

/// A way of producing candidate crops from a grayscale raster
pub trait RegionExtractionStrategy {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Ordered candidates, best first; empty when nothing looks like a barcode
    fn extract<'a>(&self, gray: &'a Raster) -> Vec<Candidate<'a>>;
}

/// Every intermediate of [`GradientMorphologyStrategy`]
#[derive(Debug, Clone)]
pub struct DetectionStages {
    /// Sobel `|Gx| + |Gy|`
    pub gradient: ScalarField,
    /// Gradient after the 3×3 blur
    pub blurred: ScalarField,
    /// Otsu mask of the blurred gradient
    pub mask: BinaryMask,
    /// Mask after close / erode / dilate
    pub shaped: BinaryMask,
    /// External regions of the shaped mask
    pub regions: Vec<Region>,
}

/// Gradient → blur → Otsu → morphology → external regions → top-K
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientMorphologyStrategy {
    /// Structuring element for every morphology step
    pub kernel: StructuringElement,
    /// Erosions, then as many dilations, after the close
    pub iterations: usize,
    /// Ranking and expansion
    pub selection: SelectionParams,
}

impl Default for GradientMorphologyStrategy {
    fn default() -> Self {
        Self::from_config(&ScanConfig::default())
    }
}

impl GradientMorphologyStrategy {
    /// Build from scan settings
    pub fn from_config(config: &ScanConfig) -> Self {
        Self {
            kernel: config.kernel(),
            iterations: config.morph_iterations,
            selection: config.selection(),
        }
    }

    /// Run every stage up to region extraction
    pub fn stages(&self, gray: &Raster) -> DetectionStages {
        let gradient = gradient_field(&gray.view());
        let blurred = gaussian_blur_3x3(&gradient);
        let mask = otsu_binarize(&blurred);
        let shaped = shape_regions(&mask, self.kernel, self.iterations);
        let regions = find_external_regions(&shaped);

        trace!(
            width = gray.width(),
            height = gray.height(),
            mask_foreground = mask.count_foreground(),
            shaped_foreground = shaped.count_foreground(),
            regions = regions.len(),
            "gradient stages"
        );

        DetectionStages {
            gradient,
            blurred,
            mask,
            shaped,
            regions,
        }
    }
}

impl RegionExtractionStrategy for GradientMorphologyStrategy {
    fn name(&self) -> &'static str {
        "gradient"
    }

    fn extract<'a>(&self, gray: &'a Raster) -> Vec<Candidate<'a>> {
        let stages = self.stages(gray);
        select_candidates(&stages.regions, gray, &self.selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BoundingBox, Channels};

    /// Light frame with a block of 2 px vertical bars
    fn bar_block(width: usize, height: usize, block: BoundingBox) -> Raster {
        let mut raster = Raster::filled(width, height, Channels::Gray, 235).unwrap();
        for y in block.y..block.bottom() {
            for x in block.x..block.right() {
                if ((x - block.x) / 2) % 2 == 0 {
                    raster.set_pixel(x, y, 20);
                }
            }
        }
        raster
    }

    #[test]
    fn test_uniform_raster_has_no_candidates() {
        let strategy = GradientMorphologyStrategy::default();
        for value in [0u8, 128, 255] {
            let raster = Raster::filled(64, 48, Channels::Gray, value).unwrap();
            let stages = strategy.stages(&raster);
            assert_eq!(stages.mask.count_foreground(), 0);
            assert!(strategy.extract(&raster).is_empty());
        }
    }

    #[test]
    fn test_bar_block_gives_one_covering_candidate() {
        let block = BoundingBox::new(160, 100, 140, 120);
        let raster = bar_block(480, 320, block);
        let candidates = GradientMorphologyStrategy::default().extract(&raster);

        assert_eq!(candidates.len(), 1);
        let c = &candidates[0];
        assert!(c.bbox.fits_within(480, 320));
        assert!(c.bbox.x <= block.x && c.bbox.right() >= block.right());
        assert!(c.bbox.y <= block.y && c.bbox.bottom() >= block.bottom());
        assert!(c.bbox.area() >= c.source_bbox.area());
    }

    #[test]
    fn test_stages_keep_dimensions() {
        let raster = bar_block(90, 70, BoundingBox::new(20, 20, 50, 30));
        let stages = GradientMorphologyStrategy::default().stages(&raster);
        assert_eq!((stages.gradient.width(), stages.gradient.height()), (90, 70));
        assert_eq!((stages.shaped.width(), stages.shaped.height()), (90, 70));
        assert!(stages.mask.as_bytes().iter().all(|&v| v == 0 || v == 255));
    }
}
