//! Row/column projection peaks as a single-candidate extractor

use super::RegionExtractionStrategy;
use super::candidates::Candidate;
use crate::models::{BinaryMask, BoundingBox, Raster, ScalarField};
use crate::utils::binarization::otsu_binarize;
use crate::utils::morphology::{StructuringElement, dilate};
use tracing::trace;

/// Finds the bright band of a photo by counting foreground pixels per row
/// and per column of a dilated Otsu mask.
///
/// Each axis contributes the first index holding the maximum count (scanning
/// forward) and the last one (scanning backward). At most one candidate is
/// produced and it is not expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionStrategy {
    /// Dilation radius; the square kernel is `2 * radius + 1` wide
    pub dilation_radius: usize,
}

impl Default for ProjectionStrategy {
    fn default() -> Self {
        Self { dilation_radius: 2 }
    }
}

fn row_projection(mask: &BinaryMask) -> Vec<usize> {
    (0..mask.height())
        .map(|y| (0..mask.width()).filter(|&x| mask.get(x, y)).count())
        .collect()
}

fn column_projection(mask: &BinaryMask) -> Vec<usize> {
    (0..mask.width())
        .map(|x| (0..mask.height()).filter(|&y| mask.get(x, y)).count())
        .collect()
}

/// Index of the first maximum, or of the last one when `reverse`.
/// An all-zero projection has no peak.
fn peak_index(projection: &[usize], reverse: bool) -> Option<usize> {
    let len = projection.len();
    let mut best = 0usize;
    let mut peak = None;
    for k in 0..len {
        let i = if reverse { len - 1 - k } else { k };
        if projection[i] > best {
            best = projection[i];
            peak = Some(i);
        }
    }
    peak
}

impl ProjectionStrategy {
    /// Locate the projection box, `None` when the peaks do not span an area
    pub fn locate(&self, gray: &Raster) -> Option<BoundingBox> {
        let field = ScalarField::from_vec(gray.width(), gray.height(), gray.view().to_luma_vec())?;
        let side = 2 * self.dilation_radius + 1;
        let mask = dilate(&otsu_binarize(&field), StructuringElement::rect(side, side), 1);

        let rows = row_projection(&mask);
        let cols = column_projection(&mask);
        let (min_y, max_y) = (peak_index(&rows, false)?, peak_index(&rows, true)?);
        let (min_x, max_x) = (peak_index(&cols, false)?, peak_index(&cols, true)?);
        trace!(min_x, max_x, min_y, max_y, "projection peaks");

        (min_x < max_x && min_y < max_y)
            .then(|| BoundingBox::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }
}

impl RegionExtractionStrategy for ProjectionStrategy {
    fn name(&self) -> &'static str {
        "projection"
    }

    fn extract<'a>(&self, gray: &'a Raster) -> Vec<Candidate<'a>> {
        self.locate(gray)
            .map(|bbox| Candidate {
                bbox,
                source_bbox: bbox,
                area: bbox.area() as f64,
                view: gray.sub_view(bbox),
            })
            .into_iter()
            .collect()
    }
}
