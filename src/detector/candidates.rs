//! Ranking, expansion and cropping of candidate regions

use super::connected_components::Region;
use crate::models::{BoundingBox, Raster, RasterView};

/// Parameters for turning regions into candidates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionParams {
    /// Keep at most this many regions (largest first)
    pub max_candidates: usize,
    /// Side scale applied around each region's center
    pub expansion_factor: f32,
    /// Optional open interval that a region's width / height must fall in
    pub aspect_filter: Option<(f32, f32)>,
}

impl Default for SelectionParams {
    fn default() -> Self {
        Self {
            max_candidates: 3,
            expansion_factor: 5.0,
            aspect_filter: None,
        }
    }
}

/// A crop of the source raster that may hold a barcode
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// Expanded box, the one actually cropped
    pub bbox: BoundingBox,
    /// Tight box of the detected region
    pub source_bbox: BoundingBox,
    /// Contour area of the detected region
    pub area: f64,
    /// Borrowed pixels of `bbox`
    pub view: RasterView<'a>,
}

fn passes_aspect(bbox: &BoundingBox, filter: Option<(f32, f32)>) -> bool {
    let Some((lo, hi)) = filter else {
        return true;
    };
    bbox.aspect_ratio()
        .is_some_and(|ratio| ratio > lo && ratio < hi)
}

/// Rank regions by area, keep the top `max_candidates` and crop `gray` at
/// each expanded box.
///
/// Ties keep extraction order. Regions failing the aspect filter are skipped
/// before the count is applied, so a rejected large region does not use up
/// a slot.
pub fn select_candidates<'a>(
    regions: &[Region],
    gray: &'a Raster,
    params: &SelectionParams,
) -> Vec<Candidate<'a>> {
    let mut ranked: Vec<&Region> = regions
        .iter()
        .filter(|r| passes_aspect(&r.bbox, params.aspect_filter))
        .collect();
    ranked.sort_by(|a, b| b.area.total_cmp(&a.area));

    ranked
        .into_iter()
        .take(params.max_candidates)
        .map(|region| {
            let bbox = region
                .bbox
                .expand(params.expansion_factor, gray.width(), gray.height());
            Candidate {
                bbox,
                source_bbox: region.bbox,
                area: region.area,
                view: gray.sub_view(bbox),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::connected_components::find_external_regions;
    use crate::models::{BinaryMask, Channels};

    fn gray(width: usize, height: usize) -> Raster {
        Raster::filled(width, height, Channels::Gray, 200).unwrap()
    }

    fn mask_with(width: usize, height: usize, rects: &[(usize, usize, usize, usize)]) -> BinaryMask {
        let mut mask = BinaryMask::new(width, height);
        for &(x, y, w, h) in rects {
            mask.fill_rect(x, y, w, h);
        }
        mask
    }

    #[test]
    fn test_single_elongated_blob() {
        let raster = gray(400, 300);
        let mask = mask_with(400, 300, &[(150, 140, 70, 20)]);
        let regions = find_external_regions(&mask);
        let candidates = select_candidates(&regions, &raster, &SelectionParams::default());

        assert_eq!(candidates.len(), 1);
        let c = &candidates[0];
        assert_eq!(c.source_bbox, BoundingBox::new(150, 140, 70, 20));
        assert!(c.bbox.area() >= 70 * 20);
        assert!(c.bbox.fits_within(400, 300));
        assert_eq!(c.bbox, BoundingBox::new(10, 100, 350, 100));
        assert_eq!(c.view.bbox(), c.bbox);
    }

    #[test]
    fn test_takes_largest_three_in_order() {
        let raster = gray(500, 500);
        let mask = mask_with(
            500,
            500,
            &[
                (10, 10, 10, 10),
                (100, 10, 40, 10),
                (10, 200, 30, 30),
                (300, 300, 60, 60),
            ],
        );
        let regions = find_external_regions(&mask);
        assert_eq!(regions.len(), 4);

        let candidates = select_candidates(&regions, &raster, &SelectionParams::default());
        let boxes: Vec<_> = candidates.iter().map(|c| c.source_bbox).collect();
        assert_eq!(
            boxes,
            vec![
                BoundingBox::new(300, 300, 60, 60),
                BoundingBox::new(10, 200, 30, 30),
                BoundingBox::new(100, 10, 40, 10),
            ]
        );
    }

    #[test]
    fn test_aspect_filter_skips_square_blobs() {
        let raster = gray(500, 500);
        let mask = mask_with(500, 500, &[(300, 300, 80, 80), (20, 20, 70, 20)]);
        let regions = find_external_regions(&mask);
        let params = SelectionParams {
            aspect_filter: Some((2.0, 6.0)),
            ..SelectionParams::default()
        };
        let candidates = select_candidates(&regions, &raster, &params);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].source_bbox, BoundingBox::new(20, 20, 70, 20));
    }

    #[test]
    fn test_no_regions_no_candidates() {
        let raster = gray(50, 50);
        assert!(select_candidates(&[], &raster, &SelectionParams::default()).is_empty());
    }
}
