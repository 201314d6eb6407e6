//! Edge-strength field from 3×3 Sobel derivatives
//!
//! The field is `|Gx| + |Gy|` saturated to 255. The downstream Otsu
//! threshold and morphology constants are tuned against this sum rather
//! than the Euclidean magnitude.

use crate::models::{RasterView, ScalarField};

/// Reflect an out-of-range index without repeating the edge sample
/// (`gfedcb|abcdefgh|gfedcba`).
#[inline]
pub(crate) fn reflect101(i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let n = n as isize;
    let r = if i < 0 {
        -i
    } else if i >= n {
        2 * n - 2 - i
    } else {
        i
    };
    r.clamp(0, n - 1) as usize
}

/// Sobel gradient magnitude (sum of absolute directional responses) of a
/// raster's luminance
pub fn gradient_field(view: &RasterView<'_>) -> ScalarField {
    let width = view.width();
    let height = view.height();
    let luma = view.to_luma_vec();
    sobel_sum(&luma, width, height)
}

/// Sobel `|Gx| + |Gy|` over a row-major luminance buffer
pub fn sobel_sum(luma: &[u8], width: usize, height: usize) -> ScalarField {
    let mut field = ScalarField::new(width, height);
    if width == 0 || height == 0 {
        return field;
    }

    let left: Vec<usize> = (0..width)
        .map(|x| reflect101(x as isize - 1, width))
        .collect();
    let right: Vec<usize> = (0..width)
        .map(|x| reflect101(x as isize + 1, width))
        .collect();

    let out = field.as_mut_slice();
    for y in 0..height {
        let above = &luma[reflect101(y as isize - 1, height) * width..][..width];
        let row = &luma[y * width..][..width];
        let below = &luma[reflect101(y as isize + 1, height) * width..][..width];

        for x in 0..width {
            let (l, r) = (left[x], right[x]);

            let p = |line: &[u8], i: usize| line[i] as i32;
            let gx = (p(above, r) - p(above, l))
                + 2 * (p(row, r) - p(row, l))
                + (p(below, r) - p(below, l));
            let gy = (p(below, l) - p(above, l))
                + 2 * (p(below, x) - p(above, x))
                + (p(below, r) - p(above, r));

            out[y * width + x] = (gx.abs() + gy.abs()).min(255) as u8;
        }
    }

    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Channels, Raster};

    #[test]
    fn test_reflect101() {
        assert_eq!(reflect101(-1, 5), 1);
        assert_eq!(reflect101(5, 5), 3);
        assert_eq!(reflect101(2, 5), 2);
        assert_eq!(reflect101(-1, 1), 0);
    }

    #[test]
    fn test_flat_raster_has_no_gradient() {
        let raster = Raster::filled(12, 9, Channels::Rgb, 140).unwrap();
        let field = gradient_field(&raster.view());
        assert!(field.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_vertical_edge_responds_in_x() {
        // Left half black, right half mid gray
        let (w, h) = (8usize, 5usize);
        let data = (0..w * h)
            .map(|i| if i % w < 4 { 0 } else { 40 })
            .collect();
        let raster = Raster::new(w, h, Channels::Gray, data).unwrap();
        let field = gradient_field(&raster.view());

        // 4 * 40 along the edge, nothing away from it
        assert_eq!(field.get(3, 2), 160);
        assert_eq!(field.get(4, 2), 160);
        assert_eq!(field.get(1, 2), 0);
        assert_eq!(field.get(6, 2), 0);
    }

    #[test]
    fn test_strong_edges_saturate() {
        let (w, h) = (6usize, 6usize);
        let data = (0..w * h)
            .map(|i| if (i % w) + (i / w) < 6 { 0 } else { 255 })
            .collect();
        let raster = Raster::new(w, h, Channels::Gray, data).unwrap();
        let field = gradient_field(&raster.view());
        assert_eq!(field.as_slice().iter().copied().max(), Some(255));
    }
}
