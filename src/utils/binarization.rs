use super::gradient::reflect101;
use crate::models::{BinaryMask, FOREGROUND, ScalarField};

/// 3×3 Gaussian smoothing (separable `[1 2 1] / 4` on each axis)
pub fn gaussian_blur_3x3(field: &ScalarField) -> ScalarField {
    let width = field.width();
    let height = field.height();
    let src = field.as_slice();
    let mut out = ScalarField::new(width, height);
    if width == 0 || height == 0 {
        return out;
    }

    // Horizontal pass keeps 4x scale in u16
    let mut horizontal = vec![0u16; width * height];
    for y in 0..height {
        let row = &src[y * width..][..width];
        for x in 0..width {
            let l = row[reflect101(x as isize - 1, width)] as u16;
            let r = row[reflect101(x as isize + 1, width)] as u16;
            horizontal[y * width + x] = l + 2 * row[x] as u16 + r;
        }
    }

    let dst = out.as_mut_slice();
    for y in 0..height {
        let up = reflect101(y as isize - 1, height) * width;
        let down = reflect101(y as isize + 1, height) * width;
        for x in 0..width {
            let sum = horizontal[up + x] + 2 * horizontal[y * width + x] + horizontal[down + x];
            dst[y * width + x] = ((sum + 8) >> 4) as u8;
        }
    }

    out
}

/// Calculate Otsu's optimal threshold.
///
/// Returns the first intensity of the upper class, or `None` when the
/// histogram has a single occupied bin and no split exists.
pub fn calculate_otsu_threshold(histogram: &[u32; 256]) -> Option<u8> {
    let total_pixels: u64 = histogram.iter().map(|&c| c as u64).sum();
    if total_pixels == 0 {
        return None;
    }
    let total_sum: u64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &c)| i as u64 * c as u64)
        .sum();

    let mut best: Option<(u8, f64)> = None;
    let mut class1_pixels = 0u64;
    let mut class1_sum = 0u64;

    // Class 1 holds intensities below `threshold`
    for threshold in 1..=255usize {
        class1_pixels += histogram[threshold - 1] as u64;
        class1_sum += (threshold as u64 - 1) * histogram[threshold - 1] as u64;
        let class2_pixels = total_pixels - class1_pixels;

        if class1_pixels == 0 || class2_pixels == 0 {
            continue;
        }
        // Skip thresholds that fall between empty bins of the same split
        if histogram[threshold] == 0 {
            continue;
        }

        let class1_mean = class1_sum as f64 / class1_pixels as f64;
        let class2_mean = (total_sum - class1_sum) as f64 / class2_pixels as f64;

        let weight1 = class1_pixels as f64 / total_pixels as f64;
        let weight2 = class2_pixels as f64 / total_pixels as f64;

        let variance = weight1 * weight2 * (class1_mean - class2_mean).powi(2);

        if best.is_none_or(|(_, v)| variance > v) {
            best = Some((threshold as u8, variance));
        }
    }

    best.map(|(t, _)| t)
}

/// Binarize with an automatic Otsu threshold: values at or above the
/// threshold become foreground. A flat field yields an all-background mask.
pub fn otsu_binarize(field: &ScalarField) -> BinaryMask {
    let width = field.width();
    let height = field.height();
    match calculate_otsu_threshold(&field.histogram()) {
        Some(threshold) => threshold_binarize(field, threshold),
        None => BinaryMask::new(width, height),
    }
}

/// Simple global threshold binarization (`value >= threshold` is foreground)
pub fn threshold_binarize(field: &ScalarField, threshold: u8) -> BinaryMask {
    let data = field
        .as_slice()
        .iter()
        .map(|&v| if v >= threshold { FOREGROUND } else { 0 })
        .collect();
    BinaryMask::from_raw(field.width(), field.height(), data)
}

/// Smooth then Otsu-binarize a gradient field
pub fn binarize_gradient(field: &ScalarField) -> BinaryMask {
    otsu_binarize(&gaussian_blur_3x3(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_binarize() {
        let field = ScalarField::from_vec(2, 2, vec![100, 150, 200, 50]).unwrap();
        let mask = threshold_binarize(&field, 128);

        assert!(!mask.get(0, 0)); // 100 < 128
        assert!(mask.get(1, 0)); // 150 >= 128
        assert!(mask.get(0, 1)); // 200 >= 128
        assert!(!mask.get(1, 1)); // 50 < 128
    }

    #[test]
    fn test_otsu_binarize() {
        // Create a simple two-class image
        let mut data = vec![50u8; 50]; // Dark class
        data.extend(vec![200u8; 50]); // Light class
        let field = ScalarField::from_vec(10, 10, data).unwrap();

        let threshold = calculate_otsu_threshold(&field.histogram()).unwrap();
        assert!(threshold > 50 && threshold <= 200);

        let mask = otsu_binarize(&field);
        assert!(!mask.get(0, 0)); // Dark
        assert!(mask.get(0, 7)); // Light
        assert_eq!(mask.count_foreground(), 50);
    }

    #[test]
    fn test_flat_field_is_all_background() {
        for value in [0u8, 77, 255] {
            let field = ScalarField::from_vec(6, 4, vec![value; 24]).unwrap();
            assert_eq!(calculate_otsu_threshold(&field.histogram()), None);
            assert_eq!(otsu_binarize(&field).count_foreground(), 0);
        }
    }

    #[test]
    fn test_blur_preserves_flat_and_spreads_spike() {
        let flat = ScalarField::from_vec(5, 5, vec![90; 25]).unwrap();
        assert_eq!(gaussian_blur_3x3(&flat), flat);

        let mut spike = ScalarField::new(5, 5);
        spike.set(2, 2, 160);
        let blurred = gaussian_blur_3x3(&spike);
        assert_eq!(blurred.get(2, 2), 40);
        assert_eq!(blurred.get(1, 2), 20);
        assert_eq!(blurred.get(1, 1), 10);
        assert_eq!(blurred.get(0, 0), 0);
    }

    #[test]
    fn test_mask_is_two_valued() {
        let data: Vec<u8> = (0..64).map(|i| (i * 4) as u8).collect();
        let field = ScalarField::from_vec(8, 8, data).unwrap();
        let mask = binarize_gradient(&field);
        assert!(mask.as_bytes().iter().all(|&v| v == 0 || v == FOREGROUND));
    }
}
