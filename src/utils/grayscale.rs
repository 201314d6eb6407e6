//! Convert RGB pixels to luminance
//! Y = 0.299*R + 0.587*G + 0.114*B
//! Uses fast integer arithmetic: Y = (76*R + 150*G + 29*B) >> 8

/// Coefficients for grayscale conversion: Y = (76*R + 150*G + 29*B) >> 8
const COEF_R: u32 = 76;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

/// Luminance of a single RGB pixel
#[inline]
pub fn luma_of(r: u8, g: u8, b: u8) -> u8 {
    let lum = (COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32) >> 8;
    lum.min(255) as u8
}

/// Convert an interleaved RGB buffer to one luminance byte per pixel
pub fn rgb_to_grayscale(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    let pixel_count = width * height;
    let mut gray = vec![0u8; pixel_count];
    rgb_to_grayscale_into(rgb, &mut gray);
    gray
}

/// Same as [`rgb_to_grayscale`] but writes into a caller buffer
pub fn rgb_to_grayscale_into(rgb: &[u8], gray: &mut [u8]) {
    // Process 8 pixels at a time with manual unrolling
    let mut in_chunks = rgb.chunks_exact(24);
    let mut out_chunks = gray.chunks_exact_mut(8);
    for (src, dst) in (&mut in_chunks).zip(&mut out_chunks) {
        for j in 0..8 {
            dst[j] = luma_of(src[j * 3], src[j * 3 + 1], src[j * 3 + 2]);
        }
    }

    // Process remaining pixels
    let src = in_chunks.remainder();
    let dst = out_chunks.into_remainder();
    for (px, out) in src.chunks_exact(3).zip(dst.iter_mut()) {
        *out = luma_of(px[0], px[1], px[2]);
    }
}
