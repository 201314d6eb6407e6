//! Binary morphology with rectangular structuring elements
//!
//! A rectangle is separable, so every operation runs as a horizontal pass
//! followed by a vertical pass. Each pass counts foreground pixels in a
//! sliding window with prefix sums, which keeps the cost independent of the
//! kernel size.
//!
//! Border handling: pixels outside the mask count as foreground for erosion
//! and as background for dilation, so neither operation creates or removes
//! structure at the frame edge by itself.

use crate::models::{BinaryMask, FOREGROUND};

/// Rectangular structuring element anchored at its center
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuringElement {
    /// Kernel width in pixels
    pub width: usize,
    /// Kernel height in pixels
    pub height: usize,
}

impl StructuringElement {
    /// Create a rectangular element
    pub fn rect(width: usize, height: usize) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    fn radius_x(&self) -> (usize, usize) {
        // Anchor at the kernel center
        (self.width / 2, self.width - 1 - self.width / 2)
    }

    fn radius_y(&self) -> (usize, usize) {
        (self.height / 2, self.height - 1 - self.height / 2)
    }
}

#[derive(Clone, Copy)]
enum Op {
    Erode,
    Dilate,
}

/// One 1-D pass over `len` samples spaced `stride` apart starting at `start`.
fn pass_line(
    src: &[u8],
    dst: &mut [u8],
    start: usize,
    stride: usize,
    len: usize,
    (before, after): (usize, usize),
    op: Op,
    prefix: &mut Vec<u32>,
) {
    prefix.clear();
    prefix.push(0);
    let mut acc = 0u32;
    for i in 0..len {
        acc += (src[start + i * stride] == FOREGROUND) as u32;
        prefix.push(acc);
    }

    for i in 0..len {
        let lo = i.saturating_sub(before);
        let hi = (i + after).min(len - 1);
        let inside = prefix[hi + 1] - prefix[lo];
        let value = match op {
            // Out-of-frame samples count as foreground
            Op::Erode => inside as usize == hi - lo + 1,
            Op::Dilate => inside > 0,
        };
        dst[start + i * stride] = if value { FOREGROUND } else { 0 };
    }
}

fn apply(mask: &BinaryMask, kernel: StructuringElement, op: Op) -> BinaryMask {
    let width = mask.width();
    let height = mask.height();
    if width == 0 || height == 0 {
        return mask.clone();
    }

    let src = mask.as_bytes();
    let mut horizontal = vec![0u8; width * height];
    let mut prefix = Vec::with_capacity(width.max(height) + 1);

    for y in 0..height {
        pass_line(
            src,
            &mut horizontal,
            y * width,
            1,
            width,
            kernel.radius_x(),
            op,
            &mut prefix,
        );
    }

    let mut out = vec![0u8; width * height];
    for x in 0..width {
        pass_line(
            &horizontal,
            &mut out,
            x,
            width,
            height,
            kernel.radius_y(),
            op,
            &mut prefix,
        );
    }

    BinaryMask::from_raw(width, height, out)
}

/// Erode `iterations` times
pub fn erode(mask: &BinaryMask, kernel: StructuringElement, iterations: usize) -> BinaryMask {
    let mut current = mask.clone();
    for _ in 0..iterations {
        current = apply(&current, kernel, Op::Erode);
    }
    current
}

/// Dilate `iterations` times
pub fn dilate(mask: &BinaryMask, kernel: StructuringElement, iterations: usize) -> BinaryMask {
    let mut current = mask.clone();
    for _ in 0..iterations {
        current = apply(&current, kernel, Op::Dilate);
    }
    current
}

/// Morphological close: dilate, then erode, once each
pub fn close(mask: &BinaryMask, kernel: StructuringElement) -> BinaryMask {
    erode(&dilate(mask, kernel, 1), kernel, 1)
}

/// Consolidate barcode-like blobs.
///
/// Close first so that thin bar rows merge before anything is eroded, then
/// erode and dilate `iterations` times each with the same kernel to strip
/// spurs without shrinking surviving blobs.
pub fn shape_regions(
    mask: &BinaryMask,
    kernel: StructuringElement,
    iterations: usize,
) -> BinaryMask {
    let closed = close(mask, kernel);
    let eroded = erode(&closed, kernel, iterations);
    dilate(&eroded, kernel, iterations)
}
