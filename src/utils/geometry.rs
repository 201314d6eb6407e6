//! Geometry utilities for affine transformations
use crate::models::{Raster, RasterView};

/// 2×3 affine matrix mapping `(x, y)` to `(a*x + b*y + c, d*x + e*y + f)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl AffineTransform {
    /// Identity mapping
    pub fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 0.0,
            e: 1.0,
            f: 0.0,
        }
    }

    /// Rotate by `degrees` counterclockwise (as seen on screen, y pointing
    /// down) about `src_center`, placing that center at `dst_center`.
    pub fn rotation(degrees: f32, src_center: (f32, f32), dst_center: (f32, f32)) -> Self {
        let (sin, cos) = snap_trig(degrees);
        // Screen CCW with y down: (dx, dy) -> (dx*cos + dy*sin, -dx*sin + dy*cos)
        let (cx, cy) = src_center;
        let (ox, oy) = dst_center;
        Self {
            a: cos,
            b: sin,
            c: ox - cos * cx - sin * cy,
            d: -sin,
            e: cos,
            f: oy + sin * cx - cos * cy,
        }
    }

    /// Inverse mapping, `None` when the matrix is singular
    pub fn inverse(&self) -> Option<Self> {
        let det = self.a * self.e - self.b * self.d;
        if det.abs() < 1e-10 {
            return None;
        }
        let inv = 1.0 / det;
        let a = self.e * inv;
        let b = -self.b * inv;
        let d = -self.d * inv;
        let e = self.a * inv;
        Some(Self {
            a,
            b,
            c: -(a * self.c + b * self.f),
            d,
            e,
            f: -(d * self.c + e * self.f),
        })
    }

    /// Transform a point
    pub fn transform(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.b * y + self.c,
            self.d * x + self.e * y + self.f,
        )
    }
}

/// Exact sine/cosine for multiples of 90 degrees so quarter turns resample
/// onto whole pixels
fn snap_trig(degrees: f32) -> (f32, f32) {
    let normalized = degrees.rem_euclid(360.0);
    if normalized == 0.0 {
        (0.0, 1.0)
    } else if normalized == 90.0 {
        (1.0, 0.0)
    } else if normalized == 180.0 {
        (0.0, -1.0)
    } else if normalized == 270.0 {
        (-1.0, 0.0)
    } else {
        normalized.to_radians().sin_cos()
    }
}

/// Resample `src` through `transform` into a `width` x `height` canvas with
/// bilinear interpolation; samples that fall outside the source take `fill`.
pub fn warp_affine(
    src: &RasterView<'_>,
    transform: &AffineTransform,
    width: usize,
    height: usize,
    fill: u8,
) -> Option<Raster> {
    let inverse = transform.inverse()?;
    let channels = src.channels();
    let n = channels.count();
    let mut data = vec![fill; width * height * n];

    let sample = |x: isize, y: isize, c: usize| -> f32 {
        if x < 0 || y < 0 || x as usize >= src.width() || y as usize >= src.height() {
            fill as f32
        } else {
            src.pixel(x as usize, y as usize, c) as f32
        }
    };

    for y in 0..height {
        for x in 0..width {
            let (sx, sy) = inverse.transform(x as f32, y as f32);
            let x0 = sx.floor();
            let y0 = sy.floor();
            let fx = sx - x0;
            let fy = sy - y0;
            let (x0, y0) = (x0 as isize, y0 as isize);

            if x0 < -1 || y0 < -1 || x0 >= src.width() as isize || y0 >= src.height() as isize {
                continue;
            }

            for c in 0..n {
                let top = sample(x0, y0, c) * (1.0 - fx)
                    + if fx > 0.0 { sample(x0 + 1, y0, c) * fx } else { 0.0 };
                let value = if fy > 0.0 {
                    let bottom = sample(x0, y0 + 1, c) * (1.0 - fx)
                        + if fx > 0.0 { sample(x0 + 1, y0 + 1, c) * fx } else { 0.0 };
                    top * (1.0 - fy) + bottom * fy
                } else {
                    top
                };
                data[(y * width + x) * n + c] = value.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    Raster::new(width, height, channels, data).ok()
}

/// Convenience: rotation center of a `width` x `height` pixel grid
pub fn grid_center(width: usize, height: usize) -> (f32, f32) {
    ((width as f32 - 1.0) * 0.5, (height as f32 - 1.0) * 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Channels;

    #[test]
    fn test_inverse_round_trip() {
        let t = AffineTransform::rotation(33.0, (10.0, 4.0), (2.0, 7.0));
        let inv = t.inverse().unwrap();
        let (x, y) = t.transform(3.5, -1.25);
        let (bx, by) = inv.transform(x, y);
        assert!((bx - 3.5).abs() < 1e-4);
        assert!((by + 1.25).abs() < 1e-4);
    }

    #[test]
    fn test_quarter_turn_moves_right_to_up() {
        let t = AffineTransform::rotation(90.0, (0.0, 0.0), (0.0, 0.0));
        assert_eq!(t.transform(1.0, 0.0), (0.0, -1.0));
        assert_eq!(AffineTransform::identity().transform(2.0, 3.0), (2.0, 3.0));
    }

    #[test]
    fn test_warp_outside_source_is_filled() {
        let raster = Raster::filled(4, 4, Channels::Gray, 0).unwrap();
        let shift = AffineTransform::rotation(0.0, (0.0, 0.0), (10.0, 10.0));
        let out = warp_affine(&raster.view(), &shift, 4, 4, 255).unwrap();
        assert!(out.as_bytes().iter().all(|&v| v == 255));
    }
}
