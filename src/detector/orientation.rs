//! Orientation variants of a candidate crop

use crate::models::{Raster, RasterView};
use crate::utils::geometry::{AffineTransform, grid_center, warp_affine};

/// Background value for pixels a rotation brings in from outside the frame
pub const FILL_WHITE: u8 = 255;

/// A fixed rotation applied to a candidate before decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// As captured
    Identity,
    /// Quarter turn counterclockwise
    Rotate90Ccw,
    /// Half turn
    Rotate180,
    /// Quarter turn clockwise
    Rotate90Cw,
}

impl Orientation {
    /// Default search order: upright, then sideways
    pub const DEFAULT: [Orientation; 2] = [Orientation::Identity, Orientation::Rotate90Ccw];

    /// Every quarter turn
    pub const ALL: [Orientation; 4] = [
        Orientation::Identity,
        Orientation::Rotate90Ccw,
        Orientation::Rotate180,
        Orientation::Rotate90Cw,
    ];

    /// Counterclockwise angle in degrees
    pub fn degrees_ccw(self) -> f32 {
        match self {
            Orientation::Identity => 0.0,
            Orientation::Rotate90Ccw => 90.0,
            Orientation::Rotate180 => 180.0,
            Orientation::Rotate90Cw => 270.0,
        }
    }

    /// Whether the output canvas swaps width and height
    pub fn swaps_axes(self) -> bool {
        matches!(self, Orientation::Rotate90Ccw | Orientation::Rotate90Cw)
    }

    /// Short label for logs and CLI output
    pub fn label(self) -> &'static str {
        match self {
            Orientation::Identity => "identity",
            Orientation::Rotate90Ccw => "ccw90",
            Orientation::Rotate180 => "rot180",
            Orientation::Rotate90Cw => "cw90",
        }
    }

    /// Produce this orientation of `view`.
    ///
    /// Identity borrows the input unchanged. Rotations resample about the
    /// center onto a new canvas (axes swapped for quarter turns) filled with
    /// white. Returns `None` only for an empty view.
    pub fn apply<'a>(self, view: RasterView<'a>) -> Option<OrientationVariant<'a>> {
        if view.is_empty() {
            return None;
        }
        if self == Orientation::Identity {
            return Some(OrientationVariant::Borrowed(view));
        }

        let (width, height) = if self.swaps_axes() {
            (view.height(), view.width())
        } else {
            (view.width(), view.height())
        };
        let transform = AffineTransform::rotation(
            self.degrees_ccw(),
            grid_center(view.width(), view.height()),
            grid_center(width, height),
        );
        warp_affine(&view, &transform, width, height, FILL_WHITE).map(OrientationVariant::Owned)
    }
}

/// Pixels of one orientation, borrowed when no resampling was needed
#[derive(Debug, Clone)]
pub enum OrientationVariant<'a> {
    /// Untouched view of the candidate
    Borrowed(RasterView<'a>),
    /// Rotated copy
    Owned(Raster),
}

impl OrientationVariant<'_> {
    /// View of the variant's pixels
    pub fn view(&self) -> RasterView<'_> {
        match self {
            OrientationVariant::Borrowed(view) => *view,
            OrientationVariant::Owned(raster) => raster.view(),
        }
    }
}
