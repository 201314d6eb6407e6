/// Axis-aligned pixel rectangle `(x, y, width, height)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct BoundingBox {
    /// Left column
    pub x: usize,
    /// Top row
    pub y: usize,
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
}

impl BoundingBox {
    /// Create a new box
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box spanning inclusive pixel corners `(min_x, min_y)`..=`(max_x, max_y)`
    pub fn from_corners(min_x: usize, min_y: usize, max_x: usize, max_y: usize) -> Self {
        Self {
            x: min_x,
            y: min_y,
            width: max_x.saturating_sub(min_x) + 1,
            height: max_y.saturating_sub(min_y) + 1,
        }
    }

    /// Exclusive right edge
    pub fn right(&self) -> usize {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> usize {
        self.y + self.height
    }

    /// Pixel area
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Width / height, undefined for zero height
    pub fn aspect_ratio(&self) -> Option<f32> {
        if self.height == 0 {
            None
        } else {
            Some(self.width as f32 / self.height as f32)
        }
    }

    /// Whether the box lies inside a `width` x `height` frame
    pub fn fits_within(&self, width: usize, height: usize) -> bool {
        self.right() <= width && self.bottom() <= height
    }

    /// Shrink the box so it never leaves a `width` x `height` frame.
    ///
    /// A box starting outside the frame collapses to zero size at the edge.
    pub fn clamp_to(&self, width: usize, height: usize) -> Self {
        let x = self.x.min(width);
        let y = self.y.min(height);
        Self {
            x,
            y,
            width: self.width.min(width - x),
            height: self.height.min(height - y),
        }
    }

    /// Scale both sides by `factor` around the box center, then clamp to the frame.
    ///
    /// The top-left corner is clamped to the origin first and the size is cut
    /// back to what remains of the frame, so for `factor >= 1.0` the result
    /// is never smaller than `self` on either axis.
    pub fn expand(&self, factor: f32, frame_width: usize, frame_height: usize) -> Self {
        let factor = factor.max(1.0);
        // f32 rounding can land below the original side for huge boxes
        let expanded_w = ((self.width as f32 * factor) as usize).max(self.width);
        let expanded_h = ((self.height as f32 * factor) as usize).max(self.height);

        let x = self.x.saturating_sub((expanded_w - self.width) / 2);
        let y = self.y.saturating_sub((expanded_h - self.height) / 2);

        Self {
            x,
            y,
            width: expanded_w.min(frame_width.saturating_sub(x)),
            height: expanded_h.min(frame_height.saturating_sub(y)),
        }
    }
}
