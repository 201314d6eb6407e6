use super::BoundingBox;
use std::borrow::Cow;
use crate::error::{Result, ScanError};
use crate::utils::grayscale::{luma_of, rgb_to_grayscale};

/// Pixel layout of a [`Raster`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    /// Single luminance channel
    Gray,
    /// Interleaved RGB
    Rgb,
}

impl Channels {
    /// Bytes per pixel
    pub fn count(self) -> usize {
        match self {
            Channels::Gray => 1,
            Channels::Rgb => 3,
        }
    }

    /// Map a raw channel count
    pub fn from_count(count: usize) -> Result<Self> {
        match count {
            1 => Ok(Channels::Gray),
            3 => Ok(Channels::Rgb),
            other => Err(ScanError::UnsupportedChannels(other)),
        }
    }
}

/// Owned, row-major 8-bit pixel grid.
///
/// A `Raster` is always non-empty and its buffer always matches its
/// dimensions; construction enforces both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    channels: Channels,
    data: Vec<u8>,
}

impl Raster {
    /// Wrap an existing buffer, validating its shape
    pub fn new(width: usize, height: usize, channels: Channels, data: Vec<u8>) -> Result<Self> {
        let malformed = |reason| ScanError::MalformedInput {
            width,
            height,
            channels: channels.count(),
            reason,
        };
        if width == 0 || height == 0 {
            return Err(malformed("zero dimension"));
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(channels.count()))
            .ok_or_else(|| malformed("dimensions overflow"))?;
        if data.len() != expected {
            return Err(malformed("buffer length does not match dimensions"));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Raster with every byte set to `value`
    pub fn filled(width: usize, height: usize, channels: Channels, value: u8) -> Result<Self> {
        let len = width.saturating_mul(height).saturating_mul(channels.count());
        let data = if width == 0 || height == 0 {
            Vec::new()
        } else {
            vec![value; len]
        };
        Self::new(width, height, channels, data)
    }

    /// Convert a decoded image, keeping single-channel images as gray
    pub fn from_dynamic_image(img: &image::DynamicImage) -> Result<Self> {
        match img {
            image::DynamicImage::ImageLuma8(gray) => {
                let (w, h) = gray.dimensions();
                Self::new(w as usize, h as usize, Channels::Gray, gray.as_raw().clone())
            }
            other => {
                let rgb = other.to_rgb8();
                let (w, h) = rgb.dimensions();
                Self::new(w as usize, h as usize, Channels::Rgb, rgb.into_raw())
            }
        }
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Channel layout
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Raw interleaved bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Channel `c` of pixel `(x, y)`
    pub fn pixel(&self, x: usize, y: usize, c: usize) -> u8 {
        let n = self.channels.count();
        self.data[(y * self.width + x) * n + c]
    }

    /// Write every channel of pixel `(x, y)`
    pub fn set_pixel(&mut self, x: usize, y: usize, value: u8) {
        if x >= self.width || y >= self.height {
            return;
        }
        let n = self.channels.count();
        let start = (y * self.width + x) * n;
        self.data[start..start + n].fill(value);
    }

    /// Luminance of pixel `(x, y)`
    pub fn luma(&self, x: usize, y: usize) -> u8 {
        match self.channels {
            Channels::Gray => self.data[y * self.width + x],
            Channels::Rgb => {
                let i = (y * self.width + x) * 3;
                luma_of(self.data[i], self.data[i + 1], self.data[i + 2])
            }
        }
    }

    /// Single-channel raster, borrowing `self` when it is already gray
    pub fn as_luma(&self) -> Cow<'_, Raster> {
        match self.channels {
            Channels::Gray => Cow::Borrowed(self),
            Channels::Rgb => Cow::Owned(Raster {
                width: self.width,
                height: self.height,
                channels: Channels::Gray,
                data: rgb_to_grayscale(&self.data, self.width, self.height),
            }),
        }
    }

    /// Owned single-channel copy
    pub fn to_luma(&self) -> Raster {
        self.as_luma().into_owned()
    }

    /// Borrow the whole raster
    pub fn view(&self) -> RasterView<'_> {
        RasterView {
            parent: self,
            bbox: BoundingBox::new(0, 0, self.width, self.height),
        }
    }

    /// Borrow a sub-region; the box is clamped to the raster bounds
    pub fn sub_view(&self, bbox: BoundingBox) -> RasterView<'_> {
        RasterView {
            parent: self,
            bbox: bbox.clamp_to(self.width, self.height),
        }
    }
}

/// Read-only window into a [`Raster`] without copying pixels
#[derive(Debug, Clone, Copy)]
pub struct RasterView<'a> {
    parent: &'a Raster,
    bbox: BoundingBox,
}

impl<'a> RasterView<'a> {
    /// Visible width
    pub fn width(&self) -> usize {
        self.bbox.width
    }

    /// Visible height
    pub fn height(&self) -> usize {
        self.bbox.height
    }

    /// Channel layout of the parent
    pub fn channels(&self) -> Channels {
        self.parent.channels
    }

    /// Window position inside the parent
    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    /// Whether the window covers no pixels
    pub fn is_empty(&self) -> bool {
        self.bbox.width == 0 || self.bbox.height == 0
    }

    /// Channel `c` of view-local pixel `(x, y)`
    pub fn pixel(&self, x: usize, y: usize, c: usize) -> u8 {
        self.parent.pixel(self.bbox.x + x, self.bbox.y + y, c)
    }

    /// Luminance of view-local pixel `(x, y)`
    pub fn luma(&self, x: usize, y: usize) -> u8 {
        self.parent.luma(self.bbox.x + x, self.bbox.y + y)
    }

    /// Interleaved bytes of view-local row `y`, borrowed from the parent
    pub fn row(&self, y: usize) -> &'a [u8] {
        let n = self.parent.channels.count();
        let start = ((self.bbox.y + y) * self.parent.width + self.bbox.x) * n;
        &self.parent.data[start..start + self.bbox.width * n]
    }

    /// Contiguous luminance bytes of the window
    pub fn to_luma_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.width() * self.height());
        for y in 0..self.height() {
            match self.channels() {
                Channels::Gray => out.extend_from_slice(self.row(y)),
                Channels::Rgb => out.extend(
                    self.row(y)
                        .chunks_exact(3)
                        .map(|px| luma_of(px[0], px[1], px[2])),
                ),
            }
        }
        out
    }

    /// Owned copy of the window
    pub fn to_raster(&self) -> Result<Raster> {
        let mut data = Vec::with_capacity(self.width() * self.height() * self.channels().count());
        for y in 0..self.height() {
            data.extend_from_slice(self.row(y));
        }
        Raster::new(self.width(), self.height(), self.channels(), data)
    }

    /// Pixel-wise equality with another view
    pub fn same_pixels(&self, other: &RasterView<'_>) -> bool {
        self.width() == other.width()
            && self.height() == other.height()
            && self.channels() == other.channels()
            && (0..self.height()).all(|y| self.row(y) == other.row(y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(width: usize, height: usize) -> Raster {
        let data = (0..width * height).map(|i| (i % 251) as u8).collect();
        Raster::new(width, height, Channels::Gray, data).unwrap()
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(matches!(
            Raster::new(0, 10, Channels::Gray, Vec::new()),
            Err(ScanError::MalformedInput { .. })
        ));
        assert!(matches!(
            Raster::new(4, 4, Channels::Rgb, vec![0; 16]),
            Err(ScanError::MalformedInput { .. })
        ));
        assert!(matches!(
            Channels::from_count(4),
            Err(ScanError::UnsupportedChannels(4))
        ));
    }

    #[test]
    fn test_sub_view_borrows_parent_rows() {
        let raster = ramp(10, 8);
        let view = raster.sub_view(BoundingBox::new(2, 3, 4, 2));
        assert_eq!(view.width(), 4);
        assert_eq!(view.height(), 2);
        assert_eq!(view.row(0), &raster.as_bytes()[32..36]);
        assert_eq!(view.pixel(1, 1, 0), raster.pixel(3, 4, 0));
    }

    #[test]
    fn test_sub_view_clamps_overflowing_box() {
        let raster = ramp(10, 8);
        let view = raster.sub_view(BoundingBox::new(7, 6, 50, 50));
        assert_eq!(view.bbox(), BoundingBox::new(7, 6, 3, 2));
        assert_eq!(view.to_luma_vec().len(), 6);
    }

    #[test]
    fn test_rgb_view_luma() {
        let data = vec![255, 255, 255, 0, 0, 0];
        let raster = Raster::new(2, 1, Channels::Rgb, data).unwrap();
        let luma = raster.view().to_luma_vec();
        assert!(luma[0] >= 254);
        assert_eq!(luma[1], 0);
        assert_eq!(raster.to_luma().channels(), Channels::Gray);
        assert!(matches!(raster.as_luma(), Cow::Owned(_)));
    }

    #[test]
    fn test_gray_luma_borrows_buffer() {
        let raster = ramp(6, 5);
        let luma = raster.as_luma();
        assert!(matches!(luma, Cow::Borrowed(_)));
        assert!(std::ptr::eq(luma.as_bytes().as_ptr(), raster.as_bytes().as_ptr()));
    }

    #[test]
    fn test_to_raster_round_trip() {
        let raster = ramp(6, 5);
        let view = raster.sub_view(BoundingBox::new(1, 1, 3, 3));
        let copy = view.to_raster().unwrap();
        assert!(copy.view().same_pixels(&view));
    }
}
