/// Foreground value of a [`BinaryMask`]
pub const FOREGROUND: u8 = 255;
/// Background value of a [`BinaryMask`]
pub const BACKGROUND: u8 = 0;

/// Single-channel 8-bit grid owning its own buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarField {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl ScalarField {
    /// Zero-filled field
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Wrap a row-major buffer of `width * height` bytes
    pub fn from_vec(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        (data.len() == width * height).then_some(Self {
            width,
            height,
            data,
        })
    }

    /// Field width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Field height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Value at (x, y); out of bounds reads as 0
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[y * self.width + x]
    }

    /// Store value at (x, y); out of bounds writes are ignored
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.data[y * self.width + x] = value;
    }

    /// Row-major values
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Mutable row-major values
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// 256-bin intensity histogram
    pub fn histogram(&self) -> [u32; 256] {
        let mut histogram = [0u32; 256];
        for &v in &self.data {
            histogram[v as usize] += 1;
        }
        histogram
    }
}

/// Two-valued mask: [`FOREGROUND`] or [`BACKGROUND`] per pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BinaryMask {
    /// All-background mask
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![BACKGROUND; width * height],
        }
    }

    /// Mask width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Mask height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether (x, y) is foreground; out of bounds is background
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.data[y * self.width + x] == FOREGROUND
    }

    /// Set (x, y); out of bounds writes are ignored
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.data[y * self.width + x] = if value { FOREGROUND } else { BACKGROUND };
    }

    /// Mark a rectangle as foreground, clipped to the mask
    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize) {
        for yy in y..(y + height).min(self.height) {
            for xx in x..(x + width).min(self.width) {
                self.data[yy * self.width + xx] = FOREGROUND;
            }
        }
    }

    /// Number of foreground pixels
    pub fn count_foreground(&self) -> usize {
        self.data.iter().filter(|&&v| v == FOREGROUND).count()
    }

    /// Row-major 0/255 bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }
}

impl Default for BinaryMask {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
