/// Axis-aligned pixel boxes
pub mod bbox;
/// Scalar fields and binary masks
pub mod field;
/// Decode results
pub mod outcome;
/// Integer points and polygon area
pub mod point;
/// Owned rasters and borrowed views
pub mod raster;

pub use bbox::BoundingBox;
pub use field::{BACKGROUND, BinaryMask, FOREGROUND, ScalarField};
pub use outcome::DecodeOutcome;
pub use point::{PointI, polygon_area};
pub use raster::{Channels, Raster, RasterView};
