//! Utility functions for image processing
//!
//! This module provides the per-pixel stages of candidate extraction:
//! - Grayscale conversion (RGB to luminance)
//! - Gradient magnitude (Sobel)
//! - Binarization (3×3 blur and Otsu's method)
//! - Morphology (close / erode / dilate with rectangular kernels)
//! - Geometry (affine transforms and resampling)

/// 3×3 blur and Otsu thresholding
pub mod binarization;
/// Affine transforms and resampling
pub mod geometry;
/// Sobel gradient magnitude
pub mod gradient;
/// RGB to luminance
pub mod grayscale;
/// Rectangular-kernel binary morphology
pub mod morphology;
