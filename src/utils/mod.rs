//! Utility functions for image processing
//!
//! This module provides the low-level helpers the scanning pipeline builds on:
//! - Grayscale conversion (RGB to luminance) and region intensity means
//! - Binarization (Otsu's method) and blurring
//! - Projection profiles (row ink counts, smoothing, peak detection)

/// Otsu thresholding and blurring
pub mod binarize;
/// Luma conversion and region means
pub mod grayscale;
/// Row ink profiles, smoothing, peak detection
pub mod projection;
