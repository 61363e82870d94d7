// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides utilities for coordinate transformations between
//! device (zoomed, on-screen) coordinates and original image coordinates,
//! and for the zoom-scaled hit-test thresholds.

use crate::models::annotation::Point;

/// Half-size of the resize handle at zoom 1.0, in original pixels.
const HANDLE_SIZE: f64 = 8.0;

/// Convert device coordinates to original image coordinates.
pub fn to_original(device: Point, zoom: f64) -> Point {
    Point::new(device.x / zoom, device.y / zoom)
}

/// Clamp a point into [0, width] x [0, height].
pub fn clamp_point(point: Point, width: f64, height: f64) -> Point {
    Point::new(point.x.clamp(0.0, width), point.y.clamp(0.0, height))
}

/// Hit-test tolerance in original pixels. Shrinks with zoom so the
/// apparent on-screen tolerance stays roughly constant, but never below
/// 2 pixels.
pub fn hit_tolerance(zoom: f64) -> f64 {
    (5.0 / zoom).max(2.0)
}

/// Resize-handle half-size in original pixels for the given zoom.
pub fn handle_extent(zoom: f64) -> f64 {
    HANDLE_SIZE / zoom
}
