// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data structures.
//!
//! This module defines the core data structures for representing
//! bounding-box annotations: points, corner-pair rectangles, object
//! classes, and the full annotation record that gets logged.

use serde::{Deserialize, Serialize};

/// A 2D position in image pixels (device- or original-space).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Object class for an annotation. The set is closed; each class maps
/// to a fixed outline color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectClass {
    Car,
    Truck,
    Cyclist,
    Pedestrian,
    Van,
    Misc,
    PersonSitting,
    Tram,
    DontCare,
}

impl ObjectClass {
    /// All classes, in toolbar order.
    pub const ALL: [ObjectClass; 9] = [
        ObjectClass::Car,
        ObjectClass::Truck,
        ObjectClass::Cyclist,
        ObjectClass::Pedestrian,
        ObjectClass::Van,
        ObjectClass::Misc,
        ObjectClass::PersonSitting,
        ObjectClass::Tram,
        ObjectClass::DontCare,
    ];

    /// The label written to the annotation log.
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectClass::Car => "Car",
            ObjectClass::Truck => "Truck",
            ObjectClass::Cyclist => "Cyclist",
            ObjectClass::Pedestrian => "Pedestrian",
            ObjectClass::Van => "Van",
            ObjectClass::Misc => "Misc",
            ObjectClass::PersonSitting => "Person_sitting",
            ObjectClass::Tram => "Tram",
            ObjectClass::DontCare => "DontCare",
        }
    }

    /// Fixed outline color (RGB) for rectangles of this class.
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            ObjectClass::Car => (255, 0, 0),             // red
            ObjectClass::Truck => (0, 128, 0),           // green
            ObjectClass::Cyclist => (255, 255, 0),       // yellow
            ObjectClass::Pedestrian => (0, 255, 255),    // cyan
            ObjectClass::Van => (255, 255, 255),         // white
            ObjectClass::Misc => (0, 0, 0),              // black
            ObjectClass::PersonSitting => (255, 165, 0), // orange
            ObjectClass::Tram => (128, 0, 128),          // purple
            ObjectClass::DontCare => (0, 0, 255),        // blue
        }
    }
}

impl std::fmt::Display for ObjectClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rectangle stored as a corner pair in original (unscaled) image
/// pixels. The corners are kept in creation order: the first corner is
/// the press point, the second tracks the release point or the resize
/// handle, so x1 > x2 is legal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxRect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoxRect {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn from_corners(first: Point, second: Point) -> Self {
        Self::new(first.x, first.y, second.x, second.y)
    }

    /// Translate both corners by the given delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x1 += dx;
        self.y1 += dy;
        self.x2 += dx;
        self.y2 += dy;
    }

    /// Clamp every coordinate into [0, width] x [0, height].
    pub fn clamp(&mut self, width: f64, height: f64) {
        self.x1 = self.x1.clamp(0.0, width);
        self.x2 = self.x2.clamp(0.0, width);
        self.y1 = self.y1.clamp(0.0, height);
        self.y2 = self.y2.clamp(0.0, height);
    }

    /// Display-space rectangle for the given zoom factor. Derived on
    /// every paint; never stored.
    pub fn scaled(&self, zoom: f64) -> BoxRect {
        BoxRect::new(
            self.x1 * zoom,
            self.y1 * zoom,
            self.x2 * zoom,
            self.y2 * zoom,
        )
    }

    /// Whether the point lies within the rectangle's bounding box
    /// expanded by `tolerance` on every side.
    pub fn contains(&self, point: Point, tolerance: f64) -> bool {
        let min_x = self.x1.min(self.x2) - tolerance;
        let max_x = self.x1.max(self.x2) + tolerance;
        let min_y = self.y1.min(self.y2) - tolerance;
        let max_y = self.y1.max(self.y2) + tolerance;
        point.x >= min_x && point.x <= max_x && point.y >= min_y && point.y <= max_y
    }

    /// Whether the point lies on the resize handle around the second
    /// corner. `extent` is the handle half-size in original pixels.
    pub fn on_handle(&self, point: Point, extent: f64) -> bool {
        (point.x - self.x2).abs() <= extent && (point.y - self.y2).abs() <= extent
    }
}

/// A single logged bounding-box annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Editor-local identifier, unique within a session.
    pub id: u64,
    pub class: ObjectClass,
    /// Corners in original image pixels.
    pub rect: BoxRect,
    /// Creation time, preformatted as `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    pub user: String,
    /// File name of the frame the annotation belongs to.
    pub frame: String,
}
