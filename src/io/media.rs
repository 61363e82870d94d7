// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Frame image loading.
//!
//! This module handles probing frame dimensions (header-only, used by the
//! headless session core) and full decoding to RGBA pixels for display.

use anyhow::{Context, Result};
use std::path::Path;

/// A fully decoded frame ready for texture upload.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Read the pixel dimensions of an image without decoding it.
pub fn probe_dimensions(path: &Path) -> Result<(u32, u32)> {
    image::image_dimensions(path)
        .with_context(|| format!("Failed to read image header {}", path.display()))
}

/// Decode an image file to RGBA8 pixels.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let img = image::open(path)
        .with_context(|| format!("Failed to load image {}", path.display()))?;
    let rgba = img.to_rgba8();
    Ok(LoadedImage {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}
