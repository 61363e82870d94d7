// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Boxer - bounding-box annotation for image frame sequences
//!
//! A desktop tool for drawing class-labeled bounding boxes on a
//! sequence of frame images and appending them to a line-oriented
//! annotation log with user name and timestamp.

mod app;
mod editor;
mod io;
mod models;
mod sequence;
mod session;
mod ui;
mod util;

use anyhow::{Context, Result};
use app::BoxerApp;
use models::config::SessionConfig;
use std::path::PathBuf;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = resolve_config()?;
    log::info!(
        "Annotating frames in {}, logging to {}",
        config.image_dir.display(),
        config.log_path.display()
    );

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Boxer - Frame Annotation"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Boxer",
        options,
        Box::new(|_cc| Ok(Box::new(BoxerApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}

/// Resolve the session configuration: a config file path given as the
/// first argument, or a frame directory chosen in a native picker.
fn resolve_config() -> Result<SessionConfig> {
    if let Some(arg) = std::env::args().nth(1) {
        let path = PathBuf::from(arg);
        return io::serialization::load_config(&path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    let dir = rfd::FileDialog::new()
        .set_title("Select the frame directory")
        .pick_folder()
        .context("No frame directory selected")?;
    Ok(SessionConfig::for_image_dir(dir))
}
