// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module wires the headless [`Session`] to the egui chrome: the
//! identity prompt at startup, the toolbar and summary panel actions,
//! the canvas pointer events, texture upload on frame change, and the
//! flush-then-close shutdown path.

use crate::io::media;
use crate::models::config::SessionConfig;
use crate::session::Session;
use crate::ui::{canvas, identity, properties, toolbar};
use std::path::PathBuf;

/// Main application state.
pub struct BoxerApp {
    config: SessionConfig,
    /// Active session; `None` while the identity prompt is up.
    session: Option<Session>,
    /// Index into the configured user list for the identity prompt.
    selected_user: usize,
    /// Texture of the current frame.
    texture: Option<egui::TextureHandle>,
    /// Which frame the texture was loaded from.
    texture_frame: Option<PathBuf>,
    /// Dimensions of the loaded frame image.
    image_size: Option<(u32, u32)>,
}

impl BoxerApp {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            session: None,
            selected_user: 0,
            texture: None,
            texture_frame: None,
            image_size: None,
        }
    }

    /// Upload the current frame as a texture when the frame changed.
    fn sync_texture(&mut self, ctx: &egui::Context) {
        let Some(session) = &self.session else {
            return;
        };
        let current = session.current_frame_path();
        if current == self.texture_frame {
            return;
        }

        self.texture = None;
        self.image_size = None;
        self.texture_frame = current.clone();

        if let Some(path) = current {
            match media::load_image(&path) {
                Ok(loaded) => {
                    let size = [loaded.width as usize, loaded.height as usize];
                    let color_image =
                        egui::ColorImage::from_rgba_unmultiplied(size, &loaded.pixels);
                    self.texture = Some(ctx.load_texture(
                        "frame",
                        color_image,
                        egui::TextureOptions::LINEAR,
                    ));
                    self.image_size = Some((loaded.width, loaded.height));
                }
                Err(e) => log::error!("Failed to load frame texture: {}", e),
            }
        }
    }
}

impl eframe::App for BoxerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Identity prompt until the session starts.
        if self.session.is_none() {
            if let Some(user) = identity::show(ctx, &self.config.users, &mut self.selected_user) {
                match Session::start(self.config.clone(), Some(&user)) {
                    Ok(session) => self.session = Some(session),
                    Err(e) => log::error!("Failed to start session: {}", e),
                }
            }
            return;
        }

        // Flush before the window closes; cancel the close if the flush
        // fails so pending annotations are not lost.
        if ctx.input(|i| i.viewport().close_requested()) {
            if let Some(session) = &mut self.session {
                if !session.is_finished() {
                    if let Err(e) = session.close() {
                        log::error!("Failed to save on close: {}", e);
                        ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
                    }
                }
            }
        }

        // Normal termination: the sequence ran out (or close flushed).
        if self.session.as_ref().is_some_and(|s| s.is_finished()) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        self.sync_texture(ctx);

        let texture = self.texture.clone();
        let image_size = self.image_size;
        let Some(session) = self.session.as_mut() else {
            return;
        };

        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                let mut class = session.editor().current_class();
                let action = toolbar::show(ui, &mut class);
                session.editor_mut().set_current_class(class);
                action
            })
            .inner;

        let result = match toolbar_action {
            toolbar::ToolbarAction::Previous => session.advance(-1),
            toolbar::ToolbarAction::Next => session.advance(1),
            toolbar::ToolbarAction::Save => session.save(),
            toolbar::ToolbarAction::DeleteSelected => {
                session.editor_mut().delete_selected();
                Ok(())
            }
            toolbar::ToolbarAction::DeleteLast => {
                session.editor_mut().delete_last();
                Ok(())
            }
            toolbar::ToolbarAction::ResetZoom => {
                session.editor_mut().reset_zoom();
                Ok(())
            }
            toolbar::ToolbarAction::None => Ok(()),
        };
        if let Err(e) = result {
            log::error!("Action failed: {}", e);
        }

        // Status bar (bottom)
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let sequence = session.sequence();
                ui.label(format!(
                    "Frame {} of {}",
                    sequence.index() + 1,
                    sequence.len()
                ));
                ui.separator();
                if session.editor().has_pending() {
                    ui.label(egui::RichText::new("Unsaved annotations").strong());
                } else {
                    ui.label("Saved");
                }
                ui.separator();
                ui.label(format!("Log: {}", session.config().log_path.display()));
            });
        });

        // Summary panel (right side)
        let panel_action = egui::SidePanel::right("summary")
            .default_width(250.0)
            .show(ctx, |ui| properties::show(ui, session.editor()))
            .inner;

        match panel_action {
            properties::PanelAction::SelectAnnotation(id) => {
                session.editor_mut().select(Some(id));
            }
            properties::PanelAction::DeleteAnnotation(id) => {
                session.editor_mut().select(Some(id));
                session.editor_mut().delete_selected();
            }
            properties::PanelAction::None => {}
        }

        // Main canvas (center)
        let events = egui::CentralPanel::default()
            .show(ctx, |ui| canvas::show(ui, session.editor(), &texture, image_size))
            .inner;

        for event in events {
            session.editor_mut().handle(event);
        }
    }
}
