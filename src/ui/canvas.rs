// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for frame display and annotation.
//!
//! This module paints the current frame scaled by the zoom factor,
//! derives the display-space rectangles from the editor's original-space
//! geometry, and translates raw egui pointer and scroll input into the
//! editor's [`PointerEvent`]s.

use crate::editor::{AnnotationEditor, PointerEvent, ScrollDirection};
use crate::models::annotation::Point;

const HIGHLIGHT_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 0, 255);
const OUTLINE_WIDTH: f32 = 2.0;
const HIGHLIGHT_WIDTH: f32 = 3.0;

/// Display the canvas and collect the pointer events it produced this
/// frame, in delivery order.
pub fn show(
    ui: &mut egui::Ui,
    editor: &AnnotationEditor,
    texture: &Option<egui::TextureHandle>,
    image_size: Option<(u32, u32)>,
) -> Vec<PointerEvent> {
    let mut events = Vec::new();
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        let (Some(texture), Some((img_width, img_height))) = (texture, image_size) else {
            ui.centered_and_justified(|ui| {
                ui.label(
                    egui::RichText::new("No frame loaded").color(egui::Color32::from_gray(180)),
                );
            });
            return;
        };

        // Display size is the original size times the zoom factor; the
        // scroll area makes zoomed-in frames navigable.
        let zoom = editor.zoom() as f32;
        let display_size = egui::vec2(img_width as f32 * zoom, img_height as f32 * zoom);

        egui::ScrollArea::both().show(ui, |ui| {
            let (image_rect, response) =
                ui.allocate_exact_size(display_size, egui::Sense::click_and_drag());

            ui.painter().image(
                texture.id(),
                image_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );

            // Device coordinates are relative to the displayed image
            // origin; the editor divides by zoom to get original space.
            let device = |pos: egui::Pos2| {
                Point::new(
                    (pos.x - image_rect.min.x) as f64,
                    (pos.y - image_rect.min.y) as f64,
                )
            };

            let pointer_pos = response
                .interact_pointer_pos()
                .or_else(|| response.hover_pos());
            if let Some(pos) = pointer_pos {
                let (pressed, down, released, scroll) = ui.input(|i| {
                    (
                        i.pointer.primary_pressed(),
                        i.pointer.primary_down(),
                        i.pointer.primary_released(),
                        i.raw_scroll_delta.y,
                    )
                });

                if response.hovered() && pressed {
                    events.push(PointerEvent::Press(device(pos)));
                } else if down {
                    events.push(PointerEvent::Move(device(pos)));
                }
                if released {
                    events.push(PointerEvent::Release(device(pos)));
                }
                if response.hovered() && scroll != 0.0 {
                    let direction = if scroll > 0.0 {
                        ScrollDirection::In
                    } else {
                        ScrollDirection::Out
                    };
                    events.push(PointerEvent::Scroll(device(pos), direction));
                }
            }

            // Redraw pass: display-space boxes derived from original
            // coordinates, outline color from the class, highlight for
            // the selection.
            let painter = ui.painter();
            for annotation in editor.rectangles() {
                let display = editor.display_rect(annotation);
                let rect = egui::Rect::from_two_pos(
                    image_rect.min + egui::vec2(display.x1 as f32, display.y1 as f32),
                    image_rect.min + egui::vec2(display.x2 as f32, display.y2 as f32),
                );

                let (color, width) = if editor.selected() == Some(annotation.id) {
                    (HIGHLIGHT_COLOR, HIGHLIGHT_WIDTH)
                } else {
                    let (r, g, b) = annotation.class.color();
                    (egui::Color32::from_rgb(r, g, b), OUTLINE_WIDTH)
                };
                painter.rect_stroke(rect, 0.0, egui::Stroke::new(width, color));
            }
        });
    });

    // Status line below the canvas.
    ui.separator();
    ui.horizontal(|ui| {
        ui.label(format!("Frame: {}", editor.frame_name()));
        ui.separator();
        ui.label(format!("Zoom: {:.0}%", editor.zoom() * 100.0));
        ui.separator();
        ui.label(format!("Boxes: {}", editor.rectangles().len()));
        ui.separator();
        ui.label(format!("User: {}", editor.user()));
    });

    events
}
