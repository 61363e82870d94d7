// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation summary panel.
//!
//! This module provides the side panel showing per-class rectangle
//! counters for the current frame and the rectangle list with
//! select/delete controls.

use crate::editor::AnnotationEditor;
use crate::models::annotation::ObjectClass;

/// Result of a panel interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    None,
    SelectAnnotation(u64),
    DeleteAnnotation(u64),
}

/// Display the summary panel and report the clicked action, if any.
pub fn show(ui: &mut egui::Ui, editor: &AnnotationEditor) -> PanelAction {
    let mut action = PanelAction::None;

    ui.heading("Counts");
    for class in ObjectClass::ALL {
        let count = editor.class_count(class);
        if count > 0 {
            ui.horizontal(|ui| {
                let (r, g, b) = class.color();
                ui.colored_label(
                    egui::Color32::from_rgb(r, g, b),
                    egui::RichText::new("■"),
                );
                ui.label(format!("{}: {}", class, count));
            });
        }
    }
    if editor.rectangles().is_empty() {
        ui.label(egui::RichText::new("No annotations on this frame").weak());
    }

    ui.separator();
    ui.heading("Annotations");

    egui::ScrollArea::vertical().show(ui, |ui| {
        for annotation in editor.rectangles() {
            let selected = editor.selected() == Some(annotation.id);
            ui.horizontal(|ui| {
                let label = format!(
                    "{} ({:.0},{:.0})-({:.0},{:.0})",
                    annotation.class,
                    annotation.rect.x1,
                    annotation.rect.y1,
                    annotation.rect.x2,
                    annotation.rect.y2,
                );
                if ui.selectable_label(selected, label).clicked() {
                    action = PanelAction::SelectAnnotation(annotation.id);
                }
                if ui.small_button("🗑").clicked() {
                    action = PanelAction::DeleteAnnotation(annotation.id);
                }
            });
        }
    });

    action
}
