// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar: class selector and session actions.
//!
//! This module provides the toolbar row with the object-class selector
//! and the navigation/save/delete/zoom buttons.

use crate::models::annotation::ObjectClass;

/// Result of a toolbar interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    Previous,
    Next,
    Save,
    DeleteSelected,
    DeleteLast,
    ResetZoom,
}

/// Display the toolbar and report the clicked action, if any.
pub fn show(ui: &mut egui::Ui, current_class: &mut ObjectClass) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Class:");
        egui::ComboBox::from_id_source("class_selector")
            .selected_text(current_class.as_str())
            .show_ui(ui, |ui| {
                for class in ObjectClass::ALL {
                    ui.selectable_value(current_class, class, class.as_str());
                }
            });

        ui.separator();

        if ui.button("◀ Previous").clicked() {
            action = ToolbarAction::Previous;
        }
        if ui.button("Next ▶").clicked() {
            action = ToolbarAction::Next;
        }

        ui.separator();

        if ui.button("Save").clicked() {
            action = ToolbarAction::Save;
        }
        if ui.button("Delete Selected").clicked() {
            action = ToolbarAction::DeleteSelected;
        }
        if ui.button("Delete Last").clicked() {
            action = ToolbarAction::DeleteLast;
        }

        ui.separator();

        if ui.button("Reset Zoom").clicked() {
            action = ToolbarAction::ResetZoom;
        }
    });

    action
}
