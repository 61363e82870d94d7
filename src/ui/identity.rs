// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Identity prompt shown before the session starts.

/// Display the user-selection window. Returns the chosen user name once
/// confirmed; unrecognized input is resolved by the session config.
pub fn show(ctx: &egui::Context, users: &[String], selected: &mut usize) -> Option<String> {
    let mut chosen = None;

    egui::Window::new("Who is annotating?")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            let current = users.get(*selected).cloned().unwrap_or_default();
            egui::ComboBox::from_label("User")
                .selected_text(&current)
                .show_ui(ui, |ui| {
                    for (i, user) in users.iter().enumerate() {
                        ui.selectable_value(selected, i, user.as_str());
                    }
                });

            ui.add_space(8.0);
            if ui.button("Start annotating").clicked() {
                chosen = Some(users.get(*selected).cloned().unwrap_or_default());
            }
        });

    chosen
}
