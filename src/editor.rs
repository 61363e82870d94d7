// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation editor state machine.
//!
//! This module owns the rectangle set for the current frame, the zoom
//! transform, and the pointer gesture state machine. It is driven by an
//! explicit [`PointerEvent`] type so the editing logic stays independent
//! of the UI toolkit delivering the events.
//!
//! All rectangle geometry is stored in original image pixels; the zoomed
//! display-space coordinates are derived on every paint and never stored.

use crate::models::annotation::{Annotation, BoxRect, ObjectClass, Point};
use crate::util::geometry;

const ZOOM_MIN: f64 = 0.1;
const ZOOM_MAX: f64 = 5.0;
const ZOOM_IN_FACTOR: f64 = 1.2;
const ZOOM_OUT_FACTOR: f64 = 0.8;

/// Scroll direction for zoom events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    In,
    Out,
}

/// A pointer event in device (zoomed, on-screen) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press(Point),
    Move(Point),
    Release(Point),
    Scroll(Point, ScrollDirection),
}

/// In-flight gesture between a press and the matching release.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    /// Pressed on empty canvas; a new rectangle materializes on release.
    Drawing { start: Point },
    /// Moving an existing rectangle. `last` is the previous pointer
    /// position in original coordinates, for per-move deltas.
    Dragging { id: u64, last: Point },
    /// Tracking the second corner of an existing rectangle; the first
    /// corner stays pinned.
    Resizing { id: u64 },
}

/// Editor for the rectangles of a single frame.
pub struct AnnotationEditor {
    rectangles: Vec<Annotation>,
    /// Ids of rectangles created since the last successful save.
    pending: Vec<u64>,
    selected: Option<u64>,
    gesture: Gesture,
    zoom: f64,
    zoom_center: Point,
    frame_name: String,
    frame_width: f64,
    frame_height: f64,
    next_id: u64,
    user: String,
    current_class: ObjectClass,
}

impl AnnotationEditor {
    pub fn new(user: String) -> Self {
        Self {
            rectangles: Vec::new(),
            pending: Vec::new(),
            selected: None,
            gesture: Gesture::Idle,
            zoom: 1.0,
            zoom_center: Point::new(0.0, 0.0),
            frame_name: String::new(),
            frame_width: 0.0,
            frame_height: 0.0,
            next_id: 0,
            user,
            current_class: ObjectClass::Car,
        }
    }

    /// Switch to a new frame: reset zoom, drop all rectangles and any
    /// in-flight gesture. Pending annotations must have been flushed by
    /// the caller beforehand.
    pub fn load_frame(&mut self, name: String, width: u32, height: u32) {
        self.frame_name = name;
        self.frame_width = width as f64;
        self.frame_height = height as f64;
        self.rectangles.clear();
        self.pending.clear();
        self.selected = None;
        self.gesture = Gesture::Idle;
        self.reset_zoom();
    }

    /// Dispatch a pointer event through the gesture state machine.
    pub fn handle(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Press(pos) => self.on_press(pos),
            PointerEvent::Move(pos) => self.on_move(pos),
            PointerEvent::Release(pos) => self.on_release(pos),
            PointerEvent::Scroll(pos, direction) => self.zoom_at(pos, direction),
        }
    }

    fn on_press(&mut self, device: Point) {
        let pos = geometry::to_original(device, self.zoom);

        if let Some(id) = self.find_rectangle(pos) {
            self.selected = Some(id);
            let on_handle = self
                .rectangles
                .iter()
                .find(|a| a.id == id)
                .is_some_and(|a| a.rect.on_handle(pos, geometry::handle_extent(self.zoom)));

            self.gesture = if on_handle {
                Gesture::Resizing { id }
            } else {
                Gesture::Dragging { id, last: pos }
            };
        } else {
            self.selected = None;
            self.gesture = Gesture::Drawing { start: pos };
        }
    }

    fn on_move(&mut self, device: Point) {
        let pos = geometry::to_original(device, self.zoom);
        let (width, height) = (self.frame_width, self.frame_height);

        match self.gesture {
            Gesture::Dragging { id, last } => {
                let (dx, dy) = (pos.x - last.x, pos.y - last.y);
                if let Some(ann) = self.rectangles.iter_mut().find(|a| a.id == id) {
                    ann.rect.translate(dx, dy);
                    ann.rect.clamp(width, height);
                }
                self.gesture = Gesture::Dragging { id, last: pos };
            }
            Gesture::Resizing { id } => {
                if let Some(ann) = self.rectangles.iter_mut().find(|a| a.id == id) {
                    ann.rect.x2 = pos.x;
                    ann.rect.y2 = pos.y;
                    ann.rect.clamp(width, height);
                }
            }
            // The nascent rectangle only materializes on release.
            Gesture::Drawing { .. } | Gesture::Idle => {}
        }
    }

    fn on_release(&mut self, device: Point) {
        let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);

        if let Gesture::Drawing { start } = gesture {
            let first = geometry::clamp_point(start, self.frame_width, self.frame_height);
            let second = geometry::clamp_point(
                geometry::to_original(device, self.zoom),
                self.frame_width,
                self.frame_height,
            );

            let annotation = Annotation {
                id: self.next_id,
                class: self.current_class,
                rect: BoxRect::from_corners(first, second),
                timestamp: timestamp_now(),
                user: self.user.clone(),
                frame: self.frame_name.clone(),
            };
            self.next_id += 1;

            self.pending.push(annotation.id);
            self.rectangles.push(annotation);
            log::info!(
                "Created annotation, total on frame: {}",
                self.rectangles.len()
            );
        }
        // Releases ending a drag or resize edit an existing rectangle;
        // they never create a new one.
    }

    /// Find the topmost rectangle under the given original-space point,
    /// most recently created first.
    fn find_rectangle(&self, pos: Point) -> Option<u64> {
        let tolerance = geometry::hit_tolerance(self.zoom);
        self.rectangles
            .iter()
            .rev()
            .find(|a| a.rect.contains(pos, tolerance))
            .map(|a| a.id)
    }

    /// Apply a zoom step centered on the pointer. Steps that would leave
    /// the allowed zoom range are ignored.
    pub fn zoom_at(&mut self, device: Point, direction: ScrollDirection) {
        let factor = match direction {
            ScrollDirection::In => ZOOM_IN_FACTOR,
            ScrollDirection::Out => ZOOM_OUT_FACTOR,
        };
        let new_zoom = self.zoom * factor;
        if (ZOOM_MIN..=ZOOM_MAX).contains(&new_zoom) {
            // Original-space point under the pointer at zoom time.
            self.zoom_center = geometry::to_original(device, self.zoom);
            self.zoom = new_zoom;
            log::debug!(
                "Zoom {:.2} centered at ({:.1}, {:.1})",
                self.zoom,
                self.zoom_center.x,
                self.zoom_center.y
            );
        }
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
        self.zoom_center = Point::new(self.frame_width / 2.0, self.frame_height / 2.0);
    }

    /// Display-space rectangle for the current zoom.
    pub fn display_rect(&self, annotation: &Annotation) -> BoxRect {
        annotation.rect.scaled(self.zoom)
    }

    /// Delete the currently selected rectangle. No-op without a selection.
    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected.take() {
            self.remove(id);
        }
    }

    /// Delete the most recently created rectangle. No-op when empty.
    pub fn delete_last(&mut self) {
        if let Some(id) = self.rectangles.last().map(|a| a.id) {
            if self.selected == Some(id) {
                self.selected = None;
            }
            self.remove(id);
        }
    }

    fn remove(&mut self, id: u64) {
        self.rectangles.retain(|a| a.id != id);
        self.pending.retain(|p| *p != id);
    }

    /// Select a rectangle by id (panel click-through). Unknown ids clear
    /// the selection.
    pub fn select(&mut self, id: Option<u64>) {
        self.selected = id.filter(|id| self.rectangles.iter().any(|a| a.id == *id));
    }

    /// Snapshot of the not-yet-saved annotations, in creation order.
    pub fn pending_annotations(&self) -> Vec<Annotation> {
        self.rectangles
            .iter()
            .filter(|a| self.pending.contains(&a.id))
            .cloned()
            .collect()
    }

    /// Forget the pending set. Called only after a confirmed log append.
    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn rectangles(&self) -> &[Annotation] {
        &self.rectangles
    }

    pub fn selected(&self) -> Option<u64> {
        self.selected
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn current_class(&self) -> ObjectClass {
        self.current_class
    }

    pub fn set_current_class(&mut self, class: ObjectClass) {
        self.current_class = class;
    }

    pub fn frame_name(&self) -> &str {
        &self.frame_name
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Number of rectangles of the given class on the current frame.
    pub fn class_count(&self, class: ObjectClass) -> usize {
        self.rectangles.iter().filter(|a| a.class == class).count()
    }
}

fn timestamp_now() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> AnnotationEditor {
        let mut editor = AnnotationEditor::new("Lucie".to_string());
        editor.load_frame("000001.png".to_string(), 100, 80);
        editor
    }

    fn draw(editor: &mut AnnotationEditor, x1: f64, y1: f64, x2: f64, y2: f64) {
        editor.handle(PointerEvent::Press(Point::new(x1, y1)));
        editor.handle(PointerEvent::Release(Point::new(x2, y2)));
    }

    #[test]
    fn test_release_creates_annotation() {
        let mut editor = editor();
        editor.set_current_class(ObjectClass::Pedestrian);
        draw(&mut editor, 20.0, 20.0, 80.0, 60.0);

        assert_eq!(editor.rectangles().len(), 1);
        let ann = &editor.rectangles()[0];
        assert_eq!(ann.rect, BoxRect::new(20.0, 20.0, 80.0, 60.0));
        assert_eq!(ann.class, ObjectClass::Pedestrian);
        assert_eq!(ann.user, "Lucie");
        assert_eq!(ann.frame, "000001.png");
        assert_eq!(editor.pending_annotations().len(), 1);
    }

    #[test]
    fn test_press_converts_device_to_original() {
        let mut editor = editor();
        editor.zoom_at(Point::new(0.0, 0.0), ScrollDirection::In);
        assert_eq!(editor.zoom(), 1.2);

        // Device (24, 24)-(96, 72) is original (20, 20)-(80, 60).
        draw(&mut editor, 24.0, 24.0, 96.0, 72.0);
        let rect = editor.rectangles()[0].rect;
        assert!((rect.x1 - 20.0).abs() < 1e-9);
        assert!((rect.y2 - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_display_coords_are_original_times_zoom() {
        let mut editor = editor();
        draw(&mut editor, 10.0, 10.0, 50.0, 80.0);
        editor.zoom_at(Point::new(0.0, 0.0), ScrollDirection::In);

        let ann = editor.rectangles()[0].clone();
        let display = editor.display_rect(&ann);
        assert_eq!(display, ann.rect.scaled(editor.zoom()));
    }

    #[test]
    fn test_zoom_roundtrip_keeps_original_coords() {
        let mut editor = editor();
        draw(&mut editor, 10.0, 10.0, 50.0, 80.0);
        let before = editor.rectangles()[0].rect;

        editor.zoom_at(Point::new(30.0, 30.0), ScrollDirection::In);
        editor.zoom_at(Point::new(30.0, 30.0), ScrollDirection::In);
        editor.reset_zoom();

        assert_eq!(editor.zoom(), 1.0);
        assert_eq!(editor.rectangles()[0].rect, before);
    }

    #[test]
    fn test_reset_zoom_is_idempotent() {
        let mut editor = editor();
        editor.zoom_at(Point::new(0.0, 0.0), ScrollDirection::Out);
        editor.reset_zoom();
        let once = (editor.zoom, editor.zoom_center);
        editor.reset_zoom();
        assert_eq!((editor.zoom, editor.zoom_center), once);
        assert_eq!(editor.zoom(), 1.0);
    }

    #[test]
    fn test_zoom_rejects_out_of_range_steps() {
        let mut editor = editor();
        for _ in 0..20 {
            editor.zoom_at(Point::new(0.0, 0.0), ScrollDirection::In);
        }
        assert!(editor.zoom() <= 5.0);
        let capped = editor.zoom();
        editor.zoom_at(Point::new(0.0, 0.0), ScrollDirection::In);
        assert_eq!(editor.zoom(), capped);

        let mut editor = self::editor();
        for _ in 0..20 {
            editor.zoom_at(Point::new(0.0, 0.0), ScrollDirection::Out);
        }
        assert!(editor.zoom() >= 0.1);
    }

    #[test]
    fn test_zoom_records_center_under_pointer() {
        let mut editor = editor();
        editor.zoom_at(Point::new(50.0, 40.0), ScrollDirection::In);
        // At zoom 1.0 the device point is the original point.
        assert_eq!(editor.zoom_center, Point::new(50.0, 40.0));

        editor.zoom_at(Point::new(60.0, 48.0), ScrollDirection::In);
        // Converted with the pre-step zoom of 1.2.
        let center = editor.zoom_center;
        assert!((center.x - 50.0).abs() < 1e-9);
        assert!((center.y - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_drag_translates_and_clamps() {
        let mut editor = editor();
        draw(&mut editor, 60.0, 20.0, 90.0, 50.0);

        editor.handle(PointerEvent::Press(Point::new(70.0, 30.0)));
        editor.handle(PointerEvent::Move(Point::new(130.0, 30.0)));
        editor.handle(PointerEvent::Release(Point::new(130.0, 30.0)));

        // Only one rectangle: the drag release created nothing.
        assert_eq!(editor.rectangles().len(), 1);
        let rect = editor.rectangles()[0].rect;
        // x2 would be 150, clamped to the frame width.
        assert_eq!(rect.x2, 100.0);
        assert_eq!(rect.y1, 20.0);
        assert_eq!(rect.y2, 50.0);
    }

    #[test]
    fn test_drag_uses_per_move_deltas() {
        let mut editor = editor();
        draw(&mut editor, 10.0, 10.0, 30.0, 30.0);

        editor.handle(PointerEvent::Press(Point::new(20.0, 20.0)));
        editor.handle(PointerEvent::Move(Point::new(25.0, 20.0)));
        editor.handle(PointerEvent::Move(Point::new(30.0, 25.0)));
        editor.handle(PointerEvent::Release(Point::new(30.0, 25.0)));

        assert_eq!(
            editor.rectangles()[0].rect,
            BoxRect::new(20.0, 15.0, 40.0, 35.0)
        );
    }

    #[test]
    fn test_resize_pins_first_corner() {
        let mut editor = editor();
        draw(&mut editor, 10.0, 10.0, 50.0, 40.0);

        // Press on the handle around the second corner.
        editor.handle(PointerEvent::Press(Point::new(52.0, 42.0)));
        editor.handle(PointerEvent::Move(Point::new(70.0, 60.0)));
        editor.handle(PointerEvent::Release(Point::new(70.0, 60.0)));

        assert_eq!(editor.rectangles().len(), 1);
        assert_eq!(
            editor.rectangles()[0].rect,
            BoxRect::new(10.0, 10.0, 70.0, 60.0)
        );
    }

    #[test]
    fn test_resize_clamps_to_frame() {
        let mut editor = editor();
        draw(&mut editor, 10.0, 10.0, 50.0, 40.0);

        editor.handle(PointerEvent::Press(Point::new(50.0, 40.0)));
        editor.handle(PointerEvent::Move(Point::new(250.0, 200.0)));
        editor.handle(PointerEvent::Release(Point::new(250.0, 200.0)));

        assert_eq!(
            editor.rectangles()[0].rect,
            BoxRect::new(10.0, 10.0, 100.0, 80.0)
        );
    }

    #[test]
    fn test_overlapping_hit_selects_most_recent() {
        let mut editor = editor();
        draw(&mut editor, 10.0, 10.0, 60.0, 60.0);
        // Second rectangle starts outside the first's hit region and
        // overlaps it (corners are stored in press order).
        draw(&mut editor, 80.0, 70.0, 30.0, 30.0);
        let newest = editor.rectangles()[1].id;

        // Inside both rectangles.
        editor.handle(PointerEvent::Press(Point::new(40.0, 40.0)));
        editor.handle(PointerEvent::Release(Point::new(40.0, 40.0)));

        assert_eq!(editor.selected(), Some(newest));
        assert_eq!(editor.rectangles().len(), 2);
    }

    #[test]
    fn test_press_on_empty_canvas_clears_selection() {
        let mut editor = editor();
        draw(&mut editor, 10.0, 10.0, 30.0, 30.0);
        editor.handle(PointerEvent::Press(Point::new(20.0, 20.0)));
        editor.handle(PointerEvent::Release(Point::new(20.0, 20.0)));
        assert!(editor.selected().is_some());

        draw(&mut editor, 70.0, 60.0, 90.0, 75.0);
        assert!(editor.selected().is_none());
    }

    #[test]
    fn test_delete_with_no_selection_is_noop() {
        let mut editor = editor();
        draw(&mut editor, 10.0, 10.0, 30.0, 30.0);
        editor.delete_selected();
        assert_eq!(editor.rectangles().len(), 1);
    }

    #[test]
    fn test_delete_last_removes_from_pending_too() {
        let mut editor = editor();
        draw(&mut editor, 10.0, 10.0, 30.0, 30.0);
        draw(&mut editor, 40.0, 40.0, 60.0, 60.0);
        assert_eq!(editor.pending_annotations().len(), 2);

        editor.delete_last();
        assert_eq!(editor.rectangles().len(), 1);
        assert_eq!(editor.pending_annotations().len(), 1);
        assert_eq!(
            editor.pending_annotations()[0].rect,
            BoxRect::new(10.0, 10.0, 30.0, 30.0)
        );

        editor.delete_last();
        editor.delete_last(); // empty: no-op
        assert!(editor.rectangles().is_empty());
        assert!(!editor.has_pending());
    }

    #[test]
    fn test_pending_edits_flush_with_final_coords() {
        let mut editor = editor();
        draw(&mut editor, 10.0, 10.0, 30.0, 30.0);

        // Drag the still-pending rectangle before saving.
        editor.handle(PointerEvent::Press(Point::new(20.0, 20.0)));
        editor.handle(PointerEvent::Move(Point::new(40.0, 20.0)));
        editor.handle(PointerEvent::Release(Point::new(40.0, 20.0)));

        let pending = editor.pending_annotations();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].rect, BoxRect::new(30.0, 10.0, 50.0, 30.0));
    }

    #[test]
    fn test_editing_saved_rectangle_does_not_requeue() {
        let mut editor = editor();
        draw(&mut editor, 10.0, 10.0, 30.0, 30.0);
        editor.clear_pending();

        editor.handle(PointerEvent::Press(Point::new(20.0, 20.0)));
        editor.handle(PointerEvent::Move(Point::new(25.0, 25.0)));
        editor.handle(PointerEvent::Release(Point::new(25.0, 25.0)));

        assert!(!editor.has_pending());
        assert_eq!(editor.rectangles().len(), 1);
    }

    #[test]
    fn test_load_frame_resets_state() {
        let mut editor = editor();
        draw(&mut editor, 10.0, 10.0, 30.0, 30.0);
        editor.zoom_at(Point::new(0.0, 0.0), ScrollDirection::In);

        editor.load_frame("000002.png".to_string(), 200, 150);
        assert!(editor.rectangles().is_empty());
        assert!(!editor.has_pending());
        assert_eq!(editor.zoom(), 1.0);
        assert_eq!(editor.frame_name(), "000002.png");
    }

    #[test]
    fn test_class_counts() {
        let mut editor = editor();
        editor.set_current_class(ObjectClass::Car);
        draw(&mut editor, 10.0, 10.0, 20.0, 20.0);
        draw(&mut editor, 30.0, 30.0, 40.0, 40.0);
        editor.set_current_class(ObjectClass::Tram);
        draw(&mut editor, 50.0, 50.0, 60.0, 60.0);

        assert_eq!(editor.class_count(ObjectClass::Car), 2);
        assert_eq!(editor.class_count(ObjectClass::Tram), 1);
        assert_eq!(editor.class_count(ObjectClass::Van), 0);
    }
}
