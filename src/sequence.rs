// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Frame sequence management.
//!
//! This module owns the ordered list of frame images for a session and
//! the current position in it. Ordering is an explicit lexicographic
//! sort by file name, so the editable sequence does not depend on the
//! order the filesystem happens to enumerate entries in.

use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// The ordered frame list and current index.
#[derive(Debug, Clone)]
pub struct FrameSequence {
    files: Vec<PathBuf>,
    index: usize,
}

impl FrameSequence {
    /// Enumerate the frame images in `dir`, sorted by file name. A
    /// missing or empty directory yields an empty sequence ("nothing to
    /// annotate"), not an error.
    pub fn scan(dir: &Path) -> Self {
        let mut files: Vec<PathBuf> = match std::fs::read_dir(dir) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| is_image_file(p))
                .collect(),
            Err(err) => {
                log::warn!("Cannot read frame directory {}: {}", dir.display(), err);
                Vec::new()
            }
        };
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Self { files, index: 0 }
    }

    /// Path of the current frame, or `None` when the index has run past
    /// the end of the sequence.
    pub fn current(&self) -> Option<&Path> {
        self.files.get(self.index).map(|p| p.as_path())
    }

    /// File name of the current frame.
    pub fn current_name(&self) -> Option<String> {
        self.current()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
    }

    /// Shift the index by `direction`. Retreating before the first frame
    /// clamps to 0; advancing past the last frame is allowed and leaves
    /// `current()` returning `None`.
    pub fn shift(&mut self, direction: i32) {
        if direction < 0 {
            self.index = self.index.saturating_sub(direction.unsigned_abs() as usize);
        } else {
            self.index = self.index.saturating_add(direction as usize);
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.iter().any(|x| e.eq_ignore_ascii_case(x)))
        .unwrap_or(false)
}
