// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Append-only annotation log.
//!
//! Each saved annotation becomes one space-separated line:
//!
//! ```text
//! <frame-stem> <class> <x1> <y1> <x2> <y2> <YYYY-MM-DD HH:MM:SS> <user>
//! ```
//!
//! Coordinates are written in original image pixels. The file is created
//! if absent and only ever appended to, never rewritten.

use crate::models::annotation::Annotation;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writer for the append-only annotation log file.
#[derive(Debug, Clone)]
pub struct AnnotationLog {
    path: PathBuf,
}

impl AnnotationLog {
    /// Open the log at `path`, creating an empty file if none exists.
    pub fn open(path: PathBuf) -> Result<Self> {
        OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .with_context(|| format!("Failed to open annotation log {}", path.display()))?;
        Ok(Self { path })
    }

    /// Append one line per annotation. Nothing is written for an empty
    /// slice. On error the file may hold a prefix of the records; the
    /// caller must not treat the batch as saved.
    pub fn append(&self, annotations: &[Annotation]) -> Result<()> {
        if annotations.is_empty() {
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open annotation log {}", self.path.display()))?;

        for annotation in annotations {
            writeln!(file, "{}", format_record(annotation))
                .with_context(|| format!("Failed to append to {}", self.path.display()))?;
        }
        file.flush()?;

        log::info!(
            "Appended {} annotation(s) to {}",
            annotations.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Format one annotation as a log line (without the trailing newline).
/// Integral coordinates print without a fractional part.
pub fn format_record(annotation: &Annotation) -> String {
    let stem = Path::new(&annotation.frame)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| annotation.frame.clone());
    format!(
        "{} {} {} {} {} {} {} {}",
        stem,
        annotation.class,
        annotation.rect.x1,
        annotation.rect.y1,
        annotation.rect.x2,
        annotation.rect.y2,
        annotation.timestamp,
        annotation.user,
    )
}
