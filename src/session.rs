// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation session.
//!
//! Composition root for the headless core: owns the frame sequence, the
//! annotation editor, and the log writer, and implements the
//! save-then-advance workflow. The UI layer drives a `Session` and
//! renders its state; nothing in here touches a toolkit.

use crate::editor::AnnotationEditor;
use crate::io::log::AnnotationLog;
use crate::io::media;
use crate::models::config::SessionConfig;
use crate::sequence::FrameSequence;
use anyhow::Result;
use std::path::PathBuf;

/// Whether the session is still editing or has reached its normal end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Active,
    Finished,
}

/// One operator's annotation session over a frame directory.
pub struct Session {
    config: SessionConfig,
    sequence: FrameSequence,
    editor: AnnotationEditor,
    log: AnnotationLog,
    status: SessionStatus,
}

impl Session {
    /// Start a session for the given configuration and user input. The
    /// log file is created if absent and the first frame is loaded; an
    /// empty frame directory produces an already-finished session.
    pub fn start(config: SessionConfig, user_input: Option<&str>) -> Result<Self> {
        let user = config.resolve_user(user_input);
        let sequence = FrameSequence::scan(&config.image_dir);
        if sequence.is_empty() {
            log::warn!("No frames to annotate in {}", config.image_dir.display());
        }
        let log = AnnotationLog::open(config.log_path.clone())?;
        log::info!(
            "Session for {} over {} frame(s) in {}",
            user,
            sequence.len(),
            config.image_dir.display()
        );

        let mut session = Self {
            config,
            sequence,
            editor: AnnotationEditor::new(user),
            log,
            status: SessionStatus::Active,
        };
        session.load_current()?;
        Ok(session)
    }

    /// Resolve the current index to a frame. Running past the end of the
    /// sequence finishes the session; this is the normal termination
    /// path, not an error. On success the editor is reset for the new
    /// frame (zoom 1.0, empty rectangle set).
    fn load_current(&mut self) -> Result<()> {
        let Some(path) = self.sequence.current().map(PathBuf::from) else {
            log::info!("End of sequence, finishing session");
            self.status = SessionStatus::Finished;
            return Ok(());
        };

        let (width, height) = media::probe_dimensions(&path)?;
        let name = self
            .sequence
            .current_name()
            .unwrap_or_else(|| path.display().to_string());
        log::info!("Loaded frame {} ({}x{})", name, width, height);
        self.editor.load_frame(name, width, height);
        Ok(())
    }

    /// Append the pending annotations to the log. Pending is cleared
    /// only once the append has succeeded, so a failed write keeps the
    /// annotations queued for the next attempt.
    pub fn save(&mut self) -> Result<()> {
        let pending = self.editor.pending_annotations();
        if pending.is_empty() {
            return Ok(());
        }
        self.log.append(&pending)?;
        self.editor.clear_pending();
        Ok(())
    }

    /// Flush pending annotations, shift the frame index, and load the
    /// resulting frame. A failed flush aborts the navigation so nothing
    /// is lost; retreating before the first frame clamps to it.
    pub fn advance(&mut self, direction: i32) -> Result<()> {
        self.save()?;
        self.sequence.shift(direction);
        self.load_current()
    }

    /// Flush pending annotations and finish the session.
    pub fn close(&mut self) -> Result<()> {
        self.save()?;
        self.status = SessionStatus::Finished;
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.status == SessionStatus::Finished
    }

    pub fn editor(&self) -> &AnnotationEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut AnnotationEditor {
        &mut self.editor
    }

    pub fn sequence(&self) -> &FrameSequence {
        &self.sequence
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Path of the current frame image, for texture loading.
    pub fn current_frame_path(&self) -> Option<PathBuf> {
        self.sequence.current().map(PathBuf::from)
    }
}
