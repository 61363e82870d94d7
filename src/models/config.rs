// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Session configuration.
//!
//! This module defines the immutable configuration injected into a
//! session at startup: where the frames live, where the annotation log
//! goes, and which users may annotate.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete configuration for an annotation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory containing the frame images.
    pub image_dir: PathBuf,
    /// Append-only annotation log file.
    pub log_path: PathBuf,
    /// Known annotators. The first entry is the default identity.
    #[serde(default = "default_users")]
    pub users: Vec<String>,
}

fn default_users() -> Vec<String> {
    [
        "Chloé", "Lucie", "Corentin", "Mathis", "Julien", "Aina", "Cédric", "Philipe", "Carl",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl SessionConfig {
    /// Create a configuration for the given frame directory, with the
    /// log file placed next to it and the default user list.
    pub fn for_image_dir(image_dir: PathBuf) -> Self {
        let log_path = image_dir.join("annotations.txt");
        Self {
            image_dir,
            log_path,
            users: default_users(),
        }
    }

    /// Resolve the active user name. Absent or unrecognized input falls
    /// back to the first configured user.
    pub fn resolve_user(&self, input: Option<&str>) -> String {
        match input {
            Some(name) if self.users.iter().any(|u| u == name) => name.to_string(),
            _ => self.users.first().cloned().unwrap_or_default(),
        }
    }
}
