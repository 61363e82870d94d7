// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Session configuration files.
//!
//! This module loads the session configuration from YAML or JSON,
//! chosen by file extension.

use crate::models::config::SessionConfig;
use anyhow::{bail, Result};
use std::path::Path;

/// Load a session configuration from a YAML or JSON file.
pub fn load_config(path: &Path) -> Result<SessionConfig> {
    let extension = path.extension().and_then(|s| s.to_str());
    match extension {
        Some("yaml") | Some("yml") => {
            let yaml = std::fs::read_to_string(path)?;
            Ok(serde_yaml::from_str(&yaml)?)
        }
        Some("json") => {
            let json = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&json)?)
        }
        _ => bail!("Unsupported config extension: {:?}", extension),
    }
}
