// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for frames, the annotation log, and config files.

pub mod log;
pub mod media;
pub mod serialization;
