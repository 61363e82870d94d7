// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for the boxer application.

pub mod annotation;
pub mod config;
