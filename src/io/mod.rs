// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - scene import and report export

mod report;
mod scene;

pub use report::{read_report, report_to_json, write_report};
pub use scene::{import_scene, parse_scene, Scene, SceneMesh};
