// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Project Storage
//!
//! Projects live in an embedded redb database (`horizon.redb` under the
//! data directory).
//!
//! ## Table Layout
//!
//! - `projects`: id → JSON row
//! - `project_timeline`: (inverted create time, inverted id) → id, so a
//!   forward scan yields newest projects first
//! - `meta`: counters such as `next_project_id`

pub mod codec;
pub mod projects;

pub use projects::{ProjectDatabase, ProjectDbError, ProjectDbResult, DATABASE_FILE};
