// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Text encoding of numeric sequences stored inside a project row.
//!
//! Vesting schedules are persisted as JSON array text. Decoding is lenient:
//! blank or unparseable text yields an empty schedule.

use serde::{de::DeserializeOwned, Serialize};

pub fn encode_list<T: Serialize>(values: &[T]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

pub fn decode_list<T: DeserializeOwned>(text: &str) -> Vec<T> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str(text) {
        Ok(values) => values,
        Err(e) => {
            tracing::warn!(error = %e, "Malformed numeric list in project row, using empty list");
            Vec::new()
        }
    }
}
