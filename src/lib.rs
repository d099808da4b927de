// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Horizon Server - Token Sale Backend
//!
//! Stores token sale projects and issues owner-key signatures that the sale
//! contracts check for registration and participation.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers and middleware (Axum)
//! - `blockchain` - Address/amount codecs, message signing and verification
//! - `exceptions` - Closed set of domain error codes
//! - `pagination` - Page parameters and page metadata
//! - `storage` - Embedded project database (redb)

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod exceptions;
pub mod models;
pub mod pagination;
pub mod state;
pub mod storage;
pub mod telemetry;
