// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! This module defines the request and response data structures used by
//! the REST API. All types derive `Serialize`/`Deserialize` and `ToSchema`
//! for JSON handling and OpenAPI documentation. Field names are camelCase
//! on the wire.
//!
//! ## Model Categories
//!
//! - **Projects**: Token sale schedule and vesting plan
//! - **Signing**: Registration / participation signature requests
//! - **Status**: Service metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Project Models
// =============================================================================

/// A token sale project with its registration, sale and vesting schedule.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Auto-assigned identifier (starts at 1).
    pub id: u64,
    /// Start of the token sale.
    pub sale_start: DateTime<Utc>,
    /// End of the token sale.
    pub sale_end: DateTime<Utc>,
    /// End of the registration window.
    pub registration_time_ends: DateTime<Utc>,
    /// Start of the registration window.
    pub registration_time_starts: DateTime<Utc>,
    /// When the record was created (set by the server).
    pub create_time: DateTime<Utc>,
    /// When the record was last modified (set by the server).
    pub update_time: DateTime<Utc>,
    /// Token generation event.
    pub tge: DateTime<Utc>,
    /// Initial unlock time of the vesting schedule.
    pub unlock_time: DateTime<Utc>,
    /// Unlock time (unix seconds) of each vesting portion.
    pub vesting_portions_unlock_time: Vec<u64>,
    /// Percentage released with each vesting portion; fractions allowed.
    pub vesting_percent_per_portion: Vec<f64>,
}

/// Request to create a project.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub sale_start: DateTime<Utc>,
    pub sale_end: DateTime<Utc>,
    pub registration_time_ends: DateTime<Utc>,
    pub registration_time_starts: DateTime<Utc>,
    pub tge: DateTime<Utc>,
    pub unlock_time: DateTime<Utc>,
    #[serde(default)]
    pub vesting_portions_unlock_time: Vec<u64>,
    #[serde(default)]
    pub vesting_percent_per_portion: Vec<f64>,
}

/// Partial update of a project. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProjectRequest {
    pub sale_start: Option<DateTime<Utc>>,
    pub sale_end: Option<DateTime<Utc>>,
    pub registration_time_ends: Option<DateTime<Utc>>,
    pub registration_time_starts: Option<DateTime<Utc>>,
    pub tge: Option<DateTime<Utc>>,
    pub unlock_time: Option<DateTime<Utc>>,
    pub vesting_portions_unlock_time: Option<Vec<u64>>,
    pub vesting_percent_per_portion: Option<Vec<f64>>,
}

impl UpdateProjectRequest {
    /// Copy every present field onto `project`.
    pub fn apply_to(self, project: &mut Project) {
        if let Some(v) = self.sale_start {
            project.sale_start = v;
        }
        if let Some(v) = self.sale_end {
            project.sale_end = v;
        }
        if let Some(v) = self.registration_time_ends {
            project.registration_time_ends = v;
        }
        if let Some(v) = self.registration_time_starts {
            project.registration_time_starts = v;
        }
        if let Some(v) = self.tge {
            project.tge = v;
        }
        if let Some(v) = self.unlock_time {
            project.unlock_time = v;
        }
        if let Some(v) = self.vesting_portions_unlock_time {
            project.vesting_portions_unlock_time = v;
        }
        if let Some(v) = self.vesting_percent_per_portion {
            project.vesting_percent_per_portion = v;
        }
    }
}

/// Response to a create or update.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectMutationResponse {
    pub message: String,
    pub data: Project,
}

// =============================================================================
// Signing Models
// =============================================================================

/// Request to sign a registration. Both addresses are required.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationRequest {
    #[schema(example = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed")]
    pub user_address: Option<String>,
    #[schema(example = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359")]
    pub contract_address: Option<String>,
}

/// Request to sign a participation. All fields are required.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ParticipationRequest {
    pub user_address: Option<String>,
    /// Base-10 integer amount in the token's smallest unit.
    #[schema(example = "1000000000000000000")]
    pub amount: Option<String>,
    pub contract_address: Option<String>,
}

/// Signature issued by the service key.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SignatureResponse {
    /// `0x`-prefixed 65-byte signature.
    pub signature: String,
    /// Checksummed address of the service key.
    pub signer_address: String,
}

/// Request to check a signature against an address.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct VerifySignatureRequest {
    pub message: Option<String>,
    pub signature: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct VerifySignatureResponse {
    pub valid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AddressResponse {
    pub address: String,
}

// =============================================================================
// Status
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub message: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}
