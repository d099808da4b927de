// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::api::middleware::RateLimiter;
use crate::blockchain::MessageSigner;
use crate::storage::ProjectDatabase;

#[derive(Clone)]
pub struct AppState {
    pub projects: Arc<ProjectDatabase>,
    pub signer: Arc<MessageSigner>,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(projects: ProjectDatabase, signer: MessageSigner, rate_limiter: RateLimiter) -> Self {
        Self {
            projects: Arc::new(projects),
            signer: Arc::new(signer),
            rate_limiter: Arc::new(rate_limiter),
        }
    }
}
