// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::{
    blockchain::TokenTransfer, eligibility::EligibilityChecker, records::ClaimRecordStore,
};

#[derive(Clone)]
pub struct AppState {
    pub eligibility: Arc<EligibilityChecker>,
    pub wallet: Arc<dyn TokenTransfer>,
}

impl AppState {
    pub fn new(store: Arc<dyn ClaimRecordStore>, wallet: Arc<dyn TokenTransfer>) -> Self {
        Self {
            eligibility: Arc::new(EligibilityChecker::new(store)),
            wallet,
        }
    }
}
