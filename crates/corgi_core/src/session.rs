/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use corgi_protocol::Account;
use std::sync::{PoisonError, RwLock};

/// Who is signed in, if anyone. Shared between every controller of a view.
#[derive(Default)]
pub struct Session {
    current: RwLock<Option<Account>>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(account: Account) -> Self {
        Self {
            current: RwLock::new(Some(account)),
        }
    }

    pub fn sign_in(&self, account: Account) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(account);
    }

    pub fn sign_out(&self) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn current_account_id(&self) -> Option<String> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|a| a.id.clone())
    }
}
