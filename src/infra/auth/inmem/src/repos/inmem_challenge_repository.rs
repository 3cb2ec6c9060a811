// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use crate::domain::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// All operations run under a single lock, so issuance, lookup and
/// consumption are each atomic
pub struct InMemoryChallengeRepository {
    state: Arc<Mutex<State>>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Default)]
struct State {
    challenges_by_nonce: HashMap<ChallengeNonce, Challenge>,
    // Nonces in issuance order
    nonces_by_address: HashMap<WalletAddress, Vec<ChallengeNonce>>,
}

impl State {
    fn remove(&mut self, nonce: &ChallengeNonce) -> bool {
        let Some(challenge) = self.challenges_by_nonce.remove(nonce) else {
            return false;
        };

        if let Some(nonces) = self.nonces_by_address.get_mut(&challenge.claimed_address) {
            nonces.retain(|n| n != nonce);
            if nonces.is_empty() {
                self.nonces_by_address.remove(&challenge.claimed_address);
            }
        }

        true
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl InMemoryChallengeRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
        }
    }
}

impl Default for InMemoryChallengeRepository {
    fn default() -> Self {
        Self::new()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl ChallengeRepository for InMemoryChallengeRepository {
    async fn save_challenge(&self, challenge: &Challenge) -> Result<(), SaveChallengeError> {
        let mut guard = self.state.lock().unwrap();
        if guard.challenges_by_nonce.contains_key(&challenge.nonce) {
            return Err(SaveChallengeError::DuplicateNonce {
                nonce: challenge.nonce.clone(),
            });
        }

        guard
            .challenges_by_nonce
            .insert(challenge.nonce.clone(), challenge.clone());
        guard
            .nonces_by_address
            .entry(challenge.claimed_address.clone())
            .or_default()
            .push(challenge.nonce.clone());

        Ok(())
    }

    async fn find_live_challenges(
        &self,
        claimed_address: &WalletAddress,
        now: DateTime<Utc>,
    ) -> Result<Vec<Challenge>, FindLiveChallengesError> {
        let guard = self.state.lock().unwrap();
        let Some(nonces) = guard.nonces_by_address.get(claimed_address) else {
            return Ok(vec![]);
        };

        Ok(nonces
            .iter()
            .filter_map(|nonce| guard.challenges_by_nonce.get(nonce))
            .filter(|challenge| challenge.is_live(now))
            .cloned()
            .collect())
    }

    async fn consume_challenge(
        &self,
        nonce: &ChallengeNonce,
    ) -> Result<bool, ConsumeChallengeError> {
        let mut guard = self.state.lock().unwrap();
        Ok(guard.remove(nonce))
    }

    async fn cleanup_expired_challenges(
        &self,
        now: DateTime<Utc>,
    ) -> Result<usize, CleanupExpiredChallengesError> {
        let mut guard = self.state.lock().unwrap();

        let expired_nonces: Vec<_> = guard
            .challenges_by_nonce
            .values()
            .filter(|challenge| !challenge.is_live(now))
            .map(|challenge| challenge.nonce.clone())
            .collect();

        for nonce in &expired_nonces {
            guard.remove(nonce);
        }

        Ok(expired_nonces.len())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
