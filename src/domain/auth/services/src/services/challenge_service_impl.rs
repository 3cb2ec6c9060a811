// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use chrono::Duration;
use internal_error::{ErrorIntoInternal, InternalError, ResultIntoInternal};
use siwa_auth::{
    Challenge,
    ChallengeNonce,
    ChallengeRepository,
    ChallengeService,
    SaveChallengeError,
    WalletAddress,
    WalletAuthConfig,
};
use time_source::SystemTimeSource;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ChallengeServiceImpl {
    challenge_repo: Arc<dyn ChallengeRepository>,
    time_source: Arc<dyn SystemTimeSource>,
    challenge_ttl: Duration,
}

impl ChallengeServiceImpl {
    pub fn new(
        challenge_repo: Arc<dyn ChallengeRepository>,
        time_source: Arc<dyn SystemTimeSource>,
        config: &WalletAuthConfig,
    ) -> Self {
        Self {
            challenge_repo,
            time_source,
            challenge_ttl: config.challenge_ttl,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl ChallengeService for ChallengeServiceImpl {
    #[tracing::instrument(level = "debug", skip_all, fields(%claimed_address))]
    async fn issue(&self, claimed_address: &WalletAddress) -> Result<Challenge, InternalError> {
        let challenge = Challenge::new(
            claimed_address.clone(),
            self.time_source.now(),
            self.challenge_ttl,
        )?;

        match self.challenge_repo.save_challenge(&challenge).await {
            Ok(()) => {}
            Err(e @ SaveChallengeError::DuplicateNonce { .. }) => return Err(e.int_err()),
            Err(SaveChallengeError::Internal(e)) => return Err(e),
        }

        tracing::debug!(
            nonce = %challenge.nonce,
            expires_at = %challenge.expires_at,
            "Challenge issued"
        );

        Ok(challenge)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(%claimed_address))]
    async fn find_live(
        &self,
        claimed_address: &WalletAddress,
    ) -> Result<Vec<Challenge>, InternalError> {
        self.challenge_repo
            .find_live_challenges(claimed_address, self.time_source.now())
            .await
            .int_err()
    }

    #[tracing::instrument(level = "debug", skip_all, fields(%nonce))]
    async fn consume(&self, nonce: &ChallengeNonce) -> Result<bool, InternalError> {
        let consumed = self.challenge_repo.consume_challenge(nonce).await.int_err()?;

        tracing::debug!(consumed, "Challenge consumption attempted");

        Ok(consumed)
    }

    #[tracing::instrument(level = "debug", skip_all)]
    async fn evict_expired(&self) -> Result<usize, InternalError> {
        let evicted = self
            .challenge_repo
            .cleanup_expired_challenges(self.time_source.now())
            .await
            .int_err()?;

        if evicted > 0 {
            tracing::info!(evicted, "Expired challenges evicted");
        }

        Ok(evicted)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
