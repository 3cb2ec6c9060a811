// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use internal_error::InternalError;
use thiserror::Error;

use crate::{Challenge, ChallengeNonce, WalletAddress};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Storage of outstanding challenges. Every operation is atomic with respect
/// to the others.
#[async_trait::async_trait]
pub trait ChallengeRepository: Send + Sync {
    async fn save_challenge(&self, challenge: &Challenge) -> Result<(), SaveChallengeError>;

    /// Challenges of the address that are still live at `now`, oldest first
    async fn find_live_challenges(
        &self,
        claimed_address: &WalletAddress,
        now: DateTime<Utc>,
    ) -> Result<Vec<Challenge>, FindLiveChallengesError>;

    /// Removes the challenge. Returns `true` only for the call that actually
    /// removed it.
    async fn consume_challenge(&self, nonce: &ChallengeNonce)
    -> Result<bool, ConsumeChallengeError>;

    /// Returns the number of evicted challenges
    async fn cleanup_expired_challenges(
        &self,
        now: DateTime<Utc>,
    ) -> Result<usize, CleanupExpiredChallengesError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum SaveChallengeError {
    #[error("Challenge with nonce '{nonce}' already exists")]
    DuplicateNonce { nonce: ChallengeNonce },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum FindLiveChallengesError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum ConsumeChallengeError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum CleanupExpiredChallengesError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
