// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;

use crate::{Challenge, ChallengeNonce, WalletAddress};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Lifecycle of single-use challenges: issuance, lookup, consumption and
/// eviction after expiry
#[async_trait::async_trait]
pub trait ChallengeService: Send + Sync {
    /// Several live challenges of the same address may coexist
    async fn issue(&self, claimed_address: &WalletAddress) -> Result<Challenge, InternalError>;

    async fn find_live(
        &self,
        claimed_address: &WalletAddress,
    ) -> Result<Vec<Challenge>, InternalError>;

    /// No-op for unknown nonces. Returns `true` only for the caller that
    /// removed the challenge.
    async fn consume(&self, nonce: &ChallengeNonce) -> Result<bool, InternalError>;

    async fn evict_expired(&self) -> Result<usize, InternalError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
