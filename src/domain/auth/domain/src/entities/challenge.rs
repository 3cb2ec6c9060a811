// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use internal_error::InternalError;
use serde::Serialize;

use crate::WalletAddress;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_CHALLENGE_TTL_SECS: u64 = 300;

/// Amount of random bytes behind a nonce
pub const CHALLENGE_NONCE_BYTES: usize = 16;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ChallengeNonce(String);

impl ChallengeNonce {
    pub fn new_random() -> Self {
        Self(random_strings::get_random_hex_bytes(CHALLENGE_NONCE_BYTES))
    }

    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChallengeNonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// A single-use proof request bound to one claimed address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub nonce: ChallengeNonce,
    pub claimed_address: WalletAddress,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Challenge {
    /// Issue time is truncated to whole seconds, the precision of the
    /// rendered message
    pub fn new(
        claimed_address: WalletAddress,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, InternalError> {
        let issued_at = now.trunc_subsecs(0);
        let Some(expires_at) = issued_at.checked_add_signed(ttl) else {
            return InternalError::bail(format!("Challenge TTL {ttl} overflows the expiry time"));
        };

        Ok(Self {
            nonce: ChallengeNonce::new_random(),
            claimed_address,
            issued_at,
            expires_at,
        })
    }

    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
