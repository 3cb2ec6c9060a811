// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use alloy_primitives::{B256, keccak256};
use chrono::{DateTime, SecondsFormat, Utc};
use siwa_auth::{Challenge, ChallengeNonce, WalletAddress};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Prefix wallets put in front of a message before hashing it for
/// `personal_sign` (EIP-191, version 0x45)
pub const EIP191_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Canonical text of a challenge and the exact digest a wallet signs for it.
///
/// Rendering is a pure function of its inputs, so the digest can always be
/// recomputed from a stored challenge.
#[derive(Debug, Clone)]
pub struct ChallengeMessageCodec {
    service_name: String,
}

impl ChallengeMessageCodec {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }

    pub fn render(
        &self,
        nonce: &ChallengeNonce,
        address: &WalletAddress,
        issued_at: DateTime<Utc>,
    ) -> String {
        format!(
            "Sign in to {}\n\nNonce: {nonce}\nAddress: {address}\nTimestamp: {}",
            self.service_name,
            issued_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        )
    }

    pub fn render_challenge(&self, challenge: &Challenge) -> String {
        self.render(
            &challenge.nonce,
            &challenge.claimed_address,
            challenge.issued_at,
        )
    }

    /// `keccak256(prefix ++ decimal(len(message)) ++ message)`, where the
    /// length is counted in bytes
    pub fn digest(message: &str) -> B256 {
        let length = message.len().to_string();

        let mut payload =
            Vec::with_capacity(EIP191_MESSAGE_PREFIX.len() + length.len() + message.len());
        payload.extend_from_slice(EIP191_MESSAGE_PREFIX.as_bytes());
        payload.extend_from_slice(length.as_bytes());
        payload.extend_from_slice(message.as_bytes());

        keccak256(&payload)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
