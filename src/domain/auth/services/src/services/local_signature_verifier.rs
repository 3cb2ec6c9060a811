// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use alloy_primitives::{B256, Signature};
use siwa_auth::{
    ChallengeService,
    InvalidSignatureFormatError,
    SignatureVerifier,
    VerificationMode,
    VerifiedSigner,
    VerifySignatureError,
    VerifySignatureRequest,
    WalletAddress,
};

use crate::ChallengeMessageCodec;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const SIGNATURE_LENGTH: usize = 65;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Verifies signatures in-process against the live challenges of the claimed
/// address and consumes the matching one
pub struct LocalSignatureVerifier {
    challenge_service: Arc<dyn ChallengeService>,
    codec: Arc<ChallengeMessageCodec>,
}

impl LocalSignatureVerifier {
    pub fn new(
        challenge_service: Arc<dyn ChallengeService>,
        codec: Arc<ChallengeMessageCodec>,
    ) -> Self {
        Self {
            challenge_service,
            codec,
        }
    }

    /// Accepts hex with or without the `0x` prefix
    pub fn decode_signature(
        signature: &str,
    ) -> Result<[u8; SIGNATURE_LENGTH], InvalidSignatureFormatError> {
        let signature = signature.trim();
        let hex_digits = signature
            .strip_prefix("0x")
            .or_else(|| signature.strip_prefix("0X"))
            .unwrap_or(signature);

        let bytes = hex::decode(hex_digits)
            .map_err(|_| InvalidSignatureFormatError::new("signature is not a hex string"))?;

        <[u8; SIGNATURE_LENGTH]>::try_from(bytes.as_slice()).map_err(|_| {
            InvalidSignatureFormatError::new(format!(
                "expected {SIGNATURE_LENGTH} bytes, got {}",
                bytes.len()
            ))
        })
    }

    /// Recovers the signer of a prehashed message from an `r || s || v`
    /// signature. Both `v` conventions (0/1 and 27/28) are accepted. A
    /// malformed signature recovers nothing.
    pub fn recover_address(
        digest: &B256,
        signature: &[u8; SIGNATURE_LENGTH],
    ) -> Option<WalletAddress> {
        let mut v = signature[SIGNATURE_LENGTH - 1];
        if v >= 27 {
            v -= 27;
        }
        if v > 1 {
            return None;
        }

        Signature::from_bytes_and_parity(&signature[..SIGNATURE_LENGTH - 1], v == 1)
            .recover_address_from_prehash(digest)
            .ok()
            .map(WalletAddress::from)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl SignatureVerifier for LocalSignatureVerifier {
    fn mode(&self) -> VerificationMode {
        VerificationMode::Local
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(claimed_address = ?request.claimed_address)
    )]
    async fn verify(
        &self,
        request: &VerifySignatureRequest,
    ) -> Result<VerifiedSigner, VerifySignatureError> {
        let signature = Self::decode_signature(&request.signature)?;

        let Some(claimed_address) = &request.claimed_address else {
            return Err(VerifySignatureError::InvalidSignatureOrExpiredChallenge);
        };

        let live_challenges = self.challenge_service.find_live(claimed_address).await?;

        for challenge in live_challenges {
            let message = self.codec.render_challenge(&challenge);
            let digest = ChallengeMessageCodec::digest(&message);

            let Some(recovered_address) = Self::recover_address(&digest, &signature) else {
                continue;
            };
            if recovered_address != *claimed_address {
                continue;
            }

            if !self.challenge_service.consume(&challenge.nonce).await? {
                tracing::warn!(
                    nonce = %challenge.nonce,
                    "Challenge consumed by a concurrent verification"
                );
                return Err(VerifySignatureError::InvalidSignatureOrExpiredChallenge);
            }

            tracing::info!(
                address = %recovered_address,
                nonce = %challenge.nonce,
                "Signature verified"
            );

            return Ok(VerifiedSigner {
                address: recovered_address,
                proof_of_time: None,
            });
        }

        tracing::debug!("No live challenge matches the signature");

        Err(VerifySignatureError::InvalidSignatureOrExpiredChallenge)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
