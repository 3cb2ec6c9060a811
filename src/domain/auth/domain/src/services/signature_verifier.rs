// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::WalletAddress;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VerificationMode {
    /// Recover the signer in-process against a live challenge
    #[default]
    Local,
    /// Forward the signed message to an external SIWE verification service
    Delegated,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default)]
pub struct VerifySignatureRequest {
    /// Required in local mode, optional in delegated mode
    pub claimed_address: Option<WalletAddress>,
    /// Hex-encoded 65-byte `r || s || v` signature
    pub signature: String,
    /// Full signed message, delegated mode only
    pub message: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedSigner {
    pub address: WalletAddress,
    pub proof_of_time: Option<ProofOfTime>,
}

/// Price-feed attestation that the delegated service attaches to a
/// successful verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofOfTime {
    pub feed: String,
    pub round_id: String,
    pub price: i64,
    pub price_formatted: String,
    pub timestamp: i64,
    #[serde(rename = "timestampISO")]
    pub timestamp_iso: String,
    pub summary: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg_attr(any(feature = "testing", test), mockall::automock)]
#[async_trait::async_trait]
pub trait SignatureVerifier: Send + Sync {
    fn mode(&self) -> VerificationMode;

    async fn verify(
        &self,
        request: &VerifySignatureRequest,
    ) -> Result<VerifiedSigner, VerifySignatureError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum VerifySignatureError {
    #[error(transparent)]
    InvalidSignatureFormat(#[from] InvalidSignatureFormatError),

    /// Deliberately covers bad signatures, unknown or expired challenges and
    /// address mismatches alike
    #[error("Invalid signature or expired challenge")]
    InvalidSignatureOrExpiredChallenge,

    #[error(transparent)]
    UpstreamUnavailable(#[from] UpstreamUnavailableError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid signature format: {reason}")]
pub struct InvalidSignatureFormatError {
    pub reason: String,
}

impl InvalidSignatureFormatError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
#[error("Signature verification service unavailable: {reason}")]
pub struct UpstreamUnavailableError {
    pub reason: String,
}

impl UpstreamUnavailableError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
