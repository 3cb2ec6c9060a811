// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::time::Duration;

use internal_error::{InternalError, ResultIntoInternal};
use serde::{Deserialize, Serialize};
use siwa_auth::{
    InvalidSignatureFormatError,
    ProofOfTime,
    SignatureVerifier,
    UpstreamUnavailableError,
    VerificationMode,
    VerifiedSigner,
    VerifySignatureError,
    VerifySignatureRequest,
    WalletAddress,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_SIWE_SERVICE_URL: &str = "http://localhost:8787";
pub const DEFAULT_SIWE_SERVICE_TIMEOUT_SECS: u64 = 10;

const SIWE_SERVICE_VERIFY_PATH: &str = "verify";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct SiweServiceConfig {
    /// Base URL, the verifier posts to `{url}/verify`
    pub url: String,
    pub timeout: Duration,
}

impl Default for SiweServiceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SIWE_SERVICE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_SIWE_SERVICE_TIMEOUT_SECS),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Hands the full signed SIWE message to an external service. Nonce
/// lifecycle belongs to that service, so no local challenge is consulted.
pub struct SiweServiceSignatureVerifier {
    client: reqwest::Client,
    verify_url: String,
}

impl SiweServiceSignatureVerifier {
    pub fn new(config: &SiweServiceConfig) -> Result<Self, InternalError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION"),
            ))
            .timeout(config.timeout)
            .build()
            .int_err()?;

        let verify_url = format!(
            "{}/{SIWE_SERVICE_VERIFY_PATH}",
            config.url.trim_end_matches('/')
        );

        Ok(Self { client, verify_url })
    }

    async fn call_verify(
        &self,
        request: &SiweVerifyRequest<'_>,
    ) -> Result<SiweVerifyResponse, UpstreamUnavailableError> {
        let response = self
            .client
            .post(&self.verify_url)
            .json(request)
            .send()
            .await
            .map_err(|e| UpstreamUnavailableError::new(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(UpstreamUnavailableError::new(format!(
                "SIWE service responded with {status}"
            )));
        }

        // Rejections come back as 4xx with the same body shape
        response
            .json::<SiweVerifyResponse>()
            .await
            .map_err(|e| UpstreamUnavailableError::new(format!("undecodable response: {e}")))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl SignatureVerifier for SiweServiceSignatureVerifier {
    fn mode(&self) -> VerificationMode {
        VerificationMode::Delegated
    }

    #[tracing::instrument(level = "debug", skip_all, fields(verify_url = %self.verify_url))]
    async fn verify(
        &self,
        request: &VerifySignatureRequest,
    ) -> Result<VerifiedSigner, VerifySignatureError> {
        let Some(message) = request.message.as_deref() else {
            return Err(InvalidSignatureFormatError::new("signed message is missing").into());
        };
        if request.signature.trim().is_empty() {
            return Err(InvalidSignatureFormatError::new("signature is empty").into());
        }

        let response = self
            .call_verify(&SiweVerifyRequest {
                message,
                signature: &request.signature,
                price: request.price,
            })
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "SIWE service call failed"))?;

        if !response.verified {
            tracing::debug!(
                reason = %response.error.as_deref().unwrap_or_default(),
                "SIWE service rejected the signature"
            );
            return Err(VerifySignatureError::InvalidSignatureOrExpiredChallenge);
        }

        let address = WalletAddress::try_new(&response.address).map_err(|e| {
            UpstreamUnavailableError::new(format!("SIWE service returned {e}"))
        })?;

        tracing::debug!(
            %address,
            chain_id = response.chain_id,
            domain = %response.domain,
            issued_at = %response.issued_at,
            "SIWE service verified the signature"
        );

        Ok(VerifiedSigner {
            address,
            proof_of_time: response.proof_of_time,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Serialize)]
struct SiweVerifyRequest<'a> {
    message: &'a str,
    signature: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SiweVerifyResponse {
    verified: bool,
    #[serde(default)]
    address: String,
    #[serde(default)]
    chain_id: u64,
    #[serde(default)]
    domain: String,
    #[serde(default)]
    issued_at: String,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    proof_of_time: Option<ProofOfTime>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
