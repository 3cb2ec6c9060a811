// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use siwa_auth::*;
use siwa_auth_inmem::{InMemoryAccountRepository, InMemoryChallengeRepository};
use siwa_auth_services::*;
use time_source::{SystemTimeSource, SystemTimeSourceStub};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

// Well-known development keys
pub const ALICE_PRIVATE_KEY: &str =
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const ALICE_ADDRESS: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
pub const ALICE_ADDRESS_CHECKSUM: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

pub const BOB_PRIVATE_KEY: &str =
    "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
pub const BOB_ADDRESS: &str = "0x70997970c51812dc3a010c7d01b50e0d17dc79c8";

pub const TEST_JWT_SECRET: &str = "test-jwt-secret";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn wallet(private_key: &str) -> PrivateKeySigner {
    private_key.parse().unwrap()
}

pub fn wallet_address(address: &str) -> WalletAddress {
    WalletAddress::try_new(address).unwrap()
}

/// Signs like a wallet's `personal_sign` does, `v` in the 27/28 form
pub async fn sign(signer: &PrivateKeySigner, message: &str) -> [u8; 65] {
    signer.sign_message(message.as_bytes()).await.unwrap().as_bytes()
}

pub async fn sign_hex(signer: &PrivateKeySigner, message: &str) -> String {
    format!("0x{}", hex::encode(sign(signer, message).await))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct WalletAuthHarness {
    pub time_source: SystemTimeSourceStub,
    pub account_repo: Arc<dyn AccountRepository>,
    pub codec: Arc<ChallengeMessageCodec>,
    pub challenge_service: Arc<dyn ChallengeService>,
    pub signature_verifier: Arc<dyn SignatureVerifier>,
    pub session_token_issuer: Arc<dyn SessionTokenIssuer>,
    pub account_resolver: Arc<dyn AccountResolver>,
    pub wallet_auth_service: Arc<dyn WalletAuthService>,
}

#[derive(Default)]
pub struct WalletAuthHarnessOverrides {
    pub time_source: Option<SystemTimeSourceStub>,
    pub account_repo: Option<Arc<dyn AccountRepository>>,
    pub signature_verifier: Option<Arc<dyn SignatureVerifier>>,
    pub session_token_issuer: Option<Arc<dyn SessionTokenIssuer>>,
}

impl WalletAuthHarness {
    pub fn new() -> Self {
        Self::with_overrides(WalletAuthHarnessOverrides::default())
    }

    pub fn with_overrides(overrides: WalletAuthHarnessOverrides) -> Self {
        let config = WalletAuthConfig::default();

        let time_source = overrides.time_source.unwrap_or_default();
        let time_source_dyn: Arc<dyn SystemTimeSource> = Arc::new(time_source.clone());

        let account_repo = overrides
            .account_repo
            .unwrap_or_else(|| Arc::new(InMemoryAccountRepository::new()));

        let codec = Arc::new(ChallengeMessageCodec::new(config.service_name.clone()));

        let challenge_service: Arc<dyn ChallengeService> = Arc::new(ChallengeServiceImpl::new(
            Arc::new(InMemoryChallengeRepository::new()),
            time_source_dyn.clone(),
            &config,
        ));

        let signature_verifier = overrides.signature_verifier.unwrap_or_else(|| {
            Arc::new(LocalSignatureVerifier::new(
                challenge_service.clone(),
                codec.clone(),
            ))
        });

        let session_token_issuer = overrides.session_token_issuer.unwrap_or_else(|| {
            Arc::new(JwtSessionTokenIssuer::new(
                account_repo.clone(),
                time_source_dyn.clone(),
                JwtSessionConfig::new(Some(TEST_JWT_SECRET.to_string())),
            ))
        });

        let account_resolver: Arc<dyn AccountResolver> = Arc::new(AccountResolverImpl::new(
            account_repo.clone(),
            session_token_issuer.clone(),
            time_source_dyn,
            &config,
        ));

        let wallet_auth_service = Arc::new(WalletAuthServiceImpl::new(
            challenge_service.clone(),
            signature_verifier.clone(),
            account_resolver.clone(),
            session_token_issuer.clone(),
            codec.clone(),
        ));

        Self {
            time_source,
            account_repo,
            codec,
            challenge_service,
            signature_verifier,
            session_token_issuer,
            account_resolver,
            wallet_auth_service,
        }
    }

    /// Issues a challenge for the signer and signs it
    pub async fn issue_and_sign(&self, signer: &PrivateKeySigner) -> (IssuedChallenge, String) {
        let issued = self
            .wallet_auth_service
            .issue_challenge(&signer.address().to_string())
            .await
            .unwrap();
        let signature = sign_hex(signer, &issued.message).await;

        (issued, signature)
    }

    pub async fn verify_local(
        &self,
        claimed_address: &str,
        signature: &str,
    ) -> Result<VerifiedSigner, VerifySignatureError> {
        self.signature_verifier
            .verify(&VerifySignatureRequest {
                claimed_address: Some(wallet_address(claimed_address)),
                signature: signature.to_string(),
                ..Default::default()
            })
            .await
    }

    pub async fn live_challenges(&self, address: &str) -> Vec<Challenge> {
        self.challenge_service
            .find_live(&wallet_address(address))
            .await
            .unwrap()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
