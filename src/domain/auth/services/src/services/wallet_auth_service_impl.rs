// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use siwa_auth::{
    Account,
    AccountLookup,
    AccountResolver,
    AllRealmsAccountLookup,
    ChallengeService,
    InvalidWalletAddressError,
    IssuedChallenge,
    Realm,
    SessionTokenIssuer,
    SignatureVerifier,
    VerificationMode,
    VerifySignatureRequest,
    WalletAddress,
    WalletAuthError,
    WalletAuthService,
    WalletVerifyRequest,
    WalletVerifyResponse,
};

use crate::ChallengeMessageCodec;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct WalletAuthServiceImpl {
    challenge_service: Arc<dyn ChallengeService>,
    signature_verifier: Arc<dyn SignatureVerifier>,
    account_resolver: Arc<dyn AccountResolver>,
    session_token_issuer: Arc<dyn SessionTokenIssuer>,
    codec: Arc<ChallengeMessageCodec>,
}

impl WalletAuthServiceImpl {
    pub fn new(
        challenge_service: Arc<dyn ChallengeService>,
        signature_verifier: Arc<dyn SignatureVerifier>,
        account_resolver: Arc<dyn AccountResolver>,
        session_token_issuer: Arc<dyn SessionTokenIssuer>,
        codec: Arc<ChallengeMessageCodec>,
    ) -> Self {
        Self {
            challenge_service,
            signature_verifier,
            account_resolver,
            session_token_issuer,
            codec,
        }
    }

    fn parse_claimed_address(
        &self,
        maybe_address: Option<&str>,
    ) -> Result<Option<WalletAddress>, WalletAuthError> {
        match (maybe_address, self.signature_verifier.mode()) {
            (Some(address), _) => Ok(Some(WalletAddress::try_new(address)?)),
            // Delegated verification recovers the address from the message
            (None, VerificationMode::Delegated) => Ok(None),
            (None, VerificationMode::Local) => Err(InvalidWalletAddressError {
                value: String::new(),
            }
            .into()),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl WalletAuthService for WalletAuthServiceImpl {
    #[tracing::instrument(level = "debug", skip_all, fields(%address))]
    async fn issue_challenge(&self, address: &str) -> Result<IssuedChallenge, WalletAuthError> {
        let address = WalletAddress::try_new(address)?;

        let challenge = self.challenge_service.issue(&address).await?;
        let message = self.codec.render_challenge(&challenge);

        let expires_in_secs =
            u64::try_from((challenge.expires_at - challenge.issued_at).num_seconds()).unwrap_or(0);

        Ok(IssuedChallenge {
            nonce: challenge.nonce,
            address,
            message,
            issued_at: challenge.issued_at,
            expires_in_secs,
        })
    }

    #[tracing::instrument(level = "debug", skip_all, fields(%realm, address = ?request.address))]
    async fn verify(
        &self,
        realm: Realm,
        request: WalletVerifyRequest,
    ) -> Result<WalletVerifyResponse, WalletAuthError> {
        let claimed_address = self.parse_claimed_address(request.address.as_deref())?;

        let signer = self
            .signature_verifier
            .verify(&VerifySignatureRequest {
                claimed_address: claimed_address.clone(),
                signature: request.signature,
                message: request.message,
                price: request.price,
            })
            .await?;

        if let Some(claimed_address) = &claimed_address {
            if *claimed_address != signer.address {
                tracing::warn!(
                    recovered_address = %signer.address,
                    "Signer differs from the claimed address"
                );
                return Err(WalletAuthError::InvalidSignatureOrExpiredChallenge);
            }
        }

        let resolved = self
            .account_resolver
            .resolve(realm, &signer.address, request.display_name)
            .await?;

        let token = self.account_resolver.issue_session(&resolved.account).await?;

        tracing::info!(
            account_id = %resolved.account.id,
            created = resolved.created,
            "Wallet sign-in succeeded"
        );

        Ok(WalletVerifyResponse {
            realm,
            account: resolved.account,
            created: resolved.created,
            token,
            proof_of_time: signer.proof_of_time,
        })
    }

    #[tracing::instrument(level = "debug", skip_all, fields(%realm, %address))]
    async fn lookup(&self, realm: Realm, address: &str) -> Result<AccountLookup, WalletAuthError> {
        let address = WalletAddress::try_new(address)?;

        let account = self.account_resolver.find_account(realm, &address).await?;

        Ok(AccountLookup {
            address,
            realm,
            account,
        })
    }

    #[tracing::instrument(level = "debug", skip_all, fields(%address))]
    async fn lookup_all_realms(
        &self,
        address: &str,
    ) -> Result<AllRealmsAccountLookup, WalletAuthError> {
        let address = WalletAddress::try_new(address)?;

        let agent = self
            .account_resolver
            .find_account(Realm::Agents, &address)
            .await?;
        let human = self
            .account_resolver
            .find_account(Realm::Humans, &address)
            .await?;

        Ok(AllRealmsAccountLookup {
            address,
            agent,
            human,
        })
    }

    #[tracing::instrument(level = "debug", skip_all)]
    async fn validate_session(&self, token: &str) -> Result<Account, WalletAuthError> {
        Ok(self.session_token_issuer.validate_session(token).await?)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
