// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};

use crate::{
    Account,
    AccountDisplayName,
    ChallengeNonce,
    ProofOfTime,
    Realm,
    SessionToken,
    WalletAddress,
    WalletAuthError,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Entry point of the sign-in protocol. Inputs arrive unvalidated, and any
/// validation error is raised before the challenge store is touched.
#[async_trait::async_trait]
pub trait WalletAuthService: Send + Sync {
    async fn issue_challenge(&self, address: &str) -> Result<IssuedChallenge, WalletAuthError>;

    async fn verify(
        &self,
        realm: Realm,
        request: WalletVerifyRequest,
    ) -> Result<WalletVerifyResponse, WalletAuthError>;

    async fn lookup(&self, realm: Realm, address: &str) -> Result<AccountLookup, WalletAuthError>;

    async fn lookup_all_realms(&self, address: &str)
    -> Result<AllRealmsAccountLookup, WalletAuthError>;

    async fn validate_session(&self, token: &str) -> Result<Account, WalletAuthError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct IssuedChallenge {
    pub nonce: ChallengeNonce,
    pub address: WalletAddress,
    pub message: String,
    pub issued_at: DateTime<Utc>,
    pub expires_in_secs: u64,
}

#[derive(Debug, Clone, Default)]
pub struct WalletVerifyRequest {
    pub address: Option<String>,
    pub signature: String,
    pub display_name: Option<AccountDisplayName>,
    pub message: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct WalletVerifyResponse {
    pub realm: Realm,
    pub account: Account,
    pub created: bool,
    pub token: SessionToken,
    pub proof_of_time: Option<ProofOfTime>,
}

#[derive(Debug, Clone)]
pub struct AccountLookup {
    pub address: WalletAddress,
    pub realm: Realm,
    pub account: Option<Account>,
}

#[derive(Debug, Clone)]
pub struct AllRealmsAccountLookup {
    pub address: WalletAddress,
    pub agent: Option<Account>,
    pub human: Option<Account>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
