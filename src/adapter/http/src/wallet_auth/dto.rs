// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use siwa_auth::{
    Account,
    AccountLookup,
    AllRealmsAccountLookup,
    IssuedChallenge,
    ProofOfTime,
    Realm,
    RealmProfile,
    WalletVerifyRequest,
    WalletVerifyResponse,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Challenge
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Serialize, Deserialize)]
pub struct ChallengeRequestBody {
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeResponseBody {
    pub nonce: String,
    pub address: String,
    /// Exact text the wallet has to sign
    pub message: String,
    pub issued_at: DateTime<Utc>,
    /// Seconds until the challenge expires
    pub expires_in: u64,
}

impl From<IssuedChallenge> for ChallengeResponseBody {
    fn from(value: IssuedChallenge) -> Self {
        Self {
            nonce: value.nonce.to_string(),
            address: value.address.to_string(),
            message: value.message,
            issued_at: value.issued_at,
            expires_in: value.expires_in_secs,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Verify
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VerifyRequestBody {
    /// Required when signatures are checked locally
    #[serde(default)]
    pub address: Option<String>,
    pub signature: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Full signed message, delegated verification only
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl From<VerifyRequestBody> for WalletVerifyRequest {
    fn from(value: VerifyRequestBody) -> Self {
        Self {
            address: value.address,
            signature: value.signature,
            display_name: value.name,
            message: value.message,
            price: value.price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponseBody {
    pub success: bool,
    pub created: bool,
    pub realm: Realm,
    pub account: AccountView,
    pub token: String,
    pub token_expires_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof_of_time: Option<ProofOfTime>,
}

impl From<WalletVerifyResponse> for VerifyResponseBody {
    fn from(value: WalletVerifyResponse) -> Self {
        Self {
            success: true,
            created: value.created,
            realm: value.realm,
            account: value.account.into(),
            token: value.token.token,
            token_expires_at: value.token.expires_at,
            proof_of_time: value.proof_of_time,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Check
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckQuery {
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResponseBody {
    pub registered: bool,
    pub realm: Realm,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountSummaryView>,
}

impl From<AccountLookup> for CheckResponseBody {
    fn from(value: AccountLookup) -> Self {
        Self {
            registered: value.account.is_some(),
            realm: value.realm,
            address: value.address.to_string(),
            account: value.account.map(Into::into),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckAllRealmsResponseBody {
    pub address: String,
    pub agent: Option<AccountSummaryView>,
    pub human: Option<AccountSummaryView>,
}

impl From<AllRealmsAccountLookup> for CheckAllRealmsResponseBody {
    fn from(value: AllRealmsAccountLookup) -> Self {
        Self {
            address: value.address.to_string(),
            agent: value.agent.map(Into::into),
            human: value.human.map(Into::into),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Token
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenValidateResponseBody {
    pub account: AccountView,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Account
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Public projection of an account, the secret is never part of it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: String,
    pub realm: Realm,
    pub address: String,
    pub email: String,
    pub display_name: Option<String>,
    pub profile: RealmProfile,
    pub registered_at: DateTime<Utc>,
}

impl From<Account> for AccountView {
    fn from(value: Account) -> Self {
        Self {
            id: value.id.to_string(),
            realm: value.realm,
            address: value.address.to_string(),
            email: value.email,
            display_name: value.display_name,
            profile: value.profile,
            registered_at: value.registered_at,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// What anyone may learn about a registered address without signing in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummaryView {
    pub id: String,
    pub realm: Realm,
    pub address: String,
    pub display_name: Option<String>,
    pub profile: RealmProfile,
}

impl From<Account> for AccountSummaryView {
    fn from(value: Account) -> Self {
        Self {
            id: value.id.to_string(),
            realm: value.realm,
            address: value.address.to_string(),
            display_name: value.display_name,
            profile: value.profile,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
