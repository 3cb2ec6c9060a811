// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use siwa_auth::*;
use siwa_auth_inmem::InMemoryAccountRepository;
use siwa_auth_services::JwtSessionTokenIssuer;
use time_source::{SystemTimeSource, SystemTimeSourceStub};

use crate::tests::harness::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_issue_and_validate() {
    let harness = JwtHarness::new(TEST_JWT_SECRET);
    let account = harness.create_account(Realm::Agents, ALICE_ADDRESS).await;

    let now = harness.time_source.now();
    let session = harness.issuer.issue_session(&account).await.unwrap();
    assert_eq!(
        session.expires_at,
        now + Duration::seconds(i64::try_from(DEFAULT_SESSION_TOKEN_TTL_SECS).unwrap())
    );

    let validated = harness.issuer.validate_session(&session.token).await.unwrap();
    assert_eq!(validated.id, account.id);
    assert_eq!(validated.realm, Realm::Agents);
    assert_eq!(validated.address, account.address);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_token_bound_to_account_secret() {
    let harness = JwtHarness::new(TEST_JWT_SECRET);
    let account = harness.create_account(Realm::Humans, ALICE_ADDRESS).await;
    let session = harness.issuer.issue_session(&account).await.unwrap();

    // Same account id, rotated secret
    let other = JwtHarness::new(TEST_JWT_SECRET);
    let rotated = Account {
        secret: AccountSecret::new_random(),
        ..account
    };
    other.account_repo.create_account(&rotated).await.unwrap();

    assert_matches!(
        other.issuer.validate_session(&session.token).await,
        Err(ValidateSessionTokenError::InvalidToken(_))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_token_bound_to_server_secret() {
    let harness = JwtHarness::new(TEST_JWT_SECRET);
    let account = harness.create_account(Realm::Agents, BOB_ADDRESS).await;
    let session = harness.issuer.issue_session(&account).await.unwrap();

    let other = JwtHarness::new("another-secret");
    other.account_repo.create_account(&account).await.unwrap();

    assert_matches!(
        other.issuer.validate_session(&session.token).await,
        Err(ValidateSessionTokenError::InvalidToken(_))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_unknown_account_rejected() {
    let harness = JwtHarness::new(TEST_JWT_SECRET);
    let account = Account::new(
        Realm::Agents,
        wallet_address(ALICE_ADDRESS),
        None,
        DEFAULT_EMAIL_DOMAIN,
        Utc::now(),
    );
    let session = harness.issuer.issue_session(&account).await.unwrap();

    assert_matches!(
        harness.issuer.validate_session(&session.token).await,
        Err(ValidateSessionTokenError::InvalidToken(e)) if e.reason == "unknown account"
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_expired_token_rejected() {
    let harness = JwtHarness::new(TEST_JWT_SECRET);
    let account = harness.create_account(Realm::Agents, ALICE_ADDRESS).await;

    harness.time_source.set(Utc::now() - Duration::days(30));
    let session = harness.issuer.issue_session(&account).await.unwrap();

    assert_matches!(
        harness.issuer.validate_session(&session.token).await,
        Err(ValidateSessionTokenError::InvalidToken(e)) if e.reason == "token expired"
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_garbage_token_rejected() {
    let harness = JwtHarness::new(TEST_JWT_SECRET);

    for token in ["", "not-a-jwt", "a.b.c"] {
        assert_matches!(
            harness.issuer.validate_session(token).await,
            Err(ValidateSessionTokenError::InvalidToken(_)),
            "token: {token}"
        );
    }
}

#[test_log::test(tokio::test)]
async fn test_expiry_overflow_is_internal_error() {
    let harness = JwtHarness::with_config(
        JwtSessionConfig::new(Some(TEST_JWT_SECRET.to_string()))
            .with_token_ttl(Duration::seconds(10_000_000_000_000)),
    );
    let account = harness.create_account(Realm::Agents, ALICE_ADDRESS).await;

    assert_matches!(
        harness.issuer.issue_session(&account).await,
        Err(IssueSessionTokenError::Internal(_))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Harness
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct JwtHarness {
    time_source: SystemTimeSourceStub,
    account_repo: Arc<dyn AccountRepository>,
    issuer: JwtSessionTokenIssuer,
}

impl JwtHarness {
    fn new(jwt_secret: &str) -> Self {
        Self::with_config(JwtSessionConfig::new(Some(jwt_secret.to_string())))
    }

    fn with_config(config: JwtSessionConfig) -> Self {
        let time_source = SystemTimeSourceStub::new_set(Utc::now());
        let account_repo: Arc<dyn AccountRepository> = Arc::new(InMemoryAccountRepository::new());

        let issuer = JwtSessionTokenIssuer::new(
            account_repo.clone(),
            Arc::new(time_source.clone()),
            config,
        );

        Self {
            time_source,
            account_repo,
            issuer,
        }
    }

    async fn create_account(&self, realm: Realm, address: &str) -> Account {
        let account = Account::new(
            realm,
            wallet_address(address),
            None,
            DEFAULT_EMAIL_DOMAIN,
            Utc::now(),
        );
        self.account_repo.create_account(&account).await.unwrap();
        account
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
