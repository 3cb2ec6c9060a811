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
use chrono::Duration;
use pretty_assertions::assert_eq;
use siwa_auth::{ChallengeNonce, ChallengeRepository, SaveChallengeError};

use crate::{ADDRESS_ALICE, ADDRESS_BOB, base_time, make_test_challenge, wallet_address};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_no_live_challenges(challenge_repo: Arc<dyn ChallengeRepository>) {
    let result = challenge_repo
        .find_live_challenges(&wallet_address(ADDRESS_ALICE), base_time())
        .await
        .unwrap();

    assert!(result.is_empty());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_save_and_find_live_challenges(challenge_repo: Arc<dyn ChallengeRepository>) {
    let first = make_test_challenge(ADDRESS_ALICE, base_time());
    let second = make_test_challenge(ADDRESS_ALICE, base_time() + Duration::seconds(10));
    let foreign = make_test_challenge(ADDRESS_BOB, base_time());

    for challenge in [&first, &second, &foreign] {
        challenge_repo.save_challenge(challenge).await.unwrap();
    }

    let live = challenge_repo
        .find_live_challenges(&wallet_address(ADDRESS_ALICE), base_time() + Duration::seconds(20))
        .await
        .unwrap();

    assert_eq!(live, vec![first, second]);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_save_duplicate_nonce(challenge_repo: Arc<dyn ChallengeRepository>) {
    let challenge = make_test_challenge(ADDRESS_ALICE, base_time());
    challenge_repo.save_challenge(&challenge).await.unwrap();

    assert_matches!(
        challenge_repo.save_challenge(&challenge).await,
        Err(SaveChallengeError::DuplicateNonce { nonce }) if nonce == challenge.nonce
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_expired_challenges_are_not_live(challenge_repo: Arc<dyn ChallengeRepository>) {
    let old = make_test_challenge(ADDRESS_ALICE, base_time());
    let fresh = make_test_challenge(ADDRESS_ALICE, base_time() + Duration::seconds(200));

    challenge_repo.save_challenge(&old).await.unwrap();
    challenge_repo.save_challenge(&fresh).await.unwrap();

    let address = wallet_address(ADDRESS_ALICE);

    let live = challenge_repo
        .find_live_challenges(&address, old.expires_at - Duration::seconds(1))
        .await
        .unwrap();
    assert_eq!(live, vec![old.clone(), fresh.clone()]);

    let live = challenge_repo
        .find_live_challenges(&address, old.expires_at)
        .await
        .unwrap();
    assert_eq!(live, vec![fresh.clone()]);

    let live = challenge_repo
        .find_live_challenges(&address, fresh.expires_at)
        .await
        .unwrap();
    assert!(live.is_empty());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_consume_challenge_once(challenge_repo: Arc<dyn ChallengeRepository>) {
    let challenge = make_test_challenge(ADDRESS_ALICE, base_time());
    let other = make_test_challenge(ADDRESS_ALICE, base_time());
    challenge_repo.save_challenge(&challenge).await.unwrap();
    challenge_repo.save_challenge(&other).await.unwrap();

    assert!(challenge_repo.consume_challenge(&challenge.nonce).await.unwrap());
    assert!(!challenge_repo.consume_challenge(&challenge.nonce).await.unwrap());

    let live = challenge_repo
        .find_live_challenges(&wallet_address(ADDRESS_ALICE), base_time())
        .await
        .unwrap();
    assert_eq!(live, vec![other]);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_consume_unknown_challenge(challenge_repo: Arc<dyn ChallengeRepository>) {
    let consumed = challenge_repo
        .consume_challenge(&ChallengeNonce::new_unchecked("deadbeef"))
        .await
        .unwrap();

    assert!(!consumed);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Expects a multi-threaded runtime
pub async fn test_concurrent_consumption_has_single_winner(
    challenge_repo: Arc<dyn ChallengeRepository>,
) {
    const ATTEMPTS: usize = 16;

    let challenge = make_test_challenge(ADDRESS_ALICE, base_time());
    challenge_repo.save_challenge(&challenge).await.unwrap();

    let handles: Vec<_> = (0..ATTEMPTS)
        .map(|_| {
            let challenge_repo = challenge_repo.clone();
            let nonce = challenge.nonce.clone();
            tokio::spawn(async move { challenge_repo.consume_challenge(&nonce).await.unwrap() })
        })
        .collect();

    let winners = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(Result::unwrap)
        .filter(|consumed| *consumed)
        .count();

    assert_eq!(winners, 1);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_cleanup_expired_challenges(challenge_repo: Arc<dyn ChallengeRepository>) {
    let old_alice = make_test_challenge(ADDRESS_ALICE, base_time());
    let old_bob = make_test_challenge(ADDRESS_BOB, base_time());
    let fresh_alice = make_test_challenge(ADDRESS_ALICE, base_time() + Duration::seconds(200));

    for challenge in [&old_alice, &old_bob, &fresh_alice] {
        challenge_repo.save_challenge(challenge).await.unwrap();
    }

    let now = old_alice.expires_at;

    assert_eq!(
        challenge_repo.cleanup_expired_challenges(now).await.unwrap(),
        2
    );
    assert_eq!(
        challenge_repo.cleanup_expired_challenges(now).await.unwrap(),
        0
    );

    // Evicted challenges are gone even for lookups in the past
    let live = challenge_repo
        .find_live_challenges(&wallet_address(ADDRESS_ALICE), base_time())
        .await
        .unwrap();
    assert_eq!(live, vec![fresh_alice]);

    assert!(!challenge_repo.consume_challenge(&old_bob.nonce).await.unwrap());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
