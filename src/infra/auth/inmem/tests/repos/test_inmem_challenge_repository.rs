// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use siwa_auth_inmem::domain::ChallengeRepository;
use siwa_auth_inmem::InMemoryChallengeRepository;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_no_live_challenges() {
    let harness = InmemChallengeRepositoryHarness::new();
    siwa_auth_repo_tests::test_no_live_challenges(harness.challenge_repo).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_save_and_find_live_challenges() {
    let harness = InmemChallengeRepositoryHarness::new();
    siwa_auth_repo_tests::test_save_and_find_live_challenges(harness.challenge_repo).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_save_duplicate_nonce() {
    let harness = InmemChallengeRepositoryHarness::new();
    siwa_auth_repo_tests::test_save_duplicate_nonce(harness.challenge_repo).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_expired_challenges_are_not_live() {
    let harness = InmemChallengeRepositoryHarness::new();
    siwa_auth_repo_tests::test_expired_challenges_are_not_live(harness.challenge_repo).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_consume_challenge_once() {
    let harness = InmemChallengeRepositoryHarness::new();
    siwa_auth_repo_tests::test_consume_challenge_once(harness.challenge_repo).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_consume_unknown_challenge() {
    let harness = InmemChallengeRepositoryHarness::new();
    siwa_auth_repo_tests::test_consume_unknown_challenge(harness.challenge_repo).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 4))]
async fn test_concurrent_consumption_has_single_winner() {
    let harness = InmemChallengeRepositoryHarness::new();
    siwa_auth_repo_tests::test_concurrent_consumption_has_single_winner(harness.challenge_repo).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_cleanup_expired_challenges() {
    let harness = InmemChallengeRepositoryHarness::new();
    siwa_auth_repo_tests::test_cleanup_expired_challenges(harness.challenge_repo).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct InmemChallengeRepositoryHarness {
    challenge_repo: Arc<dyn ChallengeRepository>,
}

impl InmemChallengeRepositoryHarness {
    pub fn new() -> Self {
        Self {
            challenge_repo: Arc::new(InMemoryChallengeRepository::new()),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
