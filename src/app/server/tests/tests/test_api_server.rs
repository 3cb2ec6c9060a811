// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use siwa_server::*;
use time_source::{SystemTimeSourceDefault, SystemTimeSourceStub};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_serves_until_shutdown() {
    let config = ServerConfig {
        session: SessionConfig {
            jwt_secret: Some("api-server-test".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    let components =
        WalletAuthComponents::build(&config, Arc::new(SystemTimeSourceDefault::new())).unwrap();

    let api_server = ApiServer::bind(
        SocketAddr::from((Ipv4Addr::LOCALHOST, 0)),
        components.wallet_auth_service,
    )
    .await
    .unwrap();
    let base_url = format!("http://{}", api_server.local_addr().unwrap());

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(api_server.run(async move {
        shutdown_rx.await.ok();
    }));

    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base_url}/api/auth/challenge"))
        .json(&json!({ "address": "0x70997970C51812dc3A010C7d01b50e0d17dc79C8" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["address"],
        json!("0x70997970c51812dc3a010c7d01b50e0d17dc79c8")
    );

    let response = client
        .get(format!("{base_url}/api/auth/check?address=0x1"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "INVALID_ADDRESS_FORMAT" }));

    shutdown_tx.send(()).unwrap();
    server.await.unwrap().unwrap();
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_delegated_mode_wiring() {
    let config = ServerConfig {
        verification: VerificationConfig {
            mode: siwa_auth::VerificationMode::Delegated,
            ..Default::default()
        },
        ..Default::default()
    };

    let components =
        WalletAuthComponents::build(&config, Arc::new(SystemTimeSourceDefault::new())).unwrap();

    // Nonces belong to the SIWE service, yet challenges stay available
    let challenge = components
        .wallet_auth_service
        .issue_challenge("0x70997970C51812dc3A010C7d01b50e0d17dc79C8")
        .await
        .unwrap();
    assert_eq!(components.challenge_service.evict_expired().await.unwrap(), 0);
    assert!(!challenge.message.is_empty());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_eviction_runs_on_start() {
    let time_source = SystemTimeSourceStub::new_set(Utc.with_ymd_and_hms(2050, 1, 2, 12, 0, 0).unwrap());
    let components = WalletAuthComponents::build(
        &ServerConfig::default(),
        Arc::new(time_source.clone()),
    )
    .unwrap();

    components
        .wallet_auth_service
        .issue_challenge("0x70997970C51812dc3A010C7d01b50e0d17dc79C8")
        .await
        .unwrap();
    time_source.advance(chrono::Duration::seconds(301));

    let eviction = tokio::spawn(run_challenge_eviction(
        components.challenge_service.clone(),
        Duration::from_secs(3600),
    ));
    tokio::time::sleep(Duration::from_millis(100)).await;
    eviction.abort();

    // Already dropped by the first pass
    assert_eq!(components.challenge_service.evict_expired().await.unwrap(), 0);
}

#[test_log::test(tokio::test)]
async fn test_zero_eviction_interval_disables_eviction() {
    let time_source = SystemTimeSourceStub::new_set(Utc.with_ymd_and_hms(2050, 1, 2, 12, 0, 0).unwrap());
    let components = WalletAuthComponents::build(
        &ServerConfig::default(),
        Arc::new(time_source.clone()),
    )
    .unwrap();

    components
        .wallet_auth_service
        .issue_challenge("0x70997970C51812dc3A010C7d01b50e0d17dc79C8")
        .await
        .unwrap();
    time_source.advance(chrono::Duration::seconds(301));

    run_challenge_eviction(components.challenge_service.clone(), Duration::ZERO).await;

    assert_eq!(components.challenge_service.evict_expired().await.unwrap(), 1);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
