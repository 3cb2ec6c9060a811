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
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use siwa_adapter_http::*;
use siwa_auth::*;
use siwa_auth_inmem::{InMemoryAccountRepository, InMemoryChallengeRepository};
use siwa_auth_services::*;
use time_source::{SystemTimeSource, SystemTimeSourceStub};
use tower::ServiceExt;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const ALICE_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
const ALICE_ADDRESS: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_sign_in_and_check() {
    let harness = RoutesHarness::new();
    let alice: PrivateKeySigner = ALICE_PRIVATE_KEY.parse().unwrap();

    // Not registered yet
    let (status, body) = harness
        .get(&format!("/api/auth/agents/check?address={ALICE_ADDRESS}"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "registered": false, "realm": "agents", "address": ALICE_ADDRESS })
    );

    let (status, body) = harness.sign_in(&alice, "agents", Some("Alice")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["created"], json!(true));
    assert_eq!(body["realm"], json!("agents"));
    assert_eq!(body["account"]["address"], json!(ALICE_ADDRESS));
    assert_eq!(body["account"]["displayName"], json!("Alice"));
    assert_eq!(
        body["account"]["email"],
        json!(format!("{ALICE_ADDRESS}@agent.oracle.universe"))
    );
    assert_eq!(
        body["account"]["profile"],
        json!({ "kind": "agent", "reputation": 0, "verified": false })
    );
    assert!(body["account"].get("secret").is_none());
    assert!(body.get("proofOfTime").is_none());
    let account_id = body["account"]["id"].clone();

    let (status, body) = harness.sign_in(&alice, "agents", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["created"], json!(false));
    assert_eq!(body["account"]["id"], account_id);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = harness
        .get(&format!("/api/auth/agents/check?address={ALICE_ADDRESS}"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["registered"], json!(true));

    // Lookups are unauthenticated and expose only the public summary
    let summary = json!({
        "id": account_id,
        "realm": "agents",
        "address": ALICE_ADDRESS,
        "displayName": "Alice",
        "profile": { "kind": "agent", "reputation": 0, "verified": false },
    });
    assert_eq!(body["account"], summary);

    let (status, body) = harness
        .get(&format!("/api/auth/check?address={ALICE_ADDRESS}"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["agent"], summary);
    assert_eq!(body["human"], Value::Null);

    let (status, body) = harness
        .request(
            Request::get("/api/auth/token/validate")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["account"]["id"], account_id);
    assert_eq!(
        body["account"]["email"],
        json!(format!("{ALICE_ADDRESS}@agent.oracle.universe"))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_challenge_response_shape() {
    let harness = RoutesHarness::new();

    let (status, body) = harness
        .post_json("/api/auth/challenge", json!({ "address": ALICE_ADDRESS }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["address"], json!(ALICE_ADDRESS));
    assert_eq!(body["expiresIn"], json!(DEFAULT_CHALLENGE_TTL_SECS));
    assert_eq!(body["nonce"].as_str().unwrap().len(), CHALLENGE_NONCE_BYTES * 2);
    assert!(body["issuedAt"].is_string());

    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Sign in to Oracle Universe\n\n"));
    assert!(message.contains(&format!("Address: {ALICE_ADDRESS}")));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_error_codes() {
    let harness = RoutesHarness::new();

    let (status, body) = harness
        .post_json("/api/auth/challenge", json!({ "address": "0x123" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "INVALID_ADDRESS_FORMAT" }));

    let (status, body) = harness
        .post_json(
            "/api/auth/humans/verify",
            json!({ "address": ALICE_ADDRESS, "signature": "0x1234" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "INVALID_SIGNATURE_FORMAT" }));

    let (status, body) = harness
        .post_json(
            "/api/auth/humans/verify",
            json!({ "address": ALICE_ADDRESS, "signature": format!("0x{}", "11".repeat(65)) }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body,
        json!({ "error": "INVALID_SIGNATURE_OR_EXPIRED_CHALLENGE" })
    );

    let (status, body) = harness
        .post_json("/api/auth/humans/verify", json!({ "address": ALICE_ADDRESS }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": INVALID_REQUEST_BODY_CODE }));

    let (status, body) = harness
        .get("/api/auth/check?address=not-an-address")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "INVALID_ADDRESS_FORMAT" }));

    let (status, _) = harness
        .get(&format!("/api/auth/robots/check?address={ALICE_ADDRESS}"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_token_validate_rejections() {
    let harness = RoutesHarness::new();

    for authorization in [None, Some("Bearer not-a-token"), Some("Basic YWxpY2U6c2VjcmV0")] {
        let mut request = Request::get("/api/auth/token/validate");
        if let Some(authorization) = authorization {
            request = request.header(header::AUTHORIZATION, authorization);
        }

        let (status, body) = harness
            .request(request.body(Body::empty()).unwrap())
            .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED, "{authorization:?}");
        assert_eq!(body, json!({ "error": "INVALID_SESSION_TOKEN" }));
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_delegated_verification() {
    let proof_of_time = ProofOfTime {
        feed: "ETH/USD".to_string(),
        round_id: "110680464442257320164".to_string(),
        price: 312_512_000_000,
        price_formatted: "$3125.12".to_string(),
        timestamp: 1_735_689_600,
        timestamp_iso: "2025-01-01T00:00:00.000Z".to_string(),
        summary: "ETH/USD $3125.12".to_string(),
    };

    let mut signature_verifier = MockSignatureVerifier::new();
    signature_verifier
        .expect_mode()
        .return_const(VerificationMode::Delegated);
    signature_verifier
        .expect_verify()
        .withf(|request| request.message.as_deref() == Some("signed SIWE message"))
        .returning(move |request| {
            if request.price.is_some() {
                Ok(VerifiedSigner {
                    address: WalletAddress::try_new(ALICE_ADDRESS).unwrap(),
                    proof_of_time: Some(proof_of_time.clone()),
                })
            } else {
                Err(UpstreamUnavailableError::new("connection refused").into())
            }
        });

    let harness = RoutesHarness::with_signature_verifier(Some(Arc::new(signature_verifier)));

    let (status, body) = harness
        .post_json(
            "/api/auth/humans/verify",
            json!({
                "message": "signed SIWE message",
                "signature": "0xsigned",
                "price": 3125.12,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["account"]["address"], json!(ALICE_ADDRESS));
    assert_eq!(
        body["proofOfTime"],
        json!({
            "feed": "ETH/USD",
            "roundId": "110680464442257320164",
            "price": 312_512_000_000_i64,
            "priceFormatted": "$3125.12",
            "timestamp": 1_735_689_600,
            "timestampISO": "2025-01-01T00:00:00.000Z",
            "summary": "ETH/USD $3125.12",
        })
    );

    let (status, body) = harness
        .post_json(
            "/api/auth/humans/verify",
            json!({ "message": "signed SIWE message", "signature": "0xsigned" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({ "error": "UPSTREAM_UNAVAILABLE" }));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Harness
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct RoutesHarness {
    router: axum::Router,
}

impl RoutesHarness {
    fn new() -> Self {
        Self::with_signature_verifier(None)
    }

    fn with_signature_verifier(signature_verifier: Option<Arc<dyn SignatureVerifier>>) -> Self {
        let config = WalletAuthConfig::default();
        let time_source: Arc<dyn SystemTimeSource> = Arc::new(SystemTimeSourceStub::new());
        let account_repo: Arc<dyn AccountRepository> = Arc::new(InMemoryAccountRepository::new());
        let codec = Arc::new(ChallengeMessageCodec::new(config.service_name.clone()));

        let challenge_service: Arc<dyn ChallengeService> = Arc::new(ChallengeServiceImpl::new(
            Arc::new(InMemoryChallengeRepository::new()),
            time_source.clone(),
            &config,
        ));
        let signature_verifier = signature_verifier.unwrap_or_else(|| {
            Arc::new(LocalSignatureVerifier::new(
                challenge_service.clone(),
                codec.clone(),
            ))
        });
        let session_token_issuer: Arc<dyn SessionTokenIssuer> = Arc::new(JwtSessionTokenIssuer::new(
            account_repo.clone(),
            time_source.clone(),
            JwtSessionConfig::new(Some("routes-test-secret".to_string())),
        ));
        let account_resolver = Arc::new(AccountResolverImpl::new(
            account_repo,
            session_token_issuer.clone(),
            time_source,
            &config,
        ));

        let wallet_auth_service = Arc::new(WalletAuthServiceImpl::new(
            challenge_service,
            signature_verifier,
            account_resolver,
            session_token_issuer,
            codec,
        ));

        Self {
            router: wallet_auth_router(wallet_auth_service),
        }
    }

    async fn request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn sign_in(
        &self,
        signer: &PrivateKeySigner,
        realm: &str,
        name: Option<&str>,
    ) -> (StatusCode, Value) {
        let (status, challenge) = self
            .post_json(
                "/api/auth/challenge",
                json!({ "address": signer.address().to_string() }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let message = challenge["message"].as_str().unwrap();
        let signature = signer.sign_message(message.as_bytes()).await.unwrap();

        self.post_json(
            &format!("/api/auth/{realm}/verify"),
            json!({
                "address": signer.address().to_string(),
                "signature": format!("0x{}", hex::encode(signature.as_bytes())),
                "name": name,
            }),
        )
        .await
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
