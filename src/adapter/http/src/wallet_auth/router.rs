// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use axum::routing::{get, post};
use siwa_auth::WalletAuthService;

use super::handlers;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub type WalletAuthState = Arc<dyn WalletAuthService>;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn wallet_auth_router(wallet_auth_service: WalletAuthState) -> axum::Router {
    axum::Router::new()
        .route("/api/auth/challenge", post(handlers::challenge_handler))
        .route("/api/auth/check", get(handlers::check_all_realms_handler))
        .route(
            "/api/auth/token/validate",
            get(handlers::token_validate_handler),
        )
        .route("/api/auth/{realm}/verify", post(handlers::verify_handler))
        .route("/api/auth/{realm}/check", get(handlers::check_handler))
        .with_state(wallet_auth_service)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
