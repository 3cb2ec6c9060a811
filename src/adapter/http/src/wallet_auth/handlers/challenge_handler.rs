// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use http_common::ApiError;

use crate::api_error::{invalid_body_api_error, wallet_auth_api_error};
use crate::{ChallengeRequestBody, ChallengeResponseBody, WalletAuthState};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Issues a fresh single-use challenge for the address
pub async fn challenge_handler(
    State(wallet_auth_service): State<WalletAuthState>,
    body: Result<Json<ChallengeRequestBody>, JsonRejection>,
) -> Result<Json<ChallengeResponseBody>, ApiError> {
    let Json(body) = body.map_err(invalid_body_api_error)?;

    let issued = wallet_auth_service
        .issue_challenge(&body.address)
        .await
        .map_err(wallet_auth_api_error)?;

    Ok(Json(issued.into()))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
