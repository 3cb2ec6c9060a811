// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use http_common::ApiError;

use super::parse_realm;
use crate::api_error::{invalid_body_api_error, wallet_auth_api_error};
use crate::{VerifyRequestBody, VerifyResponseBody, WalletAuthState};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Verifies a signed challenge and signs the wallet in to the realm, creating
/// the account on first use
pub async fn verify_handler(
    State(wallet_auth_service): State<WalletAuthState>,
    Path(realm): Path<String>,
    body: Result<Json<VerifyRequestBody>, JsonRejection>,
) -> Result<Json<VerifyResponseBody>, ApiError> {
    let realm = parse_realm(&realm)?;
    let Json(body) = body.map_err(invalid_body_api_error)?;

    let response = wallet_auth_service
        .verify(realm, body.into())
        .await
        .map_err(wallet_auth_api_error)?;

    Ok(Json(response.into()))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
