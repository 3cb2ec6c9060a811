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
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use axum_extra::typed_header::TypedHeaderRejection;
use http_common::ApiError;
use siwa_auth::{InvalidSessionTokenError, WalletAuthError};

use crate::api_error::wallet_auth_api_error;
use crate::{TokenValidateResponseBody, WalletAuthState};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn token_validate_handler(
    State(wallet_auth_service): State<WalletAuthState>,
    maybe_bearer_header: Result<Option<TypedHeader<Authorization<Bearer>>>, TypedHeaderRejection>,
) -> Result<Json<TokenValidateResponseBody>, ApiError> {
    let bearer = match maybe_bearer_header {
        Ok(Some(TypedHeader(Authorization(bearer)))) => bearer,
        Ok(None) => return Err(bearer_error("bearer token is missing")),
        Err(_) => return Err(bearer_error("malformed authorization header")),
    };

    let account = wallet_auth_service
        .validate_session(bearer.token())
        .await
        .map_err(wallet_auth_api_error)?;

    Ok(Json(TokenValidateResponseBody {
        account: account.into(),
    }))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn bearer_error(reason: &str) -> ApiError {
    wallet_auth_api_error(WalletAuthError::InvalidSessionToken(
        InvalidSessionTokenError::new(reason),
    ))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
