// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum::extract::rejection::JsonRejection;
use http::StatusCode;
use http_common::ApiError;
use siwa_auth::{WalletAuthError, WalletAuthErrorCode};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const INVALID_REQUEST_BODY_CODE: &str = "INVALID_REQUEST_BODY";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub(crate) fn invalid_body_api_error(e: JsonRejection) -> ApiError {
    ApiError::bad_request(e, INVALID_REQUEST_BODY_CODE)
}

pub(crate) fn wallet_auth_api_error(e: WalletAuthError) -> ApiError {
    let code = e.code();
    ApiError::new(e, wallet_auth_status_code(code), code.as_str())
}

pub(crate) fn wallet_auth_status_code(code: WalletAuthErrorCode) -> StatusCode {
    match code {
        WalletAuthErrorCode::InvalidAddressFormat | WalletAuthErrorCode::InvalidSignatureFormat => {
            StatusCode::BAD_REQUEST
        }
        WalletAuthErrorCode::InvalidSignatureOrExpiredChallenge
        | WalletAuthErrorCode::InvalidSessionToken => StatusCode::UNAUTHORIZED,
        WalletAuthErrorCode::UpstreamUnavailable => StatusCode::BAD_GATEWAY,
        WalletAuthErrorCode::AccountPersistenceFailed
        | WalletAuthErrorCode::TokenIssuanceFailed
        | WalletAuthErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
