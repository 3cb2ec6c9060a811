// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum::Json;
use axum::extract::{Path, Query, State};
use http_common::ApiError;

use super::parse_realm;
use crate::api_error::wallet_auth_api_error;
use crate::{CheckAllRealmsResponseBody, CheckQuery, CheckResponseBody, WalletAuthState};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn check_handler(
    State(wallet_auth_service): State<WalletAuthState>,
    Path(realm): Path<String>,
    Query(query): Query<CheckQuery>,
) -> Result<Json<CheckResponseBody>, ApiError> {
    let realm = parse_realm(&realm)?;

    let lookup = wallet_auth_service
        .lookup(realm, &query.address)
        .await
        .map_err(wallet_auth_api_error)?;

    Ok(Json(lookup.into()))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn check_all_realms_handler(
    State(wallet_auth_service): State<WalletAuthState>,
    Query(query): Query<CheckQuery>,
) -> Result<Json<CheckAllRealmsResponseBody>, ApiError> {
    let lookup = wallet_auth_service
        .lookup_all_realms(&query.address)
        .await
        .map_err(wallet_auth_api_error)?;

    Ok(Json(lookup.into()))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
