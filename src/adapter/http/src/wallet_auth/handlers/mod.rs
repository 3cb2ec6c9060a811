// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod challenge_handler;
mod check_handler;
mod token_validate_handler;
mod verify_handler;

pub use challenge_handler::*;
pub use check_handler::*;
pub use token_validate_handler::*;
pub use verify_handler::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

use http_common::ApiError;
use siwa_auth::Realm;

/// Unknown realms look like unknown routes
pub(crate) fn parse_realm(realm: &str) -> Result<Realm, ApiError> {
    realm
        .parse()
        .map_err(|_| ApiError::not_found_without_reason())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
