// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod account_resolver;
mod challenge_service;
mod session_token_issuer;
mod signature_verifier;
mod wallet_auth_config;
mod wallet_auth_error;
mod wallet_auth_service;

pub use account_resolver::*;
pub use challenge_service::*;
pub use session_token_issuer::*;
pub use signature_verifier::*;
pub use wallet_auth_config::*;
pub use wallet_auth_error::*;
pub use wallet_auth_service::*;
