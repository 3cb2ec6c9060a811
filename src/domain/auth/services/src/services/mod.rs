// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod account_resolver_impl;
mod challenge_service_impl;
mod jwt_session_token_issuer;
mod local_signature_verifier;
mod wallet_auth_service_impl;

pub use account_resolver_impl::*;
pub use challenge_service_impl::*;
pub use jwt_session_token_issuer::*;
pub use local_signature_verifier::*;
pub use wallet_auth_service_impl::*;
