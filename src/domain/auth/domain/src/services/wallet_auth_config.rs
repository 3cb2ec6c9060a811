// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::Duration;
use secrecy::SecretString;

use crate::{DEFAULT_CHALLENGE_TTL_SECS, DEFAULT_EMAIL_DOMAIN};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_SERVICE_NAME: &str = "Oracle Universe";

pub const DEFAULT_SESSION_TOKEN_TTL_SECS: u64 = 14 * 24 * 60 * 60;

const ENV_VAR_SIWA_JWT_SECRET: &str = "SIWA_JWT_SECRET";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct WalletAuthConfig {
    /// Appears in the first line of every challenge message
    pub service_name: String,
    pub challenge_ttl: Duration,
    pub email_domain: String,
}

impl Default for WalletAuthConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            challenge_ttl: Duration::seconds(DEFAULT_CHALLENGE_TTL_SECS as i64),
            email_domain: DEFAULT_EMAIL_DOMAIN.to_string(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct JwtSessionConfig {
    pub jwt_secret: SecretString,
    pub token_ttl: Duration,
    /// Whether the secret was generated because none was configured
    pub is_secret_generated: bool,
}

impl JwtSessionConfig {
    pub fn new(maybe_jwt_secret: Option<String>) -> Self {
        let is_secret_generated = maybe_jwt_secret.is_none();
        let jwt_secret = maybe_jwt_secret.unwrap_or_else(|| {
            random_strings::get_random_string(None, 64, &random_strings::AllowedSymbols::Alphanumeric)
        });

        Self {
            jwt_secret: SecretString::from(jwt_secret),
            token_ttl: Duration::seconds(DEFAULT_SESSION_TOKEN_TTL_SECS as i64),
            is_secret_generated,
        }
    }

    pub fn load_from_env() -> Self {
        Self::new(std::env::var(ENV_VAR_SIWA_JWT_SECRET).ok())
    }

    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }
}

impl Default for JwtSessionConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
