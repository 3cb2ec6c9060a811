// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;

use internal_error::{InternalError, ResultIntoInternal};
use serde::{Deserialize, Serialize};
use siwa_adapter_siwe_service::{
    DEFAULT_SIWE_SERVICE_TIMEOUT_SECS,
    DEFAULT_SIWE_SERVICE_URL,
    SiweServiceConfig,
};
use siwa_auth::{
    DEFAULT_CHALLENGE_TTL_SECS,
    DEFAULT_EMAIL_DOMAIN,
    DEFAULT_SERVICE_NAME,
    DEFAULT_SESSION_TOKEN_TTL_SECS,
    JwtSessionConfig,
    VerificationMode,
    WalletAuthConfig,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_HTTP_PORT: u16 = 8090;
pub const DEFAULT_EVICTION_INTERVAL_SECS: u64 = 60;

/// Upper bound for challenge and session token lifetimes (10 years)
pub const MAX_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub http: HttpConfig,
    pub auth: AuthConfig,
    pub session: SessionConfig,
    pub verification: VerificationConfig,
    pub logging: LoggingConfig,
}

impl ServerConfig {
    pub fn load(path: &Path) -> Result<Self, InternalError> {
        let contents = std::fs::read_to_string(path)
            .context_int_err(format!("reading config {}", path.display()))?;

        let config = Self::from_yaml(&contents)
            .context_int_err(format!("parsing config {}", path.display()))?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file means all defaults
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents)
    }

    pub fn validate(&self) -> Result<(), InternalError> {
        ttl("auth.challenge_ttl_secs", self.auth.challenge_ttl_secs)?;
        ttl("session.token_ttl_secs", self.session.token_ttl_secs)?;
        Ok(())
    }

    pub fn wallet_auth_config(&self) -> Result<WalletAuthConfig, InternalError> {
        Ok(WalletAuthConfig {
            service_name: self.auth.service_name.clone(),
            challenge_ttl: ttl("auth.challenge_ttl_secs", self.auth.challenge_ttl_secs)?,
            email_domain: self.auth.email_domain.clone(),
        })
    }

    pub fn jwt_session_config(&self) -> Result<JwtSessionConfig, InternalError> {
        let token_ttl = ttl("session.token_ttl_secs", self.session.token_ttl_secs)?;

        let config = match &self.session.jwt_secret {
            Some(jwt_secret) => JwtSessionConfig::new(Some(jwt_secret.clone())),
            None => JwtSessionConfig::load_from_env(),
        };
        Ok(config.with_token_ttl(token_ttl))
    }

    pub fn siwe_service_config(&self) -> SiweServiceConfig {
        let siwe_service = &self.verification.siwe_service;
        SiweServiceConfig {
            url: siwe_service.url.clone(),
            timeout: std::time::Duration::from_secs(siwe_service.timeout_secs),
        }
    }
}

fn ttl(key: &str, secs: u64) -> Result<chrono::Duration, InternalError> {
    if secs > MAX_TTL_SECS {
        return InternalError::bail(format!(
            "{key} is {secs}, must not exceed {MAX_TTL_SECS} seconds"
        ));
    }
    let secs = i64::try_from(secs).int_err()?;
    Ok(chrono::Duration::seconds(secs))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    pub address: IpAddr,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_HTTP_PORT,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    pub service_name: String,
    pub challenge_ttl_secs: u64,
    pub email_domain: String,
    /// How often expired challenges are dropped from the store
    pub eviction_interval_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            challenge_ttl_secs: DEFAULT_CHALLENGE_TTL_SECS,
            email_domain: DEFAULT_EMAIL_DOMAIN.to_string(),
            eviction_interval_secs: DEFAULT_EVICTION_INTERVAL_SECS,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Falls back to `SIWA_JWT_SECRET`, then to a random secret
    pub jwt_secret: Option<String>,
    pub token_ttl_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl_secs: DEFAULT_SESSION_TOKEN_TTL_SECS,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VerificationConfig {
    pub mode: VerificationMode,
    pub siwe_service: SiweServiceSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiweServiceSection {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for SiweServiceSection {
    fn default() -> Self {
        Self {
            url: DEFAULT_SIWE_SERVICE_URL.to_string(),
            timeout_secs: DEFAULT_SIWE_SERVICE_TIMEOUT_SECS,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
