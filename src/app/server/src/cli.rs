// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::net::IpAddr;
use std::path::PathBuf;

use siwa_auth::VerificationMode;

use crate::{LogFormat, ServerConfig};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Sign-In with Wallet API server
#[derive(Debug, Default, clap::Parser)]
#[command(name = "siwa-server", version)]
pub struct Cli {
    /// Path to the YAML config file
    #[arg(long, short, env = "SIWA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, env = "SIWA_HTTP_ADDRESS")]
    pub address: Option<IpAddr>,

    /// Port to listen on, 0 picks a random free port
    #[arg(long, env = "SIWA_HTTP_PORT")]
    pub port: Option<u16>,

    /// How signatures are verified: local or delegated
    #[arg(long, env = "SIWA_VERIFICATION_MODE")]
    pub verification_mode: Option<VerificationMode>,

    /// Base URL of the SIWE service used in delegated mode
    #[arg(long, env = "SIWA_SIWE_SERVICE_URL")]
    pub siwe_service_url: Option<String>,

    /// Log output format: pretty or json
    #[arg(long, env = "SIWA_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    pub fn load_config(&self) -> Result<ServerConfig, internal_error::InternalError> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load(path)?,
            None => ServerConfig::default(),
        };
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut ServerConfig) {
        if let Some(address) = self.address {
            config.http.address = address;
        }
        if let Some(port) = self.port {
            config.http.port = port;
        }
        if let Some(verification_mode) = self.verification_mode {
            config.verification.mode = verification_mode;
        }
        if let Some(siwe_service_url) = &self.siwe_service_url {
            config.verification.siwe_service.url.clone_from(siwe_service_url);
        }
        if let Some(log_format) = self.log_format {
            config.logging.format = log_format;
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
