// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use internal_error::InternalError;
use siwa_adapter_siwe_service::SiweServiceSignatureVerifier;
use siwa_auth::{
    AccountRepository,
    ChallengeService,
    SessionTokenIssuer,
    SignatureVerifier,
    VerificationMode,
    WalletAuthService,
};
use siwa_auth_inmem::{InMemoryAccountRepository, InMemoryChallengeRepository};
use siwa_auth_services::{
    AccountResolverImpl,
    ChallengeMessageCodec,
    ChallengeServiceImpl,
    JwtSessionTokenIssuer,
    LocalSignatureVerifier,
    WalletAuthServiceImpl,
};
use time_source::{SystemTimeSource, SystemTimeSourceDefault};

use crate::{ApiServer, Cli, ServerConfig, configure_logging};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn run(cli: Cli) -> Result<(), InternalError> {
    let config = cli.load_config()?;

    configure_logging(config.logging.format);

    let components = WalletAuthComponents::build(&config, Arc::new(SystemTimeSourceDefault::new()))?;

    let eviction_task = tokio::spawn(run_challenge_eviction(
        components.challenge_service.clone(),
        Duration::from_secs(config.auth.eviction_interval_secs),
    ));

    let api_server = ApiServer::bind(
        SocketAddr::new(config.http.address, config.http.port),
        components.wallet_auth_service,
    )
    .await?;

    tracing::info!(
        addr = %api_server.local_addr()?,
        verification_mode = %config.verification.mode,
        "Serving wallet sign-in API"
    );

    let result = api_server.run(shutdown_signal()).await;

    eviction_task.abort();
    tracing::info!("Server stopped");

    result
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct WalletAuthComponents {
    pub challenge_service: Arc<dyn ChallengeService>,
    pub wallet_auth_service: Arc<dyn WalletAuthService>,
}

impl WalletAuthComponents {
    pub fn build(
        config: &ServerConfig,
        time_source: Arc<dyn SystemTimeSource>,
    ) -> Result<Self, InternalError> {
        let wallet_auth_config = config.wallet_auth_config()?;

        let jwt_session_config = config.jwt_session_config()?;
        if jwt_session_config.is_secret_generated {
            tracing::warn!("JWT secret is not configured, issued tokens will not survive a restart");
        }

        let account_repo: Arc<dyn AccountRepository> = Arc::new(InMemoryAccountRepository::new());
        let codec = Arc::new(ChallengeMessageCodec::new(
            wallet_auth_config.service_name.clone(),
        ));

        let challenge_service: Arc<dyn ChallengeService> = Arc::new(ChallengeServiceImpl::new(
            Arc::new(InMemoryChallengeRepository::new()),
            time_source.clone(),
            &wallet_auth_config,
        ));

        let signature_verifier: Arc<dyn SignatureVerifier> = match config.verification.mode {
            VerificationMode::Local => Arc::new(LocalSignatureVerifier::new(
                challenge_service.clone(),
                codec.clone(),
            )),
            VerificationMode::Delegated => Arc::new(SiweServiceSignatureVerifier::new(
                &config.siwe_service_config(),
            )?),
        };

        let session_token_issuer: Arc<dyn SessionTokenIssuer> = Arc::new(JwtSessionTokenIssuer::new(
            account_repo.clone(),
            time_source.clone(),
            jwt_session_config,
        ));

        let account_resolver = Arc::new(AccountResolverImpl::new(
            account_repo,
            session_token_issuer.clone(),
            time_source,
            &wallet_auth_config,
        ));

        let wallet_auth_service = Arc::new(WalletAuthServiceImpl::new(
            challenge_service.clone(),
            signature_verifier,
            account_resolver,
            session_token_issuer,
            codec,
        ));

        Ok(Self {
            challenge_service,
            wallet_auth_service,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Evicts expired challenges right away, then once per `period`. A zero
/// period disables eviction.
pub async fn run_challenge_eviction(challenge_service: Arc<dyn ChallengeService>, period: Duration) {
    if period.is_zero() {
        tracing::debug!("Periodic challenge eviction is disabled");
        return;
    }

    // The first tick completes immediately
    let mut interval = tokio::time::interval(period);

    loop {
        interval.tick().await;

        if let Err(e) = challenge_service.evict_expired().await {
            tracing::error!(error = ?e, error_msg = %e.reason(), "Challenge eviction failed");
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
