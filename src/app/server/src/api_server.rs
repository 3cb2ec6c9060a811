// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::future::Future;
use std::net::SocketAddr;

use internal_error::{InternalError, ResultIntoInternal};
use siwa_adapter_http::{WalletAuthState, wallet_auth_router};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ApiServer {
    listener: tokio::net::TcpListener,
    app: axum::Router,
}

impl ApiServer {
    pub async fn bind(
        addr: SocketAddr,
        wallet_auth_service: WalletAuthState,
    ) -> Result<Self, InternalError> {
        let app = wallet_auth_router(wallet_auth_service).layer(
            tower::ServiceBuilder::new().layer(tower_http::trace::TraceLayer::new_for_http()),
        );

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .context_int_err(format!("binding {addr}"))?;

        Ok(Self { listener, app })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, InternalError> {
        self.listener.local_addr().int_err()
    }

    pub async fn run(
        self,
        shutdown_signal: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), InternalError> {
        axum::serve(self.listener, self.app)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .int_err()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
