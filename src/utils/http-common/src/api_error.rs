// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const INTERNAL_ERROR_CODE: &str = "INTERNAL";

/// This type is used to simplify error handling in HTTP handler and unify
/// logging of API errors.
///
/// The typical usage pattern is:
///
/// ```
/// async fn handler() -> Result<(), ApiError> {
///     operation().await.api_err()?;
///     Ok(())
/// }
/// ````
///
/// A conversion between the domain error and [`ApiError`] has to exist. We on
/// purpose avoid [From] and [Into] traits and using [`IntoApiError`] instead as
/// we want this conversion to be explicit - it's too easy to put a question
/// mark operator on a fallible operation without thinking what it will actually
/// do.
///
/// Clients only ever see the stable error code, never the error message: the
/// message (and the source chain) goes to the server log.
#[derive(Debug, Error)]
#[error("api error {status_code:?}")]
pub struct ApiError {
    pub status_code: http::StatusCode,
    pub code: &'static str,
    source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl ApiError {
    pub fn new(
        source: impl std::error::Error + Send + Sync + 'static,
        status_code: http::StatusCode,
        code: &'static str,
    ) -> Self {
        Self {
            status_code,
            code,
            source: source.into(),
        }
    }

    pub fn bad_request(
        source: impl std::error::Error + Send + Sync + 'static,
        code: &'static str,
    ) -> Self {
        Self::new(source, http::StatusCode::BAD_REQUEST, code)
    }

    pub fn unauthorized(
        source: impl std::error::Error + Send + Sync + 'static,
        code: &'static str,
    ) -> Self {
        Self::new(source, http::StatusCode::UNAUTHORIZED, code)
    }

    pub fn not_found_without_reason() -> Self {
        Self {
            source: "Not Found".into(),
            status_code: http::StatusCode::NOT_FOUND,
            code: "NOT_FOUND",
        }
    }
}

impl From<InternalError> for ApiError {
    fn from(e: InternalError) -> Self {
        e.api_err()
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorResponse {
    pub error: String,
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if self.status_code.is_server_error() {
            tracing::error!(
                error = ?self.source,
                error_msg = %self.source,
                error_code = self.code,
                status_code = %self.status_code,
                "Internal API error",
            );
        } else {
            tracing::warn!(
                error = ?self.source,
                error_msg = %self.source,
                error_code = self.code,
                status_code = %self.status_code,
                "API error",
            );
        }

        let response_body = axum::response::Json(ApiErrorResponse {
            error: self.code.to_string(),
        });

        (self.status_code, response_body).into_response()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Provides explicit conversion into [`ApiError`].
pub trait IntoApiError {
    fn api_err(self) -> ApiError;
}

/// Allows using `.api_err()` method on [Result] types.
pub trait ResultIntoApiError<K, E>
where
    E: IntoApiError,
{
    fn api_err(self) -> Result<K, ApiError>;
}

impl<K, E> ResultIntoApiError<K, E> for Result<K, E>
where
    E: IntoApiError,
{
    fn api_err(self) -> Result<K, ApiError> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(e.api_err()),
        }
    }
}

impl IntoApiError for InternalError {
    fn api_err(self) -> ApiError {
        ApiError::new(
            self,
            http::StatusCode::INTERNAL_SERVER_ERROR,
            INTERNAL_ERROR_CODE,
        )
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
