// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;
use thiserror::Error;

use crate::{
    InvalidSessionTokenError,
    InvalidSignatureFormatError,
    InvalidWalletAddressError,
    IssueSessionTokenError,
    ResolveAccountError,
    UpstreamUnavailableError,
    ValidateSessionTokenError,
    VerifySignatureError,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Stable identifiers of the failure classes, the only error detail clients
/// ever see
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum WalletAuthErrorCode {
    InvalidAddressFormat,
    InvalidSignatureFormat,
    InvalidSignatureOrExpiredChallenge,
    AccountPersistenceFailed,
    TokenIssuanceFailed,
    UpstreamUnavailable,
    InvalidSessionToken,
    Internal,
}

impl WalletAuthErrorCode {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum WalletAuthError {
    #[error(transparent)]
    InvalidAddressFormat(#[from] InvalidWalletAddressError),

    #[error(transparent)]
    InvalidSignatureFormat(#[from] InvalidSignatureFormatError),

    #[error("Invalid signature or expired challenge")]
    InvalidSignatureOrExpiredChallenge,

    #[error("Account could not be persisted")]
    AccountPersistenceFailed(#[source] InternalError),

    #[error("Session token could not be issued")]
    TokenIssuanceFailed(#[source] InternalError),

    #[error(transparent)]
    UpstreamUnavailable(#[from] UpstreamUnavailableError),

    #[error(transparent)]
    InvalidSessionToken(#[from] InvalidSessionTokenError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl WalletAuthError {
    pub fn code(&self) -> WalletAuthErrorCode {
        match self {
            Self::InvalidAddressFormat(_) => WalletAuthErrorCode::InvalidAddressFormat,
            Self::InvalidSignatureFormat(_) => WalletAuthErrorCode::InvalidSignatureFormat,
            Self::InvalidSignatureOrExpiredChallenge => {
                WalletAuthErrorCode::InvalidSignatureOrExpiredChallenge
            }
            Self::AccountPersistenceFailed(_) => WalletAuthErrorCode::AccountPersistenceFailed,
            Self::TokenIssuanceFailed(_) => WalletAuthErrorCode::TokenIssuanceFailed,
            Self::UpstreamUnavailable(_) => WalletAuthErrorCode::UpstreamUnavailable,
            Self::InvalidSessionToken(_) => WalletAuthErrorCode::InvalidSessionToken,
            Self::Internal(_) => WalletAuthErrorCode::Internal,
        }
    }
}

impl From<VerifySignatureError> for WalletAuthError {
    fn from(value: VerifySignatureError) -> Self {
        match value {
            VerifySignatureError::InvalidSignatureFormat(e) => Self::InvalidSignatureFormat(e),
            VerifySignatureError::InvalidSignatureOrExpiredChallenge => {
                Self::InvalidSignatureOrExpiredChallenge
            }
            VerifySignatureError::UpstreamUnavailable(e) => Self::UpstreamUnavailable(e),
            VerifySignatureError::Internal(e) => Self::Internal(e),
        }
    }
}

impl From<ResolveAccountError> for WalletAuthError {
    fn from(value: ResolveAccountError) -> Self {
        match value {
            ResolveAccountError::PersistenceFailed(e) => Self::AccountPersistenceFailed(e),
            ResolveAccountError::Internal(e) => Self::Internal(e),
        }
    }
}

impl From<IssueSessionTokenError> for WalletAuthError {
    fn from(value: IssueSessionTokenError) -> Self {
        match value {
            IssueSessionTokenError::Internal(e) => Self::TokenIssuanceFailed(e),
        }
    }
}

impl From<ValidateSessionTokenError> for WalletAuthError {
    fn from(value: ValidateSessionTokenError) -> Self {
        match value {
            ValidateSessionTokenError::InvalidToken(e) => Self::InvalidSessionToken(e),
            ValidateSessionTokenError::Internal(e) => Self::Internal(e),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
