// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use internal_error::{ErrorIntoInternal, InternalError, ResultIntoInternal};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use siwa_auth::{
    Account,
    AccountID,
    AccountRepository,
    GetAccountByIdError,
    InvalidSessionTokenError,
    IssueSessionTokenError,
    JwtSessionConfig,
    Realm,
    SessionToken,
    SessionTokenIssuer,
    ValidateSessionTokenError,
};
use time_source::SystemTimeSource;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const SIWA_JWT_ISSUER: &str = "siwa";
const SIWA_JWT_ALGORITHM: Algorithm = Algorithm::HS384;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Issues HS384 JWTs signed with the server secret concatenated with the
/// account secret, so a token only validates while its account keeps the
/// secret it was issued against
pub struct JwtSessionTokenIssuer {
    account_repo: Arc<dyn AccountRepository>,
    time_source: Arc<dyn SystemTimeSource>,
    config: JwtSessionConfig,
}

impl JwtSessionTokenIssuer {
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        time_source: Arc<dyn SystemTimeSource>,
        config: JwtSessionConfig,
    ) -> Self {
        Self {
            account_repo,
            time_source,
            config,
        }
    }

    fn signing_secret(&self, account: &Account) -> Vec<u8> {
        let server_secret = self.config.jwt_secret.expose_secret().as_bytes();
        let account_secret = account.secret.expose().as_bytes();

        let mut secret = Vec::with_capacity(server_secret.len() + account_secret.len());
        secret.extend_from_slice(server_secret);
        secret.extend_from_slice(account_secret);
        secret
    }

    /// Reads the claims without checking the signature, only to find out
    /// which account's secret the token has to be checked against
    fn peek_subject(token: &str) -> Result<AccountID, InvalidSessionTokenError> {
        let mut validation = Validation::new(SIWA_JWT_ALGORITHM);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;

        let token_data =
            decode::<SessionTokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
                .map_err(|e| InvalidSessionTokenError::new(e.to_string()))?;

        token_data
            .claims
            .sub
            .parse()
            .map_err(|_| InvalidSessionTokenError::new("malformed subject"))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl SessionTokenIssuer for JwtSessionTokenIssuer {
    #[tracing::instrument(level = "debug", skip_all, fields(account_id = %account.id))]
    async fn issue_session(&self, account: &Account) -> Result<SessionToken, IssueSessionTokenError> {
        let issued_at = self.time_source.now();
        let Some(expires_at) = issued_at.checked_add_signed(self.config.token_ttl) else {
            return Err(InternalError::new(format!(
                "Session token TTL {} overflows the expiry time",
                self.config.token_ttl
            ))
            .into());
        };

        let claims = SessionTokenClaims {
            iat: usize::try_from(issued_at.timestamp()).int_err()?,
            exp: usize::try_from(expires_at.timestamp()).int_err()?,
            iss: String::from(SIWA_JWT_ISSUER),
            sub: account.id.to_string(),
            realm: account.realm,
            address: account.address.to_string(),
        };

        let token = encode(
            &Header::new(SIWA_JWT_ALGORITHM),
            &claims,
            &EncodingKey::from_secret(&self.signing_secret(account)),
        )
        .map_err(ErrorIntoInternal::int_err)?;

        Ok(SessionToken { token, expires_at })
    }

    #[tracing::instrument(level = "debug", skip_all)]
    async fn validate_session(&self, token: &str) -> Result<Account, ValidateSessionTokenError> {
        let account_id = Self::peek_subject(token)?;

        let account = match self.account_repo.get_account_by_id(&account_id).await {
            Ok(account) => account,
            Err(GetAccountByIdError::NotFound(_)) => {
                return Err(InvalidSessionTokenError::new("unknown account").into());
            }
            Err(GetAccountByIdError::Internal(e)) => return Err(e.into()),
        };

        let mut validation = Validation::new(SIWA_JWT_ALGORITHM);
        validation.set_issuer(&[SIWA_JWT_ISSUER]);

        let token_data = decode::<SessionTokenClaims>(
            token,
            &DecodingKey::from_secret(&self.signing_secret(&account)),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => InvalidSessionTokenError::new("token expired"),
            _ => InvalidSessionTokenError::new(e.to_string()),
        })?;

        if token_data.claims.realm != account.realm {
            return Err(InvalidSessionTokenError::new("realm mismatch").into());
        }

        Ok(account)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Serialize, Deserialize)]
struct SessionTokenClaims {
    exp: usize,
    iat: usize,
    iss: String,
    sub: String,
    realm: Realm,
    address: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
