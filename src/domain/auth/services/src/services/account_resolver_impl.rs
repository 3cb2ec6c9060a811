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
use siwa_auth::{
    Account,
    AccountDisplayName,
    AccountRepository,
    AccountResolver,
    CreateAccountError,
    IssueSessionTokenError,
    Realm,
    ResolveAccountError,
    ResolvedAccount,
    SessionToken,
    SessionTokenIssuer,
    WalletAddress,
    WalletAuthConfig,
};
use time_source::SystemTimeSource;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct AccountResolverImpl {
    account_repo: Arc<dyn AccountRepository>,
    session_token_issuer: Arc<dyn SessionTokenIssuer>,
    time_source: Arc<dyn SystemTimeSource>,
    email_domain: String,
}

impl AccountResolverImpl {
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        session_token_issuer: Arc<dyn SessionTokenIssuer>,
        time_source: Arc<dyn SystemTimeSource>,
        config: &WalletAuthConfig,
    ) -> Self {
        Self {
            account_repo,
            session_token_issuer,
            time_source,
            email_domain: config.email_domain.clone(),
        }
    }

    async fn find_existing(
        &self,
        realm: Realm,
        address: &WalletAddress,
    ) -> Result<Option<Account>, ResolveAccountError> {
        self.account_repo
            .find_account_by_address(realm, address)
            .await
            .int_err()
            .map_err(ResolveAccountError::PersistenceFailed)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl AccountResolver for AccountResolverImpl {
    #[tracing::instrument(level = "debug", skip_all, fields(%realm, %address))]
    async fn resolve(
        &self,
        realm: Realm,
        address: &WalletAddress,
        display_name: Option<AccountDisplayName>,
    ) -> Result<ResolvedAccount, ResolveAccountError> {
        if let Some(account) = self.find_existing(realm, address).await? {
            return Ok(ResolvedAccount {
                account,
                created: false,
            });
        }

        let account = Account::new(
            realm,
            address.clone(),
            display_name,
            &self.email_domain,
            self.time_source.now(),
        );

        match self.account_repo.create_account(&account).await {
            Ok(()) => {
                tracing::info!(account_id = %account.id, "Account created");

                Ok(ResolvedAccount {
                    account,
                    created: true,
                })
            }
            Err(CreateAccountError::Duplicate(e)) => {
                // Lost the race to a concurrent sign-in of the same address
                tracing::info!(
                    duplicate_field = %e.account_field,
                    "Account creation conflicted, using the existing account"
                );

                match self.find_existing(realm, address).await? {
                    Some(account) => Ok(ResolvedAccount {
                        account,
                        created: false,
                    }),
                    None => Err(ResolveAccountError::PersistenceFailed(e.int_err())),
                }
            }
            Err(CreateAccountError::Internal(e)) => {
                tracing::error!(error = ?e, error_msg = %e, "Account could not be persisted");
                Err(ResolveAccountError::PersistenceFailed(e))
            }
        }
    }

    async fn find_account(
        &self,
        realm: Realm,
        address: &WalletAddress,
    ) -> Result<Option<Account>, InternalError> {
        self.account_repo
            .find_account_by_address(realm, address)
            .await
            .int_err()
    }

    #[tracing::instrument(level = "debug", skip_all, fields(account_id = %account.id))]
    async fn issue_session(&self, account: &Account) -> Result<SessionToken, IssueSessionTokenError> {
        self.session_token_issuer
            .issue_session(account)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, error_msg = %e, "Session token issuance failed"))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
