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

use crate::{Account, AccountDisplayName, IssueSessionTokenError, Realm, SessionToken, WalletAddress};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Binds verified addresses to accounts, one account per realm and address
#[async_trait::async_trait]
pub trait AccountResolver: Send + Sync {
    /// Idempotent find-or-create. Concurrent calls for the same realm and
    /// address converge on a single account, and exactly one of them reports
    /// `created`.
    async fn resolve(
        &self,
        realm: Realm,
        address: &WalletAddress,
        display_name: Option<AccountDisplayName>,
    ) -> Result<ResolvedAccount, ResolveAccountError>;

    async fn find_account(
        &self,
        realm: Realm,
        address: &WalletAddress,
    ) -> Result<Option<Account>, InternalError>;

    async fn issue_session(&self, account: &Account) -> Result<SessionToken, IssueSessionTokenError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct ResolvedAccount {
    pub account: Account,
    pub created: bool,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum ResolveAccountError {
    #[error("Account could not be persisted")]
    PersistenceFailed(#[source] InternalError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
