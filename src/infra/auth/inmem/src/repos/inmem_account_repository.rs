// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct InMemoryAccountRepository {
    state: Arc<Mutex<State>>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Default)]
struct State {
    accounts_by_id: HashMap<AccountID, Account>,
    account_id_by_address: HashMap<(Realm, WalletAddress), AccountID>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
        }
    }
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create_account(&self, account: &Account) -> Result<(), CreateAccountError> {
        let mut guard = self.state.lock().unwrap();
        if guard.accounts_by_id.contains_key(&account.id) {
            return Err(CreateAccountError::Duplicate(CreateAccountErrorDuplicate {
                account_field: CreateAccountDuplicateField::Id,
            }));
        }

        let address_key = (account.realm, account.address.clone());
        if guard.account_id_by_address.contains_key(&address_key) {
            return Err(CreateAccountError::Duplicate(CreateAccountErrorDuplicate {
                account_field: CreateAccountDuplicateField::Address,
            }));
        }
        if guard
            .accounts_by_id
            .values()
            .any(|existing| existing.email.eq_ignore_ascii_case(&account.email))
        {
            return Err(CreateAccountError::Duplicate(CreateAccountErrorDuplicate {
                account_field: CreateAccountDuplicateField::Email,
            }));
        }

        guard.accounts_by_id.insert(account.id, account.clone());
        guard.account_id_by_address.insert(address_key, account.id);

        Ok(())
    }

    async fn get_account_by_id(
        &self,
        account_id: &AccountID,
    ) -> Result<Account, GetAccountByIdError> {
        let guard = self.state.lock().unwrap();
        if let Some(account) = guard.accounts_by_id.get(account_id) {
            Ok(account.clone())
        } else {
            Err(GetAccountByIdError::NotFound(AccountNotFoundByIdError {
                account_id: *account_id,
            }))
        }
    }

    async fn find_account_by_address(
        &self,
        realm: Realm,
        address: &WalletAddress,
    ) -> Result<Option<Account>, FindAccountByAddressError> {
        let guard = self.state.lock().unwrap();

        Ok(guard
            .account_id_by_address
            .get(&(realm, address.clone()))
            .and_then(|account_id| guard.accounts_by_id.get(account_id))
            .cloned())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
