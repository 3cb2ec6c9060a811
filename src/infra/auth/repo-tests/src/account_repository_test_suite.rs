// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use siwa_auth::{
    AccountID,
    AccountRepository,
    CreateAccountDuplicateField,
    CreateAccountError,
    CreateAccountErrorDuplicate,
    GetAccountByIdError,
    Realm,
};

use crate::{ADDRESS_ALICE, ADDRESS_BOB, make_test_account, wallet_address};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_missing_account_not_found(account_repo: Arc<dyn AccountRepository>) {
    let maybe_account = account_repo
        .find_account_by_address(Realm::Agents, &wallet_address(ADDRESS_ALICE))
        .await
        .unwrap();
    assert!(maybe_account.is_none());

    let account_id = AccountID::new_random();
    assert_matches!(
        account_repo.get_account_by_id(&account_id).await,
        Err(GetAccountByIdError::NotFound(e)) if e.account_id == account_id
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_insert_and_locate_account(account_repo: Arc<dyn AccountRepository>) {
    let account = make_test_account(Realm::Agents, ADDRESS_ALICE);
    account_repo.create_account(&account).await.unwrap();

    let by_address = account_repo
        .find_account_by_address(Realm::Agents, &wallet_address(ADDRESS_ALICE))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_address.id, account.id);
    assert_eq!(by_address.address, account.address);
    assert_eq!(by_address.email, account.email);
    assert_eq!(by_address.profile, account.profile);
    assert_eq!(by_address.secret.expose(), account.secret.expose());

    let by_id = account_repo.get_account_by_id(&account.id).await.unwrap();
    assert_eq!(by_id.address, account.address);

    let other_realm = account_repo
        .find_account_by_address(Realm::Humans, &wallet_address(ADDRESS_ALICE))
        .await
        .unwrap();
    assert!(other_realm.is_none());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_duplicate_address_in_realm(account_repo: Arc<dyn AccountRepository>) {
    let account = make_test_account(Realm::Agents, ADDRESS_ALICE);
    account_repo.create_account(&account).await.unwrap();

    let same_address = make_test_account(Realm::Agents, ADDRESS_ALICE);
    assert_matches!(
        account_repo.create_account(&same_address).await,
        Err(CreateAccountError::Duplicate(CreateAccountErrorDuplicate {
            account_field: CreateAccountDuplicateField::Address
        }))
    );

    let mut same_id = make_test_account(Realm::Agents, ADDRESS_BOB);
    same_id.id = account.id;
    assert_matches!(
        account_repo.create_account(&same_id).await,
        Err(CreateAccountError::Duplicate(CreateAccountErrorDuplicate {
            account_field: CreateAccountDuplicateField::Id
        }))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_same_address_in_both_realms(account_repo: Arc<dyn AccountRepository>) {
    let agent = make_test_account(Realm::Agents, ADDRESS_ALICE);
    let human = make_test_account(Realm::Humans, ADDRESS_ALICE);

    account_repo.create_account(&agent).await.unwrap();
    account_repo.create_account(&human).await.unwrap();

    let address = wallet_address(ADDRESS_ALICE);
    let found_agent = account_repo
        .find_account_by_address(Realm::Agents, &address)
        .await
        .unwrap()
        .unwrap();
    let found_human = account_repo
        .find_account_by_address(Realm::Humans, &address)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found_agent.id, agent.id);
    assert_eq!(found_human.id, human.id);
    assert_eq!(found_human.realm, Realm::Humans);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
