// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Duration, TimeZone, Utc};
use siwa_auth::{Account, Challenge, DEFAULT_EMAIL_DOMAIN, Realm, WalletAddress};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const ADDRESS_ALICE: &str = "0x70997970c51812dc3a010c7d01b50e0d17dc79c8";
pub const ADDRESS_BOB: &str = "0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc";

pub fn wallet_address(address: &str) -> WalletAddress {
    WalletAddress::try_new(address).unwrap()
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2050, 1, 2, 12, 0, 0).unwrap()
}

pub fn make_test_challenge(address: &str, issued_at: DateTime<Utc>) -> Challenge {
    Challenge::new(wallet_address(address), issued_at, Duration::seconds(300)).unwrap()
}

pub fn make_test_account(realm: Realm, address: &str) -> Account {
    Account::new(
        realm,
        wallet_address(address),
        None,
        DEFAULT_EMAIL_DOMAIN,
        base_time(),
    )
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
