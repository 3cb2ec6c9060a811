// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Realm, WalletAddress};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_EMAIL_DOMAIN: &str = "oracle.universe";

/// Amount of random bytes behind a freshly generated account secret
pub const ACCOUNT_SECRET_BYTES: usize = 16;

pub type AccountDisplayName = String;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountID(Uuid);

impl AccountID {
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for AccountID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for AccountID {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Opaque credential material bound to an account. It never leaves the
/// server and is redacted in debug output.
#[derive(Debug, Clone)]
pub struct AccountSecret(SecretString);

impl AccountSecret {
    pub fn new_random() -> Self {
        Self(SecretString::from(random_strings::get_random_hex_bytes(
            ACCOUNT_SECRET_BYTES,
        )))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<String> for AccountSecret {
    fn from(value: String) -> Self {
        Self(SecretString::from(value))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RealmProfile {
    Agent(AgentProfile),
    Human(HumanProfile),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub reputation: i64,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanProfile {
    pub github_username: Option<String>,
}

impl RealmProfile {
    /// Values assigned at creation; they are never reapplied to existing
    /// accounts
    pub fn defaults_for(realm: Realm) -> Self {
        match realm {
            Realm::Agents => Self::Agent(AgentProfile {
                reputation: 0,
                verified: false,
            }),
            Realm::Humans => Self::Human(HumanProfile {
                github_username: None,
            }),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountID,
    pub realm: Realm,
    pub address: WalletAddress,
    pub email: String,
    pub display_name: Option<AccountDisplayName>,
    pub profile: RealmProfile,
    pub secret: AccountSecret,
    pub registered_at: DateTime<Utc>,
}

impl Account {
    pub fn new(
        realm: Realm,
        address: WalletAddress,
        display_name: Option<AccountDisplayName>,
        email_domain: &str,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AccountID::new_random(),
            realm,
            email: synthetic_email(realm, &address, email_domain),
            address,
            display_name: display_name.filter(|name| !name.trim().is_empty()),
            profile: RealmProfile::defaults_for(realm),
            secret: AccountSecret::new_random(),
            registered_at,
        }
    }
}

pub fn synthetic_email(realm: Realm, address: &WalletAddress, email_domain: &str) -> String {
    format!("{address}@{}.{email_domain}", realm.email_subdomain())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
