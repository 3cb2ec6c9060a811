// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Population of actors an account belongs to. Each realm keeps its own
/// accounts, so one address may hold an account in both.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Realm {
    Agents,
    Humans,
}

impl Realm {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Subdomain used in synthetic account emails
    pub fn email_subdomain(&self) -> &'static str {
        match self {
            Self::Agents => "agent",
            Self::Humans => "human",
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
