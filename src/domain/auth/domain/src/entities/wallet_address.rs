// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

static WALLET_ADDRESS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^(0[xX])?[0-9a-fA-F]{40}$").unwrap());

/// 20-byte EVM address in its canonical form: `0x` followed by 40 lowercase
/// hex digits. The `0x` prefix is optional on input and the case is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn try_new(value: impl AsRef<str>) -> Result<Self, InvalidWalletAddressError> {
        let value = value.as_ref().trim();
        if !WALLET_ADDRESS_REGEX.is_match(value) {
            return Err(InvalidWalletAddressError {
                value: value.to_string(),
            });
        }

        let hex_digits = value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
            .unwrap_or(value);

        Ok(Self(format!("0x{}", hex_digits.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<alloy_primitives::Address> for WalletAddress {
    fn from(value: alloy_primitives::Address) -> Self {
        Self(format!("0x{}", alloy_primitives::hex::encode(value.as_slice())))
    }
}

impl FromStr for WalletAddress {
    type Err = InvalidWalletAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_new(s)
    }
}

impl AsRef<str> for WalletAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid wallet address: '{value}'")]
pub struct InvalidWalletAddressError {
    pub value: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
