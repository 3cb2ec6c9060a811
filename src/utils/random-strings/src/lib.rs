// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use rand::distributions::{Distribution, Uniform};
use rand::RngCore;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub enum AllowedSymbols {
    Alphanumeric,
}

impl AllowedSymbols {
    fn charset(&self) -> &'static [u8] {
        match self {
            Self::Alphanumeric => ALPHANUMERIC,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn get_random_string(prefix: Option<&str>, len: usize, allowed_symbols: &AllowedSymbols) -> String {
    let charset = allowed_symbols.charset();
    let mut rng = rand::thread_rng();
    let distribution = Uniform::from(0..charset.len());

    let mut result = String::with_capacity(prefix.map_or(0, str::len) + len);
    if let Some(prefix) = prefix {
        result.push_str(prefix);
    }
    for _ in 0..len {
        result.push(char::from(charset[distribution.sample(&mut rng)]));
    }
    result
}

/// Returns `num_bytes` of cryptographically secure randomness encoded as a
/// lowercase hex string (twice as many characters)
pub fn get_random_hex_bytes(num_bytes: usize) -> String {
    let mut bytes = vec![0u8; num_bytes];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
