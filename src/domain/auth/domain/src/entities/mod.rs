// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod account;
mod challenge;
mod realm;
mod wallet_address;

pub use account::*;
pub use challenge::*;
pub use realm::*;
pub use wallet_address::*;
