// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Ternary cryptographic primitives: the `CurlP` and `Kerl` sponges and the
//! balanced-ternary / binary integer bridge underpinning `Kerl`.

#![deny(missing_docs)]

pub mod bigint;
pub mod sponge;

mod hash;

pub use hash::{Hash, HASH_LENGTH};
