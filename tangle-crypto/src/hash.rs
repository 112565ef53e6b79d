// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use tangle_ternary::{convert, Btrit};

use std::{convert::TryFrom, fmt};

/// The length of a hash in units of balanced trits.
pub const HASH_LENGTH: usize = 243;

/// Errors occurring when constructing a [`Hash`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A trit slice of the wrong length was interpreted as a hash.
    #[error("a hash must be {HASH_LENGTH} trits, got {0}")]
    WrongLength(usize),
}

/// Ternary cryptographic hash.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Hash([Btrit; HASH_LENGTH]);

impl Hash {
    /// The all-zero hash, also the null trunk/branch reference before attachment.
    pub fn zeros() -> Self {
        Self([Btrit::Zero; HASH_LENGTH])
    }

    /// The trits of the hash.
    pub fn as_trits(&self) -> &[Btrit] {
        &self.0
    }

    /// Mutable access to the trits of the hash.
    pub fn as_trits_mut(&mut self) -> &mut [Btrit] {
        &mut self.0
    }

    /// The weight of the hash: how many trits at its tail are zero. Proof of work drives this
    /// above the minimum weight magnitude demanded by the network.
    pub fn weight(&self) -> u8 {
        match self.0.iter().rposition(|trit| *trit != Btrit::Zero) {
            Some(position) => (HASH_LENGTH - 1 - position) as u8,
            None => HASH_LENGTH as u8,
        }
    }
}

impl<'a> TryFrom<&'a [Btrit]> for Hash {
    type Error = Error;

    fn try_from(trits: &'a [Btrit]) -> Result<Self, Self::Error> {
        <[Btrit; HASH_LENGTH]>::try_from(trits)
            .map(Self)
            .map_err(|_| Error::WrongLength(trits.len()))
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // A hash length is always a multiple of three.
        fmt::Display::fmt(&convert::trits_to_trytes(&self.0).unwrap(), f)
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self)
    }
}
