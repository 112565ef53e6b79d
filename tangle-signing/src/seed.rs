// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Ternary seeds and deterministic subseed derivation.

use tangle_crypto::{
    sponge::{Kerl, Sponge},
    HASH_LENGTH,
};
use tangle_ternary::{convert, Btrit, TritBuf, TryteBuf};

use rand::Rng;
use zeroize::Zeroize;

use std::fmt;

/// The length of a seed in trits.
pub const SEED_LENGTH: usize = HASH_LENGTH;

/// The length of a seed in trytes.
pub const SEED_TRYTE_LENGTH: usize = SEED_LENGTH / 3;

/// Errors occurring while constructing seeds.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A seed was constructed from a trit sequence of invalid length.
    #[error("invalid seed length {0}")]
    InvalidLength(usize),
    /// A seed was constructed from a string containing non-tryte characters.
    #[error("invalid seed trytes")]
    InvalidTrytes,
}

/// A ternary seed, the root secret all keys of an account are derived from.
#[derive(Clone)]
pub struct Seed(TritBuf);

impl Seed {
    /// Creates a random seed.
    pub fn rand() -> Self {
        let mut rng = rand::thread_rng();
        let trits = (0..SEED_LENGTH)
            .map(|_| Btrit::try_from(rng.gen_range(-1..=1i8)).unwrap())
            .collect();
        Self(trits)
    }

    /// Parses a seed from a tryte string of at most 81 characters.
    ///
    /// Shorter strings are right-padded with `9`; longer ones are rejected.
    pub fn from_str(trytes: &str) -> Result<Self, Error> {
        if trytes.len() > SEED_TRYTE_LENGTH {
            return Err(Error::InvalidLength(trytes.len() * 3));
        }

        let mut trytes = TryteBuf::try_from_str(trytes).map_err(|_| Error::InvalidTrytes)?;
        while trytes.len() < SEED_TRYTE_LENGTH {
            trytes.push(tangle_ternary::Tryte::Nine);
        }

        Ok(Self(trytes.as_trits()))
    }

    /// Creates a seed from exactly [`SEED_LENGTH`] trits.
    pub fn from_trits(trits: TritBuf) -> Result<Self, Error> {
        if trits.len() != SEED_LENGTH {
            return Err(Error::InvalidLength(trits.len()));
        }

        Ok(Self(trits))
    }

    /// Derives the subseed at `index`: the Kerl digest of `seed + index` in balanced ternary.
    pub fn subseed(&self, index: u64) -> Self {
        let mut subseed = self.0.clone();
        // An index never exceeds the range of 81 trits.
        let index_trits = convert::trits_from_i64(index as i64, SEED_LENGTH).unwrap();
        convert::add_inplace(subseed.as_slice_mut(), &index_trits);

        let mut kerl = Kerl::default();
        // Absorbing and squeezing a single hash unit cannot fail.
        let hash = kerl.digest(&subseed).unwrap();
        subseed.zeroize_trits();

        Self(hash)
    }

    /// Interprets the seed as a trit slice.
    pub fn as_trits(&self) -> &[Btrit] {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never reveal the seed, even in debug output.
        f.write_str("Seed(<secret>)")
    }
}

impl Zeroize for Seed {
    fn zeroize(&mut self) {
        self.0.zeroize_trits();
    }
}

impl Drop for Seed {
    fn drop(&mut self) {
        self.zeroize();
    }
}

pub(crate) trait ZeroizeTrits {
    fn zeroize_trits(&mut self);
}

impl ZeroizeTrits for TritBuf {
    fn zeroize_trits(&mut self) {
        for trit in self.as_slice_mut() {
            // Volatile write so the compiler cannot elide the wipe.
            unsafe { std::ptr::write_volatile(trit, Btrit::Zero) };
        }
        std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);
    }
}
