// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Ternary sponge constructions.

mod curlp;
mod kerl;

pub use curlp::{CurlP, CurlP27, CurlP81};
pub use kerl::Kerl;

use crate::HASH_LENGTH;

use tangle_ternary::{Btrit, TritBuf};

/// The absorb/squeeze interface shared by the ternary hash functions.
///
/// Implementations consume and produce trits in units of [`HASH_LENGTH`]; how state carries over
/// between units is up to the implementation. The one-shot helpers all leave the sponge back in
/// its initial state.
pub trait Sponge {
    /// The failure mode of the sponge's operations.
    type Error;

    /// Returns the sponge to its initial state.
    fn reset(&mut self);

    /// Feeds `input` into the sponge state.
    fn absorb(&mut self, input: &[Btrit]) -> Result<(), Self::Error>;

    /// Extracts hash output from the sponge state into `buf`.
    fn squeeze_into(&mut self, buf: &mut [Btrit]) -> Result<(), Self::Error>;

    /// Extracts one owned hash unit from the sponge state.
    fn squeeze(&mut self) -> Result<TritBuf, Self::Error> {
        let mut unit = TritBuf::zeros(HASH_LENGTH);
        self.squeeze_into(&mut unit).map(|()| unit)
    }

    /// One-shot hash of `input` into `buf`.
    fn digest_into(&mut self, input: &[Btrit], buf: &mut [Btrit]) -> Result<(), Self::Error> {
        self.absorb(input)?;
        self.squeeze_into(buf)?;
        self.reset();
        Ok(())
    }

    /// One-shot hash of `input` into an owned hash unit.
    fn digest(&mut self, input: &[Btrit]) -> Result<TritBuf, Self::Error> {
        let mut unit = TritBuf::zeros(HASH_LENGTH);
        self.digest_into(input, &mut unit).map(|()| unit)
    }
}
