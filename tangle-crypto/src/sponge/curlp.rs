// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::{sponge::Sponge, HASH_LENGTH};

use tangle_ternary::{Btrit, TritBuf};

use std::convert::Infallible;

/// The number of trits in the sponge state: three hash units.
const STATE_LENGTH: usize = 3 * HASH_LENGTH;

/// How far the read position jumps between the two trits feeding one output trit.
const REWIRE: usize = 364;

/// The substitution box, indexed by `(a + 1) + 3·(b + 1)` for input trits `a` and `b`.
const SBOX: [Btrit; 9] = [
    Btrit::PlusOne,
    Btrit::Zero,
    Btrit::NegOne,
    Btrit::PlusOne,
    Btrit::NegOne,
    Btrit::Zero,
    Btrit::NegOne,
    Btrit::PlusOne,
    Btrit::Zero,
];

/// State of the ternary cryptographic function `CurlP`, parameterized by its round count.
///
/// The protocol pins the round count per purpose: 27 rounds for HMAC stamps, 81 rounds for
/// transaction material. Carrying the count in the type keeps the two from being mixed up.
pub struct CurlP<const ROUNDS: usize> {
    state: TritBuf,
    scratch: TritBuf,
}

/// `CurlP` with 27 rounds.
pub type CurlP27 = CurlP<27>;

/// `CurlP` with 81 rounds.
pub type CurlP81 = CurlP<81>;

impl<const ROUNDS: usize> CurlP<ROUNDS> {
    /// Creates a sponge with an all-zero state.
    pub fn new() -> Self {
        Self {
            state: TritBuf::zeros(STATE_LENGTH),
            scratch: TritBuf::zeros(STATE_LENGTH),
        }
    }

    /// Runs the permutation: `ROUNDS` applications of the substitution box over the rewired
    /// state.
    ///
    /// Within a round, a read position starts at trit 0 and advances by [`REWIRE`] modulo the
    /// state length; output trit `i` substitutes the trits found at stops `i` and `i + 1` of
    /// that walk. Every round reads the complete output of the previous one.
    fn transform(&mut self) {
        for _ in 0..ROUNDS {
            let mut stop = 0;

            for slot in self.scratch.iter_mut() {
                let a = self.state[stop];
                stop = if stop < STATE_LENGTH - REWIRE {
                    stop + REWIRE
                } else {
                    stop - REWIRE - 1
                };
                let b = self.state[stop];

                *slot = SBOX[(a as i8 + 1) as usize + 3 * (b as i8 + 1) as usize];
            }

            std::mem::swap(&mut self.state, &mut self.scratch);
        }
    }
}

impl<const ROUNDS: usize> Default for CurlP<ROUNDS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const ROUNDS: usize> Sponge for CurlP<ROUNDS> {
    type Error = Infallible;

    fn reset(&mut self) {
        self.state.fill(Btrit::Zero);
    }

    /// Writes the input over the head of the state one hash unit at a time, permuting after
    /// each unit. A trailing unit shorter than [`HASH_LENGTH`] overwrites only as many leading
    /// trits as it has; the rest of the state rolls over from the previous permutation.
    fn absorb(&mut self, input: &[Btrit]) -> Result<(), Self::Error> {
        for unit in input.chunks(HASH_LENGTH) {
            self.state[..unit.len()].copy_from_slice(unit);
            self.transform();
        }
        Ok(())
    }

    /// Reads hash units off the head of the state, permuting between units.
    fn squeeze_into(&mut self, buf: &mut [Btrit]) -> Result<(), Self::Error> {
        for unit in buf.chunks_mut(HASH_LENGTH) {
            unit.copy_from_slice(&self.state[..unit.len()]);
            self.transform();
        }
        Ok(())
    }
}
