// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::{
    bigint::{self, BYTE_LENGTH},
    sponge::Sponge,
    HASH_LENGTH,
};

use tangle_ternary::Btrit;

use tiny_keccak::{Hasher, Keccak};

/// State of the ternary cryptographic function `Kerl`.
#[derive(Clone)]
pub struct Kerl {
    /// Actual keccak hash function.
    keccak: Keccak,
    /// Binary working state.
    binary_state: [u8; BYTE_LENGTH],
}

impl Default for Kerl {
    fn default() -> Self {
        Self {
            keccak: Keccak::v384(),
            binary_state: [0; BYTE_LENGTH],
        }
    }
}

impl Kerl {
    /// Creates a new `Kerl`.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Errors occurring during `Kerl` operations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The input or output buffer was not a multiple of `HASH_LENGTH`.
    #[error("trit slice length must be a multiple of {HASH_LENGTH}")]
    NotMultipleOfHashLength,
}

impl Sponge for Kerl {
    type Error = Error;

    /// Resets the internal state by replacing it with a fresh keccak instance.
    fn reset(&mut self) {
        self.keccak = Keccak::v384();
    }

    /// Absorbs `input` into the sponge by converting `HASH_LENGTH` chunks of it into 48-byte
    /// blocks fed to the inner keccak state.
    ///
    /// Trit 242 of every chunk is ignored by the conversion, matching the zeroed trit the squeeze
    /// side produces.
    fn absorb(&mut self, input: &[Btrit]) -> Result<(), Self::Error> {
        if input.len() % HASH_LENGTH != 0 {
            return Err(Error::NotMultipleOfHashLength);
        }

        for trits_chunk in input.chunks(HASH_LENGTH) {
            bigint::trits_to_bytes(trits_chunk, &mut self.binary_state);
            self.keccak.update(&self.binary_state);
        }

        Ok(())
    }

    /// Squeezes the sponge by converting the finalized keccak digest back into trits, filling
    /// `buf` in chunks of `HASH_LENGTH` at a time.
    ///
    /// After each chunk the bit-flipped digest is absorbed into a fresh keccak instance, so
    /// successive squeezes produce a chained sequence of distinct hashes.
    fn squeeze_into(&mut self, buf: &mut [Btrit]) -> Result<(), Self::Error> {
        if buf.len() % HASH_LENGTH != 0 {
            return Err(Error::NotMultipleOfHashLength);
        }

        for trit_chunk in buf.chunks_mut(HASH_LENGTH) {
            // `tiny_keccak` consumes the hasher on finalize, so swap a fresh one into place.
            let mut keccak = Keccak::v384();
            std::mem::swap(&mut self.keccak, &mut keccak);

            keccak.finalize(&mut self.binary_state);
            bigint::bytes_to_trits(&self.binary_state, trit_chunk);

            for byte in self.binary_state.iter_mut() {
                *byte = !*byte;
            }
            self.keccak.update(&self.binary_state);
        }
        Ok(())
    }
}
