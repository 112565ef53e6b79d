// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Winternitz one-time signature scheme over the ternary domain.
//!
//! A private key consists of one 6561-trit fragment per security level; each fragment holds 27
//! chunks of 243 trits. Signing reveals each chunk hashed `13 - m` times, where `m` is the
//! matching value of the normalized message; verification completes every chain to 26 rounds and
//! recomputes the address.

mod normalize;
mod sponge;

pub use normalize::{has_insecure_value, normalize, NormalizeError};
pub use sponge::{WotsSpongePrivateKeyGenerator, WotsSpongePrivateKeyGeneratorBuilder};

use crate::{
    seed::ZeroizeTrits, PrivateKey, PublicKey, RecoverableSignature, Signature,
};

use tangle_crypto::{sponge::Sponge, HASH_LENGTH};
use tangle_ternary::{Btrit, TritBuf};

use zeroize::Zeroize;

use std::{convert::TryFrom, fmt, marker::PhantomData};

/// The length of a key fragment in trits. One fragment signs 27 message values.
pub const KEY_FRAGMENT_LENGTH: usize = 6561;

/// The total number of hashing rounds in a Winternitz chain.
const CHAIN_ROUNDS: i8 = 26;

/// Available security levels of a Winternitz keypair. Higher levels mean larger keys and more
/// signature fragments per address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WotsSecurityLevel {
    /// Low security (one fragment).
    Low = 1,
    /// Medium security (two fragments).
    Medium = 2,
    /// High security (three fragments).
    High = 3,
}

impl Default for WotsSecurityLevel {
    fn default() -> Self {
        WotsSecurityLevel::Medium
    }
}

impl TryFrom<u8> for WotsSecurityLevel {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(WotsSecurityLevel::Low),
            2 => Ok(WotsSecurityLevel::Medium),
            3 => Ok(WotsSecurityLevel::High),
            _ => Err(Error::InvalidSecurityLevel(value)),
        }
    }
}

/// Errors occurring during Winternitz operations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Missing security level in the generator builder.
    #[error("missing security level")]
    MissingSecurityLevel,
    /// A security level outside of `{1, 2, 3}`.
    #[error("invalid security level {0}")]
    InvalidSecurityLevel(u8),
    /// Entropy of a length other than one hash unit.
    #[error("invalid entropy length {0}")]
    InvalidEntropyLength(usize),
    /// A message of a length other than one hash unit.
    #[error("invalid message length {0}")]
    InvalidMessageLength(usize),
    /// A public key of a length other than one hash unit.
    #[error("invalid public key length {0}")]
    InvalidPublicKeyLength(usize),
    /// A signature whose length is not a multiple of a key fragment.
    #[error("invalid signature length {0}")]
    InvalidSignatureLength(usize),
    /// An underlying sponge operation failed.
    #[error("failed sponge operation")]
    FailedSpongeOperation,
}

/// A Winternitz private key. The key material is wiped when the key is dropped.
pub struct WotsPrivateKey<S> {
    pub(crate) state: TritBuf,
    pub(crate) marker: PhantomData<S>,
}

impl<S: Sponge + Default> WotsPrivateKey<S> {
    /// Returns the security level of the key.
    pub fn security_level(&self) -> WotsSecurityLevel {
        // The state length is checked at construction.
        WotsSecurityLevel::try_from((self.state.len() / KEY_FRAGMENT_LENGTH) as u8).unwrap()
    }

    /// Computes the key digests: one 243-trit digest per key fragment.
    ///
    /// Each 243-trit chunk of a fragment is hashed 26 times; the digest is the hash of the 27
    /// processed chunks.
    pub fn digests(&self) -> Result<TritBuf, Error> {
        let mut sponge = S::default();
        let mut digests = TritBuf::zeros(self.state.len() / KEY_FRAGMENT_LENGTH * HASH_LENGTH);

        for (fragment_index, fragment) in self.state.chunks(KEY_FRAGMENT_LENGTH).enumerate() {
            let mut fragment = TritBuf::from_trits(fragment);

            for chunk in fragment.chunks_mut(HASH_LENGTH) {
                for _ in 0..CHAIN_ROUNDS {
                    hash_in_place(&mut sponge, chunk)?;
                }
            }

            sponge
                .digest_into(
                    &fragment,
                    &mut digests[fragment_index * HASH_LENGTH..(fragment_index + 1) * HASH_LENGTH],
                )
                .map_err(|_| Error::FailedSpongeOperation)?;
        }

        Ok(digests)
    }
}

impl<S: Sponge + Default> PrivateKey for WotsPrivateKey<S> {
    type PublicKey = WotsPublicKey<S>;
    type Signature = WotsSignature<S>;
    type Error = Error;

    fn generate_public_key(&self) -> Result<Self::PublicKey, Self::Error> {
        let mut sponge = S::default();
        let digests = self.digests()?;

        let mut hash = TritBuf::zeros(HASH_LENGTH);
        sponge
            .digest_into(&digests, &mut hash)
            .map_err(|_| Error::FailedSpongeOperation)?;

        Ok(WotsPublicKey {
            state: hash,
            marker: PhantomData,
        })
    }

    fn sign(&mut self, message: &[Btrit]) -> Result<Self::Signature, Self::Error> {
        if message.len() != HASH_LENGTH {
            return Err(Error::InvalidMessageLength(message.len()));
        }

        let mut sponge = S::default();
        let mut signature = self.state.clone();

        for (fragment_index, fragment) in signature.chunks_mut(KEY_FRAGMENT_LENGTH).enumerate() {
            let values = &message[fragment_index * 81..(fragment_index + 1) * 81];

            for (chunk_index, chunk) in fragment.chunks_mut(HASH_LENGTH).enumerate() {
                let value = tryte_value(&values[chunk_index * 3..chunk_index * 3 + 3]);

                for _ in 0..CHAIN_ROUNDS / 2 - value {
                    hash_in_place(&mut sponge, chunk)?;
                }
            }
        }

        Ok(WotsSignature {
            state: signature,
            marker: PhantomData,
        })
    }
}

impl<S> Zeroize for WotsPrivateKey<S> {
    fn zeroize(&mut self) {
        self.state.zeroize_trits();
    }
}

impl<S> Drop for WotsPrivateKey<S> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<S> fmt::Debug for WotsPrivateKey<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WotsPrivateKey(<secret>)")
    }
}

/// A Winternitz public key: the address of the matching private key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WotsPublicKey<S> {
    state: TritBuf,
    marker: PhantomData<S>,
}

impl<S: Sponge + Default> WotsPublicKey<S> {
    /// Creates a public key from exactly [`HASH_LENGTH`] trits.
    pub fn from_trits(state: TritBuf) -> Result<Self, Error> {
        if state.len() != HASH_LENGTH {
            return Err(Error::InvalidPublicKeyLength(state.len()));
        }

        Ok(Self {
            state,
            marker: PhantomData,
        })
    }
}

impl<S: Sponge + Default> PublicKey for WotsPublicKey<S> {
    type Signature = WotsSignature<S>;
    type Error = Error;

    fn verify(&self, message: &[Btrit], signature: &Self::Signature) -> Result<bool, Self::Error> {
        let public_key = signature.recover_public_key(message)?;

        Ok(self.state == public_key.state)
    }

    fn as_trits(&self) -> &[Btrit] {
        &self.state
    }
}

/// A Winternitz signature, one 6561-trit fragment per security level of the signing key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WotsSignature<S> {
    state: TritBuf,
    marker: PhantomData<S>,
}

impl<S: Sponge + Default> WotsSignature<S> {
    /// Creates a signature from a whole number of key fragments.
    pub fn from_trits(state: TritBuf) -> Result<Self, Error> {
        if state.len() % KEY_FRAGMENT_LENGTH != 0 || state.is_empty() || state.len() > 3 * KEY_FRAGMENT_LENGTH {
            return Err(Error::InvalidSignatureLength(state.len()));
        }

        Ok(Self {
            state,
            marker: PhantomData,
        })
    }
}

impl<S: Sponge + Default> Signature for WotsSignature<S> {
    type Error = Error;

    fn size(&self) -> usize {
        self.state.len()
    }

    fn as_trits(&self) -> &[Btrit] {
        &self.state
    }
}

impl<S: Sponge + Default> RecoverableSignature for WotsSignature<S> {
    type PublicKey = WotsPublicKey<S>;
    type Error = Error;

    fn recover_public_key(
        &self,
        message: &[Btrit],
    ) -> Result<Self::PublicKey, <Self as RecoverableSignature>::Error> {
        if message.len() != HASH_LENGTH {
            return Err(Error::InvalidMessageLength(message.len()));
        }

        let mut sponge = S::default();
        let mut digests = TritBuf::zeros(self.state.len() / KEY_FRAGMENT_LENGTH * HASH_LENGTH);
        let mut state = self.state.clone();

        for (fragment_index, fragment) in state.chunks_mut(KEY_FRAGMENT_LENGTH).enumerate() {
            let values = &message[fragment_index * 81..(fragment_index + 1) * 81];

            for (chunk_index, chunk) in fragment.chunks_mut(HASH_LENGTH).enumerate() {
                let value = tryte_value(&values[chunk_index * 3..chunk_index * 3 + 3]);

                for _ in 0..CHAIN_ROUNDS / 2 + value {
                    hash_in_place(&mut sponge, chunk)?;
                }
            }

            sponge
                .digest_into(
                    fragment,
                    &mut digests[fragment_index * HASH_LENGTH..(fragment_index + 1) * HASH_LENGTH],
                )
                .map_err(|_| Error::FailedSpongeOperation)?;
        }

        let mut hash = TritBuf::zeros(HASH_LENGTH);
        sponge
            .digest_into(&digests, &mut hash)
            .map_err(|_| Error::FailedSpongeOperation)?;

        Ok(WotsPublicKey {
            state: hash,
            marker: PhantomData,
        })
    }
}

/// Recomposes a message value in `{-13, .., 13}` from three message trits.
fn tryte_value(trits: &[Btrit]) -> i8 {
    trits[0] as i8 + 3 * trits[1] as i8 + 9 * trits[2] as i8
}

/// One round of a Winternitz chain: replaces `chunk` with its sponge digest.
fn hash_in_place<S: Sponge>(sponge: &mut S, chunk: &mut [Btrit]) -> Result<(), Error> {
    sponge.absorb(chunk).map_err(|_| Error::FailedSpongeOperation)?;
    sponge
        .squeeze_into(chunk)
        .map_err(|_| Error::FailedSpongeOperation)?;
    sponge.reset();
    Ok(())
}
