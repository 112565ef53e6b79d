// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::{
    wots::{Error, WotsPrivateKey, WotsSecurityLevel, KEY_FRAGMENT_LENGTH},
    PrivateKeyGenerator,
};

use tangle_crypto::{sponge::Sponge, HASH_LENGTH};
use tangle_ternary::{Btrit, TritBuf};

use std::marker::PhantomData;

/// Builder for a [`WotsSpongePrivateKeyGenerator`]. The security level is mandatory.
pub struct WotsSpongePrivateKeyGeneratorBuilder<S> {
    security_level: Option<WotsSecurityLevel>,
    marker: PhantomData<S>,
}

impl<S> Default for WotsSpongePrivateKeyGeneratorBuilder<S> {
    fn default() -> Self {
        Self {
            security_level: None,
            marker: PhantomData,
        }
    }
}

impl<S: Sponge + Default> WotsSpongePrivateKeyGeneratorBuilder<S> {
    /// Sets the security level of the generated keys.
    pub fn security_level(mut self, security_level: WotsSecurityLevel) -> Self {
        self.security_level = Some(security_level);
        self
    }

    /// Builds the generator.
    pub fn build(self) -> Result<WotsSpongePrivateKeyGenerator<S>, Error> {
        Ok(WotsSpongePrivateKeyGenerator {
            security_level: self.security_level.ok_or(Error::MissingSecurityLevel)?,
            marker: PhantomData,
        })
    }
}

/// A Winternitz private key generator that squeezes key material straight out of a sponge seeded
/// with entropy.
pub struct WotsSpongePrivateKeyGenerator<S> {
    security_level: WotsSecurityLevel,
    marker: PhantomData<S>,
}

impl<S: Sponge + Default> PrivateKeyGenerator for WotsSpongePrivateKeyGenerator<S> {
    type PrivateKey = WotsPrivateKey<S>;
    type Error = Error;

    /// Derives a private key from entropy, usually the subseed of a seed at some index.
    ///
    /// The sponge absorbs the entropy once and is squeezed into the whole key, one chained hash
    /// unit at a time.
    fn generate_from_entropy(&self, entropy: &[Btrit]) -> Result<Self::PrivateKey, Self::Error> {
        if entropy.len() != HASH_LENGTH {
            return Err(Error::InvalidEntropyLength(entropy.len()));
        }

        let mut sponge = S::default();
        let mut state = TritBuf::zeros(self.security_level as usize * KEY_FRAGMENT_LENGTH);

        sponge.absorb(entropy).map_err(|_| Error::FailedSpongeOperation)?;
        sponge
            .squeeze_into(&mut state)
            .map_err(|_| Error::FailedSpongeOperation)?;

        Ok(WotsPrivateKey {
            state,
            marker: PhantomData,
        })
    }
}
