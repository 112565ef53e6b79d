// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::{
    constants::{ADDRESS_TRIT_LEN, ADDRESS_TRYTE_LEN},
    bundle::FinalizedBundleBuilder,
    transaction::Payload,
    Error,
};

use tangle_crypto::sponge::{CurlP27, Sponge};
use tangle_ternary::{Btrit, TritBuf, TryteBuf};

use zeroize::Zeroize;

use std::fmt;

/// An 81-tryte HMAC key used to stamp the value transactions of a bundle.
pub struct HmacKey(TritBuf);

impl HmacKey {
    /// Parses an HMAC key from exactly 81 trytes.
    pub fn try_from_str(trytes: &str) -> Result<Self, Error> {
        if trytes.len() != ADDRESS_TRYTE_LEN {
            return Err(Error::InvalidFieldLength {
                field: "HmacKey",
                length: trytes.len() * 3,
            });
        }

        Ok(Self(TryteBuf::try_from_str(trytes)?.as_trits()))
    }

    /// Creates an HMAC key from exactly 243 trits.
    pub fn try_from_trits(trits: TritBuf) -> Result<Self, Error> {
        if trits.len() != ADDRESS_TRIT_LEN {
            return Err(Error::InvalidFieldLength {
                field: "HmacKey",
                length: trits.len(),
            });
        }

        Ok(Self(trits))
    }

    /// Interprets the key as a trit slice.
    pub fn as_trits(&self) -> &[Btrit] {
        &self.0
    }

    /// Stamps every transaction with a positive value: the leading 243 trits of its fragment are
    /// overwritten with `CurlP27(key ‖ bundleHash)`.
    pub fn apply(&self, bundle: &mut FinalizedBundleBuilder) -> Result<(), Error> {
        let hash = *bundle.hash();

        let stamped: Vec<usize> = bundle
            .transactions()
            .iter()
            .enumerate()
            .filter(|(_, transaction)| transaction.value().to_inner() > 0)
            .map(|(index, _)| index)
            .collect();

        for index in stamped {
            let mut curl = CurlP27::new();
            // CurlP is infallible.
            curl.absorb(self.as_trits()).unwrap();
            curl.absorb(hash.as_trits()).unwrap();
            let stamp = curl.squeeze().unwrap();

            let mut payload = TritBuf::from_trits(bundle.transactions()[index].payload().as_trits());
            payload[..ADDRESS_TRIT_LEN].copy_from_slice(&stamp);
            // Infallible: the length is unchanged.
            bundle.set_signature_fragment(index, Payload::try_from_trits(payload)?)?;
        }

        Ok(())
    }
}

impl Zeroize for HmacKey {
    fn zeroize(&mut self) {
        for trit in self.0.as_slice_mut() {
            unsafe { std::ptr::write_volatile(trit, Btrit::Zero) };
        }
        std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);
    }
}

impl Drop for HmacKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl fmt::Debug for HmacKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HmacKey(<secret>)")
    }
}
