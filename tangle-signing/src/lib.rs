// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Ternary Winternitz one-time signatures: seed handling, key derivation, signing and
//! verification over normalized bundle hashes.

#![deny(missing_docs)]

pub mod seed;
pub mod wots;

pub use seed::Seed;

use tangle_ternary::Btrit;

/// Generates private keys from entropy.
pub trait PrivateKeyGenerator {
    /// The type of the generated private keys.
    type PrivateKey;
    /// Errors occurring while generating private keys.
    type Error;

    /// Generates a private key from entropy, usually a subseed.
    fn generate_from_entropy(&self, entropy: &[Btrit]) -> Result<Self::PrivateKey, Self::Error>;
}

/// A private key able to produce signatures and derive its public counterpart.
pub trait PrivateKey {
    /// The type of the matching public keys.
    type PublicKey;
    /// The type of the produced signatures.
    type Signature;
    /// Errors occurring while handling private keys.
    type Error;

    /// Derives the public key of this private key.
    fn generate_public_key(&self) -> Result<Self::PublicKey, Self::Error>;

    /// Generates a signature for the given message.
    fn sign(&mut self, message: &[Btrit]) -> Result<Self::Signature, Self::Error>;
}

/// A public key able to verify signatures.
pub trait PublicKey {
    /// The type of the accepted signatures.
    type Signature;
    /// Errors occurring while handling public keys.
    type Error;

    /// Verifies a signature for the given message.
    fn verify(&self, message: &[Btrit], signature: &Self::Signature) -> Result<bool, Self::Error>;

    /// Interprets the public key as a trit slice.
    fn as_trits(&self) -> &[Btrit];
}

/// A signature over a message.
pub trait Signature {
    /// Errors occurring while handling signatures.
    type Error;

    /// Returns the size of the signature in trits.
    fn size(&self) -> usize;

    /// Interprets the signature as a trit slice.
    fn as_trits(&self) -> &[Btrit];
}

/// A signature from which the signing public key can be recovered.
pub trait RecoverableSignature: Signature {
    /// The type of the recovered public keys.
    type PublicKey;
    /// Errors occurring while recovering public keys.
    type Error;

    /// Recovers the public key that produced this signature over the given message.
    fn recover_public_key(
        &self,
        message: &[Btrit],
    ) -> Result<Self::PublicKey, <Self as RecoverableSignature>::Error>;
}
