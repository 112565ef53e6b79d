// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::{
    node::{FindTransactionsQuery, NodeClient},
    Client, Error,
};

use tangle_bundle::Address;
use tangle_crypto::sponge::Kerl;
use tangle_signing::{
    wots::{WotsSecurityLevel, WotsSpongePrivateKeyGeneratorBuilder},
    PrivateKey, PrivateKeyGenerator, PublicKey, Seed,
};
use tangle_ternary::TritBuf;

/// Derives the address of `seed` at `index` with the given security level.
pub(crate) fn generate_address(
    seed: &Seed,
    index: u64,
    security: WotsSecurityLevel,
) -> Result<Address, Error> {
    let subseed = seed.subseed(index);

    let private_key = WotsSpongePrivateKeyGeneratorBuilder::<Kerl>::default()
        .security_level(security)
        .build()?
        .generate_from_entropy(subseed.as_trits())?;
    let public_key = private_key.generate_public_key()?;

    Ok(Address::try_from_trits(TritBuf::from_trits(public_key.as_trits()))?)
}

/// Builder of the `GetNewAddress` operation: walks the key space of a seed until it finds an
/// address the network has not seen.
pub struct GetNewAddressBuilder<'a, N> {
    client: &'a Client<N>,
    seed: &'a Seed,
    initial_index: u64,
    security: WotsSecurityLevel,
}

impl<'a, N: NodeClient> GetNewAddressBuilder<'a, N> {
    pub(crate) fn new(client: &'a Client<N>, seed: &'a Seed) -> Self {
        Self {
            client,
            seed,
            initial_index: 0,
            security: WotsSecurityLevel::default(),
        }
    }

    /// Sets the index the walk starts from.
    pub fn with_initial_index(mut self, index: u64) -> Self {
        self.initial_index = index;
        self
    }

    /// Sets the security level of the derived addresses.
    pub fn with_security(mut self, security: WotsSecurityLevel) -> Self {
        self.security = security;
        self
    }

    /// Returns the first unused address at or after the initial index, along with its index.
    pub fn finish(self) -> Result<(u64, Address), Error> {
        let mut index = self.initial_index;

        loop {
            let address = generate_address(self.seed, index, self.security)?;

            let transactions = self.client.node().find_transactions(FindTransactionsQuery {
                addresses: vec![address.to_trytes().to_string()],
                ..FindTransactionsQuery::default()
            })?;

            if transactions.is_empty() {
                return Ok((index, address));
            }

            index += 1;
        }
    }
}
