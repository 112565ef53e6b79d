// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::{
    api::generate_address,
    node::{FindTransactionsQuery, NodeClient, DEFAULT_BALANCE_THRESHOLD},
    Client, Error, Input,
};

use log::debug;

use tangle_signing::{wots::WotsSecurityLevel, Seed};

/// Builder of the `GetInputs` operation: derives addresses with increasing index, fetches their
/// balances and stops at the first set of inputs covering the threshold.
pub struct GetInputsBuilder<'a, N> {
    client: &'a Client<N>,
    seed: &'a Seed,
    start_index: u64,
    threshold: u64,
    security: WotsSecurityLevel,
}

impl<'a, N: NodeClient> GetInputsBuilder<'a, N> {
    pub(crate) fn new(client: &'a Client<N>, seed: &'a Seed) -> Self {
        Self {
            client,
            seed,
            start_index: 0,
            threshold: 0,
            security: WotsSecurityLevel::default(),
        }
    }

    /// Sets the index the address walk starts from.
    pub fn with_start_index(mut self, index: u64) -> Self {
        self.start_index = index;
        self
    }

    /// Sets the required total balance.
    pub fn with_threshold(mut self, threshold: u64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the security level of the derived addresses.
    pub fn with_security(mut self, security: WotsSecurityLevel) -> Self {
        self.security = security;
        self
    }

    /// Walks the key space until the accumulated balance reaches the threshold.
    ///
    /// The walk ends at the first address the network has never seen; if the threshold is not
    /// reached by then the seed cannot cover it.
    pub fn finish(self) -> Result<(u64, Vec<Input>), Error> {
        let mut inputs = Vec::new();
        let mut total = 0u64;
        let mut index = self.start_index;

        loop {
            let address = generate_address(self.seed, index, self.security)?;
            let address_trytes = address.to_trytes().to_string();

            let transactions = self.client.node().find_transactions(FindTransactionsQuery {
                addresses: vec![address_trytes.clone()],
                ..FindTransactionsQuery::default()
            })?;

            let balance = self
                .client
                .node()
                .get_balances(&[address_trytes], DEFAULT_BALANCE_THRESHOLD)?
                .balances()?
                .first()
                .copied()
                .unwrap_or(0);

            if transactions.is_empty() && balance == 0 {
                // An unused address ends the walk.
                break;
            }

            if balance > 0 {
                total += balance;
                inputs.push(Input {
                    address,
                    balance,
                    index,
                    security: self.security,
                });

                if total >= self.threshold {
                    debug!("selected {} inputs holding {} iotas", inputs.len(), total);
                    return Ok((total, inputs));
                }
            }

            index += 1;
        }

        Err(Error::NotEnoughBalance {
            found: total,
            required: self.threshold,
        })
    }
}
