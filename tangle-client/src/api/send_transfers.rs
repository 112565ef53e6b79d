// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::{
    api::{PrepareTransfersBuilder, SendTrytesBuilder},
    node::NodeClient,
    Client, Error, Input, SentTransfer, Transfer,
};

use tangle_bundle::{Address, HmacKey};
use tangle_signing::{wots::WotsSecurityLevel, Seed};

/// Builder of the `SendTransfers` operation: the full pipeline from transfers to transactions on
/// the tangle.
pub struct SendTransfersBuilder<'a, N> {
    client: &'a Client<N>,
    seed: Option<&'a Seed>,
    transfers: Vec<Transfer>,
    inputs: Option<Vec<Input>>,
    remainder_address: Option<Address>,
    security: WotsSecurityLevel,
    hmac_key: Option<HmacKey>,
    depth: usize,
    min_weight_magnitude: usize,
    reference: Option<String>,
}

impl<'a, N: NodeClient> SendTransfersBuilder<'a, N> {
    pub(crate) fn new(client: &'a Client<N>, seed: Option<&'a Seed>) -> Self {
        Self {
            client,
            seed,
            transfers: Vec::new(),
            inputs: None,
            remainder_address: None,
            security: WotsSecurityLevel::default(),
            hmac_key: None,
            depth: 3,
            min_weight_magnitude: 14,
            reference: None,
        }
    }

    /// Sets the transfers of the bundle.
    pub fn with_transfers(mut self, transfers: Vec<Transfer>) -> Self {
        self.transfers = transfers;
        self
    }

    /// Supplies the inputs to spend instead of discovering them from the seed.
    pub fn with_inputs(mut self, inputs: Vec<Input>) -> Self {
        self.inputs = Some(inputs);
        self
    }

    /// Sets the address receiving any remainder.
    pub fn with_remainder_address(mut self, address: Address) -> Self {
        self.remainder_address = Some(address);
        self
    }

    /// Sets the security level used for input discovery and freshly generated addresses.
    pub fn with_security(mut self, security: WotsSecurityLevel) -> Self {
        self.security = security;
        self
    }

    /// Stamps value transactions with the given HMAC key after signing.
    pub fn with_hmac_key(mut self, hmac_key: HmacKey) -> Self {
        self.hmac_key = Some(hmac_key);
        self
    }

    /// Sets the depth of the tip selection walk.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Sets the minimum weight magnitude of the delegated proof of work.
    pub fn with_min_weight_magnitude(mut self, min_weight_magnitude: usize) -> Self {
        self.min_weight_magnitude = min_weight_magnitude;
        self
    }

    /// Sets a transaction the tip selection walk should start from.
    pub fn with_reference<R: Into<String>>(mut self, reference: R) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Prepares, signs and submits the bundle.
    pub fn finish(self) -> Result<SentTransfer, Error> {
        let mut prepare = PrepareTransfersBuilder::new(self.client, self.seed)
            .with_transfers(self.transfers)
            .with_security(self.security);
        if let Some(inputs) = self.inputs {
            prepare = prepare.with_inputs(inputs);
        }
        if let Some(address) = self.remainder_address {
            prepare = prepare.with_remainder_address(address);
        }
        if let Some(hmac_key) = self.hmac_key {
            prepare = prepare.with_hmac_key(hmac_key);
        }

        let bundle = prepare.finish()?;

        let mut send = SendTrytesBuilder::new(self.client)
            .with_transactions(bundle.transactions().to_vec())
            .with_depth(self.depth)
            .with_min_weight_magnitude(self.min_weight_magnitude);
        if let Some(reference) = self.reference {
            send = send.with_reference(reference);
        }

        let attached = send.finish()?;

        Ok(SentTransfer {
            bundle,
            trunk_transaction: attached.trunk_transaction,
            branch_transaction: attached.branch_transaction,
            transactions: attached.transactions,
        })
    }
}
