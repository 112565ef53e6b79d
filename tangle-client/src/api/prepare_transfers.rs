// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::{
    api::{generate_address, unix_timestamp, GetInputsBuilder},
    node::{NodeClient, DEFAULT_BALANCE_THRESHOLD},
    Client, Error, Input, Transfer,
};

use tangle_bundle::{
    constants::PAYLOAD_TRYTE_LEN, Address, Bundle, BundleBuilder, FinalizedBundleBuilder, HmacKey, Payload,
    Tag, Timestamp, Value,
};
use tangle_crypto::sponge::Kerl;
use tangle_signing::{
    wots::{normalize, WotsSecurityLevel, WotsSignature, WotsSpongePrivateKeyGeneratorBuilder, KEY_FRAGMENT_LENGTH},
    PrivateKey, PrivateKeyGenerator, PublicKey, RecoverableSignature, Seed, Signature,
};
use tangle_ternary::TritBuf;

use log::debug;

/// The number of trytes an HMAC stamp occupies at the head of a fragment.
const HMAC_RESERVED_TRYTES: usize = 81;

/// Builder of the `PrepareTransfers` operation: assembles, finalizes and signs a bundle, without
/// submitting it.
pub struct PrepareTransfersBuilder<'a, N> {
    client: &'a Client<N>,
    seed: Option<&'a Seed>,
    transfers: Vec<Transfer>,
    inputs: Option<Vec<Input>>,
    remainder_address: Option<Address>,
    security: WotsSecurityLevel,
    hmac_key: Option<HmacKey>,
    timestamp: Option<u64>,
}

impl<'a, N: NodeClient> PrepareTransfersBuilder<'a, N> {
    pub(crate) fn new(client: &'a Client<N>, seed: Option<&'a Seed>) -> Self {
        Self {
            client,
            seed,
            transfers: Vec::new(),
            inputs: None,
            remainder_address: None,
            security: WotsSecurityLevel::default(),
            hmac_key: None,
            timestamp: None,
        }
    }

    /// Sets the transfers of the bundle.
    pub fn with_transfers(mut self, transfers: Vec<Transfer>) -> Self {
        self.transfers = transfers;
        self
    }

    /// Supplies the inputs to spend instead of discovering them from the seed. Their balances
    /// are still confirmed against the node.
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

    /// Overrides the issuance timestamp. Defaults to the current time.
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Assembles the bundle: output entries, input selection, remainder, finalization, signing
    /// and the optional HMAC stamp. The bundle is validated before it is returned.
    pub fn finish(mut self) -> Result<Bundle, Error> {
        if self.transfers.is_empty() {
            return Err(Error::MissingParameter("transfers"));
        }

        let supplied_inputs = self.inputs.take();

        let timestamp = Timestamp(self.timestamp.unwrap_or_else(unix_timestamp));
        let tag = self
            .transfers
            .iter()
            .find_map(|transfer| transfer.tag.clone())
            .unwrap_or_else(Tag::zeros);

        let mut builder = BundleBuilder::new();
        let mut fragments = Vec::new();
        let mut total_output = 0u64;

        // Output entries: one entry per transfer, fragmenting long messages over additional
        // zero-value transactions.
        for transfer in &self.transfers {
            let mut message = transfer.message.clone().unwrap_or_default();
            if self.hmac_key.is_some() && transfer.value > 0 {
                // Reserve the head of the fragment for the HMAC stamp.
                message = format!("{}{}", "9".repeat(HMAC_RESERVED_TRYTES), message);
            }

            let fragment_count = (message.len() + PAYLOAD_TRYTE_LEN - 1) / PAYLOAD_TRYTE_LEN;
            let fragment_count = fragment_count.max(1);
            for chunk in 0..fragment_count {
                let start = chunk * PAYLOAD_TRYTE_LEN;
                let end = (start + PAYLOAD_TRYTE_LEN).min(message.len());
                fragments.push(Payload::try_from_str(&message[start..end])?);
            }

            let value = i64::try_from(transfer.value).map_err(|_| Error::InvalidAmount(i64::MAX))?;
            builder.add_entry(
                fragment_count,
                transfer.address.clone(),
                Value::try_from_inner(value)?,
                transfer.tag.clone().unwrap_or_else(|| tag.clone()),
                timestamp,
            )?;
            total_output += transfer.value;
        }

        // Input selection and remainder, for value transfers only.
        let mut selected = Vec::new();
        if total_output > 0 {
            let seed = self.seed.ok_or(Error::MissingParameter("seed"))?;

            let (total_input, inputs) = match supplied_inputs {
                Some(inputs) => self.confirm_inputs(inputs, total_output)?,
                None => GetInputsBuilder::new(self.client, seed)
                    .with_threshold(total_output)
                    .with_security(self.security)
                    .finish()?,
            };

            for input in &inputs {
                let value = i64::try_from(input.balance).map_err(|_| Error::InvalidAmount(i64::MAX))?;
                builder.add_entry(
                    input.security as usize,
                    input.address.clone(),
                    Value::try_from_inner(-value)?,
                    tag.clone(),
                    timestamp,
                )?;
            }

            let remainder = total_input - total_output;
            if remainder > 0 {
                let address = match self.remainder_address.clone() {
                    Some(address) => address,
                    None => {
                        // A fresh address right after the highest spent key index.
                        let next_index = inputs.iter().map(|input| input.index).max().unwrap_or(0) + 1;
                        debug!("generating remainder address at index {}", next_index);
                        generate_address(seed, next_index, self.security)?
                    }
                };

                builder.add_entry(
                    1,
                    address,
                    Value::try_from_inner(remainder as i64)?,
                    tag.clone(),
                    timestamp,
                )?;
            }

            selected = inputs;
        }

        let mut finalized = builder.finalize().map_err(Error::from)?;
        finalized.add_signature_fragments(fragments).map_err(Error::from)?;

        if !selected.is_empty() {
            // The seed presence was checked during input selection.
            let seed = self.seed.ok_or(Error::MissingParameter("seed"))?;
            sign_inputs(seed, &mut finalized, &selected)?;
        }

        if let Some(hmac_key) = &self.hmac_key {
            hmac_key.apply(&mut finalized).map_err(Error::from)?;
        }

        let bundle = finalized.build();

        // A bundle failing its own invariants must never reach the node. The HMAC stamp only
        // touches value outputs, so input signatures stay verifiable.
        bundle.validate().map_err(Error::BundleInvalid)?;
        if !selected.is_empty() {
            verify_bundle_signatures(&bundle)?;
        }

        Ok(bundle)
    }

    /// Confirms caller-supplied inputs against the node and keeps the prefix covering `required`.
    fn confirm_inputs(&self, inputs: Vec<Input>, required: u64) -> Result<(u64, Vec<Input>), Error> {
        let addresses: Vec<String> = inputs
            .iter()
            .map(|input| input.address.to_trytes().to_string())
            .collect();
        let balances = self
            .client
            .node()
            .get_balances(&addresses, DEFAULT_BALANCE_THRESHOLD)?
            .balances()?;

        let mut confirmed = Vec::new();
        let mut total = 0u64;

        for (mut input, balance) in inputs.into_iter().zip(balances) {
            if balance == 0 {
                continue;
            }

            input.balance = balance;
            total += balance;
            confirmed.push(input);

            if total >= required {
                return Ok((total, confirmed));
            }
        }

        Err(Error::NotEnoughBalance {
            found: total,
            required,
        })
    }
}

/// Signs every input-spending transaction of a finalized bundle.
///
/// The fragments of one input are written to the transactions `index .. index + security`, which
/// must share the input address and carry no value.
fn sign_inputs(seed: &Seed, bundle: &mut FinalizedBundleBuilder, inputs: &[Input]) -> Result<(), Error> {
    // Infallible: a bundle hash is always one hash unit long.
    let normalized = normalize(bundle.hash().as_trits()).unwrap();

    let layout: Vec<(Address, i64)> = bundle
        .transactions()
        .iter()
        .map(|transaction| (transaction.address().clone(), transaction.value().to_inner()))
        .collect();

    for (index, (address, value)) in layout.iter().enumerate() {
        if *value >= 0 {
            continue;
        }

        let input = inputs
            .iter()
            .find(|input| &input.address == address)
            .ok_or_else(|| Error::MissingInput(address.to_trytes().to_string()))?;

        let mut private_key = WotsSpongePrivateKeyGeneratorBuilder::<Kerl>::default()
            .security_level(input.security)
            .build()?
            .generate_from_entropy(seed.subseed(input.index).as_trits())?;
        let signature = private_key.sign(&normalized)?;

        for (fragment_index, fragment) in signature.as_trits().chunks(KEY_FRAGMENT_LENGTH).enumerate() {
            let target = index + fragment_index;

            if fragment_index > 0 {
                match layout.get(target) {
                    Some((sibling, sibling_value)) if sibling == address && *sibling_value == 0 => {}
                    _ => return Err(Error::BundleLayout { index: target }),
                }
            }

            bundle
                .set_signature_fragment(target, Payload::try_from_trits(TritBuf::from_trits(fragment))?)
                .map_err(Error::from)?;
        }
    }

    Ok(())
}

/// Verifies every input signature of a bundle: the fragments of each spending transaction and
/// its zero-value siblings must recover the spent address.
pub fn verify_bundle_signatures(bundle: &Bundle) -> Result<(), Error> {
    // Infallible: a bundle hash is always one hash unit long.
    let normalized = normalize(bundle.hash().as_trits()).unwrap();

    let mut index = 0;
    while index < bundle.len() {
        // Indices are bounded by the loop condition.
        let transaction = bundle.get(index).unwrap();

        if transaction.value().to_inner() >= 0 {
            index += 1;
            continue;
        }

        let address = transaction.address().clone();
        let mut fragments = TritBuf::from_trits(transaction.payload().as_trits());
        let mut count = 1;

        while count < 3 {
            match bundle.get(index + count) {
                Some(sibling)
                    if sibling.address() == &address && sibling.value().to_inner() == 0 =>
                {
                    fragments.extend(sibling.payload().as_trits().iter().copied());
                    count += 1;
                }
                _ => break,
            }
        }

        let signature = WotsSignature::<Kerl>::from_trits(fragments)?;
        let public_key = signature.recover_public_key(&normalized)?;

        if public_key.as_trits() != address.as_trits() {
            return Err(Error::InvalidSignature(index));
        }

        index += count;
    }

    Ok(())
}
