// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::{
    constants::TRANSACTION_TRIT_LEN,
    transaction::{Address, Payload, Tag, Timestamp, Transaction, TransactionBuilder, Value},
    Error,
};

use tangle_crypto::{
    sponge::{Kerl, Sponge},
    Hash,
};
use tangle_signing::wots::{has_insecure_value, normalize};
use tangle_ternary::{convert, TritBuf};

use log::debug;

/// The number of obsolete tag increments after which finalization gives up.
const MAX_OBSOLETE_TAG_INCREMENTS: usize = 1_000_000;

/// Collects the transactions of a bundle before finalization.
///
/// Transactions carry no position or bundle hash until [`BundleBuilder::finalize`] assigns them.
#[derive(Default)]
pub struct BundleBuilder {
    transactions: Vec<Transaction>,
}

impl BundleBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of transactions collected so far.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the builder holds no transactions yet.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Appends a bundle entry: one value-bearing transaction followed by `signature_len - 1`
    /// zero-value transactions at the same address, reserving room for a fragmented signature or
    /// message.
    pub fn add_entry(
        &mut self,
        signature_len: usize,
        address: Address,
        value: Value,
        tag: Tag,
        timestamp: Timestamp,
    ) -> Result<(), Error> {
        if signature_len == 0 {
            return Err(Error::EmptyEntry);
        }

        for i in 0..signature_len {
            let value = if i == 0 { value } else { Value::zero() };

            self.transactions.push(
                TransactionBuilder::new()
                    .with_address(address.clone())
                    .with_value(value)
                    .with_obsolete_tag(tag.clone())
                    .with_tag(tag.clone())
                    .with_timestamp(timestamp)
                    .build(),
            );
        }

        Ok(())
    }

    /// Finalizes the bundle: assigns positions, then searches for a bundle hash whose normalized
    /// form is free of the value 13 by incrementing the obsolete tag of the first transaction.
    pub fn finalize(mut self) -> Result<FinalizedBundleBuilder, Error> {
        if self.transactions.is_empty() {
            return Err(Error::EmptyBundle);
        }

        let last_index = self.transactions.len() - 1;
        for (index, transaction) in self.transactions.iter_mut().enumerate() {
            transaction.set_index(index);
            transaction.set_last_index(last_index);
        }

        let mut kerl = Kerl::default();
        let mut increments = 0;

        let hash = loop {
            kerl.reset();
            for transaction in &self.transactions {
                kerl.absorb(&transaction.essence())
                    .map_err(|_| Error::FailedSpongeOperation)?;
            }
            let hash = kerl.squeeze().map_err(|_| Error::FailedSpongeOperation)?;

            // Infallible: a hash is always one hash unit long.
            let normalized = normalize(&hash).unwrap();
            if !has_insecure_value(&normalized) {
                break Hash::try_from(hash.as_slice()).unwrap();
            }

            if increments == MAX_OBSOLETE_TAG_INCREMENTS {
                return Err(Error::UnnormalizableBundle(increments));
            }
            increments += 1;

            let mut tag_trits = TritBuf::from_trits(self.transactions[0].obsolete_tag().as_trits());
            convert::increment_inplace(&mut tag_trits);
            self.transactions[0].set_obsolete_tag(Tag::try_from_trits(tag_trits)?);
        };

        if increments > 0 {
            debug!("bundle hash normalized after {} obsolete tag increments", increments);
        }

        for transaction in self.transactions.iter_mut() {
            transaction.set_bundle(hash);
        }

        Ok(FinalizedBundleBuilder {
            transactions: self.transactions,
            hash,
        })
    }
}

/// A finalized bundle still accepting signature and message fragments.
pub struct FinalizedBundleBuilder {
    transactions: Vec<Transaction>,
    hash: Hash,
}

impl FinalizedBundleBuilder {
    /// The finalized bundle hash.
    pub fn hash(&self) -> &Hash {
        &self.hash
    }

    /// The transactions of the bundle, in bundle order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Places fragments into the transactions, in order, starting at the head of the bundle.
    pub fn add_signature_fragments(&mut self, fragments: Vec<Payload>) -> Result<(), Error> {
        if fragments.len() > self.transactions.len() {
            return Err(Error::TooManyFragments {
                fragments: fragments.len(),
                transactions: self.transactions.len(),
            });
        }

        for (transaction, fragment) in self.transactions.iter_mut().zip(fragments) {
            transaction.set_payload(fragment);
        }

        Ok(())
    }

    /// Overwrites the fragment of the transaction at `index`.
    pub fn set_signature_fragment(&mut self, index: usize, fragment: Payload) -> Result<(), Error> {
        let transaction = self
            .transactions
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds(index))?;
        transaction.set_payload(fragment);

        Ok(())
    }

    /// Builds the immutable bundle.
    pub fn build(self) -> Bundle {
        Bundle {
            transactions: self.transactions,
            hash: self.hash,
        }
    }
}

/// An immutable, finalized bundle of transactions.
#[derive(Debug)]
pub struct Bundle {
    transactions: Vec<Transaction>,
    hash: Hash,
}

impl Bundle {
    /// The bundle hash shared by all transactions.
    pub fn hash(&self) -> &Hash {
        &self.hash
    }

    /// The transactions of the bundle, in bundle order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The number of transactions in the bundle.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the bundle holds no transactions. A finalized bundle never does.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Returns the transaction at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.transactions.get(index)
    }

    /// Checks the invariants of a finalized bundle: values summing to zero, positions and bundle
    /// hashes agreeing with the finalized hash, and a normalized hash free of the value 13.
    pub fn validate(&self) -> Result<(), Error> {
        let mut sum: i64 = 0;
        let last_index = self.transactions.len() - 1;

        for (index, transaction) in self.transactions.iter().enumerate() {
            sum += transaction.value().to_inner();

            if transaction.index().to_inner() != index
                || transaction.last_index().to_inner() != last_index
                || transaction.bundle() != &self.hash
            {
                return Err(Error::InconsistentTransaction(index));
            }
        }

        if sum != 0 {
            return Err(Error::InvalidValueSum(sum));
        }

        let mut kerl = Kerl::default();
        for transaction in &self.transactions {
            kerl.absorb(&transaction.essence())
                .map_err(|_| Error::FailedSpongeOperation)?;
        }
        let hash = kerl.squeeze().map_err(|_| Error::FailedSpongeOperation)?;

        if self.hash.as_trits() != hash.as_slice() {
            return Err(Error::InconsistentTransaction(0));
        }

        // Infallible: a hash is always one hash unit long.
        if has_insecure_value(&normalize(&hash).unwrap()) {
            return Err(Error::InsecureBundleHash);
        }

        Ok(())
    }

    /// Serializes every transaction into its wire trytes, in bundle order.
    pub fn as_trytes(&self) -> Vec<String> {
        self.transactions.iter().map(Transaction::as_trytes).collect()
    }

    /// Serializes every transaction into trits, in bundle order.
    pub fn as_trits(&self) -> Vec<TritBuf> {
        debug_assert!(self.transactions.iter().all(|t| t.as_trits().len() == TRANSACTION_TRIT_LEN));
        self.transactions.iter().map(Transaction::as_trits).collect()
    }
}

impl IntoIterator for Bundle {
    type Item = Transaction;
    type IntoIter = std::vec::IntoIter<Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.into_iter()
    }
}

impl<'a> IntoIterator for &'a Bundle {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}
