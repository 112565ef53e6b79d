// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::{node::NodeClient, AttachedTransactions, Client, Error};

use tangle_bundle::Transaction;

use log::debug;

/// Builder of the `SendTrytes` operation: tip selection, delegated proof of work, store and
/// broadcast.
pub struct SendTrytesBuilder<'a, N> {
    client: &'a Client<N>,
    transactions: Vec<Transaction>,
    depth: usize,
    min_weight_magnitude: usize,
    reference: Option<String>,
}

impl<'a, N: NodeClient> SendTrytesBuilder<'a, N> {
    pub(crate) fn new(client: &'a Client<N>) -> Self {
        Self {
            client,
            transactions: Vec::new(),
            depth: 3,
            min_weight_magnitude: 14,
            reference: None,
        }
    }

    /// Sets the transactions to submit, head of the bundle first.
    pub fn with_transactions(mut self, transactions: Vec<Transaction>) -> Self {
        self.transactions = transactions;
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

    /// Runs the submission pipeline: `getTransactionsToApprove`, `attachToTangle`,
    /// `storeTransactions`, `broadcastTransactions`.
    pub fn finish(self) -> Result<AttachedTransactions, Error> {
        if self.transactions.is_empty() {
            return Err(Error::MissingParameter("transactions"));
        }

        let node = self.client.node();

        let tips = node.get_transactions_to_approve(self.depth, self.reference.as_deref())?;
        debug!(
            "approving trunk {} and branch {}",
            tips.trunk_transaction, tips.branch_transaction
        );

        // The network expects the last bundle index first.
        let mut trytes: Vec<String> = self.transactions.iter().map(Transaction::as_trytes).collect();
        trytes.reverse();

        let attached = node.attach_to_tangle(
            &tips.trunk_transaction,
            &tips.branch_transaction,
            self.min_weight_magnitude,
            &trytes,
        )?;

        node.store_transactions(&attached)?;
        node.broadcast_transactions(&attached)?;

        let mut transactions = attached
            .iter()
            .map(|trytes| Transaction::from_trytes(trytes).map_err(Error::from))
            .collect::<Result<Vec<_>, _>>()?;
        transactions.reverse();

        Ok(AttachedTransactions {
            trunk_transaction: tips.trunk_transaction,
            branch_transaction: tips.branch_transaction,
            transactions,
        })
    }
}
