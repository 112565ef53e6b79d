// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use tangle_bundle::{Address, Bundle, Tag, Transaction};
use tangle_signing::wots::WotsSecurityLevel;

/// A single user-requested transfer: who receives how much, with an optional message and tag.
#[derive(Clone, Debug)]
pub struct Transfer {
    /// The recipient address. A checksummed address is verified and stripped at construction.
    pub address: Address,
    /// The transferred amount in iotas.
    pub value: u64,
    /// An optional tryte-encoded message of arbitrary length.
    pub message: Option<String>,
    /// An optional tag.
    pub tag: Option<Tag>,
}

/// An address holding balance that a transfer can spend.
#[derive(Clone, Debug)]
pub struct Input {
    /// The input address.
    pub address: Address,
    /// The balance of the address.
    pub balance: u64,
    /// The key index the address was derived at.
    pub index: u64,
    /// The security level the address was derived with.
    pub security: WotsSecurityLevel,
}

/// Transactions as attached to the tangle by `attachToTangle`, in bundle order.
#[derive(Debug)]
pub struct AttachedTransactions {
    /// The trunk tip approved by the bundle.
    pub trunk_transaction: String,
    /// The branch tip approved by the bundle.
    pub branch_transaction: String,
    /// The attached transactions, nonces set, head of the bundle first.
    pub transactions: Vec<Transaction>,
}

/// The result of a completed transfer submission.
#[derive(Debug)]
pub struct SentTransfer {
    /// The bundle as it was signed locally, before attachment.
    pub bundle: Bundle,
    /// The trunk tip approved by the bundle.
    pub trunk_transaction: String,
    /// The branch tip approved by the bundle.
    pub branch_transaction: String,
    /// The final transactions with nonces, head of the bundle first.
    pub transactions: Vec<Transaction>,
}
