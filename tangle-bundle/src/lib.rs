// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! The transaction and bundle model of the legacy IOTA protocol: the 2673-tryte wire record,
//! bundle construction with hash normalization, and HMAC stamping of value transactions.

#![deny(missing_docs)]

pub mod constants;

mod bundle;
mod hmac;
mod transaction;

pub use bundle::{Bundle, BundleBuilder, FinalizedBundleBuilder};
pub use hmac::HmacKey;
pub use transaction::{
    Address, Index, Nonce, Payload, Tag, Timestamp, Transaction, TransactionBuilder, Value,
};

use thiserror::Error as ThisError;

/// Errors occurring while building transactions and bundles.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum Error {
    /// A field was constructed from a trit sequence of the wrong length.
    #[error("invalid length {length} for field {field}")]
    InvalidFieldLength {
        /// The name of the field.
        field: &'static str,
        /// The offending length in trits.
        length: usize,
    },
    /// A field was constructed from a string containing non-tryte characters.
    #[error("invalid field trytes: {0}")]
    InvalidTrytes(tangle_ternary::Error),
    /// An address checksum did not match the address.
    #[error("invalid address checksum")]
    InvalidChecksum,
    /// A transaction value outside of the token supply.
    #[error("invalid transaction value {0}")]
    InvalidValue(i64),
    /// A transaction was parsed from a trit sequence of the wrong length.
    #[error("invalid transaction length {0}")]
    InvalidTransactionLength(usize),
    /// A bundle was finalized without any transaction.
    #[error("empty bundle")]
    EmptyBundle,
    /// An entry was added with no transaction to carry its signature.
    #[error("empty bundle entry")]
    EmptyEntry,
    /// More signature fragments were supplied than there are transactions.
    #[error("too many signature fragments: {fragments} for {transactions} transactions")]
    TooManyFragments {
        /// The number of supplied fragments.
        fragments: usize,
        /// The number of transactions in the bundle.
        transactions: usize,
    },
    /// A transaction index outside of the bundle.
    #[error("transaction index {0} out of bounds")]
    IndexOutOfBounds(usize),
    /// The obsolete tag space was exhausted without reaching a secure bundle hash.
    #[error("no secure bundle hash found after {0} obsolete tag increments")]
    UnnormalizableBundle(usize),
    /// The values of a finalized bundle do not sum to zero.
    #[error("bundle values sum to {0}, expected 0")]
    InvalidValueSum(i64),
    /// A transaction disagrees with its position or bundle hash.
    #[error("transaction {0} does not match the finalized bundle")]
    InconsistentTransaction(usize),
    /// The normalized bundle hash carries an insecure value.
    #[error("normalized bundle hash carries a 13")]
    InsecureBundleHash,
    /// An underlying sponge operation failed.
    #[error("failed sponge operation")]
    FailedSpongeOperation,
}

impl From<tangle_ternary::Error> for Error {
    fn from(error: tangle_ternary::Error) -> Self {
        Error::InvalidTrytes(error)
    }
}
