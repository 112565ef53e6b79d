// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error as ThisError;

/// Errors raised while orchestrating transfers or talking to a node.
#[derive(Debug, ThisError)]
pub enum Error {
    /// A tryte string failed validation.
    #[error("invalid trytes: {0}")]
    InvalidTrytes(#[from] tangle_ternary::Error),
    /// A seed failed validation.
    #[error("invalid seed: {0}")]
    InvalidSeed(#[from] tangle_signing::seed::Error),
    /// A security level outside of `{1, 2, 3}`.
    #[error("invalid security level {0}")]
    InvalidSecurityLevel(u8),
    /// An address had the wrong length or a mismatching checksum.
    #[error("invalid address")]
    InvalidAddress,
    /// An amount outside of the representable range.
    #[error("invalid amount {0}")]
    InvalidAmount(i64),
    /// The selected inputs cannot cover the requested transfer value.
    #[error("not enough balance: found {found} of {required} required")]
    NotEnoughBalance {
        /// The summed balance of the usable inputs.
        found: u64,
        /// The total value of the transfers.
        required: u64,
    },
    /// During signing, an adjacent transaction did not match the expected layout.
    #[error("unexpected bundle layout at transaction {index}")]
    BundleLayout {
        /// The index of the offending transaction.
        index: usize,
    },
    /// A bundle violated an invariant; it is not submitted.
    #[error("invalid bundle: {0}")]
    BundleInvalid(tangle_bundle::Error),
    /// A signature did not recover the address it claims to spend.
    #[error("invalid signature at transaction {0}")]
    InvalidSignature(usize),
    /// A signing operation failed.
    #[error("signing error: {0}")]
    Signing(#[from] tangle_signing::wots::Error),
    /// A spending transaction without a matching input.
    #[error("no input found for address {0}")]
    MissingInput(String),
    /// A required builder parameter was not supplied.
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),
    /// The node answered with an error payload; the remote message is carried verbatim.
    #[error("node error: {0}")]
    Node(String),
    /// The request did not complete at the HTTP level.
    #[error("transport error{}: {message}", display_status(.status))]
    Transport {
        /// The HTTP status code, when one was received.
        status: Option<u16>,
        /// A description of the failure.
        message: String,
    },
    /// The caller cancelled the request.
    #[error("request cancelled")]
    Cancelled,
    /// A response could not be decoded.
    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<tangle_bundle::Error> for Error {
    fn from(error: tangle_bundle::Error) -> Self {
        match error {
            tangle_bundle::Error::InvalidChecksum => Error::InvalidAddress,
            tangle_bundle::Error::InvalidFieldLength { field: "Address", .. } => Error::InvalidAddress,
            tangle_bundle::Error::InvalidValue(value) => Error::InvalidAmount(value),
            error => Error::BundleInvalid(error),
        }
    }
}

fn display_status(status: &Option<u16>) -> String {
    match status {
        Some(status) => format!(" (status {})", status),
        None => String::new(),
    }
}
