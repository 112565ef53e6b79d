// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Client for the legacy IOTA tangle: derives addresses from a seed, assembles and signs
//! bundles, and submits them to a node for proof of work and broadcast.
//!
//! ```no_run
//! use tangle_client::{Client, Transfer};
//! use tangle_bundle::Address;
//! use tangle_signing::Seed;
//!
//! # fn main() -> Result<(), tangle_client::Error> {
//! let client = Client::new("https://nodes.example.org:14265");
//! let seed = Seed::from_str("MYSEED")?;
//!
//! let sent = client
//!     .send_transfers(Some(&seed))
//!     .with_transfers(vec![Transfer {
//!         address: Address::try_from_str(&"RECIPIENT".repeat(9)).map_err(tangle_client::Error::from)?,
//!         value: 0,
//!         message: Some("HELLO9WORLD".into()),
//!         tag: None,
//!     }])
//!     .finish()?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod api;
pub mod node;

mod error;
mod types;

pub use api::{
    verify_bundle_signatures, GetInputsBuilder, GetNewAddressBuilder, PrepareTransfersBuilder,
    SendTransfersBuilder, SendTrytesBuilder,
};
pub use error::Error;
pub use node::{CancelHandle, HttpClient, HttpClientBuilder, NodeClient};
pub use types::{AttachedTransactions, Input, SentTransfer, Transfer};

use tangle_signing::Seed;

use std::time::Duration;

/// The entry point of the library: couples a [`NodeClient`] with the client-side operations.
pub struct Client<N = HttpClient> {
    node: N,
}

impl Client<HttpClient> {
    /// Creates a client talking to the node at `url`.
    pub fn new<U: Into<String>>(url: U) -> Self {
        Self {
            node: HttpClient::new(url),
        }
    }

    /// Creates a client with an explicit per-request deadline.
    pub fn with_timeout<U: Into<String>>(url: U, timeout: Duration) -> Self {
        Self {
            node: HttpClientBuilder::new(url).with_timeout(timeout).finish(),
        }
    }
}

impl<N: NodeClient> Client<N> {
    /// Creates a client over any [`NodeClient`] implementation.
    pub fn with_node(node: N) -> Self {
        Self { node }
    }

    /// The underlying node client.
    pub fn node(&self) -> &N {
        &self.node
    }

    /// Walks the key space of `seed` for the first unused address.
    pub fn get_new_address<'a>(&'a self, seed: &'a Seed) -> GetNewAddressBuilder<'a, N> {
        GetNewAddressBuilder::new(self, seed)
    }

    /// Discovers inputs of `seed` covering a threshold.
    pub fn get_inputs<'a>(&'a self, seed: &'a Seed) -> GetInputsBuilder<'a, N> {
        GetInputsBuilder::new(self, seed)
    }

    /// Assembles and signs a bundle without submitting it. `seed` is only needed for value
    /// transfers.
    pub fn prepare_transfers<'a>(&'a self, seed: Option<&'a Seed>) -> PrepareTransfersBuilder<'a, N> {
        PrepareTransfersBuilder::new(self, seed)
    }

    /// Submits already-signed transactions: tip selection, delegated proof of work, store and
    /// broadcast.
    pub fn send_trytes(&self) -> SendTrytesBuilder<'_, N> {
        SendTrytesBuilder::new(self)
    }

    /// The full transfer pipeline: prepare, sign, attach, store, broadcast.
    pub fn send_transfers<'a>(&'a self, seed: Option<&'a Seed>) -> SendTransfersBuilder<'a, N> {
        SendTransfersBuilder::new(self, seed)
    }
}
