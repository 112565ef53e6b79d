// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::{
    node::{
        DurationResponse, FindTransactionsQuery, GetBalancesResponse, GetTransactionsToApproveResponse,
        HashesResponse, NodeClient, NodeCommand, NodeInfo, TrytesResponse,
    },
    Error,
};

use log::{debug, warn};
use serde::de::DeserializeOwned;

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

/// The API version header every request carries.
const API_VERSION_HEADER: &str = "X-IOTA-API-Version";
const API_VERSION: &str = "1";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// A cooperative cancellation signal shared between the caller and a [`HttpClient`].
///
/// Cancellation is observed before a command is dispatched; a request already on the wire runs
/// into its deadline instead.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Raises the cancellation signal.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether the signal has been raised.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Builder for a [`HttpClient`].
pub struct HttpClientBuilder {
    url: String,
    timeout: Duration,
}

impl HttpClientBuilder {
    /// Creates a builder for a client talking to `url`.
    pub fn new<U: Into<String>>(url: U) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the per-request deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the client.
    pub fn finish(self) -> HttpClient {
        HttpClient {
            url: self.url,
            agent: ureq::AgentBuilder::new().timeout(self.timeout).build(),
            cancel: CancelHandle::default(),
        }
    }
}

/// A [`NodeClient`] over JSON-HTTP: every command is a POST of its envelope to the node endpoint.
pub struct HttpClient {
    url: String,
    agent: ureq::Agent,
    cancel: CancelHandle,
}

impl HttpClient {
    /// Creates a client talking to `url` with the default deadline.
    pub fn new<U: Into<String>>(url: U) -> Self {
        HttpClientBuilder::new(url).finish()
    }

    /// Returns a handle that cancels this client's subsequent requests.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    fn call<T: DeserializeOwned>(&self, command: &NodeCommand<'_>) -> Result<T, Error> {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        debug!("dispatching {} to {}", command.name(), self.url);

        let response = self
            .agent
            .post(&self.url)
            .set("Content-Type", "application/json")
            .set(API_VERSION_HEADER, API_VERSION)
            .send_json(command);

        let body: serde_json::Value = match response {
            Ok(response) => response.into_json().map_err(|error| Error::Transport {
                status: None,
                message: error.to_string(),
            })?,
            Err(ureq::Error::Status(status, response)) => {
                // Some nodes put the logical error into a non-200 body; surface it verbatim.
                if let Ok(body) = response.into_json::<serde_json::Value>() {
                    if let Some(message) = error_payload(&body) {
                        return Err(Error::Node(message.to_string()));
                    }
                }
                return Err(Error::Transport {
                    status: Some(status),
                    message: format!("{} returned status {}", command.name(), status),
                });
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(Error::Transport {
                    status: None,
                    message: transport.to_string(),
                });
            }
        };

        if let Some(message) = error_payload(&body) {
            warn!("{} failed on the node: {}", command.name(), message);
            return Err(Error::Node(message.to_string()));
        }

        Ok(serde_json::from_value(body)?)
    }

    /// Retries a call once on transport failure. Only used for idempotent commands.
    fn call_idempotent<T: DeserializeOwned>(&self, command: &NodeCommand<'_>) -> Result<T, Error> {
        match self.call(command) {
            Err(Error::Transport { status, message }) => {
                warn!(
                    "retrying {} after transport failure: {}",
                    command.name(),
                    message
                );
                match self.call(command) {
                    Err(Error::Transport { .. }) => Err(Error::Transport { status, message }),
                    result => result,
                }
            }
            result => result,
        }
    }
}

fn error_payload(body: &serde_json::Value) -> Option<&str> {
    body.get("error")
        .or_else(|| body.get("exception"))
        .and_then(|value| value.as_str())
}

impl NodeClient for HttpClient {
    fn get_balances(&self, addresses: &[String], threshold: u8) -> Result<GetBalancesResponse, Error> {
        self.call(&NodeCommand::GetBalances { addresses, threshold })
    }

    fn get_transactions_to_approve(
        &self,
        depth: usize,
        reference: Option<&str>,
    ) -> Result<GetTransactionsToApproveResponse, Error> {
        self.call(&NodeCommand::GetTransactionsToApprove { depth, reference })
    }

    fn attach_to_tangle(
        &self,
        trunk_transaction: &str,
        branch_transaction: &str,
        min_weight_magnitude: usize,
        trytes: &[String],
    ) -> Result<Vec<String>, Error> {
        // Never retried: every attachment produces fresh nonces.
        let response: TrytesResponse = self.call(&NodeCommand::AttachToTangle {
            trunk_transaction,
            branch_transaction,
            min_weight_magnitude,
            trytes,
        })?;

        Ok(response.trytes)
    }

    fn store_transactions(&self, trytes: &[String]) -> Result<(), Error> {
        let _: DurationResponse = self.call_idempotent(&NodeCommand::StoreTransactions { trytes })?;
        Ok(())
    }

    fn broadcast_transactions(&self, trytes: &[String]) -> Result<(), Error> {
        let _: DurationResponse = self.call_idempotent(&NodeCommand::BroadcastTransactions { trytes })?;
        Ok(())
    }

    fn find_transactions(&self, query: FindTransactionsQuery) -> Result<Vec<String>, Error> {
        let response: HashesResponse = self.call(&NodeCommand::FindTransactions {
            bundles: query.bundles,
            addresses: query.addresses,
            tags: query.tags,
            approvees: query.approvees,
        })?;

        Ok(response.hashes)
    }

    fn get_tips(&self) -> Result<Vec<String>, Error> {
        let response: HashesResponse = self.call(&NodeCommand::GetTips {})?;

        Ok(response.hashes)
    }

    fn get_node_info(&self) -> Result<NodeInfo, Error> {
        self.call(&NodeCommand::GetNodeInfo {})
    }
}
