// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! The contract of a legacy IOTA node: one JSON command envelope per API call.

mod http;

pub use http::{CancelHandle, HttpClient, HttpClientBuilder};

use crate::Error;

use serde::{Deserialize, Serialize};

/// The default `threshold` of `getBalances`.
pub const DEFAULT_BALANCE_THRESHOLD: u8 = 100;

/// The collaborator the transfer pipeline submits to. One method per remote command; the HTTP
/// implementation lives in [`HttpClient`], tests substitute their own.
pub trait NodeClient {
    /// `getBalances`: confirmed balances of the given addresses.
    fn get_balances(&self, addresses: &[String], threshold: u8) -> Result<GetBalancesResponse, Error>;

    /// `getTransactionsToApprove`: two tips for a new bundle to approve.
    fn get_transactions_to_approve(
        &self,
        depth: usize,
        reference: Option<&str>,
    ) -> Result<GetTransactionsToApproveResponse, Error>;

    /// `attachToTangle`: proof of work over the given transactions. Not idempotent; every call
    /// produces fresh nonces.
    fn attach_to_tangle(
        &self,
        trunk_transaction: &str,
        branch_transaction: &str,
        min_weight_magnitude: usize,
        trytes: &[String],
    ) -> Result<Vec<String>, Error>;

    /// `storeTransactions`: persists attached transactions on the node. Idempotent.
    fn store_transactions(&self, trytes: &[String]) -> Result<(), Error>;

    /// `broadcastTransactions`: gossips attached transactions to neighbors. Idempotent.
    fn broadcast_transactions(&self, trytes: &[String]) -> Result<(), Error>;

    /// `findTransactions`: transaction hashes matching any subset of the query.
    fn find_transactions(&self, query: FindTransactionsQuery) -> Result<Vec<String>, Error>;

    /// `getTips`: the tips currently known to the node.
    fn get_tips(&self) -> Result<Vec<String>, Error>;

    /// `getNodeInfo`: node metadata.
    fn get_node_info(&self) -> Result<NodeInfo, Error>;
}

/// The request envelope: a `command` tag plus the fields of the selected command.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "command")]
pub enum NodeCommand<'a> {
    /// `getBalances`.
    #[serde(rename = "getBalances")]
    GetBalances {
        /// The addresses to query, 81 trytes each.
        addresses: &'a [String],
        /// The confirmation threshold, usually 100.
        threshold: u8,
    },
    /// `getTransactionsToApprove`.
    #[serde(rename = "getTransactionsToApprove", rename_all = "camelCase")]
    GetTransactionsToApprove {
        /// The depth of the tip selection walk.
        depth: usize,
        /// An optional transaction the walk should start from.
        #[serde(skip_serializing_if = "Option::is_none")]
        reference: Option<&'a str>,
    },
    /// `attachToTangle`.
    #[serde(rename = "attachToTangle", rename_all = "camelCase")]
    AttachToTangle {
        /// The trunk tip to approve.
        trunk_transaction: &'a str,
        /// The branch tip to approve.
        branch_transaction: &'a str,
        /// The required number of trailing zero trits of each transaction hash.
        min_weight_magnitude: usize,
        /// The transactions to attach, 2673 trytes each, last bundle index first.
        trytes: &'a [String],
    },
    /// `storeTransactions`.
    #[serde(rename = "storeTransactions")]
    StoreTransactions {
        /// The attached transactions to persist.
        trytes: &'a [String],
    },
    /// `broadcastTransactions`.
    #[serde(rename = "broadcastTransactions")]
    BroadcastTransactions {
        /// The attached transactions to gossip.
        trytes: &'a [String],
    },
    /// `findTransactions`.
    #[serde(rename = "findTransactions")]
    FindTransactions {
        /// Bundle hashes to match.
        #[serde(skip_serializing_if = "Vec::is_empty")]
        bundles: Vec<String>,
        /// Addresses to match.
        #[serde(skip_serializing_if = "Vec::is_empty")]
        addresses: Vec<String>,
        /// Tags to match.
        #[serde(skip_serializing_if = "Vec::is_empty")]
        tags: Vec<String>,
        /// Approved transactions to match.
        #[serde(skip_serializing_if = "Vec::is_empty")]
        approvees: Vec<String>,
    },
    /// `getTips`.
    #[serde(rename = "getTips")]
    GetTips {},
    /// `getNodeInfo`.
    #[serde(rename = "getNodeInfo")]
    GetNodeInfo {},
}

impl NodeCommand<'_> {
    /// The wire name of the command.
    pub fn name(&self) -> &'static str {
        match self {
            NodeCommand::GetBalances { .. } => "getBalances",
            NodeCommand::GetTransactionsToApprove { .. } => "getTransactionsToApprove",
            NodeCommand::AttachToTangle { .. } => "attachToTangle",
            NodeCommand::StoreTransactions { .. } => "storeTransactions",
            NodeCommand::BroadcastTransactions { .. } => "broadcastTransactions",
            NodeCommand::FindTransactions { .. } => "findTransactions",
            NodeCommand::GetTips {} => "getTips",
            NodeCommand::GetNodeInfo {} => "getNodeInfo",
        }
    }
}

/// The query of a `findTransactions` command. Empty lists are not serialized.
#[derive(Clone, Debug, Default)]
pub struct FindTransactionsQuery {
    /// Bundle hashes to match.
    pub bundles: Vec<String>,
    /// Addresses to match, 81 trytes each.
    pub addresses: Vec<String>,
    /// Tags to match, 27 trytes each.
    pub tags: Vec<String>,
    /// Approved transactions to match.
    pub approvees: Vec<String>,
}

/// Response of `getBalances`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetBalancesResponse {
    /// Balances as decimal strings, in request order.
    pub balances: Vec<String>,
    /// The milestone the balances are confirmed against.
    #[serde(default)]
    pub milestone: Option<String>,
    /// The index of that milestone.
    #[serde(default)]
    pub milestone_index: Option<i64>,
}

impl GetBalancesResponse {
    /// Parses the balances into integers.
    pub fn balances(&self) -> Result<Vec<u64>, Error> {
        self.balances
            .iter()
            .map(|balance| {
                balance
                    .parse::<u64>()
                    .map_err(|_| Error::Node(format!("malformed balance '{}'", balance)))
            })
            .collect()
    }
}

/// Response of `getTransactionsToApprove`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTransactionsToApproveResponse {
    /// The trunk tip.
    pub trunk_transaction: String,
    /// The branch tip.
    pub branch_transaction: String,
}

/// Response of `attachToTangle`.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct TrytesResponse {
    pub(crate) trytes: Vec<String>,
}

/// Response of `findTransactions` and `getTips`.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct HashesResponse {
    pub(crate) hashes: Vec<String>,
}

/// Acknowledgement of `storeTransactions` and `broadcastTransactions`.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct DurationResponse {
    #[serde(default)]
    #[allow(dead_code)]
    pub(crate) duration: Option<u64>,
}

/// Response of `getNodeInfo`. Unknown fields are ignored.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfo {
    /// The name of the node software.
    #[serde(default)]
    pub app_name: Option<String>,
    /// The version of the node software.
    #[serde(default)]
    pub app_version: Option<String>,
    /// The latest milestone known to the node.
    #[serde(default)]
    pub latest_milestone: Option<String>,
    /// The index of the latest milestone.
    #[serde(default)]
    pub latest_milestone_index: Option<i64>,
    /// The latest solid subtangle milestone.
    #[serde(default)]
    pub latest_solid_subtangle_milestone: Option<String>,
    /// The index of the latest solid subtangle milestone.
    #[serde(default)]
    pub latest_solid_subtangle_milestone_index: Option<i64>,
    /// The number of neighbors the node gossips with.
    #[serde(default)]
    pub neighbors: Option<u32>,
    /// The number of tips known to the node.
    #[serde(default)]
    pub tips: Option<u64>,
}
