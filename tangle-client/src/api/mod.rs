// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! The client-side operations: address discovery, input selection and the transfer pipeline.

mod inputs;
mod new_address;
mod prepare_transfers;
mod send_transfers;
mod send_trytes;

pub use inputs::GetInputsBuilder;
pub use new_address::GetNewAddressBuilder;
pub use prepare_transfers::{verify_bundle_signatures, PrepareTransfersBuilder};
pub use send_transfers::SendTransfersBuilder;
pub use send_trytes::SendTrytesBuilder;

pub(crate) use new_address::generate_address;

use std::time::{SystemTime, UNIX_EPOCH};

pub(crate) fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
