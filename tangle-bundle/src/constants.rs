// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Trit-level layout of the 2673-tryte transaction wire record.

/// The length of a transaction in trits.
pub const TRANSACTION_TRIT_LEN: usize = 8019;
/// The length of a transaction in trytes.
pub const TRANSACTION_TRYTE_LEN: usize = TRANSACTION_TRIT_LEN / 3;

/// The total number of tokens in circulation, `(3^33 - 1) / 2`.
pub const IOTA_SUPPLY: i64 = 2_779_530_283_277_761;

/// Offset of the signature or message fragment, in trits.
pub const PAYLOAD_OFFSET: usize = 0;
/// Length of the signature or message fragment, in trits.
pub const PAYLOAD_TRIT_LEN: usize = 6561;
/// Length of the signature or message fragment, in trytes.
pub const PAYLOAD_TRYTE_LEN: usize = PAYLOAD_TRIT_LEN / 3;

/// Offset of the address, in trits.
pub const ADDRESS_OFFSET: usize = PAYLOAD_OFFSET + PAYLOAD_TRIT_LEN;
/// Length of the address, in trits.
pub const ADDRESS_TRIT_LEN: usize = 243;
/// Length of the address, in trytes.
pub const ADDRESS_TRYTE_LEN: usize = ADDRESS_TRIT_LEN / 3;
/// Length of an address checksum, in trytes.
pub const CHECKSUM_TRYTE_LEN: usize = 9;

/// Offset of the value, in trits.
pub const VALUE_OFFSET: usize = ADDRESS_OFFSET + ADDRESS_TRIT_LEN;
/// Length of the value, in trits.
pub const VALUE_TRIT_LEN: usize = 81;

/// Offset of the obsolete tag, in trits.
pub const OBSOLETE_TAG_OFFSET: usize = VALUE_OFFSET + VALUE_TRIT_LEN;
/// Length of a tag, in trits.
pub const TAG_TRIT_LEN: usize = 81;
/// Length of a tag, in trytes.
pub const TAG_TRYTE_LEN: usize = TAG_TRIT_LEN / 3;

/// Offset of the timestamp, in trits.
pub const TIMESTAMP_OFFSET: usize = OBSOLETE_TAG_OFFSET + TAG_TRIT_LEN;
/// Length of a timestamp or index field, in trits.
pub const TIMESTAMP_TRIT_LEN: usize = 27;

/// Offset of the current index, in trits.
pub const CURRENT_INDEX_OFFSET: usize = TIMESTAMP_OFFSET + TIMESTAMP_TRIT_LEN;
/// Offset of the last index, in trits.
pub const LAST_INDEX_OFFSET: usize = CURRENT_INDEX_OFFSET + TIMESTAMP_TRIT_LEN;

/// Offset of the bundle hash, in trits.
pub const BUNDLE_OFFSET: usize = LAST_INDEX_OFFSET + TIMESTAMP_TRIT_LEN;
/// Offset of the trunk transaction hash, in trits.
pub const TRUNK_OFFSET: usize = BUNDLE_OFFSET + 243;
/// Offset of the branch transaction hash, in trits.
pub const BRANCH_OFFSET: usize = TRUNK_OFFSET + 243;

/// Offset of the tag, in trits.
pub const TAG_OFFSET: usize = BRANCH_OFFSET + 243;

/// Offset of the attachment timestamp, in trits.
pub const ATTACHMENT_TS_OFFSET: usize = TAG_OFFSET + TAG_TRIT_LEN;
/// Offset of the attachment timestamp lower bound, in trits.
pub const ATTACHMENT_LBTS_OFFSET: usize = ATTACHMENT_TS_OFFSET + TIMESTAMP_TRIT_LEN;
/// Offset of the attachment timestamp upper bound, in trits.
pub const ATTACHMENT_UBTS_OFFSET: usize = ATTACHMENT_LBTS_OFFSET + TIMESTAMP_TRIT_LEN;

/// Offset of the nonce, in trits.
pub const NONCE_OFFSET: usize = ATTACHMENT_UBTS_OFFSET + TIMESTAMP_TRIT_LEN;
/// Length of the nonce, in trits.
pub const NONCE_TRIT_LEN: usize = 81;

/// Offset of the bundle essence: address, value, obsolete tag, timestamp and indices.
pub const ESSENCE_OFFSET: usize = ADDRESS_OFFSET;
/// Length of the bundle essence, in trits.
pub const ESSENCE_TRIT_LEN: usize = BUNDLE_OFFSET - ADDRESS_OFFSET;
