// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::{constants::*, Error};

use tangle_crypto::{
    sponge::{Kerl, Sponge},
    Hash,
};
use tangle_ternary::{convert, Btrit, TritBuf, Tryte, TryteBuf};

use once_cell::sync::OnceCell;

use std::fmt;

macro_rules! def_trit_field {
    ($(#[$docs:meta])* $name:ident, $trit_len:expr) => {
        $(#[$docs])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name(TritBuf);

        impl $name {
            /// Creates an all-zero field.
            pub fn zeros() -> Self {
                Self(TritBuf::zeros($trit_len))
            }

            /// The length of the field in trits.
            pub const fn trit_len() -> usize {
                $trit_len
            }

            /// Creates the field from exactly [`Self::trit_len`] trits.
            pub fn try_from_trits(trits: TritBuf) -> Result<Self, Error> {
                if trits.len() != $trit_len {
                    return Err(Error::InvalidFieldLength {
                        field: stringify!($name),
                        length: trits.len(),
                    });
                }

                Ok(Self(trits))
            }

            /// Interprets the field as a trit slice.
            pub fn as_trits(&self) -> &[Btrit] {
                &self.0
            }

            /// Renders the field as trytes.
            pub fn to_trytes(&self) -> TryteBuf {
                // A field length is always a multiple of three.
                convert::trits_to_trytes(&self.0).unwrap()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_trytes())
            }
        }
    };
}

def_trit_field!(
    /// A signature or message fragment of a transaction.
    Payload,
    PAYLOAD_TRIT_LEN
);
def_trit_field!(
    /// The address a transaction credits or debits.
    Address,
    ADDRESS_TRIT_LEN
);
def_trit_field!(
    /// A transaction tag.
    Tag,
    TAG_TRIT_LEN
);
def_trit_field!(
    /// The nonce produced by proof of work.
    Nonce,
    NONCE_TRIT_LEN
);

impl Payload {
    /// Parses a payload from at most 2187 trytes, right-padding with `9`.
    pub fn try_from_str(trytes: &str) -> Result<Self, Error> {
        if trytes.len() > PAYLOAD_TRYTE_LEN {
            return Err(Error::InvalidFieldLength {
                field: "Payload",
                length: trytes.len() * 3,
            });
        }

        let mut trytes = TryteBuf::try_from_str(trytes)?;
        while trytes.len() < PAYLOAD_TRYTE_LEN {
            trytes.push(Tryte::Nine);
        }

        Ok(Self(trytes.as_trits()))
    }
}

impl Address {
    /// Parses an address from 81 trytes, or from 90 trytes with a valid checksum which is then
    /// stripped.
    pub fn try_from_str(trytes: &str) -> Result<Self, Error> {
        match trytes.len() {
            ADDRESS_TRYTE_LEN => Ok(Self(TryteBuf::try_from_str(trytes)?.as_trits())),
            len if len == ADDRESS_TRYTE_LEN + CHECKSUM_TRYTE_LEN => {
                let address = Self(TryteBuf::try_from_str(&trytes[..ADDRESS_TRYTE_LEN])?.as_trits());
                if address.checksum().to_string() != trytes[ADDRESS_TRYTE_LEN..] {
                    return Err(Error::InvalidChecksum);
                }
                Ok(address)
            }
            len => Err(Error::InvalidFieldLength {
                field: "Address",
                length: len * 3,
            }),
        }
    }

    /// Computes the 9-tryte checksum: the tail of the Kerl digest of the address.
    pub fn checksum(&self) -> TryteBuf {
        let mut kerl = Kerl::default();
        // A single hash unit cannot fail to absorb or squeeze.
        let digest = kerl.digest(&self.0).unwrap();
        let trytes = convert::trits_to_trytes(&digest).unwrap();

        trytes[ADDRESS_TRYTE_LEN - CHECKSUM_TRYTE_LEN..].iter().copied().collect()
    }

    /// Renders the address as 90 trytes, checksum included.
    pub fn to_trytes_with_checksum(&self) -> String {
        format!("{}{}", self.to_trytes(), self.checksum())
    }
}

impl Tag {
    /// Parses a tag from at most 27 trytes, right-padding with `9`.
    pub fn try_from_str(trytes: &str) -> Result<Self, Error> {
        if trytes.len() > TAG_TRYTE_LEN {
            return Err(Error::InvalidFieldLength {
                field: "Tag",
                length: trytes.len() * 3,
            });
        }

        let mut trytes = TryteBuf::try_from_str(trytes)?;
        while trytes.len() < TAG_TRYTE_LEN {
            trytes.push(Tryte::Nine);
        }

        Ok(Self(trytes.as_trits()))
    }
}

/// A transaction value in iotas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Value(i64);

impl Value {
    /// The zero value.
    pub fn zero() -> Self {
        Self(0)
    }

    /// Creates a value, rejecting amounts beyond the token supply.
    pub fn try_from_inner(value: i64) -> Result<Self, Error> {
        if value.abs() > IOTA_SUPPLY {
            return Err(Error::InvalidValue(value));
        }

        Ok(Self(value))
    }

    /// Returns the raw amount.
    pub fn to_inner(self) -> i64 {
        self.0
    }
}

/// A transaction or attachment timestamp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Returns the raw timestamp.
    pub fn to_inner(self) -> u64 {
        self.0
    }
}

/// The position of a transaction within its bundle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Index(pub usize);

impl Index {
    /// Returns the raw index.
    pub fn to_inner(self) -> usize {
        self.0
    }
}

/// A transaction of the legacy IOTA protocol: 2673 trytes on the wire.
pub struct Transaction {
    pub(crate) payload: Payload,
    pub(crate) address: Address,
    pub(crate) value: Value,
    pub(crate) obsolete_tag: Tag,
    pub(crate) timestamp: Timestamp,
    pub(crate) index: Index,
    pub(crate) last_index: Index,
    pub(crate) bundle: Hash,
    pub(crate) trunk: Hash,
    pub(crate) branch: Hash,
    pub(crate) tag: Tag,
    pub(crate) attachment_ts: Timestamp,
    pub(crate) attachment_lbts: Timestamp,
    pub(crate) attachment_ubts: Timestamp,
    pub(crate) nonce: Nonce,
    pub(crate) hash: OnceCell<Hash>,
}

impl Transaction {
    /// Parses a transaction from its 8019-trit representation.
    pub fn from_trits(trits: &[Btrit]) -> Result<Self, Error> {
        if trits.len() != TRANSACTION_TRIT_LEN {
            return Err(Error::InvalidTransactionLength(trits.len()));
        }

        let value = Value::try_from_inner(convert::trits_to_i64(
            &trits[VALUE_OFFSET..VALUE_OFFSET + VALUE_TRIT_LEN],
        )?)?;

        Ok(Self {
            payload: Payload(TritBuf::from_trits(&trits[PAYLOAD_OFFSET..PAYLOAD_OFFSET + PAYLOAD_TRIT_LEN])),
            address: Address(TritBuf::from_trits(&trits[ADDRESS_OFFSET..ADDRESS_OFFSET + ADDRESS_TRIT_LEN])),
            value,
            obsolete_tag: Tag(TritBuf::from_trits(
                &trits[OBSOLETE_TAG_OFFSET..OBSOLETE_TAG_OFFSET + TAG_TRIT_LEN],
            )),
            timestamp: Timestamp(read_u64(trits, TIMESTAMP_OFFSET)?),
            index: Index(read_u64(trits, CURRENT_INDEX_OFFSET)? as usize),
            last_index: Index(read_u64(trits, LAST_INDEX_OFFSET)? as usize),
            bundle: read_hash(trits, BUNDLE_OFFSET),
            trunk: read_hash(trits, TRUNK_OFFSET),
            branch: read_hash(trits, BRANCH_OFFSET),
            tag: Tag(TritBuf::from_trits(&trits[TAG_OFFSET..TAG_OFFSET + TAG_TRIT_LEN])),
            attachment_ts: Timestamp(read_u64(trits, ATTACHMENT_TS_OFFSET)?),
            attachment_lbts: Timestamp(read_u64(trits, ATTACHMENT_LBTS_OFFSET)?),
            attachment_ubts: Timestamp(read_u64(trits, ATTACHMENT_UBTS_OFFSET)?),
            nonce: Nonce(TritBuf::from_trits(&trits[NONCE_OFFSET..NONCE_OFFSET + NONCE_TRIT_LEN])),
            hash: OnceCell::new(),
        })
    }

    /// Parses a transaction from its 2673-tryte wire representation.
    pub fn from_trytes(trytes: &str) -> Result<Self, Error> {
        if trytes.len() != TRANSACTION_TRYTE_LEN {
            return Err(Error::InvalidTransactionLength(trytes.len() * 3));
        }

        Self::from_trits(&TryteBuf::try_from_str(trytes)?.as_trits())
    }

    /// Serializes the transaction into its 8019-trit representation.
    pub fn as_trits(&self) -> TritBuf {
        let mut trits = TritBuf::zeros(TRANSACTION_TRIT_LEN);

        trits[PAYLOAD_OFFSET..PAYLOAD_OFFSET + PAYLOAD_TRIT_LEN].copy_from_slice(self.payload.as_trits());
        trits[ADDRESS_OFFSET..ADDRESS_OFFSET + ADDRESS_TRIT_LEN].copy_from_slice(self.address.as_trits());
        write_i64(&mut trits, VALUE_OFFSET, VALUE_TRIT_LEN, self.value.to_inner());
        trits[OBSOLETE_TAG_OFFSET..OBSOLETE_TAG_OFFSET + TAG_TRIT_LEN].copy_from_slice(self.obsolete_tag.as_trits());
        write_i64(&mut trits, TIMESTAMP_OFFSET, TIMESTAMP_TRIT_LEN, self.timestamp.to_inner() as i64);
        write_i64(&mut trits, CURRENT_INDEX_OFFSET, TIMESTAMP_TRIT_LEN, self.index.to_inner() as i64);
        write_i64(&mut trits, LAST_INDEX_OFFSET, TIMESTAMP_TRIT_LEN, self.last_index.to_inner() as i64);
        trits[BUNDLE_OFFSET..BUNDLE_OFFSET + 243].copy_from_slice(self.bundle.as_trits());
        trits[TRUNK_OFFSET..TRUNK_OFFSET + 243].copy_from_slice(self.trunk.as_trits());
        trits[BRANCH_OFFSET..BRANCH_OFFSET + 243].copy_from_slice(self.branch.as_trits());
        trits[TAG_OFFSET..TAG_OFFSET + TAG_TRIT_LEN].copy_from_slice(self.tag.as_trits());
        write_i64(
            &mut trits,
            ATTACHMENT_TS_OFFSET,
            TIMESTAMP_TRIT_LEN,
            self.attachment_ts.to_inner() as i64,
        );
        write_i64(
            &mut trits,
            ATTACHMENT_LBTS_OFFSET,
            TIMESTAMP_TRIT_LEN,
            self.attachment_lbts.to_inner() as i64,
        );
        write_i64(
            &mut trits,
            ATTACHMENT_UBTS_OFFSET,
            TIMESTAMP_TRIT_LEN,
            self.attachment_ubts.to_inner() as i64,
        );
        trits[NONCE_OFFSET..NONCE_OFFSET + NONCE_TRIT_LEN].copy_from_slice(self.nonce.as_trits());

        trits
    }

    /// Serializes the transaction into its 2673-tryte wire representation.
    pub fn as_trytes(&self) -> String {
        // A transaction length is always a multiple of three.
        convert::trits_to_trytes(&self.as_trits()).unwrap().to_string()
    }

    /// The essence of the transaction, the part covered by the bundle hash: address, value,
    /// obsolete tag, timestamp, current index and last index.
    pub fn essence(&self) -> TritBuf {
        let mut essence = TritBuf::zeros(ESSENCE_TRIT_LEN);

        essence[..ADDRESS_TRIT_LEN].copy_from_slice(self.address.as_trits());
        let value_offset = ADDRESS_TRIT_LEN;
        // A checked value always fits its field.
        convert::trits_from_i64_into(
            self.value.to_inner(),
            &mut essence[value_offset..value_offset + VALUE_TRIT_LEN],
        )
        .unwrap();
        let tag_offset = value_offset + VALUE_TRIT_LEN;
        essence[tag_offset..tag_offset + TAG_TRIT_LEN].copy_from_slice(self.obsolete_tag.as_trits());
        let ts_offset = tag_offset + TAG_TRIT_LEN;
        convert::trits_from_i64_into(
            self.timestamp.to_inner() as i64,
            &mut essence[ts_offset..ts_offset + TIMESTAMP_TRIT_LEN],
        )
        .unwrap();
        let index_offset = ts_offset + TIMESTAMP_TRIT_LEN;
        convert::trits_from_i64_into(
            self.index.to_inner() as i64,
            &mut essence[index_offset..index_offset + TIMESTAMP_TRIT_LEN],
        )
        .unwrap();
        let last_offset = index_offset + TIMESTAMP_TRIT_LEN;
        convert::trits_from_i64_into(
            self.last_index.to_inner() as i64,
            &mut essence[last_offset..last_offset + TIMESTAMP_TRIT_LEN],
        )
        .unwrap();

        essence
    }

    /// The Kerl hash of the serialized transaction, computed on first use and cached.
    pub fn hash(&self) -> &Hash {
        self.hash.get_or_init(|| {
            let mut kerl = Kerl::default();
            // A transaction length is a multiple of the hash length.
            let hash = kerl.digest(&self.as_trits()).unwrap();
            Hash::try_from(hash.as_slice()).unwrap()
        })
    }

    /// The number of trailing zero trits of the transaction hash, as checked against the
    /// minimum weight magnitude by the network.
    pub fn weight_magnitude(&self) -> u8 {
        self.hash().weight()
    }

    /// The signature or message fragment.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// The address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// The transferred value.
    pub fn value(&self) -> Value {
        self.value
    }

    /// The obsolete tag mutated during bundle finalization.
    pub fn obsolete_tag(&self) -> &Tag {
        &self.obsolete_tag
    }

    /// The issuance timestamp.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// The position of the transaction in its bundle.
    pub fn index(&self) -> Index {
        self.index
    }

    /// The position of the last transaction in the bundle.
    pub fn last_index(&self) -> Index {
        self.last_index
    }

    /// The bundle hash.
    pub fn bundle(&self) -> &Hash {
        &self.bundle
    }

    /// The trunk transaction hash.
    pub fn trunk(&self) -> &Hash {
        &self.trunk
    }

    /// The branch transaction hash.
    pub fn branch(&self) -> &Hash {
        &self.branch
    }

    /// The tag.
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// The attachment timestamp set during proof of work.
    pub fn attachment_ts(&self) -> Timestamp {
        self.attachment_ts
    }

    /// The nonce found by proof of work.
    pub fn nonce(&self) -> &Nonce {
        &self.nonce
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = Index(index);
        self.hash = OnceCell::new();
    }

    pub(crate) fn set_last_index(&mut self, index: usize) {
        self.last_index = Index(index);
        self.hash = OnceCell::new();
    }

    pub(crate) fn set_bundle(&mut self, bundle: Hash) {
        self.bundle = bundle;
        self.hash = OnceCell::new();
    }

    pub(crate) fn set_obsolete_tag(&mut self, tag: Tag) {
        self.obsolete_tag = tag;
        self.hash = OnceCell::new();
    }

    pub(crate) fn set_payload(&mut self, payload: Payload) {
        self.payload = payload;
        self.hash = OnceCell::new();
    }
}

impl Clone for Transaction {
    fn clone(&self) -> Self {
        Self {
            payload: self.payload.clone(),
            address: self.address.clone(),
            value: self.value,
            obsolete_tag: self.obsolete_tag.clone(),
            timestamp: self.timestamp,
            index: self.index,
            last_index: self.last_index,
            bundle: self.bundle,
            trunk: self.trunk,
            branch: self.branch,
            tag: self.tag.clone(),
            attachment_ts: self.attachment_ts,
            attachment_lbts: self.attachment_lbts,
            attachment_ubts: self.attachment_ubts,
            nonce: self.nonce.clone(),
            hash: OnceCell::new(),
        }
    }
}

impl fmt::Debug for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transaction")
            .field("address", &self.address.to_trytes().to_string())
            .field("value", &self.value.to_inner())
            .field("index", &self.index.to_inner())
            .field("last_index", &self.last_index.to_inner())
            .field("bundle", &self.bundle)
            .finish()
    }
}

/// Builder for a [`Transaction`]. Unset fields default to zeros.
#[derive(Default)]
pub struct TransactionBuilder {
    payload: Option<Payload>,
    address: Option<Address>,
    value: Option<Value>,
    obsolete_tag: Option<Tag>,
    timestamp: Option<Timestamp>,
    index: Option<Index>,
    last_index: Option<Index>,
    bundle: Option<Hash>,
    trunk: Option<Hash>,
    branch: Option<Hash>,
    tag: Option<Tag>,
    attachment_ts: Option<Timestamp>,
    attachment_lbts: Option<Timestamp>,
    attachment_ubts: Option<Timestamp>,
    nonce: Option<Nonce>,
}

impl TransactionBuilder {
    /// Creates a new builder with all fields unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the signature or message fragment.
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Sets the address.
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    /// Sets the value.
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Sets the obsolete tag.
    pub fn with_obsolete_tag(mut self, obsolete_tag: Tag) -> Self {
        self.obsolete_tag = Some(obsolete_tag);
        self
    }

    /// Sets the issuance timestamp.
    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Sets the position in the bundle.
    pub fn with_index(mut self, index: Index) -> Self {
        self.index = Some(index);
        self
    }

    /// Sets the position of the last transaction in the bundle.
    pub fn with_last_index(mut self, last_index: Index) -> Self {
        self.last_index = Some(last_index);
        self
    }

    /// Sets the bundle hash.
    pub fn with_bundle(mut self, bundle: Hash) -> Self {
        self.bundle = Some(bundle);
        self
    }

    /// Sets the trunk transaction hash.
    pub fn with_trunk(mut self, trunk: Hash) -> Self {
        self.trunk = Some(trunk);
        self
    }

    /// Sets the branch transaction hash.
    pub fn with_branch(mut self, branch: Hash) -> Self {
        self.branch = Some(branch);
        self
    }

    /// Sets the tag.
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Sets the attachment timestamp.
    pub fn with_attachment_ts(mut self, attachment_ts: Timestamp) -> Self {
        self.attachment_ts = Some(attachment_ts);
        self
    }

    /// Sets the attachment timestamp lower bound.
    pub fn with_attachment_lbts(mut self, attachment_lbts: Timestamp) -> Self {
        self.attachment_lbts = Some(attachment_lbts);
        self
    }

    /// Sets the attachment timestamp upper bound.
    pub fn with_attachment_ubts(mut self, attachment_ubts: Timestamp) -> Self {
        self.attachment_ubts = Some(attachment_ubts);
        self
    }

    /// Sets the nonce.
    pub fn with_nonce(mut self, nonce: Nonce) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Builds the transaction, zero-filling unset fields.
    pub fn build(self) -> Transaction {
        Transaction {
            payload: self.payload.unwrap_or_else(Payload::zeros),
            address: self.address.unwrap_or_else(Address::zeros),
            value: self.value.unwrap_or_else(Value::zero),
            obsolete_tag: self.obsolete_tag.unwrap_or_else(Tag::zeros),
            timestamp: self.timestamp.unwrap_or_default(),
            index: self.index.unwrap_or_default(),
            last_index: self.last_index.unwrap_or_default(),
            bundle: self.bundle.unwrap_or_else(Hash::zeros),
            trunk: self.trunk.unwrap_or_else(Hash::zeros),
            branch: self.branch.unwrap_or_else(Hash::zeros),
            tag: self.tag.unwrap_or_else(Tag::zeros),
            attachment_ts: self.attachment_ts.unwrap_or_default(),
            attachment_lbts: self.attachment_lbts.unwrap_or_default(),
            attachment_ubts: self.attachment_ubts.unwrap_or_default(),
            nonce: self.nonce.unwrap_or_else(Nonce::zeros),
            hash: OnceCell::new(),
        }
    }
}

fn read_u64(trits: &[Btrit], offset: usize) -> Result<u64, Error> {
    let value = convert::trits_to_i64(&trits[offset..offset + TIMESTAMP_TRIT_LEN])
        .map_err(|_| Error::InvalidTransactionLength(TIMESTAMP_TRIT_LEN))?;

    Ok(value.max(0) as u64)
}

fn read_hash(trits: &[Btrit], offset: usize) -> Hash {
    // The slice is exactly one hash unit long.
    Hash::try_from(&trits[offset..offset + 243]).unwrap()
}

fn write_i64(trits: &mut TritBuf, offset: usize, len: usize, value: i64) {
    // Checked fields always fit their trit width.
    convert::trits_from_i64_into(value, &mut trits[offset..offset + len]).unwrap()
}
