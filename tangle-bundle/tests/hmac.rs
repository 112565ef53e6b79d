// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use tangle_bundle::{Address, BundleBuilder, HmacKey, Tag, Timestamp, Value};

const TIMESTAMP: Timestamp = Timestamp(1_609_459_200);

fn key() -> HmacKey {
    HmacKey::try_from_str(&format!("HMACKEY9SECRET{}", "9".repeat(67))).unwrap()
}

#[test]
fn stamps_value_transactions() {
    let mut builder = BundleBuilder::new();
    builder
        .add_entry(
            1,
            Address::try_from_str(&"B".repeat(81)).unwrap(),
            Value::try_from_inner(100).unwrap(),
            Tag::zeros(),
            TIMESTAMP,
        )
        .unwrap();

    let mut finalized = builder.finalize().unwrap();
    assert_eq!(
        finalized.hash().to_string(),
        "NGYEADNWIXLKZGZIWCJHQNYCTQPVFWAAPBGZWTINLZFBRDDTHC9LKCCDWVQNZHXJYSPCF9ODTLJAJKIVX"
    );

    key().apply(&mut finalized).unwrap();

    let payload_trytes = finalized.transactions()[0].payload().to_trytes().to_string();
    assert_eq!(
        &payload_trytes[..81],
        "TQWMJHPXZBYXEKDOVWOHJNCYXBTXSWGPXAKIAOCMJGZEAJOHDMHGJVX9MOCSZYRTXVRQYZXFBSVHDLOIE"
    );
    assert_eq!(payload_trytes[81..], "9".repeat(2187 - 81));
}

#[test]
fn leaves_non_value_transactions_alone() {
    let mut builder = BundleBuilder::new();
    builder
        .add_entry(
            1,
            Address::try_from_str(&"A".repeat(81)).unwrap(),
            Value::zero(),
            Tag::zeros(),
            TIMESTAMP,
        )
        .unwrap();

    let mut finalized = builder.finalize().unwrap();
    key().apply(&mut finalized).unwrap();

    assert_eq!(
        finalized.transactions()[0].payload().to_trytes().to_string(),
        "9".repeat(2187)
    );
}

#[test]
fn rejects_malformed_keys() {
    assert!(HmacKey::try_from_str("TOO9SHORT").is_err());
    assert!(HmacKey::try_from_str(&"a".repeat(81)).is_err());
}
