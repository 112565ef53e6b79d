// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use tangle_bundle::{Address, BundleBuilder, Error, Payload, Tag, Timestamp, Value};
use tangle_signing::wots::{has_insecure_value, normalize};

const TIMESTAMP: Timestamp = Timestamp(1_609_459_200);

fn address(c: char) -> Address {
    Address::try_from_str(&c.to_string().repeat(81)).unwrap()
}

#[test]
fn zero_value_message_bundle() {
    let mut builder = BundleBuilder::new();
    builder
        .add_entry(1, address('A'), Value::zero(), Tag::zeros(), TIMESTAMP)
        .unwrap();

    let mut finalized = builder.finalize().unwrap();

    // The obsolete tag increment loop lands on a hash free of 13s.
    assert_eq!(
        finalized.hash().to_string(),
        "WPEKEVLDULPGTDWHQFE9PCFQZYRZ9BFNSYFFDBBOZXKDRCJHCCOWOYHTKUMBNKDVG9HCRIAFHUJHBRCKB"
    );
    assert_eq!(
        finalized.transactions()[0].obsolete_tag().to_trytes().to_string(),
        format!("QF{}", "9".repeat(25))
    );

    finalized
        .add_signature_fragments(vec![Payload::try_from_str("HELLO9WORLD").unwrap()])
        .unwrap();

    let bundle = finalized.build();
    assert_eq!(bundle.len(), 1);
    assert_eq!(bundle.get(0).unwrap().index().to_inner(), 0);
    assert_eq!(bundle.get(0).unwrap().last_index().to_inner(), 0);
    bundle.validate().unwrap();
}

#[test]
fn finalize_is_deterministic() {
    let build = || {
        let mut builder = BundleBuilder::new();
        builder
            .add_entry(1, address('A'), Value::zero(), Tag::zeros(), TIMESTAMP)
            .unwrap();
        builder.finalize().unwrap()
    };

    assert_eq!(build().hash(), build().hash());
}

#[test]
fn value_bundle_with_input() {
    let mut builder = BundleBuilder::new();
    builder
        .add_entry(1, address('A'), Value::try_from_inner(100).unwrap(), Tag::zeros(), TIMESTAMP)
        .unwrap();
    builder
        .add_entry(1, address('B'), Value::try_from_inner(-100).unwrap(), Tag::zeros(), TIMESTAMP)
        .unwrap();

    let finalized = builder.finalize().unwrap();
    assert_eq!(
        finalized.hash().to_string(),
        "RS9FQVEDKLDQOXATEQGLTXBISCUSCHPAESEFYKEVYSOJGZOITZPJEWNYIUJADGIFBRTTFLNZOGPGJ9PSW"
    );

    let bundle = finalized.build();
    assert_eq!(bundle.len(), 2);
    assert_eq!(bundle.get(0).unwrap().last_index().to_inner(), 1);
    bundle.validate().unwrap();
}

#[test]
fn multi_fragment_entry() {
    let mut builder = BundleBuilder::new();
    builder
        .add_entry(2, address('A'), Value::zero(), Tag::zeros(), TIMESTAMP)
        .unwrap();

    let bundle = builder.finalize().unwrap().build();

    assert_eq!(bundle.len(), 2);
    assert_eq!(bundle.get(0).unwrap().address(), bundle.get(1).unwrap().address());
    assert_eq!(bundle.get(1).unwrap().value().to_inner(), 0);
    assert_eq!(bundle.get(1).unwrap().index().to_inner(), 1);
    bundle.validate().unwrap();
}

#[test]
fn normalized_hash_has_no_insecure_value() {
    for c in ['A', 'B', 'C', 'D', 'E'] {
        let mut builder = BundleBuilder::new();
        builder
            .add_entry(1, address(c), Value::zero(), Tag::zeros(), TIMESTAMP)
            .unwrap();

        let finalized = builder.finalize().unwrap();
        let normalized = normalize(finalized.hash().as_trits()).unwrap();
        assert!(!has_insecure_value(&normalized));
    }
}

#[test]
fn unbalanced_bundle_fails_validation() {
    let mut builder = BundleBuilder::new();
    builder
        .add_entry(1, address('A'), Value::try_from_inner(100).unwrap(), Tag::zeros(), TIMESTAMP)
        .unwrap();

    let bundle = builder.finalize().unwrap().build();

    assert_eq!(bundle.validate(), Err(Error::InvalidValueSum(100)));
}

#[test]
fn empty_bundle_cannot_finalize() {
    assert!(matches!(BundleBuilder::new().finalize(), Err(Error::EmptyBundle)));
}

#[test]
fn empty_entry_is_rejected() {
    let mut builder = BundleBuilder::new();
    assert_eq!(
        builder.add_entry(0, address('A'), Value::zero(), Tag::zeros(), TIMESTAMP),
        Err(Error::EmptyEntry)
    );
}

#[test]
fn too_many_fragments_are_rejected() {
    let mut builder = BundleBuilder::new();
    builder
        .add_entry(1, address('A'), Value::zero(), Tag::zeros(), TIMESTAMP)
        .unwrap();
    let mut finalized = builder.finalize().unwrap();

    assert!(matches!(
        finalized.add_signature_fragments(vec![Payload::zeros(), Payload::zeros()]),
        Err(Error::TooManyFragments { .. })
    ));
}
