// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use tangle_crypto::{
    sponge::{Kerl, Sponge},
    HASH_LENGTH,
};
use tangle_ternary::{TritBuf, TryteBuf};

fn trits_from_str(trytes: &str) -> TritBuf {
    TryteBuf::try_from_str(trytes).unwrap().as_trits()
}

fn trytes_of(trits: &[tangle_ternary::Btrit]) -> String {
    tangle_ternary::convert::trits_to_trytes(trits).unwrap().to_string()
}

#[test]
fn single_absorb_single_squeeze() {
    let input = trits_from_str("GYOMKVTSNHVJNCNFBBAH9AAMXLPLLLROQY99QN9DLSJUHDPBLCFFAIQXZA9BKMBJCYSFHFPXAHDWZFEIZ");

    let mut kerl = Kerl::new();
    let hash = kerl.digest(&input).unwrap();

    assert_eq!(
        trytes_of(&hash),
        "OXJCNFHUNAHWDLKKPELTBFUCVW9KLXKOGWERKTJXQMXTKFKNWNNXYD9DMJJABSEIONOSJTTEVKVDQEWTW"
    );
}

#[test]
fn single_absorb_chained_squeeze() {
    let input = trits_from_str("9MIDYNHBWMBCXVDEFOFWINXTERALUKYYPPHKP9JJFGJEIUY9MUDVNFZHMMWZUYUSWAIOWEVTHNWMHANBH");

    let mut kerl = Kerl::new();
    kerl.absorb(&input).unwrap();

    let mut output = TritBuf::zeros(2 * HASH_LENGTH);
    kerl.squeeze_into(&mut output).unwrap();

    assert_eq!(
        trytes_of(&output[..HASH_LENGTH]),
        "G9JYBOMPUXHYHKSNRNMMSSZCSHOFYOYNZRSZMAAYWDYEIMVVOGKPJBVBM9TDPULSFUNMTVXRKFIDOHUXX"
    );
    assert_eq!(
        trytes_of(&output[HASH_LENGTH..]),
        "VYDLFSZYZTWQYTE9SPYYWYTXJYQ9IFGYOLZXWZBKWZN9QOOTBQMWMUBLEWUEEASRHRTNIQWJQNDWRYLCA"
    );
}

#[test]
fn multi_absorb_single_squeeze() {
    let input = trits_from_str(
        "GYOMKVTSNHVJNCNFBBAH9AAMXLPLLLROQY99QN9DLSJUHDPBLCFFAIQXZA9BKMBJCYSFHFPXAHDWZFEIZ\
         9MIDYNHBWMBCXVDEFOFWINXTERALUKYYPPHKP9JJFGJEIUY9MUDVNFZHMMWZUYUSWAIOWEVTHNWMHANBH",
    );

    let mut kerl = Kerl::new();
    let hash = kerl.digest(&input).unwrap();

    assert_eq!(
        trytes_of(&hash),
        "HEOKKFGFTCZPGIFKWJNUURFDQLBKRLIXAAPBAHAMOBMQXYRUH9PBPUKMBMVPSABJOJSXOKHLEXEKAH9NX"
    );
}

#[test]
fn successive_squeezes_differ() {
    let input = trits_from_str("GYOMKVTSNHVJNCNFBBAH9AAMXLPLLLROQY99QN9DLSJUHDPBLCFFAIQXZA9BKMBJCYSFHFPXAHDWZFEIZ");

    let mut kerl = Kerl::new();
    kerl.absorb(&input).unwrap();

    let first = kerl.squeeze().unwrap();
    let second = kerl.squeeze().unwrap();

    assert_ne!(first.as_slice(), second.as_slice());
}

#[test]
fn squeeze_is_deterministic() {
    let input = trits_from_str("9MIDYNHBWMBCXVDEFOFWINXTERALUKYYPPHKP9JJFGJEIUY9MUDVNFZHMMWZUYUSWAIOWEVTHNWMHANBH");

    let mut a = Kerl::new();
    let mut b = Kerl::new();
    a.absorb(&input).unwrap();
    b.absorb(&input).unwrap();

    assert_eq!(a.squeeze().unwrap().as_slice(), b.squeeze().unwrap().as_slice());
    assert_eq!(a.squeeze().unwrap().as_slice(), b.squeeze().unwrap().as_slice());
}

#[test]
fn reset_clears_pending_input() {
    let input = trits_from_str("GYOMKVTSNHVJNCNFBBAH9AAMXLPLLLROQY99QN9DLSJUHDPBLCFFAIQXZA9BKMBJCYSFHFPXAHDWZFEIZ");

    let mut kerl = Kerl::new();
    kerl.absorb(&input).unwrap();
    kerl.reset();
    kerl.absorb(&input).unwrap();

    let mut reference = Kerl::new();
    reference.absorb(&input).unwrap();

    assert_eq!(kerl.squeeze().unwrap().as_slice(), reference.squeeze().unwrap().as_slice());
}

#[test]
fn rejects_partial_chunks() {
    let mut kerl = Kerl::new();

    assert!(kerl.absorb(&TritBuf::zeros(242)).is_err());
    assert!(kerl.squeeze_into(&mut TritBuf::zeros(244)).is_err());
}
