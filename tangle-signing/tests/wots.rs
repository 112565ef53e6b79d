// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use tangle_crypto::sponge::Kerl;
use tangle_signing::{
    seed::Seed,
    wots::{
        normalize, Error as WotsError, WotsPublicKey, WotsSecurityLevel, WotsSignature,
        WotsSpongePrivateKeyGeneratorBuilder,
    },
    PrivateKey, PrivateKeyGenerator, PublicKey, RecoverableSignature, Signature,
};
use tangle_ternary::{convert, TryteBuf};

const SEED: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ9ABCDEFGHIJKLMNOPQRSTUVWXYZ9ABCDEFGHIJKLMNOPQRSTUVWXYZ9";

#[test]
fn generator_missing_security_level() {
    match WotsSpongePrivateKeyGeneratorBuilder::<Kerl>::default().build() {
        Ok(_) => unreachable!(),
        Err(err) => assert_eq!(err, WotsError::MissingSecurityLevel),
    }
}

#[test]
fn generator_valid() {
    let security_levels = [
        WotsSecurityLevel::Low,
        WotsSecurityLevel::Medium,
        WotsSecurityLevel::High,
    ];
    for security in security_levels {
        assert!(
            WotsSpongePrivateKeyGeneratorBuilder::<Kerl>::default()
                .security_level(security)
                .build()
                .is_ok()
        );
    }
}

#[test]
fn address_vector() {
    // seed of all 9s, index 0, security 2
    let seed = Seed::from_str("").unwrap();
    let subseed = seed.subseed(0);

    let private_key = WotsSpongePrivateKeyGeneratorBuilder::<Kerl>::default()
        .security_level(WotsSecurityLevel::Medium)
        .build()
        .unwrap()
        .generate_from_entropy(subseed.as_trits())
        .unwrap();
    let public_key = private_key.generate_public_key().unwrap();

    assert_eq!(
        convert::trits_to_trytes(public_key.as_trits()).unwrap().to_string(),
        "GPB9PBNCJTPGFZ9CCAOPCZBFMBSMMFMARZAKBMJFMTSECEBRWMGLPTYZRAFKUFOGJQVWVUPPABLTTLCIA"
    );
}

#[test]
fn address_vectors_per_security_level() {
    let seed = Seed::from_str("").unwrap();
    let subseed = seed.subseed(0);

    let expected = [
        (
            WotsSecurityLevel::Low,
            "BSIXFJENGVJSOWPVHVALMPOPO9PUKHXDQI9VDELCBJXN9TCNQPTFEDMPQCVBOJSZUHEOABYYYAT9IAHHY",
        ),
        (
            WotsSecurityLevel::High,
            "EDIKZYSKVIWNNTMKWUSXKFMYQVIMBNECNYKBG9YVRKUMXNIXSVAKTIDCAHULLLXR9FSQSDDOFOJWKFACD",
        ),
    ];

    for (security, address) in expected {
        let private_key = WotsSpongePrivateKeyGeneratorBuilder::<Kerl>::default()
            .security_level(security)
            .build()
            .unwrap()
            .generate_from_entropy(subseed.as_trits())
            .unwrap();
        let public_key = private_key.generate_public_key().unwrap();

        assert_eq!(convert::trits_to_trytes(public_key.as_trits()).unwrap().to_string(), address);
    }
}

#[test]
fn sign_verify_round_trip() {
    // A hash whose normalized form carries no 13, so every chain keeps at least one round.
    let hash = TryteBuf::try_from_str(
        "WPEKEVLDULPGTDWHQFE9PCFQZYRZ9BFNSYFFDBBOZXKDRCJHCCOWOYHTKUMBNKDVG9HCRIAFHUJHBRCKB",
    )
    .unwrap()
    .as_trits();
    let message = normalize(&hash).unwrap();

    for security in [
        WotsSecurityLevel::Low,
        WotsSecurityLevel::Medium,
        WotsSecurityLevel::High,
    ] {
        let seed = Seed::from_str(SEED).unwrap();
        let subseed = seed.subseed(2);

        let mut private_key = WotsSpongePrivateKeyGeneratorBuilder::<Kerl>::default()
            .security_level(security)
            .build()
            .unwrap()
            .generate_from_entropy(subseed.as_trits())
            .unwrap();
        let public_key = private_key.generate_public_key().unwrap();
        let signature = private_key.sign(&message).unwrap();

        assert_eq!(signature.size(), security as usize * 6561);
        assert!(public_key.verify(&message, &signature).unwrap());

        let recovered = signature.recover_public_key(&message).unwrap();
        assert_eq!(recovered.as_trits(), public_key.as_trits());
    }
}

#[test]
fn tampered_signature_fails_verification() {
    let hash = TryteBuf::try_from_str(
        "WPEKEVLDULPGTDWHQFE9PCFQZYRZ9BFNSYFFDBBOZXKDRCJHCCOWOYHTKUMBNKDVG9HCRIAFHUJHBRCKB",
    )
    .unwrap()
    .as_trits();
    let message = normalize(&hash).unwrap();

    let seed = Seed::from_str(SEED).unwrap();
    let mut private_key = WotsSpongePrivateKeyGeneratorBuilder::<Kerl>::default()
        .security_level(WotsSecurityLevel::Low)
        .build()
        .unwrap()
        .generate_from_entropy(seed.subseed(0).as_trits())
        .unwrap();
    let public_key = private_key.generate_public_key().unwrap();
    let signature = private_key.sign(&message).unwrap();

    let mut tampered = tangle_ternary::TritBuf::from_trits(signature.as_trits());
    tampered[0] = match tampered[0] {
        tangle_ternary::Btrit::Zero => tangle_ternary::Btrit::PlusOne,
        _ => tangle_ternary::Btrit::Zero,
    };
    let tampered = WotsSignature::<Kerl>::from_trits(tampered).unwrap();

    assert!(!public_key.verify(&message, &tampered).unwrap());
}

#[test]
fn invalid_message_length() {
    let message = TryteBuf::try_from_str("CEFLDDLMF9TO9ZNYIDZCTHQDY9ABGGQZHEFTXKWKWZ")
        .unwrap()
        .as_trits();
    let entropy =
        TryteBuf::try_from_str("CEFLDDLMF9TO9ZLLTYXIPVFIJKAOFRIQLGNYIDZCTDYSWMNXPYNGFAKHQDY9ABGGQZHEFTXKWKWZXEIUD")
            .unwrap()
            .as_trits();
    let private_key_generator = WotsSpongePrivateKeyGeneratorBuilder::<Kerl>::default()
        .security_level(WotsSecurityLevel::Medium)
        .build()
        .unwrap();
    let mut private_key = private_key_generator.generate_from_entropy(&entropy).unwrap();

    match private_key.sign(&message) {
        Err(WotsError::InvalidMessageLength(len)) => assert_eq!(len, message.len()),
        _ => unreachable!(),
    }

    let signature = private_key.sign(&entropy).unwrap();

    match signature.recover_public_key(&message) {
        Err(WotsError::InvalidMessageLength(len)) => assert_eq!(len, message.len()),
        _ => unreachable!(),
    }

    let public_key = private_key.generate_public_key().unwrap();

    match public_key.verify(&message, &signature) {
        Err(WotsError::InvalidMessageLength(len)) => assert_eq!(len, message.len()),
        _ => unreachable!(),
    }
}

#[test]
fn invalid_public_key_length() {
    let entropy = TryteBuf::try_from_str("YSWMNXPYNGFAKHQDY9ABGGQZHEFTXKWKWZXEIUD")
        .unwrap()
        .as_trits();

    match WotsPublicKey::<Kerl>::from_trits(entropy.clone()) {
        Err(WotsError::InvalidPublicKeyLength(len)) => assert_eq!(len, entropy.len()),
        _ => unreachable!(),
    }
}

#[test]
fn invalid_signature_length() {
    let entropy = TryteBuf::try_from_str("YSWMNXPYNGFAKHQDY9ABGGQZHEFTXKWKWZXEIUD")
        .unwrap()
        .as_trits();

    match WotsSignature::<Kerl>::from_trits(entropy.clone()) {
        Err(WotsError::InvalidSignatureLength(len)) => assert_eq!(len, entropy.len()),
        _ => unreachable!(),
    }
}
