// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

use num_bigint::BigUint;
use rand_core::OsRng;

use super::signer;
use crate::zkp::{challenge, challenge_input, prove, verify};
use crate::{DefaultCipherSuite, JPakeError, Parameters, SignerId, Zkp};

// Proof of knowledge of x = 0x1111 over the 1024-bit group's g, made by an
// independent implementation with r = 0x5555 and signer id "bob"
const FOREIGN_GR: &str = "59e5f11e9412920f08159b06d0f238bfa8adf6ee141027e6106c5a7c538d32ac7755\
2a68dc68395bf9d772fbdf5a89fc69300b391cb3775710898c36c28579b2bb0a5344c43b0acccedaa61e42150c0979c\
6a9033dc7536b59cdafb2dddc1ca9ac6b4b5640340a5fa09f3d3732a6c706682ecf00801ab3fce5190770e0efe7c2";
const FOREIGN_B: &str = "7fe19118fc7495bba0a30fb3c53d0d0d32f63303";

fn hex_int(s: &str) -> BigUint {
    BigUint::parse_bytes(s.as_bytes(), 16).expect("Could not parse hex integer")
}

#[test]
fn test_challenge_input_layout() {
    let input = challenge_input(
        &BigUint::from(2u32),
        &BigUint::from(255u32),
        &BigUint::from(0x1234u32),
        b"alice",
    )
    .unwrap();
    assert_eq!("000102000200ff000212340005616c696365", hex::encode(&input));

    let input = challenge_input(
        &BigUint::from(0u32),
        &BigUint::from(1u32),
        &BigUint::from(0x80u32),
        b"",
    )
    .unwrap();
    assert_eq!("000100000101000200800000", hex::encode(&input));
}

#[test]
fn test_challenge_hash() {
    let h = challenge::<DefaultCipherSuite>(
        &BigUint::from(2u32),
        &BigUint::from(255u32),
        &BigUint::from(0x1234u32),
        b"alice",
    )
    .unwrap();
    assert_eq!(h, hex_int("be2974f9e0772d62263fcd67e0dcd4c833592689"));

    let h = challenge::<DefaultCipherSuite>(
        &BigUint::from(0u32),
        &BigUint::from(1u32),
        &BigUint::from(0x80u32),
        b"",
    )
    .unwrap();
    assert_eq!(h, hex_int("74f4e5a220dbfa5df722d3b163e0bc9c372a3956"));
}

#[test]
fn test_verify_foreign_proof() {
    let params = Parameters::nist_80();
    let g = params.g();
    let gx = g.modpow(&BigUint::from(0x1111u32), params.p());
    let zkp = Zkp {
        gr: hex_int(FOREIGN_GR),
        b: hex_int(FOREIGN_B),
        id: signer("bob"),
    };

    assert_eq!(
        verify::<DefaultCipherSuite>(&params, &signer("alice"), g, &gx, &zkp),
        Ok(())
    );

    let mut wrong_id = zkp.clone();
    wrong_id.id = signer("carol");
    assert_eq!(
        verify::<DefaultCipherSuite>(&params, &signer("alice"), g, &gx, &wrong_id),
        Err(JPakeError::InvalidProof)
    );
}

#[test]
fn test_prove_then_verify_over_composite_generator() {
    let params = Parameters::nist_80();
    let p = params.p();
    let generator = params.g().modpow(&BigUint::from(0xabcdefu32), p);
    let exponent = BigUint::from(0x123456789u64);
    let gx = generator.modpow(&exponent, p);

    // With and without a precomputed public value
    for supplied in [Some(&gx), None] {
        let zkp = prove::<DefaultCipherSuite, _>(
            &params,
            &signer("bob"),
            &generator,
            &exponent,
            supplied,
            &mut OsRng,
        )
        .unwrap();
        assert_eq!(zkp.id, signer("bob"));
        assert!(zkp.b < *params.q());
        assert_eq!(
            verify::<DefaultCipherSuite>(&params, &signer("alice"), &generator, &gx, &zkp),
            Ok(())
        );

        // The proof does not transfer to another generator
        assert_eq!(
            verify::<DefaultCipherSuite>(&params, &signer("alice"), params.g(), &gx, &zkp),
            Err(JPakeError::InvalidProof)
        );
    }
}

#[test]
fn test_verify_rejects_own_signer_id() {
    let params = Parameters::nist_80();
    let exponent = BigUint::from(42u32);
    let gx = params.g().modpow(&exponent, params.p());
    let zkp = prove::<DefaultCipherSuite, _>(
        &params,
        &signer("alice"),
        params.g(),
        &exponent,
        Some(&gx),
        &mut OsRng,
    )
    .unwrap();

    assert_eq!(
        verify::<DefaultCipherSuite>(&params, &signer("alice"), params.g(), &gx, &zkp),
        Err(JPakeError::DuplicateSigner(signer("alice")))
    );
}

#[test]
fn test_oversized_signer_id() {
    assert!(SignerId::new(vec![1u8; 65535]).is_ok());
    assert_eq!(
        SignerId::new(vec![1u8; 65536]),
        Err(JPakeError::FieldTooLong { len: 65536 })
    );

    // A deserialized id skips the constructor check, so proving fails instead
    let oversized: SignerId =
        serde_json::from_str(&serde_json::to_string(&vec![1u8; 65536]).unwrap()).unwrap();
    let params = Parameters::nist_80();
    assert_eq!(
        prove::<DefaultCipherSuite, _>(
            &params,
            &oversized,
            params.g(),
            &BigUint::from(7u32),
            None,
            &mut OsRng,
        ),
        Err(JPakeError::FieldTooLong { len: 65536 })
    );
}

#[test]
fn test_duplicate_signer_message_names_id() {
    let message = JPakeError::DuplicateSigner(signer("alice")).to_string();
    assert!(message.contains("\"alice\""), "{message}");
    let message = JPakeError::DuplicateSigner(SignerId::new(vec![0xff, 0x00]).unwrap()).to_string();
    assert!(message.contains("0xff00"), "{message}");
}
