// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

use jpake::rand_core::OsRng;
use jpake::JPake;
use jpake::PeerValues;
use jpake::RoundOneMessage;
use jpake::RoundTwoMessage;
use jpake::SecurityLevel;
use jpake::SignerId;

fn main() {
    let params = SecurityLevel::default().parameters();
    let alice_id = SignerId::try_from("alice").expect("Error with SignerId");
    let bob_id = SignerId::try_from("bob").expect("Error with SignerId");

    let mut alice_rng = OsRng;
    let mut bob_rng = OsRng;

    let mut alice = JPake::new(params.clone(), Some(alice_id.clone()), &mut alice_rng)
        .expect("Error with JPake::new()");
    let mut bob =
        JPake::new(params.clone(), Some(bob_id), &mut bob_rng).expect("Error with JPake::new()");

    let alice_one_serialized =
        serde_json::to_string(alice.round_one()).expect("Error serializing round one");
    println!(
        "alice round one ({} bytes of json), gx1: {}",
        alice_one_serialized.len(),
        hex::encode(alice.round_one().gx1.to_bytes_be())
    );
    let bob_one_serialized =
        serde_json::to_string(bob.round_one()).expect("Error serializing round one");
    println!(
        "bob round one ({} bytes of json), gx1: {}",
        bob_one_serialized.len(),
        hex::encode(bob.round_one().gx1.to_bytes_be())
    );

    let bob_one: RoundOneMessage =
        serde_json::from_str(&bob_one_serialized).expect("Error deserializing round one");
    alice
        .process_round_one(&bob_one, &mut alice_rng)
        .expect("Error with alice.process_round_one()");
    let alice_one: RoundOneMessage =
        serde_json::from_str(&alice_one_serialized).expect("Error deserializing round one");
    bob.process_round_one(&alice_one, &mut bob_rng)
        .expect("Error with bob.process_round_one()");

    alice
        .set_secret("hunter42", &mut alice_rng)
        .expect("Error with alice.set_secret()");
    bob.set_secret("hunter42", &mut bob_rng)
        .expect("Error with bob.set_secret()");

    let alice_two_serialized = serde_json::to_string(alice.round_two().expect("alice round two"))
        .expect("Error serializing round two");
    let bob_two_serialized = serde_json::to_string(bob.round_two().expect("bob round two"))
        .expect("Error serializing round two");
    println!(
        "round two messages: alice {} bytes, bob {} bytes of json",
        alice_two_serialized.len(),
        bob_two_serialized.len()
    );

    let bob_two: RoundTwoMessage =
        serde_json::from_str(&bob_two_serialized).expect("Error deserializing round two");
    alice
        .process_round_two(&bob_two)
        .expect("Error with alice.process_round_two()");
    let alice_two: RoundTwoMessage =
        serde_json::from_str(&alice_two_serialized).expect("Error deserializing round two");
    bob.process_round_two(&alice_two)
        .expect("Error with bob.process_round_two()");

    let alice_key = alice.shared_key().expect("alice key");
    let bob_key = bob.shared_key().expect("bob key");
    println!(
        "alice key ({} bytes): {}",
        alice_key.to_bytes_be().len(),
        hex::encode(alice_key.to_bytes_be())
    );
    assert_eq!(alice_key, bob_key);

    // Rebuild alice from her stored state and check she reaches the same key
    let resumed = JPake::resume_after_round_two(
        params,
        alice_id,
        alice.exponents().clone(),
        "hunter42",
        PeerValues::clone(alice.peer_values().expect("peer values")),
        alice
            .peer_round_two_value()
            .expect("peer round two value")
            .clone(),
        &mut alice_rng,
    )
    .expect("Error with JPake::resume_after_round_two()");
    assert_eq!(resumed.shared_key().expect("resumed key"), alice_key);
    println!("resumed session derived the same key");
}
