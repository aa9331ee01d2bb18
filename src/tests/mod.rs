// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

use rand_core::OsRng;

use crate::{JPake, Parameters, SharedKey, SignerId};

mod test_params;
mod test_zkp;

fn signer(id: &str) -> SignerId {
    SignerId::try_from(id).expect("Could not build signer id")
}

fn session(id: &str) -> JPake {
    JPake::new(Parameters::nist_80(), Some(signer(id)), &mut OsRng)
        .expect("Error with JPake::new()")
}

/// Drive two sessions through both rounds, each with its own password
fn run_protocol(alice: &mut JPake, bob: &mut JPake, alice_pw: &str, bob_pw: &str) {
    let alice_one = alice.round_one().clone();
    let bob_one = bob.round_one().clone();

    alice
        .process_round_one(&bob_one, &mut OsRng)
        .expect("Error with alice.process_round_one()");
    bob.process_round_one(&alice_one, &mut OsRng)
        .expect("Error with bob.process_round_one()");

    alice
        .set_secret(alice_pw, &mut OsRng)
        .expect("Error with alice.set_secret()");
    bob.set_secret(bob_pw, &mut OsRng)
        .expect("Error with bob.set_secret()");

    let alice_two = alice.round_two().expect("alice round two").clone();
    let bob_two = bob.round_two().expect("bob round two").clone();

    alice
        .process_round_two(&bob_two)
        .expect("Error with alice.process_round_two()");
    bob.process_round_two(&alice_two)
        .expect("Error with bob.process_round_two()");
}

fn keys(alice: &JPake, bob: &JPake) -> (SharedKey, SharedKey) {
    (
        alice.shared_key().expect("alice key").clone(),
        bob.shared_key().expect("bob key").clone(),
    )
}
