// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

//! An implementation of J-PAKE (password authenticated key exchange by
//! juggling) over prime-order subgroups of the integers modulo a prime
//!
//! ⚠️ **Warning**: This implementation has not been audited, and its big
//! integer arithmetic is not constant-time. Use at your own risk!
//!
//! # Overview
//!
//! J-PAKE is a symmetric protocol between two parties that share a low
//! entropy secret such as a password. Each party runs a [`Session`] and the
//! two exchange two rounds of messages. If both used the same secret, they
//! end up with the same [`SharedKey`]; otherwise their keys are unrelated.
//! Neither an eavesdropper nor an active attacker learns enough to mount an
//! offline dictionary attack on the password.
//!
//! Each message carries zero-knowledge proofs bound to the sender's
//! [`SignerId`]. The two parties of a run must use different ids.
//!
//! # Setup
//!
//! Both parties must agree on:
//! * a parameter set, either one of the predefined [`SecurityLevel`]s or a
//!   custom [`Parameters`] value, and
//! * a [`CipherSuite`], which fixes the hash used for proof challenges and
//!   how a password is turned into an integer. [`DefaultCipherSuite`] (SHA-1,
//!   big-endian password encoding) interoperates with other J-PAKE
//!   implementations.
//!
//! # Protocol Execution
//!
//! ## Round One
//!
//! Each party creates a session and sends its first round message:
//! ```
//! use jpake::rand_core::OsRng;
//! use jpake::{JPake, SecurityLevel, SignerId};
//!
//! let params = SecurityLevel::Nist80.parameters();
//! let mut alice = JPake::new(params.clone(), Some(SignerId::try_from("alice")?), &mut OsRng)?;
//! let mut bob = JPake::new(params, Some(SignerId::try_from("bob")?), &mut OsRng)?;
//!
//! let alice_one = alice.round_one().clone();
//! let bob_one = bob.round_one().clone();
//! // Send alice_one to bob and bob_one to alice
//! # Ok::<(), jpake::JPakeError>(())
//! ```
//!
//! ## Round Two
//!
//! Each party processes the message it received, supplies the password, and
//! sends its second round message. The password may also be supplied before
//! the first round message is processed.
//! ```
//! # use jpake::rand_core::OsRng;
//! # use jpake::{JPake, SecurityLevel, SignerId};
//! # let params = SecurityLevel::Nist80.parameters();
//! # let mut alice = JPake::new(params.clone(), Some(SignerId::try_from("alice")?), &mut OsRng)?;
//! # let mut bob = JPake::new(params, Some(SignerId::try_from("bob")?), &mut OsRng)?;
//! # let alice_one = alice.round_one().clone();
//! # let bob_one = bob.round_one().clone();
//! alice.process_round_one(&bob_one, &mut OsRng)?;
//! alice.set_secret("hunter42", &mut OsRng)?;
//! bob.set_secret("hunter42", &mut OsRng)?;
//! bob.process_round_one(&alice_one, &mut OsRng)?;
//!
//! let alice_two = alice.round_two()?.clone();
//! let bob_two = bob.round_two()?.clone();
//! // Send alice_two to bob and bob_two to alice
//! # Ok::<(), jpake::JPakeError>(())
//! ```
//!
//! ## Key Derivation
//!
//! Finally each party processes the second round message it received and
//! reads the shared key:
//! ```
//! # use jpake::rand_core::OsRng;
//! # use jpake::{JPake, SecurityLevel, SignerId};
//! # let params = SecurityLevel::Nist80.parameters();
//! # let mut alice = JPake::new(params.clone(), Some(SignerId::try_from("alice")?), &mut OsRng)?;
//! # let mut bob = JPake::new(params, Some(SignerId::try_from("bob")?), &mut OsRng)?;
//! # let alice_one = alice.round_one().clone();
//! # let bob_one = bob.round_one().clone();
//! # alice.process_round_one(&bob_one, &mut OsRng)?;
//! # alice.set_secret("hunter42", &mut OsRng)?;
//! # bob.set_secret("hunter42", &mut OsRng)?;
//! # bob.process_round_one(&alice_one, &mut OsRng)?;
//! # let alice_two = alice.round_two()?.clone();
//! # let bob_two = bob.round_two()?.clone();
//! alice.process_round_two(&bob_two)?;
//! bob.process_round_two(&alice_two)?;
//!
//! assert_eq!(alice.shared_key()?, bob.shared_key()?);
//! # Ok::<(), jpake::JPakeError>(())
//! ```
//!
//! The shared key is the raw group element `K`. No key derivation function
//! is applied: pass [`SharedKey::to_bytes_be`] through one suited to the
//! application before using it.
//!
//! # Resuming
//!
//! A session can be rebuilt from stored values with
//! [`Session::resume_after_round_one`], [`Session::resume_after_secret`] or
//! [`Session::resume_after_round_two`]. These take raw values that were
//! verified when first received, so they skip proof verification. Peer
//! messages handed to `process_round_one` and `process_round_two` are always
//! verified.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(clippy::doc_markdown, missing_docs, rustdoc::all)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod errors;
mod messages;
mod params;
mod protocol;
mod suite;
mod zkp;

#[cfg(test)]
mod tests;

pub use errors::JPakeError;
pub use messages::{Password, RoundOneMessage, RoundTwoMessage, SharedKey, SignerId, Zkp};
pub use num_bigint;
pub use num_bigint::BigUint;
pub use params::{Parameters, SecurityLevel};
pub use protocol::{JPake, PeerValues, PrivateExponents, Session, SessionState};
pub use rand_core;
pub use suite::{CipherSuite, DefaultCipherSuite};
