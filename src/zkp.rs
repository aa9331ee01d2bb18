// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

//! Schnorr proofs of knowledge made non-interactive with Fiat-Shamir

use digest::Digest;
use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;

use crate::errors::JPakeError;
use crate::messages::{SignerId, Zkp, MAX_FIELD_LEN};
use crate::params::Parameters;
use crate::suite::CipherSuite;

type Result<T> = core::result::Result<T, JPakeError>;

/// Big-endian encoding with room for a sign bit, so a value whose top bit is
/// set gains a leading zero byte. Zero encodes as a single zero byte. This is
/// the layout of Java's `BigInteger.toByteArray` for non-negative values.
pub(crate) fn encode_integer(n: &BigUint) -> Vec<u8> {
    let bytes = n.to_bytes_be();
    match bytes.first() {
        Some(first) if first & 0x80 != 0 => [&[0u8][..], &bytes].concat(),
        _ => bytes,
    }
}

/// Prepend a two byte big-endian length to `data`
pub(crate) fn prepend_len(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() > MAX_FIELD_LEN {
        return Err(JPakeError::FieldTooLong { len: data.len() });
    }
    let mut encoded = Vec::with_capacity(2 + data.len());
    encoded.extend_from_slice(&(data.len() as u16).to_be_bytes());
    encoded.extend_from_slice(data);
    Ok(encoded)
}

/// The exact bytes hashed to form a proof challenge:
/// `len || generator || len || gr || len || gx || len || signer_id`
pub(crate) fn challenge_input(
    generator: &BigUint,
    gr: &BigUint,
    gx: &BigUint,
    signer_id: &[u8],
) -> Result<Vec<u8>> {
    Ok([
        prepend_len(&encode_integer(generator))?,
        prepend_len(&encode_integer(gr))?,
        prepend_len(&encode_integer(gx))?,
        prepend_len(signer_id)?,
    ]
    .concat())
}

pub(crate) fn challenge<CS: CipherSuite>(
    generator: &BigUint,
    gr: &BigUint,
    gx: &BigUint,
    signer_id: &[u8],
) -> Result<BigUint> {
    let input = challenge_input(generator, gr, gx, signer_id)?;
    let digest = CS::Hash::digest(&input);
    Ok(BigUint::from_bytes_be(&digest))
}

/// Uniformly sample from `[0, bound)` by rejection. `bound` must be non-zero.
pub(crate) fn random_below<R: RngCore + CryptoRng>(bound: &BigUint, rng: &mut R) -> BigUint {
    let bits = bound.bits();
    let len = ((bits + 7) / 8) as usize;
    let excess = (len as u64 * 8 - bits) as u32;
    let mut buf = vec![0u8; len];
    loop {
        rng.fill_bytes(&mut buf);
        buf[0] &= 0xffu8 >> excess;
        let candidate = BigUint::from_bytes_be(&buf);
        if &candidate < bound {
            return candidate;
        }
    }
}

/// Uniformly sample from `[1, bound)`. `bound` must be greater than one.
pub(crate) fn random_nonzero_below<R: RngCore + CryptoRng>(
    bound: &BigUint,
    rng: &mut R,
) -> BigUint {
    loop {
        let candidate = random_below(bound, rng);
        if !candidate.is_zero() {
            return candidate;
        }
    }
}

/// Prove knowledge of `exponent` such that `generator^exponent = gx mod p`.
/// `gx` is computed when not supplied.
pub(crate) fn prove<CS: CipherSuite, R: RngCore + CryptoRng>(
    params: &Parameters,
    signer_id: &SignerId,
    generator: &BigUint,
    exponent: &BigUint,
    gx: Option<&BigUint>,
    rng: &mut R,
) -> Result<Zkp> {
    let p = params.p();
    let q = params.q();

    let computed;
    let gx = match gx {
        Some(gx) => gx,
        None => {
            computed = generator.modpow(exponent, p);
            &computed
        }
    };

    let r = random_below(q, rng);
    let gr = generator.modpow(&r, p);
    let h = challenge::<CS>(generator, &gr, gx, signer_id.as_bytes())?;

    // b = r - exponent * h mod q, kept non-negative
    let eh = (exponent * &h) % q;
    let b = (r + q - eh) % q;

    Ok(Zkp {
        gr,
        b,
        id: signer_id.clone(),
    })
}

/// Check a peer's proof that they know `x` such that `generator^x = gx mod p`.
/// `signer_id` is the verifier's own id, which the proof must not carry.
pub(crate) fn verify<CS: CipherSuite>(
    params: &Parameters,
    signer_id: &SignerId,
    generator: &BigUint,
    gx: &BigUint,
    zkp: &Zkp,
) -> Result<()> {
    if zkp.id == *signer_id {
        return Err(JPakeError::DuplicateSigner(zkp.id.clone()));
    }

    let p = params.p();
    let h = challenge::<CS>(generator, &zkp.gr, gx, zkp.id.as_bytes())?;
    let expected = (generator.modpow(&zkp.b, p) * gx.modpow(&h, p)) % p;

    match bool::from(encode_integer(&expected).ct_eq(&encode_integer(&zkp.gr))) {
        true => Ok(()),
        false => Err(JPakeError::InvalidProof),
    }
}
