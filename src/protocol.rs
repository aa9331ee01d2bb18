// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

//! The protocol implementation

use core::fmt;
use core::marker::PhantomData;
use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand_core::{CryptoRng, RngCore};

use crate::errors::JPakeError;
use crate::messages::{Password, RoundOneMessage, RoundTwoMessage, SharedKey, SignerId};
use crate::params::Parameters;
use crate::suite::{CipherSuite, DefaultCipherSuite};
use crate::zkp;

type Result<T> = core::result::Result<T, JPakeError>;

/// A [`Session`] using the [`DefaultCipherSuite`]
pub type JPake = Session<DefaultCipherSuite>;

/// The two private exponents of one party, `x1` in `[0, q)` and `x2` in
/// `[1, q)`.
///
/// These must never leave the party that generated them. Supplying them
/// explicitly is only meant for tests and for resuming a session from
/// storage.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateExponents {
    x1: BigUint,
    x2: BigUint,
}

impl PrivateExponents {
    /// Wrap explicit exponents. Their range is checked against the subgroup
    /// order when a session is built from them.
    pub fn new(x1: BigUint, x2: BigUint) -> Self {
        Self { x1, x2 }
    }

    /// Draw fresh exponents for the given parameters
    pub fn random<R: RngCore + CryptoRng>(params: &Parameters, rng: &mut R) -> Self {
        Self {
            x1: zkp::random_below(params.q(), rng),
            x2: zkp::random_nonzero_below(params.q(), rng),
        }
    }

    /// The first exponent
    pub fn x1(&self) -> &BigUint {
        &self.x1
    }

    /// The second exponent
    pub fn x2(&self) -> &BigUint {
        &self.x2
    }

    fn check_range(&self, params: &Parameters) -> Result<()> {
        let q = params.q();
        match self.x1 < *q && !self.x2.is_zero() && self.x2 < *q {
            true => Ok(()),
            false => Err(JPakeError::InvalidExponent),
        }
    }
}

impl fmt::Debug for PrivateExponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateExponents(..)")
    }
}

/// The peer's round one public values `gx3 = g^x3` and `gx4 = g^x4`, as
/// used when resuming a session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeerValues {
    /// The peer's `g^x1`, which is `gx3` from the local point of view
    pub gx3: BigUint,
    /// The peer's `g^x2`, which is `gx4` from the local point of view
    pub gx4: BigUint,
}

impl PeerValues {
    // Reduce into [0, p) and refuse the elements that would let the peer
    // force the shared key to a known value.
    fn reduce(gx3: &BigUint, gx4: &BigUint, params: &Parameters) -> Result<Self> {
        let gx3 = reduce_element(gx3, params)?;
        let gx4 = reduce_element(gx4, params)?;
        if gx4.is_one() {
            return Err(JPakeError::DegenerateElement);
        }
        Ok(Self { gx3, gx4 })
    }
}

fn reduce_element(value: &BigUint, params: &Parameters) -> Result<BigUint> {
    let reduced = value % params.p();
    match reduced.is_zero() {
        true => Err(JPakeError::DegenerateElement),
        false => Ok(reduced),
    }
}

/// Which inputs a [`Session`] is still waiting for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionState {
    /// The peer's round one message has not been processed
    pub waiting_round_one: bool,
    /// The shared secret has not been supplied
    pub waiting_secret: bool,
    /// The peer's round two message has not been processed
    pub waiting_round_two: bool,
}

/// One party's view of one J-PAKE run.
///
/// Both parties drive an identical state machine:
/// 1. send [`Session::round_one`] to the peer,
/// 2. feed the peer's round one message to [`Session::process_round_one`],
/// 3. supply the password with [`Session::set_secret`] (at any point before
///    round two is needed),
/// 4. send [`Session::round_two`] to the peer,
/// 5. feed the peer's round two message to [`Session::process_round_two`],
/// 6. read [`Session::shared_key`].
///
/// Outputs are computed as soon as their inputs are known and never change
/// afterwards. Calling an operation out of order fails with
/// [`JPakeError::OutOfSequence`], and any failed call leaves the session
/// untouched.
pub struct Session<CS: CipherSuite = DefaultCipherSuite> {
    params: Arc<Parameters>,
    signer_id: SignerId,
    exponents: PrivateExponents,
    round_one: RoundOneMessage,
    secret: Option<BigUint>,
    peer: Option<PeerValues>,
    round_two: Option<RoundTwoMessage>,
    peer_b: Option<BigUint>,
    key: Option<SharedKey>,
    _suite: PhantomData<CS>,
}

impl<CS: CipherSuite> Session<CS> {
    /// Start a fresh session with random private exponents. A random signer
    /// id is drawn when none is given.
    pub fn new<R: RngCore + CryptoRng>(
        params: Arc<Parameters>,
        signer_id: Option<SignerId>,
        rng: &mut R,
    ) -> Result<Self> {
        let exponents = PrivateExponents::random(&params, rng);
        Self::from_exponents(params, signer_id, exponents, rng)
    }

    /// Start a session with explicit private exponents.
    ///
    /// Intended for deterministic tests; never pair this with exponents that
    /// did not come from a cryptographically secure source.
    pub fn from_exponents<R: RngCore + CryptoRng>(
        params: Arc<Parameters>,
        signer_id: Option<SignerId>,
        exponents: PrivateExponents,
        rng: &mut R,
    ) -> Result<Self> {
        exponents.check_range(&params)?;
        let signer_id = signer_id.unwrap_or_else(|| SignerId::random(rng));

        let g = params.g();
        let p = params.p();
        let gx1 = g.modpow(&exponents.x1, p);
        let gx2 = g.modpow(&exponents.x2, p);
        let zkp_x1 = zkp::prove::<CS, R>(&params, &signer_id, g, &exponents.x1, Some(&gx1), rng)?;
        let zkp_x2 = zkp::prove::<CS, R>(&params, &signer_id, g, &exponents.x2, Some(&gx2), rng)?;

        Ok(Self {
            round_one: RoundOneMessage {
                gx1,
                zkp_x1,
                gx2,
                zkp_x2,
            },
            params,
            signer_id,
            exponents,
            secret: None,
            peer: None,
            round_two: None,
            peer_b: None,
            key: None,
            _suite: PhantomData,
        })
    }

    /// Resume a session whose peer round one values were already received
    /// and verified. The values are not checked against any proof here.
    pub fn resume_after_round_one<R: RngCore + CryptoRng>(
        params: Arc<Parameters>,
        signer_id: SignerId,
        exponents: PrivateExponents,
        peer: PeerValues,
        rng: &mut R,
    ) -> Result<Self> {
        let peer = PeerValues::reduce(&peer.gx3, &peer.gx4, &params)?;
        let mut session = Self::from_exponents(params, Some(signer_id), exponents, rng)?;
        session.peer = Some(peer);
        Ok(session)
    }

    /// Resume a session that already holds the shared secret but has not
    /// processed the peer's round one message
    pub fn resume_after_secret<'a, R: RngCore + CryptoRng>(
        params: Arc<Parameters>,
        signer_id: SignerId,
        exponents: PrivateExponents,
        password: impl Into<Password<'a>>,
        rng: &mut R,
    ) -> Result<Self> {
        let mut session = Self::from_exponents(params, Some(signer_id), exponents, rng)?;
        session.set_secret(password, rng)?;
        Ok(session)
    }

    /// Resume a session that has seen the peer's round two value `b`, which
    /// completes it. Neither `peer` nor `b` are checked against any proof
    /// here.
    pub fn resume_after_round_two<'a, R: RngCore + CryptoRng>(
        params: Arc<Parameters>,
        signer_id: SignerId,
        exponents: PrivateExponents,
        password: impl Into<Password<'a>>,
        peer: PeerValues,
        b: BigUint,
        rng: &mut R,
    ) -> Result<Self> {
        let mut session = Self::resume_after_round_one(params, signer_id, exponents, peer, rng)?;
        session.set_secret(password, rng)?;
        let b = reduce_element(&b, &session.params)?;
        session.complete(b)?;
        Ok(session)
    }

    /// The message to send to the peer in the first round
    pub fn round_one(&self) -> &RoundOneMessage {
        &self.round_one
    }

    /// Process the peer's first round message, verifying both of its proofs
    pub fn process_round_one<R: RngCore + CryptoRng>(
        &mut self,
        message: &RoundOneMessage,
        rng: &mut R,
    ) -> Result<()> {
        if self.peer.is_some() {
            return Err(JPakeError::OutOfSequence("round one already processed"));
        }

        let peer = PeerValues::reduce(&message.gx1, &message.gx2, &self.params)?;
        let g = self.params.g();
        zkp::verify::<CS>(&self.params, &self.signer_id, g, &peer.gx3, &message.zkp_x1)?;
        zkp::verify::<CS>(&self.params, &self.signer_id, g, &peer.gx4, &message.zkp_x2)?;

        let round_two = match &self.secret {
            Some(secret) => Some(self.compute_round_two(&peer, secret, rng)?),
            None => None,
        };

        self.peer = Some(peer);
        self.round_two = round_two;
        Ok(())
    }

    /// Supply the shared password
    pub fn set_secret<'a, R: RngCore + CryptoRng>(
        &mut self,
        password: impl Into<Password<'a>>,
        rng: &mut R,
    ) -> Result<()> {
        if self.secret.is_some() {
            return Err(JPakeError::OutOfSequence("secret already set"));
        }

        let secret = self.normalize(password.into())?;
        let round_two = match &self.peer {
            Some(peer) => Some(self.compute_round_two(peer, &secret, rng)?),
            None => None,
        };

        self.secret = Some(secret);
        self.round_two = round_two;
        Ok(())
    }

    /// The message to send to the peer in the second round. Available once
    /// the peer's round one message has been processed and the secret set.
    pub fn round_two(&self) -> Result<&RoundTwoMessage> {
        if self.peer.is_none() {
            return Err(JPakeError::OutOfSequence("round one not yet processed"));
        }
        self.round_two
            .as_ref()
            .ok_or(JPakeError::OutOfSequence("secret not yet set"))
    }

    /// Process the peer's second round message, verifying its proof, and
    /// derive the shared key
    pub fn process_round_two(&mut self, message: &RoundTwoMessage) -> Result<()> {
        let (peer, _) = self.round_two_inputs()?;

        // The peer proves knowledge of x4 * s over g^(x1 + x2 + x3)
        let p = self.params.p();
        let generator = (&self.round_one.gx1 * &self.round_one.gx2 % p) * &peer.gx3 % p;
        let b = reduce_element(&message.a, &self.params)?;
        zkp::verify::<CS>(&self.params, &self.signer_id, &generator, &b, &message.zkp_a)?;

        self.complete(b)
    }

    /// The raw shared value `K`. Pass it through a key derivation function
    /// before using it as a key.
    pub fn shared_key(&self) -> Result<&SharedKey> {
        self.key
            .as_ref()
            .ok_or(JPakeError::OutOfSequence("round two not yet processed"))
    }

    /// Which inputs this session is still waiting for
    pub fn state(&self) -> SessionState {
        SessionState {
            waiting_round_one: self.peer.is_none(),
            waiting_secret: self.secret.is_none(),
            waiting_round_two: self.key.is_none(),
        }
    }

    /// Whether the shared key has been derived
    pub fn is_complete(&self) -> bool {
        self.key.is_some()
    }

    /// This party's signer id
    pub fn signer_id(&self) -> &SignerId {
        &self.signer_id
    }

    /// The parameters this session runs over
    pub fn parameters(&self) -> &Arc<Parameters> {
        &self.params
    }

    /// The private exponents, for persisting a session so it can later be
    /// resumed. Handle with the same care as the password.
    pub fn exponents(&self) -> &PrivateExponents {
        &self.exponents
    }

    /// The peer's round one values, once processed
    pub fn peer_values(&self) -> Option<&PeerValues> {
        self.peer.as_ref()
    }

    /// The peer's round two value `B`, once processed
    pub fn peer_round_two_value(&self) -> Option<&BigUint> {
        self.peer_b.as_ref()
    }

    fn normalize(&self, password: Password<'_>) -> Result<BigUint> {
        let secret = match password {
            Password::Bytes(bytes) if bytes.is_empty() => return Err(JPakeError::InvalidSecret),
            Password::Bytes(bytes) => CS::normalize_secret(bytes),
            Password::Integer(secret) => secret.clone(),
        };

        // Only the residue matters in the exponent, and zero would make A = 1
        let secret = secret % self.params.q();
        match secret.is_zero() {
            true => Err(JPakeError::InvalidSecret),
            false => Ok(secret),
        }
    }

    fn round_two_inputs(&self) -> Result<(&PeerValues, &BigUint)> {
        if self.key.is_some() {
            return Err(JPakeError::OutOfSequence("round two already processed"));
        }
        let peer = self
            .peer
            .as_ref()
            .ok_or(JPakeError::OutOfSequence("round one not yet processed"))?;
        let secret = self
            .secret
            .as_ref()
            .ok_or(JPakeError::OutOfSequence("secret not yet set"))?;
        Ok((peer, secret))
    }

    // A = (gx1 * gx3 * gx4)^(x2 * s), with a proof of knowledge of x2 * s
    fn compute_round_two<R: RngCore + CryptoRng>(
        &self,
        peer: &PeerValues,
        secret: &BigUint,
        rng: &mut R,
    ) -> Result<RoundTwoMessage> {
        let p = self.params.p();
        let q = self.params.q();

        let t1 = (&self.round_one.gx1 * &peer.gx3 % p) * &peer.gx4 % p;
        let t2 = &self.exponents.x2 * secret % q;
        let a = t1.modpow(&t2, p);
        let zkp_a = zkp::prove::<CS, R>(&self.params, &self.signer_id, &t1, &t2, Some(&a), rng)?;

        Ok(RoundTwoMessage { a, zkp_a })
    }

    // K = (B / gx4^(x2 * s))^x2, dividing by raising gx4 to x2 * (q - s)
    fn complete(&mut self, b: BigUint) -> Result<()> {
        let (peer, secret) = self.round_two_inputs()?;
        let p = self.params.p();
        let q = self.params.q();

        let exponent = &self.exponents.x2 * (q - secret) % q;
        let bottom = peer.gx4.modpow(&exponent, p);
        let inner = &b * bottom % p;
        let key = SharedKey(inner.modpow(&self.exponents.x2, p));

        self.peer_b = Some(b);
        self.key = Some(key);
        Ok(())
    }
}

impl<CS: CipherSuite> fmt::Debug for Session<CS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("signer_id", &self.signer_id)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
