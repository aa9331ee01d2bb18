// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

//! Prime-order subgroup parameters for J-PAKE

use std::sync::{Arc, OnceLock};

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::errors::JPakeError;

type Result<T> = core::result::Result<T, JPakeError>;

/// 1024-bit modulus with a 160-bit subgroup (the Sun JCE DSA group)
const NIST_80_P: &str = "fd7f53811d75122952df4a9c2eece4e7f611b7523cef4400c31e3f80b6512669455d\
402251fb593d8d58fabfc5f5ba30f6cb9b556cd7813b801d346ff26660b76b9950a5a49f9fe8047b1022c24fbba9d7\
feb7c61bf83b57e7c6a8a6150f04fb83f6d3c51ec3023554135a169132f675f3ae2b61d72aeff22203199dd14801c7";
const NIST_80_Q: &str = "9760508f15230bccb292b982a2eb840bf0581cf5";
const NIST_80_G: &str = "f7e1a085d69b3ddecbbcab5c36b857b97994afbbfa3aea82f9574c0b3d0782675159\
578ebad4594fe67107108180b449167123e84c281613b7cf09328cc8a6e13c167a8b547c8d28e0a3ae1e2bb3a67591\
6ea37f0bfa213562f1fb627a01243bcca4f1bea8519089a883dfe15ae59f06928b665e807b552564014c3bfecf492a";

/// 2048-bit modulus with a 224-bit subgroup (NIST FIPS 186-3 example group)
const NIST_112_P: &str = "c196ba05ac29e1f9c3c72d56dffc6154a033f1477ac88ec37f09be6c5bb95f51c296\
dd20d1a28a067ccc4d4316a4bd1dca55ed1066d438c35aebaabf57e7dae428782a95eca1c143db701fd48533a3c18f\
0fe23557ea7ae619ecacc7e0b51652a8776d02a425567ded36eabd90ca33a1e8d988f0bbb92d02d1d20290113bb562\
ce1fc856eeb7cdd92d33eea6f410859b179e7e789a8f75f645fae2e136d252bffaff89528945c1abe705a38dbc2d36\
4aade99be0d0aad82e5320121496dc65b3930e38047294ff877831a16d5228418de8ab275d7d75651cefed65f78afc\
3ea7fe4d79b35f62a0402a1117599adac7b269a59f353cf450e6982d3b1702d9ca83";
const NIST_112_Q: &str = "90eaf4d1af0708b1b612ff35e0a2997eb9e9d263c9ce659528945c0d";
const NIST_112_G: &str = "a59a749a11242c58c894e9e5a91804e8fa0ac64b56288f8d47d51b1edc4d65444fec\
a0111d78f35fc9fdd4cb1f1b79a3ba9cbee83a3f811012503c8117f98e5048b089e387af6949bf8784ebd9ef45876f\
2e6a5a495be64b6e770409494b7fee1dbb1e4b2bc2a53d4f893d418b7159592e4fffdf6969e91d770daebd0b5cb14\
c00ad68ec7dc1e5745ea55c706c4a1c5c88964e34d09deb753ad418c1ad0f4fdfd049a955e5d78491c0b7a2f1575a0\
08ccd727ab376db6e695515b05bd412f5b8c2f4c77ee10da48abd53f5dd498927ee7b692bbbcda2fb23a516c5b4533\
d73980b2a3b60e384ed200ae21b40d273651ad6060c13d97fd69aa13c5611a51b9085";

/// 3072-bit modulus with a 256-bit subgroup (NIST FIPS 186-3 example group)
const NIST_128_P: &str = "90066455b5cfc38f9caa4a48b4281f292c260feef01fd61037e56258a7795a1c7ad4\
6076982ce6bb956936c6ab4dcfe05e6784586940ca544b9b2140e1eb523f009d20a7e7880e4e5bfa690f1b9004a278\
11cd9904af70420eefd6ea11ef7da129f58835ff56b89faa637bc9ac2efaab903402229f491d8d3485261cd068699b\
6ba58a1ddbbef6db51e8fe34e8a78e542d7ba351c21ea8d8f1d29f5d5d15939487e27f4416b0ca632c59efd1b1eb66\
511a5a0fbf615b766c5862d0bd8a3fe7a0e0da0fb2fe1fcb19e8f9996a8ea0fccde538175238fc8b0ee6f29af7f642\
773ebe8cd5402415a01451a840476b2fceb0e388d30d4b376c37fe401c2a2c2f941dad179c540c1c8ce030d460c4d9\
83be9ab0b20f69144c1ae13f9383ea1c08504fb0bf321503efe43488310dd8dc77ec5b8349b8bfe97c2c560ea878de\
87c11e3d597f1fea742d73eec7f37be43949ef1a0d15c3f3e3fc0a8335617055ac91328ec22b50fc15b941d3d1624c\
d88bc25f3e941fddc6200689581bfec416b4b2cb73";
const NIST_128_Q: &str = "cfa0478a54717b08ce64805b76e5b14249a77a4838469df7f7dc987efccfb11d";
const NIST_128_G: &str = "5e5cba992e0a680d885eb903aea78e4a45a469103d448ede3b7accc54d521e37f84a\
4bdd5b06b0970cc2d2bbb715f7b82846f9a0c393914c792e6a923e2117ab805276a975aadb5261d91673ea9aaffeec\
bfa6183dfcb5d3b7332aa19275afa1f8ec0b60fb6f66cc23ae4870791d5982aad1aa9485fd8f4a60126feb2cf05db8\
a7f0f09b3397f3937f2e90b9e5b9c9b6efef642bc48351c46fb171b9bfa9ef17a961ce96c7e7a7cc3d3d03dfad1078\
ba21da425198f07d2481622bce45969d9c4d6063d72ab7a0f08b2f49a7cc6af335e08c4720e31476b67299e231f8bd\
90b39ac3ae3be0c6b6cacef8289a2e2873d58e51e029cafbd55e6841489ab66b5b4b9ba6e2f784660896aff387d928\
44ccb8b69475496de19da2e58259b090489ac8e62363cdf82cfd8ef2a427abcd65750b506f56dde3b988567a88126b\
914d7828e2b63a6d7ed0747ec59e0e0a23ce7d8a74c1d2c2a7afb6a29799620f00e11c33787f7ded3b30e1a22d09f1\
fbda1abbbfbf25cae05a13f812e34563f99410e73b";

/// The public group a J-PAKE run operates in: a prime modulus `p`, a
/// generator `g` of the subgroup of prime order `q`, and `q` itself.
///
/// Parameters are immutable and are shared between sessions through an
/// [`Arc`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameters {
    p: BigUint,
    g: BigUint,
    q: BigUint,
}

impl Parameters {
    /// Create a custom parameter set.
    ///
    /// Only structural checks are made: `g` must lie in `(1, p)`, `q` must
    /// divide `p - 1`, and `g^q` must be `1 mod p`. Primality of `p` and `q`
    /// is the caller's responsibility.
    pub fn new(p: BigUint, g: BigUint, q: BigUint) -> Result<Self> {
        let one = BigUint::one();
        if p <= BigUint::from(3u8) {
            return Err(JPakeError::InvalidParameters("modulus too small"));
        }
        if g <= one || g >= p {
            return Err(JPakeError::InvalidParameters("generator out of range"));
        }
        if q <= one || q >= p {
            return Err(JPakeError::InvalidParameters("subgroup order out of range"));
        }
        if !((&p - &one) % &q).is_zero() {
            return Err(JPakeError::InvalidParameters(
                "subgroup order does not divide p - 1",
            ));
        }
        if !g.modpow(&q, &p).is_one() {
            return Err(JPakeError::InvalidParameters(
                "generator does not have order q",
            ));
        }

        Ok(Self { p, g, q })
    }

    /// The 1024-bit group, roughly 80 bits of security
    pub fn nist_80() -> Arc<Self> {
        static PARAMS: OnceLock<Arc<Parameters>> = OnceLock::new();
        PARAMS
            .get_or_init(|| Arc::new(Self::from_hex(NIST_80_P, NIST_80_G, NIST_80_Q)))
            .clone()
    }

    /// The 2048-bit group, roughly 112 bits of security
    pub fn nist_112() -> Arc<Self> {
        static PARAMS: OnceLock<Arc<Parameters>> = OnceLock::new();
        PARAMS
            .get_or_init(|| Arc::new(Self::from_hex(NIST_112_P, NIST_112_G, NIST_112_Q)))
            .clone()
    }

    /// The 3072-bit group, roughly 128 bits of security
    pub fn nist_128() -> Arc<Self> {
        static PARAMS: OnceLock<Arc<Parameters>> = OnceLock::new();
        PARAMS
            .get_or_init(|| Arc::new(Self::from_hex(NIST_128_P, NIST_128_G, NIST_128_Q)))
            .clone()
    }

    // Only used for the built-in constants above, which are known to parse.
    fn from_hex(p: &str, g: &str, q: &str) -> Self {
        let parse = |s: &str| {
            BigUint::parse_bytes(s.as_bytes(), 16).expect("built-in parameter is valid hex")
        };
        Self {
            p: parse(p),
            g: parse(g),
            q: parse(q),
        }
    }

    /// The prime modulus
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// The subgroup generator
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// The subgroup order
    pub fn q(&self) -> &BigUint {
        &self.q
    }
}

/// The predefined parameter tiers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SecurityLevel {
    /// See [`Parameters::nist_80`]
    Nist80,
    /// See [`Parameters::nist_112`]
    Nist112,
    /// See [`Parameters::nist_128`]
    #[default]
    Nist128,
}

impl SecurityLevel {
    /// The shared parameter set for this tier
    pub fn parameters(self) -> Arc<Parameters> {
        match self {
            Self::Nist80 => Parameters::nist_80(),
            Self::Nist112 => Parameters::nist_112(),
            Self::Nist128 => Parameters::nist_128(),
        }
    }
}

impl From<SecurityLevel> for Arc<Parameters> {
    fn from(level: SecurityLevel) -> Self {
        level.parameters()
    }
}
