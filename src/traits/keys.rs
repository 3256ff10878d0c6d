//! Traits related to the key components

use core::fmt;

use num_bigint::BigUint;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Components shared by every RSA key: the modulus.
pub trait KeyParts {
    /// Returns the modulus of the key.
    fn n(&self) -> &BigUint;

    /// Returns the modulus size in bytes. Raw signatures and ciphertexts for
    /// or by this key will have the same size.
    fn size(&self) -> usize {
        (self.n().bits() + 7) / 8
    }
}

/// Components of an RSA public key.
pub trait PublicKeyParts: KeyParts {
    /// Returns the public exponent of the key.
    fn e(&self) -> &BigUint;
}

/// Components of an RSA private key.
pub trait PrivateKeyParts: KeyParts {
    /// Returns the private exponent of the key.
    fn d(&self) -> &BigUint;

    /// Returns the Chinese remainder theorem values, if the key carries them.
    fn crt_values(&self) -> Option<&CrtValues>;
}

/// The prime factors of the modulus together with the values precomputed
/// from them for fast decryption.
///
/// Either all of these are known or none of them are.
#[derive(Clone)]
pub struct CrtValues {
    /// Public exponent
    pub(crate) e: BigUint,
    /// First prime factor
    pub(crate) p: BigUint,
    /// Second prime factor
    pub(crate) q: BigUint,
    /// D mod (P-1)
    pub(crate) dp: BigUint,
    /// D mod (Q-1)
    pub(crate) dq: BigUint,
    /// Q^-1 mod P
    pub(crate) qinv: BigUint,
}

impl CrtValues {
    /// Returns the public exponent.
    pub fn e(&self) -> &BigUint {
        &self.e
    }

    /// Returns the first prime factor `p`.
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// Returns the second prime factor `q`.
    pub fn q(&self) -> &BigUint {
        &self.q
    }

    /// Returns `d mod (p - 1)`.
    pub fn dp(&self) -> &BigUint {
        &self.dp
    }

    /// Returns `d mod (q - 1)`.
    pub fn dq(&self) -> &BigUint {
        &self.dq
    }

    /// Returns `q^-1 mod p`.
    pub fn qinv(&self) -> &BigUint {
        &self.qinv
    }
}

impl fmt::Debug for CrtValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrtValues")
            .field("e", &self.e)
            .finish_non_exhaustive()
    }
}

impl Zeroize for CrtValues {
    fn zeroize(&mut self) {
        self.e.zeroize();
        self.p.zeroize();
        self.q.zeroize();
        self.dp.zeroize();
        self.dq.zeroize();
        self.qinv.zeroize();
    }
}

impl Drop for CrtValues {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for CrtValues {}
