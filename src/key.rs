use alloc::vec::Vec;
use core::fmt;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::algorithms::generate::generate_key_components;
use crate::algorithms::rsa::mod_inverse;
use crate::errors::{Error, Result};
use crate::hash::HashAlgorithm;
use crate::pkcs1v15;
use crate::traits::{CrtValues, KeyParts, PrivateKeyParts, PublicKeyParts};

/// Default modulus size in bits for generated keys.
pub const DEFAULT_KEY_LENGTH: usize = 2048;

/// Default public exponent for generated keys.
pub const DEFAULT_PUBLIC_EXPONENT: u64 = 65537;

/// Default number of Miller-Rabin rounds used when testing prime candidates.
pub const DEFAULT_PRIMALITY_ROUNDS: usize = 64;

/// Represents the public part of an RSA key.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct RsaPublicKey {
    /// Modulus: product of prime numbers `p` and `q`
    n: BigUint,
    /// Public exponent: power to which a plaintext message is raised in
    /// order to encrypt it.
    e: BigUint,
}

/// Represents a whole RSA key, public and private parts.
///
/// A key built from its prime factors carries the Chinese remainder theorem
/// values used for fast decryption. A "plain" key knows only the modulus and
/// the private exponent.
#[derive(Clone)]
pub struct RsaPrivateKey {
    /// Modulus
    n: BigUint,
    /// Private exponent
    d: BigUint,
    /// Prime factors and precomputed values, if known.
    crt: Option<CrtValues>,
}

impl KeyParts for RsaPublicKey {
    fn n(&self) -> &BigUint {
        &self.n
    }
}

impl PublicKeyParts for RsaPublicKey {
    fn e(&self) -> &BigUint {
        &self.e
    }
}

impl RsaPublicKey {
    /// Create a new public key from its components.
    ///
    /// Fails if the modulus is zero or the exponent is not greater than one.
    pub fn new(n: BigUint, e: BigUint) -> Result<Self> {
        if n.is_zero() {
            return Err(Error::InvalidModulus);
        }
        if e <= BigUint::one() {
            return Err(Error::InvalidExponent);
        }

        Ok(Self { n, e })
    }

    /// Encrypt the given message with RSAES-PKCS1-v1_5.
    pub fn encrypt<R: CryptoRngCore + ?Sized>(&self, rng: &mut R, msg: &[u8]) -> Result<Vec<u8>> {
        pkcs1v15::encrypt(rng, self, msg)
    }

    /// Verify an RSASSA-PKCS1-v1_5 signature of `msg`.
    ///
    /// See [`pkcs1v15::verify`] for the meaning of the result.
    pub fn verify(&self, hash: HashAlgorithm, msg: &[u8], sig: &[u8]) -> Result<bool> {
        pkcs1v15::verify(self, hash, msg, sig)
    }
}

impl KeyParts for RsaPrivateKey {
    fn n(&self) -> &BigUint {
        &self.n
    }
}

impl PrivateKeyParts for RsaPrivateKey {
    fn d(&self) -> &BigUint {
        &self.d
    }

    fn crt_values(&self) -> Option<&CrtValues> {
        self.crt.as_ref()
    }
}

impl RsaPrivateKey {
    /// Generate a new RSA key pair of the given bit size using the default
    /// public exponent.
    pub fn new<R: CryptoRngCore + ?Sized>(rng: &mut R, bit_size: usize) -> Result<Self> {
        Self::new_with_exp(rng, bit_size, BigUint::from(DEFAULT_PUBLIC_EXPONENT))
    }

    /// Generate a new RSA key pair of the given bit size and public exponent.
    pub fn new_with_exp<R: CryptoRngCore + ?Sized>(
        rng: &mut R,
        bit_size: usize,
        exp: BigUint,
    ) -> Result<Self> {
        KeyPairGenerator::new()
            .key_length(bit_size)
            .public_exponent(exp)
            .generate(rng)
            .map(|pair| pair.private)
    }

    /// Constructs a private key from the private exponent, the public
    /// exponent and the two prime factors.
    ///
    /// The modulus and the CRT values `d mod (p-1)`, `d mod (q-1)` and
    /// `q^-1 mod p` are derived here.
    pub fn from_components(d: BigUint, e: BigUint, p: BigUint, q: BigUint) -> Result<Self> {
        let one = BigUint::one();
        if p <= one || q <= one {
            return Err(Error::InvalidPrime);
        }
        if e <= one {
            return Err(Error::InvalidExponent);
        }
        if d.is_zero() {
            return Err(Error::InvalidExponent);
        }

        let qinv = mod_inverse(&q, &p).ok_or(Error::InvalidPrime)?;
        let dp = &d % (&p - &one);
        let dq = &d % (&q - &one);
        let n = &p * &q;

        Ok(Self {
            n,
            d,
            crt: Some(CrtValues {
                e,
                p,
                q,
                dp,
                dq,
                qinv,
            }),
        })
    }

    /// Constructs a plain private key from the modulus and the private
    /// exponent. Such a key decrypts and signs without the CRT speedup and
    /// cannot produce its public key.
    pub fn from_exponent(n: BigUint, d: BigUint) -> Result<Self> {
        if n.is_zero() {
            return Err(Error::InvalidModulus);
        }
        if d.is_zero() {
            return Err(Error::InvalidExponent);
        }

        Ok(Self { n, d, crt: None })
    }

    /// Returns the same key without its prime factors.
    pub fn without_crt(&self) -> Self {
        Self {
            n: self.n.clone(),
            d: self.d.clone(),
            crt: None,
        }
    }

    /// Returns the public exponent, if the key knows it.
    pub fn public_exponent(&self) -> Option<&BigUint> {
        self.crt.as_ref().map(CrtValues::e)
    }

    /// Get the public key from the private key, cloning `n` and `e`.
    ///
    /// Plain keys do not carry the public exponent and return `None`.
    pub fn to_public_key(&self) -> Option<RsaPublicKey> {
        self.public_exponent().map(|e| RsaPublicKey {
            n: self.n.clone(),
            e: e.clone(),
        })
    }

    /// Performs basic sanity checks on the key.
    ///
    /// For keys with prime factors this checks `n == p * q` and that
    /// `d * e == 1 mod (prime - 1)` for both primes.
    pub fn validate(&self) -> Result<()> {
        let crt = match &self.crt {
            Some(crt) => crt,
            None => return Ok(()),
        };

        if self.n != crt.p() * crt.q() {
            return Err(Error::InvalidModulus);
        }

        let one = BigUint::one();
        let de = &self.d * crt.e();
        for prime in [crt.p(), crt.q()] {
            if &de % (prime - &one) != one {
                return Err(Error::InvalidExponent);
            }
        }

        Ok(())
    }

    /// Decrypt the given RSAES-PKCS1-v1_5 ciphertext.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        pkcs1v15::decrypt(self, ciphertext)
    }

    /// Decrypt the given RSAES-PKCS1-v1_5 ciphertext, using RSA blinding
    /// to protect against timing side channels.
    pub fn decrypt_blinded<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        pkcs1v15::decrypt_blinded(rng, self, ciphertext)
    }

    /// Sign `msg` with RSASSA-PKCS1-v1_5 using the given hash function.
    pub fn sign(&self, hash: HashAlgorithm, msg: &[u8]) -> Result<Vec<u8>> {
        pkcs1v15::sign(self, hash, msg)
    }
}

impl PartialEq for RsaPrivateKey {
    /// Keys with prime factors compare all of their values. When either side
    /// is a plain key only the modulus and private exponent are compared.
    fn eq(&self, other: &Self) -> bool {
        match (&self.crt, &other.crt) {
            (Some(a), Some(b)) => {
                self.n == other.n
                    && self.d == other.d
                    && a.e == b.e
                    && a.p == b.p
                    && a.q == b.q
                    && a.dp == b.dp
                    && a.dq == b.dq
                    && a.qinv == b.qinv
            }
            _ => self.n == other.n && self.d == other.d,
        }
    }
}

impl Eq for RsaPrivateKey {}

impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("n", &self.n)
            .field("e", &self.public_exponent())
            .field("crt", &self.crt.is_some())
            .finish_non_exhaustive()
    }
}

impl Zeroize for RsaPrivateKey {
    fn zeroize(&mut self) {
        self.d.zeroize();
        if let Some(mut crt) = self.crt.take() {
            crt.zeroize();
        }
    }
}

impl Drop for RsaPrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for RsaPrivateKey {}

impl TryFrom<&RsaPrivateKey> for RsaPublicKey {
    type Error = Error;

    fn try_from(private_key: &RsaPrivateKey) -> Result<Self> {
        private_key
            .to_public_key()
            .ok_or(Error::MissingPublicExponent)
    }
}

impl TryFrom<RsaPrivateKey> for RsaPublicKey {
    type Error = Error;

    fn try_from(private_key: RsaPrivateKey) -> Result<Self> {
        RsaPublicKey::try_from(&private_key)
    }
}

/// A matching public and private key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    public: RsaPublicKey,
    private: RsaPrivateKey,
}

impl KeyPair {
    /// Returns the public half.
    pub fn public(&self) -> &RsaPublicKey {
        &self.public
    }

    /// Returns the private half.
    pub fn private(&self) -> &RsaPrivateKey {
        &self.private
    }

    /// Splits the pair into its public and private keys.
    pub fn into_parts(self) -> (RsaPublicKey, RsaPrivateKey) {
        (self.public, self.private)
    }
}

impl TryFrom<RsaPrivateKey> for KeyPair {
    type Error = Error;

    fn try_from(private: RsaPrivateKey) -> Result<Self> {
        let public = RsaPublicKey::try_from(&private)?;
        Ok(Self { public, private })
    }
}

/// Configures and runs RSA key-pair generation.
///
/// ```
/// use rsa_lite::{KeyPairGenerator, BigUint};
///
/// let mut rng = rand::thread_rng(); // rand@0.8
/// let pair = KeyPairGenerator::new()
///     .key_length(1024)
///     .public_exponent(BigUint::from(65537u32))
///     .generate(&mut rng)
///     .expect("failed to generate a key");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPairGenerator {
    key_length: usize,
    public_exponent: BigUint,
    primality_rounds: usize,
}

impl Default for KeyPairGenerator {
    fn default() -> Self {
        Self {
            key_length: DEFAULT_KEY_LENGTH,
            public_exponent: BigUint::from(DEFAULT_PUBLIC_EXPONENT),
            primality_rounds: DEFAULT_PRIMALITY_ROUNDS,
        }
    }
}

impl KeyPairGenerator {
    /// A generator with 2048 bit keys, `e = 65537` and 64 primality rounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the modulus size in bits. Must be at least 1024.
    pub fn key_length(mut self, bits: usize) -> Self {
        self.key_length = bits;
        self
    }

    /// Sets the public exponent. Must be odd and at least 3.
    pub fn public_exponent(mut self, e: BigUint) -> Self {
        self.public_exponent = e;
        self
    }

    /// Sets the number of Miller-Rabin rounds run on each prime candidate.
    pub fn primality_rounds(mut self, rounds: usize) -> Self {
        self.primality_rounds = rounds;
        self
    }

    /// Generates a key pair.
    pub fn generate<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> Result<KeyPair> {
        let components = generate_key_components(
            rng,
            self.key_length,
            self.public_exponent.clone(),
            self.primality_rounds,
        )?;

        let public = RsaPublicKey::new(components.n, components.e.clone())?;
        let private =
            RsaPrivateKey::from_components(components.d, components.e, components.p, components.q)?;

        Ok(KeyPair { public, private })
    }
}

/// Generates a key pair of `key_length` bits with the given public exponent.
pub fn generate_key_pair<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    key_length: usize,
    public_exponent: BigUint,
) -> Result<KeyPair> {
    KeyPairGenerator::new()
        .key_length(key_length)
        .public_exponent(public_exponent)
        .generate(rng)
}
