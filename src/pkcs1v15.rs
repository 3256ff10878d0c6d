//! PKCS#1 v1.5 support as described in [RFC8017 § 7.2 and § 8.2].
//!
//! # Usage
//!
//! See [code example in the toplevel rustdoc](../index.html#pkcs1-v15-signatures).
//!
//! [RFC8017 § 7.2 and § 8.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.2

mod signature;
mod signing_key;
mod verifying_key;

pub use self::{signature::Signature, signing_key::SigningKey, verifying_key::VerifyingKey};

use alloc::vec::Vec;
use rand_core::CryptoRngCore;

use crate::algorithms::pad::{i2osp, i2osp_zeroizing, os2ip};
use crate::algorithms::pkcs1v15::*;
use crate::algorithms::rsa::{rsa_decrypt, rsaep, rsasp1, rsavp1};
use crate::dummy_rng::DummyRng;
use crate::errors::{Error, Result};
use crate::hash::HashAlgorithm;
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Encrypts the given message with RSA and the padding
/// scheme from PKCS#1 v1.5.  The message must be no longer than the
/// length of the public modulus minus 11 bytes.
#[inline]
pub fn encrypt<R, K>(rng: &mut R, pub_key: &K, msg: &[u8]) -> Result<Vec<u8>>
where
    R: CryptoRngCore + ?Sized,
    K: PublicKeyParts,
{
    let k = pub_key.size();
    let em = pkcs1v15_encrypt_pad(rng, msg, k)?;
    let c = rsaep(pub_key, &os2ip(&em))?;
    i2osp(&c, k)
}

/// Decrypts a plaintext using RSA and the padding scheme from PKCS#1 v1.5.
///
/// Every failure, including a ciphertext of the wrong length or one that is
/// out of range for the modulus, is reported as the same
/// [`Error::Decryption`].
#[inline]
pub fn decrypt<K: PrivateKeyParts>(priv_key: &K, ciphertext: &[u8]) -> Result<Vec<u8>> {
    decrypt_inner::<DummyRng, K>(None, priv_key, ciphertext)
}

/// Same as [`decrypt`], but RSADP runs with RSA blinding to avoid timing
/// side-channel attacks. Keys without their public exponent are not blinded.
#[inline]
pub fn decrypt_blinded<R, K>(rng: &mut R, priv_key: &K, ciphertext: &[u8]) -> Result<Vec<u8>>
where
    R: CryptoRngCore + ?Sized,
    K: PrivateKeyParts,
{
    decrypt_inner(Some(rng), priv_key, ciphertext)
}

fn decrypt_inner<R, K>(rng: Option<&mut R>, priv_key: &K, ciphertext: &[u8]) -> Result<Vec<u8>>
where
    R: CryptoRngCore + ?Sized,
    K: PrivateKeyParts,
{
    let k = priv_key.size();
    if k < 11 || ciphertext.len() != k {
        return Err(Error::Decryption);
    }

    let m = rsa_decrypt(rng, priv_key, &os2ip(ciphertext)).map_err(|_| Error::Decryption)?;
    let em = i2osp_zeroizing(m, k).map_err(|_| Error::Decryption)?;

    pkcs1v15_encrypt_unpad(&em, k)
}

/// Calculates the signature of `msg` using RSASSA-PKCS1-V1_5-SIGN from
/// RSA PKCS#1 v1.5, hashing it with `hash` first.
///
/// This function is deterministic. Thus, if the set of possible
/// messages is small, an attacker may be able to build a map from
/// messages to signatures and identify the signed messages. As ever,
/// signatures provide authenticity, not confidentiality.
#[inline]
pub fn sign<K: PrivateKeyParts>(priv_key: &K, hash: HashAlgorithm, msg: &[u8]) -> Result<Vec<u8>> {
    let k = priv_key.size();
    let em = emsa_pkcs1v15_encode(msg, k, hash)?;
    let s = rsasp1(priv_key, &os2ip(&em))?;
    i2osp(&s, k)
}

/// Verifies an RSA PKCS#1 v1.5 signature of `msg`.
///
/// A signature that does not match, has the wrong length, or is out of
/// range for the modulus yields `Ok(false)`. A modulus too small for the
/// chosen hash is reported as [`Error::EncodedMessageTooShort`].
#[inline]
pub fn verify<K: PublicKeyParts>(
    pub_key: &K,
    hash: HashAlgorithm,
    msg: &[u8],
    sig: &[u8],
) -> Result<bool> {
    let k = pub_key.size();
    if sig.len() != k {
        return Ok(false);
    }

    let em_prime = match rsavp1(pub_key, &os2ip(sig)).and_then(|m| i2osp(&m, k)) {
        Ok(em) => em,
        Err(Error::RepresentativeOutOfRange) | Err(Error::IntegerTooLarge) => return Ok(false),
        Err(err) => return Err(err),
    };
    let em = emsa_pkcs1v15_encode(msg, k, hash)?;

    Ok(encoded_messages_match(&em, &em_prime))
}
