//! Binary key encoding.
//!
//! A key blob is a four byte ASCII tag followed by length prefixed integer
//! fields. Each field is a big-endian `u32` length and then that many bytes
//! of a minimal big-endian two's complement integer. Non-negative values
//! whose top bit would be set carry one leading `0x00` byte.
//!
//! | key                  | tag      | fields                     |
//! |----------------------|----------|----------------------------|
//! | public               | `"RSAP"` | `[n][e]`                   |
//! | private              | `"RSAK"` | `[d][e][p][q]`             |
//! | private, plain       | `"RSAK"` | `[n][d]`                   |
//!
//! The CRT values of a private key are never stored; decoding derives them
//! again from `d`, `p` and `q`.

use alloc::vec::Vec;

use num_bigint::BigUint;
use num_traits::Zero;
use zeroize::Zeroizing;

use crate::errors::{Error, Result};
use crate::traits::{KeyParts, PrivateKeyParts, PublicKeyParts};
use crate::{RsaPrivateKey, RsaPublicKey};

/// Tag of an encoded public key.
pub const PUBLIC_KEY_TAG: [u8; 4] = *b"RSAP";

/// Tag of an encoded private key.
pub const PRIVATE_KEY_TAG: [u8; 4] = *b"RSAK";

const LENGTH_PREFIX_SIZE: usize = 4;

fn format_error(reason: &'static str) -> Error {
    Error::KeyFormat { reason }
}

/// Appends one length prefixed field holding `x` to `out`.
fn write_field(out: &mut Vec<u8>, x: &BigUint) -> Result<()> {
    let magnitude = Zeroizing::new(x.to_bytes_be());
    let sign_byte = magnitude[0] & 0x80 != 0;
    let len = magnitude.len() + usize::from(sign_byte);
    let len = u32::try_from(len).map_err(|_| format_error("integer field too long"))?;

    out.extend_from_slice(&len.to_be_bytes());
    if sign_byte {
        out.push(0x00);
    }
    out.extend_from_slice(&magnitude);
    Ok(())
}

fn encode(tag: [u8; 4], fields: &[&BigUint]) -> Result<Zeroizing<Vec<u8>>> {
    let mut out = Zeroizing::new(Vec::new());
    out.extend_from_slice(&tag);
    for field in fields {
        write_field(&mut out, field)?;
    }
    Ok(out)
}

/// Checks the tag and splits the rest of `bytes` into integer fields.
fn decode(tag: [u8; 4], bytes: &[u8]) -> Result<Vec<BigUint>> {
    if bytes.len() < tag.len() {
        return Err(format_error("truncated tag"));
    }
    let (found, mut rest) = bytes.split_at(tag.len());
    if found != tag {
        return Err(format_error("unexpected tag"));
    }

    let mut fields = Vec::new();
    while !rest.is_empty() {
        if rest.len() < LENGTH_PREFIX_SIZE {
            return Err(format_error("truncated length prefix"));
        }
        let (prefix, tail) = rest.split_at(LENGTH_PREFIX_SIZE);
        let len = u32::from_be_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]);
        let len = usize::try_from(len).map_err(|_| format_error("truncated field"))?;

        if tail.len() < len {
            return Err(format_error("truncated field"));
        }
        let (field, tail) = tail.split_at(len);
        if field.is_empty() {
            return Err(format_error("empty integer field"));
        }
        if field[0] & 0x80 != 0 {
            return Err(format_error("negative integer field"));
        }

        fields.push(BigUint::from_bytes_be(field));
        rest = tail;
    }

    Ok(fields)
}

impl RsaPublicKey {
    /// Encodes the key as `"RSAP" [n][e]`.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let out = encode(PUBLIC_KEY_TAG, &[self.n(), self.e()])?;
        Ok(out.to_vec())
    }

    /// Decodes a key produced by [`RsaPublicKey::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let fields = decode(PUBLIC_KEY_TAG, bytes)?;
        let (n, e) = match fields.as_slice() {
            [n, e] => (n.clone(), e.clone()),
            _ => return Err(format_error("unexpected number of fields")),
        };
        if n.is_zero() {
            return Err(format_error("zero modulus"));
        }

        RsaPublicKey::new(n, e).map_err(|_| format_error("invalid public key components"))
    }
}

impl RsaPrivateKey {
    /// Encodes the key as `"RSAK" [d][e][p][q]`, or as `"RSAK" [n][d]` when
    /// the key carries no prime factors.
    pub fn to_bytes(&self) -> Result<Zeroizing<Vec<u8>>> {
        match self.crt_values() {
            Some(crt) => encode(PRIVATE_KEY_TAG, &[self.d(), crt.e(), crt.p(), crt.q()]),
            None => encode(PRIVATE_KEY_TAG, &[self.n(), self.d()]),
        }
    }

    /// Decodes a key produced by [`RsaPrivateKey::to_bytes`].
    ///
    /// Keys with prime factors are checked for consistency.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let fields = Zeroizing::new(decode(PRIVATE_KEY_TAG, bytes)?);

        match fields.as_slice() {
            [d, e, p, q] => {
                let key = RsaPrivateKey::from_components(d.clone(), e.clone(), p.clone(), q.clone())
                    .map_err(|_| format_error("invalid private key components"))?;
                key.validate()
                    .map_err(|_| format_error("inconsistent private key components"))?;
                Ok(key)
            }
            [n, d] => {
                if n.is_zero() {
                    return Err(format_error("zero modulus"));
                }
                // A real private exponent is about as long as the modulus.
                // Anything this short is also what a `[d][e][p][q]` blob cut
                // after `e` looks like.
                if d.bits() <= n.bits() / 2 {
                    return Err(format_error("private exponent too small"));
                }
                RsaPrivateKey::from_exponent(n.clone(), d.clone())
                    .map_err(|_| format_error("invalid private key components"))
            }
            _ => Err(format_error("unexpected number of fields")),
        }
    }
}

impl TryFrom<&[u8]> for RsaPublicKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl TryFrom<&[u8]> for RsaPrivateKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}
