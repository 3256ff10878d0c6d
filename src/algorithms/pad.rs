//! Conversions between integers and fixed-length big-endian octet strings
//! (I2OSP and OS2IP).

use alloc::vec::Vec;
use num_bigint::BigUint;
use num_traits::Zero;
use zeroize::Zeroizing;

use crate::errors::{Error, Result};

/// Returns a new vector of the given length, with 0s left padded.
#[inline]
fn left_pad(input: &[u8], padded_len: usize) -> Result<Vec<u8>> {
    if input.len() > padded_len {
        return Err(Error::IntegerTooLarge);
    }

    let mut out = vec![0u8; padded_len];
    out[padded_len - input.len()..].copy_from_slice(input);
    Ok(out)
}

/// Magnitude bytes of `x` without any leading zero octets.
#[inline]
fn magnitude(x: &BigUint) -> Vec<u8> {
    if x.is_zero() {
        Vec::new()
    } else {
        x.to_bytes_be()
    }
}

/// Integer-to-Octet-String primitive: converts `x` into exactly `k` big-endian
/// bytes, failing with [`Error::IntegerTooLarge`] if `x >= 256^k`.
#[inline]
pub fn i2osp(x: &BigUint, k: usize) -> Result<Vec<u8>> {
    left_pad(&magnitude(x), k)
}

/// Same as [`i2osp`], but consumes the integer and clears every intermediate
/// copy of it. Used for recovered plaintexts.
#[inline]
pub(crate) fn i2osp_zeroizing(x: BigUint, k: usize) -> Result<Zeroizing<Vec<u8>>> {
    let x = Zeroizing::new(x);
    let bytes = Zeroizing::new(magnitude(&x));
    left_pad(&bytes, k).map(Zeroizing::new)
}

/// Octet-String-to-Integer primitive: interprets `octets` as an unsigned
/// big-endian magnitude.
#[inline]
pub fn os2ip(octets: &[u8]) -> BigUint {
    BigUint::from_bytes_be(octets)
}
