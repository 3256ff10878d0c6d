//! Generic RSA implementation

use num_bigint::{BigInt, BigUint, IntoBigUint, ModInverse, RandBigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{Error, Result};
use crate::traits::{CrtValues, PrivateKeyParts, PublicKeyParts};

/// ⚠️ RSA encryption primitive (RSAEP): `m^e mod n`. No padding is performed.
///
/// Fails with [`Error::RepresentativeOutOfRange`] unless `0 <= m <= n - 1`.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsaep<K: PublicKeyParts>(key: &K, m: &BigUint) -> Result<BigUint> {
    if m >= key.n() {
        return Err(Error::RepresentativeOutOfRange);
    }

    Ok(m.modpow(key.e(), key.n()))
}

/// ⚠️ RSA decryption primitive (RSADP). No padding is performed.
///
/// Uses the Chinese remainder theorem when the key carries its prime
/// factors and falls back to `c^d mod n` otherwise. Both paths produce the
/// same result for a valid key.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsadp<K: PrivateKeyParts>(key: &K, c: &BigUint) -> Result<BigUint> {
    if c >= key.n() {
        return Err(Error::RepresentativeOutOfRange);
    }

    Ok(match key.crt_values() {
        Some(crt) => crt_decrypt(crt, c),
        None => c.modpow(key.d(), key.n()),
    })
}

/// ⚠️ RSA signature primitive (RSASP1). Same computation as [`rsadp`].
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsasp1<K: PrivateKeyParts>(key: &K, m: &BigUint) -> Result<BigUint> {
    rsadp(key, m)
}

/// ⚠️ RSA verification primitive (RSAVP1). Same computation as [`rsaep`].
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsavp1<K: PublicKeyParts>(key: &K, s: &BigUint) -> Result<BigUint> {
    rsaep(key, s)
}

/// ⚠️ Performs RSADP with RSA blinding if an `Rng` is passed.
///
/// Blinding needs the public exponent, so keys without CRT values are
/// never blinded.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_decrypt<R: CryptoRngCore + ?Sized, K: PrivateKeyParts>(
    rng: Option<&mut R>,
    priv_key: &K,
    c: &BigUint,
) -> Result<BigUint> {
    if c >= priv_key.n() {
        return Err(Error::RepresentativeOutOfRange);
    }

    let (rng, crt) = match (rng, priv_key.crt_values()) {
        (Some(rng), Some(crt)) => (rng, crt),
        _ => return rsadp(priv_key, c),
    };

    let (blinded, unblinder) = blind(rng, priv_key.n(), crt.e(), c);
    let blinded = Zeroizing::new(blinded);
    let m = Zeroizing::new(crt_decrypt(crt, &blinded));

    Ok(unblind(priv_key.n(), &m, &unblinder))
}

/// `m = m2 + q * ((m1 - m2) * qinv mod p)` where `m1 = c^dp mod p` and
/// `m2 = c^dq mod q`.
fn crt_decrypt(crt: &CrtValues, c: &BigUint) -> BigUint {
    let p = crt.p();
    let q = crt.q();

    let mut m1 = c.modpow(crt.dp(), p);
    let mut m2 = c.modpow(crt.dq(), q);

    // m1 - m2 mod p, kept non-negative
    let mut m2_mod_p = &m2 % p;
    let mut h = if m1 >= m2_mod_p {
        &m1 - &m2_mod_p
    } else {
        &m1 + p - &m2_mod_p
    };
    h *= crt.qinv();
    h %= p;

    let m = &m2 + &h * q;

    // clear tmp values
    m1.zeroize();
    m2.zeroize();
    m2_mod_p.zeroize();
    h.zeroize();

    m
}

/// Returns the blinded c, along with the unblinding factor.
fn blind<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    n: &BigUint,
    e: &BigUint,
    c: &BigUint,
) -> (BigUint, BigUint) {
    // Blinding involves multiplying c by r^e.
    // Then the decryption operation performs (m^e * r^e)^d mod n
    // which equals mr mod n. The factor of r can then be removed
    // by multiplying by the multiplicative inverse of r.

    let mut r: BigUint;
    let unblinder;
    loop {
        r = rng.gen_biguint_below(n);
        if r.is_zero() {
            r = BigUint::one();
        }
        if let Some(ir) = mod_inverse(&r, n) {
            unblinder = ir;
            break;
        }
    }

    let c = {
        let mut rpowe = r.modpow(e, n); // N != 0
        let mut c = c * &rpowe;
        c %= n;

        rpowe.zeroize();

        c
    };
    r.zeroize();

    (c, unblinder)
}

/// Given an m and and unblinding factor, unblind the m.
fn unblind(n: &BigUint, m: &BigUint, unblinder: &BigUint) -> BigUint {
    (m * unblinder) % n
}

/// Returns `a^-1 mod m` as a non-negative integer, if it exists.
pub(crate) fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }

    let inv = a.clone().mod_inverse(m)?;
    let m = BigInt::from_biguint(Sign::Plus, m.clone());
    inv.mod_floor(&m).into_biguint()
}

/// Computes `d = e^-1 mod (p - 1)(q - 1)`.
pub(crate) fn compute_private_exponent(p: &BigUint, q: &BigUint, e: &BigUint) -> Result<BigUint> {
    let one = BigUint::one();
    let totient = Zeroizing::new((p - &one) * (q - &one));
    mod_inverse(e, &totient).ok_or(Error::InvalidExponent)
}
