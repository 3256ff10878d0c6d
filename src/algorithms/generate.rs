//! Generate prime components for the RSA Private Key

use alloc::vec::Vec;
use num_bigint::prime::probably_prime;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::algorithms::rsa::compute_private_exponent;
use crate::errors::{Error, Result};

/// Smallest modulus size accepted by key generation.
pub(crate) const MIN_KEY_LENGTH: usize = 1024;

/// Smallest public exponent accepted by key generation.
const MIN_PUB_EXPONENT: u64 = 3;

pub(crate) struct RsaPrivateKeyComponents {
    pub n: BigUint,
    pub e: BigUint,
    pub d: BigUint,
    pub p: BigUint,
    pub q: BigUint,
}

/// Checks the requested key length and public exponent.
pub(crate) fn check_parameters(key_length: usize, exp: &BigUint) -> Result<()> {
    if key_length < MIN_KEY_LENGTH {
        return Err(Error::KeyLengthTooSmall);
    }
    if *exp < BigUint::from(MIN_PUB_EXPONENT) {
        return Err(Error::PublicExponentTooSmall);
    }
    if exp.is_even() {
        return Err(Error::InvalidExponent);
    }
    Ok(())
}

/// Generates the components of a two prime RSA key whose modulus has exactly
/// `key_length` bits.
///
/// `p` gets `ceil(key_length / 2)` bits and `q` the rest. Both primes are
/// searched concurrently when threads are available. A pair whose product
/// misses the requested length, or a pair of equal primes, is discarded and
/// the search starts over.
pub(crate) fn generate_key_components<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    key_length: usize,
    exp: BigUint,
    rounds: usize,
) -> Result<RsaPrivateKeyComponents> {
    check_parameters(key_length, &exp)?;

    let p_bits = (key_length + 1) / 2;
    let q_bits = key_length - p_bits;

    loop {
        let (p, q) = search_primes(rng, p_bits, q_bits, &exp, rounds);

        if p == q {
            log::debug!("prime search produced equal primes, restarting");
            continue;
        }

        let n = &p * &q;
        if n.bits() != key_length {
            // Cannot happen with the top two bits of both primes set, kept
            // so the modulus length never depends on that detail.
            log::debug!(
                "modulus has {} bits instead of {}, restarting",
                n.bits(),
                key_length
            );
            continue;
        }

        if let Ok(d) = compute_private_exponent(&p, &q, &exp) {
            return Ok(RsaPrivateKeyComponents { n, e: exp, d, p, q });
        }
    }
}

/// Searches `p` on a scoped worker thread while `q` is searched on the
/// calling thread. The worker draws from its own ChaCha20 stream seeded by
/// `rng`. If the worker cannot be started or panics, `p` is searched inline.
#[cfg(feature = "std")]
fn search_primes<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    p_bits: usize,
    q_bits: usize,
    exp: &BigUint,
    rounds: usize,
) -> (BigUint, BigUint) {
    use rand_chacha::{rand_core::SeedableRng, ChaCha20Rng};

    let mut seed = Zeroizing::new([0u8; 32]);
    rng.fill_bytes(&mut seed[..]);
    let mut worker_rng = ChaCha20Rng::from_seed(*seed);

    std::thread::scope(|s| {
        let worker = std::thread::Builder::new()
            .name("rsa-prime-search".into())
            .spawn_scoped(s, move || generate_prime(&mut worker_rng, p_bits, exp, rounds));

        let q = generate_prime(rng, q_bits, exp, rounds);

        let p = join_or_inline(worker.map(|handle| handle.join()), || {
            generate_prime(rng, p_bits, exp, rounds)
        });

        (p, q)
    })
}

/// Takes the prime found by the worker, or runs `inline` on the calling
/// thread when the worker could not be spawned or panicked.
#[cfg(feature = "std")]
fn join_or_inline<F>(worker: std::io::Result<std::thread::Result<BigUint>>, inline: F) -> BigUint
where
    F: FnOnce() -> BigUint,
{
    match worker {
        Ok(Ok(p)) => p,
        Ok(Err(_)) => {
            log::warn!("concurrent prime search panicked, searching inline");
            inline()
        }
        Err(err) => {
            log::warn!("cannot spawn prime search thread ({}), searching inline", err);
            inline()
        }
    }
}

#[cfg(not(feature = "std"))]
fn search_primes<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    p_bits: usize,
    q_bits: usize,
    exp: &BigUint,
    rounds: usize,
) -> (BigUint, BigUint) {
    let p = generate_prime(rng, p_bits, exp, rounds);
    let q = generate_prime(rng, q_bits, exp, rounds);
    (p, q)
}

/// Returns a random probable prime of exactly `bit_size` bits with
/// `gcd(exp, prime - 1) == 1`.
///
/// Every candidate has its two most significant bits set, so the product of
/// two such primes is never one bit short, and its lowest bit set.
pub(crate) fn generate_prime<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bit_size: usize,
    exp: &BigUint,
    rounds: usize,
) -> BigUint {
    debug_assert!(bit_size >= 2, "prime size must be at least 2-bit");

    let mut b = bit_size % 8;
    if b == 0 {
        b = 8;
    }

    let bytes_len = (bit_size + 7) / 8;
    let mut bytes: Zeroizing<Vec<u8>> = Zeroizing::new(vec![0u8; bytes_len]);

    loop {
        rng.fill_bytes(&mut bytes);
        // Clear bits in the first byte to make sure the candidate has a size <= bits.
        bytes[0] &= ((1u32 << b) - 1) as u8;

        if b >= 2 {
            bytes[0] |= 3u8 << (b - 2);
        } else {
            // b == 1
            bytes[0] |= 1;
            if bytes_len > 1 {
                bytes[1] |= 0x80;
            }
        }
        // Make the value odd since an even number this large certainly isn't prime.
        bytes[bytes_len - 1] |= 1;

        let candidate = BigUint::from_bytes_be(&bytes);
        if probably_prime(&candidate, rounds) && coprime_to_exponent(&candidate, exp) {
            return candidate;
        }
    }
}

#[inline]
fn coprime_to_exponent(prime: &BigUint, exp: &BigUint) -> bool {
    let one = BigUint::one();
    (prime - &one).gcd(exp) == one
}
