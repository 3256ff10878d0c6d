//! PKCS#1 v1.5 support as described in [RFC8017 § 8.2].
//!
//! # Usage
//!
//! See [code example in the toplevel rustdoc](../index.html#pkcs1-v15-signatures).
//!
//! [RFC8017 § 8.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.2

use alloc::vec::Vec;
use rand_core::CryptoRngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroizing;

use crate::errors::{Error, Result};
use crate::hash::HashAlgorithm;

/// Fills the provided slice with random values, which are guaranteed
/// to not be zero.
#[inline]
fn non_zero_random_bytes<R: CryptoRngCore + ?Sized>(rng: &mut R, data: &mut [u8]) {
    rng.fill_bytes(data);

    for el in data {
        if *el == 0u8 {
            while *el == 0u8 {
                rng.fill_bytes(core::slice::from_mut(el));
            }
        }
    }
}

/// Applied the padding scheme from PKCS#1 v1.5 for encryption.  The message must be no longer than
/// the length of the public modulus minus 11 bytes.
pub(crate) fn pkcs1v15_encrypt_pad<R>(
    rng: &mut R,
    msg: &[u8],
    k: usize,
) -> Result<Zeroizing<Vec<u8>>>
where
    R: CryptoRngCore + ?Sized,
{
    if msg.len() + 11 > k {
        return Err(Error::MessageTooLong);
    }

    // EM = 0x00 || 0x02 || PS || 0x00 || M
    let mut em = Zeroizing::new(vec![0u8; k]);
    em[1] = 2;
    non_zero_random_bytes(rng, &mut em[2..k - msg.len() - 1]);
    em[k - msg.len() - 1] = 0;
    em[k - msg.len()..].copy_from_slice(msg);
    Ok(em)
}

/// Removes the encryption padding scheme from PKCS#1 v1.5.
///
/// Every failure is reported as the same [`Error::Decryption`]. If an
/// attacker can learn *why* unpadding failed they can decrypt and forge
/// signatures as if they had the private key.
#[inline]
pub(crate) fn pkcs1v15_encrypt_unpad(em: &[u8], k: usize) -> Result<Vec<u8>> {
    let (valid, index) = decrypt_inner(em, k)?;
    if valid == 0 {
        return Err(Error::Decryption);
    }

    Ok(em[index as usize..].to_vec())
}

/// Removes the PKCS1v15 padding It returns one or zero in valid that indicates whether the
/// plaintext was correctly structured. The scan over `em` touches every byte regardless of
/// where the delimiter is found, to maintain constant memory access patterns. If the plaintext
/// was valid then index contains the index of the original message in em.
#[inline]
fn decrypt_inner(em: &[u8], k: usize) -> Result<(u8, u32)> {
    if k < 11 || em.len() != k {
        return Err(Error::Decryption);
    }

    let first_byte_is_zero = em[0].ct_eq(&0u8);
    let second_byte_is_two = em[1].ct_eq(&2u8);

    // The remainder of the plaintext must be a string of non-zero random
    // octets, followed by a 0, followed by the message.
    //   looking_for_index: 1 iff we are still looking for the zero.
    //   index: the offset of the first zero byte.
    let mut looking_for_index = 1u8;
    let mut index = 0u32;

    for (i, el) in em.iter().enumerate().skip(2) {
        let equals0 = el.ct_eq(&0u8);
        index.conditional_assign(&(i as u32), Choice::from(looking_for_index) & equals0);
        looking_for_index.conditional_assign(&0u8, equals0);
    }

    // The PS padding must be at least 8 bytes long, and it starts two
    // bytes into em, so the delimiter sits at index 10 or later.
    let valid_ps = Choice::from((((2i32 + 8i32 - index as i32 - 1i32) >> 31) & 1) as u8);
    let valid =
        first_byte_is_zero & second_byte_is_two & Choice::from(!looking_for_index & 1) & valid_ps;
    index = u32::conditional_select(&0, &(index + 1), valid);

    Ok((valid.unwrap_u8(), index))
}

/// EMSA-PKCS1-v1_5 encoding of an already computed digest `T = prefix || hashed`.
#[inline]
pub(crate) fn pkcs1v15_sign_pad(prefix: &[u8], hashed: &[u8], k: usize) -> Result<Vec<u8>> {
    let hash_len = hashed.len();
    let t_len = prefix.len() + hashed.len();
    if k < t_len + 11 {
        return Err(Error::EncodedMessageTooShort);
    }

    // EM = 0x00 || 0x01 || PS || 0x00 || T
    let mut em = vec![0xff; k];
    em[0] = 0;
    em[1] = 1;
    em[k - t_len - 1] = 0;
    em[k - t_len..k - hash_len].copy_from_slice(prefix);
    em[k - hash_len..k].copy_from_slice(hashed);

    Ok(em)
}

/// EMSA-PKCS1-v1_5-ENCODE: hashes `msg` with `hash` and produces the
/// `em_len` byte encoded message `0x00 || 0x01 || PS || 0x00 || DigestInfo`.
pub fn emsa_pkcs1v15_encode(msg: &[u8], em_len: usize, hash: HashAlgorithm) -> Result<Vec<u8>> {
    let hashed = hash.digest(msg);
    pkcs1v15_sign_pad(hash.der_prefix(), &hashed, em_len)
}

/// Constant-time comparison of two encoded messages.
#[inline]
pub(crate) fn encoded_messages_match(em: &[u8], expected: &[u8]) -> bool {
    em.ct_eq(expected).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    #[test]
    fn test_non_zero_bytes() {
        for _ in 0..10 {
            let mut rng = ChaCha8Rng::from_seed([42; 32]);
            let mut b = vec![0u8; 512];
            non_zero_random_bytes(&mut rng, &mut b);
            for el in &b {
                assert_ne!(*el, 0u8);
            }
        }
    }

    #[test]
    fn test_encrypt_tiny_no_crash() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let k = 8;
        let message = vec![1u8; 4];
        let res = pkcs1v15_encrypt_pad(&mut rng, &message, k);
        assert_eq!(res, Err(Error::MessageTooLong));
    }

    #[test]
    fn test_encrypt_pad_layout() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let k = 64;
        let msg = b"hello";
        let em = pkcs1v15_encrypt_pad(&mut rng, msg, k).unwrap();

        assert_eq!(em.len(), k);
        assert_eq!(&em[..2], &[0x00, 0x02]);
        assert!(em[2..k - msg.len() - 1].iter().all(|b| *b != 0));
        assert_eq!(em[k - msg.len() - 1], 0);
        assert_eq!(&em[k - msg.len()..], msg);
    }

    #[test]
    fn test_encrypt_pad_capacity() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let k = 32;
        assert!(pkcs1v15_encrypt_pad(&mut rng, &[7u8; 21], k).is_ok());
        assert_eq!(
            pkcs1v15_encrypt_pad(&mut rng, &[7u8; 22], k),
            Err(Error::MessageTooLong)
        );
    }

    #[test]
    fn test_unpad_roundtrip() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        for len in 0..=21 {
            let msg = vec![0xabu8; len];
            let em = pkcs1v15_encrypt_pad(&mut rng, &msg, 32).unwrap();
            assert_eq!(pkcs1v15_encrypt_unpad(&em, 32).unwrap(), msg);
        }
    }

    #[test]
    fn test_unpad_uses_first_delimiter() {
        // PS = 8 non-zero bytes, then the delimiter, then a message holding zeros.
        let mut em = vec![0x00, 0x02];
        em.extend_from_slice(&[0x11; 8]);
        em.push(0x00);
        em.extend_from_slice(&[0x00, 0x05, 0x00]);
        let k = em.len();
        assert_eq!(pkcs1v15_encrypt_unpad(&em, k).unwrap(), vec![0x00, 0x05, 0x00]);
    }

    #[test]
    fn test_unpad_rejects_malformed() {
        let mut good = vec![0x00, 0x02];
        good.extend_from_slice(&[0x11; 8]);
        good.push(0x00);
        good.extend_from_slice(b"msg");
        let k = good.len();
        assert!(pkcs1v15_encrypt_unpad(&good, k).is_ok());

        let mut bad_first = good.clone();
        bad_first[0] = 0x01;
        assert_eq!(pkcs1v15_encrypt_unpad(&bad_first, k), Err(Error::Decryption));

        let mut bad_type = good.clone();
        bad_type[1] = 0x01;
        assert_eq!(pkcs1v15_encrypt_unpad(&bad_type, k), Err(Error::Decryption));

        // delimiter at index 9: only 7 bytes of padding
        let mut short_ps = good.clone();
        short_ps[9] = 0x00;
        assert_eq!(pkcs1v15_encrypt_unpad(&short_ps, k), Err(Error::Decryption));

        let mut no_delim = good.clone();
        no_delim[10] = 0x22;
        assert_eq!(pkcs1v15_encrypt_unpad(&no_delim, k), Err(Error::Decryption));

        assert_eq!(pkcs1v15_encrypt_unpad(&good[..10], 10), Err(Error::Decryption));
        assert_eq!(pkcs1v15_encrypt_unpad(&good, k + 1), Err(Error::Decryption));
    }

    #[test]
    fn test_emsa_encode_sha256() {
        let em = emsa_pkcs1v15_encode(b"abc", 64, HashAlgorithm::Sha256).unwrap();
        let t_len = 19 + 32;

        assert_eq!(em.len(), 64);
        assert_eq!(&em[..2], &[0x00, 0x01]);
        assert!(em[2..64 - t_len - 1].iter().all(|b| *b == 0xff));
        assert_eq!(em[64 - t_len - 1], 0x00);
        assert_eq!(&em[64 - t_len..64 - 32], HashAlgorithm::Sha256.der_prefix());
        assert_eq!(
            &em[64 - 32..],
            &hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
    }

    #[test]
    fn test_emsa_encode_too_short() {
        // SHA-512: T is 19 + 64 = 83 bytes, so 94 is the smallest workable length.
        assert!(emsa_pkcs1v15_encode(b"abc", 94, HashAlgorithm::Sha512).is_ok());
        assert_eq!(
            emsa_pkcs1v15_encode(b"abc", 93, HashAlgorithm::Sha512),
            Err(Error::EncodedMessageTooShort)
        );
    }

    #[test]
    fn test_encoded_messages_match() {
        assert!(encoded_messages_match(&[1, 2, 3], &[1, 2, 3]));
        assert!(!encoded_messages_match(&[1, 2, 3], &[1, 2, 4]));
        assert!(!encoded_messages_match(&[1, 2, 3], &[1, 2]));
    }
}
