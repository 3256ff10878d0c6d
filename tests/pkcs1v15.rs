//! PKCS#1 v1.5 round trips against freshly generated keys.

use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use rsa_lite::pkcs1v15::{self, Signature, SigningKey, VerifyingKey};
use rsa_lite::signature::{SignatureEncoding, Signer, Verifier};
use rsa_lite::{Error, HashAlgorithm, KeyPair, KeyPairGenerator, KeyParts};

const MESSAGE: &[u8] = b"Help the bombardier!";

fn key_pair(bits: usize) -> KeyPair {
    let mut rng = ChaCha8Rng::from_seed([42; 32]);
    KeyPairGenerator::new()
        .key_length(bits)
        .generate(&mut rng)
        .unwrap()
}

#[test]
fn encrypt_decrypt_2048() {
    let mut rng = ChaCha8Rng::from_seed([7; 32]);
    let pair = key_pair(2048);
    assert_eq!(pair.public().n().bits(), 2048);
    assert_eq!(pair.public().size(), 256);

    let ciphertext = pair.public().encrypt(&mut rng, MESSAGE).unwrap();
    assert_eq!(ciphertext.len(), 256);
    assert_ne!(&ciphertext[..MESSAGE.len()], MESSAGE);

    assert_eq!(pair.private().decrypt(&ciphertext).unwrap(), MESSAGE);
    assert_eq!(
        pair.private().decrypt_blinded(&mut rng, &ciphertext).unwrap(),
        MESSAGE
    );
    assert_eq!(
        pair.private().without_crt().decrypt(&ciphertext).unwrap(),
        MESSAGE
    );

    // fresh padding every time
    let again = pair.public().encrypt(&mut rng, MESSAGE).unwrap();
    assert_ne!(ciphertext, again);
}

#[test]
fn message_length_limit() {
    let mut rng = ChaCha8Rng::from_seed([7; 32]);
    let pair = key_pair(1024);
    let k = pair.public().size();

    let longest = vec![0x5a; k - 11];
    let ciphertext = pair.public().encrypt(&mut rng, &longest).unwrap();
    assert_eq!(pair.private().decrypt(&ciphertext).unwrap(), longest);

    let too_long = vec![0x5a; k - 10];
    assert_eq!(
        pair.public().encrypt(&mut rng, &too_long),
        Err(Error::MessageTooLong)
    );
}

#[test]
fn tampered_ciphertext() {
    let mut rng = ChaCha8Rng::from_seed([7; 32]);
    let pair = key_pair(1024);
    let mut ciphertext = pair.public().encrypt(&mut rng, MESSAGE).unwrap();

    ciphertext[10] ^= 0x01;
    match pair.private().decrypt(&ciphertext) {
        Err(Error::Decryption) => {}
        Ok(plaintext) => assert_ne!(plaintext, MESSAGE),
        Err(err) => panic!("unexpected error {:?}", err),
    }

    assert_eq!(
        pair.private().decrypt(&ciphertext[1..]),
        Err(Error::Decryption)
    );
}

#[test]
fn sign_verify_sha256() {
    let pair = key_pair(2048);
    let sig = pair.private().sign(HashAlgorithm::Sha256, MESSAGE).unwrap();
    assert_eq!(sig.len(), 256);

    assert!(pair
        .public()
        .verify(HashAlgorithm::Sha256, MESSAGE, &sig)
        .unwrap());
    assert!(!pair
        .public()
        .verify(HashAlgorithm::Sha512, MESSAGE, &sig)
        .unwrap());
    assert!(!pair
        .public()
        .verify(HashAlgorithm::Sha256, b"Help the bombardier?", &sig)
        .unwrap());

    // signing is deterministic
    let again = pkcs1v15::sign(pair.private(), HashAlgorithm::Sha256, MESSAGE).unwrap();
    assert_eq!(sig, again);
}

#[test]
fn sign_verify_all_hashes() {
    let pair = key_pair(1024);

    for hash in HashAlgorithm::ALL {
        let sig = pair.private().sign(hash, MESSAGE).unwrap();
        assert!(pair.public().verify(hash, MESSAGE, &sig).unwrap(), "{}", hash);

        for other in HashAlgorithm::ALL {
            if other != hash {
                assert!(
                    !pair.public().verify(other, MESSAGE, &sig).unwrap(),
                    "{} accepted as {}",
                    hash,
                    other
                );
            }
        }
    }
}

#[test]
fn single_bit_flips() {
    let pair = key_pair(1024);
    let hash = HashAlgorithm::Sha1;
    let sig = pair.private().sign(hash, MESSAGE).unwrap();

    for i in 0..MESSAGE.len() * 8 {
        let mut msg = MESSAGE.to_vec();
        msg[i / 8] ^= 1 << (i % 8);
        assert!(!pair.public().verify(hash, &msg, &sig).unwrap());
    }

    for i in 0..sig.len() * 8 {
        let mut bad = sig.clone();
        bad[i / 8] ^= 1 << (i % 8);
        assert!(!pair.public().verify(hash, MESSAGE, &bad).unwrap());
    }
}

#[test]
fn signer_verifier_traits() {
    let (public, private) = key_pair(1024).into_parts();
    let signing_key = SigningKey::new(private, HashAlgorithm::Sha384);
    let verifying_key = signing_key.verifying_key().unwrap();
    assert_eq!(verifying_key, VerifyingKey::new(public, HashAlgorithm::Sha384));

    let signature = signing_key.sign(MESSAGE);
    verifying_key.verify(MESSAGE, &signature).unwrap();
    assert!(verifying_key.verify(b"something else", &signature).is_err());

    let bytes = signature.to_bytes();
    let parsed = Signature::try_from(&*bytes).unwrap();
    assert_eq!(parsed, signature);
    assert_eq!(format!("{}", parsed).len(), 2 * bytes.len());
}

#[test]
fn plain_key_has_no_verifying_key() {
    let private = key_pair(1024).private().without_crt();
    let signing_key = SigningKey::new(private.clone(), HashAlgorithm::Md5);
    assert_eq!(
        signing_key.verifying_key(),
        Err(Error::MissingPublicExponent)
    );

    // plain keys still sign with the same result
    let full = key_pair(1024);
    let sig = private.sign(HashAlgorithm::Md5, MESSAGE).unwrap();
    assert_eq!(sig, full.private().sign(HashAlgorithm::Md5, MESSAGE).unwrap());
    assert!(KeyPair::try_from(private).is_err());
}
