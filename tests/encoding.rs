//! Binary key format round trips.

use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use rsa_lite::encoding::{PRIVATE_KEY_TAG, PUBLIC_KEY_TAG};
use rsa_lite::{
    BigUint, Error, HashAlgorithm, KeyPairGenerator, PrivateKeyParts, PublicKeyParts,
    RsaPrivateKey, RsaPublicKey,
};

fn generated_key(e: u32) -> RsaPrivateKey {
    let mut rng = ChaCha8Rng::from_seed([42; 32]);
    let (_, private) = KeyPairGenerator::new()
        .key_length(1024)
        .public_exponent(BigUint::from(e))
        .generate(&mut rng)
        .unwrap()
        .into_parts();
    private
}

#[test]
fn public_key_roundtrip() {
    let public = generated_key(65537).to_public_key().unwrap();
    let bytes = public.to_bytes().unwrap();
    assert_eq!(bytes[..4], PUBLIC_KEY_TAG);

    let decoded = RsaPublicKey::from_bytes(&bytes).unwrap();
    assert_eq!(decoded, public);
    assert_eq!(decoded.e(), &BigUint::from(65537u32));
}

#[test]
fn private_key_roundtrip() {
    let mut rng = ChaCha8Rng::from_seed([9; 32]);

    for e in [3u32, 17, 65537] {
        let private = generated_key(e);
        let bytes = private.to_bytes().unwrap();
        assert_eq!(bytes[..4], PRIVATE_KEY_TAG);

        let decoded = RsaPrivateKey::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, private);
        let (ours, theirs) = (decoded.crt_values().unwrap(), private.crt_values().unwrap());
        assert_eq!(ours.dp(), theirs.dp());
        assert_eq!(ours.dq(), theirs.dq());
        assert_eq!(ours.qinv(), theirs.qinv());
        decoded.validate().unwrap();

        // the decoded key is usable with the original public key
        let public = private.to_public_key().unwrap();
        let ciphertext = public.encrypt(&mut rng, b"Help the bombardier!").unwrap();
        assert_eq!(decoded.decrypt(&ciphertext).unwrap(), b"Help the bombardier!");
        let sig = decoded.sign(HashAlgorithm::Sha1, b"hello").unwrap();
        assert!(public.verify(HashAlgorithm::Sha1, b"hello", &sig).unwrap());
    }
}

#[test]
fn plain_private_key_roundtrip() {
    let private = generated_key(65537);
    let plain = private.without_crt();
    let bytes = plain.to_bytes().unwrap();

    let decoded = RsaPrivateKey::from_bytes(&bytes).unwrap();
    assert!(decoded.crt_values().is_none());
    assert_eq!(decoded, private);
    assert_eq!(decoded.to_public_key(), None);
}

#[test]
fn cross_tag_rejected() {
    let private = generated_key(65537);
    let public_bytes = private.to_public_key().unwrap().to_bytes().unwrap();
    let private_bytes = private.to_bytes().unwrap();

    assert!(matches!(
        RsaPrivateKey::from_bytes(&public_bytes),
        Err(Error::KeyFormat { .. })
    ));
    assert!(matches!(
        RsaPublicKey::from_bytes(&private_bytes),
        Err(Error::KeyFormat { .. })
    ));
}

#[test]
fn trailing_garbage_rejected() {
    let public = generated_key(65537).to_public_key().unwrap();
    let mut bytes = public.to_bytes().unwrap();
    bytes.extend_from_slice(&[0, 0]);
    assert!(matches!(
        RsaPublicKey::from_bytes(&bytes),
        Err(Error::KeyFormat { .. })
    ));
}

#[test]
fn truncated_private_key_rejected() {
    let bytes = generated_key(65537).to_bytes().unwrap();

    // every prefix, including the one ending right after `[d][e]`
    for len in 0..bytes.len() {
        assert!(
            matches!(
                RsaPrivateKey::from_bytes(&bytes[..len]),
                Err(Error::KeyFormat { .. })
            ),
            "{} of {} bytes decoded",
            len,
            bytes.len()
        );
    }
}
