#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Supported algorithms
//!
//! This crate supports the PKCS#1 v1.5 schemes described in [RFC8017]:
//!
//! - [PKCS#1 v1.5 encryption scheme](#pkcs1-v15-encryption)
//! - [PKCS#1 v1.5 signature scheme](#pkcs1-v15-signatures)
//!
//! with MD2, MD5, SHA-1, SHA-256, SHA-384 and SHA-512 as signature digests.
//!
//! # Usage
//!
//! ## PKCS#1 v1.5 encryption
//! ```
//! use rsa_lite::{RsaPrivateKey, RsaPublicKey};
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//!
//! let bits = 1024;
//! let private_key = RsaPrivateKey::new(&mut rng, bits).expect("failed to generate a key");
//! let public_key = private_key.to_public_key().expect("key has a public exponent");
//!
//! // Encrypt
//! let data = b"hello world";
//! let enc_data = public_key.encrypt(&mut rng, &data[..]).expect("failed to encrypt");
//! assert_ne!(&data[..], &enc_data[..]);
//!
//! // Decrypt
//! let dec_data = private_key.decrypt(&enc_data).expect("failed to decrypt");
//! assert_eq!(&data[..], &dec_data[..]);
//! ```
//!
//! ## PKCS#1 v1.5 signatures
//!
//! ```
//! use rsa_lite::{generate_key_pair, BigUint, HashAlgorithm};
//! use rsa_lite::pkcs1v15::{SigningKey, VerifyingKey};
//! use rsa_lite::signature::{SignatureEncoding, Signer, Verifier};
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//!
//! let pair = generate_key_pair(&mut rng, 1024, BigUint::from(65537u32))
//!     .expect("failed to generate a key");
//! let (public_key, private_key) = pair.into_parts();
//!
//! // Sign and verify with the plain functions
//! let data = b"hello world";
//! let sig = private_key.sign(HashAlgorithm::Sha256, data).expect("failed to sign");
//! assert!(public_key.verify(HashAlgorithm::Sha256, data, &sig).expect("bad modulus"));
//!
//! // or through the `signature` traits
//! let signing_key = SigningKey::new(private_key, HashAlgorithm::Sha256);
//! let verifying_key = VerifyingKey::new(public_key, HashAlgorithm::Sha256);
//! let signature = signing_key.sign(data);
//! assert_eq!(signature.to_bytes().as_ref(), sig.as_slice());
//! verifying_key.verify(data, &signature).expect("failed to verify");
//! ```
//!
//! ## Key encoding
//!
//! Keys serialize to a compact tagged binary format, see [`RsaPublicKey::to_bytes`]
//! and [`RsaPrivateKey::to_bytes`].
//!
//! ```
//! use rsa_lite::{RsaPrivateKey, RsaPublicKey};
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//! let private_key = RsaPrivateKey::new(&mut rng, 1024).expect("failed to generate a key");
//!
//! let bytes = private_key.to_bytes().expect("failed to encode");
//! assert_eq!(&bytes[..4], b"RSAK");
//! assert_eq!(RsaPrivateKey::from_bytes(&bytes).expect("failed to decode"), private_key);
//! ```
//!
//! [RFC8017]: https://datatracker.ietf.org/doc/html/rfc8017

#[cfg(doctest)]
pub struct ReadmeDoctests;

#[macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use num_bigint::BigUint;
pub use rand_core;
pub use signature;

mod algorithms;
pub mod encoding;
pub mod errors;
pub mod hash;
pub mod pkcs1v15;
pub mod traits;

mod dummy_rng;
mod key;

pub use crate::{
    errors::{Error, Result},
    hash::{HashAlgorithm, HashDescriptor},
    key::{
        generate_key_pair, KeyPair, KeyPairGenerator, RsaPrivateKey, RsaPublicKey,
        DEFAULT_KEY_LENGTH, DEFAULT_PRIMALITY_ROUNDS, DEFAULT_PUBLIC_EXPONENT,
    },
    traits::{CrtValues, KeyParts, PrivateKeyParts, PublicKeyParts},
};

#[cfg(feature = "hazmat")]
pub mod hazmat;
