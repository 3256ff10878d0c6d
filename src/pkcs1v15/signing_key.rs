use super::{sign, Signature, VerifyingKey};
use crate::{hash::HashAlgorithm, Error, Result, RsaPrivateKey};
use ::signature::Signer;
use zeroize::ZeroizeOnDrop;

/// Signing key for `RSASSA-PKCS1-v1_5` signatures as described in [RFC8017 § 8.2].
///
/// Binds a private key to the hash function applied to every signed message.
///
/// [RFC8017 § 8.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.2
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningKey {
    inner: RsaPrivateKey,
    hash: HashAlgorithm,
}

impl SigningKey {
    /// Create a new signing key which hashes messages with `hash`.
    pub fn new(key: RsaPrivateKey, hash: HashAlgorithm) -> Self {
        Self { inner: key, hash }
    }

    /// Returns the hash function used by this key.
    pub fn hash(&self) -> HashAlgorithm {
        self.hash
    }

    /// Returns the matching verifying key.
    ///
    /// Fails with [`Error::MissingPublicExponent`] for plain private keys.
    pub fn verifying_key(&self) -> Result<VerifyingKey> {
        let key = self
            .inner
            .to_public_key()
            .ok_or(Error::MissingPublicExponent)?;
        Ok(VerifyingKey::new(key, self.hash))
    }
}

impl Signer<Signature> for SigningKey {
    fn try_sign(&self, msg: &[u8]) -> ::signature::Result<Signature> {
        Ok(sign(&self.inner, self.hash, msg)?.into())
    }
}

impl AsRef<RsaPrivateKey> for SigningKey {
    fn as_ref(&self) -> &RsaPrivateKey {
        &self.inner
    }
}

impl From<SigningKey> for RsaPrivateKey {
    fn from(key: SigningKey) -> Self {
        key.inner
    }
}

impl ZeroizeOnDrop for SigningKey {}
