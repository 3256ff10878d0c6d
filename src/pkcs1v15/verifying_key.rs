use super::{verify, Signature};
use crate::{hash::HashAlgorithm, RsaPublicKey};
use ::signature::Verifier;

/// Verifying key for `RSASSA-PKCS1-v1_5` signatures as described in [RFC8017 § 8.2].
///
/// [RFC8017 § 8.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.2
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyingKey {
    pub(super) inner: RsaPublicKey,
    pub(super) hash: HashAlgorithm,
}

impl VerifyingKey {
    /// Create a new verifying key which hashes messages with `hash`.
    pub fn new(key: RsaPublicKey, hash: HashAlgorithm) -> Self {
        Self { inner: key, hash }
    }

    /// Returns the hash function used by this key.
    pub fn hash(&self) -> HashAlgorithm {
        self.hash
    }
}

impl Verifier<Signature> for VerifyingKey {
    fn verify(&self, msg: &[u8], signature: &Signature) -> ::signature::Result<()> {
        match verify(&self.inner, self.hash, msg, signature.as_bytes()) {
            Ok(true) => Ok(()),
            Ok(false) => Err(::signature::Error::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl AsRef<RsaPublicKey> for VerifyingKey {
    fn as_ref(&self) -> &RsaPublicKey {
        &self.inner
    }
}

impl From<VerifyingKey> for RsaPublicKey {
    fn from(key: VerifyingKey) -> Self {
        key.inner
    }
}
