//! Hash algorithms usable with PKCS#1 v1.5 signatures.

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use digest::Digest;

use crate::errors::{Error, Result};

/// Name, digest length and `DigestInfo` DER prefix of a hash function.
#[derive(Debug, PartialEq, Eq)]
pub struct HashDescriptor {
    /// Canonical algorithm name, e.g. `"SHA-256"`.
    pub name: &'static str,
    /// Length in bytes of a digest.
    pub digest_len: usize,
    /// ASN.1 DER encoding of `DigestInfo` up to (not including) the digest.
    pub der_prefix: &'static [u8],
}

pub(crate) static MD2: HashDescriptor = HashDescriptor {
    name: "MD2",
    digest_len: 16,
    der_prefix: &[
        0x30, 0x20, 0x30, 0x0c, 0x06, 0x08, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x02, 0x02, 0x05,
        0x00, 0x04, 0x10,
    ],
};

pub(crate) static MD5: HashDescriptor = HashDescriptor {
    name: "MD5",
    digest_len: 16,
    der_prefix: &[
        0x30, 0x20, 0x30, 0x0c, 0x06, 0x08, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x02, 0x05, 0x05,
        0x00, 0x04, 0x10,
    ],
};

pub(crate) static SHA1: HashDescriptor = HashDescriptor {
    name: "SHA-1",
    digest_len: 20,
    der_prefix: &[
        0x30, 0x21, 0x30, 0x09, 0x06, 0x05, 0x2b, 0x0e, 0x03, 0x02, 0x1a, 0x05, 0x00, 0x04, 0x14,
    ],
};

pub(crate) static SHA256: HashDescriptor = HashDescriptor {
    name: "SHA-256",
    digest_len: 32,
    der_prefix: &[
        0x30, 0x31, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01,
        0x05, 0x00, 0x04, 0x20,
    ],
};

pub(crate) static SHA384: HashDescriptor = HashDescriptor {
    name: "SHA-384",
    digest_len: 48,
    der_prefix: &[
        0x30, 0x41, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x02,
        0x05, 0x00, 0x04, 0x30,
    ],
};

pub(crate) static SHA512: HashDescriptor = HashDescriptor {
    name: "SHA-512",
    digest_len: 64,
    der_prefix: &[
        0x30, 0x51, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x03,
        0x05, 0x00, 0x04, 0x40,
    ],
};

/// The supported hash functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// MD2 (RFC 1319)
    Md2,
    /// MD5 (RFC 1321)
    Md5,
    /// SHA-1
    Sha1,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl HashAlgorithm {
    /// Every supported algorithm, weakest first.
    pub const ALL: [HashAlgorithm; 6] = [
        HashAlgorithm::Md2,
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
    ];

    /// Returns the static descriptor of this algorithm.
    pub fn descriptor(self) -> &'static HashDescriptor {
        match self {
            HashAlgorithm::Md2 => &MD2,
            HashAlgorithm::Md5 => &MD5,
            HashAlgorithm::Sha1 => &SHA1,
            HashAlgorithm::Sha256 => &SHA256,
            HashAlgorithm::Sha384 => &SHA384,
            HashAlgorithm::Sha512 => &SHA512,
        }
    }

    /// Canonical name, e.g. `"SHA-1"`.
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Returns the length in bytes of a digest.
    pub fn size(self) -> usize {
        self.descriptor().digest_len
    }

    /// Returns the ASN.1 DER prefix of `DigestInfo` for this hash function.
    pub fn der_prefix(self) -> &'static [u8] {
        self.descriptor().der_prefix
    }

    /// Hashes `msg`.
    pub fn digest(self, msg: &[u8]) -> Vec<u8> {
        match self {
            HashAlgorithm::Md2 => md2::Md2::digest(msg).to_vec(),
            HashAlgorithm::Md5 => md5::Md5::digest(msg).to_vec(),
            HashAlgorithm::Sha1 => sha1::Sha1::digest(msg).to_vec(),
            HashAlgorithm::Sha256 => sha2::Sha256::digest(msg).to_vec(),
            HashAlgorithm::Sha384 => sha2::Sha384::digest(msg).to_vec(),
            HashAlgorithm::Sha512 => sha2::Sha512::digest(msg).to_vec(),
        }
    }

    /// Looks an algorithm up by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|alg| alg.name().eq_ignore_ascii_case(name))
            .ok_or(Error::UnsupportedHash)
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_digest_lengths() {
        for alg in HashAlgorithm::ALL {
            assert_eq!(alg.digest(b"abc").len(), alg.size(), "{}", alg);
            // the final DER byte is the OCTET STRING length of the digest
            assert_eq!(*alg.der_prefix().last().unwrap() as usize, alg.size());
        }
    }

    #[test]
    fn test_known_digests() {
        assert_eq!(
            HashAlgorithm::Md2.digest(b"abc"),
            hex!("da853b0d3f88d99b30283a69e6ded6bb")
        );
        assert_eq!(
            HashAlgorithm::Md5.digest(b"abc"),
            hex!("900150983cd24fb0d6963f7d28e17f72")
        );
        assert_eq!(
            HashAlgorithm::Sha1.digest(b"abc"),
            hex!("a9993e364706816aba3e25717850c26c9cd0d89d")
        );
    }

    #[test]
    fn test_der_prefixes() {
        assert_eq!(
            HashAlgorithm::Md2.der_prefix(),
            hex!("3020300c06082a864886f70d020205000410")
        );
        assert_eq!(
            HashAlgorithm::Md5.der_prefix(),
            hex!("3020300c06082a864886f70d020505000410")
        );
        assert_eq!(
            HashAlgorithm::Sha1.der_prefix(),
            hex!("3021300906052b0e03021a05000414")
        );
        assert_eq!(
            HashAlgorithm::Sha256.der_prefix(),
            hex!("3031300d060960864801650304020105000420")
        );
        assert_eq!(
            HashAlgorithm::Sha384.der_prefix(),
            hex!("3041300d060960864801650304020205000430")
        );
        assert_eq!(
            HashAlgorithm::Sha512.der_prefix(),
            hex!("3051300d060960864801650304020305000440")
        );
    }

    #[test]
    fn test_from_name() {
        assert_eq!(HashAlgorithm::from_name("SHA-256"), Ok(HashAlgorithm::Sha256));
        assert_eq!(HashAlgorithm::from_name("sha-1"), Ok(HashAlgorithm::Sha1));
        assert_eq!("md2".parse::<HashAlgorithm>(), Ok(HashAlgorithm::Md2));
        assert_eq!(
            HashAlgorithm::from_name("SHA-224"),
            Err(Error::UnsupportedHash)
        );
        assert_eq!(HashAlgorithm::from_name(""), Err(Error::UnsupportedHash));

        for alg in HashAlgorithm::ALL {
            assert_eq!(HashAlgorithm::from_name(&alg.to_string()), Ok(alg));
        }
    }
}
