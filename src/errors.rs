//! Error types.

/// Alias for [`core::result::Result`] with the `rsa-lite` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug, Clone, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Message is too long for the modulus.
    MessageTooLong,

    /// Integer representative is outside of `[0, n - 1]`.
    RepresentativeOutOfRange,

    /// Integer does not fit into the requested number of octets.
    IntegerTooLarge,

    /// Decryption error.
    Decryption,

    /// Intended encoded message length too short for the chosen digest.
    EncodedMessageTooShort,

    /// Malformed key encoding.
    KeyFormat {
        /// What was wrong with the encoding.
        reason: &'static str,
    },

    /// Requested key length is below the supported minimum.
    KeyLengthTooSmall,

    /// Unrecognized hash algorithm name.
    UnsupportedHash,

    /// Invalid prime value.
    InvalidPrime,

    /// Invalid modulus.
    InvalidModulus,

    /// Invalid exponent.
    InvalidExponent,

    /// Public exponent too small.
    PublicExponentTooSmall,

    /// Operation needs the public exponent, which a plain private key does not carry.
    MissingPublicExponent,
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::MessageTooLong => write!(f, "message too long"),
            Error::RepresentativeOutOfRange => write!(f, "integer representative out of range"),
            Error::IntegerTooLarge => write!(f, "integer too large"),
            Error::Decryption => write!(f, "decryption error"),
            Error::EncodedMessageTooShort => {
                write!(f, "intended encoded message length too short")
            }
            Error::KeyFormat { reason } => write!(f, "malformed key encoding: {}", reason),
            Error::KeyLengthTooSmall => write!(f, "key length too small"),
            Error::UnsupportedHash => write!(f, "unsupported hash algorithm"),
            Error::InvalidPrime => write!(f, "invalid prime value"),
            Error::InvalidModulus => write!(f, "invalid modulus"),
            Error::InvalidExponent => write!(f, "invalid exponent"),
            Error::PublicExponentTooSmall => write!(f, "public exponent too small"),
            Error::MissingPublicExponent => write!(f, "private key has no public exponent"),
        }
    }
}

impl From<Error> for signature::Error {
    fn from(err: Error) -> Self {
        #[cfg(feature = "std")]
        {
            Self::from_source(err)
        }
        #[cfg(not(feature = "std"))]
        {
            let _ = err;
            Self::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_display() {
        assert_eq!(Error::MessageTooLong.to_string(), "message too long");
        assert_eq!(Error::Decryption.to_string(), "decryption error");
        assert_eq!(
            Error::KeyFormat { reason: "truncated" }.to_string(),
            "malformed key encoding: truncated"
        );
    }
}
