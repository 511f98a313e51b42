//! Error types for parsing and serializing I2P common structures
//!
//! Two kinds of outcome exist side by side:
//!
//! - [`Error`] - hard failures that abort the current parse. These never
//!   leave a partially usable value behind.
//! - [`ParseWarning`] - recoverable conditions observed in the wild
//!   (under-length strings, malformed mapping entries, oversized lease
//!   sets). Parsers that can produce them still return a usable value and
//!   hand the warnings back alongside it, never through the `Err` channel.
//!
//! # Result Type Alias
//!
//! [`Result<T>`] is a convenient alias for `std::result::Result<T, Error>`.

/// Hard parse and serialization failures
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input ended before a required field
    #[error("{site}: short input: need {needed} bytes, have {have}")]
    ShortInput {
        site: &'static str,
        needed: usize,
        have: usize,
    },

    /// A declared length field exceeds the data actually available
    #[error("{site}: declared length {declared} exceeds available data {available}")]
    LengthExceedsData {
        site: &'static str,
        declared: usize,
        available: usize,
    },

    /// A field is too large for its length prefix
    #[error("{site}: {length} bytes exceeds the limit of {limit}")]
    TooLong {
        site: &'static str,
        length: usize,
        limit: usize,
    },

    /// Integer width outside the 1..=8 range
    #[error("integer size {size} out of range, must be 1-8")]
    IntegerSize { size: usize },

    /// Value does not fit in the requested integer width
    #[error("value {value} does not fit in {size} bytes")]
    IntegerOverflow { value: u64, size: usize },

    /// String payload is not valid UTF-8
    #[error("string is not valid UTF-8")]
    InvalidUtf8,

    /// Certificate kind byte outside the defined set
    #[error("unknown certificate kind: {0}")]
    UnknownCertificateKind(u8),

    /// A key certificate was required but the certificate has another kind
    #[error("certificate kind {0} is not a key certificate")]
    NotAKeyCertificate(u8),

    /// NULL certificates carry no payload
    #[error("null certificate payload must be empty")]
    NullCertificateWithPayload,

    /// Signing key type outside the defined catalog
    #[error("unknown signing key type: {0}")]
    UnknownSigningKeyType(u16),

    /// Crypto key type outside the defined catalog
    #[error("unknown crypto key type: {0}")]
    UnknownCryptoKeyType(u16),

    /// Key material length does not match the declared scheme
    #[error("{scheme}: key material is {have} bytes, scheme requires {needed}")]
    KeyLength {
        scheme: &'static str,
        needed: usize,
        have: usize,
    },

    /// Declared key sizes cannot coexist in the 384-byte key block
    #[error("signing key of {signing} bytes and crypto key of {crypto} bytes do not fit the key block")]
    KeyLayoutConflict { signing: usize, crypto: usize },

    /// Certificate key types disagree with the supplied key values
    #[error("certificate declares {expected} but the supplied key is {found}")]
    CertificateKeyMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Duplicate mapping keys are forbidden on the wire
    #[error("duplicate mapping key: {0}")]
    DuplicateMappingKey(String),

    /// Lease sets hold at most 16 leases
    #[error("lease set holds {count} leases, limit is 16")]
    TooManyLeases { count: usize },

    /// Key material is structurally invalid for the scheme
    #[error("invalid {0} public key")]
    InvalidKey(&'static str),

    /// The scheme is sized by the catalog but no verifier backend is wired
    #[error("no verifier backend for {0}")]
    VerifierUnavailable(&'static str),

    /// Signature verification failed
    #[error("signature verification failed")]
    SignatureInvalid,
}

/// Recoverable conditions surfaced alongside a successfully parsed value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseWarning {
    /// String data is shorter than its length byte declares
    #[error("string data is shorter than declared: length field {declared}, available {actual}")]
    StringShorterThanDeclared { declared: usize, actual: usize },

    /// String value carries data beyond its declared length
    #[error("string contains data beyond declared length: length field {declared}, actual {actual}")]
    StringLongerThanDeclared { declared: usize, actual: usize },

    /// A mapping entry did not follow the `key=value;` shape
    #[error("malformed mapping entry: {reason}")]
    MalformedMappingEntry { reason: &'static str },

    /// The same key appeared more than once while parsing a mapping
    #[error("duplicate mapping key: {key}")]
    DuplicateMappingKey { key: String },

    /// Lease count above the protocol limit of 16
    #[error("lease set declares {count} leases, limit is 16")]
    TooManyLeases { count: usize },
}

/// Result type alias for I2P common-structure operations
pub type Result<T> = std::result::Result<T, Error>;
