//! Codecs and value types for the I2P common wire structures: primitive
//! fields, certificates and keying material, network-database entries and
//! signature envelopes.
//!
//! Every parser consumes a prefix of a byte slice and returns the value
//! with the remaining bytes; serialization is the byte-exact dual.
//! Recoverable format problems observed in the wild are surfaced as
//! [`ParseWarning`] lists next to the parsed value, distinct from hard
//! [`Error`]s.

mod certificate;
mod data;
mod error;
mod key_certificate;
mod keys;
mod keys_and_cert;
mod lease;
mod lease_set;
mod mapping;
mod router_address;
mod router_info;
mod signature;

pub use certificate::{Certificate, CertificateKind, CERT_MIN_SIZE};
pub use data::{
    Date, Hash, I2PString, Integer, DATE_SIZE, HASH_SIZE, INTEGER_MAX_SIZE, STRING_MAX_SIZE,
};
pub use error::{Error, ParseWarning, Result};
pub use key_certificate::{
    CryptoKeyType, KeyCertificate, SigningKeyType, DEFAULT_SIGNATURE_SIZE, KEYCERT_MIN_PAYLOAD,
};
pub use keys::{PublicKey, SigningPublicKey, Verifier};
pub use keys_and_cert::{
    Destination, KeysAndCert, RouterIdentity, KEYS_AND_CERT_DATA_SIZE, KEYS_AND_CERT_MIN_SIZE,
    KEYS_AND_CERT_PUBKEY_SIZE, KEYS_AND_CERT_SPK_SIZE,
};
pub use lease::{Lease, LEASE_SIZE};
pub use lease_set::{LeaseSet, LEASE_SET_PUBKEY_SIZE, LEASE_SET_SPK_SIZE, MAX_LEASE_COUNT};
pub use mapping::Mapping;
pub use router_address::RouterAddress;
pub use router_info::{
    RouterInfo, MAX_GOOD_VERSION, MIN_GOOD_VERSION, ROUTER_INFO_MIN_SIZE,
};
pub use signature::Signature;
