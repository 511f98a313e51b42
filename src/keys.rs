//! Polymorphic public-key values and the verifier seam
//!
//! Key certificates select one of several signing and crypto schemes with
//! differing byte lengths. The key values are tagged variants: one arm per
//! supported algorithm, each holding exactly the catalog-declared number of
//! bytes. A key's required capabilities are deliberately small: serialize
//! to bytes, and provide a [`Verifier`].
//!
//! Verification itself is a collaborator concern. Backends are wired for
//! EdDSA-Ed25519 and ECDSA-P256; the remaining schemes size correctly but
//! return [`Error::VerifierUnavailable`](crate::Error::VerifierUnavailable)
//! so callers can supply their own `Verifier` implementation.

use ed25519_dalek::Verifier as _;
use sha2::{Digest, Sha256};

use crate::key_certificate::{CryptoKeyType, SigningKeyType};
use crate::{Error, Result};

/// Signature verification over raw message bytes
pub trait Verifier {
    /// Verify `signature` over `data`, returning
    /// [`Error::SignatureInvalid`](crate::Error::SignatureInvalid) on
    /// mismatch
    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<()>;
}

/// A signing public key, one variant per catalog scheme
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigningPublicKey {
    DsaSha1(Vec<u8>),
    EcdsaSha256P256(Vec<u8>),
    EcdsaSha384P384(Vec<u8>),
    EcdsaSha512P521(Vec<u8>),
    RsaSha256_2048(Vec<u8>),
    RsaSha384_3072(Vec<u8>),
    RsaSha512_4096(Vec<u8>),
    EdDsaSha512Ed25519([u8; 32]),
    RedDsaSha512Ed25519([u8; 32]),
}

impl SigningPublicKey {
    /// Build a key of the given scheme; `data` must be exactly the
    /// catalog-declared length
    pub fn from_bytes(kind: SigningKeyType, data: &[u8]) -> Result<SigningPublicKey> {
        if data.len() != kind.key_size() {
            return Err(Error::KeyLength {
                scheme: kind.name(),
                needed: kind.key_size(),
                have: data.len(),
            });
        }
        let key = match kind {
            SigningKeyType::DsaSha1 => SigningPublicKey::DsaSha1(data.to_vec()),
            SigningKeyType::EcdsaSha256P256 => SigningPublicKey::EcdsaSha256P256(data.to_vec()),
            SigningKeyType::EcdsaSha384P384 => SigningPublicKey::EcdsaSha384P384(data.to_vec()),
            SigningKeyType::EcdsaSha512P521 => SigningPublicKey::EcdsaSha512P521(data.to_vec()),
            SigningKeyType::RsaSha256_2048 => SigningPublicKey::RsaSha256_2048(data.to_vec()),
            SigningKeyType::RsaSha384_3072 => SigningPublicKey::RsaSha384_3072(data.to_vec()),
            SigningKeyType::RsaSha512_4096 => SigningPublicKey::RsaSha512_4096(data.to_vec()),
            SigningKeyType::EdDsaSha512Ed25519 => {
                let mut bytes = [0u8; 32];
                bytes.copy_from_slice(data);
                SigningPublicKey::EdDsaSha512Ed25519(bytes)
            }
            SigningKeyType::RedDsaSha512Ed25519 => {
                let mut bytes = [0u8; 32];
                bytes.copy_from_slice(data);
                SigningPublicKey::RedDsaSha512Ed25519(bytes)
            }
        };
        Ok(key)
    }

    pub fn key_type(&self) -> SigningKeyType {
        match self {
            SigningPublicKey::DsaSha1(_) => SigningKeyType::DsaSha1,
            SigningPublicKey::EcdsaSha256P256(_) => SigningKeyType::EcdsaSha256P256,
            SigningPublicKey::EcdsaSha384P384(_) => SigningKeyType::EcdsaSha384P384,
            SigningPublicKey::EcdsaSha512P521(_) => SigningKeyType::EcdsaSha512P521,
            SigningPublicKey::RsaSha256_2048(_) => SigningKeyType::RsaSha256_2048,
            SigningPublicKey::RsaSha384_3072(_) => SigningKeyType::RsaSha384_3072,
            SigningPublicKey::RsaSha512_4096(_) => SigningKeyType::RsaSha512_4096,
            SigningPublicKey::EdDsaSha512Ed25519(_) => SigningKeyType::EdDsaSha512Ed25519,
            SigningPublicKey::RedDsaSha512Ed25519(_) => SigningKeyType::RedDsaSha512Ed25519,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            SigningPublicKey::DsaSha1(bytes)
            | SigningPublicKey::EcdsaSha256P256(bytes)
            | SigningPublicKey::EcdsaSha384P384(bytes)
            | SigningPublicKey::EcdsaSha512P521(bytes)
            | SigningPublicKey::RsaSha256_2048(bytes)
            | SigningPublicKey::RsaSha384_3072(bytes)
            | SigningPublicKey::RsaSha512_4096(bytes) => bytes,
            SigningPublicKey::EdDsaSha512Ed25519(bytes)
            | SigningPublicKey::RedDsaSha512Ed25519(bytes) => bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// Construct a verifier for this key's scheme
    pub fn verifier(&self) -> Result<Box<dyn Verifier>> {
        match self {
            SigningPublicKey::EdDsaSha512Ed25519(bytes) => {
                Ok(Box::new(Ed25519Verifier::new(bytes)?))
            }
            SigningPublicKey::EcdsaSha256P256(bytes) => {
                Ok(Box::new(EcdsaP256Verifier::new(bytes)?))
            }
            other => Err(Error::VerifierUnavailable(other.key_type().name())),
        }
    }
}

/// A crypto (encryption) public key, one variant per catalog scheme
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKey {
    ElGamal(Box<[u8; 256]>),
    EciesX25519([u8; 32]),
}

impl PublicKey {
    /// Build a key of the given scheme; `data` must be exactly the
    /// catalog-declared length
    pub fn from_bytes(kind: CryptoKeyType, data: &[u8]) -> Result<PublicKey> {
        if data.len() != kind.key_size() {
            return Err(Error::KeyLength {
                scheme: kind.name(),
                needed: kind.key_size(),
                have: data.len(),
            });
        }
        let key = match kind {
            CryptoKeyType::ElGamal => {
                let mut bytes = Box::new([0u8; 256]);
                bytes.copy_from_slice(data);
                PublicKey::ElGamal(bytes)
            }
            CryptoKeyType::EciesX25519 => {
                let mut bytes = [0u8; 32];
                bytes.copy_from_slice(data);
                PublicKey::EciesX25519(bytes)
            }
        };
        Ok(key)
    }

    pub fn key_type(&self) -> CryptoKeyType {
        match self {
            PublicKey::ElGamal(_) => CryptoKeyType::ElGamal,
            PublicKey::EciesX25519(_) => CryptoKeyType::EciesX25519,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            PublicKey::ElGamal(bytes) => bytes.as_slice(),
            PublicKey::EciesX25519(bytes) => bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

/// EdDSA-Ed25519-SHA512 verification via ed25519-dalek
struct Ed25519Verifier {
    key: ed25519_dalek::VerifyingKey,
}

impl Ed25519Verifier {
    fn new(bytes: &[u8; 32]) -> Result<Ed25519Verifier> {
        let key = ed25519_dalek::VerifyingKey::from_bytes(bytes)
            .map_err(|_| Error::InvalidKey("Ed25519"))?;
        Ok(Ed25519Verifier { key })
    }
}

impl Verifier for Ed25519Verifier {
    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<()> {
        let signature =
            ed25519_dalek::Signature::from_slice(signature).map_err(|_| Error::SignatureInvalid)?;
        self.key
            .verify(data, &signature)
            .map_err(|_| Error::SignatureInvalid)
    }
}

/// ECDSA-P256-SHA256 verification via p256
///
/// I2P encodes the key as the 64-byte uncompressed point without the SEC1
/// tag and the signature as raw `r ‖ s`.
struct EcdsaP256Verifier {
    key: p256::ecdsa::VerifyingKey,
}

impl EcdsaP256Verifier {
    fn new(bytes: &[u8]) -> Result<EcdsaP256Verifier> {
        let mut sec1 = Vec::with_capacity(65);
        sec1.push(0x04);
        sec1.extend_from_slice(bytes);
        let key = p256::ecdsa::VerifyingKey::from_sec1_bytes(&sec1)
            .map_err(|_| Error::InvalidKey("ECDSA-P256"))?;
        Ok(EcdsaP256Verifier { key })
    }
}

impl Verifier for EcdsaP256Verifier {
    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<()> {
        use p256::ecdsa::signature::hazmat::PrehashVerifier;

        let signature =
            p256::ecdsa::Signature::from_slice(signature).map_err(|_| Error::SignatureInvalid)?;
        let mut hasher = Sha256::new();
        hasher.update(data);
        let hash = hasher.finalize();
        self.key
            .verify_prehash(&hash, &signature)
            .map_err(|_| Error::SignatureInvalid)
    }
}
