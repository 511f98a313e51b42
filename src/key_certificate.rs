//! The I2P Key Certificate: scheme selection for a KeysAndCert
//!
//! A certificate of kind KEY opens with two 2-byte integers naming the
//! signing and crypto key schemes. Those two values are the sole source of
//! truth for how wide the enclosing structure's keys and trailing signature
//! are, so everything here is driven by the two catalogs below. Unknown
//! type values are refused with a typed error rather than truncated.

use crate::certificate::{Certificate, CertificateKind};
use crate::keys::{PublicKey, SigningPublicKey};
use crate::{Error, Result};

/// Minimum payload of a key certificate: two 2-byte type fields
pub const KEYCERT_MIN_PAYLOAD: usize = 4;

/// Signature width when no key certificate is present (DSA-SHA1)
pub const DEFAULT_SIGNATURE_SIZE: usize = 40;

/// Signing key schemes selectable by a key certificate
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningKeyType {
    DsaSha1 = 0,
    EcdsaSha256P256 = 1,
    EcdsaSha384P384 = 2,
    EcdsaSha512P521 = 3,
    RsaSha256_2048 = 4,
    RsaSha384_3072 = 5,
    RsaSha512_4096 = 6,
    EdDsaSha512Ed25519 = 7,
    RedDsaSha512Ed25519 = 11,
}

impl SigningKeyType {
    /// Parse from wire format value
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0 => Some(Self::DsaSha1),
            1 => Some(Self::EcdsaSha256P256),
            2 => Some(Self::EcdsaSha384P384),
            3 => Some(Self::EcdsaSha512P521),
            4 => Some(Self::RsaSha256_2048),
            5 => Some(Self::RsaSha384_3072),
            6 => Some(Self::RsaSha512_4096),
            7 => Some(Self::EdDsaSha512Ed25519),
            11 => Some(Self::RedDsaSha512Ed25519),
            _ => None,
        }
    }

    /// Convert to wire format value
    pub fn to_u16(self) -> u16 {
        self as u16
    }

    /// Length of the signing public key in bytes
    pub fn key_size(self) -> usize {
        match self {
            Self::DsaSha1 => 128,
            Self::EcdsaSha256P256 => 64,
            Self::EcdsaSha384P384 => 96,
            Self::EcdsaSha512P521 => 132,
            Self::RsaSha256_2048 => 256,
            Self::RsaSha384_3072 => 384,
            Self::RsaSha512_4096 => 512,
            Self::EdDsaSha512Ed25519 => 32,
            Self::RedDsaSha512Ed25519 => 32,
        }
    }

    /// Length of a signature produced by this scheme in bytes
    pub fn signature_size(self) -> usize {
        match self {
            Self::DsaSha1 => 40,
            Self::EcdsaSha256P256 => 64,
            Self::EcdsaSha384P384 => 96,
            Self::EcdsaSha512P521 => 132,
            Self::RsaSha256_2048 => 256,
            Self::RsaSha384_3072 => 384,
            Self::RsaSha512_4096 => 512,
            Self::EdDsaSha512Ed25519 => 64,
            Self::RedDsaSha512Ed25519 => 64,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::DsaSha1 => "DSA-SHA1",
            Self::EcdsaSha256P256 => "ECDSA-P256-SHA256",
            Self::EcdsaSha384P384 => "ECDSA-P384-SHA384",
            Self::EcdsaSha512P521 => "ECDSA-P521-SHA512",
            Self::RsaSha256_2048 => "RSA-2048-SHA256",
            Self::RsaSha384_3072 => "RSA-3072-SHA384",
            Self::RsaSha512_4096 => "RSA-4096-SHA512",
            Self::EdDsaSha512Ed25519 => "EdDSA-Ed25519-SHA512",
            Self::RedDsaSha512Ed25519 => "RedDSA-Ed25519-SHA512",
        }
    }
}

/// Crypto (encryption) key schemes selectable by a key certificate
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptoKeyType {
    ElGamal = 0,
    EciesX25519 = 4,
}

impl CryptoKeyType {
    /// Parse from wire format value
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0 => Some(Self::ElGamal),
            4 => Some(Self::EciesX25519),
            _ => None,
        }
    }

    /// Convert to wire format value
    pub fn to_u16(self) -> u16 {
        self as u16
    }

    /// Length of the crypto public key in bytes
    pub fn key_size(self) -> usize {
        match self {
            Self::ElGamal => 256,
            Self::EciesX25519 => 32,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ElGamal => "ElGamal",
            Self::EciesX25519 => "ECIES-X25519",
        }
    }
}

/// The interpretation of a KEY certificate's payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCertificate {
    signing_type: SigningKeyType,
    crypto_type: CryptoKeyType,
}

impl KeyCertificate {
    pub fn new(signing_type: SigningKeyType, crypto_type: CryptoKeyType) -> KeyCertificate {
        KeyCertificate {
            signing_type,
            crypto_type,
        }
    }

    /// Interpret a certificate of kind KEY
    pub fn from_certificate(certificate: &Certificate) -> Result<KeyCertificate> {
        if certificate.kind() != CertificateKind::Key {
            return Err(Error::NotAKeyCertificate(certificate.kind().to_u8()));
        }
        let payload = certificate.data();
        if payload.len() < KEYCERT_MIN_PAYLOAD {
            return Err(Error::ShortInput {
                site: "key certificate",
                needed: KEYCERT_MIN_PAYLOAD,
                have: payload.len(),
            });
        }
        let signing_value = u16::from_be_bytes([payload[0], payload[1]]);
        let crypto_value = u16::from_be_bytes([payload[2], payload[3]]);
        let signing_type = SigningKeyType::from_u16(signing_value)
            .ok_or(Error::UnknownSigningKeyType(signing_value))?;
        let crypto_type = CryptoKeyType::from_u16(crypto_value)
            .ok_or(Error::UnknownCryptoKeyType(crypto_value))?;
        Ok(KeyCertificate {
            signing_type,
            crypto_type,
        })
    }

    /// Render as a certificate of kind KEY
    pub fn to_certificate(&self) -> Certificate {
        let mut payload = Vec::with_capacity(KEYCERT_MIN_PAYLOAD);
        payload.extend_from_slice(&self.signing_type.to_u16().to_be_bytes());
        payload.extend_from_slice(&self.crypto_type.to_u16().to_be_bytes());
        Certificate::new(CertificateKind::Key, &payload)
            .expect("4-byte KEY payload is always valid")
    }

    pub fn signing_type(&self) -> SigningKeyType {
        self.signing_type
    }

    pub fn crypto_type(&self) -> CryptoKeyType {
        self.crypto_type
    }

    /// Width of the signing public key selected by this certificate
    pub fn signing_key_size(&self) -> usize {
        self.signing_type.key_size()
    }

    /// Width of the crypto public key selected by this certificate
    pub fn crypto_key_size(&self) -> usize {
        self.crypto_type.key_size()
    }

    /// Width of a signature under this certificate's signing scheme
    pub fn signature_size(&self) -> usize {
        self.signing_type.signature_size()
    }

    /// Construct the signing public key from the trailing key bytes.
    ///
    /// `key_data` is the signing-key region of the enclosing structure,
    /// including any overflow prefix carved from the public-key slot; the
    /// key occupies its last [`signing_key_size`](Self::signing_key_size)
    /// bytes, with padding (if any) before it.
    pub fn construct_signing_public_key(&self, key_data: &[u8]) -> Result<SigningPublicKey> {
        let size = self.signing_key_size();
        if key_data.len() < size {
            return Err(Error::KeyLength {
                scheme: self.signing_type.name(),
                needed: size,
                have: key_data.len(),
            });
        }
        SigningPublicKey::from_bytes(self.signing_type, &key_data[key_data.len() - size..])
    }

    /// Construct the crypto public key from the 256-byte public-key slot.
    ///
    /// The key occupies the first
    /// [`crypto_key_size`](Self::crypto_key_size) bytes of `key_data`.
    pub fn construct_public_key(&self, key_data: &[u8]) -> Result<PublicKey> {
        let size = self.crypto_key_size();
        if key_data.len() < size {
            return Err(Error::KeyLength {
                scheme: self.crypto_type.name(),
                needed: size,
                have: key_data.len(),
            });
        }
        PublicKey::from_bytes(self.crypto_type, &key_data[..size])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_cert_bytes(signing: u16, crypto: u16) -> Certificate {
        let mut payload = Vec::new();
        payload.extend_from_slice(&signing.to_be_bytes());
        payload.extend_from_slice(&crypto.to_be_bytes());
        Certificate::new(CertificateKind::Key, &payload).unwrap()
    }

    #[test]
    fn test_catalog_sizes() {
        let table = [
            (SigningKeyType::DsaSha1, 128, 40),
            (SigningKeyType::EcdsaSha256P256, 64, 64),
            (SigningKeyType::EcdsaSha384P384, 96, 96),
            (SigningKeyType::EcdsaSha512P521, 132, 132),
            (SigningKeyType::RsaSha256_2048, 256, 256),
            (SigningKeyType::RsaSha384_3072, 384, 384),
            (SigningKeyType::RsaSha512_4096, 512, 512),
            (SigningKeyType::EdDsaSha512Ed25519, 32, 64),
            (SigningKeyType::RedDsaSha512Ed25519, 32, 64),
        ];
        for (scheme, key_size, signature_size) in table {
            assert_eq!(scheme.key_size(), key_size);
            assert_eq!(scheme.signature_size(), signature_size);
            assert_eq!(SigningKeyType::from_u16(scheme.to_u16()), Some(scheme));
        }
        assert_eq!(CryptoKeyType::ElGamal.key_size(), 256);
        assert_eq!(CryptoKeyType::EciesX25519.key_size(), 32);
    }

    #[test]
    fn test_from_certificate() {
        let cert = key_cert_bytes(7, 0);
        let key_cert = KeyCertificate::from_certificate(&cert).unwrap();
        assert_eq!(key_cert.signing_type(), SigningKeyType::EdDsaSha512Ed25519);
        assert_eq!(key_cert.crypto_type(), CryptoKeyType::ElGamal);
        assert_eq!(key_cert.signing_key_size(), 32);
        assert_eq!(key_cert.signature_size(), 64);
        assert_eq!(key_cert.to_certificate(), cert);
    }

    #[test]
    fn test_wrong_kind_rejected() {
        let cert = Certificate::new(CertificateKind::Null, &[]).unwrap();
        assert!(matches!(
            KeyCertificate::from_certificate(&cert),
            Err(Error::NotAKeyCertificate(0))
        ));
    }

    #[test]
    fn test_short_payload_rejected() {
        let cert = Certificate::new(CertificateKind::Key, &[0x00, 0x07]).unwrap();
        assert!(matches!(
            KeyCertificate::from_certificate(&cert),
            Err(Error::ShortInput {
                site: "key certificate",
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_types_rejected() {
        assert!(matches!(
            KeyCertificate::from_certificate(&key_cert_bytes(9, 0)),
            Err(Error::UnknownSigningKeyType(9))
        ));
        assert!(matches!(
            KeyCertificate::from_certificate(&key_cert_bytes(7, 2)),
            Err(Error::UnknownCryptoKeyType(2))
        ));
    }

    #[test]
    fn test_construct_signing_key_right_justified() {
        let key_cert = KeyCertificate::new(
            SigningKeyType::EdDsaSha512Ed25519,
            CryptoKeyType::ElGamal,
        );
        let mut slot = vec![0u8; 128];
        slot[96..].copy_from_slice(&[0x42; 32]);
        let key = key_cert.construct_signing_public_key(&slot).unwrap();
        assert_eq!(key.as_bytes(), &[0x42; 32]);
    }

    #[test]
    fn test_construct_signing_key_short_buffer() {
        let key_cert =
            KeyCertificate::new(SigningKeyType::DsaSha1, CryptoKeyType::ElGamal);
        assert!(matches!(
            key_cert.construct_signing_public_key(&[0u8; 64]),
            Err(Error::KeyLength {
                needed: 128,
                have: 64,
                ..
            })
        ));
    }

    #[test]
    fn test_construct_public_key_left_justified() {
        let key_cert = KeyCertificate::new(
            SigningKeyType::EdDsaSha512Ed25519,
            CryptoKeyType::EciesX25519,
        );
        let mut slot = vec![0u8; 256];
        slot[..32].copy_from_slice(&[0x17; 32]);
        let key = key_cert.construct_public_key(&slot).unwrap();
        assert_eq!(key.as_bytes(), &[0x17; 32]);
    }
}
