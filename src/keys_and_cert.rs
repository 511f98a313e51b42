//! KeysAndCert and its two usage aliases, RouterIdentity and Destination
//!
//! The wire form is a 256-byte public-key slot, a 128-byte signing-key slot
//! and a trailing certificate, at least 387 bytes in total. The certificate
//! governs how the 384 key bytes are split:
//!
//! - the crypto public key occupies the first bytes of the public-key slot;
//! - the signing public key occupies the last bytes of the signing-key
//!   slot, so shorter keys are preceded by padding;
//! - a signing key wider than 128 bytes extends backward into the tail of
//!   the public-key slot.
//!
//! Padding bytes are retained so re-serialization reproduces the input
//! exactly.

use crate::certificate::{Certificate, CertificateKind};
use crate::key_certificate::{CryptoKeyType, KeyCertificate, SigningKeyType};
use crate::keys::{PublicKey, SigningPublicKey};
use crate::{Error, Result};

/// Width of the public-key slot
pub const KEYS_AND_CERT_PUBKEY_SIZE: usize = 256;

/// Width of the signing-key slot
pub const KEYS_AND_CERT_SPK_SIZE: usize = 128;

/// Combined width of the two key slots
pub const KEYS_AND_CERT_DATA_SIZE: usize = KEYS_AND_CERT_PUBKEY_SIZE + KEYS_AND_CERT_SPK_SIZE;

/// Minimum total size: both slots plus a minimal certificate
pub const KEYS_AND_CERT_MIN_SIZE: usize = 387;

/// The key block and trailing certificate shared by identities and
/// destinations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeysAndCert {
    public_key: PublicKey,
    padding: Vec<u8>,
    signing_public_key: SigningPublicKey,
    certificate: Certificate,
}

impl KeysAndCert {
    /// Assemble a KeysAndCert from explicit parts.
    ///
    /// The certificate's declared key types must match the supplied key
    /// values; a non-KEY certificate implies the legacy DSA-SHA1 and
    /// ElGamal defaults. `padding` must fill the key block exactly when
    /// given and defaults to zeros.
    pub fn new(
        public_key: PublicKey,
        signing_public_key: SigningPublicKey,
        certificate: Certificate,
        padding: Option<Vec<u8>>,
    ) -> Result<KeysAndCert> {
        let (signing_type, crypto_type) = declared_types(&certificate)?;
        if signing_type != signing_public_key.key_type() {
            return Err(Error::CertificateKeyMismatch {
                expected: signing_type.name(),
                found: signing_public_key.key_type().name(),
            });
        }
        if crypto_type != public_key.key_type() {
            return Err(Error::CertificateKeyMismatch {
                expected: crypto_type.name(),
                found: public_key.key_type().name(),
            });
        }

        let signing_size = signing_type.key_size();
        let crypto_size = crypto_type.key_size();
        if signing_size + crypto_size > KEYS_AND_CERT_DATA_SIZE {
            return Err(Error::KeyLayoutConflict {
                signing: signing_size,
                crypto: crypto_size,
            });
        }
        let padding_size = KEYS_AND_CERT_DATA_SIZE - signing_size - crypto_size;
        let padding = match padding {
            Some(padding) => {
                if padding.len() != padding_size {
                    return Err(Error::KeyLength {
                        scheme: "padding",
                        needed: padding_size,
                        have: padding.len(),
                    });
                }
                padding
            }
            None => vec![0u8; padding_size],
        };

        Ok(KeysAndCert {
            public_key,
            padding,
            signing_public_key,
            certificate,
        })
    }

    /// Read a KeysAndCert from the front of `data`.
    ///
    /// The remainder is whatever follows the certificate's declared
    /// payload.
    pub fn read(data: &[u8]) -> Result<(KeysAndCert, &[u8])> {
        if data.len() < KEYS_AND_CERT_MIN_SIZE {
            return Err(Error::ShortInput {
                site: "keys and cert",
                needed: KEYS_AND_CERT_MIN_SIZE,
                have: data.len(),
            });
        }
        let keys = &data[..KEYS_AND_CERT_DATA_SIZE];
        let (certificate, remainder) = Certificate::read(&data[KEYS_AND_CERT_DATA_SIZE..])?;
        let certificate = certificate.trimmed();

        let (signing_type, crypto_type) = declared_types(&certificate)?;
        let signing_size = signing_type.key_size();
        let crypto_size = crypto_type.key_size();
        if signing_size + crypto_size > KEYS_AND_CERT_DATA_SIZE {
            return Err(Error::KeyLayoutConflict {
                signing: signing_size,
                crypto: crypto_size,
            });
        }

        let signing_start = KEYS_AND_CERT_DATA_SIZE - signing_size;
        let public_key = PublicKey::from_bytes(crypto_type, &keys[..crypto_size])?;
        let signing_public_key =
            SigningPublicKey::from_bytes(signing_type, &keys[signing_start..])?;
        let padding = keys[crypto_size..signing_start].to_vec();

        Ok((
            KeysAndCert {
                public_key,
                padding,
                signing_public_key,
                certificate,
            },
            remainder,
        ))
    }

    /// Serialize: public key, padding, signing key, certificate
    pub fn bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(KEYS_AND_CERT_MIN_SIZE);
        out.extend_from_slice(self.public_key.as_bytes());
        out.extend_from_slice(&self.padding);
        out.extend_from_slice(self.signing_public_key.as_bytes());
        out.extend_from_slice(&self.certificate.bytes());
        out
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn signing_public_key(&self) -> &SigningPublicKey {
        &self.signing_public_key
    }

    pub fn certificate(&self) -> &Certificate {
        &self.certificate
    }

    /// The key certificate, when the trailing certificate has kind KEY
    pub fn key_certificate(&self) -> Option<KeyCertificate> {
        if self.certificate.kind() == CertificateKind::Key {
            KeyCertificate::from_certificate(&self.certificate).ok()
        } else {
            None
        }
    }

    /// Signature width for structures signed under this identity's scheme
    pub fn signature_size(&self) -> usize {
        self.signing_public_key.key_type().signature_size()
    }
}

/// Key types declared by the trailing certificate, with legacy defaults for
/// non-KEY certificates
fn declared_types(certificate: &Certificate) -> Result<(SigningKeyType, CryptoKeyType)> {
    if certificate.kind() == CertificateKind::Key {
        let key_certificate = KeyCertificate::from_certificate(certificate)?;
        Ok((
            key_certificate.signing_type(),
            key_certificate.crypto_type(),
        ))
    } else {
        Ok((SigningKeyType::DsaSha1, CryptoKeyType::ElGamal))
    }
}

macro_rules! keys_and_cert_alias {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(KeysAndCert);

        impl $name {
            /// Read from the front of `data`
            pub fn read(data: &[u8]) -> Result<($name, &[u8])> {
                let (inner, remainder) = KeysAndCert::read(data)?;
                Ok(($name(inner), remainder))
            }

            pub fn bytes(&self) -> Vec<u8> {
                self.0.bytes()
            }

            pub fn public_key(&self) -> &PublicKey {
                self.0.public_key()
            }

            pub fn signing_public_key(&self) -> &SigningPublicKey {
                self.0.signing_public_key()
            }

            pub fn certificate(&self) -> &Certificate {
                self.0.certificate()
            }

            pub fn key_certificate(&self) -> Option<KeyCertificate> {
                self.0.key_certificate()
            }

            pub fn signature_size(&self) -> usize {
                self.0.signature_size()
            }

            pub fn keys_and_cert(&self) -> &KeysAndCert {
                &self.0
            }
        }

        impl From<KeysAndCert> for $name {
            fn from(inner: KeysAndCert) -> $name {
                $name(inner)
            }
        }
    };
}

keys_and_cert_alias!(
    /// A router's public identity; structurally a [`KeysAndCert`]
    RouterIdentity
);

keys_and_cert_alias!(
    /// An endpoint's public identity; structurally a [`KeysAndCert`]
    Destination
);
