//! The I2P Certificate: a tagged container framed as `kind ‖ length ‖ payload`
//!
//! Certificates close every KeysAndCert and discriminate how the preceding
//! key material is interpreted. Bytes past the declared payload length are
//! "excess": they belong to whatever structure follows the certificate, so
//! [`Certificate::read`] hands them back as the remainder while the parsed
//! value keeps them for byte-exact reconstruction via
//! [`Certificate::raw_bytes`].

use crate::data::Integer;
use crate::{Error, Result};

/// Minimum size of a certificate: one kind byte plus a 2-byte length
pub const CERT_MIN_SIZE: usize = 3;

/// Certificate kind enumeration
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateKind {
    Null = 0,
    HashCash = 1,
    Hidden = 2,
    Signed = 3,
    Multiple = 4,
    Key = 5,
}

impl CertificateKind {
    /// Parse from wire format byte
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Null),
            1 => Some(Self::HashCash),
            2 => Some(Self::Hidden),
            3 => Some(Self::Signed),
            4 => Some(Self::Multiple),
            5 => Some(Self::Key),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_u8(self) -> u8 {
        self as u8
    }
}

/// An I2P Certificate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    kind: CertificateKind,
    length: usize,
    payload: Vec<u8>,
}

impl Certificate {
    /// Build a certificate; the declared length is recomputed from the
    /// payload. NULL certificates must carry no payload.
    pub fn new(kind: CertificateKind, payload: &[u8]) -> Result<Certificate> {
        if kind == CertificateKind::Null && !payload.is_empty() {
            return Err(Error::NullCertificateWithPayload);
        }
        if payload.len() > u16::MAX as usize {
            return Err(Error::TooLong {
                site: "certificate",
                length: payload.len(),
                limit: u16::MAX as usize,
            });
        }
        Ok(Certificate {
            kind,
            length: payload.len(),
            payload: payload.to_vec(),
        })
    }

    /// Read a certificate from the front of `data`.
    ///
    /// The remainder is any excess past the declared payload length. The
    /// parsed value also retains the excess so `raw_bytes` reproduces the
    /// input exactly.
    pub fn read(data: &[u8]) -> Result<(Certificate, &[u8])> {
        if data.len() < CERT_MIN_SIZE {
            return Err(Error::ShortInput {
                site: "certificate",
                needed: CERT_MIN_SIZE,
                have: data.len(),
            });
        }
        let kind =
            CertificateKind::from_u8(data[0]).ok_or(Error::UnknownCertificateKind(data[0]))?;
        let (length, payload) = Integer::read(&data[1..], 2)?;
        let length = length.value() as usize;
        if length > payload.len() {
            return Err(Error::LengthExceedsData {
                site: "certificate",
                declared: length,
                available: payload.len(),
            });
        }
        let certificate = Certificate {
            kind,
            length,
            payload: payload.to_vec(),
        };
        Ok((certificate, &data[CERT_MIN_SIZE + length..]))
    }

    pub fn kind(&self) -> CertificateKind {
        self.kind
    }

    /// Declared payload length
    pub fn length(&self) -> usize {
        self.length
    }

    /// Payload trimmed to the declared length
    pub fn data(&self) -> &[u8] {
        &self.payload[..self.length.min(self.payload.len())]
    }

    /// Bytes held past the declared payload length
    pub fn excess_bytes(&self) -> &[u8] {
        if self.payload.len() > self.length {
            &self.payload[self.length..]
        } else {
            &[]
        }
    }

    /// Wire form with the payload trimmed to the declared length
    pub fn bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(CERT_MIN_SIZE + self.length);
        out.push(self.kind.to_u8());
        out.extend_from_slice(&(self.length as u16).to_be_bytes());
        out.extend_from_slice(self.data());
        out
    }

    /// Wire form including any excess payload, for lossless round-trips
    pub fn raw_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(CERT_MIN_SIZE + self.payload.len());
        out.push(self.kind.to_u8());
        out.extend_from_slice(&(self.length as u16).to_be_bytes());
        out.extend_from_slice(&self.payload);
        out
    }

    /// Copy of this certificate without any excess payload.
    ///
    /// Composite parsers keep the trimmed form: excess bytes belong to the
    /// structure that follows the certificate, not to the certificate.
    pub fn trimmed(&self) -> Certificate {
        Certificate {
            kind: self.kind,
            length: self.length,
            payload: self.data().to_vec(),
        }
    }

    /// Signing key type declared by a KEY certificate's payload
    pub fn signature_type(&self) -> Result<u16> {
        if self.kind != CertificateKind::Key {
            return Err(Error::NotAKeyCertificate(self.kind.to_u8()));
        }
        if self.data().len() < 2 {
            return Err(Error::ShortInput {
                site: "key certificate",
                needed: 2,
                have: self.data().len(),
            });
        }
        Ok(u16::from_be_bytes([self.data()[0], self.data()[1]]))
    }
}
