//! Primitive I2P data types: Integer, Date, I2PString and Hash
//!
//! Every reader consumes a prefix of the input slice and returns the parsed
//! value together with the remaining bytes. Parsed values own their bytes;
//! the remainder is a view into the caller's buffer.

use sha2::{Digest, Sha256};
use tracing::warn;

use crate::{Error, ParseWarning, Result};

/// Maximum width of an I2P Integer in bytes
pub const INTEGER_MAX_SIZE: usize = 8;

/// Width of an I2P Date in bytes
pub const DATE_SIZE: usize = 8;

/// Maximum number of payload bytes in an I2P String
pub const STRING_MAX_SIZE: usize = 255;

/// Width of an I2P Hash in bytes (SHA-256 output)
pub const HASH_SIZE: usize = 32;

/// An unsigned big-endian integer of declared width 1 to 8 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Integer {
    value: u64,
    size: usize,
}

impl Integer {
    /// Read an integer of `size` bytes from the front of `data`
    pub fn read(data: &[u8], size: usize) -> Result<(Integer, &[u8])> {
        if size == 0 || size > INTEGER_MAX_SIZE {
            return Err(Error::IntegerSize { size });
        }
        if data.len() < size {
            return Err(Error::ShortInput {
                site: "integer",
                needed: size,
                have: data.len(),
            });
        }
        let mut value = 0u64;
        for &byte in &data[..size] {
            value = (value << 8) | u64::from(byte);
        }
        Ok((Integer { value, size }, &data[size..]))
    }

    /// Build an integer of `size` bytes, failing if the value does not fit
    pub fn from_value(value: u64, size: usize) -> Result<Integer> {
        if size == 0 || size > INTEGER_MAX_SIZE {
            return Err(Error::IntegerSize { size });
        }
        if size < INTEGER_MAX_SIZE && value >= 1u64 << (8 * size) {
            return Err(Error::IntegerOverflow { value, size });
        }
        Ok(Integer { value, size })
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Big-endian wire form, exactly `size` bytes
    pub fn bytes(&self) -> Vec<u8> {
        self.value.to_be_bytes()[INTEGER_MAX_SIZE - self.size..].to_vec()
    }
}

/// Milliseconds since the Unix epoch, 8 bytes on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Date(u64);

impl Date {
    /// Read an 8-byte date from the front of `data`
    pub fn read(data: &[u8]) -> Result<(Date, &[u8])> {
        let (millis, remainder) = Integer::read(data, DATE_SIZE).map_err(|_| Error::ShortInput {
            site: "date",
            needed: DATE_SIZE,
            have: data.len(),
        })?;
        Ok((Date(millis.value()), remainder))
    }

    pub fn from_millis(millis: u64) -> Date {
        Date(millis)
    }

    pub fn millis(&self) -> u64 {
        self.0
    }

    pub fn bytes(&self) -> [u8; DATE_SIZE] {
        self.0.to_be_bytes()
    }

    /// The date as wall-clock time
    pub fn to_system_time(&self) -> std::time::SystemTime {
        std::time::UNIX_EPOCH + std::time::Duration::from_millis(self.0)
    }
}

/// A length-prefixed UTF-8 string of at most 255 payload bytes
///
/// The value holds the wire form: the length byte followed by the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct I2PString(Vec<u8>);

impl I2PString {
    /// Read a string from the front of `data`.
    ///
    /// If the declared length runs past the end of the input the available
    /// bytes are returned as-is with an empty remainder and a
    /// [`ParseWarning::StringShorterThanDeclared`]; the caller decides
    /// whether that is acceptable.
    pub fn read(data: &[u8]) -> Result<(I2PString, &[u8], Option<ParseWarning>)> {
        if data.is_empty() {
            return Err(Error::ShortInput {
                site: "string",
                needed: 1,
                have: 0,
            });
        }
        let declared = data[0] as usize;
        let total = declared + 1;
        if data.len() < total {
            let warning = ParseWarning::StringShorterThanDeclared {
                declared,
                actual: data.len() - 1,
            };
            warn!(declared, actual = data.len() - 1, "short string data");
            return Ok((I2PString(data.to_vec()), &data[data.len()..], Some(warning)));
        }
        Ok((I2PString(data[..total].to_vec()), &data[total..], None))
    }

    /// Build a string from UTF-8 text, failing above 255 payload bytes
    pub fn new(text: &str) -> Result<I2PString> {
        let payload = text.as_bytes();
        if payload.len() > STRING_MAX_SIZE {
            return Err(Error::TooLong {
                site: "string",
                length: payload.len(),
                limit: STRING_MAX_SIZE,
            });
        }
        let mut bytes = Vec::with_capacity(payload.len() + 1);
        bytes.push(payload.len() as u8);
        bytes.extend_from_slice(payload);
        Ok(I2PString(bytes))
    }

    /// Declared payload length, with a warning when it disagrees with the
    /// bytes actually held
    pub fn length(&self) -> (usize, Option<ParseWarning>) {
        let declared = self.0.first().copied().unwrap_or(0) as usize;
        let actual = self.0.len().saturating_sub(1);
        let warning = if declared > actual {
            Some(ParseWarning::StringShorterThanDeclared { declared, actual })
        } else if actual > declared {
            Some(ParseWarning::StringLongerThanDeclared { declared, actual })
        } else {
            None
        };
        (declared, warning)
    }

    /// Payload bytes, trimmed to the declared length where possible
    pub fn data(&self) -> &[u8] {
        let declared = self.0.first().copied().unwrap_or(0) as usize;
        let available = self.0.len().saturating_sub(1);
        &self.0[1..1 + declared.min(available)]
    }

    /// Payload as text
    pub fn as_str(&self) -> Result<&str> {
        std::str::from_utf8(self.data()).map_err(|_| Error::InvalidUtf8)
    }

    /// Full wire form including the length byte
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }
}

/// A 32-byte SHA-256 digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    /// Read a 32-byte hash from the front of `data`
    pub fn read(data: &[u8]) -> Result<(Hash, &[u8])> {
        if data.len() < HASH_SIZE {
            return Err(Error::ShortInput {
                site: "hash",
                needed: HASH_SIZE,
                have: data.len(),
            });
        }
        let mut bytes = [0u8; HASH_SIZE];
        bytes.copy_from_slice(&data[..HASH_SIZE]);
        Ok((Hash(bytes), &data[HASH_SIZE..]))
    }

    /// SHA-256 of arbitrary input
    pub fn of(data: &[u8]) -> Hash {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Hash(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }
}

impl From<[u8; HASH_SIZE]> for Hash {
    fn from(bytes: [u8; HASH_SIZE]) -> Hash {
        Hash(bytes)
    }
}
