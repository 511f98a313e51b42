//! The I2P Signature: an opaque byte sequence whose length is not
//! self-describing
//!
//! Signature width is inferred from context, normally the key certificate
//! of the enclosing structure. Callers pass the expected width to
//! [`Signature::read`]; when no key certificate is present the legacy
//! DSA-SHA1 width of 40 bytes applies.

use crate::{Error, Result};

/// A detached signature of caller-determined width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature(Vec<u8>);

impl Signature {
    /// Read `size` signature bytes from the front of `data`
    pub fn read(data: &[u8], size: usize) -> Result<(Signature, &[u8])> {
        if data.len() < size {
            return Err(Error::ShortInput {
                site: "signature",
                needed: size,
                have: data.len(),
            });
        }
        Ok((Signature(data[..size].to_vec()), &data[size..]))
    }

    /// Wrap raw signature bytes the caller vouches for
    pub fn from_bytes(bytes: Vec<u8>) -> Signature {
        Signature(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key_certificate::DEFAULT_SIGNATURE_SIZE;

    #[test]
    fn test_read_default_width() {
        let mut data = vec![0x55; DEFAULT_SIGNATURE_SIZE];
        data.extend_from_slice(&[0xAA, 0xBB]);
        let (signature, remainder) = Signature::read(&data, DEFAULT_SIGNATURE_SIZE).unwrap();
        assert_eq!(signature.len(), DEFAULT_SIGNATURE_SIZE);
        assert_eq!(signature.as_bytes(), &[0x55; 40]);
        assert_eq!(remainder, &[0xAA, 0xBB]);
    }

    #[test]
    fn test_read_insufficient_data() {
        assert!(matches!(
            Signature::read(&[0u8; 39], DEFAULT_SIGNATURE_SIZE),
            Err(Error::ShortInput {
                site: "signature",
                needed: 40,
                have: 39,
            })
        ));
    }

    #[test]
    fn test_read_caller_supplied_width() {
        let data = [0x01; 64];
        let (signature, remainder) = Signature::read(&data, 64).unwrap();
        assert_eq!(signature.len(), 64);
        assert!(remainder.is_empty());
    }
}
