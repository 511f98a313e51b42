//! The I2P LeaseSet: a destination's currently authorized leases
//!
//! Wire form: Destination, a 256-byte encryption public key, the signing
//! public key (128 bytes, or wider when the destination's key certificate
//! declares an oversized scheme), a 1-byte lease count, the leases, and a
//! trailing signature whose width the destination's key certificate
//! determines. Field widths are threaded from the parsed destination; the
//! signature is never self-describing.

use tracing::warn;

use crate::data::Date;
use crate::key_certificate::SigningKeyType;
use crate::keys::SigningPublicKey;
use crate::keys_and_cert::Destination;
use crate::lease::Lease;
use crate::signature::Signature;
use crate::{Error, ParseWarning, Result};

/// Width of the encryption public key field
pub const LEASE_SET_PUBKEY_SIZE: usize = 256;

/// Base width of the signing public key field
pub const LEASE_SET_SPK_SIZE: usize = 128;

/// Maximum number of leases in a valid lease set
pub const MAX_LEASE_COUNT: usize = 16;

/// A parsed I2P LeaseSet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaseSet {
    destination: Destination,
    encryption_key: Box<[u8; LEASE_SET_PUBKEY_SIZE]>,
    signing_key_padding: Vec<u8>,
    signing_public_key: SigningPublicKey,
    leases: Vec<Lease>,
    signature: Signature,
}

impl LeaseSet {
    /// Assemble a lease set from explicit parts.
    ///
    /// The signing key scheme must match the destination's declared scheme
    /// and the signature must have that scheme's width; at most 16 leases.
    pub fn new(
        destination: Destination,
        encryption_key: [u8; LEASE_SET_PUBKEY_SIZE],
        signing_public_key: SigningPublicKey,
        leases: Vec<Lease>,
        signature: Signature,
    ) -> Result<LeaseSet> {
        if leases.len() > MAX_LEASE_COUNT {
            return Err(Error::TooManyLeases {
                count: leases.len(),
            });
        }
        let declared = destination.signing_public_key().key_type();
        if signing_public_key.key_type() != declared {
            return Err(Error::CertificateKeyMismatch {
                expected: declared.name(),
                found: signing_public_key.key_type().name(),
            });
        }
        let signature_size = destination.signature_size();
        if signature.len() != signature_size {
            return Err(Error::KeyLength {
                scheme: "signature",
                needed: signature_size,
                have: signature.len(),
            });
        }
        let field_size = declared.key_size().max(LEASE_SET_SPK_SIZE);
        let signing_key_padding = vec![0u8; field_size - declared.key_size()];
        Ok(LeaseSet {
            destination,
            encryption_key: Box::new(encryption_key),
            signing_key_padding,
            signing_public_key,
            leases,
            signature,
        })
    }

    /// Read a lease set from the front of `data`.
    ///
    /// A lease count above 16 is reported as a warning and all declared
    /// leases are still parsed; missing lease or signature bytes are hard
    /// errors.
    pub fn read(data: &[u8]) -> Result<(LeaseSet, &[u8], Vec<ParseWarning>)> {
        let mut warnings = Vec::new();

        let (destination, rest) = Destination::read(data)?;
        if rest.len() < LEASE_SET_PUBKEY_SIZE {
            return Err(Error::ShortInput {
                site: "lease set encryption key",
                needed: LEASE_SET_PUBKEY_SIZE,
                have: rest.len(),
            });
        }
        let mut encryption_key = Box::new([0u8; LEASE_SET_PUBKEY_SIZE]);
        encryption_key.copy_from_slice(&rest[..LEASE_SET_PUBKEY_SIZE]);
        let rest = &rest[LEASE_SET_PUBKEY_SIZE..];

        // widths come from the destination's certificate
        let declared = destination.signing_public_key().key_type();
        let field_size = declared.key_size().max(LEASE_SET_SPK_SIZE);
        if rest.len() < field_size {
            return Err(Error::ShortInput {
                site: "lease set signing key",
                needed: field_size,
                have: rest.len(),
            });
        }
        let field = &rest[..field_size];
        let signing_public_key = match destination.key_certificate() {
            Some(key_certificate) => key_certificate.construct_signing_public_key(field)?,
            None => SigningPublicKey::from_bytes(SigningKeyType::DsaSha1, field)?,
        };
        let signing_key_padding = field[..field_size - declared.key_size()].to_vec();
        let rest = &rest[field_size..];

        let (&count, mut rest) = rest.split_first().ok_or(Error::ShortInput {
            site: "lease count",
            needed: 1,
            have: 0,
        })?;
        let count = count as usize;
        if count > MAX_LEASE_COUNT {
            warn!(count, "lease set declares more than 16 leases");
            warnings.push(ParseWarning::TooManyLeases { count });
        }
        let mut leases = Vec::with_capacity(count.min(MAX_LEASE_COUNT));
        for _ in 0..count {
            let (lease, more) = Lease::read(rest)?;
            leases.push(lease);
            rest = more;
        }

        let (signature, remainder) = Signature::read(rest, destination.signature_size())?;

        Ok((
            LeaseSet {
                destination,
                encryption_key,
                signing_key_padding,
                signing_public_key,
                leases,
                signature,
            },
            remainder,
            warnings,
        ))
    }

    /// Serialize in wire order
    pub fn bytes(&self) -> Vec<u8> {
        let mut out = self.destination.bytes();
        out.extend_from_slice(self.encryption_key.as_slice());
        out.extend_from_slice(&self.signing_key_padding);
        out.extend_from_slice(self.signing_public_key.as_bytes());
        out.push(self.leases.len() as u8);
        for lease in &self.leases {
            out.extend_from_slice(lease.as_bytes());
        }
        out.extend_from_slice(self.signature.as_bytes());
        out
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn encryption_key(&self) -> &[u8; LEASE_SET_PUBKEY_SIZE] {
        &self.encryption_key
    }

    /// The revocation signing key carried in the lease set itself
    pub fn signing_public_key(&self) -> &SigningPublicKey {
        &self.signing_public_key
    }

    pub fn lease_count(&self) -> usize {
        self.leases.len()
    }

    pub fn leases(&self) -> &[Lease] {
        &self.leases
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Latest lease expiration.
    ///
    /// Folds over the leases starting from the epoch, so any real date
    /// wins and ties keep the earlier-encountered lease; an empty lease
    /// set yields the epoch itself.
    pub fn newest_expiration(&self) -> Date {
        let mut newest = Date::from_millis(0);
        for lease in &self.leases {
            let date = lease.end_date();
            if date.millis() > newest.millis() {
                newest = date;
            }
        }
        newest
    }

    /// Earliest lease expiration.
    ///
    /// Folds starting from the maximum representable date; an empty lease
    /// set yields that sentinel.
    pub fn oldest_expiration(&self) -> Date {
        let mut oldest = Date::from_millis(u64::MAX);
        for lease in &self.leases {
            let date = lease.end_date();
            if date.millis() < oldest.millis() {
                oldest = date;
            }
        }
        oldest
    }

    /// Verify the trailing signature with the destination's signing key
    pub fn verify(&self) -> Result<()> {
        let verifier = self.destination.signing_public_key().verifier()?;
        let mut signed = self.bytes();
        signed.truncate(signed.len() - self.signature.len());
        verifier.verify(&signed, self.signature.as_bytes())
    }
}
