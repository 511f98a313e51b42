//! The I2P RouterInfo: a router's published network-database descriptor
//!
//! Wire form: RouterIdentity, published date, a 1-byte address count, that
//! many router addresses, a 1-byte peer count (always zero on the wire but
//! read and preserved), an options mapping, and a signature whose width the
//! identity's key certificate determines.
//!
//! Parsing returns the first hard error it meets; recoverable string and
//! mapping problems accumulate into the returned warning list.

use tracing::debug;

use crate::data::{Date, Hash};
use crate::keys_and_cert::RouterIdentity;
use crate::mapping::Mapping;
use crate::router_address::RouterAddress;
use crate::signature::Signature;
use crate::{Error, ParseWarning, Result};

/// Minimum size of a RouterInfo: identity, date, two counts, empty
/// mapping and a DSA-SHA1 signature
pub const ROUTER_INFO_MIN_SIZE: usize = 439;

/// Lowest 0.9.x patch version considered current
pub const MIN_GOOD_VERSION: u32 = 58;

/// Highest 0.9.x patch version considered current
pub const MAX_GOOD_VERSION: u32 = 99;

/// A parsed I2P RouterInfo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterInfo {
    router_identity: RouterIdentity,
    published: Date,
    addresses: Vec<RouterAddress>,
    peer_size: u8,
    options: Mapping,
    signature: Signature,
}

impl RouterInfo {
    /// Assemble a RouterInfo from explicit parts.
    ///
    /// The signature must have the width the identity's certificate
    /// declares.
    pub fn new(
        router_identity: RouterIdentity,
        published: Date,
        addresses: Vec<RouterAddress>,
        options: Mapping,
        signature: Signature,
    ) -> Result<RouterInfo> {
        if addresses.len() > u8::MAX as usize {
            return Err(Error::TooLong {
                site: "router info addresses",
                length: addresses.len(),
                limit: u8::MAX as usize,
            });
        }
        let signature_size = router_identity.signature_size();
        if signature.len() != signature_size {
            return Err(Error::KeyLength {
                scheme: "signature",
                needed: signature_size,
                have: signature.len(),
            });
        }
        Ok(RouterInfo {
            router_identity,
            published,
            addresses,
            peer_size: 0,
            options,
            signature,
        })
    }

    /// Read a RouterInfo from the front of `data`
    pub fn read(data: &[u8]) -> Result<(RouterInfo, &[u8], Vec<ParseWarning>)> {
        let mut warnings = Vec::new();

        let (router_identity, rest) = RouterIdentity::read(data)?;
        let (published, rest) = Date::read(rest)?;

        let (&address_count, mut rest) = rest.split_first().ok_or(Error::ShortInput {
            site: "router info address count",
            needed: 1,
            have: 0,
        })?;
        let mut addresses = Vec::with_capacity(address_count as usize);
        for _ in 0..address_count {
            let (address, more, address_warnings) = RouterAddress::read(rest)?;
            warnings.extend(address_warnings);
            addresses.push(address);
            rest = more;
        }

        let (&peer_size, rest) = rest.split_first().ok_or(Error::ShortInput {
            site: "router info peer size",
            needed: 1,
            have: 0,
        })?;

        let (options, rest, option_warnings) = Mapping::read(rest)?;
        warnings.extend(option_warnings);

        let (signature, remainder) = Signature::read(rest, router_identity.signature_size())?;

        debug!(
            addresses = addresses.len(),
            warnings = warnings.len(),
            "read router info"
        );
        Ok((
            RouterInfo {
                router_identity,
                published,
                addresses,
                peer_size,
                options,
                signature,
            },
            remainder,
            warnings,
        ))
    }

    /// Serialize in wire order
    pub fn bytes(&self) -> Result<Vec<u8>> {
        let mut out = self.router_identity.bytes();
        out.extend_from_slice(&self.published.bytes());
        out.push(self.addresses.len() as u8);
        for address in &self.addresses {
            out.extend_from_slice(&address.bytes()?);
        }
        out.push(self.peer_size);
        out.extend_from_slice(&self.options.bytes()?);
        out.extend_from_slice(self.signature.as_bytes());
        Ok(out)
    }

    pub fn router_identity(&self) -> &RouterIdentity {
        &self.router_identity
    }

    /// SHA-256 of the identity certificate's payload; the network-database
    /// key for this entry
    pub fn ident_hash(&self) -> Hash {
        Hash::of(self.router_identity.certificate().data())
    }

    pub fn published(&self) -> Date {
        self.published
    }

    pub fn router_address_count(&self) -> usize {
        self.addresses.len()
    }

    pub fn router_addresses(&self) -> &[RouterAddress] {
        &self.addresses
    }

    /// Unused on the wire; always zero in practice
    pub fn peer_size(&self) -> u8 {
        self.peer_size
    }

    pub fn options(&self) -> &Mapping {
        &self.options
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// The network name, for address-book style consumers
    pub fn network(&self) -> &'static str {
        "i2p"
    }

    /// Value of the `router.version` option
    pub fn router_version(&self) -> Option<String> {
        let value = self.options.get("router.version")?;
        value.as_str().ok().map(ToOwned::to_owned)
    }

    /// Value of the `caps` option
    pub fn router_capabilities(&self) -> Option<String> {
        let value = self.options.get("caps")?;
        value.as_str().ok().map(ToOwned::to_owned)
    }

    /// Whether the router runs a current 0.9.x release.
    ///
    /// True only for versions of exactly three dot-separated fields
    /// reading `0.9.n` with `n` between 58 and 99.
    pub fn good_version(&self) -> bool {
        let version = match self.router_version() {
            Some(version) => version,
            None => return false,
        };
        let fields: Vec<&str> = version.split('.').collect();
        if fields.len() != 3 {
            return false;
        }
        if fields[0] != "0" || fields[1] != "9" {
            return false;
        }
        match fields[2].parse::<u32>() {
            Ok(patch) => (MIN_GOOD_VERSION..=MAX_GOOD_VERSION).contains(&patch),
            Err(_) => false,
        }
    }

    /// Whether the capabilities carry none of the congestion flags K, G, E
    pub fn uncongested(&self) -> bool {
        let caps = self.router_capabilities().unwrap_or_default();
        !caps.contains('K') && !caps.contains('G') && !caps.contains('E')
    }

    /// Whether the capabilities claim reachability: R present, U absent
    pub fn reachable(&self) -> bool {
        let caps = self.router_capabilities().unwrap_or_default();
        !caps.contains('U') && caps.contains('R')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certificate::{Certificate, CertificateKind};
    use crate::key_certificate::{CryptoKeyType, KeyCertificate, SigningKeyType};
    use crate::keys::{PublicKey, SigningPublicKey};
    use crate::keys_and_cert::KeysAndCert;

    fn dsa_identity() -> RouterIdentity {
        let certificate = Certificate::new(CertificateKind::Null, &[]).unwrap();
        let public_key = PublicKey::from_bytes(CryptoKeyType::ElGamal, &[0x11; 256]).unwrap();
        let signing =
            SigningPublicKey::from_bytes(SigningKeyType::DsaSha1, &[0x22; 128]).unwrap();
        KeysAndCert::new(public_key, signing, certificate, None)
            .unwrap()
            .into()
    }

    fn ed25519_identity() -> RouterIdentity {
        let certificate =
            KeyCertificate::new(SigningKeyType::EdDsaSha512Ed25519, CryptoKeyType::ElGamal)
                .to_certificate();
        let public_key = PublicKey::from_bytes(CryptoKeyType::ElGamal, &[0x33; 256]).unwrap();
        let signing =
            SigningPublicKey::from_bytes(SigningKeyType::EdDsaSha512Ed25519, &[0x44; 32]).unwrap();
        KeysAndCert::new(public_key, signing, certificate, None)
            .unwrap()
            .into()
    }

    fn router_info_with_options(options: Mapping) -> RouterInfo {
        RouterInfo::new(
            dsa_identity(),
            Date::from_millis(1_691_836_722_000),
            Vec::new(),
            options,
            Signature::from_bytes(vec![0x66; 40]),
        )
        .unwrap()
    }

    #[test]
    fn test_roundtrip_with_addresses() {
        let address_options =
            Mapping::from_pairs([("host", "203.0.113.9"), ("port", "23456")]).unwrap();
        let address =
            RouterAddress::new(10, Date::from_millis(0), "NTCP2", address_options).unwrap();
        let options =
            Mapping::from_pairs([("caps", "LR"), ("router.version", "0.9.62")]).unwrap();
        let info = RouterInfo::new(
            ed25519_identity(),
            Date::from_millis(1_691_836_722_000),
            vec![address],
            options,
            Signature::from_bytes(vec![0x77; 64]),
        )
        .unwrap();

        let bytes = info.bytes().unwrap();
        let (parsed, remainder, warnings) = RouterInfo::read(&bytes).unwrap();
        assert!(remainder.is_empty());
        assert!(warnings.is_empty());
        assert_eq!(parsed, info);
        assert_eq!(parsed.router_address_count(), 1);
        assert_eq!(parsed.peer_size(), 0);
        assert_eq!(parsed.bytes().unwrap(), bytes);
    }

    #[test]
    fn test_minimal_router_info_size() {
        let info = router_info_with_options(Mapping::default());
        let bytes = info.bytes().unwrap();
        assert_eq!(bytes.len(), ROUTER_INFO_MIN_SIZE);
    }

    #[test]
    fn test_signature_width_follows_identity() {
        // Ed25519 identity demands a 64-byte signature
        let result = RouterInfo::new(
            ed25519_identity(),
            Date::from_millis(0),
            Vec::new(),
            Mapping::default(),
            Signature::from_bytes(vec![0x00; 40]),
        );
        assert!(matches!(
            result,
            Err(Error::KeyLength {
                scheme: "signature",
                needed: 64,
                have: 40,
            })
        ));
    }

    #[test]
    fn test_truncated_signature_hard_error() {
        let info = router_info_with_options(Mapping::default());
        let bytes = info.bytes().unwrap();
        assert!(matches!(
            RouterInfo::read(&bytes[..bytes.len() - 1]),
            Err(Error::ShortInput {
                site: "signature",
                ..
            })
        ));
    }

    #[test]
    fn test_ident_hash_covers_certificate_payload() {
        let info = RouterInfo::new(
            ed25519_identity(),
            Date::from_millis(0),
            Vec::new(),
            Mapping::default(),
            Signature::from_bytes(vec![0x00; 64]),
        )
        .unwrap();
        let expected = Hash::of(info.router_identity().certificate().data());
        assert_eq!(info.ident_hash(), expected);
        // KEY certificate payload: signing type 7, crypto type 0
        assert_eq!(
            info.router_identity().certificate().data(),
            &[0x00, 0x07, 0x00, 0x00]
        );
    }

    #[test]
    fn test_version_predicate_table() {
        let cases = [
            ("0.9.58", true),
            ("0.9.62", true),
            ("0.9.99", true),
            ("0.9.57", false),
            ("0.9.100", false),
            ("1.0.0", false),
            ("0.9", false),
            ("0.9.58.1", false),
            ("0.8.58", false),
            ("0.9.x", false),
        ];
        for (version, expected) in cases {
            let options = Mapping::from_pairs([("router.version", version)]).unwrap();
            let info = router_info_with_options(options);
            assert_eq!(info.good_version(), expected, "version {version}");
        }
        // no version option at all
        let info = router_info_with_options(Mapping::default());
        assert!(!info.good_version());
        assert_eq!(info.router_version(), None);
    }

    #[test]
    fn test_capability_predicates() {
        let cases = [
            ("LR", true, true),
            ("LU", true, false),
            ("KR", false, true),
            ("GR", false, true),
            ("ER", false, true),
            ("RU", true, false),
            ("L", true, false),
        ];
        for (caps, uncongested, reachable) in cases {
            let options = Mapping::from_pairs([("caps", caps)]).unwrap();
            let info = router_info_with_options(options);
            assert_eq!(info.uncongested(), uncongested, "caps {caps}");
            assert_eq!(info.reachable(), reachable, "caps {caps}");
        }
        // absent caps: nothing congested, nothing reachable
        let info = router_info_with_options(Mapping::default());
        assert!(info.uncongested());
        assert!(!info.reachable());
        assert_eq!(info.network(), "i2p");
    }

    #[test]
    fn test_mapping_warnings_surface() {
        let info = router_info_with_options(Mapping::default());
        let good = info.bytes().unwrap();
        // splice a mapping with a dangling key in place of the empty one:
        // [count=0][peer=0] then mapping then 40-byte signature
        let mapping_offset = good.len() - 40 - 2;
        let mut bytes = good[..mapping_offset].to_vec();
        bytes.extend_from_slice(&[0x00, 0x03, 0x01, b'a', 0xFF]);
        bytes.extend_from_slice(&[0x66; 40]);

        let (parsed, remainder, warnings) = RouterInfo::read(&bytes).unwrap();
        assert!(remainder.is_empty());
        assert_eq!(
            warnings,
            vec![ParseWarning::MalformedMappingEntry {
                reason: "expected '=' after key"
            }]
        );
        assert!(parsed.options().is_empty());
    }
}
