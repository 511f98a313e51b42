//! The I2P RouterAddress: one way to reach a router
//!
//! Wire form: a 1-byte cost, an 8-byte expiration date, a transport-style
//! string and an options mapping.

use crate::data::{Date, I2PString};
use crate::mapping::Mapping;
use crate::{Error, ParseWarning, Result};

/// A transport endpoint advertised in a RouterInfo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterAddress {
    cost: u8,
    expiration: Date,
    transport: I2PString,
    options: Mapping,
}

impl RouterAddress {
    pub fn new(
        cost: u8,
        expiration: Date,
        transport: &str,
        options: Mapping,
    ) -> Result<RouterAddress> {
        Ok(RouterAddress {
            cost,
            expiration,
            transport: I2PString::new(transport)?,
            options,
        })
    }

    /// Read a router address from the front of `data`.
    ///
    /// String and mapping problems are collected into the returned warning
    /// list.
    pub fn read(data: &[u8]) -> Result<(RouterAddress, &[u8], Vec<ParseWarning>)> {
        let mut warnings = Vec::new();

        let (&cost, rest) = data.split_first().ok_or(Error::ShortInput {
            site: "router address",
            needed: 1,
            have: 0,
        })?;
        let (expiration, rest) = Date::read(rest)?;
        let (transport, rest, transport_warning) = I2PString::read(rest)?;
        warnings.extend(transport_warning);
        let (options, remainder, option_warnings) = Mapping::read(rest)?;
        warnings.extend(option_warnings);

        Ok((
            RouterAddress {
                cost,
                expiration,
                transport,
                options,
            },
            remainder,
            warnings,
        ))
    }

    /// Serialize in wire order
    pub fn bytes(&self) -> Result<Vec<u8>> {
        let mut out = vec![self.cost];
        out.extend_from_slice(&self.expiration.bytes());
        out.extend_from_slice(self.transport.bytes());
        out.extend_from_slice(&self.options.bytes()?);
        Ok(out)
    }

    /// Relative cost of this transport, lower is cheaper
    pub fn cost(&self) -> u8 {
        self.cost
    }

    /// Expiration date, unused in practice and normally zero
    pub fn expiration(&self) -> Date {
        self.expiration
    }

    /// Transport style, e.g. `NTCP2` or `SSU2`
    pub fn transport_style(&self) -> &I2PString {
        &self.transport
    }

    pub fn options(&self) -> &Mapping {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let options = Mapping::from_pairs([("host", "198.51.100.7"), ("port", "12345")]).unwrap();
        let address = RouterAddress::new(10, Date::from_millis(0), "NTCP2", options).unwrap();

        let bytes = address.bytes().unwrap();
        let (parsed, remainder, warnings) = RouterAddress::read(&bytes).unwrap();
        assert!(remainder.is_empty());
        assert!(warnings.is_empty());
        assert_eq!(parsed, address);
        assert_eq!(parsed.cost(), 10);
        assert_eq!(parsed.transport_style().as_str().unwrap(), "NTCP2");
        assert_eq!(parsed.options().get("port").unwrap().data(), b"12345");
    }

    #[test]
    fn test_field_order() {
        let address = RouterAddress::new(
            4,
            Date::from_millis(0x0102030405060708),
            "SSU2",
            Mapping::default(),
        )
        .unwrap();
        let bytes = address.bytes().unwrap();
        assert_eq!(bytes[0], 4);
        assert_eq!(&bytes[1..9], &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(&bytes[9..14], &[4, b'S', b'S', b'U', b'2']);
        assert_eq!(&bytes[14..], &[0, 0]); // empty mapping
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            RouterAddress::read(&[]),
            Err(Error::ShortInput {
                site: "router address",
                ..
            })
        ));
    }

    #[test]
    fn test_mapping_warnings_propagate() {
        // valid cost, date and transport, then a mapping whose entry is cut
        let mut bytes = vec![1];
        bytes.extend_from_slice(&[0u8; 8]);
        bytes.extend_from_slice(&[4, b'S', b'S', b'U', b'2']);
        bytes.extend_from_slice(&[0x00, 0x03, 0x01, b'a', 0xFF]); // key then junk
        let (_, _, warnings) = RouterAddress::read(&bytes).unwrap();
        assert_eq!(
            warnings,
            vec![ParseWarning::MalformedMappingEntry {
                reason: "expected '=' after key"
            }]
        );
    }
}
