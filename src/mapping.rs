//! The I2P Mapping: a length-prefixed set of `key=value;` string pairs
//!
//! On the wire a mapping is a 2-byte big-endian body length followed by
//! zero or more entries, each an I2P String key, a literal `=`, an I2P
//! String value and a literal `;`. Serialization sorts entries by the byte
//! order of their keys so equal mappings always produce identical bytes.
//!
//! Routers in the wild emit malformed mappings; parsing therefore collects
//! entry-level problems into a warning list and still returns whatever was
//! readable instead of failing on the first bad entry.

use tracing::warn;

use crate::data::{I2PString, Integer};
use crate::{Error, ParseWarning, Result};

const KEY_VALUE_SEPARATOR: u8 = 0x3D; // '='
const ENTRY_TERMINATOR: u8 = 0x3B; // ';'

/// A parsed I2P Mapping; entries are kept in parse order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    entries: Vec<(I2PString, I2PString)>,
}

impl Mapping {
    /// Build a mapping from string pairs, rejecting duplicate keys
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Mapping>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut entries: Vec<(I2PString, I2PString)> = Vec::new();
        for (key, value) in pairs {
            let key = I2PString::new(key)?;
            let value = I2PString::new(value)?;
            if entries.iter().any(|(k, _)| k.data() == key.data()) {
                return Err(Error::DuplicateMappingKey(
                    String::from_utf8_lossy(key.data()).into_owned(),
                ));
            }
            entries.push((key, value));
        }
        Ok(Mapping { entries })
    }

    /// Read a mapping from the front of `data`.
    ///
    /// Malformed entries and duplicate keys are reported through the
    /// returned warning list; the mapping holds every entry that could be
    /// recovered.
    pub fn read(data: &[u8]) -> Result<(Mapping, &[u8], Vec<ParseWarning>)> {
        let (size, rest) = Integer::read(data, 2).map_err(|_| Error::ShortInput {
            site: "mapping",
            needed: 2,
            have: data.len(),
        })?;
        let declared = size.value() as usize;
        if rest.len() < declared {
            return Err(Error::LengthExceedsData {
                site: "mapping",
                declared,
                available: rest.len(),
            });
        }
        let body = &rest[..declared];
        let remainder = &rest[declared..];

        let mut entries: Vec<(I2PString, I2PString)> = Vec::new();
        let mut warnings = Vec::new();
        let mut cursor = body;
        while !cursor.is_empty() {
            let (key, after_key, key_warning) = I2PString::read(cursor)?;
            if let Some(warning) = key_warning {
                warn!(%warning, "mapping key truncated");
                warnings.push(warning);
                break;
            }
            match after_key.first() {
                Some(&KEY_VALUE_SEPARATOR) => {}
                _ => {
                    warnings.push(ParseWarning::MalformedMappingEntry {
                        reason: "expected '=' after key",
                    });
                    break;
                }
            }
            let (value, after_value, value_warning) = I2PString::read(&after_key[1..])?;
            if let Some(warning) = value_warning {
                warn!(%warning, "mapping value truncated");
                warnings.push(warning);
                break;
            }
            let terminated = matches!(after_value.first(), Some(&ENTRY_TERMINATOR));
            if entries.iter().any(|(k, _)| k.data() == key.data()) {
                warnings.push(ParseWarning::DuplicateMappingKey {
                    key: String::from_utf8_lossy(key.data()).into_owned(),
                });
            }
            entries.push((key, value));
            if !terminated {
                warnings.push(ParseWarning::MalformedMappingEntry {
                    reason: "expected ';' after value",
                });
                break;
            }
            cursor = &after_value[1..];
        }

        Ok((Mapping { entries }, remainder, warnings))
    }

    /// Serialize the mapping, sorted by key bytes.
    ///
    /// The output is deterministic: two mappings holding the same entries
    /// produce identical byte strings. Duplicate keys are rejected.
    pub fn bytes(&self) -> Result<Vec<u8>> {
        let mut sorted: Vec<&(I2PString, I2PString)> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.0.data().cmp(b.0.data()));
        for pair in sorted.windows(2) {
            if pair[0].0.data() == pair[1].0.data() {
                return Err(Error::DuplicateMappingKey(
                    String::from_utf8_lossy(pair[0].0.data()).into_owned(),
                ));
            }
        }

        let mut body = Vec::new();
        for (key, value) in sorted {
            body.extend_from_slice(key.bytes());
            body.push(KEY_VALUE_SEPARATOR);
            body.extend_from_slice(value.bytes());
            body.push(ENTRY_TERMINATOR);
        }
        if body.len() > u16::MAX as usize {
            return Err(Error::TooLong {
                site: "mapping",
                length: body.len(),
                limit: u16::MAX as usize,
            });
        }

        let mut out = Vec::with_capacity(2 + body.len());
        out.extend_from_slice(&(body.len() as u16).to_be_bytes());
        out.extend_from_slice(&body);
        Ok(out)
    }

    /// First value stored under `key`, in parse order
    pub fn get(&self, key: &str) -> Option<&I2PString> {
        self.entries
            .iter()
            .find(|(k, _)| k.data() == key.as_bytes())
            .map(|(_, v)| v)
    }

    pub fn entries(&self) -> &[(I2PString, I2PString)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any key appears more than once (possible after parsing)
    pub fn has_duplicate_keys(&self) -> bool {
        self.entries.iter().enumerate().any(|(i, (key, _))| {
            self.entries[..i].iter().any(|(k, _)| k.data() == key.data())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_serialize_two_entries() {
        let mapping = Mapping::from_pairs([("a", "1"), ("b", "2")]).unwrap();
        let expected = [
            0x00, 0x0C, // body length
            0x01, b'a', 0x3D, 0x01, b'1', 0x3B, // a=1;
            0x01, b'b', 0x3D, 0x01, b'2', 0x3B, // b=2;
        ];
        assert_eq!(mapping.bytes().unwrap(), expected);
    }

    #[test]
    fn test_serialize_sorts_by_key_bytes() {
        let forward = Mapping::from_pairs([("a", "1"), ("b", "2")]).unwrap();
        let reverse = Mapping::from_pairs([("b", "2"), ("a", "1")]).unwrap();
        assert_eq!(forward.bytes().unwrap(), reverse.bytes().unwrap());
    }

    #[test]
    fn test_roundtrip() {
        let mapping =
            Mapping::from_pairs([("caps", "LU"), ("netId", "2"), ("router.version", "0.9.59")])
                .unwrap();
        let bytes = mapping.bytes().unwrap();
        let (parsed, remainder, warnings) = Mapping::read(&bytes).unwrap();
        assert!(remainder.is_empty());
        assert!(warnings.is_empty());
        assert_eq!(parsed.bytes().unwrap(), bytes);
        assert_eq!(parsed.get("caps").unwrap().data(), b"LU");
        assert_eq!(parsed.get("missing"), None);
    }

    #[test]
    fn test_empty_mapping() {
        let (parsed, remainder, warnings) = Mapping::read(&[0x00, 0x00, 0xAA]).unwrap();
        assert!(parsed.is_empty());
        assert_eq!(remainder, &[0xAA]);
        assert!(warnings.is_empty());
        assert_eq!(parsed.bytes().unwrap(), vec![0x00, 0x00]);
    }

    #[test]
    fn test_declared_length_exceeds_data() {
        assert!(matches!(
            Mapping::read(&[0x00, 0x10, 0x01]),
            Err(Error::LengthExceedsData { site: "mapping", .. })
        ));
    }

    #[test]
    fn test_missing_separator_collected() {
        // key "a" followed by junk instead of '='
        let body = [0x01, b'a', 0xFF];
        let mut data = vec![0x00, body.len() as u8];
        data.extend_from_slice(&body);
        let (parsed, _, warnings) = Mapping::read(&data).unwrap();
        assert!(parsed.is_empty());
        assert_eq!(
            warnings,
            vec![ParseWarning::MalformedMappingEntry {
                reason: "expected '=' after key"
            }]
        );
    }

    #[test]
    fn test_missing_terminator_keeps_entry() {
        // a=1 without the trailing ';'
        let body = [0x01, b'a', 0x3D, 0x01, b'1'];
        let mut data = vec![0x00, body.len() as u8];
        data.extend_from_slice(&body);
        let (parsed, _, warnings) = Mapping::read(&data).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.get("a").unwrap().data(), b"1");
        assert_eq!(
            warnings,
            vec![ParseWarning::MalformedMappingEntry {
                reason: "expected ';' after value"
            }]
        );
    }

    #[test]
    fn test_duplicate_keys_warn_but_parse() {
        let body = [
            0x01, b'a', 0x3D, 0x01, b'1', 0x3B, // a=1;
            0x01, b'a', 0x3D, 0x01, b'2', 0x3B, // a=2;
        ];
        let mut data = vec![0x00, body.len() as u8];
        data.extend_from_slice(&body);
        let (parsed, _, warnings) = Mapping::read(&data).unwrap();
        assert_eq!(parsed.len(), 2);
        // first value wins on lookup
        assert_eq!(parsed.get("a").unwrap().data(), b"1");
        assert!(parsed.has_duplicate_keys());
        assert_eq!(
            warnings,
            vec![ParseWarning::DuplicateMappingKey { key: "a".into() }]
        );
        // and the serializer refuses them
        assert!(matches!(
            parsed.bytes(),
            Err(Error::DuplicateMappingKey(key)) if key == "a"
        ));
    }

    #[test]
    fn test_from_pairs_rejects_duplicates() {
        assert!(matches!(
            Mapping::from_pairs([("a", "1"), ("a", "2")]),
            Err(Error::DuplicateMappingKey(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_mapping_roundtrip(
            entries in proptest::collection::btree_map("[a-z]{1,12}", "[ -~]{0,16}", 0..8)
        ) {
            let pairs: Vec<(&str, &str)> = entries
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            let mapping = Mapping::from_pairs(pairs).unwrap();
            let bytes = mapping.bytes().unwrap();
            let (parsed, remainder, warnings) = Mapping::read(&bytes).unwrap();
            prop_assert!(remainder.is_empty());
            prop_assert!(warnings.is_empty());
            prop_assert_eq!(parsed.bytes().unwrap(), bytes);
            let recovered: BTreeMap<String, String> = parsed
                .entries()
                .iter()
                .map(|(k, v)| {
                    (
                        k.as_str().unwrap().to_owned(),
                        v.as_str().unwrap().to_owned(),
                    )
                })
                .collect();
            prop_assert_eq!(recovered, entries);
        }
    }
}
