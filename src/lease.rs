//! The I2P Lease: a 44-byte tunnel entry inside a LeaseSet

use crate::data::{Date, Hash, DATE_SIZE, HASH_SIZE};
use crate::{Error, Result};

/// Width of a lease: gateway hash, tunnel id, end date
pub const LEASE_SIZE: usize = 44;

const TUNNEL_ID_SIZE: usize = 4;

/// A tunnel gateway hash, tunnel id and end date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lease([u8; LEASE_SIZE]);

impl Lease {
    /// Read a 44-byte lease from the front of `data`
    pub fn read(data: &[u8]) -> Result<(Lease, &[u8])> {
        if data.len() < LEASE_SIZE {
            return Err(Error::ShortInput {
                site: "lease",
                needed: LEASE_SIZE,
                have: data.len(),
            });
        }
        let mut bytes = [0u8; LEASE_SIZE];
        bytes.copy_from_slice(&data[..LEASE_SIZE]);
        Ok((Lease(bytes), &data[LEASE_SIZE..]))
    }

    pub fn new(tunnel_gateway: Hash, tunnel_id: u32, end_date: Date) -> Lease {
        let mut bytes = [0u8; LEASE_SIZE];
        bytes[..HASH_SIZE].copy_from_slice(tunnel_gateway.as_bytes());
        bytes[HASH_SIZE..HASH_SIZE + TUNNEL_ID_SIZE].copy_from_slice(&tunnel_id.to_be_bytes());
        bytes[HASH_SIZE + TUNNEL_ID_SIZE..].copy_from_slice(&end_date.bytes());
        Lease(bytes)
    }

    /// Hash of the gateway router for this tunnel
    pub fn tunnel_gateway(&self) -> Hash {
        let mut bytes = [0u8; HASH_SIZE];
        bytes.copy_from_slice(&self.0[..HASH_SIZE]);
        Hash::from(bytes)
    }

    pub fn tunnel_id(&self) -> u32 {
        u32::from_be_bytes([
            self.0[HASH_SIZE],
            self.0[HASH_SIZE + 1],
            self.0[HASH_SIZE + 2],
            self.0[HASH_SIZE + 3],
        ])
    }

    /// When this lease expires
    pub fn end_date(&self) -> Date {
        let mut bytes = [0u8; DATE_SIZE];
        bytes.copy_from_slice(&self.0[HASH_SIZE + TUNNEL_ID_SIZE..]);
        Date::from_millis(u64::from_be_bytes(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; LEASE_SIZE] {
        &self.0
    }
}
