//! Remote address wrapper with hex parsing and checked offset arithmetic

use super::error::{RadarError, RadarResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An address inside the target process.
///
/// Never dereferenced locally; it is only handed back to the memory accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Address(pub usize);

impl Address {
    /// Creates a new address from a usize value
    pub const fn new(value: usize) -> Self {
        Address(value)
    }

    /// Creates a null address (0x0)
    pub const fn null() -> Self {
        Address(0)
    }

    /// Checks if the address is null
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Returns the raw usize value
    pub const fn as_usize(&self) -> usize {
        self.0
    }

    /// Address of a field `offset` bytes past this one.
    ///
    /// Fails instead of wrapping, so a garbage base pointer cannot alias a
    /// low address.
    pub fn field(&self, offset: usize) -> RadarResult<Self> {
        self.0
            .checked_add(offset)
            .map(Address)
            .ok_or_else(|| {
                RadarError::read_failed(self, format!("offset 0x{:X} overflows", offset))
            })
    }

    /// Address of the `index`-th element of an array of `stride`-sized slots
    pub fn slot(&self, index: usize, stride: usize) -> RadarResult<Self> {
        index
            .checked_mul(stride)
            .ok_or_else(|| RadarError::read_failed(self, format!("slot {} overflows", index)))
            .and_then(|offset| self.field(offset))
    }
}

impl FromStr for Address {
    type Err = RadarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        let value = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            usize::from_str_radix(hex, 16)
        } else if s.chars().any(|c| c.is_ascii_alphabetic()) {
            usize::from_str_radix(s, 16)
        } else {
            s.parse::<usize>()
        };

        value
            .map(Address::new)
            .map_err(|_| RadarError::InvalidAddress(s.to_string()))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl From<usize> for Address {
    fn from(value: usize) -> Self {
        Address::new(value)
    }
}

impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Address::new(value as usize)
    }
}
