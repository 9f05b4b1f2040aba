//! Typed reads layered on a raw byte copy
//!
//! Every read is independently fallible. A failed read is an error, never a
//! zero value, so callers can tell "unknown" from "zero".

use crate::core::types::{Address, RadarError, RadarResult};
use glam::Vec3;

/// Source of raw bytes from the target's address space.
///
/// Implementors provide [`ReadMemory::read_exact`]; the typed helpers are
/// layered on top and decode little-endian values.
pub trait ReadMemory {
    /// Fill `buffer` from `address`; partial reads are errors
    fn read_exact(&self, address: Address, buffer: &mut [u8]) -> RadarResult<()>;

    /// Copy `length` bytes starting at `address`
    fn read_bytes(&self, address: Address, length: usize) -> RadarResult<Vec<u8>> {
        let mut buffer = vec![0u8; length];
        self.read_exact(address, &mut buffer)?;
        Ok(buffer)
    }

    /// Read a fixed-size byte array
    fn read_array<const N: usize>(&self, address: Address) -> RadarResult<[u8; N]> {
        let mut buffer = [0u8; N];
        self.read_exact(address, &mut buffer)?;
        Ok(buffer)
    }

    fn read_u8(&self, address: Address) -> RadarResult<u8> {
        let [byte] = self.read_array::<1>(address)?;
        Ok(byte)
    }

    fn read_i32(&self, address: Address) -> RadarResult<i32> {
        self.read_array(address).map(i32::from_le_bytes)
    }

    fn read_u64(&self, address: Address) -> RadarResult<u64> {
        self.read_array(address).map(u64::from_le_bytes)
    }

    fn read_f32(&self, address: Address) -> RadarResult<f32> {
        self.read_array(address).map(f32::from_le_bytes)
    }

    /// Read a pointer-sized slot; a null pointer is `Ok(None)`
    fn read_pointer(&self, address: Address) -> RadarResult<Option<Address>> {
        let raw = self.read_u64(address)?;
        let pointer = usize::try_from(raw).map_err(|_| {
            RadarError::read_failed(address, format!("pointer 0x{:X} out of range", raw))
        })?;
        Ok(Some(Address::new(pointer)).filter(|p| !p.is_null()))
    }

    /// Read three consecutive `f32` values
    fn read_vec3(&self, address: Address) -> RadarResult<Vec3> {
        let bytes = self.read_array::<12>(address)?;
        Ok(decode_vec3(&bytes))
    }

    /// Read up to `max_length` bytes as a NUL-terminated string.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    fn read_fixed_string(&self, address: Address, max_length: usize) -> RadarResult<String> {
        let bytes = self.read_bytes(address, max_length)?;
        Ok(decode_fixed_string(&bytes))
    }
}

/// Decode three little-endian `f32` values
pub fn decode_vec3(bytes: &[u8; 12]) -> Vec3 {
    let component = |i: usize| {
        f32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]])
    };
    Vec3::new(component(0), component(4), component(8))
}

/// Cut at the first NUL and decode lossily
pub fn decode_fixed_string(bytes: &[u8]) -> String {
    let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..len]).into_owned()
}
