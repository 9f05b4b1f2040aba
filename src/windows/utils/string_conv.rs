//! String conversion for fixed-size Win32 name buffers

use std::ffi::OsString;
use std::os::windows::ffi::OsStringExt;

/// Convert a NUL-terminated UTF-16 buffer to a Rust string
pub fn wide_to_string(wide: &[u16]) -> String {
    let len = wide.iter().position(|&c| c == 0).unwrap_or(wide.len());
    OsString::from_wide(&wide[..len])
        .to_string_lossy()
        .into_owned()
}

/// Convert a NUL-terminated ANSI `CHAR` buffer to a Rust string
pub fn ansi_to_string(chars: &[i8]) -> String {
    let bytes: Vec<u8> = chars
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_to_string() {
        let wide = vec![99, 115, 50, 46, 101, 120, 101, 0, 120];
        assert_eq!(wide_to_string(&wide), "cs2.exe");

        let no_null = vec![72, 101, 108, 108, 111];
        assert_eq!(wide_to_string(&no_null), "Hello");
    }

    #[test]
    fn test_ansi_to_string() {
        let chars = [99i8, 108, 105, 101, 110, 116, 0, 0x41];
        assert_eq!(ansi_to_string(&chars), "client");
    }
}
