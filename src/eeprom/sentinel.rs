//! The "unwritten" convention.
//!
//! An erased EEPROM cell reads as [`ERASED_BYTE`]. A field whose bytes are all
//! erased is treated as absent, whatever its width. The rule is defined here
//! once and every accessor goes through [`is_unwritten`].

/// Value of an erased or never-written byte.
pub const ERASED_BYTE: u8 = 0xFF;

/// Returns true if every byte of `bytes` is [`ERASED_BYTE`].
///
/// An empty slice is not considered unwritten.
#[inline]
pub fn is_unwritten(bytes: &[u8]) -> bool {
    !bytes.is_empty() && bytes.iter().all(|&b| b == ERASED_BYTE)
}
