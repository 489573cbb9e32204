//! Utility functions for offset calculations.
//!
//! These helpers are useful when writing a [`Layout`](crate::eeprom::Layout) or a
//! migration routine that needs to reason about field ranges on the device.

use crate::eeprom::EepromError;

/// Calculates the byte range for an offset and length on a device of
/// `capacity` bytes.
///
/// Returns `(start, end)` where end is exclusive, or an error if the range is
/// invalid.
///
/// # Errors
/// * [`EepromError::ZeroLength`] - if `len` is 0
/// * [`EepromError::OutOfBounds`] - if the range exceeds the device
///
/// # Example
/// ```
/// use eeprom_config::eeprom::helpers::range_span;
///
/// // A 4-byte field at 0x1FC is the last word of a 512-byte device.
/// assert_eq!(range_span(512, 0x1FC, 4), Ok((0x1FC, 0x200)));
/// assert!(range_span(512, 0x1FD, 4).is_err());
/// ```
pub fn range_span(capacity: usize, offset: u16, len: usize) -> Result<(usize, usize), EepromError> {
    if len == 0 {
        return Err(EepromError::ZeroLength);
    }

    let start = offset as usize;
    let end = start.checked_add(len).ok_or(EepromError::OutOfBounds)?;

    if end > capacity {
        return Err(EepromError::OutOfBounds);
    }

    Ok((start, end))
}

#[test]
fn range_span_edge_cases() {
    // Zero length
    assert_eq!(range_span(16, 0, 0), Err(EepromError::ZeroLength));

    // Straddles the end
    assert_eq!(range_span(16, 15, 2), Err(EepromError::OutOfBounds));

    // Starts past the end
    assert_eq!(range_span(16, 20, 1), Err(EepromError::OutOfBounds));

    // Last byte
    assert_eq!(range_span(16, 15, 1), Ok((15, 16)));

    // Whole device
    assert_eq!(range_span(16, 0, 16), Ok((0, 16)));

    // Largest offset with a large length does not overflow
    assert_eq!(
        range_span(4096, u16::MAX, usize::MAX),
        Err(EepromError::OutOfBounds)
    );
}
