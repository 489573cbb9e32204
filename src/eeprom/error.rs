/// Errors that can occur during EEPROM operations.
///
/// An unwritten field is not an error: the sentinel convention turns it into
/// the caller's default. Neither is a version mismatch at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EepromError {
    /// Offset or length exceeds device capacity.
    OutOfBounds,
    /// Operation attempted with zero length.
    ZeroLength,
    /// The media collaborator could not open the named file.
    MediaUnavailable,
}

impl core::fmt::Display for EepromError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EepromError::OutOfBounds => write!(f, "offset or length exceeds device capacity"),
            EepromError::ZeroLength => write!(f, "operation attempted with zero length"),
            EepromError::MediaUnavailable => write!(f, "media file could not be opened"),
        }
    }
}
