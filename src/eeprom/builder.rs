use core::marker::PhantomData;

use crate::eeprom::version::{BootConfig, DEFAULT_MIN_SUPPORTED_MAJOR, FirmwareVersion};

// Builder states
pub struct NeedFirmwareVersion;
pub struct NeedRecordOffset;
pub struct Ready;

/// Typestate builder for [`BootConfig`].
///
/// The firmware version and the record offset are required, in that order;
/// [`build`](BootConfigBuilder::build) only exists once both are set.
///
/// ```
/// use eeprom_config::eeprom::{BootConfig, FirmwareVersion};
///
/// let config = BootConfig::builder()
///     .firmware_version(FirmwareVersion::new(704))
///     .record_offset(0x0000)
///     .min_supported_major(3)
///     .build();
///
/// assert_eq!(config.min_supported_major, 3);
/// ```
pub struct BootConfigBuilder<State> {
    firmware: FirmwareVersion,
    record_offset: u16,
    min_supported_major: u8,
    _phantom: PhantomData<State>,
}

impl BootConfigBuilder<NeedFirmwareVersion> {
    pub fn new() -> Self {
        BootConfigBuilder {
            firmware: FirmwareVersion::new(0),
            record_offset: 0,
            min_supported_major: DEFAULT_MIN_SUPPORTED_MAJOR,
            _phantom: PhantomData,
        }
    }

    /// Set the compiled firmware version.
    pub fn firmware_version(
        self,
        firmware: FirmwareVersion,
    ) -> BootConfigBuilder<NeedRecordOffset> {
        BootConfigBuilder {
            firmware,
            record_offset: self.record_offset,
            min_supported_major: self.min_supported_major,
            _phantom: PhantomData,
        }
    }
}

impl Default for BootConfigBuilder<NeedFirmwareVersion> {
    fn default() -> Self {
        Self::new()
    }
}

impl BootConfigBuilder<NeedRecordOffset> {
    /// Set the device offset of the two-byte version record.
    pub fn record_offset(self, record_offset: u16) -> BootConfigBuilder<Ready> {
        BootConfigBuilder {
            firmware: self.firmware,
            record_offset,
            min_supported_major: self.min_supported_major,
            _phantom: PhantomData,
        }
    }
}

impl BootConfigBuilder<Ready> {
    /// Stored major versions below this are reset instead of upgraded.
    ///
    /// Defaults to [`DEFAULT_MIN_SUPPORTED_MAJOR`].
    pub fn min_supported_major(mut self, major: u8) -> Self {
        self.min_supported_major = major;
        self
    }

    pub fn build(self) -> BootConfig {
        BootConfig {
            firmware: self.firmware,
            record_offset: self.record_offset,
            min_supported_major: self.min_supported_major,
        }
    }
}
