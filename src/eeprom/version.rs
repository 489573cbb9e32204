use crate::eeprom::{builder::BootConfigBuilder, builder::NeedFirmwareVersion, sentinel::ERASED_BYTE};

/// Oldest stored major version that is upgraded in place rather than reset.
pub const DEFAULT_MIN_SUPPORTED_MAJOR: u8 = 2;

/// Firmware version as a plain number, e.g. `704` for 7.4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FirmwareVersion(u16);

impl FirmwareVersion {
    /// `major * 100 + minor`.
    pub const fn new(version: u16) -> Self {
        Self(version)
    }

    /// The plain version number.
    pub const fn value(self) -> u16 {
        self.0
    }

    /// `version / 100`.
    pub const fn major(self) -> u16 {
        self.0 / 100
    }

    /// `version % 100`.
    pub const fn minor(self) -> u8 {
        (self.0 % 100) as u8
    }

    /// The two bytes this version is stored as.
    ///
    /// The high byte is truncated to 8 bits, so versions above 25599 do not
    /// survive the round trip.
    pub const fn to_record(self) -> VersionRecord {
        VersionRecord {
            low: self.minor(),
            high: self.major() as u8,
        }
    }
}

/// The two-byte version record as stored on the device.
///
/// Byte 0 holds `version % 100`, byte 1 holds `version / 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VersionRecord {
    pub low: u8,
    pub high: u8,
}

impl VersionRecord {
    /// Width of the record in bytes.
    pub const LEN: usize = 2;

    pub const fn from_bytes(bytes: [u8; 2]) -> Self {
        Self {
            low: bytes[0],
            high: bytes[1],
        }
    }

    pub const fn to_bytes(self) -> [u8; 2] {
        [self.low, self.high]
    }

    /// `high * 100 + low`.
    pub const fn decode(self) -> u16 {
        self.high as u16 * 100 + self.low as u16
    }

    /// True if the high byte was never programmed.
    pub const fn is_erased(self) -> bool {
        self.high == ERASED_BYTE
    }
}

/// Outcome of comparing the stored record with the compiled firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VersionState {
    /// Stored version equals the firmware version; nothing to do.
    Current,
    /// Older than current but new enough to keep its data; only the record
    /// is rewritten.
    Stale,
    /// Never written, or older than the minimum supported version; all
    /// fields are reset to factory defaults.
    Uninitialized,
}

/// Boot-time versioning parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootConfig {
    pub firmware: FirmwareVersion,
    pub record_offset: u16,
    pub min_supported_major: u8,
}

impl BootConfig {
    pub const fn new(firmware: FirmwareVersion, record_offset: u16) -> Self {
        Self {
            firmware,
            record_offset,
            min_supported_major: DEFAULT_MIN_SUPPORTED_MAJOR,
        }
    }

    pub fn builder() -> BootConfigBuilder<NeedFirmwareVersion> {
        BootConfigBuilder::new()
    }

    /// Decides what `init` has to do with a stored record.
    pub const fn classify(&self, stored: VersionRecord) -> VersionState {
        if stored.decode() == self.firmware.value() {
            VersionState::Current
        } else if stored.is_erased() || stored.high < self.min_supported_major {
            VersionState::Uninitialized
        } else {
            VersionState::Stale
        }
    }
}
