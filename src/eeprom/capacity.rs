/// Microcontroller families and the size of their on-chip EEPROM.
///
/// Drivers typically use this to pick their [`StorageDevice::CAPACITY`]:
///
/// ```
/// use eeprom_config::eeprom::HardwareClass;
///
/// const CAPACITY: usize = HardwareClass::ATmega2560.capacity();
/// assert_eq!(CAPACITY, 4096);
/// ```
///
/// [`StorageDevice::CAPACITY`]: crate::eeprom::StorageDevice::CAPACITY
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HardwareClass {
    ATmega168,
    ATmega328,
    ATmega644P,
    ATmega1280,
    ATmega2560,
}

impl HardwareClass {
    /// EEPROM size in bytes.
    pub const fn capacity(self) -> usize {
        match self {
            HardwareClass::ATmega168 => 512,
            HardwareClass::ATmega328 => 1024,
            HardwareClass::ATmega644P => 2048,
            HardwareClass::ATmega1280 | HardwareClass::ATmega2560 => 4096,
        }
    }
}
