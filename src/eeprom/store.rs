use crate::eeprom::{
    EepromError,
    critical::InterruptFree,
    device::StorageDevice,
    field::{Field, Fixed16, MAX_FIELD_WIDTH},
    helpers::range_span,
    macros::{impl_typed_accessor, impl_typed_accessors},
    sentinel::is_unwritten,
};

/// Typed, interrupt-safe access to an EEPROM device.
///
/// Reads apply the sentinel convention: a field whose bytes are all `0xFF`
/// is reported as the caller's default. Writes store the encoding verbatim,
/// so a value whose encoding happens to be all `0xFF` (`u32::MAX`, `-1i64`,
/// ...) reads back as the default afterwards.
///
/// Every block and field access runs inside an [`InterruptFree`] section.
pub struct Eeprom<D: StorageDevice> {
    pub(crate) device: D,
}

impl<D: StorageDevice> core::fmt::Debug for Eeprom<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Eeprom")
            .field("capacity", &D::CAPACITY)
            .finish_non_exhaustive()
    }
}

impl<D: StorageDevice> Eeprom<D> {
    /// Wraps a device driver.
    pub fn new(device: D) -> Self {
        const {
            assert!(
                D::CAPACITY <= 1 << 16,
                "device capacity exceeds 16-bit addressing"
            )
        };
        Self { device }
    }

    /// Device capacity in bytes.
    #[inline]
    pub const fn capacity(&self) -> usize {
        D::CAPACITY
    }

    /// The underlying driver.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Mutable access to the driver, bypassing bounds and sentinel checks.
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Releases the driver.
    pub fn into_inner(self) -> D {
        self.device
    }

    /// Reads one raw byte. No sentinel substitution.
    pub fn read_byte(&mut self, addr: u16) -> Result<u8, EepromError> {
        range_span(D::CAPACITY, addr, 1)?;
        Ok(self.device.read_byte(addr))
    }

    /// Writes one raw byte.
    pub fn write_byte(&mut self, addr: u16, value: u8) -> Result<(), EepromError> {
        range_span(D::CAPACITY, addr, 1)?;
        self.device.write_byte(addr, value);
        Ok(())
    }

    /// Reads `out.len()` raw bytes starting at `addr` with interrupts masked.
    pub fn read_block(&mut self, addr: u16, out: &mut [u8]) -> Result<(), EepromError> {
        range_span(D::CAPACITY, addr, out.len())?;
        let device = &mut self.device;
        InterruptFree::run(|_| device.read_block(addr, out));
        Ok(())
    }

    /// Writes `data` starting at `addr` with interrupts masked.
    pub fn write_block(&mut self, addr: u16, data: &[u8]) -> Result<(), EepromError> {
        range_span(D::CAPACITY, addr, data.len())?;
        let device = &mut self.device;
        InterruptFree::run(|_| device.write_block(addr, data));
        Ok(())
    }

    /// Reads a field at `offset`.
    ///
    /// Returns `default` if every byte of the field is erased.
    pub fn get<T: Field>(&mut self, offset: u16, default: T) -> Result<T, EepromError> {
        let mut buf = [0u8; MAX_FIELD_WIDTH];
        let bytes = buf.get_mut(..T::WIDTH).ok_or(EepromError::OutOfBounds)?;
        self.read_block(offset, bytes)?;

        if is_unwritten(bytes) {
            trace!("field @{=u16:#x} unwritten, using default", offset);
            return Ok(default);
        }

        Ok(T::decode(bytes))
    }

    /// Writes a field at `offset`.
    ///
    /// The encoding is not checked against the sentinel pattern.
    pub fn set<T: Field>(&mut self, offset: u16, value: T) -> Result<(), EepromError> {
        let mut buf = [0u8; MAX_FIELD_WIDTH];
        let bytes = buf.get_mut(..T::WIDTH).ok_or(EepromError::OutOfBounds)?;
        value.encode(bytes);
        self.write_block(offset, bytes)
    }

    impl_typed_accessors!();
}
