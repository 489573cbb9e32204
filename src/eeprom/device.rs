/// Raw byte-addressable non-volatile storage.
///
/// This is the hardware driver seam: implementations talk to the EEPROM
/// peripheral and know nothing about sentinels, versions or interrupts.
/// Addresses run from `0` to `CAPACITY - 1`; callers in this crate never pass
/// an address outside that range.
///
/// The word and block helpers have byte-wise default implementations; drivers
/// with native multi-byte transfers may override them.
pub trait StorageDevice {
    /// Number of addressable bytes, fixed by the target's hardware class.
    const CAPACITY: usize;

    /// Reads the byte at `addr`.
    fn read_byte(&mut self, addr: u16) -> u8;

    /// Writes `value` to `addr`.
    fn write_byte(&mut self, addr: u16, value: u8);

    /// Fills `out` with the bytes starting at `addr`.
    fn read_block(&mut self, addr: u16, out: &mut [u8]) {
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = self.read_byte(addr.wrapping_add(i as u16));
        }
    }

    /// Writes `data` starting at `addr`.
    fn write_block(&mut self, addr: u16, data: &[u8]) {
        for (i, &byte) in data.iter().enumerate() {
            self.write_byte(addr.wrapping_add(i as u16), byte);
        }
    }

    /// Reads a little-endian word at `addr`.
    fn read_word(&mut self, addr: u16) -> u16 {
        let mut buf = [0u8; 2];
        self.read_block(addr, &mut buf);
        u16::from_le_bytes(buf)
    }

    /// Writes a little-endian word at `addr`.
    fn write_word(&mut self, addr: u16, value: u16) {
        self.write_block(addr, &value.to_le_bytes());
    }

    /// Reads a little-endian double word at `addr`.
    fn read_dword(&mut self, addr: u16) -> u32 {
        let mut buf = [0u8; 4];
        self.read_block(addr, &mut buf);
        u32::from_le_bytes(buf)
    }
}

impl<D: StorageDevice> StorageDevice for &mut D {
    const CAPACITY: usize = D::CAPACITY;

    fn read_byte(&mut self, addr: u16) -> u8 {
        (**self).read_byte(addr)
    }

    fn write_byte(&mut self, addr: u16, value: u8) {
        (**self).write_byte(addr, value)
    }

    fn read_block(&mut self, addr: u16, out: &mut [u8]) {
        (**self).read_block(addr, out)
    }

    fn write_block(&mut self, addr: u16, data: &[u8]) {
        (**self).write_block(addr, data)
    }

    fn read_word(&mut self, addr: u16) -> u16 {
        (**self).read_word(addr)
    }

    fn write_word(&mut self, addr: u16, value: u16) {
        (**self).write_word(addr, value)
    }

    fn read_dword(&mut self, addr: u16) -> u32 {
        (**self).read_dword(addr)
    }
}
