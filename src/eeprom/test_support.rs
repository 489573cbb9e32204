//! Test support utilities - only compiled in test builds.

extern crate std;

use std::{sync::mpsc, thread, time::Duration, vec::Vec};

use crate::eeprom::{
    EepromError, Heartbeat,
    boot::Layout,
    device::StorageDevice,
    migration::Migration,
    sentinel::ERASED_BYTE,
    store::Eeprom,
};

/// Standard test configuration: 64-byte device
pub type TestDevice = RamDevice<64>;
pub type TestEeprom = Eeprom<TestDevice>;

/// Field written by [`RecordingLayout::factory_reset`].
pub const DEFAULT_FIELD: u16 = 0x10;
pub const DEFAULT_FIELD_VALUE: u8 = 0x42;

/// Helper to create a fresh, fully erased test EEPROM
pub fn test_eeprom() -> TestEeprom {
    Eeprom::new(RamDevice::new())
}

/// In-memory device that starts erased and counts writes per address.
pub struct RamDevice<const N: usize> {
    bytes: [u8; N],
    writes: [u32; N],
}

impl<const N: usize> RamDevice<N> {
    pub fn new() -> Self {
        Self {
            bytes: [ERASED_BYTE; N],
            writes: [0; N],
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn write_count(&self, addr: usize) -> u32 {
        self.writes[addr]
    }

    pub fn total_writes(&self) -> u32 {
        self.writes.iter().sum()
    }
}

impl<const N: usize> StorageDevice for RamDevice<N> {
    const CAPACITY: usize = N;

    fn read_byte(&mut self, addr: u16) -> u8 {
        self.bytes[addr as usize]
    }

    fn write_byte(&mut self, addr: u16, value: u8) {
        self.bytes[addr as usize] = value;
        self.writes[addr as usize] += 1;
    }
}

/// How long a second thread waits to enter a critical section before the
/// section is considered held.
const SECTION_WAIT: Duration = Duration::from_millis(100);

/// Device that checks, during every block transfer, whether a critical
/// section is held.
///
/// Each transfer starts a thread that tries to enter a section. With the
/// `std` implementation that thread blocks for as long as the caller holds
/// one, so a timed-out handshake means the transfer was guarded.
pub struct SectionCheckDevice<const N: usize> {
    pub inner: RamDevice<N>,
    pub transfers: usize,
    pub guarded: usize,
    waiters: Vec<thread::JoinHandle<()>>,
}

impl<const N: usize> SectionCheckDevice<N> {
    pub fn new() -> Self {
        Self {
            inner: RamDevice::new(),
            transfers: 0,
            guarded: 0,
            waiters: Vec::new(),
        }
    }

    fn check_section(&mut self) {
        let (tx, rx) = mpsc::channel();
        self.waiters.push(thread::spawn(move || {
            critical_section::with(|_| {
                let _ = tx.send(());
            })
        }));

        self.transfers += 1;
        if rx.recv_timeout(SECTION_WAIT).is_err() {
            self.guarded += 1;
        }
    }

    /// Waits for every checker thread; call once no section is held.
    pub fn settle(&mut self) {
        for waiter in self.waiters.drain(..) {
            waiter.join().unwrap();
        }
    }
}

impl<const N: usize> StorageDevice for SectionCheckDevice<N> {
    const CAPACITY: usize = N;

    fn read_byte(&mut self, addr: u16) -> u8 {
        self.inner.read_byte(addr)
    }

    fn write_byte(&mut self, addr: u16, value: u8) {
        self.inner.write_byte(addr, value)
    }

    fn read_block(&mut self, addr: u16, out: &mut [u8]) {
        self.check_section();
        self.inner.read_block(addr, out)
    }

    fn write_block(&mut self, addr: u16, data: &[u8]) {
        self.check_section();
        self.inner.write_block(addr, data)
    }
}

/// Layout that writes one default field and counts its callbacks.
#[derive(Default)]
pub struct RecordingLayout {
    pub resets: usize,
    pub hardware_reinits: usize,
    pub migrations: &'static [Migration<TestDevice>],
}

impl RecordingLayout {
    pub fn with_migrations(migrations: &'static [Migration<TestDevice>]) -> Self {
        Self {
            migrations,
            ..Self::default()
        }
    }
}

impl Layout<TestDevice> for RecordingLayout {
    fn factory_reset(&mut self, eeprom: &mut TestEeprom) -> Result<(), EepromError> {
        self.resets += 1;
        eeprom.set_u8(DEFAULT_FIELD, DEFAULT_FIELD_VALUE)
    }

    fn reinit_hardware(&mut self) {
        self.hardware_reinits += 1;
    }

    fn migrations(&self) -> &[Migration<TestDevice>] {
        self.migrations
    }
}

/// A heartbeat that counts its beats.
#[derive(Default)]
pub struct CountingHeartbeat {
    pub beats: usize,
}

impl Heartbeat for CountingHeartbeat {
    fn beat(&mut self) {
        self.beats += 1;
    }
}

/// Why [`MemoryMedia`] refused to open a file.
#[cfg(feature = "media")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MediaFault {
    NoCard,
}

/// Single in-memory media file, usable as both sink and source.
#[cfg(feature = "media")]
pub struct MemoryMedia<const N: usize> {
    pub data: heapless::Vec<u8, N>,
    pub name: heapless::String<16>,
    pub closed: bool,
    available: bool,
    cursor: usize,
}

#[cfg(feature = "media")]
impl<const N: usize> MemoryMedia<N> {
    pub fn new() -> Self {
        Self {
            data: heapless::Vec::new(),
            name: heapless::String::new(),
            closed: false,
            available: true,
            cursor: 0,
        }
    }

    pub fn with_contents(contents: &[u8]) -> Self {
        let mut media = Self::new();
        for &byte in contents {
            media.data.push(byte).unwrap();
        }
        media
    }

    /// Media whose open calls always fail.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    fn open(&mut self, name: &str) -> Result<(), MediaFault> {
        if !self.available {
            return Err(MediaFault::NoCard);
        }
        self.name.clear();
        self.name.push_str(name).unwrap();
        self.closed = false;
        Ok(())
    }
}

#[cfg(feature = "media")]
impl<const N: usize> crate::eeprom::MediaSink for MemoryMedia<N> {
    type Error = MediaFault;

    fn start_capture(&mut self, name: &str) -> Result<(), MediaFault> {
        self.open(name)?;
        self.data.clear();
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) {
        self.data.push(byte).unwrap();
    }

    fn finish_capture(&mut self) {
        self.closed = true;
    }
}

#[cfg(feature = "media")]
impl<const N: usize> crate::eeprom::MediaSource for MemoryMedia<N> {
    type Error = MediaFault;

    fn start_playback(&mut self, name: &str) -> Result<(), MediaFault> {
        self.open(name)?;
        self.cursor = 0;
        Ok(())
    }

    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.data.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(byte)
    }

    fn finish_playback(&mut self) {
        self.closed = true;
    }
}
