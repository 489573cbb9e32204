//! Backup example: erase, save and restore the whole device
//!
//! This example demonstrates:
//! - Streaming every byte of the device to a named media file
//! - Erasing the device back to its factory-fresh state
//! - Restoring from the backup
//! - Feeding a watchdog from a closure heartbeat on every byte

use eeprom_config::prelude::*;

const CAPACITY: usize = HardwareClass::ATmega168.capacity();

/// 512 bytes of RAM that start fully erased.
struct RamEeprom([u8; CAPACITY]);

impl StorageDevice for RamEeprom {
    const CAPACITY: usize = CAPACITY;

    fn read_byte(&mut self, addr: u16) -> u8 {
        self.0[addr as usize]
    }

    fn write_byte(&mut self, addr: u16, value: u8) {
        self.0[addr as usize] = value;
    }
}

/// A single-file "SD card" held in memory.
#[derive(Default)]
struct MemoryCard {
    file_name: String,
    contents: Vec<u8>,
    cursor: usize,
}

#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct NoSuchFile;

impl MediaSink for MemoryCard {
    type Error = NoSuchFile;

    fn start_capture(&mut self, name: &str) -> Result<(), NoSuchFile> {
        self.file_name = name.to_string();
        self.contents.clear();
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) {
        self.contents.push(byte);
    }

    fn finish_capture(&mut self) {
        println!("  closed {} ({} bytes)", self.file_name, self.contents.len());
    }
}

impl MediaSource for MemoryCard {
    type Error = NoSuchFile;

    fn start_playback(&mut self, name: &str) -> Result<(), NoSuchFile> {
        if name != self.file_name {
            return Err(NoSuchFile);
        }
        self.cursor = 0;
        Ok(())
    }

    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.contents.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(byte)
    }

    fn finish_playback(&mut self) {
        println!("  read {} of {} bytes", self.cursor, self.contents.len());
    }
}

pub fn main() {
    let mut eeprom = Eeprom::new(RamEeprom([0xFF; CAPACITY]));
    let mut card = MemoryCard::default();
    let mut watchdog_feeds = 0usize;

    eeprom.set_u16(0x0010, 0x1234).unwrap();
    eeprom.set_i64(0x0020, -42).unwrap();

    // ========== Backup ==========
    let saved = eeprom
        .save_to_media(&mut card, "eeprom.bin", &mut || watchdog_feeds += 1)
        .unwrap();
    println!("saved {saved} bytes");
    assert_eq!(saved, CAPACITY);

    // ========== Erase ==========
    eeprom.erase(&mut || watchdog_feeds += 1);
    assert_eq!(eeprom.get_u16(0x0010, 7).unwrap(), 7);

    // ========== Restore ==========
    let missing = eeprom.restore_from_media(&mut card, "other.bin", &mut NoHeartbeat);
    assert_eq!(missing, Err(EepromError::MediaUnavailable));

    let restored = eeprom
        .restore_from_media(&mut card, "eeprom.bin", &mut || watchdog_feeds += 1)
        .unwrap();
    println!("restored {restored} bytes, watchdog fed {watchdog_feeds} times");
    assert_eq!(restored, CAPACITY);
    assert_eq!(watchdog_feeds, 3 * CAPACITY);

    assert_eq!(eeprom.get_u16(0x0010, 0).unwrap(), 0x1234);
    assert_eq!(eeprom.get_i64(0x0020, 0).unwrap(), -42);
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_backup_example() {
        super::main();
    }
}
