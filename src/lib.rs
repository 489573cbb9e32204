//! A `no_std`, no-alloc EEPROM configuration store for microcontroller firmware.
//!
//! This crate treats a small byte-addressable non-volatile memory as the durable
//! settings store of a device. It layers three things over a raw byte device:
//!
//! # Features
//!
//! - **Sentinel defaults** - Erased bytes read as `0xFF`; a field whose bytes are
//!   all `0xFF` is "never written" and yields the caller's default
//! - **Interrupt-safe accessors** - Multi-byte reads and writes run inside a
//!   critical section so an ISR can never observe a torn value
//! - **Version gating** - A two-byte version record detects first boot, stale
//!   layouts and upgrades, and drives factory resets and one-shot migrations
//! - **Bulk operations** - Full erase and streaming to/from removable media,
//!   feeding the watchdog on every byte
//!
//! # Boot flow
//!
//! ```text
//! ┌───────────────┐  read 2 bytes  ┌────────────────────┐
//! │ VersionRecord │──────────────▶│ classify            │
//! └───────────────┘                │  Current ─▶ done    │
//!         ▲                        │  Stale   ─▶ rewrite │
//!         │ write firmware version │  Uninit  ─▶ reset   │
//!         └────────────────────────┴────────────────────┘
//!                                            │
//!                                            ▼
//!                                  pending migrations
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use eeprom_config::prelude::*;
//! # struct Ram([u8; 1024]);
//! # impl StorageDevice for Ram {
//! #     const CAPACITY: usize = 1024;
//! #     fn read_byte(&mut self, addr: u16) -> u8 { self.0[addr as usize] }
//! #     fn write_byte(&mut self, addr: u16, value: u8) { self.0[addr as usize] = value }
//! # }
//! # struct Defaults;
//! # impl Layout<Ram> for Defaults {
//! #     fn factory_reset(&mut self, eeprom: &mut Eeprom<Ram>) -> Result<(), EepromError> {
//! #         eeprom.set_u8(0x0010, 1)
//! #     }
//! # }
//! # fn main() -> Result<(), EepromError> {
//! # let (my_device, mut my_layout) = (Ram([0xFF; 1024]), Defaults);
//!
//! let config = BootConfig::builder()
//!     .firmware_version(FirmwareVersion::new(704))
//!     .record_offset(0x0000)
//!     .build();
//!
//! let mut eeprom = Eeprom::new(my_device);
//! let report = eeprom.init(&config, &mut my_layout)?;
//!
//! // Never written yet: the default comes back.
//! let steps_per_mm = eeprom.get_u32(0x0040, 9467)?;
//! eeprom.set_fixed16(0x0050, Fixed16::from_f32(1.5))?;
//! # let _ = (report, steps_per_mm);
//! # Ok(())
//! # }
//! ```
//!
//! Complete programs live in `demos/` (`cargo run --example basic`,
//! `cargo run --example backup`).

#![deny(unsafe_code)]
#![no_std]

pub mod eeprom;

pub mod prelude {
    pub use crate::eeprom::prelude::*;
}
