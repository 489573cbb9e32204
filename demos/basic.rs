//! Basic example: typed settings with erased-byte defaults
//!
//! This example demonstrates:
//! - A RAM-backed `StorageDevice` standing in for the EEPROM peripheral
//! - Building a `BootConfig` with the typestate builder
//! - First-boot factory reset through a `Layout`
//! - Typed get/set where never-written fields yield the caller's default
//! - An upgrade boot that keeps data and runs a one-shot migration

use eeprom_config::prelude::*;

// ============ Layout ============
// Field offsets of the application. The version record sits at 0x0000.

const RECORD_ADDR: u16 = 0x0000;
const STEPS_PER_MM_ADDR: u16 = 0x0040;
const HOME_OFFSET_ADDR: u16 = 0x0048;
const NOZZLE_RATIO_ADDR: u16 = 0x0050;
const FAN_SPEED_ADDR: u16 = 0x0052;
const HALVE_STEPS_FLAG: u16 = 0x00F0;

const DEFAULT_STEPS_PER_MM: u32 = 9467;

/// 1 KiB of RAM that starts fully erased, like a factory-fresh ATmega328.
struct RamEeprom([u8; HardwareClass::ATmega328.capacity()]);

impl RamEeprom {
    fn new() -> Self {
        Self([0xFF; HardwareClass::ATmega328.capacity()])
    }
}

impl StorageDevice for RamEeprom {
    const CAPACITY: usize = HardwareClass::ATmega328.capacity();

    fn read_byte(&mut self, addr: u16) -> u8 {
        self.0[addr as usize]
    }

    fn write_byte(&mut self, addr: u16, value: u8) {
        self.0[addr as usize] = value;
    }
}

fn halve_steps(eeprom: &mut Eeprom<RamEeprom>) -> Result<(), EepromError> {
    let steps = eeprom.get_u32(STEPS_PER_MM_ADDR, DEFAULT_STEPS_PER_MM)?;
    eeprom.set_u32(STEPS_PER_MM_ADDR, steps / 2)
}

const MIGRATIONS: &[Migration<RamEeprom>] =
    &[Migration::new("halve-steps", HALVE_STEPS_FLAG, 0x01, halve_steps)];

/// Factory defaults of the printer board.
struct PrinterLayout {
    migrations: &'static [Migration<RamEeprom>],
}

impl Layout<RamEeprom> for PrinterLayout {
    fn factory_reset(&mut self, eeprom: &mut Eeprom<RamEeprom>) -> Result<(), EepromError> {
        eeprom.set_u32(STEPS_PER_MM_ADDR, DEFAULT_STEPS_PER_MM)?;
        eeprom.set_fixed16(NOZZLE_RATIO_ADDR, Fixed16::from_f32(1.5))
    }

    fn reinit_hardware(&mut self) {
        println!("  hardware re-initialised from defaults");
    }

    fn migrations(&self) -> &[Migration<RamEeprom>] {
        self.migrations
    }
}

pub fn main() {
    let config = BootConfig::builder()
        .firmware_version(FirmwareVersion::new(704))
        .record_offset(RECORD_ADDR)
        .build();

    let mut eeprom = Eeprom::new(RamEeprom::new());
    let mut layout = PrinterLayout { migrations: &[] };

    // ========== First boot ==========
    let report = eeprom.init(&config, &mut layout).unwrap();
    println!("first boot: {:?}", report.state);
    assert_eq!(report.state, VersionState::Uninitialized);

    // Written by the factory reset
    let steps = eeprom.get_u32(STEPS_PER_MM_ADDR, 0).unwrap();
    assert_eq!(steps, DEFAULT_STEPS_PER_MM);

    // Never written: the default comes back
    assert_eq!(eeprom.get_i64(HOME_OFFSET_ADDR, -250).unwrap(), -250);
    assert_eq!(eeprom.get_u8(FAN_SPEED_ADDR, 128).unwrap(), 128);

    eeprom.set_i64(HOME_OFFSET_ADDR, -1_200).unwrap();
    eeprom.set_u8(FAN_SPEED_ADDR, 200).unwrap();
    let ratio = eeprom.get_fixed16(NOZZLE_RATIO_ADDR, Fixed16::default()).unwrap();
    println!("steps/mm = {steps}, nozzle ratio = {}", ratio.to_f32());

    // ========== Same firmware again ==========
    let report = eeprom.init(&config, &mut layout).unwrap();
    assert_eq!(report.state, VersionState::Current);

    // ========== Firmware upgrade with a migration ==========
    let upgrade = BootConfig::new(FirmwareVersion::new(705), RECORD_ADDR);
    layout.migrations = MIGRATIONS;
    let report = eeprom.init(&upgrade, &mut layout).unwrap();
    println!(
        "upgrade boot: {:?}, migrations {:?}",
        report.state, report.migrations_applied
    );
    assert_eq!(report.state, VersionState::Stale);
    assert_eq!(report.migrations_applied.as_slice(), &["halve-steps"]);
    assert_eq!(
        eeprom.get_u32(STEPS_PER_MM_ADDR, 0).unwrap(),
        DEFAULT_STEPS_PER_MM / 2
    );

    // User settings survived the upgrade
    assert_eq!(eeprom.get_i64(HOME_OFFSET_ADDR, 0).unwrap(), -1_200);
    assert_eq!(eeprom.get_u8(FAN_SPEED_ADDR, 0).unwrap(), 200);
}
