use crate::eeprom::{
    EepromError,
    device::StorageDevice,
    migration::{Migration, run_pending},
    store::Eeprom,
    version::{BootConfig, VersionRecord, VersionState},
};

/// Most migration names kept in a [`BootReport`].
pub const MAX_REPORTED_MIGRATIONS: usize = 8;

/// Application-specific knowledge of the EEPROM layout.
///
/// The versioning protocol only owns the version record; everything else on
/// the device belongs to the layout.
pub trait Layout<D: StorageDevice> {
    /// Writes every known field to its factory default.
    fn factory_reset(&mut self, eeprom: &mut Eeprom<D>) -> Result<(), EepromError>;

    /// Re-applies hardware state derived from stored settings (for example
    /// axis inversion) after a factory reset.
    fn reinit_hardware(&mut self) {}

    /// One-shot migrations, evaluated in order after the version record is
    /// brought up to date.
    fn migrations(&self) -> &[Migration<D>] {
        &[]
    }
}

/// What [`Eeprom::init`] found and did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootReport {
    /// The version record as it was before `init` touched it.
    pub stored: VersionRecord,
    pub state: VersionState,
    /// Names of the migrations applied during this boot.
    pub migrations_applied: heapless::Vec<&'static str, MAX_REPORTED_MIGRATIONS>,
}

impl<D: StorageDevice> Eeprom<D> {
    /// Brings the stored layout in line with the compiled firmware.
    ///
    /// - Current: returns without writing anything.
    /// - Uninitialized (erased, or older than the supported minimum): factory
    ///   reset through `layout`, then hardware re-init.
    /// - Stale: data is kept.
    ///
    /// In both non-current cases the firmware version is written back as one
    /// interrupt-free two-byte write, then pending migrations run. A power
    /// loss part way through leaves a record that classifies the same way on
    /// the next boot, so the same steps run again.
    pub fn init<L: Layout<D>>(
        &mut self,
        config: &BootConfig,
        layout: &mut L,
    ) -> Result<BootReport, EepromError> {
        let mut raw = [0u8; VersionRecord::LEN];
        self.read_block(config.record_offset, &mut raw)?;
        let stored = VersionRecord::from_bytes(raw);
        let state = config.classify(stored);

        let mut report = BootReport {
            stored,
            state,
            migrations_applied: heapless::Vec::new(),
        };

        match state {
            VersionState::Current => {
                trace!("eeprom version {=u16} is current", stored.decode());
                return Ok(report);
            }
            VersionState::Uninitialized => {
                info!(
                    "eeprom uninitialized (stored {=u8}.{=u8}), resetting to defaults",
                    stored.high,
                    stored.low
                );
                layout.factory_reset(self)?;
                layout.reinit_hardware();
            }
            VersionState::Stale => {
                info!(
                    "eeprom version {=u16} is stale, keeping data",
                    stored.decode()
                );
            }
        }

        let record = config.firmware.to_record();
        self.write_block(config.record_offset, &record.to_bytes())?;
        debug!("eeprom version set to {=u16}", config.firmware.value());

        run_pending(self, layout.migrations(), &mut report.migrations_applied)?;

        Ok(report)
    }
}
