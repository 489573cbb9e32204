use crate::eeprom::{EepromError, device::StorageDevice, sentinel::ERASED_BYTE, store::Eeprom};

/// Routine that rewrites stored data for a new field layout.
pub type MigrateFn<D> = fn(&mut Eeprom<D>) -> Result<(), EepromError>;

/// A one-shot layout migration keyed by a flag byte.
///
/// The migration is pending while the byte at `flag_offset` (read with the
/// sentinel convention, default `0`) differs from `applied_value`. After
/// `apply` succeeds the flag is written, so each record runs at most once per
/// device even if `apply` itself does not touch the flag.
pub struct Migration<D: StorageDevice> {
    pub name: &'static str,
    pub flag_offset: u16,
    pub applied_value: u8,
    pub apply: MigrateFn<D>,
}

impl<D: StorageDevice> Migration<D> {
    /// # Panics
    /// Panics (at compile time in a `const` table) if `applied_value` is `0`
    /// or `0xFF`: an unwritten flag reads as `0`, and `0xFF` is the sentinel.
    pub const fn new(
        name: &'static str,
        flag_offset: u16,
        applied_value: u8,
        apply: MigrateFn<D>,
    ) -> Self {
        assert!(
            applied_value != 0 && applied_value != ERASED_BYTE,
            "migration flag value must not be 0 or 0xFF"
        );
        Self {
            name,
            flag_offset,
            applied_value,
            apply,
        }
    }

    /// Returns true if the flag already holds `applied_value`.
    pub fn is_applied(&self, eeprom: &mut Eeprom<D>) -> Result<bool, EepromError> {
        Ok(eeprom.get_u8(self.flag_offset, 0)? == self.applied_value)
    }

    /// Runs the migration if it is pending. Returns true if it ran.
    pub fn run_if_pending(&self, eeprom: &mut Eeprom<D>) -> Result<bool, EepromError> {
        if self.is_applied(eeprom)? {
            return Ok(false);
        }

        info!("applying migration {=str}", self.name);
        (self.apply)(eeprom)?;
        eeprom.set_u8(self.flag_offset, self.applied_value)?;
        Ok(true)
    }
}

impl<D: StorageDevice> Clone for Migration<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: StorageDevice> Copy for Migration<D> {}

impl<D: StorageDevice> core::fmt::Debug for Migration<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Migration")
            .field("name", &self.name)
            .field("flag_offset", &self.flag_offset)
            .field("applied_value", &self.applied_value)
            .finish_non_exhaustive()
    }
}

/// Runs every pending migration in order, recording the names of those that
/// ran into `applied`. Names beyond the capacity of `applied` are dropped
/// from the record; the migrations still run.
pub(crate) fn run_pending<D: StorageDevice, const M: usize>(
    eeprom: &mut Eeprom<D>,
    migrations: &[Migration<D>],
    applied: &mut heapless::Vec<&'static str, M>,
) -> Result<(), EepromError> {
    for migration in migrations {
        if migration.run_if_pending(eeprom)? {
            if applied.push(migration.name).is_err() {
                warn!("boot report full, {=str} not recorded", migration.name);
            }
        }
    }
    Ok(())
}
