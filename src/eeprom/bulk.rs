use crate::eeprom::{device::StorageDevice, sentinel::ERASED_BYTE, store::Eeprom};

/// Liveness signal for sweeps over the whole device.
///
/// A full sweep of a 4 KiB EEPROM takes longer than a typical watchdog
/// period, so every per-byte step calls [`beat`](Heartbeat::beat).
pub trait Heartbeat {
    fn beat(&mut self);
}

impl<F: FnMut()> Heartbeat for F {
    fn beat(&mut self) {
        self()
    }
}

/// Heartbeat for targets without a watchdog.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHeartbeat;

impl Heartbeat for NoHeartbeat {
    fn beat(&mut self) {}
}

impl<D: StorageDevice> Eeprom<D> {
    /// Sets every byte of the device to `0xFF`.
    ///
    /// Afterwards every field reads as its default and the next
    /// [`init`](Eeprom::init) performs a factory reset.
    pub fn erase(&mut self, heartbeat: &mut impl Heartbeat) {
        info!("erasing {=usize} bytes", D::CAPACITY);
        for addr in 0..D::CAPACITY {
            self.device.write_byte(addr as u16, ERASED_BYTE);
            heartbeat.beat();
        }
        debug!("erase complete");
    }
}
