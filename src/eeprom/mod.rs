#[macro_use]
mod log;

pub mod boot;
pub mod builder;
pub mod bulk;
pub mod capacity;
pub mod critical;
pub mod device;
pub mod error;
pub mod field;
pub mod helpers;
mod macros;
#[cfg(feature = "media")]
pub mod media;
pub mod migration;
pub mod sentinel;
pub mod store;
pub mod version;

#[cfg(test)]
mod test_support;

pub use boot::{BootReport, Layout};
pub use builder::BootConfigBuilder;
pub use bulk::{Heartbeat, NoHeartbeat};
pub use capacity::HardwareClass;
pub use critical::InterruptFree;
pub use device::StorageDevice;
pub use error::EepromError;
pub use field::{Field, Fixed16};
#[cfg(feature = "media")]
pub use media::{MediaName, MediaSink, MediaSource};
pub use migration::Migration;
pub use sentinel::{ERASED_BYTE, is_unwritten};
pub use store::Eeprom;
pub use version::{BootConfig, FirmwareVersion, VersionRecord, VersionState};

pub mod prelude {
    pub use super::{
        BootConfig, BootConfigBuilder, BootReport, Eeprom, EepromError, Field, FirmwareVersion,
        Fixed16, HardwareClass, Heartbeat, InterruptFree, Layout, Migration, NoHeartbeat,
        StorageDevice, VersionRecord, VersionState,
    };

    #[cfg(feature = "media")]
    pub use super::{MediaName, MediaSink, MediaSource};
}
