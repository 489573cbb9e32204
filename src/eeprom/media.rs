//! Backup and restore of the whole device to removable media.
//!
//! The media side is a byte stream to or from a named file; how the file
//! system is driven is up to the [`MediaSink`] / [`MediaSource`] implementation.

use crate::eeprom::{
    EepromError,
    bulk::Heartbeat,
    device::StorageDevice,
    store::Eeprom,
};

/// Longest file name handed to the media layer.
pub const MAX_NAME_LEN: usize = 15;

/// A media file name, truncated to [`MAX_NAME_LEN`] bytes on a character
/// boundary.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MediaName(heapless::String<MAX_NAME_LEN>);

impl MediaName {
    pub fn new(name: &str) -> Self {
        let mut out = heapless::String::new();
        for ch in name.chars() {
            if out.push(ch).is_err() {
                break;
            }
        }
        Self(out)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for MediaName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl core::ops::Deref for MediaName {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

/// Destination for a device backup.
pub trait MediaSink {
    #[cfg(feature = "defmt")]
    type Error: defmt::Format;
    #[cfg(not(feature = "defmt"))]
    type Error;

    /// Opens `name` for writing.
    fn start_capture(&mut self, name: &str) -> Result<(), Self::Error>;
    fn write_byte(&mut self, byte: u8);
    fn finish_capture(&mut self);
}

/// Source for a device restore.
pub trait MediaSource {
    #[cfg(feature = "defmt")]
    type Error: defmt::Format;
    #[cfg(not(feature = "defmt"))]
    type Error;

    /// Opens `name` for reading.
    fn start_playback(&mut self, name: &str) -> Result<(), Self::Error>;
    /// Next byte of the file, or `None` at end of file.
    fn next_byte(&mut self) -> Option<u8>;
    fn finish_playback(&mut self);
}

impl<D: StorageDevice> Eeprom<D> {
    /// Streams every byte of the device to `name` on `media`.
    ///
    /// Returns the number of bytes written, which is always the device
    /// capacity. If the file cannot be opened nothing is written and
    /// [`EepromError::MediaUnavailable`] is returned.
    pub fn save_to_media<M: MediaSink>(
        &mut self,
        media: &mut M,
        name: &str,
        heartbeat: &mut impl Heartbeat,
    ) -> Result<usize, EepromError> {
        let name = MediaName::new(name);
        if let Err(err) = media.start_capture(&name) {
            warn!("cannot open {=str} for backup: {}", name.as_str(), err);
            return Err(EepromError::MediaUnavailable);
        }

        info!("saving eeprom to {=str}", name.as_str());
        for addr in 0..D::CAPACITY {
            let byte = self.device.read_byte(addr as u16);
            media.write_byte(byte);
            heartbeat.beat();
        }
        media.finish_capture();

        Ok(D::CAPACITY)
    }

    /// Loads the device from `name` on `media`.
    ///
    /// Bytes are written from address 0 up. If the file is shorter than the
    /// device, the sweep stops at end of file and the remaining addresses
    /// keep their previous contents. Returns the number of bytes restored.
    pub fn restore_from_media<M: MediaSource>(
        &mut self,
        media: &mut M,
        name: &str,
        heartbeat: &mut impl Heartbeat,
    ) -> Result<usize, EepromError> {
        let name = MediaName::new(name);
        if let Err(err) = media.start_playback(&name) {
            warn!("cannot open {=str} for restore: {}", name.as_str(), err);
            return Err(EepromError::MediaUnavailable);
        }

        info!("restoring eeprom from {=str}", name.as_str());
        let mut restored = 0;
        for addr in 0..D::CAPACITY {
            let Some(byte) = media.next_byte() else {
                debug!("{=str} ended after {=usize} bytes", name.as_str(), restored);
                break;
            };
            self.device.write_byte(addr as u16, byte);
            heartbeat.beat();
            restored += 1;
        }
        media.finish_playback();

        Ok(restored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eeprom::{
        NoHeartbeat,
        test_support::{CountingHeartbeat, MediaFault, MemoryMedia, test_eeprom},
    };

    #[test]
    fn name_truncation() {
        assert_eq!(MediaName::new("eeprom.bin").as_str(), "eeprom.bin");
        assert_eq!(
            MediaName::new("a-very-long-backup-name.bin").as_str(),
            "a-very-long-bac"
        );
        // Multi-byte characters are never split.
        assert_eq!(MediaName::new("ééééééééé").as_str(), "ééééééé");
        assert_eq!(&*MediaName::from("x"), "x");
    }

    #[test]
    fn save_streams_whole_device() {
        let mut eeprom = test_eeprom();
        eeprom.set_u16(4, 0xBEEF).unwrap();
        let mut media = MemoryMedia::<128>::new();
        let mut heartbeat = CountingHeartbeat::default();

        let written = eeprom.save_to_media(&mut media, "backup.bin", &mut heartbeat);

        assert_eq!(written, Ok(eeprom.capacity()));
        assert_eq!(media.name.as_str(), "backup.bin");
        assert!(media.closed);
        assert_eq!(media.data.as_slice(), eeprom.device().bytes());
        assert_eq!(heartbeat.beats, eeprom.capacity());
    }

    #[test]
    fn save_fails_fast_when_media_refuses() {
        let mut eeprom = test_eeprom();
        let mut media = MemoryMedia::<128>::unavailable();
        let mut heartbeat = CountingHeartbeat::default();

        assert_eq!(
            eeprom.save_to_media(&mut media, "backup.bin", &mut heartbeat),
            Err(EepromError::MediaUnavailable)
        );
        assert!(media.data.is_empty());
        assert!(!media.closed);
        assert_eq!(heartbeat.beats, 0);
    }

    #[test]
    fn save_then_restore_recovers_contents() {
        let mut source = test_eeprom();
        source.set_u32(0, 0x0102_0304).unwrap();
        source.set_i64(8, -5).unwrap();
        let mut media = MemoryMedia::<128>::new();
        source
            .save_to_media(&mut media, "cfg.bin", &mut NoHeartbeat)
            .unwrap();

        let mut target = test_eeprom();
        let restored = target
            .restore_from_media(&mut media, "cfg.bin", &mut NoHeartbeat)
            .unwrap();

        assert_eq!(restored, target.capacity());
        assert_eq!(target.device().bytes(), source.device().bytes());
        assert_eq!(target.get_i64(8, 0).unwrap(), -5);
    }

    #[test]
    fn short_file_leaves_tail_untouched() {
        let mut eeprom = test_eeprom();
        for addr in 0..eeprom.capacity() as u16 {
            eeprom.write_byte(addr, 0x55).unwrap();
        }
        let mut media = MemoryMedia::<128>::with_contents(&[1, 2, 3, 4]);
        let mut heartbeat = CountingHeartbeat::default();

        let restored = eeprom
            .restore_from_media(&mut media, "short.bin", &mut heartbeat)
            .unwrap();

        assert_eq!(restored, 4);
        assert_eq!(heartbeat.beats, 4);
        assert!(media.closed);
        assert_eq!(&eeprom.device().bytes()[..4], &[1, 2, 3, 4]);
        assert!(eeprom.device().bytes()[4..].iter().all(|&b| b == 0x55));
        assert_eq!(eeprom.device().write_count(4), 1);
    }

    #[test]
    fn long_file_stops_at_capacity() {
        let mut eeprom = test_eeprom();
        let mut media = MemoryMedia::<128>::with_contents(&[0xAB; 128]);

        let restored = eeprom
            .restore_from_media(&mut media, "long.bin", &mut NoHeartbeat)
            .unwrap();

        assert_eq!(restored, eeprom.capacity());
        assert_eq!(media.remaining(), 128 - eeprom.capacity());
    }

    #[test]
    fn restore_fails_fast_when_media_refuses() {
        let mut eeprom = test_eeprom();
        let mut media = MemoryMedia::<128>::unavailable();

        assert_eq!(
            eeprom.restore_from_media(&mut media, "missing.bin", &mut NoHeartbeat),
            Err(EepromError::MediaUnavailable)
        );
        assert_eq!(eeprom.device().total_writes(), 0);
    }

    #[test]
    fn driver_error_is_reported_as_unavailable() {
        let mut eeprom = test_eeprom();
        let mut media = MemoryMedia::<128>::unavailable();
        assert_eq!(media.start_capture("x.bin"), Err(MediaFault::NoCard));
        assert_eq!(media.start_playback("x.bin"), Err(MediaFault::NoCard));

        assert_eq!(
            eeprom.save_to_media(&mut media, "x.bin", &mut NoHeartbeat),
            Err(EepromError::MediaUnavailable)
        );
        assert_eq!(
            eeprom.restore_from_media(&mut media, "x.bin", &mut NoHeartbeat),
            Err(EepromError::MediaUnavailable)
        );
        assert!(media.name.is_empty());
    }

    #[test]
    fn long_names_are_truncated_before_open() {
        let mut eeprom = test_eeprom();
        let mut media = MemoryMedia::<128>::new();

        eeprom
            .save_to_media(&mut media, "settings-backup-2026.bin", &mut NoHeartbeat)
            .unwrap();

        assert_eq!(media.name.as_str(), "settings-backup");
    }
}
