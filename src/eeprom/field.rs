/// Widest field the accessor layer handles, in bytes.
pub const MAX_FIELD_WIDTH: usize = 8;

/// A fixed-width value stored at an EEPROM offset.
///
/// `decode` and `encode` work on exactly `WIDTH` bytes. The sentinel check is
/// not part of the codec: [`Eeprom::get`](crate::eeprom::Eeprom::get) applies it
/// before calling `decode`, for every implementation alike.
///
/// `WIDTH` must be between 1 and [`MAX_FIELD_WIDTH`].
pub trait Field: Copy {
    /// Number of bytes occupied on the device.
    const WIDTH: usize;

    /// Decodes a value from `bytes` (`bytes.len() == WIDTH`).
    fn decode(bytes: &[u8]) -> Self;

    /// Encodes the value into `out` (`out.len() == WIDTH`).
    fn encode(&self, out: &mut [u8]);
}

/// Implements [`Field`] for little-endian integers.
macro_rules! impl_int_field {
    ($($type:ty),* $(,)?) => {
        $(
            impl Field for $type {
                const WIDTH: usize = core::mem::size_of::<$type>();

                #[inline]
                fn decode(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; core::mem::size_of::<$type>()];
                    raw.copy_from_slice(bytes);
                    <$type>::from_le_bytes(raw)
                }

                #[inline]
                fn encode(&self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_le_bytes());
                }
            }
        )*
    };
}

impl_int_field!(u8, u16, u32, i64);

/// Unsigned 8.8 fixed-point value.
///
/// Stored as one integer byte followed by one fraction byte; the value is
/// `integer + fraction / 256`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Fixed16 {
    integer: u8,
    fraction: u8,
}

impl Fixed16 {
    /// Builds a value from its raw integer and fraction bytes.
    pub const fn from_parts(integer: u8, fraction: u8) -> Self {
        Self { integer, fraction }
    }

    /// Converts a float, truncating toward zero at 1/256 resolution.
    ///
    /// Values outside `0.0..256.0` saturate.
    pub fn from_f32(value: f32) -> Self {
        let integer = value as u8;
        let fraction = ((value - integer as f32) * 256.0) as u8;
        Self { integer, fraction }
    }

    /// Exact float value.
    pub fn to_f32(self) -> f32 {
        self.integer as f32 + self.fraction as f32 / 256.0
    }

    /// Whole part.
    pub const fn integer(self) -> u8 {
        self.integer
    }

    /// Fractional part in 1/256 steps.
    pub const fn fraction(self) -> u8 {
        self.fraction
    }
}

impl From<Fixed16> for f32 {
    fn from(value: Fixed16) -> Self {
        value.to_f32()
    }
}

impl Field for Fixed16 {
    const WIDTH: usize = 2;

    #[inline]
    fn decode(bytes: &[u8]) -> Self {
        Self::from_parts(bytes[0], bytes[1])
    }

    #[inline]
    fn encode(&self, out: &mut [u8]) {
        out[0] = self.integer;
        out[1] = self.fraction;
    }
}
