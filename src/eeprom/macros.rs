/// Generates `get_<name>` / `set_<name>` for a single field type.
macro_rules! impl_typed_accessor {
    ($name:ident, $type:ty) => {
        paste::paste! {
            #[doc = "Reads a `" $type "` at `offset`, or `default` if the field is unwritten."]
            #[doc = ""]
            #[doc = "Shorthand for [`Eeprom::get`]."]
            #[inline]
            pub fn [<get_ $name>](&mut self, offset: u16, default: $type) -> Result<$type, EepromError> {
                self.get::<$type>(offset, default)
            }

            #[doc = "Writes a `" $type "` at `offset`."]
            #[doc = ""]
            #[doc = "Shorthand for [`Eeprom::set`]."]
            #[inline]
            pub fn [<set_ $name>](&mut self, offset: u16, value: $type) -> Result<(), EepromError> {
                self.set::<$type>(offset, value)
            }
        }
    };
}

/// Generates the width-named accessor family.
macro_rules! impl_typed_accessors {
    () => {
        impl_typed_accessor!(u8, u8);
        impl_typed_accessor!(u16, u16);
        impl_typed_accessor!(u32, u32);
        impl_typed_accessor!(i64, i64);
        impl_typed_accessor!(fixed16, Fixed16);
    };
}

pub(super) use impl_typed_accessor;
pub(super) use impl_typed_accessors;
