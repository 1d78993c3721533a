//! Static binary-to-value conversion for fixed-width primitives.
//!
//! [FixedWidth] is implemented for every primitive [ByteReader](crate::reader::ByteReader)
//! decodes from a fixed number of bytes, so the generic read path resolves the
//! conversion at compile time.

// =#========================================================================#=
// BYTE ORDER
// =#========================================================================#=
/// Byte order used to assemble a multi-byte value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    /// Least-significant byte first.
    Little,
    /// Most-significant byte first.
    Big,
    /// Whatever order the host uses, no swap is performed.
    ///
    /// Little-endian on all common platforms.
    #[default]
    Native,
}

// =#========================================================================#=
// FIXED WIDTH (Trait)
// =#========================================================================#=
/// A value decoded from exactly [WIDTH](FixedWidth::WIDTH) bytes.
///
/// `Default` provides the zero value returned for truncated reads.
pub trait FixedWidth: Sized + Copy + Default {
    /// Number of bytes the value occupies.
    const WIDTH: usize;

    /// Decodes the value from the first [WIDTH](FixedWidth::WIDTH) bytes.
    ///
    /// # Arguments
    /// * `bytes` - At least `WIDTH` bytes
    /// * `order` - Order the bytes were stored in
    ///
    /// # Panics
    /// Panics if `bytes` is shorter than `WIDTH`.
    fn decode(bytes: &[u8], order: ByteOrder) -> Self;
}

macro_rules! impl_fixed_width {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FixedWidth for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                #[inline]
                fn decode(bytes: &[u8], order: ByteOrder) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(&bytes[..Self::WIDTH]);
                    match order {
                        ByteOrder::Little => <$ty>::from_le_bytes(raw),
                        ByteOrder::Big => <$ty>::from_be_bytes(raw),
                        ByteOrder::Native => <$ty>::from_ne_bytes(raw),
                    }
                }
            }
        )*
    };
}

impl_fixed_width!(i8, u8, i16, u16, i32, u32, i64, u64, f32, f64);

/// Largest [FixedWidth::WIDTH] of any implementor, used to size stack buffers.
pub(crate) const MAX_FIXED_WIDTH: usize = 8;

/// Assembles a 24-bit magnitude from three bytes.
pub(crate) fn u24_from_bytes(bytes: [u8; 3], order: ByteOrder) -> u32 {
    let [b0, b1, b2] = bytes.map(u32::from);
    match order {
        ByteOrder::Big => (b0 << 16) | (b1 << 8) | b2,
        ByteOrder::Little => b0 | (b1 << 8) | (b2 << 16),
        ByteOrder::Native if cfg!(target_endian = "big") => (b0 << 16) | (b1 << 8) | b2,
        ByteOrder::Native => b0 | (b1 << 8) | (b2 << 16),
    }
}

/// Replicates bit 23 into the upper byte.
pub(crate) fn sign_extend_24(value: u32) -> i32 {
    if value & 0x0080_0000 != 0 {
        (value | 0xFF00_0000) as i32
    } else {
        value as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_respects_order() {
        let bytes = [0x01, 0x02, 0x03, 0x04];
        assert_eq!(u32::decode(&bytes, ByteOrder::Little), 0x0403_0201);
        assert_eq!(u32::decode(&bytes, ByteOrder::Big), 0x0102_0304);
        assert_eq!(i16::decode(&bytes, ByteOrder::Big), 0x0102);
        assert_eq!(u32::decode(&bytes, ByteOrder::Native), u32::from_ne_bytes(bytes));
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let bytes = [0xFF, 0x7F, 0xAA, 0xBB];
        assert_eq!(i16::decode(&bytes, ByteOrder::Little), i16::MAX);
        assert_eq!(u8::decode(&bytes, ByteOrder::Big), 0xFF);
    }

    #[test]
    fn test_u24_and_sign_extension() {
        assert_eq!(u24_from_bytes([0x01, 0x02, 0x03], ByteOrder::Little), 0x03_0201);
        assert_eq!(u24_from_bytes([0x01, 0x02, 0x03], ByteOrder::Big), 0x01_0203);
        assert_eq!(sign_extend_24(0xFF_FFFF), -1);
        assert_eq!(sign_extend_24(0x80_0000), -8_388_608);
        assert_eq!(sign_extend_24(0x7F_FFFF), 8_388_607);
    }
}
