//! Fixed-layout row types and little-endian field accessors.
//!
//! A [`Row`] maps a host record to and from exactly `SIZE` bytes. The
//! accessors below read and write primitive fields at byte offsets inside a
//! row slice, so `encode`/`decode` implementations and raw predicates can
//! share one description of the layout.

use crate::table::ColumnDef;

/// A host record with a fixed binary layout.
///
/// `encode` must fill `out[..SIZE]` and `decode(encode(x))` must give back an
/// equal record. `SIZE` must be non-zero.
pub trait Row: Sized {
    /// Size of the encoded record in bytes.
    const SIZE: usize;

    /// Writes the record into `out`, which is exactly `SIZE` bytes.
    fn encode(&self, out: &mut [u8]);

    /// Reads a record from `bytes`, which is exactly `SIZE` bytes.
    fn decode(bytes: &[u8]) -> Self;

    /// Column descriptors registered when a typed table is created.
    fn columns() -> Vec<ColumnDef> {
        Vec::new()
    }
}

macro_rules! le_accessors {
    ($($ty:ty => $read:ident, $write:ident;)*) => {
        $(
            #[doc = concat!("Reads a little-endian `", stringify!($ty), "` at `offset`.")]
            ///
            /// # Panics
            /// Panics if the field extends past the end of `row`.
            #[inline]
            pub fn $read(row: &[u8], offset: usize) -> $ty {
                let mut bytes = [0u8; std::mem::size_of::<$ty>()];
                bytes.copy_from_slice(&row[offset..offset + std::mem::size_of::<$ty>()]);
                <$ty>::from_le_bytes(bytes)
            }

            #[doc = concat!("Writes a little-endian `", stringify!($ty), "` at `offset`.")]
            ///
            /// # Panics
            /// Panics if the field extends past the end of `row`.
            #[inline]
            pub fn $write(row: &mut [u8], offset: usize, value: $ty) {
                row[offset..offset + std::mem::size_of::<$ty>()]
                    .copy_from_slice(&value.to_le_bytes());
            }
        )*
    };
}

le_accessors! {
    i32 => read_i32, write_i32;
    i64 => read_i64, write_i64;
    u32 => read_u32, write_u32;
    u64 => read_u64, write_u64;
    f32 => read_f32, write_f32;
    f64 => read_f64, write_f64;
}

/// Reads a one-byte boolean (non-zero is `true`).
#[inline]
pub fn read_bool(row: &[u8], offset: usize) -> bool {
    row[offset] != 0
}

/// Writes a one-byte boolean.
#[inline]
pub fn write_bool(row: &mut [u8], offset: usize, value: bool) {
    row[offset] = u8::from(value);
}

/// Reads a zero-padded UTF-8 string field of `len` bytes.
///
/// The value ends at the first zero byte; invalid UTF-8 is replaced.
pub fn read_str(row: &[u8], offset: usize, len: usize) -> String {
    let field = &row[offset..offset + len];
    let end = field.iter().position(|&b| b == 0).unwrap_or(len);
    String::from_utf8_lossy(&field[..end]).into_owned()
}

/// Writes `value` into a string field of `len` bytes, truncating on a
/// character boundary and zero-padding the rest.
pub fn write_str(row: &mut [u8], offset: usize, len: usize, value: &str) {
    let mut end = value.len().min(len);
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    let field = &mut row[offset..offset + len];
    field[..end].copy_from_slice(&value.as_bytes()[..end]);
    field[end..].fill(0);
}
