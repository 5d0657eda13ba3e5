//! Layer mask arithmetic.
//!
//! Mirrors the `onlyIncluding` / `everythingBut` helpers emitted into the
//! generated layers class, including C#'s `int` shift semantics (the shift
//! count is taken modulo 32).

/// Number of layers a Unity project can define.
pub const MAX_LAYERS: usize = 32;

/// Bitmask with only the given layers set.
pub fn only_including(layers: &[i32]) -> i32 {
    layers
        .iter()
        .fold(0, |mask, &layer| mask | 1i32.wrapping_shl(layer as u32))
}

/// Bitmask with every layer set except the given ones.
pub fn everything_but(layers: &[i32]) -> i32 {
    !only_including(layers)
}
