/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
/// A factor of 255 returns the value unchanged.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Linear progress of `step` out of `steps`, mapped to 0-255
///
/// Returns 255 when `steps` is zero or the step is past the end.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn fraction8(step: u8, steps: u8) -> u8 {
    if steps == 0 || step >= steps {
        return 255;
    }

    ((step as u16 * 255) / steps as u16) as u8
}
