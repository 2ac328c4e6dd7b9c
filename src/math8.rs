//! 8-bit integer helpers for intensity math.

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Apply a brightness ceiling: `value * ceiling / 255`.
///
/// Unlike [`scale8`] this is exact at both ends, so a full ceiling leaves the
/// value untouched.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale_ceiling(value: u8, ceiling: u8) -> u8 {
    ((value as u16 * ceiling as u16) / 255) as u8
}

/// Undo [`scale_ceiling`]: the level that `ceiling` scales down to `value`.
///
/// Saturates at 255; a zero ceiling yields 0.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn unscale_ceiling(value: u8, ceiling: u8) -> u8 {
    if ceiling == 0 {
        return 0;
    }
    let level = value as u16 * 255 / ceiling as u16;
    if level > 255 { 255 } else { level as u8 }
}

/// Blend two 8-bit values
#[inline]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub const fn blend8(a: u8, b: u8, amount_of_b: u8) -> u8 {
    let delta = b as i16 - a as i16;

    let mut partial: u32 = (a as u32) << 16; // a * 65536
    partial = partial.wrapping_add(
        (delta as u32)
            .wrapping_mul(amount_of_b as u32)
            .wrapping_mul(257),
    ); // (b - a) * amount_of_b * 257
    partial = partial.wrapping_add(0x8000); // + 32768 for rounding

    (partial >> 16) as u8
}

/// Linearly map `position` within `0..=span` onto `from..=to`.
///
/// Positions past the end clamp to `to`; a zero span yields `to`.
#[inline]
#[allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub const fn lerp8(from: u8, to: u8, position: u32, span: u32) -> u8 {
    if span == 0 || position >= span {
        return to;
    }
    let from = from as i64;
    let delta = to as i64 - from;
    (from + delta * position as i64 / span as i64) as u8
}

/// Move `current` toward `target` by at most `max_step`.
#[inline]
pub const fn approach8(current: u8, target: u8, max_step: u8) -> u8 {
    if current < target {
        let next = current.saturating_add(max_step);
        if next > target { target } else { next }
    } else {
        let next = current.saturating_sub(max_step);
        if next < target { target } else { next }
    }
}

/// Convert a unit float (clamped to 0.0-1.0) to an 8-bit level.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn unit8(value: f32) -> u8 {
    libm::roundf(value.clamp(0.0, 1.0) * 255.0) as u8
}

/// Round and clamp a float intensity into 0-255.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn level8(value: f32) -> u8 {
    libm::roundf(value.clamp(0.0, 255.0)) as u8
}
