use smart_leds::hsv::hsv2rgb;

use crate::{
    color::{Hsv, Rgb},
    math8::scale8,
};

/// Sample the fully saturated hue wheel at a 16-bit position
///
/// The whole `u16` range maps onto one turn of the wheel.
#[allow(clippy::cast_possible_truncation)]
pub fn hue_wheel(hue: u16) -> Rgb {
    hsv2rgb(Hsv {
        hue: (hue >> 8) as u8,
        sat: 255,
        val: 255,
    })
}

/// Scale every channel of a color by a linear factor (0-255 = 0.0-1.0)
#[inline]
pub fn scale_color(color: Rgb, factor: u8) -> Rgb {
    Rgb {
        r: scale8(color.r, factor),
        g: scale8(color.g, factor),
        b: scale8(color.b, factor),
    }
}
