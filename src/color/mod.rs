mod palette;
mod wheel;

use smart_leds::RGB8;
use smart_leds::hsv::Hsv as HSV;

pub use palette::{BLUE, GREEN, OFF, RED, WHITE, YELLOW};
pub use wheel::{hue_wheel, scale_color};

pub type Rgb = RGB8;
pub type Hsv = HSV;
