//! Palette rotation mode
//!
//! Each digit group takes one entry of a fixed four-color palette. The
//! assignment shifts by the hourly rotation index.

use super::{AnimationState, ColorMode};
use crate::{
    bounds::group_of,
    color::{BLUE, GREEN, OFF, RED, Rgb, YELLOW},
};

pub const PALETTE: [Rgb; 4] = [RED, GREEN, BLUE, YELLOW];

/// Palette entry used by a digit group at a rotation index
pub const fn palette_index(group: usize, rotation: u8) -> usize {
    (group + rotation as usize) % PALETTE.len()
}

#[derive(Debug, Clone)]
pub struct PaletteMode;

impl ColorMode for PaletteMode {
    const ROTATES_HOURLY: bool = true;

    fn color_for(&self, index: usize, state: &AnimationState) -> Rgb {
        group_of(index).map_or(OFF, |group| PALETTE[palette_index(group, state.rotation)])
    }
}
