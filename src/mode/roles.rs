//! Role rotation mode
//!
//! Hours, minute tens and minute units each take a distinct role color
//! from a three-entry palette, rotating with the hour.

use super::{AnimationState, ColorMode};
use crate::{
    bounds::group_of,
    color::{BLUE, OFF, RED, Rgb, WHITE},
};

pub const ROLES: [Rgb; 3] = [WHITE, BLUE, RED];

/// Role used by a digit group at a rotation index
pub const fn role_index(group: usize, rotation: u8) -> usize {
    let shift = match group {
        0 | 1 => 0,
        2 => 1,
        _ => 2,
    };
    (rotation as usize + shift) % ROLES.len()
}

#[derive(Debug, Clone)]
pub struct RoleMode;

impl ColorMode for RoleMode {
    const ROTATES_HOURLY: bool = true;

    fn color_for(&self, index: usize, state: &AnimationState) -> Rgb {
        group_of(index).map_or(OFF, |group| ROLES[role_index(group, state.rotation)])
    }
}
