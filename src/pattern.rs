//! Scattered digit patterns
//!
//! A digit `d` lights `d` randomly chosen elements of its group. The same
//! time renders differently every time; only the count carries meaning.

use crate::bounds::{DIGIT_GROUPS, DigitGroup, GROUP_COUNT, LED_COUNT};

/// Lit/unlit assignment over the whole face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LitMask([bool; LED_COUNT]);

impl Default for LitMask {
    fn default() -> Self {
        Self::empty()
    }
}

impl LitMask {
    /// Mask with every element off
    pub const fn empty() -> Self {
        Self([false; LED_COUNT])
    }

    pub fn is_lit(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    pub fn set(&mut self, index: usize, lit: bool) {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = lit;
        }
    }

    /// Number of lit elements inside a digit group
    pub fn lit_in(&self, group: DigitGroup) -> usize {
        self.0[group.range()].iter().filter(|lit| **lit).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }
}

/// Split a time into its four display digits (hour tens first)
pub const fn time_digits(hour: u8, minute: u8) -> [u8; GROUP_COUNT] {
    [hour / 10, hour % 10, minute / 10, minute % 10]
}

/// Picks which elements to light for a given time
#[derive(Debug, Clone)]
pub struct PatternSelector {
    rng: fastrand::Rng,
}

impl PatternSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Build a fresh mask for `hour:minute`
    pub fn select(&mut self, hour: u8, minute: u8) -> LitMask {
        let mut mask = LitMask::empty();
        for (digit, group) in time_digits(hour, minute).into_iter().zip(DIGIT_GROUPS) {
            self.scatter(&mut mask, group, digit);
        }
        mask
    }

    /// Light `digit` distinct elements of `group` using a partial Fisher-Yates shuffle
    #[allow(clippy::cast_possible_truncation)]
    fn scatter(&mut self, mask: &mut LitMask, group: DigitGroup, digit: u8) {
        debug_assert!(
            digit <= group.capacity,
            "digit exceeds its group capacity"
        );
        let capacity = usize::from(group.capacity);
        let count = usize::from(digit.min(group.capacity));

        let mut slots = [0u8; LED_COUNT];
        for (i, slot) in slots.iter_mut().enumerate().take(capacity) {
            *slot = i as u8;
        }
        let slots = &mut slots[..capacity];

        for i in 0..count {
            let j = self.rng.usize(i..capacity);
            slots.swap(i, j);
            mask.set(usize::from(group.start) + usize::from(slots[i]), true);
        }
    }
}
