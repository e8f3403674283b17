use core::ops::Range;

/// Number of addressable elements on the clock face
pub const LED_COUNT: usize = 27;

/// Number of digit groups (hour tens, hour units, minute tens, minute units)
pub const GROUP_COUNT: usize = 4;

/// Contiguous slice of the element array dedicated to one decimal digit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitGroup {
    pub start: u8,
    pub capacity: u8,
}

impl DigitGroup {
    pub const fn new(start: u8, capacity: u8) -> Self {
        Self { start, capacity }
    }

    /// Index one past the last element of the group
    pub const fn end(self) -> u8 {
        self.start + self.capacity
    }

    /// Element indices covered by the group
    pub const fn range(self) -> Range<usize> {
        self.start as usize..self.end() as usize
    }

    pub const fn contains(self, index: usize) -> bool {
        index >= self.start as usize && index < self.end() as usize
    }
}

/// Digit groups in display order.
///
/// Each capacity covers the largest value its digit can take:
/// hour tens 2, hour units 9, minute tens 5, minute units 9.
pub const DIGIT_GROUPS: [DigitGroup; GROUP_COUNT] = [
    DigitGroup::new(0, 3),
    DigitGroup::new(3, 9),
    DigitGroup::new(12, 6),
    DigitGroup::new(18, 9),
];

const _: () = assert!(covers_face(&DIGIT_GROUPS));

/// Checks that the groups tile the whole face without gaps or overlaps
const fn covers_face(groups: &[DigitGroup]) -> bool {
    let mut expected_start = 0;
    let mut i = 0;
    while i < groups.len() {
        if groups[i].start != expected_start {
            return false;
        }
        expected_start = groups[i].end();
        i += 1;
    }
    expected_start as usize == LED_COUNT
}

/// Get the digit group an element belongs to
pub fn group_of(index: usize) -> Option<usize> {
    DIGIT_GROUPS.iter().position(|group| group.contains(index))
}
