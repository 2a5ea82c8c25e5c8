//! Shift types.

use serde::{Deserialize, Serialize};

/// One of the three daily shifts, in processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftType {
    Morning,
    Afternoon,
    Night,
}

impl ShiftType {
    /// All shift types in the order the engine fills them.
    pub const ALL: [ShiftType; 3] = [Self::Morning, Self::Afternoon, Self::Night];

    /// Position within [`ShiftType::ALL`]; also the row-block index in a week grid.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Self::Morning => 0,
            Self::Afternoon => 1,
            Self::Night => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order() {
        for (i, s) in ShiftType::ALL.iter().enumerate() {
            assert_eq!(s.index(), i);
        }
    }
}
