//! Die face values.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DiceError, Result};

/// One of the six faces of a standard die.
///
/// The inner value is always in `1..=6`; there is no way to construct a
/// face outside that range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct FaceValue(u8);

impl FaceValue {
    pub const ONE: Self = Self(1);
    pub const SIX: Self = Self(6);

    /// All six faces in ascending order.
    pub const ALL: [Self; 6] = [Self(1), Self(2), Self(3), Self(4), Self(5), Self(6)];

    /// Create a face value, returning `None` outside `1..=6`.
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= 6 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// The numeric face value.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index, for table lookups.
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// Whether this face shows an odd number of pips.
    pub const fn is_odd(self) -> bool {
        self.0 % 2 == 1
    }
}

impl TryFrom<u8> for FaceValue {
    type Error = DiceError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value).ok_or_else(|| DiceError::Input {
            message: format!("Face value {} is out of range", value),
            help: Some("Dice faces are numbered 1 to 6".to_string()),
        })
    }
}

impl From<FaceValue> for u8 {
    fn from(face: FaceValue) -> Self {
        face.0
    }
}

impl fmt::Display for FaceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range() {
        assert!(FaceValue::new(0).is_none());
        assert!(FaceValue::new(7).is_none());
        for v in 1..=6 {
            assert_eq!(FaceValue::new(v).unwrap().get(), v);
        }
    }

    #[test]
    fn test_try_from() {
        assert!(FaceValue::try_from(3).is_ok());
        assert!(matches!(FaceValue::try_from(9), Err(DiceError::Input { .. })));
    }

    #[test]
    fn test_index_and_parity() {
        assert_eq!(FaceValue::ONE.index(), 0);
        assert_eq!(FaceValue::SIX.index(), 5);
        assert!(FaceValue::ONE.is_odd());
        assert!(!FaceValue::SIX.is_odd());
    }
}
