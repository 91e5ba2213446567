//! Byte count to human-readable unit conversion.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

/// Binary size unit, each step a factor of 1024.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, EnumIter, Serialize, Deserialize)]
pub enum ByteUnit {
    B,
    K,
    M,
    G,
    T,
}

impl ByteUnit {
    /// Number of bytes in one of this unit.
    pub fn factor(self) -> u64 {
        1u64 << (10 * self as u32)
    }
}

/// A byte count expressed in the largest unit that keeps it below 1024.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HumanSize {
    /// Magnitude, rounded to two decimals above bytes.
    pub magnitude: f64,
    /// Unit of the magnitude.
    pub unit: ByteUnit,
}

impl HumanSize {
    /// Convert a byte count.
    ///
    /// Counts below 1024 stay exact bytes. Otherwise each unit from `K`
    /// upwards is tried in turn and the first whose rounded magnitude is
    /// below 1024 wins; anything larger is expressed in `T`.
    pub fn from_bytes(bytes: u64) -> Self {
        if bytes < ByteUnit::K.factor() {
            return Self {
                magnitude: bytes as f64,
                unit: ByteUnit::B,
            };
        }

        let scale = |unit: ByteUnit| round2(bytes as f64 / unit.factor() as f64);
        let unit = ByteUnit::iter()
            .skip(1)
            .find(|&unit| scale(unit) < 1024.0)
            .unwrap_or(ByteUnit::T);

        Self {
            magnitude: scale(unit),
            unit,
        }
    }
}

impl fmt::Display for HumanSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            ByteUnit::B => write!(f, "{}{}", self.magnitude as u64, self.unit),
            // Shortest form of the rounded value, keeping one decimal: 1.5K, 2.0M.
            unit if self.magnitude.fract() == 0.0 => write!(f, "{:.1}{}", self.magnitude, unit),
            unit => write!(f, "{}{}", self.magnitude, unit),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
