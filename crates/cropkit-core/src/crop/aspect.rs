//! Aspect-ratio presets for the crop rectangle.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Crop aspect-ratio constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectRatio {
    /// No constraint.
    #[default]
    Free,
    /// 1:1
    Square,
    /// 3:4 portrait
    ThreeFour,
    /// 4:3 landscape
    FourThree,
    /// 16:9 landscape
    SixteenNine,
    /// 9:16 portrait
    NineSixteen,
}

impl AspectRatio {
    /// All presets, in the order they are offered to the user.
    pub const ALL: [AspectRatio; 6] = [
        AspectRatio::Free,
        AspectRatio::Square,
        AspectRatio::ThreeFour,
        AspectRatio::FourThree,
        AspectRatio::SixteenNine,
        AspectRatio::NineSixteen,
    ];

    /// Width and height terms of the ratio, `(0, 0)` for `Free`.
    pub fn terms(self) -> (f32, f32) {
        match self {
            AspectRatio::Free => (0.0, 0.0),
            AspectRatio::Square => (1.0, 1.0),
            AspectRatio::ThreeFour => (3.0, 4.0),
            AspectRatio::FourThree => (4.0, 3.0),
            AspectRatio::SixteenNine => (16.0, 9.0),
            AspectRatio::NineSixteen => (9.0, 16.0),
        }
    }

    /// Target width / height, or `None` when unconstrained.
    pub fn ratio(self) -> Option<f32> {
        match self {
            AspectRatio::Free => None,
            _ => {
                let (w, h) = self.terms();
                Some(w / h)
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AspectRatio::Free => "Free",
            AspectRatio::Square => "1:1",
            AspectRatio::ThreeFour => "3:4",
            AspectRatio::FourThree => "4:3",
            AspectRatio::SixteenNine => "16:9",
            AspectRatio::NineSixteen => "9:16",
        }
    }

    /// Stable numeric id used across the WASM boundary.
    pub fn from_index(index: u8) -> Option<AspectRatio> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn index(self) -> u8 {
        Self::ALL.iter().position(|a| *a == self).unwrap_or(0) as u8
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(AspectRatio::Free),
            "1:1" | "square" => Ok(AspectRatio::Square),
            "3:4" | "three_four" => Ok(AspectRatio::ThreeFour),
            "4:3" | "four_three" => Ok(AspectRatio::FourThree),
            "16:9" | "sixteen_nine" => Ok(AspectRatio::SixteenNine),
            "9:16" | "nine_sixteen" => Ok(AspectRatio::NineSixteen),
            other => Err(format!(
                "invalid aspect ratio '{other}'; expected one of free, 1:1, 3:4, 4:3, 16:9, 9:16"
            )),
        }
    }
}
