use serde::{Deserialize, Serialize};

pub const COLOR_RANGE: (i16, i16) = (-255, 255);
pub const GRAY_RANGE: (i16, i16) = (0, 255);

/// Color tone applied to a bust sprite: additive red/green/blue deltas and a
/// grayscale blend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tone {
    #[serde(default)]
    pub r: i16,
    #[serde(default)]
    pub g: i16,
    #[serde(default)]
    pub b: i16,
    #[serde(default)]
    pub gray: i16,
}

impl Tone {
    pub const NEUTRAL: Tone = Tone::new(0, 0, 0, 0);

    pub const fn new(r: i16, g: i16, b: i16, gray: i16) -> Self {
        Self { r, g, b, gray }
    }

    /// Clamp every channel into its valid range.
    pub fn clamped(self) -> Self {
        let color = |value: i16| value.clamp(COLOR_RANGE.0, COLOR_RANGE.1);
        Self {
            r: color(self.r),
            g: color(self.g),
            b: color(self.b),
            gray: self.gray.clamp(GRAY_RANGE.0, GRAY_RANGE.1),
        }
    }

    pub fn channels(&self) -> [i16; 4] {
        [self.r, self.g, self.b, self.gray]
    }
}

/// The pair of tones the highlight policy switches between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TintPalette {
    pub active: Tone,
    pub inactive: Tone,
}

impl TintPalette {
    pub fn for_talking(&self, talking: bool) -> Tone {
        if talking {
            self.active
        } else {
            self.inactive
        }
    }
}

impl Default for TintPalette {
    fn default() -> Self {
        Self {
            active: Tone::NEUTRAL,
            inactive: Tone::new(-100, -100, -100, 0),
        }
    }
}
