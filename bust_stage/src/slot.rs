use std::fmt;

use serde::{Deserialize, Serialize};

/// Horizontal half of the screen a bust is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
    Neutral,
}

impl Side {
    pub const DEFAULT: Side = Side::Left;

    /// Parse an authored side argument, substituting `left` for anything
    /// unrecognised.
    pub fn parse_or_default(raw: &str) -> Side {
        match raw.trim().to_ascii_lowercase().as_str() {
            "left" => Side::Left,
            "right" => Side::Right,
            "neutral" => Side::Neutral,
            other => {
                if !other.is_empty() {
                    log::debug!("unknown bust side {other:?}; using left");
                }
                Side::DEFAULT
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Neutral => "neutral",
        }
    }
}

impl Default for Side {
    fn default() -> Self {
        Side::DEFAULT
    }
}

/// Distance from the screen edge within one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Depth {
    Back,
    Center,
    Front,
}

impl Depth {
    pub const DEFAULT: Depth = Depth::Back;

    /// Parse an authored position argument, substituting `back` for anything
    /// unrecognised.
    pub fn parse_or_default(raw: &str) -> Depth {
        match raw.trim().to_ascii_lowercase().as_str() {
            "back" => Depth::Back,
            "center" => Depth::Center,
            "front" => Depth::Front,
            other => {
                if !other.is_empty() {
                    log::debug!("unknown bust position {other:?}; using back");
                }
                Depth::DEFAULT
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Depth::Back => "back",
            Depth::Center => "center",
            Depth::Front => "front",
        }
    }
}

impl Default for Depth {
    fn default() -> Self {
        Depth::DEFAULT
    }
}

/// Closed set of display slots. Neutral is a single slot with no depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotId {
    LeftBack,
    LeftCenter,
    LeftFront,
    Neutral,
    RightFront,
    RightCenter,
    RightBack,
}

impl SlotId {
    pub const COUNT: usize = 7;

    pub const ALL: [SlotId; SlotId::COUNT] = [
        SlotId::LeftBack,
        SlotId::LeftCenter,
        SlotId::LeftFront,
        SlotId::Neutral,
        SlotId::RightFront,
        SlotId::RightCenter,
        SlotId::RightBack,
    ];

    pub fn from_parts(side: Side, depth: Depth) -> SlotId {
        match (side, depth) {
            (Side::Neutral, _) => SlotId::Neutral,
            (Side::Left, Depth::Back) => SlotId::LeftBack,
            (Side::Left, Depth::Center) => SlotId::LeftCenter,
            (Side::Left, Depth::Front) => SlotId::LeftFront,
            (Side::Right, Depth::Back) => SlotId::RightBack,
            (Side::Right, Depth::Center) => SlotId::RightCenter,
            (Side::Right, Depth::Front) => SlotId::RightFront,
        }
    }

    /// Position in the fixed stack table, ordered left to right across the screen.
    pub fn index(self) -> usize {
        match self {
            SlotId::LeftBack => 0,
            SlotId::LeftCenter => 1,
            SlotId::LeftFront => 2,
            SlotId::Neutral => 3,
            SlotId::RightFront => 4,
            SlotId::RightCenter => 5,
            SlotId::RightBack => 6,
        }
    }

    pub fn side(self) -> Side {
        match self {
            SlotId::LeftBack | SlotId::LeftCenter | SlotId::LeftFront => Side::Left,
            SlotId::Neutral => Side::Neutral,
            SlotId::RightFront | SlotId::RightCenter | SlotId::RightBack => Side::Right,
        }
    }

    /// Depth of the slot; `None` for the neutral slot.
    pub fn depth(self) -> Option<Depth> {
        match self {
            SlotId::LeftBack | SlotId::RightBack => Some(Depth::Back),
            SlotId::LeftCenter | SlotId::RightCenter => Some(Depth::Center),
            SlotId::LeftFront | SlotId::RightFront => Some(Depth::Front),
            SlotId::Neutral => None,
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.depth() {
            Some(depth) => write!(f, "{}/{}", self.side().as_str(), depth.as_str()),
            None => f.write_str(Side::Neutral.as_str()),
        }
    }
}

/// How many slots the screen is divided into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SlotLayout {
    /// Left and right, each with back and front: four slots over six steps.
    Pairs,
    /// Left and right with back, center and front, plus neutral: seven slots
    /// over eight steps.
    #[default]
    Triads,
}

impl SlotLayout {
    pub fn slots(self) -> &'static [SlotId] {
        const PAIRS: [SlotId; 4] = [
            SlotId::LeftBack,
            SlotId::LeftFront,
            SlotId::RightFront,
            SlotId::RightBack,
        ];
        match self {
            SlotLayout::Pairs => &PAIRS,
            SlotLayout::Triads => &SlotId::ALL,
        }
    }

    /// Number of equal horizontal steps the screen width is divided into.
    pub fn steps(self) -> u32 {
        match self {
            SlotLayout::Pairs => 6,
            SlotLayout::Triads => 8,
        }
    }

    /// Map a requested side/depth onto a slot that exists in this layout.
    /// Combinations the layout lacks fall back to the default side or depth.
    pub fn resolve(self, side: Side, depth: Depth) -> (Side, Depth) {
        match self {
            SlotLayout::Triads => (side, depth),
            SlotLayout::Pairs => {
                let side = match side {
                    Side::Neutral => Side::DEFAULT,
                    other => other,
                };
                let depth = match depth {
                    Depth::Center => Depth::DEFAULT,
                    other => other,
                };
                (side, depth)
            }
        }
    }

    /// Steps between the slot and the screen edge of its own side. The
    /// neutral slot counts from the left edge.
    pub fn edge_step(self, slot: SlotId) -> u32 {
        match slot {
            SlotId::Neutral => self.steps() / 2,
            _ => match (self, slot.depth()) {
                (_, Some(Depth::Back)) | (_, None) => 1,
                (_, Some(Depth::Center)) => 2,
                (SlotLayout::Pairs, Some(Depth::Front)) => 2,
                (SlotLayout::Triads, Some(Depth::Front)) => 3,
            },
        }
    }

    /// Step index counted from the left edge of the screen.
    pub fn step_index(self, slot: SlotId) -> u32 {
        let edge = self.edge_step(slot);
        match slot.side() {
            Side::Right => self.steps() - edge,
            Side::Left | Side::Neutral => edge,
        }
    }
}
