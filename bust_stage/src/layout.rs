//! Pure screen placement for busts.
//!
//! The screen width is cut into equal steps (six for the pair layout, eight
//! for the triad layout). Each slot sits on a fixed step counted inward from
//! the edge of its own side; the neutral slot sits on the middle step. Busts
//! always stand on the bottom edge of the screen.

use serde::{Deserialize, Serialize};

use crate::config::{Facing, Origin, StageConfig};
use crate::slot::{Side, SlotId};

/// Target transform for a bust sprite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub anchor_x: f32,
    pub anchor_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Placement {
    pub fn is_mirrored(&self) -> bool {
        self.scale_x < 0.0
    }
}

pub fn placement(config: &StageConfig, slot: SlotId, flipped: bool) -> Placement {
    let step = config.screen.width / config.layout.steps() as f32;
    let anchor_y = match config.origin {
        Origin::Bottom => 1.0,
        Origin::Center => 0.5,
    };
    let scale_x = if mirrored(config.facing, slot.side(), flipped) {
        -1.0
    } else {
        1.0
    };
    Placement {
        x: config.layout.step_index(slot) as f32 * step,
        y: config.screen.height,
        anchor_x: 0.5,
        anchor_y,
        scale_x,
        scale_y: 1.0,
    }
}

/// Whether the artwork must be mirrored horizontally.
///
/// Unflipped busts look toward the screen center, so art facing the same
/// direction as the side it stands on gets mirrored; `flipped` inverts that.
/// Neutral busts and neutral-facing art have no inward direction, so only
/// `flipped` decides.
pub fn mirrored(facing: Facing, side: Side, flipped: bool) -> bool {
    if side == Side::Neutral || facing == Facing::Neutral {
        return flipped;
    }
    facing.matches_side(side) != flipped
}
