use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::slot::{Side, SlotLayout};
use crate::tone::{Tone, TintPalette};

/// Direction the bust artwork faces before any mirroring. Every portrait in a
/// project is expected to face the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    #[default]
    Left,
    Right,
    Neutral,
}

impl Facing {
    pub fn matches_side(self, side: Side) -> bool {
        matches!(
            (self, side),
            (Facing::Left, Side::Left) | (Facing::Right, Side::Right)
        )
    }
}

/// Where on the portrait image the sprite is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Anchor at the bottom edge; tall busts may be cut off at the top.
    #[default]
    Bottom,
    /// Anchor at the vertical center; only the top half of the bust shows.
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: f32,
    pub height: f32,
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self {
            width: 816.0,
            height: 624.0,
        }
    }
}

/// Load-time stage configuration, static for the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub facing: Facing,
    pub origin: Origin,
    pub layout: SlotLayout,
    pub screen: ScreenSize,
    pub active_tint: Tone,
    pub inactive_tint: Tone,
}

impl Default for StageConfig {
    fn default() -> Self {
        let palette = TintPalette::default();
        Self {
            facing: Facing::default(),
            origin: Origin::default(),
            layout: SlotLayout::default(),
            screen: ScreenSize::default(),
            active_tint: palette.active,
            inactive_tint: palette.inactive,
        }
    }
}

impl StageConfig {
    /// Read the configuration from `path`, or fall back to defaults when no
    /// path is given.
    pub fn from_json_file(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read stage config: {}", path.display()))?;
        let config: StageConfig = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse stage config json: {}", path.display()))?;
        Ok(config.normalized())
    }

    /// Clamp tints into range and make sure the screen has a usable size.
    pub fn normalized(mut self) -> Self {
        for tone in [&mut self.active_tint, &mut self.inactive_tint] {
            let clamped = tone.clamped();
            if clamped != *tone {
                log::warn!("tint {:?} out of range; clamped to {:?}", tone, clamped);
                *tone = clamped;
            }
        }
        self.screen.width = self.screen.width.max(1.0);
        self.screen.height = self.screen.height.max(1.0);
        self
    }

    pub fn palette(&self) -> TintPalette {
        TintPalette {
            active: self.active_tint,
            inactive: self.inactive_tint,
        }
    }
}
