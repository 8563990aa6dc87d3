use bust_stage::{BustStage, SlotId, Tone};
use serde::Serialize;

use crate::tween::{SpriteState, TweenPresenter};

/// What the renderer draws for one occupied slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotSnapshot {
    pub slot: SlotId,
    pub actor: String,
    pub talking: bool,
    pub tone: Tone,
    pub sprite: SpriteState,
    /// Busts hidden underneath the visible one, bottom first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hidden: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub frame: u32,
    pub auto_tint: bool,
    pub slots: Vec<SlotSnapshot>,
}

/// Answer the per-frame render query: the topmost bust of every slot, where
/// its sprite is and which tone it wears.
pub fn compose_frame(frame: u32, stage: &BustStage, presenter: &TweenPresenter) -> FrameSnapshot {
    let slots = stage
        .visible()
        .map(|(slot, bust)| {
            let sprite = presenter.sprite(bust.actor_name()).unwrap_or_else(|| {
                let target = stage.placement_of(bust);
                SpriteState {
                    image: bust.image().to_string(),
                    x: target.x,
                    y: target.y,
                    scale_x: target.scale_x,
                    scale_y: target.scale_y,
                    anchor_x: target.anchor_x,
                    anchor_y: target.anchor_y,
                }
            });
            let stack = stage.stack(slot);
            SlotSnapshot {
                slot,
                actor: bust.actor_name().to_string(),
                talking: bust.is_talking(),
                tone: stage.display_tone(bust),
                sprite,
                hidden: stack[..stack.len().saturating_sub(1)].to_vec(),
            }
        })
        .collect();

    FrameSnapshot {
        frame,
        auto_tint: stage.auto_tint(),
        slots,
    }
}
