use std::rc::Rc;

use crate::bust::{Bust, ImageRef, OwnerToken};
use crate::config::StageConfig;
use crate::error::StageError;
use crate::highlight::{SpeakerHighlightPolicy, SpeakerOutcome};
use crate::layout::{placement, Placement};
use crate::presenter::PortraitPresenter;
use crate::registry::SlotRegistry;
use crate::slot::{Depth, Side, SlotId};
use crate::tone::Tone;
use crate::variables::VariableStore;

/// One play session's bust state: the slot registry, the highlight policy
/// and the presenter that animates them. The host calls the lifecycle hooks
/// explicitly.
pub struct BustStage {
    config: StageConfig,
    registry: SlotRegistry,
    policy: SpeakerHighlightPolicy,
    presenter: Option<Rc<dyn PortraitPresenter>>,
    events: Vec<String>,
}

impl BustStage {
    pub fn new(config: StageConfig, presenter: Option<Rc<dyn PortraitPresenter>>) -> Self {
        let policy = SpeakerHighlightPolicy::new(config.palette());
        Self {
            config,
            registry: SlotRegistry::new(),
            policy,
            presenter,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn registry(&self) -> &SlotRegistry {
        &self.registry
    }

    /// Human-readable log of every state change since the stage was created,
    /// oldest first. Resets are recorded, not trimmed; a stage lives for one
    /// play session.
    pub fn events(&self) -> &[String] {
        &self.events
    }

    fn log(&mut self, message: String) {
        log::debug!("{message}");
        self.events.push(message);
    }

    pub fn add(
        &mut self,
        owner: OwnerToken,
        name: &str,
        image: ImageRef,
        side: Side,
        depth: Depth,
        flipped: bool,
    ) -> bool {
        let (side, depth) = self.config.layout.resolve(side, depth);
        let Some(bust) = self.registry.add(owner, name, image, side, depth, flipped) else {
            self.log(format!("bust.add {name} ignored (duplicate)"));
            return false;
        };
        self.policy.set_talking(bust, true);
        let slot = bust.slot();
        let target = placement(&self.config, slot, flipped);
        if let Some(presenter) = self.presenter.as_ref() {
            presenter.show(name, &bust.image, target);
        }
        self.log(format!("bust.add {name} {slot} owner {owner}"));
        true
    }

    /// Add with the image taken from a host variable.
    #[allow(clippy::too_many_arguments)]
    pub fn add_from_variable(
        &mut self,
        owner: OwnerToken,
        name: &str,
        variable: &str,
        variables: &dyn VariableStore,
        side: Side,
        depth: Depth,
        flipped: bool,
    ) -> Result<bool, StageError> {
        let image = variables
            .image_ref(variable)
            .ok_or_else(|| StageError::UnresolvedVariable(variable.to_string()))?;
        Ok(self.add(owner, name, image, side, depth, flipped))
    }

    /// Move a bust and request the animation. Returns the number of frames
    /// the animation takes, or `None` if the bust is not on stage.
    pub fn move_bust(
        &mut self,
        name: &str,
        side: Side,
        depth: Depth,
        flipped: bool,
        duration: u32,
    ) -> Option<u32> {
        let (side, depth) = self.config.layout.resolve(side, depth);
        let Some(bust) = self.registry.move_bust(name, side, depth, flipped) else {
            self.log(format!("bust.move {name} ignored (not on stage)"));
            return None;
        };
        let slot = bust.slot();
        let target = placement(&self.config, slot, flipped);
        if let Some(presenter) = self.presenter.as_ref() {
            presenter.move_to(name, target, duration);
        }
        self.log(format!("bust.move {name} {slot} over {duration}f"));
        Some(duration)
    }

    /// Swap a bust's image in place, bring it forward and mark it talking.
    pub fn replace(&mut self, name: &str, image: ImageRef) -> Result<(), StageError> {
        let bust = self.registry.replace_image(name, image)?;
        self.policy.set_talking(bust, true);
        let target = placement(&self.config, bust.slot(), bust.flipped);
        if let Some(presenter) = self.presenter.as_ref() {
            presenter.show(name, &bust.image, target);
        }
        let image = bust.image.to_string();
        self.log(format!("bust.replace {name} {image}"));
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let removed = self.registry.remove(name).is_some();
        if removed {
            if let Some(presenter) = self.presenter.as_ref() {
                presenter.hide(name);
            }
            self.log(format!("bust.remove {name}"));
        }
        removed
    }

    pub fn clear(&mut self) {
        self.hide_all();
        self.registry.clear();
        self.log("bust.clear".to_string());
    }

    /// Clear the stage, forget owners and turn auto-tint back on.
    pub fn reset(&mut self) {
        self.hide_all();
        self.registry.reset();
        self.policy.enable_auto_tint();
        log::info!("bust stage reset");
        self.log("bust.reset".to_string());
    }

    fn hide_all(&self) {
        let Some(presenter) = self.presenter.as_ref() else {
            return;
        };
        for bust in self.registry.busts() {
            presenter.hide(bust.actor_name());
        }
    }

    pub fn auto_tint(&self) -> bool {
        self.policy.auto_tint()
    }

    pub fn enable_auto_tint(&mut self) {
        self.policy.enable_auto_tint();
        self.log("tint.auto on".to_string());
    }

    pub fn disable_auto_tint(&mut self) {
        self.policy.disable_auto_tint();
        self.log("tint.auto off".to_string());
    }

    pub fn set_highlight(&mut self, name: &str, highlighted: bool) -> bool {
        let applied = self
            .policy
            .set_highlight(&mut self.registry, name, highlighted);
        if applied {
            self.log(format!("bust.highlight {name} {highlighted}"));
        }
        applied
    }

    pub fn set_tone(&mut self, name: &str, tone: Option<Tone>) -> bool {
        let applied = self.policy.set_tone(&mut self.registry, name, tone);
        if applied {
            let display = tone
                .map(|tone| format!("{:?}", tone.clamped().channels()))
                .unwrap_or_else(|| "<default>".to_string());
            self.log(format!("bust.tone {name} {display}"));
        }
        applied
    }

    /// Message-box speaker label changed (possibly to the empty string).
    pub fn on_speaker_changed(&mut self, speaker: &str) -> SpeakerOutcome {
        let outcome = self.policy.on_speaker_changed(&mut self.registry, speaker);
        if let SpeakerOutcome::Applied(highlighted) = &outcome {
            let display = highlighted.as_deref().unwrap_or("<off stage>");
            self.log(format!("speaker {speaker} -> {display}"));
        }
        outcome
    }

    /// A scripted context finished. Resets the stage if that context ever
    /// added a bust.
    pub fn on_owning_context_terminated(&mut self, owner: OwnerToken) -> bool {
        if !self.registry.is_owned_by(owner) {
            return false;
        }
        log::info!("context {owner} ended; resetting busts");
        self.reset();
        true
    }

    pub fn on_return_to_title(&mut self) {
        self.reset();
    }

    pub fn bust(&self, name: &str) -> Option<&Bust> {
        self.registry.get(name)
    }

    pub fn stack(&self, slot: SlotId) -> &[String] {
        self.registry.stack(slot)
    }

    pub fn topmost(&self, slot: SlotId) -> Option<&Bust> {
        self.registry.topmost(slot)
    }

    /// The visible bust of every occupied slot in the configured layout.
    pub fn visible(&self) -> impl Iterator<Item = (SlotId, &Bust)> + '_ {
        self.config
            .layout
            .slots()
            .iter()
            .filter_map(|slot| self.topmost(*slot).map(|bust| (*slot, bust)))
    }

    pub fn placement_of(&self, bust: &Bust) -> Placement {
        placement(&self.config, bust.slot(), bust.flipped)
    }

    pub fn display_tone(&self, bust: &Bust) -> Tone {
        bust.display_tone(self.policy.palette().active)
    }
}
