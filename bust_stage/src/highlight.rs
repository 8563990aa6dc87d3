use crate::bust::Bust;
use crate::registry::SlotRegistry;
use crate::tone::{Tone, TintPalette};

/// What a speaker change did to the stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeakerOutcome {
    /// Auto-tint is off; highlight state is under manual control.
    Manual,
    /// Empty speaker name; the previous highlight stays.
    Narration,
    /// Every bust was re-evaluated. Holds the name of the highlighted bust if
    /// the speaker is on stage.
    Applied(Option<String>),
}

/// Derives talking/tint state either from speaker changes (auto-tint) or from
/// explicit highlight commands.
#[derive(Debug, Clone)]
pub struct SpeakerHighlightPolicy {
    auto_tint: bool,
    palette: TintPalette,
}

impl SpeakerHighlightPolicy {
    pub fn new(palette: TintPalette) -> Self {
        Self {
            auto_tint: true,
            palette,
        }
    }

    pub fn auto_tint(&self) -> bool {
        self.auto_tint
    }

    pub fn enable_auto_tint(&mut self) {
        self.auto_tint = true;
    }

    pub fn disable_auto_tint(&mut self) {
        self.auto_tint = false;
    }

    pub fn palette(&self) -> &TintPalette {
        &self.palette
    }

    /// Store the talking flag and, under auto-tint, the matching tone.
    pub fn set_talking(&self, bust: &mut Bust, talking: bool) {
        bust.talking = talking;
        if self.auto_tint {
            bust.tone = Some(self.palette.for_talking(talking));
        }
    }

    pub fn on_speaker_changed(&self, registry: &mut SlotRegistry, speaker: &str) -> SpeakerOutcome {
        if !self.auto_tint {
            return SpeakerOutcome::Manual;
        }
        if speaker.is_empty() {
            return SpeakerOutcome::Narration;
        }

        let mut highlighted = None;
        for bust in registry.busts_mut() {
            let talking = bust.actor_name == speaker;
            self.set_talking(bust, talking);
            if talking {
                highlighted = Some(bust.actor_name.clone());
            }
        }
        if let Some(name) = highlighted.as_deref() {
            registry.promote_to_foreground(name);
        }
        SpeakerOutcome::Applied(highlighted)
    }

    /// Manual highlight, honoured whether or not auto-tint is on. Returns
    /// `false` when no such bust is live.
    pub fn set_highlight(&self, registry: &mut SlotRegistry, name: &str, highlighted: bool) -> bool {
        let Some(bust) = registry.get_mut(name) else {
            return false;
        };
        self.set_talking(bust, highlighted);
        if highlighted {
            registry.promote_to_foreground(name);
        }
        true
    }

    /// Store an explicit tone on a bust; `None` returns it to the default.
    pub fn set_tone(&self, registry: &mut SlotRegistry, name: &str, tone: Option<Tone>) -> bool {
        match registry.get_mut(name) {
            Some(bust) => {
                bust.tone = tone.map(Tone::clamped);
                true
            }
            None => false,
        }
    }
}

impl Default for SpeakerHighlightPolicy {
    fn default() -> Self {
        Self::new(TintPalette::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bust::{ImageRef, OwnerToken};
    use crate::slot::{Depth, Side, SlotId};

    fn registry_with(names: &[(&str, Side)]) -> SlotRegistry {
        let mut registry = SlotRegistry::new();
        for (name, side) in names {
            registry.add(
                OwnerToken(7),
                name,
                ImageRef::new(*name),
                *side,
                Depth::Back,
                false,
            );
        }
        registry
    }

    fn talking(registry: &SlotRegistry, name: &str) -> bool {
        registry.get(name).map(Bust::is_talking).unwrap_or(false)
    }

    #[test]
    fn speaker_change_highlights_only_the_speaker() {
        let policy = SpeakerHighlightPolicy::default();
        let mut registry =
            registry_with(&[("Alice", Side::Left), ("Carol", Side::Left), ("Bob", Side::Right)]);
        assert_eq!(registry.stack(SlotId::LeftBack), ["Alice", "Carol"]);

        let outcome = policy.on_speaker_changed(&mut registry, "Alice");
        assert_eq!(outcome, SpeakerOutcome::Applied(Some("Alice".to_string())));
        assert!(talking(&registry, "Alice"));
        assert!(!talking(&registry, "Bob"));
        assert!(!talking(&registry, "Carol"));
        assert_eq!(registry.stack(SlotId::LeftBack), ["Carol", "Alice"]);

        let palette = policy.palette();
        assert_eq!(registry.get("Alice").and_then(Bust::tone), Some(palette.active));
        assert_eq!(registry.get("Bob").and_then(Bust::tone), Some(palette.inactive));
    }

    #[test]
    fn absent_speaker_dims_everyone() {
        let policy = SpeakerHighlightPolicy::default();
        let mut registry = registry_with(&[("Alice", Side::Left), ("Bob", Side::Right)]);
        assert_eq!(
            policy.on_speaker_changed(&mut registry, "Narrator"),
            SpeakerOutcome::Applied(None)
        );
        assert!(registry.busts().all(|bust| !bust.is_talking()));
    }

    #[test]
    fn empty_speaker_preserves_flags() {
        let policy = SpeakerHighlightPolicy::default();
        let mut registry = registry_with(&[("Alice", Side::Left), ("Bob", Side::Right)]);
        policy.on_speaker_changed(&mut registry, "Bob");
        let before: Vec<bool> = registry.busts().map(Bust::is_talking).collect();

        assert_eq!(
            policy.on_speaker_changed(&mut registry, ""),
            SpeakerOutcome::Narration
        );
        let after: Vec<bool> = registry.busts().map(Bust::is_talking).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn speaker_change_is_ignored_without_auto_tint() {
        let mut policy = SpeakerHighlightPolicy::default();
        policy.disable_auto_tint();
        let mut registry = registry_with(&[("Alice", Side::Left), ("Bob", Side::Left)]);
        assert_eq!(
            policy.on_speaker_changed(&mut registry, "Alice"),
            SpeakerOutcome::Manual
        );
        assert!(talking(&registry, "Alice") && talking(&registry, "Bob"));
        assert_eq!(registry.stack(SlotId::LeftBack), ["Alice", "Bob"]);
    }

    #[test]
    fn manual_highlight_without_auto_tint_keeps_tones() {
        let mut policy = SpeakerHighlightPolicy::default();
        let mut registry = registry_with(&[("Alice", Side::Left), ("Bob", Side::Left)]);
        policy.on_speaker_changed(&mut registry, "Bob");
        let bob_tone = registry.get("Bob").and_then(Bust::tone);
        let alice_tone = registry.get("Alice").and_then(Bust::tone);

        policy.disable_auto_tint();
        assert!(policy.set_highlight(&mut registry, "Alice", true));
        assert!(talking(&registry, "Alice"));
        assert_eq!(registry.stack(SlotId::LeftBack), ["Bob", "Alice"]);
        assert_eq!(registry.get("Alice").and_then(Bust::tone), alice_tone);
        assert_eq!(registry.get("Bob").and_then(Bust::tone), bob_tone);

        assert!(policy.set_highlight(&mut registry, "Alice", false));
        assert!(!talking(&registry, "Alice"));
        assert_eq!(registry.stack(SlotId::LeftBack), ["Bob", "Alice"]);
    }

    #[test]
    fn manual_highlight_with_auto_tint_updates_tone() {
        let policy = SpeakerHighlightPolicy::default();
        let mut registry = registry_with(&[("Alice", Side::Left)]);
        assert!(policy.set_highlight(&mut registry, "Alice", false));
        assert_eq!(
            registry.get("Alice").and_then(Bust::tone),
            Some(policy.palette().inactive)
        );
        assert!(!policy.set_highlight(&mut registry, "Ghost", true));
    }

    #[test]
    fn explicit_tone_is_clamped_and_resettable() {
        let policy = SpeakerHighlightPolicy::default();
        let mut registry = registry_with(&[("Alice", Side::Left)]);
        assert!(policy.set_tone(&mut registry, "Alice", Some(Tone::new(0, 300, 0, -1))));
        assert_eq!(
            registry.get("Alice").and_then(Bust::tone),
            Some(Tone::new(0, 255, 0, 0))
        );
        assert!(policy.set_tone(&mut registry, "Alice", None));
        let alice = registry.get("Alice").expect("alice on stage");
        assert_eq!(alice.display_tone(policy.palette().active), policy.palette().active);
        assert!(!policy.set_tone(&mut registry, "Ghost", None));
    }
}
