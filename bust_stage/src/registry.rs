use std::collections::{BTreeMap, BTreeSet};

use crate::bust::{Bust, ImageRef, OwnerToken};
use crate::error::StageError;
use crate::slot::{Depth, Side, SlotId};

/// Live busts keyed by actor name, partitioned into one ordered stack per
/// slot. The last entry of a stack is the visible one.
#[derive(Debug, Default, Clone)]
pub struct SlotRegistry {
    busts: BTreeMap<String, Bust>,
    stacks: [Vec<String>; SlotId::COUNT],
    owners: BTreeSet<OwnerToken>,
    next_id: u32,
}

impl SlotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new bust on top of its slot. Returns `None` without touching
    /// anything when a bust with that name is already live.
    pub fn add(
        &mut self,
        owner: OwnerToken,
        name: &str,
        image: ImageRef,
        side: Side,
        depth: Depth,
        flipped: bool,
    ) -> Option<&mut Bust> {
        if self.busts.contains_key(name) {
            log::debug!("bust {name:?} already on stage; add ignored");
            return None;
        }
        self.owners.insert(owner);

        let bust = Bust::new(self.next_id, name, image, side, depth, flipped);
        self.next_id += 1;
        self.stack_mut(bust.slot()).push(name.to_string());
        Some(self.busts.entry(name.to_string()).or_insert(bust))
    }

    /// Move a bust to the top of another (or the same) slot.
    pub fn move_bust(
        &mut self,
        name: &str,
        side: Side,
        depth: Depth,
        flipped: bool,
    ) -> Option<&mut Bust> {
        let from = self.busts.get(name)?.slot();
        let to = SlotId::from_parts(side, depth);
        remove_from_stack(self.stack_mut(from), name);
        self.stack_mut(to).push(name.to_string());

        let bust = self.busts.get_mut(name)?;
        bust.place(side, depth, flipped);
        Some(bust)
    }

    /// Swap the bust's image and bring it to the front of its slot.
    pub fn replace_image(&mut self, name: &str, image: ImageRef) -> Result<&mut Bust, StageError> {
        if !self.promote_to_foreground(name) {
            return Err(StageError::UnknownActor(name.to_string()));
        }
        let bust = self
            .busts
            .get_mut(name)
            .ok_or_else(|| StageError::UnknownActor(name.to_string()))?;
        bust.image = image;
        Ok(bust)
    }

    pub fn remove(&mut self, name: &str) -> Option<Bust> {
        let bust = self.busts.remove(name)?;
        remove_from_stack(self.stack_mut(bust.slot()), name);
        Some(bust)
    }

    /// Drop every bust. Owners are kept.
    pub fn clear(&mut self) {
        self.busts.clear();
        for stack in &mut self.stacks {
            stack.clear();
        }
    }

    /// Drop every bust and forget every owner.
    pub fn reset(&mut self) {
        self.clear();
        self.owners.clear();
    }

    /// Re-append the bust within its own stack so it becomes visible.
    pub fn promote_to_foreground(&mut self, name: &str) -> bool {
        let Some(slot) = self.busts.get(name).map(Bust::slot) else {
            return false;
        };
        let stack = self.stack_mut(slot);
        remove_from_stack(stack, name);
        stack.push(name.to_string());
        true
    }

    pub fn get(&self, name: &str) -> Option<&Bust> {
        self.busts.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Bust> {
        self.busts.get_mut(name)
    }

    pub fn busts(&self) -> impl ExactSizeIterator<Item = &Bust> {
        self.busts.values()
    }

    pub(crate) fn busts_mut(&mut self) -> impl ExactSizeIterator<Item = &mut Bust> {
        self.busts.values_mut()
    }

    pub fn len(&self) -> usize {
        self.busts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.busts.is_empty()
    }

    /// Actor names in the slot, bottom to top.
    pub fn stack(&self, slot: SlotId) -> &[String] {
        &self.stacks[slot.index()]
    }

    pub fn topmost(&self, slot: SlotId) -> Option<&Bust> {
        self.stack(slot)
            .last()
            .and_then(|name| self.busts.get(name))
    }

    pub fn is_owned_by(&self, owner: OwnerToken) -> bool {
        self.owners.contains(&owner)
    }

    pub fn owners(&self) -> impl Iterator<Item = &OwnerToken> {
        self.owners.iter()
    }

    fn stack_mut(&mut self, slot: SlotId) -> &mut Vec<String> {
        &mut self.stacks[slot.index()]
    }
}

fn remove_from_stack(stack: &mut Vec<String>, name: &str) {
    if let Some(position) = stack.iter().position(|entry| entry == name) {
        stack.remove(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: OwnerToken = OwnerToken(1);

    fn add(registry: &mut SlotRegistry, name: &str, side: Side, depth: Depth) -> bool {
        registry
            .add(OWNER, name, ImageRef::new(name), side, depth, false)
            .is_some()
    }

    fn assert_partition(registry: &SlotRegistry) {
        let mut stacked: Vec<&String> = SlotId::ALL
            .iter()
            .flat_map(|slot| registry.stack(*slot))
            .collect();
        stacked.sort();
        let flat: Vec<&str> = registry.busts().map(Bust::actor_name).collect();
        let stacked: Vec<&str> = stacked.iter().map(|name| name.as_str()).collect();
        assert_eq!(stacked, flat, "stacks and flat set diverged");
        for bust in registry.busts() {
            assert!(registry.stack(bust.slot()).iter().any(|n| n == bust.actor_name()));
        }
    }

    #[test]
    fn distinct_adds_grow_the_registry() {
        let mut registry = SlotRegistry::new();
        for (index, name) in ["alice", "bob", "carol", "dave"].iter().enumerate() {
            assert!(add(&mut registry, name, Side::Left, Depth::Back));
            assert_eq!(registry.len(), index + 1);
        }
        assert_partition(&registry);
    }

    #[test]
    fn duplicate_add_leaves_existing_bust_untouched() {
        let mut registry = SlotRegistry::new();
        assert!(add(&mut registry, "alice", Side::Left, Depth::Back));
        let before = registry.get("alice").cloned();

        let added = registry.add(
            OwnerToken(2),
            "alice",
            ImageRef::new("other"),
            Side::Right,
            Depth::Front,
            true,
        );
        assert!(added.is_none());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("alice").cloned(), before);
        assert!(registry.stack(SlotId::RightFront).is_empty());
        assert!(!registry.is_owned_by(OwnerToken(2)));
    }

    #[test]
    fn later_add_covers_earlier_bust_in_the_same_slot() {
        let mut registry = SlotRegistry::new();
        add(&mut registry, "alice", Side::Left, Depth::Back);
        add(&mut registry, "bob", Side::Left, Depth::Back);
        assert_eq!(registry.stack(SlotId::LeftBack), ["alice", "bob"]);
        assert_eq!(
            registry.topmost(SlotId::LeftBack).map(Bust::actor_name),
            Some("bob")
        );
    }

    #[test]
    fn move_transfers_between_stacks() {
        let mut registry = SlotRegistry::new();
        add(&mut registry, "alice", Side::Left, Depth::Back);
        add(&mut registry, "bob", Side::Right, Depth::Front);

        let bust = registry
            .move_bust("alice", Side::Right, Depth::Front, true)
            .expect("alice is live");
        assert_eq!(bust.slot(), SlotId::RightFront);
        assert!(bust.is_flipped());

        assert!(registry.stack(SlotId::LeftBack).is_empty());
        assert_eq!(registry.stack(SlotId::RightFront), ["bob", "alice"]);
        assert_partition(&registry);
    }

    #[test]
    fn move_within_the_same_slot_promotes() {
        let mut registry = SlotRegistry::new();
        add(&mut registry, "alice", Side::Left, Depth::Back);
        add(&mut registry, "bob", Side::Left, Depth::Back);
        registry.move_bust("alice", Side::Left, Depth::Back, false);
        assert_eq!(registry.stack(SlotId::LeftBack), ["bob", "alice"]);
    }

    #[test]
    fn operations_on_unknown_actors_are_no_ops() {
        let mut registry = SlotRegistry::new();
        add(&mut registry, "alice", Side::Left, Depth::Back);
        assert!(registry
            .move_bust("ghost", Side::Right, Depth::Back, false)
            .is_none());
        assert!(registry.remove("ghost").is_none());
        assert!(!registry.promote_to_foreground("ghost"));
        assert!(matches!(
            registry.replace_image("ghost", ImageRef::new("x")),
            Err(StageError::UnknownActor(name)) if name == "ghost"
        ));
        assert_eq!(registry.len(), 1);
        assert_partition(&registry);
    }

    #[test]
    fn replace_swaps_image_and_promotes() {
        let mut registry = SlotRegistry::new();
        add(&mut registry, "alice", Side::Left, Depth::Back);
        add(&mut registry, "bob", Side::Left, Depth::Back);
        let bust = registry
            .replace_image("alice", ImageRef::new("alice_angry"))
            .expect("alice is live");
        assert_eq!(bust.image().as_str(), "alice_angry");
        assert_eq!(registry.stack(SlotId::LeftBack), ["bob", "alice"]);
    }

    #[test]
    fn removed_name_can_be_added_again_as_a_fresh_bust() {
        let mut registry = SlotRegistry::new();
        add(&mut registry, "alice", Side::Left, Depth::Back);
        let stale = registry.remove("alice").expect("alice removed");
        assert!(registry.stack(SlotId::LeftBack).is_empty());

        assert!(add(&mut registry, "alice", Side::Right, Depth::Back));
        let fresh = registry.get("alice").expect("alice re-added");
        assert_ne!(fresh.id(), stale.id());
        assert_eq!(fresh.slot(), SlotId::RightBack);
        assert_partition(&registry);
    }

    #[test]
    fn clear_empties_everything_but_owners() {
        let mut registry = SlotRegistry::new();
        add(&mut registry, "alice", Side::Left, Depth::Back);
        add(&mut registry, "bob", Side::Neutral, Depth::Front);
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.get("alice").is_none());
        assert!(registry.get("bob").is_none());
        assert!(SlotId::ALL.iter().all(|slot| registry.stack(*slot).is_empty()));
        assert!(registry.is_owned_by(OWNER));

        registry.reset();
        assert_eq!(registry.owners().count(), 0);
    }
}
