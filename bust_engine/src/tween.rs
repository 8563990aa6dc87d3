use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use bust_stage::{ImageRef, Placement, PortraitPresenter};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    #[allow(dead_code)]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    pub fn apply(self, x: f32) -> f32 {
        let x = x.clamp(0.0, 1.0);
        match self {
            Easing::Linear => x,
            Easing::EaseIn => x * x,
            Easing::EaseOut => 1.0 - (1.0 - x) * (1.0 - x),
            Easing::EaseInOut => {
                if x < 0.5 {
                    Easing::EaseIn.apply(x * 2.0) / 2.0
                } else {
                    Easing::EaseOut.apply(x * 2.0 - 1.0) / 2.0 + 0.5
                }
            }
        }
    }
}

/// Where a sprite is drawn on the current frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpriteState {
    pub image: String,
    pub x: f32,
    pub y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub anchor_x: f32,
    pub anchor_y: f32,
}

#[derive(Debug, Clone)]
struct SpriteTween {
    image: String,
    current: Placement,
    start: Placement,
    target: Placement,
    elapsed: u32,
    duration: u32,
}

impl SpriteTween {
    fn settled(image: &ImageRef, placement: Placement) -> Self {
        Self {
            image: image.to_string(),
            current: placement,
            start: placement,
            target: placement,
            elapsed: 0,
            duration: 0,
        }
    }

    fn retarget(&mut self, target: Placement, duration: u32) {
        self.start = self.current;
        self.target = target;
        self.elapsed = 0;
        self.duration = duration;
        self.current.anchor_x = target.anchor_x;
        self.current.anchor_y = target.anchor_y;
        if duration == 0 {
            self.current = target;
        }
    }

    fn is_animating(&self) -> bool {
        self.elapsed < self.duration
    }

    fn step(&mut self, easing: Easing) {
        if !self.is_animating() {
            return;
        }
        self.elapsed += 1;
        let t = easing.apply(self.elapsed as f32 / self.duration as f32);
        let lerp = |from: f32, to: f32| from + (to - from) * t;
        self.current.x = lerp(self.start.x, self.target.x);
        self.current.y = lerp(self.start.y, self.target.y);
        self.current.scale_x = lerp(self.start.scale_x, self.target.scale_x);
        self.current.scale_y = lerp(self.start.scale_y, self.target.scale_y);
    }

    fn state(&self) -> SpriteState {
        SpriteState {
            image: self.image.clone(),
            x: self.current.x,
            y: self.current.y,
            scale_x: self.current.scale_x,
            scale_y: self.current.scale_y,
            anchor_x: self.current.anchor_x,
            anchor_y: self.current.anchor_y,
        }
    }
}

/// Presenter that interpolates bust sprites frame by frame. A new move
/// starts from wherever the sprite currently is.
#[derive(Clone)]
pub struct TweenPresenter {
    sprites: Rc<RefCell<BTreeMap<String, SpriteTween>>>,
    easing: Easing,
}

impl TweenPresenter {
    pub fn new(easing: Easing) -> Self {
        Self {
            sprites: Rc::default(),
            easing,
        }
    }

    /// Advance every running animation by one frame.
    pub fn tick(&self) {
        for sprite in self.sprites.borrow_mut().values_mut() {
            sprite.step(self.easing);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.sprites.borrow().values().any(SpriteTween::is_animating)
    }

    pub fn sprite(&self, actor: &str) -> Option<SpriteState> {
        self.sprites.borrow().get(actor).map(SpriteTween::state)
    }
}

impl Default for TweenPresenter {
    fn default() -> Self {
        Self::new(Easing::EaseInOut)
    }
}

impl PortraitPresenter for TweenPresenter {
    fn show(&self, actor: &str, image: &ImageRef, placement: Placement) {
        self.sprites
            .borrow_mut()
            .insert(actor.to_string(), SpriteTween::settled(image, placement));
    }

    fn move_to(&self, actor: &str, placement: Placement, duration: u32) {
        match self.sprites.borrow_mut().get_mut(actor) {
            Some(sprite) => sprite.retarget(placement, duration),
            None => log::debug!("move for {actor} without a shown sprite"),
        }
    }

    fn hide(&self, actor: &str) {
        self.sprites.borrow_mut().remove(actor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn at(x: f32, scale_x: f32) -> Placement {
        Placement {
            x,
            y: 624.0,
            anchor_x: 0.5,
            anchor_y: 1.0,
            scale_x,
            scale_y: 1.0,
        }
    }

    #[test]
    fn easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
            assert!(easing.apply(0.0).abs() < EPSILON);
            assert!((easing.apply(1.0) - 1.0).abs() < EPSILON);
        }
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < EPSILON);
        assert!(Easing::EaseInOut.apply(0.25) < 0.25);
        assert!(Easing::EaseInOut.apply(0.75) > 0.75);
    }

    #[test]
    fn move_reaches_target_after_duration() {
        let presenter = TweenPresenter::new(Easing::Linear);
        presenter.show("alice", &ImageRef::new("alice"), at(100.0, 1.0));
        presenter.move_to("alice", at(200.0, -1.0), 4);
        assert!(presenter.is_animating());

        presenter.tick();
        let sprite = presenter.sprite("alice").expect("alice sprite");
        assert!((sprite.x - 125.0).abs() < EPSILON);
        assert!((sprite.scale_x - 0.5).abs() < EPSILON);

        for _ in 0..3 {
            presenter.tick();
        }
        let sprite = presenter.sprite("alice").expect("alice sprite");
        assert!((sprite.x - 200.0).abs() < EPSILON);
        assert!((sprite.scale_x + 1.0).abs() < EPSILON);
        assert!(!presenter.is_animating());
    }

    #[test]
    fn zero_duration_moves_instantly() {
        let presenter = TweenPresenter::default();
        presenter.show("alice", &ImageRef::new("alice"), at(100.0, 1.0));
        presenter.move_to("alice", at(300.0, 1.0), 0);
        assert!(!presenter.is_animating());
        assert_eq!(presenter.sprite("alice").map(|sprite| sprite.x), Some(300.0));
    }

    #[test]
    fn retarget_starts_from_interpolated_position() {
        let presenter = TweenPresenter::new(Easing::Linear);
        presenter.show("alice", &ImageRef::new("alice"), at(0.0, 1.0));
        presenter.move_to("alice", at(100.0, 1.0), 10);
        for _ in 0..5 {
            presenter.tick();
        }
        presenter.move_to("alice", at(0.0, 1.0), 5);
        presenter.tick();
        let sprite = presenter.sprite("alice").expect("alice sprite");
        assert!((sprite.x - 40.0).abs() < EPSILON, "x = {}", sprite.x);
    }

    #[test]
    fn hide_drops_sprite_mid_move() {
        let presenter = TweenPresenter::default();
        presenter.show("alice", &ImageRef::new("alice"), at(0.0, 1.0));
        presenter.show("bob", &ImageRef::new("bob"), at(700.0, 1.0));
        presenter.move_to("alice", at(400.0, 1.0), 50);
        presenter.tick();
        assert!(presenter.is_animating());

        presenter.hide("alice");
        assert!(presenter.sprite("alice").is_none());
        assert!(!presenter.is_animating());
        assert!(presenter.sprite("bob").is_some());
        presenter.hide("ghost");
    }

    #[test]
    fn show_replaces_image_and_settles() {
        let presenter = TweenPresenter::default();
        presenter.show("alice", &ImageRef::new("alice"), at(0.0, 1.0));
        presenter.move_to("alice", at(100.0, 1.0), 10);
        presenter.show("alice", &ImageRef::new("alice_sad"), at(50.0, 1.0));
        let sprite = presenter.sprite("alice").expect("alice sprite");
        assert_eq!(sprite.image, "alice_sad");
        assert_eq!(sprite.x, 50.0);
        assert!(!presenter.is_animating());
        presenter.move_to("ghost", at(0.0, 1.0), 3);
        assert!(presenter.sprite("ghost").is_none());
    }
}
