use std::{cell::RefCell, rc::Rc};

use serde::Serialize;

use crate::bust::ImageRef;
use crate::layout::Placement;

/// Rendering/animation collaborator. The stage tells it where busts should
/// end up; interpolation and drawing are its business.
pub trait PortraitPresenter {
    /// Display `image` for `actor` at `placement` immediately.
    fn show(&self, actor: &str, image: &ImageRef, placement: Placement);

    /// Animate `actor` toward `placement` over `duration` frames. A duration of
    /// zero jumps straight to the target.
    fn move_to(&self, actor: &str, placement: Placement, duration: u32);

    /// Drop `actor`'s sprite, cancelling any animation in flight.
    fn hide(&self, actor: &str);
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PresenterEvent {
    Show {
        actor: String,
        image: String,
        placement: Placement,
    },
    Move {
        actor: String,
        placement: Placement,
        duration: u32,
    },
    Hide {
        actor: String,
    },
}

/// Presenter that only remembers the requests it received.
#[derive(Clone, Default)]
pub struct RecordingPresenter {
    events: Rc<RefCell<Vec<PresenterEvent>>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PresenterEvent> {
        self.events.borrow().clone()
    }
}

impl PortraitPresenter for RecordingPresenter {
    fn show(&self, actor: &str, image: &ImageRef, placement: Placement) {
        self.events.borrow_mut().push(PresenterEvent::Show {
            actor: actor.to_string(),
            image: image.to_string(),
            placement,
        });
    }

    fn move_to(&self, actor: &str, placement: Placement, duration: u32) {
        self.events.borrow_mut().push(PresenterEvent::Move {
            actor: actor.to_string(),
            placement,
            duration,
        });
    }

    fn hide(&self, actor: &str) {
        self.events.borrow_mut().push(PresenterEvent::Hide {
            actor: actor.to_string(),
        });
    }
}
