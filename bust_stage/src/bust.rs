use std::fmt;

use serde::{Deserialize, Serialize};

use crate::slot::{Depth, Side, SlotId};
use crate::tone::Tone;

/// Opaque handle to a portrait asset. Never interpreted by the stage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies the scripted context that issued an add.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerToken(pub u32);

impl fmt::Display for OwnerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One named portrait on stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bust {
    pub(crate) id: u32,
    pub(crate) actor_name: String,
    pub(crate) image: ImageRef,
    pub(crate) side: Side,
    pub(crate) depth: Depth,
    pub(crate) flipped: bool,
    pub(crate) talking: bool,
    pub(crate) tone: Option<Tone>,
}

impl Bust {
    pub(crate) fn new(
        id: u32,
        actor_name: &str,
        image: ImageRef,
        side: Side,
        depth: Depth,
        flipped: bool,
    ) -> Self {
        Self {
            id,
            actor_name: actor_name.to_string(),
            image,
            side,
            depth,
            flipped,
            talking: true,
            tone: None,
        }
    }

    /// Registry serial; a name that is removed and added again gets a new id.
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn actor_name(&self) -> &str {
        &self.actor_name
    }

    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn depth(&self) -> Depth {
        self.depth
    }

    pub fn slot(&self) -> SlotId {
        SlotId::from_parts(self.side, self.depth)
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn is_talking(&self) -> bool {
        self.talking
    }

    /// Tone last stored on the bust, if any.
    pub fn tone(&self) -> Option<Tone> {
        self.tone
    }

    /// Tone the renderer should apply; busts that never had a tone stored
    /// render with the active tone.
    pub fn display_tone(&self, active: Tone) -> Tone {
        self.tone.unwrap_or(active)
    }

    pub(crate) fn place(&mut self, side: Side, depth: Depth, flipped: bool) {
        self.side = side;
        self.depth = depth;
        self.flipped = flipped;
    }
}
