//! Bust portrait staging for dialogue scenes.
//!
//! [`BustStage`] keeps track of which character portraits are on screen, the
//! slot each one occupies and which one is highlighted as the current
//! speaker. Drawing and animation are delegated to a [`PortraitPresenter`];
//! the stage only decides what should be shown where.

pub mod bust;
pub mod command;
pub mod config;
pub mod error;
pub mod highlight;
pub mod layout;
pub mod presenter;
pub mod registry;
pub mod slot;
pub mod stage;
pub mod tone;
pub mod variables;

pub use bust::{Bust, ImageRef, OwnerToken};
pub use command::{run_command, CommandArgs, CommandOutcome, StageCommand};
pub use config::{Facing, Origin, ScreenSize, StageConfig};
pub use error::StageError;
pub use highlight::{SpeakerHighlightPolicy, SpeakerOutcome};
pub use layout::{placement, Placement};
pub use presenter::{PortraitPresenter, PresenterEvent, RecordingPresenter};
pub use registry::SlotRegistry;
pub use slot::{Depth, Side, SlotId, SlotLayout};
pub use stage::BustStage;
pub use tone::{Tone, TintPalette};
pub use variables::{NoVariables, VariableStore};
