//! Authored command surface. Scene scripts hand over a command name and its
//! arguments as raw strings; malformed values are replaced by defaults rather
//! than rejected.

use std::collections::BTreeMap;

use crate::bust::{ImageRef, OwnerToken};
use crate::error::StageError;
use crate::slot::{Depth, Side};
use crate::stage::BustStage;
use crate::tone::Tone;
use crate::variables::VariableStore;

pub type CommandArgs = BTreeMap<String, String>;

/// Frames used when a move duration is missing or unreadable.
pub const FALLBACK_MOVE_DURATION: u32 = 6;

pub const ADD_BUST: &str = "addBust";
pub const ADD_BUST_FROM_VARIABLE: &str = "addBustFromVariable";
pub const MOVE_BUST: &str = "moveBust";
pub const REPLACE_BUST: &str = "replaceBust";
pub const REMOVE_BUST: &str = "removeBust";
pub const CLEAR: &str = "clear";
pub const ENABLE_AUTO_TINT: &str = "enableAutoTint";
pub const DISABLE_AUTO_TINT: &str = "disableAutoTint";
pub const HIGHLIGHT_BUST: &str = "highlightBust";
pub const TONE_BUST: &str = "toneBust";

#[derive(Debug, Clone, PartialEq)]
pub enum StageCommand {
    Add {
        name: String,
        image: ImageRef,
        side: Side,
        depth: Depth,
        flipped: bool,
    },
    AddFromVariable {
        name: String,
        variable: String,
        side: Side,
        depth: Depth,
        flipped: bool,
    },
    Move {
        name: String,
        side: Side,
        depth: Depth,
        flipped: bool,
        duration: u32,
        blocking: bool,
    },
    Replace {
        name: String,
        image: ImageRef,
    },
    Remove {
        name: String,
    },
    Clear,
    EnableAutoTint,
    DisableAutoTint,
    Highlight {
        name: String,
        highlighted: bool,
    },
    Tone {
        name: String,
        tone: Option<Tone>,
    },
}

/// What the caller has to do after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandOutcome {
    /// Frames the issuing context should wait before its next step.
    pub wait_frames: u32,
}

impl StageCommand {
    pub fn parse(command: &str, args: &CommandArgs) -> Result<Self, StageError> {
        let parsed = match command {
            ADD_BUST => StageCommand::Add {
                name: required(args, ADD_BUST, "name")?,
                image: ImageRef::new(required(args, ADD_BUST, "bustFile")?),
                side: side_arg(args),
                depth: depth_arg(args),
                flipped: flag(args, "isFlipped", false),
            },
            ADD_BUST_FROM_VARIABLE => StageCommand::AddFromVariable {
                name: required(args, ADD_BUST_FROM_VARIABLE, "name")?,
                variable: required(args, ADD_BUST_FROM_VARIABLE, "variableId")?,
                side: side_arg(args),
                depth: depth_arg(args),
                flipped: flag(args, "isFlipped", false),
            },
            MOVE_BUST => StageCommand::Move {
                name: required(args, MOVE_BUST, "name")?,
                side: side_arg(args),
                depth: depth_arg(args),
                flipped: flag(args, "isFlipped", false),
                duration: duration_arg(args),
                blocking: flag(args, "isBlocking", true),
            },
            REPLACE_BUST => StageCommand::Replace {
                name: required(args, REPLACE_BUST, "name")?,
                image: ImageRef::new(required(args, REPLACE_BUST, "bustFile")?),
            },
            REMOVE_BUST => StageCommand::Remove {
                name: required(args, REMOVE_BUST, "name")?,
            },
            CLEAR => StageCommand::Clear,
            ENABLE_AUTO_TINT => StageCommand::EnableAutoTint,
            DISABLE_AUTO_TINT => StageCommand::DisableAutoTint,
            HIGHLIGHT_BUST => StageCommand::Highlight {
                name: required(args, HIGHLIGHT_BUST, "name")?,
                highlighted: flag(args, "isHighlighted", true),
            },
            TONE_BUST => StageCommand::Tone {
                name: required(args, TONE_BUST, "name")?,
                tone: tone_arg(args),
            },
            other => return Err(StageError::UnknownCommand(other.to_string())),
        };
        Ok(parsed)
    }

    pub fn apply(
        self,
        stage: &mut BustStage,
        owner: OwnerToken,
        variables: &dyn VariableStore,
    ) -> Result<CommandOutcome, StageError> {
        let mut outcome = CommandOutcome::default();
        match self {
            StageCommand::Add {
                name,
                image,
                side,
                depth,
                flipped,
            } => {
                stage.add(owner, &name, image, side, depth, flipped);
            }
            StageCommand::AddFromVariable {
                name,
                variable,
                side,
                depth,
                flipped,
            } => {
                stage.add_from_variable(owner, &name, &variable, variables, side, depth, flipped)?;
            }
            StageCommand::Move {
                name,
                side,
                depth,
                flipped,
                duration,
                blocking,
            } => {
                // Blocking moves wait even when the bust is missing.
                stage.move_bust(&name, side, depth, flipped, duration);
                if blocking {
                    outcome.wait_frames = duration;
                }
            }
            StageCommand::Replace { name, image } => stage.replace(&name, image)?,
            StageCommand::Remove { name } => {
                stage.remove(&name);
            }
            StageCommand::Clear => stage.clear(),
            StageCommand::EnableAutoTint => stage.enable_auto_tint(),
            StageCommand::DisableAutoTint => stage.disable_auto_tint(),
            StageCommand::Highlight { name, highlighted } => {
                stage.set_highlight(&name, highlighted);
            }
            StageCommand::Tone { name, tone } => {
                stage.set_tone(&name, tone);
            }
        }
        Ok(outcome)
    }
}

/// Parse and apply one authored command. Failures are logged and never
/// interrupt the scene.
pub fn run_command(
    stage: &mut BustStage,
    owner: OwnerToken,
    command: &str,
    args: &CommandArgs,
    variables: &dyn VariableStore,
) -> CommandOutcome {
    let result = StageCommand::parse(command, args)
        .and_then(|parsed| parsed.apply(stage, owner, variables));
    match result {
        Ok(outcome) => outcome,
        Err(err @ StageError::UnknownActor(_)) => {
            log::debug!("{command}: {err}");
            CommandOutcome::default()
        }
        Err(err) => {
            log::warn!("{command} skipped: {err}");
            CommandOutcome::default()
        }
    }
}

fn required(
    args: &CommandArgs,
    command: &'static str,
    argument: &'static str,
) -> Result<String, StageError> {
    args.get(argument)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or(StageError::MissingArgument { command, argument })
}

fn side_arg(args: &CommandArgs) -> Side {
    args.get("side")
        .map(|raw| Side::parse_or_default(raw))
        .unwrap_or_default()
}

fn depth_arg(args: &CommandArgs) -> Depth {
    args.get("position")
        .map(|raw| Depth::parse_or_default(raw))
        .unwrap_or_default()
}

fn flag(args: &CommandArgs, key: &str, default: bool) -> bool {
    match args.get(key).map(|value| value.trim()) {
        Some("true") => true,
        Some("false") => false,
        _ => default,
    }
}

/// `"0"` means an instant move; any other value must be a positive frame
/// count or the fallback applies.
fn duration_arg(args: &CommandArgs) -> u32 {
    let Some(raw) = args.get("duration").map(|value| value.trim()) else {
        return FALLBACK_MOVE_DURATION;
    };
    if raw == "0" {
        return 0;
    }
    match raw.parse::<u32>() {
        Ok(frames) if frames > 0 => frames,
        _ => {
            log::debug!("unreadable move duration {raw:?}; using {FALLBACK_MOVE_DURATION}");
            FALLBACK_MOVE_DURATION
        }
    }
}

/// Explicit tone from `r`/`g`/`b`/`gray`; no channel given means "back to the
/// default tone".
fn tone_arg(args: &CommandArgs) -> Option<Tone> {
    const CHANNELS: [&str; 4] = ["r", "g", "b", "gray"];
    if CHANNELS.iter().all(|key| !args.contains_key(*key)) {
        return None;
    }
    let channel = |key: &str| {
        args.get(key)
            .and_then(|value| value.trim().parse::<i16>().ok())
            .unwrap_or(0)
    };
    Some(Tone::new(channel("r"), channel("g"), channel("b"), channel("gray")).clamped())
}
