use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{Context, Result};
use bust_stage::{CommandArgs, OwnerToken};
use serde::{Deserialize, Serialize};

/// Scripted dialogue scene: host variables plus an ordered list of steps.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Scene {
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
    pub steps: Vec<SceneStep>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneStep {
    /// Bust command issued by an event context.
    Command {
        context: OwnerToken,
        command: String,
        #[serde(default)]
        args: CommandArgs,
    },
    /// Message box speaker label; empty for narration.
    Speaker {
        #[serde(default)]
        name: String,
    },
    Wait {
        frames: u32,
    },
    /// The event context finished running.
    EndContext {
        context: OwnerToken,
    },
    ReturnToTitle,
}

impl SceneStep {
    pub fn label(&self) -> String {
        match self {
            SceneStep::Command {
                context, command, ..
            } => format!("command {command} ({context})"),
            SceneStep::Speaker { name } if name.is_empty() => "speaker <narration>".to_string(),
            SceneStep::Speaker { name } => format!("speaker {name}"),
            SceneStep::Wait { frames } => format!("wait {frames}"),
            SceneStep::EndContext { context } => format!("end_context {context}"),
            SceneStep::ReturnToTitle => "return_to_title".to_string(),
        }
    }
}

impl Scene {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read scene file: {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse scene json: {}", path.display()))
    }
}
