use std::{collections::BTreeMap, fs, path::Path, rc::Rc};

use anyhow::{bail, Context, Result};
use bust_stage::{run_command, BustStage, StageConfig};
use serde::Serialize;

use crate::cli::RunArgs;
use crate::frame::{compose_frame, FrameSnapshot};
use crate::scene::{Scene, SceneStep};
use crate::scheduler::StepScheduler;
use crate::tween::TweenPresenter;

#[derive(Serialize)]
struct FramesManifest<'a> {
    scene: String,
    config: &'a StageConfig,
    frames: &'a [FrameSnapshot],
}

#[derive(Serialize)]
struct EventLog<'a> {
    events: Vec<EventLogEntry<'a>>,
}

#[derive(Serialize)]
struct EventLogEntry<'a> {
    sequence: usize,
    label: &'a str,
}

/// Result of playing a scene to the end.
pub struct SceneRun {
    pub stage: BustStage,
    pub frames: Vec<FrameSnapshot>,
    pub steps_run: usize,
}

pub fn execute(args: RunArgs) -> Result<()> {
    let RunArgs {
        scene: scene_path,
        config,
        frames_json,
        event_log_json,
        settle_frames,
        max_frames,
        verbose,
    } = args;

    let config = StageConfig::from_json_file(config.as_deref()).context("loading stage config")?;
    let scene = Scene::from_json_file(&scene_path)?;
    log::info!(
        "playing {} ({} steps, {:?} layout)",
        scene_path.display(),
        scene.steps.len(),
        config.layout
    );

    let run = play_scene(config, &scene, settle_frames, max_frames)?;

    if let Some(path) = frames_json.as_ref() {
        let manifest = FramesManifest {
            scene: scene_path.display().to_string(),
            config: run.stage.config(),
            frames: &run.frames,
        };
        write_json(path, &manifest, "frame snapshots")?;
        println!("Saved frame snapshots to {}", path.display());
    }
    if let Some(path) = event_log_json.as_ref() {
        let log = EventLog {
            events: run
                .stage
                .events()
                .iter()
                .enumerate()
                .map(|(sequence, label)| EventLogEntry {
                    sequence,
                    label: label.as_str(),
                })
                .collect(),
        };
        write_json(path, &log, "event log")?;
        println!("Saved event log to {}", path.display());
    }

    describe_run(&run, verbose);
    Ok(())
}

/// Drive the stage through every scene step, one frame at a time, then keep
/// ticking up to `settle_frames` frames while animations are still running.
pub fn play_scene(
    config: StageConfig,
    scene: &Scene,
    settle_frames: u32,
    max_frames: u32,
) -> Result<SceneRun> {
    let presenter = TweenPresenter::default();
    let mut stage = BustStage::new(config, Some(Rc::new(presenter.clone())));
    let mut scheduler = StepScheduler::new(scene.steps.iter().cloned());
    let mut frames = Vec::new();
    let mut settle_remaining = settle_frames;
    let mut frame = 0u32;

    loop {
        if frame >= max_frames {
            bail!(
                "scene still running after {max_frames} frames ({} steps pending)",
                scheduler.remaining()
            );
        }
        scheduler.advance(|step| apply_step(&mut stage, step, &scene.variables));
        presenter.tick();
        frames.push(compose_frame(frame, &stage, &presenter));
        frame += 1;

        if scheduler.is_finished() {
            if settle_remaining == 0 || !presenter.is_animating() {
                break;
            }
            settle_remaining -= 1;
        }
    }

    Ok(SceneRun {
        steps_run: scheduler.history().len(),
        stage,
        frames,
    })
}

/// Apply one scene step to the stage and return the frames to wait.
fn apply_step(stage: &mut BustStage, step: &SceneStep, variables: &BTreeMap<String, String>) -> u32 {
    match step {
        SceneStep::Command {
            context,
            command,
            args,
        } => run_command(stage, *context, command, args, variables).wait_frames,
        SceneStep::Speaker { name } => {
            stage.on_speaker_changed(name);
            0
        }
        SceneStep::Wait { frames } => *frames,
        SceneStep::EndContext { context } => {
            stage.on_owning_context_terminated(*context);
            0
        }
        SceneStep::ReturnToTitle => {
            stage.on_return_to_title();
            0
        }
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T, what: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("serializing {what} to JSON"))?;
    fs::write(path, json).with_context(|| format!("writing {what} to {}", path.display()))
}

fn describe_run(run: &SceneRun, verbose: bool) {
    println!(
        "Played {} steps over {} frames",
        run.steps_run,
        run.frames.len()
    );

    let events = run.stage.events();
    if verbose {
        println!("\nStage events:");
        for event in events {
            println!("  - {event}");
        }
    } else if let Some(last) = events.last() {
        println!("Last stage event: {last}");
    }

    let Some(last_frame) = run.frames.last() else {
        return;
    };
    if last_frame.slots.is_empty() {
        println!("Stage empty at frame {}", last_frame.frame);
        return;
    }
    println!("\nOn stage at frame {}:", last_frame.frame);
    for slot in &last_frame.slots {
        let marker = if slot.talking { "*" } else { " " };
        println!(
            "  {marker} {slot:<14} {actor:<12} x={x:>7.1} tone={tone:?}",
            slot = slot.slot.to_string(),
            actor = slot.actor,
            x = slot.sprite.x,
            tone = slot.tone.channels(),
        );
    }
}
