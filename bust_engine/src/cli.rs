use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    about = "Headless host that plays a dialogue scene through the bust stage",
    version
)]
pub struct Args {
    /// Scene script JSON to play
    #[arg(long)]
    pub scene: PathBuf,

    /// Optional stage configuration JSON (defaults apply when omitted)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to write the per-frame render snapshots as JSON
    #[arg(long)]
    pub frames_json: Option<PathBuf>,

    /// Path to write the stage event log as JSON
    #[arg(long)]
    pub event_log_json: Option<PathBuf>,

    /// Extra frames to run after the last step so animations can finish
    #[arg(long, default_value_t = 30)]
    pub settle_frames: u32,

    /// Upper bound on frames before the run is aborted
    #[arg(long, default_value_t = 100_000)]
    pub max_frames: u32,

    /// Print every stage event instead of the summary only
    #[arg(long)]
    pub verbose: bool,
}

#[derive(Debug)]
pub struct RunArgs {
    pub scene: PathBuf,
    pub config: Option<PathBuf>,
    pub frames_json: Option<PathBuf>,
    pub event_log_json: Option<PathBuf>,
    pub settle_frames: u32,
    pub max_frames: u32,
    pub verbose: bool,
}

pub fn parse() -> Result<RunArgs> {
    let args = Args::parse();
    args.into_run_args()
}

impl Args {
    fn into_run_args(self) -> Result<RunArgs> {
        if self.max_frames == 0 {
            bail!("--max-frames must be at least 1");
        }
        Ok(RunArgs {
            scene: self.scene,
            config: self.config,
            frames_json: self.frames_json,
            event_log_json: self.event_log_json,
            settle_frames: self.settle_frames,
            max_frames: self.max_frames,
            verbose: self.verbose,
        })
    }
}
