use anyhow::Result;

mod cli;
mod frame;
mod runtime;
mod scene;
mod scheduler;
mod tween;

fn main() -> Result<()> {
    env_logger::init();
    let args = cli::parse()?;
    runtime::execute(args)
}
