use std::collections::VecDeque;

use serde::Serialize;

use crate::scene::SceneStep;

/// Plays scene steps in order, one frame at a time. A step may ask the
/// scheduler to hold for some frames before the next step runs.
#[derive(Debug, Clone, Serialize)]
pub struct StepScheduler {
    pending: VecDeque<SceneStep>,
    history: Vec<SceneStep>,
    wait_frames: u32,
}

impl StepScheduler {
    pub fn new<S>(steps: S) -> Self
    where
        S: IntoIterator<Item = SceneStep>,
    {
        let pending: VecDeque<SceneStep> = steps.into_iter().collect();
        StepScheduler {
            pending,
            history: Vec::new(),
            wait_frames: 0,
        }
    }

    fn pop_step(&mut self) -> Option<SceneStep> {
        let step = self.pending.pop_front()?;
        self.history.push(step.clone());
        Some(step)
    }

    #[allow(dead_code)]
    pub fn peek(&self) -> Option<&SceneStep> {
        self.pending.front()
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn is_waiting(&self) -> bool {
        self.wait_frames > 0
    }

    /// No steps left and no wait outstanding.
    pub fn is_finished(&self) -> bool {
        self.pending.is_empty() && !self.is_waiting()
    }

    pub fn history(&self) -> &[SceneStep] {
        &self.history
    }

    /// Run one frame. Counts down an outstanding wait, or runs steps until one
    /// of them returns a non-zero wait. Returns how many steps ran.
    pub fn advance<F>(&mut self, mut run: F) -> usize
    where
        F: FnMut(&SceneStep) -> u32,
    {
        if self.wait_frames > 0 {
            self.wait_frames -= 1;
            return 0;
        }

        let mut ran = 0;
        while let Some(step) = self.pop_step() {
            ran += 1;
            log::debug!("step {}", step.label());
            let wait = run(&step);
            if wait > 0 {
                self.wait_frames = wait;
                break;
            }
        }
        ran
    }
}
