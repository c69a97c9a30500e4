use crate::error::{EngineError, EngineResult};
use instant::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    Stopped,
    Running,
}

/// Identifies one started frame loop. Refresh callbacks carry it back so a
/// loop that was stopped (or replaced) can no longer drive frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoopToken(u64);

/// Wall-clock source shared by frame ticks and input events.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl MonotonicClock {
    pub fn now_sec(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    pub fn now_ms(&self) -> f64 {
        self.now_sec() * 1000.0
    }
}

/// Start/stop lifecycle and the simulation clock. The per-tick work lives in
/// [`crate::Visualizer::tick`].
pub struct FrameScheduler {
    state: SchedulerState,
    generation: u64,
    origin_sec: Option<f64>,
    elapsed: f64,
    ticks: u64,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            state: SchedulerState::Stopped,
            generation: 0,
            origin_sec: None,
            elapsed: 0.0,
            ticks: 0,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    pub fn start(&mut self, now_sec: f64) -> EngineResult<LoopToken> {
        if self.is_running() {
            return Err(EngineError::AlreadyRunning);
        }
        self.origin_sec.get_or_insert(now_sec);
        self.generation += 1;
        self.state = SchedulerState::Running;
        log::info!("[frame] loop {} started", self.generation);
        Ok(LoopToken(self.generation))
    }

    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        self.state = SchedulerState::Stopped;
        // Invalidate the outstanding token.
        self.generation += 1;
        log::info!("[frame] loop stopped after {} ticks", self.ticks);
    }

    pub fn accepts(&self, token: LoopToken) -> bool {
        self.is_running() && token.0 == self.generation
    }

    /// Advance the simulation clock. Elapsed time never runs backwards.
    pub fn advance(&mut self, now_sec: f64) -> f32 {
        let origin = *self.origin_sec.get_or_insert(now_sec);
        self.elapsed = self.elapsed.max(now_sec - origin);
        self.ticks += 1;
        self.elapsed as f32
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
