//! The engine object owning every piece of simulation state.

use crate::analyzer::{AudioAnalyzer, AudioBandEnergies, FrequencySource};
use crate::config::VisualizerConfig;
use crate::constants::MAX_PENDING_RIPPLES;
use crate::error::{EngineError, EngineResult};
use crate::field::WaveField;
use crate::input::{InputRouter, PointerActivity, RippleRequest};
use crate::ripple::{RippleEvent, RippleInjector, SurfaceRect};
use crate::scheduler::{FrameScheduler, LoopToken};
use crate::snapshot::{FrameSnapshot, ShaderParameterBridge};
use smallvec::SmallVec;

/// Receives exactly one complete snapshot per tick.
pub trait SurfaceRenderer {
    fn render(&mut self, snapshot: &FrameSnapshot<'_>);
}

impl<F: FnMut(&FrameSnapshot<'_>)> SurfaceRenderer for F {
    fn render(&mut self, snapshot: &FrameSnapshot<'_>) {
        self(snapshot)
    }
}

pub struct Visualizer {
    field: WaveField,
    injector: RippleInjector,
    analyzer: AudioAnalyzer,
    bridge: ShaderParameterBridge,
    router: InputRouter,
    scheduler: FrameScheduler,
    surface_rect: SurfaceRect,
    pending: SmallVec<[RippleRequest; 8]>,
    disposed: bool,
}

impl Visualizer {
    pub fn new(config: VisualizerConfig, viewport: [f32; 2]) -> EngineResult<Self> {
        config.validate()?;
        let field = WaveField::new(config.field.clone())?;
        log::info!(
            "[engine] field {}x{} damping={} dissipation={}",
            field.resolution(),
            field.resolution(),
            config.field.damping,
            config.field.dissipation
        );
        Ok(Self {
            field,
            injector: RippleInjector::new(config.ripple),
            analyzer: AudioAnalyzer::new(config.analyzer),
            bridge: ShaderParameterBridge::new(config.style, viewport),
            router: InputRouter::new(config.input),
            scheduler: FrameScheduler::new(),
            surface_rect: SurfaceRect::sized(viewport[0], viewport[1]),
            pending: SmallVec::new(),
            disposed: false,
        })
    }

    // ---------------- Lifecycle ----------------

    /// Begin a frame loop. Starting twice without a `stop` is rejected so only
    /// one loop can ever drive ticks.
    pub fn start(&mut self, now_sec: f64) -> EngineResult<LoopToken> {
        if self.disposed {
            return Err(EngineError::Disposed);
        }
        let token = self.scheduler.start(now_sec)?;
        self.router.arm_startup(now_sec * 1000.0);
        Ok(token)
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Stop and drop all transient state. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.scheduler.stop();
        self.pending.clear();
        self.analyzer.set_playing(false);
        self.analyzer.unbind();
        self.injector.clear();
        self.field.reset();
        self.disposed = true;
        log::info!("[engine] disposed");
    }

    /// Run one frame: clock, queued ripples, band sampling, field step,
    /// snapshot, render. Returns `false` (and does nothing) when `token` does
    /// not belong to the running loop.
    pub fn tick<R>(&mut self, token: LoopToken, now_sec: f64, renderer: &mut R) -> bool
    where
        R: SurfaceRenderer + ?Sized,
    {
        if !self.scheduler.accepts(token) {
            return false;
        }
        let elapsed = self.scheduler.advance(now_sec);

        if let Some(req) = self.router.poll_startup(&self.surface_rect, now_sec * 1000.0) {
            self.pending.push(req);
        }
        for req in std::mem::take(&mut self.pending) {
            self.injector.inject(
                &mut self.field,
                &self.surface_rect,
                req.client_x,
                req.client_y,
                req.strength,
                elapsed,
            );
        }

        self.analyzer.sample_bands();
        self.field.step();

        let snapshot = self.bridge.sync_frame(
            elapsed,
            &self.field,
            self.analyzer.energies(),
            self.injector.last_ripple().copied(),
        );
        renderer.render(&snapshot);
        true
    }

    // ---------------- Input ----------------

    /// Ignored while the loop is stopped: nothing would drain the queue.
    pub fn handle_pointer(&mut self, activity: PointerActivity, now_sec: f64) {
        if !self.scheduler.is_running() {
            return;
        }
        if let Some(req) = self
            .router
            .route(activity, &self.surface_rect, now_sec * 1000.0)
        {
            self.enqueue(req);
        }
    }

    /// Queue a ripple at client coordinates; applied on the next tick.
    /// Ignored while the loop is stopped.
    pub fn trigger_ripple(&mut self, client_x: f32, client_y: f32, strength: f32) {
        if !self.scheduler.is_running() {
            return;
        }
        self.enqueue(RippleRequest {
            client_x,
            client_y,
            strength,
        });
    }

    fn enqueue(&mut self, req: RippleRequest) {
        if self.pending.len() >= MAX_PENDING_RIPPLES {
            self.pending.remove(0);
        }
        self.pending.push(req);
    }

    pub fn pending_ripples(&self) -> usize {
        self.pending.len()
    }

    pub fn set_surface_rect(&mut self, rect: SurfaceRect) {
        self.surface_rect = rect;
    }

    pub fn surface_rect(&self) -> SurfaceRect {
        self.surface_rect
    }

    /// Update output size only; the grid resolution never changes.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bridge.resize(width, height);
    }

    // ---------------- Audio ----------------

    pub fn bind_audio(&mut self, source: Box<dyn FrequencySource>) {
        if self.disposed {
            return;
        }
        self.analyzer.bind(source);
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.analyzer.set_playing(playing);
    }

    pub fn is_playing(&self) -> bool {
        self.analyzer.is_playing()
    }

    // ---------------- Accessors ----------------

    pub fn field(&self) -> &WaveField {
        &self.field
    }

    pub fn analyzer(&self) -> &AudioAnalyzer {
        &self.analyzer
    }

    pub fn energies(&self) -> AudioBandEnergies {
        self.analyzer.energies()
    }

    pub fn last_ripple(&self) -> Option<&RippleEvent> {
        self.injector.last_ripple()
    }

    pub fn viewport(&self) -> [f32; 2] {
        self.bridge.viewport()
    }

    pub fn elapsed(&self) -> f32 {
        self.scheduler.elapsed()
    }

    pub fn ticks(&self) -> u64 {
        self.scheduler.ticks()
    }
}
