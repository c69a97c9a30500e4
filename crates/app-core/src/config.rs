//! Runtime parameter sets for the engine.
//!
//! Every struct defaults to the values in `constants.rs`; frontends override
//! individual fields and hand the result to [`crate::Visualizer::new`], which
//! validates the whole set once.

use crate::constants::*;
use crate::error::{EngineError, EngineResult};

#[derive(Clone, Debug, PartialEq)]
pub struct FieldParams {
    pub resolution: usize,
    pub damping: f32,
    pub dissipation: f32,
    pub motion_decay: f32,
    pub vorticity_decay: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            resolution: GRID_RESOLUTION,
            damping: FIELD_DAMPING,
            dissipation: FIELD_DISSIPATION,
            motion_decay: MOTION_DECAY,
            vorticity_decay: VORTICITY_DECAY,
        }
    }
}

impl FieldParams {
    pub fn validate(&self) -> EngineResult<()> {
        if self.resolution < 3 {
            return Err(EngineError::InvalidConfig(format!(
                "grid resolution {} leaves no interior cells",
                self.resolution
            )));
        }
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(EngineError::InvalidConfig(format!(
                "damping {} must lie in (0, 1)",
                self.damping
            )));
        }
        if !(0.0..=100.0).contains(&self.dissipation) {
            return Err(EngineError::InvalidConfig(format!(
                "dissipation {} must lie in [0, 100]",
                self.dissipation
            )));
        }
        for (name, v) in [
            ("motion_decay", self.motion_decay),
            ("vorticity_decay", self.vorticity_decay),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(EngineError::InvalidConfig(format!(
                    "{name} {v} must lie in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RippleParams {
    pub radius_cells: i32,
    pub spiral_intensity: f32,
}

impl Default for RippleParams {
    fn default() -> Self {
        Self {
            radius_cells: RIPPLE_RADIUS_CELLS,
            spiral_intensity: SPIRAL_INTENSITY,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnalyzerParams {
    pub smoothing: f32,
    pub bass_end_fraction: f32,
    pub mid_end_fraction: f32,
}

impl Default for AnalyzerParams {
    fn default() -> Self {
        Self {
            smoothing: BAND_SMOOTHING,
            bass_end_fraction: BASS_END_FRACTION,
            mid_end_fraction: MID_END_FRACTION,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputParams {
    pub move_throttle_ms: f64,
    pub move_min_distance_px: f32,
    pub press_strength: f32,
    pub startup_delay_ms: f64,
    pub startup_strength: f32,
}

impl Default for InputParams {
    fn default() -> Self {
        Self {
            move_throttle_ms: MOVE_THROTTLE_MS,
            move_min_distance_px: MOVE_MIN_DISTANCE_PX,
            press_strength: PRESS_STRENGTH,
            startup_delay_ms: STARTUP_RIPPLE_DELAY_MS,
            startup_strength: STARTUP_RIPPLE_STRENGTH,
        }
    }
}

/// Static look of the surface; copied into every frame snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceStyle {
    pub speed: f32,
    pub tints: [[f32; 3]; 3],
    pub background: [f32; 3],
    pub water_strength: f32,
    pub ring_strength: f32,
    pub audio_reactivity: f32,
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self {
            speed: PATTERN_SPEED,
            tints: TINT_COLORS,
            background: BACKGROUND_COLOR,
            water_strength: WATER_STRENGTH,
            ring_strength: RING_STRENGTH,
            audio_reactivity: AUDIO_REACTIVITY,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisualizerConfig {
    pub field: FieldParams,
    pub ripple: RippleParams,
    pub analyzer: AnalyzerParams,
    pub input: InputParams,
    pub style: SurfaceStyle,
}

impl VisualizerConfig {
    pub fn validate(&self) -> EngineResult<()> {
        self.field.validate()?;
        if self.ripple.radius_cells < 1 {
            return Err(EngineError::InvalidConfig(format!(
                "ripple radius {} must be at least one cell",
                self.ripple.radius_cells
            )));
        }
        let a = &self.analyzer;
        if !(0.0..1.0).contains(&a.smoothing) {
            return Err(EngineError::InvalidConfig(format!(
                "band smoothing {} must lie in [0, 1)",
                a.smoothing
            )));
        }
        if !(0.0 <= a.bass_end_fraction
            && a.bass_end_fraction <= a.mid_end_fraction
            && a.mid_end_fraction <= 1.0)
        {
            return Err(EngineError::InvalidConfig(format!(
                "band split {}/{} must be ordered within [0, 1]",
                a.bass_end_fraction, a.mid_end_fraction
            )));
        }
        if self.input.move_throttle_ms < 0.0 || self.input.startup_delay_ms < 0.0 {
            return Err(EngineError::InvalidConfig(
                "input intervals must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}
