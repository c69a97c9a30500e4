//! Per-frame synchronization point between the simulation state and the
//! renderer.
//!
//! A [`FrameSnapshot`] borrows the field immutably, so nothing can mutate the
//! grid while the renderer holds one, and every uniform the shader sees is
//! derived from a single snapshot in [`FrameSnapshot::uniforms`].

use crate::analyzer::AudioBandEnergies;
use crate::config::SurfaceStyle;
use crate::field::WaveField;
use crate::ripple::RippleEvent;

/// Read-only view of the displayed height grid.
#[derive(Clone, Copy, Debug)]
pub struct FieldTexture<'a> {
    pub resolution: usize,
    pub data: &'a [f32],
}

impl<'a> FieldTexture<'a> {
    pub fn bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.data)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FrameSnapshot<'a> {
    pub frame_index: u64,
    pub elapsed_time: f32,
    pub viewport_size: [f32; 2],
    pub field_texture: FieldTexture<'a>,
    pub band_energies: AudioBandEnergies,
    pub last_ripple: Option<RippleEvent>,
    pub style: SurfaceStyle,
}

impl<'a> FrameSnapshot<'a> {
    /// Age of the last ripple while its ring is still visible.
    pub fn ripple_age(&self) -> Option<f32> {
        self.last_ripple
            .filter(|r| r.ring_active(self.elapsed_time))
            .map(|r| r.age(self.elapsed_time))
    }

    pub fn uniforms(&self) -> SurfaceUniforms {
        let tint = |c: [f32; 3]| [c[0], c[1], c[2], 1.0];
        let (ripple_pos, ripple_age) = match (self.last_ripple, self.ripple_age()) {
            (Some(r), Some(age)) => (r.normalized_position, age),
            // Negative age keeps the ring term switched off in the shader.
            _ => ([0.5, 0.5], -1.0),
        };
        let e = &self.band_energies;
        SurfaceUniforms {
            resolution: self.viewport_size,
            time: self.elapsed_time,
            speed: self.style.speed,
            color1: tint(self.style.tints[0]),
            color2: tint(self.style.tints[1]),
            color3: tint(self.style.tints[2]),
            background: tint(self.style.background),
            audio: [e.bass, e.mid, e.treble, e.overall],
            ripple_pos,
            ripple_age,
            ripple_strength: self.style.ring_strength,
            water_strength: self.style.water_strength,
            audio_reactivity: self.style.audio_reactivity,
            field_resolution: self.field_texture.resolution as f32,
            _pad: 0.0,
        }
    }
}

/// Uniform block consumed by `surface.wgsl`. Field order and padding match
/// the WGSL struct.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SurfaceUniforms {
    pub resolution: [f32; 2],
    pub time: f32,
    pub speed: f32,
    pub color1: [f32; 4],
    pub color2: [f32; 4],
    pub color3: [f32; 4],
    pub background: [f32; 4],
    pub audio: [f32; 4],
    pub ripple_pos: [f32; 2],
    pub ripple_age: f32,
    pub ripple_strength: f32,
    pub water_strength: f32,
    pub audio_reactivity: f32,
    pub field_resolution: f32,
    pub _pad: f32,
}

pub struct ShaderParameterBridge {
    style: SurfaceStyle,
    viewport: [f32; 2],
    frames: u64,
}

impl ShaderParameterBridge {
    pub fn new(style: SurfaceStyle, viewport: [f32; 2]) -> Self {
        Self {
            style,
            viewport,
            frames: 0,
        }
    }

    pub fn viewport(&self) -> [f32; 2] {
        self.viewport
    }

    /// Only the output size changes; the grid resolution is fixed.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = [width.max(1.0), height.max(1.0)];
    }

    pub fn frames_synced(&self) -> u64 {
        self.frames
    }

    pub fn sync_frame<'a>(
        &mut self,
        elapsed_time: f32,
        field: &'a WaveField,
        band_energies: AudioBandEnergies,
        last_ripple: Option<RippleEvent>,
    ) -> FrameSnapshot<'a> {
        let snapshot = FrameSnapshot {
            frame_index: self.frames,
            elapsed_time,
            viewport_size: self.viewport,
            field_texture: FieldTexture {
                resolution: field.resolution(),
                data: field.texture(),
            },
            band_energies,
            last_ripple,
            style: self.style,
        };
        self.frames += 1;
        snapshot
    }
}
