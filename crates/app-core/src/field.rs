//! Damped discrete wave field.
//!
//! Two height grids live in a fixed arena and trade roles every step through
//! an index toggle. The `previous` role always holds the most recent state:
//! the update rule reads its neighbours from it, ripples are deposited into
//! it, and the freshly computed grid takes it over after the swap. The
//! `current` role holds the state one step older and is what gets uploaded to
//! the renderer.

use crate::config::FieldParams;
use crate::constants::HEIGHT_LIMIT;
use crate::error::EngineResult;
use glam::Vec2;

pub struct WaveField {
    resolution: usize,
    params: FieldParams,
    buffers: [Vec<f32>; 2],
    // Arena slot currently playing the `previous` role.
    previous_slot: usize,
    velocity: Vec<Vec2>,
    vorticity: Vec<f32>,
    steps: u64,
}

impl WaveField {
    pub fn new(params: FieldParams) -> EngineResult<Self> {
        params.validate()?;
        let n = params.resolution;
        let cells = n * n;
        Ok(Self {
            resolution: n,
            params,
            buffers: [vec![0.0; cells], vec![0.0; cells]],
            previous_slot: 0,
            velocity: vec![Vec2::ZERO; cells],
            vorticity: vec![0.0; cells],
            steps: 0,
        })
    }

    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.resolution + x
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        let n = self.resolution as i32;
        x >= 0 && x < n && y >= 0 && y < n
    }

    #[inline]
    pub fn current(&self) -> &[f32] {
        &self.buffers[1 - self.previous_slot]
    }

    #[inline]
    pub fn previous(&self) -> &[f32] {
        &self.buffers[self.previous_slot]
    }

    #[inline]
    pub fn velocity(&self) -> &[Vec2] {
        &self.velocity
    }

    #[inline]
    pub fn vorticity(&self) -> &[f32] {
        &self.vorticity
    }

    pub fn vorticity_mut(&mut self) -> &mut [f32] {
        &mut self.vorticity
    }

    /// Number of completed steps since construction or the last reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Row-major heights of the displayed grid. Row 0 is the bottom edge of
    /// the surface.
    #[inline]
    pub fn texture(&self) -> &[f32] {
        self.current()
    }

    pub fn texture_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.current())
    }

    /// Add `value` to the most recent state at `(x, y)` and push the cell's
    /// velocity along `dir`. Out-of-range cells are ignored.
    pub fn deposit(&mut self, x: i32, y: i32, value: f32, push: Vec2) {
        if !self.in_bounds(x, y) {
            return;
        }
        let i = self.index(x as usize, y as usize);
        self.buffers[self.previous_slot][i] += value;
        self.velocity[i] += push;
    }

    pub fn step(&mut self) {
        let n = self.resolution;
        let damping = self.params.damping;
        let keep = 1.0 - self.params.dissipation * 0.01;

        let (first, second) = self.buffers.split_at_mut(1);
        let (previous, current) = if self.previous_slot == 0 {
            (&mut first[0], &mut second[0])
        } else {
            (&mut second[0], &mut first[0])
        };

        for y in 1..n - 1 {
            let row = y * n;
            for x in 1..n - 1 {
                let i = row + x;
                let top = previous[i - n];
                let bottom = previous[i + n];
                let left = previous[i - 1];
                let right = previous[i + 1];
                let raw = (top + bottom + left + right) / 2.0 - current[i];
                let blended = raw * damping + previous[i] * (1.0 - damping);
                current[i] = (blended * keep).clamp(-HEIGHT_LIMIT, HEIGHT_LIMIT);
            }
        }
        zero_border(current, n);

        // The outgoing `previous` becomes `current` next; it may still carry
        // raw deposits from this frame's ripples.
        for v in previous.iter_mut() {
            *v = v.clamp(-HEIGHT_LIMIT, HEIGHT_LIMIT);
        }
        zero_border(previous, n);

        self.previous_slot = 1 - self.previous_slot;

        let motion_keep = 1.0 - self.params.motion_decay;
        for v in self.velocity.iter_mut() {
            *v *= motion_keep;
        }
        let vort_keep = 1.0 - self.params.vorticity_decay;
        for w in self.vorticity.iter_mut() {
            *w *= vort_keep;
        }
        self.steps += 1;
    }

    pub fn reset(&mut self) {
        for buf in self.buffers.iter_mut() {
            buf.fill(0.0);
        }
        self.velocity.fill(Vec2::ZERO);
        self.vorticity.fill(0.0);
        self.previous_slot = 0;
        self.steps = 0;
    }
}

fn zero_border(grid: &mut [f32], n: usize) {
    for i in 0..n {
        grid[i] = 0.0;
        grid[(n - 1) * n + i] = 0.0;
        grid[i * n] = 0.0;
        grid[i * n + (n - 1)] = 0.0;
    }
}
