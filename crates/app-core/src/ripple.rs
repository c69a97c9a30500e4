use crate::config::RippleParams;
use crate::constants::RIPPLE_RING_LIFETIME_SEC;
use crate::field::WaveField;
use glam::Vec2;
use std::f32::consts::FRAC_PI_2;

/// Bounding rectangle of the drawing surface in client (CSS pixel) space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A rect anchored at the origin; handy when coordinates are already
    /// surface-relative.
    pub fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Client coordinates of the visual centre.
    pub fn center(&self) -> [f32; 2] {
        [
            self.left + self.width * 0.5,
            self.top + self.height * 0.5,
        ]
    }

    /// Normalized surface position with y pointing up, or `None` for a
    /// zero-area rect.
    pub fn normalize(&self, client_x: f32, client_y: f32) -> Option<[f32; 2]> {
        if self.is_degenerate() {
            return None;
        }
        let nx = (client_x - self.left) / self.width;
        let ny = 1.0 - (client_y - self.top) / self.height;
        Some([nx, ny])
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleEvent {
    pub center_cell: (i32, i32),
    pub radius_cells: i32,
    pub strength: f32,
    pub normalized_position: [f32; 2],
    pub simulation_timestamp: f32,
}

impl RippleEvent {
    /// Seconds since the ripple was recorded.
    #[inline]
    pub fn age(&self, elapsed: f32) -> f32 {
        elapsed - self.simulation_timestamp
    }

    /// Whether the visual ring still contributes at `elapsed`.
    #[inline]
    pub fn ring_active(&self, elapsed: f32) -> bool {
        let age = self.age(elapsed);
        age > 0.0 && age < RIPPLE_RING_LIFETIME_SEC
    }
}

/// Deposit a cosine-shaped disc of height into `field.previous` centred on
/// `(cx, cy)`, plus an outward velocity hint. Returns the number of in-bounds
/// cells touched.
pub fn deposit_disc(
    field: &mut WaveField,
    cx: i32,
    cy: i32,
    strength: f32,
    radius: i32,
    spiral_intensity: f32,
) -> usize {
    let radius = radius.max(1);
    let r2 = radius * radius;
    let rf = radius as f32;
    let mut touched = 0;
    for i in -radius..=radius {
        for j in -radius..=radius {
            let dsq = i * i + j * j;
            let (x, y) = (cx.saturating_add(i), cy.saturating_add(j));
            if dsq > r2 || !field.in_bounds(x, y) {
                continue;
            }
            let dist = (dsq as f32).sqrt();
            let falloff = 1.0 - dist / rf;
            let value = ((dist / rf) * FRAC_PI_2).cos() * strength * falloff;
            let angle = (j as f32).atan2(i as f32);
            let push = Vec2::new(angle.cos(), angle.sin()) * value * spiral_intensity;
            field.deposit(x, y, value, push);
            touched += 1;
        }
    }
    touched
}

/// Turns surface coordinates into field perturbations and remembers the most
/// recent one for the ring overlay.
pub struct RippleInjector {
    params: RippleParams,
    last: Option<RippleEvent>,
}

impl RippleInjector {
    pub fn new(params: RippleParams) -> Self {
        Self { params, last: None }
    }

    pub fn radius(&self) -> i32 {
        self.params.radius_cells
    }

    pub fn last_ripple(&self) -> Option<&RippleEvent> {
        self.last.as_ref()
    }

    /// Map client pixel coordinates through `rect` onto the grid and splash.
    /// A zero-area rect means the surface is not laid out yet; nothing
    /// happens and `None` is returned. Non-finite coordinates are dropped the
    /// same way.
    pub fn inject(
        &mut self,
        field: &mut WaveField,
        rect: &SurfaceRect,
        pixel_x: f32,
        pixel_y: f32,
        strength: f32,
        now_sec: f32,
    ) -> Option<RippleEvent> {
        let [nx, ny] = rect.normalize(pixel_x, pixel_y)?;
        if !(nx.is_finite() && ny.is_finite()) {
            return None;
        }
        let res = field.resolution() as f32;
        // Far-off targets stay just outside the disc's reach of the grid.
        let reach = self.params.radius_cells.max(1) + 1;
        let hi = field.resolution() as i32 - 1 + reach;
        let tx = ((nx * res).floor() as i32).clamp(-reach, hi);
        let ty = ((ny * res).floor() as i32).clamp(-reach, hi);
        Some(self.splash(field, tx, ty, strength, [nx, ny], now_sec))
    }

    /// Splash directly at a grid cell. The ring position is derived from the
    /// cell centre.
    pub fn inject_cell(
        &mut self,
        field: &mut WaveField,
        cx: i32,
        cy: i32,
        strength: f32,
        now_sec: f32,
    ) -> RippleEvent {
        let res = field.resolution() as f32;
        let pos = [(cx as f32 + 0.5) / res, (cy as f32 + 0.5) / res];
        self.splash(field, cx, cy, strength, pos, now_sec)
    }

    fn splash(
        &mut self,
        field: &mut WaveField,
        cx: i32,
        cy: i32,
        strength: f32,
        normalized_position: [f32; 2],
        now_sec: f32,
    ) -> RippleEvent {
        let touched = deposit_disc(
            field,
            cx,
            cy,
            strength,
            self.params.radius_cells,
            self.params.spiral_intensity,
        );
        log::debug!(
            "[ripple] cell=({},{}) strength={:.2} cells={}",
            cx,
            cy,
            strength,
            touched
        );
        let ev = RippleEvent {
            center_cell: (cx, cy),
            radius_cells: self.params.radius_cells,
            strength,
            normalized_position,
            simulation_timestamp: now_sec,
        };
        self.last = Some(ev);
        ev
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}
