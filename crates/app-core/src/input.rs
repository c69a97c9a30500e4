//! Pointer/touch/click routing.
//!
//! Every raw event (mouse move, touch move, click, tap) is translated by the
//! frontend into a [`PointerActivity`] and goes through the same throttling
//! and strength mapping here before it becomes a [`RippleRequest`].

use crate::config::InputParams;
use crate::constants::{
    MOVE_DISTANCE_CAP, MOVE_DISTANCE_DIVISOR, MOVE_SPEED_CAP, MOVE_SPEED_DIVISOR,
};
use crate::ripple::SurfaceRect;

/// Client-space coordinates of a pointer event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerActivity {
    Move { x: f32, y: f32 },
    Press { x: f32, y: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleRequest {
    pub client_x: f32,
    pub client_y: f32,
    pub strength: f32,
}

/// Strength of a movement-triggered ripple: a speed-like factor and a
/// distance factor, each capped, multiplied together.
#[inline]
pub fn move_strength(distance_px: f32) -> f32 {
    (distance_px / MOVE_SPEED_DIVISOR).min(MOVE_SPEED_CAP)
        * (distance_px / MOVE_DISTANCE_DIVISOR).min(MOVE_DISTANCE_CAP)
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Startup {
    Idle,
    Armed { due_ms: f64 },
    Fired,
}

pub struct InputRouter {
    params: InputParams,
    // Last accepted position, surface-relative.
    last_pos: Option<[f32; 2]>,
    last_checked_ms: Option<f64>,
    startup: Startup,
}

impl InputRouter {
    pub fn new(params: InputParams) -> Self {
        Self {
            params,
            last_pos: None,
            last_checked_ms: None,
            startup: Startup::Idle,
        }
    }

    pub fn route(
        &mut self,
        activity: PointerActivity,
        rect: &SurfaceRect,
        now_ms: f64,
    ) -> Option<RippleRequest> {
        match activity {
            PointerActivity::Press { x, y } => Some(RippleRequest {
                client_x: x,
                client_y: y,
                strength: self.params.press_strength,
            }),
            PointerActivity::Move { x, y } => self.route_move(x, y, rect, now_ms),
        }
    }

    fn route_move(
        &mut self,
        client_x: f32,
        client_y: f32,
        rect: &SurfaceRect,
        now_ms: f64,
    ) -> Option<RippleRequest> {
        let pos = [client_x - rect.left, client_y - rect.top];
        let last = *self.last_pos.get_or_insert(pos);

        if let Some(t) = self.last_checked_ms {
            if now_ms - t < self.params.move_throttle_ms {
                return None;
            }
        }
        self.last_checked_ms = Some(now_ms);

        let dx = pos[0] - last[0];
        let dy = pos[1] - last[1];
        let dist = (dx * dx + dy * dy).sqrt();
        if dist <= self.params.move_min_distance_px {
            return None;
        }
        self.last_pos = Some(pos);
        Some(RippleRequest {
            client_x,
            client_y,
            strength: move_strength(dist),
        })
    }

    /// Schedule the one-off startup ripple. Later calls are ignored, so the
    /// splash happens at most once per router.
    pub fn arm_startup(&mut self, now_ms: f64) {
        if self.startup == Startup::Idle {
            self.startup = Startup::Armed {
                due_ms: now_ms + self.params.startup_delay_ms,
            };
        }
    }

    pub fn poll_startup(&mut self, rect: &SurfaceRect, now_ms: f64) -> Option<RippleRequest> {
        match self.startup {
            Startup::Armed { due_ms } if now_ms >= due_ms => {
                self.startup = Startup::Fired;
                let [cx, cy] = rect.center();
                log::info!("[input] startup ripple at ({:.1},{:.1})", cx, cy);
                Some(RippleRequest {
                    client_x: cx,
                    client_y: cy,
                    strength: self.params.startup_strength,
                })
            }
            _ => None,
        }
    }

    pub fn startup_pending(&self) -> bool {
        matches!(self.startup, Startup::Armed { .. })
    }
}
