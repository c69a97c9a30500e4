// Shared simulation/analysis/visual tuning constants used by the web frontend
// and the host-side tests.

// Wave field
pub const GRID_RESOLUTION: usize = 256; // cells per side; fixed for the life of a field
pub const FIELD_DAMPING: f32 = 0.913; // must stay below 1.0 for stability
pub const FIELD_DISSIPATION: f32 = 1.0; // percent of energy removed per step
pub const HEIGHT_LIMIT: f32 = 2.0; // heights are clamped to [-HEIGHT_LIMIT, HEIGHT_LIMIT]
pub const MOTION_DECAY: f32 = 0.02; // fraction of velocity lost per step
pub const VORTICITY_DECAY: f32 = 0.02;

// Ripple injection
pub const RIPPLE_RADIUS_CELLS: i32 = 8;
pub const SPIRAL_INTENSITY: f32 = 0.5; // scales the directional velocity deposit
pub const RIPPLE_RING_LIFETIME_SEC: f32 = 3.0; // visual ring is drawn while 0 < age < lifetime

// Audio bands (fractions of the spectrum length)
pub const BASS_END_FRACTION: f32 = 0.1;
pub const MID_END_FRACTION: f32 = 0.5;
pub const BAND_SMOOTHING: f32 = 0.8; // new = old*α + raw*(1-α)
pub const ANALYSER_FFT_SIZE: u32 = 256;
pub const ANALYSER_TIME_SMOOTHING: f64 = 0.8;

// Pointer routing
pub const MOVE_THROTTLE_MS: f64 = 8.0;
pub const MOVE_MIN_DISTANCE_PX: f32 = 1.0;
pub const MOVE_SPEED_DIVISOR: f32 = 20.0;
pub const MOVE_SPEED_CAP: f32 = 1.0;
pub const MOVE_DISTANCE_DIVISOR: f32 = 80.0;
pub const MOVE_DISTANCE_CAP: f32 = 2.0;
pub const PRESS_STRENGTH: f32 = 3.0;
pub const STARTUP_RIPPLE_DELAY_MS: f64 = 300.0;
pub const STARTUP_RIPPLE_STRENGTH: f32 = 1.2;
pub const MAX_PENDING_RIPPLES: usize = 32; // oldest requests are dropped beyond this

// Surface look
pub const PATTERN_SPEED: f32 = 1.3;
pub const WATER_STRENGTH: f32 = 0.55;
pub const RING_STRENGTH: f32 = 0.5;
pub const AUDIO_REACTIVITY: f32 = 1.0;
pub const TINT_COLORS: [[f32; 3]; 3] = [
    [1.0, 1.0, 1.0],   // red channel tint
    [0.9, 0.95, 1.0],  // green channel tint
    [0.8, 0.9, 1.0],   // blue channel tint
];
pub const BACKGROUND_COLOR: [f32; 3] = [0.02, 0.02, 0.05];

// Output sizing
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;
