// Host-side tests for the frame loop: ordering, lifecycle and snapshots.

use app_core::*;

fn small_config() -> VisualizerConfig {
    VisualizerConfig {
        field: FieldParams {
            resolution: 64,
            ..FieldParams::default()
        },
        ..VisualizerConfig::default()
    }
}

fn visualizer() -> Visualizer {
    Visualizer::new(small_config(), [640.0, 480.0]).unwrap()
}

#[derive(Default)]
struct Recorder {
    frames: Vec<(u64, f32, [f32; 2], AudioBandEnergies, Option<f32>)>,
}

impl SurfaceRenderer for Recorder {
    fn render(&mut self, s: &FrameSnapshot<'_>) {
        assert_eq!(s.field_texture.data.len(), 64 * 64);
        self.frames.push((
            s.frame_index,
            s.elapsed_time,
            s.viewport_size,
            s.band_energies,
            s.ripple_age(),
        ));
    }
}

#[test]
fn start_twice_keeps_a_single_loop() {
    let mut v = visualizer();
    let token = v.start(0.0).unwrap();
    assert_eq!(v.start(0.1), Err(EngineError::AlreadyRunning));

    let mut rec = Recorder::default();
    for i in 1..=5 {
        assert!(v.tick(token, i as f64 / 60.0, &mut rec));
    }
    assert_eq!(rec.frames.len(), 5);
    let indices: Vec<u64> = rec.frames.iter().map(|f| f.0).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
}

#[test]
fn stopped_loop_ignores_ticks_and_stale_tokens() {
    let mut v = visualizer();
    let old = v.start(0.0).unwrap();
    let mut rec = Recorder::default();
    v.stop();
    v.stop();
    assert!(!v.tick(old, 0.1, &mut rec));

    let fresh = v.start(0.2).unwrap();
    assert_ne!(old, fresh);
    assert!(!v.tick(old, 0.3, &mut rec));
    assert!(v.tick(fresh, 0.3, &mut rec));
    assert_eq!(rec.frames.len(), 1);
}

#[test]
fn clock_is_monotonic() {
    let mut v = visualizer();
    let t = v.start(5.0).unwrap();
    let mut rec = Recorder::default();
    v.tick(t, 6.0, &mut rec);
    v.tick(t, 5.5, &mut rec);
    v.tick(t, 7.0, &mut rec);
    let times: Vec<f32> = rec.frames.iter().map(|f| f.1).collect();
    assert_eq!(times, vec![1.0, 1.0, 2.0]);
}

#[test]
fn paused_playback_freezes_band_energies() {
    let mut v = visualizer();
    v.bind_audio(Box::new(vec![255u8; 128]));
    v.set_playing(true);
    let t = v.start(0.0).unwrap();
    let mut rec = Recorder::default();
    for i in 1..=10 {
        v.tick(t, i as f64 * 0.016, &mut rec);
    }
    let before = v.energies();
    assert!(before.overall > 0.5);

    v.set_playing(false);
    for i in 11..=30 {
        v.tick(t, i as f64 * 0.016, &mut rec);
    }
    assert_eq!(v.energies(), before);
    assert!(rec.frames[10..].iter().all(|f| f.3 == before));

    v.set_playing(true);
    v.tick(t, 31.0 * 0.016, &mut rec);
    let after = v.energies();
    assert!(after.overall > before.overall);
    assert!((after.bass - smooth(before.bass, 1.0, BAND_SMOOTHING)).abs() < 1e-6);
}

#[test]
fn queued_ripples_apply_before_the_step() {
    let mut v = visualizer();
    let t = v.start(0.0).unwrap();
    // Top-left quarter of a 640x480 surface.
    v.trigger_ripple(160.0, 120.0, 1.0);
    assert_eq!(v.pending_ripples(), 1);
    assert!(v.field().previous().iter().all(|&h| h == 0.0));

    let mut rec = Recorder::default();
    v.tick(t, 0.016, &mut rec);
    assert_eq!(v.pending_ripples(), 0);
    let ev = *v.last_ripple().unwrap();
    assert_eq!(ev.center_cell, (16, 48));
    // The splash was stepped once already: it now sits in the displayed grid.
    let field = v.field();
    assert!(field.current()[field.index(16, 48)] > 0.9);
}

#[test]
fn ripple_ring_age_is_reported_while_fresh() {
    let mut v = visualizer();
    let t = v.start(0.0).unwrap();
    let mut rec = Recorder::default();
    v.tick(t, 1.0, &mut rec);
    v.trigger_ripple(10.0, 10.0, 1.0);
    v.tick(t, 2.0, &mut rec);
    v.tick(t, 3.5, &mut rec);
    v.tick(t, 6.0, &mut rec);
    let ages: Vec<Option<f32>> = rec.frames.iter().map(|f| f.4).collect();
    // Recorded at 2.0, so it is age 0 (not yet visible) on its own frame.
    assert_eq!(ages, vec![None, None, Some(1.5), None]);
}

#[test]
fn startup_ripple_arrives_after_delay() {
    let mut v = visualizer();
    let t = v.start(0.0).unwrap();
    let mut rec = Recorder::default();
    v.tick(t, 0.1, &mut rec);
    assert!(v.last_ripple().is_none());
    v.tick(t, 0.35, &mut rec);
    let ev = *v.last_ripple().unwrap();
    assert_eq!(ev.normalized_position, [0.5, 0.5]);
    assert_eq!(ev.strength, STARTUP_RIPPLE_STRENGTH);
}

#[test]
fn pointer_activity_flows_into_the_field() {
    let mut v = visualizer();
    let t = v.start(0.0).unwrap();
    v.handle_pointer(PointerActivity::Press { x: 320.0, y: 240.0 }, 0.01);
    let mut rec = Recorder::default();
    v.tick(t, 0.02, &mut rec);
    let ev = *v.last_ripple().unwrap();
    assert_eq!(ev.strength, PRESS_STRENGTH);
    assert_eq!(ev.center_cell, (32, 32));
}

#[test]
fn resize_changes_viewport_only() {
    let mut v = visualizer();
    v.resize(1920.0, 1080.0);
    let t = v.start(0.0).unwrap();
    let mut rec = Recorder::default();
    v.tick(t, 0.1, &mut rec);
    assert_eq!(rec.frames[0].2, [1920.0, 1080.0]);
    assert_eq!(v.field().resolution(), 64);
}

#[test]
fn dispose_is_idempotent_and_final() {
    let mut v = visualizer();
    let t = v.start(0.0).unwrap();
    v.trigger_ripple(1.0, 1.0, 1.0);
    v.dispose();
    v.dispose();
    assert!(v.is_disposed());
    assert!(!v.is_running());
    assert_eq!(v.pending_ripples(), 0);
    let mut rec = Recorder::default();
    assert!(!v.tick(t, 1.0, &mut rec));
    assert_eq!(v.start(2.0), Err(EngineError::Disposed));
}

#[test]
fn closures_can_render() {
    let mut v = visualizer();
    let t = v.start(0.0).unwrap();
    let mut seen = 0;
    let mut render = |s: &FrameSnapshot<'_>| {
        let u = s.uniforms();
        assert_eq!(u.field_resolution, 64.0);
        assert_eq!(u.resolution, [640.0, 480.0]);
        seen += 1;
    };
    v.tick(t, 0.5, &mut render);
    v.tick(t, 0.6, &mut render);
    assert_eq!(seen, 2);
}

#[test]
fn invalid_config_is_rejected() {
    let mut cfg = small_config();
    cfg.analyzer.smoothing = 1.5;
    assert!(matches!(
        Visualizer::new(cfg, [1.0, 1.0]),
        Err(EngineError::InvalidConfig(_))
    ));
}

#[test]
fn input_while_stopped_is_dropped() {
    let mut v = visualizer();
    v.trigger_ripple(320.0, 240.0, 1.0);
    v.handle_pointer(PointerActivity::Press { x: 320.0, y: 240.0 }, 0.0);
    assert_eq!(v.pending_ripples(), 0);

    v.start(0.0).unwrap();
    v.stop();
    for i in 0..1000 {
        v.handle_pointer(PointerActivity::Press { x: 10.0, y: 10.0 }, i as f64 * 0.01);
        v.trigger_ripple(10.0, 10.0, 1.0);
    }
    assert_eq!(v.pending_ripples(), 0);

    let t = v.start(20.0).unwrap();
    let mut rec = Recorder::default();
    v.tick(t, 20.016, &mut rec);
    // Only the startup splash armed by the first start lands.
    let ev = *v.last_ripple().unwrap();
    assert_eq!(ev.strength, STARTUP_RIPPLE_STRENGTH);
    assert_eq!(ev.normalized_position, [0.5, 0.5]);
}

#[test]
fn pending_queue_keeps_only_the_newest() {
    let mut v = visualizer();
    let t = v.start(0.0).unwrap();
    for _ in 0..1000 {
        v.trigger_ripple(10.0, 10.0, 1.0);
    }
    v.trigger_ripple(320.0, 240.0, 2.0);
    assert_eq!(v.pending_ripples(), MAX_PENDING_RIPPLES);

    let mut rec = Recorder::default();
    v.tick(t, 0.016, &mut rec);
    assert_eq!(v.pending_ripples(), 0);
    let ev = *v.last_ripple().unwrap();
    assert_eq!(ev.center_cell, (32, 32));
    assert_eq!(ev.strength, 2.0);
}
