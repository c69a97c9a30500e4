// Host-side tests for band extraction and smoothing.

use app_core::*;
use rand::prelude::*;

fn analyzer_with(spectrum: Vec<u8>) -> AudioAnalyzer {
    let mut a = AudioAnalyzer::new(AnalyzerParams::default());
    a.bind(Box::new(spectrum));
    a.set_playing(true);
    a
}

#[test]
fn band_ranges_partition_exactly() {
    for len in 0..=2048usize {
        let [bass, mid, treble] = band_ranges(len, BASS_END_FRACTION, MID_END_FRACTION);
        assert_eq!(bass.start, 0);
        assert_eq!(bass.end, len / 10, "bass end for len {len}");
        assert_eq!(mid.start, bass.end);
        assert_eq!(mid.end, len / 2, "mid end for len {len}");
        assert_eq!(treble.start, mid.end);
        assert_eq!(treble.end, len);
        assert_eq!(bass.len() + mid.len() + treble.len(), len);
    }
}

#[test]
fn full_scale_spectrum_reads_as_one() {
    let mut a = analyzer_with(vec![255; 10]);
    a.sample_bands();
    let raw = a.raw_bands();
    assert_eq!(raw.bass, 1.0);
    assert_eq!(raw.mid, 1.0);
    assert_eq!(raw.treble, 1.0);
    assert_eq!(raw.overall, 1.0);
}

#[test]
fn smoothing_converges_towards_full_scale() {
    let mut a = analyzer_with(vec![255; 10]);
    a.sample_bands();
    let first = a.energies();
    assert!((first.bass - 0.2).abs() < 1e-6);
    for _ in 0..200 {
        a.sample_bands();
    }
    let e = a.energies();
    for v in e.as_array() {
        assert!((v - 1.0).abs() < 1e-4, "band {v} did not converge");
    }
}

#[test]
fn bands_see_only_their_own_bins() {
    let mut spectrum = vec![0u8; 128];
    for s in spectrum.iter_mut().take(12) {
        *s = 255;
    }
    let mut a = analyzer_with(spectrum);
    a.sample_bands();
    let raw = a.raw_bands();
    assert_eq!(raw.bass, 1.0);
    assert_eq!(raw.mid, 0.0);
    assert_eq!(raw.treble, 0.0);
    assert!((raw.overall - 1.0 / 3.0).abs() < 1e-6);
}

#[test]
fn one_smoothing_step_stays_between_old_and_raw() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..1000 {
        let prev: f32 = rng.gen();
        let raw: f32 = rng.gen();
        let next = smooth(prev, raw, BAND_SMOOTHING);
        let lo = prev.min(raw);
        let hi = prev.max(raw);
        assert!(next >= lo - 1e-6 && next <= hi + 1e-6);
    }
}

#[test]
fn paused_analyzer_holds_values() {
    let mut a = analyzer_with(vec![200; 64]);
    for _ in 0..5 {
        a.sample_bands();
    }
    let held = a.energies();
    a.set_playing(false);
    for _ in 0..20 {
        a.sample_bands();
    }
    assert_eq!(a.energies(), held);
}

#[test]
fn unbound_analyzer_reports_zero() {
    let mut a = AudioAnalyzer::new(AnalyzerParams::default());
    a.set_playing(true);
    a.sample_bands();
    assert!(!a.is_bound());
    assert_eq!(a.energies(), AudioBandEnergies::default());
}

#[test]
fn unbind_resets_energies() {
    let mut a = analyzer_with(vec![255; 32]);
    a.sample_bands();
    assert!(a.energies().overall > 0.0);
    assert!(a.unbind().is_some());
    assert_eq!(a.energies(), AudioBandEnergies::default());
    a.sample_bands();
    assert_eq!(a.energies(), AudioBandEnergies::default());
}

#[test]
fn empty_spectrum_is_harmless() {
    let mut a = analyzer_with(Vec::new());
    a.sample_bands();
    assert_eq!(a.energies(), AudioBandEnergies::default());
}
