//! Band-energy extraction from a byte frequency spectrum.
//!
//! The analyzer is polled once per frame by the scheduler. It never owns a
//! thread and never fails: while playback is paused the last smoothed
//! energies persist, and without a bound source they read zero.

use crate::config::AnalyzerParams;
use std::ops::Range;

/// Anything that can fill a fixed-length buffer of magnitudes in `0..=255`,
/// e.g. a WebAudio `AnalyserNode`.
pub trait FrequencySource {
    fn bin_count(&self) -> usize;
    fn read(&mut self, out: &mut [u8]);
}

/// A fixed spectrum; useful for hosts without an audio backend.
impl FrequencySource for Vec<u8> {
    fn bin_count(&self) -> usize {
        self.len()
    }

    fn read(&mut self, out: &mut [u8]) {
        let n = out.len().min(self.len());
        out[..n].copy_from_slice(&self[..n]);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AudioBandEnergies {
    pub bass: f32,
    pub mid: f32,
    pub treble: f32,
    pub overall: f32,
}

impl AudioBandEnergies {
    pub fn as_array(&self) -> [f32; 4] {
        [self.bass, self.mid, self.treble, self.overall]
    }
}

/// Contiguous, gap-free bass/mid/treble ranges for a spectrum of `len` bins.
pub fn band_ranges(len: usize, bass_end_fraction: f32, mid_end_fraction: f32) -> [Range<usize>; 3] {
    let bass_end = ((len as f32 * bass_end_fraction).floor() as usize).min(len);
    let mid_end = ((len as f32 * mid_end_fraction).floor() as usize).clamp(bass_end, len);
    [0..bass_end, bass_end..mid_end, mid_end..len]
}

/// Mean of `samples[range]` mapped to `[0, 1]`; an empty range yields 0.
pub fn normalized_mean(samples: &[u8], range: Range<usize>) -> f32 {
    let count = range.len();
    if count == 0 {
        return 0.0;
    }
    let sum: u32 = samples[range].iter().map(|&s| s as u32).sum();
    sum as f32 / count as f32 / 255.0
}

/// One exponential smoothing update: `prev*alpha + raw*(1-alpha)`.
#[inline]
pub fn smooth(prev: f32, raw: f32, alpha: f32) -> f32 {
    prev * alpha + raw * (1.0 - alpha)
}

pub struct AudioAnalyzer {
    params: AnalyzerParams,
    source: Option<Box<dyn FrequencySource>>,
    samples: Vec<u8>,
    energies: AudioBandEnergies,
    playing: bool,
}

impl AudioAnalyzer {
    pub fn new(params: AnalyzerParams) -> Self {
        Self {
            params,
            source: None,
            samples: Vec::new(),
            energies: AudioBandEnergies::default(),
            playing: false,
        }
    }

    pub fn bind(&mut self, source: Box<dyn FrequencySource>) {
        self.samples.clear();
        self.samples.resize(source.bin_count(), 0);
        log::info!("[audio] analyser bound ({} bins)", self.samples.len());
        self.source = Some(source);
    }

    /// Detach the source; energies drop back to zero.
    pub fn unbind(&mut self) -> Option<Box<dyn FrequencySource>> {
        self.samples.clear();
        self.energies = AudioBandEnergies::default();
        self.source.take()
    }

    pub fn is_bound(&self) -> bool {
        self.source.is_some()
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn energies(&self) -> AudioBandEnergies {
        self.energies
    }

    /// Raw (unsmoothed) band means of the last sampled spectrum.
    pub fn raw_bands(&self) -> AudioBandEnergies {
        raw_bands(&self.samples, &self.params)
    }

    pub fn sample_bands(&mut self) {
        if !self.playing {
            return;
        }
        let Some(source) = self.source.as_mut() else {
            return;
        };
        let bins = source.bin_count();
        if self.samples.len() != bins {
            self.samples.resize(bins, 0);
        }
        source.read(&mut self.samples);

        let raw = raw_bands(&self.samples, &self.params);
        let a = self.params.smoothing;
        let e = &mut self.energies;
        e.bass = smooth(e.bass, raw.bass, a);
        e.mid = smooth(e.mid, raw.mid, a);
        e.treble = smooth(e.treble, raw.treble, a);
        e.overall = smooth(e.overall, raw.overall, a);
    }
}

fn raw_bands(samples: &[u8], params: &AnalyzerParams) -> AudioBandEnergies {
    let [bass_r, mid_r, treble_r] =
        band_ranges(samples.len(), params.bass_end_fraction, params.mid_end_fraction);
    let bass = normalized_mean(samples, bass_r);
    let mid = normalized_mean(samples, mid_r);
    let treble = normalized_mean(samples, treble_r);
    AudioBandEnergies {
        bass,
        mid,
        treble,
        overall: (bass + mid + treble) / 3.0,
    }
}
