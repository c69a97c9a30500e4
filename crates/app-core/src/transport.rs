//! Playback arithmetic shared by the control surface.

/// Playback position as a percentage; 0 while the duration is unknown.
pub fn progress_percent(current_time: f64, duration: f64) -> f64 {
    if duration.is_finite() && duration > 0.0 {
        (current_time / duration * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Target time for a seek to `fraction` of the track, or `None` when the
/// duration is not known yet.
pub fn seek_target(fraction: f64, duration: f64) -> Option<f64> {
    if !(duration.is_finite() && duration > 0.0) || fraction.is_nan() {
        return None;
    }
    Some(fraction.clamp(0.0, 1.0) * duration)
}

/// Result of a play request as reported back to the UI layer.
#[derive(Clone, Debug, PartialEq)]
pub enum PlaybackStatus {
    Playing,
    Paused,
    /// The media element refused to start; visuals keep running.
    Failed(String),
}

impl PlaybackStatus {
    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackStatus::Playing)
    }

    /// Short status string handed to the UI layer.
    pub fn label(&self) -> &str {
        match self {
            PlaybackStatus::Playing => "playing",
            PlaybackStatus::Paused => "paused",
            PlaybackStatus::Failed(_) => "failed",
        }
    }
}
