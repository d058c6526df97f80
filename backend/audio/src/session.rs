use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use studyforge_core::StudyError;

/// Playback states. `Generating` covers the arm delay after a generate request.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AudioState {
    #[default]
    Unarmed,
    Generating,
    Ready,
    Playing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced,
    /// Reached the duration: stopped and rewound.
    Finished,
    /// Not playing; the tick was stale.
    Ignored,
}

/// Progress bar and clock text for the player widget.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AudioView {
    pub state: AudioState,
    pub elapsed_secs: f64,
    pub percentage: f64,
    pub time: String,
}

/// The simulated playback clock.
///
/// Invariant: `elapsed <= duration`. Reaching the duration while playing
/// returns to `Ready` with `elapsed` rewound to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSession {
    state: AudioState,
    duration: Duration,
    elapsed: Duration,
}

impl AudioSession {
    pub fn new(duration: Duration) -> Self {
        Self {
            state: AudioState::Unarmed,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    pub fn state(&self) -> AudioState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == AudioState::Playing
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Request audio for the document text. Stops any playback in progress.
    pub fn generate(&mut self, text: &str) -> Result<(), StudyError> {
        if text.is_empty() {
            return Err(StudyError::EmptyDocument);
        }
        self.state = AudioState::Generating;
        self.elapsed = Duration::ZERO;
        debug!("Audio generation started");
        Ok(())
    }

    /// Finish the arm delay. Returns false if generation was not pending.
    pub fn arm(&mut self) -> bool {
        if self.state != AudioState::Generating {
            return false;
        }
        self.state = AudioState::Ready;
        self.elapsed = Duration::ZERO;
        info!(duration_secs = self.duration.as_secs_f64(), "Audio armed");
        true
    }

    /// `Ready <-> Playing`. Pausing keeps `elapsed`. Other states are unchanged.
    pub fn toggle(&mut self) -> AudioState {
        self.state = match self.state {
            AudioState::Ready => AudioState::Playing,
            AudioState::Playing => AudioState::Ready,
            other => other,
        };
        self.state
    }

    pub fn tick(&mut self, step: Duration) -> TickOutcome {
        if self.state != AudioState::Playing {
            return TickOutcome::Ignored;
        }
        self.elapsed = (self.elapsed + step).min(self.duration);
        if self.elapsed >= self.duration {
            self.state = AudioState::Ready;
            self.elapsed = Duration::ZERO;
            info!("Playback finished");
            return TickOutcome::Finished;
        }
        TickOutcome::Advanced
    }

    /// Back to `Unarmed`, as if audio had never been generated.
    pub fn reset(&mut self) {
        self.state = AudioState::Unarmed;
        self.elapsed = Duration::ZERO;
    }

    pub fn percentage(&self) -> f64 {
        if self.duration.is_zero() {
            return 0.0;
        }
        self.elapsed.as_secs_f64() / self.duration.as_secs_f64() * 100.0
    }

    /// `m:ss / m:ss`, elapsed truncated to whole seconds.
    pub fn time_display(&self) -> String {
        format!(
            "{} / {}",
            format_clock(self.elapsed),
            format_clock(self.duration)
        )
    }

    pub fn view(&self) -> AudioView {
        AudioView {
            state: self.state,
            elapsed_secs: self.elapsed.as_secs_f64(),
            percentage: self.percentage(),
            time: self.time_display(),
        }
    }
}

pub fn format_clock(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: Duration = Duration::from_millis(500);

    fn ready() -> AudioSession {
        let mut s = AudioSession::new(Duration::from_secs(30));
        s.generate("text").unwrap();
        assert!(s.arm());
        s
    }

    #[test]
    fn test_generate_requires_text() {
        let mut s = AudioSession::new(Duration::from_secs(30));
        assert_eq!(s.generate(""), Err(StudyError::EmptyDocument));
        assert_eq!(s.state(), AudioState::Unarmed);
    }

    #[test]
    fn test_state_machine_path() {
        let mut s = AudioSession::new(Duration::from_secs(30));
        assert_eq!(s.toggle(), AudioState::Unarmed);
        s.generate("text").unwrap();
        assert_eq!(s.state(), AudioState::Generating);
        assert_eq!(s.toggle(), AudioState::Generating);
        assert!(s.arm());
        assert!(!s.arm());
        assert_eq!(s.toggle(), AudioState::Playing);
        assert_eq!(s.toggle(), AudioState::Ready);
    }

    #[test]
    fn test_pause_keeps_elapsed() {
        let mut s = ready();
        s.toggle();
        s.tick(STEP);
        s.tick(STEP);
        s.tick(STEP);
        s.toggle();
        assert_eq!(s.elapsed(), Duration::from_millis(1500));
        assert_eq!(s.tick(STEP), TickOutcome::Ignored);
        assert_eq!(s.elapsed(), Duration::from_millis(1500));
    }

    #[test]
    fn test_still_playing_at_29_5_seconds() {
        let mut s = ready();
        s.toggle();
        for _ in 0..59 {
            assert_eq!(s.tick(STEP), TickOutcome::Advanced);
        }
        assert!(s.is_playing());
        assert_eq!(s.elapsed(), Duration::from_millis(29_500));
        assert_eq!(s.time_display(), "0:29 / 0:30");
    }

    #[test]
    fn test_reaching_duration_rewinds() {
        let mut s = ready();
        s.toggle();
        for _ in 0..59 {
            s.tick(STEP);
        }
        assert_eq!(s.tick(STEP), TickOutcome::Finished);
        assert!(!s.is_playing());
        assert_eq!(s.state(), AudioState::Ready);
        assert_eq!(s.elapsed(), Duration::ZERO);
        assert_eq!(s.time_display(), "0:00 / 0:30");
        assert_eq!(s.percentage(), 0.0);
    }

    #[test]
    fn test_progress_display() {
        let mut s = ready();
        s.toggle();
        for _ in 0..15 {
            s.tick(STEP);
        }
        assert_eq!(s.percentage(), 25.0);
        assert_eq!(s.time_display(), "0:07 / 0:30");
        let view = s.view();
        assert_eq!(view.elapsed_secs, 7.5);
        assert_eq!(view.state, AudioState::Playing);
    }

    #[test]
    fn test_regenerate_stops_playback() {
        let mut s = ready();
        s.toggle();
        s.tick(STEP);
        s.generate("text").unwrap();
        assert_eq!(s.state(), AudioState::Generating);
        assert_eq!(s.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_format_clock_minutes() {
        assert_eq!(format_clock(Duration::from_secs(75)), "1:15");
        assert_eq!(format_clock(Duration::from_millis(9_900)), "0:09");
    }
}
