//! Show playback clock

use std::time::Instant;

/// Largest frame delta the clock accepts in one tick, in seconds
pub const MAX_FRAME_DELTA: f32 = 0.25;

/// Timeline position with play/pause and seeking.
///
/// The clock stops itself when it reaches the end of the show.
#[derive(Debug, Clone)]
pub struct ShowClock {
    /// Current timeline value in seconds
    current_time: f32,
    /// Length of the show; playback never passes this
    total_duration: f32,
    playing: bool,
    /// Last wall-clock tick, `None` until the first `tick_wall` after play
    last_instant: Option<Instant>,
}

impl ShowClock {
    pub fn new(total_duration: f32) -> Self {
        Self {
            current_time: 0.0,
            total_duration: total_duration.max(0.0),
            playing: false,
            last_instant: None,
        }
    }

    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    pub fn total_duration(&self) -> f32 {
        self.total_duration
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn at_end(&self) -> bool {
        self.current_time >= self.total_duration
    }

    /// Change the show length, pulling the playhead back if needed
    pub fn set_total_duration(&mut self, total_duration: f32) {
        self.total_duration = total_duration.max(0.0);
        self.current_time = self.current_time.min(self.total_duration);
    }

    /// Start playback. Playing from the end restarts at zero.
    pub fn play(&mut self) {
        if self.at_end() {
            self.current_time = 0.0;
        }
        self.playing = true;
        self.last_instant = None;
    }

    pub fn pause(&mut self) {
        self.playing = false;
        self.last_instant = None;
    }

    pub fn toggle(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Advance by `dt` seconds of frame time and return the new timeline
    /// value. Does nothing while paused.
    pub fn tick(&mut self, dt: f32) -> f32 {
        if !self.playing || !dt.is_finite() {
            return self.current_time;
        }
        // Clamp to avoid huge jumps after a stall
        let dt = dt.clamp(0.0, MAX_FRAME_DELTA);
        self.current_time = (self.current_time + dt).min(self.total_duration);
        if self.at_end() {
            log::info!("Show reached the end at {:.2}s", self.current_time);
            self.playing = false;
        }
        self.current_time
    }

    /// Advance by the wall time since the previous call. The first call
    /// after `play` only records the instant.
    pub fn tick_wall(&mut self) -> f32 {
        let now = Instant::now();
        let dt = match self.last_instant.replace(now) {
            Some(last) => now.duration_since(last).as_secs_f32(),
            None => 0.0,
        };
        self.tick(dt)
    }

    /// Jump to `time`, clamped to the show
    pub fn seek(&mut self, time: f32) {
        let target = if time.is_finite() { time } else { 0.0 };
        self.current_time = target.clamp(0.0, self.total_duration);
        log::debug!("Seek to {:.3}s", self.current_time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_paused_at_zero() {
        let clock = ShowClock::new(10.0);
        assert_eq!(clock.current_time(), 0.0);
        assert!(!clock.is_playing());
    }

    #[test]
    fn paused_clock_ignores_ticks() {
        let mut clock = ShowClock::new(10.0);
        assert_eq!(clock.tick(0.1), 0.0);
    }

    #[test]
    fn tick_clamps_large_deltas() {
        let mut clock = ShowClock::new(10.0);
        clock.play();
        assert!((clock.tick(3.0) - MAX_FRAME_DELTA).abs() < 1e-6);
        assert!((clock.tick(-1.0) - MAX_FRAME_DELTA).abs() < 1e-6);
    }

    #[test]
    fn stops_at_end() {
        let mut clock = ShowClock::new(0.3);
        clock.play();
        clock.tick(0.2);
        clock.tick(0.2);
        assert_eq!(clock.current_time(), 0.3);
        assert!(!clock.is_playing());
        assert!(clock.at_end());

        clock.play();
        assert_eq!(clock.current_time(), 0.0);
        assert!(clock.is_playing());
    }

    #[test]
    fn seek_clamps() {
        let mut clock = ShowClock::new(10.0);
        clock.seek(-4.0);
        assert_eq!(clock.current_time(), 0.0);
        clock.seek(42.0);
        assert_eq!(clock.current_time(), 10.0);
        clock.seek(f32::NAN);
        assert_eq!(clock.current_time(), 0.0);
    }

    #[test]
    fn toggle_and_first_wall_tick() {
        let mut clock = ShowClock::new(10.0);
        clock.toggle();
        assert!(clock.is_playing());
        assert_eq!(clock.tick_wall(), 0.0);
        clock.toggle();
        assert!(!clock.is_playing());
    }

    #[test]
    fn shrinking_duration_moves_playhead() {
        let mut clock = ShowClock::new(10.0);
        clock.seek(8.0);
        clock.set_total_duration(5.0);
        assert_eq!(clock.current_time(), 5.0);
    }
}
