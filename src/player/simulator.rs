//! The fake playback clock.

use std::time::{Duration, Instant};

use tracing::debug;

use super::sink::RenderSink;
use super::timing::{Clock, Ticker};
use super::track::Track;

/// Default cadence of progress accumulation while playing.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(250);

/// Two-state playback machine over a fixed catalog.
///
/// While playing, a `Ticker` is armed and `poll` accumulates wall-clock time
/// into `elapsed`. When `elapsed` reaches the current track's duration the
/// simulator moves on to the next track (wrapping at the end) and keeps
/// playing. While paused no ticker exists.
#[derive(Debug)]
pub struct PlaybackSimulator<C: Clock, S: RenderSink> {
    tracks: Vec<Track>,
    current_index: usize,
    is_playing: bool,
    elapsed: Duration,
    last_tick: Instant,
    ticker: Option<Ticker>,
    tick_period: Duration,
    clock: C,
    sink: S,
}

impl<C: Clock, S: RenderSink> PlaybackSimulator<C, S> {
    /// Create a paused simulator positioned at the first track.
    pub fn new(tracks: Vec<Track>, tick_period: Duration, clock: C, sink: S) -> Self {
        let last_tick = clock.now();
        let mut simulator = Self {
            tracks,
            current_index: 0,
            is_playing: false,
            elapsed: Duration::ZERO,
            last_tick,
            ticker: None,
            tick_period,
            clock,
            sink,
        };
        simulator.select_track(0, false);
        simulator
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.tracks.get(self.current_index)
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// When the next tick is due, if playing.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.ticker.as_ref().map(Ticker::next_due)
    }

    /// Progress through the current track as a percentage in `0.0..=100.0`.
    pub fn progress_percent(&self) -> f64 {
        let Some(track) = self.current_track() else {
            return 0.0;
        };
        let duration = track.duration.max(Duration::from_millis(1));
        (self.elapsed.as_secs_f64() / duration.as_secs_f64() * 100.0).min(100.0)
    }

    /// Jump to `index` (wrapped into range, negatives count from the tail) and
    /// restart its progress. Does nothing on an empty catalog.
    pub fn select_track(&mut self, index: i64, autoplay: bool) {
        let len = self.tracks.len();
        if len == 0 {
            return;
        }

        self.current_index = index.rem_euclid(len as i64) as usize;
        self.elapsed = Duration::ZERO;
        let now = self.clock.now();
        self.last_tick = now;
        if self.ticker.is_some() {
            // Restart the cadence from the new track's first instant.
            self.ticker = Some(Ticker::start(self.tick_period, now));
        }

        if let Some(track) = self.current_track() {
            debug!(index = self.current_index, name = %track.name, "track selected");
        }
        self.render_track();
        self.render_progress();

        if autoplay {
            self.play();
        } else {
            self.pause();
        }
    }

    pub fn play(&mut self) {
        if self.is_playing {
            return;
        }
        self.is_playing = true;
        let now = self.clock.now();
        self.last_tick = now;
        self.ticker = Some(Ticker::start(self.tick_period, now));
        debug!(index = self.current_index, "playback started");
        self.sink.playing(true);
    }

    pub fn pause(&mut self) {
        if !self.is_playing {
            self.sink.playing(false);
            return;
        }
        self.is_playing = false;
        self.ticker = None;
        debug!(
            index = self.current_index,
            elapsed_ms = self.elapsed.as_millis() as u64,
            "playback paused"
        );
        self.sink.playing(false);
    }

    pub fn toggle_playback(&mut self) {
        if self.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Move one track forward, keeping the current play/pause state.
    pub fn next_track(&mut self) {
        self.advance(1);
    }

    /// Move one track back, keeping the current play/pause state.
    pub fn previous_track(&mut self) {
        self.advance(-1);
    }

    fn advance(&mut self, direction: i64) {
        self.select_track(self.current_index as i64 + direction, self.is_playing);
    }

    /// Run a tick if the ticker is due. Returns whether one ran.
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now();
        let Some(ticker) = self.ticker.as_mut() else {
            return false;
        };
        if !ticker.fire(now) {
            return false;
        }
        self.tick(now);
        true
    }

    fn tick(&mut self, now: Instant) {
        if !self.is_playing {
            return;
        }

        let delta = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;
        self.elapsed += delta;

        let Some(duration) = self.current_track().map(|t| t.duration) else {
            return;
        };
        if self.elapsed >= duration {
            debug!(index = self.current_index, "track finished, advancing");
            self.next_track();
            return;
        }

        self.render_progress();
    }

    fn render_track(&mut self) {
        let Some(track) = self.tracks.get(self.current_index) else {
            return;
        };
        self.sink.title(&track.name);
        self.sink.artist(&track.artist);
    }

    fn render_progress(&mut self) {
        let percent = self.progress_percent();
        self.sink.progress(percent);
    }
}
