use std::time::Duration;

use crate::player::RenderSink;

const VINYL_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];
const VINYL_FRAME_TIME: Duration = Duration::from_millis(150);
const EQ_LEVELS: [&str; 8] = ["▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

/// What the "now playing" widget shows. Filled in by the simulator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NowPlayingView {
    pub title: String,
    pub artist: String,
    pub progress: f64,
    pub playing: bool,
}

impl RenderSink for NowPlayingView {
    fn title(&mut self, title: &str) {
        self.title.clear();
        self.title.push_str(title);
    }

    fn artist(&mut self, artist: &str) {
        self.artist.clear();
        self.artist.push_str(artist);
    }

    fn progress(&mut self, percent: f64) {
        self.progress = percent.clamp(0.0, 100.0);
    }

    fn playing(&mut self, playing: bool) {
        self.playing = playing;
    }
}

impl NowPlayingView {
    /// Glyph of the play/pause button: what pressing it would do.
    pub fn button_glyph(&self) -> &'static str {
        if self.playing { "❚❚" } else { "▶" }
    }

    /// The record spins only while playing.
    pub fn vinyl_glyph(&self, at: Duration) -> &'static str {
        if !self.playing {
            return VINYL_FRAMES[0];
        }
        let frame = (at.as_millis() / VINYL_FRAME_TIME.as_millis()) as usize;
        VINYL_FRAMES[frame % VINYL_FRAMES.len()]
    }

    /// A row of equalizer bars; flat while paused.
    pub fn equalizer(&self, bars: usize, at: Duration) -> String {
        if !self.playing {
            return EQ_LEVELS[0].repeat(bars);
        }
        let t = at.as_secs_f64();
        (0..bars)
            .map(|i| {
                let i = i as f64;
                let wave = (t * (2.1 + 0.37 * i)).sin() * 0.5 + (t * 3.3 + i * 1.7).cos() * 0.5;
                let level = ((wave + 1.0) / 2.0 * (EQ_LEVELS.len() - 1) as f64).round() as usize;
                EQ_LEVELS[level.min(EQ_LEVELS.len() - 1)]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_updates_replace_previous_values() {
        let mut view = NowPlayingView::default();
        view.title("Rooftop Rain");
        view.artist("Lo-Fi Lanterns");
        view.title("Afterglow Arcade");
        view.progress(140.0);
        assert_eq!(view.title, "Afterglow Arcade");
        assert_eq!(view.artist, "Lo-Fi Lanterns");
        assert_eq!(view.progress, 100.0);
    }

    #[test]
    fn glyphs_follow_playing_state() {
        let mut view = NowPlayingView::default();
        assert_eq!(view.button_glyph(), "▶");
        assert_eq!(view.vinyl_glyph(Duration::from_millis(300)), "◐");
        assert_eq!(view.equalizer(4, Duration::from_secs(3)), "▁▁▁▁");

        view.playing(true);
        assert_eq!(view.button_glyph(), "❚❚");
        assert_eq!(view.vinyl_glyph(Duration::from_millis(300)), "◑");
        assert_eq!(view.equalizer(6, Duration::from_secs(3)).chars().count(), 6);
    }
}
