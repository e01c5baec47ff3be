use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::player::{DEFAULT_TICK_PERIOD, Track};

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/lofi/config.toml` or `~/.config/lofi/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `LOFI__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub player: PlayerSettings,
    pub catalog: CatalogSettings,
    pub effects: EffectsSettings,
    pub clock: ClockSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

/// Reasons a loaded `Settings` is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("player.tick_ms must be >= 1")]
    ZeroTick,
    #[error("catalog.tracks must contain at least one track")]
    EmptyCatalog,
    #[error("catalog track {index} ({name:?}) must have duration_ms >= 1")]
    ZeroDuration { index: usize, name: String },
    #[error("{field}: expected 0 <= min <= max, got min={min} max={max}")]
    InvalidRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    #[error("effects.steam.interval_ms must be >= 1")]
    ZeroSteamInterval,
    #[error("effects.frame_ms must be >= 1")]
    ZeroFrame,
    #[error("unknown time zone {0:?}")]
    UnknownTimeZone(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// How often simulated progress is accumulated while playing (milliseconds).
    pub tick_ms: u64,
    /// Start playing right away instead of paused on the first track.
    pub autoplay: bool,
}

impl PlayerSettings {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_PERIOD.as_millis() as u64,
            autoplay: false,
        }
    }
}

/// One `[[catalog.tracks]]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrackEntry {
    pub name: String,
    pub artist: String,
    pub duration_ms: u64,
}

impl From<&TrackEntry> for Track {
    fn from(entry: &TrackEntry) -> Self {
        Track::new(
            entry.name.as_str(),
            entry.artist.as_str(),
            Duration::from_millis(entry.duration_ms),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub tracks: Vec<TrackEntry>,
}

impl CatalogSettings {
    pub fn to_tracks(&self) -> Vec<Track> {
        self.tracks.iter().map(Track::from).collect()
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        let entry = |name: &str, artist: &str, duration_ms| TrackEntry {
            name: name.to_string(),
            artist: artist.to_string(),
            duration_ms,
        };
        Self {
            tracks: vec![
                entry("Lake Shore Loops", "Pixel Daydream", 186_000),
                entry("Midnight CTA", "Neon Transit", 204_000),
                entry("Snowy Streetlights", "Warm Static", 174_000),
                entry("Rooftop Rain", "Lo-Fi Lanterns", 195_000),
                entry("Afterglow Arcade", "Chill Circuit", 210_000),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EffectsSettings {
    pub stars: StarSettings,
    pub rain: RainSettings,
    pub particles: ParticleSettings,
    pub steam: SteamSettings,
    /// Redraw cadence for the animated scene (milliseconds).
    pub frame_ms: u64,
}

impl EffectsSettings {
    pub fn frame_period(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}

impl Default for EffectsSettings {
    fn default() -> Self {
        Self {
            stars: StarSettings::default(),
            rain: RainSettings::default(),
            particles: ParticleSettings::default(),
            steam: SteamSettings::default(),
            frame_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StarSettings {
    pub count: usize,
    pub min_size: f64,
    pub max_size: f64,
}

impl Default for StarSettings {
    fn default() -> Self {
        Self {
            count: 50,
            min_size: 2.0,
            max_size: 4.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RainSettings {
    pub count: usize,
    /// Seconds a drop takes to cross the scene.
    pub min_speed: f64,
    pub max_speed: f64,
    pub min_length: f64,
    pub max_length: f64,
}

impl Default for RainSettings {
    fn default() -> Self {
        Self {
            count: 100,
            min_speed: 0.8,
            max_speed: 1.5,
            min_length: 10.0,
            max_length: 25.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParticleSettings {
    pub count: usize,
    pub min_size: f64,
    pub max_size: f64,
    /// Seconds a particle takes to float from floor to ceiling.
    pub min_speed: f64,
    pub max_speed: f64,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            count: 15,
            min_size: 2.0,
            max_size: 6.0,
            min_speed: 15.0,
            max_speed: 30.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SteamSettings {
    /// Puffs per burst.
    pub count: usize,
    /// Time between bursts (milliseconds).
    pub interval_ms: u64,
}

impl Default for SteamSettings {
    fn default() -> Self {
        Self {
            count: 3,
            interval_ms: 800,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClockSettings {
    /// IANA time zone shown by the clock, e.g. "America/Chicago".
    pub time_zone: String,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            time_zone: "America/Chicago".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Whether to show the key bindings footer.
    pub show_help: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ rain on the window, coffee on the desk ~ ".to_string(),
            show_help: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Append logs to this file. Nothing is logged when unset.
    pub file: Option<PathBuf>,
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}
