use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_lofi_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("LOFI_CONFIG_PATH", "/tmp/lofi-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/lofi-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("lofi")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("lofi")
            .join("config.toml")
    );
}

#[test]
fn defaults_are_valid_and_match_the_demo_page() {
    let s = Settings::default();
    assert!(s.validate().is_ok());
    assert_eq!(s.player.tick_period(), Duration::from_millis(250));
    assert!(!s.player.autoplay);
    assert_eq!(s.catalog.tracks.len(), 5);
    assert_eq!(s.catalog.tracks[0].name, "Lake Shore Loops");
    assert_eq!(s.catalog.tracks[4].duration_ms, 210_000);
    assert_eq!(s.clock.time_zone().unwrap(), chrono_tz::America::Chicago);
    assert_eq!(s.effects.steam.interval_ms, 800);
}

#[test]
fn catalog_entries_become_tracks() {
    let tracks = CatalogSettings::default().to_tracks();
    assert_eq!(tracks[1].name, "Midnight CTA");
    assert_eq!(tracks[1].artist, "Neon Transit");
    assert_eq!(tracks[1].duration, Duration::from_millis(204_000));
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[player]
tick_ms = 100
autoplay = true

[[catalog.tracks]]
name = "One"
artist = "First"
duration_ms = 1000

[[catalog.tracks]]
name = "Two"
artist = "Second"
duration_ms = 2000

[effects]
frame_ms = 50

[effects.rain]
count = 7
min_speed = 1.0
max_speed = 2.0

[clock]
time_zone = "Europe/Madrid"

[ui]
header_text = "hello"
show_help = false

[logging]
file = "/tmp/lofi.log"
level = "debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("LOFI_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("LOFI__PLAYER__TICK_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.player.tick_ms, 100);
    assert!(s.player.autoplay);
    assert_eq!(
        s.catalog.tracks,
        vec![
            TrackEntry {
                name: "One".into(),
                artist: "First".into(),
                duration_ms: 1000
            },
            TrackEntry {
                name: "Two".into(),
                artist: "Second".into(),
                duration_ms: 2000
            },
        ]
    );
    assert_eq!(s.effects.frame_ms, 50);
    assert_eq!(s.effects.rain.count, 7);
    assert_eq!(s.effects.rain.max_length, 25.0);
    assert_eq!(s.effects.stars.count, 50);
    assert_eq!(s.clock.time_zone().unwrap(), chrono_tz::Europe::Madrid);
    assert_eq!(s.ui.header_text, "hello");
    assert!(!s.ui.show_help);
    assert_eq!(s.logging.file, Some(std::path::PathBuf::from("/tmp/lofi.log")));
    assert_eq!(s.logging.level, "debug");
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[player]
tick_ms = 250
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("LOFI_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("LOFI__PLAYER__TICK_MS", "500");

    let s = Settings::load().unwrap();
    assert_eq!(s.player.tick_ms, 500);
}

#[test]
fn missing_config_file_yields_defaults() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let _g1 = EnvGuard::set(
        "LOFI_CONFIG_PATH",
        dir.path().join("nope.toml").to_str().unwrap(),
    );

    let s = Settings::load().unwrap();
    assert_eq!(s.catalog.tracks.len(), 5);
    assert_eq!(s.player.tick_ms, 250);
}

#[test]
fn validate_rejects_zero_tick_and_empty_catalog() {
    let mut s = Settings::default();
    s.player.tick_ms = 0;
    assert_eq!(s.validate(), Err(SettingsError::ZeroTick));

    let mut s = Settings::default();
    s.catalog.tracks.clear();
    assert_eq!(s.validate(), Err(SettingsError::EmptyCatalog));
}

#[test]
fn validate_rejects_zero_length_tracks() {
    let mut s = Settings::default();
    s.catalog.tracks[2].duration_ms = 0;
    assert_eq!(
        s.validate(),
        Err(SettingsError::ZeroDuration {
            index: 2,
            name: "Snowy Streetlights".into()
        })
    );
}

#[test]
fn validate_rejects_inverted_ranges() {
    let mut s = Settings::default();
    s.effects.particles.min_speed = 40.0;
    let err = s.validate().unwrap_err();
    assert!(matches!(
        err,
        SettingsError::InvalidRange {
            field: "effects.particles.speed",
            ..
        }
    ));
    assert!(err.to_string().contains("min=40"));
}

#[test]
fn validate_rejects_unknown_time_zone() {
    let mut s = Settings::default();
    s.clock.time_zone = "Mars/Olympus_Mons".into();
    assert_eq!(
        s.validate(),
        Err(SettingsError::UnknownTimeZone("Mars/Olympus_Mons".into()))
    );
}
