use std::{env, path::PathBuf};

use chrono_tz::Tz;

use super::schema::{Settings, SettingsError};

/// Configuration loading helpers.
///
/// `Settings::load` layers environment variables (prefix `LOFI__`) over an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("LOFI")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Check the invariants the player and scene rely on.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.player.tick_ms == 0 {
            return Err(SettingsError::ZeroTick);
        }
        if self.catalog.tracks.is_empty() {
            return Err(SettingsError::EmptyCatalog);
        }
        if let Some((index, t)) = self
            .catalog
            .tracks
            .iter()
            .enumerate()
            .find(|(_, t)| t.duration_ms == 0)
        {
            return Err(SettingsError::ZeroDuration {
                index,
                name: t.name.clone(),
            });
        }

        let fx = &self.effects;
        check_range("effects.stars.size", fx.stars.min_size, fx.stars.max_size)?;
        check_range("effects.rain.speed", fx.rain.min_speed, fx.rain.max_speed)?;
        check_range("effects.rain.length", fx.rain.min_length, fx.rain.max_length)?;
        check_range("effects.particles.size", fx.particles.min_size, fx.particles.max_size)?;
        check_range("effects.particles.speed", fx.particles.min_speed, fx.particles.max_speed)?;
        if fx.steam.interval_ms == 0 {
            return Err(SettingsError::ZeroSteamInterval);
        }
        if fx.frame_ms == 0 {
            return Err(SettingsError::ZeroFrame);
        }

        self.clock.time_zone()?;
        Ok(())
    }
}

impl super::schema::ClockSettings {
    /// Parse the configured IANA zone name.
    pub fn time_zone(&self) -> Result<Tz, SettingsError> {
        self.time_zone
            .parse::<Tz>()
            .map_err(|_| SettingsError::UnknownTimeZone(self.time_zone.clone()))
    }
}

fn check_range(field: &'static str, min: f64, max: f64) -> Result<(), SettingsError> {
    if !(min.is_finite() && max.is_finite()) || min < 0.0 || min > max {
        return Err(SettingsError::InvalidRange { field, min, max });
    }
    Ok(())
}

/// Resolve the config path from `LOFI_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("LOFI_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/lofi/config.toml`
/// or `~/.config/lofi/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("lofi").join("config.toml"))
}
