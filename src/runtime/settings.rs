use crate::config;

/// Load and validate settings, falling back to defaults on any problem.
///
/// Returns the problems alongside so they can be logged once logging is up.
pub fn load_settings() -> (config::Settings, Vec<String>) {
    match config::Settings::load() {
        Ok(s) => match s.validate() {
            Ok(()) => (s, Vec::new()),
            Err(e) => {
                let msg = format!("invalid config, using defaults: {e}");
                eprintln!("lofi: {msg}");
                (fallback(s), vec![msg])
            }
        },
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            let msg = format!("failed to load config, using defaults: {e}");
            eprintln!("lofi: {msg}");
            (config::Settings::default(), vec![msg])
        }
    }
}

/// Defaults, except for where the logs were meant to go.
fn fallback(loaded: config::Settings) -> config::Settings {
    config::Settings {
        logging: loaded.logging,
        ..config::Settings::default()
    }
}
