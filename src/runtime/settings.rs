use crate::config;

use super::cli::Cli;

/// Load settings, falling back to defaults when the config is unusable.
///
/// Logging is not up yet when this runs, so the reason for a fallback is
/// handed back for the caller to log once it is.
pub fn load_settings() -> (config::Settings, Option<String>) {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                (
                    config::Settings::default(),
                    Some(format!("invalid config, using defaults: {msg}")),
                )
            } else {
                (s, None)
            }
        }
        // Config is optional; failures should not prevent the app from starting.
        Err(e) => (
            config::Settings::default(),
            Some(format!("failed to load config, using defaults: {e}")),
        ),
    }
}

/// Command-line directories take precedence over the config.
pub fn apply_cli_overrides(settings: &mut config::Settings, cli: &Cli) {
    if let Some(dir) = &cli.audio_dir {
        settings.library.audio_dir = dir.clone();
    }
    if let Some(dir) = &cli.cover_dir {
        settings.library.cover_dir = dir.clone();
    }
}
