use crate::config;
use crate::playback::{PlaybackEngine, RepeatMode, Transport};

impl From<config::RepeatModeSetting> for RepeatMode {
    fn from(setting: config::RepeatModeSetting) -> Self {
        match setting {
            config::RepeatModeSetting::None => RepeatMode::None,
            config::RepeatModeSetting::One => RepeatMode::One,
            config::RepeatModeSetting::All => RepeatMode::All,
        }
    }
}

/// Push the configured playback defaults into a freshly loaded engine.
pub fn apply_playback_defaults<T: Transport>(
    engine: &mut PlaybackEngine<T>,
    settings: &config::PlaybackSettings,
) {
    if settings.shuffle != engine.shuffle_enabled() {
        engine.toggle_shuffle();
    }
    engine.set_repeat_mode(settings.repeat_mode.into());
    engine.set_volume_percent(f32::from(settings.volume));
}
