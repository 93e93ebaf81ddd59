use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `PLECTRUM__`),
/// then an optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("PLECTRUM")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.controls.seek_poll_ms == 0 {
            return Err("controls.seek_poll_ms must be >= 1".to_string());
        }
        if self.controls.seek_step_secs == 0 {
            return Err("controls.seek_step_secs must be >= 1".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `PLECTRUM_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("PLECTRUM_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/plectrum/config.toml`
/// or `~/.config/plectrum/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("plectrum").join("config.toml"))
}

/// Resolve where persisted player state lives: the explicit `state.file`
/// setting, else `$XDG_DATA_HOME/plectrum/state.toml`, else
/// `~/.local/share/plectrum/state.toml`.
pub fn resolve_state_path(settings: &Settings) -> Option<PathBuf> {
    if let Some(file) = &settings.state.file {
        return Some(PathBuf::from(file));
    }

    let data_home = if let Some(xdg) = env::var_os("XDG_DATA_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".local").join("share"))
    } else {
        None
    };

    data_home.map(|d| d.join("plectrum").join("state.toml"))
}

/// Resolve the music root: CLI argument, configured directory, else `~/Music`.
pub fn resolve_music_dir(arg: Option<String>, settings: &Settings) -> PathBuf {
    if let Some(dir) = arg {
        return PathBuf::from(dir);
    }
    if let Some(dir) = &settings.library.music_dir {
        return PathBuf::from(dir);
    }
    match env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join("Music"),
        None => PathBuf::from("Music"),
    }
}
