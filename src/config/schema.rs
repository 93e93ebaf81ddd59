use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/plectrum/config.toml` or `~/.config/plectrum/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `PLECTRUM__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub state: StateSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            library: LibrarySettings::default(),
            controls: ControlsSettings::default(),
            ui: UiSettings::default(),
            state: StateSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Music root: one directory per artist, one directory per album below
    /// it, `.mp3` files below that. Defaults to `~/Music` when unset.
    pub music_dir: Option<String>,
    /// Whether the tag picker follows symlinks while scanning.
    pub follow_links: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            music_dir: None,
            follow_links: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Seconds a single seek nudge moves playback.
    pub seek_step_secs: u64,
    /// Poll interval of the held-gesture seek loop, in milliseconds.
    pub seek_poll_ms: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            seek_step_secs: 3,
            seek_poll_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,

    /// Leave the screen on its own after `auto_dismiss_secs` when no key
    /// was pressed and nothing is playing.
    pub auto_dismiss: bool,
    pub auto_dismiss_secs: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ plectrum ~ ".to_string(),
            auto_dismiss: false,
            auto_dismiss_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StateSettings {
    /// Override for the persisted-state file; defaults to
    /// `$XDG_DATA_HOME/plectrum/state.toml`.
    pub file: Option<String>,
}

impl Default for StateSettings {
    fn default() -> Self {
        Self { file: None }
    }
}
