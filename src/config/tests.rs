use super::load::{default_config_path, resolve_config_path, resolve_music_dir, resolve_state_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
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
fn resolve_config_path_prefers_plectrum_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("PLECTRUM_CONFIG_PATH", "/tmp/plectrum-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/plectrum-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("plectrum")
            .join("config.toml")
    );
}

#[test]
fn resolve_state_path_prefers_explicit_setting() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_DATA_HOME", "/tmp/xdg-data-home");

    let mut settings = Settings::default();
    settings.state.file = Some("/tmp/custom-state.toml".to_string());
    assert_eq!(
        resolve_state_path(&settings).unwrap(),
        std::path::PathBuf::from("/tmp/custom-state.toml")
    );

    settings.state.file = None;
    assert_eq!(
        resolve_state_path(&settings).unwrap(),
        std::path::PathBuf::from("/tmp/xdg-data-home")
            .join("plectrum")
            .join("state.toml")
    );
}

#[test]
fn resolve_music_dir_prefers_cli_argument() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("HOME", "/tmp/home-dir");

    let mut settings = Settings::default();
    settings.library.music_dir = Some("/srv/music".to_string());

    assert_eq!(
        resolve_music_dir(Some("/mnt/usb".to_string()), &settings),
        std::path::PathBuf::from("/mnt/usb")
    );
    assert_eq!(
        resolve_music_dir(None, &settings),
        std::path::PathBuf::from("/srv/music")
    );

    settings.library.music_dir = None;
    assert_eq!(
        resolve_music_dir(None, &settings),
        std::path::PathBuf::from("/tmp/home-dir").join("Music")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[library]
music_dir = "/srv/music"
follow_links = false

[controls]
seek_step_secs = 5
seek_poll_ms = 50

[ui]
header_text = "hello"
auto_dismiss = true
auto_dismiss_secs = 9

[state]
file = "/tmp/state.toml"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("PLECTRUM_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("PLECTRUM__CONTROLS__SEEK_STEP_SECS");

    let s = Settings::load().unwrap();
    assert_eq!(s.library.music_dir.as_deref(), Some("/srv/music"));
    assert!(!s.library.follow_links);
    assert_eq!(s.controls.seek_step_secs, 5);
    assert_eq!(s.controls.seek_poll_ms, 50);
    assert_eq!(s.ui.header_text, "hello");
    assert!(s.ui.auto_dismiss);
    assert_eq!(s.ui.auto_dismiss_secs, 9);
    assert_eq!(s.state.file.as_deref(), Some("/tmp/state.toml"));
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
[controls]
seek_step_secs = 3
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("PLECTRUM_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("PLECTRUM__CONTROLS__SEEK_STEP_SECS", "7");

    let s = Settings::load().unwrap();
    assert_eq!(s.controls.seek_step_secs, 7);
}

#[test]
fn validate_rejects_zero_poll_interval() {
    let mut s = Settings::default();
    s.controls.seek_poll_ms = 0;
    assert!(s.validate().is_err());
}
