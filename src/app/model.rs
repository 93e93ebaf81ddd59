//! Application model: what the lock screen currently shows.
//!
//! `App` is constructed once at startup and passed to whoever needs it;
//! the only shared piece is the atomic poked flag read by the auto-dismiss
//! watcher.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::gesture::Gesture;
use crate::player::PlaybackHandle;

const IDLE_STATUS: &str = "plectrum";
const IDLE_INFO: &str = "Pick something to play.";

/// The playback state of the application.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// The main application model.
pub struct App {
    /// Big status line ("Playing", "Next artist", ...).
    pub status: String,
    /// Detail block below it, usually the three-line song info.
    pub info: String,
    pub playback: PlaybackState,
    pub playback_handle: Option<PlaybackHandle>,

    /// Direction glyph shown while a gesture is in progress.
    pub gesture: Option<Gesture>,

    /// Set on the first user interaction; read by the auto-dismiss watcher.
    pub poked: Arc<AtomicBool>,

    pub date_line: String,
}

impl App {
    pub fn new(date_line: String) -> Self {
        Self {
            status: IDLE_STATUS.to_string(),
            info: IDLE_INFO.to_string(),
            playback: PlaybackState::Stopped,
            playback_handle: None,
            gesture: None,
            poked: Arc::new(AtomicBool::new(false)),
            date_line,
        }
    }

    /// Attach a `PlaybackHandle` used to observe playback progress.
    pub fn set_playback_handle(&mut self, handle: PlaybackHandle) {
        self.playback_handle = Some(handle);
    }

    /// Record that the user touched the screen at all.
    pub fn poke(&self) {
        self.poked.store(true, Ordering::SeqCst);
    }

    /// Show an explicit status/info pair (gesture narration, menu feedback).
    pub fn set_display(&mut self, status: impl Into<String>, info: impl Into<String>) {
        self.status = status.into();
        self.info = info.into();
    }

    /// Default display: now-playing info while music runs, the idle banner
    /// otherwise.
    pub fn refresh_display(&mut self, song_info: &str) {
        if self.playback == PlaybackState::Playing {
            self.status = "Playing".to_string();
            self.info = song_info.to_string();
        } else {
            self.status = IDLE_STATUS.to_string();
            self.info = IDLE_INFO.to_string();
        }
    }

    /// Pull the playback state out of the shared handle.
    pub fn sync_playback(&mut self) {
        let Some(handle) = self.playback_handle.as_ref() else {
            return;
        };
        if let Ok(info) = handle.lock() {
            self.playback = if info.playing {
                PlaybackState::Playing
            } else if info.active {
                PlaybackState::Paused
            } else {
                PlaybackState::Stopped
            };
        }
    }
}
