//! Playback-related small types and handles.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;

/// Commands handled by the audio thread.
#[derive(Debug)]
pub enum AudioCmd {
    /// Tear down any current resource and start playing the given file.
    Play(PathBuf),
    /// Stop playback and release the resource.
    Stop,
    /// Toggle pause/resume; does nothing without an active resource.
    TogglePause,
    /// Nudge the playback position by the given number of seconds.
    SeekBy(i64),
    /// Quit the audio thread.
    Quit,
}

/// Runtime playback information shared with the control thread.
#[derive(Debug, Clone, Default)]
pub struct PlaybackInfo {
    /// Whether an active playback resource exists (playing or paused).
    pub active: bool,
    /// Whether playback is currently running.
    pub playing: bool,
    /// Elapsed playback time for the current track.
    pub elapsed: Duration,
    /// Count of tracks that ran to their natural end. The control thread
    /// watches this to chain auto-play, separately from user skips.
    pub completions: u64,
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;

/// Why a playback resource could not be created.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("failed to open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },
    #[error("audio output unavailable: {0}")]
    Output(String),
}
