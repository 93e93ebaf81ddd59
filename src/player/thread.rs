//! The audio thread: single owner of the playback resource.
//!
//! All resource mutation happens here, serialized by the command channel.
//! Navigation, the held-gesture seek loop and the completion chain can
//! only send commands, so a stale request can never touch a resource that
//! has already been released. The receive loop polls on a short timeout to
//! detect tracks that ran to their natural end and to refresh the shared
//! elapsed time.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::warn;

use super::backend::{BackendSink, PlaybackBackend};
use super::types::{AudioCmd, PlaybackError, PlaybackHandle};

pub(super) fn spawn_audio_thread<B, F>(
    factory: F,
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
) -> JoinHandle<()>
where
    B: PlaybackBackend + 'static,
    F: FnOnce() -> Result<B, PlaybackError> + Send + 'static,
{
    thread::spawn(move || {
        // The backend is created on this thread; when the audio subsystem is
        // unavailable the deck runs degraded and every play request lands in
        // the stopped state.
        let backend = match factory() {
            Ok(b) => Some(b),
            Err(e) => {
                warn!("audio backend unavailable: {e}");
                None
            }
        };

        let mut deck = Deck {
            backend,
            sink: None,
            current: None,
            paused: true,
            started_at: None,
            accumulated: Duration::ZERO,
            info: playback_info,
        };

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(AudioCmd::Play(path)) => deck.play(&path, Duration::ZERO),
                Ok(AudioCmd::Stop) => deck.stop(),
                Ok(AudioCmd::TogglePause) => deck.toggle_pause(),
                Ok(AudioCmd::SeekBy(secs)) => deck.seek_by(secs),
                Ok(AudioCmd::Quit) => {
                    deck.stop();
                    break;
                }
                Err(RecvTimeoutError::Timeout) => deck.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

struct Deck<B: PlaybackBackend> {
    backend: Option<B>,
    sink: Option<B::Sink>,
    current: Option<PathBuf>,
    paused: bool,
    // Start time of the running stretch and elapsed time accumulated
    // across pauses and seeks.
    started_at: Option<Instant>,
    accumulated: Duration,
    info: PlaybackHandle,
}

impl<B: PlaybackBackend> Deck<B> {
    fn play(&mut self, path: &Path, start_at: Duration) {
        // Tear down first so a failed open leaves the deck cleanly stopped.
        if let Some(s) = self.sink.as_ref() {
            s.stop();
        }
        self.sink = None;
        self.current = None;

        if path.as_os_str().is_empty() {
            self.mark_stopped();
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            self.mark_stopped();
            return;
        };

        match backend.open(path, start_at) {
            Ok(sink) => {
                sink.play();
                self.sink = Some(sink);
                self.current = Some(path.to_path_buf());
                self.paused = false;
                self.started_at = Some(Instant::now());
                self.accumulated = start_at;
                if let Ok(mut info) = self.info.lock() {
                    info.active = true;
                    info.playing = true;
                    info.elapsed = start_at;
                }
            }
            Err(e) => {
                warn!("could not start playback: {e}");
                self.mark_stopped();
            }
        }
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.stop();
        }
        self.sink = None;
        self.current = None;
        self.mark_stopped();
    }

    fn mark_stopped(&mut self) {
        self.paused = true;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
        if let Ok(mut info) = self.info.lock() {
            info.active = false;
            info.playing = false;
            info.elapsed = Duration::ZERO;
        }
    }

    fn toggle_pause(&mut self) {
        let Some(s) = self.sink.as_ref() else {
            return;
        };
        if self.paused {
            s.play();
            self.started_at = Some(Instant::now());
        } else {
            s.pause();
            if let Some(st) = self.started_at {
                self.accumulated += st.elapsed();
            }
            self.started_at = None;
        }
        self.paused = !self.paused;
        let playing = !self.paused;
        if let Ok(mut info) = self.info.lock() {
            info.playing = playing;
        }
    }

    fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }

    /// Scrubbing rebuilds the sink and skips into the file, preserving the
    /// pause state.
    fn seek_by(&mut self, secs: i64) {
        let Some(path) = self.current.clone() else {
            return;
        };
        if self.sink.is_none() {
            return;
        }

        let cur = self.elapsed().as_secs() as i64;
        let new_elapsed = Duration::from_secs((cur + secs).max(0) as u64);
        let was_paused = self.paused;

        self.play(&path, new_elapsed);

        if was_paused && self.sink.is_some() {
            self.toggle_pause();
        }
    }

    /// Poll-timeout housekeeping: publish elapsed time and detect a track
    /// that ran to its natural end.
    fn tick(&mut self) {
        let finished = self
            .sink
            .as_ref()
            .map(|s| !self.paused && s.is_finished())
            .unwrap_or(false);

        if finished {
            self.stop();
            if let Ok(mut info) = self.info.lock() {
                info.completions += 1;
            }
        } else if !self.paused && self.sink.is_some() {
            let elapsed = self.elapsed();
            if let Ok(mut info) = self.info.lock() {
                info.elapsed = elapsed;
            }
        }
    }
}
