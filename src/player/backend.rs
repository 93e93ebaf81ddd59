//! Playback backend seam.
//!
//! The audio thread drives playback through these traits so the rest of
//! the player stays testable without an audio device. `RodioBackend` is
//! the real implementation; tests install a counting mock.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use super::types::PlaybackError;

/// Creates playback resources. Constructed on the audio thread itself,
/// because audio output handles are not generally movable across threads.
pub trait PlaybackBackend {
    type Sink: BackendSink;

    /// Create a paused sink for `path`, positioned `start_at` into the track.
    fn open(&mut self, path: &Path, start_at: Duration) -> Result<Self::Sink, PlaybackError>;
}

/// One active playback resource.
pub trait BackendSink {
    fn play(&self);
    fn pause(&self);
    fn stop(&self);
    /// True once the resource has drained (the track ran to its end).
    fn is_finished(&self) -> bool;
}

pub struct RodioBackend {
    stream: OutputStream,
}

impl RodioBackend {
    pub fn new() -> Result<Self, PlaybackError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlaybackError::Output(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        stream.log_on_drop(false);
        Ok(Self { stream })
    }
}

pub struct RodioSink(Sink);

impl PlaybackBackend for RodioBackend {
    type Sink = RodioSink;

    fn open(&mut self, path: &Path, start_at: Duration) -> Result<RodioSink, PlaybackError> {
        let file = File::open(path).map_err(|source| PlaybackError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| PlaybackError::Decode {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
            // `skip_duration` is the seeking primitive; even Duration::ZERO is fine.
            .skip_duration(start_at);

        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(source);
        sink.pause();
        Ok(RodioSink(sink))
    }
}

impl BackendSink for RodioSink {
    fn play(&self) {
        self.0.play();
    }

    fn pause(&self) {
        self.0.pause();
    }

    fn stop(&self) {
        self.0.stop();
    }

    fn is_finished(&self) -> bool {
        self.0.empty()
    }
}
