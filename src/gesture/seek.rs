//! Continuous seek while a directional gesture is held.
//!
//! The worker re-checks a shared generation counter every poll; bumping
//! the counter cancels it. A worker whose generation is stale exits at its
//! next iteration, so it can never outlive its gesture or keep driving
//! playback after a newer gesture took over.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use crate::player::AudioCmd;

use super::dispatcher::SeekDirection;

pub struct SeekLoop {
    generation: Arc<AtomicU64>,
    audio: Sender<AudioCmd>,
    step_secs: i64,
    poll: Duration,
}

impl SeekLoop {
    pub fn new(audio: Sender<AudioCmd>, step_secs: u64, poll_ms: u64) -> Self {
        Self {
            generation: Arc::new(AtomicU64::new(0)),
            audio,
            step_secs: step_secs as i64,
            poll: Duration::from_millis(poll_ms.max(1)),
        }
    }

    /// Start seeking in `direction`; any previous loop is cancelled first.
    pub fn start(&self, direction: SeekDirection) {
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = self.generation.clone();
        let audio = self.audio.clone();
        let step = match direction {
            SeekDirection::Forward => self.step_secs,
            SeekDirection::Backward => -self.step_secs,
        };
        let poll = self.poll;

        thread::spawn(move || {
            loop {
                thread::sleep(poll);
                if generation.load(Ordering::SeqCst) != my_generation {
                    break;
                }
                if audio.send(AudioCmd::SeekBy(step)).is_err() {
                    break;
                }
            }
        });
    }

    /// Cancel whatever loop is running; the worker exits at its next poll.
    pub fn stop(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
