//! One-shot auto-dismiss timer.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use crate::mpris::ControlCmd;
use crate::player::PlaybackHandle;

/// Request shutdown after `timeout` unless a key was seen or music is
/// playing by then. The `poked` flag closes the race with user input:
/// whichever side fires first makes the other a no-op.
pub fn spawn_poke_watcher(
    timeout: Duration,
    poked: Arc<AtomicBool>,
    playback: PlaybackHandle,
    control_tx: Sender<ControlCmd>,
) {
    thread::spawn(move || {
        thread::sleep(timeout);
        let playing = playback.lock().map(|i| i.playing).unwrap_or(false);
        if !poked.load(Ordering::SeqCst) && !playing {
            let _ = control_tx.send(ControlCmd::Quit);
        }
    });
}
