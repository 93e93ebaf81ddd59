//! Playback: the audio thread, its backend seam and the controller that
//! binds song pickers to it.

mod backend;
mod controller;
mod thread;
mod types;

pub use backend::{BackendSink, PlaybackBackend, RodioBackend};
pub use controller::{PickerVariant, Player};
pub use types::{AudioCmd, PlaybackError, PlaybackHandle, PlaybackInfo};
