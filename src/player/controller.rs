//! The playback controller: binds the song pickers to the audio thread.
//!
//! Every navigation operation commits a cursor move on the active picker,
//! then discards and recreates the playback resource for the new current
//! track by sending a command to the audio thread.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use tracing::debug;

use crate::picker::{DirectoryPicker, SongPicker, TagPicker};
use crate::prefs::PrefStore;

use super::backend::{PlaybackBackend, RodioBackend};
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, PlaybackError, PlaybackHandle, PlaybackInfo};

const PREF_PICKER: &str = "picker_variant";

/// Which song picker drives navigation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PickerVariant {
    Directory,
    Tagged,
}

impl PickerVariant {
    fn as_pref(self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::Tagged => "tagged",
        }
    }

    fn from_pref(s: &str) -> Self {
        if s == "tagged" {
            Self::Tagged
        } else {
            Self::Directory
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Directory => "Folder playlist",
            Self::Tagged => "Tagged playlist",
        }
    }
}

/// A variant with no content is never selected while the other has some.
pub(super) fn pick_available(preferred: PickerVariant, dir_ok: bool, tag_ok: bool) -> PickerVariant {
    match preferred {
        PickerVariant::Directory if !dir_ok && tag_ok => PickerVariant::Tagged,
        PickerVariant::Tagged if !tag_ok && dir_ok => PickerVariant::Directory,
        v => v,
    }
}

pub struct Player {
    directory: DirectoryPicker,
    tagged: TagPicker,
    variant: PickerVariant,
    prefs: PrefStore,
    tx: Sender<AudioCmd>,
    playback: PlaybackHandle,
    seek_step_secs: u64,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl Player {
    pub fn new(
        music_dir: &Path,
        follow_links: bool,
        prefs: PrefStore,
        seek_step_secs: u64,
    ) -> Self {
        Self::with_backend(music_dir, follow_links, prefs, seek_step_secs, || {
            RodioBackend::new()
        })
    }

    /// Construct the player with an explicit backend factory. The factory
    /// runs on the audio thread.
    pub fn with_backend<B, F>(
        music_dir: &Path,
        follow_links: bool,
        prefs: PrefStore,
        seek_step_secs: u64,
        factory: F,
    ) -> Self
    where
        B: PlaybackBackend + 'static,
        F: FnOnce() -> Result<B, PlaybackError> + Send + 'static,
    {
        let directory = DirectoryPicker::new(music_dir, prefs.clone());
        let tagged = TagPicker::new(music_dir, follow_links, prefs.clone());

        let stored = PickerVariant::from_pref(&prefs.get(PREF_PICKER));
        let variant = pick_available(stored, directory.has_content(), tagged.has_content());
        if variant != stored {
            prefs.put(PREF_PICKER, variant.as_pref());
            prefs.commit();
        }

        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let playback: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));
        let join = spawn_audio_thread(factory, rx, playback.clone());

        Self {
            directory,
            tagged,
            variant,
            prefs,
            tx,
            playback,
            seek_step_secs,
            join: Mutex::new(Some(join)),
        }
    }

    fn picker(&self) -> &dyn SongPicker {
        match self.variant {
            PickerVariant::Directory => &self.directory,
            PickerVariant::Tagged => &self.tagged,
        }
    }

    fn picker_mut(&mut self) -> &mut dyn SongPicker {
        match self.variant {
            PickerVariant::Directory => &mut self.directory,
            PickerVariant::Tagged => &mut self.tagged,
        }
    }

    pub fn playback_handle(&self) -> PlaybackHandle {
        self.playback.clone()
    }

    /// Channel the seek loop uses to nudge the audio thread directly.
    pub fn audio_sender(&self) -> Sender<AudioCmd> {
        self.tx.clone()
    }

    pub fn is_active(&self) -> bool {
        self.playback.lock().map(|i| i.active).unwrap_or(false)
    }

    pub fn is_playing(&self) -> bool {
        self.playback.lock().map(|i| i.playing).unwrap_or(false)
    }

    /// Tracks that ran to their natural end so far.
    pub fn completions(&self) -> u64 {
        self.playback.lock().map(|i| i.completions).unwrap_or(0)
    }

    pub fn toggle_play_pause(&mut self) {
        if self.is_active() {
            let _ = self.tx.send(AudioCmd::TogglePause);
        } else {
            self.play_current();
        }
    }

    fn play_current(&mut self) {
        let file = self.picker().current_song_file();
        if file.is_empty() {
            // Nothing to play; make sure the deck reports stopped.
            let _ = self.tx.send(AudioCmd::Stop);
            return;
        }
        let _ = self.tx.send(AudioCmd::Play(PathBuf::from(file)));
    }

    pub fn stop(&self) {
        let _ = self.tx.send(AudioCmd::Stop);
    }

    pub fn seek_forward(&self) {
        let _ = self.tx.send(AudioCmd::SeekBy(self.seek_step_secs as i64));
    }

    pub fn seek_backward(&self) {
        let _ = self.tx.send(AudioCmd::SeekBy(-(self.seek_step_secs as i64)));
    }

    pub fn next_track(&mut self) {
        self.picker_mut().go_next_track();
        self.play_current();
    }

    pub fn prev_track(&mut self) {
        self.picker_mut().go_prev_track();
        self.play_current();
    }

    pub fn next_album(&mut self) {
        self.picker_mut().go_next_album();
        self.play_current();
    }

    pub fn prev_album(&mut self) {
        self.picker_mut().go_prev_album();
        self.play_current();
    }

    pub fn next_artist(&mut self) {
        self.picker_mut().go_next_artist();
        self.play_current();
    }

    pub fn prev_artist(&mut self) {
        self.picker_mut().go_prev_artist();
        self.play_current();
    }

    /// Chain playback after a natural end of track.
    pub fn auto_advance(&mut self) {
        debug!("track completed, chaining the next one");
        self.next_track();
    }

    /// Switch to the other picker variant, skipping one that has no
    /// content, and persist the choice.
    pub fn cycle_song_picker(&mut self) -> PickerVariant {
        let switched = match self.variant {
            PickerVariant::Directory => PickerVariant::Tagged,
            PickerVariant::Tagged => PickerVariant::Directory,
        };
        self.variant = pick_available(
            switched,
            self.directory.has_content(),
            self.tagged.has_content(),
        );
        self.prefs.put(PREF_PICKER, self.variant.as_pref());
        self.prefs.commit();
        self.variant
    }

    pub fn variant(&self) -> PickerVariant {
        self.variant
    }

    pub fn next_artist_name(&self) -> String {
        self.picker().peek_next_artist()
    }

    pub fn prev_artist_name(&self) -> String {
        self.picker().peek_prev_artist()
    }

    pub fn next_album_name(&self) -> String {
        self.picker().peek_next_album()
    }

    pub fn prev_album_name(&self) -> String {
        self.picker().peek_prev_album()
    }

    pub fn next_track_name(&self) -> String {
        self.picker().peek_next_track()
    }

    pub fn prev_track_name(&self) -> String {
        self.picker().peek_prev_track()
    }

    pub fn current_song_info(&self) -> String {
        self.picker().current_song_info()
    }

    /// Stop the audio thread and wait for it to wind down.
    pub fn shutdown(&self) {
        let _ = self.tx.send(AudioCmd::Quit);
        if let Ok(mut join) = self.join.lock() {
            if let Some(handle) = join.take() {
                let _ = handle.join();
            }
        }
    }
}
