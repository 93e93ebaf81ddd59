//! Directory-structure picker.
//!
//! Artists are the directories under the music root, albums the
//! directories under an artist, tracks the `.mp3` files under an album
//! (suffix match is case-sensitive). Listing order, lexicographic by full
//! path, is the navigation order; the library is re-listed on every query
//! so external changes show up immediately.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::prefs::PrefStore;

use super::{SongPicker, path_to_name};

const PREF_ARTIST: &str = "dir_artist";
const PREF_ALBUM: &str = "dir_album";
const PREF_TRACK: &str = "dir_track";

pub struct DirectoryPicker {
    music_dir: PathBuf,
    prefs: PrefStore,
    current_artist: String,
    current_album: String,
    current_track: String,
}

impl DirectoryPicker {
    /// Build a picker over `music_dir`, restoring the persisted cursor when
    /// every stored path still exists, else descending to the first
    /// artist/album/track.
    pub fn new(music_dir: impl Into<PathBuf>, prefs: PrefStore) -> Self {
        let mut picker = Self {
            music_dir: music_dir.into(),
            prefs,
            current_artist: String::new(),
            current_album: String::new(),
            current_track: String::new(),
        };
        if !picker.restore_from_prefs() {
            picker.current_artist.clear();
            picker.current_album.clear();
            picker.current_track.clear();
            picker.go_next_artist();
        }
        picker
    }

    fn restore_from_prefs(&mut self) -> bool {
        self.current_artist = self.prefs.get(PREF_ARTIST);
        self.current_album = self.prefs.get(PREF_ALBUM);
        self.current_track = self.prefs.get(PREF_TRACK);
        let restored = Path::new(&self.current_artist).exists()
            && Path::new(&self.current_album).exists()
            && Path::new(&self.current_track).exists();
        if !restored && !self.current_track.is_empty() {
            warn!("stored cursor no longer matches the library, starting over");
        }
        restored
    }

    fn next_artist_path(&self) -> Option<PathBuf> {
        adjacent(sorted_dirs(&self.music_dir), &self.current_artist, true)
    }

    fn prev_artist_path(&self) -> Option<PathBuf> {
        adjacent(sorted_dirs(&self.music_dir), &self.current_artist, false)
    }

    fn next_album_path(&self) -> Option<PathBuf> {
        adjacent(
            sorted_dirs(Path::new(&self.current_artist)),
            &self.current_album,
            true,
        )
    }

    fn prev_album_path(&self) -> Option<PathBuf> {
        adjacent(
            sorted_dirs(Path::new(&self.current_artist)),
            &self.current_album,
            false,
        )
    }

    fn next_track_path(&self) -> Option<PathBuf> {
        adjacent(
            sorted_tracks(Path::new(&self.current_album)),
            &self.current_track,
            true,
        )
    }

    fn prev_track_path(&self) -> Option<PathBuf> {
        adjacent(
            sorted_tracks(Path::new(&self.current_album)),
            &self.current_track,
            false,
        )
    }
}

impl SongPicker for DirectoryPicker {
    fn peek_next_artist(&self) -> String {
        name_of(self.next_artist_path())
    }

    fn peek_prev_artist(&self) -> String {
        name_of(self.prev_artist_path())
    }

    fn go_next_artist(&mut self) -> String {
        self.current_artist = commit(self.next_artist_path());
        self.current_album.clear();
        self.go_next_album();
        path_to_name(&self.current_artist)
    }

    fn go_prev_artist(&mut self) -> String {
        self.current_artist = commit(self.prev_artist_path());
        self.current_album.clear();
        self.go_next_album();
        path_to_name(&self.current_artist)
    }

    fn peek_next_album(&self) -> String {
        name_of(self.next_album_path())
    }

    fn peek_prev_album(&self) -> String {
        name_of(self.prev_album_path())
    }

    fn go_next_album(&mut self) -> String {
        self.current_album = commit(self.next_album_path());
        self.current_track.clear();
        self.go_next_track();
        path_to_name(&self.current_album)
    }

    fn go_prev_album(&mut self) -> String {
        self.current_album = commit(self.prev_album_path());
        self.current_track.clear();
        self.go_next_track();
        path_to_name(&self.current_album)
    }

    fn peek_next_track(&self) -> String {
        name_of(self.next_track_path())
    }

    fn peek_prev_track(&self) -> String {
        name_of(self.prev_track_path())
    }

    fn go_next_track(&mut self) -> String {
        self.current_track = commit(self.next_track_path());
        path_to_name(&self.current_track)
    }

    fn go_prev_track(&mut self) -> String {
        self.current_track = commit(self.prev_track_path());
        path_to_name(&self.current_track)
    }

    fn current_song_file(&self) -> String {
        self.prefs.put(PREF_ARTIST, &self.current_artist);
        self.prefs.put(PREF_ALBUM, &self.current_album);
        self.prefs.put(PREF_TRACK, &self.current_track);
        self.prefs.commit();
        self.current_track.clone()
    }

    fn current_song_info(&self) -> String {
        format!(
            "{}\n{}\n{}",
            path_to_name(&self.current_artist),
            path_to_name(&self.current_album),
            path_to_name(&self.current_track)
        )
    }

    fn has_content(&self) -> bool {
        !self.peek_next_album().is_empty()
    }
}

/// The adjacent entry relative to `current`. A cursor that is unset or no
/// longer listed falls through to the boundary entry, so "next" while on
/// the last element lands on the first (and "prev" on the first lands on
/// the last).
fn adjacent(entries: Vec<PathBuf>, current: &str, forward: bool) -> Option<PathBuf> {
    if entries.is_empty() {
        return None;
    }
    let neighbor = if current.is_empty() {
        None
    } else if forward {
        entries
            .windows(2)
            .find(|w| w[0].as_path() == Path::new(current))
            .map(|w| w[1].clone())
    } else {
        entries
            .windows(2)
            .rev()
            .find(|w| w[1].as_path() == Path::new(current))
            .map(|w| w[0].clone())
    };
    neighbor.or_else(|| {
        if forward {
            entries.first().cloned()
        } else {
            entries.last().cloned()
        }
    })
}

fn name_of(path: Option<PathBuf>) -> String {
    path.map(|p| path_to_name(&p.to_string_lossy()))
        .unwrap_or_default()
}

fn commit(path: Option<PathBuf>) -> String {
    path.map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn sorted_dirs(dir: &Path) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(dir)
        .map(|rd| {
            rd.filter_map(Result::ok)
                .map(|e| e.path())
                .filter(|p| p.is_dir())
                .collect()
        })
        .unwrap_or_default();
    dirs.sort();
    dirs
}

fn sorted_tracks(dir: &Path) -> Vec<PathBuf> {
    let mut tracks: Vec<PathBuf> = fs::read_dir(dir)
        .map(|rd| {
            rd.filter_map(Result::ok)
                .map(|e| e.path())
                .filter(|p| p.is_file() && p.to_string_lossy().ends_with(".mp3"))
                .collect()
        })
        .unwrap_or_default();
    tracks.sort();
    tracks
}
