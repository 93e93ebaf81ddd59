//! Tag-structure picker.
//!
//! The same navigation contract as the directory picker, sourced from
//! media metadata instead of the directory layout. The library is scanned
//! once at construction into a flat record list sorted by
//! (artist, album, title); navigation scans that list for the nearest row
//! whose grouping field differs, wrapping around the ends.

use std::path::{Path, PathBuf};

use lofty::prelude::*;
use lofty::tag::ItemKey;
use walkdir::WalkDir;

use crate::prefs::PrefStore;

use super::SongPicker;

const PREF_ARTIST: &str = "tag_artist";
const PREF_ALBUM: &str = "tag_album";
const PREF_TRACK: &str = "tag_track";

#[derive(Debug, Clone)]
struct TagRecord {
    artist: String,
    album: String,
    track: String,
    path: PathBuf,
}

pub struct TagPicker {
    records: Vec<TagRecord>,
    pos: usize,
    current_artist: String,
    current_album: String,
    current_track: String,
    prefs: PrefStore,
}

impl TagPicker {
    /// Scan `music_dir` and restore the persisted tag cursor; an empty or
    /// unmatched cursor lands on the first record.
    pub fn new(music_dir: &Path, follow_links: bool, prefs: PrefStore) -> Self {
        let records = scan_records(music_dir, follow_links);
        let mut picker = Self {
            records,
            pos: 0,
            current_artist: String::new(),
            current_album: String::new(),
            current_track: String::new(),
            prefs,
        };
        picker.restore_from_prefs();
        picker
    }

    fn restore_from_prefs(&mut self) {
        if self.records.is_empty() {
            return;
        }
        let artist = self.prefs.get(PREF_ARTIST);
        let album = self.prefs.get(PREF_ALBUM);
        let track = self.prefs.get(PREF_TRACK);
        let found = self
            .records
            .iter()
            .position(|r| r.artist == artist && r.album == album && r.track == track);
        self.land(found.unwrap_or(0));
    }

    /// Move the cursor onto row `i` and refresh all three current fields
    /// from it, which is what cascades subordinate levels on a grouped move.
    fn land(&mut self, i: usize) {
        self.pos = i;
        self.current_artist = self.records[i].artist.clone();
        self.current_album = self.records[i].album.clone();
        self.current_track = self.records[i].track.clone();
    }

    /// Nearest row matching `wanted`, scanning away from the cursor and
    /// wrapping around the ends. `None` when no row matches.
    fn scan(&self, forward: bool, wanted: impl Fn(&TagRecord) -> bool) -> Option<usize> {
        let len = self.records.len();
        if len == 0 {
            return None;
        }
        if forward {
            for i in self.pos + 1..len {
                if wanted(&self.records[i]) {
                    return Some(i);
                }
            }
            for i in 0..self.pos {
                if wanted(&self.records[i]) {
                    return Some(i);
                }
            }
        } else {
            for i in (0..self.pos).rev() {
                if wanted(&self.records[i]) {
                    return Some(i);
                }
            }
            for i in (self.pos + 1..len).rev() {
                if wanted(&self.records[i]) {
                    return Some(i);
                }
            }
        }
        None
    }

    fn peek_artist(&self, forward: bool) -> String {
        if self.records.is_empty() {
            return String::new();
        }
        match self.scan(forward, |r| r.artist != self.current_artist) {
            Some(i) => self.records[i].artist.clone(),
            None => self.current_artist.clone(),
        }
    }

    fn go_artist(&mut self, forward: bool) -> String {
        if let Some(i) = self.scan(forward, |r| r.artist != self.current_artist) {
            self.land(i);
        }
        self.current_artist.clone()
    }

    fn peek_album(&self, forward: bool) -> String {
        if self.records.is_empty() {
            return String::new();
        }
        match self.scan(forward, |r| {
            r.artist == self.current_artist && r.album != self.current_album
        }) {
            Some(i) => self.records[i].album.clone(),
            None => self.current_album.clone(),
        }
    }

    fn go_album(&mut self, forward: bool) -> String {
        if let Some(i) = self.scan(forward, |r| {
            r.artist == self.current_artist && r.album != self.current_album
        }) {
            self.land(i);
        }
        self.current_album.clone()
    }

    fn peek_track(&self, forward: bool) -> String {
        if self.records.is_empty() {
            return String::new();
        }
        match self.scan(forward, |r| {
            r.artist == self.current_artist
                && r.album == self.current_album
                && r.track != self.current_track
        }) {
            Some(i) => self.records[i].track.clone(),
            None => self.current_track.clone(),
        }
    }

    fn go_track(&mut self, forward: bool) -> String {
        if let Some(i) = self.scan(forward, |r| {
            r.artist == self.current_artist
                && r.album == self.current_album
                && r.track != self.current_track
        }) {
            self.land(i);
        }
        self.current_track.clone()
    }
}

impl SongPicker for TagPicker {
    fn peek_next_artist(&self) -> String {
        self.peek_artist(true)
    }

    fn peek_prev_artist(&self) -> String {
        self.peek_artist(false)
    }

    fn go_next_artist(&mut self) -> String {
        self.go_artist(true)
    }

    fn go_prev_artist(&mut self) -> String {
        self.go_artist(false)
    }

    fn peek_next_album(&self) -> String {
        self.peek_album(true)
    }

    fn peek_prev_album(&self) -> String {
        self.peek_album(false)
    }

    fn go_next_album(&mut self) -> String {
        self.go_album(true)
    }

    fn go_prev_album(&mut self) -> String {
        self.go_album(false)
    }

    fn peek_next_track(&self) -> String {
        self.peek_track(true)
    }

    fn peek_prev_track(&self) -> String {
        self.peek_track(false)
    }

    fn go_next_track(&mut self) -> String {
        self.go_track(true)
    }

    fn go_prev_track(&mut self) -> String {
        self.go_track(false)
    }

    fn current_song_file(&self) -> String {
        if self.records.is_empty() {
            return String::new();
        }
        self.prefs.put(PREF_ARTIST, &self.current_artist);
        self.prefs.put(PREF_ALBUM, &self.current_album);
        self.prefs.put(PREF_TRACK, &self.current_track);
        self.prefs.commit();
        self.records[self.pos].path.to_string_lossy().into_owned()
    }

    fn current_song_info(&self) -> String {
        format!(
            "{}\n{}\n{}",
            self.current_artist, self.current_album, self.current_track
        )
    }

    fn has_content(&self) -> bool {
        !self.records.is_empty()
    }
}

fn scan_records(dir: &Path, follow_links: bool) -> Vec<TagRecord> {
    let mut records: Vec<TagRecord> = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(follow_links)
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file() || !path.to_string_lossy().ends_with(".mp3") {
            continue;
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();

        let mut artist = String::new();
        let mut album = String::new();
        let mut track = stem;

        if let Ok(tagged) = lofty::read_from_path(path) {
            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                if let Some(v) = tag.get_string(&ItemKey::TrackArtist) {
                    let v = v.trim();
                    if !v.is_empty() {
                        artist = v.to_string();
                    }
                }
                if let Some(v) = tag.get_string(&ItemKey::AlbumTitle) {
                    let v = v.trim();
                    if !v.is_empty() {
                        album = v.to_string();
                    }
                }
                if let Some(v) = tag.get_string(&ItemKey::TrackTitle) {
                    let v = v.trim();
                    if !v.is_empty() {
                        track = v.to_string();
                    }
                }
            }
        }

        // Untagged files fall back to the enclosing directory names, which
        // in this library shape are the album and artist.
        if album.is_empty() {
            album = dir_name(path.parent());
        }
        if artist.is_empty() {
            artist = dir_name(path.parent().and_then(Path::parent));
        }

        records.push(TagRecord {
            artist,
            album,
            track,
            path: path.to_path_buf(),
        });
    }

    records.sort_by(|a, b| {
        (&a.artist, &a.album, &a.track, &a.path).cmp(&(&b.artist, &b.album, &b.track, &b.path))
    });
    records
}

fn dir_name(path: Option<&Path>) -> String {
    path.and_then(|p| p.file_name())
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_string()
}
