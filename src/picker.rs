//! Song pickers: how the player walks the music library.
//!
//! A picker maintains a three-level cursor (artist, album, track) and
//! answers adjacency queries against it. `peek_*` operations are
//! read-only; `go_*` operations commit the move and cascade a reset to
//! every level below it. Empty strings mean "nothing available" at every
//! level; pickers absorb all failures and never panic.

use std::path::Path;

mod directory;
mod tagged;

pub use directory::DirectoryPicker;
pub use tagged::TagPicker;

#[cfg(test)]
mod tests;

/// Adjacency and cursor operations over one ordering of the music library.
///
/// The two implementations (directory layout, metadata tags) are
/// interchangeable; the player selects between them by stored preference
/// and content availability.
pub trait SongPicker {
    fn peek_next_artist(&self) -> String;
    fn peek_prev_artist(&self) -> String;
    fn go_next_artist(&mut self) -> String;
    fn go_prev_artist(&mut self) -> String;

    fn peek_next_album(&self) -> String;
    fn peek_prev_album(&self) -> String;
    fn go_next_album(&mut self) -> String;
    fn go_prev_album(&mut self) -> String;

    fn peek_next_track(&self) -> String;
    fn peek_prev_track(&self) -> String;
    fn go_next_track(&mut self) -> String;
    fn go_prev_track(&mut self) -> String;

    /// Absolute path of the current track, persisting the cursor as a side
    /// effect. Empty when the library has nothing to offer.
    fn current_song_file(&self) -> String;

    /// Three-line artist / album / track label for display and narration.
    fn current_song_info(&self) -> String;

    /// Whether this picker can serve any music at all.
    fn has_content(&self) -> bool;
}

/// Strip directory and extension from a path string: `/a/b/Song.mp3` -> `Song`.
pub(crate) fn path_to_name(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_string()
}
