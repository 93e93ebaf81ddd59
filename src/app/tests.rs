use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};

use super::*;
use crate::player::{PlaybackHandle, PlaybackInfo};

fn app_with_handle(info: PlaybackInfo) -> App {
    let mut app = App::new("January 1, 2026".to_string());
    let handle: PlaybackHandle = Arc::new(Mutex::new(info));
    app.set_playback_handle(handle);
    app
}

#[test]
fn sync_playback_maps_handle_state() {
    let mut app = app_with_handle(PlaybackInfo::default());
    app.sync_playback();
    assert_eq!(app.playback, PlaybackState::Stopped);

    let mut app = app_with_handle(PlaybackInfo {
        active: true,
        playing: true,
        ..PlaybackInfo::default()
    });
    app.sync_playback();
    assert_eq!(app.playback, PlaybackState::Playing);

    let mut app = app_with_handle(PlaybackInfo {
        active: true,
        playing: false,
        ..PlaybackInfo::default()
    });
    app.sync_playback();
    assert_eq!(app.playback, PlaybackState::Paused);
}

#[test]
fn refresh_display_shows_song_info_only_while_playing() {
    let mut app = App::new(String::new());

    app.playback = PlaybackState::Playing;
    app.refresh_display("Ann\nEarly\na");
    assert_eq!(app.status, "Playing");
    assert_eq!(app.info, "Ann\nEarly\na");

    app.playback = PlaybackState::Stopped;
    app.refresh_display("Ann\nEarly\na");
    assert_eq!(app.status, "plectrum");
    assert_ne!(app.info, "Ann\nEarly\na");
}

#[test]
fn set_display_overrides_both_lines() {
    let mut app = App::new(String::new());
    app.set_display("Next artist", "Bob");
    assert_eq!(app.status, "Next artist");
    assert_eq!(app.info, "Bob");
}

#[test]
fn poke_sets_the_shared_flag() {
    let app = App::new(String::new());
    assert!(!app.poked.load(Ordering::SeqCst));
    app.poke();
    assert!(app.poked.load(Ordering::SeqCst));
}
