//! Main terminal event loop.
//!
//! Keyboard input drives the gesture machine: a key on the 3x3 pad starts
//! or re-aims a gesture (with live narration of where it would land),
//! Enter commits it, Esc cancels it (or dismisses the screen when idle).
//! The loop also drains the MPRIS control channel, mirrors playback state
//! out to MPRIS, and chains auto-play when a track runs to its end.

use std::io::Write;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, PlaybackState};
use crate::config::Settings;
use crate::gesture::{
    Gesture, GestureDispatcher, GestureEffect, PlayerAction, SeekDirection, SeekLoop,
};
use crate::mpris::{ControlCmd, MprisHandle};
use crate::player::Player;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    dispatcher: GestureDispatcher,
    seek: SeekLoop,
    /// Completion count already consumed; a newer count chains auto-play.
    seen_completions: u64,
    last_mpris_playback: PlaybackState,
    last_mpris_title: Option<String>,
}

pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &Settings,
    app: &mut App,
    player: &mut Player,
    mpris: &MprisHandle,
    control_rx: &Receiver<ControlCmd>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = EventLoopState {
        dispatcher: GestureDispatcher::new(),
        seek: SeekLoop::new(
            player.audio_sender(),
            settings.controls.seek_step_secs,
            settings.controls.seek_poll_ms,
        ),
        seen_completions: 0,
        last_mpris_playback: app.playback,
        last_mpris_title: None,
    };

    refresh(app, player);

    loop {
        app.sync_playback();

        // A track that ran to its end chains the next one (auto-play, not
        // a user skip).
        let completions = player.completions();
        if completions > state.seen_completions {
            state.seen_completions = completions;
            player.auto_advance();
            app.sync_playback();
            if !state.dispatcher.in_progress() {
                app.refresh_display(&player.current_song_info());
            }
        }

        sync_mpris(app, player, mpris, &mut state);

        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, app, player) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app, player, &mut state) {
                    return Ok(());
                }
            }
        }
    }
}

/// Returns true when the loop should shut down.
fn handle_key_event(
    key: KeyEvent,
    app: &mut App,
    player: &mut Player,
    state: &mut EventLoopState,
) -> bool {
    app.poke();

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    match key.code {
        KeyCode::Char(' ') => {
            // A tap: the shortest possible center gesture.
            aim(Gesture::Center, app, player, state);
            commit(app, player, state);
        }
        KeyCode::Char(c) => {
            if let Some(gesture) = gesture_for_key(c) {
                aim(gesture, app, player, state);
            }
        }
        KeyCode::Enter => {
            commit(app, player, state);
        }
        KeyCode::Esc => {
            if state.dispatcher.in_progress() {
                cancel(app, player, state);
            } else {
                // Idle Esc dismisses the screen.
                return true;
            }
        }
        KeyCode::Tab => {
            player.stop();
            let variant = player.cycle_song_picker();
            app.set_display("Playlist", variant.label());
        }
        _ => {}
    }
    false
}

/// Returns true when the loop should shut down.
fn handle_control_cmd(cmd: ControlCmd, app: &mut App, player: &mut Player) -> bool {
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => {
            if !player.is_playing() {
                player.toggle_play_pause();
            }
        }
        ControlCmd::Pause => {
            if player.is_playing() {
                player.toggle_play_pause();
            }
        }
        ControlCmd::PlayPause => player.toggle_play_pause(),
        ControlCmd::Stop => player.stop(),
        ControlCmd::Next => player.next_track(),
        ControlCmd::Prev => player.prev_track(),
    }
    refresh(app, player);
    false
}

fn aim(gesture: Gesture, app: &mut App, player: &mut Player, state: &mut EventLoopState) {
    if !state.dispatcher.in_progress() {
        state.dispatcher.start();
    }
    // Every direction change stops a held seek before anything else.
    state.seek.stop();
    tick();
    app.gesture = Some(gesture);

    match state.dispatcher.change(gesture) {
        GestureEffect::Seek(direction) => {
            let label = match direction {
                SeekDirection::Backward => "Rewind",
                SeekDirection::Forward => "Fast forward",
            };
            app.set_display(label, player.current_song_info());
            state.seek.start(direction);
        }
        GestureEffect::Preview(action) => {
            let (label, name) = preview_text(action, player);
            app.set_display(label, name);
        }
    }
}

fn commit(app: &mut App, player: &mut Player, state: &mut EventLoopState) {
    if !state.dispatcher.in_progress() {
        return;
    }
    state.seek.stop();
    tick();
    app.gesture = None;

    if let Some(action) = state.dispatcher.finish() {
        apply_action(action, player);
    }
    refresh(app, player);
}

fn cancel(app: &mut App, player: &mut Player, state: &mut EventLoopState) {
    state.seek.stop();
    state.dispatcher.cancel();
    app.gesture = None;
    refresh(app, player);
}

fn apply_action(action: PlayerAction, player: &mut Player) {
    match action {
        PlayerAction::TogglePlayPause => player.toggle_play_pause(),
        PlayerAction::NextTrack => player.next_track(),
        PlayerAction::PrevTrack => player.prev_track(),
        PlayerAction::NextAlbum => player.next_album(),
        PlayerAction::PrevAlbum => player.prev_album(),
        PlayerAction::NextArtist => player.next_artist(),
        PlayerAction::PrevArtist => player.prev_artist(),
    }
}

fn preview_text(action: PlayerAction, player: &Player) -> (&'static str, String) {
    match action {
        PlayerAction::PrevArtist => ("Previous artist", player.prev_artist_name()),
        PlayerAction::NextArtist => ("Next artist", player.next_artist_name()),
        PlayerAction::PrevAlbum => ("Previous album", player.prev_album_name()),
        PlayerAction::NextAlbum => ("Next album", player.next_album_name()),
        PlayerAction::PrevTrack => ("Previous track", player.prev_track_name()),
        PlayerAction::NextTrack => ("Next track", player.next_track_name()),
        PlayerAction::TogglePlayPause => {
            let label = if player.is_playing() { "Pause" } else { "Play" };
            (label, player.current_song_info())
        }
    }
}

fn refresh(app: &mut App, player: &Player) {
    app.sync_playback();
    app.refresh_display(&player.current_song_info());
}

/// Push playback status and a now-playing title out to MPRIS when they
/// changed, including changes caused by auto-advance.
fn sync_mpris(app: &App, player: &Player, mpris: &MprisHandle, state: &mut EventLoopState) {
    let title = now_playing_title(&player.current_song_info());
    if app.playback != state.last_mpris_playback || title != state.last_mpris_title {
        mpris.set_playback(app.playback);
        mpris.set_now_playing(title.clone());
        state.last_mpris_playback = app.playback;
        state.last_mpris_title = title;
    }
}

/// "Artist - Track" from the three-line song info, or `None` when the
/// library is empty.
fn now_playing_title(info: &str) -> Option<String> {
    let mut lines = info.lines();
    let artist = lines.next().unwrap_or("");
    let _album = lines.next();
    let track = lines.next().unwrap_or("");
    match (artist.is_empty(), track.is_empty()) {
        (true, true) => None,
        (true, false) => Some(track.to_string()),
        (false, true) => Some(artist.to_string()),
        (false, false) => Some(format!("{artist} - {track}")),
    }
}

/// The 3x3 gesture pad on the left hand: q/w/e, a/s/d, z/x/c.
fn gesture_for_key(c: char) -> Option<Gesture> {
    match c {
        'q' => Some(Gesture::UpLeft),
        'w' => Some(Gesture::Up),
        'e' => Some(Gesture::UpRight),
        'a' => Some(Gesture::Left),
        's' => Some(Gesture::Center),
        'd' => Some(Gesture::Right),
        'z' => Some(Gesture::DownLeft),
        'x' => Some(Gesture::Down),
        'c' => Some(Gesture::DownRight),
        _ => None,
    }
}

/// Audible tick on every gesture phase; BEL is the terminal's earcon.
fn tick() {
    let mut out = std::io::stdout();
    let _ = out.write_all(b"\x07");
    let _ = out.flush();
}
