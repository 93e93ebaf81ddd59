//! Process bootstrap: logging, settings, terminal setup/teardown and the
//! wiring between player, MPRIS, watcher and event loop.

use std::env;
use std::sync::mpsc;
use std::time::Duration;

use chrono::Local;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::config;
use crate::gesture::spawn_poke_watcher;
use crate::mpris::ControlCmd;
use crate::player::Player;
use crate::prefs::PrefStore;

mod event_loop;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Log to stderr so `2>plectrum.log` captures diagnostics without
    // touching the alternate screen.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let settings = settings::load_settings();
    let music_dir = config::resolve_music_dir(env::args().nth(1), &settings);

    let prefs = match config::resolve_state_path(&settings) {
        Some(path) => PrefStore::open(path),
        None => PrefStore::in_memory(),
    };

    let mut player = Player::new(
        &music_dir,
        settings.library.follow_links,
        prefs,
        settings.controls.seek_step_secs,
    );

    let mut app = App::new(Local::now().format("%B %-d, %Y").to_string());
    app.set_playback_handle(player.playback_handle());

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx.clone());

    if settings.ui.auto_dismiss {
        spawn_poke_watcher(
            Duration::from_secs(settings.ui.auto_dismiss_secs),
            app.poked.clone(),
            player.playback_handle(),
            control_tx.clone(),
        );
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        &mut player,
        &mpris,
        &control_rx,
    );

    player.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
