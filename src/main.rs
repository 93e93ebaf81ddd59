mod app;
mod config;
mod gesture;
mod mpris;
mod picker;
mod player;
mod prefs;
mod runtime;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
