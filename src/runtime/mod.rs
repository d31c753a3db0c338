use std::io::Write;

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::RodioTransport;
use crate::config::Settings;
use crate::library::{PlaylistService, Playlist, load_document, to_document};
use crate::logging;
use crate::playback::PlaybackEngine;

mod cli;
mod event_loop;
mod settings;
mod startup;

use cli::{Cli, Command};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let (mut settings, config_warning) = settings::load_settings();
    settings::apply_cli_overrides(&mut settings, &cli);

    let command = cli.command();
    logging::init(&settings.logging, matches!(command, Command::Play { .. }))?;
    if let Some(msg) = config_warning {
        warn!("{msg}");
    }

    match command {
        Command::Scan { print, no_persist } => run_scan(&settings, print, no_persist),
        Command::Play { document } => {
            let playlist = match document {
                Some(path) => {
                    info!(path = %path.display(), "loading playlist document");
                    load_document(&path)?
                }
                None => PlaylistService::from_settings(&settings.library).fetch()?,
            };
            run_player(&settings, playlist)
        }
    }
}

fn run_scan(settings: &Settings, print: bool, no_persist: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut service = PlaylistService::from_settings(&settings.library);
    if no_persist {
        service = service.with_document_path(None);
    }

    let playlist = service.fetch()?;
    if print {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", to_document(&playlist)?)?;
    }
    Ok(())
}

fn run_player(settings: &Settings, playlist: Playlist) -> Result<(), Box<dyn std::error::Error>> {
    let transport = RodioTransport::open_default()?;
    let mut engine = PlaybackEngine::new(transport, settings.library.audio_dir.clone());
    let events = engine.subscribe();

    let mut app = App::new(playlist.clone());
    app.follow_playback = settings.ui.follow_playback;
    app.set_current_dir(settings.library.audio_dir.display().to_string());

    engine.load_playlist(playlist);
    startup::apply_playback_defaults(&mut engine, &settings.playback);
    event_loop::drain_events(&mut app, &events);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::default();
        event_loop::run(&mut terminal, settings, &mut app, &mut engine, &events, &mut state)
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
