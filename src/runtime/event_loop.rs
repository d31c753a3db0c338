use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};

use crate::app::App;
use crate::config;
use crate::playback::{PlaybackEngine, PlaybackEvent, Transport};
use crate::ui::{self, UiLayout};

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Where the seek bar was drawn last frame.
    pub layout: UiLayout,
}

/// Whether the loop keeps going after handling an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Main terminal event loop: polls the engine, mirrors its events into the
/// view, draws and dispatches input. Returns `Ok(())` when quit is requested.
pub fn run<T: Transport>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    engine: &mut PlaybackEngine<T>,
    events: &Receiver<PlaybackEvent>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        engine.tick();
        drain_events(app, events);

        let mut layout = state.layout;
        terminal.draw(|f| layout = ui::draw(f, app, &settings.ui, &settings.controls))?;
        state.layout = layout;

        if event::poll(Duration::from_millis(50))? {
            let flow = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key_event(key, &settings.controls, app, engine, state)
                }
                Event::Mouse(mouse) => {
                    handle_mouse_event(mouse, state.layout.progress, engine);
                    Flow::Continue
                }
                _ => Flow::Continue,
            };
            if flow == Flow::Quit {
                break;
            }
        }
    }

    Ok(())
}

/// Fold every pending engine event into `app`.
pub fn drain_events(app: &mut App, events: &Receiver<PlaybackEvent>) {
    while let Ok(event) = events.try_recv() {
        app.apply(&event);
    }
}

pub fn handle_key_event<T: Transport>(
    key: KeyEvent,
    controls: &config::ControlsSettings,
    app: &mut App,
    engine: &mut PlaybackEngine<T>,
    state: &mut EventLoopState,
) -> Flow {
    let gg_prefix = std::mem::take(&mut state.pending_gg);
    let scrub = i64::try_from(controls.scrub_seconds).unwrap_or(i64::MAX);
    let step = f32::from(controls.volume_step);

    match key.code {
        KeyCode::Char('q') => return Flow::Quit,
        KeyCode::Char('j') | KeyCode::Down => {
            app.follow_playback_off();
            app.next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.follow_playback_off();
            app.prev();
        }
        KeyCode::Char('g') => {
            if gg_prefix {
                app.follow_playback_off();
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            app.follow_playback_off();
            app.select_last();
        }
        KeyCode::Enter => {
            if app.has_tracks() {
                app.follow_playback_on();
                engine.play_track(app.selected);
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => engine.toggle_play_pause(),
        KeyCode::Char('l') | KeyCode::Char('n') => {
            app.follow_playback_on();
            engine.next();
        }
        KeyCode::Char('h') => {
            app.follow_playback_on();
            engine.previous();
        }
        KeyCode::Char('L') => engine.seek_relative(scrub),
        KeyCode::Char('H') => engine.seek_relative(-scrub),
        KeyCode::Char('s') => engine.toggle_shuffle(),
        KeyCode::Char('r') => engine.cycle_repeat_mode(),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            engine.set_volume_percent(f32::from(engine.volume_percent()) + step)
        }
        KeyCode::Char('-') => engine.set_volume_percent(f32::from(engine.volume_percent()) - step),
        _ => {}
    }

    Flow::Continue
}

/// Clicks on the seek bar jump there and start a drag; the drag follows the
/// pointer anywhere on screen until the button is released.
pub fn handle_mouse_event<T: Transport>(
    mouse: MouseEvent,
    progress: Rect,
    engine: &mut PlaybackEngine<T>,
) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if ui::contains(progress, mouse.column, mouse.row) {
                engine.begin_drag();
                engine.seek(ui::fraction_in(progress, mouse.column));
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            engine.drag_to(ui::fraction_in(progress, mouse.column));
        }
        MouseEventKind::Up(MouseButton::Left) => engine.end_drag(),
        _ => {}
    }
}
