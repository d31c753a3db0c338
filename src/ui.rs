//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{App, PlaybackState};
use crate::config::{ControlsSettings, UiSettings};

/// Placeholder shown for tracks without a matched cover.
const NO_COVER: &str = "[ no cover ]";

/// Screen areas the event loop needs for mouse handling.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiLayout {
    /// Inner area of the seek bar.
    pub progress: Rect,
}

/// Position of `column` across `area`, as a fraction of its width.
///
/// Not clamped: a pointer dragged past either end yields a value outside
/// `0.0..=1.0`, which the engine clamps.
pub fn fraction_in(area: Rect, column: u16) -> f64 {
    if area.width == 0 {
        return 0.0;
    }
    (f64::from(column) - f64::from(area.x)) / f64::from(area.width)
}

/// True when the cell at (`column`, `row`) lies inside `area`.
pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(controls: &ControlsSettings) -> String {
    [
        "[j/k] up/down".to_string(),
        "[h/l] prev/next song".to_string(),
        format!("[H/L] scrub -/+{}s", controls.scrub_seconds),
        "[enter] play selected".to_string(),
        "[space/p] play/pause".to_string(),
        "[gg/G] top/bottom".to_string(),
        "[s] shuffle".to_string(),
        "[r] repeat".to_string(),
        format!("[-/+] volume {}%", controls.volume_step),
        "[click/drag bar] seek".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Format seconds as `m:ss`.
pub fn format_time(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn status_text(app: &App) -> String {
    let mut parts: Vec<String> = Vec::new();

    match app.now_playing_track() {
        Some(track) => {
            let state = match app.playback {
                PlaybackState::Playing => "Playing",
                PlaybackState::Paused => "Paused",
                PlaybackState::Stopped => "Stopped",
            };
            parts.push(format!(" {}: {} - {}", state, track.artist, track.title));
            parts.push(format!("Album: {}", track.album));
            parts.push(format!(
                "Cover: {}",
                track.cover.as_deref().unwrap_or(NO_COVER)
            ));
        }
        None => parts.push(" Stopped".to_string()),
    }

    parts.push(format!("Repeat: {}", app.repeat_mode.label()));
    parts.push(format!(
        "Shuffle: {}",
        if app.shuffle { "ON" } else { "OFF" }
    ));
    parts.push(format!("Volume: {}%", app.volume_percent));
    if let Some(dir) = &app.current_dir {
        parts.push(format!("Dir: {}", dir));
    }

    parts.join(" • ")
}

fn time_label(app: &App) -> String {
    match app.duration {
        Some(total) => format!("{} / {}", format_time(app.position), format_time(total)),
        None => format_time(app.position),
    }
}

/// Render the entire UI into `frame` and report where the seek bar landed.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) -> UiLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" folderplay ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status = Paragraph::new(status_text(app))
        .block(Block::bordered().title(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    // Only build ListItems for the visible window, centered on the selection.
    {
        let total = app.tracks.len();
        let list_height = chunks[2].height.saturating_sub(2) as usize;
        let (start, end) = if total <= list_height || list_height == 0 {
            (0, total)
        } else {
            let half = list_height / 2;
            let start = app.selected.saturating_sub(half).min(total - list_height);
            (start, start + list_height)
        };

        let items: Vec<ListItem> = app.tracks[start..end]
            .iter()
            .enumerate()
            .map(|(offset, track)| {
                let marker = if app.now_playing == Some(start + offset) {
                    "♪ "
                } else {
                    "  "
                };
                ListItem::new(format!("{}{} - {}", marker, track.artist, track.title))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if total > 0 {
            state.select(Some(app.selected.saturating_sub(start)));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    let bar_block = Block::default().borders(Borders::ALL).title(" position ");
    let progress = bar_block.inner(chunks[3]);
    let gauge = Gauge::default()
        .block(bar_block)
        .ratio(app.progress_ratio())
        .label(time_label(app));
    frame.render_widget(gauge, chunks[3]);

    let footer = Paragraph::new(controls_text(controls_settings))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);

    UiLayout { progress }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::Track;
    use crate::playback::PlaybackEvent;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn format_time_pads_seconds() {
        assert_eq!(format_time(Duration::from_secs(0)), "0:00");
        assert_eq!(format_time(Duration::from_secs(65)), "1:05");
        assert_eq!(format_time(Duration::from_millis(3_599_999)), "59:59");
    }

    #[test]
    fn fraction_in_is_relative_and_unclamped() {
        let area = Rect::new(10, 5, 20, 1);
        assert_eq!(fraction_in(area, 10), 0.0);
        assert_eq!(fraction_in(area, 20), 0.5);
        assert!(fraction_in(area, 2) < 0.0);
        assert!(fraction_in(area, 40) > 1.0);
        assert_eq!(fraction_in(Rect::new(0, 0, 0, 0), 5), 0.0);
    }

    #[test]
    fn contains_checks_both_axes() {
        let area = Rect::new(2, 3, 4, 1);
        assert!(contains(area, 2, 3));
        assert!(contains(area, 5, 3));
        assert!(!contains(area, 6, 3));
        assert!(!contains(area, 3, 4));
    }

    #[test]
    fn status_shows_placeholder_for_missing_cover() {
        let mut app = App::new(vec![Track::from_filename("a.mp3")]);
        app.apply(&PlaybackEvent::TrackChanged { index: 0 });
        assert!(status_text(&app).contains(NO_COVER));
    }

    #[test]
    fn draw_reports_seek_bar_inside_frame() {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let app = App::new(vec![Track::from_filename("a.mp3")]);

        let mut layout = UiLayout::default();
        terminal
            .draw(|f| {
                layout = draw(f, &app, &UiSettings::default(), &ControlsSettings::default());
            })
            .unwrap();

        assert_eq!(layout.progress.width, 78);
        assert_eq!(layout.progress.height, 1);
        assert_eq!(layout.progress.y, 30 - 4 - 2);
    }
}
