//! UI rendering helpers for the terminal scene.
//!
//! This module draws the window scene, the clock and the "now playing"
//! widget using `ratatui`. `NowPlayingView` is the render sink the player
//! pushes to; everything here only reads it.

mod now_playing;
mod scene;

pub use now_playing::NowPlayingView;
pub use scene::SceneWidget;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};
use std::rc::Rc;
use std::time::Duration;

use crate::app::{App, Control};
use crate::config::UiSettings;
use crate::player::Clock;

const CONTROLS: [(&str, &str); 4] = [
    ("space/p", "play/pause"),
    ("←/h", "previous"),
    ("→/l", "next"),
    ("q", "quit"),
];

const ACCENT: Color = Color::Rgb(236, 154, 196);

/// Render the controls help text.
fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{}] {}", k, v))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Header, scene, now playing and (optionally) the controls footer.
fn sections(area: Rect, ui_settings: &UiSettings) -> Rc<[Rect]> {
    let mut constraints = vec![
        Constraint::Length(3),
        Constraint::Min(8),
        Constraint::Length(5),
    ];
    if ui_settings.show_help {
        constraints.push(Constraint::Length(3));
    }
    Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area)
}

fn now_playing_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(" now playing ")
        .padding(Padding {
            left: 1,
            right: 1,
            top: 0,
            bottom: 0,
        })
}

/// Deck, track info and equalizer columns inside the now playing box.
fn now_playing_columns(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(10),
            Constraint::Length(14),
        ])
        .split(now_playing_block().inner(area))
}

/// Previous, play/pause and next buttons, two cells each.
fn deck_buttons(view: &NowPlayingView) -> String {
    format!("« {:<2} »", view.button_glyph())
}

/// Map a click at `column`/`row` of a screen of size `area` to the deck
/// button drawn there.
pub fn control_at(area: Rect, ui_settings: &UiSettings, column: u16, row: u16) -> Option<Control> {
    let deck = now_playing_columns(sections(area, ui_settings)[2])[0];
    if deck.height < 3 || row != deck.y + 2 {
        return None;
    }
    if column < deck.x || column >= deck.right() {
        return None;
    }
    match column - deck.x {
        0 | 1 => Some(Control::PreviousTrack),
        2 | 3 => Some(Control::TogglePlayback),
        _ => Some(Control::NextTrack),
    }
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw<C: Clock + Clone>(frame: &mut Frame, app: &App<C>, ui_settings: &UiSettings) {
    let chunks = sections(frame.area(), ui_settings);
    let at = app.animation_time();

    // Header with the clock on the right
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" lofi ")
                .title_top(Line::from(format!(" {} ", app.clock_text)).right_aligned()),
        );
    frame.render_widget(header, chunks[0]);

    // Window scene
    let scene_block = Block::default().borders(Borders::ALL).title(" window ");
    let scene_area = scene_block.inner(chunks[1]);
    frame.render_widget(scene_block, chunks[1]);
    frame.render_widget(
        SceneWidget {
            scene: &app.scene,
            at,
        },
        scene_area,
    );

    draw_now_playing(frame, app, at, chunks[2]);

    if ui_settings.show_help {
        let footer = Paragraph::new(controls_text())
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
        frame.render_widget(footer, chunks[3]);
    }
}

fn draw_now_playing<C: Clock + Clone>(frame: &mut Frame, app: &App<C>, at: Duration, area: Rect) {
    let view = app.player.sink();
    frame.render_widget(now_playing_block(), area);
    let columns = now_playing_columns(area);

    // Record + buttons
    let deck = Paragraph::new(vec![
        Line::from(view.vinyl_glyph(at)).fg(ACCENT),
        Line::from(""),
        Line::from(deck_buttons(view)).bold(),
    ]);
    frame.render_widget(deck, columns[0]);

    // Title, artist, progress
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(columns[1]);
    frame.render_widget(
        Paragraph::new(view.title.as_str()).add_modifier(Modifier::BOLD),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(view.artist.as_str()).add_modifier(Modifier::ITALIC),
        rows[1],
    );

    let total = app
        .player
        .current_track()
        .map(|t| t.duration)
        .unwrap_or_default();
    let label = format!("{} / {}", format_mmss(app.player.elapsed()), format_mmss(total));
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(ACCENT).bg(Color::Black))
        .ratio((view.progress / 100.0).clamp(0.0, 1.0))
        .label(label);
    frame.render_widget(gauge, rows[2]);

    // Equalizer
    let bars = usize::from(columns[2].width);
    let eq = Paragraph::new(vec![
        Line::from(view.equalizer(bars, at)).fg(ACCENT),
        Line::from(view.equalizer(bars, at + Duration::from_millis(333))).fg(ACCENT),
        Line::from(if view.playing { "playing" } else { "paused" }).dim(),
    ])
    .alignment(Alignment::Right);
    frame.render_widget(eq, columns[2]);
}
