use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use tracing::trace;

use crate::app::{App, Control};
use crate::config;
use crate::ui;

/// Main terminal event loop: fires due timers, redraws when something
/// changed and feeds key presses and deck clicks to the app. Returns `Ok(())` on quit.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut dirty = true;

    loop {
        if app.update() {
            dirty = true;
        }

        if dirty {
            terminal.draw(|f| ui::draw(f, app, &settings.ui))?;
            dirty = false;
        }

        if event::poll(app.poll_timeout())? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if let Some(control) = Control::from_key(key) {
                        trace!(?control, "control");
                        app.apply(control);
                        dirty = true;
                    }
                }
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    let size = terminal.size()?;
                    let area = Rect::new(0, 0, size.width, size.height);
                    if let Some(control) = ui::control_at(area, &settings.ui, mouse.column, mouse.row) {
                        trace!(?control, column = mouse.column, row = mouse.row, "click");
                        app.apply(control);
                        dirty = true;
                    }
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
