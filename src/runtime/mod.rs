use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::logging;
use crate::player::SystemClock;

mod event_loop;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, problems) = settings::load_settings();

    if let Err(e) = logging::init(&settings.logging) {
        eprintln!("lofi: logging disabled: {e}");
    }
    for problem in &problems {
        warn!("{problem}");
    }

    let mut app = App::new(&settings, SystemClock, StdRng::from_os_rng());
    info!(time_zone = %app.time_zone, "starting");

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    info!("stopped");
    run_result
}
