mod app;
mod clock;
mod config;
mod effects;
mod logging;
mod player;
mod runtime;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
