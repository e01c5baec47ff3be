//! Application model types: `App` and `Control`.

use std::time::{Duration, Instant};

use chrono::Utc;
use chrono_tz::Tz;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use tracing::info;

use crate::clock::format_time;
use crate::config::Settings;
use crate::effects::Scene;
use crate::player::{Clock, PlaybackSimulator, SystemClock, Ticker};
use crate::ui::NowPlayingView;

const CLOCK_REFRESH: Duration = Duration::from_secs(1);

/// User-facing controls. The player never sees where they came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control {
    TogglePlayback,
    NextTrack,
    PreviousTrack,
    Quit,
}

impl Control {
    /// Map a key press to a control, if it is bound.
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(Self::Quit),
                _ => None,
            };
        }
        match key.code {
            KeyCode::Char(' ') | KeyCode::Char('p') => Some(Self::TogglePlayback),
            KeyCode::Right | KeyCode::Char('l') => Some(Self::NextTrack),
            KeyCode::Left | KeyCode::Char('h') => Some(Self::PreviousTrack),
            KeyCode::Char('q') | KeyCode::Esc => Some(Self::Quit),
            _ => None,
        }
    }
}

/// The main application model.
pub struct App<C: Clock + Clone = SystemClock> {
    pub player: PlaybackSimulator<C, NowPlayingView>,
    pub scene: Scene,
    pub time_zone: Tz,
    pub clock_text: String,
    pub should_quit: bool,

    clock: C,
    started: Instant,
    frame: Ticker,
    clock_refresh: Ticker,
    rng: StdRng,
}

impl<C: Clock + Clone> App<C> {
    /// Build the app from validated `settings`.
    pub fn new(settings: &Settings, clock: C, mut rng: StdRng) -> Self {
        let now = clock.now();
        let time_zone = settings
            .clock
            .time_zone()
            .unwrap_or(chrono_tz::America::Chicago);

        let mut player = PlaybackSimulator::new(
            settings.catalog.to_tracks(),
            settings.player.tick_period(),
            clock.clone(),
            NowPlayingView::default(),
        );
        if settings.player.autoplay {
            player.play();
        }

        let scene = Scene::generate(&settings.effects, &mut rng);
        info!(
            tracks = player.tracks().len(),
            stars = scene.stars.len(),
            drops = scene.rain.len(),
            particles = scene.particles.len(),
            "scene ready"
        );

        Self {
            player,
            scene,
            time_zone,
            clock_text: format_time(Utc::now(), time_zone),
            should_quit: false,
            clock,
            started: now,
            frame: Ticker::start(settings.effects.frame_period(), now),
            clock_refresh: Ticker::start(CLOCK_REFRESH, now),
            rng,
        }
    }

    /// Time since the scene started; drives every animation.
    pub fn animation_time(&self) -> Duration {
        self.clock.now().saturating_duration_since(self.started)
    }

    pub fn apply(&mut self, control: Control) {
        match control {
            Control::TogglePlayback => self.player.toggle_playback(),
            Control::NextTrack => self.player.next_track(),
            Control::PreviousTrack => self.player.previous_track(),
            Control::Quit => {
                info!("quit requested");
                self.should_quit = true;
            }
        }
    }

    /// Run whatever timers are due. Returns whether anything visible changed.
    pub fn update(&mut self) -> bool {
        let now = self.clock.now();
        let mut changed = self.player.poll();

        if self.frame.fire(now) {
            let at = now.saturating_duration_since(self.started);
            self.scene.steam.update(at, &mut self.rng);
            changed = true;
        }

        if self.clock_refresh.fire(now) {
            self.clock_text = format_time(Utc::now(), self.time_zone);
            changed = true;
        }

        changed
    }

    /// The earliest instant one of the timers wants to run.
    pub fn next_wakeup(&self) -> Instant {
        let mut next = self.frame.next_due().min(self.clock_refresh.next_due());
        if let Some(deadline) = self.player.next_deadline() {
            next = next.min(deadline);
        }
        next
    }

    /// How long the event loop may block on input before `update` is due.
    pub fn poll_timeout(&self) -> Duration {
        self.next_wakeup()
            .saturating_duration_since(self.clock.now())
    }
}
