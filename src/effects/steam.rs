use std::time::Duration;

use rand::Rng;

use super::generate::uniform;
use crate::config::SteamSettings;

/// Delay between puffs within one burst.
pub const PUFF_STAGGER: Duration = Duration::from_millis(200);
/// How long a puff stays on screen.
pub const PUFF_LIFETIME: Duration = Duration::from_millis(2000);

/// One wisp of steam. `offset` is horizontal, in pixels around the cup center.
#[derive(Debug, Clone, PartialEq)]
pub struct SteamPuff {
    pub offset: f64,
    pub born: Duration,
}

impl SteamPuff {
    /// Fraction of the puff's lifetime used up at `at`.
    pub fn age(&self, at: Duration) -> f64 {
        let lived = at.saturating_sub(self.born);
        (lived.as_secs_f64() / PUFF_LIFETIME.as_secs_f64()).min(1.0)
    }
}

/// Emits bursts of steam on a fixed interval and retires old puffs.
///
/// Driven by animation time (time since the scene started) rather than a
/// clock, so it is fully determined by the times it is updated at.
#[derive(Debug, Clone)]
pub struct SteamEmitter {
    count: usize,
    interval: Duration,
    next_burst: Duration,
    scheduled: Vec<Duration>,
    puffs: Vec<SteamPuff>,
}

impl SteamEmitter {
    pub fn new(settings: &SteamSettings) -> Self {
        let interval = Duration::from_millis(settings.interval_ms);
        Self {
            count: settings.count,
            interval,
            next_burst: interval,
            scheduled: Vec::new(),
            puffs: Vec::new(),
        }
    }

    pub fn puffs(&self) -> &[SteamPuff] {
        &self.puffs
    }

    /// Bring the emitter up to animation time `at`.
    pub fn update<R: Rng + ?Sized>(&mut self, at: Duration, rng: &mut R) {
        if self.interval.is_zero() {
            return;
        }

        // Skip bursts whose puffs would already be gone.
        let horizon = at.saturating_sub(PUFF_LIFETIME + PUFF_STAGGER * self.count as u32);
        if self.next_burst < horizon {
            let interval = self.interval.as_nanos();
            let skip = (horizon - self.next_burst).as_nanos() / interval * interval;
            let skip = Duration::from_nanos(u64::try_from(skip).unwrap_or(u64::MAX));
            self.next_burst = self.next_burst.saturating_add(skip);
        }

        while self.next_burst <= at {
            for i in 0..self.count {
                self.scheduled.push(self.next_burst + PUFF_STAGGER * i as u32);
            }
            self.next_burst += self.interval;
        }

        let mut i = 0;
        while i < self.scheduled.len() {
            if self.scheduled[i] <= at {
                let born = self.scheduled.swap_remove(i);
                self.puffs.push(SteamPuff {
                    offset: uniform(rng, -5.0, 5.0),
                    born,
                });
            } else {
                i += 1;
            }
        }

        self.puffs.retain(|p| at.saturating_sub(p.born) < PUFF_LIFETIME);
    }
}
