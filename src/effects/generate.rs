use std::time::Duration;

use rand::Rng;

use crate::config::{ParticleSettings, RainSettings, StarSettings};

/// A twinkling star. Positions are percentages of the sky area.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub size: f64,
    pub left: f64,
    pub top: f64,
    pub delay_secs: f64,
    pub period_secs: f64,
}

impl Star {
    /// Twinkle brightness in `0.0..=1.0` at animation time `at`.
    pub fn brightness(&self, at: Duration) -> f64 {
        let phase = cycle_phase(at.as_secs_f64() - self.delay_secs, self.period_secs);
        1.0 - (2.0 * phase - 1.0).abs()
    }
}

/// A falling raindrop. `left` is a percentage of the scene width.
#[derive(Debug, Clone, PartialEq)]
pub struct RainDrop {
    pub length: f64,
    pub left: f64,
    pub fall_secs: f64,
    pub delay_secs: f64,
    pub opacity: f64,
}

impl RainDrop {
    /// How far through its fall the drop is, or `None` before it starts.
    pub fn fall_progress(&self, at: Duration) -> Option<f64> {
        started_phase(at, self.delay_secs, self.fall_secs)
    }
}

/// A slowly rising dust particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub size: f64,
    pub left: f64,
    pub float_secs: f64,
    pub delay_secs: f64,
}

impl Particle {
    /// How far up its path the particle is, or `None` before it starts.
    pub fn rise_progress(&self, at: Duration) -> Option<f64> {
        started_phase(at, self.delay_secs, self.float_secs)
    }
}

pub fn stars<R: Rng + ?Sized>(settings: &StarSettings, rng: &mut R) -> Vec<Star> {
    (0..settings.count)
        .map(|_| Star {
            size: uniform(rng, settings.min_size, settings.max_size),
            left: uniform(rng, 0.0, 100.0),
            top: uniform(rng, 0.0, 100.0),
            delay_secs: uniform(rng, 0.0, 2.0),
            period_secs: 1.5 + uniform(rng, 0.0, 1.5),
        })
        .collect()
}

pub fn rain<R: Rng + ?Sized>(settings: &RainSettings, rng: &mut R) -> Vec<RainDrop> {
    (0..settings.count)
        .map(|_| RainDrop {
            length: uniform(rng, settings.min_length, settings.max_length),
            fall_secs: uniform(rng, settings.min_speed, settings.max_speed),
            left: uniform(rng, 0.0, 100.0),
            delay_secs: uniform(rng, 0.0, 2.0),
            opacity: uniform(rng, 0.1, 0.4),
        })
        .collect()
}

pub fn particles<R: Rng + ?Sized>(settings: &ParticleSettings, rng: &mut R) -> Vec<Particle> {
    (0..settings.count)
        .map(|_| {
            let size = uniform(rng, settings.min_size, settings.max_size);
            let float_secs = uniform(rng, settings.min_speed, settings.max_speed);
            Particle {
                size,
                left: uniform(rng, 0.0, 100.0),
                float_secs,
                delay_secs: uniform(rng, 0.0, float_secs),
            }
        })
        .collect()
}

/// Uniform sample from `[min, max)`; a collapsed range yields `min`.
pub(crate) fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max > min { rng.random_range(min..max) } else { min }
}

fn cycle_phase(t: f64, period: f64) -> f64 {
    if period <= 0.0 {
        return 0.0;
    }
    (t / period).rem_euclid(1.0)
}

fn started_phase(at: Duration, delay_secs: f64, period_secs: f64) -> Option<f64> {
    let t = at.as_secs_f64() - delay_secs;
    if t < 0.0 {
        return None;
    }
    Some(cycle_phase(t, period_secs))
}
