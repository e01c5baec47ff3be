//! Ambient scene effects: stars, rain, floating particles and coffee steam.
//!
//! The generators are plain functions from settings and an RNG to lists of
//! attribute records. Records carry their own timing so the UI can place
//! them at any animation time without keeping per-frame state.

mod generate;
mod steam;

pub use generate::*;
pub use steam::*;

use rand::Rng;

use crate::config::EffectsSettings;

/// Everything drawn over the static room.
#[derive(Debug, Clone)]
pub struct Scene {
    pub stars: Vec<Star>,
    pub rain: Vec<RainDrop>,
    pub particles: Vec<Particle>,
    pub steam: SteamEmitter,
}

impl Scene {
    pub fn generate<R: Rng + ?Sized>(settings: &EffectsSettings, rng: &mut R) -> Self {
        Self {
            stars: stars(&settings.stars, rng),
            rain: rain(&settings.rain, rng),
            particles: particles(&settings.particles, rng),
            steam: SteamEmitter::new(&settings.steam),
        }
    }
}

#[cfg(test)]
mod tests;
