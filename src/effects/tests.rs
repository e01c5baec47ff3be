use super::*;
use crate::config::{EffectsSettings, ParticleSettings, RainSettings, StarSettings, SteamSettings};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn stars_respect_count_and_ranges() {
    let settings = StarSettings::default();
    let stars = stars(&settings, &mut rng());
    assert_eq!(stars.len(), 50);
    for s in &stars {
        assert!(s.size >= 2.0 && s.size < 4.0);
        assert!(s.left >= 0.0 && s.left < 100.0);
        assert!(s.top >= 0.0 && s.top < 100.0);
        assert!(s.delay_secs >= 0.0 && s.delay_secs < 2.0);
        assert!(s.period_secs >= 1.5 && s.period_secs < 3.0);
    }
}

#[test]
fn rain_respects_count_and_ranges() {
    let drops = rain(&RainSettings::default(), &mut rng());
    assert_eq!(drops.len(), 100);
    for d in &drops {
        assert!(d.length >= 10.0 && d.length < 25.0);
        assert!(d.fall_secs >= 0.8 && d.fall_secs < 1.5);
        assert!(d.opacity >= 0.1 && d.opacity < 0.4);
        assert!(d.delay_secs >= 0.0 && d.delay_secs < 2.0);
    }
}

#[test]
fn particle_delay_is_bounded_by_its_own_float_time() {
    let ps = particles(&ParticleSettings::default(), &mut rng());
    assert_eq!(ps.len(), 15);
    for p in &ps {
        assert!(p.size >= 2.0 && p.size < 6.0);
        assert!(p.float_secs >= 15.0 && p.float_secs < 30.0);
        assert!(p.delay_secs < p.float_secs);
    }
}

#[test]
fn collapsed_range_yields_the_constant() {
    let settings = StarSettings {
        count: 3,
        min_size: 3.0,
        max_size: 3.0,
    };
    assert!(stars(&settings, &mut rng()).iter().all(|s| s.size == 3.0));
}

#[test]
fn same_seed_same_scene() {
    let settings = EffectsSettings::default();
    let a = Scene::generate(&settings, &mut rng());
    let b = Scene::generate(&settings, &mut rng());
    assert_eq!(a.stars, b.stars);
    assert_eq!(a.rain, b.rain);
    assert_eq!(a.particles, b.particles);
}

#[test]
fn zero_counts_produce_an_empty_scene() {
    let mut settings = EffectsSettings::default();
    settings.stars.count = 0;
    settings.rain.count = 0;
    settings.particles.count = 0;
    let scene = Scene::generate(&settings, &mut rng());
    assert!(scene.stars.is_empty() && scene.rain.is_empty() && scene.particles.is_empty());
}

#[test]
fn star_brightness_peaks_mid_cycle() {
    let star = Star {
        size: 2.0,
        left: 0.0,
        top: 0.0,
        delay_secs: 0.0,
        period_secs: 2.0,
    };
    assert_eq!(star.brightness(Duration::ZERO), 0.0);
    assert_eq!(star.brightness(Duration::from_secs(1)), 1.0);
    assert_eq!(star.brightness(Duration::from_millis(500)), 0.5);
}

#[test]
fn rain_waits_for_its_delay_then_loops() {
    let drop = RainDrop {
        length: 10.0,
        left: 50.0,
        fall_secs: 1.0,
        delay_secs: 0.5,
        opacity: 0.2,
    };
    assert_eq!(drop.fall_progress(Duration::from_millis(100)), None);
    assert_eq!(drop.fall_progress(Duration::from_millis(750)), Some(0.25));
    assert_eq!(drop.fall_progress(Duration::from_millis(1750)), Some(0.25));
}

#[test]
fn steam_bursts_on_interval_with_staggered_puffs() {
    let mut steam = SteamEmitter::new(&SteamSettings::default());
    let mut r = rng();

    steam.update(Duration::from_millis(799), &mut r);
    assert!(steam.puffs().is_empty());

    steam.update(Duration::from_millis(800), &mut r);
    assert_eq!(steam.puffs().len(), 1);

    steam.update(Duration::from_millis(1200), &mut r);
    assert_eq!(steam.puffs().len(), 3);
    assert!(steam.puffs().iter().all(|p| p.offset >= -5.0 && p.offset < 5.0));
}

#[test]
fn steam_puffs_expire_after_their_lifetime() {
    let mut steam = SteamEmitter::new(&SteamSettings {
        count: 1,
        interval_ms: 10_000,
    });
    let mut r = rng();
    steam.update(Duration::from_secs(10), &mut r);
    assert_eq!(steam.puffs().len(), 1);
    assert_eq!(steam.puffs()[0].age(Duration::from_secs(11)), 0.5);

    steam.update(Duration::from_millis(11_999), &mut r);
    assert_eq!(steam.puffs().len(), 1);
    steam.update(Duration::from_secs(12), &mut r);
    assert!(steam.puffs().is_empty());
}

#[test]
fn steam_catches_up_after_a_long_gap_without_flooding() {
    let mut steam = SteamEmitter::new(&SteamSettings::default());
    let mut r = rng();
    steam.update(Duration::from_secs(3600), &mut r);
    // At most the bursts of the last puff lifetime plus stagger are alive.
    assert!(steam.puffs().len() <= 3 * 4);
    assert!(
        steam
            .puffs()
            .iter()
            .all(|p| Duration::from_secs(3600) - p.born < PUFF_LIFETIME)
    );
}

#[test]
fn steam_skip_ahead_handles_gaps_beyond_u32_intervals() {
    let mut steam = SteamEmitter::new(&SteamSettings {
        count: 1,
        interval_ms: 1,
    });
    let mut r = rng();
    let at = Duration::from_secs(60 * 24 * 60 * 60);
    steam.update(at, &mut r);

    let alive = PUFF_LIFETIME.as_millis() as usize;
    assert!(!steam.puffs().is_empty());
    assert!(steam.puffs().len() <= alive + 1);
    assert!(steam.puffs().iter().all(|p| at - p.born < PUFF_LIFETIME));
}
