//! Wave scheduling and enemy spawn selection
//!
//! Waves are procedurally parameterized: each advance raises the enemy
//! quota, tightens the spawn cadence toward a floor, and widens the weighted
//! kind draw so rarer, stronger enemies show up as the run progresses.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::EnemyKind;
use crate::consts::*;

/// Per-wave spawn bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    /// Seconds until the next spawn event
    pub spawn_timer: f32,
    /// Current interval between spawn events
    pub spawn_rate: f32,
    /// Enemies this wave will spawn in total
    pub quota: u32,
    /// Enemies spawned so far this wave
    pub spawned: u32,
    /// Wave announcement banner; pauses new spawns while positive
    pub banner_time: f32,
}

impl Default for Spawner {
    fn default() -> Self {
        Self {
            spawn_timer: 0.0,
            spawn_rate: spawn_rate_for_wave(1),
            quota: quota_for_wave(1),
            spawned: 0,
            banner_time: 0.0,
        }
    }
}

/// Enemy quota for a wave; strictly non-decreasing in the wave number.
pub fn quota_for_wave(wave: u32) -> u32 {
    if wave <= 1 {
        BASE_QUOTA
    } else {
        BASE_QUOTA + QUOTA_STEP * wave
    }
}

/// Spawn interval for a wave; non-increasing, floored.
pub fn spawn_rate_for_wave(wave: u32) -> f32 {
    if wave <= 1 {
        BASE_SPAWN_RATE
    } else {
        (BASE_SPAWN_RATE - SPAWN_RATE_STEP * wave as f32).max(SPAWN_RATE_FLOOR)
    }
}

impl Spawner {
    /// True once the wave quota is exhausted, the field is clear, and both
    /// the inter-spawn timer and the banner have elapsed.
    pub fn wave_complete(&self, live_enemies: usize) -> bool {
        self.spawned >= self.quota
            && live_enemies == 0
            && self.spawn_timer <= 0.0
            && self.banner_time <= 0.0
    }

    /// Reconfigure for `wave` and raise the announcement banner.
    pub fn advance(&mut self, wave: u32) {
        self.quota = quota_for_wave(wave);
        self.spawn_rate = spawn_rate_for_wave(wave);
        self.spawned = 0;
        self.spawn_timer = 0.0;
        self.banner_time = WAVE_BANNER_DURATION;
        log::info!(
            "wave {wave}: quota={}, spawn_rate={:.2}s",
            self.quota,
            self.spawn_rate
        );
    }

    /// True when a spawn event should fire this tick. Banner time gates new
    /// spawns without touching already-live entities.
    pub fn wants_spawn(&self) -> bool {
        self.banner_time <= 0.0 && self.spawn_timer <= 0.0 && self.spawned < self.quota
    }
}

/// Wave-gated weighted draw of the next enemy kind.
///
/// Early waves only see grunts; each breakpoint unlocks a kind and its
/// weight grows with the wave so late draws skew toward the strong kinds.
pub fn enemy_kind_for_wave(wave: u32, rng: &mut impl Rng) -> EnemyKind {
    let mut table: [(EnemyKind, u32); 5] = [
        (EnemyKind::Grunt, 60),
        (EnemyKind::Runner, 0),
        (EnemyKind::Swarm, 0),
        (EnemyKind::Shooter, 0),
        (EnemyKind::Tank, 0),
    ];
    if wave >= 3 {
        table[1].1 = (10 + 2 * wave).min(30);
    }
    if wave >= 4 {
        table[2].1 = (8 + wave).min(20);
    }
    if wave >= 5 {
        table[3].1 = (8 + wave).min(22);
    }
    if wave >= 7 {
        table[4].1 = (5 + wave).min(18);
    }

    let total: u32 = table.iter().map(|(_, w)| w).sum();
    let mut roll = rng.random_range(0..total);
    for (kind, weight) in table {
        if roll < weight {
            return kind;
        }
        roll -= weight;
    }
    EnemyKind::Grunt
}

/// Random point just outside one of the four playfield edges.
pub fn edge_spawn_pos(rng: &mut impl Rng) -> Vec2 {
    match rng.random_range(0..4u32) {
        0 => Vec2::new(-SPAWN_MARGIN, rng.random::<f32>() * ARENA_H),
        1 => Vec2::new(ARENA_W + SPAWN_MARGIN, rng.random::<f32>() * ARENA_H),
        2 => Vec2::new(rng.random::<f32>() * ARENA_W, -SPAWN_MARGIN),
        _ => Vec2::new(rng.random::<f32>() * ARENA_W, ARENA_H + SPAWN_MARGIN),
    }
}

/// Swarm spawn events place a burst of weak fast enemies at once.
pub fn swarm_burst_size(rng: &mut impl Rng) -> u32 {
    rng.random_range(3..=7)
}
