//! Weapon rule tables and the beam heat machine
//!
//! Non-beam weapons are pure data: a static spec per weapon id drives the
//! fire loop in `tick`. The lancer (beam) carries the only stateful piece,
//! an accumulating heat value with a hysteresis band around the overheat
//! threshold so firing does not chatter on and off at the boundary.

use serde::{Deserialize, Serialize};

/// Selectable weapons (slots 1-4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WeaponId {
    #[default]
    Blaster,
    Spreader,
    Rocket,
    /// Continuous beam, gated by heat
    Lancer,
}

/// Static firing rules for one weapon
#[derive(Debug, Clone, Copy)]
pub struct WeaponSpec {
    pub damage: f32,
    /// Seconds between shots (ignored by the beam, which fires every tick)
    pub fire_interval: f32,
    pub bullet_speed: f32,
    pub bullet_radius: f32,
    /// Angular gap between adjacent pellets (radians)
    pub spread_step: f32,
    pub pellets: u32,
    /// 0 = no splash
    pub splash_radius: f32,
    pub color: [f32; 4],
}

const BLASTER: WeaponSpec = WeaponSpec {
    damage: 10.0,
    fire_interval: 0.15,
    bullet_speed: 600.0,
    bullet_radius: 4.0,
    spread_step: 0.0,
    pellets: 1,
    splash_radius: 0.0,
    color: [1.0, 0.67, 0.0, 1.0],
};

const SPREADER: WeaponSpec = WeaponSpec {
    damage: 6.0,
    fire_interval: 0.6,
    bullet_speed: 500.0,
    bullet_radius: 4.0,
    spread_step: 0.09,
    pellets: 5,
    splash_radius: 0.0,
    color: [1.0, 0.85, 0.2, 1.0],
};

const ROCKET: WeaponSpec = WeaponSpec {
    damage: 25.0,
    fire_interval: 0.8,
    bullet_speed: 400.0,
    bullet_radius: 6.0,
    spread_step: 0.0,
    pellets: 1,
    splash_radius: 55.0,
    color: [1.0, 0.4, 0.2, 1.0],
};

// The beam never spawns bullets; damage/interval here describe the
// per-second tick damage and are consumed by the beam path in `tick`.
const LANCER: WeaponSpec = WeaponSpec {
    damage: LASER_DPS,
    fire_interval: 0.0,
    bullet_speed: 0.0,
    bullet_radius: 0.0,
    spread_step: 0.0,
    pellets: 0,
    splash_radius: 0.0,
    color: [0.4, 1.0, 0.9, 1.0],
};

/// Beam reach from the muzzle
pub const LASER_RANGE: f32 = 900.0;
/// Perpendicular half-width of the damage segment
pub const LASER_HALF_WIDTH: f32 = 7.0;
/// Damage per second while an enemy sits in the beam
pub const LASER_DPS: f32 = 60.0;
/// Heat gained per second of firing
pub const LASER_HEAT_RATE: f32 = 0.55;
/// Heat shed per second while idle or overheated
pub const LASER_COOL_RATE: f32 = 0.4;
/// Firing locks out when heat reaches this ceiling...
pub const LASER_OVERHEAT: f32 = 1.0;
/// ...and stays locked until heat falls back to this floor
pub const LASER_RESUME: f32 = 0.6;

impl WeaponId {
    pub fn spec(self) -> &'static WeaponSpec {
        match self {
            WeaponId::Blaster => &BLASTER,
            WeaponId::Spreader => &SPREADER,
            WeaponId::Rocket => &ROCKET,
            WeaponId::Lancer => &LANCER,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WeaponId::Blaster => "BLASTER",
            WeaponId::Spreader => "SPREADER",
            WeaponId::Rocket => "ROCKET",
            WeaponId::Lancer => "LANCER",
        }
    }

    /// Weapon-select slot (1-4) to id
    pub fn from_slot(slot: u8) -> Option<Self> {
        match slot {
            1 => Some(WeaponId::Blaster),
            2 => Some(WeaponId::Spreader),
            3 => Some(WeaponId::Rocket),
            4 => Some(WeaponId::Lancer),
            _ => None,
        }
    }

    pub const ALL: [WeaponId; 4] = [
        WeaponId::Blaster,
        WeaponId::Spreader,
        WeaponId::Rocket,
        WeaponId::Lancer,
    ];
}

/// Heading for pellet `index` of a volley: index-centered spread plus jitter.
#[inline]
pub fn pellet_angle(facing: f32, index: u32, spec: &WeaponSpec, jitter: f32) -> f32 {
    let centered = index as f32 - (spec.pellets.saturating_sub(1)) as f32 / 2.0;
    facing + centered * spec.spread_step + jitter
}

/// Beam heat state with overheat hysteresis
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LaserHeat {
    /// Always in [0, LASER_OVERHEAT]
    pub heat: f32,
    pub overheated: bool,
}

impl LaserHeat {
    pub fn can_fire(&self) -> bool {
        !self.overheated
    }

    /// Accumulate heat for `dt` seconds of firing. Call only when firing
    /// was permitted this tick.
    pub fn fire(&mut self, dt: f32) {
        self.heat = (self.heat + LASER_HEAT_RATE * dt).min(LASER_OVERHEAT);
        if self.heat >= LASER_OVERHEAT {
            self.overheated = true;
        }
    }

    /// Shed heat for `dt` seconds of not firing (or of lockout). Clears the
    /// overheat latch only once heat drops to the resume floor.
    pub fn cool(&mut self, dt: f32) {
        self.heat = (self.heat - LASER_COOL_RATE * dt).max(0.0);
        if self.overheated && self.heat <= LASER_RESUME {
            self.overheated = false;
        }
    }

    /// Heat as a 0..1 fraction for the HUD
    pub fn fraction(&self) -> f32 {
        self.heat / LASER_OVERHEAT
    }
}
