//! Neon Horde - a top-down arena shooter survival core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, weapons, waves, collisions)
//! - `scene`: Drawable extraction for an external renderer
//! - `audio`: Sound event queue for an external audio backend
//! - `settings`: Player preferences

pub mod audio;
pub mod scene;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical playfield size
    pub const ARENA_W: f32 = 1280.0;
    pub const ARENA_H: f32 = 720.0;
    /// Frame delta clamp - a stalled frame never produces a huge sim step
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 15.0;
    pub const PLAYER_SPEED: f32 = 300.0;
    pub const PLAYER_MAX_HP: f32 = 100.0;
    /// Invulnerability window after taking a hit (seconds)
    pub const INVULN_TIME: f32 = 0.7;

    /// Dash
    pub const DASH_DURATION: f32 = 0.2;
    pub const DASH_COOLDOWN: f32 = 2.0;
    pub const DASH_SPEED_MULT: f32 = 3.0;
    /// Max ghost afterimages recorded while dashing
    pub const GHOST_CAP: usize = 5;

    /// Shield
    pub const SHIELD_MAX_CHARGES: u8 = 3;
    pub const SHIELD_DURATION: f32 = 10.0;

    /// Enemies spawn this far outside the playfield edge
    pub const SPAWN_MARGIN: f32 = 50.0;
    /// Bullets are culled this far past the playfield edge
    pub const OFFSCREEN_MARGIN: f32 = 50.0;
    pub const BULLET_LIFETIME: f32 = 2.0;
    pub const ENEMY_BULLET_SPEED: f32 = 300.0;
    pub const ENEMY_BULLET_RADIUS: f32 = 5.0;

    /// Feedback
    pub const COMBO_RESET_TIME: f32 = 2.0;
    pub const SHAKE_DECAY: f32 = 0.92;
    pub const HITSTOP_KILL: f32 = 0.05;
    pub const HITSTOP_HURT: f32 = 0.03;

    /// Pool capacities (backpressure valves, not errors)
    pub const MAX_BULLETS: usize = 256;
    pub const MAX_ENEMIES: usize = 128;
    pub const MAX_PARTICLES: usize = 250;
    pub const MAX_SHOCKWAVES: usize = 32;
    pub const MAX_FLOATERS: usize = 48;
    pub const MAX_PICKUPS: usize = 16;
    /// Splash sub-resolutions permitted per tick
    pub const MAX_EXPLOSIONS_PER_FRAME: u32 = 3;

    /// Wave pacing
    pub const BASE_SPAWN_RATE: f32 = 2.0;
    pub const SPAWN_RATE_STEP: f32 = 0.1;
    pub const SPAWN_RATE_FLOOR: f32 = 0.5;
    pub const BASE_QUOTA: u32 = 5;
    pub const QUOTA_STEP: u32 = 2;
    pub const WAVE_BANNER_DURATION: f32 = 2.0;

    /// Pickups
    pub const PICKUP_RADIUS: f32 = 10.0;
    pub const PICKUP_ATTRACT_RADIUS: f32 = 120.0;
    pub const PICKUP_DRIFT_ACCEL: f32 = 60.0;
    pub const PICKUP_DROP_CHANCE: f32 = 0.25;

    /// Timed buffs
    pub const RAPID_FIRE_DURATION: f32 = 8.0;
    pub const RAPID_FIRE_MULT: f32 = 0.5;
    pub const DAMAGE_BOOST_DURATION: f32 = 8.0;
    pub const DAMAGE_BOOST_MULT: f32 = 2.0;
    pub const WEAPON_OVERRIDE_DURATION: f32 = 10.0;

    /// Analog/touch assist: extra bullet hit radius
    pub const ASSIST_HIT_BONUS: f32 = 2.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit vector for a heading angle
#[inline]
pub fn heading_vec(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Distance from point `p` to the segment `a..b`
pub fn point_segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < 0.0001 {
        return (p - a).length();
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).length()
}
