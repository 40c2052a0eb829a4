//! Render scene assembly
//!
//! Flattens `GameState` into an ordered, renderer-agnostic draw list plus
//! HUD scalars. The renderer draws commands in list order, so painting is
//! back-to-front; no gameplay state is touched here.

use glam::Vec2;

use crate::consts::*;
use crate::sim::state::DashState;
use crate::sim::{GamePhase, GameState};
use crate::Settings;

/// One renderer-agnostic draw command, already in playfield coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Circle {
        pos: Vec2,
        radius: f32,
        color: [f32; 4],
    },
    /// Unfilled circle outline, for shockwaves and shield indicators
    Ring {
        pos: Vec2,
        radius: f32,
        thickness: f32,
        color: [f32; 4],
    },
    /// Thick line, for the beam and bullet trails
    Segment {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: [f32; 4],
    },
    Text {
        pos: Vec2,
        text: String,
        size: f32,
        color: [f32; 4],
    },
}

/// HUD scalars, read directly by the overlay layer.
#[derive(Debug, Clone, Default)]
pub struct Hud {
    pub score: u64,
    pub wave: u32,
    pub hp: f32,
    pub max_hp: f32,
    pub weapon_name: &'static str,
    /// Beam heat in 0..1
    pub heat: f32,
    pub rapid_fire_secs: f32,
    pub damage_boost_secs: f32,
    pub weapon_override_secs: f32,
    pub combo: u32,
    /// 0 = ready, 1 = just used
    pub dash_cooldown: f32,
    pub shield_charges: u8,
    /// Wave banner seconds remaining; 0 = hidden
    pub banner_time: f32,
    pub paused: bool,
    pub game_over: bool,
}

/// Complete per-frame render description.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Shake offset to apply to the world camera
    pub camera_offset: Vec2,
    /// Back-to-front draw list
    pub draws: Vec<DrawCmd>,
    pub hud: Hud,
}

/// Build the frame's scene from simulation state and user settings.
pub fn build_scene(state: &GameState, settings: &Settings) -> Scene {
    let mut draws = Vec::with_capacity(
        state.bullets.len() + state.enemies.len() + state.particles.len() + 32,
    );

    for b in state.bullets.iter() {
        if b.prev.distance_squared(b.pos) > 1.0 {
            draws.push(DrawCmd::Segment {
                from: b.prev,
                to: b.pos,
                width: b.radius,
                color: [b.color[0], b.color[1], b.color[2], 0.4],
            });
        }
        draws.push(DrawCmd::Circle {
            pos: b.pos,
            radius: b.radius,
            color: b.color,
        });
    }

    for e in state.enemies.iter() {
        let stats = e.kind.stats();
        let color = if e.hit_flash > 0.0 {
            [1.0, 1.0, 1.0, 1.0]
        } else {
            stats.color
        };
        draws.push(DrawCmd::Circle {
            pos: e.pos,
            radius: stats.radius,
            color,
        });
    }

    if let Some((from, to)) = state.laser_beam {
        draws.push(DrawCmd::Segment {
            from,
            to,
            width: crate::sim::weapons::LASER_HALF_WIDTH * 2.0,
            color: [0.4, 1.0, 0.9, 0.8],
        });
    }

    for s in state.shockwaves.iter() {
        let alpha = 1.0 - (s.age / s.lifetime).min(1.0);
        draws.push(DrawCmd::Ring {
            pos: s.pos,
            radius: s.radius,
            thickness: 3.0,
            color: [1.0, 1.0, 1.0, alpha],
        });
    }

    for p in state.particles.iter().take(settings.max_particles()) {
        let alpha = 1.0 - (p.age / p.lifetime).min(1.0);
        draws.push(DrawCmd::Circle {
            pos: p.pos,
            radius: p.size,
            color: [p.color[0], p.color[1], p.color[2], p.color[3] * alpha],
        });
    }

    for p in state.pickups.iter() {
        draws.push(DrawCmd::Circle {
            pos: p.pos,
            radius: PICKUP_RADIUS,
            color: p.kind.color(),
        });
    }

    for f in state.floaters.iter() {
        let alpha = 1.0 - (f.age / f.lifetime).min(1.0);
        draws.push(DrawCmd::Text {
            pos: f.pos,
            text: f.text.clone(),
            size: 14.0,
            color: [f.color[0], f.color[1], f.color[2], alpha],
        });
    }

    for g in &state.player.ghosts {
        draws.push(DrawCmd::Circle {
            pos: g.pos,
            radius: state.player.radius,
            color: [0.4, 0.9, 1.0, g.alpha * 0.5],
        });
    }

    let player = &state.player;
    // blink while invulnerable, except during the dash itself
    let visible = player.invulnerable <= 0.0
        || matches!(player.dash, DashState::Active { .. })
        || (state.time_ticks / 4) % 2 == 0;
    if visible {
        draws.push(DrawCmd::Circle {
            pos: player.pos,
            radius: player.radius,
            color: [0.4, 0.9, 1.0, 1.0],
        });
        // barrel, pulled back by recoil
        let muzzle = player.muzzle() - crate::heading_vec(player.angle) * player.recoil;
        draws.push(DrawCmd::Segment {
            from: player.pos,
            to: muzzle,
            width: 4.0,
            color: [0.8, 1.0, 1.0, 1.0],
        });
    }
    if player.shield_charges > 0 {
        draws.push(DrawCmd::Ring {
            pos: player.pos,
            radius: player.radius + 6.0,
            thickness: 2.0,
            color: [0.3, 0.7, 1.0, 0.7],
        });
    }

    let camera_offset = if settings.effective_screen_shake() {
        state.feedback.shake
    } else {
        Vec2::ZERO
    };

    Scene {
        camera_offset,
        draws,
        hud: build_hud(state),
    }
}

fn build_hud(state: &GameState) -> Hud {
    Hud {
        score: state.score,
        wave: state.wave,
        hp: state.player.hp,
        max_hp: state.player.max_hp,
        weapon_name: state.active_weapon().name(),
        heat: state.laser.fraction(),
        rapid_fire_secs: state.buffs.rapid_fire,
        damage_boost_secs: state.buffs.damage_boost,
        weapon_override_secs: state.weapon_override.map_or(0.0, |ov| ov.timer),
        combo: state.feedback.combo,
        dash_cooldown: (state.player.dash_cooldown / DASH_COOLDOWN).clamp(0.0, 1.0),
        shield_charges: state.player.shield_charges,
        banner_time: state.spawner.banner_time,
        paused: state.phase == GamePhase::Paused,
        game_over: state.phase == GamePhase::GameOver,
    }
}
