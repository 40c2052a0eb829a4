//! Fixed timestep frame driver
//!
//! `tick` advances the whole simulation by one frame in a fixed order:
//! command edges, hitstop branch, feedback timers, player, weapon fire,
//! bullets, enemies, the spawner, visual pools, collision resolution, then
//! buff timers. Everything is deterministic for a given seed and input
//! sequence.

use glam::Vec2;
use rand::Rng;

use super::collision;
use super::state::{Bullet, DashState, Enemy, EnemyKind, GamePhase, GameState};
use super::wave::{edge_spawn_pos, enemy_kind_for_wave, swarm_burst_size};
use super::weapons::{
    pellet_angle, WeaponId, LASER_DPS, LASER_HALF_WIDTH, LASER_RANGE,
};
use crate::audio::SoundKind;
use crate::consts::*;
use crate::{heading_vec, point_segment_distance};

/// Input sampled for a single tick. Edges (dash/pause/restart/select) are
/// one-shot; held state (fire, axes) is level-triggered.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Horizontal move axis in [-1, 1]
    pub move_x: f32,
    /// Vertical move axis in [-1, 1]
    pub move_y: f32,
    /// Aim target in playfield coordinates
    pub aim: Vec2,
    /// Trigger held
    pub fire: bool,
    /// Dash pressed this frame
    pub dash: bool,
    /// Pause toggled this frame
    pub pause: bool,
    /// Restart pressed this frame; acts in any phase
    pub restart: bool,
    /// Weapon slot selected this frame
    pub select_weapon: Option<WeaponId>,
    /// Analog/touch control scheme; widens bullet hit circles slightly
    pub analog: bool,
}

/// Advance the game by one frame of at most `MAX_FRAME_DT` seconds.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = dt.min(MAX_FRAME_DT);

    if input.restart {
        let seed = state.rng.random();
        state.restart(seed);
        return;
    }

    if input.pause {
        state.phase = match state.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            GamePhase::GameOver => GamePhase::GameOver,
        };
    }
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    if let Some(weapon) = input.select_weapon {
        state.weapon = weapon;
    }

    // Hitstop: gameplay freezes, decay-only visuals keep moving.
    state.feedback.decay_shake();
    if state.feedback.frozen() {
        state.feedback.hitstop = (state.feedback.hitstop - dt).max(0.0);
        state.player.fade_ghosts(dt);
        state.player.decay_recoil(dt);
        for e in state.enemies.iter_mut() {
            if e.hit_flash > 0.0 {
                e.hit_flash -= dt;
            }
        }
        state.shockwaves.retain_recycle(|s| {
            s.update(dt);
            !s.dead()
        });
        return;
    }
    state.feedback.tick_combo(dt);

    update_player(state, input, dt);
    fire_weapons(state, input, dt);

    state.bullets.retain_recycle(|b| {
        b.advance(dt);
        !b.expired()
    });

    update_enemies(state, dt);
    run_spawner(state, dt);

    let player_pos = state.player.pos;
    state.particles.retain_recycle(|p| {
        p.update(dt);
        !p.dead()
    });
    state.shockwaves.retain_recycle(|s| {
        s.update(dt);
        !s.dead()
    });
    state.floaters.retain_recycle(|f| {
        f.update(dt);
        !f.dead()
    });
    for p in state.pickups.iter_mut() {
        p.update(player_pos, dt);
    }

    collision::resolve(state, input.analog);

    tick_timers(state, dt);
}

fn update_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let move_input = {
        let v = Vec2::new(input.move_x, input.move_y);
        if v.length_squared() > 1.0 {
            v.normalize()
        } else {
            v
        }
    };

    if input.dash && state.player.try_dash(move_input) {
        state.sounds.push(SoundKind::Dash);
    }

    let player = &mut state.player;
    player.dash_cooldown = (player.dash_cooldown - dt).max(0.0);
    player.invulnerable = (player.invulnerable - dt).max(0.0);

    match player.dash {
        DashState::Active { timer, dir } => {
            player.pos += dir * player.speed * DASH_SPEED_MULT * dt;
            player.record_ghost();
            let timer = timer - dt;
            player.dash = if timer <= 0.0 {
                DashState::Inactive
            } else {
                DashState::Active { timer, dir }
            };
        }
        DashState::Inactive => {
            player.pos += move_input * player.speed * dt;
        }
    }
    player.pos.x = player.pos.x.clamp(player.radius, ARENA_W - player.radius);
    player.pos.y = player.pos.y.clamp(player.radius, ARENA_H - player.radius);

    let to_aim = input.aim - player.pos;
    if to_aim.length_squared() > 0.0001 {
        player.angle = to_aim.y.atan2(to_aim.x);
    }

    player.fade_ghosts(dt);
    player.decay_recoil(dt);
}

fn fire_weapons(state: &mut GameState, input: &TickInput, dt: f32) {
    state.player.fire_cooldown = (state.player.fire_cooldown - dt).max(0.0);
    state.laser_beam = None;

    let weapon = state.active_weapon();
    if weapon == WeaponId::Lancer {
        if input.fire && state.laser.can_fire() {
            fire_laser(state, dt);
            let was_locked = state.laser.overheated;
            state.laser.fire(dt);
            if !was_locked && state.laser.overheated {
                state.sounds.push(SoundKind::Overheat);
            }
        } else {
            state.laser.cool(dt);
        }
        return;
    }

    state.laser.cool(dt);
    if input.fire && state.player.fire_cooldown <= 0.0 {
        fire_volley(state, weapon);
    }
}

/// Emit one volley of the weapon's pellets from the muzzle.
fn fire_volley(state: &mut GameState, weapon: WeaponId) {
    let spec = weapon.spec();
    let origin = state.player.muzzle();
    let facing = state.player.angle;
    let damage = spec.damage * state.buffs.damage_mult();

    for i in 0..spec.pellets {
        let jitter = (state.rng.random::<f32>() - 0.5) * 0.06;
        let angle = pellet_angle(facing, i, spec, jitter);
        state.bullets.spawn(Bullet::default, |b| {
            b.pos = origin;
            b.prev = origin;
            b.angle = angle;
            b.speed = spec.bullet_speed;
            b.radius = spec.bullet_radius;
            b.damage = damage;
            b.lifetime = BULLET_LIFETIME;
            b.age = 0.0;
            b.splash_radius = spec.splash_radius;
            b.exploded = false;
            b.from_enemy = false;
            b.color = spec.color;
        });
    }

    state.player.fire_cooldown = spec.fire_interval * state.buffs.fire_interval_mult();
    state.player.recoil = 3.0;
    let detune = state.rng.random::<f32>() * 60.0 - 30.0;
    state.sounds.push_detuned(SoundKind::Shoot, detune);
}

/// Segment test against every enemy; damage scales with dt so the beam
/// deals its listed damage per second.
fn fire_laser(state: &mut GameState, dt: f32) {
    let a = state.player.muzzle();
    let b = a + heading_vec(state.player.angle) * LASER_RANGE;
    state.laser_beam = Some((a, b));

    let damage = LASER_DPS * dt * state.buffs.damage_mult();
    for e in state.enemies.iter_mut() {
        if point_segment_distance(e.pos, a, b) < LASER_HALF_WIDTH + e.radius() {
            e.hp -= damage;
            e.hit_flash = 0.1;
        }
    }
    collision::reap_dead_enemies(state);
}

fn update_enemies(state: &mut GameState, dt: f32) {
    let player_pos = state.player.pos;
    let mut volleys: Vec<(Vec2, f32)> = Vec::new();
    for e in state.enemies.iter_mut() {
        if e.update(player_pos, dt) {
            volleys.push((e.pos, e.kind.stats().damage));
        }
    }
    for (pos, damage) in volleys {
        let to_player = player_pos - pos;
        let angle = to_player.y.atan2(to_player.x);
        state.bullets.spawn(Bullet::default, |b| {
            b.pos = pos;
            b.prev = pos;
            b.angle = angle;
            b.speed = ENEMY_BULLET_SPEED;
            b.radius = ENEMY_BULLET_RADIUS;
            b.damage = damage;
            b.lifetime = BULLET_LIFETIME;
            b.age = 0.0;
            b.splash_radius = 0.0;
            b.exploded = false;
            b.from_enemy = true;
            b.color = [1.0, 0.3, 0.5, 1.0];
        });
    }
}

fn run_spawner(state: &mut GameState, dt: f32) {
    if state.spawner.banner_time > 0.0 {
        state.spawner.banner_time = (state.spawner.banner_time - dt).max(0.0);
    } else if state.spawner.spawn_timer > 0.0 {
        state.spawner.spawn_timer -= dt;
    }

    if state.spawner.wants_spawn() {
        spawn_event(state);
        state.spawner.spawn_timer = state.spawner.spawn_rate;
    }

    if state.spawner.wave_complete(state.enemies.len()) {
        state.wave += 1;
        state.spawner.advance(state.wave);
        state.sounds.push(SoundKind::WaveStart);
    }
}

/// One spawn event: a single enemy, or a clustered burst for swarms.
/// Burst members all count against the wave quota.
fn spawn_event(state: &mut GameState) {
    let kind = enemy_kind_for_wave(state.wave, &mut state.rng);
    let count = if kind == EnemyKind::Swarm {
        let remaining = state.spawner.quota - state.spawner.spawned;
        swarm_burst_size(&mut state.rng).min(remaining)
    } else {
        1
    };

    let anchor = edge_spawn_pos(&mut state.rng);
    for _ in 0..count {
        let offset = Vec2::new(
            state.rng.random::<f32>() * 40.0 - 20.0,
            state.rng.random::<f32>() * 40.0 - 20.0,
        );
        let strafe_dir = if state.rng.random::<bool>() { 1.0 } else { -1.0 };
        let pos = if count > 1 { anchor + offset } else { anchor };
        state.enemies.spawn(Enemy::default, |e| {
            e.init(kind, pos, strafe_dir);
        });
        state.spawner.spawned += 1;
    }
}

fn tick_timers(state: &mut GameState, dt: f32) {
    state.buffs.tick(dt);

    if let Some(ov) = &mut state.weapon_override {
        ov.timer -= dt;
        if ov.timer <= 0.0 {
            state.weapon_override = None;
        }
    }

    let player = &mut state.player;
    if player.shield_timer > 0.0 {
        player.shield_timer -= dt;
        if player.shield_timer <= 0.0 {
            player.shield_timer = 0.0;
            player.shield_charges = 0;
        }
    }
}
