//! Collision resolution and combat outcomes
//!
//! Runs once per tick in a fixed order: player bullets against enemies,
//! enemy bullets against the player, enemy bodies against the player, then
//! pickups. All checks are circle overlaps; splash damage from explosive
//! bullets is resolved inline, capped per frame so a rocket volley cannot
//! flood the pools.

use glam::Vec2;
use rand::Rng;

use super::state::{DamageOutcome, GamePhase, GameState, PickupKind};
use super::weapons::WeaponId;
use crate::audio::SoundKind;
use crate::consts::*;

/// Resolve every collision pair for this tick. `analog_aim` widens bullet
/// hit circles slightly as a gamepad assist.
pub fn resolve(state: &mut GameState, analog_aim: bool) {
    let mut explosions = 0u32;
    player_bullets_vs_enemies(state, analog_aim, &mut explosions);
    enemy_bullets_vs_player(state);
    enemies_vs_player(state);
    pickups_vs_player(state);
}

fn assist_bonus(analog_aim: bool) -> f32 {
    if analog_aim { ASSIST_HIT_BONUS } else { 0.0 }
}

fn player_bullets_vs_enemies(state: &mut GameState, analog_aim: bool, explosions: &mut u32) {
    let bonus = assist_bonus(analog_aim);
    let mut i = 0;
    while i < state.bullets.len() {
        let b = state.bullets.as_slice()[i];
        if b.from_enemy {
            i += 1;
            continue;
        }
        let hit = (0..state.enemies.len()).find(|&j| {
            let e = &state.enemies.as_slice()[j];
            b.pos.distance(e.pos) < b.radius + e.radius() + bonus
        });
        let Some(j) = hit else {
            i += 1;
            continue;
        };

        {
            let e = state.enemies.get_mut(j).unwrap();
            e.hp -= b.damage;
            e.hit_flash = 0.1;
        }
        if b.splash_radius > 0.0 && !b.exploded && *explosions < MAX_EXPLOSIONS_PER_FRAME {
            state.bullets.get_mut(i).unwrap().exploded = true;
            *explosions += 1;
            explode(state, b.pos, b.splash_radius, b.damage * 0.5, j);
        }
        state.bullets.release(i);
        reap_dead_enemies(state);
        // bullet i was swap-removed; re-check the same slot
    }
}

/// Area damage around an impact point. The direct target already took full
/// damage and is excluded here.
fn explode(state: &mut GameState, center: Vec2, radius: f32, damage: f32, direct: usize) {
    for k in 0..state.enemies.len() {
        if k == direct {
            continue;
        }
        let e = state.enemies.get_mut(k).unwrap();
        if center.distance(e.pos) < radius + e.radius() {
            e.hp -= damage;
            e.hit_flash = 0.1;
        }
    }
    state.spawn_shockwave(center, radius, 0.35);
    state.burst_particles(center, 14, [1.0, 0.6, 0.2, 1.0]);
}

/// Sweep enemies whose hp reached zero and pay out kill rewards. Safe to
/// call mid-resolution; indices are re-walked after every removal.
pub fn reap_dead_enemies(state: &mut GameState) {
    let mut j = 0;
    while j < state.enemies.len() {
        let e = state.enemies.as_slice()[j];
        if e.hp > 0.0 {
            j += 1;
            continue;
        }
        state.enemies.release(j);
        let stats = e.kind.stats();
        award_kill(state, e.pos, stats.score, stats.color);
    }
}

fn award_kill(state: &mut GameState, pos: Vec2, base_score: u64, color: [f32; 4]) {
    state.feedback.on_kill();
    let gained = base_score * u64::from(state.feedback.combo);
    state.score += gained;
    state.burst_particles(pos, 12, color);
    state.spawn_floater(pos, format!("+{gained}"), [1.0, 1.0, 0.6, 1.0]);
    state.feedback.request_hitstop(HITSTOP_KILL);
    state.feedback.add_shake(&mut state.rng, 12.0);
    let detune = state.rng.random::<f32>() * 40.0 - 20.0;
    state.sounds.push_detuned(SoundKind::Kill, detune);
    if state.rng.random::<f32>() < PICKUP_DROP_CHANCE {
        let kind = PickupKind::roll(&mut state.rng);
        state.pickups.spawn(Default::default, |p| {
            p.kind = kind;
            p.pos = pos;
            p.vel = Vec2::ZERO;
        });
    }
}

fn enemy_bullets_vs_player(state: &mut GameState) {
    let mut i = 0;
    while i < state.bullets.len() {
        let b = state.bullets.as_slice()[i];
        if !b.from_enemy {
            i += 1;
            continue;
        }
        if b.pos.distance(state.player.pos) >= b.radius + state.player.radius {
            i += 1;
            continue;
        }
        state.bullets.release(i);
        hurt_player(state, b.damage);
    }
}

/// Apply damage to the player and fan out the feedback for the outcome.
fn hurt_player(state: &mut GameState, amount: f32) -> DamageOutcome {
    let outcome = state.player.take_damage(amount);
    match outcome {
        DamageOutcome::Ignored => {}
        DamageOutcome::Shielded => {
            state.feedback.add_shake(&mut state.rng, 4.0);
            state.sounds.push(SoundKind::Shield);
        }
        DamageOutcome::Hurt => {
            state.feedback.break_combo();
            state.feedback.request_hitstop(HITSTOP_HURT);
            state.feedback.add_shake(&mut state.rng, 6.0);
            state.sounds.push(SoundKind::Hurt);
        }
        DamageOutcome::Died => {
            state.feedback.break_combo();
            state.feedback.add_shake(&mut state.rng, 16.0);
            let pos = state.player.pos;
            state.burst_particles(pos, 40, [0.4, 0.9, 1.0, 1.0]);
            state.phase = GamePhase::GameOver;
            state.sounds.push(SoundKind::GameOver);
            log::info!(
                "game over: score={} wave={} ticks={}",
                state.score,
                state.wave,
                state.time_ticks
            );
        }
    }
    outcome
}

fn enemies_vs_player(state: &mut GameState) {
    let mut j = 0;
    while j < state.enemies.len() {
        let e = state.enemies.as_slice()[j];
        if e.pos.distance(state.player.pos) >= e.radius() + state.player.radius {
            j += 1;
            continue;
        }
        state.enemies.release(j);
        let stats = e.kind.stats();
        hurt_player(state, stats.damage);
        // ramming an enemy always breaks the combo, even through i-frames
        state.feedback.break_combo();
        // flat score, no combo multiplier
        state.score += stats.score;
        state.burst_particles(e.pos, 16, stats.color);
        state.spawn_floater(e.pos, format!("+{}", stats.score), [1.0, 1.0, 0.6, 1.0]);
    }
}

fn pickups_vs_player(state: &mut GameState) {
    let mut i = 0;
    while i < state.pickups.len() {
        let p = state.pickups.as_slice()[i];
        if p.pos.distance(state.player.pos) >= PICKUP_RADIUS + state.player.radius {
            i += 1;
            continue;
        }
        state.pickups.release(i);
        apply_pickup(state, p.kind, p.pos);
    }
}

fn apply_pickup(state: &mut GameState, kind: PickupKind, pos: Vec2) {
    match kind {
        PickupKind::Health => {
            let player = &mut state.player;
            player.hp = (player.hp + 25.0).min(player.max_hp);
        }
        PickupKind::RapidFire => state.buffs.rapid_fire = RAPID_FIRE_DURATION,
        PickupKind::DamageBoost => state.buffs.damage_boost = DAMAGE_BOOST_DURATION,
        PickupKind::Shield => {
            let player = &mut state.player;
            player.shield_charges = (player.shield_charges + 1).min(SHIELD_MAX_CHARGES);
            player.shield_timer = SHIELD_DURATION;
        }
        PickupKind::WeaponSwap => {
            let current = state.active_weapon();
            let choices: Vec<WeaponId> = WeaponId::ALL
                .iter()
                .copied()
                .filter(|&w| w != current)
                .collect();
            let weapon = choices[state.rng.random_range(0..choices.len())];
            state.weapon_override = Some(super::state::WeaponOverride {
                weapon,
                timer: WEAPON_OVERRIDE_DURATION,
            });
        }
    }
    state.spawn_floater(pos, kind.label().to_string(), kind.color());
    state.sounds.push(SoundKind::PickupCollect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Bullet, Enemy, EnemyKind};
    use crate::sim::weapons::WeaponSpec;

    fn spawn_enemy(state: &mut GameState, kind: EnemyKind, pos: Vec2) {
        state.enemies.spawn(Enemy::default, |e| {
            e.init(kind, pos, 1.0);
        });
    }

    fn spawn_player_bullet(state: &mut GameState, pos: Vec2, spec: &WeaponSpec) {
        let spec = *spec;
        state.bullets.spawn(Bullet::default, |b| {
            b.pos = pos;
            b.prev = pos;
            b.angle = 0.0;
            b.speed = spec.bullet_speed;
            b.radius = spec.bullet_radius;
            b.damage = spec.damage;
            b.lifetime = BULLET_LIFETIME;
            b.age = 0.0;
            b.splash_radius = spec.splash_radius;
            b.exploded = false;
            b.from_enemy = false;
            b.color = spec.color;
        });
    }

    #[test]
    fn test_bullet_kills_weak_enemy_and_scores_with_combo() {
        let mut state = GameState::new(7);
        let pos = Vec2::new(400.0, 300.0);
        spawn_enemy(&mut state, EnemyKind::Grunt, pos);
        state.enemies.get_mut(0).unwrap().hp = 1.0;
        spawn_player_bullet(&mut state, pos, WeaponId::Blaster.spec());

        resolve(&mut state, false);

        assert_eq!(state.enemies.len(), 0);
        assert_eq!(state.bullets.len(), 0);
        assert_eq!(state.feedback.combo, 1);
        assert_eq!(state.score, 10);
        assert!(state.feedback.hitstop > 0.0);
    }

    #[test]
    fn test_lethal_contact_clamps_hp_and_ends_run() {
        let mut state = GameState::new(7);
        state.player.hp = 10.0;
        let player_pos = state.player.pos;
        spawn_enemy(&mut state, EnemyKind::Tank, player_pos);

        resolve(&mut state, false);

        assert_eq!(state.player.hp, 0.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.enemies.len(), 0);
    }

    #[test]
    fn test_splash_damages_neighbors_at_half_with_one_shockwave() {
        let mut state = GameState::new(7);
        let center = Vec2::new(500.0, 360.0);
        spawn_enemy(&mut state, EnemyKind::Grunt, center);
        spawn_enemy(&mut state, EnemyKind::Grunt, center + Vec2::new(30.0, 0.0));
        spawn_enemy(&mut state, EnemyKind::Grunt, center + Vec2::new(0.0, 30.0));
        for j in 0..3 {
            state.enemies.get_mut(j).unwrap().hp = 100.0;
        }
        spawn_player_bullet(&mut state, center, WeaponId::Rocket.spec());

        resolve(&mut state, false);

        assert_eq!(state.enemies.len(), 3);
        assert_eq!(state.enemies.as_slice()[0].hp, 75.0);
        assert_eq!(state.enemies.as_slice()[1].hp, 87.5);
        assert_eq!(state.enemies.as_slice()[2].hp, 87.5);
        assert_eq!(state.shockwaves.len(), 1);
        assert_eq!(state.bullets.len(), 0);
    }

    #[test]
    fn test_explosions_capped_per_frame() {
        let mut state = GameState::new(7);
        for n in 0..5 {
            let pos = Vec2::new(100.0 + n as f32 * 220.0, 360.0);
            spawn_enemy(&mut state, EnemyKind::Grunt, pos);
            state.enemies.get_mut(n).unwrap().hp = 1000.0;
            spawn_player_bullet(&mut state, pos, WeaponId::Rocket.spec());
        }

        resolve(&mut state, false);

        // every bullet landed, but only the capped count exploded
        assert_eq!(state.bullets.len(), 0);
        assert_eq!(state.shockwaves.len(), MAX_EXPLOSIONS_PER_FRAME as usize);
        let full_hits = state
            .enemies
            .iter()
            .filter(|e| e.hp == 1000.0 - WeaponId::Rocket.spec().damage)
            .count();
        assert_eq!(full_hits, 5);
    }

    #[test]
    fn test_assist_widens_hit_circle() {
        let spec = WeaponId::Blaster.spec();
        let grunt_radius = EnemyKind::Grunt.stats().radius;
        let gap = spec.bullet_radius + grunt_radius + 1.0;

        let mut state = GameState::new(7);
        spawn_enemy(&mut state, EnemyKind::Grunt, Vec2::new(400.0, 300.0));
        spawn_player_bullet(&mut state, Vec2::new(400.0 + gap, 300.0), spec);
        resolve(&mut state, false);
        assert_eq!(state.bullets.len(), 1, "miss without assist");

        let mut state = GameState::new(7);
        spawn_enemy(&mut state, EnemyKind::Grunt, Vec2::new(400.0, 300.0));
        spawn_player_bullet(&mut state, Vec2::new(400.0 + gap, 300.0), spec);
        resolve(&mut state, true);
        assert_eq!(state.bullets.len(), 0, "hit with assist");
    }

    #[test]
    fn test_enemy_bullet_removed_while_invulnerable() {
        let mut state = GameState::new(7);
        state.player.invulnerable = 0.5;
        let hp = state.player.hp;
        let pos = state.player.pos;
        state.bullets.spawn(Bullet::default, |b| {
            b.pos = pos;
            b.radius = 5.0;
            b.damage = 10.0;
            b.from_enemy = true;
            b.lifetime = BULLET_LIFETIME;
        });

        resolve(&mut state, false);

        assert_eq!(state.bullets.len(), 0);
        assert_eq!(state.player.hp, hp);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_shielded_hit_consumes_charge_not_hp() {
        let mut state = GameState::new(7);
        state.player.shield_charges = 2;
        state.player.shield_timer = 5.0;
        let hp = state.player.hp;
        let pos = state.player.pos;
        state.bullets.spawn(Bullet::default, |b| {
            b.pos = pos;
            b.radius = 5.0;
            b.damage = 10.0;
            b.from_enemy = true;
            b.lifetime = BULLET_LIFETIME;
        });

        resolve(&mut state, false);

        assert_eq!(state.player.hp, hp);
        assert_eq!(state.player.shield_charges, 1);
    }

    #[test]
    fn test_contact_breaks_combo_and_scores_flat() {
        let mut state = GameState::new(7);
        state.feedback.combo = 6;
        let player_pos = state.player.pos;
        spawn_enemy(&mut state, EnemyKind::Grunt, player_pos);

        resolve(&mut state, false);

        assert_eq!(state.feedback.combo, 0);
        assert_eq!(state.score, EnemyKind::Grunt.stats().score);
        assert_eq!(state.enemies.len(), 0);
    }

    #[test]
    fn test_health_pickup_clamps_to_max() {
        let mut state = GameState::new(7);
        state.player.hp = 90.0;
        let pos = state.player.pos;
        state.pickups.spawn(Default::default, |p| {
            p.kind = PickupKind::Health;
            p.pos = pos;
        });

        resolve(&mut state, false);

        assert_eq!(state.pickups.len(), 0);
        assert_eq!(state.player.hp, state.player.max_hp);
    }

    #[test]
    fn test_weapon_swap_overrides_with_different_weapon() {
        let mut state = GameState::new(7);
        let pos = state.player.pos;
        state.pickups.spawn(Default::default, |p| {
            p.kind = PickupKind::WeaponSwap;
            p.pos = pos;
        });

        resolve(&mut state, false);

        let ov = state.weapon_override.expect("override set");
        assert_ne!(ov.weapon, WeaponId::Blaster);
        assert_eq!(ov.timer, WEAPON_OVERRIDE_DURATION);
        assert_eq!(state.active_weapon(), ov.weapon);
    }
}
