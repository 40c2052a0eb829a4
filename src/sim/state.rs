//! Game state and core simulation types
//!
//! Everything the tick function mutates lives on `GameState`; the sim has no
//! module-level state. Entities are plain data updated in a fixed per-frame
//! order, and all randomness flows through the seeded `Pcg32`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::feedback::Feedback;
use super::pool::Pool;
use super::wave::Spawner;
use super::weapons::{LaserHeat, WeaponId};
use crate::audio::SoundQueue;
use crate::consts::*;
use crate::heading_vec;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    #[default]
    Playing,
    Paused,
    /// Terminal; only restart acts
    GameOver,
}

/// Dash is either inactive (cooldown may still be running) or committed to a
/// fixed direction for a short burst.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum DashState {
    #[default]
    Inactive,
    Active { timer: f32, dir: Vec2 },
}

/// Afterimage snapshot recorded while dashing
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ghost {
    pub pos: Vec2,
    pub angle: f32,
    pub alpha: f32,
    pub age: f32,
}

/// What a damage attempt did to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Invulnerable or dashing; nothing changed
    Ignored,
    /// A shield charge absorbed the hit; hp untouched
    Shielded,
    /// Hp reduced, still alive
    Hurt,
    /// Hp crossed to zero this call
    Died,
}

/// The player avatar. Single instance, recreated on restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Facing angle toward the aim target
    pub angle: f32,
    pub radius: f32,
    pub speed: f32,
    pub hp: f32,
    pub max_hp: f32,
    /// Invulnerability seconds remaining
    pub invulnerable: f32,
    pub dash: DashState,
    /// Seconds until dash can trigger again
    pub dash_cooldown: f32,
    pub shield_charges: u8,
    pub shield_timer: f32,
    /// Barrel kickback for rendering, decays fast
    pub recoil: f32,
    /// Seconds until the held trigger fires again
    pub fire_cooldown: f32,
    /// Dash afterimages, newest last, capped
    #[serde(skip)]
    pub ghosts: Vec<Ghost>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(ARENA_W / 2.0, ARENA_H / 2.0),
            angle: 0.0,
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
            invulnerable: 0.0,
            dash: DashState::Inactive,
            dash_cooldown: 0.0,
            shield_charges: 0,
            shield_timer: 0.0,
            recoil: 0.0,
            fire_cooldown: 0.0,
            ghosts: Vec::with_capacity(GHOST_CAP),
        }
    }
}

impl Player {
    pub fn dashing(&self) -> bool {
        matches!(self.dash, DashState::Active { .. })
    }

    /// Dash trigger. Ignored while active or cooling down. The direction
    /// locks to the current move input, falling back to the facing angle.
    pub fn try_dash(&mut self, move_input: Vec2) -> bool {
        if self.dashing() || self.dash_cooldown > 0.0 {
            return false;
        }
        let dir = if move_input.length_squared() > 0.0001 {
            move_input.normalize()
        } else {
            heading_vec(self.angle)
        };
        self.dash = DashState::Active {
            timer: DASH_DURATION,
            dir,
        };
        self.dash_cooldown = DASH_COOLDOWN;
        self.invulnerable = self.invulnerable.max(DASH_DURATION);
        true
    }

    /// Record an afterimage at the current pose, dropping the oldest past
    /// the cap.
    pub fn record_ghost(&mut self) {
        self.ghosts.push(Ghost {
            pos: self.pos,
            angle: self.angle,
            alpha: 0.6,
            age: 0.0,
        });
        if self.ghosts.len() > GHOST_CAP {
            self.ghosts.remove(0);
        }
    }

    /// Age and fade afterimages; runs even during hitstop.
    pub fn fade_ghosts(&mut self, dt: f32) {
        self.ghosts.retain_mut(|g| {
            g.age += dt;
            g.alpha -= dt * 2.0;
            g.alpha > 0.0
        });
    }

    /// Recoil decay; runs even during hitstop.
    pub fn decay_recoil(&mut self, dt: f32) {
        if self.recoil > 0.0 {
            self.recoil = (self.recoil - dt * 20.0).max(0.0);
        }
    }

    /// Apply incoming damage. Invulnerability (including the dash window)
    /// ignores it; an available shield charge absorbs it and grants brief
    /// invulnerability; otherwise hp drops, clamped to zero.
    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.invulnerable > 0.0 || self.dashing() {
            return DamageOutcome::Ignored;
        }
        if self.shield_charges > 0 {
            self.shield_charges -= 1;
            self.invulnerable = INVULN_TIME;
            return DamageOutcome::Shielded;
        }
        self.hp = (self.hp - amount).max(0.0);
        self.invulnerable = INVULN_TIME;
        if self.hp <= 0.0 {
            DamageOutcome::Died
        } else {
            DamageOutcome::Hurt
        }
    }

    /// Muzzle position just past the avatar edge
    pub fn muzzle(&self) -> Vec2 {
        self.pos + heading_vec(self.angle) * (self.radius + 5.0)
    }
}

/// Player and enemy projectiles share one type, tagged by origin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct Bullet {
    pub pos: Vec2,
    /// Previous position, for motion-trail rendering
    pub prev: Vec2,
    pub angle: f32,
    pub speed: f32,
    pub radius: f32,
    pub damage: f32,
    pub lifetime: f32,
    pub age: f32,
    /// 0 = no splash
    pub splash_radius: f32,
    /// Splash fires at most once per bullet
    pub exploded: bool,
    pub from_enemy: bool,
    pub color: [f32; 4],
}

impl Bullet {
    pub fn advance(&mut self, dt: f32) {
        self.prev = self.pos;
        self.pos += heading_vec(self.angle) * self.speed * dt;
        self.age += dt;
    }

    /// Off the playfield (plus margin) or past lifetime
    pub fn expired(&self) -> bool {
        self.age >= self.lifetime
            || self.pos.x < -OFFSCREEN_MARGIN
            || self.pos.x > ARENA_W + OFFSCREEN_MARGIN
            || self.pos.y < -OFFSCREEN_MARGIN
            || self.pos.y > ARENA_H + OFFSCREEN_MARGIN
    }
}

/// Enemy kinds; each selects a static stats record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EnemyKind {
    #[default]
    Grunt,
    Runner,
    Tank,
    Shooter,
    Swarm,
}

/// Movement strategy selected by the stats table
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveStyle {
    /// Head straight for the player
    Chase,
    /// Approach outside `far`, retreat inside `near`, strafe in between
    Strafe { near: f32, far: f32 },
}

/// Static per-kind behavior record: stats plus movement strategy
#[derive(Debug, Clone, Copy)]
pub struct EnemyStats {
    pub hp: f32,
    pub speed: f32,
    pub radius: f32,
    /// Contact damage to the player
    pub damage: f32,
    /// Base score value, multiplied by the combo on bullet kills
    pub score: u64,
    pub color: [f32; 4],
    pub style: MoveStyle,
    /// Seconds between shots; 0 = never fires
    pub shoot_interval: f32,
}

const GRUNT: EnemyStats = EnemyStats {
    hp: 20.0,
    speed: 90.0,
    radius: 14.0,
    damage: 10.0,
    score: 10,
    color: [1.0, 0.27, 0.27, 1.0],
    style: MoveStyle::Chase,
    shoot_interval: 0.0,
};

const RUNNER: EnemyStats = EnemyStats {
    hp: 10.0,
    speed: 180.0,
    radius: 10.0,
    damage: 8.0,
    score: 15,
    color: [1.0, 0.55, 0.15, 1.0],
    style: MoveStyle::Chase,
    shoot_interval: 0.0,
};

const TANK: EnemyStats = EnemyStats {
    hp: 60.0,
    speed: 50.0,
    radius: 22.0,
    damage: 20.0,
    score: 25,
    color: [0.7, 0.2, 0.8, 1.0],
    style: MoveStyle::Chase,
    shoot_interval: 0.0,
};

const SHOOTER: EnemyStats = EnemyStats {
    hp: 25.0,
    speed: 70.0,
    radius: 13.0,
    damage: 10.0,
    score: 20,
    color: [0.2, 0.8, 0.4, 1.0],
    style: MoveStyle::Strafe {
        near: 260.0,
        far: 380.0,
    },
    shoot_interval: 1.8,
};

const SWARM: EnemyStats = EnemyStats {
    hp: 6.0,
    speed: 150.0,
    radius: 8.0,
    damage: 5.0,
    score: 5,
    color: [1.0, 0.9, 0.3, 1.0],
    style: MoveStyle::Chase,
    shoot_interval: 0.0,
};

impl EnemyKind {
    pub fn stats(self) -> &'static EnemyStats {
        match self {
            EnemyKind::Grunt => &GRUNT,
            EnemyKind::Runner => &RUNNER,
            EnemyKind::Tank => &TANK,
            EnemyKind::Shooter => &SHOOTER,
            EnemyKind::Swarm => &SWARM,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub hp: f32,
    /// White flash seconds after being hit; decays even during hitstop
    pub hit_flash: f32,
    /// Shooter kind only
    pub shoot_cooldown: f32,
    /// Strafe direction, +1 or -1, drawn once at spawn
    pub strafe_dir: f32,
}

impl Enemy {
    /// (Re)initialize a pooled instance for a fresh spawn.
    pub fn init(&mut self, kind: EnemyKind, pos: Vec2, strafe_dir: f32) {
        let stats = kind.stats();
        self.kind = kind;
        self.pos = pos;
        self.hp = stats.hp;
        self.hit_flash = 0.0;
        self.shoot_cooldown = stats.shoot_interval;
        self.strafe_dir = strafe_dir;
    }

    pub fn radius(&self) -> f32 {
        self.kind.stats().radius
    }

    /// Move per the kind's strategy and count down the shoot cooldown.
    /// Returns true when this enemy wants to fire at the player this tick.
    pub fn update(&mut self, player_pos: Vec2, dt: f32) -> bool {
        if self.hit_flash > 0.0 {
            self.hit_flash -= dt;
        }

        let stats = self.kind.stats();
        let to_player = player_pos - self.pos;
        let dist = to_player.length();
        let toward = if dist > 0.0 {
            to_player / dist
        } else {
            Vec2::ZERO
        };

        match stats.style {
            MoveStyle::Chase => {
                self.pos += toward * stats.speed * dt;
            }
            MoveStyle::Strafe { near, far } => {
                let dir = if dist > far {
                    toward
                } else if dist < near {
                    -toward
                } else {
                    // Tangential orbit inside the band
                    Vec2::new(-toward.y, toward.x) * self.strafe_dir
                };
                self.pos += dir * stats.speed * dt;
            }
        }

        if stats.shoot_interval > 0.0 {
            self.shoot_cooldown -= dt;
            if self.shoot_cooldown <= 0.0 {
                self.shoot_cooldown = stats.shoot_interval;
                return true;
            }
        }
        false
    }
}

/// Pure visual spark
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub age: f32,
    pub lifetime: f32,
    pub size: f32,
    pub color: [f32; 4],
}

impl Particle {
    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.vel *= 0.95;
        self.age += dt;
    }

    pub fn dead(&self) -> bool {
        self.age >= self.lifetime
    }
}

/// Expanding ring on kills/explosions; grows even during hitstop
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct Shockwave {
    pub pos: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub age: f32,
    pub lifetime: f32,
}

impl Shockwave {
    pub fn update(&mut self, dt: f32) {
        self.age += dt;
        self.radius = (self.age / self.lifetime) * self.max_radius;
    }

    pub fn dead(&self) -> bool {
        self.age >= self.lifetime
    }
}

/// Rising score/pickup text
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Floater {
    pub pos: Vec2,
    pub text: String,
    pub age: f32,
    pub lifetime: f32,
    pub color: [f32; 4],
}

impl Floater {
    pub fn update(&mut self, dt: f32) {
        self.pos.y -= 40.0 * dt;
        self.age += dt;
    }

    pub fn dead(&self) -> bool {
        self.age >= self.lifetime
    }
}

/// Pickup kinds, drawn from a weighted table on enemy death
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PickupKind {
    #[default]
    Health,
    RapidFire,
    Shield,
    DamageBoost,
    WeaponSwap,
}

impl PickupKind {
    /// Weighted draw for a drop roll that already succeeded.
    pub fn roll(rng: &mut impl Rng) -> Self {
        const TABLE: [(PickupKind, u32); 5] = [
            (PickupKind::Health, 25),
            (PickupKind::RapidFire, 20),
            (PickupKind::DamageBoost, 20),
            (PickupKind::WeaponSwap, 20),
            (PickupKind::Shield, 15),
        ];
        let total: u32 = TABLE.iter().map(|(_, w)| w).sum();
        let mut roll = rng.random_range(0..total);
        for (kind, weight) in TABLE {
            if roll < weight {
                return kind;
            }
            roll -= weight;
        }
        PickupKind::Health
    }

    pub fn label(self) -> &'static str {
        match self {
            PickupKind::Health => "+25 HP",
            PickupKind::RapidFire => "RAPID FIRE",
            PickupKind::Shield => "SHIELD",
            PickupKind::DamageBoost => "DAMAGE UP",
            PickupKind::WeaponSwap => "WEAPON SWAP",
        }
    }

    pub fn color(self) -> [f32; 4] {
        match self {
            PickupKind::Health => [0.3, 1.0, 0.3, 1.0],
            PickupKind::RapidFire => [1.0, 0.85, 0.2, 1.0],
            PickupKind::Shield => [0.3, 0.7, 1.0, 1.0],
            PickupKind::DamageBoost => [1.0, 0.4, 0.4, 1.0],
            PickupKind::WeaponSwap => [0.8, 0.5, 1.0, 1.0],
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct Pickup {
    pub kind: PickupKind,
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Pickup {
    /// Light inward drift toward the player within the attraction radius.
    pub fn update(&mut self, player_pos: Vec2, dt: f32) {
        let to_player = player_pos - self.pos;
        let dist = to_player.length();
        if dist > 0.0 && dist < PICKUP_ATTRACT_RADIUS {
            self.vel += (to_player / dist) * PICKUP_DRIFT_ACCEL * dt;
        }
        self.vel *= 0.98;
        self.pos += self.vel * dt;
    }
}

/// Timed buff countdowns
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Buffs {
    pub rapid_fire: f32,
    pub damage_boost: f32,
}

impl Buffs {
    pub fn fire_interval_mult(&self) -> f32 {
        if self.rapid_fire > 0.0 {
            RAPID_FIRE_MULT
        } else {
            1.0
        }
    }

    pub fn damage_mult(&self) -> f32 {
        if self.damage_boost > 0.0 {
            DAMAGE_BOOST_MULT
        } else {
            1.0
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.rapid_fire = (self.rapid_fire - dt).max(0.0);
        self.damage_boost = (self.damage_boost - dt).max(0.0);
    }
}

/// Temporary weapon override from a pickup; outranks the selected weapon
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeaponOverride {
    pub weapon: WeaponId,
    pub timer: f32,
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip, default = "default_rng")]
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    pub wave: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub bullets: Pool<Bullet>,
    pub enemies: Pool<Enemy>,
    pub particles: Pool<Particle>,
    pub shockwaves: Pool<Shockwave>,
    pub floaters: Pool<Floater>,
    pub pickups: Pool<Pickup>,
    /// Persistently selected weapon (slots 1-4)
    pub weapon: WeaponId,
    pub weapon_override: Option<WeaponOverride>,
    pub laser: LaserHeat,
    /// Beam segment fired this tick, for rendering
    #[serde(skip)]
    pub laser_beam: Option<(Vec2, Vec2)>,
    pub buffs: Buffs,
    pub spawner: Spawner,
    pub feedback: Feedback,
    /// Sound triggers for the external audio collaborator
    #[serde(skip)]
    pub sounds: SoundQueue,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            score: 0,
            wave: 1,
            time_ticks: 0,
            player: Player::default(),
            bullets: Pool::new(MAX_BULLETS),
            enemies: Pool::new(MAX_ENEMIES),
            particles: Pool::new(MAX_PARTICLES),
            shockwaves: Pool::new(MAX_SHOCKWAVES),
            floaters: Pool::new(MAX_FLOATERS),
            pickups: Pool::new(MAX_PICKUPS),
            weapon: WeaponId::Blaster,
            weapon_override: None,
            laser: LaserHeat::default(),
            laser_beam: None,
            buffs: Buffs::default(),
            spawner: Spawner::default(),
            feedback: Feedback::default(),
            sounds: SoundQueue::default(),
        }
    }

    /// Full reset to initial values with a fresh seed. Pools keep their
    /// recycled storage.
    pub fn restart(&mut self, seed: u64) {
        log::info!("restart: seed={seed}");
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.wave = 1;
        self.time_ticks = 0;
        self.player = Player::default();
        self.bullets.clear();
        self.enemies.clear();
        self.particles.clear();
        self.shockwaves.clear();
        self.floaters.clear();
        self.pickups.clear();
        self.weapon = WeaponId::Blaster;
        self.weapon_override = None;
        self.laser = LaserHeat::default();
        self.laser_beam = None;
        self.buffs = Buffs::default();
        self.spawner = Spawner::default();
        self.feedback = Feedback::default();
        self.sounds.clear();
    }

    /// The weapon actually firing: a live override outranks the selection.
    pub fn active_weapon(&self) -> WeaponId {
        match self.weapon_override {
            Some(ov) if ov.timer > 0.0 => ov.weapon,
            _ => self.weapon,
        }
    }

    /// Radial spark burst. Overflow past the pool cap is dropped.
    pub fn burst_particles(&mut self, pos: Vec2, count: usize, color: [f32; 4]) {
        let Self { rng, particles, .. } = self;
        for _ in 0..count {
            let angle = rng.random::<f32>() * std::f32::consts::TAU;
            let speed = 60.0 + rng.random::<f32>() * 180.0;
            let lifetime = 0.3 + rng.random::<f32>() * 0.4;
            particles.spawn(Particle::default, |p| {
                p.pos = pos;
                p.vel = Vec2::from_angle(angle) * speed;
                p.age = 0.0;
                p.lifetime = lifetime;
                p.size = 2.0 + rng.random::<f32>() * 2.0;
                p.color = color;
            });
        }
    }

    pub fn spawn_shockwave(&mut self, pos: Vec2, max_radius: f32, lifetime: f32) {
        self.shockwaves.spawn(Shockwave::default, |s| {
            s.pos = pos;
            s.radius = 0.0;
            s.max_radius = max_radius;
            s.age = 0.0;
            s.lifetime = lifetime;
        });
    }

    pub fn spawn_floater(&mut self, pos: Vec2, text: String, color: [f32; 4]) {
        self.floaters.spawn(Floater::default, |f| {
            f.pos = pos;
            f.text = text;
            f.age = 0.0;
            f.lifetime = 1.0;
            f.color = color;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_take_damage_clamps_and_reports_death() {
        let mut player = Player::default();
        player.hp = 10.0;
        assert_eq!(player.take_damage(18.0), DamageOutcome::Died);
        assert_eq!(player.hp, 0.0);
    }

    #[test]
    fn test_take_damage_ignored_while_invulnerable() {
        let mut player = Player::default();
        player.invulnerable = 0.5;
        assert_eq!(player.take_damage(50.0), DamageOutcome::Ignored);
        assert_eq!(player.hp, PLAYER_MAX_HP);
    }

    #[test]
    fn test_take_damage_ignored_while_dashing() {
        let mut player = Player::default();
        assert!(player.try_dash(Vec2::new(1.0, 0.0)));
        assert_eq!(player.take_damage(50.0), DamageOutcome::Ignored);
        assert_eq!(player.hp, PLAYER_MAX_HP);
    }

    #[test]
    fn test_shield_absorbs_without_hp_loss() {
        let mut player = Player::default();
        player.shield_charges = 2;
        assert_eq!(player.take_damage(40.0), DamageOutcome::Shielded);
        assert_eq!(player.hp, PLAYER_MAX_HP);
        assert_eq!(player.shield_charges, 1);
        // Shield hit also grants the standard invulnerability window
        assert!(player.invulnerable > 0.0);
    }

    #[test]
    fn test_dash_blocked_on_cooldown() {
        let mut player = Player::default();
        assert!(player.try_dash(Vec2::ZERO));
        // Finish the dash but leave the cooldown running
        player.dash = DashState::Inactive;
        assert!(player.dash_cooldown > 0.0);
        assert!(!player.try_dash(Vec2::ZERO));
    }

    #[test]
    fn test_dash_direction_falls_back_to_facing() {
        let mut player = Player::default();
        player.angle = std::f32::consts::FRAC_PI_2;
        assert!(player.try_dash(Vec2::ZERO));
        match player.dash {
            DashState::Active { dir, .. } => {
                assert!(dir.x.abs() < 1e-5);
                assert!((dir.y - 1.0).abs() < 1e-5);
            }
            DashState::Inactive => panic!("dash did not activate"),
        }
    }

    #[test]
    fn test_ghost_cap() {
        let mut player = Player::default();
        for _ in 0..20 {
            player.record_ghost();
        }
        assert_eq!(player.ghosts.len(), GHOST_CAP);
    }

    #[test]
    fn test_bullet_expiry() {
        let mut b = Bullet {
            pos: Vec2::new(100.0, 100.0),
            lifetime: BULLET_LIFETIME,
            ..Default::default()
        };
        assert!(!b.expired());
        b.age = BULLET_LIFETIME;
        assert!(b.expired());
        b.age = 0.0;
        b.pos.x = -OFFSCREEN_MARGIN - 1.0;
        assert!(b.expired());
    }

    #[test]
    fn test_shooter_strafes_inside_band() {
        let player_pos = Vec2::new(640.0, 360.0);
        let mut e = Enemy::default();
        e.init(EnemyKind::Shooter, player_pos + Vec2::new(300.0, 0.0), 1.0);

        let before = (e.pos - player_pos).length();
        e.update(player_pos, 0.016);
        let after = (e.pos - player_pos).length();
        // Inside the band the shooter orbits; range barely changes
        assert!((after - before).abs() < 1.0);

        // Outside the band it closes in
        e.pos = player_pos + Vec2::new(500.0, 0.0);
        let before = (e.pos - player_pos).length();
        e.update(player_pos, 0.016);
        assert!((e.pos - player_pos).length() < before);

        // Too close, it backs off
        e.pos = player_pos + Vec2::new(100.0, 0.0);
        let before = (e.pos - player_pos).length();
        e.update(player_pos, 0.016);
        assert!((e.pos - player_pos).length() > before);
    }

    #[test]
    fn test_shooter_fire_cadence() {
        let player_pos = Vec2::new(640.0, 360.0);
        let mut e = Enemy::default();
        e.init(EnemyKind::Shooter, player_pos + Vec2::new(300.0, 0.0), 1.0);
        let interval = EnemyKind::Shooter.stats().shoot_interval;

        let mut fired = 0;
        let mut t = 0.0;
        while t < interval * 3.5 {
            if e.update(player_pos, 0.05) {
                fired += 1;
            }
            t += 0.05;
        }
        assert_eq!(fired, 3);
    }

    #[test]
    fn test_grunts_never_fire() {
        let mut e = Enemy::default();
        e.init(EnemyKind::Grunt, Vec2::ZERO, 1.0);
        for _ in 0..1000 {
            assert!(!e.update(Vec2::new(500.0, 0.0), 0.05));
        }
    }

    #[test]
    fn test_pickup_drifts_only_within_attraction_radius() {
        let player_pos = Vec2::new(640.0, 360.0);
        let mut near = Pickup {
            kind: PickupKind::Health,
            pos: player_pos + Vec2::new(PICKUP_ATTRACT_RADIUS - 10.0, 0.0),
            vel: Vec2::ZERO,
        };
        let mut far = Pickup {
            kind: PickupKind::Health,
            pos: player_pos + Vec2::new(PICKUP_ATTRACT_RADIUS + 100.0, 0.0),
            vel: Vec2::ZERO,
        };
        near.update(player_pos, 0.016);
        far.update(player_pos, 0.016);
        assert!(near.vel.length() > 0.0);
        assert_eq!(far.vel, Vec2::ZERO);
    }

    #[test]
    fn test_active_weapon_prefers_live_override() {
        let mut state = GameState::new(1);
        state.weapon = WeaponId::Spreader;
        assert_eq!(state.active_weapon(), WeaponId::Spreader);
        state.weapon_override = Some(WeaponOverride {
            weapon: WeaponId::Rocket,
            timer: 5.0,
        });
        assert_eq!(state.active_weapon(), WeaponId::Rocket);
        state.weapon_override = Some(WeaponOverride {
            weapon: WeaponId::Rocket,
            timer: 0.0,
        });
        assert_eq!(state.active_weapon(), WeaponId::Spreader);
    }

    #[test]
    fn test_pickup_roll_covers_table() {
        let mut rng = rand_pcg::Pcg32::seed_from_u64(42);
        let mut seen = [false; 5];
        for _ in 0..500 {
            let idx = match PickupKind::roll(&mut rng) {
                PickupKind::Health => 0,
                PickupKind::RapidFire => 1,
                PickupKind::Shield => 2,
                PickupKind::DamageBoost => 3,
                PickupKind::WeaponSwap => 4,
            };
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
