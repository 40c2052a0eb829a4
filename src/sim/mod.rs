//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (pool live lists)
//! - No rendering or platform dependencies

pub mod collision;
pub mod feedback;
pub mod pool;
pub mod state;
pub mod tick;
pub mod wave;
pub mod weapons;

pub use feedback::Feedback;
pub use pool::Pool;
pub use state::{
    Bullet, DamageOutcome, DashState, Enemy, EnemyKind, GamePhase, GameState, Particle, Pickup,
    PickupKind, Player, Shockwave,
};
pub use tick::{tick, TickInput};
pub use wave::Spawner;
pub use weapons::{LaserHeat, WeaponId, WeaponSpec};
