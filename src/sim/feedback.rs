//! Screen shake, hitstop and combo bookkeeping
//!
//! All three are plain countdown state mutated once per tick; the hitstop
//! freeze itself is enforced by the frame driver, which switches to
//! decay-only updates while the countdown is positive.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{COMBO_RESET_TIME, SHAKE_DECAY};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Feedback {
    /// Render offset accumulator, nudged on impacts, decays geometrically
    pub shake: Vec2,
    /// Seconds of gameplay freeze remaining
    pub hitstop: f32,
    /// Consecutive-kill streak
    pub combo: u32,
    /// Seconds until the streak resets
    pub combo_timer: f32,
}

impl Feedback {
    /// Nudge the shake accumulator by a random offset scaled by `intensity`.
    pub fn add_shake(&mut self, rng: &mut impl Rng, intensity: f32) {
        self.shake.x += (rng.random::<f32>() - 0.5) * intensity * 2.0;
        self.shake.y += (rng.random::<f32>() - 0.5) * intensity * 2.0;
    }

    /// Geometric decay toward zero, snapped once it is imperceptible.
    pub fn decay_shake(&mut self) {
        self.shake *= SHAKE_DECAY;
        if self.shake.length_squared() < 0.01 * 0.01 {
            self.shake = Vec2::ZERO;
        }
    }

    /// Request a freeze; overlapping requests extend, never stack.
    pub fn request_hitstop(&mut self, seconds: f32) {
        self.hitstop = self.hitstop.max(seconds);
    }

    pub fn frozen(&self) -> bool {
        self.hitstop > 0.0
    }

    /// Count down the combo window; zero-crossing zeroes the streak.
    pub fn tick_combo(&mut self, dt: f32) {
        if self.combo_timer > 0.0 {
            self.combo_timer -= dt;
            if self.combo_timer <= 0.0 {
                self.combo = 0;
                self.combo_timer = 0.0;
            }
        }
    }

    /// A kill extends the streak and rewinds the reset window.
    pub fn on_kill(&mut self) {
        self.combo += 1;
        self.combo_timer = COMBO_RESET_TIME;
    }

    /// Unshielded player damage ends the streak immediately.
    pub fn break_combo(&mut self) {
        self.combo = 0;
        self.combo_timer = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_combo_resets_on_timer_expiry() {
        let mut fb = Feedback::default();
        fb.on_kill();
        fb.on_kill();
        assert_eq!(fb.combo, 2);

        fb.tick_combo(COMBO_RESET_TIME - 0.1);
        assert_eq!(fb.combo, 2);
        fb.tick_combo(0.2);
        assert_eq!(fb.combo, 0);
        assert_eq!(fb.combo_timer, 0.0);
    }

    #[test]
    fn test_break_combo_is_immediate() {
        let mut fb = Feedback::default();
        fb.on_kill();
        fb.break_combo();
        assert_eq!(fb.combo, 0);
        // A later timer tick must not underflow or revive anything
        fb.tick_combo(1.0);
        assert_eq!(fb.combo, 0);
    }

    #[test]
    fn test_shake_decays_to_exact_zero() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut fb = Feedback::default();
        fb.add_shake(&mut rng, 12.0);
        assert!(fb.shake.length() > 0.0);
        for _ in 0..500 {
            fb.decay_shake();
        }
        assert_eq!(fb.shake, Vec2::ZERO);
    }

    #[test]
    fn test_hitstop_extends_not_stacks() {
        let mut fb = Feedback::default();
        fb.request_hitstop(0.05);
        fb.request_hitstop(0.03);
        assert!((fb.hitstop - 0.05).abs() < 1e-6);
    }

    proptest! {
        /// The streak never exceeds the number of kills since the last
        /// reset, for any interleaving of kills, damage, and elapsed time.
        #[test]
        fn prop_combo_bounded_by_kills(events in prop::collection::vec(0u8..3, 0..100)) {
            let mut fb = Feedback::default();
            let mut kills_since_reset = 0u32;
            for ev in events {
                match ev {
                    0 => {
                        fb.on_kill();
                        kills_since_reset += 1;
                    }
                    1 => {
                        fb.break_combo();
                        kills_since_reset = 0;
                    }
                    _ => {
                        fb.tick_combo(0.5);
                        if fb.combo == 0 {
                            kills_since_reset = 0;
                        }
                    }
                }
                prop_assert!(fb.combo <= kills_since_reset);
            }
        }
    }
}
