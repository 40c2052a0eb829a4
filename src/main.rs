//! Neon Horde entry point
//!
//! Headless demo driver: runs the deterministic simulation under a simple
//! autopilot for a fixed number of frames and prints a JSON run summary.
//! Rendering and input backends plug in through `scene::build_scene` and
//! `TickInput`; this binary exercises the full loop without either.

use glam::Vec2;
use serde::Serialize;

use neon_horde::consts::*;
use neon_horde::scene::build_scene;
use neon_horde::sim::{tick, GamePhase, GameState, TickInput, WeaponId};
use neon_horde::Settings;

const SIM_DT: f32 = 1.0 / 60.0;

#[derive(Serialize)]
struct RunSummary {
    seed: u64,
    frames: u64,
    score: u64,
    wave: u32,
    hp: f32,
    max_combo: u32,
    game_over: bool,
}

/// Steer toward the playfield center, aim at the nearest enemy, hold fire,
/// and dash away from anything about to ram us.
fn autopilot(state: &GameState, frame: u32) -> TickInput {
    let player = state.player.pos;

    let nearest = state
        .enemies
        .iter()
        .min_by(|a, b| {
            a.pos
                .distance_squared(player)
                .partial_cmp(&b.pos.distance_squared(player))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|e| e.pos);

    let aim = nearest.unwrap_or(Vec2::new(ARENA_W, ARENA_H / 2.0));

    // drift back toward the middle so edge spawns cannot pin us
    let center = Vec2::new(ARENA_W / 2.0, ARENA_H / 2.0);
    let to_center = center - player;
    let (move_x, move_y) = if to_center.length() > 120.0 {
        let dir = to_center.normalize();
        (dir.x, dir.y)
    } else {
        (0.0, 0.0)
    };

    let threatened = nearest.is_some_and(|pos| pos.distance(player) < 60.0);

    TickInput {
        move_x,
        move_y,
        aim,
        fire: true,
        dash: threatened,
        // cycle weapons now and then to exercise all four
        select_weapon: if frame % 900 == 0 && frame > 0 {
            WeaponId::from_slot((frame / 900 % 4 + 1) as u8)
        } else {
            None
        },
        ..TickInput::default()
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    let frames: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(3600);

    let settings = Settings::load();
    let mut state = GameState::new(seed);
    log::info!("neon horde: seed={seed}, frames={frames}");

    let mut max_combo = 0;
    for frame in 0..frames {
        let input = autopilot(&state, frame);
        tick(&mut state, &input, SIM_DT);
        max_combo = max_combo.max(state.feedback.combo);

        // drain sound triggers the way an audio backend would
        for event in state.sounds.drain() {
            log::debug!("sound: {:?} pitch={:.0}", event.kind, event.pitch);
        }

        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    // prove the render path works end to end
    let scene = build_scene(&state, &settings);
    log::info!("final scene: {} draw commands", scene.draws.len());

    let summary = RunSummary {
        seed,
        frames: state.time_ticks,
        score: state.score,
        wave: state.wave,
        hp: state.player.hp,
        max_combo,
        game_over: state.phase == GamePhase::GameOver,
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("failed to serialize run summary: {e}"),
    }
}
