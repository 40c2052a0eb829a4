//! Sound event queue for the external audio backend
//!
//! The sim never synthesizes audio; it tags discrete events with a kind and
//! suggested pitch/duration/volume, and the audio collaborator drains the
//! queue each frame. Muting and spam throttling belong to that collaborator.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundKind {
    /// Weapon discharge
    Shoot,
    /// Enemy destroyed
    Kill,
    /// Player took hp damage
    Hurt,
    /// Shield charge absorbed a hit
    Shield,
    Dash,
    PickupCollect,
    /// New wave announced
    WaveStart,
    /// Beam locked out
    Overheat,
    GameOver,
}

/// One audio trigger with synthesis suggestions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoundEvent {
    pub kind: SoundKind,
    /// Base frequency in Hz
    pub pitch: f32,
    /// Seconds
    pub duration: f32,
    /// 0..1
    pub volume: f32,
}

impl SoundKind {
    /// Suggested synthesis parameters per kind
    fn params(self) -> (f32, f32, f32) {
        match self {
            SoundKind::Shoot => (800.0, 0.05, 0.2),
            SoundKind::Kill => (200.0, 0.15, 0.3),
            SoundKind::Hurt => (150.0, 0.08, 0.4),
            SoundKind::Shield => (600.0, 0.12, 0.35),
            SoundKind::Dash => (400.0, 0.2, 0.25),
            SoundKind::PickupCollect => (700.0, 0.15, 0.3),
            SoundKind::WaveStart => (500.0, 0.3, 0.5),
            SoundKind::Overheat => (120.0, 0.25, 0.35),
            SoundKind::GameOver => (80.0, 0.4, 0.5),
        }
    }
}

/// Per-frame queue of sound triggers, drained by the audio collaborator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SoundQueue {
    events: Vec<SoundEvent>,
}

impl SoundQueue {
    pub fn push(&mut self, kind: SoundKind) {
        let (pitch, duration, volume) = kind.params();
        self.events.push(SoundEvent {
            kind,
            pitch,
            duration,
            volume,
        });
    }

    /// Push with a pitch offset (shot variation, combo escalation).
    pub fn push_detuned(&mut self, kind: SoundKind, pitch_offset: f32) {
        let (pitch, duration, volume) = kind.params();
        self.events.push(SoundEvent {
            kind,
            pitch: pitch + pitch_offset,
            duration,
            volume,
        });
    }

    /// Take this frame's events, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<SoundEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SoundEvent> {
        self.events.iter()
    }
}
