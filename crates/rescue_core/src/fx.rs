//! Teleport feedback: stochastic particle bursts and directional sound cues.
//!
//! Determinism
//! - All jitter comes from the caller-supplied RNG; tests and the rescue
//!   observer use a seeded `SmallRng`, so burst layouts are reproducible.
//! - Emission only queues events on a region's `FxQueue`; the presentation
//!   layer drains the queue.

use glam::Vec3;
use rand::Rng;

use crate::config::VoidConfig;

/// Particle kinds used around a void transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Warp,
    /// Visually distinct accent mixed into the burst at a fixed cadence.
    WarpSpark,
}

/// A single queued particle spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSpawn {
    pub kind: ParticleKind,
    pub pos: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundId {
    Teleport,
}

/// Which side of the transition a cue marks. Departure cues are pitched
/// lower than arrival cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CuePhase {
    Departure,
    Arrival,
}

/// A single queued directional sound cue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundCue {
    pub id: SoundId,
    pub pos: Vec3,
    pub volume: f32,
    pub pitch: f32,
}

/// Per-region feedback bus, drained by the presentation layer.
#[derive(Debug, Default)]
pub struct FxQueue {
    pub particles: Vec<ParticleSpawn>,
    pub sounds: Vec<SoundCue>,
}

impl FxQueue {
    pub fn clear(&mut self) {
        self.particles.clear();
        self.sounds.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty() && self.sounds.is_empty()
    }
}

/// Queue a teleport burst around `at`: `burst_samples` warp particles at
/// Gaussian offsets, with an accent particle at the same offset every
/// `accent_every`-th sample.
pub fn teleport_burst(rng: &mut impl Rng, fx: &mut FxQueue, at: Vec3, cfg: &VoidConfig) {
    for i in 0..cfg.burst_samples {
        let off = Vec3::new(
            gaussian(rng, cfg.burst_sigma),
            gaussian(rng, cfg.burst_sigma),
            gaussian(rng, cfg.burst_sigma),
        );
        let pos = at + off;
        fx.particles.push(ParticleSpawn {
            kind: ParticleKind::Warp,
            pos,
        });
        if cfg.accent_every > 0 && i % cfg.accent_every == 0 {
            fx.particles.push(ParticleSpawn {
                kind: ParticleKind::WarpSpark,
                pos,
            });
        }
    }
}

/// Queue a teleport cue at `at`, pitched by phase.
pub fn teleport_cue(fx: &mut FxQueue, at: Vec3, phase: CuePhase, cfg: &VoidConfig) {
    let pitch = match phase {
        CuePhase::Departure => cfg.departure_pitch,
        CuePhase::Arrival => cfg.arrival_pitch,
    };
    fx.sounds.push(SoundCue {
        id: SoundId::Teleport,
        pos: at,
        volume: cfg.cue_volume,
        pitch,
    });
}

/// One Gaussian sample via Box-Muller over the injected uniform source.
#[inline]
fn gaussian(rng: &mut impl Rng, sigma: f32) -> f32 {
    let u1: f32 = rng.random_range(f32::EPSILON..1.0);
    let u2: f32 = rng.random_range(0.0..1.0);
    (-2.0 * u1.ln()).sqrt() * (std::f32::consts::TAU * u2).cos() * sigma
}
