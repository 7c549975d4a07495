//! Compiled-in tuning for the void classifier, rescue, and feedback.

/// Named constants for void classification, relocation, and feedback.
/// Vertical thresholds are strict comparisons: a position exactly at a
/// threshold never falls into the deeper band.
#[derive(Debug, Clone)]
pub struct VoidConfig {
    /// Below this (non-primary regions only) players get the warning debuff.
    pub warning_y: f32,
    /// Below this (non-primary regions only) the entity is rescued.
    pub critical_y: f32,
    /// Destination altitude in the primary region.
    pub rescue_altitude_y: f32,
    /// Vision-impairing effect on rescued players, seconds.
    pub blindness_s: f32,
    /// Fall-damage-negating effect on rescued players, seconds.
    pub slow_fall_s: f32,
    /// Warning-band vision-darkening effect, seconds, refreshed every tick.
    pub darkness_s: f32,
    /// Particle samples per teleport burst.
    pub burst_samples: usize,
    /// Gaussian offset standard deviation per axis, meters.
    pub burst_sigma: f32,
    /// Every n-th burst sample also emits an accent particle.
    pub accent_every: usize,
    /// Teleport cue volume (both directions).
    pub cue_volume: f32,
    /// Pitch of the source-side (departure) cue.
    pub departure_pitch: f32,
    /// Pitch of the destination-side (arrival) cue.
    pub arrival_pitch: f32,
    /// Seed for the rescue observer's particle jitter.
    pub seed: u64,
}

impl Default for VoidConfig {
    fn default() -> Self {
        Self {
            warning_y: -32.0,
            critical_y: -60.0,
            rescue_altitude_y: 1024.0,
            blindness_s: 5.0,
            slow_fall_s: 3.0,
            darkness_s: 5.0,
            burst_samples: 50,
            burst_sigma: 0.5,
            accent_every: 5,
            cue_volume: 0.8,
            departure_pitch: 0.6,
            arrival_pitch: 1.8,
            seed: 0xC0FFEE,
        }
    }
}

/// Telemetry bootstrap options.
#[derive(Debug, Clone, Default)]
pub struct TelemetryCfg {
    pub log_level: Option<String>,
    pub json_logs: Option<bool>,
    /// When set, expose Prometheus metrics on this address.
    pub metrics_addr: Option<String>,
}
