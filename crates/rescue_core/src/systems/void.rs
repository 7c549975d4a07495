//! Warning-band debuff and the cross-region void rescue.
//!
//! Both run strictly on the authoritative side within the tick that invokes
//! them; every failure degrades to "let the host do what it would have done
//! anyway" and nothing is retried across ticks.

use glam::Vec3;
use rand::rngs::SmallRng;
use world_core::{EntityId, EntityKind, RegionId, SimSide, StatusKind, Transform};

use crate::classify::{VoidBand, classify};
use crate::config::VoidConfig;
use crate::fx::{self, CuePhase};
use crate::Shard;

/// Why a rescue degraded to a no-op. Used for logging and metrics labels
/// only; none of these is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// Evaluation happened on a presentation-only mirror.
    PresentationSide,
    /// The region registry has no primary region right now.
    NoPrimaryRegion,
    /// The destination refused to create the replacement entity.
    SpawnFailed,
}

impl AbortReason {
    fn label(self) -> &'static str {
        match self {
            AbortReason::PresentationSide => "presentation_side",
            AbortReason::NoPrimaryRegion => "no_primary_region",
            AbortReason::SpawnFailed => "spawn_failed",
        }
    }
}

/// Which entity-handling path a completed rescue took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RescuePath {
    /// Player: the live instance moved regions, identity preserved.
    MovedInPlace,
    /// Non-player: recreated at the destination, original discarded.
    Recreated { old: EntityId, new: EntityId },
}

/// Transient record of one completed relocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RescueReport {
    pub from: RegionId,
    pub to: RegionId,
    pub x: f32,
    pub z: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub path: RescuePath,
}

/// Outcome of one orchestrator invocation. Only `Rescued` suppresses the
/// host's default destruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RescueOutcome {
    Rescued(RescueReport),
    /// Missing entity or not in the critical band; includes the second of a
    /// double hook invocation finding the entity already relocated.
    NotEligible,
    Aborted(AbortReason),
}

/// Warning-band debuff, fired from the per-entity tick callback. Re-applies
/// the darkness effect every qualifying tick, so uptime is continuous while
/// the player stays in the band.
pub fn warning_tick(shard: &mut Shard, region: RegionId, id: EntityId, cfg: &VoidConfig) {
    if shard.side == SimSide::Presentation {
        return;
    }
    let is_primary = shard.primary_region() == Some(region);
    let Some(e) = shard.region_mut(region).and_then(|r| r.get_mut(id)) else {
        return;
    };
    if !e.kind.is_player() {
        return;
    }
    if classify(is_primary, e.tr.pos.y, cfg) == VoidBand::Warning {
        e.effects.apply(StatusKind::Darkness, cfg.darkness_s);
    }
}

/// Relocate an entity out of the critical void into the primary region.
///
/// Reads the entity's current state, so a second invocation in the same tick
/// finds the entity already relocated (or gone) and is a no-op.
pub fn rescue_from_void(
    shard: &mut Shard,
    src: RegionId,
    id: EntityId,
    cfg: &VoidConfig,
    rng: &mut SmallRng,
) -> RescueOutcome {
    if shard.side == SimSide::Presentation {
        return RescueOutcome::Aborted(AbortReason::PresentationSide);
    }
    let is_primary = shard.primary_region() == Some(src);
    let Some((kind, tr)) = shard
        .region(src)
        .and_then(|r| r.get(id))
        .map(|e| (e.kind, e.tr))
    else {
        return RescueOutcome::NotEligible;
    };
    if classify(is_primary, tr.pos.y, cfg) != VoidBand::Critical {
        return RescueOutcome::NotEligible;
    }
    let Some(dst) = shard.primary_region() else {
        return abort(AbortReason::NoPrimaryRegion);
    };

    // Horizontal position and view direction survive the transition; the
    // vertical coordinate is replaced outright.
    let (x, z, yaw, pitch) = (tr.pos.x, tr.pos.z, tr.yaw, tr.pitch);
    let exit_at = Vec3::new(x, cfg.critical_y, z);
    if let Some(r) = shard.region_mut(src) {
        fx::teleport_burst(rng, &mut r.fx, exit_at, cfg);
        fx::teleport_cue(&mut r.fx, exit_at, CuePhase::Departure, cfg);
    }

    let dest_tr = Transform {
        pos: Vec3::new(x, cfg.rescue_altitude_y, z),
        yaw,
        pitch,
    };
    let path = match kind {
        EntityKind::Player => {
            let Some(mut e) = shard.region_mut(src).and_then(|r| r.remove(id)) else {
                return RescueOutcome::NotEligible;
            };
            e.effects.apply(StatusKind::Blindness, cfg.blindness_s);
            e.effects.apply(StatusKind::SlowFalling, cfg.slow_fall_s);
            e.tr = dest_tr;
            // primary_region() only returns registered regions
            if let Some(r) = shard.region_mut(dst) {
                r.insert(e);
            }
            RescuePath::MovedInPlace
        }
        EntityKind::Npc(_) => {
            // Recreate first; only discard the original once the replacement
            // exists, so a failed spawn leaves the world untouched.
            let Some(new_id) = shard.spawn(dst, kind, dest_tr) else {
                return abort(AbortReason::SpawnFailed);
            };
            let _ = shard.region_mut(src).and_then(|r| r.remove(id));
            RescuePath::Recreated { old: id, new: new_id }
        }
    };
    if let Some(r) = shard.region_mut(dst) {
        fx::teleport_burst(rng, &mut r.fx, dest_tr.pos, cfg);
        fx::teleport_cue(&mut r.fx, dest_tr.pos, CuePhase::Arrival, cfg);
    }

    let kind_label = if kind.is_player() { "player" } else { "npc" };
    metrics::counter!("void.rescues_total", "kind" => kind_label).increment(1);
    RescueOutcome::Rescued(RescueReport {
        from: src,
        to: dst,
        x,
        z,
        yaw,
        pitch,
        path,
    })
}

fn abort(reason: AbortReason) -> RescueOutcome {
    metrics::counter!("void.rescue_aborts_total", "reason" => reason.label()).increment(1);
    RescueOutcome::Aborted(reason)
}
