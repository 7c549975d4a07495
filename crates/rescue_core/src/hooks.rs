//! Entity lifecycle extension points and the void rescue observer.
//!
//! The host exposes two hook points that both mean "this entity is about to
//! be destroyed for being out of world bounds". A subscriber returns `true`
//! to suppress the default destruction; returning `false` leaves the
//! entity's fate to the host.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use world_core::{EntityId, RegionId};

use crate::Shard;
use crate::config::VoidConfig;
use crate::systems::void::{RescueOutcome, rescue_from_void, warning_tick};

/// The two out-of-bounds extension points. `Fall` fires from the motion
/// update that found the entity below bounds; `Audit` fires from the
/// periodic bounds sweep. At most one fires per entity per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsHook {
    Fall,
    Audit,
}

/// Subscriber attached to the host's entity lifecycle.
pub trait EntityObserver {
    /// Fired once per live entity per simulated tick.
    fn on_entity_tick(&mut self, shard: &mut Shard, region: RegionId, id: EntityId);

    /// Fired when the host judges an entity out of world bounds. Return
    /// `true` to suppress the default destruction for this tick.
    fn on_out_of_bounds(
        &mut self,
        shard: &mut Shard,
        region: RegionId,
        id: EntityId,
        hook: BoundsHook,
    ) -> bool;
}

/// The void rescue observer: warning-band debuffs on the tick callback,
/// full relocation on the out-of-bounds hooks. Both hook points route to
/// the same rescue path and behave identically.
pub struct VoidRescue {
    pub cfg: VoidConfig,
    rng: SmallRng,
}

impl VoidRescue {
    pub fn new(cfg: VoidConfig) -> Self {
        let rng = SmallRng::seed_from_u64(cfg.seed);
        Self { cfg, rng }
    }

    pub fn with_seed(cfg: VoidConfig, seed: u64) -> Self {
        Self {
            cfg,
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for VoidRescue {
    fn default() -> Self {
        Self::new(VoidConfig::default())
    }
}

impl EntityObserver for VoidRescue {
    fn on_entity_tick(&mut self, shard: &mut Shard, region: RegionId, id: EntityId) {
        warning_tick(shard, region, id, &self.cfg);
    }

    fn on_out_of_bounds(
        &mut self,
        shard: &mut Shard,
        region: RegionId,
        id: EntityId,
        hook: BoundsHook,
    ) -> bool {
        match rescue_from_void(shard, region, id, &self.cfg, &mut self.rng) {
            RescueOutcome::Rescued(report) => {
                log::info!(
                    "rescue: relocated {id:?} from {region:?} to {:?} via {hook:?} ({:?})",
                    report.to,
                    report.path
                );
                true
            }
            RescueOutcome::NotEligible => false,
            RescueOutcome::Aborted(reason) => {
                log::debug!("rescue: left {id:?} to the host ({reason:?}, via {hook:?})");
                false
            }
        }
    }
}
