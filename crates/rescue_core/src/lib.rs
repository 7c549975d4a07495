//! Authoritative region/entity state and the per-tick void rescue systems.
//!
//! The shard owns a small set of regions, each with its own entity list and
//! feedback bus. Every simulation tick the host driver ([`Shard::step`])
//! decays status effect timers, fires the per-entity tick callback, then
//! sweeps for entities below each region's kill plane and offers them to the
//! registered observer before applying the default discard.

use std::collections::BTreeMap;

pub mod classify;
pub mod config;
pub mod fx;
pub mod hooks;
pub mod systems;
pub mod telemetry;

pub use classify::{VoidBand, classify};
pub use config::VoidConfig;
pub use hooks::{BoundsHook, EntityObserver, VoidRescue};
pub use systems::void::{AbortReason, RescueOutcome, RescuePath, RescueReport};
pub use world_core::{
    EffectSet, EntityId, EntityKind, NpcType, RegionId, SimSide, StatusKind, Transform,
};

/// Host kill plane below which the engine destroys entities outright.
pub const DEFAULT_KILL_Y: f32 = -64.0;

/// A simulated entity. The rescue systems read it and issue move / recreate /
/// discard commands through its owning region.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub tr: Transform,
    pub effects: EffectSet,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind, tr: Transform) -> Self {
        Self {
            id,
            kind,
            tr,
            effects: EffectSet::default(),
        }
    }
}

/// One simulation partition: entity list, spawn capacity, kill plane, and
/// the feedback bus drained by the presentation layer.
#[derive(Debug)]
pub struct Region {
    pub id: RegionId,
    pub kill_y: f32,
    /// Upper bound on resident entities; `None` is unbounded. Spawning into
    /// a full region fails and the caller degrades.
    pub capacity: Option<usize>,
    pub entities: Vec<Entity>,
    pub fx: fx::FxQueue,
}

impl Region {
    pub fn new(id: RegionId) -> Self {
        Self {
            id,
            kill_y: DEFAULT_KILL_Y,
            capacity: None,
            entities: Vec::new(),
            fx: fx::FxQueue::default(),
        }
    }

    pub fn with_capacity(id: RegionId, capacity: usize) -> Self {
        let mut r = Self::new(id);
        r.capacity = Some(capacity);
        r
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    #[inline]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Insert an already-built entity (relocation target path).
    pub fn insert(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Take an entity out of this region, preserving it for relocation.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(idx))
    }

    fn has_room(&self) -> bool {
        self.capacity.is_none_or(|cap| self.entities.len() < cap)
    }
}

/// The owning server session: region registry, primary region handle, and
/// entity id allocation.
#[derive(Debug)]
pub struct Shard {
    pub side: SimSide,
    regions: BTreeMap<RegionId, Region>,
    primary: Option<RegionId>,
    next_entity: u64,
}

impl Shard {
    pub fn new(side: SimSide) -> Self {
        Self {
            side,
            regions: BTreeMap::new(),
            primary: None,
            next_entity: 1,
        }
    }

    pub fn add_region(&mut self, region: Region) -> RegionId {
        let id = region.id;
        self.regions.insert(id, region);
        id
    }

    /// Mark the distinguished primary region. It must already be registered.
    pub fn set_primary(&mut self, id: RegionId) {
        self.primary = Some(id);
    }

    /// Registry lookup for the primary region. `None` is a reachable
    /// degraded state, not an error.
    pub fn primary_region(&self) -> Option<RegionId> {
        self.primary.filter(|id| self.regions.contains_key(id))
    }

    #[inline]
    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(&id)
    }

    #[inline]
    pub fn region_mut(&mut self, id: RegionId) -> Option<&mut Region> {
        self.regions.get_mut(&id)
    }

    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }

    fn alloc_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_entity);
        self.next_entity = self.next_entity.wrapping_add(1);
        id
    }

    /// Create a fresh entity of `kind` in `region`. Fails (no mutation) when
    /// the region is unknown or at capacity.
    pub fn spawn(&mut self, region: RegionId, kind: EntityKind, tr: Transform) -> Option<EntityId> {
        if !self.regions.get(&region)?.has_room() {
            return None;
        }
        let id = self.alloc_entity_id();
        // Registered and has room per the checks above
        if let Some(r) = self.regions.get_mut(&region) {
            r.insert(Entity::new(id, kind, tr));
        }
        Some(id)
    }

    /// Locate an entity across all regions.
    pub fn find_entity(&self, id: EntityId) -> Option<(RegionId, &Entity)> {
        self.regions
            .values()
            .find_map(|r| r.get(id).map(|e| (r.id, e)))
    }

    /// One host tick: decay effect timers, fire the per-entity tick callback,
    /// then sweep for entities below their region's kill plane. Unhandled
    /// out-of-bounds entities are discarded (the engine default).
    pub fn step(&mut self, dt: f32, obs: &mut dyn EntityObserver) {
        let _t0 = std::time::Instant::now();
        for r in self.regions.values_mut() {
            for e in &mut r.entities {
                e.effects.tick(dt);
            }
        }
        let live: Vec<(RegionId, EntityId)> = self
            .regions
            .values()
            .flat_map(|r| {
                let rid = r.id;
                r.entities.iter().map(move |e| (rid, e.id))
            })
            .collect();
        for (rid, eid) in &live {
            obs.on_entity_tick(self, *rid, *eid);
        }
        // Re-collect: the tick callback may have moved or removed entities.
        let below: Vec<(RegionId, EntityId)> = self
            .regions
            .values()
            .flat_map(|r| {
                let rid = r.id;
                let kill_y = r.kill_y;
                r.entities
                    .iter()
                    .filter(move |e| e.tr.pos.y < kill_y)
                    .map(move |e| (rid, e.id))
            })
            .collect();
        for (rid, eid) in below {
            if self.regions.get(&rid).is_none_or(|r| r.get(eid).is_none()) {
                continue;
            }
            let handled = obs.on_out_of_bounds(self, rid, eid, BoundsHook::Audit);
            if !handled
                && let Some(r) = self.regions.get_mut(&rid)
                && r.remove(eid).is_some()
            {
                log::debug!("shard: discarded {eid:?} below kill plane in {rid:?}");
            }
        }
        let ms = _t0.elapsed().as_secs_f64() * 1000.0;
        metrics::histogram!("shard.step.ms").record(ms);
    }
}
