//! Shared component types for regions, entities, and timed status effects.
//!
//! These types are shared between the authoritative shard state and any
//! presentation-side consumer. The shard owns authoritative mutation; with
//! the `replication` feature the component types derive serde for snapshot
//! replication.

use glam::Vec3;

/// Opaque entity identifier (shard-assigned). Stable across player
/// relocation; non-player recreation allocates a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "replication", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u64);

/// Addressable simulation partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "replication", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionId(pub u32);

/// Descriptor sufficient to recreate a non-player entity of the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "replication", derive(serde::Serialize, serde::Deserialize))]
pub enum NpcType {
    Zombie,
    Skeleton,
    Bat,
}

/// Entity kind, dispatched by pattern match in the rescue systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "replication", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    Player,
    Npc(NpcType),
}

impl EntityKind {
    #[inline]
    pub fn is_player(&self) -> bool {
        matches!(self, EntityKind::Player)
    }
}

/// Position plus view orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "replication", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub pos: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            pos: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

/// Timed debuff kinds applied around a void transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "replication", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusKind {
    Blindness,
    SlowFalling,
    Darkness,
}

/// A single timed status effect instance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "replication", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub remaining_s: f32,
}

/// Per-entity status effects. Applying a kind already present extends the
/// remaining time to at least the new duration; there is no stacking.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "replication", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSet(Vec<StatusEffect>);

impl EffectSet {
    pub fn apply(&mut self, kind: StatusKind, duration_s: f32) {
        if let Some(e) = self.0.iter_mut().find(|e| e.kind == kind) {
            e.remaining_s = e.remaining_s.max(duration_s);
        } else {
            self.0.push(StatusEffect {
                kind,
                remaining_s: duration_s,
            });
        }
    }

    /// Decay remaining times and drop expired effects.
    pub fn tick(&mut self, dt: f32) {
        for e in &mut self.0 {
            e.remaining_s = (e.remaining_s - dt).max(0.0);
        }
        self.0.retain(|e| e.remaining_s > 0.0);
    }

    #[inline]
    pub fn has(&self, kind: StatusKind) -> bool {
        self.0.iter().any(|e| e.kind == kind)
    }

    /// Remaining duration for a kind, 0.0 when absent.
    pub fn remaining_s(&self, kind: StatusKind) -> f32 {
        self.0
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.remaining_s)
            .unwrap_or(0.0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.0.iter()
    }
}

/// Which half of the simulation is evaluating: the authoritative shard or a
/// presentation-only mirror. Mutation is reserved to the authoritative side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimSide {
    Authoritative,
    Presentation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_extends_but_never_shortens() {
        let mut fx = EffectSet::default();
        fx.apply(StatusKind::Darkness, 5.0);
        fx.tick(1.0);
        assert!((fx.remaining_s(StatusKind::Darkness) - 4.0).abs() < 1e-6);
        // Re-apply refreshes back up to the full duration
        fx.apply(StatusKind::Darkness, 5.0);
        assert!((fx.remaining_s(StatusKind::Darkness) - 5.0).abs() < 1e-6);
        // A shorter apply does not cut an existing effect short
        fx.apply(StatusKind::Darkness, 1.0);
        assert!((fx.remaining_s(StatusKind::Darkness) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn tick_drops_expired() {
        let mut fx = EffectSet::default();
        fx.apply(StatusKind::Blindness, 0.5);
        fx.apply(StatusKind::SlowFalling, 2.0);
        fx.tick(1.0);
        assert!(!fx.has(StatusKind::Blindness));
        assert!(fx.has(StatusKind::SlowFalling));
    }

    #[test]
    fn kinds_are_independent() {
        let mut fx = EffectSet::default();
        fx.apply(StatusKind::Blindness, 5.0);
        fx.apply(StatusKind::SlowFalling, 3.0);
        assert_eq!(fx.iter().count(), 2);
        assert!((fx.remaining_s(StatusKind::SlowFalling) - 3.0).abs() < 1e-6);
    }
}
