#![allow(clippy::float_cmp)]

use glam::Vec3;
use rescue_core::{
    BoundsHook, EntityKind, EntityObserver, NpcType, Region, RegionId, Shard, SimSide, Transform,
    VoidRescue,
};

fn shard_with_full_primary() -> (Shard, RegionId, RegionId) {
    let mut shard = Shard::new(SimSide::Authoritative);
    let primary = shard.add_region(Region::with_capacity(RegionId(0), 0));
    let nether = shard.add_region(Region::new(RegionId(1)));
    shard.set_primary(primary);
    (shard, primary, nether)
}

#[test]
fn failed_recreation_leaves_the_world_untouched() {
    let (mut shard, primary, nether) = shard_with_full_primary();
    let tr = Transform {
        pos: Vec3::new(5.0, -70.0, 5.0),
        yaw: 10.0,
        pitch: 0.0,
    };
    let id = shard
        .spawn(nether, EntityKind::Npc(NpcType::Zombie), tr)
        .expect("source region is unbounded");

    let mut rescue = VoidRescue::default();
    let handled = rescue.on_out_of_bounds(&mut shard, nether, id, BoundsHook::Fall);

    assert!(!handled, "a failed rescue must not cancel the default path");
    assert!(shard.region(primary).expect("primary").is_empty());
    let original = shard.region(nether).expect("nether").get(id).expect("still there");
    assert_eq!(original.tr.pos, tr.pos);
    assert_eq!(original.tr.yaw, tr.yaw);
    assert!(original.effects.is_empty());
}

#[test]
fn host_default_destruction_proceeds_after_failed_rescue() {
    let (mut shard, primary, nether) = shard_with_full_primary();
    let id = shard
        .spawn(
            nether,
            EntityKind::Npc(NpcType::Zombie),
            Transform {
                pos: Vec3::new(5.0, -70.0, 5.0),
                yaw: 0.0,
                pitch: 0.0,
            },
        )
        .expect("source region is unbounded");

    let mut rescue = VoidRescue::default();
    shard.step(0.05, &mut rescue);

    // The rescue degraded, so the host discarded the entity as it would
    // have without us.
    assert!(shard.find_entity(id).is_none());
    assert!(shard.region(primary).expect("primary").is_empty());
}

#[test]
fn player_rescue_is_unaffected_by_destination_capacity() {
    // Players are moved, not recreated; capacity only gates fresh spawns.
    let (mut shard, primary, nether) = shard_with_full_primary();
    let id = shard
        .spawn(
            nether,
            EntityKind::Player,
            Transform {
                pos: Vec3::new(1.0, -70.0, 1.0),
                yaw: 0.0,
                pitch: 0.0,
            },
        )
        .expect("source region is unbounded");

    let mut rescue = VoidRescue::default();
    let handled = rescue.on_out_of_bounds(&mut shard, nether, id, BoundsHook::Audit);

    assert!(handled);
    let (region, _) = shard.find_entity(id).expect("player survives");
    assert_eq!(region, primary);
}
