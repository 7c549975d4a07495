#![allow(clippy::float_cmp)]

use glam::Vec3;
use rescue_core::{
    BoundsHook, EntityKind, EntityObserver, Region, RegionId, Shard, SimSide, Transform,
    VoidRescue,
};

fn presentation_shard(y: f32) -> (Shard, RegionId, rescue_core::EntityId) {
    let mut shard = Shard::new(SimSide::Presentation);
    let primary = shard.add_region(Region::new(RegionId(0)));
    let nether = shard.add_region(Region::new(RegionId(1)));
    shard.set_primary(primary);
    let id = shard
        .spawn(
            nether,
            EntityKind::Player,
            Transform {
                pos: Vec3::new(3.0, y, 3.0),
                yaw: 0.0,
                pitch: 0.0,
            },
        )
        .expect("player spawns");
    (shard, nether, id)
}

#[test]
fn presentation_side_never_relocates() {
    let (mut shard, nether, id) = presentation_shard(-70.0);
    let mut rescue = VoidRescue::default();

    let handled = rescue.on_out_of_bounds(&mut shard, nether, id, BoundsHook::Fall);

    assert!(!handled);
    let (region, player) = shard.find_entity(id).expect("still in place");
    assert_eq!(region, nether);
    assert_eq!(player.tr.pos.y, -70.0);
    assert!(player.effects.is_empty());
    assert!(shard.region(nether).expect("nether").fx.is_empty());
}

#[test]
fn presentation_side_classifier_evaluation_is_side_effect_free() {
    let (mut shard, nether, id) = presentation_shard(-40.0);
    let mut rescue = VoidRescue::default();

    rescue.on_entity_tick(&mut shard, nether, id);

    let (_, player) = shard.find_entity(id).expect("still in place");
    assert!(player.effects.is_empty(), "no warning debuff off-side");
}
