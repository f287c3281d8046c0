use std::collections::HashSet;
use std::sync::Barrier;

use loot_content::{Scenario, ScenarioLoader};
use loot_core::{
    AgentId, AgentRole, AgentState, DetectionRanges, EquipmentSlot, ItemId, LootConfig, LootId,
    LootKind, Vec3,
};
use loot_runtime::{LootOracles, LootOutcome, LootSession, RuntimeError};

/// Two crates east of the origin, one loose rifle north, one body south.
const YARD: &str = r#"
Scenario(
    walkable: (min_x: -100.0, max_x: 100.0, min_z: -100.0, max_z: 100.0),
    agents: [
        (
            id: 1,
            name: "scav-1",
            role: scav,
            position: (x: 0.0, y: 0.0, z: 0.0),
            equipment: [(slot: backpack, grids: [(width: 4, height: 4)])],
        ),
        (
            id: 2,
            name: "raider-2",
            role: raider,
            position: (x: 0.0, y: 0.0, z: 0.0),
            equipment: [(slot: pockets, grids: [(width: 1, height: 1), (width: 1, height: 1)])],
        ),
    ],
    objects: [
        (
            id: 10,
            bounds: (center: (x: 5.0, y: 0.5, z: 0.0), extents: (x: 0.5, y: 0.5, z: 0.5)),
            kind: Container(grids: [
                (width: 3, height: 2, items: [
                    (item: (id: 100, width: 1, height: 1), x: 2, y: 1),
                    (item: (id: 101, width: 2, height: 1), x: 0, y: 1),
                ]),
                (width: 2, height: 2),
            ]),
        ),
        (
            id: 11,
            bounds: (center: (x: 12.0, y: 0.5, z: 0.0), extents: (x: 0.5, y: 0.5, z: 0.5)),
            kind: Container(grids: [(width: 2, height: 2)]),
        ),
        (
            id: 20,
            bounds: (center: (x: 0.0, y: 0.1, z: 30.0), extents: (x: 1.0, y: 0.1, z: 0.3)),
            kind: Item((id: 200, width: 2, height: 1, value: 5000)),
        ),
        (
            id: 30,
            bounds: (center: (x: 0.0, y: 0.3, z: -60.0), extents: (x: 1.0, y: 0.3, z: 0.4)),
            kind: Corpse(owner: Some(9)),
        ),
    ],
)
"#;

fn yard() -> Scenario {
    ScenarioLoader::parse(YARD).expect("yard scenario should parse")
}

fn session_with(config: LootConfig) -> (Scenario, LootSession) {
    let scenario = yard();
    let oracles =
        LootOracles::from_scenario(&scenario, config).expect("yard scenario should build");
    (scenario, LootSession::new(oracles))
}

fn agent(scenario: &Scenario, id: u32) -> AgentState {
    let spec = scenario.agent(AgentId(id)).expect("agent in scenario");
    let equipment = spec.build_equipment().expect("valid equipment");
    spec.build_state(&equipment)
}

// ================================================================
// Scanning and outcomes
// ================================================================

#[test]
fn nearest_container_is_claimed_then_released_on_completion() {
    let (scenario, session) = session_with(LootConfig::default());
    let mut scav = agent(&scenario, 1);

    let target = session.scan(&mut scav).expect("crate in range");
    assert_eq!(target.loot, LootId(10));
    assert_eq!(target.kind, LootKind::Container);
    assert_eq!(target.destination, Vec3::new(5.0, 0.0, 0.0));
    assert_eq!(session.claims().claimed_by(LootId(10)), Some(scav.id));

    // Holding a target blocks further scans.
    assert!(!session.should_scan(&scav));
    assert!(session.scan(&mut scav).is_none());

    let finished = session.finish(&mut scav, LootOutcome::Completed);
    assert_eq!(finished.map(|target| target.loot), Some(LootId(10)));
    assert!(!session.claims().is_claimed(LootId(10)));

    // Completion does not blacklist the object.
    let again = session.scan(&mut scav).expect("crate still there");
    assert_eq!(again.loot, LootId(10));
}

#[test]
fn failed_loot_is_never_targeted_again() {
    let (scenario, session) = session_with(LootConfig::default());
    let mut scav = agent(&scenario, 1);

    session.scan(&mut scav).expect("first crate");
    session.finish(&mut scav, LootOutcome::Failed);

    let next = session.scan(&mut scav).expect("second crate");
    assert_eq!(next.loot, LootId(11));
    assert_eq!(session.oracles().eligibility().ignored_count(scav.id), 1);
}

#[test]
fn abandoned_target_is_free_for_others() {
    let (scenario, session) = session_with(LootConfig::default());
    let mut scav = agent(&scenario, 1);
    let mut other = agent(&scenario, 1);
    other.id = AgentId(3);

    session.scan(&mut scav).expect("first crate");
    assert_eq!(session.scan(&mut other).map(|t| t.loot), Some(LootId(11)));

    session.finish(&mut scav, LootOutcome::Abandoned);
    session.finish(&mut other, LootOutcome::Abandoned);
    assert!(session.claims().is_empty());
    assert_eq!(session.scan(&mut other).map(|t| t.loot), Some(LootId(10)));
}

#[test]
fn finish_without_target_is_a_no_op() {
    let (scenario, session) = session_with(LootConfig::default());
    let mut scav = agent(&scenario, 1);
    assert!(session.finish(&mut scav, LootOutcome::Failed).is_none());
    assert_eq!(session.oracles().eligibility().ignored_count(scav.id), 0);
}

#[test]
fn reserved_cells_gate_the_scan() {
    let (scenario, session) = session_with(LootConfig::default());
    // Two pocket cells, all of them reserved.
    let mut raider = agent(&scenario, 2);
    assert_eq!(raider.available_grid_cells, 2);

    assert!(!session.should_scan(&raider));
    assert!(session.scan(&mut raider).is_none());
    assert!(session.claims().is_empty());
}

#[test]
fn path_length_beyond_kind_range_is_rejected() {
    let config = LootConfig::with_detection(DetectionRanges::new(4.0, 40.0, 100.0));
    let (scenario, session) = session_with(config);
    let mut scav = agent(&scenario, 1);

    // Both crates are past 4, the rifle at 30 is within 40.
    let target = session.scan(&mut scav).expect("rifle in range");
    assert_eq!(target.loot, LootId(20));
    assert_eq!(target.kind, LootKind::Item);
}

#[test]
fn corpse_roles_come_from_config() {
    let config = LootConfig {
        detection: DetectionRanges::new(1.0, 1.0, 75.0),
        corpse_roles: AgentRole::Raider.into(),
        ..LootConfig::default()
    };
    let (scenario, session) = session_with(config);
    let mut scav = agent(&scenario, 1);
    assert!(session.scan(&mut scav).is_none());

    let mut raider = agent(&scenario, 1);
    raider.id = AgentId(4);
    raider.role = AgentRole::Raider;
    assert_eq!(session.scan(&mut raider).map(|t| t.loot), Some(LootId(30)));
}

#[test]
fn pmc_without_corpse_awareness_skips_bodies() {
    let mut config = LootConfig {
        detection: DetectionRanges::new(1.0, 1.0, 75.0),
        ..LootConfig::default()
    };
    config.corpse_awareness.pmc_enabled = false;
    let (scenario, session) = session_with(config);

    let mut pmc = agent(&scenario, 1);
    pmc.role = AgentRole::Pmc;
    assert!(session.scan(&mut pmc).is_none());

    let mut scav = agent(&scenario, 1);
    assert_eq!(session.scan(&mut scav).map(|t| t.loot), Some(LootId(30)));
}

#[test]
fn destroyed_agent_releases_its_claims() {
    let (scenario, session) = session_with(LootConfig::default());
    let mut scav = agent(&scenario, 1);
    session.scan(&mut scav).expect("crate");
    session.finish(&mut scav, LootOutcome::Failed);
    session.scan(&mut scav).expect("second crate");

    assert_eq!(session.agent_destroyed(scav.id), 1);
    assert!(session.claims().is_empty());
    assert_eq!(session.oracles().eligibility().ignored_count(scav.id), 0);
}

// ================================================================
// Concurrency
// ================================================================

#[test]
fn racing_agents_never_share_a_target() {
    const AGENTS: u32 = 12;
    let (scenario, session) = session_with(LootConfig::default());
    let barrier = Barrier::new(AGENTS as usize);

    let targets: Vec<Option<LootId>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..AGENTS)
            .map(|n| {
                let mut racer = agent(&scenario, 1);
                racer.id = AgentId(100 + n);
                let session = session.clone();
                let barrier = &barrier;
                scope.spawn(move || {
                    barrier.wait();
                    session.scan(&mut racer).map(|target| target.loot)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("scan thread panicked"))
            .collect()
    });

    // Four objects are in default range of the origin.
    let won: Vec<LootId> = targets.into_iter().flatten().collect();
    let distinct: HashSet<LootId> = won.iter().copied().collect();
    assert_eq!(won.len(), 4);
    assert_eq!(distinct.len(), won.len());
    assert_eq!(session.claims().len(), 4);
}

// ================================================================
// Containers and pickup
// ================================================================

#[test]
fn reached_container_is_repacked_in_place() {
    let (_, session) = session_with(LootConfig::default());

    let plan = session.repack(LootId(10)).expect("repack should succeed");

    // The 2x1 goes first into the smaller 2x2 grid, then the 1x1 below it.
    assert_eq!(plan.len(), 2);
    assert_eq!(plan.placement_of(ItemId(101)).map(|p| p.grid), Some(1));
    assert_eq!(plan.placement_of(ItemId(100)).map(|p| p.grid), Some(1));
    let container = session.oracles().scene().container(LootId(10)).expect("crate");
    assert!(container.grids()[0].is_empty());
}

#[test]
fn repacking_unknown_container_fails() {
    let (_, session) = session_with(LootConfig::default());
    assert!(matches!(
        session.repack(LootId(20)),
        Err(RuntimeError::UnknownContainer(LootId(20)))
    ));
}

#[test]
fn picked_up_item_leaves_the_world() {
    let (scenario, session) = session_with(LootConfig::default());
    let spec = scenario.agent(AgentId(1)).expect("scav");
    let mut equipment = spec.build_equipment().expect("equipment");
    let mut scav = spec.build_state(&equipment);

    let address = session
        .pick_up(&mut scav, &mut equipment, LootId(20))
        .expect("backpack has room");

    assert_eq!(address.grid.slot, EquipmentSlot::Backpack);
    assert_eq!(scav.available_grid_cells, 14);
    assert!(!session.oracles().scene().contains(LootId(20)));
    assert!(matches!(
        session.pick_up(&mut scav, &mut equipment, LootId(20)),
        Err(RuntimeError::UnknownItem(LootId(20)))
    ));
}

#[test]
fn pickup_without_room_keeps_item_in_world() {
    let (scenario, session) = session_with(LootConfig::default());
    let spec = scenario.agent(AgentId(2)).expect("raider");
    let mut equipment = spec.build_equipment().expect("equipment");
    let mut raider = spec.build_state(&equipment);

    let err = session
        .pick_up(&mut raider, &mut equipment, LootId(20))
        .unwrap_err();

    assert!(matches!(err, RuntimeError::Packing(_)));
    assert!(session.oracles().scene().contains(LootId(20)));
    assert_eq!(raider.available_grid_cells, 2);
}
