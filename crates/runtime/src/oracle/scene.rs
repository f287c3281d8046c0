//! In-memory world used by the simulator and integration tests.
//!
//! The floor is a single flat rectangle, so snapping clamps onto it and path
//! length is the horizontal straight-line distance. Objects live behind an
//! `RwLock` (scans only read them); container contents sit behind a separate
//! `Mutex` so repacking one container never blocks a scan.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, PoisonError, RwLock};

use loot_content::{ObjectKindSpec, Scenario, WalkableArea, build_container};
use loot_core::{
    AgentId, Bounds, Collider, ColliderBuffer, ColliderHandle, Container, ContainerInfo,
    CorpseInfo, Item, LootId, LootObject, LooseItem, NavigationOracle, Vec3, WorldQueryOracle,
};

use crate::error::{Result, RuntimeError};

#[derive(Clone, Copy, Debug)]
struct SceneObject {
    bounds: Bounds,
    object: LootObject,
}

#[derive(Debug, Default)]
struct Objects {
    by_handle: BTreeMap<ColliderHandle, SceneObject>,
    handles: HashMap<LootId, ColliderHandle>,
    next_handle: u32,
}

#[derive(Debug)]
pub struct SceneOracle {
    walkable: WalkableArea,
    objects: RwLock<Objects>,
    containers: Mutex<HashMap<LootId, Container>>,
}

impl SceneOracle {
    pub fn new(walkable: WalkableArea) -> Self {
        Self {
            walkable,
            objects: RwLock::new(Objects::default()),
            containers: Mutex::new(HashMap::new()),
        }
    }

    /// Builds the scene from a scenario's walkable area and objects.
    pub fn from_scenario(scenario: &Scenario) -> Result<Self> {
        let scene = Self::new(scenario.walkable);
        for spec in &scenario.objects {
            let id = spec.loot_id();
            match &spec.kind {
                ObjectKindSpec::Container {
                    locked,
                    active,
                    grids,
                } => {
                    let container = build_container(id, grids)
                        .map_err(|source| RuntimeError::InvalidLayout { loot: id, source })?;
                    let info = ContainerInfo {
                        id,
                        locked: *locked,
                        active: *active,
                    };
                    scene.insert_container(spec.bounds, info, container)?;
                }
                ObjectKindSpec::Item(item) => {
                    let loose = LooseItem {
                        id,
                        item: item.build_item(),
                    };
                    scene.insert(spec.bounds, LootObject::Item(loose))?;
                }
                ObjectKindSpec::Corpse { owner } => {
                    let corpse = CorpseInfo {
                        id,
                        owner: owner.map(AgentId),
                    };
                    scene.insert(spec.bounds, LootObject::Corpse(corpse))?;
                }
            }
        }
        Ok(scene)
    }

    pub fn walkable(&self) -> &WalkableArea {
        &self.walkable
    }

    /// Places an object in the world and returns its collider.
    pub fn insert(&self, bounds: Bounds, object: LootObject) -> Result<ColliderHandle> {
        let mut objects = self.objects.write().unwrap_or_else(PoisonError::into_inner);
        let id = object.id();
        if objects.handles.contains_key(&id) {
            return Err(RuntimeError::DuplicateObject(id));
        }
        objects.next_handle += 1;
        let handle = ColliderHandle(objects.next_handle);
        objects.handles.insert(id, handle);
        objects
            .by_handle
            .insert(handle, SceneObject { bounds, object });
        Ok(handle)
    }

    pub fn insert_container(
        &self,
        bounds: Bounds,
        info: ContainerInfo,
        container: Container,
    ) -> Result<ColliderHandle> {
        let handle = self.insert(bounds, LootObject::Container(info))?;
        self.containers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(info.id, container);
        Ok(handle)
    }

    /// Removes an object from the world. Its claim, if any, is left alone.
    pub fn despawn(&self, loot: LootId) -> bool {
        let mut objects = self.objects.write().unwrap_or_else(PoisonError::into_inner);
        let Some(handle) = objects.handles.remove(&loot) else {
            return false;
        };
        objects.by_handle.remove(&handle);
        true
    }

    pub fn contains(&self, loot: LootId) -> bool {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .handles
            .contains_key(&loot)
    }

    pub fn object_count(&self) -> usize {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .by_handle
            .len()
    }

    /// The item lying loose under `loot`, if any.
    pub fn loose_item(&self, loot: LootId) -> Option<Item> {
        let objects = self.objects.read().unwrap_or_else(PoisonError::into_inner);
        let handle = objects.handles.get(&loot)?;
        match objects.by_handle.get(handle)?.object {
            LootObject::Item(loose) => Some(loose.item),
            _ => None,
        }
    }

    /// Runs `f` with exclusive access to the contents of container `loot`.
    pub fn with_container<R>(&self, loot: LootId, f: impl FnOnce(&mut Container) -> R) -> Option<R> {
        let mut containers = self
            .containers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        containers.get_mut(&loot).map(f)
    }

    /// Copy of the current contents of container `loot`.
    pub fn container(&self, loot: LootId) -> Option<Container> {
        self.with_container(loot, |container| container.clone())
    }

    fn clamp_to_floor(&self, point: Vec3) -> Vec3 {
        let area = &self.walkable;
        Vec3::new(
            point.x.clamp(area.min_x, area.max_x),
            area.floor_y,
            point.z.clamp(area.min_z, area.max_z),
        )
    }
}

/// Whether a sphere touches an axis-aligned box.
fn sphere_touches(center: Vec3, radius: f32, bounds: &Bounds) -> bool {
    let min = bounds.center - bounds.extents;
    let max = bounds.center + bounds.extents;
    let closest = Vec3::new(
        center.x.clamp(min.x, max.x),
        center.y.clamp(min.y, max.y),
        center.z.clamp(min.z, max.z),
    );
    closest.distance(center) <= radius
}

impl WorldQueryOracle for SceneOracle {
    fn overlap_sphere(&self, center: Vec3, radius: f32, out: &mut ColliderBuffer) -> usize {
        let objects = self.objects.read().unwrap_or_else(PoisonError::into_inner);
        let mut hits = 0;
        for (&handle, scene_object) in &objects.by_handle {
            if !sphere_touches(center, radius, &scene_object.bounds) {
                continue;
            }
            hits += 1;
            // Overflow is reported through the hit count.
            let _ = out.try_push(Collider {
                handle,
                bounds: scene_object.bounds,
            });
        }
        hits
    }

    fn classify(&self, collider: ColliderHandle) -> Option<LootObject> {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .by_handle
            .get(&collider)
            .map(|scene_object| scene_object.object)
    }
}

impl NavigationOracle for SceneOracle {
    fn snap_to_walkable(&self, point: Vec3, max_distance: f32) -> Option<Vec3> {
        let snapped = self.clamp_to_floor(point);
        (snapped.distance(point) <= max_distance).then_some(snapped)
    }

    fn path_length(&self, from: Vec3, to: Vec3) -> Option<f32> {
        let area = &self.walkable;
        if !area.contains(from.x, from.z) || !area.contains(to.x, to.z) {
            return None;
        }
        Some(from.flattened().distance(to.flattened()))
    }
}

#[cfg(test)]
mod tests {
    use loot_core::{Grid, ItemId};

    use super::*;

    fn floor() -> WalkableArea {
        WalkableArea {
            min_x: -10.0,
            max_x: 10.0,
            min_z: -10.0,
            max_z: 10.0,
            floor_y: 0.0,
        }
    }

    fn crate_at(x: f32, z: f32) -> Bounds {
        Bounds::new(Vec3::new(x, 0.5, z), Vec3::new(0.5, 0.5, 0.5))
    }

    fn corpse(id: u64) -> LootObject {
        LootObject::Corpse(CorpseInfo {
            id: LootId(id),
            owner: Some(AgentId(99)),
        })
    }

    #[test]
    fn overlap_counts_hits_beyond_buffer() {
        let scene = SceneOracle::new(floor());
        for id in 0..300 {
            scene.insert(crate_at(0.0, 0.0), corpse(id)).unwrap();
        }
        let mut buffer = ColliderBuffer::new();

        let hits = scene.overlap_sphere(Vec3::ZERO, 1.0, &mut buffer);

        assert_eq!(hits, 300);
        assert!(buffer.is_full());
    }

    #[test]
    fn overlap_uses_box_surface() {
        let scene = SceneOracle::new(floor());
        scene.insert(crate_at(5.0, 0.0), corpse(1)).unwrap();
        let mut buffer = ColliderBuffer::new();

        // Center is 5 away, near face is 4.5 away.
        assert_eq!(scene.overlap_sphere(Vec3::ZERO, 4.6, &mut buffer), 1);
        buffer.clear();
        assert_eq!(scene.overlap_sphere(Vec3::ZERO, 4.4, &mut buffer), 0);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let scene = SceneOracle::new(floor());
        scene.insert(crate_at(0.0, 0.0), corpse(1)).unwrap();
        assert!(matches!(
            scene.insert(crate_at(1.0, 0.0), corpse(1)),
            Err(RuntimeError::DuplicateObject(LootId(1)))
        ));
    }

    #[test]
    fn despawned_objects_stop_classifying() {
        let scene = SceneOracle::new(floor());
        let handle = scene.insert(crate_at(0.0, 0.0), corpse(1)).unwrap();

        assert!(scene.despawn(LootId(1)));
        assert!(scene.classify(handle).is_none());
        assert!(!scene.despawn(LootId(1)));
    }

    #[test]
    fn snapping_clamps_onto_floor() {
        let scene = SceneOracle::new(floor());
        let snapped = scene.snap_to_walkable(Vec3::new(10.5, -0.4, 0.0), 1.0);
        assert_eq!(snapped, Some(Vec3::new(10.0, 0.0, 0.0)));
        assert_eq!(scene.snap_to_walkable(Vec3::new(13.0, 0.0, 0.0), 1.0), None);
    }

    #[test]
    fn path_length_is_horizontal_distance() {
        let scene = SceneOracle::new(floor());
        let length = scene.path_length(Vec3::new(0.0, 0.0, 0.0), Vec3::new(3.0, 2.0, 4.0));
        assert_eq!(length, Some(5.0));
        assert_eq!(scene.path_length(Vec3::ZERO, Vec3::new(20.0, 0.0, 0.0)), None);
    }

    #[test]
    fn container_contents_are_reachable() {
        let scene = SceneOracle::new(floor());
        let info = ContainerInfo {
            id: LootId(3),
            locked: false,
            active: true,
        };
        scene
            .insert_container(
                crate_at(1.0, 1.0),
                info,
                Container::new(LootId(3), vec![Grid::new(2, 2)]),
            )
            .unwrap();

        let added = scene.with_container(LootId(3), |container| {
            container.grids_mut()[0].add(Item::new(ItemId(1), 1, 1))
        });

        assert_eq!(added, Some(Some(loot_core::GridOffset::ORIGIN)));
        assert_eq!(scene.container(LootId(3)).map(|c| c.item_count()), Some(1));
        assert!(scene.with_container(LootId(4), |_| ()).is_none());
    }
}
