//! Scenario definitions: who is in the world and what they can loot.
//!
//! Scenarios carry plain data. Ids are numbers and layouts are explicit cell
//! offsets, so files stay readable; the `build_*` helpers turn them into
//! `loot-core` types and validate item placement on the way.

use loot_core::{
    AgentId, AgentRole, AgentState, Bounds, Container, Equipment, EquipmentSlot, Grid, GridError,
    GridOffset, Item, ItemCategory, ItemFlags, ItemId, LootId, Vec3,
};
use serde::{Deserialize, Serialize};

/// Flat walkable floor, axis-aligned on the horizontal plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WalkableArea {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
    /// Height of the floor.
    #[serde(default)]
    pub floor_y: f32,
}

impl WalkableArea {
    pub fn contains(&self, x: f32, z: f32) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_z..=self.max_z).contains(&z)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemSpec {
    pub id: u64,
    pub width: u8,
    pub height: u8,
    #[serde(default)]
    pub category: ItemCategory,
    #[serde(default)]
    pub quest: bool,
    #[serde(default)]
    pub single_use_key: bool,
    #[serde(default)]
    pub value: u32,
}

impl ItemSpec {
    pub fn build_item(&self) -> Item {
        let mut flags = ItemFlags::empty();
        flags.set(ItemFlags::QUEST, self.quest);
        flags.set(ItemFlags::SINGLE_USE_KEY, self.single_use_key);
        Item::new(ItemId(self.id), self.width, self.height)
            .with_category(self.category)
            .with_flags(flags)
            .with_value(self.value)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedItemSpec {
    pub item: ItemSpec,
    pub x: u8,
    pub y: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub width: u8,
    pub height: u8,
    #[serde(default)]
    pub items: Vec<PlacedItemSpec>,
}

impl GridSpec {
    /// Builds the grid, rejecting items that overlap or stick out.
    pub fn build_grid(&self) -> Result<Grid, GridError> {
        let mut grid = Grid::new(self.width, self.height);
        for placed in &self.items {
            grid.place(
                placed.item.build_item(),
                GridOffset::new(placed.x, placed.y),
            )?;
        }
        Ok(grid)
    }
}

/// Builds a container with the given grids, in file order.
pub fn build_container(id: LootId, grids: &[GridSpec]) -> Result<Container, GridError> {
    let grids = grids
        .iter()
        .map(GridSpec::build_grid)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Container::new(id, grids))
}

/// One worn container. Its loot id is only used for logging.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotSpec {
    pub slot: EquipmentSlot,
    pub grids: Vec<GridSpec>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentSpec {
    pub id: u32,
    pub name: String,
    pub role: AgentRole,
    pub position: Vec3,
    #[serde(default)]
    pub equipment: Vec<SlotSpec>,
}

impl AgentSpec {
    pub fn agent_id(&self) -> AgentId {
        AgentId(self.id)
    }

    pub fn build_equipment(&self) -> Result<Equipment, GridError> {
        self.equipment
            .iter()
            .try_fold(Equipment::new(), |equipment, spec| {
                let container = build_container(LootId(u64::from(self.id)), &spec.grids)?;
                Ok(equipment.with_slot(spec.slot, container))
            })
    }

    /// Agent state with free cells taken from `equipment`.
    pub fn build_state(&self, equipment: &Equipment) -> AgentState {
        AgentState::new(self.agent_id(), self.name.clone(), self.position, self.role)
            .with_available_cells(equipment.free_cells())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ObjectKindSpec {
    Container {
        #[serde(default)]
        locked: bool,
        #[serde(default = "default_active")]
        active: bool,
        grids: Vec<GridSpec>,
    },
    Item(ItemSpec),
    Corpse {
        /// Agent the body belonged to; `None` for bodies placed by the level.
        #[serde(default)]
        owner: Option<u32>,
    },
}

fn default_active() -> bool {
    true
}

/// A lootable object placed in the world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectSpec {
    pub id: u64,
    pub bounds: Bounds,
    pub kind: ObjectKindSpec,
}

impl ObjectSpec {
    pub fn loot_id(&self) -> LootId {
        LootId(self.id)
    }
}

/// Complete scenario file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub walkable: WalkableArea,
    #[serde(default)]
    pub agents: Vec<AgentSpec>,
    #[serde(default)]
    pub objects: Vec<ObjectSpec>,
}

impl Scenario {
    pub fn agent(&self, id: AgentId) -> Option<&AgentSpec> {
        self.agents.iter().find(|agent| agent.agent_id() == id)
    }

    pub fn object(&self, id: LootId) -> Option<&ObjectSpec> {
        self.objects.iter().find(|object| object.loot_id() == id)
    }
}
