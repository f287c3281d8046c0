//! Lootable world objects as seen by the scanner.
//!
//! The world adapter resolves each collider to a [`LootObject`] exactly once;
//! everything downstream matches on the variant instead of probing the
//! collider again.

use super::{AgentId, Bounds, Item, LootId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum LootKind {
    Corpse,
    Container,
    Item,
}

/// Opaque handle of a world collider, owned by the world adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColliderHandle(pub u32);

/// Collider reported by an overlap query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Collider {
    pub handle: ColliderHandle,
    pub bounds: Bounds,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CorpseInfo {
    pub id: LootId,
    /// Agent this body belonged to. `None` for static, pre-placed bodies.
    pub owner: Option<AgentId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContainerInfo {
    pub id: LootId,
    pub locked: bool,
    /// Inactive containers are hidden or disabled by the world.
    pub active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LooseItem {
    pub id: LootId,
    pub item: Item,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LootObject {
    Corpse(CorpseInfo),
    Container(ContainerInfo),
    Item(LooseItem),
}

impl LootObject {
    pub fn kind(&self) -> LootKind {
        match self {
            Self::Corpse(_) => LootKind::Corpse,
            Self::Container(_) => LootKind::Container,
            Self::Item(_) => LootKind::Item,
        }
    }

    pub fn id(&self) -> LootId {
        match self {
            Self::Corpse(corpse) => corpse.id,
            Self::Container(container) => container.id,
            Self::Item(loose) => loose.id,
        }
    }
}
