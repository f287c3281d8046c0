//! Rectangular cell grids holding placed items.

use crate::error::{ErrorSeverity, LootError};

use super::{Item, ItemId};

/// Cell offset of an item's top-left corner inside a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridOffset {
    pub x: u8,
    pub y: u8,
}

impl GridOffset {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

/// An item at a fixed offset inside a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlacedItem {
    pub item: Item,
    pub offset: GridOffset,
}

impl PlacedItem {
    fn overlaps(&self, item: &Item, offset: GridOffset) -> bool {
        let (ax, ay) = (u32::from(self.offset.x), u32::from(self.offset.y));
        let (bx, by) = (u32::from(offset.x), u32::from(offset.y));
        ax < bx + u32::from(item.width)
            && bx < ax + u32::from(self.item.width)
            && ay < by + u32::from(item.height)
            && by < ay + u32::from(self.item.height)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("{item} at ({x}, {y}) does not fit inside the grid", x = .offset.x, y = .offset.y)]
    OutOfBounds { item: ItemId, offset: GridOffset },

    #[error("{item} at ({x}, {y}) overlaps a placed item", x = .offset.x, y = .offset.y)]
    Overlap { item: ItemId, offset: GridOffset },
}

impl LootError for GridError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "GRID_OUT_OF_BOUNDS",
            Self::Overlap { .. } => "GRID_OVERLAP",
        }
    }
}

/// A `width × height` cell array belonging to a container.
///
/// # Invariants
///
/// - Every placed item lies fully inside the grid.
/// - No two placed items overlap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u8,
    height: u8,
    placed: Vec<PlacedItem>,
}

impl Grid {
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            placed: Vec::new(),
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Total cells.
    pub fn area(&self) -> u32 {
        u32::from(self.width) * u32::from(self.height)
    }

    pub fn items(&self) -> &[PlacedItem] {
        &self.placed
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    /// Cells covered by placed items.
    pub fn contained_area(&self) -> u32 {
        self.placed.iter().map(|placed| placed.item.area()).sum()
    }

    pub fn free_cells(&self) -> u32 {
        self.area().saturating_sub(self.contained_area())
    }

    pub fn offset_of(&self, item: ItemId) -> Option<GridOffset> {
        self.placed
            .iter()
            .find(|placed| placed.item.id == item)
            .map(|placed| placed.offset)
    }

    fn in_bounds(&self, item: &Item, offset: GridOffset) -> bool {
        u32::from(offset.x) + u32::from(item.width) <= u32::from(self.width)
            && u32::from(offset.y) + u32::from(item.height) <= u32::from(self.height)
    }

    /// Returns true if `item` can sit at `offset` without leaving the grid or
    /// overlapping anything.
    pub fn fits_at(&self, item: &Item, offset: GridOffset) -> bool {
        self.in_bounds(item, offset)
            && !self
                .placed
                .iter()
                .any(|placed| placed.overlaps(item, offset))
    }

    /// First free offset for `item`, scanning rows top to bottom and cells
    /// left to right.
    pub fn find_free_space(&self, item: &Item) -> Option<GridOffset> {
        if item.width > self.width || item.height > self.height || item.area() > self.free_cells()
        {
            return None;
        }
        for y in 0..=(self.height - item.height) {
            for x in 0..=(self.width - item.width) {
                let offset = GridOffset::new(x, y);
                if self.fits_at(item, offset) {
                    return Some(offset);
                }
            }
        }
        None
    }

    /// Places `item` at `offset`.
    ///
    /// # Errors
    ///
    /// Returns `GridError::OutOfBounds` or `GridError::Overlap` and leaves the
    /// grid untouched.
    pub fn place(&mut self, item: Item, offset: GridOffset) -> Result<(), GridError> {
        if !self.in_bounds(&item, offset) {
            return Err(GridError::OutOfBounds {
                item: item.id,
                offset,
            });
        }
        if self.placed.iter().any(|placed| placed.overlaps(&item, offset)) {
            return Err(GridError::Overlap {
                item: item.id,
                offset,
            });
        }
        self.placed.push(PlacedItem { item, offset });
        Ok(())
    }

    /// Places `item` at the first free offset, if any.
    pub fn add(&mut self, item: Item) -> Option<GridOffset> {
        let offset = self.find_free_space(&item)?;
        self.placed.push(PlacedItem { item, offset });
        Some(offset)
    }

    /// Empties the grid and returns what it held.
    pub fn remove_all(&mut self) -> Vec<PlacedItem> {
        std::mem::take(&mut self.placed)
    }

    /// Replaces the contents with a previously captured layout.
    pub(crate) fn restore(&mut self, layout: Vec<PlacedItem>) {
        self.placed = layout;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, width: u8, height: u8) -> Item {
        Item::new(ItemId(id), width, height)
    }

    #[test]
    fn find_free_space_scans_row_major() {
        let mut grid = Grid::new(3, 2);
        assert_eq!(grid.add(item(1, 2, 1)), Some(GridOffset::new(0, 0)));
        assert_eq!(grid.add(item(2, 1, 1)), Some(GridOffset::new(2, 0)));
        assert_eq!(grid.add(item(3, 2, 1)), Some(GridOffset::new(0, 1)));
        assert_eq!(grid.free_cells(), 1);
        assert_eq!(grid.add(item(4, 2, 1)), None);
    }

    #[test]
    fn place_rejects_overlap_and_out_of_bounds() {
        let mut grid = Grid::new(2, 2);
        grid.place(item(1, 1, 2), GridOffset::new(1, 0)).unwrap();

        assert_eq!(
            grid.place(item(2, 2, 1), GridOffset::new(0, 1)),
            Err(GridError::Overlap {
                item: ItemId(2),
                offset: GridOffset::new(0, 1)
            })
        );
        assert!(matches!(
            grid.place(item(3, 1, 1), GridOffset::new(2, 0)),
            Err(GridError::OutOfBounds { .. })
        ));
        assert_eq!(grid.items().len(), 1);
    }

    #[test]
    fn oversized_item_never_fits() {
        let grid = Grid::new(2, 2);
        assert_eq!(grid.find_free_space(&item(1, 3, 1)), None);
        assert_eq!(grid.find_free_space(&item(1, 1, 3)), None);
    }

    #[test]
    fn remove_all_empties_grid() {
        let mut grid = Grid::new(2, 2);
        grid.add(item(1, 1, 1));
        grid.add(item(2, 1, 1));
        let removed = grid.remove_all();
        assert_eq!(removed.len(), 2);
        assert!(grid.is_empty());
        assert_eq!(grid.free_cells(), 4);
    }
}
