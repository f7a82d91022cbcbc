//! The A* closed set, keyed by a Cantor pairing of `(row, col)`.

use std::collections::HashMap;

use mazefinder_core::{CellId, Pos};

/// Cantor pairing `(r + c)(r + c + 1) / 2 + c`: a distinct integer for every
/// `(row, col)` pair.
#[inline]
pub fn cantor_key(p: Pos) -> u64 {
    let (r, c) = (p.row as u64, p.col as u64);
    (r + c) * (r + c + 1) / 2 + c
}

/// Cells already finalized by A*; each is stored at most once.
#[derive(Clone, Debug, Default)]
pub struct ClosedIndex {
    map: HashMap<u64, CellId>,
}

impl ClosedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cell. Returns `false` if it was already closed.
    pub fn insert(&mut self, p: Pos, id: CellId) -> bool {
        match self.map.entry(cantor_key(p)) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(v) => {
                v.insert(id);
                true
            }
        }
    }

    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        self.map.contains_key(&cantor_key(p))
    }

    #[inline]
    pub fn get(&self, p: Pos) -> Option<CellId> {
        self.map.get(&cantor_key(p)).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazefinder_core::Grid;
    use std::collections::HashSet;

    #[test]
    fn cantor_values() {
        assert_eq!(cantor_key(Pos::new(0, 0)), 0);
        assert_eq!(cantor_key(Pos::new(1, 0)), 1);
        assert_eq!(cantor_key(Pos::new(0, 1)), 2);
        assert_eq!(cantor_key(Pos::new(2, 0)), 3);
        assert_eq!(cantor_key(Pos::new(1, 1)), 4);
    }

    #[test]
    fn cantor_is_collision_free_on_a_grid() {
        let mut seen = HashSet::new();
        for row in 0..64 {
            for col in 0..64 {
                assert!(seen.insert(cantor_key(Pos::new(row, col))));
            }
        }
    }

    #[test]
    fn insert_deduplicates() {
        let grid = Grid::new(3).unwrap();
        let p = Pos::new(1, 2);
        let id = grid.id(p).unwrap();
        let mut closed = ClosedIndex::new();
        assert!(closed.insert(p, id));
        assert!(!closed.insert(p, id));
        assert_eq!(closed.len(), 1);
        assert_eq!(closed.get(p), Some(id));
        assert!(!closed.contains(Pos::new(2, 1)));
        closed.clear();
        assert!(closed.is_empty());
    }
}
