//! Array-backed binary min-heap used as the A* open set.

use mazefinder_core::{CellId, Grid};

/// An open-set entry, keyed by `f` with `h` kept for goal-biased promotion.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OpenEntry {
    pub id: CellId,
    pub f: u32,
    pub h: u32,
}

impl OpenEntry {
    /// Snapshot the current costs of `id`.
    #[inline]
    pub fn of(grid: &Grid, id: CellId) -> Self {
        let cell = grid.cell(id);
        Self {
            id,
            f: cell.f_cost(),
            h: cell.h_cost(),
        }
    }
}

#[inline]
const fn parent(i: usize) -> usize {
    (i - 1) / 2
}

#[inline]
const fn left(i: usize) -> usize {
    2 * i + 1
}

#[inline]
const fn right(i: usize) -> usize {
    2 * i + 2
}

/// Binary min-heap over [`OpenEntry::f`].
#[derive(Clone, Debug, Default)]
pub struct MinHeap {
    items: Vec<OpenEntry>,
}

impl MinHeap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            items: Vec::with_capacity(cap),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The front entry without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&OpenEntry> {
        self.items.first()
    }

    /// Backing array in heap order.
    #[inline]
    pub fn as_slice(&self) -> &[OpenEntry] {
        &self.items
    }

    /// Append and sift up.
    pub fn insert(&mut self, entry: OpenEntry) {
        self.items.push(entry);
        let mut i = self.items.len() - 1;
        while i > 0 && self.items[i].f < self.items[parent(i)].f {
            self.items.swap(i, parent(i));
            i = parent(i);
        }
    }

    /// Remove the front entry. `None` means the open set is empty.
    pub fn extract_min(&mut self) -> Option<OpenEntry> {
        if self.items.is_empty() {
            return None;
        }
        let root = self.items.swap_remove(0);
        self.min_heapify(0);
        Some(root)
    }

    /// Move any entry closer to the goal than the current front into the
    /// front slot, scanning left to right.
    ///
    /// The array is deliberately not re-heapified afterwards; later inserts
    /// and extractions sift from wherever entries now sit.
    pub fn promote_closest(&mut self) {
        for i in 1..self.items.len() {
            if self.items[i].h < self.items[0].h {
                self.items.swap(0, i);
            }
        }
    }

    fn min_heapify(&mut self, mut i: usize) {
        let n = self.items.len();
        loop {
            let (l, r) = (left(i), right(i));
            let mut smallest = i;
            if l < n && self.items[l].f < self.items[smallest].f {
                smallest = l;
            }
            if r < n && self.items[r].f < self.items[smallest].f {
                smallest = r;
            }
            if smallest == i {
                break;
            }
            self.items.swap(i, smallest);
            i = smallest;
        }
    }
}
