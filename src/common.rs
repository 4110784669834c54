use std::cmp::Ordering;

use crate::maze::Cell;

/// Cells from start to goal, both included. Empty when the goal is unreachable.
pub type Path = Vec<Cell>;

// Arena node; `parent` indexes the arena, `None` only for the start node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SearchNode {
    pub(crate) cell: Cell,
    pub(crate) g_cost: usize,
    pub(crate) h_cost: usize,
    pub(crate) parent: Option<usize>,
}

impl SearchNode {
    pub(crate) fn f_cost(&self) -> usize {
        self.g_cost + self.h_cost
    }
}

// Open list entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OpenEntry {
    pub(crate) f_cost: usize,
    pub(crate) h_cost: usize,
    pub(crate) id: usize,
}

impl OpenEntry {
    pub(crate) fn new(node: &SearchNode, id: usize) -> Self {
        OpenEntry {
            f_cost: node.f_cost(),
            h_cost: node.h_cost,
            id,
        }
    }
}

// Reversed so that `BinaryHeap` pops the lowest f cost first.
impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_cost
            .cmp(&self.f_cost)
            // Closer to the goal wins when f cost is equal.
            .then_with(|| other.h_cost.cmp(&self.h_cost))
            // Then first pushed, first popped.
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
