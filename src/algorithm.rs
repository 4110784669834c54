mod astar;

pub use astar::{a_star_search, find_path};

use crate::common::{Path, SearchNode};

// Follows parent links from `current` back to the start node.
fn construct_path(nodes: &[SearchNode], mut current: usize) -> Path {
    let mut path = vec![nodes[current].cell];
    while let Some(parent) = nodes[current].parent {
        path.push(nodes[parent].cell);
        current = parent;
    }
    path.reverse();
    path
}
