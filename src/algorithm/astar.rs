use super::construct_path;
use crate::common::{OpenEntry, Path, SearchNode};
use crate::maze::{Cell, Maze};
use crate::stat::Stats;

use std::collections::{BinaryHeap, HashMap};
use std::time::Instant;
use tracing::{debug, instrument, trace};

/// Shortest path from `maze.start()` to `maze.goal()`, or an empty path.
pub fn find_path(maze: &Maze) -> Path {
    a_star_search(maze, &mut Stats::default())
}

#[instrument(skip_all, name = "a_star", fields(start = format!("{:?}", maze.start()), goal = format!("{:?}", maze.goal())), level = "debug")]
pub fn a_star_search(maze: &Maze, stats: &mut Stats) -> Path {
    let search_start_time = Instant::now();
    let start = maze.start();
    let goal = maze.goal();

    let mut nodes: Vec<SearchNode> = Vec::new();
    let mut open_list = BinaryHeap::new();
    let mut best_g_cost: HashMap<Cell, usize> = HashMap::new();

    let start_node = SearchNode {
        cell: start,
        g_cost: 0,
        h_cost: maze.heuristic(start),
        parent: None,
    };
    open_list.push(OpenEntry::new(&start_node, 0));
    nodes.push(start_node);
    best_g_cost.insert(start, 0);
    stats.generated_nodes += 1;

    // No closed list: a cell is only pushed again when its g cost strictly
    // improves, which with a consistent heuristic keeps the first goal pop
    // optimal.
    let path = loop {
        let Some(current) = open_list.pop() else {
            debug!("cannot find path");
            break Path::new();
        };
        let node = nodes[current.id];
        trace!("expand node: {node:?}");

        // Update stats.
        stats.expanded_nodes += 1;

        if node.cell == goal {
            break construct_path(&nodes, current.id);
        }

        // Assuming uniform cost.
        let tentative_g_cost = node.g_cost + 1;

        for neighbor in maze.neighbors(node.cell) {
            if tentative_g_cost >= *best_g_cost.get(&neighbor).unwrap_or(&usize::MAX) {
                continue;
            }
            best_g_cost.insert(neighbor, tentative_g_cost);

            let neighbor_node = SearchNode {
                cell: neighbor,
                g_cost: tentative_g_cost,
                h_cost: maze.heuristic(neighbor),
                parent: Some(current.id),
            };
            open_list.push(OpenEntry::new(&neighbor_node, nodes.len()));
            nodes.push(neighbor_node);
            stats.generated_nodes += 1;
        }
        trace!("open list {open_list:?}");
    };

    stats.costs = path.len().checked_sub(1);
    stats.time_us = search_start_time.elapsed().as_micros() as usize;
    debug!("path: {path:?}");
    path
}
