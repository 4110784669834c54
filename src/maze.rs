use anyhow::{anyhow, bail, Context};
use serde::Deserialize;
use std::collections::VecDeque;
use std::str::FromStr;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
}

impl Cell {
    pub fn new(row: usize, column: usize) -> Self {
        Cell { row, column }
    }

    /// Display label: column first, rows counted upwards from the bottom edge.
    pub fn label(&self, size: usize) -> String {
        debug_assert!(self.row < size, "{:?} is outside a {size}x{size} maze", self);
        format!("{}{}", self.column, size - 1 - self.row)
    }

    pub fn manhattan(&self, other: &Cell) -> usize {
        self.row.abs_diff(other.row) + self.column.abs_diff(other.column)
    }

    // One step in `direction`, or None when that leaves a `size` x `size` grid.
    fn step(self, direction: Direction, size: usize) -> Option<Cell> {
        match direction {
            Direction::North => (self.row > 0).then(|| Cell::new(self.row - 1, self.column)),
            Direction::South => {
                (self.row + 1 < size).then(|| Cell::new(self.row + 1, self.column))
            }
            Direction::East => {
                (self.column + 1 < size).then(|| Cell::new(self.row, self.column + 1))
            }
            Direction::West => (self.column > 0).then(|| Cell::new(self.row, self.column - 1)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Neighbor expansion order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];
}

/// Which directions may be taken when leaving a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Passages {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

impl Passages {
    pub const fn new(north: bool, south: bool, east: bool, west: bool) -> Self {
        Passages {
            north,
            south,
            east,
            west,
        }
    }

    pub fn allows(&self, direction: Direction) -> bool {
        match direction {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }
}

/// Parses letter sets such as `"ESW"`. The empty string means a dead end.
impl FromStr for Passages {
    type Err = anyhow::Error;

    fn from_str(letters: &str) -> Result<Self, Self::Err> {
        let mut passages = Passages::default();
        for letter in letters.trim().chars() {
            let flag = match letter.to_ascii_uppercase() {
                'N' => &mut passages.north,
                'S' => &mut passages.south,
                'E' => &mut passages.east,
                'W' => &mut passages.west,
                _ => bail!("unknown direction {letter:?} in {letters:?}"),
            };
            if *flag {
                bail!("direction {letter:?} repeated in {letters:?}");
            }
            *flag = true;
        }
        Ok(passages)
    }
}

const REFERENCE_SIZE: usize = 4;

#[rustfmt::skip]
const REFERENCE_PASSAGES: [Passages; REFERENCE_SIZE * REFERENCE_SIZE] = [
    // row 0
    Passages::new(false, false, true, false),
    Passages::new(false, false, true, true),
    Passages::new(false, true, true, true),
    Passages::new(false, true, false, true),
    // row 1
    Passages::new(false, true, true, false),
    Passages::new(false, false, true, true),
    Passages::new(true, false, false, true),
    Passages::new(true, false, false, false),
    // row 2
    Passages::new(true, true, true, false),
    Passages::new(false, false, true, true),
    Passages::new(false, false, true, true),
    Passages::new(false, true, false, true),
    // row 3
    Passages::new(true, false, false, false),
    Passages::new(false, false, true, false),
    Passages::new(false, false, true, true),
    Passages::new(true, false, false, true),
];

#[derive(Debug, Deserialize)]
struct MazeYaml {
    size: usize,
    start: [usize; 2],
    goal: [usize; 2],
    rows: Vec<Vec<String>>,
}

/// A square maze with per-cell exits. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    size: usize,
    passages: Vec<Passages>, // row-major
    start: Cell,
    goal: Cell,
}

impl Maze {
    pub fn new(
        size: usize,
        passages: Vec<Passages>,
        start: Cell,
        goal: Cell,
    ) -> anyhow::Result<Self> {
        if size == 0 {
            bail!("maze size must be at least 1");
        }
        let Some(cell_count) = size.checked_mul(size) else {
            bail!("maze size {size} is too large");
        };
        if passages.len() != cell_count {
            bail!(
                "expected {cell_count} passage sets for a {size}x{size} maze, got {}",
                passages.len()
            );
        }

        let maze = Maze {
            size,
            passages,
            start,
            goal,
        };
        for (name, cell) in [("start", start), ("goal", goal)] {
            if !maze.contains(cell) {
                bail!("{name} {cell:?} is outside the {size}x{size} maze");
            }
        }
        Ok(maze)
    }

    /// The hard-coded 4x4 maze, from (0, 0) to (3, 3).
    pub fn reference() -> Self {
        Maze {
            size: REFERENCE_SIZE,
            passages: REFERENCE_PASSAGES.to_vec(),
            start: Cell::new(0, 0),
            goal: Cell::new(REFERENCE_SIZE - 1, REFERENCE_SIZE - 1),
        }
    }

    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let raw: MazeYaml = serde_yaml::from_str(yaml)?;

        if raw.rows.len() != raw.size {
            bail!("expected {} rows, got {}", raw.size, raw.rows.len());
        }
        let Some(cell_count) = raw.size.checked_mul(raw.size) else {
            bail!("maze size {} is too large", raw.size);
        };
        let mut passages = Vec::with_capacity(cell_count);
        for (row, cells) in raw.rows.iter().enumerate() {
            if cells.len() != raw.size {
                bail!("row {row}: expected {} cells, got {}", raw.size, cells.len());
            }
            for (column, letters) in cells.iter().enumerate() {
                passages.push(
                    letters
                        .parse::<Passages>()
                        .with_context(|| format!("cell ({row}, {column})"))?,
                );
            }
        }

        Maze::new(
            raw.size,
            passages,
            Cell::new(raw.start[0], raw.start[1]),
            Cell::new(raw.goal[0], raw.goal[1]),
        )
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|err| anyhow!("failed to open maze file {path:?}: {err}"))?;
        let maze =
            Maze::from_yaml_str(&yaml).with_context(|| format!("error with maze file: {path}"))?;
        info!("Loaded {}x{} maze from {path}", maze.size, maze.size);
        Ok(maze)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.size && cell.column < self.size
    }

    pub fn passages(&self, cell: Cell) -> Passages {
        self.passages[self.index(cell)]
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.size)
            .flat_map(move |row| (0..self.size).map(move |column| Cell::new(row, column)))
    }

    /// Cells reachable in one step, in north, south, east, west order.
    /// An open passage on the border leads nowhere.
    pub fn neighbors(&self, cell: Cell) -> Vec<Cell> {
        debug_assert!(self.contains(cell), "{cell:?} is outside the maze");
        let passages = self.passages(cell);
        Direction::ALL
            .iter()
            .filter(|&&direction| passages.allows(direction))
            .filter_map(|&direction| cell.step(direction, self.size))
            .collect()
    }

    /// Manhattan distance to the goal.
    pub fn heuristic(&self, cell: Cell) -> usize {
        cell.manhattan(&self.goal)
    }

    /// True number of steps from every cell to the goal, indexed
    /// `[row][column]`. `None` where the goal cannot be reached.
    ///
    /// Passages are one-way, so this walks the reversed edges outwards from
    /// the goal.
    pub fn distances_to_goal(&self) -> Vec<Vec<Option<usize>>> {
        let mut predecessors = vec![Vec::new(); self.size * self.size];
        for cell in self.cells() {
            for next in self.neighbors(cell) {
                predecessors[self.index(next)].push(cell);
            }
        }

        let mut distances = vec![vec![None; self.size]; self.size];
        distances[self.goal.row][self.goal.column] = Some(0);
        let mut queue = VecDeque::from([(self.goal, 0)]);

        while let Some((cell, distance)) = queue.pop_front() {
            for &prev in &predecessors[self.index(cell)] {
                if distances[prev.row][prev.column].is_none() {
                    distances[prev.row][prev.column] = Some(distance + 1);
                    queue.push_back((prev, distance + 1));
                }
            }
        }

        debug!("distances to {:?}: {distances:?}", self.goal);
        distances
    }

    fn index(&self, cell: Cell) -> usize {
        cell.row * self.size + cell.column
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_neighbors() {
        let maze = Maze::reference();

        assert_eq!(maze.size(), 4);
        assert_eq!(maze.start(), Cell::new(0, 0));
        assert_eq!(maze.goal(), Cell::new(3, 3));

        assert_eq!(maze.neighbors(Cell::new(0, 0)), vec![Cell::new(0, 1)]);
        // South, east, west in that order.
        assert_eq!(
            maze.neighbors(Cell::new(0, 2)),
            vec![Cell::new(1, 2), Cell::new(0, 3), Cell::new(0, 1)]
        );
        assert_eq!(
            maze.neighbors(Cell::new(2, 0)),
            vec![Cell::new(1, 0), Cell::new(3, 0), Cell::new(2, 1)]
        );
        assert_eq!(
            maze.neighbors(Cell::new(3, 3)),
            vec![Cell::new(2, 3), Cell::new(3, 2)]
        );
    }

    #[test]
    fn test_neighbors_respect_border() {
        let maze = Maze::from_file("maze_file/test/open.yaml").unwrap();

        assert_eq!(
            maze.neighbors(Cell::new(0, 0)),
            vec![Cell::new(1, 0), Cell::new(0, 1)]
        );
        assert_eq!(
            maze.neighbors(Cell::new(2, 2)),
            vec![Cell::new(1, 2), Cell::new(2, 1)]
        );
        assert_eq!(maze.neighbors(Cell::new(1, 1)).len(), 4);

        for cell in maze.cells() {
            assert!(maze.neighbors(cell).iter().all(|&next| maze.contains(next)));
        }
    }

    #[test]
    fn test_read_reference_file() {
        let maze = Maze::from_file("maze_file/reference.yaml").unwrap();
        assert_eq!(maze, Maze::reference());
    }

    #[test]
    fn test_parse_passages() {
        assert_eq!(
            "ESW".parse::<Passages>().unwrap(),
            Passages::new(false, true, true, true)
        );
        assert_eq!(
            "wn".parse::<Passages>().unwrap(),
            Passages::new(true, false, false, true)
        );
        assert_eq!("".parse::<Passages>().unwrap(), Passages::default());
        assert!("NX".parse::<Passages>().is_err());
        assert!("NEN".parse::<Passages>().is_err());
    }

    #[test]
    fn test_reject_malformed_maze() {
        let passages = vec![Passages::default(); 4];
        assert!(Maze::new(2, passages.clone(), Cell::new(0, 0), Cell::new(1, 1)).is_ok());
        assert!(Maze::new(2, passages.clone(), Cell::new(0, 0), Cell::new(2, 1)).is_err());
        assert!(Maze::new(2, passages.clone(), Cell::new(0, 5), Cell::new(1, 1)).is_err());
        assert!(Maze::new(3, passages, Cell::new(0, 0), Cell::new(1, 1)).is_err());
        assert!(Maze::new(0, Vec::new(), Cell::new(0, 0), Cell::new(0, 0)).is_err());
        assert!(Maze::new(usize::MAX, Vec::new(), Cell::new(0, 0), Cell::new(0, 0)).is_err());

        let short_row = "size: 2\nstart: [0, 0]\ngoal: [1, 1]\nrows:\n  - [E, S]\n  - [N]\n";
        assert!(Maze::from_yaml_str(short_row).is_err());
        let bad_letter = "size: 1\nstart: [0, 0]\ngoal: [0, 0]\nrows:\n  - [Q]\n";
        assert!(Maze::from_yaml_str(bad_letter).is_err());
    }

    #[test]
    fn test_distances_to_goal() {
        let maze = Maze::reference();
        let distances = maze.distances_to_goal();

        assert_eq!(distances[0][0], Some(10));
        assert_eq!(distances[3][3], Some(0));
        assert_eq!(distances[3][1], Some(2));
        assert_eq!(distances[3][0], Some(5));

        for cell in maze.cells() {
            let distance = distances[cell.row][cell.column].unwrap();
            assert!(maze.heuristic(cell) <= distance);
        }
    }

    #[test]
    fn test_distances_unreachable() {
        let maze = Maze::from_file("maze_file/test/disconnected.yaml").unwrap();
        let distances = maze.distances_to_goal();

        for row in 0..3 {
            assert_eq!(distances[row][0], None);
        }
        assert_eq!(distances[1][1], Some(2));
    }

    #[test]
    fn test_label() {
        assert_eq!(Cell::new(0, 0).label(4), "03");
        assert_eq!(Cell::new(3, 3).label(4), "30");
        assert_eq!(Cell::new(1, 2).label(4), "22");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "outside a 4x4 maze")]
    fn test_label_outside_maze() {
        Cell::new(4, 0).label(4);
    }
}
