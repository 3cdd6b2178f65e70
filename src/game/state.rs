use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A coordinate on the game grid
///
/// `x` grows to the east, `y` grows to the south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// Content of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    Empty,
    Fruit,
    SnakeHead,
    SnakeBody,
    Wall,
}

impl CellType {
    /// Parse a level-map symbol
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(CellType::Empty),
            'O' => Some(CellType::Fruit),
            'S' => Some(CellType::SnakeHead),
            's' => Some(CellType::SnakeBody),
            '#' => Some(CellType::Wall),
            _ => None,
        }
    }

    /// Level-map symbol for this cell
    pub fn symbol(self) -> char {
        match self {
            CellType::Empty => '.',
            CellType::Fruit => 'O',
            CellType::SnakeHead => 'S',
            CellType::SnakeBody => 's',
            CellType::Wall => '#',
        }
    }

    /// Whether moving the snake head onto this cell kills it
    pub fn is_deadly(self) -> bool {
        matches!(self, CellType::Wall | CellType::SnakeBody)
    }
}

/// Immutable snapshot of the grid handed out to agents and front-ends
///
/// Cells are stored row-major. The snapshot owns its cells, so nothing done
/// to it can reach the environment that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    width: usize,
    height: usize,
    cells: Vec<CellType>,
}

impl Observation {
    pub(crate) fn new(width: usize, height: usize, cells: Vec<CellType>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at `point`, or `None` outside the grid
    pub fn get(&self, point: Point) -> Option<CellType> {
        if point.x < 0 || point.y < 0 {
            return None;
        }
        let (x, y) = (point.x as usize, point.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y * self.width + x])
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[CellType] {
        &self.cells
    }

    /// Iterate over rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[CellType]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Number of cells holding `cell_type`
    pub fn count(&self, cell_type: CellType) -> usize {
        self.cells.iter().filter(|&&c| c == cell_type).count()
    }

    /// Coordinates of every cell holding `cell_type`, row-major
    pub fn positions_of(&self, cell_type: CellType) -> Vec<Point> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == cell_type)
            .map(|(i, _)| Point::new((i % self.width) as i32, (i / self.width) as i32))
            .collect()
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}
