//! The playing field: a rectangular grid of cells built from a level map
//!
//! Besides the cells, the field keeps an index of every empty cell. The index
//! is updated on each write so that picking a random empty cell for a fruit
//! never needs a scan of the grid.

use std::fmt;

use rand::Rng;

use super::error::{GameError, GameResult};
use super::snake::Snake;
use super::state::{CellType, Observation, Point};

/// Dense set of empty-cell coordinates with O(1) insert, remove and pick
///
/// `members` holds the coordinates; `slots[cell]` is the position of that
/// cell inside `members`, if it is a member.
#[derive(Debug, Clone, PartialEq, Eq)]
struct EmptyCells {
    members: Vec<Point>,
    slots: Vec<Option<usize>>,
}

impl EmptyCells {
    fn with_cells(cell_count: usize) -> Self {
        Self {
            members: Vec::new(),
            slots: vec![None; cell_count],
        }
    }

    fn insert(&mut self, index: usize, point: Point) {
        if self.slots[index].is_none() {
            self.slots[index] = Some(self.members.len());
            self.members.push(point);
        }
    }

    fn remove(&mut self, index: usize, width: usize) {
        let Some(slot) = self.slots[index].take() else {
            return;
        };
        self.members.swap_remove(slot);
        if let Some(&moved) = self.members.get(slot) {
            let moved_index = moved.y as usize * width + moved.x as usize;
            self.slots[moved_index] = Some(slot);
        }
    }

    fn contains(&self, index: usize) -> bool {
        self.slots[index].is_some()
    }

    fn len(&self) -> usize {
        self.members.len()
    }

    fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Point> {
        if self.members.is_empty() {
            return None;
        }
        Some(self.members[rng.gen_range(0..self.members.len())])
    }
}

/// Grid of cells plus the empty-cell index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    width: usize,
    height: usize,
    cells: Vec<CellType>,
    empty: EmptyCells,
}

impl Field {
    /// Parse a level map into a field
    ///
    /// Every row must have the same number of symbols. Recognized symbols are
    /// `S` (snake head), `s` (snake body), `#` (wall), `O` (fruit) and `.`
    /// (empty).
    pub fn build<S: AsRef<str>>(level_map: &[S]) -> GameResult<Self> {
        let height = level_map.len();
        let width = level_map
            .first()
            .map(|row| row.as_ref().chars().count())
            .unwrap_or(0);
        if width == 0 {
            return Err(GameError::EmptyLevel);
        }

        let mut cells = Vec::with_capacity(width * height);
        let mut empty = EmptyCells::with_cells(width * height);

        for (y, row) in level_map.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(GameError::RaggedLevelRow {
                    row: y,
                    expected: width,
                    found,
                });
            }

            for (x, symbol) in row.chars().enumerate() {
                let cell = CellType::from_symbol(symbol)
                    .ok_or(GameError::InvalidLevelSymbol { symbol, x, y })?;
                if cell == CellType::Empty {
                    empty.insert(cells.len(), Point::new(x as i32, y as i32));
                }
                cells.push(cell);
            }
        }

        Ok(Self {
            width,
            height,
            cells,
            empty,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `point` lies on the grid
    pub fn contains(&self, point: Point) -> bool {
        self.index_of(point).is_some()
    }

    /// Cell at `point`; anything off the grid reads as a wall
    pub fn read(&self, point: Point) -> CellType {
        self.index_of(point)
            .map_or(CellType::Wall, |index| self.cells[index])
    }

    /// Overwrite the cell at `point`, keeping the empty-cell index in sync
    ///
    /// Writes outside the grid are ignored.
    pub fn write(&mut self, point: Point, cell: CellType) {
        let Some(index) = self.index_of(point) else {
            return;
        };
        self.cells[index] = cell;
        if cell == CellType::Empty {
            self.empty.insert(index, point);
        } else {
            self.empty.remove(index, self.width);
        }
    }

    /// Location of the first snake head marker, scanning row by row
    pub fn find_snake_head(&self) -> GameResult<Point> {
        self.cells
            .iter()
            .position(|&cell| cell == CellType::SnakeHead)
            .map(|index| self.point_of(index))
            .ok_or(GameError::NoSnakeOnLevel)
    }

    /// Every cell holding `cell_type`, in row-major order
    pub fn find_all(&self, cell_type: CellType) -> Vec<Point> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == cell_type)
            .map(|(index, _)| self.point_of(index))
            .collect()
    }

    /// Uniformly chosen empty cell
    pub fn random_empty_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> GameResult<Point> {
        self.empty.pick(rng).ok_or(GameError::NoEmptyCellsAvailable)
    }

    /// Number of empty cells
    pub fn empty_cell_count(&self) -> usize {
        self.empty.len()
    }

    /// Whether `point` is tracked as an empty cell
    pub fn is_tracked_empty(&self, point: Point) -> bool {
        self.index_of(point)
            .is_some_and(|index| self.empty.contains(index))
    }

    /// Mark the snake's head and body on the grid
    pub fn place_snake(&mut self, snake: &Snake) {
        self.write(snake.head(), CellType::SnakeHead);
        for segment in snake.body().skip(1) {
            self.write(segment, CellType::SnakeBody);
        }
    }

    /// Move the snake's footprint after one step
    ///
    /// `old_tail` is `None` when the snake grew this step. The tail is vacated
    /// before the new head is checked, so a snake may move into the cell its
    /// tail just left. A new head landing on a wall or body cell is not
    /// written.
    pub fn update_footprint(&mut self, old_head: Point, old_tail: Option<Point>, new_head: Point) {
        self.write(old_head, CellType::SnakeBody);

        if let Some(tail) = old_tail {
            self.write(tail, CellType::Empty);
        }

        if !self.read(new_head).is_deadly() || old_tail == Some(new_head) {
            self.write(new_head, CellType::SnakeHead);
        }
    }

    /// Swap the head marker over to the old tail after the snake reversed
    ///
    /// `old_head` becomes body and `new_head` (the former tail) becomes the
    /// head. No other cell changes.
    pub fn reverse_footprint(&mut self, old_head: Point, new_head: Point) {
        self.write(old_head, CellType::SnakeBody);
        self.write(new_head, CellType::SnakeHead);
    }

    /// Deep copy of the grid
    pub fn observation(&self) -> Observation {
        Observation::new(self.width, self.height, self.cells.clone())
    }

    fn index_of(&self, point: Point) -> Option<usize> {
        if point.x < 0 || point.y < 0 {
            return None;
        }
        let (x, y) = (point.x as usize, point.y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    fn point_of(&self, index: usize) -> Point {
        Point::new((index % self.width) as i32, (index / self.width) as i32)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.chunks(self.width).enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}
