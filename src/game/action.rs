use serde::{Deserialize, Serialize};

use super::state::Point;

/// Heading of the snake
///
/// Ordered clockwise; turning right advances one step through [`Direction::ALL`],
/// turning left goes back one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions in clockwise order
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Returns the unit offset for moving in this direction
    pub fn offset(self) -> Point {
        match self {
            Direction::North => Point::new(0, -1),
            Direction::East => Point::new(1, 0),
            Direction::South => Point::new(0, 1),
            Direction::West => Point::new(-1, 0),
        }
    }

    /// Direction one quarter turn clockwise
    pub fn turned_right(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Direction one quarter turn counter-clockwise
    pub fn turned_left(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Returns the direction whose offset equals `offset`, if any
    pub fn from_offset(offset: Point) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.offset() == offset)
    }

    fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }
}

/// Action an agent can take before a timestep
///
/// Actions are relative to the current heading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Keep moving in the current direction
    #[default]
    MaintainDirection,
    /// Rotate the heading counter-clockwise
    TurnLeft,
    /// Rotate the heading clockwise
    TurnRight,
    /// Swap head and tail and move away from the old tail
    ReverseDirection,
}

impl Action {
    /// The default action set offered to agents
    pub const CORE: [Action; 3] = [Action::MaintainDirection, Action::TurnLeft, Action::TurnRight];

    /// Every action, in statistics column order
    pub const ALL: [Action; 4] = [
        Action::MaintainDirection,
        Action::TurnLeft,
        Action::TurnRight,
        Action::ReverseDirection,
    ];

    /// Stable position of this action inside [`Action::ALL`]
    pub fn index(self) -> usize {
        match self {
            Action::MaintainDirection => 0,
            Action::TurnLeft => 1,
            Action::TurnRight => 2,
            Action::ReverseDirection => 3,
        }
    }

    /// Short column name used in episode records
    pub fn name(self) -> &'static str {
        match self {
            Action::MaintainDirection => "maintain_direction",
            Action::TurnLeft => "turn_left",
            Action::TurnRight => "turn_right",
            Action::ReverseDirection => "reverse_direction",
        }
    }

    /// Parse a one-letter action code: `M`, `L`, `R` or `B` (back)
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'M' => Some(Action::MaintainDirection),
            'L' => Some(Action::TurnLeft),
            'R' => Some(Action::TurnRight),
            'B' => Some(Action::ReverseDirection),
            _ => None,
        }
    }
}
