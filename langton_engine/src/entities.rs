use crate::grid::Cell;
use serde::{Deserialize, Serialize};

/// Represents the direction the ant is facing.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Heading {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "W")]
    West,
}

impl Heading {
    /// Headings in clockwise order, starting from north.
    pub const ALL: [Heading; 4] = [
        Heading::North,
        Heading::East,
        Heading::South,
        Heading::West,
    ];

    /// The heading after a 90° turn to the right.
    pub fn clockwise(self) -> Heading {
        Heading::ALL[(self.index() + 1) % 4]
    }

    /// The heading after a 90° turn to the left.
    pub fn counter_clockwise(self) -> Heading {
        Heading::ALL[(self.index() + 3) % 4]
    }

    /// The one-letter code used in the state document.
    pub fn code(self) -> char {
        match self {
            Heading::North => 'N',
            Heading::East => 'E',
            Heading::South => 'S',
            Heading::West => 'W',
        }
    }

    fn index(self) -> usize {
        match self {
            Heading::North => 0,
            Heading::East => 1,
            Heading::South => 2,
            Heading::West => 3,
        }
    }
}

/// The automaton's only mobile agent.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Ant {
    pub x: i64,
    pub y: i64,
    pub direction: Heading,
}

impl Ant {
    pub fn new(x: i64, y: i64, direction: Heading) -> Self {
        Ant { x, y, direction }
    }

    /// The cell the ant is standing on.
    pub fn cell(&self) -> Cell {
        Cell::new(self.x, self.y)
    }

    /// Moves one cell along the current heading.
    ///
    /// North is `+y`, so the plane is laid out the mathematical way round and
    /// not like screen rows.
    pub fn advance(&mut self) {
        match self.direction {
            Heading::North => self.y += 1,
            Heading::East => self.x += 1,
            Heading::South => self.y -= 1,
            Heading::West => self.x -= 1,
        }
    }
}

impl Default for Ant {
    fn default() -> Self {
        Ant::new(0, 0, Heading::North)
    }
}
