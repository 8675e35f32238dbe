use regex::Regex;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

static CELL_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(-?\d+)\s*,\s*(-?\d+)\s*$").expect("valid cell key pattern"));

/// Marker value stored against every black cell in the state document.
const BLACK: u8 = 1;

/// An integer point on the unbounded plane.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
}

impl Cell {
    pub fn new(x: i64, y: i64) -> Self {
        Cell { x, y }
    }

    /// Parses the `"x,y"` key used by the state document.
    pub fn parse_key(key: &str) -> Option<Cell> {
        let captures = CELL_KEY.captures(key)?;
        let x = captures.get(1)?.as_str().parse().ok()?;
        let y = captures.get(2)?.as_str().parse().ok()?;

        Some(Cell::new(x, y))
    }

    pub fn key(&self) -> String {
        format!("{},{}", self.x, self.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Color of a cell. White is the color of every cell never visited.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    White,
    Black,
}

/// Sparse set of black cells.
///
/// White cells are never stored: flipping a cell to white removes it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Grid {
    black: BTreeSet<Cell>,
}

impl Grid {
    pub fn new() -> Self {
        Grid::default()
    }

    pub fn color(&self, cell: Cell) -> Color {
        if self.black.contains(&cell) {
            Color::Black
        } else {
            Color::White
        }
    }

    pub fn is_black(&self, cell: Cell) -> bool {
        self.black.contains(&cell)
    }

    /// Toggles the color of a cell and returns its new color.
    pub fn flip(&mut self, cell: Cell) -> Color {
        if self.black.remove(&cell) {
            Color::White
        } else {
            self.black.insert(cell);
            Color::Black
        }
    }

    pub fn set_black(&mut self, cell: Cell) {
        self.black.insert(cell);
    }

    /// Number of black cells.
    pub fn len(&self) -> usize {
        self.black.len()
    }

    pub fn is_empty(&self) -> bool {
        self.black.is_empty()
    }

    /// Black cells in `(x, y)` order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.black.iter().copied()
    }
}

impl FromIterator<Cell> for Grid {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Grid {
            black: iter.into_iter().collect(),
        }
    }
}

impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.black.len()))?;
        for cell in &self.black {
            map.serialize_entry(&cell.key(), &BLACK)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(GridVisitor)
    }
}

struct GridVisitor;

impl<'de> Visitor<'de> for GridVisitor {
    type Value = Grid;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of \"x,y\" keys to a black marker")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Grid, A::Error> {
        let mut grid = Grid::new();

        while let Some((key, marker)) = access.next_entry::<String, i64>()? {
            let cell = Cell::parse_key(&key)
                .ok_or_else(|| de::Error::custom(format!("invalid cell key {:?}", key)))?;

            // A zero marker is a white cell written by some other tool; keep it out
            if marker != 0 {
                grid.set_black(cell);
            }
        }

        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_flipping_a_white_cell_it_becomes_black_and_is_stored() {
        let mut grid = Grid::new();

        assert_eq!(grid.flip(Cell::new(2, -3)), Color::Black);
        assert_eq!(grid.color(Cell::new(2, -3)), Color::Black);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn when_flipping_a_black_cell_it_is_removed_from_the_grid() {
        let mut grid = Grid::new();
        grid.flip(Cell::new(0, 0));

        assert_eq!(grid.flip(Cell::new(0, 0)), Color::White);
        assert_eq!(grid.color(Cell::new(0, 0)), Color::White);
        assert!(grid.is_empty());
    }

    #[test]
    fn when_parsing_cell_keys_negative_coordinates_are_supported() {
        assert_eq!(Cell::parse_key("-4,17"), Some(Cell::new(-4, 17)));
        assert_eq!(Cell::parse_key("0, -1"), Some(Cell::new(0, -1)));
        assert_eq!(Cell::parse_key("1;2"), None);
        assert_eq!(Cell::parse_key("a,2"), None);
        assert_eq!(Cell::parse_key("1,2,3"), None);
    }

    #[test]
    fn when_serializing_a_grid_each_black_cell_becomes_a_string_key() {
        let grid: Grid = [Cell::new(0, 0), Cell::new(-1, 2)].into_iter().collect();

        let value = serde_json::to_value(&grid).unwrap();

        assert_eq!(value, serde_json::json!({ "0,0": 1, "-1,2": 1 }));
    }

    #[test]
    fn when_deserializing_a_grid_zero_markers_are_dropped() {
        let grid: Grid = serde_json::from_str(r#"{ "3,4": 1, "5,6": 0 }"#).unwrap();

        assert!(grid.is_black(Cell::new(3, 4)));
        assert!(!grid.is_black(Cell::new(5, 6)));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn when_deserializing_a_grid_with_a_malformed_key_an_error_is_returned() {
        let result = serde_json::from_str::<Grid>(r#"{ "3-4": 1 }"#);

        assert!(result.is_err());
    }
}
