//! Grid labels - world position to a map grid reference like "M12"
//!
//! Rows are lettered A-Z along the world Z axis, columns are numbered along
//! the X axis. Columns are not clamped: positions far outside the playable
//! area simply produce large (or negative) column numbers.

use glam::Vec3;
use std::fmt;

/// Width and depth of a single grid cell in world units
pub const GRID_SIZE: f32 = 146.3;

/// Offset applied so that the map origin lands in the middle of the grid
pub const GRID_OFFSET: f32 = 3000.0;

/// Highest row index (Z); there are only 26 letters
pub const MAX_ROW: i32 = 25;

/// A single cell of the map grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    /// Column number (X axis), unclamped
    pub column: i32,
    /// Row index (Z axis), 0..=25
    pub row: i32,
}

impl GridCell {
    /// Locate the cell containing a world position. The Y axis is ignored.
    pub fn from_position(position: Vec3) -> Self {
        let column = ((position.x + GRID_OFFSET) / GRID_SIZE).floor() as i32;
        let row = ((position.z + GRID_OFFSET) / GRID_SIZE).floor() as i32;

        GridCell {
            column,
            row: row.clamp(0, MAX_ROW),
        }
    }

    /// Row letter, 'A' through 'Z'
    pub fn letter(&self) -> char {
        (b'A' + self.row.clamp(0, MAX_ROW) as u8) as char
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter(), self.column)
    }
}

/// Human-readable grid label for a world position
pub fn grid_label(position: Vec3) -> String {
    GridCell::from_position(position).to_string()
}
