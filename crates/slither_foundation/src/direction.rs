//! Movement directions and their wire encoding.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind};

/// One of the four grid movement directions.
///
/// The discriminants are the 0-3 encoding used by input layers: 0 is up,
/// 1 is left, 2 is down, 3 is right. `Up` decreases `y`, `Left` decreases
/// `x`. The grid has no wraparound in any direction.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Direction {
    /// Toward smaller `y`.
    Up = 0,
    /// Toward smaller `x`.
    Left = 1,
    /// Toward larger `y`.
    Down = 2,
    /// Toward larger `x`.
    Right = 3,
}

impl Direction {
    /// All four directions, in encoding order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    /// Returns the direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Left => Direction::Right,
            Direction::Down => Direction::Up,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns true if `other` points the opposite way.
    ///
    /// A snake with a body may not reverse into its own neck, so this is
    /// the check behind direction-change rejection.
    #[must_use]
    pub const fn is_opposite(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the `(dx, dy)` coordinate offset of one step this way.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Down => (0, 1),
            Direction::Right => (1, 0),
        }
    }

    /// Returns the 0-3 encoding of this direction.
    #[must_use]
    pub const fn encode(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Direction {
    type Error = Error;

    /// Decodes a 0-3 direction code.
    ///
    /// An out-of-range code is a programming error on the caller's side
    /// and is rejected loudly rather than clamped.
    fn try_from(code: u8) -> Result<Self, Error> {
        match code {
            0 => Ok(Direction::Up),
            1 => Ok(Direction::Left),
            2 => Ok(Direction::Down),
            3 => Ok(Direction::Right),
            _ => Err(Error::new(ErrorKind::InvalidDirection(code))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Left => "left",
            Direction::Down => "down",
            Direction::Right => "right",
        };
        write!(f, "{name}")
    }
}
