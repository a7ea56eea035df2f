//! Ship definitions: classes, ids, orientation and hit tracking.
//!
//! A ship knows nothing about coordinates; the board tracks where it lies.

use alloc::string::String;
use core::fmt;

use crate::common::BoardError;

/// Orientation of a ship on the board.
///
/// A vertical ship grows along `y` (down the rows), a horizontal one along `x`
/// (across the columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The opposite orientation.
    pub const fn flipped(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    pub const fn is_vertical(self) -> bool {
        matches!(self, Orientation::Vertical)
    }

    /// Cell `i` segments away from the root `(x, y)`, or `None` on overflow.
    pub(crate) fn step(self, x: usize, y: usize, i: usize) -> Option<(usize, usize)> {
        match self {
            Orientation::Vertical => Some((x, y.checked_add(i)?)),
            Orientation::Horizontal => Some((x.checked_add(i)?, y)),
        }
    }
}

/// Identifier of a ship, stable for the ship's lifetime on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipId(pub u32);

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A class of ship in a fleet: name and length.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipClass {
    pub name: String,
    pub length: usize,
}

impl ShipClass {
    /// Create a new ship class.
    pub fn new(name: impl Into<String>, length: usize) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }
}

/// A ship with a fixed length and a saturating hit counter.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    id: ShipId,
    length: usize,
    orientation: Orientation,
    hits: usize,
}

impl Ship {
    /// Construct an undamaged ship. A zero length is rejected.
    pub fn new(length: usize, orientation: Orientation, id: ShipId) -> Result<Self, BoardError> {
        if length == 0 {
            return Err(BoardError::InvalidArgument);
        }
        Ok(Ship {
            id,
            length,
            orientation,
            hits: 0,
        })
    }

    /// Register one hit. Hitting a sunk ship changes nothing.
    pub fn hit(&mut self) {
        if !self.is_sunk() {
            self.hits += 1;
        }
    }

    /// Check if the ship is sunk (every segment hit).
    pub fn is_sunk(&self) -> bool {
        self.hits == self.length
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Number of hits taken so far, never above `length`.
    pub fn hits(&self) -> usize {
        self.hits
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ id: {}, length: {}, orientation: {:?}, hits: {} }}",
            self.id, self.length, self.orientation, self.hits,
        )
    }
}
