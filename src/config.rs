use alloc::vec::Vec;

use crate::common::BoardError;
use crate::ship::ShipClass;

pub const BOARD_SIZE: usize = 10;

/// Largest board whose columns can be labelled with a single letter.
pub const MAX_BOARD_SIZE: usize = 26;

/// Fleet lengths of the standard variant.
pub const STANDARD_FLEET: [(&str, usize); 5] = [
    ("Carrier", 5),
    ("Battleship", 4),
    ("Cruiser", 3),
    ("Submarine", 3),
    ("Destroyer", 2),
];

/// Fleet lengths of the compact variant, with a shorter submarine.
pub const COMPACT_FLEET: [(&str, usize); 5] = [
    ("Carrier", 5),
    ("Battleship", 4),
    ("Cruiser", 3),
    ("Submarine", 2),
    ("Destroyer", 2),
];

/// Immutable game configuration: board dimension and fleet composition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    pub board_size: usize,
    pub fleet: Vec<ShipClass>,
}

impl GameConfig {
    pub fn new(board_size: usize, fleet: Vec<ShipClass>) -> Result<Self, BoardError> {
        let config = Self { board_size, fleet };
        config.validate()?;
        Ok(config)
    }

    /// 10×10 board with lengths {5,4,3,3,2}.
    pub fn standard() -> Self {
        Self::from_table(&STANDARD_FLEET)
    }

    /// 10×10 board with lengths {5,4,3,2,2}.
    pub fn compact() -> Self {
        Self::from_table(&COMPACT_FLEET)
    }

    fn from_table(table: &[(&str, usize)]) -> Self {
        Self {
            board_size: BOARD_SIZE,
            fleet: table
                .iter()
                .map(|&(name, length)| ShipClass::new(name, length))
                .collect(),
        }
    }

    /// Reject a board outside `1..=MAX_BOARD_SIZE`, an empty fleet, classes
    /// that are empty or longer than the board, and fleets too large to fit
    /// with a gap around every ship.
    pub fn validate(&self) -> Result<(), BoardError> {
        if self.board_size == 0 || self.board_size > MAX_BOARD_SIZE || self.fleet.is_empty() {
            return Err(BoardError::InvalidArgument);
        }
        if self
            .fleet
            .iter()
            .any(|class| class.length == 0 || class.length > self.board_size)
        {
            return Err(BoardError::InvalidArgument);
        }
        if !fleet_fits(self.board_size, &self.fleet) {
            return Err(BoardError::InvalidArgument);
        }
        Ok(())
    }

    /// Sorted multiset of fleet lengths.
    pub fn fleet_lengths(&self) -> Vec<usize> {
        let mut lengths: Vec<usize> = self.fleet.iter().map(|c| c.length).collect();
        lengths.sort_unstable();
        lengths
    }

    /// Total number of ship segments in the fleet.
    pub fn total_ship_cells(&self) -> usize {
        self.fleet.iter().map(|c| c.length).sum()
    }

    /// Load and validate a configuration from a JSON file.
    #[cfg(feature = "std")]
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: GameConfig = serde_json::from_str(&text)?;
        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Necessary condition for a no-touching layout: grown by half a cell on
/// every side, ships become disjoint `(len + 1) x 2` rectangles inside a
/// `(size + 1)` square.
pub(crate) fn fleet_fits(board_size: usize, fleet: &[ShipClass]) -> bool {
    let side = board_size.saturating_add(1);
    let area = side.saturating_mul(side);
    let needed = fleet
        .iter()
        .fold(0usize, |acc, c| acc.saturating_add(c.length.saturating_add(1).saturating_mul(2)));
    needed <= area
}
