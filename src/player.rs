use alloc::string::String;
use rand::Rng;

use crate::board::Board;
use crate::common::BoardError;
use crate::config::GameConfig;

/// A participant: a name, a bot flag and the one board it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub is_bot: bool,
    pub board: Board,
}

impl Player {
    pub fn new(name: impl Into<String>, is_bot: bool, board: Board) -> Self {
        Self {
            name: name.into(),
            is_bot,
            board,
        }
    }

    /// Human player with an empty board sized by `config`.
    pub fn human(name: impl Into<String>, config: &GameConfig) -> Result<Self, BoardError> {
        Ok(Self::new(name, false, Board::from_config(config)?))
    }

    /// Bot player whose board is filled with a random layout of the fleet.
    pub fn bot<R: Rng + ?Sized>(
        name: impl Into<String>,
        config: &GameConfig,
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        let mut board = Board::from_config(config)?;
        board.randomize(&config.fleet, rng)?;
        Ok(Self::new(name, true, board))
    }
}
