//! Commonly used types and utilities for ease of import.

pub use crate::{
    AttackResult, Board, BoardError, GameConfig, GameError, GameObserver, Orientation, Phase,
    Player, RoundOutcome, ShipId, TurnEngine,
};

#[cfg(feature = "std")]
pub use crate::cli::{coord_to_string, parse_coord, TerminalObserver};
