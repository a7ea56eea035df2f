//! Common types for Broadside: errors, attack results and cell states.

use alloc::string::String;
use core::fmt;

/// Outcome of an attack on a board.
///
/// The numeric codes (see [`AttackResult::code`]) are the ones handed to
/// renderers: hit=0, miss=1, already attacked=2, out of bounds=-1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackResult {
    /// The attack struck a ship segment.
    Hit,
    /// The attack landed on open water.
    Miss,
    /// The cell had already been hit or missed; nothing changed.
    AlreadyAttacked,
    /// The coordinate lies outside the grid; nothing changed.
    OutOfBounds,
}

impl AttackResult {
    /// Status code reported to the renderer.
    pub const fn code(self) -> i8 {
        match self {
            AttackResult::Hit => 0,
            AttackResult::Miss => 1,
            AttackResult::AlreadyAttacked => 2,
            AttackResult::OutOfBounds => -1,
        }
    }

    /// Whether the attack consumed a fresh cell.
    pub const fn is_fresh(self) -> bool {
        matches!(self, AttackResult::Hit | AttackResult::Miss)
    }
}

/// Attack-log status of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Untouched,
    Intact,
    Hit,
    Miss,
}

/// Errors returned by Ship and Board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Malformed argument, e.g. a zero ship length or zero board size.
    InvalidArgument,
    /// Coordinate, or part of a ship, lies outside the grid.
    OutOfBounds,
    /// Target cell is already occupied by another ship.
    Occupied,
    /// Target cell touches another ship, orthogonally or diagonally.
    Adjacent,
    /// Target cell has already been attacked, or the ship has taken hits.
    Attacked,
    /// A ship with this id is already on the board.
    DuplicateId,
    /// No ship with this id is on the board.
    NotFound,
}

impl BoardError {
    /// True for the reasons a placement can be rejected with.
    pub fn is_placement_rejection(&self) -> bool {
        matches!(
            self,
            BoardError::OutOfBounds
                | BoardError::Occupied
                | BoardError::Adjacent
                | BoardError::Attacked
        )
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidArgument => write!(f, "Invalid argument"),
            BoardError::OutOfBounds => write!(f, "Coordinate is out of bounds"),
            BoardError::Occupied => write!(f, "Ship placement overlaps with another ship"),
            BoardError::Adjacent => write!(f, "Ship placement touches another ship"),
            BoardError::Attacked => write!(f, "Ship placement covers an attacked cell"),
            BoardError::DuplicateId => write!(f, "A ship with this id is already on the board"),
            BoardError::NotFound => write!(f, "Ship not found on the board"),
        }
    }
}

impl core::error::Error for BoardError {}

/// Errors returned by the turn engine.
///
/// `NotStarted` and `GameOver` signal caller misuse of the game flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A game-flow operation was called before `start_game`.
    NotStarted,
    /// The session has ended; only a new `start_game` is accepted.
    GameOver,
    /// `start_game` was called while a session is running.
    AlreadyInProgress,
    /// A player's board does not match the configured size.
    BoardSizeMismatch { expected: usize, found: usize },
    /// A player's board does not hold exactly the configured fleet.
    IncompleteFleet { player: String },
    /// The bot has no un-attacked cell left to target.
    NoTargetsLeft,
    /// The engine is waiting for a human move where none can be supplied.
    AwaitingInput,
    /// Underlying board error.
    Board(BoardError),
}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        GameError::Board(err)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::NotStarted => write!(f, "Game has not been started"),
            GameError::GameOver => write!(f, "Game is over"),
            GameError::AlreadyInProgress => write!(f, "A game is already in progress"),
            GameError::BoardSizeMismatch { expected, found } => {
                write!(f, "Board size {} does not match configured size {}", found, expected)
            }
            GameError::IncompleteFleet { player } => {
                write!(f, "Board of {} does not hold the configured fleet", player)
            }
            GameError::NoTargetsLeft => write!(f, "No un-attacked cells left"),
            GameError::AwaitingInput => write!(f, "Game is waiting for a human move"),
            GameError::Board(e) => write!(f, "Board error: {}", e),
        }
    }
}

impl core::error::Error for GameError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            GameError::Board(e) => Some(e),
            _ => None,
        }
    }
}
