// Bot move selection: uniform random sampling over the grid, retried until a
// fresh cell is struck.

use rand::Rng;

use crate::board::Board;
use crate::common::{AttackResult, GameError};

/// A bot's official move and the samples it discarded to find it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotMove {
    pub x: usize,
    pub y: usize,
    pub result: AttackResult,
    pub discarded: usize,
}

/// Uniform random coordinate in `[0, size)²`.
pub fn random_coord<R: Rng + ?Sized>(rng: &mut R, size: usize) -> (usize, usize) {
    (rng.random_range(0..size), rng.random_range(0..size))
}

/// Attack `board` at random coordinates until the result is a hit or a miss.
///
/// Only that first fresh outcome is returned; repeats never count as a move.
pub fn random_attack<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) -> Result<BotMove, GameError> {
    if !board.has_unattacked_cells() {
        return Err(GameError::NoTargetsLeft);
    }
    let mut discarded = 0;
    loop {
        let (x, y) = random_coord(rng, board.size());
        let result = board.receive_attack(x, y);
        if result.is_fresh() {
            return Ok(BotMove {
                x,
                y,
                result,
                discarded,
            });
        }
        log::trace!("bot resampling after {:?} at ({}, {})", result, x, y);
        discarded += 1;
    }
}
