//! Bot-versus-bot simulation.

use alloc::boxed::Box;
use alloc::string::String;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::common::{AttackResult, GameError};
use crate::config::GameConfig;
use crate::game::{RoundOutcome, TurnEngine};
use crate::observer::GameObserver;
use crate::player::Player;

/// Result of a simulated game.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct SimSummary {
    pub winner: String,
    pub winner_seat: usize,
    pub turns: usize,
    pub hits: [usize; 2],
    pub misses: [usize; 2],
}

/// Play a full game between two bots. `seed_one` lays out the first fleet
/// and `seed_two` the second; the engine's own RNG mixes both.
pub fn simulate(
    config: &GameConfig,
    seed_one: u64,
    seed_two: u64,
    observer: Box<dyn GameObserver>,
) -> Result<SimSummary, GameError> {
    let mut rng_one = SmallRng::seed_from_u64(seed_one);
    let mut rng_two = SmallRng::seed_from_u64(seed_two);
    let one = Player::bot("player1", config, &mut rng_one)?;
    let two = Player::bot("player2", config, &mut rng_two)?;

    let engine_rng = SmallRng::seed_from_u64(seed_one.rotate_left(32) ^ seed_two);
    let mut engine = TurnEngine::new(config.clone(), engine_rng)?.with_observer(observer);
    engine.start_game(one, two)?;

    let RoundOutcome::Finished(last) = engine.run()? else {
        return Err(GameError::AwaitingInput);
    };

    let mut hits = [0; 2];
    let mut misses = [0; 2];
    for record in engine.history() {
        match record.result {
            AttackResult::Hit => hits[record.player] += 1,
            AttackResult::Miss => misses[record.player] += 1,
            AttackResult::AlreadyAttacked | AttackResult::OutOfBounds => {}
        }
    }
    let winner = engine
        .winner()
        .map(|p| p.name.clone())
        .unwrap_or_default();
    Ok(SimSummary {
        winner,
        winner_seat: last.player,
        turns: engine.turns(),
        hits,
        misses,
    })
}
