//! Turn engine: owns the two players of a session and drives the turn loop.
//!
//! The engine is a state machine over [`Phase`]. A bot's turn resolves
//! synchronously; a human's turn suspends until an [`AttackCommand`] has been
//! queued with [`TurnEngine::submit_attack`]. There is no timeout on that wait.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;
use rand::rngs::SmallRng;

use crate::ai;
use crate::common::{AttackResult, GameError};
use crate::config::GameConfig;
use crate::observer::{GameObserver, NullObserver};
use crate::player::Player;

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Setup,
    InProgress,
    GameOver,
}

/// Coordinates supplied by a human for the pending move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackCommand {
    pub x: usize,
    pub y: usize,
}

/// A completed move. `player` is the seat of the attacker: 0 for the player
/// passed first to `start_game`, 1 for the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveRecord {
    pub player: usize,
    pub x: usize,
    pub y: usize,
    pub result: AttackResult,
}

/// What a call to [`TurnEngine::play_round`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// A human is to move and no command is queued.
    AwaitingInput,
    /// The human attacked a cell that was already attacked; same player again.
    Rejected { x: usize, y: usize },
    /// A move completed and the turn passed to the other player.
    Moved(MoveRecord),
    /// A move sank the last enemy ship; the mover won.
    Finished(MoveRecord),
}

pub struct TurnEngine {
    config: GameConfig,
    rng: SmallRng,
    observer: Box<dyn GameObserver>,
    phase: Phase,
    players: Option<[Player; 2]>,
    active: usize,
    winner: Option<usize>,
    commands: VecDeque<AttackCommand>,
    history: Vec<MoveRecord>,
}

impl TurnEngine {
    /// Create an engine in the `Setup` phase. The configuration is validated.
    pub fn new(config: GameConfig, rng: SmallRng) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            observer: Box::new(NullObserver),
            phase: Phase::Setup,
            players: None,
            active: 0,
            winner: None,
            commands: VecDeque::new(),
            history: Vec::new(),
        })
    }

    /// Route notifications to `observer`.
    pub fn with_observer(mut self, observer: Box<dyn GameObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Start a new session with `one` moving first.
    ///
    /// Both boards must match the configured size and hold exactly the
    /// configured fleet. Allowed from `Setup` and from `GameOver`.
    pub fn start_game(&mut self, one: Player, two: Player) -> Result<(), GameError> {
        if self.phase == Phase::InProgress {
            return Err(GameError::AlreadyInProgress);
        }
        let expected = self.config.fleet_lengths();
        for player in [&one, &two] {
            if player.board.size() != self.config.board_size {
                return Err(GameError::BoardSizeMismatch {
                    expected: self.config.board_size,
                    found: player.board.size(),
                });
            }
            if player.board.fleet_lengths() != expected {
                return Err(GameError::IncompleteFleet {
                    player: player.name.clone(),
                });
            }
        }

        log::info!("starting game: {} vs {}", one.name, two.name);
        self.players = Some([one, two]);
        self.active = 0;
        self.winner = None;
        self.commands.clear();
        self.history.clear();
        self.phase = Phase::InProgress;
        self.notify_boards();
        Ok(())
    }

    fn ensure_running(&self) -> Result<(), GameError> {
        match self.phase {
            Phase::Setup => Err(GameError::NotStarted),
            Phase::GameOver => Err(GameError::GameOver),
            Phase::InProgress => Ok(()),
        }
    }

    /// Both players, in seat order, once a session has started.
    pub fn players(&self) -> Option<&[Player; 2]> {
        self.players.as_ref()
    }

    pub fn active_player(&self) -> Option<&Player> {
        self.players.as_ref().map(|p| &p[self.active])
    }

    pub fn enemy_player(&self) -> Option<&Player> {
        self.players.as_ref().map(|p| &p[1 - self.active])
    }

    pub fn winner(&self) -> Option<&Player> {
        let seat = self.winner?;
        self.players.as_ref().map(|p| &p[seat])
    }

    /// Completed moves of the current session.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn turns(&self) -> usize {
        self.history.len()
    }

    /// True while the engine is suspended on a human move.
    pub fn awaiting_input(&self) -> bool {
        self.phase == Phase::InProgress
            && self.active_player().is_some_and(|p| !p.is_bot)
            && self.commands.is_empty()
    }

    /// Queue coordinates for the human whose turn it is.
    ///
    /// Returns `Ok(false)` and drops the command during a bot's turn.
    pub fn submit_attack(&mut self, x: usize, y: usize) -> Result<bool, GameError> {
        self.ensure_running()?;
        if self.active_player().is_some_and(|p| p.is_bot) {
            log::debug!("ignoring attack ({}, {}) submitted during a bot turn", x, y);
            return Ok(false);
        }
        self.commands.push_back(AttackCommand { x, y });
        Ok(true)
    }

    /// Play at most one move for the active player.
    pub fn play_round(&mut self) -> Result<RoundOutcome, GameError> {
        self.ensure_running()?;
        let seat = self.active;
        let Some([one, two]) = self.players.as_mut() else {
            return Err(GameError::NotStarted);
        };
        let (attacker, defender) = if seat == 0 { (one, two) } else { (two, one) };

        let (x, y, result) = if attacker.is_bot {
            let mv = ai::random_attack(&mut defender.board, &mut self.rng)?;
            log::debug!(
                "{} fires at ({}, {}) after {} discarded samples",
                attacker.name,
                mv.x,
                mv.y,
                mv.discarded
            );
            (mv.x, mv.y, mv.result)
        } else {
            let Some(AttackCommand { x, y }) = self.commands.pop_front() else {
                return Ok(RoundOutcome::AwaitingInput);
            };
            let result = defender.board.receive_attack(x, y);
            if result == AttackResult::AlreadyAttacked {
                self.observer.on_move_result(result);
                return Ok(RoundOutcome::Rejected { x, y });
            }
            (x, y, result)
        };
        let defeated = result == AttackResult::Hit && defender.board.is_defeated();
        let winner_name: Option<String> = defeated.then(|| attacker.name.clone());

        let record = MoveRecord {
            player: seat,
            x,
            y,
            result,
        };
        self.history.push(record);
        self.observer.on_move_result(result);
        self.notify_boards();

        if let Some(name) = winner_name {
            log::info!("game over after {} moves: {} wins", self.history.len(), name);
            self.phase = Phase::GameOver;
            self.winner = Some(seat);
            self.commands.clear();
            self.observer.on_game_over(&name);
            return Ok(RoundOutcome::Finished(record));
        }

        self.active = 1 - seat;
        self.commands.clear();
        Ok(RoundOutcome::Moved(record))
    }

    /// Play rounds until a human has to move or the game ends.
    pub fn run(&mut self) -> Result<RoundOutcome, GameError> {
        loop {
            match self.play_round()? {
                outcome @ (RoundOutcome::AwaitingInput | RoundOutcome::Finished(_)) => {
                    return Ok(outcome)
                }
                RoundOutcome::Moved(_) | RoundOutcome::Rejected { .. } => {}
            }
        }
    }

    fn notify_boards(&mut self) {
        if let Some(players) = &self.players {
            let player = players[self.active].board.view(true);
            let enemy = players[1 - self.active].board.view(false);
            self.observer.on_boards_changed(&player, &enemy);
        }
    }
}
