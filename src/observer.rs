//! Outbound notifications from the turn engine to a renderer.

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::common::AttackResult;
use crate::view::BoardView;

/// Receiver of engine notifications. Every method defaults to a no-op.
pub trait GameObserver {
    /// Called after every board mutation with the active player's own board
    /// and a masked view of the enemy board.
    fn on_boards_changed(&mut self, _player: &BoardView, _enemy: &BoardView) {}

    /// Called with the result of every attack the engine resolves.
    fn on_move_result(&mut self, _result: AttackResult) {}

    /// Called once when a session ends.
    fn on_game_over(&mut self, _winner: &str) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl GameObserver for NullObserver {}

/// A notification as recorded by [`RecordingObserver`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum GameEvent {
    BoardsChanged { player: BoardView, enemy: BoardView },
    MoveResult(AttackResult),
    GameOver { winner: String },
}

/// Observer that appends every notification to a shared log.
///
/// Clones share the same log, so one handle can be given to the engine and
/// another kept for inspection.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every event recorded so far.
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    /// Move results in the order they were reported.
    pub fn move_results(&self) -> Vec<AttackResult> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                GameEvent::MoveResult(r) => Some(*r),
                _ => None,
            })
            .collect()
    }
}

impl GameObserver for RecordingObserver {
    fn on_boards_changed(&mut self, player: &BoardView, enemy: &BoardView) {
        self.events.borrow_mut().push(GameEvent::BoardsChanged {
            player: player.clone(),
            enemy: enemy.clone(),
        });
    }

    fn on_move_result(&mut self, result: AttackResult) {
        self.events.borrow_mut().push(GameEvent::MoveResult(result));
    }

    fn on_game_over(&mut self, winner: &str) {
        self.events.borrow_mut().push(GameEvent::GameOver {
            winner: winner.to_string(),
        });
    }
}
