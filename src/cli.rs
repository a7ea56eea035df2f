//! Terminal helpers: coordinate parsing and a printing observer.

#![cfg(feature = "std")]

use std::string::String;

use crate::common::AttackResult;
use crate::config::MAX_BOARD_SIZE;
use crate::observer::GameObserver;
use crate::ship::Orientation;
use crate::view::{column_label, BoardView};

/// Format `(x, y)` as a column letter and 1-based row, e.g. `(0, 4)` is `A5`.
pub fn coord_to_string(x: usize, y: usize) -> String {
    format!("{}{}", column_label(x), y + 1)
}

/// Parse a coordinate such as `A5` or `j10` on a `size`×`size` board into `(x, y)`.
pub fn parse_coord(input: &str, size: usize) -> Result<(usize, usize), String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".to_string());
    }
    if input.len() < 2 {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars
        .next()
        .ok_or("No column letter")?
        .to_ascii_uppercase();
    if !col_ch.is_ascii_uppercase() {
        return Err(format!("Invalid column '{}' - must be a letter", col_ch));
    }
    let x = (col_ch as u8 - b'A') as usize;
    if x >= size.min(MAX_BOARD_SIZE) {
        return Err(format!(
            "Column '{}' out of bounds - must be A-{}",
            col_ch,
            column_label(size.min(MAX_BOARD_SIZE) - 1)
        ));
    }
    let row_str: String = chars.collect();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-{}", row_str, size))?;
    if row == 0 || row > size {
        return Err(format!("Row {} out of bounds - must be 1-{}", row, size));
    }
    Ok((x, row - 1))
}

/// Parse `H`/`V` (any case, any suffix such as `horizontal`).
pub fn parse_orientation(input: &str) -> Option<Orientation> {
    match input.trim().chars().next()?.to_ascii_uppercase() {
        'H' => Some(Orientation::Horizontal),
        'V' => Some(Orientation::Vertical),
        _ => None,
    }
}

/// Human-readable message for a move result.
pub fn describe_result(result: AttackResult) -> &'static str {
    match result {
        AttackResult::Hit => "HIT!",
        AttackResult::Miss => "Miss.",
        AttackResult::AlreadyAttacked => "That cell was already attacked, choose another.",
        AttackResult::OutOfBounds => "That cell is off the board.",
    }
}

/// Observer that prints results to stdout, and boards when `show_boards` is set.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalObserver {
    pub show_boards: bool,
}

impl GameObserver for TerminalObserver {
    fn on_boards_changed(&mut self, player: &BoardView, enemy: &BoardView) {
        if self.show_boards {
            print_boards(player, enemy);
        }
    }

    fn on_move_result(&mut self, result: AttackResult) {
        println!("{}", describe_result(result));
    }

    fn on_game_over(&mut self, winner: &str) {
        println!("\n=== GAME OVER: {} wins ===", winner);
    }
}

/// Print the masked enemy board above the player's own board.
pub fn print_boards(player: &BoardView, enemy: &BoardView) {
    println!("\nEnemy waters:");
    print!("{}", enemy);
    println!("Your fleet:");
    print!("{}", player);
    println!("Legend: S=Ship  X=Hit  o=Miss  .=Water");
}
