//! Game board: ship arena, cell occupancy and the attack log.
//!
//! Cells hold an index into the ship arena rather than the ship itself, so a
//! ship is stored once no matter how many cells it covers. Cells are laid out
//! row-major: `x` is the column, `y` the row.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use crate::common::{AttackResult, BoardError, CellState};
use crate::config::{fleet_fits, GameConfig};
use crate::ship::{Orientation, Ship, ShipClass, ShipId};
use crate::view::{BoardView, ViewCell};

/// Random samples tried for one ship before the whole layout is restarted.
const SAMPLES_PER_SHIP: usize = 1_000;

/// Whole-layout restarts before `randomize` gives up.
const MAX_LAYOUTS: usize = 200;

/// Offsets of the 8-connected neighbourhood.
const NEIGHBOURS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Option<usize>>,
    ships: Vec<Option<Ship>>,
    attack_log: Vec<CellState>,
    sunk_count: usize,
}

impl Board {
    /// Create an empty `size`×`size` board.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::InvalidArgument);
        }
        let area = size.checked_mul(size).ok_or(BoardError::InvalidArgument)?;
        Ok(Board {
            size,
            cells: vec![None; area],
            ships: Vec::new(),
            attack_log: vec![CellState::Untouched; area],
            sunk_count: 0,
        })
    }

    /// Create an empty board sized by the configuration.
    pub fn from_config(config: &GameConfig) -> Result<Self, BoardError> {
        Self::new(config.board_size)
    }

    /// Fixed board dimension.
    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.size && y < self.size).then(|| y * self.size + x)
    }

    fn coord(&self, idx: usize) -> (usize, usize) {
        (idx % self.size, idx / self.size)
    }

    /// Ship occupying `(x, y)`, if any. Out-of-bounds coordinates are an error.
    pub fn peek(&self, x: usize, y: usize) -> Result<Option<&Ship>, BoardError> {
        let idx = self.index(x, y).ok_or(BoardError::OutOfBounds)?;
        Ok(self.cells[idx].and_then(|slot| self.ships[slot].as_ref()))
    }

    /// Attack-log status of `(x, y)`. Coordinates never recorded, including
    /// those outside the grid, are `Untouched`.
    pub fn state(&self, x: usize, y: usize) -> CellState {
        self.index(x, y)
            .map(|idx| self.attack_log[idx])
            .unwrap_or_default()
    }

    fn slot_of(&self, id: ShipId) -> Option<usize> {
        self.ships
            .iter()
            .position(|s| s.is_some_and(|ship| ship.id() == id))
    }

    /// Ship with the given id.
    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.slot_of(id).and_then(|slot| self.ships[slot].as_ref())
    }

    /// Ships currently on the board, in arena order.
    pub fn ships(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter().flatten()
    }

    pub fn ship_count(&self) -> usize {
        self.ships().count()
    }

    pub fn sunk_count(&self) -> usize {
        self.sunk_count
    }

    /// Sorted multiset of the lengths of the ships on the board.
    pub fn fleet_lengths(&self) -> Vec<usize> {
        let mut lengths: Vec<usize> = self.ships().map(Ship::length).collect();
        lengths.sort_unstable();
        lengths
    }

    /// First cell in row-major order occupied by ship `id`.
    pub fn root(&self, id: ShipId) -> Option<(usize, usize)> {
        let slot = self.slot_of(id)?;
        self.cells
            .iter()
            .position(|&c| c == Some(slot))
            .map(|idx| self.coord(idx))
    }

    /// Cells occupied by ship `id`, starting at its root.
    pub fn cells_of(&self, id: ShipId) -> Vec<(usize, usize)> {
        let Some(slot) = self.slot_of(id) else {
            return Vec::new();
        };
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Some(slot))
            .map(|(idx, _)| self.coord(idx))
            .collect()
    }

    /// Validate a placement and return the target cell indices.
    ///
    /// Cells owned by the arena slot `ignore` count as free; rotation uses
    /// this to test a ship's new footprint against everything but itself.
    fn check_placement(
        &self,
        x: usize,
        y: usize,
        length: usize,
        orientation: Orientation,
        ignore: Option<usize>,
    ) -> Result<Vec<usize>, BoardError> {
        if length == 0 {
            return Err(BoardError::InvalidArgument);
        }
        let mut targets = Vec::with_capacity(length);
        for i in 0..length {
            let idx = orientation
                .step(x, y, i)
                .and_then(|(cx, cy)| self.index(cx, cy))
                .ok_or(BoardError::OutOfBounds)?;
            targets.push(idx);
        }

        let foreign = |idx: usize| self.cells[idx].is_some_and(|slot| Some(slot) != ignore);

        if targets.iter().any(|&idx| foreign(idx)) {
            return Err(BoardError::Occupied);
        }
        if targets
            .iter()
            .any(|&idx| matches!(self.attack_log[idx], CellState::Hit | CellState::Miss))
        {
            return Err(BoardError::Attacked);
        }

        for &idx in &targets {
            let (cx, cy) = self.coord(idx);
            for (dx, dy) in NEIGHBOURS {
                let neighbour = cx
                    .checked_add_signed(dx)
                    .zip(cy.checked_add_signed(dy))
                    .and_then(|(nx, ny)| self.index(nx, ny));
                if neighbour.is_some_and(|n| foreign(n)) {
                    return Err(BoardError::Adjacent);
                }
            }
        }
        Ok(targets)
    }

    /// Place a ship of `length` with its root at `(x, y)`.
    ///
    /// Either every cell is occupied or, on error, the board is untouched.
    pub fn place_ship(
        &mut self,
        x: usize,
        y: usize,
        length: usize,
        orientation: Orientation,
        id: ShipId,
    ) -> Result<(), BoardError> {
        let ship = Ship::new(length, orientation, id)?;
        if self.slot_of(id).is_some() {
            return Err(BoardError::DuplicateId);
        }
        let targets = self.check_placement(x, y, length, orientation, None)?;

        let slot = match self.ships.iter().position(Option::is_none) {
            Some(free) => {
                self.ships[free] = Some(ship);
                free
            }
            None => {
                self.ships.push(Some(ship));
                self.ships.len() - 1
            }
        };
        for idx in targets {
            self.cells[idx] = Some(slot);
            self.attack_log[idx] = CellState::Intact;
        }
        log::debug!("placed ship {} len {} at ({}, {}) {:?}", id, length, x, y, orientation);
        Ok(())
    }

    /// Free the cells of `slot`. Attacked cells keep their log entry so a
    /// repeat attack stays `AlreadyAttacked`.
    fn clear_slot(&mut self, slot: usize) {
        for idx in 0..self.cells.len() {
            if self.cells[idx] == Some(slot) {
                self.cells[idx] = None;
                if self.attack_log[idx] == CellState::Intact {
                    self.attack_log[idx] = CellState::Untouched;
                }
            }
        }
    }

    /// Remove ship `id`, clearing its cells. Intact cells return to
    /// `Untouched`; hit cells stay logged as `Hit`.
    pub fn remove_ship(&mut self, id: ShipId) -> Result<Ship, BoardError> {
        let slot = self.slot_of(id).ok_or(BoardError::NotFound)?;
        self.clear_slot(slot);
        let ship = self.ships[slot].take().ok_or(BoardError::NotFound)?;
        if ship.is_sunk() {
            self.sunk_count -= 1;
        }
        log::debug!("removed ship {}", id);
        Ok(ship)
    }

    /// Flip ship `id` around its root cell.
    ///
    /// On success the opposite orientation is returned. A ship that has
    /// taken hits cannot rotate (`Attacked`). If the new footprint is blocked
    /// the ship stays exactly where it was and the rejection reason is returned.
    pub fn rotate_ship(&mut self, id: ShipId) -> Result<Orientation, BoardError> {
        let slot = self.slot_of(id).ok_or(BoardError::NotFound)?;
        let (x, y) = self.root(id).ok_or(BoardError::NotFound)?;
        let old = self.ships[slot].ok_or(BoardError::NotFound)?;
        if old.hits() > 0 {
            return Err(BoardError::Attacked);
        }
        let orientation = old.orientation().flipped();

        let targets = self.check_placement(x, y, old.length(), orientation, Some(slot))?;
        let ship = Ship::new(old.length(), orientation, id)?;

        self.clear_slot(slot);
        for idx in targets {
            self.cells[idx] = Some(slot);
            self.attack_log[idx] = CellState::Intact;
        }
        self.ships[slot] = Some(ship);
        log::debug!("rotated ship {} at ({}, {}) to {:?}", id, x, y, orientation);
        Ok(orientation)
    }

    /// Resolve an attack at `(x, y)`.
    pub fn receive_attack(&mut self, x: usize, y: usize) -> AttackResult {
        let Some(idx) = self.index(x, y) else {
            return AttackResult::OutOfBounds;
        };
        if matches!(self.attack_log[idx], CellState::Hit | CellState::Miss) {
            return AttackResult::AlreadyAttacked;
        }

        if let Some(ship) = self.cells[idx].and_then(|slot| self.ships[slot].as_mut()) {
            ship.hit();
            self.attack_log[idx] = CellState::Hit;
            if ship.is_sunk() {
                self.sunk_count += 1;
                log::debug!("ship {} sunk", ship.id());
            }
            AttackResult::Hit
        } else {
            self.attack_log[idx] = CellState::Miss;
            AttackResult::Miss
        }
    }

    /// True once every ship on a non-empty board is sunk.
    pub fn is_defeated(&self) -> bool {
        let ships = self.ship_count();
        ships > 0 && self.sunk_count == ships
    }

    /// Whether any cell is still open to attack.
    pub fn has_unattacked_cells(&self) -> bool {
        self.attack_log
            .iter()
            .any(|s| matches!(s, CellState::Untouched | CellState::Intact))
    }

    /// Remove every ship and reset the attack log.
    pub fn clear(&mut self) {
        self.cells.fill(None);
        self.attack_log.fill(CellState::Untouched);
        self.ships.clear();
        self.sunk_count = 0;
    }

    /// Replace the board contents with a random layout of `fleet`.
    ///
    /// Ship `i` of the fleet gets id `ShipId(i)`. Each ship is placed by
    /// rejection sampling a root and orientation; a ship that finds no room
    /// restarts the whole layout. Fails with `InvalidArgument` when the fleet
    /// cannot fit or no layout is found within `MAX_LAYOUTS` restarts.
    pub fn randomize<R: Rng + ?Sized>(
        &mut self,
        fleet: &[ShipClass],
        rng: &mut R,
    ) -> Result<(), BoardError> {
        if fleet
            .iter()
            .any(|class| class.length == 0 || class.length > self.size)
            || !fleet_fits(self.size, fleet)
        {
            return Err(BoardError::InvalidArgument);
        }
        'layout: for _ in 0..MAX_LAYOUTS {
            self.clear();
            for (i, class) in fleet.iter().enumerate() {
                let id = ShipId(i as u32);
                let placed = (0..SAMPLES_PER_SHIP).any(|_| {
                    let x = rng.random_range(0..self.size);
                    let y = rng.random_range(0..self.size);
                    let orientation = if rng.random() {
                        Orientation::Vertical
                    } else {
                        Orientation::Horizontal
                    };
                    self.place_ship(x, y, class.length, orientation, id).is_ok()
                });
                if !placed {
                    log::debug!("no room for {}, restarting layout", class.name);
                    continue 'layout;
                }
            }
            return Ok(());
        }
        self.clear();
        log::warn!("gave up laying out {} ships after {} attempts", fleet.len(), MAX_LAYOUTS);
        Err(BoardError::InvalidArgument)
    }

    /// Replace the board contents with a fixed layout of `fleet`: every ship
    /// vertical from the top row, in columns 0, 2, 4 and so on.
    pub fn populate_fixed(&mut self, fleet: &[ShipClass]) -> Result<(), BoardError> {
        self.clear();
        for (i, class) in fleet.iter().enumerate() {
            let id = ShipId(i as u32);
            if let Err(e) = self.place_ship(2 * i, 0, class.length, Orientation::Vertical, id) {
                self.clear();
                return Err(e);
            }
        }
        Ok(())
    }

    /// Renderer snapshot. With `reveal_ships` unset, un-hit ship cells are
    /// shown as blank water.
    pub fn view(&self, reveal_ships: bool) -> BoardView {
        let cells = self
            .attack_log
            .iter()
            .map(|state| match state {
                CellState::Hit => ViewCell::Hit,
                CellState::Miss => ViewCell::Miss,
                CellState::Intact if reveal_ships => ViewCell::Ship,
                CellState::Intact | CellState::Untouched => ViewCell::Blank,
            })
            .collect();
        BoardView::new(self.size, cells)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  size: {},\n  sunk: {}/{},\n  ships: {:?}\n}}",
            self.size,
            self.sunk_count,
            self.ship_count(),
            self.ships().collect::<Vec<_>>(),
        )
    }
}
