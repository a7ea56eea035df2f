use broadside::{
    AttackResult, Board, BoardError, CellState, GameConfig, Orientation, ShipClass, ShipId,
    ViewCell,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn board() -> Board {
    Board::new(10).unwrap()
}

/// Every occupied cell's 8 neighbours are empty or belong to the same ship.
fn assert_no_touching(board: &Board) {
    let n = board.size() as isize;
    for x in 0..n {
        for y in 0..n {
            let Some(ship) = board.peek(x as usize, y as usize).unwrap() else {
                continue;
            };
            for dx in -1..=1 {
                for dy in -1..=1 {
                    let (nx, ny) = (x + dx, y + dy);
                    if nx < 0 || ny < 0 || nx >= n || ny >= n {
                        continue;
                    }
                    if let Some(other) = board.peek(nx as usize, ny as usize).unwrap() {
                        assert_eq!(other.id(), ship.id(), "ships touch at ({}, {})", nx, ny);
                    }
                }
            }
        }
    }
}

#[test]
fn test_zero_size_rejected() {
    assert_eq!(Board::new(0).unwrap_err(), BoardError::InvalidArgument);
}

#[test]
fn test_vertical_ship_attack_sequence() {
    let mut board = board();
    board.place_ship(0, 0, 2, Orientation::Vertical, ShipId(1)).unwrap();
    assert_eq!(board.cells_of(ShipId(1)), vec![(0, 0), (0, 1)]);
    assert_eq!(board.state(0, 0), CellState::Intact);

    assert_eq!(board.receive_attack(0, 0), AttackResult::Hit);
    assert!(!board.ship(ShipId(1)).unwrap().is_sunk());
    assert_eq!(board.receive_attack(0, 1), AttackResult::Hit);
    assert!(board.ship(ShipId(1)).unwrap().is_sunk());
    assert_eq!(board.sunk_count(), 1);

    assert_eq!(board.receive_attack(5, 5), AttackResult::Miss);
    assert_eq!(board.state(5, 5), CellState::Miss);
    assert_eq!(board.receive_attack(0, 0), AttackResult::AlreadyAttacked);
    assert_eq!(board.receive_attack(5, 5), AttackResult::AlreadyAttacked);
    assert_eq!(board.sunk_count(), 1);
}

#[test]
fn test_attack_out_of_bounds() {
    let mut board = board();
    assert_eq!(board.receive_attack(10, 0), AttackResult::OutOfBounds);
    assert_eq!(board.receive_attack(0, 10), AttackResult::OutOfBounds);
    assert_eq!(board.receive_attack(usize::MAX, 3), AttackResult::OutOfBounds);
    assert_eq!(AttackResult::OutOfBounds.code(), -1);
    assert_eq!(AttackResult::AlreadyAttacked.code(), 2);
}

#[test]
fn test_peek_and_state_bounds() {
    let mut board = board();
    board.place_ship(3, 3, 1, Orientation::Horizontal, ShipId(9)).unwrap();
    assert_eq!(board.peek(3, 3).unwrap().map(|s| s.id()), Some(ShipId(9)));
    assert!(board.peek(4, 4).unwrap().is_none());
    assert_eq!(board.peek(10, 0).unwrap_err(), BoardError::OutOfBounds);
    assert_eq!(board.state(10, 10), CellState::Untouched);
    assert_eq!(board.state(4, 4), CellState::Untouched);
}

#[test]
fn test_adjacent_placements_rejected() {
    let mut board = board();
    board.place_ship(0, 0, 2, Orientation::Vertical, ShipId(0)).unwrap();

    // edge-to-edge
    assert_eq!(
        board.place_ship(1, 0, 2, Orientation::Vertical, ShipId(1)),
        Err(BoardError::Adjacent)
    );
    // below the bow
    assert_eq!(
        board.place_ship(0, 2, 3, Orientation::Horizontal, ShipId(1)),
        Err(BoardError::Adjacent)
    );
    // corner-to-corner
    assert_eq!(
        board.place_ship(1, 2, 3, Orientation::Horizontal, ShipId(1)),
        Err(BoardError::Adjacent)
    );
    // overlapping
    assert_eq!(
        board.place_ship(0, 1, 3, Orientation::Horizontal, ShipId(1)),
        Err(BoardError::Occupied)
    );
    assert_eq!(board.ship_count(), 1);

    // two cells apart is fine
    board.place_ship(2, 0, 2, Orientation::Vertical, ShipId(1)).unwrap();
    board.place_ship(0, 3, 3, Orientation::Horizontal, ShipId(2)).unwrap();
    assert_eq!(board.ship_count(), 3);
    assert_no_touching(&board);
}

#[test]
fn test_placement_past_edge_rejected() {
    let mut board = board();
    assert_eq!(
        board.place_ship(0, 6, 5, Orientation::Vertical, ShipId(0)),
        Err(BoardError::OutOfBounds)
    );
    assert_eq!(
        board.place_ship(6, 0, 5, Orientation::Horizontal, ShipId(0)),
        Err(BoardError::OutOfBounds)
    );
    assert_eq!(board.ship_count(), 0);
    board.place_ship(5, 5, 5, Orientation::Vertical, ShipId(0)).unwrap();
    assert_eq!(board.cells_of(ShipId(0)).last(), Some(&(5, 9)));
}

#[test]
fn test_duplicate_id_rejected() {
    let mut board = board();
    board.place_ship(0, 0, 2, Orientation::Vertical, ShipId(3)).unwrap();
    assert_eq!(
        board.place_ship(5, 5, 2, Orientation::Vertical, ShipId(3)),
        Err(BoardError::DuplicateId)
    );
    assert_eq!(
        board.place_ship(5, 5, 0, Orientation::Vertical, ShipId(4)),
        Err(BoardError::InvalidArgument)
    );
    // the id is checked before the footprint
    assert_eq!(
        board.place_ship(9, 9, 4, Orientation::Vertical, ShipId(3)),
        Err(BoardError::DuplicateId)
    );
}

#[test]
fn test_remove_ship_clears_cells() {
    let mut board = board();
    board.place_ship(2, 2, 3, Orientation::Horizontal, ShipId(5)).unwrap();
    board.receive_attack(3, 2);
    let removed = board.remove_ship(ShipId(5)).unwrap();
    assert_eq!(removed.length(), 3);
    for x in 2..5 {
        assert!(board.peek(x, 2).unwrap().is_none());
    }
    assert_eq!(board.state(2, 2), CellState::Untouched);
    assert_eq!(board.state(3, 2), CellState::Hit);
    assert_eq!(board.state(4, 2), CellState::Untouched);
    assert_eq!(board.remove_ship(ShipId(5)), Err(BoardError::NotFound));
    assert_eq!(board.root(ShipId(5)), None);

    // freed space is usable again
    board.place_ship(2, 1, 3, Orientation::Vertical, ShipId(5)).unwrap();
}

#[test]
fn test_attack_record_survives_placement_and_removal() {
    let mut board = board();
    assert_eq!(board.receive_attack(5, 5), AttackResult::Miss);
    assert_eq!(
        board.place_ship(5, 5, 1, Orientation::Vertical, ShipId(0)),
        Err(BoardError::Attacked)
    );
    assert_eq!(
        board.place_ship(5, 3, 3, Orientation::Vertical, ShipId(0)),
        Err(BoardError::Attacked)
    );
    assert_eq!(board.ship_count(), 0);
    assert_eq!(board.receive_attack(5, 5), AttackResult::AlreadyAttacked);

    board.place_ship(0, 0, 2, Orientation::Horizontal, ShipId(1)).unwrap();
    assert_eq!(board.receive_attack(0, 0), AttackResult::Hit);
    board.remove_ship(ShipId(1)).unwrap();
    assert_eq!(board.receive_attack(0, 0), AttackResult::AlreadyAttacked);
    assert_eq!(board.receive_attack(1, 0), AttackResult::Miss);
}

#[test]
fn test_damaged_ship_cannot_rotate() {
    let mut board = board();
    board.place_ship(4, 4, 3, Orientation::Vertical, ShipId(0)).unwrap();
    assert_eq!(board.receive_attack(4, 5), AttackResult::Hit);
    assert_eq!(board.rotate_ship(ShipId(0)), Err(BoardError::Attacked));
    assert_eq!(board.cells_of(ShipId(0)), vec![(4, 4), (4, 5), (4, 6)]);
    assert_eq!(board.state(4, 5), CellState::Hit);
    assert_eq!(board.receive_attack(4, 5), AttackResult::AlreadyAttacked);

    // an intact ship cannot swing onto a missed cell either
    board.place_ship(0, 0, 3, Orientation::Vertical, ShipId(1)).unwrap();
    assert_eq!(board.receive_attack(2, 0), AttackResult::Miss);
    assert_eq!(board.rotate_ship(ShipId(1)), Err(BoardError::Attacked));
    assert_eq!(board.ship(ShipId(1)).unwrap().orientation(), Orientation::Vertical);
}

#[test]
fn test_remove_sunk_ship_updates_count() {
    let mut board = board();
    board.place_ship(0, 0, 1, Orientation::Vertical, ShipId(0)).unwrap();
    board.place_ship(5, 5, 1, Orientation::Vertical, ShipId(1)).unwrap();
    board.receive_attack(0, 0);
    assert_eq!(board.sunk_count(), 1);
    board.remove_ship(ShipId(0)).unwrap();
    assert_eq!(board.sunk_count(), 0);
    assert!(!board.is_defeated());
}

#[test]
fn test_root_is_first_cell_in_row_major_order() {
    let mut board = board();
    board.place_ship(4, 2, 3, Orientation::Vertical, ShipId(0)).unwrap();
    board.place_ship(6, 7, 3, Orientation::Horizontal, ShipId(1)).unwrap();
    assert_eq!(board.root(ShipId(0)), Some((4, 2)));
    assert_eq!(board.root(ShipId(1)), Some((6, 7)));
    assert_eq!(board.root(ShipId(2)), None);
}

#[test]
fn test_rotate_round_trip() {
    let mut board = board();
    board.place_ship(4, 4, 3, Orientation::Vertical, ShipId(0)).unwrap();

    assert_eq!(board.rotate_ship(ShipId(0)), Ok(Orientation::Horizontal));
    assert_eq!(board.cells_of(ShipId(0)), vec![(4, 4), (5, 4), (6, 4)]);
    assert_eq!(board.state(4, 5), CellState::Untouched);
    assert_eq!(board.state(6, 4), CellState::Intact);

    assert_eq!(board.rotate_ship(ShipId(0)), Ok(Orientation::Vertical));
    assert_eq!(board.root(ShipId(0)), Some((4, 4)));
    assert_eq!(board.cells_of(ShipId(0)), vec![(4, 4), (4, 5), (4, 6)]);
}

#[test]
fn test_blocked_rotation_keeps_ship() {
    let mut board = board();
    board.place_ship(0, 0, 3, Orientation::Vertical, ShipId(0)).unwrap();
    board.place_ship(2, 0, 2, Orientation::Vertical, ShipId(1)).unwrap();

    assert_eq!(board.rotate_ship(ShipId(0)), Err(BoardError::Occupied));
    let ship = board.ship(ShipId(0)).unwrap();
    assert_eq!(ship.orientation(), Orientation::Vertical);
    assert_eq!(board.cells_of(ShipId(0)), vec![(0, 0), (0, 1), (0, 2)]);
    assert_eq!(board.ship_count(), 2);

    board.place_ship(8, 5, 3, Orientation::Vertical, ShipId(2)).unwrap();
    assert_eq!(board.rotate_ship(ShipId(2)), Err(BoardError::OutOfBounds));
    assert_eq!(board.root(ShipId(2)), Some((8, 5)));

    assert_eq!(board.rotate_ship(ShipId(42)), Err(BoardError::NotFound));
}

#[test]
fn test_rotation_ignores_own_cells() {
    let mut board = board();
    board.place_ship(0, 4, 1, Orientation::Vertical, ShipId(0)).unwrap();
    assert_eq!(board.rotate_ship(ShipId(0)), Ok(Orientation::Horizontal));
    assert_eq!(board.cells_of(ShipId(0)), vec![(0, 4)]);
}

#[test]
fn test_defeat_only_after_whole_fleet_sunk() {
    let mut board = board();
    assert!(!board.is_defeated());
    board.place_ship(0, 0, 2, Orientation::Vertical, ShipId(0)).unwrap();
    board.place_ship(5, 5, 1, Orientation::Vertical, ShipId(1)).unwrap();

    board.receive_attack(0, 0);
    board.receive_attack(0, 1);
    assert!(!board.is_defeated());
    board.receive_attack(9, 9);
    assert!(!board.is_defeated());
    board.receive_attack(5, 5);
    assert!(board.is_defeated());

    board.receive_attack(5, 5);
    board.receive_attack(3, 3);
    assert!(board.is_defeated());
}

#[test]
fn test_enemy_view_masks_ships() {
    let mut board = board();
    board.place_ship(1, 1, 3, Orientation::Horizontal, ShipId(0)).unwrap();
    board.receive_attack(2, 1);
    board.receive_attack(7, 7);

    let enemy = board.view(false);
    assert_eq!(enemy.count(ViewCell::Ship), 0);
    assert_eq!(enemy.get(1, 1), Some(ViewCell::Blank));
    assert_eq!(enemy.get(2, 1), Some(ViewCell::Hit));
    assert_eq!(enemy.get(7, 7), Some(ViewCell::Miss));
    assert_eq!(enemy.get(10, 0), None);

    let own = board.view(true);
    assert_eq!(own.count(ViewCell::Ship), 2);
    assert_eq!(own.count(ViewCell::Hit), 1);
    let text = own.to_string();
    assert!(text.contains(" A B C"));
    assert_eq!(text.lines().count(), 11);
}

#[test]
fn test_populate_fixed_layout() {
    let config = GameConfig::standard();
    let mut board = Board::from_config(&config).unwrap();
    board.populate_fixed(&config.fleet).unwrap();
    assert_eq!(board.fleet_lengths(), config.fleet_lengths());
    assert_eq!(board.root(ShipId(0)), Some((0, 0)));
    assert_eq!(board.root(ShipId(4)), Some((8, 0)));
    assert_eq!(board.ship(ShipId(0)).unwrap().orientation(), Orientation::Vertical);
    assert_no_touching(&board);

    let mut small = Board::new(4).unwrap();
    assert!(small.populate_fixed(&config.fleet).is_err());
    assert_eq!(small.ship_count(), 0);
}

#[test]
fn test_randomize_places_whole_fleet() {
    let config = GameConfig::standard();
    let mut rng = SmallRng::seed_from_u64(42);
    for _ in 0..20 {
        let mut board = Board::from_config(&config).unwrap();
        board.randomize(&config.fleet, &mut rng).unwrap();
        assert_eq!(board.fleet_lengths(), config.fleet_lengths());
        assert_no_touching(&board);
        let occupied = (0..10)
            .flat_map(|x| (0..10).map(move |y| (x, y)))
            .filter(|&(x, y)| board.state(x, y) == CellState::Intact)
            .count();
        assert_eq!(occupied, config.total_ship_cells());
    }
}

#[test]
fn test_randomize_rejects_oversized_ship() {
    let config = GameConfig::standard();
    let mut board = Board::new(4).unwrap();
    let mut rng = SmallRng::seed_from_u64(1);
    assert_eq!(
        board.randomize(&config.fleet, &mut rng),
        Err(BoardError::InvalidArgument)
    );
}

#[test]
fn test_randomize_gives_up_on_fleet_that_cannot_fit() {
    let mut rng = SmallRng::seed_from_u64(3);
    let triple = vec![
        ShipClass::new("A", 3),
        ShipClass::new("B", 3),
        ShipClass::new("C", 3),
    ];
    let mut board = Board::new(3).unwrap();
    assert_eq!(board.randomize(&triple, &mut rng), Err(BoardError::InvalidArgument));

    // fits the area bound, but every pair of cells on 2x2 touches
    let pair = vec![ShipClass::new("A", 1), ShipClass::new("B", 1)];
    let mut board = Board::new(2).unwrap();
    assert_eq!(board.randomize(&pair, &mut rng), Err(BoardError::InvalidArgument));
    assert_eq!(board.ship_count(), 0);
}

#[test]
fn test_randomize_is_reproducible() {
    let config = GameConfig::compact();
    let mut a = Board::from_config(&config).unwrap();
    let mut b = Board::from_config(&config).unwrap();
    a.randomize(&config.fleet, &mut SmallRng::seed_from_u64(7)).unwrap();
    b.randomize(&config.fleet, &mut SmallRng::seed_from_u64(7)).unwrap();
    assert_eq!(a, b);
}
