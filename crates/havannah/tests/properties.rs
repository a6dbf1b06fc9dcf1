//! Property-based tests for Havannah.
//!
//! Random reachable positions are checked against the game contract and
//! against a from-scratch scan of the board, which must agree with the
//! incremental union-find and ring detection.

use duel_core::{Game, Outcome, Player};
use duel_havannah::{Border, Havannah, HavannahBoard, HavannahState, Hex};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

// =============================================================================
// Strategies for generating random positions
// =============================================================================

/// Play up to `num_moves` random moves, stopping at the end of the game.
fn random_game(size: usize, seed: u64, num_moves: usize) -> Vec<HavannahState> {
    let game = Havannah::new(size).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut states = vec![game.initial_state()];

    for _ in 0..num_moves {
        let state = states.last().unwrap();
        let actions = game.legal_actions(state);
        if actions.is_empty() {
            break;
        }
        let action = actions[rng.gen_range(0..actions.len())];
        let next = game.apply(state, action).unwrap();
        states.push(next);
    }
    states
}

/// A random game on a small board, as the sequence of positions visited.
fn arb_game() -> impl Strategy<Value = (usize, Vec<HavannahState>)> {
    (3usize..=6, any::<u64>(), 0usize..100)
        .prop_map(|(size, seed, moves)| (size, random_game(size, seed, moves)))
}

// =============================================================================
// Reference scans
// =============================================================================

/// Same-colour groups found by breadth-first search over the whole board.
fn scan_groups(board: &HavannahBoard, player: Player) -> Vec<Vec<Hex>> {
    let geometry = board.geometry();
    let mut seen = vec![false; geometry.len()];
    let mut groups = Vec::new();

    for &hex in geometry.hexes() {
        let start = geometry.cell(hex).unwrap();
        if seen[start as usize] || board.stone(hex) != Some(player) {
            continue;
        }
        seen[start as usize] = true;
        let mut group = Vec::new();
        let mut queue = VecDeque::from([start]);
        while let Some(cell) = queue.pop_front() {
            group.push(geometry.hex(cell));
            for &next in geometry.neighbors(cell).iter().flatten() {
                if !seen[next as usize] && board.stone(geometry.hex(next)) == Some(player) {
                    seen[next as usize] = true;
                    queue.push_back(next);
                }
            }
        }
        groups.push(group);
    }
    groups
}

fn corners_and_edges(board: &HavannahBoard, group: &[Hex]) -> (usize, usize) {
    let geometry = board.geometry();
    let mut corners = [false; 6];
    let mut edges = [false; 6];
    for &hex in group {
        match geometry.border(geometry.cell(hex).unwrap()) {
            Border::Corner(c) => corners[c as usize] = true,
            Border::Edge(e) => edges[e as usize] = true,
            Border::Interior => {}
        }
    }
    (
        corners.iter().filter(|&&c| c).count(),
        edges.iter().filter(|&&e| e).count(),
    )
}

/// True if `player` encloses any cell anywhere on the board.
fn scan_ring(board: &HavannahBoard, player: Player) -> bool {
    let geometry = board.geometry();
    let own = |cell| board.stone(geometry.hex(cell)) == Some(player);

    // An off-rim stone with six own neighbours sits inside a ring.
    for cell in 0..geometry.len() as u16 {
        if own(cell)
            && !geometry.is_boundary(cell)
            && geometry.neighbors(cell).iter().all(|n| n.is_some_and(own))
        {
            return true;
        }
    }

    // Otherwise some region of other cells must be cut off from the rim.
    let mut seen = vec![false; geometry.len()];
    for start in 0..geometry.len() as u16 {
        if own(start) || seen[start as usize] {
            continue;
        }
        seen[start as usize] = true;
        let mut reaches_rim = false;
        let mut queue = VecDeque::from([start]);
        while let Some(cell) = queue.pop_front() {
            reaches_rim |= geometry.is_boundary(cell);
            for &next in geometry.neighbors(cell).iter().flatten() {
                if !own(next) && !seen[next as usize] {
                    seen[next as usize] = true;
                    queue.push_back(next);
                }
            }
        }
        if !reaches_rim {
            return true;
        }
    }
    false
}

fn scan_wins(board: &HavannahBoard, player: Player) -> bool {
    scan_groups(board, player).iter().any(|group| {
        let (corners, edges) = corners_and_edges(board, group);
        corners >= 2 || edges >= 3
    }) || scan_ring(board, player)
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Legal actions are empty exactly when the position is terminal
    #[test]
    fn prop_liveness((size, states) in arb_game()) {
        let game = Havannah::new(size).unwrap();
        for state in &states {
            prop_assert_eq!(game.legal_actions(state).is_empty(), game.is_terminal(state));
            prop_assert_eq!(game.outcome(state).is_some(), game.is_terminal(state));
        }
    }

    /// Turns strictly alternate and stones never change or disappear
    #[test]
    fn prop_stones_never_revert((_size, states) in arb_game()) {
        for pair in states.windows(2) {
            let (before, after) = (&pair[0], &pair[1]);
            prop_assert_eq!(after.to_move(), before.to_move().opponent());
            prop_assert_eq!(after.board().stones(), before.board().stones() + 1);

            for &hex in before.board().geometry().hexes() {
                if let Some(player) = before.board().stone(hex) {
                    prop_assert_eq!(after.board().stone(hex), Some(player));
                }
            }
        }
    }

    /// Only the player who just moved can have won
    #[test]
    fn prop_winner_just_moved((size, states) in arb_game()) {
        let game = Havannah::new(size).unwrap();
        let last = states.last().unwrap();
        if let Some(Outcome::Win(winner)) = game.outcome(last) {
            prop_assert_eq!(winner, game.current_player(last).opponent());
        }
    }

    /// Incremental connectivity agrees with a breadth-first scan
    #[test]
    fn prop_groups_match_scan((_size, states) in arb_game()) {
        let board = states.last().unwrap().board();
        for player in Player::BOTH {
            let groups = scan_groups(board, player);
            for (i, group) in groups.iter().enumerate() {
                for &hex in group {
                    prop_assert!(board.connected(group[0], hex));
                }
                for other in &groups[i + 1..] {
                    prop_assert!(!board.connected(group[0], other[0]));
                }
            }
        }
    }

    /// Incremental win detection agrees with a scan of the whole board
    #[test]
    fn prop_wins_match_scan((_size, states) in arb_game()) {
        for state in &states {
            let board = state.board();
            match board.winner() {
                Some(winner) => {
                    prop_assert!(scan_wins(board, winner));
                    prop_assert!(!scan_wins(board, winner.opponent()));
                }
                None => {
                    prop_assert!(!scan_wins(board, Player::One));
                    prop_assert!(!scan_wins(board, Player::Two));
                }
            }
        }
    }
}
