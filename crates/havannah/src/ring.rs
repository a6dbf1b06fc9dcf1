//! Ring detection.
//!
//! A player has a ring once a region of cells they do not own can no longer
//! reach the rim of the board through such cells, or once one of their
//! off-rim stones is surrounded by six of their own. The second case covers
//! rings whose interior is filled with the player's stones.
//!
//! Only a stone that closes a cycle can create a ring, so the full test runs
//! after a cheap look at the stone's own-colour neighbours: walking around
//! the stone, its same-colour neighbours split into arcs. A cycle is closed
//! when two arcs already belonged to one group, or when a single arc wraps
//! three or more neighbours around the stone.

use crate::geometry::{CellId, Geometry};
use crate::groups::Groups;
use duel_core::Player;

/// True if `placed` (already coloured `player`, not yet merged into its
/// neighbours' groups) may have closed a cycle.
pub(crate) fn may_close_cycle(
    geometry: &Geometry,
    cells: &[Option<Player>],
    groups: &mut Groups,
    placed: CellId,
    player: Player,
) -> bool {
    let neighbors = geometry.neighbors(placed);
    let own = neighbors.map(|n| n.is_some_and(|cell| cells[cell as usize] == Some(player)));

    let Some(gap) = own.iter().position(|&is_own| !is_own) else {
        // Surrounded on all six sides.
        return true;
    };

    // (first cell, length) of each arc, walking once around from a gap.
    let mut arcs: Vec<(CellId, usize)> = Vec::with_capacity(3);
    let mut current: Option<(CellId, usize)> = None;
    for step in 1..=6 {
        let dir = (gap + step) % 6;
        match (own[dir], neighbors[dir]) {
            (true, Some(cell)) => {
                current = Some(current.map_or((cell, 1), |(first, len)| (first, len + 1)));
            }
            _ => arcs.extend(current.take()),
        }
    }

    if arcs.iter().any(|&(_, len)| len >= 3) {
        return true;
    }

    let roots: Vec<CellId> = arcs.iter().map(|&(cell, _)| groups.find(cell)).collect();
    roots
        .iter()
        .enumerate()
        .any(|(i, root)| roots[i + 1..].contains(root))
}

/// True if `player`'s stones now enclose at least one cell.
///
/// Either a region of cells not owned by `player` next to the new stone is
/// cut off from the rim, or an off-rim stone of `player` (the new one or a
/// neighbour) is surrounded on all six sides by `player`'s stones.
pub(crate) fn closes_ring(
    geometry: &Geometry,
    cells: &[Option<Player>],
    placed: CellId,
    player: Player,
) -> bool {
    let own = |cell: CellId| cells[cell as usize] == Some(player);

    let surrounded = std::iter::once(placed)
        .chain(geometry.neighbors(placed).iter().flatten().copied().filter(|&c| own(c)))
        .any(|cell| {
            !geometry.is_boundary(cell)
                && geometry.neighbors(cell).iter().all(|n| n.is_some_and(own))
        });

    surrounded || encloses_region(geometry, cells, placed, player)
}

/// True if a region of cells not owned by `player`, adjacent to `placed`,
/// cannot reach the rim.
fn encloses_region(
    geometry: &Geometry,
    cells: &[Option<Player>],
    placed: CellId,
    player: Player,
) -> bool {
    // 0 = unseen, otherwise 1 + the index of the flood that reached the cell.
    // Floods that finish without finding a ring have escaped, so meeting
    // their cells means escaping too.
    let mut seen = vec![0u8; geometry.len()];
    let mut stack = Vec::new();

    let starts = geometry
        .neighbors(placed)
        .iter()
        .flatten()
        .filter(|&&cell| cells[cell as usize] != Some(player));

    for (flood, &start) in starts.enumerate() {
        if seen[start as usize] != 0 {
            continue;
        }
        let mark = flood as u8 + 1;
        seen[start as usize] = mark;
        stack.clear();
        stack.push(start);

        let mut escaped = false;
        'flood: while let Some(cell) = stack.pop() {
            if geometry.is_boundary(cell) {
                escaped = true;
                break;
            }
            for &next in geometry.neighbors(cell).iter().flatten() {
                if cells[next as usize] == Some(player) {
                    continue;
                }
                match seen[next as usize] {
                    0 => {
                        seen[next as usize] = mark;
                        stack.push(next);
                    }
                    m if m != mark => {
                        escaped = true;
                        break 'flood;
                    }
                    _ => {}
                }
            }
        }

        if !escaped {
            return true;
        }
    }
    false
}
