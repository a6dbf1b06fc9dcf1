//! The Havannah board: stones, connectivity and win detection.

use crate::geometry::{Border, CellId, Geometry};
use crate::groups::Groups;
use crate::hex::Hex;
use crate::ring;
use duel_core::{GameError, Player, Result};
use std::fmt;
use std::sync::Arc;

/// The three winning structures.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum WinPattern {
    /// A group touching two corners.
    Bridge,
    /// A group touching three edges (corners are not edge cells).
    Fork,
    /// A closed loop around at least one cell of any colour.
    Ring,
}

impl fmt::Display for WinPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WinPattern::Bridge => "bridge",
            WinPattern::Fork => "fork",
            WinPattern::Ring => "ring",
        };
        f.write_str(name)
    }
}

/// A Havannah position without turn order.
///
/// Connectivity is kept incrementally in a union-find, so a placement only
/// inspects the group of the new stone: bridges and forks are read from the
/// merged group's corner and edge masks, rings from a flood fill around the
/// stone when it closes a cycle.
#[derive(Clone)]
pub struct HavannahBoard {
    geometry: Arc<Geometry>,
    cells: Vec<Option<Player>>,
    groups: Groups,
    stones: usize,
    win: Option<(Player, WinPattern)>,
}

impl HavannahBoard {
    /// An empty board with the given layout.
    pub fn new(geometry: Arc<Geometry>) -> Self {
        let cells = geometry.len();
        Self {
            geometry,
            cells: vec![None; cells],
            groups: Groups::new(cells),
            stones: 0,
            win: None,
        }
    }

    /// An empty board with `size` cells per side.
    ///
    /// # Errors
    /// `GameError::InvalidBoard` for an unsupported size.
    pub fn with_size(size: usize) -> Result<Self> {
        Ok(Self::new(Arc::new(Geometry::new(size)?)))
    }

    pub fn geometry(&self) -> &Arc<Geometry> {
        &self.geometry
    }

    /// Cells per side.
    pub fn size(&self) -> usize {
        self.geometry.size()
    }

    pub fn contains(&self, hex: Hex) -> bool {
        self.geometry.cell(hex).is_some()
    }

    /// The stone on `hex`; None if empty or off the board.
    pub fn stone(&self, hex: Hex) -> Option<Player> {
        self.geometry
            .cell(hex)
            .and_then(|cell| self.cells[cell as usize])
    }

    /// Number of stones placed.
    pub fn stones(&self) -> usize {
        self.stones
    }

    pub fn is_full(&self) -> bool {
        self.stones == self.cells.len()
    }

    /// The winner and the pattern that decided the game.
    pub fn win(&self) -> Option<(Player, WinPattern)> {
        self.win
    }

    pub fn winner(&self) -> Option<Player> {
        self.win.map(|(player, _)| player)
    }

    /// Empty cells in display order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Hex> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, stone)| stone.is_none())
            .map(|(cell, _)| self.geometry.hex(cell as CellId))
    }

    /// True if both hexes hold `player`'s stones in one connected group.
    pub fn connected(&self, a: Hex, b: Hex) -> bool {
        match (self.geometry.cell(a), self.geometry.cell(b)) {
            (Some(a), Some(b)) => {
                let owner = self.cells[a as usize];
                owner.is_some()
                    && owner == self.cells[b as usize]
                    && self.groups.root(a) == self.groups.root(b)
            }
            _ => false,
        }
    }

    /// Place a stone for `player` on `hex` and report the pattern it
    /// completes, if any.
    ///
    /// Bridge, fork and ring are tested in that order; a move completing
    /// several still yields one win.
    ///
    /// # Errors
    /// `GameError::IllegalMove` if the game is already won, or `hex` is off
    /// the board or occupied.
    pub fn place(&mut self, hex: Hex, player: Player) -> Result<Option<WinPattern>> {
        if let Some((winner, pattern)) = self.win {
            return Err(GameError::IllegalMove(format!(
                "{hex}: {winner} already won with a {pattern}"
            )));
        }
        let cell = self
            .geometry
            .cell(hex)
            .ok_or_else(|| GameError::IllegalMove(format!("{hex} is off the board")))?;
        if let Some(owner) = self.cells[cell as usize] {
            return Err(GameError::IllegalMove(format!("{hex} is occupied by {owner}")));
        }

        self.cells[cell as usize] = Some(player);
        self.stones += 1;

        // Arcs must be read before the new stone joins its neighbours.
        let may_ring =
            ring::may_close_cycle(&self.geometry, &self.cells, &mut self.groups, cell, player);

        let (corners, edges) = match self.geometry.border(cell) {
            Border::Corner(corner) => (1 << corner, 0),
            Border::Edge(edge) => (0, 1 << edge),
            Border::Interior => (0, 0),
        };
        self.groups.add(cell, corners, edges);

        let mut root = cell;
        for &neighbor in self.geometry.neighbors(cell).iter().flatten() {
            if self.cells[neighbor as usize] == Some(player) {
                root = self.groups.union(root, neighbor);
            }
        }

        let pattern = if self.groups.corner_count(root) >= 2 {
            Some(WinPattern::Bridge)
        } else if self.groups.edge_count(root) >= 3 {
            Some(WinPattern::Fork)
        } else if may_ring && ring::closes_ring(&self.geometry, &self.cells, cell, player) {
            Some(WinPattern::Ring)
        } else {
            None
        };

        if let Some(pattern) = pattern {
            self.win = Some((player, pattern));
        }
        Ok(pattern)
    }
}

impl PartialEq for HavannahBoard {
    fn eq(&self, other: &Self) -> bool {
        self.geometry.size() == other.geometry.size()
            && self.cells == other.cells
            && self.win == other.win
    }
}

impl Eq for HavannahBoard {}

impl fmt::Debug for HavannahBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HavannahBoard")
            .field("size", &self.size())
            .field("stones", &self.stones)
            .field("win", &self.win)
            .finish()
    }
}

/// One row per `r`, indented so the board reads as a hexagon:
/// `X` for Player 1, `O` for Player 2, `.` for empty.
impl fmt::Display for HavannahBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut current_row = None;
        for (cell, hex) in self.geometry.hexes().iter().enumerate() {
            if current_row != Some(hex.r()) {
                if current_row.is_some() {
                    writeln!(f)?;
                }
                current_row = Some(hex.r());
                write!(f, "{}", " ".repeat(hex.r().unsigned_abs() as usize))?;
            } else {
                write!(f, " ")?;
            }
            let mark = match self.cells[cell] {
                Some(Player::One) => 'X',
                Some(Player::Two) => 'O',
                None => '.',
            };
            write!(f, "{mark}")?;
        }
        writeln!(f)
    }
}
