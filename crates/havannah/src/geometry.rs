//! Static layout of a hexagonal board: which cells exist, who their
//! neighbours are, and which of them are corners or edge cells.
//!
//! The layout depends only on the side length, so one `Geometry` is built per
//! game and shared by every position through an `Arc`.

use crate::hex::Hex;
use duel_core::{GameError, Result};

/// Largest supported side length.
pub const MAX_BOARD_SIZE: usize = 64;

/// Dense index of a cell on the board.
pub type CellId = u16;

/// Where a cell sits relative to the rim of the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Border {
    Interior,
    /// One of the six corners, numbered in rotational order.
    Corner(u8),
    /// A non-corner rim cell, labelled `axis * 2 + (coordinate < 0)` with
    /// axis 0, 1, 2 for x, y, z.
    Edge(u8),
}

#[derive(Debug)]
pub struct Geometry {
    size: usize,
    hexes: Vec<Hex>,
    /// `(2N-1)^2` table from axial coordinates to cell ids.
    lookup: Vec<Option<CellId>>,
    neighbors: Vec<[Option<CellId>; 6]>,
    borders: Vec<Border>,
}

impl Geometry {
    /// Builds the layout of a board with `size` cells per side.
    ///
    /// # Errors
    /// `GameError::InvalidBoard` unless `2 <= size <= MAX_BOARD_SIZE`.
    pub fn new(size: usize) -> Result<Self> {
        if !(2..=MAX_BOARD_SIZE).contains(&size) {
            return Err(GameError::InvalidBoard(format!(
                "side length {size} outside 2..={MAX_BOARD_SIZE}"
            )));
        }

        let radius = size as i32 - 1;
        let width = 2 * size - 1;

        // Row by row (r), left to right (q): the order cells are displayed in.
        let mut hexes = Vec::with_capacity(3 * size * (size - 1) + 1);
        for r in -radius..=radius {
            let q_min = (-radius).max(-radius - r);
            let q_max = radius.min(radius - r);
            for q in q_min..=q_max {
                hexes.push(Hex::new(q, r));
            }
        }

        let mut lookup = vec![None; width * width];
        for (id, hex) in hexes.iter().enumerate() {
            lookup[Self::slot(radius, width, *hex)] = Some(id as CellId);
        }

        let mut geometry = Self {
            size,
            hexes,
            lookup,
            neighbors: Vec::new(),
            borders: Vec::new(),
        };

        geometry.neighbors = geometry
            .hexes
            .iter()
            .map(|hex| hex.neighbors().map(|n| geometry.cell(n)))
            .collect();
        geometry.borders = geometry
            .hexes
            .iter()
            .map(|hex| Self::classify(radius, *hex))
            .collect();

        Ok(geometry)
    }

    fn slot(radius: i32, width: usize, hex: Hex) -> usize {
        (hex.q() + radius) as usize * width + (hex.r() + radius) as usize
    }

    fn classify(radius: i32, hex: Hex) -> Border {
        if hex.ring_index() != radius {
            return Border::Interior;
        }

        let (x, y, z) = hex.cube();
        let on_rim = [x, y, z].map(|c| c.abs() == radius);
        if on_rim.iter().filter(|&&rim| rim).count() >= 2 {
            // Corners are the six directions scaled to the rim.
            let corner = (0..6)
                .find(|&dir| Hex::ORIGIN.neighbor(dir).scale(radius) == hex)
                .unwrap_or(0);
            return Border::Corner(corner as u8);
        }

        let axis = on_rim.iter().position(|&rim| rim).unwrap_or(0);
        let negative = [x, y, z][axis] < 0;
        Border::Edge(axis as u8 * 2 + negative as u8)
    }

    /// Cells per side.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells on the board.
    pub fn len(&self) -> usize {
        self.hexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hexes.is_empty()
    }

    /// The cell id of `hex`, or None if it is off the board.
    pub fn cell(&self, hex: Hex) -> Option<CellId> {
        let radius = self.size as i32 - 1;
        if hex.ring_index() > radius {
            return None;
        }
        self.lookup[Self::slot(radius, 2 * self.size - 1, hex)]
    }

    pub fn hex(&self, cell: CellId) -> Hex {
        self.hexes[cell as usize]
    }

    /// All cells in display order.
    pub fn hexes(&self) -> &[Hex] {
        &self.hexes
    }

    /// Neighbours in rotational order; `None` where the direction leaves
    /// the board.
    pub fn neighbors(&self, cell: CellId) -> &[Option<CellId>; 6] {
        &self.neighbors[cell as usize]
    }

    pub fn border(&self, cell: CellId) -> Border {
        self.borders[cell as usize]
    }

    /// True for every rim cell, corners included.
    pub fn is_boundary(&self, cell: CellId) -> bool {
        self.borders[cell as usize] != Border::Interior
    }
}
