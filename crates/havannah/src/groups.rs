//! Union-find over placed stones.
//!
//! Every root carries the corners and edges touched by its group as bit
//! masks, so bridge and fork checks after a placement are a popcount on the
//! merged root.

use crate::geometry::CellId;

#[derive(Clone, Debug)]
pub(crate) struct Groups {
    parent: Vec<CellId>,
    size: Vec<u16>,
    corners: Vec<u8>,
    edges: Vec<u8>,
}

impl Groups {
    pub fn new(cells: usize) -> Self {
        Self {
            parent: (0..cells).map(|cell| cell as CellId).collect(),
            size: vec![1; cells],
            corners: vec![0; cells],
            edges: vec![0; cells],
        }
    }

    /// Start a singleton group for a newly placed stone.
    pub fn add(&mut self, cell: CellId, corners: u8, edges: u8) {
        let i = cell as usize;
        self.parent[i] = cell;
        self.size[i] = 1;
        self.corners[i] = corners;
        self.edges[i] = edges;
    }

    /// Root of `cell`'s group, halving the path on the way.
    pub fn find(&mut self, mut cell: CellId) -> CellId {
        while self.parent[cell as usize] != cell {
            let grandparent = self.parent[self.parent[cell as usize] as usize];
            self.parent[cell as usize] = grandparent;
            cell = grandparent;
        }
        cell
    }

    /// Root of `cell`'s group without touching the structure.
    pub fn root(&self, mut cell: CellId) -> CellId {
        while self.parent[cell as usize] != cell {
            cell = self.parent[cell as usize];
        }
        cell
    }

    /// Merge two groups (union by size), returning the surviving root.
    pub fn union(&mut self, a: CellId, b: CellId) -> CellId {
        let (mut a, mut b) = (self.find(a), self.find(b));
        if a == b {
            return a;
        }
        if self.size[a as usize] < self.size[b as usize] {
            std::mem::swap(&mut a, &mut b);
        }

        self.parent[b as usize] = a;
        self.size[a as usize] += self.size[b as usize];
        self.corners[a as usize] |= self.corners[b as usize];
        self.edges[a as usize] |= self.edges[b as usize];
        a
    }

    pub fn corner_count(&self, root: CellId) -> u32 {
        self.corners[root as usize].count_ones()
    }

    pub fn edge_count(&self, root: CellId) -> u32 {
        self.edges[root as usize].count_ones()
    }
}
