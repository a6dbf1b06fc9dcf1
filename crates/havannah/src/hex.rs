use std::fmt;

/// A hex cell in cube coordinates `(x, y, z)` with `x + y + z = 0`,
/// stored axially as `q = x`, `r = z`. The origin is the centre of the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Hex {
    q: i32,
    r: i32,
}

/// The six neighbour offsets in axial `(q, r)` form, in rotational order:
/// consecutive directions (and the last and first) point at cells that are
/// themselves adjacent.
pub(crate) const DIRECTIONS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

impl Hex {
    pub const ORIGIN: Hex = Hex { q: 0, r: 0 };

    /// Creates a hex from axial coordinates
    #[inline]
    pub const fn new(q: i32, r: i32) -> Self {
        Hex { q, r }
    }

    /// Creates a hex from cube coordinates, returning None unless
    /// `x + y + z == 0`
    #[inline]
    pub const fn from_cube(x: i32, y: i32, z: i32) -> Option<Self> {
        if x + y + z == 0 {
            Some(Hex { q: x, r: z })
        } else {
            None
        }
    }

    #[inline]
    pub const fn q(self) -> i32 {
        self.q
    }

    #[inline]
    pub const fn r(self) -> i32 {
        self.r
    }

    #[inline]
    pub const fn x(self) -> i32 {
        self.q
    }

    #[inline]
    pub const fn y(self) -> i32 {
        -self.q - self.r
    }

    #[inline]
    pub const fn z(self) -> i32 {
        self.r
    }

    /// Returns `(x, y, z)`
    #[inline]
    pub const fn cube(self) -> (i32, i32, i32) {
        (self.x(), self.y(), self.z())
    }

    /// Number of steps to the origin: the largest absolute cube coordinate
    #[inline]
    pub fn ring_index(self) -> i32 {
        self.x().abs().max(self.y().abs()).max(self.z().abs())
    }

    /// Hex steps between two cells
    pub fn distance(self, other: Hex) -> i32 {
        Hex::new(self.q - other.q, self.r - other.r).ring_index()
    }

    /// The neighbour in direction `dir` (taken modulo 6)
    #[inline]
    pub fn neighbor(self, dir: usize) -> Hex {
        let (dq, dr) = DIRECTIONS[dir % 6];
        Hex::new(self.q + dq, self.r + dr)
    }

    /// All six neighbours in rotational order, on the board or not
    pub fn neighbors(self) -> [Hex; 6] {
        std::array::from_fn(|dir| self.neighbor(dir))
    }

    /// This hex scaled away from the origin by `factor`
    pub fn scale(self, factor: i32) -> Hex {
        Hex::new(self.q * factor, self.r * factor)
    }
}

impl fmt::Debug for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hex{}", self)
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x(), self.y(), self.z())
    }
}
