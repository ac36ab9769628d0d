//! Grid geometry shared by extraction, propagation and reconstruction
//!
//! Cells are addressed row-major (`index = x + y * width`) with `y` growing
//! downward. A topology decides which cells may anchor a pattern and which
//! neighbours exist, wrapping around the edges when periodic.

/// RGBA color value of a sample or output pixel
pub type Color = [u8; 4];

/// One of the four axis-aligned neighbour offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Offset (-1, 0)
    Left,
    /// Offset (0, +1)
    Down,
    /// Offset (+1, 0)
    Right,
    /// Offset (0, -1)
    Up,
}

impl Direction {
    /// All directions in index order
    pub const ALL: [Self; 4] = [Self::Left, Self::Down, Self::Right, Self::Up];

    /// Position of this direction in per-direction tables
    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Down => 1,
            Self::Right => 2,
            Self::Up => 3,
        }
    }

    /// Direction with the given table index
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Left),
            1 => Some(Self::Down),
            2 => Some(Self::Right),
            3 => Some(Self::Up),
            _ => None,
        }
    }

    /// Reverse offset
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Down => Self::Up,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
        }
    }

    /// Unit offset as `(dx, dy)`
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Left => (-1, 0),
            Self::Down => (0, 1),
            Self::Right => (1, 0),
            Self::Up => (0, -1),
        }
    }

    /// Direction after a quarter turn, matching `rotate` on pattern pixels
    pub const fn rotated(self) -> Self {
        match self {
            Self::Right => Self::Up,
            Self::Up => Self::Left,
            Self::Left => Self::Down,
            Self::Down => Self::Right,
        }
    }

    /// Direction after a horizontal mirror, matching `reflect` on pattern pixels
    pub const fn reflected(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            other => other,
        }
    }
}

/// Output grid geometry as seen by the solver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topology {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Edge length of the patterns anchored at each cell
    pub pattern_size: usize,
    /// Whether the grid wraps around at its edges
    pub periodic: bool,
}

impl Topology {
    /// Create a topology
    pub const fn new(width: usize, height: usize, pattern_size: usize, periodic: bool) -> Self {
        Self {
            width,
            height,
            pattern_size,
            periodic,
        }
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Cell index of a coordinate
    pub const fn index(&self, x: usize, y: usize) -> usize {
        x + y * self.width
    }

    /// Coordinate `(x, y)` of a cell index
    pub const fn coordinates(&self, cell: usize) -> (usize, usize) {
        if self.width == 0 {
            return (0, 0);
        }
        (cell % self.width, cell / self.width)
    }

    /// Whether a pattern anchored at this cell stays inside the grid
    ///
    /// Always true for periodic grids.
    pub const fn is_anchor(&self, cell: usize) -> bool {
        if self.periodic {
            return true;
        }
        let (x, y) = self.coordinates(cell);
        x + self.pattern_size <= self.width && y + self.pattern_size <= self.height
    }

    /// Neighbouring cell in a direction
    ///
    /// Non-periodic grids have no neighbour past the edge, nor one whose
    /// pattern would overhang it.
    pub fn neighbor(&self, cell: usize, direction: Direction) -> Option<usize> {
        let (x, y) = self.coordinates(cell);
        let (dx, dy) = direction.offset();
        let x2 = x as i64 + i64::from(dx);
        let y2 = y as i64 + i64::from(dy);
        let width = self.width as i64;
        let height = self.height as i64;

        if !self.periodic {
            let size = self.pattern_size as i64;
            if x2 < 0 || y2 < 0 || x2 + size > width || y2 + size > height {
                return None;
            }
            return Some(self.index(x2 as usize, y2 as usize));
        }

        let x2 = x2.rem_euclid(width);
        let y2 = y2.rem_euclid(height);
        Some(self.index(x2 as usize, y2 as usize))
    }
}
