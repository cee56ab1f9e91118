use crate::config::{GRID_HEIGHT, GRID_SIZE, GRID_WIDTH};

/// A grid cell. Pixel coordinates are `cell * GRID_SIZE`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell at the centre of the board, where every session starts.
    pub const fn center() -> Self {
        Self::new((GRID_WIDTH / 2) as i32, (GRID_HEIGHT / 2) as i32)
    }

    pub fn offset(self, v: Velocity) -> Self {
        Self::new(self.x + v.dx as i32, self.y + v.dy as i32)
    }

    pub fn in_bounds(self) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < GRID_WIDTH as i32 && self.y < GRID_HEIGHT as i32
    }

    /// Top-left pixel of the cell.
    pub fn to_pixel(self) -> (i32, i32) {
        (self.x * GRID_SIZE as i32, self.y * GRID_SIZE as i32)
    }
}

/// Per-frame motion in cells. At most one axis is nonzero; both zero is the
/// idle state a session starts in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Velocity {
    pub dx: i8,
    pub dy: i8,
}

impl Velocity {
    pub const IDLE: Velocity = Velocity { dx: 0, dy: 0 };
    pub const LEFT: Velocity = Velocity { dx: -1, dy: 0 };
    pub const RIGHT: Velocity = Velocity { dx: 1, dy: 0 };
    pub const UP: Velocity = Velocity { dx: 0, dy: -1 };
    pub const DOWN: Velocity = Velocity { dx: 0, dy: 1 };

    pub fn moving_horizontally(self) -> bool {
        self.dx != 0
    }

    pub fn moving_vertically(self) -> bool {
        self.dy != 0
    }
}
