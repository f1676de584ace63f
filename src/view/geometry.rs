/// A point in view coordinates (pixels, y grows downwards)
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, new)]
pub struct Point {
    /// Horizontal coordinate
    pub x: i32,
    /// Vertical coordinate
    pub y: i32,
}

/// A width and height in pixels
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, new)]
pub struct Size {
    /// Width
    pub width: i32,
    /// Height
    pub height: i32,
}

/// An axis aligned rectangle
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, new)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width
    pub width: i32,
    /// Height
    pub height: i32,
}

impl Rect {
    /// The right edge
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// The bottom edge
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// The center point, rounded towards the top left.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Whether the point lies inside (right and bottom edges excluded).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

/// One of the eight resize directions, named after the handle position on the box.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Top edge
    Top,
    /// Top right corner
    TopRight,
    /// Right edge
    Right,
    /// Bottom right corner
    BottomRight,
    /// Bottom edge
    Bottom,
    /// Bottom left corner
    BottomLeft,
    /// Left edge
    Left,
    /// Top left corner
    TopLeft,
}

impl Direction {
    /// All directions, clockwise from the top.
    pub const ALL: [Direction; 8] = [
        Direction::Top,
        Direction::TopRight,
        Direction::Right,
        Direction::BottomRight,
        Direction::Bottom,
        Direction::BottomLeft,
        Direction::Left,
        Direction::TopLeft,
    ];

    /// How the width reacts to horizontal movement: `1` grows with `dx`, `-1` shrinks with `dx`
    /// and `0` ignores it.
    pub fn x_sign(self) -> i32 {
        match self {
            Self::TopRight | Self::Right | Self::BottomRight => 1,
            Self::TopLeft | Self::Left | Self::BottomLeft => -1,
            Self::Top | Self::Bottom => 0,
        }
    }

    /// How the height reacts to vertical movement, see [`x_sign`](Self::x_sign).
    pub fn y_sign(self) -> i32 {
        match self {
            Self::BottomLeft | Self::Bottom | Self::BottomRight => 1,
            Self::TopLeft | Self::Top | Self::TopRight => -1,
            Self::Left | Self::Right => 0,
        }
    }

    /// True for the four corners.
    pub fn is_corner(self) -> bool {
        self.x_sign() != 0 && self.y_sign() != 0
    }

    /// The kebab-case name, used as `data-handle` value.
    pub fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::TopRight => "top-right",
            Self::Right => "right",
            Self::BottomRight => "bottom-right",
            Self::Bottom => "bottom",
            Self::BottomLeft => "bottom-left",
            Self::Left => "left",
            Self::TopLeft => "top-left",
        }
    }

    /// Parse a name as returned by [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.name() == name)
    }

    /// The CSS cursor shown over the handle.
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Top | Self::Bottom => "ns-resize",
            Self::Left | Self::Right => "ew-resize",
            Self::TopLeft | Self::BottomRight => "nwse-resize",
            Self::TopRight | Self::BottomLeft => "nesw-resize",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, Point, Rect};

    #[test]
    fn test_direction_names() {
        for dir in Direction::ALL.iter().copied() {
            assert_eq!(Direction::from_name(dir.name()), Some(dir));
        }
        assert_eq!(Direction::from_name("middle"), None);
        assert_eq!(Direction::ALL.iter().filter(|d| d.is_corner()).count(), 4);
    }

    #[test]
    fn test_rect() {
        let rect = Rect::new(10, 20, 30, 40);
        assert_eq!(rect.right(), 40);
        assert_eq!(rect.bottom(), 60);
        assert_eq!(rect.center(), Point::new(25, 40));
        assert!(rect.contains(Point::new(10, 20)));
        assert!(!rect.contains(Point::new(40, 30)));
    }
}
