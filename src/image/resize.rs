use crate::view::{Direction, ListenerGuard, Point, Size};
use tracing::trace;

/// The size after dragging the handle in `direction` by `(dx, dy)`, starting from `start`.
///
/// Each affected dimension becomes `max(min, start ± delta)`; handles on the top or left side
/// grow the box when moved up or left. Edge handles leave the other dimension untouched.
pub fn resize(direction: Direction, start: Size, dx: i32, dy: i32, min: i32) -> Size {
    let axis = |start: i32, sign: i32, delta: i32| {
        if sign == 0 {
            start
        } else {
            i32::max(min, start.saturating_add(sign.saturating_mul(delta)))
        }
    };
    Size::new(
        axis(start.width, direction.x_sign(), dx),
        axis(start.height, direction.y_sign(), dy),
    )
}

/// A resize drag in progress
#[derive(Debug)]
pub struct ResizeDrag {
    /// The grabbed handle
    pub direction: Direction,
    /// Where the pointer was pressed
    pub origin: Point,
    /// The image size when the pointer was pressed
    pub start: Size,
    // dropping it detaches the window listeners
    _listeners: ListenerGuard,
}

/// The resize state machine of one image view.
#[derive(Debug)]
pub enum ResizeState {
    /// No drag in progress
    Idle,
    /// A handle is being dragged
    Dragging(ResizeDrag),
}

impl Default for ResizeState {
    fn default() -> Self {
        Self::Idle
    }
}

impl ResizeState {
    /// Start dragging. The guard keeps the move and release listeners alive for the duration of
    /// the drag.
    pub fn begin(
        &mut self,
        direction: Direction,
        origin: Point,
        start: Size,
        listeners: ListenerGuard,
    ) {
        trace!(handle = direction.name(), ?origin, ?start, "resize start");
        *self = Self::Dragging(ResizeDrag {
            direction,
            origin,
            start,
            _listeners: listeners,
        });
    }

    /// The size for the current pointer position, if dragging.
    pub fn size_at(&self, point: Point, min: i32) -> Option<Size> {
        match self {
            Self::Idle => None,
            Self::Dragging(drag) => Some(resize(
                drag.direction,
                drag.start,
                point.x.saturating_sub(drag.origin.x),
                point.y.saturating_sub(drag.origin.y),
                min,
            )),
        }
    }

    /// Stop dragging, releasing the listeners. Returns whether a drag was in progress.
    pub fn end(&mut self) -> bool {
        match std::mem::take(self) {
            Self::Idle => false,
            Self::Dragging(drag) => {
                trace!(handle = drag.direction.name(), "resize end");
                true
            }
        }
    }

    /// True while dragging
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }
}

#[cfg(test)]
mod tests {
    use super::{resize, ResizeState};
    use crate::view::{Direction, ListenerKind, Point, Size, ViewId, Window};

    const MIN: i32 = 50;

    #[test]
    fn test_clamp_all_directions() {
        let start = Size::new(120, 80);
        for dir in Direction::ALL.iter().copied() {
            for &(dx, dy) in &[(-1000, -1000), (1000, 1000), (-70, 30), (0, 0), (i32::MAX, i32::MIN)] {
                let size = resize(dir, start, dx, dy, MIN);
                assert!(size.width >= MIN, "{:?} {} {}", dir, dx, dy);
                assert!(size.height >= MIN, "{:?} {} {}", dir, dx, dy);
            }
        }
    }

    #[test]
    fn test_right_changes_width_only() {
        let start = Size::new(300, 200);
        for &dx in &[-400, -260, -1, 0, 25, 900] {
            let size = resize(Direction::Right, start, dx, 37, MIN);
            assert_eq!(size.width - start.width, i32::max(MIN, 300 + dx) - 300);
            assert_eq!(size.height, 200);
        }
    }

    #[test]
    fn test_top_left_inverts() {
        let start = Size::new(300, 200);
        for &(dx, dy) in &[(10, 20), (-10, -20), (280, 190), (-5, 400)] {
            let size = resize(Direction::TopLeft, start, dx, dy, MIN);
            assert_eq!(size.width - 300, i32::max(MIN, 300 - dx) - 300);
            assert_eq!(size.height - 200, i32::max(MIN, 200 - dy) - 200);
        }
    }

    #[test]
    fn test_edges_and_corners() {
        let start = Size::new(100, 100);
        let moved = |dir| resize(dir, start, 10, 10, MIN);
        assert_eq!(moved(Direction::Top), Size::new(100, 90));
        assert_eq!(moved(Direction::TopRight), Size::new(110, 90));
        assert_eq!(moved(Direction::Right), Size::new(110, 100));
        assert_eq!(moved(Direction::BottomRight), Size::new(110, 110));
        assert_eq!(moved(Direction::Bottom), Size::new(100, 110));
        assert_eq!(moved(Direction::BottomLeft), Size::new(90, 110));
        assert_eq!(moved(Direction::Left), Size::new(90, 100));
        assert_eq!(moved(Direction::TopLeft), Size::new(90, 90));
    }

    #[test]
    fn test_state_machine() {
        let window = Window::new();
        let mut state = ResizeState::default();
        assert_eq!(state.size_at(Point::new(5, 5), MIN), None);
        assert!(!state.end());

        let guard = window.listen(ViewId(3), &[ListenerKind::MouseMove, ListenerKind::MouseUp]);
        state.begin(Direction::Bottom, Point::new(10, 10), Size::new(300, 200), guard);
        assert!(state.is_dragging());
        assert_eq!(
            state.size_at(Point::new(99, 40), MIN),
            Some(Size::new(300, 230))
        );
        assert_eq!(window.listener_count(), 2);

        assert!(state.end());
        assert!(!state.is_dragging());
        assert_eq!(window.listener_count(), 0);
    }
}
