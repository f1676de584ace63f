//! # Node views
//!
//! Interactive presentations of single nodes. A view renders its node into an [`Element`],
//! receives pointer events in coordinates relative to its wrapper box and changes the document
//! only by dispatching transactions through its [`ViewContext`].
mod geometry;
mod window;

pub use geometry::{Direction, Point, Rect, Size};
pub use window::{ListenerGuard, ListenerKind, Window};

use crate::html::Element;
use crate::model::{Node, Schema};
use crate::state::{EditorState, Transaction, UiEvent};
use crate::transform::StepError;
use std::fmt;

/// Identifies a mounted node view
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u64);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The part of a view an event was aimed at
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Target {
    /// The rendered node itself, e.g. the image
    Node,
    /// One of the resize handles
    Handle(Direction),
    /// The wrapper box around the node
    Wrapper,
}

/// A pointer or drag event delivered to a node view
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// A pointer button was pressed
    MouseDown {
        /// Where
        point: Point,
        /// On what
        target: Target,
    },
    /// The pointer moved; only delivered through window listeners
    MouseMove {
        /// Where
        point: Point,
    },
    /// A pointer button was released; only delivered through window listeners
    MouseUp {
        /// Where
        point: Point,
    },
    /// A click (press and release on the same spot)
    Click {
        /// Where
        point: Point,
        /// On what
        target: Target,
    },
    /// A native drag of the node started
    DragStart,
}

impl ViewEvent {
    /// The window listener kind this event is routed by, if it is a window event.
    pub fn listener_kind(&self) -> Option<ListenerKind> {
        match self {
            Self::MouseMove { .. } => Some(ListenerKind::MouseMove),
            Self::MouseUp { .. } => Some(ListenerKind::MouseUp),
            _ => None,
        }
    }
}

/// The interactive presentation of one node.
pub trait NodeView<S: Schema> {
    /// Render the view for a container of the given width.
    fn render(&self, layout_width: i32) -> Element;

    /// Update the view for a changed node. Returning false makes the editor recreate the view.
    fn update(&mut self, node: &S::Node) -> bool;

    /// Called when the node becomes (un)selected.
    fn select(&mut self, _selected: bool) {}

    /// Handle an event. Returns true if the event was consumed.
    fn handle_event(&mut self, event: &ViewEvent, ctx: &mut ViewContext<'_, S>) -> bool;

    /// Called when the view is removed from the editor.
    fn destroy(&mut self) {}
}

/// What a view can see of and do to the editor while handling an event.
pub struct ViewContext<'a, S: Schema> {
    state: &'a EditorState<S>,
    pos: usize,
    id: ViewId,
    window: &'a Window,
    layout_width: i32,
    dispatched: Vec<Transaction<S>>,
}

impl<'a, S: Schema> ViewContext<'a, S> {
    pub(crate) fn new(
        state: &'a EditorState<S>,
        pos: usize,
        id: ViewId,
        window: &'a Window,
        layout_width: i32,
    ) -> Self {
        ViewContext {
            state,
            pos,
            id,
            window,
            layout_width,
            dispatched: Vec::new(),
        }
    }

    /// The editor state at the time of the event.
    pub fn state(&self) -> &'a EditorState<S> {
        self.state
    }

    /// The position directly before the view's node.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The id of the view handling the event.
    pub fn id(&self) -> ViewId {
        self.id
    }

    /// The window listener registry.
    pub fn window(&self) -> &'a Window {
        self.window
    }

    /// The width of the editor's content area.
    pub fn layout_width(&self) -> i32 {
        self.layout_width
    }

    /// The node the view presents.
    pub fn node(&self) -> Option<&'a S::Node> {
        self.state.doc().node_at(self.pos)
    }

    /// Queue a transaction for dispatch once the event is handled.
    pub fn dispatch(&mut self, tr: Transaction<S>) {
        self.dispatched.push(tr);
    }

    /// Replace the view's node, e.g. to change its attributes.
    pub fn set_node(&mut self, node: S::Node, event: UiEvent) -> Result<(), StepError> {
        let mut tr = self.state.tr();
        tr.set_node(self.pos, node)?.set_meta(event);
        self.dispatch(tr);
        Ok(())
    }

    pub(crate) fn into_transactions(self) -> Vec<Transaction<S>> {
        self.dispatched
    }
}
