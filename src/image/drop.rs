use super::ImageSchema;
use crate::editor::{DropEvent, Plugin};
use crate::model::Node;
use crate::state::{EditorState, Transaction, UiEvent};
use crate::transform::{Assoc, Mapping};
use std::cell::Cell;
use std::marker::PhantomData;
use std::rc::Rc;
use tracing::{debug, warn};

/// The position of the image whose drag started last.
///
/// Written by the image view on drag start and consumed by [`MoveOnDrop`]. Clones share the
/// same slot; a new drag overwrites an older one.
#[derive(Debug, Clone, Default)]
pub struct PendingMove(Rc<Cell<Option<usize>>>);

impl PendingMove {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded position
    pub fn get(&self) -> Option<usize> {
        self.0.get()
    }

    /// Record a drag origin
    pub fn set(&self, pos: usize) {
        self.0.set(Some(pos));
    }

    /// Forget the recorded position
    pub fn clear(&self) {
        self.0.set(None);
    }

    /// Get and forget the recorded position
    pub fn take(&self) -> Option<usize> {
        self.0.take()
    }
}

/// Turns a copying drop of a single image into a move.
///
/// The editor's default drop inserts a copy of the dragged image. When that happens and a drag
/// origin was recorded, the image at the origin is deleted in a transaction appended to the
/// drop. Default handling is never suppressed.
pub struct MoveOnDrop<S: ImageSchema> {
    pending: PendingMove,
    armed: Cell<Option<usize>>,
    _schema: PhantomData<S>,
}

impl<S: ImageSchema> MoveOnDrop<S> {
    /// Create the plugin, reading drag origins from `pending`.
    pub fn new(pending: PendingMove) -> Self {
        MoveOnDrop {
            pending,
            armed: Cell::new(None),
            _schema: PhantomData,
        }
    }
}

impl<S: ImageSchema> Plugin<S> for MoveOnDrop<S> {
    fn handle_drop(&self, _state: &EditorState<S>, event: &DropEvent<S>) -> bool {
        let origin = self.pending.take();
        let single_image = event
            .slice
            .single_node()
            .map_or(false, |node| S::image_attrs(node).is_some());
        match origin {
            Some(origin) if !event.moved && single_image => {
                debug!(origin, pos = event.pos, "image drop will delete its origin");
                self.armed.set(Some(origin));
            }
            _ => {
                debug!(?origin, moved = event.moved, single_image, "drop left alone");
                self.armed.set(None);
            }
        }
        false
    }

    fn append_transaction(
        &self,
        trs: &[Transaction<S>],
        _old_state: &EditorState<S>,
        new_state: &EditorState<S>,
    ) -> Option<Transaction<S>> {
        let origin = self.armed.take()?;
        // Only the dispatch of the drop itself may consume the origin.
        if !trs.iter().any(|tr| tr.meta() == Some(UiEvent::Drop)) {
            debug!(origin, "drop was not applied, origin kept");
            return None;
        }
        let mut mapping = Mapping::new();
        for tr in trs {
            mapping.append_mapping(tr.mapping());
        }
        let result = mapping.map_result(origin, Assoc::After);
        if result.deleted {
            debug!(origin, "drag origin already gone");
            return None;
        }
        let pos = result.pos;
        let node = new_state.doc().node_at(pos)?;
        if S::image_attrs(node).is_none() {
            warn!(origin, pos, "drag origin no longer holds an image");
            return None;
        }
        let mut tr = new_state.tr();
        match tr.delete(pos, pos + node.node_size()) {
            Ok(tr) => {
                tr.set_meta(UiEvent::Drop);
            }
            Err(err) => {
                warn!(%err, pos, "could not delete drag origin");
                return None;
            }
        }
        debug!(origin, pos, "deleted drag origin");
        Some(tr)
    }
}
