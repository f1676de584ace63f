//! # Editor state
//!
//! An [`EditorState`] is an immutable document plus selection. It is updated by applying
//! [`Transaction`]s, which are transforms that also track the selection and some metadata.
mod selection;

pub use selection::Selection;

use crate::model::{Node, Schema, Slice};
use crate::transform::{Mapping, Step, StepError, Transform};
use derivative::Derivative;
use displaydoc::Display;
use thiserror::Error;

/// What kind of user interaction caused a transaction
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Content was dropped into the editor
    Drop,
    /// A node was resized through its view
    Resize,
    /// The cursor was placed by a click
    Click,
    /// A command was run
    Command,
}

/// Errors when applying a transaction
#[derive(Debug, Display, Error, Copy, Clone, PartialEq, Eq)]
pub enum ApplyError {
    /// Transaction was created for a different document
    DocMismatch,
}

/// An editor state transaction
#[derive(Derivative)]
#[derivative(Debug(bound = ""), Clone(bound = ""))]
pub struct Transaction<S: Schema> {
    transform: Transform<S>,
    start_selection: Selection,
    selection: Option<Selection>,
    meta: Option<UiEvent>,
}

impl<S: Schema> Transaction<S> {
    fn new(doc: S::Node, selection: Selection) -> Self {
        Transaction {
            transform: Transform::new(doc),
            start_selection: selection,
            selection: None,
            meta: None,
        }
    }

    /// The document this transaction was started from.
    pub fn before(&self) -> &S::Node {
        self.transform.before()
    }

    /// The current document.
    pub fn doc(&self) -> &S::Node {
        self.transform.doc()
    }

    /// The steps in this transaction.
    pub fn steps(&self) -> &[Step<S>] {
        self.transform.steps()
    }

    /// The mapping from the start document to the current one.
    pub fn mapping(&self) -> &Mapping {
        self.transform.mapping()
    }

    /// True if the document was changed.
    pub fn doc_changed(&self) -> bool {
        self.transform.doc_changed()
    }

    /// The selection after this transaction. Unless it was set explicitly, this is the start
    /// selection mapped through the steps.
    pub fn selection(&self) -> Selection {
        match self.selection {
            Some(sel) => sel,
            None => self.start_selection.map(self.mapping()),
        }
    }

    /// Whether the selection was set explicitly.
    pub fn selection_set(&self) -> bool {
        self.selection.is_some()
    }

    /// Update the selection.
    pub fn set_selection(&mut self, selection: Selection) -> &mut Self {
        self.selection = Some(selection);
        self
    }

    /// The interaction that caused this transaction, if any.
    pub fn meta(&self) -> Option<UiEvent> {
        self.meta
    }

    /// Record the interaction that caused this transaction.
    pub fn set_meta(&mut self, event: UiEvent) -> &mut Self {
        self.meta = Some(event);
        self
    }

    /// Replace `from..to` by the slice.
    pub fn replace(
        &mut self,
        from: usize,
        to: usize,
        slice: Slice<S>,
    ) -> Result<&mut Self, StepError> {
        self.transform.replace(from, to, slice)?;
        Ok(self)
    }

    /// Insert a node at `pos`.
    pub fn insert(&mut self, pos: usize, node: S::Node) -> Result<&mut Self, StepError> {
        self.transform.insert(pos, node)?;
        Ok(self)
    }

    /// Delete `from..to`.
    pub fn delete(&mut self, from: usize, to: usize) -> Result<&mut Self, StepError> {
        self.transform.delete(from, to)?;
        Ok(self)
    }

    /// Replace the node after `pos` by a node of the same type and size.
    pub fn set_node(&mut self, pos: usize, node: S::Node) -> Result<&mut Self, StepError> {
        self.transform.set_node(pos, node)?;
        Ok(self)
    }
}

/// The state of an editor: a document and a selection.
#[derive(Derivative)]
#[derivative(
    Debug(bound = ""),
    Clone(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = "")
)]
pub struct EditorState<S: Schema> {
    doc: S::Node,
    selection: Selection,
}

impl<S: Schema> EditorState<S> {
    /// Create a state with a cursor at the start of the document.
    pub fn create(doc: S::Node) -> Self {
        let selection = Selection::default().validate::<S>(&doc);
        EditorState { doc, selection }
    }

    /// The current document.
    pub fn doc(&self) -> &S::Node {
        &self.doc
    }

    /// The current selection.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Start a transaction from this state.
    pub fn tr(&self) -> Transaction<S> {
        Transaction::new(self.doc.clone(), self.selection)
    }

    /// Apply a transaction, producing a new state.
    pub fn apply(&self, tr: &Transaction<S>) -> Result<EditorState<S>, ApplyError> {
        if tr.before() != &self.doc {
            return Err(ApplyError::DocMismatch);
        }
        let doc = tr.doc().clone();
        let selection = tr.selection().validate::<S>(&doc);
        Ok(EditorState { doc, selection })
    }

    /// The node selected by a node selection, if any.
    pub fn selected_node(&self) -> Option<&S::Node> {
        match self.selection {
            Selection::Node { pos } => self.doc.node_at(pos),
            Selection::Text { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ApplyError, EditorState, Selection, UiEvent};
    use crate::schema::{helper::*, ED};

    #[test]
    fn test_apply_maps_selection() {
        let image = img(Default::default());
        let state = EditorState::<ED>::create(doc((p("A"), image.clone(), p("B"))));
        assert_eq!(state.selection(), Selection::cursor(0));

        let mut tr = state.tr();
        tr.set_selection(Selection::node(3));
        let state = state.apply(&tr).unwrap();
        assert_eq!(state.selected_node(), Some(&image));

        let mut tr = state.tr();
        tr.insert(0, p("Z")).unwrap().set_meta(UiEvent::Command);
        assert_eq!(tr.selection(), Selection::node(6));
        assert_eq!(tr.meta(), Some(UiEvent::Command));
        let next = state.apply(&tr).unwrap();
        assert_eq!(next.selected_node(), Some(&image));

        let mut tr = next.tr();
        tr.delete(6, 7).unwrap();
        assert_eq!(tr.selection(), Selection::cursor(6));

        assert_eq!(state.apply(&tr).map(|_| ()), Err(ApplyError::DocMismatch));
    }

    #[test]
    fn test_invalid_node_selection_collapses() {
        let state = EditorState::<ED>::create(doc((p("AB"),)));
        let mut tr = state.tr();
        tr.set_selection(Selection::node(1));
        let state = state.apply(&tr).unwrap();
        assert_eq!(state.selection(), Selection::cursor(1));
    }
}
