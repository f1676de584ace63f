use super::EditorBuilder;
use crate::model::{Schema, Slice};
use crate::state::{EditorState, Transaction};
use derivative::Derivative;

/// Content dropped onto the editor
#[derive(Derivative, new)]
#[derivative(Debug(bound = ""), Clone(bound = ""))]
pub struct DropEvent<S: Schema> {
    /// The document position the content was dropped at
    pub pos: usize,
    /// The dropped content
    pub slice: Slice<S>,
    /// Whether the host classified the drop as a move of the current selection
    pub moved: bool,
}

/// Hooks into the editor's event handling and transaction flow.
pub trait Plugin<S: Schema> {
    /// Called before the default drop handling. Returning true suppresses it.
    fn handle_drop(&self, _state: &EditorState<S>, _event: &DropEvent<S>) -> bool {
        false
    }

    /// Called after transactions were applied, within the same dispatch. A returned transaction
    /// must be created from `new_state` and is applied right away.
    fn append_transaction(
        &self,
        _trs: &[Transaction<S>],
        _old_state: &EditorState<S>,
        _new_state: &EditorState<S>,
    ) -> Option<Transaction<S>> {
        None
    }
}

/// A bundle of node specs and plugins that is installed into an editor.
pub trait Extension<S: Schema> {
    /// Register everything with the builder.
    fn install(self, builder: &mut EditorBuilder<S>);
}
