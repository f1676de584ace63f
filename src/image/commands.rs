use super::upload::{UploadError, UploadResponse};
use super::{ImageAttrs, ImageSchema};
use crate::model::{Node, Slice};
use crate::state::{EditorState, Selection, Transaction, UiEvent};
use crate::transform::{drop_point, StepError};
use displaydoc::Display;
use thiserror::Error;

/// Errors of the image commands
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum InsertError {
    /// No place for an image near position {0}
    NoInsertPoint(usize),
    /// Step failed: {0}
    Step(#[from] StepError),
    /// Upload failed: {0}
    Upload(#[from] UploadError),
}

/// Insert an image at the selection and select it.
///
/// A selected block node is replaced by the image. Otherwise the image goes to the block
/// boundary closest to the start of the selection.
pub fn insert_image<S: ImageSchema>(
    state: &EditorState<S>,
    attrs: ImageAttrs,
) -> Result<Transaction<S>, InsertError> {
    let slice = Slice::from_node(S::image_node(attrs));
    let selection = state.selection();
    let selected_block = match selection {
        Selection::Node { pos } => state
            .doc()
            .node_at(pos)
            .filter(|node| node.is_block())
            .map(|node| (pos, pos + node.node_size())),
        Selection::Text { .. } => None,
    };
    let (from, to) = match selected_block {
        Some(range) => range,
        None => {
            let at = drop_point(state.doc(), selection.from(), &slice)
                .ok_or_else(|| InsertError::NoInsertPoint(selection.from()))?;
            (at, at)
        }
    };

    let mut tr = state.tr();
    tr.replace(from, to, slice)?
        .set_selection(Selection::node(from))
        .set_meta(UiEvent::Command);
    Ok(tr)
}

/// Insert the image of a finished upload, at the default size.
pub fn insert_uploaded_image<S: ImageSchema>(
    state: &EditorState<S>,
    response: &UploadResponse,
) -> Result<Transaction<S>, InsertError> {
    let url = response.image_url()?;
    insert_image(state, ImageAttrs::with_src(url))
}
