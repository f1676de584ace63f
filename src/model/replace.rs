use super::{IndexError, Node, NodeType, ResolveErr, Schema, Slice};
use displaydoc::Display;
use thiserror::Error;
use tracing::trace;

/// Errors when replacing content in a document
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ReplaceError {
    /// Only closed slices can be inserted
    OpenSlice,
    /// Positions {from} and {to} do not share a parent node
    CrossesNodes {
        /// Start of the replaced range
        from: usize,
        /// End of the replaced range
        to: usize,
    },
    /// Invalid content for node {0}
    InvalidContent(&'static str),
    /// Could not resolve position: {0}
    Resolve(#[from] ResolveErr),
    /// Index error: {0}
    Index(#[from] IndexError),
}

/// Replace the range `from..to` of `doc` with the closed `slice`.
pub(crate) fn replace<S: Schema>(
    doc: &S::Node,
    from: usize,
    to: usize,
    slice: &Slice<S>,
) -> Result<S::Node, ReplaceError> {
    if slice.open_start > 0 || slice.open_end > 0 {
        return Err(ReplaceError::OpenSlice);
    }
    let r_from = doc.resolve(from)?;
    let r_to = doc.resolve(to)?;
    let depth = r_from.depth();
    if from > to || depth != r_to.depth() || r_from.start(depth) != r_to.start(depth) {
        return Err(ReplaceError::CrossesNodes { from, to });
    }

    let parent = r_from.parent();
    let start = r_from.start(depth);
    let content = parent.content().cloned().unwrap_or_default();
    let new_content = content
        .cut(..from - start)
        .append(slice.content.clone())
        .append(content.cut(to - start..));

    let parent_type = parent.r#type();
    if !parent_type.valid_content(&new_content) {
        return Err(ReplaceError::InvalidContent(parent_type.name()));
    }
    trace!(from, to, depth, parent = parent_type.name(), "replace");

    let mut child = parent.copy(|_| new_content);
    for d in (0..depth).rev() {
        let node = r_from.node(d);
        let index = r_from.index(d);
        let content = node
            .content()
            .and_then(|c| c.replace_child(index, child))
            .ok_or(ReplaceError::CrossesNodes { from, to })?;
        child = node.copy(|_| content);
    }
    Ok(child)
}
